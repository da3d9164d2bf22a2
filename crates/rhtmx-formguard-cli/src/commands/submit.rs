use anyhow::{bail, Result};
use colored::Colorize;
use rhtmx_formguard::{Config, SubmitOutcome};

use crate::report;
use crate::FormArgs;

pub async fn execute(config: &Config, args: &FormArgs) -> Result<()> {
    let session = super::open_session(config, args)?;

    println!("{} {}", "Submitting".green().bold(), args.form.display());
    println!();

    session.validate_all().await;

    match session.submit().await {
        SubmitOutcome::Redirect(url) => {
            println!("{} redirect to {}", "Accepted:".green(), url.cyan());
        }
        SubmitOutcome::Completed => {
            println!("{}", "Accepted".green());
        }
        SubmitOutcome::Blocked => {
            report::print_form(&session.snapshot().await);
            bail!("Form is not valid, nothing was sent");
        }
        SubmitOutcome::Rejected(count) => {
            report::print_form(&session.snapshot().await);
            bail!("Server rejected the form ({} field error(s))", count);
        }
        SubmitOutcome::Failed(e) => {
            return Err(e.into());
        }
    }

    Ok(())
}
