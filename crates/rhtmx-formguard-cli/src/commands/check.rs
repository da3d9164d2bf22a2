use anyhow::{bail, Result};
use colored::Colorize;
use rhtmx_formguard::{Config, FieldState};

use crate::report;
use crate::FormArgs;

pub async fn execute(config: &Config, args: &FormArgs) -> Result<()> {
    let session = super::open_session(config, args)?;

    println!("{} {}", "Checking".green().bold(), args.form.display());
    println!();

    let valid = session.validate_all().await;
    let form = session.snapshot().await;
    report::print_form(&form);

    if !valid {
        let failed = form
            .validated_fields()
            .filter(|f| f.state != FieldState::Valid)
            .count();
        bail!("{} field(s) failed validation", failed);
    }

    Ok(())
}
