use anyhow::{Context, Result};
use rhtmx_formguard::{Backend, Config, HttpBackend};

pub async fn execute(config: &Config, label: &str) -> Result<()> {
    let backend = HttpBackend::new(&config.backend)?;

    // Go to the backend directly so failures are reported instead of blanked
    let text = backend
        .translation(&config.page.lang, label)
        .await
        .with_context(|| format!("No translation for '{}' in '{}'", label, config.page.lang))?;

    println!("{}", text);
    Ok(())
}
