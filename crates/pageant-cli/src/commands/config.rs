use anyhow::Result;

use pageant_core::AppConfig;

pub fn path() -> Result<()> {
    println!("{}", AppConfig::config_path().display());
    Ok(())
}

pub fn init(config: &AppConfig) -> Result<()> {
    let path = AppConfig::config_path();
    if path.exists() {
        println!("config already exists at {}", path.display());
        return Ok(());
    }
    config.save()?;
    println!("wrote {}", path.display());
    Ok(())
}
