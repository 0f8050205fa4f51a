use crate::config::DEFAULT_CONFIG_TOML;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn init_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            config_path.display()
        );
    }

    io::write_file(config_path, DEFAULT_CONFIG_TOML)?;
    println!("Created {} configuration file", config_path.display());

    Ok(())
}
