//! `meshgen init` — scaffold a meshgen.toml.

use std::path::Path;

use anyhow::{Result, bail};
use meshgen_core::MeshgenConfig;

use super::DEFAULT_SETTINGS_FILE;

pub fn init(path: &str, health_port: u16) -> Result<()> {
    let output = Path::new(path).join(DEFAULT_SETTINGS_FILE);
    if output.exists() {
        bail!("{} already exists", output.display());
    }

    let config = MeshgenConfig::scaffold(health_port, "./crconfig.json");
    std::fs::write(&output, config.to_toml_string()?)?;
    println!("✓ Generated {}", output.display());
    Ok(())
}
