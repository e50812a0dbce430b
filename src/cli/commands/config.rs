//! Show or initialize the configuration file.

use std::io::Write;

use crate::config::{self, Config};

/// Print the effective configuration, or write the defaults with `init`.
pub(crate) fn cmd_config(effective: &Config, init: bool, out: &mut dyn Write) -> anyhow::Result<()> {
    if init {
        if let Some(path) = config::config_path().filter(|p| p.exists()) {
            writeln!(out, "Config file already exists at {}", path.display())?;
            return Ok(());
        }
        let path = config::save(&Config::default()).map_err(crate::error::Error::from)?;
        writeln!(out, "Wrote default config to {}", path.display())?;
        return Ok(());
    }

    match config::config_path() {
        Some(path) => writeln!(out, "# {}", path.display())?,
        None => writeln!(out, "# no config directory available")?,
    }
    write!(out, "{}", toml::to_string_pretty(effective)?)?;
    Ok(())
}
