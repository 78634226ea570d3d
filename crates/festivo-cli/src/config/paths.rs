//! Config file location.

use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Result, bail};

/// Config file name inside the config directory.
const CONFIG_FILE: &str = "config.toml";

/// Application directory under the user config root.
const APP_DIR: &str = "festivo";

/// Resolves the config file path.
///
/// Lookup order: `{dir}/config.toml`, then
/// `$XDG_CONFIG_HOME/festivo/config.toml`, then
/// `$HOME/.config/festivo/config.toml`.
///
/// # Errors
///
/// Returns an error if `dir` is `None` and neither `XDG_CONFIG_HOME` nor
/// `HOME` yields a usable directory.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    config_path_from(
        dir,
        std::env::var_os("XDG_CONFIG_HOME"),
        std::env::var_os("HOME"),
    )
}

/// Environment-independent core of [`resolve_config_path`].
///
/// `XDG_CONFIG_HOME` is ignored unless it is an absolute path, per the XDG
/// base directory rules; an empty `HOME` counts as unset.
fn config_path_from(
    dir: Option<&PathBuf>,
    xdg_config_home: Option<OsString>,
    home: Option<OsString>,
) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }

    if let Some(root) = xdg_config_home
        .map(PathBuf::from)
        .filter(|p| p.is_absolute())
    {
        return Ok(root.join(APP_DIR).join(CONFIG_FILE));
    }

    match home.filter(|h| !h.is_empty()) {
        Some(h) => Ok(PathBuf::from(h)
            .join(".config")
            .join(APP_DIR)
            .join(CONFIG_FILE)),
        None => bail!("cannot locate config directory: neither XDG_CONFIG_HOME nor HOME is set"),
    }
}
