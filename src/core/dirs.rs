use crate::core::error::{Result, SmoothError};
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "smooth";

/// Directory older releases kept their settings in, under the home directory
pub const LEGACY_DIR_NAME: &str = ".smooth";

/// Per-user configuration directory for smooth.
///
/// An explicit override (from `--config-dir` or `SMOOTH_CONFIG_DIR`) is used
/// as-is; otherwise the platform base directory gets a `smooth` child.
pub fn get_config_directory(override_dir: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }

    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::home_dir().map(|home| home.join(".config"))),
        "macos" => dirs::home_dir().map(|home| home.join("Library/Application Support")),
        _ => dirs::config_dir(),
    };

    base.map(|b| b.join(APP_DIR_NAME))
        .ok_or(SmoothError::ConfigDirectoryNotFound)
}

/// `~/.smooth`, where settings lived before the platform config directory was used
pub fn get_legacy_config_directory() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(LEGACY_DIR_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_override_is_used_verbatim() {
        let dir = get_config_directory(Some(Path::new("/tmp/smooth-test"))).unwrap();
        assert_eq!(dir, PathBuf::from("/tmp/smooth-test"));
    }

    #[test]
    fn test_default_directory_ends_with_app_name() {
        if let Ok(dir) = get_config_directory(None) {
            assert!(dir.ends_with(APP_DIR_NAME));
        }
    }
}
