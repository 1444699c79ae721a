use crate::core::error::WranglerError;
use std::path::{Path, PathBuf};

pub fn get_config_directory() -> Result<PathBuf, WranglerError> {
    let base = match std::env::consts::OS {
        "linux" | "freebsd" | "netbsd" | "openbsd" => std::env::var("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|_| {
                dirs::home_dir()
                    .map(|home| home.join(".config"))
                    .ok_or(WranglerError::ConfigDirectoryNotFound)
            })?,
        "macos" => dirs::home_dir()
            .ok_or(WranglerError::ConfigDirectoryNotFound)?
            .join("Library/Application Support"),
        _ => dirs::config_dir().ok_or(WranglerError::ConfigDirectoryNotFound)?,
    };

    Ok(base.join("branch-wrangler"))
}

/// Expand a leading `~/` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => dirs::home_dir()
            .map(|home| home.join(rest))
            .unwrap_or_else(|| path.to_path_buf()),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_directory_is_namespaced() {
        let dir = get_config_directory().unwrap();
        assert!(dir.ends_with("branch-wrangler"));
    }

    #[test]
    fn test_expand_home_leaves_absolute_paths() {
        let path = Path::new("/etc/token");
        assert_eq!(expand_home(path), PathBuf::from("/etc/token"));
    }

    #[test]
    fn test_expand_home_replaces_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(
                expand_home(Path::new("~/.github-token")),
                home.join(".github-token")
            );
        }
    }
}
