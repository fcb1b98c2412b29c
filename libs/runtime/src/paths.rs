use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HomeDirError {
    #[error("cannot determine user home directory (HOME/USERPROFILE unset)")]
    NoUserHome,

    #[error("failed to create home directory '{path}': {source}")]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn user_home() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Expand a leading `~` against the user's home directory.
fn expand_tilde(raw: &str) -> Result<PathBuf, HomeDirError> {
    if raw == "~" {
        return user_home().ok_or(HomeDirError::NoUserHome);
    }
    if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\")) {
        let home = user_home().ok_or(HomeDirError::NoUserHome)?;
        return Ok(home.join(rest));
    }
    Ok(PathBuf::from(raw))
}

/// Resolve the service home directory into an absolute path.
///
/// - `None` means "platform default": `<user home>/<default_subdir>`.
/// - `~` prefixes are expanded; relative paths are made absolute against the
///   current working directory.
/// - When `create` is set, the directory (and parents) is created.
pub fn resolve_home_dir(
    configured: Option<String>,
    default_subdir: &str,
    create: bool,
) -> Result<PathBuf, HomeDirError> {
    let mut path = match configured {
        Some(raw) => expand_tilde(raw.trim())?,
        None => user_home()
            .ok_or(HomeDirError::NoUserHome)?
            .join(default_subdir),
    };

    if path.is_relative() {
        let cwd = std::env::current_dir().map_err(|source| HomeDirError::Create {
            path: path.clone(),
            source,
        })?;
        path = cwd.join(path);
    }

    if create {
        ensure_dir(&path)?;
    }
    Ok(path)
}

fn ensure_dir(path: &Path) -> Result<(), HomeDirError> {
    std::fs::create_dir_all(path).map_err(|source| HomeDirError::Create {
        path: path.to_path_buf(),
        source,
    })
}
