use std::path::PathBuf;

use tracing::debug;

/// Load `.env` files into the process environment.
///
/// Looks in the current directory first, then in `home_dir` if given.
/// Variables that are already set are never overwritten, so the real
/// environment always wins over file contents. Returns the files that were
/// loaded.
pub fn load_dotenv(home_dir: Option<&std::path::Path>) -> Vec<PathBuf> {
    let mut loaded = Vec::new();

    match dotenvy::dotenv() {
        Ok(path) => {
            debug!("Loaded .env from current directory: {}", path.display());
            loaded.push(path);
        }
        Err(e) if e.not_found() => {}
        Err(e) => debug!("Failed to load ./.env: {}", e),
    }

    if let Some(dir) = home_dir {
        let env_file = dir.join(".env");
        if env_file.is_file() {
            match dotenvy::from_path(&env_file) {
                Ok(()) => {
                    debug!("Loaded .env from home dir: {}", env_file.display());
                    loaded.push(env_file);
                }
                Err(e) => debug!("Failed to load {}: {}", env_file.display(), e),
            }
        }
    }

    loaded
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn load_dotenv_reads_home_dir_file_without_overwriting() {
        let tmp = tempdir().unwrap();
        fs::write(
            tmp.path().join(".env"),
            "USUARIOS_DOTENV_TEST_NEW=from_file\nPATH=clobbered\n",
        )
        .unwrap();

        let before_path = std::env::var("PATH").ok();
        let loaded = load_dotenv(Some(tmp.path()));

        assert!(loaded.iter().any(|p| p.starts_with(tmp.path())));
        assert_eq!(
            std::env::var("USUARIOS_DOTENV_TEST_NEW").as_deref(),
            Ok("from_file")
        );
        assert_eq!(std::env::var("PATH").ok(), before_path);
    }

    #[test]
    fn load_dotenv_without_files_is_harmless() {
        let tmp = tempdir().unwrap();
        let loaded = load_dotenv(Some(tmp.path()));
        assert!(loaded.iter().all(|p| !p.starts_with(tmp.path())));
    }
}
