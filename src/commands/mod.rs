pub mod flatten;
pub mod init;
pub mod strip;

use std::path::{Path, PathBuf};

/// Directory that relative paths from the config file are resolved against.
pub fn config_dir(config: &Path) -> &Path {
    match config.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

/// Command-line paths are taken as given; config paths are relative to the config file.
pub fn resolve_path(arg: Option<&Path>, config_dir: &Path, configured: &Path) -> PathBuf {
    match arg {
        Some(path) => path.to_path_buf(),
        None => config_dir.join(configured),
    }
}
