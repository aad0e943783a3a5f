use std::fs;
use std::path::{Path, PathBuf};

/// File extension a source file must carry.
pub const SOURCE_EXTENSION: &str = "bf";

/// Problems loading a source file before it ever reaches the sanitizer.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("cannot run code from a file that does not have the extension .bf ({})", .path.display())]
    WrongExtension { path: PathBuf },

    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("file does not contain any code to execute. ({})", .path.display())]
    Empty { path: PathBuf },
}

/// Read the source text at `path`, refusing non-`.bf` and empty files.
pub fn load_source(path: &Path) -> Result<String, LoadError> {
    if path.extension().and_then(|e| e.to_str()) != Some(SOURCE_EXTENSION) {
        return Err(LoadError::WrongExtension { path: path.to_path_buf() });
    }

    let code = fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    if code.is_empty() {
        return Err(LoadError::Empty { path: path.to_path_buf() });
    }

    Ok(code)
}
