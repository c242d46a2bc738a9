use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Directory does not exist: {}", path.display())]
    MissingDirectory { path: PathBuf },

    #[error("Failed to read directory {}: {source}", path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Failed to encode {}: {source}", path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid color '{0}': expected #rrggbb, #rgb, r,g,b, white or black")]
    ParseColor(String),
}

impl Error {
    pub(crate) fn encode_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Error::Encode {
            path: path.into(),
            source: image::ImageError::IoError(source),
        }
    }
}
