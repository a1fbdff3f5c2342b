use std::path::PathBuf;

use thiserror::Error;

use crate::cli::Mode;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum ManipError {
    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Cannot open input file for reading: {}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Need some speed with the {mode} mode: use -s")]
    MissingSpeed { mode: Mode },

    #[error("Cannot open output file for writing: {}", .path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write output file: {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot encode output file: {}", .path.display())]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, ManipError>;
