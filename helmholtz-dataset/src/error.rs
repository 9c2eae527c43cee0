use helmholtz_core::CalibrationError;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("i/o error on {}: {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
    #[error("invalid json in {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("unable to read image {}: {source}", .path.display())]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error(transparent)]
    Calibration(#[from] CalibrationError),
    #[error("cannot find {0} file")]
    MissingCalibrationFile(String),
    #[error("unable to read MAT-file {}: {reason}", .path.display())]
    Mat { path: PathBuf, reason: String },
    #[error("no usable variable found in {}", .0.display())]
    NoMatVariable(PathBuf),
    #[error("malformed matrix in {}: {reason}", .path.display())]
    MalformedMatrix { path: PathBuf, reason: String },
    #[error("no view directories found in {}", .0.display())]
    NoViewDirectories(PathBuf),
    #[error("no images found in {}", .0.display())]
    NoImages(PathBuf),
}

pub type Result<T> = std::result::Result<T, DatasetError>;

pub(crate) fn io_error(path: &Path) -> impl FnOnce(io::Error) -> DatasetError + '_ {
    move |source| DatasetError::Io {
        path: path.to_owned(),
        source,
    }
}

pub(crate) fn json_error(path: &Path) -> impl FnOnce(serde_json::Error) -> DatasetError + '_ {
    move |source| DatasetError::Json {
        path: path.to_owned(),
        source,
    }
}
