//! Unified error type for the torchslider-lib crate.
//!
//! [`TorchsliderError`] wraps module-specific errors (`CameraError`,
//! `UnknownAction`) and string-typed domain errors (`Config`). `From` impls
//! allow `?` to propagate across module boundaries seamlessly.

use std::fmt;

use crate::camera::CameraError;
use crate::slider::UnknownAction;

/// Unified error type for torchslider-lib operations.
#[derive(Debug)]
pub enum TorchsliderError {
    /// Camera subsystem error (enumeration, torch set-mode).
    Camera(CameraError),
    /// Standard I/O error (config persistence).
    Io(std::io::Error),
    /// Action code outside the slider's vocabulary.
    Slider(UnknownAction),
    /// Configuration validation error.
    Config(String),
}

impl fmt::Display for TorchsliderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TorchsliderError::Camera(e) => write!(f, "{e}"),
            TorchsliderError::Io(e) => write!(f, "I/O error: {e}"),
            TorchsliderError::Slider(e) => write!(f, "{e}"),
            TorchsliderError::Config(e) => write!(f, "Config error: {e}"),
        }
    }
}

impl std::error::Error for TorchsliderError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TorchsliderError::Camera(e) => Some(e),
            TorchsliderError::Io(e) => Some(e),
            TorchsliderError::Slider(e) => Some(e),
            TorchsliderError::Config(_) => None,
        }
    }
}

impl From<CameraError> for TorchsliderError {
    fn from(e: CameraError) -> Self {
        TorchsliderError::Camera(e)
    }
}

impl From<std::io::Error> for TorchsliderError {
    fn from(e: std::io::Error) -> Self {
        TorchsliderError::Io(e)
    }
}

impl From<UnknownAction> for TorchsliderError {
    fn from(e: UnknownAction) -> Self {
        TorchsliderError::Slider(e)
    }
}

/// Crate-level Result alias using [`TorchsliderError`].
pub type Result<T> = std::result::Result<T, TorchsliderError>;
