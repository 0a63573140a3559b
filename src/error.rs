//! Error types for the configuration, asset and scripting layers.
//!
//! Game rules never fail: illegal presses are no-ops.

use derive_more::{Display, Error};

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum CornersErrorKind {
    /// Configuration could not be parsed or failed validation.
    #[display("invalid configuration: {_0}")]
    Config(String),
    /// An asset could not be loaded or looked up.
    #[display("asset error: {_0}")]
    Asset(String),
    /// A replay script could not be parsed.
    #[display("invalid script: {_0}")]
    Script(String),
    /// A value could not be passed across the host boundary.
    #[display("host boundary: {_0}")]
    Host(String),
}

/// Error with caller location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("{} at {}:{}", kind, file, line)]
pub struct CornersError {
    pub kind: CornersErrorKind,
    /// Line number where the error was raised.
    pub line: u32,
    /// Source file where the error was raised.
    pub file: &'static str,
}

impl CornersError {
    /// Creates a new error at the caller's location.
    #[track_caller]
    pub fn new(kind: CornersErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<CornersErrorKind> for CornersError {
    #[track_caller]
    fn from(kind: CornersErrorKind) -> Self {
        Self::new(kind)
    }
}

impl From<toml::de::Error> for CornersError {
    #[track_caller]
    fn from(err: toml::de::Error) -> Self {
        Self::new(CornersErrorKind::Config(err.message().to_string()))
    }
}

impl From<serde_wasm_bindgen::Error> for CornersError {
    #[track_caller]
    fn from(err: serde_wasm_bindgen::Error) -> Self {
        Self::new(CornersErrorKind::Host(err.to_string()))
    }
}
