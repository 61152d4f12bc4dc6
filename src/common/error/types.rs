use std::path::PathBuf;

use thiserror::Error;

/// Main error type for pptx-tools operations.
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP archive error while writing the package
    #[error("ZIP error: {0}")]
    Zip(String),

    /// Image bytes could not be decoded
    #[error("Image error: {0}")]
    Image(String),

    /// XML generation error
    #[error("XML error: {0}")]
    Xml(String),

    /// Configuration could not be read or parsed
    #[error("Configuration error: {0}")]
    Config(String),

    /// A value was rejected by the document model
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Target path exists and overwriting was not allowed
    #[error("'{}' already exists (pass overwrite to replace it)", path.display())]
    AlreadyExists { path: PathBuf },

    /// Slide or shape handle does not belong to this presentation
    #[error("Not found: {0}")]
    NotFound(String),

    /// No external renderer is installed for secondary exports
    #[error("Renderer unavailable: {0}")]
    RendererUnavailable(String),

    /// The external renderer ran but did not produce the expected output
    #[error("Export failed: {0}")]
    Export(String),
}

impl Error {
    /// Whether this error comes from the optional export renderer rather than
    /// from the primary document.
    pub fn is_renderer_error(&self) -> bool {
        matches!(self, Self::RendererUnavailable(_) | Self::Export(_))
    }
}

/// Result type for pptx-tools operations.
pub type Result<T> = std::result::Result<T, Error>;
