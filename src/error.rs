use thiserror::Error;

#[derive(Error, Debug)]
pub enum CsslensError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSS analysis error: {0}")]
    Css(#[from] vcss::VcssError),

    #[error("Root font size must be a positive number, got {0}")]
    InvalidRootFontSize(f64),

    #[error("Logger could not be installed: {0}")]
    Logger(String),
}

// Create a type alias for convenience
pub type Result<T> = std::result::Result<T, CsslensError>;
