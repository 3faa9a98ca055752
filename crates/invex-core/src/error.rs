//! Error types for the invex-core library.

use thiserror::Error;

/// Main error type for the invex library.
#[derive(Error, Debug)]
pub enum InvexError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors related to PDF text retrieval.
///
/// These are boundary errors: the pipeline never propagates them per
/// document, they are folded into a failed `RawDocument` instead.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors raised while compiling the pattern library or currency table.
///
/// These are fatal: a malformed pattern invalidates every subsequent
/// result, so construction stops before any document is processed.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A pattern expression failed to compile.
    #[error("invalid pattern for {field} (rank {rank}): {reason}")]
    InvalidPattern {
        field: String,
        rank: u32,
        reason: String,
    },

    /// A field pattern has no capture group to extract a value from.
    #[error("pattern for {field} (rank {rank}) has no capture group")]
    MissingCaptureGroup { field: String, rank: u32 },

    /// A field has no patterns at all.
    #[error("no patterns defined for field {0}")]
    EmptyField(String),

    /// A category rule expression failed to compile.
    #[error("invalid category rule {name}: {reason}")]
    InvalidCategoryRule { name: String, reason: String },

    /// The invoice keyword expression failed to compile.
    #[error("invalid invoice keyword expression: {0}")]
    InvalidKeywordExpression(String),
}

/// Result type for the invex library.
pub type Result<T> = std::result::Result<T, InvexError>;
