use thiserror::Error;

/// Error type for the binary TLV codec.
///
/// Every decode failure carries the buffer offset at which it was
/// detected, so callers can point at the offending bytes. Failures are
/// deterministic: the same input always produces the same error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CodecError {
    /// Buffer ended inside a multi-byte tag number.
    #[error("truncated tag at offset {offset}: buffer ends inside the tag number")]
    TruncatedTag { offset: usize },

    /// Tag number does not fit the 32-bit tag representation.
    #[error("tag number at offset {offset} exceeds the supported 32-bit range")]
    TagNumberOverflow { offset: usize },

    /// Buffer ended inside a length field.
    #[error("truncated length at offset {offset}: need {needed} magnitude bytes, {available} remain")]
    TruncatedLength {
        offset: usize,
        needed: usize,
        available: usize,
    },

    /// Length-of-length byte was zero (indefinite-length encoding).
    #[error("indefinite length at offset {offset}: only definite-length encoding is supported")]
    UnsupportedIndefiniteLength { offset: usize },

    /// Length field declares more than 4 magnitude bytes.
    #[error("length field at offset {offset} spans {width} magnitude bytes (maximum is 4)")]
    LengthTooWide { offset: usize, width: usize },

    /// Content length does not fit a 32-bit length field.
    #[error("content of {len} bytes exceeds the largest encodable length")]
    OversizedContent { len: usize },

    /// Declared content length exceeds the remaining buffer.
    #[error("truncated content at offset {offset}: declared {declared} bytes, {available} remain")]
    TruncatedContent {
        offset: usize,
        declared: usize,
        available: usize,
    },

    /// A child node's encoded span passes the end of its parent's value field.
    #[error("child at offset {offset} runs past the enclosing value end at offset {limit}")]
    ChildOverrun { offset: usize, limit: usize },

    /// Decoding stopped before consuming the expected span.
    #[error("decoding stopped at offset {offset}, expected to stop at offset {expected}")]
    TrailingBytes { offset: usize, expected: usize },

    /// A decode entry point expecting a specific tag met a different one.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: String },
}

/// Result type alias for TLV codec operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Error type for the PEM armor layer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArmorError {
    /// No BEGIN marker found in the armor text.
    #[error("beginning of a block not found")]
    MissingBegin,

    /// A block opened with BEGIN but its END marker is missing.
    #[error("end of block \"{label}\" not found")]
    MissingEnd { label: String },

    /// The block body could not be decoded from Base64.
    #[error("block \"{label}\" body is not valid base64: {detail}")]
    InvalidBase64 { label: String, detail: String },

    /// The armored payload failed to decode as a TLV node.
    #[error("armored payload is not a valid encoding: {0}")]
    Codec(#[from] CodecError),
}

/// Result type alias for PEM armor operations.
pub type ArmorResult<T> = Result<T, ArmorError>;
