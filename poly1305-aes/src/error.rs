//! Error type.

use core::fmt;

/// Result type with the `poly1305-aes` crate's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;

/// Poly1305-AES errors.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub enum Error {
    /// The `r` key or the nonce is not exactly 16 bytes, or the bound block cipher rejected the
    /// cipher key.
    InvalidKeyLength,

    /// No block cipher is bound to the context.
    CipherUnavailable,

    /// Tag verification failed.
    MacMismatch,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Error::InvalidKeyLength => "invalid key or nonce length",
            Error::CipherUnavailable => "no block cipher bound to Poly1305-AES context",
            Error::MacMismatch => "MAC tag mismatch",
        })
    }
}

impl core::error::Error for Error {}
