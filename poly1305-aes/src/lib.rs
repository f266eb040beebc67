#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![doc = include_str!("../README.md")]
#![doc(
    html_logo_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg",
    html_favicon_url = "https://raw.githubusercontent.com/RustCrypto/media/8f1a9894/logo.svg"
)]

extern crate alloc;

#[cfg(feature = "hazmat")]
pub mod hazmat;

#[cfg_attr(not(feature = "hazmat"), allow(unreachable_pub))]
mod accumulator;
mod cipher;
mod error;
#[cfg_attr(not(feature = "hazmat"), allow(unreachable_pub))]
mod field;
#[cfg_attr(not(feature = "hazmat"), allow(unreachable_pub))]
mod tag;

pub use crate::{
    accumulator::Accumulator,
    cipher::NonceCipher,
    error::{Error, Result},
    tag::{constant_time_eq, hex_encode},
};
pub use universal_hash;

#[cfg(feature = "aes")]
pub use crate::cipher::Aes;

use alloc::{string::String, vec::Vec};
use core::fmt::{self, Debug};
use universal_hash::KeyInit;

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Size of the blocks Poly1305 acts upon
pub const BLOCK_SIZE: usize = 16;

/// Size of the `r` key in bytes
pub const KEY_SIZE: usize = 16;

/// Size of the nonce in bytes
pub const NONCE_SIZE: usize = 16;

/// Size of a Poly1305-AES tag in bytes
pub const TAG_SIZE: usize = 16;

/// Poly1305 `r` keys (16-bytes)
pub type Key = universal_hash::Key<Accumulator>;

/// Poly1305 blocks (16-bytes)
pub type Block = universal_hash::Block<Accumulator>;

/// Poly1305-AES nonces (16-bytes)
pub type Nonce = Block;

/// Poly1305-AES tags (16-bytes)
pub type Tag = universal_hash::Block<Accumulator>;

/// **Poly1305-AES**: one-time message authentication code.
///
/// The context buffers the message; [`Poly1305Aes::digest`] evaluates the Poly1305 polynomial
/// over everything seen so far and masks it with the encrypted nonce. Calling
/// [`Poly1305Aes::update`] repeatedly is equivalent to a single call with the concatenation of
/// the inputs.
///
/// Each `(cipher_key, nonce)` pair must authenticate **at most one** message.
///
/// # Cloning
///
/// Cloning the context copies the data input so far, which lets the tags of messages sharing a
/// common prefix be computed without re-inputting the prefix.
///
/// <div class="warning">
/// The clone uses the same key and nonce. Releasing tags for two different messages under the
/// same `(cipher_key, nonce)` pair breaks the security of Poly1305-AES: only one of the clones
/// may ever be used to authenticate a message.
/// </div>
#[derive(Clone)]
pub struct Poly1305Aes<'c> {
    /// Key for the block cipher
    cipher_key: Vec<u8>,

    /// Accumulator template holding the clamped `r`
    accumulator: Accumulator,

    /// Nonce encrypted to produce the final pad
    nonce: Nonce,

    /// Message bytes seen so far
    buffer: Vec<u8>,

    /// Block cipher used to encrypt the nonce
    cipher: Option<&'c dyn NonceCipher>,
}

impl Poly1305Aes<'static> {
    /// Initialize Poly1305-AES with the default block cipher (AES, when the `aes` feature is
    /// enabled; otherwise no cipher is bound and [`Poly1305Aes::digest`] fails).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`] if `r` or `nonce` is not 16 bytes, or if the cipher
    /// rejects `cipher_key`.
    pub fn new(cipher_key: &[u8], r: &[u8], nonce: &[u8]) -> Result<Self> {
        Self::new_with_cipher(cipher_key, r, nonce, cipher::default_cipher())
    }
}

impl<'c> Poly1305Aes<'c> {
    /// Initialize Poly1305-AES with an explicitly chosen block cipher, or with none.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`] if `r` or `nonce` is not 16 bytes, or if `cipher`
    /// rejects `cipher_key`.
    pub fn new_with_cipher(
        cipher_key: &[u8],
        r: &[u8],
        nonce: &[u8],
        cipher: Option<&'c dyn NonceCipher>,
    ) -> Result<Self> {
        if r.len() != KEY_SIZE {
            log::debug!("poly1305-aes: r must be {KEY_SIZE} bytes, got {}", r.len());
            return Err(Error::InvalidKeyLength);
        }

        if nonce.len() != NONCE_SIZE {
            log::debug!(
                "poly1305-aes: nonce must be {NONCE_SIZE} bytes, got {}",
                nonce.len()
            );
            return Err(Error::InvalidKeyLength);
        }

        if let Some(cipher) = cipher {
            cipher.check_key(cipher_key).inspect_err(|_| {
                log::debug!(
                    "poly1305-aes: cipher rejected a {}-byte key",
                    cipher_key.len()
                );
            })?;
        }

        Ok(Self {
            cipher_key: cipher_key.to_vec(),
            accumulator: Accumulator::new(Key::from_slice(r)),
            nonce: *Nonce::from_slice(nonce),
            buffer: Vec::new(),
            cipher,
        })
    }

    /// Input data into the Poly1305-AES context.
    ///
    /// No computation happens until [`Poly1305Aes::digest`] is called.
    pub fn update(&mut self, data: &[u8]) {
        self.buffer.extend_from_slice(data);
    }

    /// Input data in a chained manner, e.g. to supply the message at construction time.
    #[must_use]
    pub fn chain(mut self, data: &[u8]) -> Self {
        self.update(data);
        self
    }

    /// Compute the tag of all data input so far.
    ///
    /// This does not consume or modify the context: it may be called repeatedly, and interleaved
    /// with further calls to [`Poly1305Aes::update`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::CipherUnavailable`] if no block cipher is bound, or any error reported by
    /// the cipher.
    pub fn digest(&self) -> Result<Tag> {
        let Some(cipher) = self.cipher else {
            log::warn!("poly1305-aes: digest requested without a block cipher");
            return Err(Error::CipherUnavailable);
        };

        log::trace!("poly1305-aes: computing tag over {} bytes", self.buffer.len());

        let acc = accumulator::accumulate(&self.buffer, &self.accumulator.multiplier());
        tag::finalize(&acc, &self.cipher_key, &self.nonce, cipher)
    }

    /// Like [`Poly1305Aes::digest`], but returns the tag as 32 lowercase hexadecimal characters.
    ///
    /// # Errors
    ///
    /// Same as [`Poly1305Aes::digest`].
    pub fn hexdigest(&self) -> Result<String> {
        self.digest().map(|tag| hex_encode(&tag))
    }

    /// Check `expected` against the tag of all data input so far, in constant time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MacMismatch`] if the tags differ, or any error from
    /// [`Poly1305Aes::digest`].
    pub fn verify(&self, expected: &[u8]) -> Result<()> {
        if constant_time_eq(&self.digest()?, expected) {
            Ok(())
        } else {
            Err(Error::MacMismatch)
        }
    }
}

impl Debug for Poly1305Aes<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Poly1305Aes")
            .field("buffered", &self.buffer.len())
            .field("cipher_bound", &self.cipher.is_some())
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Poly1305Aes<'_> {
    fn drop(&mut self) {
        self.cipher_key.zeroize();
        self.nonce.as_mut_slice().zeroize();
        self.buffer.zeroize();
    }
}

/// Compute the Poly1305-AES tag of `message` in one shot, using the default block cipher.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] for malformed key material and
/// [`Error::CipherUnavailable`] if no default cipher is compiled in.
pub fn compute_tag(cipher_key: &[u8], r: &[u8], nonce: &[u8], message: &[u8]) -> Result<Tag> {
    Poly1305Aes::new(cipher_key, r, nonce)?.chain(message).digest()
}

/// Compute the Poly1305-AES tag of `message` in one shot, using `cipher` to encrypt the nonce.
///
/// # Errors
///
/// Returns [`Error::InvalidKeyLength`] for malformed key material, or any error reported by the
/// cipher.
pub fn compute_tag_with(
    cipher: &dyn NonceCipher,
    cipher_key: &[u8],
    r: &[u8],
    nonce: &[u8],
    message: &[u8],
) -> Result<Tag> {
    Poly1305Aes::new_with_cipher(cipher_key, r, nonce, Some(cipher))?
        .chain(message)
        .digest()
}
