//! Block cipher capability used to encrypt the nonce.

use crate::{Block, Result};

/// A deterministic single-block encryption function `(key, block) -> block`.
///
/// Poly1305-AES is agnostic to the block cipher; its security assumes the cipher behaves as a
/// pseudorandom permutation for a fixed key.
///
/// Any `Fn(&[u8], &Block) -> Block` implements this trait and accepts keys of every length.
pub trait NonceCipher: Sync {
    /// Check that `key` is usable with this cipher.
    ///
    /// Called once when a context is constructed so that a bad key is reported up front rather
    /// than when the first tag is requested.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`](crate::Error::InvalidKeyLength) if the cipher does
    /// not accept keys of this length.
    fn check_key(&self, key: &[u8]) -> Result<()> {
        let _ = key;
        Ok(())
    }

    /// Encrypt a single 16-byte block under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKeyLength`](crate::Error::InvalidKeyLength) if the cipher does
    /// not accept `key`.
    fn encrypt_block(&self, key: &[u8], block: &Block) -> Result<Block>;
}

impl<F> NonceCipher for F
where
    F: Fn(&[u8], &Block) -> Block + Sync,
{
    fn encrypt_block(&self, key: &[u8], block: &Block) -> Result<Block> {
        Ok(self(key, block))
    }
}

/// The cipher bound by [`Poly1305Aes::new`][crate::Poly1305Aes::new] and
/// [`compute_tag`][crate::compute_tag].
#[cfg(feature = "aes")]
pub(crate) fn default_cipher() -> Option<&'static dyn NonceCipher> {
    Some(&Aes)
}

/// The cipher bound by [`Poly1305Aes::new`][crate::Poly1305Aes::new] and
/// [`compute_tag`][crate::compute_tag].
#[cfg(not(feature = "aes"))]
pub(crate) fn default_cipher() -> Option<&'static dyn NonceCipher> {
    None
}

#[cfg(feature = "aes")]
pub use self::aes_impl::Aes;

#[cfg(feature = "aes")]
mod aes_impl {
    use super::NonceCipher;
    use crate::{Block, Error, Result};
    use aes::{
        Aes128, Aes192, Aes256,
        cipher::{BlockEncrypt, BlockSizeUser, KeyInit, consts::U16},
    };

    /// AES in single-block ECB mode, keyed with a 16, 24 or 32-byte key (AES-128, AES-192 or
    /// AES-256 respectively).
    #[derive(Clone, Copy, Debug, Default)]
    pub struct Aes;

    impl NonceCipher for Aes {
        fn check_key(&self, key: &[u8]) -> Result<()> {
            match key.len() {
                16 | 24 | 32 => Ok(()),
                _ => Err(Error::InvalidKeyLength),
            }
        }

        fn encrypt_block(&self, key: &[u8], block: &Block) -> Result<Block> {
            match key.len() {
                16 => encrypt::<Aes128>(key, block),
                24 => encrypt::<Aes192>(key, block),
                32 => encrypt::<Aes256>(key, block),
                _ => Err(Error::InvalidKeyLength),
            }
        }
    }

    fn encrypt<C>(key: &[u8], block: &Block) -> Result<Block>
    where
        C: BlockEncrypt + BlockSizeUser<BlockSize = U16> + KeyInit,
    {
        let cipher = C::new_from_slice(key).map_err(|_| Error::InvalidKeyLength)?;
        let mut out = *block;
        cipher.encrypt_block(&mut out);
        Ok(out)
    }
}
