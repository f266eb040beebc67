//! Finalization of the polynomial value into a tag, and tag comparison.

use crate::{Block, Result, Tag, cipher::NonceCipher, field::FieldElement};
use alloc::string::String;
use subtle::ConstantTimeEq;

/// Turn an accumulated polynomial value into a Poly1305-AES tag.
///
/// The nonce is encrypted under `cipher_key`, the result is read as a little-endian 128-bit
/// integer and added to `accumulated` modulo `2^128`.
///
/// # Errors
///
/// Propagates any error from [`NonceCipher::encrypt_block`].
pub fn finalize(
    accumulated: &FieldElement,
    cipher_key: &[u8],
    nonce: &Block,
    cipher: &dyn NonceCipher,
) -> Result<Tag> {
    let pad = cipher.encrypt_block(cipher_key, nonce)?;

    let mut s = [0u8; 16];
    s.copy_from_slice(&pad);

    let tag = accumulated.to_u128().wrapping_add(u128::from_le_bytes(s));
    Ok(tag.to_le_bytes().into())
}

/// Lowercase hexadecimal encoding of a tag (32 characters, no separators).
#[must_use]
pub fn hex_encode(tag: &Tag) -> String {
    hex::encode(tag)
}

/// Compare two byte strings without leaking the position of the first difference.
///
/// Returns `false` immediately when the lengths differ: tag lengths are fixed and public, so
/// only the content comparison needs to be constant-time.
#[must_use]
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }

    a.ct_eq(b).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use hex_literal::hex;

    const PAD: [u8; 16] = hex!("ffffffffffffffffffffffffffffffff");

    fn fixed_pad(_key: &[u8], _block: &Block) -> Block {
        PAD.into()
    }

    #[test]
    fn finalize_wraps_modulo_2_128() {
        let mut two = [0u8; 16];
        two[0] = 2;
        let acc = FieldElement::from_le_bytes(&two);

        let tag = finalize(&acc, &[], &Block::default(), &fixed_pad).unwrap();

        let mut expected = [0u8; 16];
        expected[0] = 1;
        assert_eq!(tag.as_slice(), &expected[..]);
    }

    #[test]
    fn finalize_drops_bits_above_128() {
        // 2^128 + 0 contributes nothing once reduced modulo 2^128.
        let acc = FieldElement::from_full_block(&[0u8; 16]);
        let tag = finalize(&acc, &[], &Block::default(), &fixed_pad).unwrap();
        assert_eq!(tag.as_slice(), &PAD[..]);
    }

    #[test]
    fn hex_is_lowercase() {
        let tag = Tag::from(hex!("f4c633c3044fc145f84f335cb81953de"));
        assert_eq!(hex_encode(&tag), "f4c633c3044fc145f84f335cb81953de");
    }

    #[test]
    fn ct_eq_same() {
        let tag = hex!("dd3fab2251f11ac759f0887129cc2ee7");
        assert!(constant_time_eq(&tag, &tag));
        assert!(constant_time_eq(&[], &[]));
    }

    #[test]
    fn ct_eq_differs() {
        let a = hex!("dd3fab2251f11ac759f0887129cc2ee7");
        let mut b = a;
        b[15] ^= 0x80;
        assert!(!constant_time_eq(&a, &b));
        assert!(!constant_time_eq(&a, &a[..15]));
    }
}
