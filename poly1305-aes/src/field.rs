//! Arithmetic in the prime field GF(2^130 - 5).
//!
//! Portable implementation using five 26-bit limbs stored in `u32`, with limb products
//! accumulated in `u64`. Adapted from the 32-bit variant of `poly1305-donna`:
//!
//! <https://github.com/floodyberry/poly1305-donna>
//!
//! Limbs are only partially reduced between operations: after an addition or multiplication the
//! value is congruent to the true result modulo `p`, is below `2^130 + 2^26`, and every limb
//! fits in 27 bits. [`FieldElement::to_le_bytes`] performs the final constant-time reduction to
//! the canonical representative in `[0, p)`.

use core::{
    fmt::{self, Debug},
    ops::{Add, Mul, MulAssign},
};
use subtle::{Choice, ConstantTimeEq};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Number of bytes in the canonical encoding of a field element (130 bits, rounded up).
pub const ENCODED_SIZE: usize = 17;

/// Mask selecting the low 26 bits of a limb.
const LIMB_MASK: u32 = 0x3ff_ffff;

/// Bit 128 of a padded block, as it lands in the top limb.
const HIBIT: u32 = 1 << 24;

/// An element of the field of integers modulo `p = 2^130 - 5`.
#[derive(Clone, Copy, Default)]
pub struct FieldElement([u32; 5]);

impl FieldElement {
    /// The additive identity.
    pub const ZERO: Self = Self([0; 5]);

    /// Decode a 128-bit little-endian integer.
    #[must_use]
    pub fn from_le_bytes(bytes: &[u8; 16]) -> Self {
        Self::from_block(bytes, false)
    }

    /// Decode a full 16-byte message block padded with `0x01`, i.e. `2^128 + block`.
    #[must_use]
    pub fn from_full_block(block: &[u8; 16]) -> Self {
        Self::from_block(block, true)
    }

    /// Decode a message block that is shorter than 16 bytes, appending the `0x01` pad byte
    /// directly after the message bytes.
    ///
    /// # Panics
    ///
    /// Panics if `partial` is 16 bytes or longer.
    #[must_use]
    pub fn from_partial_block(partial: &[u8]) -> Self {
        assert!(partial.len() < 16, "partial block must be shorter than 16 bytes");
        let mut block = [0u8; 16];
        block[..partial.len()].copy_from_slice(partial);
        block[partial.len()] = 1;
        Self::from_block(&block, false)
    }

    fn from_block(block: &[u8; 16], hibit: bool) -> Self {
        let hibit = if hibit { HIBIT } else { 0 };

        Self([
            le32(block, 0) & LIMB_MASK,
            (le32(block, 3) >> 2) & LIMB_MASK,
            (le32(block, 6) >> 4) & LIMB_MASK,
            (le32(block, 9) >> 6) & LIMB_MASK,
            (le32(block, 12) >> 8) | hibit,
        ])
    }

    /// Encode the canonical representative of this element (fully reduced modulo `p`) as a
    /// 17-byte little-endian integer.
    #[must_use]
    pub fn to_le_bytes(self) -> [u8; ENCODED_SIZE] {
        let [h0, h1, h2, h3, h4] = self.reduce().0;

        let mut out = [0u8; ENCODED_SIZE];
        out[0..4].copy_from_slice(&(h0 | (h1 << 26)).to_le_bytes());
        out[4..8].copy_from_slice(&((h1 >> 6) | (h2 << 20)).to_le_bytes());
        out[8..12].copy_from_slice(&((h2 >> 12) | (h3 << 14)).to_le_bytes());
        out[12..16].copy_from_slice(&((h3 >> 18) | (h4 << 8)).to_le_bytes());
        out[16] = (h4 >> 24) as u8;
        out
    }

    /// Canonical representative reduced modulo `2^128`.
    #[must_use]
    pub fn to_u128(self) -> u128 {
        let bytes = self.to_le_bytes();
        let mut low = [0u8; 16];
        low.copy_from_slice(&bytes[..16]);
        u128::from_le_bytes(low)
    }

    /// Propagate carries through every limb, folding the overflow past bit 130 back in as
    /// `overflow * 5` (since `2^130 = 5 mod p`).
    fn carry(self) -> Self {
        let [mut h0, mut h1, mut h2, mut h3, mut h4] = self.0;

        let mut c = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += c;
        c = h1 >> 26;
        h1 &= LIMB_MASK;
        h2 += c;
        c = h2 >> 26;
        h2 &= LIMB_MASK;
        h3 += c;
        c = h3 >> 26;
        h3 &= LIMB_MASK;
        h4 += c;
        c = h4 >> 26;
        h4 &= LIMB_MASK;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= LIMB_MASK;
        h1 += c;

        Self([h0, h1, h2, h3, h4])
    }

    /// Fully reduce modulo `p` in constant time.
    fn reduce(self) -> Self {
        // Two passes leave every limb below 2^26 and the value below 2^130 < 2p.
        let [h0, h1, h2, h3, h4] = self.carry().carry().0;

        // g = h + 5 - 2^130
        let mut g0 = h0 + 5;
        let mut c = g0 >> 26;
        g0 &= LIMB_MASK;
        let mut g1 = h1 + c;
        c = g1 >> 26;
        g1 &= LIMB_MASK;
        let mut g2 = h2 + c;
        c = g2 >> 26;
        g2 &= LIMB_MASK;
        let mut g3 = h3 + c;
        c = g3 >> 26;
        g3 &= LIMB_MASK;
        let g4 = (h4 + c).wrapping_sub(1 << 26);

        // Select g when it did not underflow (h >= p), h otherwise.
        let select_g = (g4 >> 31).wrapping_sub(1);
        let select_h = !select_g;

        Self([
            (h0 & select_h) | (g0 & select_g),
            (h1 & select_h) | (g1 & select_g),
            (h2 & select_h) | (g2 & select_g),
            (h3 & select_h) | (g3 & select_g),
            (h4 & select_h) | (g4 & select_g),
        ])
    }
}

#[inline(always)]
fn le32(bytes: &[u8; 16], offset: usize) -> u32 {
    u32::from_le_bytes([
        bytes[offset],
        bytes[offset + 1],
        bytes[offset + 2],
        bytes[offset + 3],
    ])
}

impl Add for FieldElement {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let mut sum = [0u32; 5];
        for i in 0..5 {
            sum[i] = self.0[i] + rhs.0[i];
        }
        Self(sum).carry()
    }
}

impl Mul for FieldElement {
    type Output = Self;

    /// Multiply two field elements, returning a partially reduced product.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let [h0, h1, h2, h3, h4] = self.0.map(u64::from);
        let [r0, r1, r2, r3, r4] = rhs.0.map(u64::from);

        // Limbs that wrap past 2^130 re-enter multiplied by 5.
        let s1 = r1 * 5;
        let s2 = r2 * 5;
        let s3 = r3 * 5;
        let s4 = r4 * 5;

        let d0 = h0 * r0 + h1 * s4 + h2 * s3 + h3 * s2 + h4 * s1;
        let mut d1 = h0 * r1 + h1 * r0 + h2 * s4 + h3 * s3 + h4 * s2;
        let mut d2 = h0 * r2 + h1 * r1 + h2 * r0 + h3 * s4 + h4 * s3;
        let mut d3 = h0 * r3 + h1 * r2 + h2 * r1 + h3 * r0 + h4 * s4;
        let mut d4 = h0 * r4 + h1 * r3 + h2 * r2 + h3 * r1 + h4 * r0;

        let mask = u64::from(LIMB_MASK);

        let mut c = d0 >> 26;
        let mut h0 = d0 & mask;
        d1 += c;
        c = d1 >> 26;
        let h1 = d1 & mask;
        d2 += c;
        c = d2 >> 26;
        let h2 = d2 & mask;
        d3 += c;
        c = d3 >> 26;
        let h3 = d3 & mask;
        d4 += c;
        c = d4 >> 26;
        let h4 = d4 & mask;
        h0 += c * 5;
        c = h0 >> 26;
        h0 &= mask;

        Self([
            h0 as u32,
            (h1 + c) as u32,
            h2 as u32,
            h3 as u32,
            h4 as u32,
        ])
    }
}

impl MulAssign for FieldElement {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl ConstantTimeEq for FieldElement {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.to_le_bytes()[..].ct_eq(&other.to_le_bytes()[..])
    }
}

impl PartialEq for FieldElement {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

impl Eq for FieldElement {}

impl Debug for FieldElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "FieldElement(")?;
        for byte in self.to_le_bytes().iter().rev() {
            write!(f, "{:02x}", byte)?;
        }
        write!(f, ")")
    }
}

#[cfg(feature = "zeroize")]
impl Zeroize for FieldElement {
    fn zeroize(&mut self) {
        self.0.zeroize();
    }
}
