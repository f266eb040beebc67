//! Polynomial evaluation half of Poly1305: Horner's rule over GF(2^130 - 5).

use crate::{BLOCK_SIZE, Block, Key, field::FieldElement};
use universal_hash::{
    KeyInit, Reset, UhfBackend, UhfClosure, UniversalHash,
    consts::{U1, U16},
    crypto_common::{BlockSizeUser, KeySizeUser, ParBlocksSizeUser},
};

#[cfg(feature = "zeroize")]
use zeroize::Zeroize;

/// Bits of `r` which must be zero: the top four bits of bytes 3, 7, 11 and 15, and the bottom two
/// bits of bytes 4, 8 and 12.
const CLAMP_MASK: u128 = 0x0fff_fffc_0fff_fffc_0fff_fffc_0fff_ffff;

/// Clear the bits of a Poly1305 `r` key which are required to be zero.
///
/// Clamping is idempotent: clamping an already clamped key returns it unchanged.
#[must_use]
pub fn clamp(r: &Key) -> Key {
    let mut bytes = [0u8; 16];
    bytes.copy_from_slice(r);
    (u128::from_le_bytes(bytes) & CLAMP_MASK).to_le_bytes().into()
}

/// Evaluate the Poly1305 polynomial of `message` at `multiplier`, fully reduced modulo
/// `2^130 - 5`.
///
/// Every 16-byte chunk of the message (the last one may be shorter) is followed by a `0x01` byte
/// and zero-padded to 17 bytes before being added to the running total, which is then multiplied
/// by `multiplier`. The empty message evaluates to zero.
#[must_use]
pub fn accumulate(message: &[u8], multiplier: &FieldElement) -> FieldElement {
    let mut acc = Accumulator {
        r: *multiplier,
        h: FieldElement::ZERO,
    };
    acc.proc_message(message);
    acc.h
}

/// Poly1305 polynomial accumulator keyed by a clamped `r`.
///
/// This is the universal-hash half of Poly1305-AES: it has no notion of the nonce or of the
/// block cipher, and its output alone is **not** a secure MAC.
///
/// Blocks fed through [`UniversalHash::update`] are always full 16-byte blocks. The trait's
/// `update_padded` zero-pads a short final block as if it were full, which is **not** Poly1305
/// padding: a message whose length is not a multiple of 16 must go through
/// [`Accumulator::proc_message`] instead.
#[allow(missing_copy_implementations)]
#[derive(Clone)]
pub struct Accumulator {
    /// Clamped multiplier
    r: FieldElement,

    /// Running total
    h: FieldElement,
}

impl Accumulator {
    /// Fold an entire message into the accumulator, padding the final short block (if any) with
    /// `0x01`.
    pub fn proc_message(&mut self, message: &[u8]) {
        let mut chunks = message.chunks_exact(BLOCK_SIZE);

        for chunk in &mut chunks {
            let mut block = [0u8; BLOCK_SIZE];
            block.copy_from_slice(chunk);
            self.h = (self.h + FieldElement::from_full_block(&block)) * self.r;
        }

        let rem = chunks.remainder();
        if !rem.is_empty() {
            self.h = (self.h + FieldElement::from_partial_block(rem)) * self.r;
        }
    }

    /// Clamped multiplier this accumulator was keyed with.
    pub(crate) fn multiplier(&self) -> FieldElement {
        self.r
    }
}

impl KeySizeUser for Accumulator {
    type KeySize = U16;
}

impl KeyInit for Accumulator {
    /// Initialize the accumulator with the given (unclamped) `r` key
    fn new(r: &Key) -> Self {
        #[allow(unused_mut)]
        let mut r = clamp(r);
        let mut bytes = [0u8; 16];
        bytes.copy_from_slice(&r);
        let multiplier = FieldElement::from_le_bytes(&bytes);

        #[cfg(feature = "zeroize")]
        {
            r.as_mut_slice().zeroize();
            bytes.zeroize();
        }

        Self {
            r: multiplier,
            h: FieldElement::ZERO,
        }
    }
}

impl BlockSizeUser for Accumulator {
    type BlockSize = U16;
}

impl ParBlocksSizeUser for Accumulator {
    type ParBlocksSize = U1;
}

impl UhfBackend for Accumulator {
    /// Process a full 16-byte block (with the implicit `2^128` pad bit)
    fn proc_block(&mut self, block: &Block) {
        let mut bytes = [0u8; BLOCK_SIZE];
        bytes.copy_from_slice(block);
        self.h = (self.h + FieldElement::from_full_block(&bytes)) * self.r;
    }
}

impl UniversalHash for Accumulator {
    fn update_with_backend(&mut self, f: impl UhfClosure<BlockSize = Self::BlockSize>) {
        f.call(self);
    }

    /// Get the accumulator value reduced modulo `p`, truncated to its low 128 bits
    fn finalize(self) -> Block {
        self.h.to_u128().to_le_bytes().into()
    }
}

impl Reset for Accumulator {
    fn reset(&mut self) {
        self.h = FieldElement::ZERO;
    }
}

impl core::fmt::Debug for Accumulator {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Accumulator").finish_non_exhaustive()
    }
}

#[cfg(feature = "zeroize")]
impl Drop for Accumulator {
    fn drop(&mut self) {
        self.r.zeroize();
        self.h.zeroize();
    }
}
