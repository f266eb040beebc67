//! Shared benchmark configuration and key material.
use criterion::Criterion;

/// Cipher key (AES-128)
pub const CIPHER_KEY: [u8; 16] = [0x42; 16];

/// Poly1305 `r` key, already clamped
pub const R: [u8; 16] = [
    0x0f, 0x0f, 0x0f, 0x0f, 0x0c, 0x0f, 0x0f, 0x0f, 0x0c, 0x0f, 0x0f, 0x0f, 0x0c, 0x0f, 0x0f, 0x0f,
];

/// Nonce
pub const NONCE: [u8; 16] = [0x24; 16];

#[cfg(feature = "cpb")]
pub type Benchmarker = Criterion<criterion_cycles_per_byte::CyclesPerByte>;

#[cfg(not(feature = "cpb"))]
pub type Benchmarker = Criterion;

/// Measure cycles per byte with the `cpb` feature, wall-clock time otherwise.
pub fn config() -> Benchmarker {
    #[cfg(feature = "cpb")]
    return Criterion::default().with_measurement(criterion_cycles_per_byte::CyclesPerByte);

    #[cfg(not(feature = "cpb"))]
    Criterion::default()
}
