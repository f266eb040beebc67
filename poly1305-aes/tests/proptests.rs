//! Property-based tests.

#![cfg(all(any(unix, windows), feature = "aes"))]

use poly1305::{Poly1305, universal_hash::KeyInit};
use poly1305_aes::{Aes, NonceCipher, Poly1305Aes, compute_tag, constant_time_eq};
use proptest::{collection::vec, prelude::*};

proptest! {
    /// Splitting the input across `update` calls never changes the tag.
    #[test]
    fn split_update_equivalence(
        k in any::<[u8; 16]>(),
        r in any::<[u8; 16]>(),
        n in any::<[u8; 16]>(),
        m in vec(any::<u8>(), 0..200),
        split in any::<prop::sample::Index>(),
    ) {
        let at = split.index(m.len() + 1);
        let (a, b) = m.split_at(at);

        let mut mac = Poly1305Aes::new(&k, &r, &n).unwrap();
        mac.update(a);
        mac.update(b);

        prop_assert_eq!(mac.digest().unwrap(), compute_tag(&k, &r, &n, &m).unwrap());
    }

    /// Poly1305-AES is Poly1305 keyed with `r || AES_k(n)`.
    #[test]
    fn poly1305_equivalence(
        k in any::<[u8; 16]>(),
        r in any::<[u8; 16]>(),
        n in any::<[u8; 16]>(),
        m in vec(any::<u8>(), 0..300),
    ) {
        let s = Aes.encrypt_block(&k, &n.into()).unwrap();

        let mut key = [0u8; 32];
        key[..16].copy_from_slice(&r);
        key[16..].copy_from_slice(&s);

        let expected = Poly1305::new(poly1305::Key::from_slice(&key)).compute_unpadded(&m);
        let actual = compute_tag(&k, &r, &n, &m).unwrap();

        prop_assert_eq!(actual.as_slice(), expected.as_slice());
    }

    /// Tag computation is a pure function of its inputs.
    #[test]
    fn compute_tag_is_deterministic(
        k in any::<[u8; 16]>(),
        r in any::<[u8; 16]>(),
        n in any::<[u8; 16]>(),
        m in vec(any::<u8>(), 0..64),
    ) {
        prop_assert_eq!(
            compute_tag(&k, &r, &n, &m).unwrap(),
            compute_tag(&k, &r, &n, &m).unwrap()
        );
    }

    #[test]
    fn ct_eq_reflexive(a in vec(any::<u8>(), 0..64)) {
        prop_assert!(constant_time_eq(&a, &a));
    }

    #[test]
    fn ct_eq_agrees_with_eq(a in vec(any::<u8>(), 0..20), b in vec(any::<u8>(), 0..20)) {
        prop_assert_eq!(constant_time_eq(&a, &b), a == b);
    }
}
