use super::{Error, GF256, Multiplicative};
use std::ops::Index;

/// Added to every substituted byte; S(0) is exactly this since 0 has no inverse.
pub const AFFINE_CONSTANT: u8 = 0x63;

const GENERATOR: GF256 = GF256(0x03);
// 3 * 0xF6 = 1
const GENERATOR_INVERSE: GF256 = GF256(0xF6);
const MULTIPLICATIVE_GROUP_ORDER: usize = 255;

/// A byte substitution table indexed by input byte.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SBox([u8; 256]);

impl SBox {
    pub fn substitute(&self, byte: u8) -> u8 {
        self.0[byte as usize]
    }

    pub fn as_bytes(&self) -> &[u8; 256] {
        &self.0
    }

    /// Builds the table undoing this one. Only meaningful for a permutation.
    pub fn inverse(&self) -> SBox {
        let mut inverse = [0u8; 256];
        for (i, &s) in self.0.iter().enumerate() {
            inverse[s as usize] = i as u8;
        }
        SBox(inverse)
    }

    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; 256];
        for &s in &self.0 {
            if std::mem::replace(&mut seen[s as usize], true) {
                return false;
            }
        }
        true
    }
}

impl Index<u8> for SBox {
    type Output = u8;

    fn index(&self, byte: u8) -> &Self::Output {
        &self.0[byte as usize]
    }
}

fn affine_transform(q: u8) -> u8 {
    q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4)
}

/// Derives the AES S-box and its inverse.
///
/// Rather than searching for each multiplicative inverse, two walkers traverse the cyclic group
/// GF(2^8)\{0}: `p` steps by 3 and `q` steps by 3^-1, so `q` is always the inverse of `p`. Each
/// step is checked (`p * q == 1`); a failure means the field arithmetic itself is broken and no
/// part of the table can be trusted.
pub fn derive_sbox() -> Result<(SBox, SBox), Error> {
    let forward = walk(GENERATOR, GENERATOR_INVERSE)?;
    let inverse = forward.inverse();
    Ok((forward, inverse))
}

fn walk(generator: GF256, generator_inverse: GF256) -> Result<SBox, Error> {
    let one = <GF256 as Multiplicative>::identity();
    let mut sbox = [0u8; 256];
    let mut p = one;
    let mut q = one;
    let mut steps = 0;

    loop {
        p *= generator;
        q *= generator_inverse;
        steps += 1;

        sbox[p.0 as usize] = affine_transform(q.0) ^ AFFINE_CONSTANT;

        let product = p * q;
        if product != one {
            return Err(Error::InconsistentInverse {
                p: p.0,
                q: q.0,
                product: product.0,
            });
        }

        if p == one {
            break;
        }
    }

    if steps != MULTIPLICATIVE_GROUP_ORDER {
        return Err(Error::ShortCycle { steps });
    }

    sbox[0] = AFFINE_CONSTANT;
    Ok(SBox(sbox))
}

#[cfg(test)]
const FIPS_197_SBOX: [u8; 256] = [
    0x63, 0x7c, 0x77, 0x7b, 0xf2, 0x6b, 0x6f, 0xc5, 0x30, 0x01, 0x67, 0x2b, 0xfe, 0xd7, 0xab, 0x76,
    0xca, 0x82, 0xc9, 0x7d, 0xfa, 0x59, 0x47, 0xf0, 0xad, 0xd4, 0xa2, 0xaf, 0x9c, 0xa4, 0x72, 0xc0,
    0xb7, 0xfd, 0x93, 0x26, 0x36, 0x3f, 0xf7, 0xcc, 0x34, 0xa5, 0xe5, 0xf1, 0x71, 0xd8, 0x31, 0x15,
    0x04, 0xc7, 0x23, 0xc3, 0x18, 0x96, 0x05, 0x9a, 0x07, 0x12, 0x80, 0xe2, 0xeb, 0x27, 0xb2, 0x75,
    0x09, 0x83, 0x2c, 0x1a, 0x1b, 0x6e, 0x5a, 0xa0, 0x52, 0x3b, 0xd6, 0xb3, 0x29, 0xe3, 0x2f, 0x84,
    0x53, 0xd1, 0x00, 0xed, 0x20, 0xfc, 0xb1, 0x5b, 0x6a, 0xcb, 0xbe, 0x39, 0x4a, 0x4c, 0x58, 0xcf,
    0xd0, 0xef, 0xaa, 0xfb, 0x43, 0x4d, 0x33, 0x85, 0x45, 0xf9, 0x02, 0x7f, 0x50, 0x3c, 0x9f, 0xa8,
    0x51, 0xa3, 0x40, 0x8f, 0x92, 0x9d, 0x38, 0xf5, 0xbc, 0xb6, 0xda, 0x21, 0x10, 0xff, 0xf3, 0xd2,
    0xcd, 0x0c, 0x13, 0xec, 0x5f, 0x97, 0x44, 0x17, 0xc4, 0xa7, 0x7e, 0x3d, 0x64, 0x5d, 0x19, 0x73,
    0x60, 0x81, 0x4f, 0xdc, 0x22, 0x2a, 0x90, 0x88, 0x46, 0xee, 0xb8, 0x14, 0xde, 0x5e, 0x0b, 0xdb,
    0xe0, 0x32, 0x3a, 0x0a, 0x49, 0x06, 0x24, 0x5c, 0xc2, 0xd3, 0xac, 0x62, 0x91, 0x95, 0xe4, 0x79,
    0xe7, 0xc8, 0x37, 0x6d, 0x8d, 0xd5, 0x4e, 0xa9, 0x6c, 0x56, 0xf4, 0xea, 0x65, 0x7a, 0xae, 0x08,
    0xba, 0x78, 0x25, 0x2e, 0x1c, 0xa6, 0xb4, 0xc6, 0xe8, 0xdd, 0x74, 0x1f, 0x4b, 0xbd, 0x8b, 0x8a,
    0x70, 0x3e, 0xb5, 0x66, 0x48, 0x03, 0xf6, 0x0e, 0x61, 0x35, 0x57, 0xb9, 0x86, 0xc1, 0x1d, 0x9e,
    0xe1, 0xf8, 0x98, 0x11, 0x69, 0xd9, 0x8e, 0x94, 0x9b, 0x1e, 0x87, 0xe9, 0xce, 0x55, 0x28, 0xdf,
    0x8c, 0xa1, 0x89, 0x0d, 0xbf, 0xe6, 0x42, 0x68, 0x41, 0x99, 0x2d, 0x0f, 0xb0, 0x54, 0xbb, 0x16,
];

#[test]
fn test_matches_fips_197() {
    let (sbox, _) = derive_sbox().unwrap();
    assert_eq!(sbox.as_bytes(), &FIPS_197_SBOX);
    assert_eq!(sbox[0x00], 0x63);
    assert_eq!(sbox[0x01], 0x7c);
    assert_eq!(sbox[0x53], 0xed);
}

#[test]
fn test_permutation() {
    let (sbox, inverse) = derive_sbox().unwrap();
    assert!(sbox.is_permutation());
    assert!(inverse.is_permutation());

    let mut values: Vec<u8> = sbox.as_bytes().to_vec();
    values.sort_unstable();
    assert!(values.iter().enumerate().all(|(i, &v)| i == v as usize));
}

#[test]
fn test_inverse_round_trip() {
    let (sbox, inverse) = derive_sbox().unwrap();
    for i in 0..=255u8 {
        assert_eq!(inverse.substitute(sbox.substitute(i)), i);
        assert_eq!(sbox.substitute(inverse.substitute(i)), i);
    }
    assert_eq!(inverse[0x63], 0x00);
    assert_eq!(inverse[0x00], 0x52);
    assert_eq!(inverse.inverse(), sbox);
}

#[test]
fn test_no_fixed_points() {
    let (sbox, _) = derive_sbox().unwrap();
    for i in 0..=255u8 {
        assert_ne!(sbox[i], i);
        assert_ne!(sbox[i], !i);
    }
}

#[test]
fn test_walk_with_mismatched_inverse() {
    assert_eq!(
        walk(GF256(0x03), GF256(0x03)),
        Err(Error::InconsistentInverse {
            p: 0x03,
            q: 0x03,
            product: 0x05
        })
    );
}

#[test]
fn test_walk_with_non_generator() {
    // 2 only has order 51 under the AES polynomial
    assert_eq!(walk(GF256(0x02), GF256(0x8d)), Err(Error::ShortCycle { steps: 51 }));
}

#[test]
fn test_is_permutation_rejects_duplicates() {
    let mut bytes = FIPS_197_SBOX;
    bytes[1] = bytes[0];
    assert!(!SBox(bytes).is_permutation());
}
