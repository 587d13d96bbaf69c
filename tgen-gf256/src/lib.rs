mod arith;
pub mod sbox;
pub mod tables;
pub mod vector;
use std::ops::{Add, AddAssign, Mul, MulAssign, Sub, SubAssign};

pub use sbox::{SBox, derive_sbox};
pub use tables::{Multiplier, STANDARD_TABLES, Source, Table, TableSpec, generate_table};

/// The Rijndael polynomial: x^8 + x^4 + x^3 + x + 1
pub const AES_POLYNOMIAL: u16 = 0x11B;

#[repr(transparent)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct GF256<const REDUCTION_POLYNOMIAL: u16 = AES_POLYNOMIAL>(pub u8);

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("division by zero")]
    DivideByZero,
    #[error("field walk lost its inverse: {p:#04x} * {q:#04x} = {product:#04x}, expected 0x01")]
    InconsistentInverse { p: u8, q: u8, product: u8 },
    #[error("field walk returned to 1 after {steps} steps, expected 255")]
    ShortCycle { steps: usize },
}

pub trait Additive {
    fn identity() -> Self;
    fn inverse(&self) -> Self;
}

pub trait Multiplicative {
    fn identity() -> Self;
    fn inverse(&self) -> Result<Self, Error>
    where
        Self: Sized;
}

/// Addition in GF(2^8) is XOR.
#[inline]
pub const fn add(a: u8, b: u8) -> u8 {
    a ^ b
}

/// Product of two bytes modulo [`AES_POLYNOMIAL`].
#[inline]
pub const fn multiply(a: u8, b: u8) -> u8 {
    arith::carryless_mul(a, b, AES_POLYNOMIAL)
}

impl<const REDUCTION_POLYNOMIAL: u16> GF256<REDUCTION_POLYNOMIAL> {
    /// Square-and-multiply exponentiation.
    pub fn pow(self, mut exponent: u8) -> Self {
        let mut base = self;
        let mut acc = <Self as Multiplicative>::identity();
        while exponent != 0 {
            if exponent & 1 != 0 {
                acc *= base;
            }
            base *= base;
            exponent >>= 1;
        }
        acc
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> Additive for GF256<REDUCTION_POLYNOMIAL> {
    fn identity() -> Self {
        GF256(0)
    }

    #[inline]
    fn inverse(&self) -> Self {
        *self
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> Multiplicative for GF256<REDUCTION_POLYNOMIAL> {
    fn identity() -> Self {
        GF256(1)
    }

    #[inline]
    fn inverse(&self) -> Result<Self, Error>
    where
        Self: Sized,
    {
        if self.0 == 0 {
            return Err(Error::DivideByZero);
        }

        // a^255 = 1 for every nonzero a, so a^254 = a^(-1)
        Ok(self.pow(254))
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> Add for GF256<REDUCTION_POLYNOMIAL> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self::Output {
        GF256(self.0 ^ rhs.0)
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> AddAssign for GF256<REDUCTION_POLYNOMIAL> {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> Sub for GF256<REDUCTION_POLYNOMIAL> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        // Subtraction in GF(256) is the same as addition (XOR)
        GF256(self.0 ^ rhs.0)
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> SubAssign for GF256<REDUCTION_POLYNOMIAL> {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.0 ^= rhs.0;
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> Mul for GF256<REDUCTION_POLYNOMIAL> {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self::Output {
        GF256(arith::carryless_mul(self.0, rhs.0, REDUCTION_POLYNOMIAL))
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> MulAssign for GF256<REDUCTION_POLYNOMIAL> {
    #[inline]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl<const REDUCTION_POLYNOMIAL: u16> std::iter::Sum for GF256<REDUCTION_POLYNOMIAL> {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(<Self as Additive>::identity(), |acc, x| acc + x)
    }
}

#[test]
fn test_add() {
    let zero = <GF256 as Additive>::identity();
    let one = <GF256 as Multiplicative>::identity();
    assert_eq!(zero, zero + zero);
    assert_eq!(one, one + zero);
    assert_eq!(zero, one + one);

    for a in 0..=255u8 {
        assert_eq!(add(a, a), 0);
        assert_eq!(add(a, 0), a);
        for b in 0..=255u8 {
            assert_eq!(add(a, b), add(b, a));
            assert_eq!(GF256::<AES_POLYNOMIAL>(a) - GF256(b), GF256(add(a, b)));

            let mut x = GF256::<AES_POLYNOMIAL>(a);
            x += GF256(b);
            assert_eq!(x, GF256(add(a, b)));
            x -= GF256(b);
            assert_eq!(x, GF256(a));
        }

        let x = GF256::<AES_POLYNOMIAL>(a);
        assert_eq!(Additive::inverse(&x) + x, zero);
    }
}

#[test]
fn test_known_products() {
    // FIPS-197 section 4.2 worked examples
    assert_eq!(multiply(0x57, 0x83), 0xc1);
    assert_eq!(multiply(0x57, 0x13), 0xfe);
    assert_eq!(multiply(0x03, 0xf6), 0x01);
    assert_eq!(GF256::<AES_POLYNOMIAL>(0x57) * GF256(0x83), GF256(0xc1));
}

#[test]
fn test_identity_and_zero() {
    for x in 0..=255u8 {
        assert_eq!(multiply(x, 1), x);
        assert_eq!(multiply(1, x), x);
        assert_eq!(multiply(x, 0), 0);
        assert_eq!(multiply(0, x), 0);
    }
}

#[test]
fn test_mul_commutative() {
    for a in 0..=255u8 {
        for b in a..=255u8 {
            assert_eq!(multiply(a, b), multiply(b, a), "{a:#04x} * {b:#04x}");
        }
    }
}

#[test]
fn test_mul_associative() {
    for a in 0..=255u8 {
        for b in 0..=255u8 {
            let ab = multiply(a, b);
            for c in 0..=255u8 {
                assert_eq!(multiply(ab, c), multiply(a, multiply(b, c)));
            }
        }
    }
}

#[test]
fn test_unique_inverse() {
    for a in 1..=255u8 {
        let inverses: Vec<u8> = (0..=255u8).filter(|&b| multiply(a, b) == 1).collect();
        assert_eq!(inverses.len(), 1, "{a:#04x} has inverses {inverses:?}");
    }
}

#[test]
fn test_mul_inv() {
    let zero = <GF256 as Additive>::identity();
    let one = <GF256 as Multiplicative>::identity();
    assert_eq!(zero, zero * zero);
    assert_eq!(zero, one * zero);
    assert_eq!(one, one * one);
    assert_eq!(Multiplicative::inverse(&zero), Err(Error::DivideByZero));

    for i in 1..=255 {
        let i = GF256::<AES_POLYNOMIAL>(i);
        let inv = Multiplicative::inverse(&i).unwrap();
        assert_eq!(one, i * inv);
        assert_eq!(i, (i * i) * inv);
    }
}

#[test]
fn test_other_polynomial() {
    // x^8 + x^4 + x^3 + x^2 + 1, where 0x80 * x wraps to the low reduction byte
    assert_eq!(GF256::<0x11D>(0x80) * GF256(0x02), GF256(0x1D));
    let a = GF256::<0x11D>(0x35);
    assert_eq!(a * Multiplicative::inverse(&a).unwrap(), GF256(1));
}
