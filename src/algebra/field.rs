//! Prime Field Arithmetic: Z/pZ Coefficients
//!
//! Every coefficient of the boundary operator lives in a prime field, so the
//! elimination performed on boundary matrices is exact: no rounding, no
//! pivoting heuristics, and the outcome depends only on the order in which
//! columns are combined.
//!
//! Multiplicative inverses are looked up in a table that is built the first
//! time a modulus is used and shared, immutable, from then on. Very large
//! moduli skip the table and fall back to the extended Euclidean algorithm.

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use tracing::debug;

use crate::error::{Error, Result};

/// Largest modulus for which a full inverse table is materialized
pub const INVERSE_TABLE_LIMIT: u32 = 1 << 16;

/// Capability set of a coefficient field
pub trait Field:
    Copy
    + fmt::Debug
    + fmt::Display
    + Eq
    + Hash
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + 'static
{
    /// Characteristic of the field
    const MODULUS: u32;

    fn zero() -> Self;

    fn one() -> Self;

    /// Reduce an arbitrary integer into the field (floor-mod)
    fn from_i64(value: i64) -> Self;

    /// Canonical representative in `0..MODULUS`
    fn value(self) -> u32;

    fn is_zero(self) -> bool {
        self == Self::zero()
    }

    /// Multiplicative inverse, `DomainError` for zero
    fn inverse(self) -> Result<Self>;

    /// `self / rhs`, failing like `inverse` when `rhs` is zero
    fn div(self, rhs: Self) -> Result<Self> {
        Ok(self * rhs.inverse()?)
    }
}

/// Element of Z/PZ for a prime P
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fp<const P: u32> {
    val: u32,
}

/// Coefficients mod 2 (orientation-free homology)
pub type Binary = Fp<2>;

/// Coefficients mod 3 (smallest field that sees orientation signs)
pub type Ternary = Fp<3>;

impl<const P: u32> Fp<P> {
    /// Reduce `value` into the field; negative values wrap around
    pub fn new(value: i64) -> Self {
        assert!(P >= 2, "modulus must be a prime, got {}", P);
        Self {
            val: value.rem_euclid(P as i64) as u32,
        }
    }
}

impl<const P: u32> Field for Fp<P> {
    const MODULUS: u32 = P;

    fn zero() -> Self {
        Self { val: 0 }
    }

    fn one() -> Self {
        Self::new(1)
    }

    fn from_i64(value: i64) -> Self {
        Self::new(value)
    }

    fn value(self) -> u32 {
        self.val
    }

    fn inverse(self) -> Result<Self> {
        if self.val == 0 {
            return Err(Error::DomainError { modulus: P });
        }
        let inv = if P <= INVERSE_TABLE_LIMIT {
            inverse_table(P)[self.val as usize]
        } else {
            euclid_inverse(self.val, P)
        };
        Ok(Self { val: inv })
    }
}

impl<const P: u32> From<i64> for Fp<P> {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl<const P: u32> Add for Fp<P> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            val: ((self.val as u64 + rhs.val as u64) % P as u64) as u32,
        }
    }
}

impl<const P: u32> Sub for Fp<P> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        self + (-rhs)
    }
}

impl<const P: u32> Mul for Fp<P> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self {
            val: ((self.val as u64 * rhs.val as u64) % P as u64) as u32,
        }
    }
}

impl<const P: u32> Neg for Fp<P> {
    type Output = Self;

    fn neg(self) -> Self {
        if self.val == 0 {
            self
        } else {
            Self { val: P - self.val }
        }
    }
}

impl<const P: u32> AddAssign for Fp<P> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<const P: u32> SubAssign for Fp<P> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<const P: u32> MulAssign for Fp<P> {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

// Raw integers are reduced before comparing, so `Ternary::new(2) == -1`.
impl<const P: u32> PartialEq<i64> for Fp<P> {
    fn eq(&self, other: &i64) -> bool {
        self.val == Self::new(*other).val
    }
}

impl<const P: u32> PartialEq<Fp<P>> for i64 {
    fn eq(&self, other: &Fp<P>) -> bool {
        other == self
    }
}

impl<const P: u32> fmt::Display for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.val)
    }
}

impl<const P: u32> fmt::Debug for Fp<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (mod {})", self.val, P)
    }
}

/// One inverse table per modulus, built on first use and never mutated again
static INVERSE_TABLES: Lazy<RwLock<HashMap<u32, &'static [u32]>>> =
    Lazy::new(|| RwLock::new(HashMap::new()));

fn inverse_table(modulus: u32) -> &'static [u32] {
    if let Some(table) = INVERSE_TABLES.read().get(&modulus).copied() {
        return table;
    }

    let mut tables = INVERSE_TABLES.write();
    *tables.entry(modulus).or_insert_with(|| {
        debug!(modulus, "building inverse table");
        Box::leak(build_inverse_table(modulus).into_boxed_slice())
    })
}

/// inv[i] = -(p / i) * inv[p mod i]  (mod p), valid for prime p
fn build_inverse_table(modulus: u32) -> Vec<u32> {
    let p = modulus as u64;
    let mut inv = vec![0u32; modulus as usize];
    if modulus > 1 {
        inv[1] = 1;
    }
    for i in 2..p {
        let q = p / i;
        let r = (p % i) as usize;
        inv[i as usize] = ((p - (q * inv[r] as u64) % p) % p) as u32;
    }
    inv
}

fn euclid_inverse(value: u32, modulus: u32) -> u32 {
    let (mut old_r, mut r) = (value as i64, modulus as i64);
    let (mut old_s, mut s) = (1i64, 0i64);
    while r != 0 {
        let q = old_r / r;
        (old_r, r) = (r, old_r - q * r);
        (old_s, s) = (s, old_s - q * s);
    }
    old_s.rem_euclid(modulus as i64) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_binary() {
        let zero = Binary::new(0);
        let one = Binary::new(1);

        assert_eq!(zero, zero + zero);
        assert_eq!(zero, one + one);
        assert_eq!(zero, zero + Binary::new(2));
        assert_eq!(one, zero + one);
        assert_eq!(one, one + Binary::new(4));
        assert_eq!(one + Binary::new(4), 3);
        assert_eq!(one + Binary::new(4), -1);
    }

    #[test]
    fn test_ternary_floor_mod() {
        let zero = Ternary::new(-15);
        let one = Ternary::new(-14);
        let two = Ternary::new(-13);

        assert_eq!(0, zero);
        assert_eq!(1, one);
        assert_eq!(2, two);
        assert_eq!(zero, one + two);
        assert_eq!(two, one + one);
        assert_eq!(one, two + two);
        assert_eq!(zero, Ternary::new(3) * one);
        assert_eq!(Ternary::new(16) * two, 2);
        assert_eq!(-two, -2);
        assert_eq!(-one, 2);
    }

    #[test]
    fn test_inverse_mod_101() {
        for i in 1..101 {
            let val = Fp::<101>::new(i);
            let inv = val.inverse().unwrap();
            assert_eq!(val, i);
            assert_eq!(val * inv, 1);
        }
    }

    #[test]
    fn test_additive_inverse_and_range() {
        for i in -50..50 {
            let a = Fp::<7>::new(i);
            assert!(a.value() < 7);
            assert!((a + (-a)).is_zero());
            assert_eq!(a - a, 0);
        }
    }

    #[test]
    fn test_inverse_of_zero_is_domain_error() {
        assert_eq!(
            Ternary::zero().inverse(),
            Err(Error::DomainError { modulus: 3 })
        );
        assert!(Ternary::one().div(Ternary::zero()).is_err());
    }

    #[test]
    fn test_large_modulus_uses_euclid() {
        const BIG: u32 = 1_000_003;
        for i in [1i64, 2, 17, 999_999, 1_000_002] {
            let a = Fp::<BIG>::new(i);
            assert_eq!(a * a.inverse().unwrap(), 1);
        }
    }

    #[test]
    fn test_tables_are_shared_per_modulus() {
        let first = inverse_table(13);
        let second = inverse_table(13);
        assert!(std::ptr::eq(first, second));
        assert_eq!(first.len(), 13);
        assert_eq!(inverse_table(5), &[0, 1, 3, 2, 4]);
    }
}
