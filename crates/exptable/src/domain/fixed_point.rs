//! Q8.24 fixed-point arithmetic
//!
//! `exp` and `ln` are evaluated with the shift-and-add method, driven by the
//! three tables:
//! - table 1 `ln(2^i)` handles whole powers of two
//! - table 2 `ln(1 + 2^-i)` handles the remaining factors
//! - table 3 `2^i / (1 + 2^i)` divides by `1 + 2^-i` without a division

use crate::constants::{FIXED_UNIT, FRACTION_BITS, MAX_EXPONENT, MIN_EXPONENT, ROWS_PER_TABLE};
use crate::domain::table::{Table, TableKind};
use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, MulAssign, Neg, Sub, SubAssign};
use std::sync::LazyLock;

/// Signed fixed-point number with 8 integer bits and 24 fraction bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FixedPoint(i32);

impl FixedPoint {
    pub const ZERO: Self = Self(0);
    pub const ONE: Self = Self(FIXED_UNIT);
    pub const MAX: Self = Self(i32::MAX);
    pub const MIN: Self = Self(i32::MIN);

    /// Convert from `f64`, truncating toward zero and saturating at the range ends
    pub fn from_f64(value: f64) -> Self {
        Self((value * FIXED_UNIT as f64) as i32)
    }

    /// Convert from an integer, saturating at the range ends
    pub fn from_int(value: i32) -> Self {
        Self(value.saturating_mul(FIXED_UNIT))
    }

    /// Wrap a raw Q8.24 value
    pub const fn from_raw(raw: i32) -> Self {
        Self(raw)
    }

    /// Raw Q8.24 value
    pub const fn raw(self) -> i32 {
        self.0
    }

    pub fn to_f64(self) -> f64 {
        self.0 as f64 / FIXED_UNIT as f64
    }

    /// Division, `None` when `rhs` is zero
    pub fn checked_div(self, rhs: Self) -> Option<Self> {
        if rhs.0 == 0 {
            return None;
        }
        Some(Self((((self.0 as i64) << FRACTION_BITS) / rhs.0 as i64) as i32))
    }

    /// `e^self` using the shared lookup tables
    pub fn exp(self) -> Self {
        FixedTables::shared().exp(self)
    }

    /// Natural logarithm using the shared lookup tables, `None` for non-positive input
    pub fn ln(self) -> Option<Self> {
        FixedTables::shared().ln(self)
    }
}

impl fmt::Display for FixedPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_f64())
    }
}

impl Add for FixedPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0.wrapping_add(rhs.0))
    }
}

impl AddAssign for FixedPoint {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FixedPoint {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0.wrapping_sub(rhs.0))
    }
}

impl SubAssign for FixedPoint {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for FixedPoint {
    type Output = Self;

    fn neg(self) -> Self {
        Self(self.0.wrapping_neg())
    }
}

impl Mul for FixedPoint {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self(((self.0 as i64 * rhs.0 as i64) >> FRACTION_BITS) as i32)
    }
}

impl MulAssign for FixedPoint {
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

impl Div for FixedPoint {
    type Output = Self;

    /// Panics when `rhs` is zero, like integer division
    fn div(self, rhs: Self) -> Self {
        Self((((self.0 as i64) << FRACTION_BITS) / rhs.0 as i64) as i32)
    }
}

static SHARED_TABLES: LazyLock<FixedTables> = LazyLock::new(FixedTables::new);

/// Q8.24 copies of the three tables, indexed by `i - MIN_EXPONENT`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FixedTables {
    power_log: [i32; ROWS_PER_TABLE],
    reciprocal_log: [i32; ROWS_PER_TABLE],
    ratio: [i32; ROWS_PER_TABLE],
}

impl Default for FixedTables {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedTables {
    /// Compute the tables from scratch
    pub fn new() -> Self {
        Self {
            power_log: fixed_values(&Table::compute(TableKind::PowerLog)),
            reciprocal_log: fixed_values(&Table::compute(TableKind::ReciprocalLog)),
            ratio: fixed_values(&Table::compute(TableKind::Ratio)),
        }
    }

    /// Process-wide instance, computed on first use
    pub fn shared() -> &'static Self {
        &SHARED_TABLES
    }

    /// Build from already computed (or loaded) tables
    ///
    /// Returns `None` unless all three kinds are present with a full row set.
    pub fn from_tables(tables: &[Table]) -> Option<Self> {
        let find = |kind: TableKind| {
            tables
                .iter()
                .find(|t| t.kind == kind && t.rows.len() == ROWS_PER_TABLE)
                .map(fixed_values)
        };

        Some(Self {
            power_log: find(TableKind::PowerLog)?,
            reciprocal_log: find(TableKind::ReciprocalLog)?,
            ratio: find(TableKind::Ratio)?,
        })
    }

    /// Q8.24 value of `kind` at exponent `i`
    pub fn get(&self, kind: TableKind, exponent: u32) -> Option<FixedPoint> {
        if !(MIN_EXPONENT..=MAX_EXPONENT).contains(&exponent) {
            return None;
        }
        let index = (exponent - MIN_EXPONENT) as usize;
        let raw = match kind {
            TableKind::PowerLog => self.power_log[index],
            TableKind::ReciprocalLog => self.reciprocal_log[index],
            TableKind::Ratio => self.ratio[index],
        };
        Some(FixedPoint(raw))
    }

    /// `e^x`, saturating at `FixedPoint::MAX` and flushing to zero below the last step
    pub fn exp(&self, x: FixedPoint) -> FixedPoint {
        let ln2 = self.power_log[0] as i64;
        let mut x = x.0 as i64;
        let mut scale_down = 0u32;

        // e^x = e^(x + n ln2) / 2^n
        if x < 0 {
            let n = -x / ln2 + 1;
            if n > MAX_EXPONENT as i64 {
                return FixedPoint::ZERO;
            }
            x += n * ln2;
            scale_down = n as u32;
        }

        let mut y = FIXED_UNIT as i64;

        for i in (MIN_EXPONENT..=MAX_EXPONENT).rev() {
            let step = self.power_log[(i - MIN_EXPONENT) as usize] as i64;
            if x >= step {
                x -= step;
                y <<= i;
                if y > i32::MAX as i64 && scale_down == 0 {
                    return FixedPoint::MAX;
                }
            }
        }

        for i in MIN_EXPONENT..=MAX_EXPONENT {
            let step = self.reciprocal_log[(i - MIN_EXPONENT) as usize] as i64;
            if step == 0 {
                break;
            }
            while x >= step {
                x -= step;
                y += y >> i;
            }
        }

        y >>= scale_down;
        FixedPoint(y.min(i32::MAX as i64) as i32)
    }

    /// Natural logarithm, `None` for non-positive input
    pub fn ln(&self, x: FixedPoint) -> Option<FixedPoint> {
        if x.0 <= 0 {
            return None;
        }

        let unit = FIXED_UNIT as i64;
        let mut x = x.0 as i64;
        let mut y = 0i64;

        // bring x into [1, 2) with whole powers of two
        let msb = 63 - x.leading_zeros();
        if msb > FRACTION_BITS {
            let shift = msb - FRACTION_BITS;
            x >>= shift;
            y += self.power_log[(shift - MIN_EXPONENT) as usize] as i64;
        } else if msb < FRACTION_BITS {
            let shift = FRACTION_BITS - msb;
            x <<= shift;
            y -= self.power_log[(shift - MIN_EXPONENT) as usize] as i64;
        }

        for i in MIN_EXPONENT..=MAX_EXPONENT {
            let delta = unit >> i;
            if delta == 0 {
                break;
            }
            let index = (i - MIN_EXPONENT) as usize;
            while x >= unit + delta {
                x = (x * self.ratio[index] as i64) >> FRACTION_BITS;
                y += self.reciprocal_log[index] as i64;
            }
        }

        Some(FixedPoint(y as i32))
    }
}

fn fixed_values(table: &Table) -> [i32; ROWS_PER_TABLE] {
    let mut values = [0i32; ROWS_PER_TABLE];
    for (slot, value) in values.iter_mut().zip(table.values()) {
        *slot = FixedPoint::from_f64(value).raw();
    }
    values
}
