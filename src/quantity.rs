pub mod cost;
pub mod distance;
pub mod efficiency;
pub mod energy;
pub mod rate;

use std::ops::{Div, Mul};

use serde::{Deserialize, Serialize};

/// Spreadsheet-backed quantity, dimensioned by energy, distance and cost exponents.
#[derive(
    Clone,
    Copy,
    Default,
    Deserialize,
    PartialEq,
    PartialOrd,
    Serialize,
    derive_more::Add,
    derive_more::AddAssign,
    derive_more::From,
    derive_more::FromStr,
    derive_more::Neg,
    derive_more::Sub,
    derive_more::SubAssign,
    derive_more::Sum,
)]
pub struct Quantity<const ENERGY: isize, const DISTANCE: isize, const COST: isize>(pub f64);

impl<const ENERGY: isize, const DISTANCE: isize, const COST: isize>
    Quantity<ENERGY, DISTANCE, COST>
{
    pub const ZERO: Self = Self(0.0);

    /// Coerce a raw cell into a quantity.
    ///
    /// Absent, empty, non-numeric and non-finite cells all read as zero.
    #[must_use]
    pub fn from_cell(cell: Option<&str>) -> Self {
        Self(
            cell.and_then(|cell| cell.parse::<f64>().ok())
                .filter(|value| value.is_finite())
                .unwrap_or(0.0),
        )
    }

    #[must_use]
    pub fn is_positive(self) -> bool {
        self.0 > 0.0
    }

    /// Relative change from `baseline` to `self`, or [`None`] when the baseline is not positive.
    #[must_use]
    pub fn relative_change(self, baseline: Self) -> Option<f64> {
        baseline.is_positive().then(|| (self.0 - baseline.0) / baseline.0)
    }
}

impl<const ENERGY: isize, const DISTANCE: isize, const COST: isize> Mul<f64>
    for Quantity<ENERGY, DISTANCE, COST>
{
    type Output = Self;

    fn mul(self, rhs: f64) -> Self::Output {
        Self(self.0 * rhs)
    }
}

impl<const ENERGY: isize, const DISTANCE: isize, const COST: isize> Div<f64>
    for Quantity<ENERGY, DISTANCE, COST>
{
    type Output = Self;

    fn div(self, rhs: f64) -> Self::Output {
        Self(self.0 / rhs)
    }
}
