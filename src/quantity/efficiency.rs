use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

/// Kilometers driven per kilowatt-hour.
pub type Efficiency = Quantity<-1, 1, 0>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Grade {
    Poor,
    Normal,
    Excellent,
}

impl Efficiency {
    /// Anything below is a warning.
    pub const LOW: Self = Self(4.0);

    /// Anything above is excellent.
    pub const HIGH: Self = Self(5.5);

    #[must_use]
    pub fn grade(self) -> Grade {
        if self < Self::LOW {
            Grade::Poor
        } else if self > Self::HIGH {
            Grade::Excellent
        } else {
            Grade::Normal
        }
    }
}

impl Display for Efficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.2} km/kWh", self.0)
    }
}

impl Debug for Efficiency {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.3}km/kWh", self.0)
    }
}
