use std::{
    fmt::{Debug, Display, Formatter},
    ops::Div,
};

use crate::quantity::{Quantity, cost::Cost, distance::Kilometers, energy::KilowattHours};

/// Cost per kilowatt-hour.
pub type KilowattHourRate = Quantity<-1, 0, 1>;

/// Cost per kilometer driven.
pub type KilometerRate = Quantity<0, -1, 1>;

impl Display for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2} / kWh", self.0)
    }
}

impl Debug for KilowattHourRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.3}/kWh", self.0)
    }
}

impl Display for KilometerRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.2} / km", self.0)
    }
}

impl Debug for KilometerRate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "${:.3}/km", self.0)
    }
}

impl Div<KilowattHours> for Cost {
    type Output = KilowattHourRate;

    fn div(self, rhs: KilowattHours) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

impl Div<Kilometers> for Cost {
    type Output = KilometerRate;

    fn div(self, rhs: Kilometers) -> Self::Output {
        Quantity(self.0 / rhs.0)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;

    use super::*;

    #[test]
    fn test_cost_per_kilowatt_hour() {
        let rate = Cost::from(120.0) / KilowattHours::from(20.0);
        assert_abs_diff_eq!(rate.0, 6.0);
        assert_eq!(rate.to_string(), "$6.00 / kWh");
    }

    #[test]
    fn test_cost_per_kilometer() {
        assert_abs_diff_eq!((Cost::from(300.0) / Kilometers::from(1200.0)).0, 0.25);
    }
}
