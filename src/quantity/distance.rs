use std::fmt::{Debug, Display, Formatter};

use crate::quantity::Quantity;

pub type Kilometers = Quantity<0, 1, 0>;

impl Display for Kilometers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.0} km", self.0)
    }
}

impl Debug for Kilometers {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}km", self.0)
    }
}
