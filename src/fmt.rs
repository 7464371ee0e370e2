use std::fmt::{Debug, Display, Formatter};

/// Percentage with an explicit sign, from a fraction.
pub struct SignedPercentage(pub f64);

impl Debug for SignedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        Display::fmt(self, f)
    }
}

impl Display for SignedPercentage {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:+.1}%", self.0 * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(SignedPercentage(0.2).to_string(), "+20.0%");
        assert_eq!(SignedPercentage(-0.125).to_string(), "-12.5%");
        assert_eq!(SignedPercentage(0.0).to_string(), "+0.0%");
    }
}
