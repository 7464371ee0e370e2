use std::collections::BTreeSet;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Always offered price options.
pub const DEFAULT_PRICES: [f64; 5] = [2.5, 3.0, 3.5, 4.0, 7.0];

pub const MAX_CUSTOM_PRICES: usize = 10;

/// Recently used prices, oldest first.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<f64>", into = "Vec<f64>")]
pub struct CustomPrices(Vec<f64>);

impl CustomPrices {
    /// Remember the price, unless it is already offered.
    ///
    /// Returns whether anything changed.
    pub fn add(&mut self, price: f64) -> bool {
        if DEFAULT_PRICES.contains(&price) || self.0.contains(&price) {
            return false;
        }
        self.0.push(price);
        if self.0.len() > MAX_CUSTOM_PRICES {
            self.0.remove(0);
        }
        true
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Default and custom prices, deduplicated and sorted ascending.
    #[must_use]
    pub fn all_options(&self) -> Vec<f64> {
        DEFAULT_PRICES
            .iter()
            .chain(&self.0)
            .copied()
            .map(OrderedFloat)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(|price| price.0)
            .collect()
    }

    #[must_use]
    pub fn contains(&self, price: f64) -> bool {
        self.0.contains(&price)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<f64> for CustomPrices {
    fn from_iter<T: IntoIterator<Item = f64>>(iterator: T) -> Self {
        let mut prices = Self::default();
        for price in iterator {
            prices.add(price);
        }
        prices
    }
}

impl From<Vec<f64>> for CustomPrices {
    /// Sanitize the stored list.
    fn from(prices: Vec<f64>) -> Self {
        prices.into_iter().filter(|price| price.is_finite() && *price > 0.0).collect()
    }
}

impl From<CustomPrices> for Vec<f64> {
    fn from(prices: CustomPrices) -> Self {
        prices.0
    }
}

/// Format the price for the input field, without insignificant zeros.
#[must_use]
pub fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.0}")
    } else {
        format!("{price:.2}").trim_end_matches('0').trim_end_matches('.').to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add() {
        let mut prices = CustomPrices::default();
        assert!(prices.add(5.5));
        assert!(prices.contains(5.5));
        assert_eq!(prices.len(), 1);
    }

    #[test]
    fn test_add_is_idempotent() {
        let mut once = CustomPrices::default();
        once.add(6.0);
        let mut twice = CustomPrices::default();
        twice.add(6.0);
        assert!(!twice.add(6.0));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_add_default_is_ignored() {
        let mut prices = CustomPrices::default();
        assert!(!prices.add(2.5));
        assert!(!prices.add(7.0));
        assert!(prices.is_empty());
    }

    #[test]
    fn test_oldest_is_evicted() {
        let prices: CustomPrices = (1..=11).map(|n| 10.0 + f64::from(n)).collect();
        assert_eq!(prices.len(), MAX_CUSTOM_PRICES);
        assert!(!prices.contains(11.0));
        assert!(prices.contains(12.0));
        assert!(prices.contains(21.0));
    }

    #[test]
    fn test_all_options() {
        let mut prices = CustomPrices::default();
        prices.add(5.5);
        prices.add(1.2);
        assert_eq!(prices.all_options(), [1.2, 2.5, 3.0, 3.5, 4.0, 5.5, 7.0]);
        assert_eq!(CustomPrices::default().all_options(), DEFAULT_PRICES);
    }

    #[test]
    fn test_from_stored() {
        let prices = CustomPrices::from(vec![5.5, 5.5, 3.0, -1.0, f64::NAN, 8.8]);
        assert_eq!(Vec::from(prices), [5.5, 8.8]);
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(7.0), "7");
        assert_eq!(format_price(3.5), "3.5");
        assert_eq!(format_price(3.25), "3.25");
        assert_eq!(format_price(2.999), "3");
    }
}
