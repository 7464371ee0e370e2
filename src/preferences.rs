//! User preferences persisted between runs.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use serde_with::{DefaultOnError, serde_as};

use crate::{core::CustomPrices, prelude::*};

#[derive(
    Copy,
    Clone,
    Debug,
    Default,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    derive_more::Display,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    #[display("dark")]
    Dark,

    #[display("light")]
    Light,
}

impl ThemeMode {
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }
}

/// On-disk representation.
///
/// A broken value falls back to its default without affecting the other keys.
#[serde_as]
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
struct Stored {
    #[serde_as(as = "DefaultOnError")]
    #[serde(default, rename = "customChargePrices")]
    custom_prices: CustomPrices,

    #[serde_as(as = "DefaultOnError")]
    #[serde(default, rename = "appThemeMode")]
    theme: ThemeMode,
}

/// Preferences store, rewritten on every change.
pub struct Preferences {
    path: Option<PathBuf>,
    stored: Stored,
}

impl Preferences {
    /// Read the preferences, falling back to the defaults when the file is missing or broken.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn read_from(path: PathBuf) -> Self {
        let stored = Self::read_fallibly_from(&path).unwrap_or_else(|error| {
            error!("failed to load the preferences: {error:#}");
            Stored::default()
        });
        Self { path: Some(path), stored }
    }

    fn read_fallibly_from(path: &Path) -> Result<Stored> {
        if path.is_file() {
            Ok(toml::from_str(&fs::read_to_string(path)?)?)
        } else {
            Ok(Stored::default())
        }
    }

    /// Preferences which are never persisted.
    #[cfg(test)]
    #[must_use]
    pub fn in_memory() -> Self {
        Self { path: None, stored: Stored::default() }
    }

    fn write(&self) {
        if let Some(path) = &self.path
            && let Err(error) = self.write_fallibly_to(path)
        {
            error!(path = %path.display(), "failed to save the preferences: {error:#}");
        }
    }

    fn write_fallibly_to(&self, path: &Path) -> Result {
        fs::write(path, toml::to_string(&self.stored)?)?;
        debug!(path = %path.display(), "saved the preferences");
        Ok(())
    }

    #[must_use]
    pub const fn custom_prices(&self) -> &CustomPrices {
        &self.stored.custom_prices
    }

    /// Default and custom prices, sorted ascending.
    #[must_use]
    pub fn price_options(&self) -> Vec<f64> {
        self.stored.custom_prices.all_options()
    }

    pub fn add_custom_price(&mut self, price: f64) -> bool {
        let is_added = self.stored.custom_prices.add(price);
        if is_added {
            self.write();
        }
        is_added
    }

    pub fn clear_custom_prices(&mut self) {
        self.stored.custom_prices.clear();
        self.write();
    }

    #[must_use]
    pub const fn theme(&self) -> ThemeMode {
        self.stored.theme
    }

    pub fn set_theme(&mut self, theme: ThemeMode) {
        self.stored.theme = theme;
        self.write();
    }
}
