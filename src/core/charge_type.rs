use std::{
    fmt::{Display, Formatter},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

use crate::prelude::*;

#[derive(
    Copy, Clone, Debug, Default, Hash, Eq, PartialEq, clap::ValueEnum, Serialize, Deserialize,
)]
pub enum ChargeType {
    /// Home AC charging through the single-wire CAN adapter.
    #[default]
    #[value(name = "ac")]
    #[serde(rename = "ACSingleWireCAN")]
    AcSingleWireCan,

    /// DC fast charging at a Tesla Supercharger.
    #[value(name = "supercharger", alias = "dc")]
    #[serde(rename = "Supercharger")]
    Supercharger,

    /// Public AC charging through a J1772 adapter.
    #[value(name = "j1772")]
    #[serde(rename = "J1772")]
    J1772,
}

impl ChargeType {
    pub const ALL: [Self; 3] = [Self::AcSingleWireCan, Self::Supercharger, Self::J1772];

    /// Value as stored in the spreadsheet and sent to the webhook.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AcSingleWireCan => "ACSingleWireCAN",
            Self::Supercharger => "Supercharger",
            Self::J1772 => "J1772",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::AcSingleWireCan => "AC",
            Self::Supercharger => "DC (Supercharger)",
            Self::J1772 => "J1772",
        }
    }
}

impl Display for ChargeType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for ChargeType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|charge_type| charge_type.as_str() == value)
            .with_context(|| format!("unknown charge type `{value}`"))
    }
}

/// Charge type selection of the log view.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub enum ChargeTypeFilter {
    #[default]
    All,

    Only(ChargeType),
}

impl ChargeTypeFilter {
    /// Match a raw spreadsheet value.
    ///
    /// Absent and unrecognized values only pass [`ChargeTypeFilter::All`].
    #[must_use]
    pub fn matches(self, raw: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Only(charge_type) => raw == Some(charge_type.as_str()),
        }
    }
}

impl From<Option<ChargeType>> for ChargeTypeFilter {
    fn from(charge_type: Option<ChargeType>) -> Self {
        charge_type.map_or(Self::All, Self::Only)
    }
}
