//! The metric catalogue: every raw and derived column, by stable name.
//!
//! Names match the column headers used by the dataset files, so they can
//! travel unchanged between loaders, config and presentation consumers.

use crate::error::{EngineError, EngineResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Metric {
    // ── Raw ────────────────────────────────────────
    Usa,
    China,
    India,
    EmncTotal,
    Ofdi,
    Ifdi,
    Greenfield,
    MAndA,
    GdpShare,
    GdpGrowth,
    DEsg,
    BillionaireCount,

    // ── Derived ────────────────────────────────────
    EmncShare,
    FdiNet,
    FdiRatio,
    GreenfieldShare,
    MAndAShare,
    DEsgPer100Emnc,
    BillionairesPer100Emnc,
}

impl Metric {
    pub const ALL: [Metric; 19] = [
        Metric::Usa,
        Metric::China,
        Metric::India,
        Metric::EmncTotal,
        Metric::Ofdi,
        Metric::Ifdi,
        Metric::Greenfield,
        Metric::MAndA,
        Metric::GdpShare,
        Metric::GdpGrowth,
        Metric::DEsg,
        Metric::BillionaireCount,
        Metric::EmncShare,
        Metric::FdiNet,
        Metric::FdiRatio,
        Metric::GreenfieldShare,
        Metric::MAndAShare,
        Metric::DEsgPer100Emnc,
        Metric::BillionairesPer100Emnc,
    ];

    /// Columns of the correlation view, in display order.
    pub const CORRELATION_DEFAULT: [Metric; 17] = [
        Metric::EmncTotal,
        Metric::Usa,
        Metric::China,
        Metric::India,
        Metric::Ofdi,
        Metric::Ifdi,
        Metric::GdpShare,
        Metric::GdpGrowth,
        Metric::DEsg,
        Metric::BillionaireCount,
        Metric::EmncShare,
        Metric::FdiNet,
        Metric::FdiRatio,
        Metric::GreenfieldShare,
        Metric::MAndAShare,
        Metric::DEsgPer100Emnc,
        Metric::BillionairesPer100Emnc,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Usa                    => "USA",
            Self::China                  => "China",
            Self::India                  => "India",
            Self::EmncTotal              => "EMNC_total",
            Self::Ofdi                   => "OFDI",
            Self::Ifdi                   => "IFDI",
            Self::Greenfield             => "Greenfield",
            Self::MAndA                  => "M_and_A",
            Self::GdpShare               => "GDP_share",
            Self::GdpGrowth              => "GDP_growth",
            Self::DEsg                   => "D_ESG",
            Self::BillionaireCount       => "Billionaire_count",
            Self::EmncShare              => "EMNC_share",
            Self::FdiNet                 => "FDI_net",
            Self::FdiRatio               => "FDI_ratio",
            Self::GreenfieldShare        => "Greenfield_share",
            Self::MAndAShare             => "M_and_A_share",
            Self::DEsgPer100Emnc         => "D_ESG_per_100eMNC",
            Self::BillionairesPer100Emnc => "Billionaires_per_100eMNC",
        }
    }

    /// Look up a metric by its column name. Exact, case-sensitive match.
    pub fn from_name(name: &str) -> EngineResult<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|m| m.name() == name)
            .ok_or_else(|| EngineError::not_found(format!("Metric '{name}'")))
    }

    /// Parse an ordered list of names, failing on the first unknown one.
    pub fn parse_list<S: AsRef<str>>(names: &[S]) -> EngineResult<Vec<Self>> {
        names.iter().map(|n| Self::from_name(n.as_ref())).collect()
    }

    pub fn is_derived(&self) -> bool {
        *self >= Self::EmncShare
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for Metric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for Metric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Metric::from_name(&name).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_round_trips() {
        for metric in Metric::ALL {
            assert_eq!(Metric::from_name(metric.name()).unwrap(), metric);
        }
    }

    #[test]
    fn unknown_name_is_not_found() {
        let err = Metric::from_name("emnc_total").unwrap_err();
        assert!(matches!(err, EngineError::NotFound { .. }));
    }

    #[test]
    fn derived_split() {
        assert!(!Metric::BillionaireCount.is_derived());
        assert!(Metric::EmncShare.is_derived());
        assert_eq!(Metric::ALL.iter().filter(|m| m.is_derived()).count(), 7);
    }
}
