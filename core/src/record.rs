//! Raw yearly indicator records.
//!
//! RULE: A YearRecord is complete or it does not exist.
//! Every field is required on deserialization; nothing is defaulted.

use crate::{
    error::{EngineError, EngineResult},
    types::Year,
};
use serde::{Deserialize, Serialize};

/// Countries whose Fortune 500 counts are tracked per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[serde(rename = "USA")]
    Usa,
    China,
    India,
}

impl Country {
    pub const ALL: [Country; 3] = [Country::Usa, Country::China, Country::India];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Usa   => "USA",
            Self::China => "China",
            Self::India => "India",
        }
    }
}

/// One year of raw indicators. Monetary amounts are in billions of USD.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct YearRecord {
    pub year:              Year,
    #[serde(rename = "USA")]
    pub usa:               u32,
    #[serde(rename = "China")]
    pub china:             u32,
    #[serde(rename = "India")]
    pub india:             u32,
    #[serde(rename = "EMNC_total")]
    pub emnc_total:        u32,
    #[serde(rename = "OFDI")]
    pub ofdi:              f64,
    #[serde(rename = "IFDI")]
    pub ifdi:              f64,
    #[serde(rename = "Greenfield")]
    pub greenfield:        f64,
    #[serde(rename = "M_and_A")]
    pub m_and_a:           f64,
    #[serde(rename = "GDP_share")]
    pub gdp_share:         f64,
    #[serde(rename = "GDP_growth")]
    pub gdp_growth:        f64,
    #[serde(rename = "D_ESG")]
    pub d_esg:             f64,
    #[serde(rename = "Billionaire_count")]
    pub billionaire_count: u32,
}

impl YearRecord {
    pub fn country_count(&self, country: Country) -> u32 {
        match country {
            Country::Usa   => self.usa,
            Country::China => self.china,
            Country::India => self.india,
        }
    }

    /// Check the constraints the type system cannot express.
    pub fn validate(&self) -> EngineResult<()> {
        let finite = [
            ("OFDI", self.ofdi),
            ("IFDI", self.ifdi),
            ("Greenfield", self.greenfield),
            ("M_and_A", self.m_and_a),
            ("GDP_share", self.gdp_share),
            ("GDP_growth", self.gdp_growth),
            ("D_ESG", self.d_esg),
        ];
        for (field, value) in finite {
            if !value.is_finite() {
                return Err(EngineError::validation(format!(
                    "year {}: {field} is not a finite number ({value})",
                    self.year
                )));
            }
        }

        let amounts = [
            ("OFDI", self.ofdi),
            ("IFDI", self.ifdi),
            ("Greenfield", self.greenfield),
            ("M_and_A", self.m_and_a),
        ];
        for (field, value) in amounts {
            if value < 0.0 {
                return Err(EngineError::validation(format!(
                    "year {}: {field} must not be negative ({value})",
                    self.year
                )));
            }
        }
        Ok(())
    }
}
