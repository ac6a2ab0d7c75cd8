//! Named predictor column groups.
//!
//! Four predefined sets group the dataset's predictors by domain theme.
//! Every set carries the lag and new-cases columns; `Total` is the union
//! of `Population` and `Policy`.

use crate::error::{Result, SelectionError};
use serde::{Deserialize, Serialize};
use std::fmt;

const POPULATION_COLUMNS: [&str; 4] = ["pop_2020", "pop_2018", "capacity", "pct_occup"];

const POLICY_COLUMNS: [&str; 8] = [
    "no_visits",
    "lawyer_access",
    "phone_access",
    "video_access",
    "no_volunteers",
    "limiting_movement",
    "screening",
    "healthcare_support",
];

/// A named, ordered list of predictor columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FeatureSet {
    /// Lag and new-cases columns only.
    Naive,
    /// Facility population and occupancy features.
    Population,
    /// Pandemic policy response indicator features.
    Policy,
    /// Union of `Population` and `Policy`.
    Total,
}

impl FeatureSet {
    /// Every feature set, in the canonical iteration order.
    pub const ALL: [FeatureSet; 4] = [
        FeatureSet::Naive,
        FeatureSet::Population,
        FeatureSet::Policy,
        FeatureSet::Total,
    ];

    /// Parse a feature-set name.
    pub fn from_name(name: &str) -> Result<Self> {
        match name {
            "naive" => Ok(FeatureSet::Naive),
            "population" => Ok(FeatureSet::Population),
            "policy" => Ok(FeatureSet::Policy),
            "total" => Ok(FeatureSet::Total),
            other => Err(SelectionError::UnknownFeatureSet(other.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FeatureSet::Naive => "naive",
            FeatureSet::Population => "population",
            FeatureSet::Policy => "policy",
            FeatureSet::Total => "total",
        }
    }

    /// Predictor columns of this set, lag and new-cases columns last.
    pub fn columns(&self) -> Vec<String> {
        let themed: Vec<&str> = match self {
            FeatureSet::Naive => vec![],
            FeatureSet::Population => POPULATION_COLUMNS.to_vec(),
            FeatureSet::Policy => POLICY_COLUMNS.to_vec(),
            FeatureSet::Total => POPULATION_COLUMNS
                .iter()
                .chain(POLICY_COLUMNS.iter())
                .copied()
                .collect(),
        };
        themed
            .into_iter()
            .chain([crate::core::LAG_COLUMN, crate::core::NEW_CASES_COLUMN])
            .map(String::from)
            .collect()
    }
}

impl fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
