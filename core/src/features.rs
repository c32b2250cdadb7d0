//! Input features for one classification query
//!
//! Every prediction round starts from the same four measurements. They
//! arrive as raw query-string values and are validated here before any
//! provider is contacted, so bad input never costs a network round trip.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeatureError {
    #[error("Missing feature value: {0}")]
    Missing(&'static str),

    #[error("Invalid feature value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}

/// The four measurements submitted with a prediction query.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Features {
    pub sepal_length: f64,
    pub sepal_width: f64,
    pub petal_length: f64,
    pub petal_width: f64,
}

impl Features {
    pub fn new(sepal_length: f64, sepal_width: f64, petal_length: f64, petal_width: f64) -> Self {
        Self {
            sepal_length,
            sepal_width,
            petal_length,
            petal_width,
        }
    }

    /// Parse the four raw query values, rejecting missing or non-numeric
    /// input with the offending parameter name.
    pub fn parse(
        sepal_length: Option<&str>,
        sepal_width: Option<&str>,
        petal_length: Option<&str>,
        petal_width: Option<&str>,
    ) -> Result<Self, FeatureError> {
        Ok(Self {
            sepal_length: parse_value("sepal_length", sepal_length)?,
            sepal_width: parse_value("sepal_width", sepal_width)?,
            petal_length: parse_value("petal_length", petal_length)?,
            petal_width: parse_value("petal_width", petal_width)?,
        })
    }

    /// Query-parameter pairs in the order providers expect them.
    pub fn as_query(&self) -> [(&'static str, f64); 4] {
        [
            ("sepal_length", self.sepal_length),
            ("sepal_width", self.sepal_width),
            ("petal_length", self.petal_length),
            ("petal_width", self.petal_width),
        ]
    }
}

fn parse_value(name: &'static str, raw: Option<&str>) -> Result<f64, FeatureError> {
    let raw = raw.ok_or(FeatureError::Missing(name))?;
    let value: f64 = raw.trim().parse().map_err(|_| FeatureError::Invalid {
        name,
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(FeatureError::Invalid {
            name,
            value: raw.to_string(),
        });
    }

    Ok(value)
}
