use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UnitError {
    #[error("Invalid unit: {0}")]
    InvalidUnit(String),

    #[error("Invalid amount: {0}")]
    InvalidAmount(f64),
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum MassUnit {
    G,
    #[default]
    Kg,
    Lb,
}

impl MassUnit {
    pub fn to_kilograms(&self) -> f64 {
        match self {
            MassUnit::G => 0.001,
            MassUnit::Kg => 1.0,
            MassUnit::Lb => 0.453592,
        }
    }

    pub fn amount_in_kilograms(&self, amount: f64) -> Result<f64, UnitError> {
        if !amount.is_finite() {
            return Err(UnitError::InvalidAmount(amount));
        }

        Ok(amount * self.to_kilograms())
    }
}

impl fmt::Display for MassUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit_str = match self {
            MassUnit::G => "g",
            MassUnit::Kg => "kg",
            MassUnit::Lb => "lb",
        };
        write!(f, "{unit_str}")
    }
}

impl FromStr for MassUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "g" => Ok(MassUnit::G),
            "kg" => Ok(MassUnit::Kg),
            "lb" => Ok(MassUnit::Lb),
            other => Err(UnitError::InvalidUnit(other.to_string())),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Cm,
    M,
    In,
}

impl LengthUnit {
    pub fn to_centimetres(&self) -> f64 {
        match self {
            LengthUnit::Cm => 1.0,
            LengthUnit::M => 100.0,
            LengthUnit::In => 2.54,
        }
    }

    pub fn amount_in_centimetres(&self, amount: f64) -> Result<f64, UnitError> {
        if !amount.is_finite() {
            return Err(UnitError::InvalidAmount(amount));
        }

        Ok(amount * self.to_centimetres())
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let unit_str = match self {
            LengthUnit::Cm => "cm",
            LengthUnit::M => "m",
            LengthUnit::In => "in",
        };
        write!(f, "{unit_str}")
    }
}

impl FromStr for LengthUnit {
    type Err = UnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cm" => Ok(LengthUnit::Cm),
            "m" => Ok(LengthUnit::M),
            "in" => Ok(LengthUnit::In),
            other => Err(UnitError::InvalidUnit(other.to_string())),
        }
    }
}

pub fn cubic_metres(length_cm: f64, width_cm: f64, height_cm: f64) -> f64 {
    (length_cm / 100.0) * (width_cm / 100.0) * (height_cm / 100.0)
}
