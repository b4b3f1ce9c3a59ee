use serde::{Deserialize, Serialize};
use std::fmt;
use typeshare::typeshare;

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    EuToSyria,
    SyriaToEu,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let direction_str = match self {
            Direction::EuToSyria => "eu_to_syria",
            Direction::SyriaToEu => "syria_to_eu",
        };
        write!(f, "{direction_str}")
    }
}

/// Bucket a category belongs to. Declaration order is the order buckets appear in a result.
#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ShipmentType {
    ParcelLcl,
    Electronics,
    LargeItems,
    BusinessLcl,
}

impl ShipmentType {
    pub fn is_lcl(&self) -> bool {
        matches!(self, ShipmentType::ParcelLcl | ShipmentType::BusinessLcl)
    }
}

impl fmt::Display for ShipmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let type_str = match self {
            ShipmentType::ParcelLcl => "parcel_lcl",
            ShipmentType::Electronics => "electronics",
            ShipmentType::LargeItems => "large_items",
            ShipmentType::BusinessLcl => "business_lcl",
        };
        write!(f, "{type_str}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PricingMethod {
    PerKg {
        price_per_kg: f64,
        #[serde(default)]
        minimum_weight: f64,
    },
    PerPiece {
        price_per_piece: f64,
    },
    VolumeBased {
        #[serde(default)]
        price_per_cbm: Option<f64>,
        #[serde(default)]
        minimum_cbm: Option<f64>,
    },
    Agreement,
}

impl PricingMethod {
    pub fn kind(&self) -> PricingMethodKind {
        match self {
            PricingMethod::PerKg { .. } => PricingMethodKind::PerKg,
            PricingMethod::PerPiece { .. } => PricingMethodKind::PerPiece,
            PricingMethod::VolumeBased { .. } => PricingMethodKind::VolumeBased,
            PricingMethod::Agreement => PricingMethodKind::Agreement,
        }
    }

    pub fn rates(&self) -> Vec<(&'static str, f64)> {
        match self {
            PricingMethod::PerKg {
                price_per_kg,
                minimum_weight,
            } => vec![
                ("price_per_kg", *price_per_kg),
                ("minimum_weight", *minimum_weight),
            ],
            PricingMethod::PerPiece { price_per_piece } => {
                vec![("price_per_piece", *price_per_piece)]
            }
            PricingMethod::VolumeBased {
                price_per_cbm,
                minimum_cbm,
            } => price_per_cbm
                .map(|v| ("price_per_cbm", v))
                .into_iter()
                .chain(minimum_cbm.map(|v| ("minimum_cbm", v)))
                .collect(),
            PricingMethod::Agreement => Vec::new(),
        }
    }
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PricingMethodKind {
    PerKg,
    PerPiece,
    VolumeBased,
    Agreement,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProductCategory {
    pub key: String,
    pub shipment_type: ShipmentType,
    #[serde(flatten)]
    pub method: PricingMethod,
    #[serde(default)]
    pub customs_code: Option<String>,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PackagingPhase {
    Initial,
    Final,
}

impl fmt::Display for PackagingPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase_str = match self {
            PackagingPhase::Initial => "initial",
            PackagingPhase::Final => "final",
        };
        write!(f, "{phase_str}")
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PackagingOption {
    pub key: String,
    pub price: f64,
    pub phase: PackagingPhase,
}
