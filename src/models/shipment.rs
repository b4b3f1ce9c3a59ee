use serde::{Deserialize, Serialize};

use crate::{
    models::tariff::{Direction, ShipmentType},
    utils::unit::{LengthUnit, MassUnit},
};

fn one() -> i64 {
    1
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ParcelDimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Parcel {
    pub id: String,
    pub category: String,
    #[serde(default)]
    pub dimensions: Option<ParcelDimensions>,
    #[serde(default)]
    pub dimension_unit: LengthUnit,
    #[serde(default)]
    pub weight: Option<f64>,
    #[serde(default)]
    pub weight_unit: MassUnit,
    #[serde(default = "one")]
    pub quantity: i64,
    #[serde(default = "one")]
    pub repeat_count: i64,
    /// Electronics only: value of the whole line, base of its mandatory insurance.
    #[serde(default)]
    pub declared_value: Option<f64>,
    #[serde(default)]
    pub has_invoice: Option<bool>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default)]
    pub unknown_dimensions: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct InsuranceSelection {
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub declared_shipment_value: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PackagingSelection {
    #[serde(default)]
    pub initial: Option<String>,
    #[serde(default, rename = "final")]
    pub final_packaging: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ShipmentDescription {
    pub direction: Direction,
    pub shipment_types: Vec<ShipmentType>,
    pub parcels: Vec<Parcel>,
    #[serde(default)]
    pub insurance: InsuranceSelection,
    #[serde(default)]
    pub packaging: PackagingSelection,
}

impl ShipmentDescription {
    pub fn is_active(&self, shipment_type: ShipmentType) -> bool {
        self.shipment_types.contains(&shipment_type)
    }
}
