use std::collections::BTreeMap;

use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::models::tariff::{
    Direction, PackagingOption, PackagingPhase, PricingMethod, ProductCategory, ShipmentType,
};

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Configuration loading failed: {0}")]
    Load(#[from] ConfigError),

    #[error("Invalid reference data: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PackagingAllocation {
    #[default]
    PerLine,
    PerShipment,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VolumeRates {
    pub eu_to_syria: f64,
    pub syria_to_eu: f64,
}

impl VolumeRates {
    pub fn for_direction(&self, direction: Direction) -> f64 {
        match direction {
            Direction::EuToSyria => self.eu_to_syria,
            Direction::SyriaToEu => self.syria_to_eu,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSettings {
    pub insurance_rate: f64,
    pub volume_rates: VolumeRates,
    #[serde(default)]
    pub minimum_cbm: f64,
    #[serde(default)]
    pub large_item_estimates: BTreeMap<String, f64>,
    pub default_large_item_estimate: f64,
    #[serde(default)]
    pub packaging_allocation: PackagingAllocation,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TariffSettings {
    pub version: String,
    pub categories: Vec<ProductCategory>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub currency: String,
    pub tariff: TariffSettings,
    pub packaging: Vec<PackagingOption>,
    pub rates: RateSettings,
}

impl Settings {
    pub fn load(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let default = Self::default();

        match Self::load_from_file(config_path) {
            Ok(settings) => Ok(settings),
            Err(err) if config_path.is_none() => {
                warn!("Could not read config file: {err}. Using default configuration.",);
                Ok(default)
            }
            Err(err) => Err(err),
        }
    }

    fn load_from_file(config_path: &Option<String>) -> Result<Self, SettingsError> {
        let path = config_path.as_deref().unwrap_or("config.toml");

        let config = Config::builder()
            .add_source(File::with_name(path).required(config_path.is_some()))
            .build()?
            .try_deserialize::<Settings>()?;

        Ok(config)
    }
}

fn category(
    key: &str,
    shipment_type: ShipmentType,
    method: PricingMethod,
    customs: &str,
) -> ProductCategory {
    ProductCategory {
        key: key.to_string(),
        shipment_type,
        method,
        customs_code: Some(customs.to_string()),
    }
}

fn packaging(key: &str, price: f64, phase: PackagingPhase) -> PackagingOption {
    PackagingOption {
        key: key.to_string(),
        price,
        phase,
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency: "EUR".to_string(),
            tariff: TariffSettings {
                version: "builtin-1".to_string(),
                categories: vec![
                    category(
                        "clothing",
                        ShipmentType::ParcelLcl,
                        PricingMethod::PerKg {
                            price_per_kg: 3.0,
                            minimum_weight: 20.0,
                        },
                        "6109",
                    ),
                    category(
                        "food",
                        ShipmentType::ParcelLcl,
                        PricingMethod::PerKg {
                            price_per_kg: 3.5,
                            minimum_weight: 10.0,
                        },
                        "2106",
                    ),
                    category(
                        "household",
                        ShipmentType::ParcelLcl,
                        PricingMethod::VolumeBased {
                            price_per_cbm: None,
                            minimum_cbm: None,
                        },
                        "9403",
                    ),
                    category(
                        "mobile_phone",
                        ShipmentType::Electronics,
                        PricingMethod::PerPiece {
                            price_per_piece: 80.0,
                        },
                        "8517",
                    ),
                    category(
                        "laptop",
                        ShipmentType::Electronics,
                        PricingMethod::PerPiece {
                            price_per_piece: 60.0,
                        },
                        "8471",
                    ),
                    category(
                        "furniture",
                        ShipmentType::LargeItems,
                        PricingMethod::VolumeBased {
                            price_per_cbm: Some(220.0),
                            minimum_cbm: Some(0.5),
                        },
                        "9401",
                    ),
                    category(
                        "vehicle_parts",
                        ShipmentType::LargeItems,
                        PricingMethod::Agreement,
                        "8708",
                    ),
                    category(
                        "commercial_goods",
                        ShipmentType::BusinessLcl,
                        PricingMethod::PerKg {
                            price_per_kg: 2.5,
                            minimum_weight: 50.0,
                        },
                        "9999",
                    ),
                ],
            },
            packaging: vec![
                packaging("carton", 5.0, PackagingPhase::Initial),
                packaging("bubble_wrap", 8.0, PackagingPhase::Initial),
                packaging("wooden_crate", 45.0, PackagingPhase::Final),
                packaging("shrink_wrap", 12.0, PackagingPhase::Final),
            ],
            rates: RateSettings {
                insurance_rate: 0.015,
                volume_rates: VolumeRates {
                    eu_to_syria: 250.0,
                    syria_to_eu: 200.0,
                },
                minimum_cbm: 0.1,
                large_item_estimates: BTreeMap::from([
                    ("sofa".to_string(), 180.0),
                    ("wardrobe".to_string(), 220.0),
                    ("refrigerator".to_string(), 150.0),
                ]),
                default_large_item_estimate: 200.0,
                packaging_allocation: PackagingAllocation::PerLine,
            },
        }
    }
}
