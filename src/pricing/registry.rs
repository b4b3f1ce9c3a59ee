use std::collections::BTreeMap;

use crate::{
    config::{SettingsError, TariffSettings},
    models::tariff::{PackagingOption, ProductCategory},
    pricing::error::InputError,
};

#[derive(Debug, Clone)]
pub struct TariffRegistry {
    version: String,
    categories: BTreeMap<String, ProductCategory>,
}

impl TariffRegistry {
    pub fn new(settings: &TariffSettings) -> Result<Self, SettingsError> {
        let mut categories = BTreeMap::new();

        for category in &settings.categories {
            for (name, value) in category.method.rates() {
                if !value.is_finite() || value < 0.0 {
                    return Err(SettingsError::Invalid(format!(
                        "category {} has invalid {name}: {value}",
                        category.key
                    )));
                }
            }

            if categories
                .insert(category.key.clone(), category.clone())
                .is_some()
            {
                return Err(SettingsError::Invalid(format!(
                    "duplicate category key {}",
                    category.key
                )));
            }
        }

        Ok(Self {
            version: settings.version.clone(),
            categories,
        })
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn resolve(&self, parcel_id: &str, key: &str) -> Result<&ProductCategory, InputError> {
        self.categories
            .get(key)
            .ok_or_else(|| InputError::UnknownCategory {
                parcel_id: parcel_id.to_string(),
                key: key.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct PackagingCatalog {
    options: BTreeMap<String, PackagingOption>,
}

impl PackagingCatalog {
    pub fn new(options: &[PackagingOption]) -> Result<Self, SettingsError> {
        let mut catalog = BTreeMap::new();

        for option in options {
            if !option.price.is_finite() || option.price < 0.0 {
                return Err(SettingsError::Invalid(format!(
                    "packaging {} has invalid price: {}",
                    option.key, option.price
                )));
            }

            if catalog.insert(option.key.clone(), option.clone()).is_some() {
                return Err(SettingsError::Invalid(format!(
                    "duplicate packaging key {}",
                    option.key
                )));
            }
        }

        Ok(Self { options: catalog })
    }

    pub fn resolve(&self, key: &str) -> Result<&PackagingOption, InputError> {
        self.options
            .get(key)
            .ok_or_else(|| InputError::UnknownPackaging {
                key: key.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::models::tariff::{PricingMethod, ShipmentType};

    #[test]
    fn resolves_known_category() {
        let registry = TariffRegistry::new(&Settings::default().tariff).unwrap();
        let category = registry.resolve("p-1", "clothing").unwrap();
        assert_eq!(category.shipment_type, ShipmentType::ParcelLcl);
        assert_eq!(registry.version(), "builtin-1");
    }

    #[test]
    fn unknown_category_names_parcel_and_key() {
        let registry = TariffRegistry::new(&Settings::default().tariff).unwrap();
        let err = registry.resolve("p-9", "spaceship").unwrap_err();
        assert_eq!(
            err,
            InputError::UnknownCategory {
                parcel_id: "p-9".into(),
                key: "spaceship".into()
            }
        );
    }

    #[test]
    fn rejects_duplicate_keys() {
        let mut tariff = Settings::default().tariff;
        tariff.categories.push(tariff.categories[0].clone());
        assert!(matches!(
            TariffRegistry::new(&tariff),
            Err(SettingsError::Invalid(_))
        ));
    }

    #[test]
    fn rejects_negative_rates() {
        let mut tariff = Settings::default().tariff;
        tariff.categories[0].method = PricingMethod::PerKg {
            price_per_kg: -1.0,
            minimum_weight: 0.0,
        };
        assert!(TariffRegistry::new(&tariff).is_err());
    }

    #[test]
    fn unknown_packaging_is_an_input_error() {
        let catalog = PackagingCatalog::new(&Settings::default().packaging).unwrap();
        assert!(catalog.resolve("carton").is_ok());
        assert_eq!(catalog.resolve("gift_box").unwrap_err().code(), "unknown_packaging");
    }
}
