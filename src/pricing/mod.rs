pub mod aggregate;
pub mod assemble;
pub mod error;
pub mod line;
pub mod normalizer;
pub mod registry;
pub mod services;

use tracing::{debug, info};

use crate::{
    config::{RateSettings, Settings, SettingsError},
    models::{pricing_result::PricingResult, shipment::ShipmentDescription},
    pricing::{
        aggregate::aggregate,
        assemble::{QuoteParts, assemble},
        error::{InputError, QuoteError},
        line::{LineContext, price_line, validate_line},
        normalizer::normalize,
        registry::{PackagingCatalog, TariffRegistry},
        services::{insurance_totals, packaging_totals, resolve_packaging, validate_insurance},
    },
    utils::price::MAX_AMOUNT,
};

#[derive(Debug, Clone)]
pub struct QuoteEngine {
    currency: String,
    tariffs: TariffRegistry,
    packaging: PackagingCatalog,
    rates: RateSettings,
}

impl QuoteEngine {
    pub fn new(settings: &Settings) -> Result<Self, SettingsError> {
        let rates = &settings.rates;
        let configured = [
            ("insurance_rate", rates.insurance_rate),
            ("volume_rates.eu_to_syria", rates.volume_rates.eu_to_syria),
            ("volume_rates.syria_to_eu", rates.volume_rates.syria_to_eu),
            ("minimum_cbm", rates.minimum_cbm),
            ("default_large_item_estimate", rates.default_large_item_estimate),
        ]
        .into_iter()
        .chain(
            rates
                .large_item_estimates
                .values()
                .map(|v| ("large_item_estimates", *v)),
        );

        for (name, value) in configured {
            if !value.is_finite() || value < 0.0 {
                return Err(SettingsError::Invalid(format!("{name} is invalid: {value}")));
            }
        }

        Ok(Self {
            currency: settings.currency.clone(),
            tariffs: TariffRegistry::new(&settings.tariff)?,
            packaging: PackagingCatalog::new(&settings.packaging)?,
            rates: settings.rates.clone(),
        })
    }

    pub fn tariffs(&self) -> &TariffRegistry {
        &self.tariffs
    }

    pub fn quote(&self, shipment: &ShipmentDescription) -> Result<PricingResult, QuoteError> {
        let mut errors: Vec<InputError> = Vec::new();

        if shipment.shipment_types.is_empty() {
            errors.push(InputError::validation("at least one shipment type is required"));
        }
        if shipment.parcels.is_empty() {
            errors.push(InputError::validation("at least one parcel is required"));
        }
        errors.extend(validate_insurance(&shipment.insurance));

        let ctx = LineContext {
            direction: shipment.direction,
            rates: &self.rates,
        };

        let volume_rate = self.rates.volume_rates.for_direction(shipment.direction);
        let in_range = |amount: f64| amount.is_finite() && amount <= MAX_AMOUNT;
        let mut lines = Vec::with_capacity(shipment.parcels.len());

        for parcel in &shipment.parcels {
            let category = self
                .tariffs
                .resolve(&parcel.id, &parcel.category)
                .map_err(|e| errors.push(e))
                .ok();
            let normalized = normalize(parcel).map_err(|e| errors.push(e)).ok();

            let Some(category) = category else {
                continue;
            };

            if !shipment.is_active(category.shipment_type) {
                errors.push(InputError::parcel_validation(
                    &parcel.id,
                    format!(
                        "category {} belongs to shipment type {}, which is not selected",
                        category.key, category.shipment_type
                    ),
                ));
            }

            let line_errors = validate_line(parcel, category);
            if !line_errors.is_empty() {
                errors.extend(line_errors);
                continue;
            }

            let Some(normalized) = normalized else {
                continue;
            };

            let line = price_line(parcel, &normalized, category, &ctx);
            let volumetric = line.line_cbm.unwrap_or_default() * volume_rate;
            if !in_range(line.amount()) || !in_range(volumetric) {
                errors.push(InputError::InvalidDimensions {
                    parcel_id: parcel.id.clone(),
                    reason: "line amount is out of range".into(),
                });
                continue;
            }
            lines.push(line);
        }

        let packaging = resolve_packaging(&self.packaging, &shipment.packaging, &mut errors);

        if !errors.is_empty() {
            debug!("Shipment rejected with {} error(s)", errors.len());
            return Err(QuoteError::Rejected(errors));
        }

        let line_count = lines.len();
        let packaging = packaging_totals(&packaging, line_count, self.rates.packaging_allocation);
        let insurance = {
            let priced: Vec<_> = lines.iter().collect();
            insurance_totals(&shipment.insurance, &priced, &self.rates)
        };

        let buckets = aggregate(lines, volume_rate);

        let result = assemble(QuoteParts {
            currency: self.currency.clone(),
            tariff_version: self.tariffs.version().to_string(),
            direction: shipment.direction,
            active_types: shipment.shipment_types.clone(),
            buckets,
            packaging,
            insurance,
        })?;

        info!(
            "Quote computed: {} {} for {line_count} line(s) ({})",
            result.grand_total, result.currency, shipment.direction
        );

        Ok(result)
    }
}
