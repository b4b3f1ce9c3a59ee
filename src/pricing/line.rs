use tracing::{debug, warn};

use crate::{
    config::RateSettings,
    models::{
        pricing_result::{LineStatus, PricedLine},
        shipment::Parcel,
        tariff::{Direction, PricingMethod, ProductCategory, ShipmentType},
    },
    pricing::{error::InputError, normalizer::NormalizedParcel},
    utils::price::{MAX_AMOUNT, calculate_rate_price, calculate_unit_price},
};

pub const APPROXIMATE_DISCLAIMER: &str = "Dimensions unknown: the amount is an estimate and \
will be confirmed after the item is measured at the warehouse.";

pub const MANUAL_QUOTATION_NOTE: &str =
    "Priced by agreement: this line awaits a manual quotation and is not included in the total.";

pub struct LineContext<'a> {
    pub direction: Direction,
    pub rates: &'a RateSettings,
}

pub fn validate_line(parcel: &Parcel, category: &ProductCategory) -> Vec<InputError> {
    let mut errors = Vec::new();

    if category.shipment_type == ShipmentType::Electronics {
        match parcel.declared_value {
            None => errors.push(InputError::MissingDeclaredValue {
                parcel_id: parcel.id.clone(),
            }),
            Some(value) if !value.is_finite() || value <= 0.0 => {
                errors.push(InputError::parcel_validation(
                    &parcel.id,
                    "declared value must be greater than zero",
                ))
            }
            Some(value) if value > MAX_AMOUNT => errors.push(InputError::parcel_validation(
                &parcel.id,
                "declared value is out of range",
            )),
            Some(_) => {}
        }
    }

    if parcel.unknown_dimensions && category.shipment_type != ShipmentType::LargeItems {
        errors.push(InputError::parcel_validation(
            &parcel.id,
            "unknown dimensions are only accepted for large items",
        ));
    }

    errors
}

pub fn price_line(
    parcel: &Parcel,
    normalized: &NormalizedParcel,
    category: &ProductCategory,
    ctx: &LineContext<'_>,
) -> PricedLine {
    let mut line = PricedLine {
        parcel_id: parcel.id.clone(),
        category: category.key.clone(),
        shipment_type: category.shipment_type,
        method: category.method.kind(),
        customs_code: category.customs_code.clone(),
        quantity: normalized.quantity,
        repeat_count: normalized.repeat_count,
        unit_cbm: normalized.volume.as_ref().map(|v| v.unit_cbm),
        line_cbm: normalized.volume.as_ref().map(|v| v.line_cbm),
        line_weight_kg: normalized.line_weight_kg,
        billable_weight_kg: None,
        billable_cbm: None,
        rate: None,
        price: None,
        status: LineStatus::Priced,
        declared_value: parcel.declared_value,
        has_invoice: parcel.has_invoice,
        item_type: parcel.item_type.clone(),
        disclaimer: None,
    };

    match (&category.method, &normalized.volume) {
        (PricingMethod::Agreement, _) => {
            warn!("Parcel {} is priced by agreement, pending manual quotation", parcel.id);
            line.status = LineStatus::PendingManualQuotation;
            line.disclaimer = Some(MANUAL_QUOTATION_NOTE.to_string());
        }
        (_, None) => {
            let item_type = parcel.item_type.as_deref().unwrap_or_default();
            let estimate = ctx
                .rates
                .large_item_estimates
                .get(item_type)
                .copied()
                .unwrap_or(ctx.rates.default_large_item_estimate);

            warn!(
                "Parcel {} has unknown dimensions, estimating {estimate} per piece",
                parcel.id
            );

            line.rate = Some(estimate);
            line.price = Some(calculate_unit_price(
                estimate,
                normalized.quantity,
                normalized.repeat_count,
            ));
            line.status = LineStatus::Approximate;
            line.disclaimer = Some(APPROXIMATE_DISCLAIMER.to_string());
        }
        (
            PricingMethod::PerKg {
                price_per_kg,
                minimum_weight,
            },
            Some(_),
        ) => {
            let weight = normalized.line_weight_kg.unwrap_or_default();
            let billable = weight.max(*minimum_weight);
            line.billable_weight_kg = Some(billable);
            line.rate = Some(*price_per_kg);
            line.price = Some(calculate_rate_price(billable, *price_per_kg));
        }
        (PricingMethod::PerPiece { price_per_piece }, Some(_)) => {
            line.rate = Some(*price_per_piece);
            line.price = Some(calculate_unit_price(
                *price_per_piece,
                normalized.quantity,
                normalized.repeat_count,
            ));
        }
        (
            PricingMethod::VolumeBased {
                price_per_cbm,
                minimum_cbm,
            },
            Some(volume),
        ) => {
            let rate = price_per_cbm
                .unwrap_or_else(|| ctx.rates.volume_rates.for_direction(ctx.direction));
            let floor = minimum_cbm.unwrap_or(ctx.rates.minimum_cbm);
            let billable = volume.line_cbm.max(floor);
            line.billable_cbm = Some(billable);
            line.rate = Some(rate);
            line.price = Some(calculate_rate_price(billable, rate));
        }
    }

    debug!(
        "Priced parcel {} ({}, {:?}): {:?}",
        line.parcel_id, line.category, line.method, line.price
    );

    line
}
