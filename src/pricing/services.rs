use crate::{
    config::{PackagingAllocation, RateSettings},
    models::{
        pricing_result::{
            InsuranceTotals, MandatoryInsurance, OptionalInsurance, PackagingCharge,
            PackagingTotals, PricedLine,
        },
        shipment::{InsuranceSelection, PackagingSelection},
        tariff::{PackagingOption, PackagingPhase, ShipmentType},
    },
    pricing::{error::InputError, registry::PackagingCatalog},
    utils::price::{MAX_AMOUNT, calculate_premium, round_amount},
};

#[derive(Debug, Clone, Default)]
pub struct ResolvedPackaging<'a> {
    pub initial: Option<&'a PackagingOption>,
    pub final_packaging: Option<&'a PackagingOption>,
}

fn resolve_phase<'a>(
    catalog: &'a PackagingCatalog,
    key: Option<&str>,
    phase: PackagingPhase,
    errors: &mut Vec<InputError>,
) -> Option<&'a PackagingOption> {
    let option = catalog.resolve(key?).map_err(|e| errors.push(e)).ok()?;

    if option.phase != phase {
        errors.push(InputError::validation(format!(
            "packaging {} is a {} option, not {phase}",
            option.key, option.phase
        )));
        return None;
    }

    Some(option)
}

pub fn resolve_packaging<'a>(
    catalog: &'a PackagingCatalog,
    selection: &PackagingSelection,
    errors: &mut Vec<InputError>,
) -> ResolvedPackaging<'a> {
    ResolvedPackaging {
        initial: resolve_phase(
            catalog,
            selection.initial.as_deref(),
            PackagingPhase::Initial,
            errors,
        ),
        final_packaging: resolve_phase(
            catalog,
            selection.final_packaging.as_deref(),
            PackagingPhase::Final,
            errors,
        ),
    }
}

pub fn validate_insurance(selection: &InsuranceSelection) -> Option<InputError> {
    if !selection.enabled {
        return None;
    }

    match selection.declared_shipment_value {
        Some(value) if value > MAX_AMOUNT => Some(InputError::validation(
            "declared shipment value is out of range",
        )),
        Some(value) if value.is_finite() && value > 0.0 => None,
        Some(_) => Some(InputError::validation(
            "declared shipment value must be greater than zero when insurance is selected",
        )),
        None => Some(InputError::validation(
            "declared shipment value is required when insurance is selected",
        )),
    }
}

fn packaging_charge(option: &PackagingOption, applications: u32) -> PackagingCharge {
    PackagingCharge {
        key: option.key.clone(),
        unit_price: option.price,
        applications,
        amount: round_amount(option.price * applications as f64),
    }
}

pub fn packaging_totals(
    packaging: &ResolvedPackaging<'_>,
    line_count: usize,
    allocation: PackagingAllocation,
) -> PackagingTotals {
    let applications = match allocation {
        PackagingAllocation::PerLine => u32::try_from(line_count).unwrap_or(u32::MAX),
        PackagingAllocation::PerShipment => 1,
    };

    let initial = packaging
        .initial
        .map(|option| packaging_charge(option, applications));
    let final_packaging = packaging
        .final_packaging
        .map(|option| packaging_charge(option, applications));

    let total = round_amount(
        initial.iter().map(|c| c.amount).sum::<f64>()
            + final_packaging.iter().map(|c| c.amount).sum::<f64>(),
    );

    PackagingTotals {
        initial,
        final_packaging,
        total,
    }
}

pub fn insurance_totals(
    selection: &InsuranceSelection,
    lines: &[&PricedLine],
    rates: &RateSettings,
) -> InsuranceTotals {
    let rate = rates.insurance_rate;

    let optional = selection
        .enabled
        .then_some(selection.declared_shipment_value)
        .flatten()
        .filter(|value| *value > 0.0)
        .map(|declared_value| OptionalInsurance {
            declared_value,
            rate,
            premium: calculate_premium(declared_value, rate),
        });

    let mandatory: Vec<MandatoryInsurance> = lines
        .iter()
        .filter(|line| line.shipment_type == ShipmentType::Electronics)
        .map(|line| {
            let declared_value = line.declared_value.unwrap_or_default();
            MandatoryInsurance {
                parcel_id: line.parcel_id.clone(),
                declared_value,
                rate,
                premium: calculate_premium(declared_value, rate),
            }
        })
        .collect();

    let mandatory_total = round_amount(mandatory.iter().map(|m| m.premium).sum());
    let total = round_amount(mandatory_total + optional.as_ref().map_or(0.0, |o| o.premium));

    InsuranceTotals {
        optional,
        mandatory,
        mandatory_total,
        total,
    }
}
