use std::collections::BTreeMap;

use tracing::error;

use crate::{
    models::{
        pricing_result::{
            BucketBreakdown, InsuranceTotals, LineStatus, PackagingTotals, PricingResult,
        },
        tariff::{Direction, ShipmentType},
    },
    pricing::{
        error::QuoteError,
        line::{APPROXIMATE_DISCLAIMER, MANUAL_QUOTATION_NOTE},
    },
    utils::price::round_amount,
};

const TOTAL_TOLERANCE: f64 = 0.005;

pub struct QuoteParts {
    pub currency: String,
    pub tariff_version: String,
    pub direction: Direction,
    pub active_types: Vec<ShipmentType>,
    pub buckets: BTreeMap<ShipmentType, BucketBreakdown>,
    pub packaging: PackagingTotals,
    pub insurance: InsuranceTotals,
}

fn defect(message: String) -> QuoteError {
    error!("Quote engine defect: {message}");
    QuoteError::InternalConsistency(message)
}

fn check_amount(name: &str, amount: f64) -> Result<(), QuoteError> {
    if amount.is_finite() && amount >= 0.0 {
        Ok(())
    } else {
        Err(defect(format!("{name} is not a non-negative amount: {amount}")))
    }
}

pub fn assemble(parts: QuoteParts) -> Result<PricingResult, QuoteError> {
    let QuoteParts {
        currency,
        tariff_version,
        direction,
        active_types,
        mut buckets,
        packaging,
        insurance,
    } = parts;

    for (shipment_type, bucket) in &buckets {
        if !active_types.contains(shipment_type) {
            return Err(defect(format!("bucket {shipment_type} is not an active type")));
        }
        if bucket.shipment_type != *shipment_type {
            return Err(defect(format!(
                "bucket {shipment_type} holds {} lines",
                bucket.shipment_type
            )));
        }
        if bucket.lines.is_empty() {
            return Err(defect(format!("bucket {shipment_type} has no lines")));
        }
        check_amount(&format!("{shipment_type} final"), bucket.final_amount)?;
        if let Some(base) = &bucket.base_price {
            check_amount(&format!("{shipment_type} price by weight"), base.price_by_weight)?;
            check_amount(&format!("{shipment_type} price by cbm"), base.price_by_cbm)?;
        }
    }
    check_amount("packaging total", packaging.total)?;
    check_amount("insurance total", insurance.total)?;

    let buckets_total: f64 = buckets.values().map(|b| b.final_amount).sum();
    let grand_total = round_amount(buckets_total + packaging.total + insurance.total);
    check_amount("grand total", grand_total)?;

    let mut notes = Vec::new();
    let mut pending_manual_quotation = Vec::new();
    let mut approximate = false;

    for bucket in buckets.values() {
        for line in &bucket.lines {
            match line.status {
                LineStatus::Priced => {}
                LineStatus::Approximate => approximate = true,
                LineStatus::PendingManualQuotation => {
                    pending_manual_quotation.push(line.parcel_id.clone())
                }
            }
        }
    }
    if approximate {
        notes.push(APPROXIMATE_DISCLAIMER.to_string());
    }
    if !pending_manual_quotation.is_empty() {
        notes.push(MANUAL_QUOTATION_NOTE.to_string());
    }

    let parcel = buckets.remove(&ShipmentType::ParcelLcl);
    let result = PricingResult {
        currency,
        tariff_version,
        direction,
        base_price: parcel.as_ref().and_then(|b| b.base_price.clone()),
        parcel,
        electronics: buckets.remove(&ShipmentType::Electronics),
        large_items: buckets.remove(&ShipmentType::LargeItems),
        business_lcl: buckets.remove(&ShipmentType::BusinessLcl),
        packaging,
        insurance,
        approximate,
        pending_manual_quotation,
        notes,
        grand_total,
    };

    let recomputed: f64 = result.buckets().map(|b| b.final_amount).sum::<f64>()
        + result.packaging.total
        + result.insurance.total;
    if (recomputed - result.grand_total).abs() > TOTAL_TOLERANCE {
        return Err(defect(format!(
            "grand total {} does not match its components {recomputed}",
            result.grand_total
        )));
    }

    Ok(result)
}
