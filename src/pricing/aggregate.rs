use std::collections::BTreeMap;

use tracing::debug;

use crate::{
    models::{
        pricing_result::{BasePrice, BucketBreakdown, LineStatus, PricedLine},
        tariff::ShipmentType,
    },
    utils::price::{calculate_rate_price, round_amount},
};

pub fn aggregate(
    lines: Vec<PricedLine>,
    volume_rate: f64,
) -> BTreeMap<ShipmentType, BucketBreakdown> {
    let mut grouped: BTreeMap<ShipmentType, Vec<PricedLine>> = BTreeMap::new();
    for line in lines {
        grouped.entry(line.shipment_type).or_default().push(line);
    }

    grouped
        .into_iter()
        .map(|(shipment_type, lines)| {
            let bucket = build_bucket(shipment_type, lines, volume_rate);
            (shipment_type, bucket)
        })
        .collect()
}

fn build_bucket(
    shipment_type: ShipmentType,
    lines: Vec<PricedLine>,
    volume_rate: f64,
) -> BucketBreakdown {
    let total_weight_kg: f64 = lines.iter().filter_map(|l| l.line_weight_kg).sum();
    let total_cbm: f64 = lines.iter().filter_map(|l| l.line_cbm).sum();
    let subtotal = round_amount(lines.iter().map(PricedLine::amount).sum());

    let approximate = lines.iter().any(|l| l.status == LineStatus::Approximate);
    let pending_manual_quotation = lines
        .iter()
        .any(|l| l.status == LineStatus::PendingManualQuotation);

    let base_price = shipment_type.is_lcl().then(|| {
        let priced_cbm: f64 = lines
            .iter()
            .filter(|l| l.status == LineStatus::Priced)
            .filter_map(|l| l.line_cbm)
            .sum();
        compute_base_price(subtotal, calculate_rate_price(priced_cbm, volume_rate))
    });

    let final_amount = base_price
        .as_ref()
        .map(|b| b.final_amount)
        .unwrap_or(subtotal);

    debug!(
        "Bucket {shipment_type}: {} line(s), subtotal {subtotal}, final {final_amount}",
        lines.len()
    );

    BucketBreakdown {
        shipment_type,
        lines,
        total_weight_kg,
        total_cbm,
        subtotal,
        base_price,
        approximate,
        pending_manual_quotation,
        final_amount,
    }
}

pub fn compute_base_price(price_by_weight: f64, price_by_cbm: f64) -> BasePrice {
    BasePrice {
        price_by_weight,
        price_by_cbm,
        final_amount: price_by_weight.max(price_by_cbm),
    }
}
