use serde::{Deserialize, Serialize};
use typeshare::typeshare;

use crate::models::tariff::{Direction, PricingMethodKind, ShipmentType};

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricingResult {
    pub currency: String,
    pub tariff_version: String,
    pub direction: Direction,
    pub base_price: Option<BasePrice>,
    pub parcel: Option<BucketBreakdown>,
    pub electronics: Option<BucketBreakdown>,
    pub large_items: Option<BucketBreakdown>,
    pub business_lcl: Option<BucketBreakdown>,
    pub packaging: PackagingTotals,
    pub insurance: InsuranceTotals,
    pub approximate: bool,
    pub pending_manual_quotation: Vec<String>,
    pub notes: Vec<String>,
    pub grand_total: f64,
}

impl PricingResult {
    pub fn buckets(&self) -> impl Iterator<Item = &BucketBreakdown> {
        [
            &self.parcel,
            &self.electronics,
            &self.large_items,
            &self.business_lcl,
        ]
        .into_iter()
        .flatten()
    }

    pub fn bucket(&self, shipment_type: ShipmentType) -> Option<&BucketBreakdown> {
        self.buckets().find(|b| b.shipment_type == shipment_type)
    }
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BasePrice {
    pub price_by_weight: f64,
    pub price_by_cbm: f64,
    #[serde(rename = "final")]
    pub final_amount: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BucketBreakdown {
    pub shipment_type: ShipmentType,
    pub lines: Vec<PricedLine>,
    pub total_weight_kg: f64,
    pub total_cbm: f64,
    pub subtotal: f64,
    pub base_price: Option<BasePrice>,
    pub approximate: bool,
    pub pending_manual_quotation: bool,
    #[serde(rename = "final")]
    pub final_amount: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LineStatus {
    Priced,
    Approximate,
    PendingManualQuotation,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PricedLine {
    pub parcel_id: String,
    pub category: String,
    pub shipment_type: ShipmentType,
    pub method: PricingMethodKind,
    pub customs_code: Option<String>,
    pub quantity: u32,
    pub repeat_count: u32,
    pub unit_cbm: Option<f64>,
    pub line_cbm: Option<f64>,
    pub line_weight_kg: Option<f64>,
    pub billable_weight_kg: Option<f64>,
    pub billable_cbm: Option<f64>,
    pub rate: Option<f64>,
    pub price: Option<f64>,
    pub status: LineStatus,
    pub declared_value: Option<f64>,
    pub has_invoice: Option<bool>,
    pub item_type: Option<String>,
    pub disclaimer: Option<String>,
}

impl PricedLine {
    pub fn amount(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PackagingCharge {
    pub key: String,
    pub unit_price: f64,
    pub applications: u32,
    pub amount: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct PackagingTotals {
    pub initial: Option<PackagingCharge>,
    #[serde(rename = "final")]
    pub final_packaging: Option<PackagingCharge>,
    pub total: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct OptionalInsurance {
    pub declared_value: f64,
    pub rate: f64,
    pub premium: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct MandatoryInsurance {
    pub parcel_id: String,
    pub declared_value: f64,
    pub rate: f64,
    pub premium: f64,
}

#[typeshare]
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct InsuranceTotals {
    pub optional: Option<OptionalInsurance>,
    pub mandatory: Vec<MandatoryInsurance>,
    pub mandatory_total: f64,
    pub total: f64,
}
