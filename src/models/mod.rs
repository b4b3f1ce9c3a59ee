pub mod pricing_result;
pub mod shipment;
pub mod tariff;
