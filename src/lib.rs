pub mod config;
pub mod handlers;
pub mod models;
pub mod pricing;
pub mod utils;

pub use config::{Settings, SettingsError};
pub use handlers::quote::{QuoteRequestError, QuoteResponse, handle_quote_request};
pub use models::{pricing_result::PricingResult, shipment::ShipmentDescription};
pub use pricing::{
    QuoteEngine,
    error::{InputError, QuoteError},
};
