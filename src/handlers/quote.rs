use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::{
    models::{pricing_result::PricingResult, shipment::ShipmentDescription},
    pricing::{
        QuoteEngine,
        error::{InputError, QuoteError},
    },
};

#[derive(Debug, Error)]
pub enum QuoteRequestError {
    #[error("Failed to parse shipment description: {0}")]
    Parse(#[source] serde_json::Error),

    #[error("Failed to serialize quote response: {0}")]
    Serialize(#[source] serde_json::Error),

    #[error(transparent)]
    Engine(#[from] QuoteError),
}

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum QuoteResponse {
    Quoted { result: PricingResult },
    Rejected { errors: Vec<InputError> },
}

pub fn handle_quote_request(
    engine: &QuoteEngine,
    data: &str,
) -> Result<QuoteResponse, QuoteRequestError> {
    let shipment: ShipmentDescription =
        serde_json::from_str(data).map_err(QuoteRequestError::Parse)?;

    match engine.quote(&shipment) {
        Ok(result) => {
            info!(
                "quote request priced: {} parcel(s), grand total {}",
                shipment.parcels.len(),
                result.grand_total
            );
            Ok(QuoteResponse::Quoted { result })
        }
        Err(QuoteError::Rejected(errors)) => {
            warn!("quote request rejected with {} error(s)", errors.len());
            Ok(QuoteResponse::Rejected { errors })
        }
        Err(err) => Err(err.into()),
    }
}

pub fn render_response(
    response: &QuoteResponse,
    pretty: bool,
) -> Result<String, QuoteRequestError> {
    let rendered = if pretty {
        serde_json::to_string_pretty(response)
    } else {
        serde_json::to_string(response)
    };
    rendered.map_err(QuoteRequestError::Serialize)
}
