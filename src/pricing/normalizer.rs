use crate::{
    models::shipment::Parcel,
    pricing::error::InputError,
    utils::unit::cubic_metres,
};

#[derive(Debug, Clone, PartialEq)]
pub struct LineVolume {
    pub unit_cbm: f64,
    pub line_cbm: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedParcel {
    pub parcel_id: String,
    pub quantity: u32,
    pub repeat_count: u32,
    /// Absent only for lines declared with unknown dimensions.
    pub volume: Option<LineVolume>,
    pub unit_weight_kg: Option<f64>,
    pub line_weight_kg: Option<f64>,
}

impl NormalizedParcel {
    pub fn pieces(&self) -> f64 {
        self.quantity as f64 * self.repeat_count as f64
    }
}

fn invalid(parcel: &Parcel, reason: impl Into<String>) -> InputError {
    InputError::InvalidDimensions {
        parcel_id: parcel.id.clone(),
        reason: reason.into(),
    }
}

fn positive(parcel: &Parcel, name: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(invalid(parcel, format!("{name} must be greater than zero")))
    }
}

fn count(parcel: &Parcel, name: &str, value: i64) -> Result<u32, InputError> {
    if value < 1 {
        return Err(invalid(parcel, format!("{name} must be at least 1")));
    }
    u32::try_from(value).map_err(|_| invalid(parcel, format!("{name} is too large")))
}

fn finite(parcel: &Parcel, name: &str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(invalid(parcel, format!("{name} is out of range")))
    }
}

pub fn normalize(parcel: &Parcel) -> Result<NormalizedParcel, InputError> {
    let quantity = count(parcel, "quantity", parcel.quantity)?;
    let repeat_count = count(parcel, "repeat count", parcel.repeat_count)?;

    let pieces = quantity as f64 * repeat_count as f64;

    let volume = match (&parcel.dimensions, parcel.unknown_dimensions) {
        (_, true) => None,
        (None, false) => return Err(invalid(parcel, "dimensions are required")),
        (Some(dimensions), false) => {
            let unit = parcel.dimension_unit;
            let to_cm = |name: &str, value: f64| {
                positive(parcel, name, value).and_then(|v| {
                    unit.amount_in_centimetres(v)
                        .map_err(|e| invalid(parcel, e.to_string()))
                })
            };
            let length = to_cm("length", dimensions.length)?;
            let width = to_cm("width", dimensions.width)?;
            let height = to_cm("height", dimensions.height)?;

            let unit_cbm = finite(parcel, "volume", cubic_metres(length, width, height))?;
            Some(LineVolume {
                unit_cbm,
                line_cbm: finite(parcel, "line volume", unit_cbm * pieces)?,
            })
        }
    };

    let unit_weight_kg = match (parcel.weight, parcel.unknown_dimensions) {
        (None, true) => None,
        (None, false) => return Err(invalid(parcel, "weight is required")),
        (Some(weight), _) => {
            let weight = positive(parcel, "weight", weight)?;
            Some(
                parcel
                    .weight_unit
                    .amount_in_kilograms(weight)
                    .map_err(|e| invalid(parcel, e.to_string()))?,
            )
        }
    };

    let line_weight_kg = unit_weight_kg
        .map(|w| finite(parcel, "line weight", w * pieces))
        .transpose()?;

    Ok(NormalizedParcel {
        parcel_id: parcel.id.clone(),
        quantity,
        repeat_count,
        volume,
        unit_weight_kg,
        line_weight_kg,
    })
}
