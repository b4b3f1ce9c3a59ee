use std::{sync::Arc, thread};

use lcl_quote::{
    InputError, QuoteEngine, QuoteError, Settings, ShipmentDescription,
    models::{
        pricing_result::LineStatus,
        shipment::{InsuranceSelection, PackagingSelection, Parcel, ParcelDimensions},
        tariff::{Direction, PricingMethod, ProductCategory, ShipmentType},
    },
    utils::unit::{LengthUnit, MassUnit},
};

fn engine() -> QuoteEngine {
    let mut settings = Settings::default();
    settings.tariff.categories.push(ProductCategory {
        key: "scenario_a".into(),
        shipment_type: ShipmentType::ParcelLcl,
        method: PricingMethod::PerKg {
            price_per_kg: 3.0,
            minimum_weight: 20.0,
        },
        customs_code: None,
    });
    QuoteEngine::new(&settings).expect("default settings are valid")
}

fn parcel(id: &str, category: &str, weight: f64, quantity: i64) -> Parcel {
    Parcel {
        id: id.into(),
        category: category.into(),
        dimensions: Some(ParcelDimensions {
            length: 40.0,
            width: 30.0,
            height: 20.0,
        }),
        dimension_unit: LengthUnit::Cm,
        weight: Some(weight),
        weight_unit: MassUnit::Kg,
        quantity,
        repeat_count: 1,
        declared_value: None,
        has_invoice: None,
        item_type: None,
        unknown_dimensions: false,
    }
}

fn shipment(types: &[ShipmentType], parcels: Vec<Parcel>) -> ShipmentDescription {
    ShipmentDescription {
        direction: Direction::EuToSyria,
        shipment_types: types.to_vec(),
        parcels,
        insurance: InsuranceSelection::default(),
        packaging: PackagingSelection::default(),
    }
}

fn phone(id: &str, quantity: i64, declared_value: f64) -> Parcel {
    let mut p = parcel(id, "mobile_phone", 0.5, quantity);
    p.declared_value = Some(declared_value);
    p.has_invoice = Some(true);
    p
}

#[test]
fn minimum_weight_floor_scenario() {
    let result = engine()
        .quote(&shipment(
            &[ShipmentType::ParcelLcl],
            vec![parcel("a", "scenario_a", 5.0, 1)],
        ))
        .unwrap();

    let parcel = result.parcel.as_ref().expect("parcel bucket present");
    assert_eq!(parcel.lines[0].billable_weight_kg, Some(20.0));
    assert_eq!(parcel.lines[0].price, Some(60.0));
    // 0.024 cbm at 250 per cbm is far below the weight price
    assert_eq!(result.base_price.as_ref().unwrap().final_amount, 60.0);
    assert_eq!(result.grand_total, 60.0);
}

#[test]
fn per_piece_scenario() {
    let result = engine()
        .quote(&shipment(
            &[ShipmentType::Electronics],
            vec![phone("e", 2, 500.0)],
        ))
        .unwrap();

    let electronics = result.electronics.as_ref().unwrap();
    assert_eq!(electronics.lines[0].price, Some(160.0));
    assert_eq!(electronics.final_amount, 160.0);
    assert!(result.parcel.is_none());
    assert!(result.base_price.is_none());
}

#[test]
fn electronics_carry_mandatory_insurance() {
    let result = engine()
        .quote(&shipment(
            &[ShipmentType::Electronics],
            vec![phone("e", 1, 1000.0)],
        ))
        .unwrap();

    assert!(result.insurance.optional.is_none());
    assert_eq!(result.insurance.mandatory.len(), 1);
    assert_eq!(result.insurance.mandatory[0].premium, 15.0);
    assert_eq!(result.grand_total, 80.0 + 15.0);
}

#[test]
fn unknown_dimensions_give_an_approximate_amount() {
    let mut sofa = parcel("l", "furniture", 1.0, 1);
    sofa.dimensions = None;
    sofa.weight = None;
    sofa.unknown_dimensions = true;
    sofa.item_type = Some("sofa".into());

    let result = engine()
        .quote(&shipment(&[ShipmentType::LargeItems], vec![sofa]))
        .unwrap();

    let large = result.large_items.as_ref().unwrap();
    assert!(large.approximate);
    assert_eq!(large.lines[0].status, LineStatus::Approximate);
    assert_eq!(large.final_amount, 180.0);
    assert!(result.approximate);
    assert_eq!(result.notes.len(), 1);
}

#[test]
fn errors_are_accumulated_across_parcels() {
    let mut phone_without_value = phone("e", 1, 0.0);
    phone_without_value.declared_value = None;

    let err = engine()
        .quote(&shipment(
            &[ShipmentType::ParcelLcl, ShipmentType::Electronics],
            vec![
                parcel("ok", "clothing", 10.0, 1),
                parcel("x", "spaceship", 10.0, 1),
                parcel("bad", "clothing", 0.0, 1),
                phone_without_value,
            ],
        ))
        .unwrap_err();

    assert!(!err.is_defect());
    let codes: Vec<_> = err
        .input_errors()
        .iter()
        .map(|e| (e.code(), e.parcel_id().unwrap_or_default().to_string()))
        .collect();
    assert_eq!(
        codes,
        vec![
            ("unknown_category", "x".to_string()),
            ("invalid_dimensions", "bad".to_string()),
            ("missing_declared_value", "e".to_string()),
        ]
    );
}

#[test]
fn unknown_category_and_bad_dimensions_on_one_parcel_are_both_reported() {
    let err = engine()
        .quote(&shipment(
            &[ShipmentType::ParcelLcl],
            vec![parcel("x", "spaceship", -3.0, 1)],
        ))
        .unwrap_err();
    assert_eq!(err.input_errors().len(), 2);
}

#[test]
fn inactive_shipment_type_is_rejected() {
    let err = engine()
        .quote(&shipment(
            &[ShipmentType::ParcelLcl],
            vec![phone("e", 1, 100.0)],
        ))
        .unwrap_err();
    assert!(matches!(
        err.input_errors(),
        [InputError::Validation { parcel_id: Some(id), .. }] if id == "e"
    ));
}

#[test]
fn empty_description_is_rejected() {
    let err = engine().quote(&shipment(&[], vec![])).unwrap_err();
    assert!(matches!(err, QuoteError::Rejected(ref errors) if errors.len() == 2));
}

#[test]
fn optional_insurance_requires_declared_value() {
    let mut s = shipment(
        &[ShipmentType::ParcelLcl],
        vec![parcel("a", "clothing", 25.0, 1)],
    );
    s.insurance.enabled = true;
    assert!(engine().quote(&s).is_err());

    s.insurance.declared_shipment_value = Some(1000.0);
    let result = engine().quote(&s).unwrap();
    assert_eq!(result.insurance.optional.as_ref().unwrap().premium, 15.0);
    assert_eq!(result.grand_total, 75.0 + 15.0);
}

#[test]
fn grand_total_is_sum_of_components() {
    let mut s = shipment(
        &[
            ShipmentType::ParcelLcl,
            ShipmentType::Electronics,
            ShipmentType::BusinessLcl,
        ],
        vec![
            parcel("a", "clothing", 25.0, 1),
            parcel("b", "food", 4.0, 3),
            phone("e", 1, 640.0),
            parcel("c", "commercial_goods", 120.0, 1),
        ],
    );
    s.packaging.initial = Some("carton".into());
    s.insurance = InsuranceSelection {
        enabled: true,
        declared_shipment_value: Some(333.0),
    };

    let result = engine().quote(&s).unwrap();
    let buckets: f64 = result.buckets().map(|b| b.final_amount).sum();
    let expected = buckets + result.packaging.total + result.insurance.total;
    assert!((result.grand_total - expected).abs() < 0.005);
    assert!(result.grand_total >= 0.0);
    assert_eq!(result.packaging.total, 20.0);
    assert!(result.bucket(ShipmentType::BusinessLcl).is_some());
    assert!(result.bucket(ShipmentType::LargeItems).is_none());
    // 120 kg of commercial goods at 2.5 per kg
    assert_eq!(result.business_lcl.as_ref().unwrap().final_amount, 300.0);
}

#[test]
fn agreement_lines_are_flagged_not_billed() {
    let result = engine()
        .quote(&shipment(
            &[ShipmentType::LargeItems],
            vec![parcel("v", "vehicle_parts", 40.0, 1)],
        ))
        .unwrap();
    assert_eq!(result.pending_manual_quotation, vec!["v".to_string()]);
    assert_eq!(result.grand_total, 0.0);
    assert!(result.large_items.as_ref().unwrap().pending_manual_quotation);
}

#[test]
fn agreement_lines_with_unknown_dimensions_stay_pending() {
    let mut engine_parts = parcel("v", "vehicle_parts", 1.0, 1);
    engine_parts.dimensions = None;
    engine_parts.weight = None;
    engine_parts.unknown_dimensions = true;
    engine_parts.item_type = Some("engine".into());

    let result = engine()
        .quote(&shipment(&[ShipmentType::LargeItems], vec![engine_parts]))
        .unwrap();

    let large = result.large_items.as_ref().unwrap();
    assert_eq!(large.lines[0].status, LineStatus::PendingManualQuotation);
    assert!(!large.approximate);
    assert_eq!(result.pending_manual_quotation, vec!["v".to_string()]);
    assert_eq!(result.grand_total, 0.0);
}

#[test]
fn oversized_lines_are_rejected_as_input() {
    let err = engine()
        .quote(&shipment(
            &[ShipmentType::ParcelLcl],
            vec![
                parcel("heavy", "clothing", 1e306, 1),
                parcel("ok", "clothing", 10.0, 1),
            ],
        ))
        .unwrap_err();

    assert!(!err.is_defect());
    assert!(matches!(
        err.input_errors(),
        [InputError::InvalidDimensions { parcel_id, .. }] if parcel_id == "heavy"
    ));
}

#[test]
fn packaging_changes_leave_buckets_untouched() {
    let base = shipment(
        &[ShipmentType::ParcelLcl, ShipmentType::Electronics],
        vec![parcel("a", "clothing", 25.0, 2), phone("e", 1, 200.0)],
    );
    let mut packed = base.clone();
    packed.packaging = PackagingSelection {
        initial: Some("bubble_wrap".into()),
        final_packaging: Some("wooden_crate".into()),
    };

    let engine = engine();
    let plain = engine.quote(&base).unwrap();
    let wrapped = engine.quote(&packed).unwrap();

    assert_eq!(plain.parcel, wrapped.parcel);
    assert_eq!(plain.electronics, wrapped.electronics);
    assert_eq!(plain.base_price, wrapped.base_price);
    assert_eq!(wrapped.packaging.total, 2.0 * (8.0 + 45.0));
}

#[test]
fn quoting_is_idempotent() {
    let s = shipment(
        &[ShipmentType::ParcelLcl, ShipmentType::Electronics],
        vec![parcel("a", "household", 25.0, 2), phone("e", 3, 990.0)],
    );
    let engine = engine();
    let first = serde_json::to_string(&engine.quote(&s).unwrap()).unwrap();
    let second = serde_json::to_string(&engine.quote(&s).unwrap()).unwrap();
    assert_eq!(first, second);
}

#[test]
fn direction_selects_volume_rate() {
    let mut s = shipment(
        &[ShipmentType::ParcelLcl],
        vec![parcel("a", "household", 5.0, 10)],
    );
    let to_syria = engine().quote(&s).unwrap();
    s.direction = Direction::SyriaToEu;
    let to_eu = engine().quote(&s).unwrap();

    // 10 cartons of 0.024 cbm
    assert_eq!(to_syria.grand_total, 60.0);
    assert_eq!(to_eu.grand_total, 48.0);
}

#[test]
fn engine_is_shareable_across_threads() {
    let engine = Arc::new(engine());
    let s = shipment(
        &[ShipmentType::ParcelLcl],
        vec![parcel("a", "clothing", 30.0, 1)],
    );
    let expected = engine.quote(&s).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            let s = s.clone();
            thread::spawn(move || engine.quote(&s).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
