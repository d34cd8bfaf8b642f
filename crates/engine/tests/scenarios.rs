//! Black-box scenarios against the engine facade over the in-memory store.

use std::sync::Arc;
use std::thread;

use proptest::prelude::*;

use stockroom_core::{ItemId, StockError};
use stockroom_engine::{ActiveQuery, Resolution, StockEngine, ValueWindowQuery};
use stockroom_infra::EngineConfig;
use stockroom_inventory::{
    ActiveLookup, Location, NewActiveComponent, NewGenericItem, NewPassiveComponent, SiPrefix, StockRecord,
    StockTable,
};

fn engine() -> StockEngine<stockroom_infra::InMemoryInventoryStore> {
    stockroom_observability::init();
    StockEngine::in_memory(EngineConfig::default())
}

fn bolt(count: i64, threshold: i64) -> NewGenericItem {
    NewGenericItem {
        name: "Hex Bolt".to_string(),
        size: "M3x12".to_string(),
        is_metric: true,
        location: Location::from_parts(["B", "2", "7", "1", "", ""]),
        count,
        threshold,
    }
}

fn passive(subtype: &str, value: f64) -> NewPassiveComponent {
    NewPassiveComponent {
        subtype: subtype.to_string(),
        value,
        tolerance: Some(1.0),
        mounting_method: "THT".to_string(),
        part_number: None,
        location: String::new(),
        rack: 3,
        slot: format!("{value}"),
        count: 25,
        max_power: 0.25,
        max_voltage: 200.0,
        max_current: 0.0,
        hold_current: None,
        polarity: None,
        seller: "Digikey".to_string(),
        dielectric_material: String::new(),
        link: String::new(),
    }
}

fn active(part_id: &str, name: &str) -> NewActiveComponent {
    NewActiveComponent {
        part_id: part_id.to_string(),
        name: name.to_string(),
        description: String::new(),
        link: String::new(),
        location: String::new(),
        rack: 1,
        slot: "C2".to_string(),
        count: 6,
        is_assembly: false,
        subtype: "IC".to_string(),
    }
}

#[test]
fn scenario_a_low_stock_fires_once_per_dip() {
    let engine = engine();
    let id = engine.add_generic_item(bolt(10, 5)).unwrap();

    let s = engine.decrement_item(id, 7).unwrap();
    assert_eq!((s.count, s.notify), (3, true));

    let s = engine.decrement_item(id, 1).unwrap();
    assert_eq!((s.count, s.notify), (2, false));

    let t = engine.increment_item(id, 10).unwrap();
    assert_eq!(t.count, 12);
    assert!(!engine.get_generic_item(id).unwrap().is_contacted);

    let s = engine.decrement_item(id, 8).unwrap();
    assert_eq!((s.count, s.notify), (4, true));
}

#[test]
fn scenario_b_resistor_multipliers() {
    let engine = engine();
    for value in [100.0, 4700.0, 1_000_000.0] {
        engine.add_passive_component(passive("Resistor", value)).unwrap();
    }

    let set = engine.derive_multipliers("Resistor").unwrap().unwrap();
    for expected in [SiPrefix::Unit, SiPrefix::Kilo, SiPrefix::Mega] {
        assert!(set.prefixes.contains(&expected), "{:?}", set.prefixes);
    }

    let values = engine.multiplier_values().unwrap();
    let labels: Vec<&str> = values["Resistor"].iter().map(|v| v.label.as_str()).collect();
    assert_eq!(labels, vec!["Ohm", "kOhm", "MOhm"]);
}

#[test]
fn scenario_c_value_window() {
    let engine = engine();
    for value in [950.0, 1000.0, 1100.0, 2000.0] {
        engine.add_passive_component(passive("Resistor", value)).unwrap();
    }

    let window = engine
        .search_by_value_window(&ValueWindowQuery::new(1000.0).with_window_percent(10.0))
        .unwrap();
    let values: Vec<f64> = window.items.iter().map(|c| c.value).collect();
    assert_eq!(values, vec![1100.0, 1000.0, 950.0]);
    assert_eq!(window.length, 3);
    let closest = window.closest_index.unwrap();
    assert_eq!(window.items[closest].value, 1000.0);
}

#[test]
fn idempotent_delete_leaves_store_unchanged() {
    let engine = engine();
    let id = engine.add_generic_item(bolt(10, 5)).unwrap();
    let before = engine.list_generic_items().unwrap();

    assert!(!engine.remove_generic_item(ItemId::new(404)).unwrap());
    assert_eq!(engine.list_generic_items().unwrap(), before);

    assert!(engine.remove_generic_item(id).unwrap());
    assert!(!engine.remove_generic_item(id).unwrap());
    assert_eq!(engine.get_generic_item(id), Err(StockError::NotFound));
}

#[test]
fn exact_match_wins_over_approximate() {
    let engine = engine();
    let exact = engine.add_generic_item(bolt(10, 5)).unwrap();
    let mut lookalike = bolt(10, 5);
    lookalike.size = "M3x12 long".to_string();
    engine.add_generic_item(lookalike).unwrap();

    assert_eq!(engine.resolve("hex bolt", true, "m3x12").unwrap(), Resolution::Exact(exact));
    match engine.resolve("hex bolts", true, "m3x12").unwrap() {
        Resolution::Suggestions(items) => assert!(!items.is_empty()),
        other => panic!("expected suggestions, got {other:?}"),
    }
}

#[test]
fn electrical_defaults_and_active_lookups() {
    let engine = StockEngine::in_memory(EngineConfig::default().with_default_location("LAB"));
    let id = engine.add_active_component(active("NE555P", "Precision Timer")).unwrap();
    assert_eq!(engine.get_active_component(id).unwrap().location, "LAB");

    assert_eq!(engine.resolve_active(&ActiveLookup::by_part_id("NE555P")).unwrap(), id);
    let hits = engine
        .search_by_text_similarity(&ActiveQuery::new(ActiveLookup::by_name("timer")))
        .unwrap();
    assert_eq!(hits[0].id, id);
}

#[test]
fn restock_report_uses_configured_threshold() {
    let engine = StockEngine::in_memory(EngineConfig::default().with_restock_threshold(6));
    engine.add_generic_item(bolt(10, 5)).unwrap();
    engine.add_active_component(active("NE555P", "Precision Timer")).unwrap();
    engine.add_passive_component(passive("Capacitor", 1e-6)).unwrap();

    let report = engine.restock_report().unwrap();
    assert_eq!(report.len(), 1);
    assert!(matches!(&report[0], StockRecord::Active(c) if c.part_id == "NE555P"));

    let passives = engine
        .search_below_threshold(&[StockTable::Passive], &["capacitor".to_string()], 25)
        .unwrap();
    assert_eq!(passives.len(), 1);
}

#[test]
fn records_serialize_with_wire_field_names() {
    let engine = engine();
    let id = engine.add_active_component(active("NE555P", "Precision Timer")).unwrap();
    let json = serde_json::to_value(engine.get_active_component(id).unwrap()).unwrap();
    assert_eq!(json["type"], "IC");
    assert_eq!(json["part_id"], "NE555P");
}

#[test]
fn concurrent_decrements_fire_exactly_once() {
    let engine = Arc::new(engine());
    let id = engine.add_generic_item(bolt(200, 100)).unwrap();

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..20)
                    .map(|_| engine.decrement_item(id, 1).unwrap())
                    .filter(|s| s.notify)
                    .count()
            })
        })
        .collect();

    let fired: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
    assert_eq!(fired, 1);
    assert_eq!(engine.get_generic_item(id).unwrap().count, 40);
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, ..ProptestConfig::default() })]

    #[test]
    fn prop_passive_merge_sums_counts(counts in prop::collection::vec(0i64..500, 1..10)) {
        let engine = StockEngine::in_memory(EngineConfig::default());
        let mut ids = Vec::new();
        for &count in &counts {
            let mut new = passive("Resistor", 4700.0);
            new.count = count;
            ids.push(engine.add_passive_component(new).unwrap());
        }
        prop_assert!(ids.iter().all(|id| *id == ids[0]));
        let stored = engine.list_passive_components().unwrap();
        prop_assert_eq!(stored.len(), 1);
        prop_assert_eq!(stored[0].count, counts.iter().sum::<i64>());
        prop_assert_eq!(&stored[0].location, "EL");
    }

    #[test]
    fn prop_decrement_never_goes_negative(start in 0i64..100, amounts in prop::collection::vec(1i64..60, 1..10)) {
        let engine = StockEngine::in_memory(EngineConfig::default());
        let id = engine.add_generic_item(bolt(start, 10)).unwrap();
        let mut expected = start;
        for amount in amounts {
            expected = (expected - amount).max(0);
            let signal = engine.decrement_item(id, amount).unwrap();
            prop_assert_eq!(signal.count, expected);
        }
    }
}
