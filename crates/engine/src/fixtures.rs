//! Record builders shared by the unit tests.

use stockroom_inventory::{Location, NewActiveComponent, NewGenericItem, NewPassiveComponent};

pub fn item(name: &str, size: &str, count: i64, threshold: i64) -> NewGenericItem {
    NewGenericItem {
        name: name.to_string(),
        size: size.to_string(),
        is_metric: true,
        location: Location::from_parts(["A", "1", "3", "", "", ""]),
        count,
        threshold,
    }
}

pub fn passive(subtype: &str, value: f64, count: i64) -> NewPassiveComponent {
    NewPassiveComponent {
        subtype: subtype.to_string(),
        value,
        tolerance: Some(5.0),
        mounting_method: "SMD".to_string(),
        part_number: None,
        location: "EL".to_string(),
        rack: 1,
        slot: "A1".to_string(),
        count,
        max_power: 0.25,
        max_voltage: 50.0,
        max_current: 0.0,
        hold_current: None,
        polarity: None,
        seller: String::new(),
        dielectric_material: String::new(),
        link: String::new(),
    }
}

pub fn active(part_id: &str, name: &str, count: i64) -> NewActiveComponent {
    NewActiveComponent {
        part_id: part_id.to_string(),
        name: name.to_string(),
        description: String::new(),
        link: String::new(),
        location: "EL".to_string(),
        rack: 2,
        slot: "B4".to_string(),
        count,
        is_assembly: false,
        subtype: "IC".to_string(),
    }
}
