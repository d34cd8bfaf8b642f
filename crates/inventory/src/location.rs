use serde::{Deserialize, Serialize};

use stockroom_core::ValueObject;

/// Six-part storage location of a generic item.
///
/// Each part is a free-text token; tokens are trimmed on construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub shelf: String,
    pub rack: String,
    #[serde(rename = "box")]
    pub bin: String,
    pub row: String,
    pub column: String,
    pub depth: String,
}

impl ValueObject for Location {}

impl Location {
    /// Build a location from `[shelf, rack, box, row, column, depth]`.
    pub fn from_parts<S: AsRef<str>>(parts: [S; 6]) -> Self {
        let [shelf, rack, bin, row, column, depth] = parts;
        Self {
            shelf: shelf.as_ref().trim().to_string(),
            rack: rack.as_ref().trim().to_string(),
            bin: bin.as_ref().trim().to_string(),
            row: row.as_ref().trim().to_string(),
            column: column.as_ref().trim().to_string(),
            depth: depth.as_ref().trim().to_string(),
        }
    }

    pub fn parts(&self) -> [&str; 6] {
        [
            &self.shelf,
            &self.rack,
            &self.bin,
            &self.row,
            &self.column,
            &self.depth,
        ]
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}", self.parts().join("/"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parts_are_trimmed_and_ordered() {
        let loc = Location::from_parts([" A ", "2", "b3", "1", " 4", "front"]);
        assert_eq!(loc.parts(), ["A", "2", "b3", "1", "4", "front"]);
        assert_eq!(loc.to_string(), "A/2/b3/1/4/front");
    }

    #[test]
    fn box_field_keeps_its_persisted_name() {
        let loc = Location::from_parts(["s", "r", "b", "w", "c", "d"]);
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["box"], "b");
        assert_eq!(json["column"], "c");
    }
}
