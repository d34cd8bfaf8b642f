use core::str::FromStr;

use serde::{Deserialize, Serialize};

use stockroom_core::StockError;

use crate::active::ActiveComponent;
use crate::item::GenericItem;
use crate::passive::PassiveComponent;

/// Record tables a restock scan can cover.
///
/// `Active` and `Assembly` share the active-component table and are told
/// apart by the record's assembly flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockTable {
    Generic,
    Passive,
    Active,
    Assembly,
}

impl StockTable {
    pub const ALL: [StockTable; 4] = [
        StockTable::Generic,
        StockTable::Passive,
        StockTable::Active,
        StockTable::Assembly,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StockTable::Generic => "generic",
            StockTable::Passive => "passive",
            StockTable::Active => "active",
            StockTable::Assembly => "assembly",
        }
    }
}

impl FromStr for StockTable {
    type Err = StockError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "generic" | "item" | "items" => Ok(StockTable::Generic),
            "passive" => Ok(StockTable::Passive),
            "active" => Ok(StockTable::Active),
            "assembly" => Ok(StockTable::Assembly),
            other => Err(StockError::invalid(format!("unknown stock table: {other:?}"))),
        }
    }
}

/// Any stocked record, tagged with the table it came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "table", rename_all = "lowercase")]
pub enum StockRecord {
    Generic(GenericItem),
    Passive(PassiveComponent),
    Active(ActiveComponent),
    Assembly(ActiveComponent),
}

impl StockRecord {
    pub fn table(&self) -> StockTable {
        match self {
            StockRecord::Generic(_) => StockTable::Generic,
            StockRecord::Passive(_) => StockTable::Passive,
            StockRecord::Active(_) => StockTable::Active,
            StockRecord::Assembly(_) => StockTable::Assembly,
        }
    }

    pub fn count(&self) -> i64 {
        match self {
            StockRecord::Generic(r) => r.count,
            StockRecord::Passive(r) => r.count,
            StockRecord::Active(r) | StockRecord::Assembly(r) => r.count,
        }
    }
}

impl From<ActiveComponent> for StockRecord {
    fn from(value: ActiveComponent) -> Self {
        if value.is_assembly {
            StockRecord::Assembly(value)
        } else {
            StockRecord::Active(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_parse_case_insensitively() {
        assert_eq!("Passive".parse::<StockTable>().unwrap(), StockTable::Passive);
        assert_eq!(" assembly ".parse::<StockTable>().unwrap(), StockTable::Assembly);
        assert!("bogus".parse::<StockTable>().is_err());
        for table in StockTable::ALL {
            assert_eq!(table.as_str().parse::<StockTable>().unwrap(), table);
        }
    }
}
