use std::collections::BTreeMap;

use foundation::Year;
use serde::Deserialize;

use crate::point_table::TableError;

#[derive(Debug, Clone, Deserialize)]
struct ProvinceRow {
    #[serde(rename = "Province")]
    province: String,
    #[serde(rename = "File")]
    file: String,
    #[serde(rename = "Year")]
    year: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProvinceEntry {
    pub file: String,
    pub year: Year,
}

/// Region name -> {data file, representative year}, built once at startup
/// from the province reference table and read-only thereafter.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct ProvinceIndex {
    entries: BTreeMap<String, ProvinceEntry>,
}

impl ProvinceIndex {
    pub fn parse(payload: &str) -> Result<Self, TableError> {
        let mut reader = csv::Reader::from_reader(payload.as_bytes());
        let mut entries = BTreeMap::new();
        for row in reader.deserialize() {
            let row: ProvinceRow = row.map_err(TableError::Read)?;
            entries.insert(
                row.province,
                ProvinceEntry {
                    file: row.file,
                    year: Year(row.year),
                },
            );
        }
        Ok(Self { entries })
    }

    pub fn get(&self, name: &str) -> Option<&ProvinceEntry> {
        self.entries.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(|name| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
