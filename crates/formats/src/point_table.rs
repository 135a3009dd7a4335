/// Row-based point tables: one CSV file per category, one record per row.
///
/// Every column is carried through as a label pair; the numeric columns and
/// the category's name column are additionally validated here so a bad table
/// fails as a whole instead of rendering half a layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PointCategory {
    Cities,
    Battles,
}

impl PointCategory {
    /// Category-specific label columns a table must carry.
    pub fn required_label_columns(self) -> &'static [&'static str] {
        match self {
            PointCategory::Cities => &["City"],
            PointCategory::Battles => &["Battle", "War", "Winner"],
        }
    }

    /// The column naming the feature, required to be non-empty per row.
    fn name_column(self) -> &'static str {
        match self {
            PointCategory::Cities => "City",
            PointCategory::Battles => "Battle",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub year: i32,
    pub labels: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PointTable {
    pub category: PointCategory,
    pub records: Vec<PointRecord>,
}

#[derive(Debug)]
pub enum TableError {
    Read(csv::Error),
    MissingColumn { column: &'static str },
    MissingValue { row: usize, column: &'static str },
    InvalidNumber { row: usize, column: &'static str, value: String },
}

impl std::fmt::Display for TableError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TableError::Read(e) => write!(f, "table read error: {e}"),
            TableError::MissingColumn { column } => {
                write!(f, "table is missing the {column} column")
            }
            TableError::MissingValue { row, column } => {
                write!(f, "row {row} has no {column} value")
            }
            TableError::InvalidNumber { row, column, value } => {
                write!(f, "row {row} has invalid {column}: {value:?}")
            }
        }
    }
}

impl std::error::Error for TableError {}

pub fn parse_point_table(payload: &str, category: PointCategory) -> Result<PointTable, TableError> {
    let mut reader = csv::Reader::from_reader(payload.as_bytes());
    let headers = reader.headers().map_err(TableError::Read)?.clone();

    let column_index = |column: &'static str| -> Result<usize, TableError> {
        headers
            .iter()
            .position(|h| h == column)
            .ok_or(TableError::MissingColumn { column })
    };

    let lon_idx = column_index("Longitude")?;
    let lat_idx = column_index("Latitude")?;
    let year_idx = column_index("Year")?;
    for column in category.required_label_columns() {
        column_index(column)?;
    }
    let name_idx = column_index(category.name_column())?;

    let mut records = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.map_err(TableError::Read)?;

        let number = |idx: usize, column: &'static str| -> Result<f64, TableError> {
            let raw = record.get(idx).unwrap_or("").trim();
            raw.parse::<f64>().map_err(|_| TableError::InvalidNumber {
                row,
                column,
                value: raw.to_string(),
            })
        };

        let longitude = number(lon_idx, "Longitude")?;
        let latitude = number(lat_idx, "Latitude")?;
        let year_raw = record.get(year_idx).unwrap_or("").trim();
        let year = year_raw
            .parse::<i32>()
            .map_err(|_| TableError::InvalidNumber {
                row,
                column: "Year",
                value: year_raw.to_string(),
            })?;

        if record.get(name_idx).unwrap_or("").trim().is_empty() {
            return Err(TableError::MissingValue {
                row,
                column: category.name_column(),
            });
        }

        let labels = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.to_string(), v.to_string()))
            .collect();

        records.push(PointRecord {
            longitude,
            latitude,
            year,
            labels,
        });
    }

    Ok(PointTable { category, records })
}
