use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use super::filter::PayloadRange;

/// Column holding the launch site name.
pub const SITE_COLUMN: &str = "Launch Site";
/// Column holding the payload mass in kilograms.
pub const PAYLOAD_COLUMN: &str = "Payload Mass (kg)";
/// Column holding the binary outcome class.
pub const CLASS_COLUMN: &str = "class";

// ---------------------------------------------------------------------------
// MetadataValue – a single cell of a column the dashboard does not chart
// ---------------------------------------------------------------------------

/// A dynamically-typed cell mirroring common Pandas dtypes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum MetadataValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for MetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetadataValue::String(s) => write!(f, "{s}"),
            MetadataValue::Integer(i) => write!(f, "{i}"),
            MetadataValue::Float(v) => write!(f, "{v}"),
            MetadataValue::Bool(b) => write!(f, "{b}"),
            MetadataValue::Null => write!(f, "<null>"),
        }
    }
}

impl MetadataValue {
    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            MetadataValue::Float(v) => Some(*v),
            MetadataValue::Integer(i) => Some(*i as f64),
            MetadataValue::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Outcome – the binary class column
// ---------------------------------------------------------------------------

/// Launch outcome class: `1` is a success, `0` a failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(into = "u8")]
pub enum Outcome {
    Failure,
    Success,
}

impl Outcome {
    pub fn class(self) -> u8 {
        match self {
            Outcome::Failure => 0,
            Outcome::Success => 1,
        }
    }

    pub fn from_class(class: i64) -> Option<Self> {
        match class {
            0 => Some(Outcome::Failure),
            1 => Some(Outcome::Success),
            _ => None,
        }
    }

    /// Interpret a loaded cell; `1`, `1.0` and `"1"` are all accepted.
    pub fn from_value(value: &MetadataValue) -> Option<Self> {
        match value {
            MetadataValue::Integer(i) => Self::from_class(*i),
            MetadataValue::Bool(b) => Some(if *b { Outcome::Success } else { Outcome::Failure }),
            other => {
                let v = other.as_f64()?;
                if v == 0.0 {
                    Some(Outcome::Failure)
                } else if v == 1.0 {
                    Some(Outcome::Success)
                } else {
                    None
                }
            }
        }
    }

    pub fn describe(self) -> &'static str {
        match self {
            Outcome::Failure => "Failure",
            Outcome::Success => "Success",
        }
    }
}

impl From<Outcome> for u8 {
    fn from(outcome: Outcome) -> u8 {
        outcome.class()
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.class())
    }
}

// ---------------------------------------------------------------------------
// Validation errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, PartialEq)]
pub enum DataError {
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}: launch site is empty")]
    EmptySite { row: usize },
    #[error("row {row}: payload mass '{value}' is not a finite number")]
    InvalidPayload { row: usize, value: String },
    #[error("row {row}: payload mass {value} is negative")]
    NegativePayload { row: usize, value: f64 },
    #[error("row {row}: outcome class must be 0 or 1, got '{value}'")]
    InvalidOutcome { row: usize, value: String },
    #[error("dataset contains no launch records")]
    Empty,
}

// ---------------------------------------------------------------------------
// LaunchRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single launch attempt.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaunchRecord {
    pub site: String,
    pub payload_mass_kg: f64,
    pub outcome: Outcome,
    /// Remaining columns, kept for the row table.
    pub extra: BTreeMap<String, MetadataValue>,
}

impl LaunchRecord {
    #[cfg(test)]
    pub fn new(site: impl Into<String>, payload_mass_kg: f64, outcome: Outcome) -> Self {
        Self {
            site: site.into(),
            payload_mass_kg,
            outcome,
            extra: BTreeMap::new(),
        }
    }

    fn from_row(row: usize, mut cells: BTreeMap<String, MetadataValue>) -> Result<Self, DataError> {
        let site = match cells.remove(SITE_COLUMN) {
            Some(MetadataValue::Null) | None => return Err(DataError::EmptySite { row }),
            Some(v) => checked_site(row, &v.to_string())?,
        };

        let payload = cells.remove(PAYLOAD_COLUMN).unwrap_or(MetadataValue::Null);
        let payload_mass_kg = checked_payload(row, payload.as_f64(), &payload)?;

        let class = cells.remove(CLASS_COLUMN).unwrap_or(MetadataValue::Null);
        let outcome = Outcome::from_value(&class).ok_or_else(|| DataError::InvalidOutcome {
            row,
            value: class.to_string(),
        })?;

        Ok(Self {
            site,
            payload_mass_kg,
            outcome,
            extra: cells,
        })
    }
}

/// Trimmed site name; blank is an error.
fn checked_site(row: usize, raw: &str) -> Result<String, DataError> {
    let site = raw.trim();
    if site.is_empty() {
        return Err(DataError::EmptySite { row });
    }
    Ok(site.to_string())
}

/// Payload must be a finite, non-negative number.
fn checked_payload(
    row: usize,
    value: Option<f64>,
    raw: &dyn fmt::Display,
) -> Result<f64, DataError> {
    let kg = value
        .filter(|v| v.is_finite())
        .ok_or_else(|| DataError::InvalidPayload {
            row,
            value: raw.to_string(),
        })?;
    if kg < 0.0 {
        return Err(DataError::NegativePayload { row, value: kg });
    }
    Ok(kg)
}

// ---------------------------------------------------------------------------
// LaunchTable – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full, read-only launch table with pre-computed site list and bounds.
#[derive(Debug, Clone)]
pub struct LaunchTable {
    records: Vec<LaunchRecord>,
    columns: Vec<String>,
    sites: Vec<String>,
    payload_bounds: PayloadRange,
}

impl LaunchTable {
    /// Validate raw rows (column name → cell) and build the table.
    pub fn from_rows(
        columns: Vec<String>,
        rows: Vec<BTreeMap<String, MetadataValue>>,
    ) -> Result<Self, DataError> {
        for required in [SITE_COLUMN, PAYLOAD_COLUMN, CLASS_COLUMN] {
            if !columns.iter().any(|c| c == required) {
                return Err(DataError::MissingColumn(required));
            }
        }
        let records = rows
            .into_iter()
            .enumerate()
            .map(|(i, cells)| LaunchRecord::from_row(i, cells))
            .collect::<Result<Vec<_>, _>>()?;
        Self::build(columns, records)
    }

    /// Build a table from already-typed records, with the same per-row checks
    /// as [`LaunchTable::from_rows`].
    #[cfg(test)]
    pub fn from_records(mut records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        for (row, rec) in records.iter_mut().enumerate() {
            rec.site = checked_site(row, &rec.site)?;
            rec.payload_mass_kg =
                checked_payload(row, Some(rec.payload_mass_kg), &rec.payload_mass_kg)?;
        }
        let columns = vec![
            SITE_COLUMN.to_string(),
            CLASS_COLUMN.to_string(),
            PAYLOAD_COLUMN.to_string(),
        ];
        Self::build(columns, records)
    }

    fn build(columns: Vec<String>, records: Vec<LaunchRecord>) -> Result<Self, DataError> {
        if records.is_empty() {
            return Err(DataError::Empty);
        }

        // Distinct sites in order of first appearance.
        let mut sites: Vec<String> = Vec::new();
        for rec in &records {
            if !sites.contains(&rec.site) {
                sites.push(rec.site.clone());
            }
        }

        let (min, max) = records.iter().fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), r| {
            (lo.min(r.payload_mass_kg), hi.max(r.payload_mass_kg))
        });

        Ok(LaunchTable {
            records,
            columns,
            sites,
            payload_bounds: PayloadRange::new(min, max),
        })
    }

    /// Number of launches.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> &[LaunchRecord] {
        &self.records
    }

    pub fn record(&self, index: usize) -> Option<&LaunchRecord> {
        self.records.get(index)
    }

    /// Source column names in file order.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Distinct launch sites in first-appearance order.
    pub fn sites(&self) -> &[String] {
        &self.sites
    }

    /// Observed minimum and maximum payload mass.
    pub fn payload_bounds(&self) -> PayloadRange {
        self.payload_bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(site: &str, payload: MetadataValue, class: MetadataValue) -> BTreeMap<String, MetadataValue> {
        let mut cells = BTreeMap::new();
        cells.insert(SITE_COLUMN.to_string(), MetadataValue::String(site.to_string()));
        cells.insert(PAYLOAD_COLUMN.to_string(), payload);
        cells.insert(CLASS_COLUMN.to_string(), class);
        cells.insert("Booster Version".to_string(), MetadataValue::String("F9 v1.0".into()));
        cells
    }

    fn columns() -> Vec<String> {
        vec![
            SITE_COLUMN.to_string(),
            CLASS_COLUMN.to_string(),
            PAYLOAD_COLUMN.to_string(),
            "Booster Version".to_string(),
        ]
    }

    #[test]
    fn test_from_rows_builds_sites_and_bounds() {
        let rows = vec![
            row("CCAFS LC-40", MetadataValue::Float(500.0), MetadataValue::Integer(1)),
            row("VAFB SLC-4E", MetadataValue::Integer(9600), MetadataValue::Integer(0)),
            row("CCAFS LC-40", MetadataValue::Float(0.0), MetadataValue::Float(1.0)),
        ];
        let table = LaunchTable::from_rows(columns(), rows).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.sites(), ["CCAFS LC-40", "VAFB SLC-4E"]);
        assert_eq!(table.payload_bounds(), PayloadRange::new(0.0, 9600.0));
        assert_eq!(table.records()[2].outcome, Outcome::Success);
        assert_eq!(
            table.records()[0].extra.get("Booster Version"),
            Some(&MetadataValue::String("F9 v1.0".into()))
        );
        assert!(!table.records()[0].extra.contains_key(SITE_COLUMN));
    }

    #[test]
    fn test_missing_column_rejected() {
        let err = LaunchTable::from_rows(vec![SITE_COLUMN.to_string()], Vec::new()).unwrap_err();
        assert_eq!(err, DataError::MissingColumn(PAYLOAD_COLUMN));
    }

    #[test]
    fn test_negative_payload_rejected() {
        let rows = vec![row("A", MetadataValue::Float(-1.0), MetadataValue::Integer(1))];
        let err = LaunchTable::from_rows(columns(), rows).unwrap_err();
        assert_eq!(err, DataError::NegativePayload { row: 0, value: -1.0 });
    }

    #[test]
    fn test_missing_payload_rejected() {
        let rows = vec![
            row("A", MetadataValue::Float(10.0), MetadataValue::Integer(1)),
            row("A", MetadataValue::Null, MetadataValue::Integer(1)),
        ];
        let err = LaunchTable::from_rows(columns(), rows).unwrap_err();
        assert!(matches!(err, DataError::InvalidPayload { row: 1, .. }));
    }

    #[test]
    fn test_bad_class_rejected() {
        let rows = vec![row("A", MetadataValue::Float(10.0), MetadataValue::Integer(2))];
        let err = LaunchTable::from_rows(columns(), rows).unwrap_err();
        assert_eq!(
            err,
            DataError::InvalidOutcome {
                row: 0,
                value: "2".into()
            }
        );
    }

    #[test]
    fn test_empty_site_rejected() {
        let rows = vec![row("  ", MetadataValue::Float(10.0), MetadataValue::Integer(0))];
        let err = LaunchTable::from_rows(columns(), rows).unwrap_err();
        assert_eq!(err, DataError::EmptySite { row: 0 });
    }

    #[test]
    fn test_empty_table_rejected() {
        assert_eq!(LaunchTable::from_records(Vec::new()).unwrap_err(), DataError::Empty);
    }

    #[test]
    fn test_from_records_applies_row_checks() {
        let err = LaunchTable::from_records(vec![
            LaunchRecord::new("A", 10.0, Outcome::Success),
            LaunchRecord::new("A", -5.0, Outcome::Failure),
        ])
        .unwrap_err();
        assert_eq!(err, DataError::NegativePayload { row: 1, value: -5.0 });

        let err = LaunchTable::from_records(vec![LaunchRecord::new("A", f64::NAN, Outcome::Success)])
            .unwrap_err();
        assert!(matches!(err, DataError::InvalidPayload { row: 0, .. }));

        let err = LaunchTable::from_records(vec![LaunchRecord::new(" ", 1.0, Outcome::Success)])
            .unwrap_err();
        assert_eq!(err, DataError::EmptySite { row: 0 });

        let table =
            LaunchTable::from_records(vec![LaunchRecord::new(" siteA ", 1.0, Outcome::Success)])
                .unwrap();
        assert_eq!(table.sites(), ["siteA"]);
    }

    #[test]
    fn test_outcome_from_value() {
        assert_eq!(Outcome::from_value(&MetadataValue::String("1".into())), Some(Outcome::Success));
        assert_eq!(Outcome::from_value(&MetadataValue::Float(0.0)), Some(Outcome::Failure));
        assert_eq!(Outcome::from_value(&MetadataValue::Float(0.5)), None);
        assert_eq!(Outcome::from_value(&MetadataValue::Null), None);
        assert_eq!(Outcome::Success.to_string(), "1");
    }
}
