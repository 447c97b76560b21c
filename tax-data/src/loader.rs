use std::collections::BTreeMap;
use std::io::Read;
use std::path::{Path, PathBuf};

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, BracketTableError, TaxBracket};
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when loading bracket table data.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("row {0} has an empty table name")]
    EmptyTableName(usize),

    #[error("table '{table}' is invalid: {source}")]
    InvalidTable {
        table: String,
        #[source]
        source: BracketTableError,
    },

    #[error("cannot read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single row of a bracket table CSV file.
///
/// - `table`: name of the table the row belongs to (e.g. `monthly`)
/// - `upper_bound`: inclusive upper bound; empty, `inf` or `infinity` for the
///   open top bracket
/// - `rate`: rate as a fraction (e.g. `0.06` for 6%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub table: String,
    #[serde(deserialize_with = "deserialize_upper_bound")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

fn deserialize_upper_bound<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    let Some(s) = s else {
        return Ok(None);
    };

    let trimmed = s.trim();
    if trimmed.is_empty()
        || trimmed.eq_ignore_ascii_case("inf")
        || trimmed.eq_ignore_ascii_case("infinity")
    {
        return Ok(None);
    }

    trimmed
        .parse::<Decimal>()
        .map(Some)
        .map_err(serde::de::Error::custom)
}

/// Named bracket tables loaded from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BracketTables {
    tables: BTreeMap<String, BracketTable>,
}

impl BracketTables {
    pub fn get(
        &self,
        name: &str,
    ) -> Option<&BracketTable> {
        self.tables.get(name)
    }

    /// Table names in alphabetical order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}

/// Loader for bracket tables stored as CSV.
///
/// Rows are grouped by the `table` column. Within a table, rows must appear
/// lowest bracket first; each assembled table is validated with
/// [`BracketTable::new`].
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader.
    ///
    /// The reader can be any type that implements `Read`, such as a file or a
    /// byte slice.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        csv_reader
            .deserialize::<BracketRecord>()
            .enumerate()
            .map(|(idx, result)| {
                let record = result?;
                if record.table.is_empty() {
                    return Err(BracketTableLoaderError::EmptyTableName(idx + 1));
                }
                Ok(record)
            })
            .collect()
    }

    /// Assemble parsed records into validated tables.
    pub fn build(records: &[BracketRecord]) -> Result<BracketTables, BracketTableLoaderError> {
        let mut grouped: BTreeMap<String, Vec<TaxBracket>> = BTreeMap::new();

        for record in records {
            grouped
                .entry(record.table.clone())
                .or_default()
                .push(TaxBracket {
                    upper_bound: record.upper_bound,
                    rate: record.rate,
                });
        }

        let mut tables = BTreeMap::new();
        for (name, brackets) in grouped {
            let table = BracketTable::new(brackets).map_err(|source| {
                BracketTableLoaderError::InvalidTable {
                    table: name.clone(),
                    source,
                }
            })?;
            debug!(table = %name, brackets = table.len(), "bracket table built");
            tables.insert(name, table);
        }

        Ok(BracketTables { tables })
    }

    /// Read, parse and validate the tables in `path`.
    pub fn load_from_file(path: &Path) -> Result<BracketTables, BracketTableLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let records = Self::parse(file)?;
        let tables = Self::build(&records)?;
        info!(
            path = %path.display(),
            tables = tables.len(),
            "loaded bracket tables"
        );

        Ok(tables)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const TEST_CSV: &str = r#"table,upper_bound,rate
monthly,100000,0.00
monthly,141667,0.06
monthly,183333,0.12
monthly,225000,0.18
monthly,266667,0.24
monthly,308333,0.30
monthly,,0.36
annual,1200000,0.00
annual,1700000,0.06
annual,2200000,0.12
annual,2700000,0.18
annual,3200000,0.24
annual,3700000,0.30
annual,,0.36
"#;

    #[test]
    fn test_parse_single_row() {
        let csv = "table,upper_bound,rate\nmonthly,100000,0.00";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                table: "monthly".to_string(),
                upper_bound: Some(dec!(100000)),
                rate: dec!(0.00),
            }]
        );
    }

    #[test]
    fn test_parse_unbounded_spellings() {
        let csv = "table,upper_bound,rate\nt,,0.1\nt,inf,0.2\nt, Infinity ,0.3";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.iter().all(|r| r.upper_bound.is_none()));
    }

    #[test]
    fn test_parse_trims_whitespace() {
        let csv = "table,upper_bound,rate\n monthly , 100000 , 0.06 ";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].table, "monthly");
        assert_eq!(records[0].upper_bound, Some(dec!(100000)));
        assert_eq!(records[0].rate, dec!(0.06));
    }

    #[test]
    fn test_parse_empty_csv() {
        let csv = "table,upper_bound,rate\n";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert!(records.is_empty());
    }

    #[test]
    fn test_parse_missing_column() {
        let csv = "table,upper_bound\nmonthly,100000";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let BracketTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(msg.contains("missing field"), "got: {}", msg);
    }

    #[test]
    fn test_parse_bad_decimal() {
        let csv = "table,upper_bound,rate\nmonthly,abc,0.06";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, BracketTableLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_parse_empty_table_name() {
        let csv = "table,upper_bound,rate\nmonthly,100000,0\n,,0.1";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, BracketTableLoaderError::EmptyTableName(2)));
    }

    #[test]
    fn test_build_matches_builtin_tables() {
        let records = BracketTableLoader::parse(TEST_CSV.as_bytes()).expect("Failed to parse CSV");

        let tables = BracketTableLoader::build(&records).expect("Failed to build tables");

        assert_eq!(tables.len(), 2);
        assert_eq!(tables.names().collect::<Vec<_>>(), vec!["annual", "monthly"]);
        assert_eq!(tables.get("monthly"), Some(&BracketTable::monthly()));
        assert_eq!(tables.get("annual"), Some(&BracketTable::annual()));
    }

    #[test]
    fn test_build_rejects_out_of_order_rows() {
        let csv = "table,upper_bound,rate\nt,200,0.1\nt,100,0\nt,,0.2";
        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        match err {
            BracketTableLoaderError::InvalidTable { table, source } => {
                assert_eq!(table, "t");
                assert_eq!(
                    source,
                    BracketTableError::NotIncreasing {
                        index: 1,
                        bound: dec!(100),
                        previous: dec!(200),
                    }
                );
            }
            other => panic!("expected InvalidTable, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rejects_missing_open_bracket() {
        let csv = "table,upper_bound,rate\nt,100,0\nt,200,0.1";
        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        let err = BracketTableLoader::build(&records).expect_err("Should fail");

        assert!(matches!(
            err,
            BracketTableLoaderError::InvalidTable {
                source: BracketTableError::BoundedFinalBracket(_),
                ..
            }
        ));
    }

    #[test]
    fn test_build_empty_records() {
        let tables = BracketTableLoader::build(&[]).expect("Should build");

        assert!(tables.is_empty());
    }
}
