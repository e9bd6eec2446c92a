use std::io::Read;
use std::path::Path;

use rust_decimal::Decimal;
use serde::Deserialize;
use tax_core::{BracketTable, BracketTableError, TaxBracket};
use thiserror::Error;

/// Errors that can occur when loading a bracket table.
#[derive(Debug, Error)]
pub enum BracketTableLoaderError {
    #[error("CSV parse error: {0}")]
    CsvParse(String),

    #[error("cannot read '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid bracket table: {0}")]
    InvalidTable(#[from] BracketTableError),
}

impl From<csv::Error> for BracketTableLoaderError {
    fn from(err: csv::Error) -> Self {
        BracketTableLoaderError::CsvParse(err.to_string())
    }
}

/// A single record from a bracket CSV file.
///
/// - `min_income`: lower bound of the band
/// - `max_income`: upper bound of the band (empty for unlimited)
/// - `rate`: marginal rate as a decimal (e.g., 0.035 for 3.5%)
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BracketRecord {
    pub min_income: Decimal,
    #[serde(deserialize_with = "deserialize_optional_decimal")]
    pub max_income: Option<Decimal>,
    pub rate: Decimal,
}

impl From<&BracketRecord> for TaxBracket {
    fn from(record: &BracketRecord) -> Self {
        TaxBracket::new(record.min_income, record.max_income, record.rate)
    }
}

fn deserialize_optional_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s: Option<String> = Option::deserialize(deserializer)?;
    match s {
        Some(s) if s.trim().is_empty() => Ok(None),
        Some(s) => s
            .trim()
            .parse::<Decimal>()
            .map(Some)
            .map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

/// Loader for progressive bracket tables stored as CSV.
///
/// ```csv
/// min_income,max_income,rate
/// 0,20000,0
/// 20000,30000,0.02
/// 30000,,0.035
/// ```
pub struct BracketTableLoader;

impl BracketTableLoader {
    /// Parse bracket records from a CSV reader, in file order.
    pub fn parse<R: Read>(reader: R) -> Result<Vec<BracketRecord>, BracketTableLoaderError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);
        let mut records = Vec::new();

        for result in csv_reader.deserialize() {
            let record: BracketRecord = result?;
            records.push(record);
        }

        Ok(records)
    }

    /// Build a validated table from parsed records.
    ///
    /// Records are sorted by `min_income` first, so the file may list bands
    /// in any order; gaps, overlaps and bad rates are still rejected.
    pub fn build(records: &[BracketRecord]) -> Result<BracketTable, BracketTableLoaderError> {
        let mut brackets: Vec<TaxBracket> = records.iter().map(TaxBracket::from).collect();
        brackets.sort_by(|a, b| a.min_income.cmp(&b.min_income));

        Ok(BracketTable::new(brackets)?)
    }

    /// Parse and validate in one step.
    pub fn load<R: Read>(reader: R) -> Result<BracketTable, BracketTableLoaderError> {
        let records = Self::parse(reader)?;
        Self::build(&records)
    }

    pub fn load_from_file(path: &Path) -> Result<BracketTable, BracketTableLoaderError> {
        let file = std::fs::File::open(path).map_err(|source| BracketTableLoaderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::load(file)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    const SINGAPORE_CSV: &str = r#"min_income,max_income,rate
0,20000,0
20000,30000,0.02
30000,40000,0.035
40000,80000,0.07
80000,120000,0.115
120000,160000,0.15
160000,200000,0.18
200000,240000,0.19
240000,280000,0.195
280000,320000,0.20
320000,500000,0.22
500000,1000000,0.23
1000000,,0.24
"#;

    #[test]
    fn test_parse_csv_single_bracket() {
        let csv = "min_income,max_income,rate\n0,20000,0";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(
            records,
            vec![BracketRecord {
                min_income: dec!(0),
                max_income: Some(dec!(20000)),
                rate: dec!(0),
            }]
        );
    }

    #[test]
    fn test_parse_csv_unlimited_max_income() {
        let csv = "min_income,max_income,rate\n1000000,,0.24";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, None);
        assert_eq!(records[0].rate, dec!(0.24));
    }

    #[test]
    fn test_parse_tolerates_whitespace() {
        let csv = "min_income, max_income, rate\n 0 , 20000 , 0.00 ";

        let records = BracketTableLoader::parse(csv.as_bytes()).expect("Failed to parse CSV");

        assert_eq!(records[0].max_income, Some(dec!(20000)));
    }

    #[test]
    fn test_load_matches_builtin_table() {
        let table = BracketTableLoader::load(SINGAPORE_CSV.as_bytes()).expect("Failed to load");

        assert_eq!(&table, BracketTable::singapore());
    }

    #[test]
    fn test_build_sorts_records() {
        let csv = "min_income,max_income,rate\n10000,,0.10\n0,10000,0";

        let table = BracketTableLoader::load(csv.as_bytes()).expect("Failed to load");

        assert_eq!(table.brackets()[0].min_income, dec!(0));
        assert_eq!(table.brackets()[1].min_income, dec!(10000));
    }

    #[test]
    fn test_load_rejects_gap() {
        let csv = "min_income,max_income,rate\n0,10000,0\n12000,,0.10";

        let err = BracketTableLoader::load(csv.as_bytes()).expect_err("Should reject gap");

        match err {
            BracketTableLoaderError::InvalidTable(BracketTableError::NotContiguous {
                index,
                ..
            }) => assert_eq!(index, 1),
            other => panic!("expected NotContiguous, got {other:?}"),
        }
    }

    #[test]
    fn test_load_rejects_empty_file() {
        let csv = "min_income,max_income,rate\n";

        let err = BracketTableLoader::load(csv.as_bytes()).expect_err("Should reject empty");

        assert!(matches!(
            err,
            BracketTableLoaderError::InvalidTable(BracketTableError::Empty)
        ));
    }

    #[test]
    fn test_parse_invalid_csv_missing_column() {
        let csv = "min_income,max_income\n0,20000";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        let BracketTableLoaderError::CsvParse(msg) = err else {
            panic!("Expected CsvParse error, got: {:?}", err);
        };
        assert!(
            msg.contains("missing field"),
            "Expected 'missing field' in error, got: {}",
            msg
        );
    }

    #[test]
    fn test_parse_invalid_csv_bad_decimal() {
        let csv = "min_income,max_income,rate\nabc,20000,0";

        let err = BracketTableLoader::parse(csv.as_bytes()).expect_err("Should fail");

        assert!(matches!(err, BracketTableLoaderError::CsvParse(_)));
    }

    #[test]
    fn test_load_from_missing_file() {
        let err = BracketTableLoader::load_from_file(Path::new("/this/path/does/not/exist.csv"))
            .expect_err("Should fail");

        assert!(matches!(err, BracketTableLoaderError::Io { .. }));
    }
}
