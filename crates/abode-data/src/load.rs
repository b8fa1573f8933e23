//! Reading raw listing files.
//!
//! Every column is read as text: the scraper writes `Unknown`, `10+` and
//! `Ground` into numeric columns, so types are only assigned by the normalizer.

use crate::error::{DataError, Result};
use crate::schema::LISTING_COLUMNS;
use polars::prelude::*;
use std::path::Path;
use tracing::debug;

/// Load a raw listing CSV file.
///
/// Fails if the file cannot be read or parsed, if it holds no rows, or if any
/// listing column is missing.
pub fn read_listings(path: impl AsRef<Path>) -> Result<DataFrame> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(DataError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("listing file not found: {}", path.display()),
        )));
    }

    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))?
        .finish()?;

    if df.height() == 0 {
        return Err(DataError::EmptyDataset(path.display().to_string()));
    }
    validate_columns(&df)?;

    debug!(rows = df.height(), path = %path.display(), "loaded listings");
    Ok(df)
}

/// Check that every listing column is present.
pub fn validate_columns(df: &DataFrame) -> Result<()> {
    let names = df.get_column_names();
    for required in LISTING_COLUMNS {
        if !names.iter().any(|name| name.as_str() == required) {
            return Err(DataError::MissingColumn(required.to_string()));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("abode-load-{}-{name}", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_reads_all_columns_as_text() {
        let path = write_temp(
            "ok.csv",
            "Type,Price,Bedrooms,Bathrooms,Area,Furnished,Level,Compound,Payment_Option,Delivery_Date,Delivery_Term,City\n\
             Apartment,1500000,3,2,120,No,Ground,Not in Compound,Cash,Ready to move,Finished,Unknown\n\
             Villa,Unknown,10+,3,300,Yes,10+,Mivida,Installment,2024,Semi Finished,New Cairo\n",
        );
        let df = read_listings(&path).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("Price").unwrap().dtype(), &DataType::String);
        assert_eq!(df.column("Bedrooms").unwrap().dtype(), &DataType::String);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_column_is_fatal() {
        let path = write_temp("missing.csv", "Type,Price\nApartment,100\n");
        let err = read_listings(&path).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "Bedrooms"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let err = read_listings("/definitely/not/here.csv").unwrap_err();
        assert!(matches!(err, DataError::Io(_)));
    }
}
