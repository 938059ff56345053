//! Training Dataset Loading
//!
//! Reads the historical crop dataset from CSV with Polars. Each row pairs four
//! environmental features with the observed yield. Rows with any missing field
//! cannot be used for training and are dropped here, with a warning.

use anyhow::{Context, Result};
use polars::prelude::*;

/// One historical observation of growing conditions and realized yield.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrainingRecord {
    pub rainfall: f64,
    pub temperature: f64,
    pub soil_ph: f64,
    pub fertilizer_use: f64,
    pub crop_yield: f64,
}

impl TrainingRecord {
    /// Feature tuple in the order the estimator was fitted with.
    pub fn features(&self) -> [f64; 4] {
        [self.rainfall, self.temperature, self.soil_ph, self.fertilizer_use]
    }
}

/// Load training records from a CSV file with a header row.
///
/// Expected columns: `rainfall`, `temperature`, `soil_ph`, `fertilizer_use`,
/// `crop_yield`. Integer-typed columns are cast to f64.
pub fn load_training_data(path: &str) -> Result<Vec<TrainingRecord>> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .try_into_reader_with_file_path(Some(path.into()))
        .with_context(|| format!("Failed to create CSV reader: {}", path))?
        .finish()
        .with_context(|| format!("Failed to load training data: {}", path))?;

    let rainfall = float_column(&df, "rainfall")?;
    let temperature = float_column(&df, "temperature")?;
    let soil_ph = float_column(&df, "soil_ph")?;
    let fertilizer_use = float_column(&df, "fertilizer_use")?;
    let crop_yield = float_column(&df, "crop_yield")?;

    let mut records = Vec::with_capacity(df.height());
    let mut dropped = 0usize;

    for idx in 0..df.height() {
        match (
            rainfall.get(idx),
            temperature.get(idx),
            soil_ph.get(idx),
            fertilizer_use.get(idx),
            crop_yield.get(idx),
        ) {
            (
                Some(rainfall),
                Some(temperature),
                Some(soil_ph),
                Some(fertilizer_use),
                Some(crop_yield),
            ) => records.push(TrainingRecord {
                rainfall,
                temperature,
                soil_ph,
                fertilizer_use,
                crop_yield,
            }),
            _ => dropped += 1,
        }
    }

    if dropped > 0 {
        tracing::warn!("Dropped {} rows with missing fields from {}", dropped, path);
    }

    Ok(records)
}

/// Fetch a column as f64, casting from integer types when needed.
fn float_column(df: &DataFrame, name: &str) -> Result<Float64Chunked> {
    let column = df
        .column(name)
        .with_context(|| format!("Column '{}' not found", name))?
        .cast(&DataType::Float64)
        .with_context(|| format!("Column '{}' is not numeric", name))?;

    Ok(column
        .f64()
        .with_context(|| format!("Column '{}' is not numeric", name))?
        .clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        file.write_all(contents.as_bytes()).expect("write csv");
        file
    }

    #[test]
    fn loads_complete_rows() {
        let file = write_csv(
            "rainfall,temperature,soil_ph,fertilizer_use,crop_yield\n\
             400,20,6.5,50,3.2\n\
             550.5,24,6.1,60,3.8\n",
        );

        let records = load_training_data(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].features(), [400.0, 20.0, 6.5, 50.0]);
        assert_eq!(records[1].crop_yield, 3.8);
    }

    #[test]
    fn drops_rows_with_missing_fields() {
        let file = write_csv(
            "rainfall,temperature,soil_ph,fertilizer_use,crop_yield\n\
             400,20,6.5,50,3.2\n\
             500,25,,60,3.8\n\
             450,22,6.0,55,\n",
        );

        let records = load_training_data(file.path().to_str().unwrap()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].rainfall, 400.0);
    }

    #[test]
    fn missing_column_is_an_error() {
        let file = write_csv("rainfall,temperature\n400,20\n");
        let result = load_training_data(file.path().to_str().unwrap());
        assert!(result.is_err());
    }
}
