//! Weekly observational dataset.
//!
//! A [`WeeklyDataset`] is a columnar table of week-stamped observations:
//! one entity label and one date per row, plus named numeric columns.
//! Rows are kept in ascending date order; the integer week axis used by
//! the temporal splitter is the ISO week number of each date.

use crate::core::matrix::DesignMatrix;
use crate::error::{Result, SelectionError};
use chrono::{Datelike, Duration, NaiveDate};

/// Target column: cumulative cases observed in the prison system.
pub const TARGET_COLUMN: &str = "total_prisoner_cases";

/// Previous week's cumulative cases. Undefined (NaN) in the earliest week.
pub const LAG_COLUMN: &str = "lag_prisoner_cases";

/// Cases newly reported in the observation week.
pub const NEW_CASES_COLUMN: &str = "new_prisoner_cases";

/// Bookkeeping column carrying the week number through feature assembly.
/// Never used as a predictive feature; the trainer strips it before fitting.
pub const WEEK_COLUMN: &str = "as_of_date";

/// Prefix of the one-hot entity indicator columns.
pub const STATE_PREFIX: &str = "state_";

/// Columnar table of weekly observations.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyDataset {
    entities: Vec<String>,
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    /// Column-major storage: values[column][row].
    values: Vec<Vec<f64>>,
}

/// Builder for constructing a [`WeeklyDataset`] with validation.
#[derive(Debug, Clone, Default)]
pub struct WeeklyDatasetBuilder {
    entities: Vec<String>,
    dates: Vec<NaiveDate>,
    columns: Vec<String>,
    values: Vec<Vec<f64>>,
}

impl WeeklyDatasetBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entities(mut self, entities: Vec<String>) -> Self {
        self.entities = entities;
        self
    }

    pub fn dates(mut self, dates: Vec<NaiveDate>) -> Self {
        self.dates = dates;
        self
    }

    /// Add a named numeric column.
    pub fn column(mut self, name: &str, values: Vec<f64>) -> Self {
        self.columns.push(name.to_string());
        self.values.push(values);
        self
    }

    /// Validate lengths and date ordering, producing the dataset.
    pub fn build(self) -> Result<WeeklyDataset> {
        let rows = self.dates.len();
        if rows == 0 {
            return Err(SelectionError::EmptyData);
        }
        if self.entities.len() != rows {
            return Err(SelectionError::DimensionMismatch {
                expected: rows,
                got: self.entities.len(),
            });
        }
        for values in &self.values {
            if values.len() != rows {
                return Err(SelectionError::DimensionMismatch {
                    expected: rows,
                    got: values.len(),
                });
            }
        }
        if self.dates.windows(2).any(|w| w[0] > w[1]) {
            return Err(SelectionError::InvalidParameter(
                "dataset rows must be sorted ascending by date".to_string(),
            ));
        }
        for (i, name) in self.columns.iter().enumerate() {
            if self.columns[..i].contains(name) {
                return Err(SelectionError::InvalidParameter(format!(
                    "duplicate column: {name}"
                )));
            }
        }
        Ok(WeeklyDataset {
            entities: self.entities,
            dates: self.dates,
            columns: self.columns,
            values: self.values,
        })
    }
}

impl WeeklyDataset {
    /// Start building a dataset.
    pub fn builder() -> WeeklyDatasetBuilder {
        WeeklyDatasetBuilder::new()
    }

    /// Number of observation rows.
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn entities(&self) -> &[String] {
        &self.entities
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    /// ISO week number of the observation at `row`.
    pub fn week_of(&self, row: usize) -> u32 {
        self.dates[row].iso_week().week()
    }

    /// Week number per row, in row order.
    pub fn weeks(&self) -> Vec<u32> {
        self.dates.iter().map(|d| d.iso_week().week()).collect()
    }

    /// Sorted distinct week numbers present in the dataset.
    pub fn distinct_weeks(&self) -> Vec<u32> {
        let mut weeks = self.weeks();
        weeks.sort_unstable();
        weeks.dedup();
        weeks
    }

    /// Week number of the first (earliest) observation.
    pub fn earliest_week(&self) -> Result<u32> {
        self.dates
            .first()
            .map(|d| d.iso_week().week())
            .ok_or(SelectionError::EmptyData)
    }

    /// Week number of the last (latest) observation.
    pub fn latest_week(&self) -> Result<u32> {
        self.dates
            .last()
            .map(|d| d.iso_week().week())
            .ok_or(SelectionError::EmptyData)
    }

    /// Values of a named column.
    pub fn column(&self, name: &str) -> Result<&[f64]> {
        self.columns
            .iter()
            .position(|c| c == name)
            .map(|i| self.values[i].as_slice())
            .ok_or_else(|| SelectionError::MissingColumn(name.to_string()))
    }

    /// Replace the values of a named column.
    pub fn set_column(&mut self, name: &str, values: Vec<f64>) -> Result<()> {
        if values.len() != self.len() {
            return Err(SelectionError::DimensionMismatch {
                expected: self.len(),
                got: values.len(),
            });
        }
        let idx = self
            .columns
            .iter()
            .position(|c| c == name)
            .ok_or_else(|| SelectionError::MissingColumn(name.to_string()))?;
        self.values[idx] = values;
        Ok(())
    }

    /// Names of the one-hot entity indicator columns, in column order.
    pub fn state_columns(&self) -> Vec<String> {
        self.columns
            .iter()
            .filter(|c| c.starts_with(STATE_PREFIX))
            .cloned()
            .collect()
    }

    /// Rows whose week number satisfies the predicate, preserving order.
    pub fn filter_weeks<F>(&self, keep: F) -> WeeklyDataset
    where
        F: Fn(u32) -> bool,
    {
        let rows: Vec<usize> = (0..self.len()).filter(|&i| keep(self.week_of(i))).collect();
        WeeklyDataset {
            entities: rows.iter().map(|&i| self.entities[i].clone()).collect(),
            dates: rows.iter().map(|&i| self.dates[i]).collect(),
            columns: self.columns.clone(),
            values: self
                .values
                .iter()
                .map(|col| rows.iter().map(|&i| col[i]).collect())
                .collect(),
        }
    }

    /// Copy of the dataset with every date advanced by `weeks` weeks.
    pub fn advanced_by_weeks(&self, weeks: i64) -> WeeklyDataset {
        let mut out = self.clone();
        out.dates = self
            .dates
            .iter()
            .map(|d| *d + Duration::weeks(weeks))
            .collect();
        out
    }

    /// Extract the named columns into a design matrix, in the given order.
    pub fn select(&self, columns: &[String]) -> Result<DesignMatrix> {
        let rows = self.len();
        let mut data = Vec::with_capacity(rows * columns.len());
        let cols: Vec<&[f64]> = columns
            .iter()
            .map(|name| self.column(name))
            .collect::<Result<_>>()?;
        for row in 0..rows {
            for col in &cols {
                data.push(col[row]);
            }
        }
        DesignMatrix::new(columns.to_vec(), rows, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two entities over three consecutive weeks of April 2020.
    fn sample() -> WeeklyDataset {
        let dates = vec![
            date(2020, 4, 6),
            date(2020, 4, 6),
            date(2020, 4, 13),
            date(2020, 4, 13),
            date(2020, 4, 20),
            date(2020, 4, 20),
        ];
        let entities = vec!["ohio", "texas", "ohio", "texas", "ohio", "texas"]
            .into_iter()
            .map(String::from)
            .collect();
        WeeklyDataset::builder()
            .entities(entities)
            .dates(dates)
            .column(TARGET_COLUMN, vec![10.0, 20.0, 15.0, 28.0, 22.0, 35.0])
            .column(LAG_COLUMN, vec![f64::NAN, f64::NAN, 10.0, 20.0, 15.0, 28.0])
            .column(NEW_CASES_COLUMN, vec![f64::NAN, f64::NAN, 5.0, 8.0, 7.0, 7.0])
            .column("state_ohio", vec![1.0, 0.0, 1.0, 0.0, 1.0, 0.0])
            .column("state_texas", vec![0.0, 1.0, 0.0, 1.0, 0.0, 1.0])
            .build()
            .unwrap()
    }

    #[test]
    fn builder_validates_lengths() {
        let result = WeeklyDataset::builder()
            .entities(vec!["ohio".to_string()])
            .dates(vec![date(2020, 4, 6), date(2020, 4, 13)])
            .column("x", vec![1.0, 2.0])
            .build();
        assert!(matches!(
            result,
            Err(SelectionError::DimensionMismatch { expected: 2, got: 1 })
        ));
    }

    #[test]
    fn builder_rejects_empty() {
        assert_eq!(
            WeeklyDataset::builder().build().unwrap_err(),
            SelectionError::EmptyData
        );
    }

    #[test]
    fn builder_rejects_unsorted_dates() {
        let result = WeeklyDataset::builder()
            .entities(vec!["a".to_string(), "b".to_string()])
            .dates(vec![date(2020, 4, 13), date(2020, 4, 6)])
            .column("x", vec![1.0, 2.0])
            .build();
        assert!(result.is_err());
    }

    #[test]
    fn week_numbers_follow_iso_weeks() {
        let ds = sample();
        assert_eq!(ds.distinct_weeks(), vec![15, 16, 17]);
        assert_eq!(ds.earliest_week().unwrap(), 15);
        assert_eq!(ds.latest_week().unwrap(), 17);
    }

    #[test]
    fn filter_weeks_keeps_matching_rows() {
        let ds = sample();
        let filtered = ds.filter_weeks(|w| w != 15);
        assert_eq!(filtered.len(), 4);
        assert_eq!(filtered.distinct_weeks(), vec![16, 17]);
        assert_eq!(filtered.column(TARGET_COLUMN).unwrap(), &[15.0, 28.0, 22.0, 35.0]);
    }

    #[test]
    fn column_access_and_replacement() {
        let mut ds = sample();
        assert_eq!(ds.column(TARGET_COLUMN).unwrap()[0], 10.0);
        assert!(matches!(
            ds.column("nope"),
            Err(SelectionError::MissingColumn(_))
        ));

        ds.set_column(TARGET_COLUMN, vec![1.0; 6]).unwrap();
        assert_eq!(ds.column(TARGET_COLUMN).unwrap(), &[1.0; 6]);

        let err = ds.set_column(TARGET_COLUMN, vec![1.0; 3]).unwrap_err();
        assert!(matches!(err, SelectionError::DimensionMismatch { .. }));
    }

    #[test]
    fn state_columns_are_detected_by_prefix() {
        let ds = sample();
        assert_eq!(
            ds.state_columns(),
            vec!["state_ohio".to_string(), "state_texas".to_string()]
        );
    }

    #[test]
    fn select_builds_row_major_matrix() {
        let ds = sample();
        let m = ds
            .select(&[TARGET_COLUMN.to_string(), "state_ohio".to_string()])
            .unwrap();
        assert_eq!(m.rows(), 6);
        assert_eq!(m.cols(), 2);
        assert_eq!(m.row(0), &[10.0, 1.0]);
        assert_eq!(m.row(1), &[20.0, 0.0]);
    }

    #[test]
    fn advancing_dates_shifts_weeks() {
        let ds = sample().advanced_by_weeks(1);
        assert_eq!(ds.distinct_weeks(), vec![16, 17, 18]);
    }
}
