//! Dense row-major design matrix with named columns.
//!
//! Column names travel with the numeric data so the model trainer can
//! strip bookkeeping columns by name and the importance extractor can
//! label coefficients.

use crate::error::{Result, SelectionError};

/// Row-major matrix of predictor values with one name per column.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    columns: Vec<String>,
    rows: usize,
    data: Vec<f64>,
}

impl DesignMatrix {
    /// Build from row-major data; `data.len()` must equal `rows * columns.len()`.
    pub fn new(columns: Vec<String>, rows: usize, data: Vec<f64>) -> Result<Self> {
        if data.len() != rows * columns.len() {
            return Err(SelectionError::DimensionMismatch {
                expected: rows * columns.len(),
                got: data.len(),
            });
        }
        Ok(Self { columns, rows, data })
    }

    /// Build from column vectors of equal length.
    pub fn from_columns(columns: Vec<String>, values: Vec<Vec<f64>>) -> Result<Self> {
        if columns.len() != values.len() {
            return Err(SelectionError::DimensionMismatch {
                expected: columns.len(),
                got: values.len(),
            });
        }
        let rows = values.first().map(|v| v.len()).unwrap_or(0);
        for v in &values {
            if v.len() != rows {
                return Err(SelectionError::DimensionMismatch {
                    expected: rows,
                    got: v.len(),
                });
            }
        }
        let mut data = Vec::with_capacity(rows * columns.len());
        for row in 0..rows {
            for col in &values {
                data.push(col[row]);
            }
        }
        Ok(Self { columns, rows, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.columns.len()
    }

    pub fn column_names(&self) -> &[String] {
        &self.columns
    }

    /// One observation row.
    pub fn row(&self, i: usize) -> &[f64] {
        let w = self.cols();
        &self.data[i * w..(i + 1) * w]
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols() + col]
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Copy of column `j` as a vector.
    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    /// Mean of each column. Empty matrix yields zeros.
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.cols()];
        if self.rows == 0 {
            return means;
        }
        for i in 0..self.rows {
            for (j, m) in means.iter_mut().enumerate() {
                *m += self.get(i, j);
            }
        }
        let n = self.rows as f64;
        for m in &mut means {
            *m /= n;
        }
        means
    }

    /// Copy without the named column, if present; otherwise an identical copy.
    pub fn without_column(&self, name: &str) -> DesignMatrix {
        match self.column_index(name) {
            None => self.clone(),
            Some(drop) => {
                let columns: Vec<String> = self
                    .columns
                    .iter()
                    .enumerate()
                    .filter(|(j, _)| *j != drop)
                    .map(|(_, c)| c.clone())
                    .collect();
                let mut data = Vec::with_capacity(self.rows * columns.len());
                for i in 0..self.rows {
                    for j in 0..self.cols() {
                        if j != drop {
                            data.push(self.get(i, j));
                        }
                    }
                }
                DesignMatrix {
                    columns,
                    rows: self.rows,
                    data,
                }
            }
        }
    }

    /// Copy with an extra column appended on the right.
    pub fn with_column(&self, name: &str, values: &[f64]) -> Result<DesignMatrix> {
        if values.len() != self.rows {
            return Err(SelectionError::DimensionMismatch {
                expected: self.rows,
                got: values.len(),
            });
        }
        let mut columns = self.columns.clone();
        columns.push(name.to_string());
        let mut data = Vec::with_capacity(self.rows * columns.len());
        for i in 0..self.rows {
            data.extend_from_slice(self.row(i));
            data.push(values[i]);
        }
        DesignMatrix::new(columns, self.rows, data)
    }

    /// Copy without the listed columns; every name must exist.
    pub fn without_columns(&self, names: &[String]) -> Result<DesignMatrix> {
        let mut out = self.clone();
        for name in names {
            if out.column_index(name).is_none() {
                return Err(SelectionError::MissingColumn(name.clone()));
            }
            out = out.without_column(name);
        }
        Ok(out)
    }
}
