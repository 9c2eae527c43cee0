use crate::error::{io_error, DatasetError, Result};
use ndarray::Array2;
use std::fs;
use std::path::Path;

/// Reads a whitespace-separated text matrix.
///
/// One row per line. Blank lines and anything after a `#` are ignored. Every row must
/// have the same number of values. A file with a single row gives a `1 x n` matrix.
pub fn load_txt_matrix(path: impl AsRef<Path>) -> Result<Array2<f64>> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(io_error(path))?;
    parse_matrix(&text).map_err(|reason| DatasetError::MalformedMatrix {
        path: path.to_owned(),
        reason,
    })
}

/// Parses the contents of a text matrix. See [`load_txt_matrix`].
pub fn parse_matrix(text: &str) -> std::result::Result<Array2<f64>, String> {
    let mut data = vec![];
    let mut cols = None;
    let mut rows = 0;
    for (number, line) in text.lines().enumerate() {
        let line = line.split('#').next().unwrap_or_default();
        let values = line
            .split_whitespace()
            .map(|value| {
                value.parse::<f64>().map_err(|e| {
                    format!("line {}: {:?} is not a number: {}", number + 1, value, e)
                })
            })
            .collect::<std::result::Result<Vec<f64>, String>>()?;
        if values.is_empty() {
            continue;
        }
        match cols {
            None => cols = Some(values.len()),
            Some(cols) if cols != values.len() => {
                return Err(format!(
                    "line {} has {} values but previous rows have {}",
                    number + 1,
                    values.len(),
                    cols
                ))
            }
            Some(_) => {}
        }
        data.extend(values);
        rows += 1;
    }
    let cols = cols.ok_or_else(|| "no values found".to_string())?;
    Array2::from_shape_vec((rows, cols), data).map_err(|e| e.to_string())
}
