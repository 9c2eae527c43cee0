//! Reading calibration variables out of level 5 MAT-files.

use crate::error::{io_error, DatasetError, Result};
use log::*;
use matfile::{Array, MatFile, NumericData};
use ndarray::{ArrayD, IxDyn, ShapeBuilder};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Loads one numeric variable from the MAT-file at `path`.
///
/// The first of `keys` present in the file is used. Without any of them, the first
/// variable whose name does not start with `__` is taken instead.
pub fn load_mat_variable(path: impl AsRef<Path>, keys: &[&str]) -> Result<ArrayD<f64>> {
    let path = path.as_ref();
    let file = File::open(path).map_err(io_error(path))?;
    let mat = MatFile::parse(BufReader::new(file)).map_err(|e| DatasetError::Mat {
        path: path.to_owned(),
        reason: format!("{:?}", e),
    })?;

    let array = keys
        .iter()
        .find_map(|key| mat.find_by_name(key))
        .or_else(|| {
            mat.arrays()
                .iter()
                .find(|array| !array.name().starts_with("__"))
        })
        .ok_or_else(|| DatasetError::NoMatVariable(path.to_owned()))?;
    debug!(
        "using variable {} of shape {:?} from {}",
        array.name(),
        array.size(),
        path.display()
    );
    to_array(array).map_err(|reason| DatasetError::Mat {
        path: path.to_owned(),
        reason,
    })
}

/// Converts a MAT-file array into an `f64` array with the same logical shape.
///
/// MAT-files store values column-major. The imaginary part of complex data is dropped.
fn to_array(array: &Array) -> std::result::Result<ArrayD<f64>, String> {
    let real: Vec<f64> = match array.data() {
        NumericData::Double { real, .. } => real.clone(),
        NumericData::Single { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::Int8 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::UInt8 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::Int16 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::UInt16 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::Int32 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::UInt32 { real, .. } => real.iter().map(|&v| v.into()).collect(),
        NumericData::Int64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
        NumericData::UInt64 { real, .. } => real.iter().map(|&v| v as f64).collect(),
    };
    ArrayD::from_shape_vec(IxDyn(array.size()).f(), real).map_err(|e| e.to_string())
}
