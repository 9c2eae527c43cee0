//! Discovery and loading of the calibration files of a capture.
//!
//! A `calib` directory holds three matrices: the camera intrinsics, the
//! camera-to-world pose of every view, and the light directions. Captures name these
//! files inconsistently, so each is looked up under its default name first and then by
//! keyword.

use crate::error::{DatasetError, Result};
use crate::images::sorted_entries;
use crate::mat::load_mat_variable;
use crate::matrix::load_txt_matrix;
use helmholtz_core::{CameraToWorld, Direction};
use log::*;
use nalgebra::{Matrix3, Matrix4};
use ndarray::{ArrayD, Ix2};
use std::path::{Path, PathBuf};

/// Where to look for one calibration matrix.
#[derive(Debug, Clone, Copy)]
pub struct MatrixSource {
    pub default_txt: &'static str,
    pub default_mat: &'static str,
    /// Lower-case fragments of the file name, the first one names the matrix in errors.
    pub keywords: &'static [&'static str],
    /// Variable names tried in order inside a MAT-file.
    pub mat_keys: &'static [&'static str],
}

pub const INTRINSICS: MatrixSource = MatrixSource {
    default_txt: "intrinsics.txt",
    default_mat: "intrinsics.mat",
    keywords: &["intrin", "k"],
    mat_keys: &["K"],
};

pub const EXTRINSICS: MatrixSource = MatrixSource {
    default_txt: "extrinsics.txt",
    default_mat: "extrinsics.mat",
    keywords: &["extrin", "pose", "c2w"],
    mat_keys: &["pose_c2w"],
};

pub const LIGHT_DIRECTIONS: MatrixSource = MatrixSource {
    default_txt: "light_directions.txt",
    default_mat: "light_directions.mat",
    keywords: &["light", "dir"],
    mat_keys: &["light_direction"],
};

/// The calibration of one capture.
#[derive(Debug, Clone, PartialEq)]
pub struct Calibration {
    pub intrinsics: Matrix3<f64>,
    pub poses: Vec<CameraToWorld>,
    /// Light directions shared by every view.
    pub light_directions: Vec<Direction>,
}

/// Loads intrinsics, camera-to-world poses, and light directions from `calib_dir`.
pub fn load_calibration(calib_dir: impl AsRef<Path>) -> Result<Calibration> {
    let calib_dir = calib_dir.as_ref();
    let (path, intrinsics) = load_matrix(calib_dir, &INTRINSICS)?;
    let intrinsics = intrinsics_from_array(&intrinsics).map_err(malformed(&path))?;
    let (path, poses) = load_matrix(calib_dir, &EXTRINSICS)?;
    let poses = poses_from_array(&poses).map_err(malformed(&path))?;
    let (path, light_directions) = load_matrix(calib_dir, &LIGHT_DIRECTIONS)?;
    let light_directions = lights_from_array(&light_directions).map_err(malformed(&path))?;
    info!(
        "loaded calibration with {} poses and {} light directions",
        poses.len(),
        light_directions.len()
    );
    Ok(Calibration {
        intrinsics,
        poses,
        light_directions,
    })
}

/// Finds and loads the matrix described by `source`, returning the file it came from.
///
/// Search order: the default text file, the default `.mat` file, any `.txt` file whose
/// name contains a keyword, any `.mat` file whose name contains a keyword.
pub fn load_matrix(calib_dir: &Path, source: &MatrixSource) -> Result<(PathBuf, ArrayD<f64>)> {
    let default_txt = calib_dir.join(source.default_txt);
    let default_mat = calib_dir.join(source.default_mat);
    let path = if default_txt.is_file() {
        default_txt
    } else if default_mat.is_file() {
        default_mat
    } else if let Some(path) = search_file(calib_dir, source.keywords, ".txt")? {
        path
    } else if let Some(path) = search_file(calib_dir, source.keywords, ".mat")? {
        path
    } else {
        return Err(DatasetError::MissingCalibrationFile(
            source.keywords[0].to_string(),
        ));
    };

    debug!("reading {}", path.display());
    let array = if has_extension(&path, ".mat") {
        load_mat_variable(&path, source.mat_keys)?
    } else {
        load_txt_matrix(&path)?.into_dyn()
    };
    Ok((path, array))
}

/// The first file in `dir` (by name) whose lower-cased name contains any of `keywords`
/// and ends with `extension`.
pub fn search_file(dir: &Path, keywords: &[&str], extension: &str) -> Result<Option<PathBuf>> {
    Ok(sorted_entries(dir)?
        .into_iter()
        .find(|name| {
            let name = name.to_string_lossy().to_lowercase();
            keywords.iter().any(|keyword| name.contains(keyword)) && name.ends_with(extension)
        })
        .map(|name| dir.join(name)))
}

/// Interprets any 9-element array as a row-major 3x3 intrinsic matrix.
pub fn intrinsics_from_array(
    array: &ArrayD<f64>,
) -> std::result::Result<Matrix3<f64>, String> {
    if array.len() != 9 {
        return Err(format!(
            "intrinsics need 9 values but {} were found",
            array.len()
        ));
    }
    let flat: Vec<f64> = array.iter().copied().collect();
    Ok(Matrix3::from_row_slice(&flat))
}

/// Interprets an array as a sequence of 4x4 camera-to-world poses.
///
/// * An array whose last two axes are `4 x 4` (a single `4 x 4` matrix or a `k x 4 x 4`
///   stack) holds one pose per leading index.
/// * Any other array with `16k` values is read as a row-major `4 x 4 x k` array, where
///   pose `p` element `(r, c)` sits at flat index `r * 4k + c * k + p`. A `4k x 4` text
///   matrix with `k > 1` falls in this case.
pub fn poses_from_array(
    array: &ArrayD<f64>,
) -> std::result::Result<Vec<CameraToWorld>, String> {
    if array.is_empty() || array.len() % 16 != 0 {
        return Err(format!(
            "poses need a multiple of 16 values but an array of shape {:?} was found",
            array.shape()
        ));
    }
    let count = array.len() / 16;
    let flat: Vec<f64> = array.iter().copied().collect();
    let poses = if array.shape().ends_with(&[4, 4]) {
        flat.chunks_exact(16)
            .map(|block| CameraToWorld::from_homogeneous(&Matrix4::from_row_slice(block)))
            .collect()
    } else {
        (0..count)
            .map(|p| {
                CameraToWorld::from_homogeneous(&Matrix4::from_fn(|r, c| {
                    flat[r * 4 * count + c * count + p]
                }))
            })
            .collect()
    };
    Ok(poses)
}

/// Interprets a two-dimensional array as light directions, one per row.
///
/// An array with exactly three rows is taken to hold one light per column and is
/// transposed first, so a 3x3 array is always read column-wise.
pub fn lights_from_array(
    array: &ArrayD<f64>,
) -> std::result::Result<Vec<Direction>, String> {
    let matrix = array.view().into_dimensionality::<Ix2>().map_err(|_| {
        format!(
            "light directions need a 2-dimensional array but shape {:?} was found",
            array.shape()
        )
    })?;
    let matrix = if matrix.nrows() == 3 {
        matrix.reversed_axes()
    } else {
        matrix
    };
    if matrix.ncols() != 3 {
        return Err(format!(
            "light directions need 3 columns but a {}x{} array was found",
            matrix.nrows(),
            matrix.ncols()
        ));
    }
    Ok(matrix
        .outer_iter()
        .map(|row| Direction::new(row[0], row[1], row[2]))
        .collect())
}

fn has_extension(path: &Path, extension: &str) -> bool {
    path.to_string_lossy().to_lowercase().ends_with(extension)
}

fn malformed(path: &Path) -> impl FnOnce(String) -> DatasetError + '_ {
    move |reason| DatasetError::MalformedMatrix {
        path: path.to_owned(),
        reason,
    }
}
