use crate::calib::Calibration;
use crate::error::{io_error, json_error, Result};
use helmholtz_core::nalgebra::Matrix3;
use helmholtz_core::{
    CalibrationError, CalibrationSet, CameraToWorld, LightDirections, ReciprocalPair,
};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// The parameter record of an assembled object, stored as `params.json`.
///
/// Only `n_view`, `pose_c2w`, `light_is_same`, and `light_direction` are needed to search
/// for reciprocal pairs, so the remaining fields may be absent when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Params {
    #[serde(default)]
    pub obj_name: String,
    pub n_view: usize,
    /// Image `[height, width]`.
    #[serde(default)]
    pub imhw: [u32; 2],
    #[serde(default)]
    pub gt_normal_world: bool,
    #[serde(default)]
    pub view_train: Vec<usize>,
    #[serde(default)]
    pub view_test: Vec<usize>,
    /// Rows of the intrinsic matrix.
    #[serde(rename = "K", default, skip_serializing_if = "Option::is_none")]
    pub k: Option<[[f64; 3]; 3]>,
    pub pose_c2w: Vec<CameraToWorld>,
    pub light_is_same: bool,
    pub light_direction: LightDirections,
}

impl Params {
    /// Creates the record of a freshly assembled object.
    ///
    /// Every view is a training view and the capture's light set is shared by all views.
    pub fn new(
        obj_name: impl Into<String>,
        calibration: &Calibration,
        n_view: usize,
        imhw: [u32; 2],
    ) -> Self {
        let k = calibration.intrinsics;
        Self {
            obj_name: obj_name.into(),
            n_view,
            imhw,
            gt_normal_world: false,
            view_train: (0..n_view).collect(),
            view_test: vec![],
            k: Some([0, 1, 2].map(|r| [k[(r, 0)], k[(r, 1)], k[(r, 2)]])),
            pose_c2w: calibration.poses.clone(),
            light_is_same: true,
            light_direction: LightDirections::Shared(calibration.light_directions.clone()),
        }
    }

    /// The intrinsic matrix, if the record has one.
    pub fn intrinsics(&self) -> Option<Matrix3<f64>> {
        self.k.map(|rows| Matrix3::from_fn(|r, c| rows[r][c]))
    }

    /// The validated calibration consumed by the reciprocal pair search.
    pub fn calibration_set(&self) -> std::result::Result<CalibrationSet, CalibrationError> {
        let calibration = CalibrationSet {
            n_view: self.n_view,
            pose_c2w: self.pose_c2w.clone(),
            light_is_same: self.light_is_same,
            light_direction: self.light_direction.clone(),
        };
        calibration.validate()?;
        Ok(calibration)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        read_json(path.as_ref())
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        write_json(path.as_ref(), self)
    }
}

/// Reads a pairs record: an array of `[[view, light], [view, light]]` entries.
pub fn load_pairs(path: impl AsRef<Path>) -> Result<Vec<ReciprocalPair>> {
    read_json(path.as_ref())
}

/// Writes a pairs record: an array of `[[view, light], [view, light]]` entries.
pub fn save_pairs(path: impl AsRef<Path>, pairs: &[ReciprocalPair]) -> Result<()> {
    write_json(path.as_ref(), pairs)
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let file = File::open(path).map_err(io_error(path))?;
    serde_json::from_reader(BufReader::new(file)).map_err(json_error(path))
}

fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, value).map_err(json_error(path))?;
    writer.write_all(b"\n").map_err(io_error(path))?;
    writer.flush().map_err(io_error(path))
}
