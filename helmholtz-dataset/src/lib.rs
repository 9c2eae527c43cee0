//! Assembly of multi-view photometric stereo captures into the records consumed by
//! reciprocal photometric stereo.
//!
//! A source capture is laid out as
//!
//! ```text
//! <object>/
//!     calib/          intrinsics, camera-to-world poses, light directions
//!     images/
//!         view_01/    one image per light
//!         view_02/
//!         mask/       optional view_01.png, view_02.png, ...
//! ```
//!
//! and is converted into
//!
//! ```text
//! <dst>/
//!     img/view_01/ ...
//!     mask/view_01.png ...
//!     params.json
//!     helmholtz_pairs.json
//! ```

pub mod calib;
mod error;
pub mod images;
pub mod mat;
pub mod matrix;
mod params;
mod settings;

pub use calib::{load_calibration, Calibration};
pub use error::*;
pub use images::copy_images;
pub use params::*;
pub use settings::*;

use helmholtz_core::ReciprocalPair;
use log::*;
use std::path::Path;

/// The default object name for a destination directory: its last path component.
pub fn object_name(dst: impl AsRef<Path>) -> String {
    let dst = dst.as_ref();
    dst.file_name()
        .unwrap_or_else(|| dst.as_os_str())
        .to_string_lossy()
        .into_owned()
}

/// Converts the capture at `src` into an object directory at `dst` and writes its
/// parameter record.
pub fn convert(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    name: Option<&str>,
    settings: &HelmholtzSettings,
) -> Result<Params> {
    let (src, dst) = (src.as_ref(), dst.as_ref());
    let name = name.map_or_else(|| object_name(dst), str::to_owned);

    let calibration = load_calibration(src.join("calib"))?;
    let (n_view, imhw) = copy_images(src.join("images"), dst)?;
    if n_view != calibration.poses.len() {
        warn!(
            "found {} view directories but {} calibrated poses",
            n_view,
            calibration.poses.len()
        );
    }

    let params = Params::new(name, &calibration, n_view, imhw);
    params.save(dst.join(&settings.params_file))?;
    info!("converted object {} saved to {}", params.obj_name, dst.display());
    Ok(params)
}

/// Searches the object directory `obj_dir` for reciprocal pairs using its parameter record.
pub fn find_pairs(
    obj_dir: impl AsRef<Path>,
    settings: &HelmholtzSettings,
) -> Result<Vec<ReciprocalPair>> {
    let params = Params::load(obj_dir.as_ref().join(&settings.params_file))?;
    let calibration = params.calibration_set()?;
    Ok(settings.search().find(&calibration)?)
}

/// Converts the capture at `src` into `dst`, then finds and writes its reciprocal pairs.
pub fn build(
    src: impl AsRef<Path>,
    dst: impl AsRef<Path>,
    name: Option<&str>,
    settings: &HelmholtzSettings,
) -> Result<(Params, Vec<ReciprocalPair>)> {
    let dst = dst.as_ref();
    let params = convert(src, dst, name, settings)?;
    let pairs = settings.search().find(&params.calibration_set()?)?;
    save_pairs(dst.join(&settings.pairs_file), &pairs)?;
    Ok((params, pairs))
}
