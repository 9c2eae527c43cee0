use crate::error::{io_error, DatasetError, Result};
use log::*;
use std::ffi::OsString;
use std::fs;
use std::path::Path;

const IMAGE_EXTENSIONS: [&str; 3] = [".png", ".jpg", ".jpeg"];

/// Copies the per-view images and masks of a capture into `dst_dir`.
///
/// View directories are the entries of `src_dir` whose name starts with `view`
/// (ignoring case), taken in sorted order. Their images go to `dst_dir/img/<view>/` and
/// the optional mask `src_dir/mask/<view>.png` goes to `dst_dir/mask/<view>.png`.
///
/// Returns the number of views and the `[height, width]` of the first image.
pub fn copy_images(
    src_dir: impl AsRef<Path>,
    dst_dir: impl AsRef<Path>,
) -> Result<(usize, [u32; 2])> {
    let src_dir = src_dir.as_ref();
    let dst_dir = dst_dir.as_ref();

    let views: Vec<OsString> = sorted_entries(src_dir)?
        .into_iter()
        .filter(|name| name.to_string_lossy().to_lowercase().starts_with("view"))
        .filter(|name| src_dir.join(name).is_dir())
        .collect();
    if views.is_empty() {
        return Err(DatasetError::NoViewDirectories(src_dir.to_owned()));
    }

    let img_dir = dst_dir.join("img");
    let mask_dir = dst_dir.join("mask");
    fs::create_dir_all(&img_dir).map_err(io_error(&img_dir))?;
    fs::create_dir_all(&mask_dir).map_err(io_error(&mask_dir))?;

    let mut imhw = None;
    for view in &views {
        let src_view = src_dir.join(view);
        let dst_view = img_dir.join(view);
        fs::create_dir_all(&dst_view).map_err(io_error(&dst_view))?;

        let mut copied = 0;
        for name in sorted_entries(&src_view)? {
            let lower = name.to_string_lossy().to_lowercase();
            if !IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext)) {
                continue;
            }
            let src = src_view.join(&name);
            let dst = dst_view.join(&name);
            fs::copy(&src, &dst).map_err(io_error(&src))?;
            copied += 1;
            if imhw.is_none() {
                let (width, height) =
                    image::image_dimensions(&src).map_err(|source| DatasetError::Image {
                        path: src.clone(),
                        source,
                    })?;
                imhw = Some([height, width]);
            }
        }
        debug!("copied {} images of {}", copied, view.to_string_lossy());

        let mut mask_name = view.clone();
        mask_name.push(".png");
        let src_mask = src_dir.join("mask").join(&mask_name);
        if src_mask.is_file() {
            let dst_mask = mask_dir.join(&mask_name);
            fs::copy(&src_mask, &dst_mask).map_err(io_error(&src_mask))?;
        } else {
            warn!("no mask found for {}", view.to_string_lossy());
        }
    }

    let imhw = imhw.ok_or_else(|| DatasetError::NoImages(src_dir.to_owned()))?;
    info!(
        "copied {} views of {}x{} images",
        views.len(),
        imhw[1],
        imhw[0]
    );
    Ok((views.len(), imhw))
}

/// The names of the entries of `dir`, sorted.
pub(crate) fn sorted_entries(dir: &Path) -> Result<Vec<OsString>> {
    let mut names = fs::read_dir(dir)
        .map_err(io_error(dir))?
        .map(|entry| entry.map(|entry| entry.file_name()))
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(io_error(dir))?;
    names.sort();
    Ok(names)
}
