//! Decodes discovered files into RGBA buffers.

use crate::error::LoadError;
use crate::events::{Event, EventSender, LoadEvent};
use image::RgbaImage;
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// A decoded image and where it came from
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub path: PathBuf,
    pub image: RgbaImage,
}

/// Result of loading a batch of files
#[derive(Debug, Default)]
pub struct LoadResult {
    /// Decoded images, in the same order as the input files
    pub images: Vec<LoadedImage>,
    /// Files that could not be decoded
    pub errors: Vec<LoadError>,
}

/// Decode a single file
pub fn load_image(path: &Path) -> Result<LoadedImage, LoadError> {
    let image = image::open(path).map_err(|e| LoadError::Decode {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    Ok(LoadedImage {
        path: path.to_path_buf(),
        image: image.to_rgba8(),
    })
}

/// Decode every file in parallel. Failures are collected, not fatal.
pub fn load_images(files: &[PathBuf], events: &EventSender) -> LoadResult {
    events.send(Event::Load(LoadEvent::Started {
        total_files: files.len(),
    }));

    let decoded: Vec<Result<LoadedImage, LoadError>> = files
        .par_iter()
        .map(|path| {
            let loaded = load_image(path);
            match &loaded {
                Ok(image) => events.send(Event::Load(LoadEvent::ImageLoaded {
                    path: image.path.clone(),
                })),
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "failed to decode");
                    events.send(Event::Load(LoadEvent::Error {
                        path: path.clone(),
                        message: e.to_string(),
                    }));
                }
            }
            loaded
        })
        .collect();

    let mut result = LoadResult::default();
    for entry in decoded {
        match entry {
            Ok(image) => result.images.push(image),
            Err(e) => result.errors.push(e),
        }
    }

    debug!(
        images = result.images.len(),
        errors = result.errors.len(),
        "loading complete"
    );
    events.send(Event::Load(LoadEvent::Completed {
        total_images: result.images.len(),
    }));

    result
}
