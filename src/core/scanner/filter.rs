//! Extension and hidden-entry filtering for the scanner.

use std::path::Path;

/// Extensions the `image` crate is built to decode here
const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp", "gif", "tiff", "tif", "webp"];

/// Decides which directory entries the scanner picks up
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilter {
    include_hidden: bool,
}

impl ImageFilter {
    /// Accept the default extensions, skipping dot-files
    pub fn new() -> Self {
        Self::default()
    }

    /// Also accept entries whose name starts with `.`
    pub fn with_hidden(mut self, include: bool) -> Self {
        self.include_hidden = include;
        self
    }

    /// Whether an entry called `name` is hidden and should be skipped
    pub fn skips_hidden(&self, name: &str) -> bool {
        !self.include_hidden && name.starts_with('.')
    }

    /// Whether `path` names an image file the scanner should return
    pub fn should_include(&self, path: &Path) -> bool {
        let hidden = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| self.skips_hidden(name));
        !hidden && has_image_extension(path)
    }
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}
