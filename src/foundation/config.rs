use std::path::PathBuf;

/// Runtime settings for stores and thumbnails.
///
/// Defaults can be overridden from the environment with [`Settings::from_env`]:
///
/// - `FRAMEMARK_STORE_DIR`: directory used by [`crate::JsonDirStore`].
/// - `FRAMEMARK_THUMBNAIL_QUALITY`: JPEG quality in `1..=100`.
/// - `FRAMEMARK_THUMBNAIL_MAX_WIDTH`: thumbnails wider than this are downscaled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Settings {
    pub store_dir: PathBuf,
    pub thumbnail_quality: u8,
    pub thumbnail_max_width: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("annotations"),
            thumbnail_quality: 30,
            thumbnail_max_width: 480,
        }
    }
}

impl Settings {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let store_dir = lookup("FRAMEMARK_STORE_DIR")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.store_dir);
        let thumbnail_quality = lookup("FRAMEMARK_THUMBNAIL_QUALITY")
            .and_then(|v| v.parse::<u8>().ok())
            .filter(|&q| (1..=100).contains(&q))
            .unwrap_or(defaults.thumbnail_quality);
        let thumbnail_max_width = lookup("FRAMEMARK_THUMBNAIL_MAX_WIDTH")
            .and_then(|v| v.parse::<u32>().ok())
            .filter(|&w| w > 0)
            .unwrap_or(defaults.thumbnail_max_width);
        Self {
            store_dir,
            thumbnail_quality,
            thumbnail_max_width,
        }
    }
}
