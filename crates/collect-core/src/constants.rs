use std::time::Duration;

// Gameplay tuning shared by the web frontend and tests.

// Capture band, in the tracking scene's internal units (not meters).
pub const CAPTURE_BAND_MIN: f32 = 3000.0;
pub const CAPTURE_BAND_MAX: f32 = 6000.0;

// Absorbs single-frame found/lost flicker from the tracker
pub const TARGET_LOST_DEBOUNCE: Duration = Duration::from_millis(100);

// First-completion banner lifetime
pub const CELEBRATION_DISMISS_AFTER: Duration = Duration::from_secs(5);

// Storage and config layout
pub const SAVE_KEY_NAMESPACE: &str = "arCollectionSave";
pub const DEFAULT_VERSION: &str = "v1";
pub const VERSION_QUERY_PARAM: &str = "version";
pub const CONFIG_DIR: &str = "versions";
pub const CONFIG_FILE: &str = "config.json";

// Appended to the completion code when the set was finished in an earlier session
pub const COMPLETION_MARKER: &str = "-DONE";

// Map info panel artwork, `{index}` is the POI's 1-based data-index
pub const MAP_INFO_IMAGE_PREFIX: &str = "assets/ui/MapInfo_";
pub const MAP_INFO_IMAGE_SUFFIX: &str = ".png";
