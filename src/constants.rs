// Element ids and selectors the page shell (index.html) provides.

// AR scene
pub const SCENE_ID: &str = "ar-scene";
pub const ASSETS_SELECTOR: &str = "a-assets";
pub const TARGET_FOUND_EVENT: &str = "targetFound";
pub const TARGET_LOST_EVENT: &str = "targetLost";
pub const TRACKER_ATTRIBUTE: &str = "mindar-image";
pub const TARGET_ATTRIBUTE: &str = "mindar-image-target";
pub const OVERLAY_CLASS: &str = "character-image";

// Gallery and capture
pub const THUMBNAILS_ID: &str = "thumbnails-container";
pub const THUMB_ID_PREFIX: &str = "thumb-";
pub const ASSET_ID_PREFIX: &str = "char-asset-";
pub const CAMERA_BUTTON_ID: &str = "camera-button";
pub const CAMERA_SOUND_ID: &str = "camera-sound";
pub const COMPLETION_CODE_ID: &str = "completion-code-container";
pub const CELEBRATION_ID: &str = "celebration-banner";
pub const RESET_BUTTON_ID: &str = "reset-button";

// Map
pub const MAP_BUTTON_ID: &str = "map-button";
pub const MAP_OVERLAY_ID: &str = "map-overlay";
pub const MAP_BACK_BUTTON_ID: &str = "map-back-button";
pub const MAP_POI_SELECTOR: &str = ".map-poi";
pub const MAP_POI_INDEX_ATTR: &str = "data-index";
pub const INFO_PANEL_OVERLAY_ID: &str = "info-panel-overlay";
pub const INFO_PANEL_IMAGE_ID: &str = "info-panel-image";
pub const INFO_PANEL_CLOSE_ID: &str = "info-panel-close";

pub const HIDDEN_CLASS: &str = "hidden";

// Thumbnails are dimmed by CSS until collected
pub const COLLECTED_OPACITY: &str = "1";

// User-facing text
pub const CELEBRATION_TEXT: &str = "Congratulations! You collected every card!";
pub const LOAD_FAILED_TEXT: &str = "AR failed to load. Please check the version setting.";
pub const RESET_CONFIRM_TEXT: &str = "Clear all collection progress and start over?";
pub const RESET_DONE_TEXT: &str = "Progress cleared. The page will now reload.";
