//! Per-version content configuration and the one-step fallback used when a
//! requested version cannot be loaded.

use crate::constants::{CONFIG_DIR, CONFIG_FILE, DEFAULT_VERSION, SAVE_KEY_NAMESPACE};
use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::future::Future;

/// Content version identifier, e.g. `v1`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct VersionId(String);

impl Default for VersionId {
    fn default() -> Self {
        Self(DEFAULT_VERSION.to_string())
    }
}

impl fmt::Display for VersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl VersionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Version from the `version` query parameter; blank or missing means default.
    pub fn from_query_value(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if !v.is_empty() => Self(v.to_string()),
            _ => Self::default(),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_default(&self) -> bool {
        self.0 == DEFAULT_VERSION
    }

    pub fn config_path(&self) -> String {
        format!("{CONFIG_DIR}/{}/{CONFIG_FILE}", self.0)
    }

    pub fn save_key(&self) -> String {
        format!("{SAVE_KEY_NAMESPACE}_{}", self.0)
    }
}

/// One collectible: gallery thumbnail and the overlay shown on its marker.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterEntry {
    pub thumb: String,
    #[serde(rename = "char")]
    pub overlay: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionConfig {
    pub characters: Vec<CharacterEntry>,
    /// Compiled marker database for the tracker.
    pub mind_file: String,
    #[serde(default = "default_max_track")]
    pub max_track: u32,
}

fn default_max_track() -> u32 {
    1
}

impl VersionConfig {
    pub fn parse(path: &str, text: &str) -> Result<Self, ConfigError> {
        let config: VersionConfig =
            serde_json::from_str(text).map_err(|e| ConfigError::Parse {
                path: path.to_string(),
                reason: e.to_string(),
            })?;
        if config.characters.is_empty() {
            return Err(ConfigError::Empty {
                path: path.to_string(),
            });
        }
        Ok(config)
    }

    pub fn item_count(&self) -> usize {
        self.characters.len()
    }

    /// Value for the scene's `mindar-image` attribute.
    pub fn tracker_attribute(&self) -> String {
        format!(
            "imageTargetSrc: {}; maxTrack: {};",
            self.mind_file, self.max_track
        )
    }
}

/// Load `requested`, substituting the default version once if it fails.
///
/// Returns the version actually loaded alongside its config. `on_fallback`
/// runs once the requested version has failed and before the default is
/// fetched. A failing default version is not retried.
pub async fn load_with_fallback<F, Fut, N>(
    requested: VersionId,
    mut fetch: F,
    on_fallback: N,
) -> Result<(VersionId, VersionConfig), ConfigError>
where
    F: FnMut(VersionId) -> Fut,
    Fut: Future<Output = Result<VersionConfig, ConfigError>>,
    N: FnOnce(&VersionId, &ConfigError),
{
    let requested_error = match fetch(requested.clone()).await {
        Ok(config) => return Ok((requested, config)),
        Err(e) => e,
    };
    if requested.is_default() {
        return Err(requested_error);
    }

    let fallback = VersionId::default();
    log::warn!(
        "[config] version {} unavailable ({}); falling back to {}",
        requested,
        requested_error,
        fallback
    );
    on_fallback(&requested, &requested_error);
    match fetch(fallback.clone()).await {
        Ok(config) => Ok((fallback, config)),
        Err(fallback_error) => Err(ConfigError::FallbackFailed {
            requested: requested.to_string(),
            requested_error: Box::new(requested_error),
            fallback: fallback.to_string(),
            fallback_error: Box::new(fallback_error),
        }),
    }
}
