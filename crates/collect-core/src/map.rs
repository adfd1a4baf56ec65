use crate::constants::{MAP_INFO_IMAGE_PREFIX, MAP_INFO_IMAGE_SUFFIX};

/// Map overlay and its point-of-interest info panel.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MapPanel {
    map_open: bool,
    info_index: Option<u32>,
}

/// Change the frontend should apply after a map interaction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapChange {
    ShowMap,
    HideMap,
    ShowInfo { image_src: String },
    HideInfo,
}

pub fn info_image_src(index: u32) -> String {
    format!("{MAP_INFO_IMAGE_PREFIX}{index}{MAP_INFO_IMAGE_SUFFIX}")
}

impl MapPanel {
    pub fn is_map_open(&self) -> bool {
        self.map_open
    }

    pub fn info_index(&self) -> Option<u32> {
        self.info_index
    }

    /// Open or close the map; closing it also closes the info panel.
    pub fn toggle_map(&mut self) -> Vec<MapChange> {
        if self.map_open {
            self.map_open = false;
            let mut changes = vec![MapChange::HideMap];
            changes.extend(self.hide_info());
            changes
        } else {
            self.map_open = true;
            vec![MapChange::ShowMap]
        }
    }

    /// Open the info panel for a POI's `data-index` attribute value.
    pub fn show_info(&mut self, data_index: &str) -> Option<MapChange> {
        let index = data_index.trim().parse::<u32>().ok()?;
        log::info!("[map] info panel #{}", index);
        self.info_index = Some(index);
        Some(MapChange::ShowInfo {
            image_src: info_image_src(index),
        })
    }

    pub fn hide_info(&mut self) -> Option<MapChange> {
        self.info_index.take().map(|_| MapChange::HideInfo)
    }
}
