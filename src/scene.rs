//! Builds the gallery thumbnails and the AR target entities for a version,
//! and reads tracked target poses back out of the A-Frame scene graph.

use crate::constants::*;
use crate::dom;
use crate::pose;
use collect_core::{TargetPoses, VersionConfig};
use glam::Vec3;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

/// One `mindar-image-target` entity per collectible plus its overlay image.
pub struct SceneTargets {
    pub entities: Vec<web::Element>,
    pub overlays: Vec<web::Element>,
}

pub fn thumb_id(index: usize) -> String {
    format!("{THUMB_ID_PREFIX}{index}")
}

fn asset_id(index: usize) -> String {
    format!("{ASSET_ID_PREFIX}{index}")
}

pub fn build(document: &web::Document, config: &VersionConfig) -> anyhow::Result<SceneTargets> {
    let scene_el = element_by_id(document, SCENE_ID)?;
    let assets_el = document
        .query_selector(ASSETS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", ASSETS_SELECTOR))?;
    let thumbnails = element_by_id(document, THUMBNAILS_ID)?;

    let mut entities = Vec::with_capacity(config.item_count());
    let mut overlays = Vec::with_capacity(config.item_count());
    for (index, character) in config.characters.iter().enumerate() {
        let thumb = create(document, "img")?;
        thumb.set_id(&thumb_id(index));
        thumb.set_class_name("thumbnail");
        attr(&thumb, "src", &character.thumb)?;
        append(&thumbnails, &thumb)?;

        let asset = create(document, "img")?;
        asset.set_id(&asset_id(index));
        attr(&asset, "src", &character.overlay)?;
        append(&assets_el, &asset)?;

        let entity = create(document, "a-entity")?;
        attr(&entity, TARGET_ATTRIBUTE, &format!("targetIndex: {index}"))?;

        let overlay = create(document, "a-image")?;
        overlay.set_class_name(OVERLAY_CLASS);
        attr(&overlay, "src", &format!("#{}", asset_id(index)))?;
        attr(&overlay, "position", "0 0 0")?;
        attr(&overlay, "height", "1")?;
        attr(&overlay, "width", "1")?;
        attr(&overlay, "rotation", "0 0 0")?;
        attr(&overlay, "visible", "false")?;
        append(&entity, &overlay)?;

        append(&scene_el, &entity)?;
        entities.push(entity);
        overlays.push(overlay);
    }
    log::info!("[scene] built {} targets", entities.len());
    Ok(SceneTargets { entities, overlays })
}

/// Start the tracker. Must run after every target entity is in the scene.
pub fn enable_tracker(document: &web::Document, config: &VersionConfig) -> anyhow::Result<()> {
    let scene_el = element_by_id(document, SCENE_ID)?;
    attr(&scene_el, TRACKER_ATTRIBUTE, &config.tracker_attribute())
}

impl SceneTargets {
    pub fn set_overlay_visible(&self, index: usize, visible: bool) {
        if let Some(overlay) = self.overlays.get(index) {
            _ = overlay.set_attribute("visible", if visible { "true" } else { "false" });
        }
    }

    pub fn mark_collected(&self, document: &web::Document, index: usize) {
        if let Some(thumb) = document.get_element_by_id(&thumb_id(index)) {
            dom::set_style(&thumb, "opacity", COLLECTED_OPACITY);
        }
    }
}

impl TargetPoses for SceneTargets {
    fn world_position(&self, index: usize) -> Option<Vec3> {
        let entity = self.entities.get(index)?;
        let object3d = js_sys::Reflect::get(entity, &JsValue::from_str("object3D")).ok()?;
        refresh_world_matrix(&object3d);
        let matrix = js_sys::Reflect::get(&object3d, &JsValue::from_str("matrixWorld")).ok()?;
        let elements = js_sys::Reflect::get(&matrix, &JsValue::from_str("elements")).ok()?;
        let elements: Vec<f32> = if let Some(typed) = elements.dyn_ref::<js_sys::Float32Array>() {
            typed.to_vec()
        } else {
            let array = elements.dyn_into::<js_sys::Array>().ok()?;
            array
                .iter()
                .map(|v| v.as_f64().unwrap_or(f64::NAN) as f32)
                .collect()
        };
        pose::world_position_from_elements(&elements)
    }
}

/// The tracker moves the anchor after the renderer's last matrix update, so
/// recompute the world matrix from the ancestors before reading it.
fn refresh_world_matrix(object3d: &JsValue) {
    let update = js_sys::Reflect::get(object3d, &JsValue::from_str("updateWorldMatrix"))
        .ok()
        .and_then(|f| f.dyn_into::<js_sys::Function>().ok());
    match update {
        Some(update) => {
            if let Err(e) = update.call2(object3d, &JsValue::TRUE, &JsValue::FALSE) {
                log::warn!("[scene] updateWorldMatrix failed: {:?}", e);
            }
        }
        None => log::debug!("[scene] object3D has no updateWorldMatrix"),
    }
}

fn element_by_id(document: &web::Document, id: &str) -> anyhow::Result<web::Element> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", id))
}

fn create(document: &web::Document, tag: &str) -> anyhow::Result<web::Element> {
    document
        .create_element(tag)
        .map_err(|e| anyhow::anyhow!("create <{}>: {:?}", tag, e))
}

fn attr(el: &web::Element, name: &str, value: &str) -> anyhow::Result<()> {
    el.set_attribute(name, value)
        .map_err(|e| anyhow::anyhow!("set {}: {:?}", name, e))
}

fn append(parent: &web::Element, child: &web::Element) -> anyhow::Result<()> {
    parent
        .append_child(child)
        .map(|_| ())
        .map_err(|e| anyhow::anyhow!("append: {:?}", e))
}
