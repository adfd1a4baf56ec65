use crate::audio;
use crate::constants::*;
use crate::dom;
use crate::scene::SceneTargets;
use collect_core::{MapChange, UiCommand};
use web_sys as web;

/// Apply one state-machine command to the page.
pub fn apply(document: &web::Document, targets: &SceneTargets, command: &UiCommand) {
    match command {
        UiCommand::ShowOverlay(i) => targets.set_overlay_visible(*i, true),
        UiCommand::HideOverlay(i) => targets.set_overlay_visible(*i, false),
        UiCommand::ShowCaptureControl(_) => dom::set_display_by_id(document, CAMERA_BUTTON_ID, true),
        UiCommand::HideCaptureControl => dom::set_display_by_id(document, CAMERA_BUTTON_ID, false),
        UiCommand::MarkCollected(i) => targets.mark_collected(document, *i),
        UiCommand::PlayCaptureSound => audio::play_capture_sound(document),
        UiCommand::ShowCompletionCode(code) => show_completion_code(document, code),
        UiCommand::ShowCelebration => show_celebration(document),
        UiCommand::HideCelebration => dom::set_display_by_id(document, CELEBRATION_ID, false),
    }
}

pub fn apply_map(document: &web::Document, change: &MapChange) {
    match change {
        MapChange::ShowMap => dom::set_hidden_by_id(document, MAP_OVERLAY_ID, false),
        MapChange::HideMap => dom::set_hidden_by_id(document, MAP_OVERLAY_ID, true),
        MapChange::ShowInfo { image_src } => {
            if let Some(img) = document.get_element_by_id(INFO_PANEL_IMAGE_ID) {
                _ = img.set_attribute("src", image_src);
            }
            dom::set_hidden_by_id(document, INFO_PANEL_OVERLAY_ID, false);
        }
        MapChange::HideInfo => {
            dom::set_hidden_by_id(document, INFO_PANEL_OVERLAY_ID, true);
            // drop the image so it can be released
            if let Some(img) = document.get_element_by_id(INFO_PANEL_IMAGE_ID) {
                _ = img.set_attribute("src", "");
            }
        }
    }
}

fn show_completion_code(document: &web::Document, code: &str) {
    if let Some(el) = document.get_element_by_id(COMPLETION_CODE_ID) {
        el.set_text_content(Some(code));
        dom::set_style(&el, "display", "block");
    }
}

fn show_celebration(document: &web::Document) {
    let el = match document.get_element_by_id(CELEBRATION_ID) {
        Some(el) => el,
        None => {
            let Some(body) = document.body() else {
                return;
            };
            let Ok(el) = document.create_element("div") else {
                return;
            };
            el.set_id(CELEBRATION_ID);
            _ = el.set_attribute(
                "style",
                "position: fixed; top: 20%; left: 50%; transform: translateX(-50%); padding: 16px 24px; background: rgba(20, 24, 40, 0.9); color: #ffe27a; font: 18px system-ui; border-radius: 8px; z-index: 1000;",
            );
            el.set_text_content(Some(CELEBRATION_TEXT));
            _ = body.append_child(&el);
            el
        }
    };
    dom::set_style(&el, "display", "block");
}

/// Fatal init failure: no partial UI, just the banner.
pub fn show_error_banner(document: &web::Document) {
    let (Some(body), Ok(el)) = (document.body(), document.create_element("div")) else {
        return;
    };
    _ = el.set_attribute(
        "style",
        "position: fixed; top: 10px; left: 10px; padding: 10px; background: red; color: white; z-index: 1000;",
    );
    el.set_text_content(Some(LOAD_FAILED_TEXT));
    _ = body.append_child(&el);
}
