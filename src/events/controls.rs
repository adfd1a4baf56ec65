use crate::app::App;
use crate::constants::*;
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

pub fn wire_capture_button(document: &web::Document, app: &Rc<RefCell<App>>) {
    let app = app.clone();
    dom::add_click_listener(document, CAMERA_BUTTON_ID, move || {
        app.borrow_mut().capture();
    });
}

pub fn wire_map_controls(document: &web::Document, app: &Rc<RefCell<App>>) {
    for id in [MAP_BUTTON_ID, MAP_BACK_BUTTON_ID] {
        let app = app.clone();
        dom::add_click_listener(document, id, move || app.borrow_mut().toggle_map());
    }

    let app_close = app.clone();
    dom::add_click_listener(document, INFO_PANEL_CLOSE_ID, move || {
        app_close.borrow_mut().hide_info();
    });

    let Ok(pois) = document.query_selector_all(MAP_POI_SELECTOR) else {
        return;
    };
    for i in 0..pois.length() {
        let Some(node) = pois.item(i) else {
            continue;
        };
        let Some(data_index) = node
            .dyn_ref::<web::Element>()
            .and_then(|el| el.get_attribute(MAP_POI_INDEX_ATTR))
        else {
            log::warn!("[map] POI button without {}", MAP_POI_INDEX_ATTR);
            continue;
        };
        let app = app.clone();
        dom::add_event_listener(&node, "click", move || {
            app.borrow_mut().show_info(&data_index);
        });
    }
}

/// Reset is destructive: confirm, wipe saved progress, reload.
pub fn wire_reset_button(document: &web::Document, app: &Rc<RefCell<App>>) {
    dom::set_display_by_id(document, RESET_BUTTON_ID, true);
    let app = app.clone();
    dom::add_click_listener(document, RESET_BUTTON_ID, move || {
        if !dom::confirm(RESET_CONFIRM_TEXT) {
            return;
        }
        if let Err(e) = app.borrow_mut().machine.reset_progress() {
            log::error!("[progress] reset failed: {}", e);
            return;
        }
        dom::alert(RESET_DONE_TEXT);
        dom::reload();
    });
}
