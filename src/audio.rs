use crate::constants::CAMERA_SOUND_ID;
use wasm_bindgen::JsCast;
use web_sys as web;

/// Restart and play the shutter sound. Missing or blocked audio is ignored.
pub fn play_capture_sound(document: &web::Document) {
    let Some(sound) = document
        .get_element_by_id(CAMERA_SOUND_ID)
        .and_then(|el| el.dyn_into::<web::HtmlAudioElement>().ok())
    else {
        return;
    };
    sound.set_current_time(0.0);
    if let Err(e) = sound.play() {
        log::debug!("[audio] capture sound not played: {:?}", e);
    }
}
