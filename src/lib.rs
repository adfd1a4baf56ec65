#![cfg(target_arch = "wasm32")]
use collect_core::constants::VERSION_QUERY_PARAM;
use collect_core::{load_with_fallback, ProgressStore, ProximityMachine, VersionId};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;

mod app;
mod audio;
mod clock;
mod constants;
mod dom;
mod events;
mod fetch;
mod frame;
mod overlay;
mod pose;
mod scene;
mod storage;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("collect-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error_banner(&document);
            }
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;

    let requested = VersionId::from_query_value(dom::query_param(VERSION_QUERY_PARAM).as_deref());
    let (version, config) = load_with_fallback(requested, fetch::fetch_config, |failed, _| {
        dom::alert(&format!(
            "Version '{}' could not be loaded. Trying default version '{}'.",
            failed,
            VersionId::default()
        ));
    })
    .await?;
    log::info!(
        "[config] version {} with {} characters",
        version,
        config.item_count()
    );

    let storage = storage::LocalStorage::open()?;
    let progress = ProgressStore::new(storage, version.save_key());
    let machine = ProximityMachine::new(progress, config.item_count());

    let scene = scene::build(&document, &config)?;
    let app = Rc::new(RefCell::new(app::App::new(document.clone(), machine, scene)));

    events::tracking::wire_target_events(&app);
    events::controls::wire_capture_button(&document, &app);
    events::controls::wire_map_controls(&document, &app);

    // entities must all exist before the tracker starts
    scene::enable_tracker(&document, &config)?;

    events::controls::wire_reset_button(&document, &app);
    app.borrow_mut().start();
    frame::start_loop(app);

    Ok(())
}
