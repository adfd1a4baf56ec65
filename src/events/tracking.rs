use crate::app::App;
use crate::constants::{TARGET_FOUND_EVENT, TARGET_LOST_EVENT};
use crate::dom;
use std::cell::RefCell;
use std::rc::Rc;

/// Route the tracker's per-entity found/lost events into the state machine.
pub fn wire_target_events(app: &Rc<RefCell<App>>) {
    let entities = app.borrow().scene.entities.clone();
    for (index, entity) in entities.iter().enumerate() {
        let app_found = app.clone();
        dom::add_event_listener(entity, TARGET_FOUND_EVENT, move || {
            app_found.borrow_mut().target_found(index);
        });

        let app_lost = app.clone();
        dom::add_event_listener(entity, TARGET_LOST_EVENT, move || {
            app_lost.borrow_mut().target_lost(index);
        });
    }
}
