use crate::clock::{self, SessionClock};
use crate::overlay;
use crate::scene::SceneTargets;
use crate::storage::LocalStorage;
use collect_core::{CaptureOutcome, MapPanel, ProximityMachine, UiCommand};
use web_sys as web;

/// Everything the event handlers and the frame loop share.
pub struct App {
    pub document: web::Document,
    pub machine: ProximityMachine<LocalStorage>,
    pub scene: SceneTargets,
    pub map: MapPanel,
    clock: SessionClock,
    commands: Vec<UiCommand>,
}

impl App {
    pub fn new(
        document: web::Document,
        machine: ProximityMachine<LocalStorage>,
        scene: SceneTargets,
    ) -> Self {
        Self {
            document,
            machine,
            scene,
            map: MapPanel::default(),
            clock: SessionClock::new(),
            commands: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        let now = self.clock.elapsed();
        self.machine.start(now, clock::local_now(), &mut self.commands);
        self.flush();
    }

    pub fn target_found(&mut self, index: usize) {
        self.machine
            .on_target_found(index, self.clock.elapsed(), &mut self.commands);
        self.flush();
    }

    pub fn target_lost(&mut self, index: usize) {
        self.machine.on_target_lost(index, self.clock.elapsed());
    }

    pub fn tick(&mut self) {
        let now = self.clock.elapsed();
        self.machine.on_tick(now, &self.scene, &mut self.commands);
        self.flush();
    }

    pub fn capture(&mut self) {
        let now = self.clock.elapsed();
        let outcome = self
            .machine
            .on_capture_requested(now, clock::local_now(), &mut self.commands);
        if outcome == CaptureOutcome::Ignored {
            log::debug!("[capture] tap ignored; nothing capturable");
        }
        self.flush();
    }

    pub fn toggle_map(&mut self) {
        for change in self.map.toggle_map() {
            overlay::apply_map(&self.document, &change);
        }
    }

    pub fn show_info(&mut self, data_index: &str) {
        if let Some(change) = self.map.show_info(data_index) {
            overlay::apply_map(&self.document, &change);
        }
    }

    pub fn hide_info(&mut self) {
        if let Some(change) = self.map.hide_info() {
            overlay::apply_map(&self.document, &change);
        }
    }

    fn flush(&mut self) {
        for command in self.commands.drain(..) {
            overlay::apply(&self.document, &self.scene, &command);
        }
    }
}
