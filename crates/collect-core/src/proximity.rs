//! Proximity and capture state machine.
//!
//! The tracker reports found/lost per marker; once per frame the active
//! marker's distance decides whether its overlay is visible and whether the
//! capture button is offered. Capturing writes through to the
//! [`ProgressStore`] before returning.
//!
//! Every entry point appends the presentation changes it wants to `out`
//! instead of touching the DOM, so the whole machine runs on the host.

use crate::commands::UiCommand;
use crate::completion::{completion_code, CompletionOutcome};
use crate::constants::{
    CAPTURE_BAND_MAX, CAPTURE_BAND_MIN, CELEBRATION_DISMISS_AFTER, TARGET_LOST_DEBOUNCE,
};
use crate::error::ProgressError;
use crate::progress::{CollectionRecord, ProgressStore};
use crate::storage::KeyValueStore;
use crate::timer::ScheduledTask;
use chrono::NaiveDateTime;
use glam::Vec3;
use std::time::Duration;

/// Source of per-target world positions, read once per tick.
pub trait TargetPoses {
    fn world_position(&self, index: usize) -> Option<Vec3>;
}

impl<F> TargetPoses for F
where
    F: Fn(usize) -> Option<Vec3>,
{
    fn world_position(&self, index: usize) -> Option<Vec3> {
        self(index)
    }
}

/// Inclusive distance range in which a target can be captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DistanceBand {
    pub min: f32,
    pub max: f32,
}

impl Default for DistanceBand {
    fn default() -> Self {
        Self {
            min: CAPTURE_BAND_MIN,
            max: CAPTURE_BAND_MAX,
        }
    }
}

impl DistanceBand {
    #[inline]
    pub fn contains(&self, distance: f32) -> bool {
        distance >= self.min && distance <= self.max
    }
}

/// Distance of a world position from the scene origin.
#[inline]
pub fn target_distance(world_position: Vec3) -> f32 {
    world_position.length()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TrackedTarget {
    pub index: usize,
    pub tracked: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// No capturable target, or it was already captured.
    Ignored,
    Captured {
        index: usize,
        captured_count: usize,
        completion: CompletionOutcome,
    },
}

pub struct ProximityMachine<S: KeyValueStore> {
    progress: ProgressStore<S>,
    record: CollectionRecord,
    captured_count: usize,
    completed_before_session: bool,
    band: DistanceBand,
    targets: Vec<TrackedTarget>,
    active_entity: Option<usize>,
    active_target: Option<usize>,
    lost_debounce: ScheduledTask<usize>,
    celebration_dismiss: ScheduledTask<()>,
}

impl<S: KeyValueStore> ProximityMachine<S> {
    /// Load saved progress for `item_count` targets.
    pub fn new(mut progress: ProgressStore<S>, item_count: usize) -> Self {
        let record = progress.load(item_count);
        let captured_count = record.captured_count();
        let completed_before_session = record.completed_ever;
        let targets = (0..item_count)
            .map(|index| TrackedTarget {
                index,
                tracked: false,
            })
            .collect();
        Self {
            progress,
            record,
            captured_count,
            completed_before_session,
            band: DistanceBand::default(),
            targets,
            active_entity: None,
            active_target: None,
            lost_debounce: ScheduledTask::new(),
            celebration_dismiss: ScheduledTask::new(),
        }
    }

    /// Replay loaded progress to the UI and run the initial completion check.
    pub fn start(
        &mut self,
        now: Duration,
        local_now: NaiveDateTime,
        out: &mut Vec<UiCommand>,
    ) -> CompletionOutcome {
        for (index, captured) in self.record.items.iter().enumerate() {
            if *captured {
                out.push(UiCommand::MarkCollected(index));
            }
        }
        self.check_completion(now, local_now, true, out)
    }

    pub fn on_target_found(&mut self, index: usize, now: Duration, out: &mut Vec<UiCommand>) {
        if index >= self.targets.len() {
            log::warn!("[target] found event for unknown target #{}", index);
            return;
        }
        log::info!("[target] found #{}", index);
        // an expired debounce has already lost its target
        self.poll_timers(now, out);
        self.lost_debounce.cancel();

        if let Some(prev) = self.active_entity.filter(|prev| *prev != index) {
            // the previous target's debounce was just cancelled; retire it now
            self.targets[prev].tracked = false;
            out.push(UiCommand::HideOverlay(prev));
            self.hide_capture_control(out);
        }

        self.targets[index].tracked = true;
        self.active_entity = Some(index);
    }

    pub fn on_target_lost(&mut self, index: usize, now: Duration) {
        if index >= self.targets.len() {
            log::warn!("[target] lost event for unknown target #{}", index);
            return;
        }
        log::info!("[target] lost #{}", index);
        if self.active_entity == Some(index) {
            self.lost_debounce.schedule(now, TARGET_LOST_DEBOUNCE, index);
        } else {
            self.targets[index].tracked = false;
        }
    }

    /// Per-frame update: fire due timers, then re-evaluate the active target.
    pub fn on_tick(&mut self, now: Duration, poses: &impl TargetPoses, out: &mut Vec<UiCommand>) {
        self.poll_timers(now, out);

        let Some(index) = self.active_entity else {
            return;
        };

        let in_band = poses
            .world_position(index)
            .map(target_distance)
            .is_some_and(|d| self.band.contains(d));

        if in_band {
            out.push(UiCommand::ShowOverlay(index));
            if self.record.is_captured(index) {
                self.hide_capture_control(out);
            } else {
                self.active_target = Some(index);
                out.push(UiCommand::ShowCaptureControl(index));
            }
        } else {
            out.push(UiCommand::HideOverlay(index));
            self.hide_capture_control(out);
        }
    }

    /// Capture the active target, persisting before returning.
    pub fn on_capture_requested(
        &mut self,
        now: Duration,
        local_now: NaiveDateTime,
        out: &mut Vec<UiCommand>,
    ) -> CaptureOutcome {
        self.poll_timers(now, out);
        let Some(index) = self.active_target else {
            return CaptureOutcome::Ignored;
        };
        match self.record.items.get_mut(index) {
            Some(slot) if !*slot => *slot = true,
            _ => return CaptureOutcome::Ignored,
        }
        self.captured_count += 1;
        log::info!(
            "[capture] collected #{} ({}/{})",
            index + 1,
            self.captured_count,
            self.total()
        );

        out.push(UiCommand::MarkCollected(index));
        self.persist();
        let completion = self.check_completion(now, local_now, false, out);
        out.push(UiCommand::PlayCaptureSound);
        self.hide_capture_control(out);

        CaptureOutcome::Captured {
            index,
            captured_count: self.captured_count,
            completion,
        }
    }

    /// Remove saved progress. The session must be restarted afterwards.
    pub fn reset_progress(&mut self) -> Result<(), ProgressError> {
        self.progress.reset()
    }

    pub fn record(&self) -> &CollectionRecord {
        &self.record
    }

    pub fn captured_count(&self) -> usize {
        self.captured_count
    }

    pub fn total(&self) -> usize {
        self.record.items.len()
    }

    pub fn active_entity(&self) -> Option<usize> {
        self.active_entity
    }

    pub fn active_target(&self) -> Option<usize> {
        self.active_target
    }

    pub fn target(&self, index: usize) -> Option<&TrackedTarget> {
        self.targets.get(index)
    }

    pub fn lost_debounce_pending(&self) -> bool {
        self.lost_debounce.is_pending()
    }

    pub fn celebration_pending(&self) -> bool {
        self.celebration_dismiss.is_pending()
    }

    pub fn progress(&self) -> &ProgressStore<S> {
        &self.progress
    }

    fn poll_timers(&mut self, now: Duration, out: &mut Vec<UiCommand>) {
        if let Some(index) = self.lost_debounce.take_due(now) {
            if self.active_entity == Some(index) {
                self.active_entity = None;
                self.targets[index].tracked = false;
                out.push(UiCommand::HideOverlay(index));
                self.hide_capture_control(out);
            }
        }
        if self.celebration_dismiss.take_due(now).is_some() {
            out.push(UiCommand::HideCelebration);
        }
    }

    fn check_completion(
        &mut self,
        now: Duration,
        local_now: NaiveDateTime,
        initial_load: bool,
        out: &mut Vec<UiCommand>,
    ) -> CompletionOutcome {
        if self.captured_count != self.total() {
            return CompletionOutcome::Incomplete;
        }

        let code = completion_code(local_now, self.completed_before_session);
        let outcome = if self.record.completed_ever {
            if !initial_load {
                log::info!("[capture] collection complete again");
            }
            CompletionOutcome::AlreadyCompleted { code: code.clone() }
        } else {
            self.record.completed_ever = true;
            self.persist();
            log::info!("[capture] collection complete for the first time");
            out.push(UiCommand::ShowCelebration);
            self.celebration_dismiss.schedule(now, CELEBRATION_DISMISS_AFTER, ());
            CompletionOutcome::FirstCompletion { code: code.clone() }
        };
        out.push(UiCommand::ShowCompletionCode(code));
        outcome
    }

    fn hide_capture_control(&mut self, out: &mut Vec<UiCommand>) {
        self.active_target = None;
        out.push(UiCommand::HideCaptureControl);
    }

    fn persist(&mut self) {
        if let Err(e) = self.progress.save(&self.record) {
            log::error!("[progress] save failed: {}", e);
        }
    }
}
