/// Presentation changes requested by the state machine.
///
/// The web frontend drains these each frame and applies them to the DOM and
/// the AR scene. Applying the same command twice is harmless.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UiCommand {
    ShowOverlay(usize),
    HideOverlay(usize),
    /// Show the capture button; tapping it would capture this item.
    ShowCaptureControl(usize),
    HideCaptureControl,
    MarkCollected(usize),
    PlayCaptureSound,
    ShowCompletionCode(String),
    ShowCelebration,
    HideCelebration,
}
