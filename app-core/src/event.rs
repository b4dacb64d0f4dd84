/// A deferred action on the application, processed once per frame by the
/// UI event queue.
///
/// Events that wait on something (a file dialog thread, a backend
/// request) return [`EventState::Busy`] and are re-queued for the next
/// frame instead of blocking the UI.
pub trait AppEvent {
    type App;
    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventState {
    Finished,
    Busy,
}
