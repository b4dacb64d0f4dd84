use std::sync::mpsc::TryRecvError;

use log::warn;

use crate::backend::LinkReceiver;

/// A value displayed in the UI that may have a pending update computed
/// on the backend thread. Poll with `try_update` once per frame.
#[derive(Debug)]
pub struct UIParameter<T> {
    pending_update_rx: Option<LinkReceiver<T>>,
    value: T,
}

impl<T: Clone> Clone for UIParameter<T> {
    fn clone(&self) -> Self {
        Self {
            pending_update_rx: None,
            value: self.value.clone(),
        }
    }
}

impl<T: Default + Clone> Default for UIParameter<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: Clone> UIParameter<T> {
    pub fn new(val: T) -> Self {
        UIParameter {
            pending_update_rx: None,
            value: val,
        }
    }

    pub fn try_update(&mut self) -> bool {
        if let Some(rx) = &self.pending_update_rx {
            match rx.try_recv() {
                Ok(val) => {
                    self.value = val;
                    self.pending_update_rx = None;
                    true
                }
                Err(err) => match err {
                    TryRecvError::Empty => false,
                    TryRecvError::Disconnected => {
                        warn!("Tried to receive message from closed channel.");
                        self.pending_update_rx = None;
                        true
                    }
                },
            }
        } else {
            false
        }
    }

    pub fn is_up_to_date(&self) -> bool {
        self.pending_update_rx.is_none()
    }

    pub fn set_recv(&mut self, rx: LinkReceiver<T>) {
        self.pending_update_rx = Some(rx);
    }

    pub fn value(&self) -> &T {
        &self.value
    }
}

impl<T: Clone> UIParameter<Option<T>> {
    /// Receive a pending one-shot result, if one arrived since the last
    /// poll. The stored value goes back to `None` once taken.
    pub fn take_if_updated(&mut self) -> Option<T> {
        if self.try_update() {
            self.value.take()
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::{BackendEventLoop, BackendLink, BackendRequest, BackendState};

    struct TestState {}
    impl BackendState for TestState {}

    #[test]
    fn test_value_updates_once_result_arrives() {
        let (_request_tx, request_rx) =
            std::sync::mpsc::channel::<Box<dyn BackendRequest<TestState>>>();
        let mut backend = BackendEventLoop::new(request_rx, TestState {});

        let mut param = UIParameter::new(0);
        let (rx, linker) =
            BackendLink::new("answer", |_: &mut BackendEventLoop<TestState>| 42);
        param.set_recv(rx);
        assert!(!param.is_up_to_date());
        assert!(!param.try_update());
        assert_eq!(*param.value(), 0);

        linker.run_on_backend(&mut backend);
        assert!(param.try_update());
        assert!(param.is_up_to_date());
        assert_eq!(*param.value(), 42);
    }

    #[test]
    fn test_debug_format_shows_pending_receiver() {
        let mut param = UIParameter::new(1);
        let (rx, _linker) =
            BackendLink::new("noop", |_: &mut BackendEventLoop<TestState>| 2);
        param.set_recv(rx);
        let formatted = format!("{param:?}");
        assert!(formatted.contains("LinkReceiver"));
    }
}
