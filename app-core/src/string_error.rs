//! Folding arbitrary errors into `String` at the UI boundary.
//!
//! The frontend reports failures in dialogs and log lines; it never
//! matches on error types. This extension keeps the conversion terse.

use std::fmt::Display;

pub trait ErrorStringExt<T> {
    /// Map the error into `"{context}: {error}"`.
    fn err_to_string(self, context: &str) -> Result<T, String>;
}

impl<T, E: Display> ErrorStringExt<T> for Result<T, E> {
    fn err_to_string(self, context: &str) -> Result<T, String> {
        self.map_err(|err| format!("{context}: {err}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_is_prefixed_with_context() {
        let res: Result<(), std::io::Error> = Err(std::io::Error::other("boom"));
        assert_eq!(
            res.err_to_string("failed to open"),
            Err("failed to open: boom".to_string())
        );
    }
}
