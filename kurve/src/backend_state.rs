use std::path::Path;

use app_core::backend::BackendState;
use trace_import::PlottableData;

/// State owned by the backend event loop thread. File parsing runs
/// here so the UI never blocks on I/O.
#[derive(Default)]
pub struct BackendAppState {
    imports_run: usize,
}

impl BackendState for BackendAppState {}

/// Implementations of backend actions
impl BackendAppState {
    pub fn import_trace(&mut self, path: &Path) -> Result<PlottableData, String> {
        self.imports_run += 1;
        log::debug!("running import #{} for {:?}", self.imports_run, path);
        trace_import::import(path).map_err(|err| {
            log::error!("import of {:?} failed: {}", path, err);
            err.to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_error_is_folded_to_string() {
        let mut state = BackendAppState::default();
        let err = state
            .import_trace(Path::new("/no/such/file.csv"))
            .unwrap_err();
        assert!(err.contains("file not found"));
    }
}
