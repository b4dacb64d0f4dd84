/// Compiled-in application defaults. Nothing is read from disk or the
/// environment; the app deliberately carries no persisted
/// configuration.
#[derive(Debug)]
pub struct Config {
    pub window_width: f32,
    pub window_height: f32,
    pub svg_width: u64,
    pub svg_height: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window_width: 1366.0,
            window_height: 768.0,
            svg_width: 800,
            svg_height: 600,
        }
    }
}
