use egui::Color32;
use trace_import::{PlotKind, PlottableData, Series};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisScale {
    Linear,
    Log,
}

/// The mutable visual configuration of the chart, owned by the
/// application root. Every control callback goes through exactly one
/// named mutator here; no widget reads another widget's raw value.
///
/// Invariant: at least one series exists at all times.
pub struct PlotState {
    title: String,
    x_label: String,
    y_label: String,
    x_scale: AxisScale,
    y_scale: AxisScale,
    grid_visible: bool,
    markers_visible: bool,
    line_color: Color32,
    line_width: f32,
    kind: PlotKind,
    series: Vec<Series>,
    categories: Vec<String>,
    // Set by every mutator, taken by the frame loop to request a
    // repaint.
    dirty: bool,
    // Set on replace_series, taken by the plot view to auto-rescale
    // the axis limits.
    reset_view: bool,
}

impl Default for PlotState {
    fn default() -> Self {
        Self {
            title: String::new(),
            x_label: "x".to_string(),
            y_label: "y".to_string(),
            x_scale: AxisScale::Linear,
            y_scale: AxisScale::Linear,
            grid_visible: false,
            markers_visible: false,
            line_color: Color32::from_rgb(31, 119, 180),
            line_width: 1.5,
            kind: PlotKind::Lines,
            series: vec![default_series()],
            categories: Vec::new(),
            dirty: true,
            reset_view: true,
        }
    }
}

/// The quadratic the app starts up with.
fn default_series() -> Series {
    Series {
        name: "x²".to_string(),
        color: trace_import::Rgb(31, 119, 180),
        points: (-10..10).map(|x| [x as f64, (x * x) as f64]).collect(),
    }
}

impl PlotState {
    pub fn title(&self) -> &str {
        &self.title
    }
    pub fn x_label(&self) -> &str {
        &self.x_label
    }
    pub fn y_label(&self) -> &str {
        &self.y_label
    }
    pub fn x_scale(&self) -> AxisScale {
        self.x_scale
    }
    pub fn y_scale(&self) -> AxisScale {
        self.y_scale
    }
    pub fn grid_visible(&self) -> bool {
        self.grid_visible
    }
    pub fn markers_visible(&self) -> bool {
        self.markers_visible
    }
    pub fn line_color(&self) -> Color32 {
        self.line_color
    }
    pub fn line_width(&self) -> f32 {
        self.line_width
    }
    pub fn kind(&self) -> PlotKind {
        self.kind
    }
    pub fn series(&self) -> &[Series] {
        &self.series
    }
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn set_title(&mut self, text: &str) {
        self.title = text.to_string();
        self.dirty = true;
    }

    pub fn set_x_label(&mut self, text: &str) {
        self.x_label = text.to_string();
        self.dirty = true;
    }

    pub fn set_y_label(&mut self, text: &str) {
        self.y_label = text.to_string();
        self.dirty = true;
    }

    pub fn set_x_scale(&mut self, scale: AxisScale) {
        self.x_scale = scale;
        self.dirty = true;
    }

    pub fn set_y_scale(&mut self, scale: AxisScale) {
        self.y_scale = scale;
        self.dirty = true;
    }

    pub fn set_grid_visible(&mut self, visible: bool) {
        self.grid_visible = visible;
        self.dirty = true;
    }

    pub fn set_markers_visible(&mut self, visible: bool) {
        self.markers_visible = visible;
        self.dirty = true;
    }

    /// Applies to the primary (first) series only; imported RGB series
    /// keep their literal colors.
    pub fn set_line_color(&mut self, color: Color32) {
        self.line_color = color;
        self.dirty = true;
    }

    /// Negative widths are rejected without mutating state.
    pub fn set_line_width(&mut self, width: f32) {
        if width < 0.0 || !width.is_finite() {
            log::warn!("ignoring invalid line width {width}");
            return;
        }
        self.line_width = width;
        self.dirty = true;
    }

    /// Atomically swap all plotted series and request an axis-limits
    /// auto-rescale. Axis labels suggested by the import replace the
    /// current ones where the schema provides them.
    pub fn replace_series(&mut self, data: PlottableData) {
        if data.series.is_empty() {
            // The renderer requires at least one series.
            log::warn!("refusing to replace series with empty import result");
            return;
        }
        self.kind = data.kind;
        self.series = data.series;
        self.categories = data.categories;
        if !data.x_label.is_empty() {
            self.x_label = data.x_label;
        }
        if !data.y_label.is_empty() {
            self.y_label = data.y_label;
        }
        self.reset_view = true;
        self.dirty = true;
    }

    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn take_reset_view(&mut self) -> bool {
        std::mem::take(&mut self.reset_view)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_has_one_series() {
        let state = PlotState::default();
        assert_eq!(state.series().len(), 1);
        assert_eq!(state.series()[0].points.len(), 20);
        assert_eq!(state.series()[0].points[0], [-10.0, 100.0]);
    }

    #[test]
    fn test_labels_set_and_clear() {
        let mut state = PlotState::default();
        state.set_title("My Plot");
        assert_eq!(state.title(), "My Plot");
        state.set_title("");
        assert_eq!(state.title(), "");
        state.set_x_label("time");
        assert_eq!(state.x_label(), "time");
    }

    #[test]
    fn test_toggles_round_trip() {
        let mut state = PlotState::default();
        let grid = state.grid_visible();
        state.set_grid_visible(!grid);
        state.set_grid_visible(grid);
        assert_eq!(state.grid_visible(), grid);

        let markers = state.markers_visible();
        state.set_markers_visible(!markers);
        state.set_markers_visible(markers);
        assert_eq!(state.markers_visible(), markers);
    }

    #[test]
    fn test_scale_round_trip() {
        let mut state = PlotState::default();
        state.set_x_scale(AxisScale::Log);
        state.set_x_scale(AxisScale::Linear);
        assert_eq!(state.x_scale(), AxisScale::Linear);
    }

    #[test]
    fn test_line_width_accepts_non_negative() {
        let mut state = PlotState::default();
        for width in [0.0, 0.5, 10.0] {
            state.set_line_width(width);
            assert_eq!(state.line_width(), width);
        }
    }

    #[test]
    fn test_negative_line_width_rejected_without_mutation() {
        let mut state = PlotState::default();
        state.set_line_width(3.0);
        state.take_dirty();
        state.set_line_width(-1.0);
        assert_eq!(state.line_width(), 3.0);
        assert!(!state.take_dirty());
    }

    #[test]
    fn test_replace_series_swaps_wholesale_and_requests_rescale() {
        let mut state = PlotState::default();
        state.take_reset_view();
        state.replace_series(PlottableData {
            kind: PlotKind::Bars,
            series: vec![Series {
                name: "Frequency".to_string(),
                color: trace_import::Rgb(0, 0, 0),
                points: vec![[0.0, 2.0]],
            }],
            categories: vec!["a".to_string()],
            x_label: String::new(),
            y_label: "Text Frequency".to_string(),
        });
        assert_eq!(state.kind(), PlotKind::Bars);
        assert_eq!(state.series().len(), 1);
        assert_eq!(state.y_label(), "Text Frequency");
        // x label untouched, the schema suggested none
        assert_eq!(state.x_label(), "x");
        assert!(state.take_reset_view());
    }

    #[test]
    fn test_empty_import_result_keeps_current_series() {
        let mut state = PlotState::default();
        state.replace_series(PlottableData {
            kind: PlotKind::Lines,
            series: Vec::new(),
            categories: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
        });
        assert_eq!(state.series().len(), 1);
    }

    #[test]
    fn test_mutators_mark_dirty() {
        let mut state = PlotState::default();
        state.take_dirty();
        state.set_markers_visible(true);
        assert!(state.take_dirty());
        assert!(!state.take_dirty());
    }
}
