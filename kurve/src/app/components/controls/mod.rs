mod ui;

use super::PlaceholderField;

pub(super) const LINE_WIDTH_PRESETS: [f32; 6] = [0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
pub(super) const MAX_LINE_WIDTH: f32 = 10.0;

/// The side panel holding all plot controls. It owns only transient
/// widget state (text entry buffers, the uncommitted width); everything
/// else reads and writes the plot state through its mutators.
pub struct ControlPanel {
    title_field: PlaceholderField,
    xlabel_field: PlaceholderField,
    ylabel_field: PlaceholderField,
    /// Slider/preset position, committed with the Apply button.
    width_input: f32,
}

impl ControlPanel {
    pub fn new() -> Self {
        Self {
            title_field: PlaceholderField::new("Enter plot title"),
            xlabel_field: PlaceholderField::new("Enter x-axis label"),
            ylabel_field: PlaceholderField::new("Enter y-axis label"),
            width_input: 1.5,
        }
    }
}
