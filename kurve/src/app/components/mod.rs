mod controls;
mod placeholder;
mod plot_view;

pub use controls::ControlPanel;
pub use placeholder::PlaceholderField;
pub use plot_view::{save_svg, PlotAxis, PlotView};
