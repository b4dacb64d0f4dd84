mod logic;
mod ui;

pub use logic::save_svg;

use std::fmt;

use thiserror::Error;

/// Renders the current plot state into the central panel.
pub struct PlotView;

impl PlotView {
    pub fn new() -> Self {
        Self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlotAxis {
    X,
    Y,
}

impl fmt::Display for PlotAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlotAxis::X => write!(f, "x"),
            PlotAxis::Y => write!(f, "y"),
        }
    }
}

/// Switching an axis to a logarithmic scale drops all points with
/// non-positive values on that axis. If that leaves nothing of a
/// series, the plot cannot be drawn as configured.
#[derive(Debug, Error)]
#[error("series '{series}' has no positive {axis}-values, a logarithmic {axis}-axis would hide it entirely")]
pub struct PlotRenderError {
    pub series: String,
    pub axis: PlotAxis,
}
