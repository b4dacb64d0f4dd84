#![warn(clippy::all, rust_2018_idioms)]

//! Render a chart to SVG markup.
//!
//! The entry point is [`Figure`]: give it an [`Axis`] populated with
//! [`LinePlot`]s or a [`BarPlot`], then call [`Figure::render`] to get
//! the raw `<svg>` document as a `String`.

mod plotting;
mod svg;

pub use plotting::{Axis, BarPlot, Figure, LinePlot};
