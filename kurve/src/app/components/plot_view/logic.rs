use egui::Color32;

use app_core::string_error::ErrorStringExt;
use trace_import::PlotKind;

use super::{PlotAxis, PlotRenderError};
use crate::app::config::Config;
use crate::app::plot_state::{AxisScale, PlotState};

/// A series with axis scaling already applied, ready to hand to a
/// renderer. On logarithmic axes the coordinates are base-10
/// logarithms of the data.
#[derive(Debug)]
pub(super) struct ProjectedSeries {
    pub name: String,
    pub color: Color32,
    pub points: Vec<[f64; 2]>,
}

pub(super) fn project(plot_state: &PlotState) -> Result<Vec<ProjectedSeries>, PlotRenderError> {
    // Bar charts plot category positions, scaling them makes no sense.
    let (x_scale, y_scale) = match plot_state.kind() {
        PlotKind::Bars => (AxisScale::Linear, AxisScale::Linear),
        PlotKind::Lines => (plot_state.x_scale(), plot_state.y_scale()),
    };
    // With a single series the configurable line color wins; imported
    // multi-series data keeps its own colors.
    let single_series = plot_state.series().len() == 1;

    let mut projected = Vec::with_capacity(plot_state.series().len());
    for series in plot_state.series() {
        let mut points = Vec::with_capacity(series.points.len());
        for &[x, y] in series.points.iter() {
            let x = match x_scale {
                AxisScale::Linear => x,
                AxisScale::Log if x > 0.0 => x.log10(),
                AxisScale::Log => continue,
            };
            let y = match y_scale {
                AxisScale::Linear => y,
                AxisScale::Log if y > 0.0 => y.log10(),
                AxisScale::Log => continue,
            };
            points.push([x, y]);
        }

        if points.is_empty() && !series.points.is_empty() {
            let axis = if x_scale == AxisScale::Log && series.points.iter().all(|p| p[0] <= 0.0) {
                PlotAxis::X
            } else {
                PlotAxis::Y
            };
            return Err(PlotRenderError {
                series: series.name.clone(),
                axis,
            });
        }
        if points.len() < series.points.len() {
            log::debug!(
                "dropped {} non-positive point(s) of series '{}' for log scaling",
                series.points.len() - points.len(),
                series.name
            );
        }

        let color = if single_series {
            plot_state.line_color()
        } else {
            let trace_import::Rgb(r, g, b) = series.color;
            Color32::from_rgb(r, g, b)
        };
        projected.push(ProjectedSeries {
            name: series.name.clone(),
            color,
            points,
        });
    }
    Ok(projected)
}

/// Tick positions and labels for a logarithmic axis whose data was
/// projected to base-10 logarithms: one tick per power of ten.
pub(super) fn log_ticks(min: f64, max: f64) -> (Vec<f64>, Vec<String>) {
    let lo = min.ceil() as i32;
    let hi = max.floor() as i32;
    (lo..=hi)
        .map(|k| (k as f64, log_tick_label(k)))
        .unzip()
}

pub(super) fn log_tick_label(k: i32) -> String {
    if (-3..=3).contains(&k) {
        format!("{}", 10f64.powi(k))
    } else {
        format!("1e{k}")
    }
}

pub fn save_svg(plot_state: &PlotState, config: &Config, path: &std::path::Path) -> Result<(), String> {
    use svg_export::Figure;

    log::debug!("exporting current plot as svg to {:?}", path);

    let mut fig =
        Figure::new(config.svg_width, config.svg_height).with_title(plot_state.title());

    let ax = match plot_state.kind() {
        PlotKind::Lines => lines_axis(plot_state)?,
        PlotKind::Bars => bars_axis(plot_state)?,
    };
    ax.insert_into(&mut fig);

    std::fs::write(path, fig.render()).err_to_string("cannot write svg file")
}

fn lines_axis(plot_state: &PlotState) -> Result<svg_export::Axis, String> {
    use svg_export::{Axis, LinePlot};

    let projected = project(plot_state).err_to_string("cannot export plot")?;

    let (mut xmin, mut xmax) = (f64::INFINITY, f64::NEG_INFINITY);
    let (mut ymin, mut ymax) = (f64::INFINITY, f64::NEG_INFINITY);
    for series in projected.iter() {
        for &[x, y] in series.points.iter() {
            (xmin, xmax) = (xmin.min(x), xmax.max(x));
            (ymin, ymax) = (ymin.min(y), ymax.max(y));
        }
    }
    if !xmin.is_finite() {
        return Err("nothing to export, all series are empty".to_string());
    }

    let mut ax = Axis::default()
        .with_xlim(xmin, xmax)
        .with_ylim(ymin, ymax)
        .with_xlabel(plot_state.x_label())
        .with_ylabel(plot_state.y_label())
        .with_grid(plot_state.grid_visible())
        .with_legend(projected.len() > 1);
    if plot_state.x_scale() == AxisScale::Log {
        let (positions, labels) = log_ticks(xmin, xmax);
        ax.set_xticks(positions, labels);
    }
    if plot_state.y_scale() == AxisScale::Log {
        let (positions, labels) = log_ticks(ymin, ymax);
        ax.set_yticks(positions, labels);
    }
    for series in projected.iter() {
        let xs: Vec<f64> = series.points.iter().map(|p| p[0]).collect();
        let ys: Vec<f64> = series.points.iter().map(|p| p[1]).collect();
        ax.add_line(
            LinePlot::new(&xs, &ys)
                .with_color(&color_hex(series.color))
                .with_linewidth(plot_state.line_width() as f64)
                .with_name(&series.name)
                .with_markers(plot_state.markers_visible()),
        );
    }
    Ok(ax)
}

fn bars_axis(plot_state: &PlotState) -> Result<svg_export::Axis, String> {
    use svg_export::{Axis, BarPlot};

    let Some(series) = plot_state.series().first() else {
        return Err("nothing to export, no bar series present".to_string());
    };
    let positions: Vec<f64> = series.points.iter().map(|p| p[0]).collect();
    let heights: Vec<f64> = series.points.iter().map(|p| p[1]).collect();
    let ymax = heights.iter().copied().fold(0.0, f64::max);

    let mut ax = Axis::default()
        .with_xlim(-0.5, positions.len() as f64 - 0.5)
        .with_ylim(0.0, ymax * 1.05)
        .with_ylabel(plot_state.y_label())
        .with_grid(plot_state.grid_visible());
    let trace_import::Rgb(r, g, b) = series.color;
    ax.set_bars(
        BarPlot::new(&positions, &heights).with_color(&color_hex(Color32::from_rgb(r, g, b))),
    );
    ax.set_xticks(positions.clone(), plot_state.categories().to_vec());
    Ok(ax)
}

fn color_hex(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}

#[cfg(test)]
mod tests {
    use trace_import::{PlottableData, Rgb, Series};

    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_linear_projection_is_identity() {
        init();
        let state = PlotState::default();
        let projected = project(&state).unwrap();
        assert_eq!(projected.len(), 1);
        assert_eq!(projected[0].points, state.series()[0].points);
    }

    #[test]
    fn test_log_scale_drops_non_positive_points() {
        init();
        let mut state = PlotState::default();
        // The default quadratic has 10 points with x < 0 and one at
        // x = 0; only the strictly positive xs survive.
        state.set_x_scale(AxisScale::Log);
        let projected = project(&state).unwrap();
        assert_eq!(projected[0].points.len(), 9);
        assert!(projected[0].points.iter().all(|p| p[0].is_finite()));
        assert_eq!(*projected[0].points.last().unwrap(), [9f64.log10(), 81.0]);
    }

    #[test]
    fn test_log_scale_that_empties_a_series_is_an_error() {
        init();
        let mut state = PlotState::default();
        state.replace_series(PlottableData {
            kind: PlotKind::Lines,
            series: vec![Series {
                name: "negatives".to_string(),
                color: Rgb(0, 0, 0),
                points: vec![[-1.0, 1.0], [-2.0, 2.0]],
            }],
            categories: Vec::new(),
            x_label: String::new(),
            y_label: String::new(),
        });
        state.set_x_scale(AxisScale::Log);
        let err = project(&state).unwrap_err();
        assert_eq!(err.axis, PlotAxis::X);
        assert!(err.to_string().contains("negatives"));
    }

    #[test]
    fn test_bar_charts_ignore_axis_scales() {
        init();
        let mut state = PlotState::default();
        state.replace_series(PlottableData {
            kind: PlotKind::Bars,
            series: vec![Series {
                name: "Frequency".to_string(),
                color: Rgb(31, 119, 180),
                points: vec![[0.0, 3.0], [1.0, 2.0]],
            }],
            categories: vec!["a".to_string(), "b".to_string()],
            x_label: String::new(),
            y_label: "Text Frequency".to_string(),
        });
        // Position 0 has no logarithm, it must survive regardless.
        state.set_x_scale(AxisScale::Log);
        let projected = project(&state).unwrap();
        assert_eq!(projected[0].points.len(), 2);
    }

    #[test]
    fn test_log_ticks_cover_decades() {
        init();
        let (positions, labels) = log_ticks(-1.2, 2.3);
        assert_eq!(positions, vec![-1.0, 0.0, 1.0, 2.0]);
        assert_eq!(labels, vec!["0.1", "1", "10", "100"]);
        assert_eq!(log_tick_label(6), "1e6");
    }

    #[test]
    fn test_save_svg_writes_line_document() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.svg");
        let mut state = PlotState::default();
        state.set_title("quadratic");
        save_svg(&state, &Config::default(), &path).unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains("<polyline"));
        assert!(doc.contains(">quadratic</text>"));
    }

    #[test]
    fn test_save_svg_writes_bar_document_with_category_ticks() {
        init();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bars.svg");
        let mut state = PlotState::default();
        state.replace_series(PlottableData {
            kind: PlotKind::Bars,
            series: vec![Series {
                name: "Frequency".to_string(),
                color: Rgb(31, 119, 180),
                points: vec![[0.0, 4.0], [1.0, 2.0]],
            }],
            categories: vec!["ok".to_string(), "alert".to_string()],
            x_label: String::new(),
            y_label: "Text Frequency".to_string(),
        });
        save_svg(&state, &Config::default(), &path).unwrap();
        let doc = std::fs::read_to_string(&path).unwrap();
        assert!(doc.contains(">ok</text>"));
        assert!(doc.contains(">alert</text>"));
    }
}
