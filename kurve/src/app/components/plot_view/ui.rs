use egui_plot::{Bar, BarChart, Legend, Line, Plot, Points};
use trace_import::PlotKind;

use super::logic::{log_tick_label, project};
use super::PlotRenderError;
use crate::app::plot_state::{AxisScale, PlotState};

const MARKER_RADIUS: f32 = 3.0;

impl super::PlotView {
    pub fn render(
        &mut self,
        plot_state: &mut PlotState,
        ui: &mut egui::Ui,
    ) -> Result<(), PlotRenderError> {
        let projected = project(plot_state)?;

        if !plot_state.title().is_empty() {
            ui.vertical_centered(|ui| ui.heading(plot_state.title()));
        }

        let mut plot = Plot::new("plot_view")
            .legend(Legend::default())
            .show_grid(plot_state.grid_visible())
            .x_axis_label(plot_state.x_label())
            .y_axis_label(plot_state.y_label());

        // Axis tick labels: category names under bars, powers of ten
        // on projected log axes.
        match plot_state.kind() {
            PlotKind::Bars => {
                let categories = plot_state.categories().to_vec();
                plot = plot.x_axis_formatter(move |mark, _range| {
                    category_label(mark.value, &categories)
                });
            }
            PlotKind::Lines => {
                if plot_state.x_scale() == AxisScale::Log {
                    plot = plot.x_axis_formatter(|mark, _range| decade_label(mark.value));
                }
                if plot_state.y_scale() == AxisScale::Log {
                    plot = plot.y_axis_formatter(|mark, _range| decade_label(mark.value));
                }
            }
        }

        if plot_state.take_reset_view() {
            plot = plot.reset();
        }

        plot.show(ui, |plot_ui| match plot_state.kind() {
            PlotKind::Bars => {
                for series in projected.iter() {
                    let bars = series
                        .points
                        .iter()
                        .map(|&[pos, height]| Bar::new(pos, height).fill(series.color))
                        .collect();
                    plot_ui.bar_chart(BarChart::new(bars).name(&series.name));
                }
            }
            PlotKind::Lines => {
                for series in projected.iter() {
                    plot_ui.line(
                        Line::new(series.points.clone())
                            .color(series.color)
                            .width(plot_state.line_width())
                            .name(&series.name),
                    );
                    if plot_state.markers_visible() {
                        plot_ui.points(
                            Points::new(series.points.clone())
                                .color(series.color)
                                .radius(MARKER_RADIUS)
                                .name(&series.name),
                        );
                    }
                }
            }
        });
        Ok(())
    }
}

/// Label grid lines of a log-projected axis at whole decades only.
fn decade_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        log_tick_label(value.round() as i32)
    } else {
        String::new()
    }
}

/// Label integer bar positions with their category name.
fn category_label(value: f64, categories: &[String]) -> String {
    if (value - value.round()).abs() > 1e-6 || value.round() < 0.0 {
        return String::new();
    }
    categories
        .get(value.round() as usize)
        .cloned()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decade_labels_only_on_whole_decades() {
        assert_eq!(decade_label(2.0), "100");
        assert_eq!(decade_label(-1.0), "0.1");
        assert_eq!(decade_label(0.30103), "");
    }

    #[test]
    fn test_category_labels_on_integer_positions() {
        let categories = vec!["ok".to_string(), "alert".to_string()];
        assert_eq!(category_label(0.0, &categories), "ok");
        assert_eq!(category_label(1.0, &categories), "alert");
        assert_eq!(category_label(0.5, &categories), "");
        assert_eq!(category_label(5.0, &categories), "");
        assert_eq!(category_label(-1.0, &categories), "");
    }
}
