use super::{LINE_WIDTH_PRESETS, MAX_LINE_WIDTH};
use crate::app::events::{EventQueue, ImportRequested};
use crate::app::plot_state::{AxisScale, PlotState};
use crate::app::EguiApp;

impl super::ControlPanel {
    pub fn render(
        &mut self,
        plot_state: &mut PlotState,
        event_queue: &mut EventQueue<EguiApp>,
        ui: &mut egui::Ui,
    ) {
        ui.heading("Plot Controls");
        ui.separator();

        self.render_label_entries(plot_state, ui);
        ui.separator();
        render_axis_scales(plot_state, ui);
        ui.separator();
        render_toggles(plot_state, ui);
        ui.separator();
        self.render_line_style(plot_state, ui);
        ui.separator();

        if ui.button("Import Trace File…").clicked() {
            log::debug!("open dialog to select trace file");
            let handle = std::thread::spawn(|| rfd::FileDialog::new().pick_file());
            event_queue.queue_event(Box::new(ImportRequested::new(Some(handle))));
        }
    }

    fn render_label_entries(&mut self, plot_state: &mut PlotState, ui: &mut egui::Ui) {
        // Empty entries are applied as well, that is how a label is
        // cleared again.
        self.title_field.render(ui);
        if ui.button("Apply Title").clicked() {
            plot_state.set_title(self.title_field.read_value());
            self.title_field.reset();
        }
        self.xlabel_field.render(ui);
        if ui.button("Apply X Label").clicked() {
            plot_state.set_x_label(self.xlabel_field.read_value());
            self.xlabel_field.reset();
        }
        self.ylabel_field.render(ui);
        if ui.button("Apply Y Label").clicked() {
            plot_state.set_y_label(self.ylabel_field.read_value());
            self.ylabel_field.reset();
        }
    }

    fn render_line_style(&mut self, plot_state: &mut PlotState, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Line color:");
            let mut color = plot_state.line_color();
            if ui.color_edit_button_srgba(&mut color).changed() {
                plot_state.set_line_color(color);
            }
        });

        ui.add(egui::Slider::new(&mut self.width_input, 0.0..=MAX_LINE_WIDTH).text("Line width"));
        egui::ComboBox::from_label("Width presets")
            .selected_text(format!("{:.1}", self.width_input))
            .show_ui(ui, |ui| {
                for preset in LINE_WIDTH_PRESETS {
                    ui.selectable_value(&mut self.width_input, preset, format!("{preset:.1}"));
                }
            });
        if ui.button("Apply Width").clicked() {
            plot_state.set_line_width(self.width_input);
        }
    }
}

fn render_axis_scales(plot_state: &mut PlotState, ui: &mut egui::Ui) {
    let mut x_scale = plot_state.x_scale();
    ui.horizontal(|ui| {
        ui.label("x scale:");
        ui.radio_value(&mut x_scale, AxisScale::Linear, "linear");
        ui.radio_value(&mut x_scale, AxisScale::Log, "log");
    });
    if x_scale != plot_state.x_scale() {
        plot_state.set_x_scale(x_scale);
    }

    let mut y_scale = plot_state.y_scale();
    ui.horizontal(|ui| {
        ui.label("y scale:");
        ui.radio_value(&mut y_scale, AxisScale::Linear, "linear");
        ui.radio_value(&mut y_scale, AxisScale::Log, "log");
    });
    if y_scale != plot_state.y_scale() {
        plot_state.set_y_scale(y_scale);
    }
}

fn render_toggles(plot_state: &mut PlotState, ui: &mut egui::Ui) {
    let mut grid = plot_state.grid_visible();
    if ui.checkbox(&mut grid, "Show grid").changed() {
        plot_state.set_grid_visible(grid);
    }
    let mut markers = plot_state.markers_visible();
    if ui.checkbox(&mut markers, "Show markers").changed() {
        plot_state.set_markers_visible(markers);
    }
}

