mod components;
pub mod config;
mod events;
mod plot_state;

use std::path::PathBuf;
use std::{sync::mpsc::Sender, thread::JoinHandle};

use app_core::backend::{BackendEventLoop, BackendLink, BackendRequest};
use app_core::frontend::UIParameter;
use app_core::BACKEND_HUNG_UP_MSG;
use trace_import::PlottableData;

use self::components::{save_svg, ControlPanel, PlotAxis, PlotView};
use self::events::{EventQueue, ExportRequested, ImportRequested};
use self::plot_state::{AxisScale, PlotState};
use crate::BackendAppState;
use config::Config;

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    request_tx: DynRequestSender,
    plot_state: PlotState,
    controls: ControlPanel,
    plot_view: PlotView,
    event_queue: EventQueue<Self>,
    /// Result of the import currently running on the backend, if any.
    pending_import: UIParameter<Option<Result<PlottableData, String>>>,
    error_message: Option<String>,
    shortcuts_modal_open: bool,
    request_redraw: Option<()>,
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: DynRequestSender,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            request_tx,
            plot_state: PlotState::default(),
            controls: ControlPanel::new(),
            plot_view: PlotView::new(),
            event_queue: EventQueue::<Self>::new(),
            pending_import: UIParameter::new(None),
            error_message: None,
            shortcuts_modal_open: false,
            request_redraw: None,
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    pub fn show_error(&mut self, message: String) {
        self.error_message = Some(message);
    }

    fn update_state(&mut self) {
        self.run_events();
        if let Some(result) = self.pending_import.take_if_updated() {
            match result {
                Ok(data) => self.plot_state.replace_series(data),
                Err(message) => self.show_error(message),
            }
            self.request_redraw();
        }
        if self.plot_state.take_dirty() {
            self.request_redraw();
        }
    }

    /// Hand a picked trace file to the backend thread for parsing. The
    /// UI keeps running, the result is polled each frame.
    pub fn dispatch_import(&mut self, path: PathBuf) {
        log::debug!("dispatching import of {:?} to backend", path);
        let (rx, linker) = BackendLink::new(
            "import trace file",
            move |b: &mut BackendEventLoop<BackendAppState>| Some(b.state.import_trace(&path)),
        );
        self.pending_import.set_recv(rx);
        self.request_tx
            .send(Box::new(linker))
            .expect(BACKEND_HUNG_UP_MSG);
    }

    pub fn export_svg(&self, path: &std::path::Path) -> Result<(), String> {
        save_svg(&self.plot_state, &self.config, path)
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }

        self.update_state();

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                // Quitting cannot be requested from within here, the UI stops,
                // but not the backend thread.
                should_quit = true;
            }
            if i.key_pressed(egui::Key::O) && i.modifiers.ctrl {
                log::debug!("open dialog to select trace file");
                let handle = std::thread::spawn(|| rfd::FileDialog::new().pick_file());
                let event = ImportRequested::new(Some(handle));
                self.event_queue.queue_event(Box::new(event));
            }
            if i.key_pressed(egui::Key::E) && i.modifiers.ctrl {
                log::debug!("open dialog to select svg export path");
                let handle = std::thread::spawn(|| {
                    rfd::FileDialog::new().set_file_name("plot.svg").save_file()
                });
                let event = ExportRequested::new(Some(handle));
                self.event_queue.queue_event(Box::new(event));
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.render_error_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::SidePanel::right("control_panel")
            .resizable(false)
            .show(ctx, |ui| {
                self.controls
                    .render(&mut self.plot_state, &mut self.event_queue, ui);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui);
        });

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui) {
        if let Err(err) = self.plot_view.render(&mut self.plot_state, ui) {
            // Fall back to a linear axis, otherwise the modal would
            // reappear every frame.
            match err.axis {
                PlotAxis::X => self.plot_state.set_x_scale(AxisScale::Linear),
                PlotAxis::Y => self.plot_state.set_y_scale(AxisScale::Linear),
            }
            self.show_error(err.to_string());
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            {
                ui.menu_button("File", |ui| {
                    if ui.button("Import Trace File").clicked() {
                        log::debug!("open dialog to select trace file");
                        let handle = std::thread::spawn(|| rfd::FileDialog::new().pick_file());
                        let event = ImportRequested::new(Some(handle));
                        self.event_queue.queue_event(Box::new(event));
                    }
                    if ui.button("Export SVG").clicked() {
                        log::debug!("open dialog to select svg export path");
                        let handle = std::thread::spawn(|| {
                            rfd::FileDialog::new().set_file_name("plot.svg").save_file()
                        });
                        let event = ExportRequested::new(Some(handle));
                        self.event_queue.queue_event(Box::new(event));
                    }
                    if ui.button("Quit").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                });

                ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    egui::widgets::global_theme_preference_buttons(ui);
                });
            };
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + O = Import Trace File");
                    ui.separator();
                    ui.label("CTRL + E = Export Plot as SVG");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }

    fn render_error_modal(&mut self, ctx: &egui::Context) {
        let Some(message) = self.error_message.clone() else {
            return;
        };
        let mut acknowledged = false;
        if egui::Modal::new("error_modal".into())
            .show(ctx, |ui| {
                ui.heading("Error");
                ui.separator();
                ui.label(&message);
                if ui.button("Close").clicked() {
                    acknowledged = true;
                }
            })
            .should_close()
            || acknowledged
        {
            self.error_message = None;
        };
    }
}
