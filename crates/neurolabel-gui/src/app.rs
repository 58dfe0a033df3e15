use std::sync::mpsc;

use anyhow::Context;
use neurolabel_core::canvas::AnnotationCanvas;
use neurolabel_core::config::LabelerConfig;
use neurolabel_core::detection::DetectionRecord;
use neurolabel_core::imaging::DecodedImage;
use neurolabel_core::library::LocalLibrary;

use crate::convert::decoded_to_color_image;
use crate::messages::{WorkerCommand, WorkerResult};
use crate::panels;
use crate::state::{CurrentImage, UIState, ViewportState};
use crate::worker;

pub struct LabelerApp {
    pub cmd_tx: mpsc::Sender<WorkerCommand>,
    pub result_tx: mpsc::Sender<WorkerResult>,
    pub result_rx: mpsc::Receiver<WorkerResult>,
    pub canvas: AnnotationCanvas,
    pub ui_state: UIState,
    pub viewport: ViewportState,
}

impl LabelerApp {
    pub fn new(ctx: &egui::Context, config: LabelerConfig) -> anyhow::Result<Self> {
        let library = LocalLibrary::from_config(&config).with_context(|| {
            format!("Failed to open library at {}", config.library.root.display())
        })?;

        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx = worker::spawn_worker(result_tx.clone(), ctx.clone(), Box::new(library))
            .context("Failed to spawn worker thread")?;
        let _ = cmd_tx.send(WorkerCommand::LoadHistory);

        Ok(Self {
            cmd_tx,
            result_tx,
            result_rx,
            canvas: AnnotationCanvas::new(config.canvas.confidence_threshold),
            ui_state: UIState {
                enhance: config.canvas.enhance,
                ..UIState::default()
            },
            viewport: ViewportState::default(),
        })
    }

    /// Drain all pending results from the worker. A late response simply
    /// overwrites whatever it targets.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                WorkerResult::Detected {
                    image_id,
                    filename,
                    detections,
                } => {
                    self.ui_state.add_log(format!(
                        "{filename}: {} detections (image #{image_id})",
                        detections.len()
                    ));
                    self.show_image(image_id, filename, detections);
                }
                WorkerResult::HistoryItemLoaded {
                    image_id,
                    filename,
                    detections,
                } => {
                    self.ui_state.add_log(format!(
                        "Opened #{image_id} {filename} ({} annotations)",
                        detections.len()
                    ));
                    self.show_image(image_id, filename, detections);
                }
                WorkerResult::ImageDecoded { image_id, image } => {
                    if self.ui_state.current_id() == Some(image_id) {
                        self.update_viewport_texture(ctx, &image);
                    } else {
                        tracing::debug!(image_id, "Dropping decode for an image no longer shown");
                    }
                }
                WorkerResult::History { entries } => {
                    self.ui_state.history = entries;
                }
                WorkerResult::Saved { image_id, count } => {
                    self.ui_state
                        .add_log(format!("Saved {count} annotations for image #{image_id}"));
                }
                WorkerResult::Deleted { image_id } => {
                    if self.ui_state.current_id() == Some(image_id) {
                        self.close_image();
                    }
                    self.ui_state.add_log(format!("Deleted image #{image_id}"));
                }
                WorkerResult::ConfigImported { config } => {
                    self.canvas.set_threshold(config.canvas.confidence_threshold);
                    self.ui_state.enhance = config.canvas.enhance;
                    self.ui_state.add_log("Config imported".into());
                    self.send_command(WorkerCommand::OpenLibrary { config });
                }
                WorkerResult::Error { message } => {
                    self.ui_state.add_log(format!("ERROR: {message}"));
                    self.ui_state.error = Some(message);
                }
                WorkerResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }

    fn show_image(&mut self, id: i64, filename: String, detections: Vec<DetectionRecord>) {
        self.canvas.load_detections(detections);
        self.viewport.texture = None;
        self.ui_state.current = Some(CurrentImage { id, filename });
    }

    fn update_viewport_texture(&mut self, ctx: &egui::Context, image: &DecodedImage) {
        let color_image = decoded_to_color_image(image);
        let texture = ctx.load_texture("canvas_image", color_image, egui::TextureOptions::LINEAR);
        self.viewport.texture = Some(texture);
        self.canvas.image_decoded(image.width, image.height);
    }

    pub fn close_image(&mut self) {
        self.canvas.close();
        self.viewport.texture = None;
        self.ui_state.current = None;
    }

    /// Persist the edited detections of the open image.
    pub fn save_annotations(&mut self) {
        let Some(id) = self.ui_state.current_id() else {
            return;
        };
        self.send_command(WorkerCommand::SaveAnnotations {
            id,
            records: self.canvas.records(),
        });
    }

    pub fn send_command(&self, cmd: WorkerCommand) {
        let _ = self.cmd_tx.send(cmd);
    }
}

impl eframe::App for LabelerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);

        panels::menu_bar::show(ctx, self);
        panels::status::show(ctx, self);
        panels::controls::show(ctx, self);
        panels::viewport::show(ctx, self);

        if let Some(message) = self.ui_state.error.clone() {
            let modal = egui::Modal::new(egui::Id::new("error_modal")).show(ctx, |ui| {
                ui.set_width(360.0);
                ui.heading("Request failed");
                ui.add_space(8.0);
                ui.label(message);
                ui.add_space(8.0);
                ui.button("OK").clicked()
            });
            if modal.inner || modal.should_close() {
                self.ui_state.error = None;
            }
        }

        if self.ui_state.show_about {
            egui::Window::new("About NeuroLabel")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.heading("NeuroLabel");
                        ui.label("Bounding-box annotation");
                        ui.add_space(8.0);
                        ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                        ui.add_space(8.0);
                        if ui.button("Close").clicked() {
                            self.ui_state.show_about = false;
                        }
                    });
                });
        }
    }
}
