use egui_plot::{Bar, BarChart, Plot, VLine};
use neurolabel_core::detection::DetectionId;

use crate::app::LabelerApp;
use crate::messages::WorkerCommand;
use crate::panels::menu_bar::open_image;

const LEFT_PANEL_WIDTH: f32 = 280.0;

/// Height of the confidence histogram in pixels.
const CHART_HEIGHT: f32 = 100.0;

/// Histogram bins over `[0, 1]`.
const CONFIDENCE_BINS: usize = 10;

pub fn show(ctx: &egui::Context, app: &mut LabelerApp) {
    egui::SidePanel::left("controls")
        .default_width(LEFT_PANEL_WIDTH)
        .resizable(true)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.set_min_width(LEFT_PANEL_WIDTH - 20.0);

                detect_section(ui, app);
                ui.separator();
                threshold_section(ui, app);
                ui.separator();
                detections_section(ui, app);
                ui.separator();
                history_section(ui, app);
            });
        });
}

fn detect_section(ui: &mut egui::Ui, app: &mut LabelerApp) {
    let status = app.ui_state.current.as_ref().map(|c| c.filename.as_str());
    super::section_header(ui, "Image", status);
    ui.add_space(4.0);

    ui.checkbox(&mut app.ui_state.enhance, "Enhance (test-time augmentation)");
    ui.horizontal(|ui| {
        if ui.button("Open & Detect...").clicked() {
            open_image(app);
        }
        let has_image = app.ui_state.current.is_some();
        if ui.add_enabled(has_image, egui::Button::new("Save")).clicked() {
            app.save_annotations();
        }
    });
}

fn threshold_section(ui: &mut egui::Ui, app: &mut LabelerApp) {
    let counts = format!("{}/{}", app.canvas.visible_count(), app.canvas.store().len());
    super::section_header(ui, "Confidence", Some(&counts));
    ui.add_space(4.0);

    let mut threshold = app.canvas.threshold();
    if ui
        .add(egui::Slider::new(&mut threshold, 0.0..=1.0).text("threshold"))
        .changed()
    {
        app.canvas.set_threshold(threshold);
    }

    if !app.canvas.store().is_empty() {
        let confidences: Vec<f32> = app.canvas.store().iter().map(|d| d.confidence).collect();
        confidence_chart(ui, &confidences, app.canvas.threshold());
    }
}

/// Bar chart of detection confidences with the threshold marked.
fn confidence_chart(ui: &mut egui::Ui, confidences: &[f32], threshold: f32) {
    let mut counts = [0usize; CONFIDENCE_BINS];
    for &c in confidences {
        let bin = ((c * CONFIDENCE_BINS as f32) as usize).min(CONFIDENCE_BINS - 1);
        counts[bin] += 1;
    }

    let bin_width = 1.0 / CONFIDENCE_BINS as f64;
    let shown_color = egui::Color32::from_rgb(80, 180, 80);
    let hidden_color = egui::Color32::from_rgb(128, 128, 128);

    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let center = (i as f64 + 0.5) * bin_width;
            let color = if center >= threshold as f64 {
                shown_color
            } else {
                hidden_color
            };
            Bar::new(center, count as f64)
                .fill(color)
                .width(bin_width * 0.9)
        })
        .collect();

    let chart = BarChart::new("confidence", bars);
    let cutoff = VLine::new("threshold", threshold as f64)
        .color(egui::Color32::from_rgb(255, 160, 40))
        .width(1.5);

    Plot::new("confidence_histogram")
        .height(CHART_HEIGHT)
        .include_x(0.0)
        .include_x(1.0)
        .include_y(0.0)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show_grid(false)
        .y_axis_label("count")
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
            plot_ui.vline(cutoff);
        });
}

fn detections_section(ui: &mut egui::Ui, app: &mut LabelerApp) {
    super::section_header(ui, "Detections", None);
    ui.add_space(4.0);

    let threshold = app.canvas.threshold();
    let selected = app.canvas.selected();
    let mut clicked: Option<DetectionId> = None;

    let visible = app.canvas.store().visible(threshold);
    if visible.is_empty() {
        ui.weak("No detections above threshold");
    }
    for d in visible {
        let text = format!("{} ({:.0}%)", d.label, d.confidence * 100.0);
        if ui.selectable_label(selected == Some(d.id), text).clicked() {
            clicked = Some(d.id);
        }
    }

    if let Some(id) = clicked {
        app.canvas.select(id);
    }
}

fn history_section(ui: &mut egui::Ui, app: &mut LabelerApp) {
    ui.horizontal(|ui| {
        ui.strong("History");
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.small_button("Refresh").clicked() {
                app.send_command(WorkerCommand::LoadHistory);
            }
        });
    });
    ui.add_space(4.0);

    if app.ui_state.history.is_empty() {
        ui.weak("No processed images");
        return;
    }

    let current = app.ui_state.current_id();
    let mut command: Option<WorkerCommand> = None;
    for entry in &app.ui_state.history {
        ui.horizontal(|ui| {
            let text = format!(
                "{} · {} · {}",
                entry.filename,
                entry.detection_count,
                entry.timestamp.format("%Y-%m-%d %H:%M")
            );
            if ui
                .selectable_label(current == Some(entry.id), text)
                .on_hover_text("Open")
                .clicked()
            {
                command = Some(WorkerCommand::OpenHistoryItem {
                    id: entry.id,
                    filename: entry.filename.clone(),
                });
            }
            if ui.small_button("Delete").clicked() {
                command = Some(WorkerCommand::DeleteImage { id: entry.id });
            }
        });
    }

    if let Some(cmd) = command {
        app.send_command(cmd);
    }
}
