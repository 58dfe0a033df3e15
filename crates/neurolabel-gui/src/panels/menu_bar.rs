use neurolabel_core::config::LabelerConfig;
use neurolabel_core::export::write_export;

use crate::app::LabelerApp;
use crate::messages::{WorkerCommand, WorkerResult};

pub fn show(ctx: &egui::Context, app: &mut LabelerApp) {
    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::MenuBar::new().ui(ui, |ui| {
            ui.menu_button("File", |ui| {
                let open_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O);
                if ui.add(egui::Button::new("Open Image...").shortcut_text(ctx.format_shortcut(&open_shortcut))).clicked() {
                    ui.close();
                    open_image(app);
                }

                let has_image = app.ui_state.current.is_some();
                let save_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S);
                if ui.add_enabled(has_image, egui::Button::new("Save Annotations").shortcut_text(ctx.format_shortcut(&save_shortcut))).clicked() {
                    ui.close();
                    app.save_annotations();
                }

                if ui.add_enabled(has_image, egui::Button::new("Export JSON...")).clicked() {
                    ui.close();
                    export_json(ctx, app);
                }

                if ui.add_enabled(has_image, egui::Button::new("Close Image")).clicked() {
                    ui.close();
                    app.close_image();
                }

                ui.separator();

                if ui.button("Import Config...").clicked() {
                    ui.close();
                    import_config(ctx, app);
                }

                ui.separator();

                let quit_shortcut = egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q);
                if ui.add(egui::Button::new("Quit").shortcut_text(ctx.format_shortcut(&quit_shortcut))).clicked() {
                    ui.close();
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            ui.menu_button("Edit", |ui| {
                let has_selection = app.canvas.selected().is_some();
                if ui.add_enabled(has_selection, egui::Button::new("Delete Selected")).clicked() {
                    ui.close();
                    app.canvas.delete_selected();
                }
            });

            ui.menu_button("Help", |ui| {
                if ui.button("About").clicked() {
                    ui.close();
                    app.ui_state.show_about = true;
                }
            });
        });

        // Keyboard shortcuts (consumed outside menus)
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::O))) {
            open_image(app);
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::S))) {
            app.save_annotations();
        }
        if ctx.input_mut(|i| i.consume_shortcut(&egui::KeyboardShortcut::new(egui::Modifiers::COMMAND, egui::Key::Q))) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    });
}

pub(crate) fn open_image(app: &mut LabelerApp) {
    let cmd_tx = app.cmd_tx.clone();
    let enhance = app.ui_state.enhance;
    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "webp", "tif", "tiff"])
            .add_filter("All files", &["*"])
            .pick_file()
        {
            let _ = cmd_tx.send(WorkerCommand::Detect { path, enhance });
        }
    });
}

fn export_json(ctx: &egui::Context, app: &mut LabelerApp) {
    let records = app.canvas.records();
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();

    std::thread::spawn(move || {
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("JSON", &["json"])
            .set_file_name("annotations.json")
            .save_file()
        {
            let result = match write_export(&path, &records) {
                Ok(()) => WorkerResult::Log {
                    message: format!("Exported {} annotations to {}", records.len(), path.display()),
                },
                Err(e) => WorkerResult::Error {
                    message: format!("Failed to export {}: {e}", path.display()),
                },
            };
            let _ = result_tx.send(result);
            ctx.request_repaint();
        }
    });
}

fn import_config(ctx: &egui::Context, app: &mut LabelerApp) {
    let result_tx = app.result_tx.clone();
    let ctx = ctx.clone();
    std::thread::spawn(move || {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("TOML", &["toml"])
            .pick_file()
        else {
            return;
        };
        let result = match LabelerConfig::load(&path) {
            Ok(config) => WorkerResult::ConfigImported { config },
            Err(e) => WorkerResult::Error {
                message: format!("Failed to import {}: {e}", path.display()),
            },
        };
        let _ = result_tx.send(result);
        ctx.request_repaint();
    });
}
