//! Central canvas: feeds egui input to the annotation canvas and paints its
//! scene.
//!
//! Canvas coordinates are panel-local: `(0, 0)` is the panel's top-left
//! corner.

use neurolabel_core::dispatcher::{CanvasEffect, CanvasKey, InputEvent, PointerButton};
use neurolabel_core::geometry::{Point, ScreenRect};
use neurolabel_core::scene::{Scene, ShapeView};
use neurolabel_core::viewport::ZoomDirection;

use crate::app::LabelerApp;

const BOX_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 64, 64);
const SELECTED_COLOR: egui::Color32 = egui::Color32::from_rgb(255, 200, 0);
const HANDLE_FILL: egui::Color32 = egui::Color32::WHITE;

pub fn show(ctx: &egui::Context, app: &mut LabelerApp) {
    egui::CentralPanel::default().show(ctx, |ui| {
        let rect = ui.available_rect_before_wrap();
        paint_background(ui, rect);

        let texture_id = app.viewport.texture.as_ref().map(|t| t.id());
        if app.ui_state.current.is_none() {
            show_placeholder(ui);
            return;
        }

        let response = ui.allocate_rect(rect, egui::Sense::click_and_drag());
        let keyboard_free = ctx.memory(|m| m.focused().is_none());
        for event in collect_events(ui, &response, rect, keyboard_free) {
            let effect = app.canvas.dispatch(event);
            if effect != CanvasEffect::None {
                tracing::trace!(?event, ?effect, "Canvas input");
            }
        }

        if response.double_clicked() {
            app.canvas
                .fit_to(ScreenRect::new(0.0, 0.0, rect.width(), rect.height()));
        }

        let scene = app.canvas.scene();
        let painter = ui.painter_at(rect);
        match (texture_id, scene.image_rect) {
            (Some(id), Some(image_rect)) => {
                draw_image(&painter, id, to_egui_rect(rect, &image_rect));
                draw_scene(&painter, rect, &scene);
            }
            _ => show_loading(&painter, rect),
        }
    });
}

/// Translate this frame's raw egui events into canvas input.
fn collect_events(
    ui: &egui::Ui,
    response: &egui::Response,
    rect: egui::Rect,
    keyboard_free: bool,
) -> Vec<InputEvent> {
    let local = |pos: egui::Pos2| Point::new(pos.x - rect.left(), pos.y - rect.top());
    let hovered = response.hovered();

    ui.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerButton {
                    pos,
                    button,
                    pressed: true,
                    ..
                } if hovered && rect.contains(*pos) => Some(InputEvent::PointerDown {
                    pos: local(*pos),
                    button: map_button(*button)?,
                }),
                egui::Event::PointerButton {
                    pos,
                    pressed: false,
                    ..
                } => Some(InputEvent::PointerUp { pos: local(*pos) }),
                egui::Event::PointerMoved(pos) => Some(InputEvent::PointerMove { pos: local(*pos) }),
                egui::Event::MouseWheel { delta, .. } if hovered && delta.y != 0.0 => {
                    let pos = i.pointer.hover_pos()?;
                    let direction = if delta.y > 0.0 {
                        ZoomDirection::In
                    } else {
                        ZoomDirection::Out
                    };
                    Some(InputEvent::Wheel {
                        pos: local(pos),
                        direction,
                    })
                }
                egui::Event::Key {
                    key: egui::Key::Delete,
                    pressed: true,
                    ..
                } if keyboard_free => Some(InputEvent::Key(CanvasKey::Delete)),
                egui::Event::Key {
                    key: egui::Key::Backspace,
                    pressed: true,
                    ..
                } if keyboard_free => Some(InputEvent::Key(CanvasKey::Backspace)),
                _ => None,
            })
            .collect()
    })
}

fn map_button(button: egui::PointerButton) -> Option<PointerButton> {
    match button {
        egui::PointerButton::Primary => Some(PointerButton::Primary),
        egui::PointerButton::Secondary => Some(PointerButton::Secondary),
        egui::PointerButton::Middle => Some(PointerButton::Middle),
        _ => None,
    }
}

fn to_egui_rect(panel: egui::Rect, r: &ScreenRect) -> egui::Rect {
    egui::Rect::from_min_size(
        panel.min + egui::vec2(r.x, r.y),
        egui::vec2(r.width, r.height),
    )
}

fn paint_background(ui: &egui::Ui, rect: egui::Rect) {
    ui.painter()
        .rect_filled(rect, 0.0, egui::Color32::from_gray(30));
}

fn draw_image(painter: &egui::Painter, texture_id: egui::TextureId, img_rect: egui::Rect) {
    painter.image(
        texture_id,
        img_rect,
        egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(1.0, 1.0)),
        egui::Color32::WHITE,
    );
}

fn draw_scene(painter: &egui::Painter, panel: egui::Rect, scene: &Scene) {
    for shape in &scene.shapes {
        draw_shape(painter, panel, shape);
    }
    for handle in &scene.handles.handles {
        let r = to_egui_rect(panel, &handle.rect);
        painter.rect_filled(r, 1.0, HANDLE_FILL);
        painter.rect_stroke(
            r,
            1.0,
            egui::Stroke::new(1.0, SELECTED_COLOR),
            egui::StrokeKind::Inside,
        );
    }
}

fn draw_shape(painter: &egui::Painter, panel: egui::Rect, shape: &ShapeView) {
    let r = to_egui_rect(panel, &shape.rect);
    let color = if shape.selected {
        SELECTED_COLOR
    } else {
        BOX_COLOR
    };
    painter.rect_stroke(
        r,
        0.0,
        egui::Stroke::new(2.0, color),
        egui::StrokeKind::Outside,
    );

    let text = format!("{} {:.0}%", shape.label, shape.confidence * 100.0);
    let galley = painter.layout_no_wrap(text, egui::FontId::proportional(12.0), egui::Color32::BLACK);
    let label_rect = egui::Rect::from_min_size(
        r.left_top() - egui::vec2(0.0, galley.size().y + 2.0),
        galley.size() + egui::vec2(4.0, 2.0),
    );
    painter.rect_filled(label_rect, 0.0, color);
    painter.galley(label_rect.min + egui::vec2(2.0, 1.0), galley, egui::Color32::BLACK);
}

fn show_loading(painter: &egui::Painter, rect: egui::Rect) {
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        "Loading image...",
        egui::FontId::proportional(16.0),
        egui::Color32::from_gray(120),
    );
}

fn show_placeholder(ui: &mut egui::Ui) {
    ui.centered_and_justified(|ui| {
        ui.label(
            egui::RichText::new("Open an image to detect and annotate")
                .size(18.0)
                .color(egui::Color32::from_gray(100)),
        );
    });
}
