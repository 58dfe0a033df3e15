#![allow(dead_code)]

use std::io::Cursor;

use neurolabel_core::canvas::AnnotationCanvas;
use neurolabel_core::detection::DetectionRecord;
use neurolabel_core::dispatcher::{CanvasEffect, InputEvent, PointerButton};
use neurolabel_core::geometry::{BoundingBox, Point};

pub fn record(label: &str, confidence: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> DetectionRecord {
    DetectionRecord {
        label: label.to_string(),
        confidence,
        bbox: BoundingBox::new(x1, y1, x2, y2),
    }
}

/// Canvas showing a decoded `width x height` image at identity zoom.
pub fn canvas_with(records: Vec<DetectionRecord>, width: u32, height: u32) -> AnnotationCanvas {
    let mut canvas = AnnotationCanvas::new(0.0);
    canvas.load_detections(records);
    canvas.image_decoded(width, height);
    canvas
}

/// Encode a solid gray PNG in memory.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = image::RgbImage::from_pixel(width, height, image::Rgb([128, 128, 128]));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

pub fn press(canvas: &mut AnnotationCanvas, x: f32, y: f32) -> CanvasEffect {
    canvas.dispatch(InputEvent::PointerDown {
        pos: Point::new(x, y),
        button: PointerButton::Primary,
    })
}

pub fn drag_to(canvas: &mut AnnotationCanvas, x: f32, y: f32) -> CanvasEffect {
    canvas.dispatch(InputEvent::PointerMove {
        pos: Point::new(x, y),
    })
}

pub fn release(canvas: &mut AnnotationCanvas, x: f32, y: f32) -> CanvasEffect {
    canvas.dispatch(InputEvent::PointerUp {
        pos: Point::new(x, y),
    })
}

/// Press and release at the same spot.
pub fn click(canvas: &mut AnnotationCanvas, x: f32, y: f32) -> CanvasEffect {
    press(canvas, x, y);
    release(canvas, x, y)
}
