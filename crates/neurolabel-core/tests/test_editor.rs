use approx::assert_abs_diff_eq;

use neurolabel_core::detection::DetectionId;
use neurolabel_core::editor::{BoxEditor, EditOutcome, Gesture, GestureKind, ShapeTransform};
use neurolabel_core::geometry::{BoundingBox, Point, ScreenRect};
use neurolabel_core::selection::HandleRole;
use neurolabel_core::viewport::Viewport;

const ID: DetectionId = DetectionId {
    generation: 1,
    slot: 0,
};

fn gesture(
    vp: &Viewport,
    kind: GestureKind,
    origin: BoundingBox,
    start: Point,
    end: Point,
) -> Gesture {
    let mut g = Gesture::new(ID, kind, origin, start, vp);
    g.update(end);
    g
}

fn committed(outcome: EditOutcome) -> BoundingBox {
    match outcome {
        EditOutcome::Committed(b) => b,
        EditOutcome::Rejected => panic!("edit unexpectedly rejected"),
    }
}

fn assert_box_eq(actual: BoundingBox, expected: BoundingBox) {
    assert_abs_diff_eq!(actual.x1, expected.x1, epsilon = 1e-3);
    assert_abs_diff_eq!(actual.y1, expected.y1, epsilon = 1e-3);
    assert_abs_diff_eq!(actual.x2, expected.x2, epsilon = 1e-3);
    assert_abs_diff_eq!(actual.y2, expected.y2, epsilon = 1e-3);
}

#[test]
fn test_gesture_without_movement() {
    let g = Gesture::new(
        ID,
        GestureKind::Move,
        BoundingBox::default(),
        Point::new(3.0, 4.0),
        &Viewport::default(),
    );
    assert!(!g.has_moved());
}

#[test]
fn test_move_at_identity() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Move,
        BoundingBox::new(10.0, 10.0, 110.0, 110.0),
        Point::new(50.0, 50.0),
        Point::new(70.0, 80.0),
    );
    let b = committed(BoxEditor::default().finish(&g, &vp));
    assert_box_eq(b, BoundingBox::new(30.0, 40.0, 130.0, 140.0));
}

#[test]
fn test_move_divides_screen_delta_by_scale() {
    let vp = Viewport {
        scale: 2.0,
        offset: Point::new(100.0, 0.0),
    };
    let g = gesture(
        &vp,
        GestureKind::Move,
        BoundingBox::new(10.0, 10.0, 20.0, 20.0),
        Point::new(130.0, 30.0),
        Point::new(140.0, 50.0),
    );
    let b = committed(BoxEditor::default().finish(&g, &vp));
    assert_box_eq(b, BoundingBox::new(15.0, 20.0, 25.0, 30.0));
}

#[test]
fn test_resize_bottom_right_grows_box() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::BottomRight),
        BoundingBox::new(0.0, 0.0, 100.0, 100.0),
        Point::new(100.0, 100.0),
        Point::new(150.0, 120.0),
    );
    let t = g.transform(&vp);
    assert_abs_diff_eq!(t.scale_x, 1.5, epsilon = 1e-6);
    assert_abs_diff_eq!(t.scale_y, 1.2, epsilon = 1e-6);

    let b = committed(BoxEditor::default().finish(&g, &vp));
    assert_box_eq(b, BoundingBox::new(0.0, 0.0, 150.0, 120.0));
}

#[test]
fn test_resize_top_left_keeps_opposite_corner() {
    let vp = Viewport {
        scale: 0.5,
        offset: Point::new(10.0, 10.0),
    };
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::TopLeft),
        BoundingBox::new(20.0, 20.0, 120.0, 120.0),
        Point::new(20.0, 20.0),
        Point::new(30.0, 25.0),
    );
    let b = committed(BoxEditor::default().finish(&g, &vp));
    assert_box_eq(b, BoundingBox::new(40.0, 30.0, 120.0, 120.0));
}

#[test]
fn test_side_grip_changes_one_axis() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::Left),
        BoundingBox::new(10.0, 10.0, 60.0, 60.0),
        Point::new(10.0, 35.0),
        Point::new(20.0, 90.0),
    );
    let b = committed(BoxEditor::default().finish(&g, &vp));
    assert_box_eq(b, BoundingBox::new(20.0, 10.0, 60.0, 60.0));
}

#[test]
fn test_resize_below_minimum_rejected() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::BottomRight),
        BoundingBox::new(10.0, 10.0, 110.0, 110.0),
        Point::new(110.0, 110.0),
        Point::new(12.0, 12.0),
    );
    assert_eq!(BoxEditor::default().finish(&g, &vp), EditOutcome::Rejected);
}

#[test]
fn test_flipped_resize_rejected() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::Right),
        BoundingBox::new(10.0, 10.0, 110.0, 110.0),
        Point::new(110.0, 60.0),
        Point::new(0.0, 60.0),
    );
    assert_eq!(BoxEditor::default().finish(&g, &vp), EditOutcome::Rejected);
}

#[test]
fn test_small_on_screen_when_zoomed_out_rejected() {
    // 40 image px at scale 0.1 is 4 screen px.
    let vp = Viewport {
        scale: 0.1,
        offset: Point::ZERO,
    };
    let g = gesture(
        &vp,
        GestureKind::Move,
        BoundingBox::new(0.0, 0.0, 40.0, 40.0),
        Point::new(1.0, 1.0),
        Point::new(3.0, 3.0),
    );
    assert_eq!(BoxEditor::default().finish(&g, &vp), EditOutcome::Rejected);
}

#[test]
fn test_small_in_image_space_when_zoomed_in_rejected() {
    // 4 image px at scale 5 is 20 screen px: passes the screen check only.
    let vp = Viewport {
        scale: 5.0,
        offset: Point::ZERO,
    };
    let g = gesture(
        &vp,
        GestureKind::Move,
        BoundingBox::new(10.0, 10.0, 14.0, 14.0),
        Point::new(55.0, 55.0),
        Point::new(60.0, 60.0),
    );
    assert_eq!(BoxEditor::default().finish(&g, &vp), EditOutcome::Rejected);
}

#[test]
fn test_transform_fold_and_rect() {
    let mut t = ShapeTransform::from_rect(&ScreenRect::new(10.0, 10.0, 20.0, 40.0));
    t.scale_x = 2.0;
    t.scale_y = 0.5;
    let folded = t.fold();
    assert_eq!(folded.width, 40.0);
    assert_eq!(folded.height, 20.0);
    assert_eq!(folded.scale_x, 1.0);
    assert_eq!(t.to_rect(), ScreenRect::new(10.0, 10.0, 40.0, 20.0));
}

#[test]
fn test_transform_rect_normalizes_flip() {
    let mut t = ShapeTransform::from_rect(&ScreenRect::new(50.0, 50.0, 20.0, 20.0));
    t.scale_x = -1.0;
    let rect = t.to_rect();
    assert_eq!(rect.x, 30.0);
    assert_eq!(rect.width, 20.0);
}

#[test]
fn test_finish_folds_scale_into_size() {
    let vp = Viewport::default();
    let g = gesture(
        &vp,
        GestureKind::Resize(HandleRole::Right),
        BoundingBox::new(0.0, 0.0, 40.0, 40.0),
        Point::new(40.0, 20.0),
        Point::new(80.0, 20.0),
    );
    let t = g.transform(&vp);
    assert_abs_diff_eq!(t.scale_x, 2.0, epsilon = 1e-6);
    assert_eq!(
        BoxEditor::default().commit(&t.fold(), &vp),
        BoxEditor::default().finish(&g, &vp)
    );
}

#[test]
fn test_gesture_outcomes_are_well_formed_or_rejected() {
    let origin = BoundingBox::new(20.0, 20.0, 80.0, 60.0);
    let deltas = [-200.0, -70.0, -58.0, -30.0, -3.0, 0.5, 4.0, 25.0, 61.0, 150.0];
    let editor = BoxEditor::default();

    for scale in [0.1, 1.0, 5.0] {
        let vp = Viewport {
            scale,
            offset: Point::new(7.0, -3.0),
        };
        let kinds = std::iter::once(GestureKind::Move)
            .chain(HandleRole::ALL.iter().map(|&r| GestureKind::Resize(r)));
        for kind in kinds {
            let start = vp.image_to_screen(Point::new(origin.x2, origin.y2));
            for dx in deltas {
                for dy in deltas {
                    let end = Point::new(start.x + dx, start.y + dy);
                    let g = gesture(&vp, kind, origin, start, end);
                    match editor.finish(&g, &vp) {
                        EditOutcome::Committed(b) => {
                            assert!(
                                b.x1 < b.x2 && b.y1 < b.y2,
                                "{kind:?} at scale {scale} by ({dx}, {dy}) gave {b:?}"
                            );
                            assert!(b.width() >= 5.0 && b.height() >= 5.0, "{b:?}");
                            assert!(b.is_well_formed());
                        }
                        EditOutcome::Rejected => {}
                    }
                }
            }
        }
    }
}
