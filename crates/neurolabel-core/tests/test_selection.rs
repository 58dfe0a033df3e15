mod common;

use neurolabel_core::consts::HANDLE_SIZE;
use neurolabel_core::geometry::{Point, ScreenRect};
use neurolabel_core::selection::{HandleRole, HandleSet, SelectionController};

use common::{canvas_with, record};

#[test]
fn test_handles_around_rect() {
    let canvas = canvas_with(vec![record("car", 0.9, 0.0, 0.0, 10.0, 10.0)], 100, 100);
    let id = canvas.store().iter().next().unwrap().id;
    let set = HandleSet::around(id, &ScreenRect::new(10.0, 20.0, 100.0, 50.0));

    assert_eq!(set.owner, Some(id));
    assert_eq!(set.handles.len(), 8);
    let bottom_right = set
        .handles
        .iter()
        .find(|h| h.role == HandleRole::BottomRight)
        .unwrap();
    assert_eq!(bottom_right.rect.width, HANDLE_SIZE);
    assert_eq!(bottom_right.rect.x + HANDLE_SIZE / 2.0, 110.0);
    assert_eq!(bottom_right.rect.y + HANDLE_SIZE / 2.0, 70.0);
}

#[test]
fn test_handle_hit_by_role() {
    let canvas = canvas_with(vec![record("car", 0.9, 0.0, 0.0, 10.0, 10.0)], 100, 100);
    let id = canvas.store().iter().next().unwrap().id;
    let set = HandleSet::around(id, &ScreenRect::new(0.0, 0.0, 100.0, 100.0));

    assert_eq!(set.hit(Point::new(1.0, 1.0)), Some(HandleRole::TopLeft));
    assert_eq!(set.hit(Point::new(50.0, 0.0)), Some(HandleRole::Top));
    assert_eq!(set.hit(Point::new(100.0, 50.0)), Some(HandleRole::Right));
    assert_eq!(set.hit(Point::new(50.0, 50.0)), None);
}

#[test]
fn test_edge_flags_cover_every_role() {
    for role in HandleRole::ALL {
        let horizontal = role.moves_left_edge() || role.moves_right_edge();
        let vertical = role.moves_top_edge() || role.moves_bottom_edge();
        assert!(horizontal || vertical, "{role} moves no edge");
        assert!(!(role.moves_left_edge() && role.moves_right_edge()));
        assert!(!(role.moves_top_edge() && role.moves_bottom_edge()));
    }
}

#[test]
fn test_role_display() {
    assert_eq!(HandleRole::TopLeft.to_string(), "top-left");
    assert_eq!(HandleRole::Bottom.to_string(), "bottom");
}

#[test]
fn test_single_selection() {
    let canvas = canvas_with(
        vec![
            record("a", 0.9, 0.0, 0.0, 10.0, 10.0),
            record("b", 0.9, 20.0, 20.0, 30.0, 30.0),
        ],
        100,
        100,
    );
    let ids: Vec<_> = canvas.store().iter().map(|d| d.id).collect();
    let mut selection = SelectionController::new();
    selection.select(ids[0]);
    selection.select(ids[1]);
    assert_eq!(selection.selected(), Some(ids[1]));
    assert!(!selection.is_selected(ids[0]));
    selection.deselect();
    assert_eq!(selection.selected(), None);
}

#[test]
fn test_bound_handles_empty_without_selection() {
    let canvas = canvas_with(vec![record("a", 0.9, 0.0, 0.0, 10.0, 10.0)], 100, 100);
    let scene = canvas.scene();
    let selection = SelectionController::new();
    assert!(selection.bound_handles(&scene.shapes).is_empty());
}

#[test]
fn test_bound_handles_follow_selected_shape() {
    let mut canvas = canvas_with(vec![record("a", 0.9, 10.0, 10.0, 50.0, 50.0)], 100, 100);
    let id = canvas.store().iter().next().unwrap().id;
    canvas.select(id);

    let scene = canvas.scene();
    assert_eq!(scene.handles.owner, Some(id));
    assert_eq!(scene.handles.handles.len(), 8);
}
