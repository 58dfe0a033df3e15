//! Input classification and the canvas interaction state machine.
//!
//! ```text
//! Idle      --click shape-------------> Selected
//! Selected  --click background--------> Idle
//! Selected  --Delete/Backspace--------> Idle          (entry removed)
//! Selected  --drag body or grip-------> Manipulating --release--> Selected
//! any       --drag background---------> Panning      --release--> previous
//! wheel zooms at the pointer in every state and never changes it.
//! ```

use tracing::debug;

use crate::canvas::AnnotationCanvas;
use crate::detection::DetectionId;
use crate::editor::{EditOutcome, Gesture, GestureKind};
use crate::geometry::Point;
use crate::hit::{hit_test, HitTarget};
use crate::viewport::ZoomDirection;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Middle,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasKey {
    Delete,
    Backspace,
}

/// Raw input, in screen coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    PointerDown { pos: Point, button: PointerButton },
    PointerMove { pos: Point },
    PointerUp { pos: Point },
    Wheel { pos: Point, direction: ZoomDirection },
    Key(CanvasKey),
}

/// Coarse interaction state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Selected,
    Manipulating,
    Panning,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pan {
    last: Point,
    moved: bool,
    /// A release without movement counts as a background click.
    click_deselects: bool,
    resume: Mode,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Interaction {
    Idle,
    Selected,
    /// A press on a shape or grip. Until the pointer moves this is still a
    /// click and reports [`Mode::Selected`].
    Manipulating(Gesture),
    Panning(Pan),
}

impl Interaction {
    pub fn mode(&self) -> Mode {
        match self {
            Self::Idle => Mode::Idle,
            Self::Selected => Mode::Selected,
            Self::Manipulating(g) if g.has_moved() => Mode::Manipulating,
            Self::Manipulating(_) => Mode::Selected,
            Self::Panning(_) => Mode::Panning,
        }
    }

    pub fn gesture(&self) -> Option<&Gesture> {
        match self {
            Self::Manipulating(g) => Some(g),
            _ => None,
        }
    }

    pub fn in_gesture(&self) -> bool {
        matches!(self, Self::Manipulating(_) | Self::Panning(_))
    }
}

/// What a dispatched event changed, for the caller's bookkeeping.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CanvasEffect {
    None,
    SelectionChanged,
    /// A gesture moved; only the preview differs from the model.
    Preview,
    ViewportChanged,
    BoxCommitted(DetectionId),
    /// The gesture ended below the size minimum; the prior box was kept.
    EditRejected(DetectionId),
    Removed(DetectionId),
}

impl AnnotationCanvas {
    pub fn dispatch(&mut self, event: InputEvent) -> CanvasEffect {
        match event {
            InputEvent::PointerDown { pos, button } => self.pointer_down(pos, button),
            InputEvent::PointerMove { pos } => self.pointer_move(pos),
            InputEvent::PointerUp { pos } => self.pointer_up(pos),
            InputEvent::Wheel { pos, direction } => {
                self.viewport.zoom_at(pos, direction);
                CanvasEffect::ViewportChanged
            }
            InputEvent::Key(CanvasKey::Delete | CanvasKey::Backspace) => {
                if self.interaction.mode() != Mode::Selected || self.interaction.in_gesture() {
                    return CanvasEffect::None;
                }
                self.delete_selected()
                    .map_or(CanvasEffect::None, CanvasEffect::Removed)
            }
        }
    }

    fn pointer_down(&mut self, pos: Point, button: PointerButton) -> CanvasEffect {
        if self.interaction.in_gesture() {
            return CanvasEffect::None;
        }
        let resume = self.interaction.mode();

        match button {
            PointerButton::Middle => {
                self.start_pan(pos, false, resume);
                CanvasEffect::None
            }
            PointerButton::Secondary => CanvasEffect::None,
            PointerButton::Primary => match hit_test(&self.scene(), pos) {
                HitTarget::Handle(role) => {
                    self.begin_gesture(GestureKind::Resize(role), pos);
                    CanvasEffect::None
                }
                HitTarget::Shape(id) => {
                    let changed = !self.selection.is_selected(id);
                    self.selection.select(id);
                    self.begin_gesture(GestureKind::Move, pos);
                    if changed {
                        CanvasEffect::SelectionChanged
                    } else {
                        CanvasEffect::None
                    }
                }
                HitTarget::Background => {
                    self.start_pan(pos, true, resume);
                    CanvasEffect::None
                }
            },
        }
    }

    fn pointer_move(&mut self, pos: Point) -> CanvasEffect {
        match &mut self.interaction {
            Interaction::Manipulating(gesture) => {
                gesture.update(pos);
                if gesture.has_moved() {
                    CanvasEffect::Preview
                } else {
                    CanvasEffect::None
                }
            }
            Interaction::Panning(pan) => {
                let delta = pos.delta_from(pan.last);
                if delta.is_zero() {
                    return CanvasEffect::None;
                }
                pan.last = pos;
                pan.moved = true;
                self.viewport.pan(delta);
                CanvasEffect::ViewportChanged
            }
            _ => CanvasEffect::None,
        }
    }

    fn pointer_up(&mut self, pos: Point) -> CanvasEffect {
        match self.interaction {
            Interaction::Manipulating(mut gesture) => {
                gesture.update(pos);
                self.interaction = Interaction::Selected;
                if !gesture.has_moved() {
                    return CanvasEffect::None;
                }
                match self.editor.finish(&gesture, &self.viewport) {
                    EditOutcome::Committed(bbox) => {
                        self.store.update_box(gesture.id, bbox);
                        CanvasEffect::BoxCommitted(gesture.id)
                    }
                    EditOutcome::Rejected => CanvasEffect::EditRejected(gesture.id),
                }
            }
            Interaction::Panning(pan) => {
                let delta = pos.delta_from(pan.last);
                let moved = pan.moved || !delta.is_zero();
                if !delta.is_zero() {
                    self.viewport.pan(delta);
                }

                if moved {
                    self.interaction = resume_state(pan.resume);
                    CanvasEffect::ViewportChanged
                } else if pan.click_deselects {
                    let had_selection = self.selection.selected().is_some();
                    self.selection.deselect();
                    self.interaction = Interaction::Idle;
                    if had_selection {
                        CanvasEffect::SelectionChanged
                    } else {
                        CanvasEffect::None
                    }
                } else {
                    self.interaction = resume_state(pan.resume);
                    CanvasEffect::None
                }
            }
            _ => CanvasEffect::None,
        }
    }

    fn begin_gesture(&mut self, kind: GestureKind, pos: Point) {
        let Some(id) = self.selection.selected() else {
            return;
        };
        let Some(detection) = self.store.get(id) else {
            return;
        };
        debug!(%id, ?kind, "Gesture started");
        self.interaction = Interaction::Manipulating(Gesture::new(
            id,
            kind,
            detection.bbox,
            pos,
            &self.viewport,
        ));
    }

    fn start_pan(&mut self, pos: Point, click_deselects: bool, resume: Mode) {
        self.interaction = Interaction::Panning(Pan {
            last: pos,
            moved: false,
            click_deselects,
            resume,
        });
    }
}

fn resume_state(mode: Mode) -> Interaction {
    match mode {
        Mode::Selected => Interaction::Selected,
        _ => Interaction::Idle,
    }
}
