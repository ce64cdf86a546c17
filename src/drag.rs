//! Drag gesture state: mouse press/move/release and keyboard pick-up/drop.

use ratatui::layout::{Position, Rect};

use crate::placement::DropTarget;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Zone {
    Card(String),
    Drop(DropTarget),
}

/// Screen areas recorded by the last render, used to resolve pointer events.
#[derive(Debug, Default)]
pub struct HitMap {
    zones: Vec<(Rect, Zone)>,
}

impl HitMap {
    pub fn clear(&mut self) {
        self.zones.clear();
    }

    pub fn add_card(&mut self, area: Rect, task_id: &str) {
        self.zones.push((area, Zone::Card(task_id.to_string())));
    }

    pub fn add_drop(&mut self, area: Rect, target: DropTarget) {
        self.zones.push((area, Zone::Drop(target)));
    }

    /// The topmost card under the point.
    pub fn card_at(&self, column: u16, row: u16) -> Option<&str> {
        let pos = Position::new(column, row);
        self.zones.iter().rev().find_map(|(area, zone)| match zone {
            Zone::Card(id) if area.contains(pos) => Some(id.as_str()),
            _ => None,
        })
    }

    /// The topmost drop zone under the point.
    pub fn target_at(&self, column: u16, row: u16) -> Option<DropTarget> {
        let pos = Position::new(column, row);
        self.zones.iter().rev().find_map(|(area, zone)| match zone {
            Zone::Drop(target) if area.contains(pos) => Some(*target),
            _ => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    /// Mouse is down on a card but has not moved far enough to drag.
    Pressed { task_id: String, origin: (u16, u16) },
    Dragging { task_id: String, pointer: (u16, u16) },
    /// Keyboard drag; `cursor` indexes the board's drop target list.
    Carrying { task_id: String, cursor: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragOutcome {
    /// Released without moving: treat as a click on the card.
    Click(String),
    Dropped { task_id: String, target: DropTarget },
    Cancelled,
}

#[derive(Debug, Default)]
pub struct DragController {
    state: DragState,
    threshold: u16,
}

impl DragController {
    pub fn new(threshold: u16) -> Self {
        Self {
            state: DragState::Idle,
            threshold,
        }
    }

    pub fn is_active(&self) -> bool {
        !matches!(self.state, DragState::Idle)
    }

    /// Task being dragged or carried, if the gesture has started.
    pub fn dragged_task(&self) -> Option<&str> {
        match &self.state {
            DragState::Dragging { task_id, .. } | DragState::Carrying { task_id, .. } => {
                Some(task_id)
            }
            _ => None,
        }
    }

    pub fn pointer(&self) -> Option<(u16, u16)> {
        match self.state {
            DragState::Dragging { pointer, .. } => Some(pointer),
            _ => None,
        }
    }

    pub fn press(&mut self, task_id: &str, column: u16, row: u16) {
        self.state = DragState::Pressed {
            task_id: task_id.to_string(),
            origin: (column, row),
        };
    }

    /// Returns true when this motion turned a press into a drag.
    pub fn motion(&mut self, column: u16, row: u16) -> bool {
        if let DragState::Dragging { pointer, .. } = &mut self.state {
            *pointer = (column, row);
            return false;
        }
        let DragState::Pressed { origin, .. } = &self.state else {
            return false;
        };
        let distance = origin.0.abs_diff(column).max(origin.1.abs_diff(row));
        if distance < self.threshold.max(1) {
            return false;
        }
        if let DragState::Pressed { task_id, .. } = std::mem::take(&mut self.state) {
            self.state = DragState::Dragging {
                task_id,
                pointer: (column, row),
            };
        }
        true
    }

    pub fn release(&mut self, column: u16, row: u16, hits: &HitMap) -> Option<DragOutcome> {
        match std::mem::take(&mut self.state) {
            DragState::Pressed { task_id, .. } => Some(DragOutcome::Click(task_id)),
            DragState::Dragging { task_id, .. } => Some(match hits.target_at(column, row) {
                Some(target) => DragOutcome::Dropped { task_id, target },
                None => DragOutcome::Cancelled,
            }),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn pick_up(&mut self, task_id: &str, cursor: usize) {
        self.state = DragState::Carrying {
            task_id: task_id.to_string(),
            cursor,
        };
    }

    /// Moves the keyboard cursor by `delta`, clamped to `len` targets.
    pub fn step(&mut self, delta: isize, len: usize) {
        if let DragState::Carrying { cursor, .. } = &mut self.state {
            if len == 0 {
                return;
            }
            let next = (*cursor as isize + delta).clamp(0, len as isize - 1);
            *cursor = next as usize;
        }
    }

    pub fn cursor(&self) -> Option<usize> {
        match self.state {
            DragState::Carrying { cursor, .. } => Some(cursor),
            _ => None,
        }
    }

    pub fn put_down(&mut self, targets: &[DropTarget]) -> Option<DragOutcome> {
        match std::mem::take(&mut self.state) {
            DragState::Carrying { task_id, cursor } => Some(match targets.get(cursor) {
                Some(target) => DragOutcome::Dropped {
                    task_id,
                    target: *target,
                },
                None => DragOutcome::Cancelled,
            }),
            other => {
                self.state = other;
                None
            }
        }
    }

    pub fn cancel(&mut self) -> Option<DragOutcome> {
        match std::mem::take(&mut self.state) {
            DragState::Idle => None,
            _ => Some(DragOutcome::Cancelled),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day() -> DropTarget {
        DropTarget::Day(NaiveDate::from_ymd_opt(2026, 10, 20).unwrap())
    }

    fn hits() -> HitMap {
        let mut hits = HitMap::default();
        hits.add_drop(Rect::new(0, 0, 20, 20), DropTarget::Someday);
        hits.add_card(Rect::new(1, 1, 18, 3), "t1");
        hits.add_drop(Rect::new(20, 0, 20, 20), day());
        hits
    }

    #[test]
    fn test_hit_map_lookup() {
        let hits = hits();
        assert_eq!(hits.card_at(2, 2), Some("t1"));
        assert_eq!(hits.card_at(2, 10), None);
        assert_eq!(hits.target_at(2, 2), Some(DropTarget::Someday));
        assert_eq!(hits.target_at(25, 5), Some(day()));
        assert_eq!(hits.target_at(50, 5), None);
    }

    #[test]
    fn test_press_release_without_motion_is_click() {
        let mut drag = DragController::new(1);
        drag.press("t1", 2, 2);
        assert!(!drag.motion(2, 2));
        assert_eq!(
            drag.release(2, 2, &hits()),
            Some(DragOutcome::Click("t1".to_string()))
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn test_mouse_drag_drops_on_target() {
        let mut drag = DragController::new(2);
        drag.press("t1", 2, 2);
        assert!(!drag.motion(3, 2));
        assert!(drag.motion(10, 2));
        assert_eq!(drag.dragged_task(), Some("t1"));
        drag.motion(25, 5);

        assert_eq!(
            drag.release(25, 5, &hits()),
            Some(DragOutcome::Dropped {
                task_id: "t1".to_string(),
                target: day(),
            })
        );
    }

    #[test]
    fn test_release_outside_zones_cancels() {
        let mut drag = DragController::new(1);
        drag.press("t1", 2, 2);
        drag.motion(60, 2);
        assert_eq!(drag.release(60, 2, &hits()), Some(DragOutcome::Cancelled));
    }

    #[test]
    fn test_release_when_idle_does_nothing() {
        let mut drag = DragController::new(1);
        assert_eq!(drag.release(0, 0, &hits()), None);
    }

    #[test]
    fn test_keyboard_carry_and_drop() {
        let targets = [DropTarget::Someday, DropTarget::Overdue, day()];
        let mut drag = DragController::new(1);
        drag.pick_up("t1", 0);
        drag.step(1, targets.len());
        drag.step(5, targets.len());
        assert_eq!(drag.cursor(), Some(2));
        drag.step(-1, targets.len());
        assert_eq!(drag.cursor(), Some(1));
        drag.step(1, targets.len());

        assert_eq!(
            drag.put_down(&targets),
            Some(DragOutcome::Dropped {
                task_id: "t1".to_string(),
                target: day(),
            })
        );
        assert!(!drag.is_active());
    }

    #[test]
    fn test_cancel_carry() {
        let mut drag = DragController::new(1);
        drag.pick_up("t1", 0);
        assert_eq!(drag.cancel(), Some(DragOutcome::Cancelled));
        assert_eq!(drag.cancel(), None);
    }
}
