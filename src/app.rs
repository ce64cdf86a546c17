//! Interactive board state and input handling.

use chrono::NaiveDate;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use tracing::{info, warn};

use crate::calendar::{self, TimeSlot};
use crate::config::Config;
use crate::drag::{DragController, DragOutcome, HitMap};
use crate::editor::{EditForm, Field};
use crate::error::Result;
use crate::placement::{self, DropTarget};
use crate::store::TaskStore;
use crate::task::{Bucket, Priority, SubtaskPatch, Task, TaskPatch};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Someday,
    Overdue,
    Timeline,
    Agenda,
}

#[derive(Debug, Clone)]
pub enum Mode {
    Normal,
    /// Quick entry into someday; stays open after each add.
    QuickAdd(String),
    AddSubtask { task_id: String, title: String },
    Edit(EditForm),
}

pub struct App {
    pub store: TaskStore,
    pub today: NaiveDate,
    pub slots: Vec<TimeSlot>,
    pub focus: Panel,
    pub selected: usize,
    pub day_cursor: usize,
    pub timeline_scroll: usize,
    pub agenda_scroll: usize,
    pub mode: Mode,
    pub drag: DragController,
    pub hits: HitMap,
    pub status: Option<String>,
    pub should_quit: bool,
}

/// One row of today's agenda: a slot and the task shown on that row.
pub struct AgendaRow<'a> {
    pub slot: &'a TimeSlot,
    pub first_in_slot: bool,
    pub task: Option<&'a Task>,
}

impl App {
    pub fn new(store: TaskStore, config: &Config, today: NaiveDate) -> Self {
        Self {
            store,
            today,
            slots: calendar::time_slots(
                config.slot_start_hour,
                config.slot_end_hour,
                config.slot_minutes,
            ),
            focus: Panel::Someday,
            selected: 0,
            day_cursor: 0,
            timeline_scroll: 0,
            agenda_scroll: 0,
            mode: Mode::Normal,
            drag: DragController::new(config.drag_threshold),
            hits: HitMap::default(),
            status: None,
            should_quit: false,
        }
    }

    pub fn set_today(&mut self, today: NaiveDate) {
        if today != self.today {
            info!(%today, "day changed");
            self.today = today;
        }
    }

    pub fn visible_days(&self) -> Vec<NaiveDate> {
        self.store
            .timeline_days(self.today)
            .into_iter()
            .map(|d| d.date)
            .collect()
    }

    pub fn cursor_day(&self) -> NaiveDate {
        calendar::add_days(self.store.timeline_start(), self.day_cursor as i64)
    }

    pub fn agenda_rows(&self) -> Vec<AgendaRow<'_>> {
        let mut rows = Vec::new();
        for slot in &self.slots {
            let tasks = self.store.tasks_in_slot(self.today, slot.time, self.today);
            if tasks.is_empty() {
                rows.push(AgendaRow {
                    slot,
                    first_in_slot: true,
                    task: None,
                });
            }
            for (i, task) in tasks.into_iter().enumerate() {
                rows.push(AgendaRow {
                    slot,
                    first_in_slot: i == 0,
                    task: Some(task),
                });
            }
        }
        rows
    }

    /// Selectable tasks of a panel, in display order. The agenda is
    /// row-based and handled separately.
    pub fn panel_tasks(&self, panel: Panel) -> Vec<&Task> {
        match panel {
            Panel::Someday => self.store.tasks_in(Bucket::Someday, self.today),
            Panel::Overdue => self.store.overdue_tasks(self.today),
            Panel::Timeline => self.store.tasks_in(Bucket::Day(self.cursor_day()), self.today),
            Panel::Agenda => Vec::new(),
        }
    }

    fn selectable_len(&self) -> usize {
        match self.focus {
            Panel::Agenda => self.agenda_rows().len(),
            panel => self.panel_tasks(panel).len(),
        }
    }

    pub fn selected_task_id(&self) -> Option<String> {
        match self.focus {
            Panel::Agenda => self
                .agenda_rows()
                .get(self.selected)
                .and_then(|row| row.task)
                .map(|t| t.id.clone()),
            panel => self
                .panel_tasks(panel)
                .get(self.selected)
                .map(|t| t.id.clone()),
        }
    }

    /// All drop zones in keyboard order.
    pub fn drop_targets(&self) -> Vec<DropTarget> {
        let mut targets = vec![DropTarget::Someday, DropTarget::Overdue];
        targets.extend(self.visible_days().into_iter().map(DropTarget::Day));
        targets.extend(self.slots.iter().map(|s| DropTarget::TimeSlot(s.time)));
        targets
    }

    /// Drop target under the keyboard drag cursor.
    pub fn carry_target(&self) -> Option<DropTarget> {
        self.drag
            .cursor()
            .and_then(|cursor| self.drop_targets().get(cursor).copied())
    }

    fn focus_target_index(&self) -> usize {
        match self.focus {
            Panel::Someday => 0,
            Panel::Overdue => 1,
            Panel::Timeline => 2 + self.day_cursor,
            Panel::Agenda => 2 + self.visible_days().len(),
        }
    }

    fn clamp_selection(&mut self) {
        if self.focus == Panel::Overdue && self.store.overdue_tasks(self.today).is_empty() {
            self.focus = Panel::Someday;
            self.selected = 0;
        }
        let len = self.selectable_len();
        if self.selected >= len {
            self.selected = len.saturating_sub(1);
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![Panel::Someday];
        if !self.store.overdue_tasks(self.today).is_empty() {
            order.push(Panel::Overdue);
        }
        order.extend([Panel::Timeline, Panel::Agenda]);
        let index = order.iter().position(|p| *p == self.focus).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.selected = 0;
    }

    fn report(&mut self, result: Result<impl Sized>, success: impl Into<String>) {
        match result {
            Ok(_) => self.status = Some(success.into()),
            Err(err) => {
                warn!(error = %err, "action failed");
                self.status = Some(err.to_string());
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match std::mem::replace(&mut self.mode, Mode::Normal) {
            Mode::Normal => self.handle_normal_key(key),
            Mode::QuickAdd(title) => self.handle_quick_add_key(key, title),
            Mode::AddSubtask { task_id, title } => self.handle_subtask_key(key, task_id, title),
            Mode::Edit(form) => self.handle_edit_key(key, form),
        }
        self.clamp_selection();
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        if self.drag.cursor().is_some() {
            self.handle_carry_key(key);
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('a') => self.mode = Mode::QuickAdd(String::new()),
            KeyCode::Char('k') if ctrl => self.mode = Mode::QuickAdd(String::new()),
            KeyCode::Tab => self.cycle_focus(true),
            KeyCode::BackTab => self.cycle_focus(false),
            KeyCode::Up => self.selected = self.selected.saturating_sub(1),
            KeyCode::Down => {
                if self.selected + 1 < self.selectable_len() {
                    self.selected += 1;
                }
            }
            KeyCode::Left if self.focus == Panel::Timeline => {
                self.day_cursor = self.day_cursor.saturating_sub(1);
                self.selected = 0;
            }
            KeyCode::Right if self.focus == Panel::Timeline => {
                if self.day_cursor + 1 < self.store.timeline_len() {
                    self.day_cursor += 1;
                }
                self.selected = 0;
            }
            KeyCode::Char('[') => self.store.shift_week(-1),
            KeyCode::Char(']') => self.store.shift_week(1),
            KeyCode::Char('t') => {
                self.store.set_timeline_start(self.today);
                self.day_cursor = 0;
            }
            KeyCode::Enter | KeyCode::Char('e') => self.open_editor(),
            KeyCode::Char('m') => {
                if let Some(id) = self.selected_task_id() {
                    let cursor = self.focus_target_index();
                    self.drag.pick_up(&id, cursor);
                    self.status = Some("Moving: arrows choose a target, Enter drops".to_string());
                }
            }
            KeyCode::Char('x') | KeyCode::Char(' ') => {
                if let Some(id) = self.selected_task_id() {
                    let result = self.store.toggle_completed(&id);
                    self.report(result, "Toggled completion");
                }
            }
            KeyCode::Char('p') => {
                if let Some(id) = self.selected_task_id() {
                    let current = self.store.task(&id).and_then(|t| t.priority);
                    let patch = TaskPatch {
                        priority: Some(Priority::cycle(current)),
                        ..Default::default()
                    };
                    let result = self.store.update_task(&id, patch);
                    self.report(result, "Priority changed");
                }
            }
            KeyCode::Char('s') => {
                if let Some(task_id) = self.selected_task_id() {
                    self.mode = Mode::AddSubtask {
                        task_id,
                        title: String::new(),
                    };
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = self.selected_task_id() {
                    let result = self.store.delete_task(&id);
                    self.report(result, "Task deleted");
                }
            }
            _ => {}
        }
    }

    fn handle_carry_key(&mut self, key: KeyEvent) {
        let len = self.drop_targets().len();
        match key.code {
            KeyCode::Left | KeyCode::Up => self.step_carry(-1, len),
            KeyCode::Right | KeyCode::Down => self.step_carry(1, len),
            KeyCode::Enter => {
                let targets = self.drop_targets();
                if let Some(outcome) = self.drag.put_down(&targets) {
                    self.finish_drag(outcome);
                }
            }
            KeyCode::Esc => {
                if let Some(outcome) = self.drag.cancel() {
                    self.finish_drag(outcome);
                }
            }
            _ => {}
        }
    }

    /// Steps the carried task's target; day targets scroll the timeline along.
    fn step_carry(&mut self, delta: isize, len: usize) {
        self.drag.step(delta, len);
        if let Some(DropTarget::Day(day)) = self.carry_target() {
            let offset = (day - self.store.timeline_start()).num_days();
            self.day_cursor = offset.max(0) as usize;
        }
    }

    fn handle_quick_add_key(&mut self, key: KeyEvent, mut title: String) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                if !title.trim().is_empty() {
                    let result = self.store.add_task(&title);
                    self.report(result, "Task added to someday");
                    title.clear();
                }
            }
            KeyCode::Backspace => {
                title.pop();
            }
            KeyCode::Char(c) => title.push(c),
            _ => {}
        }
        self.mode = Mode::QuickAdd(title);
    }

    fn handle_subtask_key(&mut self, key: KeyEvent, task_id: String, mut title: String) {
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Enter => {
                let result = self.store.add_subtask(&task_id, &title);
                self.report(result, "Subtask added");
                return;
            }
            KeyCode::Backspace => {
                title.pop();
            }
            KeyCode::Char(c) => title.push(c),
            _ => {}
        }
        self.mode = Mode::AddSubtask { task_id, title };
    }

    fn open_editor(&mut self) {
        if let Some(task) = self
            .selected_task_id()
            .and_then(|id| self.store.task(&id))
        {
            self.mode = Mode::Edit(EditForm::from_task(task));
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent, mut form: EditForm) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Esc => return,
            KeyCode::Char('s') if ctrl => {
                match form.to_patch() {
                    Ok(patch) => {
                        let result = self.store.update_task(&form.task_id, patch);
                        self.report(result, "Task saved");
                        return;
                    }
                    Err(err) => self.status = Some(err.to_string()),
                }
            }
            KeyCode::Char('d') if ctrl => {
                let result = self.store.delete_task(&form.task_id);
                self.report(result, "Task deleted");
                return;
            }
            KeyCode::Tab | KeyCode::Down => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left if form.focus == Field::Subtasks => {
                form.subtask_cursor = form.subtask_cursor.saturating_sub(1);
            }
            KeyCode::Right if form.focus == Field::Subtasks => {
                let total = self.subtask_count(&form.task_id);
                if form.subtask_cursor + 1 < total {
                    form.subtask_cursor += 1;
                }
            }
            KeyCode::Left => form.cycle_choice(-1),
            KeyCode::Right => form.cycle_choice(1),
            KeyCode::Char(' ') if form.focus == Field::Subtasks => {
                self.toggle_subtask(&form.task_id, form.subtask_cursor);
            }
            KeyCode::Backspace | KeyCode::Delete if form.focus == Field::Subtasks => {
                self.delete_subtask(&form.task_id, form.subtask_cursor);
                let total = self.subtask_count(&form.task_id);
                form.subtask_cursor = form.subtask_cursor.min(total.saturating_sub(1));
            }
            KeyCode::Enter if form.focus == Field::Tags => {
                form.add_tag();
            }
            KeyCode::Enter => form.next_field(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) => form.input_char(c),
            _ => {}
        }
        self.mode = Mode::Edit(form);
    }

    fn subtask_count(&self, task_id: &str) -> usize {
        self.store
            .task(task_id)
            .map(|t| t.subtask_progress().1)
            .unwrap_or(0)
    }

    fn subtask_at(&self, task_id: &str, index: usize) -> Option<(String, bool)> {
        self.store
            .task(task_id)?
            .subtasks
            .as_ref()?
            .get(index)
            .map(|s| (s.id.clone(), s.completed))
    }

    fn toggle_subtask(&mut self, task_id: &str, index: usize) {
        if let Some((subtask_id, completed)) = self.subtask_at(task_id, index) {
            let patch = SubtaskPatch {
                completed: Some(!completed),
                ..Default::default()
            };
            let result = self.store.update_subtask(task_id, &subtask_id, patch);
            self.report(result, "Subtask updated");
        }
    }

    fn delete_subtask(&mut self, task_id: &str, index: usize) {
        if let Some((subtask_id, _)) = self.subtask_at(task_id, index) {
            let result = self.store.delete_subtask(task_id, &subtask_id);
            self.report(result, "Subtask deleted");
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent) {
        if !matches!(self.mode, Mode::Normal) {
            return;
        }
        let (column, row) = (mouse.column, mouse.row);
        match mouse.kind {
            // A keyboard move in progress keeps the pointer out.
            MouseEventKind::Down(MouseButton::Left) if !self.drag.is_active() => {
                if let Some(id) = self.hits.card_at(column, row).map(str::to_string) {
                    self.drag.press(&id, column, row);
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                self.drag.motion(column, row);
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(outcome) = self.drag.release(column, row, &self.hits) {
                    self.finish_drag(outcome);
                }
            }
            _ => {}
        }
        self.clamp_selection();
    }

    fn finish_drag(&mut self, outcome: DragOutcome) {
        match outcome {
            DragOutcome::Click(task_id) => {
                if let Some(task) = self.store.task(&task_id) {
                    self.mode = Mode::Edit(EditForm::from_task(task));
                }
            }
            DragOutcome::Dropped { task_id, target } => {
                let result = placement::apply_drop(&mut self.store, &task_id, target, self.today);
                self.report(result, format!("Moved to {target}"));
            }
            DragOutcome::Cancelled => self.status = Some("Move cancelled".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::demo;
    use crate::store::DEFAULT_TIMELINE_DAYS;
    use crate::task::Location;
    use chrono::NaiveTime;
    use crossterm::event::KeyEventKind;
    use ratatui::layout::Rect;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn app() -> App {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        demo::seed(&mut store, today());
        App::new(store, &Config::default(), today())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_quick_add_stays_open() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        type_text(&mut app, "Buy milk");
        app.handle_key(key(KeyCode::Enter));
        type_text(&mut app, "Call mom");
        app.handle_key(key(KeyCode::Enter));
        assert!(matches!(app.mode, Mode::QuickAdd(ref t) if t.is_empty()));
        app.handle_key(key(KeyCode::Esc));
        assert!(matches!(app.mode, Mode::Normal));

        let someday = app.panel_tasks(Panel::Someday);
        assert_eq!(someday[0].title, "Call mom");
        assert_eq!(someday[1].title, "Buy milk");
    }

    #[test]
    fn test_ctrl_k_opens_quick_add() {
        let mut app = app();
        app.handle_key(ctrl('k'));
        assert!(matches!(app.mode, Mode::QuickAdd(_)));
    }

    #[test]
    fn test_keyboard_move_to_day() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.handle_key(key(KeyCode::Char('m')));
        // someday -> overdue -> today -> tomorrow
        for _ in 0..3 {
            app.handle_key(key(KeyCode::Right));
        }
        assert_eq!(
            app.carry_target(),
            Some(DropTarget::Day(calendar::add_days(today(), 1)))
        );
        app.handle_key(key(KeyCode::Enter));

        let task = app.store.task(&id).unwrap();
        assert_eq!(task.location, Location::Day(calendar::add_days(today(), 1)));
        assert!(!app.drag.is_active());
    }

    #[test]
    fn test_keyboard_drop_on_overdue_reports_error() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.handle_key(key(KeyCode::Char('m')));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.store.task(&id).unwrap().location, Location::Someday);
        assert_eq!(app.status.as_deref(), Some("cannot drop onto overdue"));
    }

    #[test]
    fn test_mouse_drag_onto_time_slot() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        let nine = NaiveTime::from_hms_opt(9, 0, 0).unwrap();
        app.hits.add_drop(Rect::new(0, 0, 30, 20), DropTarget::Someday);
        app.hits.add_card(Rect::new(1, 1, 28, 1), &id);
        app.hits.add_drop(Rect::new(60, 5, 20, 1), DropTarget::TimeSlot(nine));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 40, 3));
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), 65, 5));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 65, 5));

        let task = app.store.task(&id).unwrap();
        assert_eq!(task.location, Location::Day(today()));
        assert_eq!(task.scheduled_time, Some(nine));
        assert!(app.agenda_rows().iter().any(|r| r.task.map(|t| &t.id) == Some(&id)));
    }

    #[test]
    fn test_click_opens_editor_and_save() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.hits.add_card(Rect::new(1, 1, 28, 1), &id);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1));
        assert!(matches!(app.mode, Mode::Edit(_)));

        type_text(&mut app, "!");
        app.handle_key(ctrl('s'));
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.store.task(&id).unwrap().title, "Review quarterly goals!");
    }

    #[test]
    fn test_editor_refuses_blank_title() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.handle_key(key(KeyCode::Char('e')));
        for _ in 0..40 {
            app.handle_key(key(KeyCode::Backspace));
        }
        app.handle_key(ctrl('s'));
        assert!(matches!(app.mode, Mode::Edit(_)));
        assert_eq!(app.status.as_deref(), Some("title must not be empty"));
        assert_eq!(app.store.task(&id).unwrap().title, "Review quarterly goals");
    }

    #[test]
    fn test_editor_toggles_subtask() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.handle_key(key(KeyCode::Char('e')));
        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::Right));
        app.handle_key(key(KeyCode::Char(' ')));
        assert_eq!(app.store.task(&id).unwrap().subtask_progress(), (2, 3));
    }

    #[test]
    fn test_add_subtask_and_toggle_complete() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.handle_key(key(KeyCode::Char('s')));
        type_text(&mut app, "Book room");
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.store.task(&id).unwrap().subtask_progress(), (1, 4));

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.store.task(&id).unwrap().completed);
    }

    #[test]
    fn test_week_navigation_keys() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char(']')));
        assert_eq!(app.store.timeline_start(), calendar::add_days(today(), 7));
        app.handle_key(key(KeyCode::Char('t')));
        assert_eq!(app.store.timeline_start(), today());
    }

    #[test]
    fn test_focus_cycle_visits_overdue() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Panel::Overdue);
        assert_eq!(
            app.selected_task_id().and_then(|id| app.store.task(&id).map(|t| t.title.clone())),
            Some("Client presentation".to_string())
        );
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Panel::Timeline);
        assert_eq!(app.panel_tasks(Panel::Timeline).len(), 1);
    }

    #[test]
    fn test_clearing_overdue_moves_focus_to_someday() {
        let mut app = app();
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.focus, Panel::Overdue);

        app.handle_key(key(KeyCode::Char('x')));
        assert!(app.store.overdue_tasks(today()).is_empty());
        assert_eq!(app.focus, Panel::Someday);
        assert_eq!(app.selected, 0);
        assert!(app.selected_task_id().is_some());
    }

    #[test]
    fn test_mouse_press_ignored_while_carrying() {
        let mut app = app();
        let id = app.selected_task_id().unwrap();
        app.hits.add_card(Rect::new(1, 1, 28, 1), &id);
        app.handle_key(key(KeyCode::Char('m')));

        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), 2, 1));
        app.handle_mouse(mouse(MouseEventKind::Up(MouseButton::Left), 2, 1));
        assert!(matches!(app.mode, Mode::Normal));
        assert_eq!(app.drag.cursor(), Some(0));
    }

    #[test]
    fn test_ctrl_c_quits_from_any_mode() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('a')));
        let mut event = ctrl('c');
        event.kind = KeyEventKind::Press;
        app.handle_key(event);
        assert!(app.should_quit);
    }
}
