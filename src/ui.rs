use chrono::{NaiveDate, NaiveTime};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, Mode, Panel};
use crate::board::TaskCard;
use crate::calendar::{self, DayColumn};
use crate::drag::HitMap;
use crate::editor::{EditForm, Field};
use crate::placement::DropTarget;
use crate::store::TaskStore;
use crate::task::{Bucket, Priority};

const SOMEDAY_WIDTH: u16 = 32;
const AGENDA_WIDTH: u16 = 30;
const DAY_WIDTH: u16 = 26;
const OVERDUE_MAX_ROWS: u16 = 4;

const KEY_HINTS: &str =
    "a add · e edit · m move · x done · p priority · s subtask · d delete · Tab panel · q quit";

fn focused_style() -> Style {
    Style::default().fg(Color::Cyan)
}

fn target_style() -> Style {
    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::Low => Color::Blue,
        Priority::Medium => Color::Yellow,
        Priority::High => Color::LightRed,
        Priority::Urgent => Color::Red,
    }
}

fn card_line(card: &TaskCard, selected: bool) -> Line<'static> {
    let mut spans = vec![Span::raw(if card.completed { "[x] " } else { "[ ] " })];
    if let Some(time) = card.scheduled_time {
        spans.push(Span::styled(
            format!("{} ", calendar::format_time(time)),
            Style::default().fg(Color::DarkGray),
        ));
    }

    let title_style = if card.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else if card.overdue {
        Style::default().fg(Color::Red)
    } else {
        Style::default().fg(Color::White)
    };
    spans.push(Span::styled(card.title.clone(), title_style));

    if let Some(priority) = card.priority {
        spans.push(Span::styled(
            format!(" !{}", priority.label()),
            Style::default().fg(priority_color(priority)),
        ));
    }
    if card.subtasks_total > 0 {
        spans.push(Span::raw(format!(
            " {}/{}",
            card.subtasks_done, card.subtasks_total
        )));
    }
    if !card.people.is_empty() {
        spans.push(Span::styled(
            format!(" @{}", card.people.join(",")),
            Style::default().fg(Color::Magenta),
        ));
    }

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}

fn cards_in(store: &TaskStore, bucket: Bucket, today: NaiveDate) -> Vec<TaskCard> {
    store
        .tasks_in(bucket, today)
        .into_iter()
        .map(|t| TaskCard::from_task(t, today))
        .collect()
}

/// Offset that keeps `selected` inside a window of `height` rows.
fn scroll_for(selected: Option<usize>, height: usize) -> usize {
    match selected {
        Some(selected) if height > 0 && selected >= height => selected + 1 - height,
        _ => 0,
    }
}

struct Column<'a> {
    title: Line<'static>,
    cards: &'a [TaskCard],
    target: DropTarget,
    border: Style,
    selected: Option<usize>,
}

fn draw_cards(frame: &mut Frame, hits: &mut HitMap, area: Rect, column: Column<'_>) {
    let block = Block::default()
        .title(column.title)
        .borders(Borders::ALL)
        .border_style(column.border);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    hits.add_drop(area, column.target);

    if column.cards.is_empty() {
        frame.render_widget(
            Paragraph::new("No tasks").style(Style::default().fg(Color::DarkGray)),
            inner,
        );
        return;
    }

    let height = inner.height as usize;
    let offset = scroll_for(column.selected, height);
    for (index, card) in column.cards.iter().enumerate().skip(offset).take(height) {
        let row = Rect::new(inner.x, inner.y + (index - offset) as u16, inner.width, 1);
        frame.render_widget(
            Paragraph::new(card_line(card, column.selected == Some(index))),
            row,
        );
        hits.add_card(row, &card.id);
    }
}

fn border_for(app: &App, panel: Panel, target: DropTarget, is_cursor: bool) -> Style {
    if app.carry_target() == Some(target) {
        target_style()
    } else if app.focus == panel && is_cursor {
        focused_style()
    } else {
        Style::default()
    }
}

fn selection(app: &App, panel: Panel, is_cursor: bool) -> Option<usize> {
    (app.focus == panel && is_cursor && app.drag.cursor().is_none()).then_some(app.selected)
}

pub fn draw(frame: &mut Frame, app: &mut App) {
    app.hits.clear();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Min(0), Constraint::Length(1)])
        .split(frame.area());
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Length(SOMEDAY_WIDTH),
            Constraint::Min(DAY_WIDTH),
            Constraint::Length(AGENDA_WIDTH),
        ])
        .split(rows[0]);

    draw_someday(frame, app, columns[0]);
    draw_timeline(frame, app, columns[1]);
    draw_agenda(frame, app, columns[2]);
    draw_status_line(frame, app, rows[1]);

    if let Mode::Edit(form) = &app.mode {
        draw_editor(frame, app, form);
    }
    draw_drag_overlay(frame, app);
}

fn draw_someday(frame: &mut Frame, app: &mut App, area: Rect) {
    let cards = cards_in(&app.store, Bucket::Someday, app.today);
    let column = Column {
        title: Line::from(format!("Someday ({})", cards.len())),
        cards: &cards,
        target: DropTarget::Someday,
        border: border_for(app, Panel::Someday, DropTarget::Someday, true),
        selected: selection(app, Panel::Someday, true),
    };
    draw_cards(frame, &mut app.hits, area, column);
}

fn draw_timeline(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(calendar::range_label(
            app.store.timeline_start(),
            app.store.timeline_len(),
        ))
        .title_bottom("[ prev week · ] next week · t today")
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let overdue = cards_in(&app.store, Bucket::Overdue, app.today);
    let overdue_height = if overdue.is_empty() {
        0
    } else {
        (overdue.len() as u16).min(OVERDUE_MAX_ROWS) + 2
    };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(overdue_height), Constraint::Min(0)])
        .split(inner);

    if !overdue.is_empty() {
        let column = Column {
            title: Line::from(format!("Overdue ({})", overdue.len())),
            cards: &overdue,
            target: DropTarget::Overdue,
            border: match border_for(app, Panel::Overdue, DropTarget::Overdue, true) {
                style if style == Style::default() => Style::default().fg(Color::Red),
                style => style,
            },
            selected: selection(app, Panel::Overdue, true),
        };
        draw_cards(frame, &mut app.hits, sections[0], column);
    }

    let days = app.store.timeline_days(app.today);
    let visible = ((sections[1].width / DAY_WIDTH).max(1) as usize).min(days.len().max(1));
    if app.day_cursor < app.timeline_scroll {
        app.timeline_scroll = app.day_cursor;
    } else if app.day_cursor >= app.timeline_scroll + visible {
        app.timeline_scroll = app.day_cursor + 1 - visible;
    }

    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, visible as u32); visible])
        .split(sections[1]);

    for (slot, day) in days.iter().skip(app.timeline_scroll).take(visible).enumerate() {
        let index = app.timeline_scroll + slot;
        draw_day(frame, app, areas[slot], day, index == app.day_cursor);
    }
}

fn draw_day(frame: &mut Frame, app: &mut App, area: Rect, day: &DayColumn, is_cursor: bool) {
    let cards = cards_in(&app.store, Bucket::Day(day.date), app.today);
    let target = DropTarget::Day(day.date);
    let mut title = Line::from(format!(" {} ", day.label));
    if day.date == app.today {
        title = title.style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD));
    }
    let column = Column {
        title,
        cards: &cards,
        target,
        border: border_for(app, Panel::Timeline, target, is_cursor),
        selected: selection(app, Panel::Timeline, is_cursor),
    };
    draw_cards(frame, &mut app.hits, area, column);
}

fn draw_agenda(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!("Today · {}", app.today.format("%A, %B %-d")))
        .borders(Borders::ALL)
        .border_style(if app.focus == Panel::Agenda {
            focused_style()
        } else {
            Style::default()
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows: Vec<(NaiveTime, String, Option<TaskCard>)> = app
        .agenda_rows()
        .into_iter()
        .map(|row| {
            let label = if row.first_in_slot {
                row.slot.display.clone()
            } else {
                String::new()
            };
            let card = row.task.map(|t| TaskCard::from_task(t, app.today));
            (row.slot.time, label, card)
        })
        .collect();

    let height = inner.height as usize;
    let selected = (app.focus == Panel::Agenda).then_some(app.selected);
    if let Some(selected) = selected {
        if selected < app.agenda_scroll {
            app.agenda_scroll = selected;
        } else if height > 0 && selected >= app.agenda_scroll + height {
            app.agenda_scroll = selected + 1 - height;
        }
    }
    let carried = app.carry_target();

    for (index, (time, label, card)) in rows
        .iter()
        .enumerate()
        .skip(app.agenda_scroll)
        .take(height)
    {
        let rect = Rect::new(
            inner.x,
            inner.y + (index - app.agenda_scroll) as u16,
            inner.width,
            1,
        );
        let mut spans = vec![Span::styled(
            format!("{label:>8} "),
            Style::default().fg(Color::DarkGray),
        )];
        if let Some(card) = card {
            spans.extend(card_line(card, false).spans);
        }
        let mut style = Style::default();
        if carried == Some(DropTarget::TimeSlot(*time)) {
            style = style.bg(Color::Yellow).fg(Color::Black);
        } else if selected == Some(index) {
            style = style.add_modifier(Modifier::REVERSED);
        }
        frame.render_widget(Paragraph::new(Line::from(spans)).style(style), rect);

        app.hits.add_drop(rect, DropTarget::TimeSlot(*time));
        if let Some(card) = card {
            app.hits.add_card(rect, &card.id);
        }
    }
}

fn draw_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let line = match &app.mode {
        Mode::QuickAdd(title) => Line::from(vec![
            Span::styled("New task: ", focused_style()),
            Span::raw(format!("{title}▏")),
            Span::styled("  Enter add · Esc close", Style::default().fg(Color::DarkGray)),
        ]),
        Mode::AddSubtask { title, .. } => Line::from(vec![
            Span::styled("New subtask: ", focused_style()),
            Span::raw(format!("{title}▏")),
        ]),
        _ => match &app.status {
            Some(status) => Line::from(status.clone()),
            None => Line::from(Span::styled(KEY_HINTS, Style::default().fg(Color::DarkGray))),
        },
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}

fn field_line(form: &EditForm, field: Field, value: Vec<Span<'static>>) -> Line<'static> {
    let focused = form.focus == field;
    let label_style = if focused {
        focused_style().add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Gray)
    };
    let mut spans = vec![Span::styled(format!("{:<15}", field.label()), label_style)];
    spans.extend(value);
    if focused && !matches!(field, Field::Status | Field::Priority | Field::Subtasks) {
        spans.push(Span::raw("▏"));
    }
    Line::from(spans)
}

fn draw_editor(frame: &mut Frame, app: &App, form: &EditForm) {
    let area = centered_rect(60, 80, frame.area());
    frame.render_widget(Clear, area);

    let mut lines = vec![
        field_line(form, Field::Title, vec![Span::raw(form.title.clone())]),
        field_line(form, Field::Notes, vec![Span::raw(form.notes.clone())]),
    ];

    let mut tag_spans: Vec<Span<'static>> = form
        .tags
        .iter()
        .map(|t| Span::styled(format!("[{t}] "), Style::default().fg(Color::Green)))
        .collect();
    tag_spans.push(Span::raw(form.tag_input.clone()));
    lines.push(field_line(form, Field::Tags, tag_spans));
    lines.push(field_line(form, Field::DueDate, vec![Span::raw(form.due_date.clone())]));
    lines.push(field_line(
        form,
        Field::ScheduledTime,
        vec![Span::raw(form.scheduled_time.clone())],
    ));
    lines.push(field_line(
        form,
        Field::Status,
        vec![Span::raw(format!("< {} >", form.status.label()))],
    ));
    lines.push(field_line(
        form,
        Field::Priority,
        vec![Span::styled(
            format!("< {} >", form.priority.label()),
            Style::default().fg(priority_color(form.priority)),
        )],
    ));

    let subtasks = app
        .store
        .task(&form.task_id)
        .and_then(|t| t.subtasks.clone())
        .unwrap_or_default();
    lines.push(field_line(
        form,
        Field::Subtasks,
        vec![Span::raw(format!(
            "{} of {} done",
            subtasks.iter().filter(|s| s.completed).count(),
            subtasks.len()
        ))],
    ));
    for (index, subtask) in subtasks.iter().enumerate() {
        let mark = if subtask.completed { "●" } else { "○" };
        let mut style = Style::default();
        if subtask.completed {
            style = style.fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT);
        }
        if form.focus == Field::Subtasks && index == form.subtask_cursor {
            style = style.add_modifier(Modifier::REVERSED);
        }
        lines.push(Line::from(Span::styled(
            format!("               {mark} {}", subtask.title),
            style,
        )));
    }

    if !form.people.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(format!("People         {}", form.people.join(", "))));
    }
    if let Some(creator) = &form.created_by {
        lines.push(Line::from(format!("Created by     {creator}")));
    }

    lines.push(Line::from(""));
    let save_hint = if form.can_save() {
        Span::styled("Ctrl+S save", focused_style())
    } else {
        Span::styled("Ctrl+S save (title required)", Style::default().fg(Color::DarkGray))
    };
    lines.push(Line::from(vec![
        save_hint,
        Span::raw(" · Ctrl+D delete · Esc cancel"),
    ]));

    let block = Block::default()
        .title("Edit Task")
        .borders(Borders::ALL)
        .border_style(focused_style());
    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn draw_drag_overlay(frame: &mut Frame, app: &App) {
    let (Some((column, row)), Some(task_id)) = (app.drag.pointer(), app.drag.dragged_task()) else {
        return;
    };
    let Some(task) = app.store.task(task_id) else {
        return;
    };
    let bounds = frame.area();
    let width = (task.title.chars().count() as u16 + 4).min(30);
    let x = column.saturating_add(1).min(bounds.width.saturating_sub(width));
    let y = row.min(bounds.height.saturating_sub(1));
    let area = Rect::new(x, y, width, 1).intersection(bounds);
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(format!(" ⇢ {}", task.title))
            .style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::demo;
    use crate::store::DEFAULT_TIMELINE_DAYS;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use ratatui::{backend::TestBackend, Terminal};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn app() -> App {
        let mut store = TaskStore::with_timeline(today(), DEFAULT_TIMELINE_DAYS);
        demo::seed(&mut store, today());
        App::new(store, &Config::default(), today())
    }

    fn render(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(140, 40)).unwrap();
        terminal.draw(|frame| draw(frame, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_board_renders_all_panels() {
        let mut app = app();
        let screen = render(&mut app);
        assert!(screen.contains("Someday (1)"));
        assert!(screen.contains("Review quarterly goals"));
        assert!(screen.contains("Overdue (1)"));
        assert!(screen.contains("Today • 19"));
        assert!(screen.contains("Develop For Team UX"));
        assert!(screen.contains("Oct 19 - Nov 1, 2026"));
        assert!(screen.contains("Today · Monday, October 19"));
        assert!(screen.contains("8:00 AM"));
    }

    #[test]
    fn test_render_registers_hit_zones() {
        let mut app = app();
        render(&mut app);
        // Someday panel starts at column 0; its first card is on row 1.
        let id = app.selected_task_id().unwrap();
        assert_eq!(app.hits.card_at(5, 1), Some(id.as_str()));
        assert_eq!(app.hits.target_at(5, 10), Some(DropTarget::Someday));
        let slot = app.hits.target_at(140 - AGENDA_WIDTH + 5, 1);
        assert!(matches!(slot, Some(DropTarget::TimeSlot(_))));
    }

    #[test]
    fn test_editor_overlay_renders() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('e'), KeyModifiers::NONE));
        let screen = render(&mut app);
        assert!(screen.contains("Edit Task"));
        assert!(screen.contains("Created by     Alex Johnson"));
        assert!(screen.contains("Gather Q3 metrics"));
    }

    #[test]
    fn test_quick_add_prompt_in_status_line() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE));
        let screen = render(&mut app);
        assert!(screen.contains("New task:"));
    }
}
