use crate::form::Field;
use crate::render::{RenderedList, Row};
use crate::tui::state::{AppState, Focus};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};

pub fn draw(f: &mut Frame, state: &mut AppState) {
    let v_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(5),
            Constraint::Length(3),
        ])
        .split(f.area());

    let h_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[0]);

    let tasks_title = if state.loading {
        " Tasks (Loading...) ".to_string()
    } else {
        format!(" Tasks ({}) ", state.rendered.tasks.rows().len())
    };
    draw_list(
        f,
        h_chunks[0],
        &state.rendered.tasks,
        &mut state.task_state,
        tasks_title,
        state.active_focus == Focus::Tasks,
    );
    let events_title = format!(" Events ({}) ", state.rendered.events.rows().len());
    draw_list(
        f,
        h_chunks[1],
        &state.rendered.events,
        &mut state.event_state,
        events_title,
        state.active_focus == Focus::Events,
    );

    draw_form(f, v_chunks[1], state);

    // --- Footer ---
    let f_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(v_chunks[2]);
    let status_color = if state.message.starts_with("Error") {
        Color::Red
    } else {
        Color::Cyan
    };
    let status = Paragraph::new(state.message.clone())
        .style(Style::default().fg(status_color))
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::TOP | Borders::BOTTOM)
                .title(" Status "),
        );
    let help_text = "a:Add | Space:Done | d:Del | s:Sort | q:Quit";
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::TOP | Borders::BOTTOM)
                .title(" Actions "),
        );
    f.render_widget(status, f_chunks[0]);
    f.render_widget(help, f_chunks[1]);
}

fn draw_list(
    f: &mut Frame,
    area: Rect,
    list: &RenderedList,
    list_state: &mut ListState,
    title: String,
    focused: bool,
) {
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(border_style);

    match list {
        RenderedList::Placeholder(text) => {
            let empty = Paragraph::new(*text)
                .style(
                    Style::default()
                        .fg(Color::DarkGray)
                        .add_modifier(Modifier::ITALIC),
                )
                .block(block);
            f.render_widget(empty, area);
        }
        RenderedList::Rows(rows) => {
            let items: Vec<ListItem> = rows.iter().map(row_item).collect();
            let widget = List::new(items).block(block).highlight_style(
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .bg(Color::DarkGray),
            );
            f.render_stateful_widget(widget, area, list_state);
        }
    }
}

fn row_item(row: &Row) -> ListItem<'static> {
    let checkbox = if row.completed { "[x] " } else { "[ ] " };
    let name_style = if row.completed {
        Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().fg(Color::White)
    };
    let mut spans = vec![
        Span::raw(checkbox),
        Span::styled(row.name.clone(), name_style),
        Span::styled(
            format!("  ⏰ {}", row.time_label),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(date) = &row.date_label {
        spans.push(Span::styled(
            format!("  📅 {}", date),
            Style::default().fg(Color::Magenta),
        ));
    }
    ListItem::new(Line::from(spans))
}

fn draw_form(f: &mut Frame, area: Rect, state: &AppState) {
    let focused = state.active_focus == Focus::Form;
    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let date_label = if state.form.date_required() {
        "Date (YYYY-MM-DD) *"
    } else {
        "Date (YYYY-MM-DD)"
    };

    let line = |field: Field, label: &str| {
        let active = focused && state.field == field;
        let value_style = if active {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::styled(
                format!("{:<20}", label),
                Style::default().fg(Color::DarkGray),
            ),
            Span::styled(format!("{}{}", state.form.field(field), cursor), value_style),
        ])
    };

    let lines = vec![
        line(Field::Name, "Name *"),
        line(Field::Time, "Time (HH:MM) *"),
        line(Field::Date, date_label),
    ];
    let form = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", state.form.submit_label()))
            .border_style(border_style),
    );
    f.render_widget(form, area);
}
