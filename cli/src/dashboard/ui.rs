use attendance_core::{AttendanceRepository, AttendanceStatus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Gauge, Paragraph, Row, Table},
    Frame,
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::dashboard::app::Dashboard;

const PRESENT: Color = Color::Green;
const ABSENT: Color = Color::Red;
const UNMARKED: Color = Color::DarkGray;

pub fn draw<R: AttendanceRepository>(f: &mut Frame, app: &mut Dashboard<R>) {
    let size = f.area();

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Footer/Help
        ])
        .split(size);

    let today_hint = if app.date == app.today { " (today)" } else { "" };
    let header = Paragraph::new(Line::from(vec![
        Span::styled("ATTENDANCE  ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)),
        Span::raw(format!("< {}{} >", app.date.format("%a %Y-%m-%d"), today_hint)),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(header, main_chunks[0]);

    let content_chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(65), Constraint::Percentage(35)])
        .split(main_chunks[1]);

    draw_roster(f, app, content_chunks[0]);
    draw_summary(f, app, content_chunks[1]);

    let help = app.message.clone().unwrap_or_else(|| {
        "j/k: Select | p/a: Present/Absent | P: All present | h/l: Day | t: Today | q: Quit".to_string()
    });
    let footer = Paragraph::new(truncate(&help, main_chunks[2].width as usize))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(footer, main_chunks[2]);
}

fn status_style(status: AttendanceStatus) -> Style {
    match status {
        AttendanceStatus::Present => Style::default().fg(PRESENT),
        AttendanceStatus::Absent => Style::default().fg(ABSENT),
        AttendanceStatus::Unmarked => Style::default().fg(UNMARKED),
    }
}

fn draw_roster<R: AttendanceRepository>(f: &mut Frame, app: &mut Dashboard<R>, area: Rect) {
    let rows: Vec<Row> = app
        .rows
        .iter()
        .map(|(employee, status)| {
            let icon = match status {
                AttendanceStatus::Present => "●",
                AttendanceStatus::Absent => "✖",
                AttendanceStatus::Unmarked => "○",
            };
            Row::new(vec![
                Span::styled(icon, status_style(*status)),
                Span::raw(employee.employee_code.clone()),
                Span::styled(employee.name.clone(), Style::default().add_modifier(Modifier::BOLD)),
                Span::raw(employee.department.clone()),
                Span::styled(status.to_string(), status_style(*status)),
            ])
        })
        .collect();

    let table = Table::new(
        rows,
        [
            Constraint::Length(2),  // Icon
            Constraint::Length(10), // Code
            Constraint::Min(12),    // Name
            Constraint::Length(14), // Department
            Constraint::Length(11), // Status
        ],
    )
    .header(Row::new(vec!["", "Code", "Name", "Department", "Status"]).style(Style::default().fg(Color::Yellow)))
    .block(Block::default().title(" Employees ").borders(Borders::ALL).border_type(BorderType::Rounded))
    .row_highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
    .highlight_symbol(">> ");

    f.render_stateful_widget(table, area, &mut app.state);
}

fn draw_summary<R: AttendanceRepository>(f: &mut Frame, app: &Dashboard<R>, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(area);

    let stats = &app.stats;
    let gauges = [
        (" Present ", stats.present, PRESENT),
        (" Absent ", stats.absent, ABSENT),
        (" Not Marked ", stats.not_marked, UNMARKED),
    ];
    for (i, (title, count, color)) in gauges.into_iter().enumerate() {
        let ratio = if stats.total > 0 { count as f64 / stats.total as f64 } else { 0.0 };
        let gauge = Gauge::default()
            .block(Block::default().title(title).borders(Borders::ALL).border_type(BorderType::Rounded))
            .gauge_style(Style::default().fg(color))
            .ratio(ratio)
            .label(format!("{} / {}", count, stats.total));
        f.render_widget(gauge, chunks[i]);
    }

    let inner_width = chunks[3].width.saturating_sub(2) as usize;
    let detail = match app.selected_employee() {
        Some((employee, status)) => vec![
            Line::from(Span::styled(
                truncate(&employee.name, inner_width),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Code: ", Style::default().fg(Color::Blue)),
                Span::raw(employee.employee_code.clone()),
            ]),
            Line::from(vec![
                Span::styled("Dept: ", Style::default().fg(Color::Blue)),
                Span::raw(truncate(&employee.department, inner_width.saturating_sub(6))),
            ]),
            Line::from(vec![
                Span::styled("Role: ", Style::default().fg(Color::Blue)),
                Span::raw(truncate(&employee.position, inner_width.saturating_sub(6))),
            ]),
            Line::from(vec![
                Span::styled("Status: ", Style::default().fg(Color::Blue)),
                Span::styled(status.to_string(), status_style(*status)),
            ]),
        ],
        None => vec![Line::from("No employees in roster")],
    };

    let detail_block = Paragraph::new(detail)
        .block(Block::default().title(" Detail ").borders(Borders::ALL).border_type(BorderType::Rounded));
    f.render_widget(detail_block, chunks[3]);
}

/// Cuts `text` to at most `max_width` terminal columns, ending in `…` when cut.
fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}
