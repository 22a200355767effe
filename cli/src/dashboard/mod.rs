pub mod app;
pub mod ui;

use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::Result;
use attendance_core::{AttendanceRepository, AttendanceService, MarkStatus};
use chrono::NaiveDate;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

use crate::dashboard::app::Dashboard;

pub fn run<R: AttendanceRepository>(service: AttendanceService<R>, today: NaiveDate) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = Dashboard::new(service, today);
    let res = run_app(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res
}

fn run_app<R: AttendanceRepository>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut Dashboard<R>,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                    KeyCode::Down | KeyCode::Char('j') => app.next(),
                    KeyCode::Up | KeyCode::Char('k') => app.previous(),
                    KeyCode::Left | KeyCode::Char('h') => app.previous_day(),
                    KeyCode::Right | KeyCode::Char('l') => app.next_day(),
                    KeyCode::Char('t') => app.jump_today(),
                    KeyCode::Char('p') => app.mark_selected(MarkStatus::Present),
                    KeyCode::Char('a') => app.mark_selected(MarkStatus::Absent),
                    KeyCode::Char('P') => app.mark_all(MarkStatus::Present),
                    _ => {}
                }
            }
        }
    }
}
