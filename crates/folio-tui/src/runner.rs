// TUI event loop and terminal management
use crate::app::{App, InputMode, LinkKind, Section};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use folio_core::{LoadHandle, Project};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::time::Duration;
use tokio::sync::mpsc::{error::TryRecvError, UnboundedReceiver};
use tracing::{info, warn};

/// How long to wait for a key before checking the fetch channel again
const TICK: Duration = Duration::from_millis(100);

/// Run the interface until the user quits.
///
/// `fetched` delivers the background GitHub load; `load` is cancelled on
/// exit so a late response never touches a torn-down UI.
pub async fn run_tui(
    mut app: App,
    mut fetched: UnboundedReceiver<Vec<Project>>,
    load: Option<LoadHandle>,
) -> anyhow::Result<()> {
    app.loading = load.is_some();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app, &mut fetched);

    if let Some(load) = load {
        if !load.is_finished() {
            info!("Quitting before the GitHub load finished, cancelling it");
        }
        load.cancel();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    fetched: &mut UnboundedReceiver<Vec<Project>>,
) -> anyhow::Result<()> {
    loop {
        loop {
            match fetched.try_recv() {
                Ok(projects) => app.apply_fetch_result(projects),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    app.loading = false;
                    break;
                }
            }
        }

        terminal.draw(|f| crate::ui::render(f, app))?;

        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if let Some(url) = handle_key(app, key) {
                    info!("Opening {}", url);
                    if let Err(e) = open::that(&url) {
                        warn!("Failed to open {}: {}", url, e);
                        app.error_message = Some(format!("Failed to open browser: {}", e));
                    }
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

/// Apply one key press; returns a URL when the key asks to open one
pub fn handle_key(app: &mut App, key: KeyEvent) -> Option<String> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        app.quit();
        return None;
    }
    app.clear_error();

    match app.input_mode {
        InputMode::Searching => {
            match key.code {
                KeyCode::Char(c) => app.push_search_char(c),
                KeyCode::Backspace => app.pop_search_char(),
                KeyCode::Enter | KeyCode::Esc => app.enter_normal_mode(),
                _ => {}
            }
            None
        }
        InputMode::Contact => {
            match key.code {
                KeyCode::Esc => app.enter_normal_mode(),
                KeyCode::Tab | KeyCode::Down => app.next_field(),
                KeyCode::BackTab | KeyCode::Up => app.previous_field(),
                KeyCode::Enter => app.submit_contact(),
                KeyCode::Backspace => app.contact_backspace(),
                KeyCode::Char(c) => app.contact_input(c),
                _ => {}
            }
            None
        }
        InputMode::Normal => handle_normal_key(app, key.code),
    }
}

fn handle_normal_key(app: &mut App, code: KeyCode) -> Option<String> {
    // The detail modal swallows everything but close and the two links
    if app.show_detail {
        match code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_detail(),
            KeyCode::Char('o') => return app.link_for(LinkKind::Code),
            KeyCode::Char('d') => return app.link_for(LinkKind::Demo),
            _ => {}
        }
        return None;
    }

    match code {
        KeyCode::Char('q') => app.quit(),
        KeyCode::Tab => app.next_section(),
        KeyCode::BackTab => app.previous_section(),
        KeyCode::Char(c @ '1'..='8') => {
            let index = c as usize - '1' as usize;
            app.select_section(Section::ALL[index]);
        }
        _ if app.section == Section::Projects => return handle_gallery_key(app, code),
        KeyCode::Char('i') | KeyCode::Enter if app.section == Section::Contact => {
            app.enter_contact_mode()
        }
        KeyCode::Char('j') | KeyCode::Down => app.scroll_down(),
        KeyCode::Char('k') | KeyCode::Up => app.scroll_up(),
        _ => {}
    }
    None
}

fn handle_gallery_key(app: &mut App, code: KeyCode) -> Option<String> {
    match code {
        KeyCode::Char('/') => app.enter_search_mode(),
        KeyCode::Esc => app.clear_search(),
        KeyCode::Char('l') | KeyCode::Char('j') | KeyCode::Right | KeyCode::Down => {
            app.next_card()
        }
        KeyCode::Char('h') | KeyCode::Char('k') | KeyCode::Left | KeyCode::Up => {
            app.previous_card()
        }
        KeyCode::Char(']') => app.next_category(),
        KeyCode::Char('[') => app.previous_category(),
        KeyCode::Char('n') | KeyCode::PageDown => app.next_page(),
        KeyCode::Char('p') | KeyCode::PageUp => app.previous_page(),
        KeyCode::Enter => app.open_detail(),
        KeyCode::Char('o') => return app.link_for(LinkKind::Code),
        KeyCode::Char('d') => return app.link_for(LinkKind::Demo),
        _ => {}
    }
    None
}
