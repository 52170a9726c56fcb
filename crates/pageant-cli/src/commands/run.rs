use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};

use pageant_core::{AppConfig, PageManifest};
use pageant_tui::{
    app::App,
    event::{AppEvent, EventHandler},
    input::handle_key_event,
    load_theme,
    widgets::{HelpPopupWidget, PageViewWidget, StatusBarWidget},
};

pub fn run(config: Arc<AppConfig>, page: &Path) -> Result<()> {
    let manifest = PageManifest::load(page)?;
    tracing::debug!(page = %page.display(), blocks = manifest.blocks.len(), "loaded page");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        SetTitle("Pageant")
    )?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Load theme from config
    let theme = load_theme(&config.ui.theme);

    // The bootstrap: the app constructs all three interaction components
    // the moment the document is built
    let mut app = App::new(Arc::clone(&config), theme, &manifest)?;

    let event_handler = EventHandler::new(config.ui.tick_rate_ms, config.ui.animation_fps);

    let result = run_loop(&mut terminal, &mut app, &event_handler);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    event_handler: &EventHandler,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, app))?;

        match event_handler.next(app.is_animating())? {
            Some(AppEvent::Key(key)) => {
                let action = handle_key_event(key, app);
                app.apply_action(action, Instant::now());
            }
            Some(AppEvent::Mouse(mouse)) => app.on_mouse(mouse, Instant::now()),
            Some(AppEvent::Resize(width, height)) => app.on_resize(width, height),
            Some(AppEvent::Tick) | None => {}
        }

        // Animation frames and intersection recomputes run once per
        // iteration whether the wakeup was an event or a tick
        app.on_tick(Instant::now());

        if app.should_quit {
            return Ok(());
        }
    }
}

fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(1)])
        .split(frame.area());

    app.set_page_area(chunks[0]);
    PageViewWidget::render(frame, chunks[0], app);
    StatusBarWidget::render(frame, chunks[1], app);

    if app.show_help {
        HelpPopupWidget::render(frame, frame.area(), app);
    }
}
