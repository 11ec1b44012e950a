//! Main application state and UI loop
//!
//! Contains the App struct and main UI event handling logic

use crate::config::Config;
use crate::environment::Environment;
use crate::events::{Event as WorkerEvent, PollView, TimeRange};
use crate::ui::dashboard::state::KeyOutcome;
use crate::ui::dashboard::{DashboardState, render_dashboard};
use crate::ui::splash::render_splash;
use crate::workers::actions::UiAction;
use crossterm::event::{self, Event, KeyCode};
use ratatui::{Frame, Terminal, backend::Backend};
use std::time::{Duration, Instant};
use tokio::sync::{broadcast, mpsc, watch};

/// UI configuration data grouped by concern
#[derive(Debug, Clone)]
pub struct UIConfig {
    pub with_background_color: bool,
    pub time_range: TimeRange,
    pub config: Config,
}

/// The different screens in the application.
#[derive(Debug)]
pub enum Screen {
    /// Splash screen shown at the start of the application.
    Splash,
    /// Dashboard screen displaying portfolio data and market prices.
    Dashboard(Box<DashboardState>),
}

/// Application state
pub struct App {
    /// The start time of the application, used for computing uptime.
    start_time: Instant,

    /// The environment in which the application is running.
    environment: Environment,

    /// The current screen being displayed in the application.
    current_screen: Screen,

    /// Receives events from worker tasks.
    event_receiver: mpsc::Receiver<WorkerEvent>,

    /// Sends user actions to the dispatcher.
    action_sender: mpsc::Sender<UiAction>,

    /// Publishes the active view to the portfolio poller.
    view_sender: watch::Sender<PollView>,

    /// Broadcasts shutdown signal to worker tasks.
    shutdown_sender: broadcast::Sender<()>,

    ui_config: UIConfig,
}

impl App {
    /// Creates a new instance of the application.
    pub fn new(
        environment: Environment,
        event_receiver: mpsc::Receiver<WorkerEvent>,
        action_sender: mpsc::Sender<UiAction>,
        view_sender: watch::Sender<PollView>,
        shutdown_sender: broadcast::Sender<()>,
        ui_config: UIConfig,
    ) -> Self {
        Self {
            start_time: Instant::now(),
            environment,
            current_screen: Screen::Splash,
            event_receiver,
            action_sender,
            view_sender,
            shutdown_sender,
            ui_config,
        }
    }

    fn dashboard_state(&self) -> DashboardState {
        DashboardState::new(
            self.environment.clone(),
            self.start_time,
            self.ui_config.time_range,
            self.ui_config.with_background_color,
            self.ui_config.config.clone(),
        )
    }
}

/// Runs the application UI in a loop, handling events and rendering the appropriate screen.
pub async fn run<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> std::io::Result<()> {
    let splash_start = Instant::now();
    let splash_duration = Duration::from_secs(2);

    // UI event loop
    loop {
        // Queue all incoming events for processing
        while let Ok(event) = app.event_receiver.try_recv() {
            if let Screen::Dashboard(state) = &mut app.current_screen {
                state.add_event(event);
            }
        }

        // Update the state based on the current screen
        if let Screen::Dashboard(state) = &mut app.current_screen {
            state.update();
            // Updaters can change the view too (e.g. viewed model deleted).
            if state.take_view_dirty() {
                let _ = app.view_sender.send(state.poll_view());
            }
        }
        terminal.draw(|f| render(f, &app.current_screen))?;

        // Handle splash-to-dashboard transition
        if let Screen::Splash = app.current_screen {
            if splash_start.elapsed() >= splash_duration {
                app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                continue;
            }
        }

        // Poll for key events
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                // Skip events that are not KeyEventKind::Press
                if key.kind == event::KeyEventKind::Release {
                    continue;
                }

                match &mut app.current_screen {
                    Screen::Splash => {
                        if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        // Any other key press skips the splash screen
                        app.current_screen = Screen::Dashboard(Box::new(app.dashboard_state()));
                    }
                    Screen::Dashboard(state) => match state.handle_key(key) {
                        KeyOutcome::Quit => {
                            let _ = app.shutdown_sender.send(());
                            return Ok(());
                        }
                        KeyOutcome::Action(action) => {
                            let _ = app.action_sender.try_send(action);
                        }
                        KeyOutcome::ViewChanged => {
                            state.take_view_dirty();
                            let _ = app.view_sender.send(state.poll_view());
                        }
                        KeyOutcome::None => {}
                    },
                }
            }
        }
    }
}

/// Renders the current screen based on the application state.
fn render(f: &mut Frame, screen: &Screen) {
    match screen {
        Screen::Splash => render_splash(f),
        Screen::Dashboard(state) => render_dashboard(f, state),
    }
}
