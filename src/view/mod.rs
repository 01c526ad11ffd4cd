//! TUI rendering and terminal management (impure shell)

pub mod chat_pane;
pub mod styles;

pub use chat_pane::ChatPane;
pub use styles::{ChatStyles, ColorConfig};

use crate::config::keybindings::KeyBindings;
use crate::config::ResolvedConfig;
use crate::model::{InputError, KeyAction};
use crate::source::{Feed, FeedEnd, FeedEvent, InputSource, SessionSink};
use crate::state::Session;
use crate::view_state::types::ViewportDimensions;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyEvent, KeyEventKind, MouseEvent,
        MouseEventKind,
    },
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::io::{self, Stdout};
use std::sync::mpsc::{Receiver, TryRecvError};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// How long the loop waits for terminal input before checking the feed again.
pub const FRAME_INTERVAL: Duration = Duration::from_millis(50);

/// Errors that can occur during TUI operations
#[derive(Debug, Error)]
pub enum TuiError {
    /// IO error during terminal operations
    #[error("Terminal IO error: {0}")]
    Io(#[from] io::Error),

    /// Input source error
    #[error("Input error: {0}")]
    Input(#[from] InputError),
}

/// What the loop should do after an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// Nothing visible changed.
    Continue,
    /// Draw the current state.
    Redraw,
    /// Clear the terminal, then draw.
    Repaint,
    /// Disconnect the feed and leave the loop.
    Quit,
}

/// Main TUI application
///
/// Generic over backend to support testing with TestBackend
pub struct TuiApp<B>
where
    B: Backend,
{
    terminal: Terminal<B>,
    session: Session,
    styles: ChatStyles,
    key_bindings: KeyBindings,
    feed_events: Receiver<FeedEvent>,
    feed: Option<Feed>,
    viewport: ViewportDimensions,
}

impl TuiApp<CrosstermBackend<Stdout>> {
    /// Run the main event loop
    ///
    /// Returns when the user quits or the feed fails.
    /// Event-driven: redraws only on arrivals that change the view, user input or resize.
    pub fn run(&mut self) -> Result<(), TuiError> {
        // Initial render so the screen isn't blank until the first event
        self.draw()?;

        loop {
            let event = if event::poll(FRAME_INTERVAL)? {
                Some(event::read()?)
            } else {
                None
            };
            if !self.step(event)? {
                return Ok(());
            }
        }
    }
}

impl<B> TuiApp<B>
where
    B: Backend,
{
    /// Create the app over an initialized terminal.
    ///
    /// `feed_events` is the receiving end of the [`SessionSink`] feeding `session`. The
    /// feed is disconnected when the app quits or is dropped.
    pub fn with_terminal(
        terminal: Terminal<B>,
        session: Session,
        styles: ChatStyles,
        feed_events: Receiver<FeedEvent>,
        feed: Option<Feed>,
    ) -> Result<Self, TuiError> {
        let viewport = ViewportDimensions::from(terminal.size()?);
        Ok(Self {
            terminal,
            session,
            styles,
            key_bindings: KeyBindings::default(),
            feed_events,
            feed,
            viewport,
        })
    }

    /// One loop iteration after the terminal poll: apply feed notifications, then the
    /// polled event, if any.
    ///
    /// Returns `false` once the app should stop.
    pub fn step(&mut self, event: Option<Event>) -> Result<bool, TuiError> {
        let feed = self.drain_feed_events();
        if !self.apply(feed)? {
            return Ok(false);
        }
        match event {
            Some(event) => {
                let control = self.handle_event(event);
                self.apply(control)
            }
            None => Ok(true),
        }
    }

    /// Route one terminal event.
    pub fn handle_event(&mut self, event: Event) -> Control {
        match event {
            Event::Key(key) => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            Event::Resize(width, height) => self.handle_resize(width, height),
            _ => Control::Continue,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Control {
        if key.kind == KeyEventKind::Release {
            return Control::Continue;
        }
        let Some(action) = self.key_bindings.get(key) else {
            return Control::Continue;
        };
        info!(action = action.name(), "Key action");
        match action {
            KeyAction::Quit => Control::Quit,
            KeyAction::Redraw => Control::Repaint,
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Control {
        match mouse.kind {
            MouseEventKind::ScrollUp => self.session.wheel_up(),
            MouseEventKind::ScrollDown => self.session.wheel_down(),
            _ => return Control::Continue,
        }
        Control::Redraw
    }

    fn handle_resize(&mut self, width: u16, height: u16) -> Control {
        debug!(width, height, "Terminal resized");
        self.viewport = ViewportDimensions::new(width, height);
        self.session.on_resize();
        Control::Redraw
    }

    /// Drain pending feed notifications without blocking.
    ///
    /// Many arrivals collapse into one redraw. A failed feed ends the session; a feed that
    /// reached end-of-input leaves the view open on what it delivered.
    pub fn drain_feed_events(&mut self) -> Control {
        let mut control = Control::Continue;
        loop {
            match self.feed_events.try_recv() {
                Ok(FeedEvent::Arrived) => control = Control::Redraw,
                Ok(FeedEvent::Closed(FeedEnd::Eof)) => {
                    info!(records = self.session.buffer().len(), "Input ended, view stays open");
                }
                Ok(FeedEvent::Closed(FeedEnd::Disconnected)) => {}
                Ok(FeedEvent::Closed(FeedEnd::Failed(e))) => {
                    warn!(error = %e, "Feed failed, ending session");
                    return Control::Quit;
                }
                Err(TryRecvError::Empty | TryRecvError::Disconnected) => return control,
            }
        }
    }

    /// Act on a [`Control`]. Returns `false` on quit.
    fn apply(&mut self, control: Control) -> Result<bool, TuiError> {
        match control {
            Control::Continue => {}
            Control::Redraw => self.draw()?,
            Control::Repaint => {
                self.terminal.clear()?;
                self.draw()?;
            }
            Control::Quit => {
                info!("Quit requested");
                self.disconnect();
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Render the current frame
    pub fn draw(&mut self) -> Result<(), TuiError> {
        let view = self.session.view();
        let styles = self.styles;
        self.terminal.draw(|frame| {
            frame.render_widget(ChatPane::new(&view, styles), frame.area());
        })?;
        Ok(())
    }

    /// Stop the feed, if one is attached. Idempotent.
    pub fn disconnect(&mut self) {
        if let Some(feed) = self.feed.take() {
            feed.disconnect();
        }
    }

    /// The shared session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Last known viewport size.
    pub fn viewport(&self) -> ViewportDimensions {
        self.viewport
    }

    /// The rendering backend (e.g. to inspect a `TestBackend` buffer).
    pub fn backend(&self) -> &B {
        self.terminal.backend()
    }

    /// Mutable access to the backend (e.g. to resize a `TestBackend`).
    pub fn backend_mut(&mut self) -> &mut B {
        self.terminal.backend_mut()
    }
}

/// Restores the terminal when dropped, on every exit path including panics.
struct TerminalGuard;

impl TerminalGuard {
    /// Enable raw mode, the alternate screen and mouse capture.
    fn enter() -> Result<Self, TuiError> {
        enable_raw_mode()?;
        // From here on, dropping the guard undoes whatever succeeded.
        let guard = TerminalGuard;
        let mut stdout = io::stdout();
        stdout.execute(EnterAlternateScreen)?;
        stdout.execute(EnableMouseCapture)?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(e) = restore_terminal() {
            warn!(error = %e, "Failed to restore terminal");
        }
    }
}

/// Initialize and run the TUI application for an input source
///
/// Starts the feed, sets up the terminal, runs the event loop, and restores the terminal
/// on exit.
///
/// Note: Logging must be initialized by caller before calling this function.
pub fn run_session(source: &InputSource, config: &ResolvedConfig) -> Result<(), TuiError> {
    let reader = source.open()?;
    let session = Session::new(config.limits());
    let (sink, feed_events) = SessionSink::new(session.clone());
    let feed = Feed::spawn(reader, sink)?;
    let styles = ChatStyles::new(ColorConfig::from_env_and_args(config.no_color));

    let _guard = TerminalGuard::enter()?;
    let terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    let mut app = TuiApp::with_terminal(terminal, session, styles, feed_events, Some(feed))?;
    info!(live = source.is_live(), viewport = ?app.viewport(), "Chat view started");

    app.run()
}

/// Restore terminal to normal state
///
/// Disables raw mode, mouse capture, and leaves alternate screen
fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(DisableMouseCapture)?;
    stdout.execute(LeaveAlternateScreen)?;
    Ok(())
}

#[cfg(test)]
#[path = "tui_app_tests.rs"]
mod tests;
