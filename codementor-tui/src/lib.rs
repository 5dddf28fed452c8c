//! Code Mentor TUI - terminal front end for the code analysis endpoint.
//!
//! The interface is one form: a code buffer, a language selector, and a
//! submit action. Submissions go to the analysis endpoint on a background
//! task; outcomes come back over an mpsc channel drained by the event loop,
//! so the view's state has a single owner.

#![warn(clippy::all, clippy::pedantic)]

use anyhow::Result;
use chrono::{DateTime, Local};
use codementor_client::{AnalysisClient, ClientError};
use codementor_core::{AnalysisRequest, AnalysisResponse, Language, MentorConfig};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent,
        KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph, Tabs, Wrap},
    Frame, Terminal,
};
use std::{
    io::{self, Stdout},
    sync::mpsc,
    time::{Duration, Instant},
};
use unicode_width::UnicodeWidthStr;

/// The one user-facing failure message. Every client error collapses into it.
pub const ANALYZE_FAILED_MESSAGE: &str = "Something went wrong. Try again.";

/// Shown in the empty code buffer.
const CODE_PLACEHOLDER: &str = "Paste your code here...";

/// Result of one dispatched analysis request.
pub type AnalysisOutcome = std::result::Result<AnalysisResponse, ClientError>;

/// Form state owned by the view.
///
/// `loading` is true only between a valid submit and the settlement of that
/// request; after settlement at most one of `result` / `error` is shown.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Contents of the code buffer
    pub code: String,
    /// Currently selected language
    pub language: Language,
    /// Last successful response, replaced wholesale on each success
    pub result: Option<AnalysisResponse>,
    /// Whether a request is in flight
    pub loading: bool,
    /// User-facing error text, empty when there is none
    pub error: String,
    /// Whether keystrokes go into the code buffer
    pub editing: bool,
    /// Vertical scroll of the documentation pane
    pub scroll: u16,
    /// When the displayed result arrived
    pub received_at: Option<DateTime<Local>>,
}

impl AppState {
    fn new(language: Language, code: String) -> Self {
        Self {
            code,
            language,
            result: None,
            loading: false,
            error: String::new(),
            editing: false,
            scroll: 0,
            received_at: None,
        }
    }

    /// Start a submission.
    ///
    /// Empty or whitespace-only code is silently suppressed: no request is
    /// built and nothing changes. Otherwise the form enters the loading
    /// state, any prior error is cleared, and the request to dispatch is
    /// returned.
    pub fn begin_submit(&mut self) -> Option<AnalysisRequest> {
        if self.code.trim().is_empty() {
            return None;
        }

        self.loading = true;
        self.error.clear();

        Some(AnalysisRequest {
            code: self.code.clone(),
            language: self.language,
        })
    }

    /// Settle a request with its outcome.
    ///
    /// Success replaces the displayed result; failure sets the fixed error
    /// message and leaves the previous result untouched. Either way the
    /// loading state clears.
    pub fn apply_outcome(&mut self, outcome: AnalysisOutcome) {
        match outcome {
            Ok(response) => {
                self.result = Some(response);
                self.error.clear();
                self.received_at = Some(Local::now());
                self.scroll = 0;
            }
            Err(e) => {
                tracing::warn!(error = %e, "analysis failed");
                self.error = ANALYZE_FAILED_MESSAGE.to_string();
            }
        }
        self.loading = false;
    }
}

/// The terminal application.
pub struct CodeMentorTui {
    terminal: Option<Terminal<CrosstermBackend<Stdout>>>,
    state: AppState,
    client: AnalysisClient,
    outcome_tx: mpsc::Sender<AnalysisOutcome>,
    outcome_rx: mpsc::Receiver<AnalysisOutcome>,
    should_quit: bool,
}

impl CodeMentorTui {
    /// Create a TUI instance for interactive use, taking over the terminal.
    pub fn new(config: &MentorConfig, initial_code: String) -> Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let mut tui = Self::new_headless(config, initial_code);
        tui.terminal = Some(terminal);
        Ok(tui)
    }

    /// Create an instance without a terminal, for tests and one-shot use.
    pub fn new_headless(config: &MentorConfig, initial_code: String) -> Self {
        // One channel for the lifetime of the app: every dispatched request
        // sends its outcome here, so a late reply from an earlier submit
        // still lands in completion order.
        let (outcome_tx, outcome_rx) = mpsc::channel();

        Self {
            terminal: None,
            state: AppState::new(config.default_language, initial_code),
            client: AnalysisClient::from_config(config),
            outcome_tx,
            outcome_rx,
            should_quit: false,
        }
    }

    /// Current form state.
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> Result<()> {
        let tick_rate = Duration::from_millis(250);
        let mut last_tick = Instant::now();

        loop {
            self.drain_outcomes();
            self.draw()?;

            let timeout = tick_rate
                .checked_sub(last_tick.elapsed())
                .unwrap_or_else(|| Duration::from_secs(0));

            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            if self.should_quit {
                break;
            }

            if last_tick.elapsed() >= tick_rate {
                last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Apply any settled outcomes, in completion order.
    fn drain_outcomes(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.state.apply_outcome(outcome);
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }

        if self.state.editing {
            self.handle_edit_key(key);
        } else {
            self.handle_normal_key(key);
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.editing = false,
            KeyCode::Enter => self.state.code.push('\n'),
            KeyCode::Backspace => {
                self.state.code.pop();
            }
            KeyCode::Tab => self.state.code.push_str("    "),
            KeyCode::Char(c) => self.state.code.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('e') | KeyCode::Char('i') => self.state.editing = true,
            KeyCode::Char('n') => {
                self.state.code.clear();
                self.state.result = None;
                self.state.error.clear();
                self.state.scroll = 0;
                self.state.editing = true;
            }
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.state.language = self.state.language.next();
            }
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                self.state.language = self.state.language.prev();
            }
            KeyCode::Enter | KeyCode::Char('a') => self.submit(),
            KeyCode::Down | KeyCode::Char('j') => {
                self.state.scroll = self.state.scroll.saturating_add(1);
            }
            KeyCode::Up | KeyCode::Char('k') => {
                self.state.scroll = self.state.scroll.saturating_sub(1);
            }
            _ => {}
        }
    }

    /// Submit the current form. The submit hint is dimmed while loading but
    /// a second submit is not prevented; both outcomes drain through the
    /// same channel.
    fn submit(&mut self) {
        if let Some(request) = self.state.begin_submit() {
            self.dispatch(request);
        }
    }

    // Needs an ambient Tokio runtime; the binary enters one in main.
    fn dispatch(&self, request: AnalysisRequest) {
        let client = self.client.clone();
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let outcome = client.analyze(&request).await;
            // A closed receiver means the UI already shut down.
            let _ = tx.send(outcome);
        });
    }

    // ── Rendering ──

    fn draw(&mut self) -> Result<()> {
        if let Some(terminal) = &mut self.terminal {
            let state = self.state.clone();

            terminal.draw(move |f| {
                let size = f.size();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .constraints([
                        Constraint::Length(3),  // Header
                        Constraint::Length(3),  // Language selector + submit control
                        Constraint::Length(10), // Code buffer
                        Constraint::Length(1),  // Status line
                        Constraint::Min(0),     // Result
                        Constraint::Length(3),  // Footer
                    ])
                    .split(size);

                CodeMentorTui::render_header(f, chunks[0], &state);
                CodeMentorTui::render_form(f, chunks[1], &state);
                CodeMentorTui::render_code_input(f, chunks[2], &state);
                CodeMentorTui::render_status(f, chunks[3], &state);
                CodeMentorTui::render_result(f, chunks[4], &state);
                CodeMentorTui::render_footer(f, chunks[5]);
            })?;
        }
        Ok(())
    }

    fn render_header(f: &mut Frame, area: Rect, state: &AppState) {
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                "Code Mentor AI",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("language: {}", state.language.label()),
                Style::default().fg(Color::Gray),
            ),
        ]))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);

        f.render_widget(header, area);
    }

    fn render_form(f: &mut Frame, area: Rect, state: &AppState) {
        let chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(22)])
            .split(area);

        let labels: Vec<&str> = Language::all().iter().map(Language::label).collect();
        let selected = Language::all()
            .iter()
            .position(|l| *l == state.language)
            .unwrap_or(0);

        let tabs = Tabs::new(labels)
            .block(Block::default().borders(Borders::ALL).title("Language"))
            .style(Style::default().fg(Color::White))
            .highlight_style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD))
            .select(selected);
        f.render_widget(tabs, chunks[0]);

        // The submit control: dimmed while a request is in flight.
        let (label, style) = if state.loading {
            (
                "Analyzing...",
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            )
        } else {
            (
                "⏎ Analyze Code",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            )
        };

        let submit = Paragraph::new(label)
            .block(Block::default().borders(Borders::ALL).title("Submit"))
            .style(style)
            .alignment(Alignment::Center);
        f.render_widget(submit, chunks[1]);
    }

    fn render_code_input(f: &mut Frame, area: Rect, state: &AppState) {
        let block = Block::default()
            .borders(Borders::ALL)
            .title(" Code ")
            .border_style(if state.editing {
                Style::default().fg(Color::Cyan)
            } else {
                Style::default()
            });

        let inner = block.inner(area);
        f.render_widget(block, area);

        if state.code.is_empty() && !state.editing {
            let placeholder = Paragraph::new(CODE_PLACEHOLDER)
                .style(Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC));
            f.render_widget(placeholder, inner);
            return;
        }

        let code = Paragraph::new(state.code.as_str())
            .style(Style::default().fg(Color::White))
            .wrap(Wrap { trim: false });
        f.render_widget(code, inner);

        if state.editing && inner.width > 0 && inner.height > 0 {
            // Cursor after the last character; long lines that wrap are not
            // tracked, the cursor clamps to the block edge instead.
            let last_line = state.code.rsplit('\n').next().unwrap_or("");
            let line_count = state.code.split('\n').count() as u16;

            let max_x = inner.x + inner.width.saturating_sub(1);
            let max_y = inner.y + inner.height.saturating_sub(1);
            let cursor_x = (inner.x + last_line.width() as u16).min(max_x);
            let cursor_y = (inner.y + line_count.saturating_sub(1)).min(max_y);
            f.set_cursor(cursor_x, cursor_y);
        }
    }

    fn render_status(f: &mut Frame, area: Rect, state: &AppState) {
        let status = if !state.error.is_empty() {
            Paragraph::new(state.error.as_str())
                .style(Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
        } else if state.loading {
            Paragraph::new("Waiting for the analysis endpoint…")
                .style(Style::default().fg(Color::Yellow))
        } else if let Some(received_at) = state.received_at {
            Paragraph::new(format!("Last result {}", received_at.format("%H:%M:%S")))
                .style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new("")
        };

        f.render_widget(status, area);
    }

    fn render_result(f: &mut Frame, area: Rect, state: &AppState) {
        let Some(result) = &state.result else {
            Self::render_no_result(f, area);
            return;
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(30),
                Constraint::Percentage(30),
                Constraint::Percentage(40),
            ])
            .split(area);

        let explanation = Paragraph::new(result.explanation.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Explanation "))
            .wrap(Wrap { trim: true });
        f.render_widget(explanation, chunks[0]);

        let items: Vec<ListItem> = if result.improvements.is_empty() {
            vec![ListItem::new(Span::styled(
                "No suggestions",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            result
                .improvements
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    ListItem::new(Line::from(vec![
                        Span::styled(format!("{:>2}. ", i + 1), Style::default().fg(Color::Gray)),
                        Span::raw(item.as_str()),
                    ]))
                })
                .collect()
        };

        let improvements = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(" Improvements "));
        f.render_widget(improvements, chunks[1]);

        // Preformatted: no wrapping, scrollable with j/k.
        let documentation = Paragraph::new(result.documentation.as_str())
            .block(Block::default().borders(Borders::ALL).title(" Documentation "))
            .style(Style::default().fg(Color::Gray))
            .scroll((state.scroll, 0));
        f.render_widget(documentation, chunks[2]);
    }

    fn render_no_result(f: &mut Frame, area: Rect) {
        let no_result = Paragraph::new(vec![
            Line::from(""),
            Line::from("No analysis yet"),
            Line::from(""),
            Line::from("Press 'e' to edit code, Enter to analyze"),
        ])
        .block(Block::default().borders(Borders::ALL).title(" Result "))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

        f.render_widget(no_result, area);
    }

    fn render_footer(f: &mut Frame, area: Rect) {
        let help_text = Line::from(vec![
            Span::styled("q", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":quit "),
            Span::styled("e", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":edit "),
            Span::styled("Esc", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":done "),
            Span::styled("Tab", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":language "),
            Span::styled("Enter", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":analyze "),
            Span::styled("j/k", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":scroll "),
            Span::styled("n", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            Span::raw(":new"),
        ]);

        let help = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"));
        f.render_widget(help, area);
    }
}

impl Drop for CodeMentorTui {
    fn drop(&mut self) {
        if let Some(terminal) = &mut self.terminal {
            let _ = disable_raw_mode();
            let _ = execute!(
                terminal.backend_mut(),
                LeaveAlternateScreen,
                DisableMouseCapture
            );
            let _ = terminal.show_cursor();
        }
    }
}

/// Create and run the interactive TUI.
pub async fn run_tui(config: &MentorConfig, initial_code: String) -> Result<()> {
    let mut tui = CodeMentorTui::new(config, initial_code)?;
    tui.run()
}
