use hospital_network::network::HospitalNetwork;
use hospital_network::shell::{Form, FormDefaults, FormKind, Tab};
use hospital_network::views;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Info(String),
    Error(String),
}

pub struct App {
    pub network: HospitalNetwork,
    pub current_tab: Tab,
    /// Position in `current_tab.forms()`
    pub form_index: usize,
    pub field_index: usize,
    /// One form per kind, in tab order; values survive tab switches
    forms: Vec<Form>,
    pub status: Option<Status>,
    /// Detail lines of the last outcome (record display), cleared on tab change
    pub output: Vec<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(network: HospitalNetwork, defaults: &FormDefaults) -> Self {
        let forms = Tab::ALL
            .iter()
            .flat_map(|tab| tab.forms())
            .map(|kind| Form::new(*kind, defaults))
            .collect();

        Self {
            network,
            current_tab: Tab::Setup,
            form_index: 0,
            field_index: 0,
            forms,
            status: None,
            output: Vec::new(),
            should_quit: false,
        }
    }

    pub fn current_kind(&self) -> FormKind {
        let kinds = self.current_tab.forms();
        kinds[self.form_index.min(kinds.len() - 1)]
    }

    fn form_position(&self) -> usize {
        let kind = self.current_kind();
        self.forms.iter().position(|f| f.kind == kind).unwrap_or(0)
    }

    pub fn current_form(&self) -> &Form {
        &self.forms[self.form_position()]
    }

    fn current_form_mut(&mut self) -> &mut Form {
        let i = self.form_position();
        &mut self.forms[i]
    }

    pub fn next_tab(&mut self) {
        self.current_tab = self.current_tab.next();
        self.form_index = 0;
        self.field_index = 0;
        self.output.clear();
    }

    pub fn previous_tab(&mut self) {
        self.current_tab = self.current_tab.previous();
        self.form_index = 0;
        self.field_index = 0;
        self.output.clear();
    }

    pub fn next_form(&mut self) {
        let len = self.current_tab.forms().len();
        self.form_index = (self.form_index + 1) % len;
        self.field_index = 0;
    }

    pub fn previous_form(&mut self) {
        let len = self.current_tab.forms().len();
        self.form_index = (self.form_index + len - 1) % len;
        self.field_index = 0;
    }

    pub fn next_field(&mut self) {
        let len = self.current_kind().fields().len();
        self.field_index = (self.field_index + 1) % len;
    }

    pub fn previous_field(&mut self) {
        let len = self.current_kind().fields().len();
        self.field_index = (self.field_index + len - 1) % len;
    }

    pub fn input_char(&mut self, c: char) {
        let i = self.field_index;
        if let Some(value) = self.current_form_mut().values.get_mut(i) {
            value.push(c);
        }
    }

    pub fn backspace(&mut self) {
        let i = self.field_index;
        if let Some(value) = self.current_form_mut().values.get_mut(i) {
            value.pop();
        }
    }

    pub fn clear_field(&mut self) {
        let i = self.field_index;
        if let Some(value) = self.current_form_mut().values.get_mut(i) {
            value.clear();
        }
    }

    /// Run the focused form against the network
    pub fn submit(&mut self) {
        let i = self.form_position();
        match self.forms[i].submit(&mut self.network) {
            Ok(outcome) => {
                if !outcome.detail.is_empty() {
                    self.output = outcome.detail;
                }
                self.status = Some(Status::Info(outcome.message));
            }
            Err(err) => self.status = Some(Status::Error(err.to_string())),
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('u') if ctrl => self.clear_field(),
            KeyCode::Tab => {
                if key.modifiers.contains(KeyModifiers::SHIFT) {
                    self.previous_tab();
                } else {
                    self.next_tab();
                }
            }
            KeyCode::BackTab => self.previous_tab(),
            KeyCode::PageDown => self.next_form(),
            KeyCode::PageUp => self.previous_form(),
            KeyCode::Down => self.next_field(),
            KeyCode::Up => self.previous_field(),
            KeyCode::Enter => self.submit(),
            KeyCode::Backspace => self.backspace(),
            KeyCode::Char(c) if !ctrl => self.input_char(c),
            _ => {}
        }
    }
}

pub fn run_ui(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let res = run_app(&mut terminal, app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res?;
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            app.handle_key(key);
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Content
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0], app);

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(chunks[1]);

    render_forms(f, body[0], app);
    render_state(f, body[1], app);
    render_status_bar(f, chunks[2], app);
}

fn render_header(f: &mut Frame, area: Rect, app: &App) {
    let mut tab_spans = vec![Span::styled(
        "🏥 Hospital Network  ",
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
    )];

    for (i, tab) in Tab::ALL.iter().enumerate() {
        if i > 0 {
            tab_spans.push(Span::raw(" │ "));
        }
        let style = if *tab == app.current_tab {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        tab_spans.push(Span::styled(tab.title().to_string(), style));
    }

    let net = &app.network;
    tab_spans.push(Span::raw("  |  "));
    tab_spans.push(Span::styled(
        format!(
            "Centers: {}  Staff: {}  Patients: {}  Appointments: {}",
            net.centers().count(),
            net.staff().count(),
            net.patients().count(),
            net.appointments().count()
        ),
        Style::default().fg(Color::White),
    ));

    let header = Paragraph::new(vec![Line::from(tab_spans)])
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));
    f.render_widget(header, area);
}

fn render_forms(f: &mut Frame, area: Rect, app: &App) {
    let kinds = app.current_tab.forms();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(kinds.len() as u16 + 2), Constraint::Min(0)])
        .split(area);

    let menu: Vec<Line> = kinds
        .iter()
        .map(|kind| {
            if *kind == app.current_kind() {
                Line::from(Span::styled(
                    format!("→ {}", kind.title()),
                    Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(Span::raw(format!("  {}", kind.title())))
            }
        })
        .collect();
    let menu = Paragraph::new(menu).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {} ", app.current_tab.title())),
    );
    f.render_widget(menu, chunks[0]);

    let form = app.current_form();
    let lines: Vec<Line> = form
        .fields()
        .iter()
        .zip(&form.values)
        .enumerate()
        .map(|(i, (spec, value))| {
            let focused = i == app.field_index;
            let marker = if spec.required { "*" } else { "" };
            let label_style = if focused {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };

            let mut spans = vec![
                Span::styled(if focused { "→ " } else { "  " }, label_style),
                Span::styled(format!("{}{}: ", spec.label, marker), label_style),
            ];
            if value.is_empty() {
                spans.push(Span::styled(
                    spec.format.hint(),
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
                ));
            } else {
                spans.push(Span::raw(value.clone()));
            }
            if focused {
                spans.push(Span::styled("▏", Style::default().fg(Color::Yellow)));
            }
            Line::from(spans)
        })
        .collect();

    let fields = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White))
            .title(format!(" {} ", form.kind.title())),
    );
    f.render_widget(fields, chunks[1]);
}

fn render_state(f: &mut Frame, area: Rect, app: &App) {
    let summary: Vec<Line> = views::tab_summary(&app.network, app.current_tab)
        .into_iter()
        .map(Line::from)
        .collect();

    if app.output.is_empty() {
        render_text(f, area, " State ", summary);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    render_text(f, chunks[0], " State ", summary);

    let output = app.output.iter().map(|l| Line::from(l.clone())).collect();
    render_text(f, chunks[1], " Output ", output);
}

fn render_text(f: &mut Frame, area: Rect, title: &str, lines: Vec<Line>) {
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::White))
                .title(title.to_string()),
        );
    f.render_widget(paragraph, area);
}

fn render_status_bar(f: &mut Frame, area: Rect, app: &App) {
    let mut status_spans = match &app.status {
        Some(Status::Info(text)) => vec![Span::styled(
            format!(" ✓ {} ", text),
            Style::default().fg(Color::Green),
        )],
        Some(Status::Error(text)) => vec![Span::styled(
            format!(" ✗ {} ", text),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )],
        None => vec![Span::styled(" Ready ", Style::default().fg(Color::Cyan))],
    };

    status_spans.push(Span::raw(" | "));
    status_spans.push(Span::styled("Enter", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Submit | "));
    status_spans.push(Span::styled("Tab", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Tab | "));
    status_spans.push(Span::styled("PgUp/PgDn", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Form | "));
    status_spans.push(Span::styled("↑/↓", Style::default().fg(Color::Yellow)));
    status_spans.push(Span::raw(" Field | "));
    status_spans.push(Span::styled("Esc", Style::default().fg(Color::Red)));
    status_spans.push(Span::raw(" Quit"));

    let status_bar = Paragraph::new(vec![Line::from(status_spans)]).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::White)),
    );
    f.render_widget(status_bar, area);
}
