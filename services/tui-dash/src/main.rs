// services/tui-dash/src/main.rs
//
// TUI Dashboard for AccessTrial insights
// Terminal view of the overview page: KPIs, interest evolution, ranked indications
//
// Run with: cargo run --bin tui-dash -- --demo

use std::fs::File;
use std::io::stdout;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, layer::SubscriberExt, util::SubscriberInitExt};

mod api;
mod demo;
mod state;

use accesstrial_shared::{
    classify::{PriorityTier, Tone, TrendDirection},
    presentation::ALERT_TITLE,
    reference::ReferenceData,
};
use api::ApiClient;
use demo::{FilterTour, LocalSource};
use state::DashboardState;

#[derive(Parser, Debug)]
#[command(name = "tui-dash")]
#[command(about = "Terminal UI Dashboard for AccessTrial recruitment insights")]
#[command(version = "0.1.0")]
struct Args {
    /// Compute metrics locally (no insight-api required)
    #[arg(long, short)]
    demo: bool,

    /// insight-api endpoint
    #[arg(long, default_value = "http://localhost:8080")]
    api_url: String,

    /// Refresh interval in milliseconds
    #[arg(long, default_value = "250")]
    refresh_ms: u64,

    /// Rotate filters automatically
    #[arg(long, short)]
    tour: bool,

    /// Seconds between tour steps
    #[arg(long, default_value = "4")]
    tour_secs: u64,

    /// Write tracing output to this file (the terminal is taken by the UI)
    #[arg(long)]
    log_file: Option<String>,
}

// Color palette: Navy, White, Slate, Amber
mod colors {
    use ratatui::style::Color;

    pub const NAVY: Color = Color::Rgb(30, 64, 175);
    pub const WHITE: Color = Color::Rgb(248, 250, 252);
    pub const SLATE: Color = Color::Rgb(148, 163, 184);
    pub const AMBER: Color = Color::Rgb(245, 158, 11);
    pub const BG_DARK: Color = Color::Rgb(15, 23, 42);
    pub const BG_PANEL: Color = Color::Rgb(30, 41, 59);
    pub const GREEN: Color = Color::Rgb(34, 197, 94);
    pub const YELLOW: Color = Color::Rgb(234, 179, 8);
    pub const ORANGE: Color = Color::Rgb(249, 115, 22);
    pub const RED: Color = Color::Rgb(239, 68, 68);
    pub const SKY: Color = Color::Rgb(56, 189, 248);
}

fn tone_color(tone: Tone) -> Color {
    match tone {
        Tone::Green => colors::GREEN,
        Tone::Yellow => colors::YELLOW,
        Tone::Orange => colors::ORANGE,
        Tone::Red => colors::RED,
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.log_file.as_deref())?;

    // Setup terminal
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    // Run app
    let result = run_app(&mut terminal, args);

    // Restore terminal
    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

fn init_tracing(log_file: Option<&str>) -> Result<()> {
    let writer = match log_file {
        Some(path) => BoxMakeWriter::new(Mutex::new(File::create(path)?)),
        None => BoxMakeWriter::new(std::io::sink),
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tui_dash=info,accesstrial_shared=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .init();
    Ok(())
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, args: Args) -> Result<()> {
    let mut state = DashboardState::new(ReferenceData::global());
    let local = LocalSource::new();
    let mut api_client = if !args.demo {
        Some(ApiClient::new(&args.api_url))
    } else {
        None
    };
    let mut tour = args
        .tour
        .then(|| FilterTour::new(Duration::from_secs(args.tour_secs), chrono::Utc::now().timestamp() as u64));

    let tick_rate = Duration::from_millis(args.refresh_ms);
    let mut last_tick = Instant::now();

    // Initial log
    if let Some(client) = api_client.as_mut() {
        state.add_log("INFO", &format!("TUI Dashboard started - connecting to {}", args.api_url));
        client.fetch_reference(&mut state);
    } else {
        state.add_log("INFO", "TUI Dashboard started in DEMO mode");
    }
    tracing::info!(demo = args.demo, tour = args.tour, "tui-dash started");

    loop {
        // Refresh before drawing so filter changes show up immediately
        match api_client.as_mut() {
            Some(client) => client.fetch_overview(&mut state),
            None => local.refresh(&mut state),
        }

        terminal.draw(|frame| draw_ui(frame, &state, args.demo, api_client.as_ref(), tour.is_some()))?;

        // Handle input
        let timeout = tick_rate.saturating_sub(last_tick.elapsed());
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('i') => state.cycle_indication(true),
                        KeyCode::Char('I') => state.cycle_indication(false),
                        KeyCode::Char('g') => state.cycle_region(true),
                        KeyCode::Char('G') => state.cycle_region(false),
                        KeyCode::Char('p') => state.next_period(),
                        KeyCode::Char('r') => state.reset_filters(),
                        KeyCode::Char(' ') if tour.is_some() => state.toggle_pause(),
                        KeyCode::Up => state.scroll_up(),
                        KeyCode::Down => state.scroll_down(),
                        _ => {}
                    }
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            if let Some(tour) = tour.as_mut() {
                tour.tick(&mut state);
            }
            last_tick = Instant::now();
        }
    }
}

fn draw_ui(
    frame: &mut Frame,
    state: &DashboardState,
    demo_mode: bool,
    api_client: Option<&ApiClient>,
    touring: bool,
) {
    let area = frame.area();

    // Background
    frame.render_widget(
        Block::default().style(Style::default().bg(colors::BG_DARK)),
        area,
    );

    // Main layout
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Header
            Constraint::Length(7),  // KPI boxes
            Constraint::Length(4),  // Alert
            Constraint::Min(12),    // Evolution + ranking
            Constraint::Length(8),  // Activity
            Constraint::Length(3),  // Footer
        ])
        .split(area);

    draw_header(frame, chunks[0], state, demo_mode, api_client, touring);
    draw_kpi_panel(frame, chunks[1], state);
    draw_alert(frame, chunks[2], state);
    draw_main_content(frame, chunks[3], state);
    draw_activity_panel(frame, chunks[4], state);
    draw_footer(frame, chunks[5], touring);
}

fn draw_header(
    frame: &mut Frame,
    area: Rect,
    state: &DashboardState,
    demo_mode: bool,
    api_client: Option<&ApiClient>,
    touring: bool,
) {
    // Mode indicator (DEMO vs LIVE)
    let (mode_text, mode_color) = if demo_mode {
        ("DEMO".to_string(), colors::AMBER)
    } else if let Some(client) = api_client {
        if client.is_connected() {
            ("LIVE".to_string(), colors::GREEN)
        } else {
            let reason = client.last_error().unwrap_or("connecting");
            (format!("DISCONNECTED: {}", truncate(reason, 40)), colors::RED)
        }
    } else {
        ("LIVE".to_string(), colors::SLATE)
    };

    let tour_text = match (touring, state.is_paused) {
        (false, _) => "",
        (true, false) => "[TOUR]",
        (true, true) => "[TOUR PAUSED]",
    };

    let updated = state
        .last_updated
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "--:--:--".to_string());

    let title = Line::from(vec![
        Span::styled(
            " ACCESSTRIAL ",
            Style::default().fg(colors::WHITE).bg(colors::NAVY).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            state.filter_summary(),
            Style::default().fg(colors::WHITE).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            format!("[{}]", mode_text),
            Style::default().fg(mode_color).bold(),
        ),
        Span::raw(" "),
        Span::styled(tour_text, Style::default().fg(colors::AMBER).bold()),
        Span::raw("  "),
        Span::styled(updated, Style::default().fg(colors::SLATE)),
    ]);

    let header = Paragraph::new(title)
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(colors::NAVY))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(header, area);
}

fn draw_kpi_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let Some(cards) = state.cards.as_ref() else {
        for chunk in chunks.iter() {
            draw_stat_box(frame, *chunk, "...", "--", "", colors::SLATE);
        }
        return;
    };

    for (card, chunk) in cards.iter().zip(chunks.iter()) {
        let (arrow, color) = match card.trend.direction {
            TrendDirection::Up => (card.trend.direction.arrow(), colors::GREEN),
            TrendDirection::Down => (card.trend.direction.arrow(), colors::RED),
            TrendDirection::Neutral => (card.trend.direction.arrow(), colors::SLATE),
        };
        let subtitle = format!("{}  {} {}", card.subtitle, arrow, card.trend.value);
        draw_stat_box(frame, *chunk, card.title, &card.value, &subtitle, color);
    }
}

fn draw_stat_box(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    value: &str,
    subtitle: &str,
    trend_color: Color,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let text = vec![
        Line::from(Span::styled(
            label.to_uppercase(),
            Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
        )),
        Line::from(""),
        Line::from(Span::styled(
            value,
            Style::default().fg(colors::WHITE).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(subtitle, Style::default().fg(trend_color))),
    ];

    let paragraph = Paragraph::new(text).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

fn draw_alert(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(
            format!(" {} ", ALERT_TITLE),
            Style::default().fg(colors::AMBER).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::AMBER))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let paragraph = Paragraph::new(state.alert.as_str())
        .style(Style::default().fg(colors::WHITE))
        .wrap(Wrap { trim: true })
        .block(block);

    frame.render_widget(paragraph, area);
}

fn draw_main_content(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    draw_evolution_panel(frame, chunks[0], state);
    draw_ranking_panel(frame, chunks[1], state);
}

fn draw_evolution_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(
            " INTÉRÊT MÉDICAL (12 MOIS) ",
            Style::default().fg(colors::WHITE).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let data: Vec<(&str, u64)> = state
        .metrics
        .as_ref()
        .map(|m| {
            m.evolution
                .iter()
                .map(|p| (p.month.as_str(), p.interest.max(0) as u64))
                .collect()
        })
        .unwrap_or_default();

    let chart = BarChart::default()
        .block(block)
        .data(data.as_slice())
        .bar_width(4)
        .bar_gap(1)
        .max(100)
        .bar_style(Style::default().fg(colors::SKY))
        .value_style(Style::default().fg(colors::BG_DARK).bg(colors::SKY))
        .label_style(Style::default().fg(colors::SLATE));

    frame.render_widget(chart, area);
}

fn draw_ranking_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(
            " INDICATIONS PRIORITAIRES ",
            Style::default().fg(colors::WHITE).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let rows: Vec<Row> = state
        .metrics
        .as_ref()
        .map(|m| m.ranked_indications.as_slice())
        .unwrap_or_default()
        .iter()
        .skip(state.scroll_offset)
        .map(|r| {
            let priority_style = Style::default().fg(tone_color(r.priority.tone()));
            let priority_style = if r.priority == PriorityTier::VeryHigh {
                priority_style.bold()
            } else {
                priority_style
            };

            Row::new(vec![
                Cell::from(Span::styled(format!("{}", r.rank), Style::default().fg(colors::SLATE))),
                Cell::from(Span::styled(r.indication.as_str(), Style::default().fg(colors::WHITE))),
                Cell::from(Span::styled(r.region.as_str(), Style::default().fg(colors::SLATE))),
                Cell::from(Span::styled(format!("{}%", r.interest), Style::default().fg(colors::WHITE))),
                Cell::from(Span::styled(format!("{}", r.potential), Style::default().fg(colors::WHITE))),
                Cell::from(Span::styled(r.priority.label(), priority_style)),
            ])
        })
        .collect();

    let header_style = Style::default().fg(colors::AMBER).bold();
    let table = Table::new(
        rows,
        [
            Constraint::Length(3),
            Constraint::Min(20),
            Constraint::Length(18),
            Constraint::Length(8),
            Constraint::Length(9),
            Constraint::Length(11),
        ],
    )
    .header(
        Row::new(vec![
            Cell::from(Span::styled("#", header_style)),
            Cell::from(Span::styled("INDICATION", header_style)),
            Cell::from(Span::styled("RÉGION", header_style)),
            Cell::from(Span::styled("INTÉRÊT", header_style)),
            Cell::from(Span::styled("POTENTIEL", header_style)),
            Cell::from(Span::styled("PRIORITÉ", header_style)),
        ])
        .bottom_margin(1),
    )
    .block(block);

    frame.render_widget(table, area);
}

fn draw_activity_panel(frame: &mut Frame, area: Rect, state: &DashboardState) {
    let block = Block::default()
        .title(Span::styled(
            " ACTIVITY LOG ",
            Style::default().fg(colors::WHITE).bold(),
        ))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::SLATE))
        .border_type(BorderType::Rounded)
        .style(Style::default().bg(colors::BG_PANEL));

    let logs: Vec<Line> = state
        .activity_log
        .iter()
        .rev()
        .take(area.height.saturating_sub(2) as usize)
        .map(|entry| {
            let (prefix, color) = match entry.level.as_str() {
                "ERROR" => ("[ERR]", colors::RED),
                "WARN" => ("[WRN]", colors::AMBER),
                "INFO" => ("[INF]", colors::GREEN),
                _ => ("[---]", colors::SLATE),
            };

            Line::from(vec![
                Span::styled(
                    format!("{} ", entry.timestamp.format("%H:%M:%S")),
                    Style::default().fg(colors::SLATE).add_modifier(Modifier::DIM),
                ),
                Span::styled(format!("{} ", prefix), Style::default().fg(color)),
                Span::styled(entry.message.as_str(), Style::default().fg(colors::WHITE)),
            ])
        })
        .collect();

    let paragraph = Paragraph::new(logs)
        .block(block)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

fn draw_footer(frame: &mut Frame, area: Rect, touring: bool) {
    let key = |k: &'static str, bg: Color| Span::styled(k, Style::default().fg(colors::BG_DARK).bg(bg));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(colors::SLATE));

    let mut spans = vec![
        key(" [Q] ", colors::RED),
        desc(" Quit "),
        Span::raw("  "),
        key(" [I/i] ", colors::SKY),
        desc(" Indication "),
        Span::raw("  "),
        key(" [G/g] ", colors::SKY),
        desc(" Région "),
        Span::raw("  "),
        key(" [P] ", colors::SKY),
        desc(" Période "),
        Span::raw("  "),
        key(" [R] ", colors::WHITE),
        desc(" Reset "),
        Span::raw("  "),
        key(" [UP/DOWN] ", colors::SLATE),
        desc(" Scroll "),
    ];
    if touring {
        spans.push(Span::raw("  "));
        spans.push(key(" [SPACE] ", colors::AMBER));
        spans.push(desc(" Pause tour "));
    }

    let footer = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::TOP)
                .border_style(Style::default().fg(colors::NAVY))
                .style(Style::default().bg(colors::BG_DARK)),
        );

    frame.render_widget(footer, area);
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let cut: String = text.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}
