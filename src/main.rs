//! A scrollable terminal page whose header hides on the way down and sticks
//! back to the top on the way up.
//!
//! Run with a text file to page through it, or without one for sample text.
//! Run with `--write-config` to dump the effective settings to the config file.

mod app;
mod config;
mod core;
mod ui;

use std::io::{self, stderr};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, widgets::Paragraph, Terminal};

use crate::app::{
    event::{spawn_event_reader, AppEvent},
    handler,
    state::AppState,
};
use crate::config::{Action, AppConfig};
use crate::core::sticky::HeaderSignal;
use crate::core::viewport::Viewport;
use crate::ui::{content_slot::ContentSlot, layout::AppLayout, page::PageView, theme::Theme};

/// Frame tick; also paces the header slide.
const TICK_RATE: Duration = Duration::from_millis(25);

// ───────────────────────────────────────── CLI ───────────────

#[derive(Parser, Debug)]
#[command(name = env!("CARGO_PKG_NAME"), about = "Page with a scroll-aware sticky header")]
struct Cli {
    /// Text file rendered verbatim as the page body.
    path: Option<PathBuf>,

    /// Keep the header pinned to the top at all times.
    #[arg(long)]
    fixed: bool,

    /// Start with the offline warning showing.
    #[arg(long)]
    offline: bool,

    /// Alternate rendering mode (different header chrome).
    #[arg(long)]
    amp: bool,

    /// Text of the offline warning.
    #[arg(long, value_name = "TEXT")]
    offline_warning: Option<String>,

    /// Write the effective configuration to the config file and exit.
    #[arg(long)]
    write_config: bool,
}

/// What woke the event loop.
enum Wake {
    Header(HeaderSignal),
    App(AppEvent),
    Closed,
}

// ───────────────────────────────────────── main ─────────────

#[tokio::main]
async fn main() -> Result<()> {
    // Initialise tracing (only in debug builds / when RUST_LOG is set).
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load();
    config.fixed |= cli.fixed;
    if let Some(text) = cli.offline_warning {
        config.offline_warning = text;
    }

    if cli.write_config {
        config.save().context("writing config file")?;
        return Ok(());
    }

    let (content, title) = match &cli.path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let title = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            (ContentSlot::new(&text), title)
        }
        None => (ContentSlot::new(&sample_page()), env!("CARGO_PKG_NAME").to_string()),
    };

    let mut state = AppState::new(config, content, title);
    state.offline = cli.offline;
    state.amp = cli.amp;

    // ── terminal setup ────────────────────────────────────────
    enable_raw_mode()?;
    let mut stderr_handle = stderr();
    execute!(stderr_handle, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stderr());
    let mut terminal = Terminal::new(backend)?;

    let mut events = spawn_event_reader(TICK_RATE);

    // ── event loop ────────────────────────────────────────────
    let result = async {
        loop {
            terminal.draw(|frame| {
                let layout = AppLayout::from_area(frame.area());
                state.relayout(layout.page_area.height);

                let geometry = state.page_geometry();
                let hint = key_hint(&state.config);
                let page = PageView {
                    geometry,
                    scroll_y: state.viewport.scroll_y(),
                    presentation: state.presentation(),
                    slide_rows: state.slide.row_shift(geometry.header_rows),
                    content: &state.content,
                    offline_warning: state.offline.then_some(state.config.offline_warning.as_str()),
                    title: &state.title,
                    hint: &hint,
                };
                frame.render_widget(page, layout.page_area);

                let status_text = match &state.status_message {
                    Some(msg) => format!(" {msg}"),
                    None => status_line(&state),
                };
                let status = Paragraph::new(status_text).style(Theme::status_bar_style());
                frame.render_widget(status, layout.status_area);
            })?;

            // Header first: queued scroll samples are applied before the
            // next input moves the page again.
            let wake = tokio::select! {
                biased;
                signal = state.header.recv() => Wake::Header(signal),
                event = events.recv() => event.map_or(Wake::Closed, Wake::App),
            };

            match wake {
                Wake::Header(signal) => state.apply_header_signal(signal),
                Wake::App(AppEvent::Key(k)) => handler::handle_key(&mut state, k),
                Wake::App(AppEvent::Mouse(m)) => handler::handle_mouse(&mut state, m),
                Wake::App(AppEvent::Resize(_, _)) => {}
                Wake::App(AppEvent::Tick) => {
                    if state.slide.is_animating() {
                        state.slide.tick();
                    }
                }
                Wake::Closed => break,
            }

            if state.should_quit {
                break;
            }
        }
        Ok::<(), anyhow::Error>(())
    }
    .await;

    // ── teardown ──────────────────────────────────────────────
    let AppState { header, .. } = state;
    header.unmount();

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

/// Header diagnostics for the status bar.
fn status_line(state: &AppState) -> String {
    let flags = state.header.flags();
    let t = state.header.thresholds();
    let edge = match (t.stick_at, t.unstick_at) {
        _ if !state.header.is_subscribed() => "fixed".into(),
        (Some(at), _) => format!("stick <{at}"),
        (_, Some(at)) => format!("unstick >{at}"),
        (None, None) => "-".into(),
    };
    let animate = match (flags.animate, state.header.animation_pending()) {
        (true, _) => "1",
        (false, true) => "…",
        (false, false) => "0",
    };
    format!(
        " y={} stuck:{} hidden:{} animate:{} edge:{}",
        state.viewport.scroll_y(),
        u8::from(flags.stuck),
        u8::from(flags.hidden),
        animate,
        edge,
    )
}

/// Key hints shown inside the header bar.
fn key_hint(config: &AppConfig) -> String {
    format!(
        "{}/{}: scroll  {}: fixed  {}: offline  {}: quit",
        config.short_binding(Action::ScrollDown),
        config.short_binding(Action::ScrollUp),
        config.short_binding(Action::ToggleFixed),
        config.short_binding(Action::ToggleOffline),
        config.short_binding(Action::Quit),
    )
}

/// Body text used when no file is given.
fn sample_page() -> String {
    let mut out = String::new();
    for section in 1..=12 {
        out.push_str(&format!("Section {section}\n"));
        out.push_str(&"─".repeat(10));
        out.push('\n');
        for line in 1..=8 {
            out.push_str(&format!(
                "  {section}.{line}  Scroll down past the header and it slides away; scroll back up a little and it returns.\n"
            ));
        }
        out.push('\n');
    }
    out
}
