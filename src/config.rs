//! User configuration: header geometry, page geometry, keybindings.
//!
//! Stored as a simple key-value text file at
//! `$XDG_CONFIG_HOME/sticky-header/config.toml`
//! (default `~/.config/sticky-header/config.toml`).

use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

use crate::core::header::{HeaderGeometry, HEADER_HEIGHT, HYSTERESIS};
use crate::core::sticky::HeaderOptions;

/// Text shown in the offline banner unless overridden.
pub const DEFAULT_OFFLINE_WARNING: &str = "Your device lost its internet connection.";

// ───────────────────────────────────────── errors ────────────

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("line {line}: `{key}` expects a non-negative integer, got `{value}`")]
    InvalidNumber {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: `{key}` expects true or false, got `{value}`")]
    InvalidBool {
        line: usize,
        key: String,
        value: String,
    },
    #[error("line {line}: `{key}` must be greater than zero")]
    Zero { line: usize, key: String },
    #[error("line {line}: unknown setting `{key}`")]
    UnknownKey { line: usize, key: String },
    #[error("line {line}: cannot parse key binding `{bind}`")]
    InvalidKeyBind { line: usize, bind: String },
}

// ───────────────────────────────────────── actions ───────────

/// All configurable user actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    ScrollUp,
    ScrollDown,
    PageUp,
    PageDown,
    Top,
    Bottom,
    ToggleFixed,
    ToggleOffline,
    Quit,
}

impl Action {
    pub const ALL: &[Action] = &[
        Action::ScrollUp,
        Action::ScrollDown,
        Action::PageUp,
        Action::PageDown,
        Action::Top,
        Action::Bottom,
        Action::ToggleFixed,
        Action::ToggleOffline,
        Action::Quit,
    ];

    /// Key used in the config file.
    fn config_key(self) -> &'static str {
        match self {
            Action::ScrollUp => "scroll_up",
            Action::ScrollDown => "scroll_down",
            Action::PageUp => "page_up",
            Action::PageDown => "page_down",
            Action::Top => "top",
            Action::Bottom => "bottom",
            Action::ToggleFixed => "toggle_fixed",
            Action::ToggleOffline => "toggle_offline",
            Action::Quit => "quit",
        }
    }

    fn from_config_key(s: &str) -> Option<Self> {
        Action::ALL.iter().copied().find(|a| a.config_key() == s)
    }
}

// ───────────────────────────────────────── key bind ──────────

/// A single key binding: key code + modifier combination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBind {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBind {
    pub fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Only CTRL/ALT/SHIFT take part in matching.
    pub fn matches(&self, event: KeyEvent) -> bool {
        let mask = KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SHIFT;
        self.code == event.code && (self.modifiers & mask) == (event.modifiers & mask)
    }

    /// Short label for the status bar (e.g. `"j"`, `"PgDn"`, `"Ctrl+f"`).
    pub fn display(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&match self.code {
            KeyCode::Char(' ') => "Space".into(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Up => "↑".into(),
            KeyCode::Down => "↓".into(),
            KeyCode::PageUp => "PgUp".into(),
            KeyCode::PageDown => "PgDn".into(),
            other => key_name(other),
        });
        s
    }

    fn to_config_string(&self) -> String {
        let mut s = self.modifier_prefix();
        s.push_str(&key_name(self.code));
        s
    }

    fn modifier_prefix(&self) -> String {
        let mut s = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            s.push_str("Ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            s.push_str("Alt+");
        }
        if self.modifiers.contains(KeyModifiers::SHIFT) {
            s.push_str("Shift+");
        }
        s
    }

    /// Parse a key string like `"Ctrl+c"`, `"PageDown"`, `"k"`.
    fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let parts: Vec<&str> = s.split('+').collect();
        let (key_part, mods) = parts.split_last()?;

        for part in mods {
            match part.to_lowercase().as_str() {
                "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "enter" | "return" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pageup" | "pgup" => KeyCode::PageUp,
            "pagedown" | "pgdn" => KeyCode::PageDown,
            "space" => KeyCode::Char(' '),
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(KeyBind { code, modifiers })
    }
}

fn key_name(code: KeyCode) -> String {
    match code {
        KeyCode::Char(' ') => "Space".into(),
        KeyCode::Char(c) => c.to_string(),
        KeyCode::Up => "Up".into(),
        KeyCode::Down => "Down".into(),
        KeyCode::Enter => "Enter".into(),
        KeyCode::Esc => "Esc".into(),
        KeyCode::Home => "Home".into(),
        KeyCode::End => "End".into(),
        KeyCode::PageUp => "PageUp".into(),
        KeyCode::PageDown => "PageDown".into(),
        other => format!("{other:?}"),
    }
}

// ───────────────────────────────────────── config ────────────

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bindings: HashMap<Action, Vec<KeyBind>>,
    /// Header height in virtual pixels.
    pub header_height: u32,
    /// Dead band around a scroll reversal, in virtual pixels.
    pub hysteresis: u32,
    /// Delay before transitions are enabled after the first hide.
    pub animate_delay_ms: u64,
    /// Virtual pixels per terminal row.
    pub row_px: u32,
    /// Distance of a single scroll step (key press or wheel notch).
    pub scroll_step_px: u32,
    /// Header permanently pinned to the top.
    pub fixed: bool,
    /// Banner text while offline.
    pub offline_warning: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            bindings: Self::default_bindings(),
            header_height: HEADER_HEIGHT,
            hysteresis: HYSTERESIS,
            animate_delay_ms: 100,
            row_px: 16,
            scroll_step_px: 8,
            fixed: false,
            offline_warning: DEFAULT_OFFLINE_WARNING.to_string(),
        }
    }
}

impl AppConfig {
    pub fn default_bindings() -> HashMap<Action, Vec<KeyBind>> {
        use Action::*;
        use KeyCode::*;
        let n = KeyModifiers::NONE;
        let mut m = HashMap::new();

        m.insert(ScrollUp, vec![KeyBind::new(Up, n), KeyBind::new(Char('k'), n)]);
        m.insert(ScrollDown, vec![KeyBind::new(Down, n), KeyBind::new(Char('j'), n)]);
        m.insert(Action::PageUp, vec![KeyBind::new(KeyCode::PageUp, n), KeyBind::new(Char('b'), n)]);
        m.insert(Action::PageDown, vec![KeyBind::new(KeyCode::PageDown, n), KeyBind::new(Char(' '), n)]);
        m.insert(Top, vec![KeyBind::new(Home, n), KeyBind::new(Char('g'), n)]);
        m.insert(Bottom, vec![KeyBind::new(End, n), KeyBind::new(Char('G'), KeyModifiers::SHIFT)]);
        m.insert(ToggleFixed, vec![KeyBind::new(Char('f'), n)]);
        m.insert(ToggleOffline, vec![KeyBind::new(Char('o'), n)]);
        m.insert(Quit, vec![KeyBind::new(Char('q'), n), KeyBind::new(Esc, n)]);

        m
    }

    /// Find the action bound to a key event.  The binding with the most
    /// modifiers wins.
    pub fn match_key(&self, event: KeyEvent) -> Option<Action> {
        let mut best: Option<(Action, u32)> = None;
        for (&action, binds) in &self.bindings {
            for bind in binds {
                if !bind.matches(event) {
                    continue;
                }
                let mc = bind.modifiers.bits().count_ones();
                if best.map_or(true, |(_, b)| mc > b) {
                    best = Some((action, mc));
                }
            }
        }
        best.map(|(action, _)| action)
    }

    /// Short display of the first binding only.
    pub fn short_binding(&self, action: Action) -> String {
        match self.bindings.get(&action).and_then(|b| b.first()) {
            Some(bind) => bind.display(),
            None => "?".into(),
        }
    }

    /// Options the header is mounted with.
    pub fn header_options(&self) -> HeaderOptions {
        HeaderOptions {
            geometry: HeaderGeometry {
                height: self.header_height,
                hysteresis: self.hysteresis,
            },
            animate_delay: Duration::from_millis(self.animate_delay_ms),
            fixed: self.fixed,
        }
    }

    // ── persistence ─────────────────────────────────────────────

    /// Load config from disk.  A missing file gives defaults; a broken one
    /// is reported and also gives defaults.
    pub fn load() -> Self {
        let path = config_path();
        let Ok(contents) = std::fs::read_to_string(&path) else {
            return Self::default();
        };
        match Self::parse(&contents) {
            Ok(config) => {
                tracing::debug!(path = %path.display(), "config loaded");
                config
            }
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "ignoring config file");
                Self::default()
            }
        }
    }

    /// Persist current config to disk.
    pub fn save(&self) -> anyhow::Result<()> {
        let path = config_path();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, self.serialise())?;
        Ok(())
    }

    pub fn parse(s: &str) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for (idx, line) in s.lines().enumerate() {
            let line_no = idx + 1;
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with('[') {
                continue;
            }
            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim();

            match key {
                "header_height" => config.header_height = parse_u32(line_no, key, value)?,
                "hysteresis" => config.hysteresis = parse_u32(line_no, key, value)?,
                "animate_delay_ms" => {
                    config.animate_delay_ms = u64::from(parse_u32(line_no, key, value)?);
                }
                "row_px" => config.row_px = parse_positive(line_no, key, value)?,
                "scroll_step_px" => config.scroll_step_px = parse_positive(line_no, key, value)?,
                "fixed" => {
                    config.fixed = match value {
                        "true" => true,
                        "false" => false,
                        _ => {
                            return Err(ConfigError::InvalidBool {
                                line: line_no,
                                key: key.into(),
                                value: value.into(),
                            })
                        }
                    };
                }
                "offline_warning" => config.offline_warning = value.trim_matches('"').to_string(),
                _ => {
                    let action =
                        Action::from_config_key(key).ok_or_else(|| ConfigError::UnknownKey {
                            line: line_no,
                            key: key.into(),
                        })?;
                    let mut parsed = Vec::new();
                    for part in value.split(',') {
                        let part = part.trim().trim_matches('"');
                        let bind = KeyBind::parse(part).ok_or_else(|| {
                            ConfigError::InvalidKeyBind {
                                line: line_no,
                                bind: part.into(),
                            }
                        })?;
                        parsed.push(bind);
                    }
                    config.bindings.insert(action, parsed);
                }
            }
        }

        Ok(config)
    }

    fn serialise(&self) -> String {
        let mut lines = vec![
            "# sticky-header configuration".to_string(),
            String::new(),
            "# Header".to_string(),
            format!("header_height = {}", self.header_height),
            format!("hysteresis = {}", self.hysteresis),
            format!("animate_delay_ms = {}", self.animate_delay_ms),
            format!("fixed = {}", self.fixed),
            format!("offline_warning = \"{}\"", self.offline_warning),
            String::new(),
            "# Page".to_string(),
            format!("row_px = {}", self.row_px),
            format!("scroll_step_px = {}", self.scroll_step_px),
            String::new(),
            "# Key bindings".to_string(),
            "# Format: action = Key1, Key2, ...".to_string(),
            String::new(),
        ];

        for &action in Action::ALL {
            if let Some(binds) = self.bindings.get(&action) {
                let keys: Vec<String> = binds.iter().map(|b| b.to_config_string()).collect();
                lines.push(format!("{} = {}", action.config_key(), keys.join(", ")));
            }
        }
        lines.push(String::new());
        lines.join("\n")
    }
}

fn parse_u32(line: usize, key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidNumber {
        line,
        key: key.into(),
        value: value.into(),
    })
}

fn parse_positive(line: usize, key: &str, value: &str) -> Result<u32, ConfigError> {
    match parse_u32(line, key, value)? {
        0 => Err(ConfigError::Zero {
            line,
            key: key.into(),
        }),
        v => Ok(v),
    }
}

/// Return the config file path (`$XDG_CONFIG_HOME/sticky-header/config.toml`).
fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join(".config")
        });
    config_dir.join("sticky-header").join("config.toml")
}
