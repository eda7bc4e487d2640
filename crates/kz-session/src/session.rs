//! Drawing session management.
//!
//! `DrawSession` owns a [`DrawEngine`] and a [`DeckSource`]. It loads decks
//! on first use, records every draw in the history, and executes command
//! lines typed by the user.

use std::fs;
use std::path::Path;

use serde_json::Map;
use tracing::{info, warn};

use kz_core::{DrawEngine, DrawResult};

use crate::command::{Command, ExportFormat, help_entries, parse_command};
use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::history::{History, HistoryEntry};
use crate::snapshot::Snapshot;
use crate::source::{DeckSource, DirSource};

/// An interactive drawing session.
pub struct DrawSession<S: DeckSource = DirSource> {
    engine: DrawEngine,
    source: S,
    history: History,
    draw_count: u64,
    last_results: Vec<DrawResult>,
    preload: Vec<String>,
}

impl DrawSession<DirSource> {
    /// Create a session reading decks from `config.decks_dir`.
    pub fn from_dir(config: SessionConfig) -> Self {
        let source = DirSource::new(config.decks_dir.clone());
        Self::new(config, source)
    }
}

impl<S: DeckSource> DrawSession<S> {
    /// Create a session and preload the configured decks.
    ///
    /// Preload decks that cannot be loaded are skipped with a warning.
    pub fn new(config: SessionConfig, source: S) -> Self {
        let mut session = Self {
            engine: DrawEngine::new(config.draw),
            source,
            history: History::new(config.history_limit),
            draw_count: 0,
            last_results: Vec::new(),
            preload: config.preload,
        };
        session.preload_decks();
        session
    }

    /// The draw engine (and through it, the registry).
    pub fn engine(&self) -> &DrawEngine {
        &self.engine
    }

    /// The draw history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Total number of draws made in this session.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    /// Results of the most recent draw command.
    pub fn last_results(&self) -> &[DrawResult] {
        &self.last_results
    }

    /// Load `name` from the source unless it is already registered.
    pub fn ensure_loaded(&mut self, name: &str) -> SessionResult<()> {
        let source = &self.source;
        self.engine
            .registry_mut()
            .load_if_absent(name, |name| {
                source
                    .fetch(name)?
                    .ok_or_else(|| SessionError::DeckNotFound(name.to_string()))
            })
            .map(|_| ())
    }

    /// Load every deck the source offers. Returns how many are now loaded.
    ///
    /// Decks that fail to load are skipped with a warning.
    pub fn load_all(&mut self) -> SessionResult<usize> {
        for name in self.source.available()? {
            if let Err(e) = self.ensure_loaded(&name) {
                warn!(deck = %name, error = %e, "skipping deck");
            }
        }
        Ok(self.engine.registry().count())
    }

    /// Draw `count` results from `deck`, loading it first if needed, and
    /// record them in the history.
    pub fn draw(&mut self, deck: &str, count: usize) -> SessionResult<&[DrawResult]> {
        self.ensure_loaded(deck)?;
        let results = self.engine.draw_many(deck, count)?;
        for result in &results {
            self.history.record(HistoryEntry::from(result));
        }
        self.draw_count += results.len() as u64;
        self.last_results = results;
        Ok(&self.last_results)
    }

    /// Drop all decks, history, and counters, then preload again.
    pub fn reset(&mut self) {
        self.engine.registry_mut().clear();
        self.history.clear();
        self.draw_count = 0;
        self.last_results.clear();
        self.preload_decks();
        info!("session reset");
    }

    /// Capture every loaded deck plus the history.
    pub fn snapshot(&self) -> Snapshot {
        let registry = self.engine.registry();
        let mut decks = Map::new();
        for name in registry.names() {
            if let Some(doc) = registry.get(name) {
                decks.insert(name.to_string(), doc.as_value().clone());
            }
        }
        Snapshot {
            decks,
            history: Some(self.history.entries().to_vec()),
            draw_count: Some(self.draw_count),
            export_date: Some(chrono::Utc::now()),
        }
    }

    /// Merge a snapshot into this session. Returns the number of decks
    /// imported.
    pub fn import(&mut self, snapshot: Snapshot) -> usize {
        let count = snapshot.decks.len();
        for (name, doc) in snapshot.decks {
            self.engine.registry_mut().put(name, doc);
        }
        if let Some(entries) = snapshot.history {
            self.history.replace(entries);
        }
        if let Some(draws) = snapshot.draw_count {
            self.draw_count = draws;
        }
        info!(decks = count, "snapshot imported");
        count
    }

    /// Read a snapshot file and merge it into this session. Returns the
    /// number of decks imported.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> SessionResult<usize> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| SessionError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(self.import(Snapshot::from_json(&text)?))
    }

    /// Render the history as text or markdown, or the whole session as a
    /// JSON snapshot.
    pub fn export(&self, format: ExportFormat) -> SessionResult<String> {
        match format {
            ExportFormat::Text => Ok(self.history.export_text()),
            ExportFormat::Markdown => Ok(self.history.export_markdown()),
            ExportFormat::Json => self.snapshot().to_json(),
        }
    }

    /// Process a line of user input and return a response.
    pub fn process(&mut self, input: &str) -> SessionResult<String> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(String::new());
        }

        match parse_command(trimmed, self.engine.config().max_batch) {
            Command::Draw { deck, count } => self.do_draw(&deck, count),
            Command::Help => Ok(render_help()),
            Command::Clear => {
                self.last_results.clear();
                Ok("Results cleared.".to_string())
            }
            Command::History => Ok(self.render_history()),
            Command::Decks => self.render_decks(),
            Command::Reset => {
                self.reset();
                Ok("All decks and history reset.".to_string())
            }
            Command::Export { format, path } => self.do_export(format, path.as_deref()),
            Command::Import { path } => {
                let count = self.import_file(&path)?;
                Ok(format!("Imported {count} decks from {path}."))
            }
            Command::Unknown { input } => Err(SessionError::UnknownCommand(input)),
        }
    }

    fn do_export(&self, format: ExportFormat, path: Option<&str>) -> SessionResult<String> {
        let content = self.export(format)?;
        let Some(path) = path else {
            return Ok(content.trim_end().to_string());
        };
        fs::write(path, content).map_err(|source| SessionError::Io {
            path: path.into(),
            source,
        })?;
        info!(path, "session exported");
        Ok(format!("Exported to {path}."))
    }

    fn preload_decks(&mut self) {
        for name in self.preload.clone() {
            if let Err(e) = self.ensure_loaded(&name) {
                warn!(deck = %name, error = %e, "preload failed");
            }
        }
    }

    fn do_draw(&mut self, deck: &str, count: usize) -> SessionResult<String> {
        let results = self.draw(deck, count)?;
        if let [single] = results {
            return Ok(format!("{deck}: {single}"));
        }
        let mut out = format!("{deck} ×{}:\n", results.len());
        for (i, result) in results.iter().enumerate() {
            out.push_str(&format!("  {}. {result}\n", i + 1));
        }
        Ok(out.trim_end().to_string())
    }

    fn render_history(&self) -> String {
        if self.history.is_empty() {
            return "No draws yet.".to_string();
        }
        let recent: Vec<&HistoryEntry> = self.history.entries().iter().take(10).collect();
        let mut out = format!(
            "History ({} entries, showing latest {}):\n",
            self.history.len(),
            recent.len()
        );
        for entry in recent {
            out.push_str(&format!(
                "  [{}] {}: {}\n",
                entry.timestamp.format("%H:%M:%S"),
                entry.deck,
                entry.result
            ));
        }
        out.trim_end().to_string()
    }

    fn render_decks(&self) -> SessionResult<String> {
        let loaded = self.engine.registry().names();
        let mut out = format!("Loaded decks ({}):", loaded.len());
        if loaded.is_empty() {
            out.push_str(" none");
        } else {
            out.push(' ');
            out.push_str(&loaded.join(", "));
        }
        match self.source.available() {
            Ok(available) if !available.is_empty() => {
                out.push_str(&format!("\nAvailable ({}): {}", available.len(), available.join(", ")));
            }
            Ok(_) => {}
            Err(e) => warn!(error = %e, "cannot list available decks"),
        }
        Ok(out)
    }
}

fn render_help() -> String {
    let mut out = String::from("Commands:\n");
    for (cmd, desc) in help_entries() {
        out.push_str(&format!("  {cmd:<22} {desc}\n"));
    }
    out.trim_end().to_string()
}
