//! Command parsing for session input.

/// A parsed session command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Draw from a deck.
    Draw {
        /// The deck name. May contain spaces.
        deck: String,
        /// How many results to draw, already clamped.
        count: usize,
    },
    /// Show the command list.
    Help,
    /// Clear the current results.
    Clear,
    /// Show recent draws.
    History,
    /// List loaded and available decks.
    Decks,
    /// Drop all decks and history, then preload again.
    Reset,
    /// Export the history or the whole session.
    Export {
        /// Output format.
        format: ExportFormat,
        /// File to write. Without one the export is returned as text.
        path: Option<String>,
    },
    /// Merge a snapshot file into the session.
    Import {
        /// The snapshot file.
        path: String,
    },
    /// Input that is not a command.
    Unknown {
        /// The original input.
        input: String,
    },
}

/// What `.export` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// Plain-text history.
    #[default]
    Text,
    /// Markdown history.
    Markdown,
    /// A JSON snapshot of decks and history.
    Json,
}

impl ExportFormat {
    /// Look up a format by name (`txt`, `md`, `json`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "txt" | "text" => Some(Self::Text),
            "md" | "markdown" => Some(Self::Markdown),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

const DRAW_VERBS: &[&str] = &[".draw"];
const HELP_VERBS: &[&str] = &[".help", "帮助"];
const CLEAR_VERBS: &[&str] = &[".clear", "清空"];
const HISTORY_VERBS: &[&str] = &[".history", "历史"];
const DECKS_VERBS: &[&str] = &[".decks"];
const RESET_VERBS: &[&str] = &[".reset"];
const EXPORT_VERBS: &[&str] = &[".export", "导出"];
const IMPORT_VERBS: &[&str] = &[".import", "导入"];

/// Commands and their descriptions, for help output.
pub fn help_entries() -> &'static [(&'static str, &'static str)] {
    &[
        (".draw <deck> [count]", "draw from a deck (count defaults to 1)"),
        (".decks", "list loaded and available decks"),
        (".history", "show recent draws"),
        (".clear", "clear the current results"),
        (".reset", "drop all decks and history"),
        (".export [txt|md|json] [file]", "export the history, or a snapshot as json"),
        (".import <file>", "merge decks from a snapshot file"),
        (".help", "show this help"),
    ]
}

/// Parse one line of input.
///
/// The verb is case-insensitive; deck names are kept as typed. A trailing
/// number after a deck name is a batch count, clamped to `1..=max_batch`.
/// `.export` with an unrecognised format is [`Command::Unknown`].
pub fn parse_command(input: &str, max_batch: usize) -> Command {
    let input = input.trim();
    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    };
    let verb = verb.to_lowercase();
    let is = |verbs: &[&str]| verbs.contains(&verb.as_str());

    if is(DRAW_VERBS) && !rest.is_empty() {
        return parse_draw(rest, max_batch);
    }
    if is(IMPORT_VERBS) && !rest.is_empty() {
        return Command::Import {
            path: rest.to_string(),
        };
    }
    if is(EXPORT_VERBS) {
        return parse_export(rest).unwrap_or_else(|| Command::Unknown {
            input: input.to_string(),
        });
    }
    if rest.is_empty() {
        if is(HELP_VERBS) {
            return Command::Help;
        }
        if is(CLEAR_VERBS) {
            return Command::Clear;
        }
        if is(HISTORY_VERBS) {
            return Command::History;
        }
        if is(DECKS_VERBS) {
            return Command::Decks;
        }
        if is(RESET_VERBS) {
            return Command::Reset;
        }
    }

    Command::Unknown {
        input: input.to_string(),
    }
}

fn parse_export(rest: &str) -> Option<Command> {
    let mut args = rest.split_whitespace();
    let format = match args.next() {
        Some(name) => ExportFormat::from_name(name)?,
        None => ExportFormat::default(),
    };
    let path = args.next().map(str::to_string);
    if args.next().is_some() {
        return None;
    }
    Some(Command::Export { format, path })
}

fn parse_draw(rest: &str, max_batch: usize) -> Command {
    let max_batch = max_batch.max(1);
    if let Some((deck, last)) = rest.rsplit_once(char::is_whitespace) {
        if !last.is_empty() && last.bytes().all(|b| b.is_ascii_digit()) {
            let count = last.parse::<usize>().unwrap_or(usize::MAX);
            return Command::Draw {
                deck: deck.trim_end().to_string(),
                count: count.clamp(1, max_batch),
            };
        }
    }
    Command::Draw {
        deck: rest.to_string(),
        count: 1,
    }
}
