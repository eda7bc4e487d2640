use std::io::{self, BufRead, Write};
use std::path::Path;

use colored::Colorize;

use kz_core::DrawConfig;
use kz_session::{DrawSession, SessionConfig};

pub fn run(
    dir: &Path,
    seed: Option<u64>,
    history_limit: usize,
    import: Option<&Path>,
) -> Result<(), String> {
    let mut draw = DrawConfig::default();
    if let Some(seed) = seed {
        draw = draw.with_seed(seed);
    }
    let config = SessionConfig::default()
        .with_decks_dir(dir)
        .with_history_limit(history_limit)
        .with_draw(draw);
    let mut session = DrawSession::from_dir(config);
    if let Some(path) = import {
        let count = session.import_file(path).map_err(|e| e.to_string())?;
        println!("  Imported {count} decks from {}", path.display());
    }

    println!("  {} Deck Drawing Session", "Starting".bold());
    println!(
        "  Decks: {} | Loaded: {}",
        dir.display(),
        session.engine().registry().count()
    );
    println!("  Type '.help' for commands, 'quit' to exit.\n");

    let stdin = io::stdin();
    let mut reader = stdin.lock();
    let mut line = String::new();

    loop {
        print!("> ");
        io::stdout().flush().map_err(|e| e.to_string())?;

        line.clear();
        match reader.read_line(&mut line) {
            Ok(0) => break, // EOF
            Err(e) => return Err(e.to_string()),
            _ => {}
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("q") {
            break;
        }

        match session.process(input) {
            Ok(output) => {
                if !output.is_empty() {
                    println!("{output}\n");
                }
            }
            Err(e) => {
                println!("{}\n", e.to_string().yellow());
            }
        }
    }

    println!("  {} draws this session.", session.draw_count());
    Ok(())
}
