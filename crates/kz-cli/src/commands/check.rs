use std::path::Path;

use colored::Colorize;
use kz_core::engine::locate_pool;
use kz_core::{DeckError, WeightedPool};
use kz_session::{DeckSource, DirSource};

pub fn run(dir: &Path) -> Result<(), String> {
    let names = super::available_decks(dir)?;
    if names.is_empty() {
        return Err(format!("no deck files in {}", dir.display()));
    }

    let source = DirSource::new(dir);
    let mut failures = 0;

    for name in &names {
        let problem = match source.fetch(name) {
            Ok(Some(doc)) => match locate_pool(&doc, name) {
                Ok((_, items)) if WeightedPool::from_values(items).is_empty() => {
                    Some(DeckError::EmptyPool(name.clone()).to_string())
                }
                Ok(_) => None,
                Err(e) => Some(e.to_string()),
            },
            Ok(None) => Some("deck file disappeared".to_string()),
            Err(e) => Some(e.to_string()),
        };

        if let Some(problem) = problem {
            failures += 1;
            eprintln!("  {} {name}: {problem}", "✗".red());
        }
    }

    if failures > 0 {
        return Err(format!(
            "{failures} of {} deck{} cannot be drawn from",
            names.len(),
            if names.len() == 1 { "" } else { "s" }
        ));
    }

    println!("  All checks passed.");
    println!(
        "  {} deck{}",
        names.len(),
        if names.len() == 1 { "" } else { "s" }
    );
    Ok(())
}
