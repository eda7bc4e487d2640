use std::path::Path;

use colored::Colorize;
use kz_core::DrawConfig;

pub fn run(
    dir: &Path,
    deck: &str,
    count: usize,
    seed: Option<u64>,
    player: Option<&str>,
) -> Result<(), String> {
    let mut draw = DrawConfig::default();
    if let Some(seed) = seed {
        draw = draw.with_seed(seed);
    }
    if let Some(player) = player {
        draw = draw.with_player_word(player);
    }

    let mut session = super::open_session(dir, draw)?;
    let results = session.draw(deck, count).map_err(|e| e.to_string())?;

    if let [single] = results {
        println!("{single}");
        return Ok(());
    }

    println!("  {} ×{}", deck.bold(), results.len());
    for (i, result) in results.iter().enumerate() {
        println!("  {:>2}. {result}", i + 1);
    }
    Ok(())
}
