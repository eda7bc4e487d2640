use std::path::Path;

use comfy_table::{ContentArrangement, Table};
use kz_core::engine::locate_pool;
use kz_core::{DrawConfig, WeightedPool};

pub fn run(dir: &Path) -> Result<(), String> {
    let mut session = super::open_session(dir, DrawConfig::default())?;
    session.load_all().map_err(|e| e.to_string())?;

    let registry = session.engine().registry();
    if registry.count() == 0 {
        println!("  No decks found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Deck", "Pool", "Entries", "Total weight"]);

    for name in registry.names() {
        let Some(doc) = registry.get(name) else {
            continue;
        };
        match locate_pool(doc, name) {
            Ok((key, items)) => {
                let pool = WeightedPool::from_values(items);
                table.add_row(vec![
                    name.to_string(),
                    key.to_string(),
                    pool.entries().len().to_string(),
                    pool.total_weight().to_string(),
                ]);
            }
            Err(e) => {
                table.add_row(vec![name.to_string(), "—".to_string(), e.to_string(), String::new()]);
            }
        }
    }

    println!("{table}");
    println!();
    println!("  {} decks", registry.count());

    Ok(())
}
