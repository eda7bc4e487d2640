use std::path::Path;

use kz_core::DrawConfig;

pub fn run(dir: &Path, output: Option<&Path>) -> Result<(), String> {
    let mut session = super::open_session(dir, DrawConfig::default())?;
    let count = session.load_all().map_err(|e| e.to_string())?;
    let snapshot = session.snapshot();
    let content = snapshot.to_json().map_err(|e| e.to_string())?;

    if let Some(output) = output {
        let path = if output.is_dir() {
            output.join(snapshot.file_name())
        } else {
            output.to_path_buf()
        };
        std::fs::write(&path, &content)
            .map_err(|e| format!("cannot write to {}: {e}", path.display()))?;
        println!("  Exported {count} decks to {}", path.display());
    } else {
        println!("{content}");
    }

    Ok(())
}
