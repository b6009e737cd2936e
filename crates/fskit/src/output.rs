//! Terminal and JSON output

use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

/// Global flag for JSON output mode
static JSON_MODE: AtomicBool = AtomicBool::new(false);

/// Enable or disable JSON output mode
pub fn set_json_mode(enabled: bool) {
    JSON_MODE.store(enabled, Ordering::SeqCst);
}

/// Check if JSON output mode is enabled
pub fn is_json_mode() -> bool {
    JSON_MODE.load(Ordering::SeqCst)
}

/// One walked entry
#[derive(Serialize)]
pub struct EntryJson {
    pub path: String,
    pub is_dir: bool,
}

pub fn print_success(message: &str) {
    if is_json_mode() {
        println!("{}", serde_json::json!({ "success": true, "message": message }));
    } else {
        println!("{} {}", "✓".green(), message);
    }
}

/// Print search results, one per line or as a JSON array
pub fn print_paths(paths: &[PathBuf]) {
    if is_json_mode() {
        let paths: Vec<String> = paths.iter().map(|p| p.display().to_string()).collect();
        match serde_json::to_string_pretty(&paths) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
        return;
    }

    for path in paths {
        println!("{}", path.display());
    }
}

/// Print walked entries as `[D] path` / `[F] path`
pub fn print_entries(entries: &[EntryJson]) {
    if is_json_mode() {
        match serde_json::to_string_pretty(entries) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        }
        return;
    }

    for entry in entries {
        let kind = if entry.is_dir { "[D]".blue() } else { "[F]".normal() };
        println!("{} {}", kind, entry.path);
    }
}
