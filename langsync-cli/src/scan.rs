use std::path::Path;

use langsync::{FileStatus, SyncOptions, scan, status, tag_for};
use serde_json::json;

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Prints the master file and the targets a sync would touch.
pub fn run_scan_command(directory: &str, options: &SyncOptions) -> Result<(), String> {
    let file_set = scan(directory, options).map_err(|e| e.to_string())?;

    println!(
        "Master: {} ({})",
        file_name(&file_set.master),
        tag_for(&file_set.master)
    );
    if file_set.targets.is_empty() {
        println!("No target files found");
        return Ok(());
    }

    println!("Targets ({}):", file_set.targets.len());
    for (path, language) in file_set.tagged_targets() {
        println!("  {} -> {}", file_name(path), language);
    }
    Ok(())
}

/// Reports the keys each target is missing without translating anything.
pub fn run_status_command(directory: &str, options: &SyncOptions, json: bool) -> Result<(), String> {
    let file_set = scan(directory, options).map_err(|e| e.to_string())?;
    let statuses = status(&file_set, options).map_err(|e| e.to_string())?;

    if json {
        let out = json!({
            "master": file_set.master,
            "files": statuses,
        });
        let text = serde_json::to_string_pretty(&out)
            .map_err(|e| format!("Failed to serialize status: {}", e))?;
        println!("{}", text);
        return Ok(());
    }

    println!("Master: {}", file_name(&file_set.master));
    for entry in &statuses {
        print_status_line(entry);
    }

    let pending = statuses.iter().filter(|s| !s.missing.is_empty()).count();
    if pending == 0 {
        println!("✅ All target files are up to date");
    } else {
        println!("{} of {} target files need a sync", pending, statuses.len());
    }
    Ok(())
}

fn print_status_line(entry: &FileStatus) {
    let name = file_name(&entry.path);
    if let Some(error) = &entry.error {
        println!("❌ {} [{}]: {}", name, entry.language, error);
    } else if entry.missing.is_empty() {
        println!("✅ {} [{}]: up to date", name, entry.language);
    } else {
        println!(
            "⚠️  {} [{}]: {} missing",
            name,
            entry.language,
            entry.missing.len()
        );
        for key in &entry.missing {
            println!("    - {}", key);
        }
    }
}
