use std::path::Path;

use langsync::{
    FileSet, GoogleTranslator, PassthroughTranslator, PseudoTranslator, Reconciler, RunReport,
    SyncEvent, Translator, scan,
};
use tokio::sync::mpsc;

use crate::config::{ProviderKind, ResolvedConfig};

#[derive(Debug, Clone)]
pub struct SyncCommandOptions {
    pub directory: String,
    pub report_json: Option<String>,
    pub config: ResolvedConfig,
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn run_engine<T: Translator>(
    translator: T,
    config: &ResolvedConfig,
    file_set: &FileSet,
    events: &mpsc::UnboundedSender<SyncEvent>,
) -> Result<RunReport, String> {
    let reconciler = Reconciler::new(translator, config.options.clone());
    let mut sink = |event: SyncEvent| {
        let _ = events.send(event);
    };
    reconciler.run(file_set, &mut sink).map_err(|e| e.to_string())
}

/// Builds the provider and runs the reconciliation on the current thread.
fn reconcile(
    config: &ResolvedConfig,
    file_set: &FileSet,
    events: &mpsc::UnboundedSender<SyncEvent>,
) -> Result<RunReport, String> {
    match config.provider {
        ProviderKind::Google => {
            let translator = GoogleTranslator::with_endpoint(config.endpoint.clone(), config.timeout)
                .map_err(|e| format!("Failed to create translation client: {}", e))?;
            run_engine(translator, config, file_set, events)
        }
        ProviderKind::Pseudo => run_engine(PseudoTranslator, config, file_set, events),
        ProviderKind::Passthrough => run_engine(PassthroughTranslator, config, file_set, events),
    }
}

fn render_event(event: &SyncEvent) {
    match event {
        SyncEvent::RunStarted { master, targets } => {
            println!("Syncing {} target file(s) against {}", targets, file_name(master));
        }
        SyncEvent::MasterLoaded { keys, .. } => {
            println!("Master contains {} key(s)", keys);
        }
        SyncEvent::FileStarted { path, language } => {
            println!("🔄 {} [{}]", file_name(path), language);
        }
        SyncEvent::MissingKeys { count, .. } => {
            if *count > 0 {
                println!("   {} missing key(s)", count);
            }
        }
        SyncEvent::KeyTranslated {
            key, index, total, ..
        } => {
            println!("   [{}/{}] {}", index, total, key);
        }
        SyncEvent::KeyFailed { key, error, .. } => {
            println!("   ⚠️  {} kept source text: {}", key, error);
        }
        SyncEvent::FileSkipped { path, reason } => {
            println!("❌ {} skipped: {}", file_name(path), reason);
        }
        SyncEvent::FileCompleted {
            path,
            translated,
            failed,
            written,
        } => {
            if *translated == 0 && *failed == 0 {
                println!("✅ {} is up to date", file_name(path));
            } else if *written {
                println!(
                    "✅ {} updated ({} translated, {} failed)",
                    file_name(path),
                    translated,
                    failed
                );
            } else {
                println!(
                    "✅ {} would be updated ({} translated, {} failed)",
                    file_name(path),
                    translated,
                    failed
                );
            }
        }
        SyncEvent::RunCompleted { .. } => {}
    }
}

fn print_summary(report: &RunReport) {
    println!("Updated: {}", report.updated());
    println!("Up to date: {}", report.up_to_date());
    println!("Skipped: {}", report.skipped());
    println!("Keys filled: {}", report.translated());
    println!("Provider failures: {}", report.failed());
}

fn write_report(path: &str, report: &RunReport) -> Result<(), String> {
    let text = serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report: {}", e))?;
    std::fs::write(path, format!("{}\n", text))
        .map_err(|e| format!("Failed to write report {}: {}", path, e))
}

pub fn run_sync_command(opts: SyncCommandOptions) -> Result<(), String> {
    let file_set = scan(&opts.directory, &opts.config.options).map_err(|e| e.to_string())?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("Failed to start runtime: {}", e))?;

    let config = opts.config.clone();
    let report = runtime.block_on(async move {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let worker = tokio::task::spawn_blocking(move || reconcile(&config, &file_set, &tx));

        while let Some(event) = rx.recv().await {
            render_event(&event);
        }

        worker
            .await
            .map_err(|e| format!("Sync worker failed: {}", e))
            .and_then(|result| result)
    })?;

    print_summary(&report);

    if let Some(report_path) = &opts.report_json {
        write_report(report_path, &report)?;
        println!("Report JSON written: {}", report_path);
    }

    if opts.config.options.dry_run {
        println!("Dry-run mode: no files were written");
        return Ok(());
    }

    println!("✅ Sync complete: {}", opts.directory);
    Ok(())
}
