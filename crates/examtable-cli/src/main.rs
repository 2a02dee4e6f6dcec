use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use clap::Parser;
use examtable_cli::cli_args::{Cli, Command};
use examtable_cli::pdf::PdfRenderer;
use examtable_cli::view;
use examtable_core::export::{ExportError, TimetableRenderer, build_timetable, export_filename};
use examtable_core::logging::{LoggingDestination, init_logging};
use examtable_core::planner::Planner;
use examtable_core::store::{FileStore, KeyValueStore};
use examtable_core::{FileConfig, load_config};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(err) = dispatch(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> Result<(), String> {
    init_logging(LoggingDestination::FileOnly).map_err(|err| err.to_string())?;

    let load = load_config();
    for warning in &load.warnings {
        eprintln!("Warning: {warning}");
    }
    let config = load.config;

    let store = FileStore::open_default().map_err(|err| err.to_string())?;
    let mut planner = Planner::new(store);
    let client = reqwest::Client::new();
    let data_url = cli.data_url.as_deref().or(config.data_url.as_deref());
    planner
        .load_initial(&client, data_url)
        .await
        .map_err(|err| err.to_string())?;

    match cli.command {
        Command::List => {
            print!("{}", view::render_checklist(&planner));
            Ok(())
        }
        Command::Select { names } => {
            let unknown = planner.select(&names).map_err(|err| err.to_string())?;
            for name in unknown {
                eprintln!("Warning: no subject named '{name}'");
            }
            print!("{}", view::render_checklist(&planner));
            Ok(())
        }
        Command::Deselect { names } => {
            planner.deselect(&names).map_err(|err| err.to_string())?;
            print!("{}", view::render_checklist(&planner));
            Ok(())
        }
        Command::SelectAll => {
            planner.select_all().map_err(|err| err.to_string())?;
            print!("{}", view::render_checklist(&planner));
            Ok(())
        }
        Command::Clear => {
            planner.clear_selection().map_err(|err| err.to_string())?;
            print!("{}", view::render_checklist(&planner));
            Ok(())
        }
        Command::Preview { student } => {
            let student = resolve_student(student, &config);
            print!("{}", view::render_preview(&planner, &student));
            Ok(())
        }
        Command::Generate { student, out } => {
            let student = resolve_student(student, &config);
            generate(&planner, &student, out)
        }
        Command::Import { file } => {
            let text =
                fs::read_to_string(&file).map_err(|err| format!("Import failed: {err}"))?;
            let count = planner
                .import(&text)
                .map_err(|err| format!("Import failed: {err}"))?;
            println!("Imported {count} subject(s).");
            Ok(())
        }
        Command::Export { file } => {
            let json = planner.export_json().map_err(|err| err.to_string())?;
            fs::write(&file, json).map_err(|err| err.to_string())?;
            println!("Wrote {}", file.display());
            Ok(())
        }
        Command::ExtraTime { state } => {
            planner
                .set_extra_time(state.enabled())
                .map_err(|err| err.to_string())?;
            println!(
                "Extra time {}.",
                if state.enabled() { "enabled" } else { "disabled" }
            );
            Ok(())
        }
    }
}

fn resolve_student(flag: Option<String>, config: &FileConfig) -> String {
    flag.or_else(|| config.student_name.clone()).unwrap_or_default()
}

fn generate<S: KeyValueStore>(
    planner: &Planner<S>,
    student: &str,
    out: Option<PathBuf>,
) -> Result<(), String> {
    let selected = planner.effective_selection();
    let timetable = build_timetable(&selected, student, planner.extra_time(), Local::now())
        .map_err(|err| match err {
            ExportError::NoSubjectsSelected => "Please select at least one subject.".to_string(),
            other => format!("PDF generation failed: {other}"),
        })?;

    let out = out.unwrap_or_else(|| PathBuf::from(export_filename(student)));
    let dir = out
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    // Render into a scoped temp file; it is removed automatically unless the
    // whole pipeline succeeds, so a failed export never leaves a partial PDF.
    let temp = tempfile::NamedTempFile::new_in(&dir)
        .map_err(|err| format!("PDF generation failed: {err}"))?;
    PdfRenderer
        .render(&timetable, temp.path())
        .map_err(|err| format!("PDF generation failed: {err}"))?;
    temp.persist(&out)
        .map_err(|err| format!("PDF generation failed: {err}"))?;

    println!("Saved {}", out.display());
    Ok(())
}
