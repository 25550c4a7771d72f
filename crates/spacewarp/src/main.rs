mod cli;
mod logging;

use std::process::ExitCode;

use clap::Parser;
use log::error;
use spacewarp_core::mod_system::{LoadSummary, ModState, NativeModuleBackend};
use spacewarp_core::ui_bridge::LogModListUi;
use spacewarp_core::Application;

use crate::cli::CliArgs;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let logging = match logging::init_logging() {
        Ok(handle) => Some(handle),
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            None
        }
    };

    let mut app = Application::new(args.app_options(), Box::new(NativeModuleBackend::new()));
    if let Some(handle) = &logging {
        if let Err(e) = handle.apply_level(app.global_config().log_level) {
            eprintln!("Failed to apply the configured log level: {}", e);
        }
    }

    let summary = match app.run(&mut LogModListUi) {
        Ok(summary) => summary,
        Err(e) => {
            error!("Loading aborted: {}", e);
            eprintln!("spacewarp: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("spacewarp: could not serialize summary: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_summary(&summary);
    }
    ExitCode::SUCCESS
}

fn print_summary(summary: &LoadSummary) {
    println!("Loaded {} mods:", summary.loaded.len());
    for entry in &summary.loaded {
        println!("  {} {} ({})", entry.manifest.name, entry.manifest.version, entry.dir_name);
    }

    let excluded: Vec<_> = summary
        .states
        .iter()
        .filter(|s| s.state != ModState::FullyLoaded)
        .collect();
    if !excluded.is_empty() {
        println!("Excluded {} mods:", excluded.len());
        for status in excluded {
            match &status.detail {
                Some(detail) => println!("  {} ({}): {}", status.dir_name, status.state, detail),
                None => println!("  {} ({})", status.dir_name, status.state),
            }
        }
    }
    for rejected in &summary.rejected {
        println!("  {} (invalid manifest): {}", rejected.dir_name, rejected.reason);
    }
}
