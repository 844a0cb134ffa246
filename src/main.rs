// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap (wrong count = usage, exit 2)
// 2. Set up logging
// 3. Build the settings and the copy request, then run the copy
// 4. Print the report
// 5. Exit with proper code (0 = success, 1 = run failed, 3 = remote query failed)
// =============================================================================

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use repo_copy::{logging, CopyError, CopyReport};

const EXIT_FAILED: i32 = 1;
const EXIT_FATAL: i32 = 3;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);

    let exit_code = match run(&cli).await {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            match e.downcast_ref::<CopyError>() {
                Some(err) if err.is_fatal() => EXIT_FATAL,
                _ => EXIT_FAILED,
            }
        }
    };

    std::process::exit(exit_code);
}

async fn run(cli: &Cli) -> Result<()> {
    let settings = cli.settings()?;
    let request = cli.request()?;

    if !cli.json {
        println!(
            "📦 Copying {}/{} into {}",
            request.old_repo,
            request.old_dir,
            settings.dest_root.join(&request.new_dir).display()
        );
    }

    let report = repo_copy::run(&settings, &request).await?;

    if cli.json {
        let json = serde_json::to_string_pretty(&report).context("serializing report")?;
        println!("{}", json);
    } else {
        print_summary(&report);
    }
    Ok(())
}

// Prints the human-readable summary of a finished run
fn print_summary(report: &CopyReport) {
    println!("🔖 Source: {}", report.source_url);
    println!("🔁 {} -> {}", report.old_prefix, report.new_prefix);
    println!();

    println!("{:<70} {:>10}", "FILE", "REWRITTEN");
    println!("{}", "=".repeat(81));
    for file in &report.files {
        let path = file
            .path
            .strip_prefix(&report.destination)
            .unwrap_or(&file.path)
            .display()
            .to_string();
        println!("{:<70} {:>10}", path, file.rewritten_lines);
    }
    println!();

    if !report.internal_packages.is_empty() {
        println!("⚠️  Still references internal packages of {}:", report.source.name);
        for pkg in &report.internal_packages {
            println!("   {}", pkg);
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   📄 Files: {}", report.files.len());
    println!("   ✏️  Rewritten lines: {}", report.rewritten_lines());
    println!("   🔖 Commit: {}", report.commit);
}

// -----------------------------------------------------------------------------
// BEGINNER NOTES:
//
// 1. Why does the library return CopyError but main use anyhow?
//    - The library names every failure so callers (and tests) can match on it
//    - main only needs to print the error and pick an exit code
//    - downcast_ref gets the typed error back out of anyhow::Error
//
// 2. Why not call std::process::exit deep inside the copy?
//    - exit() skips destructors, so the scratch clone would be left behind
//    - Returning the error lets the TempDir drop and delete itself first
// -----------------------------------------------------------------------------
