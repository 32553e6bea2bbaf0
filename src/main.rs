use anyhow::Context;
use clap::Parser;
use jsdoc_strip::{Cli, JsdocStrip, OutputFormatter, OutputMode, StripError};
use std::path::PathBuf;
use std::process;

fn main() {
    let exit_code = run();
    process::exit(exit_code);
}

fn run() -> i32 {
    let cli = Cli::parse();

    if cli.generate_config {
        return handle_generate_config(&cli);
    }

    let strip = match JsdocStrip::from_cli(&cli) {
        Ok(strip) => strip,
        Err(e) => {
            print_startup_error(&e);
            return 1;
        }
    };

    match strip.run() {
        // Per-file errors are reported in the run itself and do not change the exit code.
        Ok(report) if report.cancelled => 130,
        Ok(_) => 0,
        Err(e) => {
            strip.handle_error(&e);
            1
        }
    }
}

fn handle_generate_config(cli: &Cli) -> i32 {
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from("jsdoc-strip.toml"));

    let result = JsdocStrip::generate_sample_config(&config_path).with_context(|| {
        format!(
            "Failed to generate configuration file {}",
            config_path.display()
        )
    });

    match result {
        Ok(()) => {
            println!(
                "Generated sample configuration file: {}",
                config_path.display()
            );
            println!("\nTo use this configuration:");
            println!("  jsdoc-strip --config {}", config_path.display());
            0
        }
        Err(e) => {
            eprintln!("{:#}", e);
            1
        }
    }
}

fn print_startup_error(error: &StripError) {
    let formatter = OutputFormatter::new(OutputMode::Human, 0, false);
    formatter.print_user_friendly_error(error);
}
