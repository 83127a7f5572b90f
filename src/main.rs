//! CLI entry point for colorpro.

use std::io::Read;

use clap::{CommandFactory, Parser};
use color_eyre::eyre::{Result, WrapErr, bail};

use colorpro::cli::Cli;
use colorpro::config::ColorproConfig;
use colorpro::descriptor::{ParsedDocument, parse_document, parse_line};
use colorpro::logging::init_logging;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "colorpro", &mut std::io::stdout());
        return Ok(());
    }

    let _guard = init_logging(cli.log_file.as_deref(), &cli.log_level);

    let config = ColorproConfig::load(cli.config.as_deref(), &cli.to_config_overrides())
        .wrap_err("Failed to load configuration")?;

    if let Some(ref path) = cli.save_config {
        config
            .save(path)
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;
        eprintln!("Wrote configuration to {}", path.display());
        if cli.input.is_none() && cli.color.is_empty() {
            return Ok(());
        }
    }

    let formatter = config.output.format.formatter();
    let pipeline = config
        .pipeline(formatter.required_pairs())
        .wrap_err("Invalid viewing condition")?;

    let document = read_descriptors(&cli)?;
    for invalid in &document.invalid {
        eprintln!("Invalid: {}", invalid.text);
    }

    let entries: Vec<_> = document
        .entries
        .into_iter()
        .map(|d| d.into_named(config.output.correlate))
        .collect();

    let mut records = Vec::with_capacity(entries.len());
    let mut failures = 0usize;
    for result in pipeline.run(&entries) {
        match result {
            Ok(record) => records.push(record),
            Err(err) => {
                failures += 1;
                eprintln!("Failed: {err}");
            }
        }
    }

    let rendered = formatter
        .render(&records)
        .wrap_err("Failed to render output")?;

    if let Some(ref path) = cli.output {
        std::fs::write(path, &rendered)
            .wrap_err_with(|| format!("Failed to write to {}", path.display()))?;
        eprintln!("Wrote {} colors to {}", records.len(), path.display());
    } else {
        print!("{rendered}");
    }

    if cli.strict && (failures > 0 || !document.invalid.is_empty()) {
        bail!(
            "{} invalid line(s) and {} failed conversion(s)",
            document.invalid.len(),
            failures
        );
    }

    Ok(())
}

/// Gather descriptors from the input file (or stdin) and `--color` flags.
fn read_descriptors(cli: &Cli) -> Result<ParsedDocument> {
    let mut document = match cli.input {
        Some(ref path) if path.as_os_str() == "-" => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .wrap_err("Failed to read descriptors from stdin")?;
            parse_document(&text)
        }
        Some(ref path) => {
            let text = std::fs::read_to_string(path)
                .wrap_err_with(|| format!("Failed to read {}", path.display()))?;
            parse_document(&text)
        }
        None => ParsedDocument::default(),
    };

    for (idx, color) in cli.color.iter().enumerate() {
        match parse_line(idx + 1, color) {
            Ok(Some(entry)) => document.entries.push(entry),
            Ok(None) => {}
            Err(err) => document.invalid.push(err),
        }
    }

    Ok(document)
}
