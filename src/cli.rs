use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use crate::config::CompileOptions;
use crate::diagnostics::ExtractionDiagnostic;
use crate::pipeline::{compile_with_report, filter_lines};
use crate::scanner::{scan, EntityToken, ScanMode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a script into scene descriptors
    Compile {
        /// Script file, or `-` for stdin
        #[arg(long)]
        input: PathBuf,

        /// Output JSON file (stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Pretty-print the JSON output
        #[arg(long)]
        pretty: bool,

        /// JSON file with compile options
        #[arg(long)]
        config: Option<PathBuf>,

        /// Let delimiters be consumed by keywords, as older scripts expect
        #[arg(long)]
        legacy_scan: bool,

        /// Report dropped and incomplete entities on stderr
        #[arg(long)]
        diagnostics: bool,
    },
    /// List the entity keywords found on every beat line
    Tokens {
        /// Script file, or `-` for stdin
        #[arg(long)]
        input: PathBuf,

        /// Let delimiters be consumed by keywords, as older scripts expect
        #[arg(long)]
        legacy_scan: bool,
    },
}

#[derive(Serialize)]
struct LineTokens {
    line: usize,
    tokens: Vec<EntityToken>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile { input, out, pretty, config, legacy_scan, diagnostics } => {
            let mut options = match config {
                Some(path) => load_options(&path)?,
                None => CompileOptions::default(),
            };
            if legacy_scan {
                options.scan_mode = ScanMode::Legacy;
            }
            compile_file(&input, out.as_deref(), pretty, &options, diagnostics)?;
        }
        Commands::Tokens { input, legacy_scan } => {
            let options = if legacy_scan { CompileOptions::legacy() } else { CompileOptions::default() };
            list_tokens(&input, &options)?;
        }
    }
    Ok(())
}

fn read_script(path: &Path) -> Result<String> {
    if path == Path::new("-") {
        let mut contents = String::new();
        std::io::stdin().read_to_string(&mut contents).context("Failed to read script from stdin")?;
        return Ok(contents);
    }
    fs::read_to_string(path).with_context(|| format!("Failed to read script {:?}", path))
}

fn load_options(path: &Path) -> Result<CompileOptions> {
    let json = fs::read_to_string(path).with_context(|| format!("Failed to read config {:?}", path))?;
    CompileOptions::from_json(&json).with_context(|| format!("Invalid compile options in {:?}", path))
}

fn write_json<T: Serialize>(value: &T, out: Option<&Path>, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };

    match out {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
            log::info!("Wrote {:?}", path);
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            writeln!(stdout, "{}", json)?;
        }
    }
    Ok(())
}

fn compile_file(
    input: &Path,
    out: Option<&Path>,
    pretty: bool,
    options: &CompileOptions,
    show_diagnostics: bool,
) -> Result<()> {
    let script = read_script(input)?;
    let report = compile_with_report(&script, options);

    // Printed regardless of RUST_LOG.
    if show_diagnostics {
        for diagnostic in &report.diagnostics {
            eprintln!("{}", format_diagnostic(diagnostic));
        }
    }

    write_json(&report.lines, out, pretty)
}

fn format_diagnostic(diagnostic: &ExtractionDiagnostic) -> String {
    format!(
        "warning: {}:{}: {}",
        diagnostic.location.line, diagnostic.location.column, diagnostic.message
    )
}

fn list_tokens(input: &Path, options: &CompileOptions) -> Result<()> {
    let script = read_script(input)?;
    let lines: Vec<LineTokens> = filter_lines(&script)
        .into_iter()
        .map(|line| LineTokens {
            line: line.number,
            tokens: scan(line.text, options.scan_mode),
        })
        .collect();
    write_json(&lines, None, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_line_format() {
        let report = compile_with_report("notes\n5 seconds fondo azul", &CompileOptions::default());
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(
            format_diagnostic(&report.diagnostics[0]),
            "warning: 2:11: 'fondo' has no color next to it; background dropped"
        );
    }
}
