use clap::{Parser, Subcommand};
use sheet_lens_common::Config;
use sheet_lens_core::{
    export_json, open_workbook, run, write_report, ProfileOptions, SheetSelector, Workbook,
};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "sheet-lens", version, about = "Spreadsheet workbook profiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a profile of every selected sheet
    Profile {
        path: PathBuf,
        /// 1-based sheet number, sheet name, or "all"
        #[arg(long, short)]
        sheet: Option<String>,
    },
    /// Write profiles as text or JSON
    Export {
        path: PathBuf,
        #[arg(long, short)]
        sheet: Option<String>,
        /// text or json; defaults to the configured export format
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// List sheet names in workbook order
    Sheets { path: PathBuf },
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = Config::load().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "ignoring unreadable config");
        Config::default()
    });
    match cli.command {
        Commands::Profile { path, sheet } => {
            let stdout = std::io::stdout();
            write_profiles(&path, sheet.as_deref(), "text", &mut stdout.lock(), &config)?
        }
        Commands::Export { path, sheet, format, output } => {
            let format = format.unwrap_or_else(|| config.export.format.clone());
            run_export(&path, sheet.as_deref(), &format, output.as_deref(), &config)?
        }
        Commands::Sheets { path } => run_sheets(&path)?,
    }
    Ok(())
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn write_profiles(
    path: &Path,
    sheet: Option<&str>,
    format: &str,
    out: &mut dyn Write,
    config: &Config,
) -> anyhow::Result<()> {
    if !matches!(format, "text" | "json") {
        anyhow::bail!("unsupported format: {format} (expected text or json)");
    }
    let mut workbook = open_workbook(path)?;
    let sheet_names = workbook.sheet_names();
    let selector = SheetSelector::parse(sheet);
    let outcomes = run(&mut workbook, &selector, &ProfileOptions::from(config))?;
    if format == "json" {
        export_json(&mut *out, &file_name(path), &outcomes)?;
        writeln!(out)?;
    } else {
        let size = std::fs::metadata(path)?.len();
        write_report(out, &file_name(path), size, &sheet_names, &outcomes)?;
    }
    Ok(())
}

fn run_export(
    path: &Path,
    sheet: Option<&str>,
    format: &str,
    output: Option<&Path>,
    config: &Config,
) -> anyhow::Result<()> {
    match output {
        Some(out) => {
            let mut file = std::fs::File::create(out)?;
            write_profiles(path, sheet, format, &mut file, config)?;
            eprintln!("Profile written to {}", out.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_profiles(path, sheet, format, &mut stdout.lock(), config)?;
        }
    }
    Ok(())
}

fn run_sheets(path: &Path) -> anyhow::Result<()> {
    let workbook = open_workbook(path)?;
    for (i, name) in workbook.sheet_names().iter().enumerate() {
        println!("{:>3}. {name}", i + 1);
    }
    Ok(())
}
