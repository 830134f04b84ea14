//! Fixturebook CLI - test-fixture workbook generator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use fixturebook_core::{dataset, FixtureTable, TestCaseRecord, FIELD_NAMES};
use fixturebook_xlsx::{XlsxReader, XlsxWriter};
use std::io;
use std::path::{Path, PathBuf};

/// Where the akhan suite expects its combined test-data workbook
const DEFAULT_OUTPUT: &str = "test/akhan/data/akhan-combined-test-data.xlsx";

#[derive(Parser)]
#[command(name = "fixturebook")]
#[command(author, version, about = "Test-case fixture workbook generator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the fixture table and write it as an XLSX workbook
    #[command(alias = "gen")]
    Generate {
        /// Output workbook path (parent directory must exist)
        #[arg(short, long, default_value = DEFAULT_OUTPUT)]
        output: PathBuf,

        /// JSON array of test-case records (default: embedded reference set)
        #[arg(short, long)]
        fixtures: Option<PathBuf>,
    },

    /// Print the fixture table stored in an existing workbook
    Show {
        /// Input workbook file
        input: PathBuf,
    },

    /// Write the fixture table as CSV to stdout or a file
    #[command(name = "to-csv", alias = "csv")]
    ToCsv {
        /// JSON array of test-case records (default: embedded reference set)
        #[arg(short, long)]
        fixtures: Option<PathBuf>,

        /// Output CSV file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate { output, fixtures } => generate(&output, fixtures.as_deref()),
        Commands::Show { input } => show(&input),
        Commands::ToCsv { fixtures, output } => to_csv(fixtures.as_deref(), output.as_deref()),
    }
}

/// Load the fixture table: a JSON file if given, the embedded set otherwise
fn load_table(fixtures: Option<&Path>) -> Result<FixtureTable> {
    match fixtures {
        None => Ok(dataset::reference()),
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read '{}'", path.display()))?;
            let records: Vec<TestCaseRecord> = serde_json::from_str(&text)
                .with_context(|| format!("Failed to parse '{}'", path.display()))?;
            Ok(FixtureTable::from_records(records))
        }
    }
}

fn generate(output: &Path, fixtures: Option<&Path>) -> Result<()> {
    let table = load_table(fixtures)?;

    for id in table.duplicate_ids() {
        eprintln!("Warning: duplicate testCase label '{}'", id);
    }

    XlsxWriter::write_file(&table, output)
        .with_context(|| format!("Failed to write '{}'", output.display()))?;

    let abs = output
        .canonicalize()
        .with_context(|| format!("Failed to resolve '{}'", output.display()))?;
    println!("Excel file created at: {}", abs.display());

    Ok(())
}

fn show(input: &Path) -> Result<()> {
    let table = XlsxReader::read_file(input)
        .with_context(|| format!("Failed to open '{}'", input.display()))?;

    println!("{}", FIELD_NAMES.join("\t"));
    for record in &table {
        println!("{}", record.fields().join("\t"));
    }
    eprintln!("{} test cases", table.len());

    Ok(())
}

fn to_csv(fixtures: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let table = load_table(fixtures)?;

    let mut writer: csv::Writer<Box<dyn io::Write>> = match output {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Failed to create '{}'", path.display()))?;
            csv::Writer::from_writer(Box::new(file))
        }
        None => csv::Writer::from_writer(Box::new(io::stdout())),
    };

    writer.write_record(FIELD_NAMES)?;
    for record in &table {
        writer.write_record(record.fields())?;
    }
    writer.flush().context("Failed to flush CSV output")?;

    if let Some(path) = output {
        eprintln!("Wrote {} rows to '{}'", table.len() + 1, path.display());
    }

    Ok(())
}
