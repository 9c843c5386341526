use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::path::PathBuf;
use xesbridge_log::ir::ACCEPTED_LABEL;
use xesbridge_log::{Classifier, EventLog, Partition, TraceParser};
use xesbridge_xes::constants::{NEGATIVE_FILE, POSITIVE_FILE};
use xesbridge_xes::{is_plain_file_name, read_log_file, ExportLayout, ExportReport, Exporter};

#[derive(Parser)]
#[command(name = "xesbridge")]
#[command(about = "Convert labeled trace files into XES event logs", long_about = None)]
struct Cli {
    /// Trace file with one `<label>\t<event>;<event>;...` line per trace
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Directory receiving the logs and their train/test copies
    #[arg(value_name = "OUTDIR")]
    outdir: PathBuf,

    /// Label that marks a trace as accepted (exact, case-sensitive)
    #[arg(long, value_name = "LABEL", default_value = ACCEPTED_LABEL)]
    accept_label: String,

    /// File name for the accepted log
    #[arg(long, value_name = "FILE", default_value = POSITIVE_FILE, value_parser = output_file_name)]
    positive_name: String,

    /// File name for the rejected log
    #[arg(long, value_name = "FILE", default_value = NEGATIVE_FILE, value_parser = output_file_name)]
    negative_name: String,

    /// Re-read every written file and compare it with the converted logs
    #[arg(long)]
    verify: bool,

    /// Print a JSON summary on stdout
    #[arg(long)]
    json: bool,
}

fn output_file_name(name: &str) -> Result<String, String> {
    if is_plain_file_name(name) {
        Ok(name.to_string())
    } else {
        Err(format!("{name:?} must be a bare file name without directories"))
    }
}

#[derive(Debug, Serialize)]
struct ConversionSummary {
    input: PathBuf,
    records: usize,
    positive: usize,
    negative: usize,
    alphabet: BTreeSet<String>,
    written: Vec<PathBuf>,
    copied: Vec<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let summary = run(&cli)?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<ConversionSummary> {
    let records = TraceParser::parse_file(&cli.input).context("failed to parse input traces")?;
    let record_count = records.len();

    let partition = Classifier::with_accepted_label(cli.accept_label.as_str())
        .partition(records)
        .context("failed to partition traces")?;

    let alphabet = partition.alphabet();
    log::info!(
        "{} records: {} accepted, {} rejected",
        record_count,
        partition.positive.len(),
        partition.negative.len()
    );
    log::info!("Alphabet ({} events): {:?}", alphabet.len(), alphabet);

    let layout = ExportLayout::new(&cli.outdir)
        .with_positive_file(cli.positive_name.as_str())
        .with_negative_file(cli.negative_name.as_str());
    let report = Exporter::new(layout.clone())
        .export(&partition)
        .with_context(|| format!("failed to export logs to {:?}", cli.outdir))?;

    if cli.verify {
        verify(&layout, &partition, &report)?;
    }

    Ok(ConversionSummary {
        input: cli.input.clone(),
        records: record_count,
        positive: partition.positive.len(),
        negative: partition.negative.len(),
        alphabet,
        written: report.written,
        copied: report.copied,
    })
}

fn verify(layout: &ExportLayout, partition: &Partition, report: &ExportReport) -> anyhow::Result<()> {
    let mut checked = 0;
    for path in report.written.iter().chain(&report.copied) {
        let name = path.file_name();
        let on_disk = read_log_file(path).with_context(|| format!("failed to verify {:?}", path))?;
        if &on_disk != expected_log(layout, partition, name) {
            bail!("{:?} does not match the converted log", path);
        }
        checked += 1;
    }

    log::info!("Verified {} files", checked);
    Ok(())
}

// With collapsed names the negative log is the one left on disk.
fn expected_log<'a>(layout: &ExportLayout, partition: &'a Partition, name: Option<&OsStr>) -> &'a EventLog {
    if layout.is_collapsed() || name == layout.negative_path().file_name() {
        &partition.negative
    } else {
        &partition.positive
    }
}
