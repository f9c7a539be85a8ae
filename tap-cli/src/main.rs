//! `tapctl` renders a live proxy tap stream.
//!
//! Decoded tap events are read one JSON object per line from a file or stdin and written to stdout
//! as compact lines, wide lines annotated with Kubernetes resource labels, or JSON documents.
use std::fs::File;
use std::io::{
    self,
    BufRead,
    BufReader,
};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{
    bail,
    Context,
    Result,
};
use clap::Parser;
use tap_core::k8s::canonical_resource_name;
use tap_core::{
    consume,
    JsonLinesSource,
    OutputMode,
    Renderer,
    Termination,
};
use tracing::{
    debug,
    info,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Compact,
    Wide,
    Json,
}

/// Render a stream of proxy tap events
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The tapped resource, as TYPE, TYPE/NAME or TYPE NAME (e.g. deploy/web); its type selects
    /// the labels shown in wide output
    #[arg(num_args = 0..=2)]
    resource: Vec<String>,

    /// Output format. One of: "wide", "json" (compact lines when empty)
    #[arg(short, long, value_parser = parse_output_format)]
    output: Option<OutputFormat>,

    /// Read tap events from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Logging verbosity level (`trace`, `debug`, `info`, `warn`, `error`)
    #[arg(short, long, default_value = "warn")]
    verbosity: String,
}

fn parse_output_format(s: &str) -> Result<OutputFormat, String> {
    match s {
        "" => Ok(OutputFormat::Compact),
        "wide" => Ok(OutputFormat::Wide),
        "json" => Ok(OutputFormat::Json),
        _ => Err(format!("output format \"{s}\" not recognized")),
    }
}

/// The canonical kind of the tapped resource, if one was given.
fn resource_kind(resource: &[String]) -> Result<Option<&'static str>> {
    let Some(target) = resource.first() else { return Ok(None) };
    let kind = target.split('/').next().unwrap_or_default();
    match canonical_resource_name(kind) {
        Some(canonical) => Ok(Some(canonical)),
        None => bail!("unsupported resource type \"{kind}\""),
    }
}

fn output_mode(args: &Cli) -> Result<OutputMode> {
    let kind = resource_kind(&args.resource)?;
    let mode = match args.output.unwrap_or(OutputFormat::Compact) {
        OutputFormat::Compact => OutputMode::Compact,
        OutputFormat::Json => OutputMode::Json,
        OutputFormat::Wide => {
            let Some(kind) = kind else { bail!("wide output needs the tapped RESOURCE") };
            OutputMode::Wide { resource_kind: kind.into() }
        },
    };
    Ok(mode)
}

fn open_input(file: Option<&PathBuf>) -> Result<Box<dyn BufRead>> {
    let reader: Box<dyn BufRead> = match file {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("could not open {}", path.display()))?;
            Box::new(BufReader::new(f))
        },
        None => Box::new(io::stdin().lock()),
    };
    Ok(reader)
}

fn main() -> Result<ExitCode> {
    let args = Cli::parse();
    tap_core::logging::setup(&args.verbosity);

    let renderer = Renderer::new(output_mode(&args)?);
    debug!(mode = ?renderer.mode(), "rendering tap events");

    let mut source = JsonLinesSource::new(open_input(args.file.as_ref())?);
    let summary = consume(&mut source, io::stdout().lock(), &renderer)?;
    info!("rendered {} tap events", summary.rendered);

    Ok(match summary.termination {
        Termination::EndOfInput => ExitCode::SUCCESS,
        Termination::SourceFailed => ExitCode::FAILURE,
    })
}
