//! Converter CLI (§6.4): reads a foreign log format (YDVR DAT or TeamSurv
//! plain NMEA-0183) and re-emits it as a WIBL binary file.
use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read};
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use wibl::catalog::{MetadataPayload, PacketId, RawPayload};
use wibl::source::factory::{ConversionOutcome, SerialisableFactory};
use wibl::source::teamsurv::TeamSurvReader;
use wibl::source::ydvr::YdvrReader;
use wibl::source::PacketSource;
use wibl::writer::Writer;

#[derive(Parser)]
#[command(name = "wibl-convert", about = "Convert a foreign NMEA log into a WIBL binary file")]
struct Cli {
    /// Input log file.
    #[arg(short = 'i', long = "input")]
    input: Option<PathBuf>,

    /// Output WIBL file.
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Input format: ydvr/YDVR or teamsurv/TeamSurv.
    #[arg(short = 'f', long = "format")]
    format: Option<String>,

    /// Logger name embedded in the Metadata frame.
    #[arg(short = 'n', long = "name", default_value = "wibl-convert")]
    name: String,

    /// Logger unique id embedded in the Metadata frame.
    #[arg(long = "id", default_value = "0")]
    id: String,

    /// PGNs to drop before they reach the factory (counted separately from
    /// filtered/unsupported conversions).
    #[arg(long = "ignore", num_args = 1..)]
    ignore: Vec<u32>,

    /// Print a one-line conversion summary to stderr on completion.
    #[arg(short = 's', long = "stats")]
    stats: bool,

    /// Embed a product-information JSON blob as an id-14 frame right after
    /// Metadata.
    #[arg(short = 'p', long = "prodinfo")]
    prodinfo: Option<PathBuf>,
}

enum Format {
    Ydvr,
    TeamSurv,
}

fn parse_format(raw: &str) -> Result<Format> {
    match raw.to_ascii_lowercase().as_str() {
        "ydvr" => Ok(Format::Ydvr),
        "teamsurv" => Ok(Format::TeamSurv),
        other => anyhow::bail!("unrecognised format '{other}' (expected ydvr or teamsurv)"),
    }
}

#[derive(Debug, Default)]
struct Stats {
    packets_read: u64,
    conversions: u64,
    filtered: u64,
    ignored: u64,
    unsupported: u64,
}

fn main() -> ExitCode {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let input_path = cli.input.context("missing required argument --input/-i")?;
    let output_path = cli.output.context("missing required argument --output/-o")?;
    let format_raw = cli.format.context("missing required argument --format/-f")?;
    let format = parse_format(&format_raw)?;

    let input =
        File::open(&input_path).with_context(|| format!("opening input {}", input_path.display()))?;
    let output = File::create(&output_path)
        .with_context(|| format!("creating output {}", output_path.display()))?;

    let metadata = MetadataPayload::new(cli.name.into_bytes(), cli.id.into_bytes());
    let mut writer = Writer::new(BufWriter::new(output), metadata);

    if let Some(path) = &cli.prodinfo {
        let json =
            std::fs::read(path).with_context(|| format!("reading prodinfo {}", path.display()))?;
        let payload = RawPayload::new(json);
        writer
            .record(PacketId::Json.as_u32(), &payload.to_buffer())
            .context("writing prodinfo frame")?;
    }

    let ignore: HashSet<u32> = cli.ignore.iter().copied().collect();
    let mut stats = Stats::default();

    match format {
        Format::Ydvr => {
            let mut source = YdvrReader::new(BufReader::new(input));
            convert_n2k(&mut source, &mut writer, &ignore, &mut stats)?;
        }
        Format::TeamSurv => {
            let mut source = TeamSurvReader::new(BufReader::new(input));
            convert_nmea0183(&mut source, &mut writer, &mut stats)?;
        }
    }

    if cli.stats {
        eprintln!(
            "packets read: {}, conversions: {}, filtered: {}, ignored: {}, unsupported: {}",
            stats.packets_read, stats.conversions, stats.filtered, stats.ignored, stats.unsupported
        );
    }
    tracing::info!(
        packets_read = stats.packets_read,
        conversions = stats.conversions,
        filtered = stats.filtered,
        ignored = stats.ignored,
        unsupported = stats.unsupported,
        "conversion complete"
    );

    Ok(())
}

fn convert_n2k<R: Read>(
    source: &mut YdvrReader<R>,
    writer: &mut Writer<BufWriter<File>>,
    ignore: &HashSet<u32>,
    stats: &mut Stats,
) -> Result<()> {
    while let Some(msg) = source.next_n2k().context("reading YDVR record")? {
        stats.packets_read += 1;
        if ignore.contains(&msg.pgn) {
            stats.ignored += 1;
            continue;
        }
        match SerialisableFactory::convert(&msg) {
            ConversionOutcome::Emit(id, buf) => {
                writer
                    .record(id.as_u32(), &buf)
                    .context("writing converted frame")?;
                stats.conversions += 1;
            }
            ConversionOutcome::Filtered => {
                tracing::debug!(pgn = msg.pgn, "dropped by filter rule");
                stats.filtered += 1;
            }
            ConversionOutcome::Unsupported => {
                tracing::trace!(pgn = msg.pgn, "no catalog mapping for PGN");
                stats.unsupported += 1;
            }
        }
    }
    Ok(())
}

fn convert_nmea0183<R: std::io::BufRead>(
    source: &mut TeamSurvReader<R>,
    writer: &mut Writer<BufWriter<File>>,
    stats: &mut Stats,
) -> Result<()> {
    while let Some((elapsed_ms, sentence)) =
        source.next_nmea0183().context("reading TeamSurv line")?
    {
        stats.packets_read += 1;
        let buf = SerialisableFactory::nmea0183_frame(elapsed_ms, sentence);
        writer
            .record(PacketId::NmeaString.as_u32(), &buf)
            .context("writing NMEA-0183 frame")?;
        stats.conversions += 1;
    }
    Ok(())
}
