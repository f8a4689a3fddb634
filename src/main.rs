use std::fs::{self, File};
use std::io::{self, stdout, BufWriter, IsTerminal, Write};

use anyhow::{bail, Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info, span, Level};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry};

use pairalign::aligner::scoring::{CaseSensitivity, GapLinear, SubstitutionMatrix};
use pairalign::aligner::{align_with_progress, AlignmentMode, AlignmentResult, RowProgress, Score, ScoringFunction};
use pairalign::io::read_first_sequence;

mod cli;

use cli::{AlignArgs, CliArgs, CliSubcommand, OutputType};

/// Install a stderr logger. `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbosity: u8) -> Result<()> {
    let default_level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter_layer = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_level))?;

    let stderr_log = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_file(false)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_filter(filter_layer);

    Registry::default().with(stderr_log).try_init()?;

    Ok(())
}

fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.verbose)?;

    match &args.command {
        Some(CliSubcommand::Align(v)) => align_subcommand(v)?,
        None => bail!("No subcommand given. Try `pairalign align --help`."),
    };

    Ok(())
}

#[derive(Serialize)]
struct AlignmentReport<'a> {
    first_name: &'a str,
    second_name: &'a str,
    mode: AlignmentMode,
    score: Score,
    alignments: &'a [AlignmentResult],
}

fn load_input(input: &str, literal: bool, default_name: &str) -> Result<(String, Vec<u8>)> {
    if literal {
        return Ok((default_name.to_string(), input.as_bytes().to_vec()));
    }

    let record = read_first_sequence(input)
        .with_context(|| format!("Could not read sequence from {input}"))?;

    Ok((record.name, record.sequence))
}

fn progress_logger() -> impl FnMut(RowProgress) {
    let mut last_decile = 0;

    move |progress| {
        let decile = (progress.fraction() * 10.0) as usize;
        if decile > last_decile {
            last_decile = decile;
            debug!("Filled {}/{} rows ({}%)", progress.row, progress.total_rows, decile * 10);
        }
    }
}

fn perform_alignment<S>(
    align_args: &AlignArgs,
    scoring: S,
    first: &(String, Vec<u8>),
    second: &(String, Vec<u8>),
) -> Result<()>
where
    S: ScoringFunction,
{
    let mode = AlignmentMode::from(align_args.mode);

    info!("Aligning {} ({} bp) and {} ({} bp), mode: {:?}",
        first.0, first.1.len(), second.0, second.1.len(), mode);

    let (score, alignments) = align_with_progress(
        mode,
        &first.1,
        &second.1,
        scoring,
        align_args.max_alignments,
        progress_logger(),
    )?;

    info!("Done. Alignment score: {score}, {} alignment(s) reported", alignments.len());

    // Determine where to write the alignments to
    let mut writer: Box<dyn Write> = if let Some(path) = &align_args.output {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?
        }

        let file = File::create(path)
            .with_context(|| format!("Could not create output file {}", path.display()))?;
        Box::new(BufWriter::new(file))
    } else {
        Box::new(stdout())
    };

    match align_args.output_type {
        OutputType::Text => {
            writeln!(writer, "# {} vs {}", first.0, second.0)?;
            writeln!(writer, "# score: {score}")?;

            for (i, aln) in alignments.iter().enumerate() {
                writeln!(writer)?;
                writeln!(
                    writer,
                    "# alignment {}: first {}..{}, second {}..{}, cigar {}",
                    i + 1,
                    aln.first_range.start,
                    aln.first_range.end,
                    aln.second_range.start,
                    aln.second_range.end,
                    aln.cigar()
                )?;
                writeln!(writer, "{aln}")?;
            }
        },
        OutputType::Json => {
            let report = AlignmentReport {
                first_name: &first.0,
                second_name: &second.0,
                mode,
                score,
                alignments: &alignments,
            };

            serde_json::to_writer_pretty(&mut writer, &report)?;
            writeln!(writer)?;
        }
    }

    writer.flush()?;

    Ok(())
}

fn align_subcommand(align_args: &AlignArgs) -> Result<()> {
    let span = span!(Level::INFO, "align_subcommand");
    let _enter = span.enter();

    let first = load_input(&align_args.first, align_args.literal, "first")?;
    let second = load_input(&align_args.second, align_args.literal, "second")?;

    if let Some(path) = &align_args.matrix {
        let file = File::open(path)
            .with_context(|| format!("Could not open substitution matrix {}", path.display()))?;
        let matrix = SubstitutionMatrix::from_json(io::BufReader::new(file))
            .with_context(|| format!("Could not parse substitution matrix {}", path.display()))?;

        perform_alignment(align_args, matrix, &first, &second)
    } else {
        let case = if align_args.ignore_case {
            CaseSensitivity::Insensitive
        } else {
            CaseSensitivity::Sensitive
        };

        let scoring = GapLinear::new(align_args.score_match, align_args.score_mismatch, align_args.score_gap)
            .with_case_sensitivity(case);

        perform_alignment(align_args, scoring, &first, &second)
    }
}
