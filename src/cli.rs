use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use pairalign::aligner::AlignmentMode;

/// The output formats supported by pairalign
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum OutputType {
    /// Human readable alignments with a marker line and CIGAR string
    Text,

    /// Score and alignments as JSON
    Json,
}

/// An enum indicating what kind of alignment to perform
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum AlignmentSpan {
    /// Needleman-Wunsch alignment of both sequences end to end
    Global,

    /// Smith-Waterman alignment of the best scoring substrings
    Local,
}

impl From<AlignmentSpan> for AlignmentMode {
    fn from(value: AlignmentSpan) -> Self {
        match value {
            AlignmentSpan::Global => AlignmentMode::Global,
            AlignmentSpan::Local => AlignmentMode::Local,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct CliArgs {
    /// Set verbosity level. Use multiple times to increase the verbosity level.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<CliSubcommand>,
}

#[derive(Subcommand, Debug)]
pub enum CliSubcommand {
    /// Align two sequences and report the optimal alignments
    Align(AlignArgs),
}

#[derive(Args, Debug)]
pub struct AlignArgs {
    /// First sequence: a FASTA file (first record is used), or the sequence itself with --literal
    #[clap(help_heading = "Inputs")]
    pub first: String,

    /// Second sequence: a FASTA file (first record is used), or the sequence itself with --literal
    #[clap(help_heading = "Inputs")]
    pub second: String,

    /// Interpret the inputs as raw sequences instead of FASTA file paths
    #[arg(short, long)]
    #[clap(help_heading = "Inputs")]
    pub literal: bool,

    /// Output filename. If not given, defaults to stdout
    #[arg(short, long)]
    #[clap(help_heading = "Outputs")]
    pub output: Option<PathBuf>,

    /// Output file type.
    #[arg(value_enum, short = 'O', long, default_value = "text")]
    #[clap(help_heading = "Outputs")]
    pub output_type: OutputType,

    /// Maximum number of co-optimal alignments to report
    #[arg(short = 'n', long, default_value_t = 1)]
    #[clap(help_heading = "Outputs")]
    pub max_alignments: usize,

    /// Alignment span, either global or local alignment.
    #[arg(value_enum, short = 'm', long, default_value = "global")]
    #[clap(help_heading = "Alignment configuration")]
    pub mode: AlignmentSpan,

    /// Score for identical symbols
    #[arg(long = "match", default_value_t = 1, allow_negative_numbers = true)]
    #[clap(help_heading = "Alignment configuration")]
    pub score_match: i32,

    /// Score for differing symbols
    #[arg(long = "mismatch", default_value_t = -1, allow_negative_numbers = true)]
    #[clap(help_heading = "Alignment configuration")]
    pub score_mismatch: i32,

    /// Score for aligning a symbol against a gap
    #[arg(long = "gap", default_value_t = -2, allow_negative_numbers = true)]
    #[clap(help_heading = "Alignment configuration")]
    pub score_gap: i32,

    /// Treat upper- and lowercase symbols as identical
    #[arg(short = 'i', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub ignore_case: bool,

    /// Substitution matrix in JSON format. Overrides --match, --mismatch and --gap.
    #[arg(short = 'M', long)]
    #[clap(help_heading = "Alignment configuration")]
    pub matrix: Option<PathBuf>,
}
