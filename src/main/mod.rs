use std::path::PathBuf;

use clap::Parser;
use gtf2bed12::{
    commands::{gtf_to_bed12, ConvertOptions},
    prelude::*,
    DEFAULT_CHUNKS,
};
use log::{warn, Level};

const INFO: &str = "\
gtf2bed12: convert GTF transcript annotations to BED12
usage: gtf2bed12 --gtf-file <GTF> [--output <BED>]

Each transcript's 'transcript' row gives the BED range, and its 'exon'
rows give the BED blocks. One BED12 line is written per transcript.
";

#[derive(Parser)]
#[clap(name = "gtf2bed12")]
#[clap(about = INFO)]
struct Cli {
    /// the input GTF file (plaintext or gzip-compressed)
    #[arg(short, long, required = true)]
    gtf_file: PathBuf,

    /// keep the transcript ID as a 13th column (not yet implemented)
    #[arg(short, long)]
    bed12plus: bool,

    /// an optional output file (standard output will be used if not specified)
    #[arg(long)]
    output: Option<PathBuf>,

    /// number of chunks to split the rows into for parallel attribute parsing
    #[arg(long, default_value_t = DEFAULT_CHUNKS)]
    chunks: usize,

    /// number of threads (defaults to the number of CPUs)
    #[arg(long)]
    threads: Option<usize>,

    /// sort output by transcript ID, rather than input order
    #[arg(long)]
    sort: bool,

    /// skip malformed transcripts with a warning, rather than stopping
    #[arg(long)]
    skip_malformed: bool,

    /// keep the GTF end position as the BED end (standard half-open conversion),
    /// rather than subtracting one from it
    #[arg(long)]
    half_open: bool,

    /// increase logging verbosity (-d for info, -dd for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    debug: u8,
}

impl Cli {
    fn options(&self) -> ConvertOptions {
        ConvertOptions {
            mode: if self.bed12plus {
                OutputMode::Bed12Plus
            } else {
                OutputMode::Bed12
            },
            chunks: self.chunks,
            threads: self.threads,
            order: if self.sort {
                GroupOrder::Sorted
            } else {
                GroupOrder::FirstAppearance
            },
            malformed: if self.skip_malformed {
                MalformedGroupPolicy::Skip
            } else {
                MalformedGroupPolicy::Abort
            },
            convention: if self.half_open {
                CoordinateConvention::HalfOpen
            } else {
                CoordinateConvention::Legacy
            },
        }
    }
}

fn run() -> Result<(), Gtf2BedError> {
    let cli = Cli::parse();

    let level = match cli.debug {
        0 => Level::Warn,
        1 => Level::Info,
        _ => Level::Debug,
    };
    simple_logger::init_with_level(level)?;

    let output = gtf_to_bed12(&cli.gtf_file, cli.output.as_ref(), &cli.options())?;
    for issue in output.report.issues() {
        warn!("{}", issue);
    }
    Ok(())
}

fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
