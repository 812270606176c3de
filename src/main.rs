use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::Parser;
use log::{debug, info};

use snp_density::registry::Registry;
use snp_density::report::{self, OutputFormat, ReportOpt, DEFAULT_WINDOW_SIZE};

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

#[derive(Parser, Debug)]
#[command(
    name = "snp-density",
    author,
    version,
    about = "Per-chromosome transition/transversion counts and densest SNP window"
)]
struct Cli {
    /// Input VCF file ('-' for stdin, '.gz' is decompressed)
    input: PathBuf,
    /// Window size in bp for the density scan
    #[arg(
        short = 'w',
        long = "window-size",
        default_value_t = DEFAULT_WINDOW_SIZE,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    window_size: u64,
    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Tsv)]
    format: OutputFormat,
    /// Emit every scanned window instead of one summary row per chromosome
    #[arg(long)]
    profile: bool,
    /// Fixed number of decimals for densities
    #[arg(short, long)]
    precision: Option<usize>,
    /// Output path (stdout if omitted)
    #[arg(short, long)]
    out: Option<PathBuf>,
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if is_positional_count_error(&e) => {
            print_usage();
            return Ok(());
        }
        Err(e) => e.exit(),
    };

    let level = match cli.verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    run(&cli)
}

/// 缺少输入或多出位置参数；未知的 `-` / `--` 选项仍按 clap 错误退出
fn is_positional_count_error(e: &clap::Error) -> bool {
    match e.kind() {
        ErrorKind::MissingRequiredArgument => true,
        ErrorKind::UnknownArgument => match e.get(ContextKind::InvalidArg) {
            Some(ContextValue::String(arg)) => arg == "-" || !arg.starts_with('-'),
            _ => false,
        },
        _ => false,
    }
}

fn print_usage() {
    println!("This program parses a VCF 4.0 file and counts");
    println!("transitions and transversions on a per-chromosome basis.");
    println!();
    println!("Usage: snp-density <input_vcf_file>");
}

fn run(cli: &Cli) -> Result<()> {
    let input = cli.input.display().to_string();
    let registry = Registry::from_path(&cli.input)
        .with_context(|| format!("cannot load variants from '{}'", input))?;

    info!(
        "input: {} ({} SNPs on {} chromosomes)",
        input,
        registry.total_snps(),
        registry.len()
    );
    for chr in &registry {
        debug!(
            "{}: {} SNPs, {} transitions, {} transversions",
            chr.name(),
            chr.len(),
            chr.count_transitions(),
            chr.count_transversions()
        );
    }

    let opt = ReportOpt {
        window_size: cli.window_size,
        precision: cli.precision,
        format: cli.format,
        profile: cli.profile,
    };
    let report = report::build_report(&registry, &input, &opt);

    let mut out: Box<dyn Write> = if let Some(p) = &cli.out {
        let fh = File::create(p)
            .with_context(|| format!("cannot create output '{}'", p.display()))?;
        Box::new(BufWriter::new(fh))
    } else {
        Box::new(BufWriter::new(std::io::stdout()))
    };
    report::write_report(&mut out, &report, &opt)?;
    Ok(())
}
