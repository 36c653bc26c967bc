//! # CLI Module
//!
//! Command-line interface for the bitmap comparator.
//!
//! ## Usage
//! ```bash
//! # Compare two images
//! bitmap-dedup compare before.png after.png
//!
//! # Find near-duplicates in a folder
//! bitmap-dedup dedup ~/Screenshots
//!
//! # Allow small differences, normalized by image size
//! bitmap-dedup dedup ~/Screenshots -m 500 -d 2.5 --scale pixel-count
//!
//! # JSON output, settings from a file
//! bitmap-dedup dedup ~/Screenshots --config dedup.json --output json
//! ```
//!
//! Nothing is ever deleted: `dedup` only reports which files it would drop.

use bitmap_dedup::core::comparator::{compare_with, DifferenceScale, DuplicateRule};
use bitmap_dedup::core::dedup::{dedup_by_shape, DedupConfig, ShapeOutcome};
use bitmap_dedup::core::grayscale::{grayscale_with, GrayscaleMode};
use bitmap_dedup::core::scanner::{load_image, load_images, ScanConfig, WalkDirScanner};
use bitmap_dedup::error::Result;
use bitmap_dedup::events::{CompareEvent, Event, EventChannel, LoadEvent};
use bitmap_dedup::ComparisonResult;
use clap::{Parser, Subcommand, ValueEnum};
use console::{style, Term};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread;

/// Bitmap Dedup - spot near-identical bitmaps
#[derive(Parser, Debug)]
#[command(name = "bitmap-dedup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Compare two images pixel by pixel
    Compare {
        /// First image
        first: PathBuf,

        /// Second image
        second: PathBuf,

        /// Convert both images to grayscale before comparing
        #[arg(short, long)]
        grayscale: Option<Mode>,

        /// How the difference ratio is scaled
        #[arg(short, long, default_value = "legacy")]
        scale: Scale,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Report near-duplicate images among files and directories
    Dedup {
        /// Files or directories to scan
        #[arg(required = true)]
        paths: Vec<PathBuf>,

        /// Maximum number of differing pixels for a duplicate
        #[arg(short, long, allow_hyphen_values = true)]
        match_threshold: Option<i64>,

        /// Maximum difference ratio for a duplicate
        #[arg(short, long, allow_hyphen_values = true)]
        difference_threshold: Option<f64>,

        /// Grayscale mode applied before comparing
        #[arg(long)]
        mode: Option<Mode>,

        /// How the difference ratio is scaled
        #[arg(long)]
        scale: Option<Scale>,

        /// Which side of the thresholds marks a duplicate
        #[arg(long)]
        rule: Option<Rule>,

        /// JSON configuration file; flags override its values
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,

        /// Include hidden files
        #[arg(long)]
        include_hidden: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mode {
    /// Black or white only (default)
    Threshold,
    /// Full gray ramp
    Average,
}

impl From<Mode> for GrayscaleMode {
    fn from(mode: Mode) -> Self {
        match mode {
            Mode::Threshold => GrayscaleMode::Threshold,
            Mode::Average => GrayscaleMode::Average,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Scale {
    /// matches * 100 / 256 (default)
    Legacy,
    /// matches * 100 / pixel count
    PixelCount,
}

impl From<Scale> for DifferenceScale {
    fn from(scale: Scale) -> Self {
        match scale {
            Scale::Legacy => DifferenceScale::Legacy,
            Scale::PixelCount => DifferenceScale::PixelCount,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Rule {
    /// Duplicates are at or below both thresholds (default)
    Within,
    /// Duplicates are above both thresholds
    Exceeds,
}

impl From<Rule> for DuplicateRule {
    fn from(rule: Rule) -> Self {
        match rule {
            Rule::Within => DuplicateRule::Within,
            Rule::Exceeds => DuplicateRule::Exceeds,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
    /// Paths of the images that would be dropped, one per line
    Minimal,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            first,
            second,
            grayscale,
            scale,
            output,
        } => run_compare(first, second, grayscale.map(Into::into), scale.into(), output),
        Commands::Dedup {
            paths,
            match_threshold,
            difference_threshold,
            mode,
            scale,
            rule,
            config,
            output,
            include_hidden,
            verbose,
        } => {
            let mut settings = match config {
                Some(path) => DedupConfig::from_file(&path)?,
                None => DedupConfig::new(),
            };
            if let Some(threshold) = match_threshold {
                settings = settings.match_threshold(threshold);
            }
            if let Some(threshold) = difference_threshold {
                settings = settings.difference_threshold(threshold);
            }
            if let Some(mode) = mode {
                settings = settings.grayscale(mode.into());
            }
            if let Some(scale) = scale {
                settings = settings.difference_scale(scale.into());
            }
            if let Some(rule) = rule {
                settings = settings.rule(rule.into());
            }
            run_dedup(paths, settings, output, include_hidden, verbose)
        }
    }
}

fn run_compare(
    first: PathBuf,
    second: PathBuf,
    grayscale: Option<GrayscaleMode>,
    scale: DifferenceScale,
    output: OutputFormat,
) -> Result<()> {
    let mut a = load_image(&first)?;
    let mut b = load_image(&second)?;

    if let Some(mode) = grayscale {
        grayscale_with(&mut a.image, mode);
        grayscale_with(&mut b.image, mode);
    }

    let result = compare_with(&a.image, &b.image, scale)?;

    match output {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "first": a.path,
                "second": b.path,
                "width": a.image.width(),
                "height": a.image.height(),
                "scale": scale.to_string(),
                "result": result,
            });
            println!("{output:#}");
        }
        OutputFormat::Minimal => {
            println!("{} {}", result.matches, result.difference);
        }
        OutputFormat::Pretty => {
            let term = Term::stdout();
            term.write_line(&format!(
                "{} {} vs {}",
                style("Compare").bold().cyan(),
                a.path.display(),
                b.path.display()
            ))
            .ok();
            term.write_line(&format!(
                "  {}x{} pixels",
                a.image.width(),
                a.image.height()
            ))
            .ok();
            print_result(&term, &result, scale);
        }
    }

    Ok(())
}

fn print_result(term: &Term, result: &ComparisonResult, scale: DifferenceScale) {
    if result.is_identical() {
        term.write_line(&format!("  {} identical", style("✓").green().bold()))
            .ok();
        return;
    }
    term.write_line(&format!(
        "  {} differing pixels",
        style(result.matches).yellow()
    ))
    .ok();
    term.write_line(&format!(
        "  {} difference ({scale})",
        style(format!("{:.4}", result.difference)).yellow()
    ))
    .ok();
    term.write_line(&format!(
        "  sums R={} G={} B={}",
        result.sums[0], result.sums[1], result.sums[2]
    ))
    .ok();
}

/// Everything the dedup report prints
struct DedupReport {
    total_files: usize,
    failed: Vec<String>,
    outcome: ShapeOutcome,
}

fn run_dedup(
    paths: Vec<PathBuf>,
    config: DedupConfig,
    output: OutputFormat,
    include_hidden: bool,
    verbose: bool,
) -> Result<()> {
    let remover = config.build()?;
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);

    if pretty {
        term.write_line(&format!(
            "{} {}",
            style("Bitmap Dedup").bold().cyan(),
            style(format!("v{}", env!("CARGO_PKG_VERSION"))).dim()
        ))
        .ok();
        if verbose {
            term.write_line(&format!(
                "  {}",
                style(remover.strategy().description()).dim()
            ))
            .ok();
        }
        term.write_line("").ok();
    }

    let scanner = WalkDirScanner::new(ScanConfig { include_hidden });
    let scan = scanner.scan(&paths);
    let mut failed: Vec<String> = scan.errors.iter().map(|e| e.to_string()).collect();

    let (sender, receiver) = EventChannel::new();

    let progress = if pretty {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );
        Some(pb)
    } else {
        None
    };

    let event_thread = thread::spawn(move || {
        let Some(pb) = progress else {
            return;
        };
        for event in receiver.iter() {
            match event {
                Event::Load(LoadEvent::Started { total_files }) => {
                    pb.set_length(total_files as u64);
                    pb.set_position(0);
                    pb.set_message("Loading");
                }
                Event::Load(LoadEvent::ImageLoaded { .. } | LoadEvent::Error { .. }) => {
                    pb.inc(1);
                }
                Event::Compare(CompareEvent::Started {
                    total_comparisons, ..
                }) => {
                    pb.set_length(total_comparisons as u64);
                    pb.set_position(0);
                    pb.set_message("Comparing");
                }
                Event::Compare(CompareEvent::Progress(p)) => {
                    pb.set_position(p.comparisons_completed as u64);
                }
                _ => {}
            }
        }
        pb.finish_and_clear();
    });

    let loaded = load_images(&scan.files, &sender);
    failed.extend(loaded.errors.iter().map(|e| e.to_string()));

    let outcome = dedup_by_shape(&remover, loaded.images, &sender)?;

    drop(sender);
    event_thread.join().ok();

    let report = DedupReport {
        total_files: scan.files.len(),
        failed,
        outcome,
    };

    match output {
        OutputFormat::Pretty => print_pretty_report(&term, &report, verbose),
        OutputFormat::Json => print_json_report(&report, &config),
        OutputFormat::Minimal => print_minimal_report(&report),
    }

    Ok(())
}

fn print_pretty_report(term: &Term, report: &DedupReport, verbose: bool) {
    term.write_line(&format!("{} Scan Complete", style("✓").green().bold()))
        .ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  {} files found, {} distinct sizes",
        style(report.total_files).cyan(),
        style(report.outcome.shape_groups).cyan()
    ))
    .ok();
    term.write_line(&format!("  {} images kept", style(report.outcome.kept.len()).cyan()))
        .ok();
    term.write_line(&format!(
        "  {} near-duplicates",
        style(report.outcome.matches.len()).yellow()
    ))
    .ok();
    if !report.failed.is_empty() {
        term.write_line(&format!(
            "  {} files skipped",
            style(report.failed.len()).red()
        ))
        .ok();
        if verbose {
            for failure in &report.failed {
                term.write_line(&format!("    {}", style(failure).dim())).ok();
            }
        }
    }
    term.write_line("").ok();

    if report.outcome.matches.is_empty() {
        term.write_line("  No near-duplicates found.").ok();
    } else {
        term.write_line(&format!(
            "{}",
            style("Near-duplicates:").bold().underlined()
        ))
        .ok();
        for removal in &report.outcome.matches {
            term.write_line(&format!(
                "  {} {}",
                style("○").dim(),
                removal.removed.display()
            ))
            .ok();
            term.write_line(&format!(
                "    {} {} ({} differing pixels, difference {:.4})",
                style("same as").dim(),
                removal.kept.display(),
                removal.result.matches,
                removal.result.difference
            ))
            .ok();
        }
    }

    term.write_line("").ok();
    term.write_line(&format!(
        "{}",
        style("No files were deleted. Review the list before removing anything.").dim()
    ))
    .ok();
}

fn print_json_report(report: &DedupReport, config: &DedupConfig) {
    let output = serde_json::json!({
        "config": config,
        "total_files": report.total_files,
        "shape_groups": report.outcome.shape_groups,
        "kept": report.outcome.kept,
        "failed": report.failed,
        "duplicates": report.outcome.matches.iter().map(|r| {
            serde_json::json!({
                "path": r.removed,
                "same_as": r.kept,
                "matches": r.result.matches,
                "difference": r.result.difference,
                "sums": r.result.sums,
            })
        }).collect::<Vec<_>>(),
    });

    println!("{output:#}");
}

fn print_minimal_report(report: &DedupReport) {
    for removal in &report.outcome.matches {
        println!("{}", removal.removed.display());
    }
}
