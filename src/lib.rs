//! Labelreview: crop, review and triage COCO bounding-box annotations.
//!
//! Labelreview loads a COCO object-detection dataset, cuts a padded crop
//! around every annotation of one category, and lets a reviewer accept or
//! reject each crop in turn. Rejected annotations are written out as a new
//! COCO subset (`rejected_<category>.json`) for later correction.
//!
//! # Modules
//!
//! - [`coco`]: COCO dataset types and JSON reading/writing
//! - [`index`]: per-category annotation counts and category selection
//! - [`extract`]: padded crops and review-ready instances
//! - [`review`]: the accept/reject review session
//! - [`export`]: the rejection export
//! - [`workspace`]: the whole workflow behind one type
//! - [`prompt`]: a line-oriented terminal front end for a session
//! - [`error`]: error types for labelreview operations

pub mod coco;
pub mod error;
pub mod export;
pub mod extract;
pub mod index;
pub mod prompt;
pub mod review;
pub mod workspace;

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::ReviewError;
pub use workspace::Workspace;

use prompt::LoopExit;

/// The labelreview CLI application.
#[derive(Parser)]
#[command(name = "labelreview")]
#[command(version, about)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// List categories with their annotation counts.
    Categories(CategoriesArgs),
    /// Crop every annotation of one category without reviewing.
    Extract(ReviewArgs),
    /// Crop one category and review the crops interactively.
    Review(ReviewArgs),
}

/// Arguments for the categories subcommand.
#[derive(clap::Args)]
struct CategoriesArgs {
    /// COCO annotation file.
    annotations: PathBuf,
}

/// Arguments shared by extract and review.
#[derive(clap::Args)]
struct ReviewArgs {
    /// COCO annotation file.
    annotations: PathBuf,

    /// Directory holding the images named by `file_name`.
    #[arg(long, env = "LABELREVIEW_IMAGES_DIR")]
    images: PathBuf,

    /// Root for crops and rejection exports (created if absent).
    #[arg(long, env = "LABELREVIEW_OUTPUT_DIR", default_value = "output")]
    output: PathBuf,

    /// Category to review, by position in the `categories` listing.
    #[arg(long, conflicts_with = "name")]
    category: Option<usize>,

    /// Category to review, by exact name.
    #[arg(long)]
    name: Option<String>,
}

/// Run the labelreview CLI.
///
/// This is the main entry point for the CLI, called from `main.rs`.
pub fn run() -> Result<(), ReviewError> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Categories(args)) => run_categories(args),
        Some(Commands::Extract(args)) => run_extract(args),
        Some(Commands::Review(args)) => run_review(args),
        None => {
            println!("labelreview {}", env!("CARGO_PKG_VERSION"));
            println!();
            println!("Crop, review and triage COCO annotations.");
            println!();
            println!("Run 'labelreview --help' for usage information.");
            Ok(())
        }
    }
}

/// Logs go to stderr so they never mix with reports on stdout.
fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .try_init();
}

/// Execute the categories subcommand.
fn run_categories(args: CategoriesArgs) -> Result<(), ReviewError> {
    let dataset = workspace::load_dataset(&args.annotations)?;
    print!("{}", index::list_categories(&dataset));
    Ok(())
}

/// Load the dataset and apply the category selection from the arguments.
fn open_workspace(args: &ReviewArgs) -> Result<Workspace, ReviewError> {
    let mut ws = Workspace::open(&args.annotations, &args.images, &args.output)?;
    println!("{}", ws.load_summary());

    match (args.category, args.name.as_deref()) {
        (Some(index), _) => ws.select(index)?,
        (None, Some(name)) => ws.select_by_name(name)?,
        (None, None) => return Err(ReviewError::MissingCategorySelection),
    };
    Ok(ws)
}

/// Execute the extract subcommand.
fn run_extract(args: ReviewArgs) -> Result<(), ReviewError> {
    let ws = open_workspace(&args)?;
    let extraction = ws.extract()?;
    print!("{}", extraction);

    if extraction.is_empty() {
        return Err(ReviewError::EmptyExtractionResult {
            category: extraction.category.name,
            skipped: extraction.skipped.len(),
        });
    }
    Ok(())
}

/// Execute the review subcommand.
fn run_review(args: ReviewArgs) -> Result<(), ReviewError> {
    let ws = open_workspace(&args)?;
    let extraction = ws.extract()?;
    print!("{}", extraction);

    let mut session = review::ReviewSession::from_extraction(extraction)?;
    println!();
    println!("{}", prompt::HELP);
    println!();

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let exit = prompt::run_review_loop(&mut session, stdin.lock(), &mut stdout)?;

    let summary = match exit {
        LoopExit::Exhausted | LoopExit::Finished => ws.finish(&session)?,
        LoopExit::Abandoned => ws.abandon(session),
    };

    println!();
    print!("{}", summary);
    stdout.flush()?;
    Ok(())
}
