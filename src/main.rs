//! # postpack CLI
//!
//! Command-line interface for the postpack library.

use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use postpack::PostpackError;
use postpack::cli::Args;
use postpack::core::NormalizedPost;
use postpack::core::output::{ExportOutcome, format_date_utc};
use postpack::pipeline::run_export;
use postpack::source::{SourceKind, create_source};

/// Characters of post text shown in the preview table.
const PREVIEW_TEXT_CHARS: usize = 40;

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<(), PostpackError> {
    let total_start = Instant::now();
    dotenvy::dotenv().ok();
    let args = <Args as ClapParser>::parse();
    init_logging(&args);

    let export_config = args.export_config()?;
    let kind: SourceKind = args.source.into();

    // Print header
    println!("📦 postpack v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📖 Source:  {}", kind);
    println!("📂 Input:   {}", args.input.display());
    if let Some(ref channel) = args.channel {
        println!("📢 Channel: {}", channel);
    }
    println!("💾 Output:  {}", export_config.output_path.display());
    println!();

    let source = create_source(kind, &args.input, args.source_config());
    println!("⏳ Reading {}...", source.name());
    let report = run_export(source.as_ref(), args.channel.as_deref(), &export_config)?;
    let total_time = total_start.elapsed();

    let stats = report.stats;
    match report.outcome {
        ExportOutcome::Written { ref path, rows } => {
            println!();
            println!("✅ Done! Saved to {} | Posts: {}", path.display(), rows);
        }
        ExportOutcome::NoData => {
            println!();
            println!("ℹ️  Nothing to export: no posts with text found");
        }
    }

    // Summary
    println!();
    println!("📊 Summary:");
    println!("   Received:  {} messages", stats.received);
    println!("   Dropped:   {} without text", stats.dropped_empty);
    if stats.missing_timestamp > 0 {
        println!("   Undated:   {} posts", stats.missing_timestamp);
    }
    println!("   Exported:  {} posts", stats.kept);
    println!("   Time:      {:.2}s", total_time.as_secs_f64());

    if !report.preview.is_empty() {
        println!();
        println!("🔎 Latest posts:");
        for post in &report.preview {
            print_preview_row(post);
        }
    }

    Ok(())
}

/// `RUST_LOG` wins unless `-v` was given.
fn init_logging(args: &Args) {
    let filter = if args.verbose > 0 {
        EnvFilter::new(args.log_filter())
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(args.log_filter()))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn print_preview_row(post: &NormalizedPost) {
    let date = post
        .timestamp()
        .map(format_date_utc)
        .unwrap_or_else(|| "-".to_string());
    let mut text: String = post.text().chars().take(PREVIEW_TEXT_CHARS).collect();
    if post.text_length() > PREVIEW_TEXT_CHARS {
        text.push('…');
    }
    println!(
        "   #{:<8} {:<25} 👁 {:<8} ❤ {:<6} {:.4}  {}",
        post.message_id(),
        date,
        post.views(),
        post.reaction_count(),
        post.engagement(),
        text
    );
}
