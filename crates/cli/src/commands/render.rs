use std::{path::Path, time::Instant};

use anyhow::{Context, Result, bail};
use cardsmith_core::{
    BatchOptions, BatchReport, CardStatus, RenderConfig, load_font, render_batch,
};
use log::info;

use super::{archive, clean};
use crate::cli::RenderArgs;

pub fn render(args: &RenderArgs) -> Result<()> {
    let started = Instant::now();
    let config = RenderConfig::load(&args.config)
        .with_context(|| format!("Failed to load {}", args.config.display()))?;

    let rejected = config.validate_cards();
    if !rejected.is_empty() {
        for error in &rejected {
            eprintln!("{error}");
        }
        bail!("{} cards failed validation", rejected.len());
    }

    if args.clean {
        clean(&config.output_dir)?;
    }

    let font = load_font(&config.font, args.fallback_font.as_deref());
    let options = BatchOptions { sequential: args.sequential, ready_only: args.ready_only };
    let report = render_batch(&config, &font, &options);
    print_report(&report);
    info!("Render pass finished in {:.2?}", started.elapsed());

    if let Some(target) = &args.archive {
        let saved: Vec<&Path> = report.saved_paths().collect();
        archive(&saved, target)?;
    }

    if !report.all_succeeded() {
        bail!("{} of {} cards failed", report.failed(), report.total());
    }
    Ok(())
}

fn print_report(report: &BatchReport) {
    for outcome in &report.outcomes {
        match &outcome.status {
            CardStatus::Saved(path) => {
                println!("Card '{}' generated: {}", outcome.title, path.display());
            }
            CardStatus::Skipped => println!("Card '{}' skipped (draft)", outcome.title),
            CardStatus::Failed { stage, reason } => {
                eprintln!("Card '{}' failed after {stage:?}: {reason}", outcome.title);
            }
        }
    }
    println!(
        "Cards: {} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
}
