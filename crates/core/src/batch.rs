//! Batch rendering with per-card failure isolation.

use std::path::{Path, PathBuf};

use font_metrics::FontFile;
use log::{info, warn};
use rayon::prelude::*;

use crate::{
    card::{Card, Flavor},
    config::{FontSpec, RenderConfig},
    render::{CardRenderer, Stage},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct BatchOptions {
    /// Render cards one after another instead of on the rayon pool.
    pub sequential: bool,
    /// Skip cards still marked as drafts.
    pub ready_only: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardStatus {
    Saved(PathBuf),
    Skipped,
    Failed { stage: Stage, reason: String },
}

/// What happened to one card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardOutcome {
    pub flavor: Flavor,
    pub deck: String,
    pub title: String,
    pub status: CardStatus,
}

impl CardOutcome {
    fn new(flavor: Flavor, card: &Card, status: CardStatus) -> Self {
        Self { flavor, deck: card.deck.clone(), title: card.title.clone(), status }
    }

    pub fn is_saved(&self) -> bool {
        matches!(self.status, CardStatus::Saved(_))
    }
}

/// Outcomes in render order, one per card.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<CardOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_saved()).count()
    }

    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| matches!(o.status, CardStatus::Failed { .. })).count()
    }

    pub fn skipped(&self) -> usize {
        self.outcomes.iter().filter(|o| o.status == CardStatus::Skipped).count()
    }

    pub fn total(&self) -> usize {
        self.outcomes.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed() == 0
    }

    /// Paths of every saved card.
    pub fn saved_paths(&self) -> impl Iterator<Item = &Path> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            CardStatus::Saved(path) => Some(path.as_path()),
            _ => None,
        })
    }
}

/// Load the configured font, or an explicitly requested fallback when it is unusable.
pub fn load_font(spec: &FontSpec, fallback: Option<&Path>) -> font_metrics::Result<FontFile> {
    match FontFile::load(&spec.path) {
        Ok(font) => Ok(font),
        Err(e) => match fallback {
            Some(path) => {
                warn!("{e}; falling back to {}", path.display());
                FontFile::load(path)
            }
            None => Err(e),
        },
    }
}

/// Render every card in `config`.
///
/// A font that failed to load fails each card individually rather than the
/// batch, so the report always has one outcome per card.
pub fn render_batch(
    config: &RenderConfig,
    font: &font_metrics::Result<FontFile>,
    options: &BatchOptions,
) -> BatchReport {
    let jobs: Vec<(Flavor, &Card)> = config.cards().collect();
    info!("Rendering {} cards to {}", jobs.len(), config.output_dir.display());

    let run = |&(flavor, card): &(Flavor, &Card)| render_one(config, font, options, flavor, card);
    let outcomes = if options.sequential {
        jobs.iter().map(run).collect()
    } else {
        jobs.par_iter().map(run).collect()
    };

    let report = BatchReport { outcomes };
    info!(
        "Rendered cards: {} succeeded, {} failed, {} skipped",
        report.succeeded(),
        report.failed(),
        report.skipped()
    );
    report
}

fn render_one(
    config: &RenderConfig,
    font: &font_metrics::Result<FontFile>,
    options: &BatchOptions,
    flavor: Flavor,
    card: &Card,
) -> CardOutcome {
    if options.ready_only && !card.is_ready() {
        info!("Skipping draft card '{}'", card.title);
        return CardOutcome::new(flavor, card, CardStatus::Skipped);
    }

    let font = match font {
        Ok(font) => font,
        Err(e) => {
            let reason = format!("font unavailable: {e}");
            warn!("Card '{}' failed: {reason}", card.title);
            return CardOutcome::new(flavor, card, CardStatus::Failed { stage: Stage::Pending, reason });
        }
    };

    match CardRenderer::new(config, font).render(flavor, card) {
        Ok(path) => {
            info!("Card '{}' generated: {}", card.title, path.display());
            CardOutcome::new(flavor, card, CardStatus::Saved(path))
        }
        Err(failure) => {
            warn!("Card '{}' failed: {}", card.title, failure.error);
            let reason = failure.error.to_string();
            CardOutcome::new(flavor, card, CardStatus::Failed { stage: failure.stage, reason })
        }
    }
}
