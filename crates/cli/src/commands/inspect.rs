use std::path::Path;

use anyhow::{Context, Result, bail};
use cardsmith_core::{CardRenderer, FontFile, RenderConfig};

/// Report every card that would be rejected at ingestion.
pub fn validate(config_path: &Path) -> Result<()> {
    let config = RenderConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;

    let rejected = config.validate_cards();
    for error in &rejected {
        println!("{error}");
    }
    if !rejected.is_empty() {
        bail!("{} of {} cards failed validation", rejected.len(), config.card_count());
    }
    println!("All {} cards valid", config.card_count());
    Ok(())
}

/// Print where each line of a card's text lands.
pub fn layout(config_path: &Path, title: &str) -> Result<()> {
    let config = RenderConfig::load(config_path)
        .with_context(|| format!("Failed to load {}", config_path.display()))?;
    let Some((flavor, card)) = config.cards().find(|(_, card)| card.title == title) else {
        bail!("No card titled '{title}' in {}", config_path.display());
    };

    let font = FontFile::load(&config.font.path)?;
    let plan = CardRenderer::new(&config, &font).plan(flavor, card)?;

    println!("{flavor} card '{}'", card.title);
    for (field, bx, layout) in &plan.fields {
        let overflow = if layout.overflows(bx) {
            format!(" (overflows by {}px)", layout.bottom - bx.bottom())
        } else {
            String::new()
        };
        println!(
            "{field} [{}, {}, {}, {}]: {} lines{overflow}",
            bx.x, bx.y, bx.width, bx.height, layout.lines
        );
        for run in &layout.runs {
            println!("  ({}, {}) {}", run.x, run.y, run.text);
        }
    }
    Ok(())
}
