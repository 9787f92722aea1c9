use std::path::Path;

use anyhow::{Context, Result, bail};
use cardsmith_core::RenderConfig;

/// Write a starter configuration with no cards.
pub fn init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }

    let config = RenderConfig::starter();
    config.save(path).with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Wrote {}", path.display());
    println!(
        "  Place {} and {} next to it, plus the font {}",
        config.flavors.attack.base_image.display(),
        config.flavors.defense.base_image.display(),
        config.font.path.display()
    );
    Ok(())
}
