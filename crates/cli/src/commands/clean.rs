use std::{fs, path::Path};

use anyhow::{Context, Result};

/// Remove the output directory and everything rendered into it.
pub fn clean(output_dir: &Path) -> Result<()> {
    if output_dir.exists() {
        fs::remove_dir_all(output_dir)
            .with_context(|| format!("Failed to remove {}", output_dir.display()))?;
        println!("Removed {}", output_dir.display());
    } else {
        println!("Skipped {} (not found)", output_dir.display());
    }
    Ok(())
}
