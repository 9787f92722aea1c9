use std::{
    collections::HashSet,
    fs::{File, create_dir_all, read},
    io::Write,
    path::Path,
};

use anyhow::{Context, Result};
use zip::{CompressionMethod, ZipWriter, write::SimpleFileOptions};

/// Bundle rendered cards into a ZIP archive, one flat entry per file name.
///
/// Cards that collided on disk share one file, so repeated names are archived once.
pub fn archive<P: AsRef<Path>>(files: &[P], target: &Path) -> Result<()> {
    if let Some(parent) = target.parent()
        && !parent.as_os_str().is_empty()
    {
        create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let file =
        File::create(target).with_context(|| format!("Failed to create {}", target.display()))?;
    let mut zip = ZipWriter::new(file);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    let mut archived = HashSet::new();

    for path in files {
        let path = path.as_ref();
        let name = path
            .file_name()
            .with_context(|| format!("Not a file: {}", path.display()))?
            .to_string_lossy()
            .into_owned();
        if !archived.insert(name.clone()) {
            continue;
        }
        let data = read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        zip.start_file(name, options)?;
        zip.write_all(&data)?;
    }

    zip.finish().with_context(|| format!("Failed to finish {}", target.display()))?;
    println!("Archived {} cards to {}", archived.len(), target.display());
    Ok(())
}
