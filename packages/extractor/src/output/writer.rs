//! JSON writer and loaders for extraction artifacts.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{RULES_FILE, SECTIONS_FILE};
use crate::error::Result;
use crate::types::{Extraction, Rule, Section};

/// Serialize a value as pretty-printed JSON with a trailing newline.
///
/// Output depends only on the value, so identical extractions produce
/// byte-identical files.
pub fn to_json_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}

/// Write a value as JSON, replacing the file atomically.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_json_string(value)?;

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;

    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    let temp_file = dir.join(format!(".{file_name}.tmp"));

    // Write to temp file first, then sync and rename
    {
        let mut file = File::create(&temp_file)?;
        file.write_all(content.as_bytes())?;
        file.sync_all()?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(&temp_file, path)?;
    Ok(())
}

/// Write `sections.rich.json` and `rules.rich.json` into `output_dir`.
///
/// # Returns
/// Paths of the sections and rules files
pub fn save_extraction(extraction: &Extraction, output_dir: &Path) -> Result<(PathBuf, PathBuf)> {
    let sections_path = output_dir.join(SECTIONS_FILE);
    let rules_path = output_dir.join(RULES_FILE);

    write_json(&sections_path, &extraction.sections)?;
    write_json(&rules_path, &extraction.rules)?;

    tracing::debug!(
        sections = %sections_path.display(),
        rules = %rules_path.display(),
        "Wrote extraction artifacts"
    );
    Ok((sections_path, rules_path))
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Load a sections artifact.
pub fn load_sections(path: &Path) -> Result<Vec<Section>> {
    read_json(path)
}

/// Load a rules artifact.
pub fn load_rules(path: &Path) -> Result<Vec<Rule>> {
    read_json(path)
}

/// Load both artifacts from a directory written by [`save_extraction`].
pub fn load_extraction(dir: &Path) -> Result<Extraction> {
    Ok(Extraction {
        sections: load_sections(&dir.join(SECTIONS_FILE))?,
        rules: load_rules(&dir.join(RULES_FILE))?,
    })
}
