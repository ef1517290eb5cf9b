//! Reading methodology metadata and raw text.
//!
//! A methodology directory looks like:
//!
//! ```text
//! <METHOD_DIR>/
//! ├── META.json          id and version
//! └── txt/
//!     ├── source.txt     whole-document text (form feeds separate pages)
//!     └── page-001.txt   or one file per page
//! ```

use std::cmp::Ordering;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::{validate_method_id, validate_version, META_FILE, SOURCE_TEXT_FILE, TEXT_DIR};
use crate::error::{ExtractorError, Result};
use crate::types::MethodologyMeta;

/// Raw text for one extraction run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextInput {
    /// Ordered per-page text.
    Pages(Vec<String>),

    /// One whole-document string.
    Document(String),
}

/// Raw text together with the path it was read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedInput {
    /// The text.
    pub text: TextInput,

    /// File or directory the text was read from.
    pub path: PathBuf,
}

/// Read and validate `META.json` from a methodology directory.
pub fn read_meta(method_dir: &Path) -> Result<MethodologyMeta> {
    let path = method_dir.join(META_FILE);
    let content = fs::read_to_string(&path)?;
    let meta: MethodologyMeta = serde_json::from_str(&content)?;
    validate_method_id(&meta.id)?;
    validate_version(&meta.version)?;
    Ok(meta)
}

/// Decode bytes as UTF-8, replacing invalid sequences.
fn decode_text(bytes: &[u8], path: &Path) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(_) => {
            tracing::warn!(path = %path.display(), "Input is not valid UTF-8, replacing invalid bytes");
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Read a whole-document text file.
pub fn read_text_file(path: &Path) -> Result<TextInput> {
    if !path.is_file() {
        return Err(ExtractorError::MissingInput(path.to_path_buf()));
    }
    let bytes = fs::read(path)?;
    Ok(TextInput::Document(decode_text(&bytes, path)))
}

/// Read every `*.txt` file in a directory as one page, in natural name order.
///
/// `source.txt` is skipped so a directory holding both forms reads as pages.
pub fn read_page_dir(dir: &Path) -> Result<TextInput> {
    if !dir.is_dir() {
        return Err(ExtractorError::MissingInput(dir.to_path_buf()));
    }

    let mut files: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| {
            path.is_file()
                && path.extension().is_some_and(|ext| ext == "txt")
                && path.file_name().is_some_and(|name| name != SOURCE_TEXT_FILE)
        })
        .collect();

    if files.is_empty() {
        return Err(ExtractorError::MissingInput(dir.to_path_buf()));
    }

    files.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));

    let pages = files
        .iter()
        .map(|path| Ok(decode_text(&fs::read(path)?, path)))
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(dir = %dir.display(), pages = pages.len(), "Read page files");
    Ok(TextInput::Pages(pages))
}

/// Resolve the raw text of a methodology directory.
///
/// Explicit `text` or `pages` paths win. Otherwise `txt/source.txt` is used
/// when present, else the page files in `txt/`.
pub fn load_input(
    method_dir: &Path,
    text: Option<&Path>,
    pages: Option<&Path>,
) -> Result<LoadedInput> {
    if let Some(path) = text {
        return Ok(LoadedInput {
            text: read_text_file(path)?,
            path: path.to_path_buf(),
        });
    }
    if let Some(dir) = pages {
        return Ok(LoadedInput {
            text: read_page_dir(dir)?,
            path: dir.to_path_buf(),
        });
    }

    let text_dir = method_dir.join(TEXT_DIR);
    let source = text_dir.join(SOURCE_TEXT_FILE);
    if source.is_file() {
        return Ok(LoadedInput {
            text: read_text_file(&source)?,
            path: source,
        });
    }

    Ok(LoadedInput {
        text: read_page_dir(&text_dir)?,
        path: text_dir,
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Compare names so embedded numbers sort numerically (`page-2` < `page-10`).
fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();

    loop {
        match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return Ordering::Equal,
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(l), Some(r)) if l.is_ascii_digit() && r.is_ascii_digit() => {
                let l_num = take_number(&mut left);
                let r_num = take_number(&mut right);
                let ordering = l_num
                    .trim_start_matches('0')
                    .len()
                    .cmp(&r_num.trim_start_matches('0').len())
                    .then_with(|| {
                        l_num
                            .trim_start_matches('0')
                            .cmp(r_num.trim_start_matches('0'))
                    });
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            (Some(l), Some(r)) => {
                if l != r {
                    return l.cmp(&r);
                }
                left.next();
                right.next();
            }
        }
    }
}

fn take_number(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> String {
    let mut number = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        number.push(c);
    }
    number
}
