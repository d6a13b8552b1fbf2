//! Bundles rendered workbooks into one in-memory zip.
//!
//! Names follow a fixed fallback chain (display name, phonetic name, `applicant_{id}`)
//! and are not de-duplicated: two records that resolve to the same name leave one file,
//! holding the later record's workbook. Overwritten names are reported to the caller.

use std::io::{Cursor, Write};

use thiserror::Error;
use tracing::warn;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

pub const FILE_SUFFIX: &str = "_resume_workhistory_skills.xlsx";

#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// One successful record, as the archive sees it.
#[derive(Debug, Clone)]
pub struct ArchiveEntry {
    pub identifier: String,
    /// Name from the caller's roster, if any.
    pub display_name: Option<String>,
    /// Phonetic (kana) name from the rendered profile.
    pub phonetic_name: Option<String>,
    pub workbook: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ArchiveOutput {
    pub bytes: Vec<u8>,
    /// Names present in the archive, in first-seen order.
    pub file_names: Vec<String>,
    /// Names that more than one record resolved to.
    pub overwritten: Vec<String>,
}

/// Display name, then phonetic name, then `applicant_{identifier}`. Blank counts as absent.
pub fn resolve_name(identifier: &str, display_name: Option<&str>, phonetic_name: Option<&str>) -> String {
    [display_name, phonetic_name]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|name| !name.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| format!("applicant_{identifier}"))
}

/// Replaces path separators and characters reserved in file names with `_`.
pub fn sanitize_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect()
}

pub fn file_name_for(entry: &ArchiveEntry) -> String {
    let name = resolve_name(
        &entry.identifier,
        entry.display_name.as_deref(),
        entry.phonetic_name.as_deref(),
    );
    format!("{}{}", sanitize_file_stem(&name), FILE_SUFFIX)
}

pub fn build_archive(entries: &[ArchiveEntry]) -> Result<ArchiveOutput, ArchiveError> {
    // (name, workbook); a repeated name keeps its slot and takes the newer workbook.
    let mut files: Vec<(String, &[u8])> = Vec::with_capacity(entries.len());
    let mut overwritten = Vec::new();

    for entry in entries {
        let name = file_name_for(entry);
        match files.iter().position(|(existing, _)| *existing == name) {
            Some(slot) => {
                warn!(
                    "Archive name {name} already used; applicant {} overwrites the earlier workbook",
                    entry.identifier
                );
                files[slot].1 = entry.workbook.as_slice();
                if !overwritten.contains(&name) {
                    overwritten.push(name);
                }
            }
            None => files.push((name, entry.workbook.as_slice())),
        }
    }

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    for (name, workbook) in &files {
        zip.start_file(name.as_str(), options)?;
        zip.write_all(workbook)?;
    }
    let bytes = zip.finish()?.into_inner();

    Ok(ArchiveOutput {
        bytes,
        file_names: files.into_iter().map(|(name, _)| name).collect(),
        overwritten,
    })
}
