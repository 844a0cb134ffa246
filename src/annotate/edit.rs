// src/annotate/edit.rs
// =============================================================================
// Rewrites copied files in place.
//
// Each file is written to a sibling temp file and renamed over the original
// only once every line made it to disk, so a failed write never leaves a
// half-written file behind. The rename is per file: if the walk fails part
// of the way through, the files already edited stay edited.
// =============================================================================

use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::debug;
use walkdir::WalkDir;

use super::rewrite::{ImportRewrite, ProvenanceHeader};
use crate::error::{CopyError, Result};

/// What happened to one file
#[derive(Debug, Clone, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    pub rewritten_lines: usize,
    pub internal_packages: BTreeSet<String>,
}

/// Every file edited under a directory, in walk order
#[derive(Debug, Clone, Default, Serialize)]
pub struct AnnotateReport {
    pub files: Vec<FileReport>,
    pub internal_packages: BTreeSet<String>,
}

impl AnnotateReport {
    pub fn rewritten_lines(&self) -> usize {
        self.files.iter().map(|f| f.rewritten_lines).sum()
    }
}

/// Edits every regular file under `root` whose extension passes `is_source`.
/// Stops at the first error.
pub fn annotate_tree<F>(
    root: &Path,
    is_source: F,
    rewrite: &ImportRewrite,
    header: &ProvenanceHeader,
) -> Result<AnnotateReport>
where
    F: Fn(&str) -> bool,
{
    let mut report = AnnotateReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| {
            let path = e.path().unwrap_or(root).to_path_buf();
            CopyError::io(path, e.into())
        })?;

        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(&is_source)
            .unwrap_or(false);
        if !matches {
            continue;
        }

        let file = edit_file(entry.path(), rewrite, header)?;
        report.internal_packages.extend(file.internal_packages.iter().cloned());
        report.files.push(file);
    }

    Ok(report)
}

/// Prepends the header to `path` and rewrites its internal import lines.
/// Works on bytes: lines that are not valid UTF-8 pass through unchanged.
pub fn edit_file(
    path: &Path,
    rewrite: &ImportRewrite,
    header: &ProvenanceHeader,
) -> Result<FileReport> {
    debug!("Editing: {}", path.display());

    let contents = fs::read(path).map_err(|e| CopyError::io(path, e))?;

    let mut report = FileReport {
        path: path.to_path_buf(),
        rewritten_lines: 0,
        internal_packages: BTreeSet::new(),
    };

    replace_atomically(path, |writer| {
        for line in header.lines() {
            writeln!(writer, "{}", line)?;
        }
        for line in split_lines(&contents) {
            match rewrite.rewrite_bytes(line) {
                Some(rewritten) => {
                    let text = String::from_utf8_lossy(line);
                    rewrite.internal_paths(&text, &mut report.internal_packages);
                    debug!("  {}", String::from_utf8_lossy(&rewritten));
                    writer.write_all(&rewritten)?;
                    report.rewritten_lines += 1;
                }
                None => writer.write_all(line)?,
            }
            writer.write_all(b"\n")?;
        }
        Ok(())
    })?;

    Ok(report)
}

/// Writes new contents for `path` into a sibling temp file and renames it
/// over `path` once `write` succeeds. On any error the temp file is removed
/// and `path` is left as it was.
pub(crate) fn replace_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut dyn Write) -> std::io::Result<()>,
{
    let dir = path.parent().unwrap_or_else(|| Path::new("."));
    let tmp = NamedTempFile::new_in(dir).map_err(|e| CopyError::io(dir, e))?;

    {
        let mut writer = BufWriter::new(tmp.as_file());
        write(&mut writer).map_err(|e| CopyError::io(tmp.path(), e))?;
        writer.flush().map_err(|e| CopyError::io(tmp.path(), e))?;
    }

    // Keep the original file's mode; NamedTempFile creates files as 0600
    let meta = fs::metadata(path).map_err(|e| CopyError::io(path, e))?;
    tmp.as_file()
        .set_permissions(meta.permissions())
        .map_err(|e| CopyError::io(tmp.path(), e))?;

    tmp.persist(path).map_err(|e| CopyError::io(path, e.error))?;
    Ok(())
}

/// Splits on `\n`, dropping a trailing `\r` from each line. A final newline
/// does not start an extra empty line.
fn split_lines(contents: &[u8]) -> Vec<&[u8]> {
    if contents.is_empty() {
        return Vec::new();
    }
    let body = contents.strip_suffix(b"\n").unwrap_or(contents);
    body.split(|&b| b == b'\n')
        .map(|line| line.strip_suffix(b"\r").unwrap_or(line))
        .collect()
}
