// src/annotate/rewrite.rs
// =============================================================================
// Line-level text edits: the provenance header and the import rewrite.
//
// Nothing here touches the file system, so every rule can be tested on
// plain strings.
// =============================================================================

use std::collections::BTreeSet;
use url::Url;

/// The "do not edit" comment block put at the top of every copied file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvenanceHeader {
    source_url: Url,
}

impl ProvenanceHeader {
    /// `source_url` points at the source directory at the exact commit
    pub fn new(source_url: Url) -> Self {
        ProvenanceHeader { source_url }
    }

    /// Header lines, without line terminators. The last one is blank.
    pub fn lines(&self) -> [String; 3] {
        [
            "// DO NOT EDIT. This file was copied from".to_string(),
            format!("// {}", self.source_url),
            String::new(),
        ]
    }
}

/// Swaps the source repo's internal import prefix for the destination's
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportRewrite {
    old_prefix: String,
    new_prefix: String,
}

impl ImportRewrite {
    pub fn new(old_prefix: impl Into<String>, new_prefix: impl Into<String>) -> Self {
        ImportRewrite {
            old_prefix: old_prefix.into(),
            new_prefix: new_prefix.into(),
        }
    }

    pub fn old_prefix(&self) -> &str {
        &self.old_prefix
    }

    pub fn new_prefix(&self) -> &str {
        &self.new_prefix
    }

    /// Returns the rewritten line, or None if the line has no internal reference.
    /// Every occurrence of the old prefix is replaced; nothing else changes.
    pub fn rewrite_line(&self, line: &str) -> Option<String> {
        self.rewrite_bytes(line.as_bytes())
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Byte-level [`rewrite_line`](Self::rewrite_line). Lines that are not
    /// valid UTF-8 keep every byte outside the replaced prefixes.
    pub fn rewrite_bytes(&self, line: &[u8]) -> Option<Vec<u8>> {
        let old = self.old_prefix.as_bytes();
        if old.is_empty() {
            return None;
        }
        let first = find(line, old)?;

        let mut out = Vec::with_capacity(line.len() + self.new_prefix.len());
        out.extend_from_slice(&line[..first]);
        out.extend_from_slice(self.new_prefix.as_bytes());
        let mut rest = &line[first + old.len()..];
        while let Some(i) = find(rest, old) {
            out.extend_from_slice(&rest[..i]);
            out.extend_from_slice(self.new_prefix.as_bytes());
            rest = &rest[i + old.len()..];
        }
        out.extend_from_slice(rest);
        Some(out)
    }

    /// Collects the full internal import paths a line refers to,
    /// e.g. golang.org/x/pkgsite/internal/middleware
    pub fn internal_paths(&self, line: &str, into: &mut BTreeSet<String>) {
        if self.old_prefix.is_empty() {
            return;
        }
        for (start, _) in line.match_indices(&self.old_prefix) {
            let rest = &line[start..];
            let end = rest.find(is_path_terminator).unwrap_or(rest.len());
            into.insert(rest[..end].to_string());
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}

fn is_path_terminator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '"' | '`' | '\'' | ';' | ')' | ',')
}
