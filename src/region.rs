// Resolves which slice of the document a rewrite applies to: the active
// selection, the paragraph under the caret, or the whole text. Resolution
// is pure and runs before any network call, so a failed lookup never
// leaves a request in flight.

use regex::Regex;
use thiserror::Error;

use crate::content::SelectionAccess;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RegionError {
    #[error("nothing is selected")]
    EmptySelection,
    #[error("no paragraph found at the caret position")]
    ParagraphNotFound,
}

/// Which part of the document a rewrite targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TargetMode {
    #[default]
    Selection,
    Paragraph,
    All,
}

/// A resolved rewrite region: the text to send to the model plus enough
/// context to splice the replacement back into the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    pub text: String,
    pub target: ResolvedTarget,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedTarget {
    /// Byte range of the selection at the time the rewrite was requested.
    Selection { start: usize, end: usize },
    /// Paragraph index plus the full paragraph list it was resolved against.
    Paragraph {
        index: usize,
        paragraphs: Vec<String>,
    },
    Whole,
}

/// Split a document into paragraphs on blank-line separators.
/// A separator is a newline, optional whitespace, then another newline.
pub fn split_paragraphs(content: &str) -> Vec<String> {
    let separator = Regex::new(r"\n\s*\n").unwrap();
    separator.split(content).map(str::to_string).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParagraphHit {
    pub text: String,
    pub index: usize,
    pub paragraphs: Vec<String>,
}

/// Locate the paragraph containing the given caret byte offset.
///
/// Offsets are accumulated assuming two-byte separators, matching the
/// joined form that [`reassemble`] writes back. The extra two bytes of
/// tolerance at each paragraph end let a caret sitting on the separator
/// still resolve to the paragraph before it.
pub fn paragraph_at(content: &str, caret: usize) -> Result<ParagraphHit, RegionError> {
    let paragraphs = split_paragraphs(content);

    let mut start = 0usize;
    let mut found = None;
    for (index, paragraph) in paragraphs.iter().enumerate() {
        let end = start + paragraph.len();
        if caret >= start && caret <= end + 2 {
            found = Some(index);
            break;
        }
        start = end + 2;
    }

    match found {
        Some(index) => Ok(ParagraphHit {
            text: paragraphs[index].clone(),
            index,
            paragraphs,
        }),
        None => Err(RegionError::ParagraphNotFound),
    }
}

/// Replace one paragraph and join the list back into a document.
/// Joining always uses a plain blank line, so irregular separator runs
/// in the source are normalized away.
pub fn reassemble(paragraphs: &[String], index: usize, replacement: &str) -> String {
    let mut updated = paragraphs.to_vec();
    if index < updated.len() {
        updated[index] = replacement.to_string();
    }
    updated.join("\n\n")
}

/// Resolve the rewrite region for the given target mode.
pub fn resolve<S: SelectionAccess>(
    surface: &S,
    content: &str,
    mode: TargetMode,
) -> Result<Region, RegionError> {
    match mode {
        TargetMode::All => Ok(Region {
            text: content.to_string(),
            target: ResolvedTarget::Whole,
        }),
        TargetMode::Selection => {
            let (start, end) = surface
                .selection_range()
                .ok_or(RegionError::EmptySelection)?;
            let text = content.get(start..end).unwrap_or_default();
            if text.is_empty() {
                return Err(RegionError::EmptySelection);
            }
            Ok(Region {
                text: text.to_string(),
                target: ResolvedTarget::Selection { start, end },
            })
        }
        TargetMode::Paragraph => {
            let caret = surface
                .caret_offset()
                .ok_or(RegionError::ParagraphNotFound)?;
            let hit = paragraph_at(content, caret)?;
            Ok(Region {
                text: hit.text,
                target: ResolvedTarget::Paragraph {
                    index: hit.index,
                    paragraphs: hit.paragraphs,
                },
            })
        }
    }
}
