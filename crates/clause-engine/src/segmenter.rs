//! Clause segmenter: attributes each paragraph of cleaned text to a clause code
//!
//! A paragraph belongs to the most recently seen code. Text before the first
//! code is preamble and is dropped. When a line carries several codes only the
//! first one governs; the others stay in the clause text.

use crate::patterns::CLAUSE_CODE_PATTERN;
use shared_types::{ClauseCode, ClauseMap};

/// Split cleaned text into one record per clause code
pub fn segment(cleaned: &str) -> ClauseMap {
    let mut map = ClauseMap::new();
    let mut current: Option<ClauseCode> = None;
    let mut discarded = 0usize;

    for paragraph in cleaned.lines() {
        match find_code(paragraph) {
            Some((code, start, end)) => {
                let remainder = format!("{}{}", &paragraph[..start], &paragraph[end..]);
                map.accumulate(code.clone(), &remainder);
                current = Some(code);
            }
            None => match &current {
                Some(code) => map.accumulate(code.clone(), paragraph),
                None => {
                    if !paragraph.trim().is_empty() {
                        discarded += 1;
                    }
                }
            },
        }
    }

    if map.is_empty() {
        tracing::warn!("no clause codes found in document");
    } else {
        tracing::debug!(codes = map.len(), preamble_lines = discarded, "segmented document");
    }

    map
}

fn find_code(paragraph: &str) -> Option<(ClauseCode, usize, usize)> {
    let m = CLAUSE_CODE_PATTERN.find(paragraph)?;
    let code = ClauseCode::parse(m.as_str())?;
    Some((code, m.start(), m.end()))
}
