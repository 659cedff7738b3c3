//! Comparison report builder
//!
//! Aligns both clause maps, extracts numbers only where a clause exists on
//! both sides, and scores each pair. Pairs are scored in parallel and
//! collected back in lexical code order.

use crate::alignment::{align, pair_numbers};
use crate::extractors::extract_numbers;
use crate::similarity::{score_numbers, score_text, TextSimilarity};
use rayon::prelude::*;
use shared_types::{
    AlignedClausePair, ClauseCode, ClauseMap, ComparisonReport, Presence, ReportSummary,
    Similarity,
};

pub fn build(
    left: &ClauseMap,
    right: &ClauseMap,
    scorer: &dyn TextSimilarity,
    context_size: usize,
) -> ComparisonReport {
    let aligned = align(left, right);

    let pairs: Vec<AlignedClausePair> = aligned
        .par_iter()
        .map(|(code, presence)| build_pair(code, *presence, left, right, scorer, context_size))
        .collect();

    let summary = summarize(left, right, &aligned);

    tracing::info!(
        scorer = scorer.name(),
        modelo = summary.left_unique_codes,
        verificacion = summary.right_unique_codes,
        common = summary.common_codes,
        left_only = summary.left_only.len(),
        right_only = summary.right_only.len(),
        "comparison report built"
    );

    ComparisonReport { pairs, summary }
}

fn build_pair(
    code: &ClauseCode,
    presence: Presence,
    left: &ClauseMap,
    right: &ClauseMap,
    scorer: &dyn TextSimilarity,
    context_size: usize,
) -> AlignedClausePair {
    let left_text = left.text(code);
    let right_text = right.text(code);

    match (left_text, right_text) {
        (Some(l), Some(r)) => {
            let (left_numbers, right_numbers) =
                pair_numbers(&extract_numbers(l, context_size), &extract_numbers(r, context_size));
            let text_similarity = Similarity::score(score_text(scorer, l, r));
            let numeric_similarity = Similarity::score(score_numbers(&left_numbers, &right_numbers));

            AlignedClausePair {
                code: code.clone(),
                presence,
                left_text: Some(l.to_string()),
                right_text: Some(r.to_string()),
                left_numbers,
                right_numbers,
                text_similarity,
                numeric_similarity,
            }
        }
        _ => AlignedClausePair {
            code: code.clone(),
            presence,
            left_text: left_text.map(str::to_string),
            right_text: right_text.map(str::to_string),
            left_numbers: Vec::new(),
            right_numbers: Vec::new(),
            text_similarity: Similarity::Absent,
            numeric_similarity: Similarity::Absent,
        },
    }
}

fn summarize(
    left: &ClauseMap,
    right: &ClauseMap,
    aligned: &[(ClauseCode, Presence)],
) -> ReportSummary {
    let with = |wanted: Presence| -> Vec<ClauseCode> {
        aligned
            .iter()
            .filter(|(_, presence)| *presence == wanted)
            .map(|(code, _)| code.clone())
            .collect()
    };

    ReportSummary {
        left_unique_codes: left.len(),
        right_unique_codes: right.len(),
        common_codes: with(Presence::BothPresent).len(),
        left_only: with(Presence::LeftOnly),
        right_only: with(Presence::RightOnly),
    }
}
