use super::{normalize_text, TextSimilarity};

/// Character-level longest-common-subsequence ratio
///
/// `2 * lcs / (len(a) + len(b)) * 100` over normalized text.
///
/// The shared prefix and suffix are counted directly; only the differing
/// middle goes through the O(n·m) table. Two long clauses that diverge
/// throughout still cost time proportional to the product of their lengths,
/// so prefer [`super::TfIdfCosine`] for documents that segment into very few,
/// very long clauses.
#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceRatio;

impl TextSimilarity for SequenceRatio {
    fn score(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = normalize_text(a).chars().collect();
        let b: Vec<char> = normalize_text(b).chars().collect();

        let total = a.len() + b.len();
        if total == 0 {
            return 100.0;
        }

        let lcs = lcs_len(&a, &b);
        (2 * lcs) as f64 / total as f64 * 100.0
    }

    fn name(&self) -> &str {
        "sequence"
    }
}

/// Longest common subsequence length
fn lcs_len(a: &[char], b: &[char]) -> usize {
    let prefix = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    let (a, b) = (&a[prefix..], &b[prefix..]);
    let suffix = a
        .iter()
        .rev()
        .zip(b.iter().rev())
        .take_while(|(x, y)| x == y)
        .count();
    let (a, b) = (&a[..a.len() - suffix], &b[..b.len() - suffix]);

    prefix + suffix + lcs_table(a, b)
}

/// Two-row dynamic programming, O(|a|·|b|) time, O(min) space
fn lcs_table(a: &[char], b: &[char]) -> usize {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() {
        return 0;
    }

    let mut prev = vec![0usize; short.len() + 1];
    let mut curr = vec![0usize; short.len() + 1];

    for x in long {
        for (j, y) in short.iter().enumerate() {
            curr[j + 1] = if x == y {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn test_lcs_len() {
        assert_eq!(lcs_len(&chars("abcde"), &chars("ace")), 3);
        assert_eq!(lcs_len(&chars("abc"), &chars("xyz")), 0);
        assert_eq!(lcs_len(&chars(""), &chars("abc")), 0);
    }

    #[test]
    fn test_lcs_len_with_shared_prefix_and_suffix() {
        assert_eq!(lcs_len(&chars("abXcd"), &chars("abYcd")), 4);
        assert_eq!(lcs_len(&chars("aaaa"), &chars("aa")), 2);
        assert_eq!(lcs_len(&chars("abc"), &chars("abc")), 3);
        assert_eq!(lcs_table(&chars("abXcd"), &chars("abYcd")), 4);
    }

    #[test]
    fn test_long_clause_with_one_edit() {
        let base = "la aseguradora cubre daños materiales por evento ".repeat(1000);
        let edited = format!("{}deducible 15 {}", base, base);
        let original = format!("{}deducible 10 {}", base, base);

        // A single substituted digit
        let len = normalize_text(&original).chars().count() as f64;
        let expected = 2.0 * (len - 1.0) / (2.0 * len) * 100.0;
        let score = SequenceRatio.score(&original, &edited);
        assert!((score - expected).abs() < 1e-9, "scored {}", score);
    }

    #[test]
    fn test_identical_text_scores_100() {
        assert_eq!(SequenceRatio.score("Cobertura total", "cobertura   TOTAL"), 100.0);
    }

    #[test]
    fn test_disjoint_text_scores_zero() {
        assert_eq!(SequenceRatio.score("aaa", "zzz"), 0.0);
    }

    #[test]
    fn test_partial_overlap() {
        // lcs("abcd", "abxd") = 3
        let score = SequenceRatio.score("abcd", "abxd");
        assert!((score - 75.0).abs() < 1e-9);
    }

    #[test]
    fn test_symmetric() {
        let a = "El asegurado pagará 500 pesos";
        let b = "La aseguradora cubrirá 300 pesos";
        assert_eq!(SequenceRatio.score(a, b), SequenceRatio.score(b, a));
    }

    #[test]
    fn test_one_side_empty() {
        assert_eq!(SequenceRatio.score("", "texto"), 0.0);
    }
}
