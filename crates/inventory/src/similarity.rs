//! Partial-ratio text similarity.
//!
//! Scores are integers in `0..=100`. The shorter string is slid across the
//! longer one, anchored at every matching block of the pair, and the best
//! window's match ratio wins, so a query that is a substring of a candidate
//! scores 100 whatever the length difference.
//!
//! Inputs are normalised first: lowercased, every character that is not
//! alphanumeric or `_` replaced by a space, and trimmed.

/// Normalise a string before scoring.
pub fn normalize(raw: &str) -> String {
    raw.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '_' {
                c
            } else {
                ' '
            }
        })
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Partial-ratio score of two strings after normalisation.
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a: Vec<char> = normalize(a).chars().collect();
    let b: Vec<char> = normalize(b).chars().collect();
    partial_ratio_chars(&a, &b)
}

fn partial_ratio_chars(a: &[char], b: &[char]) -> u8 {
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    let (shorter, longer) = if a.len() <= b.len() { (a, b) } else { (b, a) };

    let mut best = 0.0_f64;
    for block in matching_blocks(shorter, longer) {
        let start = block.b.saturating_sub(block.a);
        let end = (start + shorter.len()).min(longer.len());
        let r = ratio(shorter, &longer[start..end]);
        if r > 0.995 {
            return 100;
        }
        if r > best {
            best = r;
        }
    }

    // Halves go to the even neighbour.
    (best * 100.0).round_ties_even() as u8
}

/// Match ratio `2·M / T` of two sequences.
fn ratio(a: &[char], b: &[char]) -> f64 {
    let total = a.len() + b.len();
    if total == 0 {
        return 1.0;
    }
    let matched: usize = matching_blocks(a, b).iter().map(|m| m.size).sum();
    2.0 * matched as f64 / total as f64
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Block {
    a: usize,
    b: usize,
    size: usize,
}

/// Non-overlapping matching blocks in ascending order, terminated by a
/// zero-sized sentinel at `(a.len(), b.len())`.
fn matching_blocks(a: &[char], b: &[char]) -> Vec<Block> {
    let mut pending = vec![(0, a.len(), 0, b.len())];
    let mut found = Vec::new();

    while let Some((alo, ahi, blo, bhi)) = pending.pop() {
        let m = longest_match(a, b, alo, ahi, blo, bhi);
        if m.size == 0 {
            continue;
        }
        found.push(m);
        if alo < m.a && blo < m.b {
            pending.push((alo, m.a, blo, m.b));
        }
        if m.a + m.size < ahi && m.b + m.size < bhi {
            pending.push((m.a + m.size, ahi, m.b + m.size, bhi));
        }
    }

    found.sort_by_key(|m| (m.a, m.b));
    found.push(Block {
        a: a.len(),
        b: b.len(),
        size: 0,
    });
    found
}

/// Longest common run of `a[alo..ahi]` and `b[blo..bhi]`; ties resolve to the
/// run starting earliest in `a`, then earliest in `b`.
fn longest_match(a: &[char], b: &[char], alo: usize, ahi: usize, blo: usize, bhi: usize) -> Block {
    let width = bhi.saturating_sub(blo);
    let mut best = Block {
        a: alo,
        b: blo,
        size: 0,
    };
    let mut prev = vec![0usize; width + 1];
    let mut cur = vec![0usize; width + 1];

    for i in alo..ahi {
        for j in blo..bhi {
            let slot = j - blo + 1;
            if a[i] == b[j] {
                let k = prev[slot - 1] + 1;
                cur[slot] = k;
                if k > best.size {
                    best = Block {
                        a: i + 1 - k,
                        b: j + 1 - k,
                        size: k,
                    };
                }
            } else {
                cur[slot] = 0;
            }
        }
        std::mem::swap(&mut prev, &mut cur);
    }

    best
}

/// A scored candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct Scored<T> {
    pub score: u8,
    pub item: T,
}

/// Score every candidate against `query` and keep the best `limit`.
///
/// Ordering is by descending score; equal scores keep candidate order.
pub fn rank<T, I>(query: &str, candidates: I, limit: usize) -> Vec<Scored<T>>
where
    I: IntoIterator<Item = (T, String)>,
{
    if limit == 0 {
        return Vec::new();
    }

    let query: Vec<char> = normalize(query).chars().collect();
    let mut scored: Vec<Scored<T>> = candidates
        .into_iter()
        .map(|(item, text)| {
            let text: Vec<char> = normalize(&text).chars().collect();
            Scored {
                score: partial_ratio_chars(&query, &text),
                item,
            }
        })
        .collect();

    // Stable: ties stay in candidate (store) order.
    scored.sort_by(|x, y| y.score.cmp(&x.score));
    scored.truncate(limit);
    scored
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalisation_lowercases_and_strips_punctuation() {
        assert_eq!(normalize("  Hex-Bolt, M3!  "), "hex bolt  m3");
        assert_eq!(normalize("snake_case"), "snake_case");
        assert_eq!(normalize("--"), "");
    }

    #[test]
    fn substring_scores_full_marks() {
        assert_eq!(partial_ratio("widget", "Blue Widget 10mm"), 100);
        assert_eq!(partial_ratio("Blue Widget 10mm", "widget"), 100);
    }

    #[test]
    fn identical_strings_score_full_marks() {
        assert_eq!(partial_ratio("M3 screw", "m3 SCREW"), 100);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(partial_ratio("", "anything"), 0);
        assert_eq!(partial_ratio("...", "anything"), 0);
    }

    #[test]
    fn disjoint_strings_score_zero() {
        assert_eq!(partial_ratio("abc", "xyz"), 0);
    }

    #[test]
    fn near_miss_scores_between_bounds() {
        let score = partial_ratio("widgit", "widget 10mm");
        assert!(score >= 80 && score < 100, "score = {score}");
    }

    #[test]
    fn half_scores_round_to_even() {
        assert_eq!(partial_ratio("standoff", "nut timer"), 12);
        assert_eq!(partial_ratio("nut dual", "dual nut washer washer"), 62);
    }

    #[test]
    fn matching_blocks_cover_common_runs() {
        let a: Vec<char> = "abxcd".chars().collect();
        let b: Vec<char> = "abcd".chars().collect();
        let blocks = matching_blocks(&a, &b);
        let total: usize = blocks.iter().map(|m| m.size).sum();
        assert_eq!(total, 4);
        assert_eq!(blocks.last().map(|m| m.size), Some(0));
    }

    #[test]
    fn rank_orders_by_score_then_candidate_order() {
        let candidates = vec![
            (1, "hex nut m3".to_string()),
            (2, "washer m3".to_string()),
            (3, "hex nut m3".to_string()),
            (4, "standoff".to_string()),
        ];
        let ranked = rank("hex nut", candidates, 3);
        let ids: Vec<i32> = ranked.iter().map(|s| s.item).collect();
        assert_eq!(ids, vec![1, 3, 2]);
        assert_eq!(ranked[0].score, 100);
    }

    #[test]
    fn rank_with_zero_limit_is_empty() {
        let ranked = rank("x", vec![(1, "x".to_string())], 0);
        assert!(ranked.is_empty());
    }
}
