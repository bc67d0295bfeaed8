//! Sequence similarity for approximate name matching.
//!
//! The score is the classic diff ratio: find the longest common run, recurse
//! on the pieces either side of it, and return `2 * matched / total_len`.
//! A transposed or dropped character still scores high ("zealto" vs "zealot"
//! is 0.83), which is what makes typo'd lookups land. The cutoffs used by the
//! resolver are calibrated against this scale, not against edit distance.

use std::collections::HashMap;

/// Scores candidates against one fixed query string. Holds the query's
/// char-position index so scoring a whole catalog reuses it.
#[derive(Debug)]
pub struct Matcher {
    query: Vec<char>,
    /// char -> ascending positions in `query`.
    positions: HashMap<char, Vec<usize>>,
}

impl Matcher {
    pub fn new(query: &str) -> Matcher {
        let query: Vec<char> = query.chars().collect();
        let mut positions: HashMap<char, Vec<usize>> = HashMap::new();
        for (j, &ch) in query.iter().enumerate() {
            positions.entry(ch).or_default().push(j);
        }
        Matcher { query, positions }
    }

    /// Similarity of `candidate` to the query in [0.0, 1.0].
    /// Two empty strings are identical (1.0).
    pub fn ratio(&self, candidate: &str) -> f64 {
        let candidate: Vec<char> = candidate.chars().collect();
        let total = candidate.len() + self.query.len();
        if total == 0 {
            return 1.0;
        }
        let matched = self.total_matched(&candidate);
        2.0 * matched as f64 / total as f64
    }

    /// Upper bound on `ratio` from lengths alone. Lets the resolver skip
    /// candidates too short or too long to ever reach the cutoff.
    pub fn length_bound(&self, candidate: &str) -> f64 {
        let candidate_len = candidate.chars().count();
        let total = candidate_len + self.query.len();
        if total == 0 {
            return 1.0;
        }
        2.0 * candidate_len.min(self.query.len()) as f64 / total as f64
    }

    /// Sum of matching-run lengths: take the longest common run, then
    /// recurse (via an explicit region stack) on the unmatched pieces
    /// before and after it.
    fn total_matched(&self, candidate: &[char]) -> usize {
        let mut matched = 0;
        let mut regions = vec![(0, candidate.len(), 0, self.query.len())];
        while let Some((alo, ahi, blo, bhi)) = regions.pop() {
            let (i, j, size) = self.longest_run(candidate, alo, ahi, blo, bhi);
            if size == 0 {
                continue;
            }
            matched += size;
            if alo < i && blo < j {
                regions.push((alo, i, blo, j));
            }
            if i + size < ahi && j + size < bhi {
                regions.push((i + size, ahi, j + size, bhi));
            }
        }
        matched
    }

    /// Longest common run between candidate[alo..ahi] and query[blo..bhi],
    /// as (candidate start, query start, length). Ties go to the earliest
    /// run in the candidate. `run_ends[j]` is the length of the run ending
    /// at candidate position i and query position j; each candidate char
    /// extends runs from the previous row.
    fn longest_run(
        &self,
        candidate: &[char],
        alo: usize,
        ahi: usize,
        blo: usize,
        bhi: usize,
    ) -> (usize, usize, usize) {
        let mut best = (alo, blo, 0);
        let mut run_ends: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_run_ends = HashMap::new();
            if let Some(positions) = self.positions.get(&candidate[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }
                    let len = match j.checked_sub(1).and_then(|prev| run_ends.get(&prev)) {
                        Some(prev_len) => prev_len + 1,
                        None => 1,
                    };
                    next_run_ends.insert(j, len);
                    if len > best.2 {
                        best = (i + 1 - len, j + 1 - len, len);
                    }
                }
            }
            run_ends = next_run_ends;
        }
        best
    }
}

/// One-shot ratio between two strings. Builds a [Matcher] for `query`;
/// prefer keeping a Matcher when scoring many candidates.
pub fn sequence_ratio(candidate: &str, query: &str) -> f64 {
    Matcher::new(query).ratio(candidate)
}
