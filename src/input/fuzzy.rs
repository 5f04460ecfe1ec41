//! Fuzzy matching for the settings search field
//!
//! Query characters must appear in order in the label, but not necessarily
//! consecutively. Matching is case-insensitive. Results are ranked so that
//! labels where the query lines up with word starts or forms a contiguous run
//! come first.

/// Score bonus constants for match quality ranking
mod score {
    /// Bonus for consecutive character matches
    pub const CONSECUTIVE: i32 = 16;
    /// Bonus for matching at word boundary (after space, underscore, etc.)
    pub const WORD_BOUNDARY: i32 = 32;
    /// Bonus for matching at the start of the string
    pub const START_OF_STRING: i32 = 48;
    /// Bonus for matching a camelCase transition (lowercase -> uppercase)
    pub const CAMEL_CASE: i32 = 24;
    /// Penalty per gap between matched characters
    pub const GAP_PENALTY: i32 = -3;
    /// Penalty for starting a gap (first unmatched char after a match)
    pub const GAP_START_PENALTY: i32 = -5;
    /// Bonus for exact match (query matches entire label)
    pub const EXACT_MATCH: i32 = 100;
    /// Bonus when the query is exactly the first word of the label
    pub const WHOLE_WORD_PREFIX: i32 = 80;
}

/// Result of a fuzzy match, containing match status and quality score
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyMatch {
    /// Whether the query matched the target
    pub matched: bool,
    /// Quality score (higher is better). Only meaningful if matched is true.
    pub score: i32,
    /// Char indices in the target where query characters matched
    pub match_positions: Vec<usize>,
}

impl FuzzyMatch {
    /// Create a non-matching result
    pub fn no_match() -> Self {
        Self {
            matched: false,
            score: 0,
            match_positions: Vec::new(),
        }
    }
}

impl Ord for FuzzyMatch {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Non-matches are always worse than matches
        match (self.matched, other.matched) {
            (true, false) => std::cmp::Ordering::Greater,
            (false, true) => std::cmp::Ordering::Less,
            (false, false) => std::cmp::Ordering::Equal,
            (true, true) => self.score.cmp(&other.score),
        }
    }
}

impl PartialOrd for FuzzyMatch {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Match `query` against `target`.
///
/// An empty query matches everything with a score of zero.
///
/// # Examples
/// ```
/// use tui_settings::input::fuzzy::fuzzy_match;
///
/// assert!(fuzzy_match("the", "Theme").matched);
/// assert!(fuzzy_match("dm", "Debug Mode").matched);
/// assert!(!fuzzy_match("the", "Timeout").matched);
/// ```
pub fn fuzzy_match(query: &str, target: &str) -> FuzzyMatch {
    if query.is_empty() {
        return FuzzyMatch {
            matched: true,
            score: 0,
            match_positions: Vec::new(),
        };
    }

    let query_lower: Vec<char> = query.to_lowercase().chars().collect();
    let target_chars: Vec<char> = target.chars().collect();
    let target_lower: Vec<char> = target_chars
        .iter()
        .map(|c| c.to_lowercase().next().unwrap_or(*c))
        .collect();

    let Some((positions, mut final_score)) =
        find_best_match(&query_lower, &target_chars, &target_lower)
    else {
        return FuzzyMatch::no_match();
    };

    let query_len = query_lower.len();
    let target_len = target_lower.len();

    if query_len == target_len {
        final_score += score::EXACT_MATCH;
    } else if target_len > query_len {
        let is_prefix_match = positions.iter().enumerate().all(|(i, &pos)| pos == i);
        if is_prefix_match {
            let next_char = target_chars[query_len];
            if next_char == ' ' || next_char == '_' || next_char == '-' || next_char == '.' {
                final_score += score::WHOLE_WORD_PREFIX;
            }
        }
    }

    FuzzyMatch {
        matched: true,
        score: final_score,
        match_positions: positions,
    }
}

fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '_' | '-' | '/' | '.' | ':')
}

/// Find the best scoring in-order placement of `query` in the target.
///
/// Dynamic programming over target positions: for every query prefix length
/// we keep the best placement found so far.
fn find_best_match(
    query: &[char],
    target_chars: &[char],
    target_lower: &[char],
) -> Option<(Vec<usize>, i32)> {
    let n = target_lower.len();
    let m = query.len();

    if n < m {
        return None;
    }

    // Quick rejection: every query char must appear in order
    {
        let mut qi = 0;
        for &tc in target_lower {
            if qi < m && tc == query[qi] {
                qi += 1;
            }
        }
        if qi < m {
            return None;
        }
    }

    #[derive(Clone)]
    struct State {
        score: i32,
        positions: Vec<usize>,
        last_match_pos: Option<usize>,
    }

    let mut best_for_prefix: Vec<Option<State>> = vec![None; m + 1];
    best_for_prefix[0] = Some(State {
        score: 0,
        positions: Vec::new(),
        last_match_pos: None,
    });

    for ti in 0..n {
        // Reverse so a single target char is never used twice in one pass
        for qi in (0..m).rev() {
            if target_lower[ti] != query[qi] {
                continue;
            }
            let Some(prev) = best_for_prefix[qi].as_ref() else {
                continue;
            };
            if prev.last_match_pos.is_some_and(|last| ti <= last) {
                continue;
            }

            let mut match_score = 0;

            if ti == 0 {
                match_score += score::START_OF_STRING;
            } else {
                let prev_char = target_chars[ti - 1];
                if is_word_separator(prev_char) {
                    match_score += score::WORD_BOUNDARY;
                } else if prev_char.is_lowercase() && target_chars[ti].is_uppercase() {
                    match_score += score::CAMEL_CASE;
                }
            }

            if let Some(last_pos) = prev.last_match_pos {
                if ti == last_pos + 1 {
                    match_score += score::CONSECUTIVE;
                } else {
                    let gap_size = (ti - last_pos - 1) as i32;
                    match_score += score::GAP_START_PENALTY;
                    match_score += score::GAP_PENALTY * (gap_size - 1).max(0);
                }
            }

            let new_score = prev.score + match_score;
            let improves = best_for_prefix[qi + 1]
                .as_ref()
                .map_or(true, |current| new_score > current.score);

            if improves {
                let mut positions = prev.positions.clone();
                positions.push(ti);
                best_for_prefix[qi + 1] = Some(State {
                    score: new_score,
                    positions,
                    last_match_pos: Some(ti),
                });
            }
        }
    }

    best_for_prefix[m]
        .take()
        .map(|state| (state.positions, state.score))
}

/// Filter `items` by fuzzy matching `query` against the text `get_text`
/// extracts from each one.
///
/// Returns `(index, match)` pairs for matching items only, best score first.
/// Items with equal scores keep their original relative order.
pub fn fuzzy_filter<T, F>(query: &str, items: &[T], get_text: F) -> Vec<(usize, FuzzyMatch)>
where
    F: Fn(&T) -> &str,
{
    let mut results: Vec<(usize, FuzzyMatch)> = items
        .iter()
        .enumerate()
        .map(|(idx, item)| (idx, fuzzy_match(query, get_text(item))))
        .filter(|(_, m)| m.matched)
        .collect();

    // sort_by is stable, which keeps declaration order among ties
    results.sort_by(|a, b| b.1.score.cmp(&a.1.score));

    results
}
