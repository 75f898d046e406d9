//! Lexical fallback scorer: rank corpus lines by query-token overlap.
//!
//! No embedding dependency. This is a best-effort approximation of
//! relevance, strictly weaker than the vector index, retained as a
//! dependency-free fallback mode.

/// A corpus line together with its lexical overlap score.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineMatch<'a> {
    pub line: &'a str,
    pub score: usize,
}

/// Rank the lines of `corpus_text` against `query`.
///
/// The query is split into lowercase whitespace-delimited tokens; repeats
/// are kept, so a token appearing twice in the query scores twice on any
/// line that contains it. A line's score is the number of query tokens
/// contained in the lowercased line as a **substring** — "cat" matches
/// "category"; containment, not whole-word match, is the contract. Each
/// token counts once per line regardless of how often it occurs there.
///
/// Zero-scoring lines are dropped. The rest are sorted by score
/// descending with a stable sort, so equal scores keep their original
/// relative order, and at most `top_n` lines are returned.
pub fn rank_lines<'a>(query: &str, corpus_text: &'a str, top_n: usize) -> Vec<LineMatch<'a>> {
    let query_lower = query.to_lowercase();
    let tokens: Vec<&str> = query_lower.split_whitespace().collect();
    if tokens.is_empty() {
        return Vec::new();
    }

    let mut matches: Vec<LineMatch<'a>> = corpus_text
        .lines()
        .filter_map(|line| {
            let line_lower = line.to_lowercase();
            let score = tokens.iter().filter(|t| line_lower.contains(*t)).count();
            if score > 0 {
                Some(LineMatch { line, score })
            } else {
                None
            }
        })
        .collect();

    // sort_by is stable: ties retain corpus order.
    matches.sort_by(|a, b| b.score.cmp(&a.score));
    matches.truncate(top_n);
    matches
}

#[cfg(test)]
mod tests {
    use super::*;

    const CELL_NOTES: &str = "Photosynthesis converts light into chemical energy.\n\
                              Mitosis is cell division.";

    #[test]
    fn ranks_overlapping_line_and_discards_zero_scores() {
        let ranked = rank_lines("light energy", CELL_NOTES, 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(
            ranked[0].line,
            "Photosynthesis converts light into chemical energy."
        );
        assert_eq!(ranked[0].score, 2);
    }

    #[test]
    fn empty_query_returns_nothing() {
        assert!(rank_lines("", CELL_NOTES, 5).is_empty());
        assert!(rank_lines("   \t\n", CELL_NOTES, 5).is_empty());
    }

    #[test]
    fn scores_sorted_non_increasing() {
        let corpus = "a b c\nb\na b\nc c c";
        let ranked = rank_lines("a b c", corpus, 10);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn ties_keep_corpus_order() {
        let corpus = "first rust line\nsecond rust line\nthird rust line";
        let ranked = rank_lines("rust", corpus, 10);
        let lines: Vec<&str> = ranked.iter().map(|m| m.line).collect();
        assert_eq!(
            lines,
            vec!["first rust line", "second rust line", "third rust line"]
        );
    }

    #[test]
    fn token_matches_as_substring() {
        let ranked = rank_lines("cat", "the category page\nthe dog page", 5);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].line, "the category page");
    }

    #[test]
    fn repeated_query_tokens_count_repeatedly() {
        let ranked = rank_lines("energy energy", CELL_NOTES, 5);
        assert_eq!(ranked[0].score, 2);
    }

    #[test]
    fn token_counts_once_per_line_not_per_occurrence() {
        let ranked = rank_lines("energy", "energy and more energy", 5);
        assert_eq!(ranked[0].score, 1);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let ranked = rank_lines("PHOTOSYNTHESIS", CELL_NOTES, 5);
        assert_eq!(ranked.len(), 1);
    }

    #[test]
    fn top_n_limits_results() {
        let corpus = "note one\nnote two\nnote three\nnote four";
        let ranked = rank_lines("note", corpus, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].line, "note one");
    }
}
