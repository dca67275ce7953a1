// Fuzzy matching for "did you mean" suggestions

/// Levenshtein distance between two strings (single-character insertions,
/// deletions and substitutions)
pub fn levenshtein_distance(s1: &str, s2: &str) -> usize {
    let a: Vec<char> = s1.chars().collect();
    let b: Vec<char> = s2.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    // Two rolling rows of the edit matrix
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1)
                .min(curr[j] + 1)
                .min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Candidates within `max_distance` of `search` (case-insensitive), closest first.
/// A candidate starting with `search` counts as a match at distance 1.
pub fn find_near_matches<'a>(search: &str, candidates: &[&'a str], max_distance: usize) -> Vec<(&'a str, usize)> {
    let search_lower = search.to_lowercase();
    let mut matches: Vec<(&'a str, usize)> = candidates
        .iter()
        .filter_map(|&candidate| {
            let candidate_lower = candidate.to_lowercase();
            let distance = levenshtein_distance(&search_lower, &candidate_lower);
            if distance <= max_distance {
                Some((candidate, distance))
            } else if !search_lower.is_empty() && candidate_lower.starts_with(&search_lower) {
                Some((candidate, 1))
            } else {
                None
            }
        })
        .collect();

    matches.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(b.0)));
    matches
}

/// The single closest candidate, if any is near enough
pub fn closest_match<'a>(search: &str, candidates: &[&'a str], max_distance: usize) -> Option<&'a str> {
    find_near_matches(search, candidates, max_distance)
        .first()
        .map(|(name, _)| *name)
}
