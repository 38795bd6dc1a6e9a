//! Edit distance used for "did you mean" suggestions.
//!
//! Applet names and option keys are both ranked with [`levenshtein`];
//! [`closest_match`] picks the winner.

/// Levenshtein distance between `a` and `b`, counted in `char`s.
///
/// Keeps two rolling rows of `b.len() + 1` cells instead of the full matrix.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut next = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        next[0] = i + 1;

        for (j, cb) in b.iter().enumerate() {
            next[j + 1] = if ca == *cb {
                prev[j]
            } else {
                1 + prev[j].min(prev[j + 1]).min(next[j])
            };
        }

        std::mem::swap(&mut prev, &mut next);
    }

    prev[b.len()]
}

/// Returns the candidate closest to `input`.
///
/// Ties go to the candidate seen first, so callers iterating an ordered map
/// get the lexicographically smallest name among equals.
pub fn closest_match<'a, I>(input: &str, candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut best: Option<(&'a str, usize)> = None;

    for candidate in candidates {
        let distance = levenshtein(input, candidate);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((candidate, distance)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
