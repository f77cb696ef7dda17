//! Best-guess tag name suggestions for queries that matched nothing.

/// Ranks candidate names by how closely they resemble a misspelled one.
pub trait Suggester {
    /// Return the best matches for `candidate` from `pool`, best first.
    fn suggest(&self, candidate: &str, pool: &[String]) -> Vec<String>;
}

/// Suggests names whose normalized edit-distance similarity is above a cutoff.
#[derive(Debug, Clone, Copy)]
pub struct EditDistanceSuggester {
    /// Maximum number of suggestions returned
    pub limit: usize,
    /// Minimum similarity in `0.0..=1.0`
    pub cutoff: f64,
}

impl Default for EditDistanceSuggester {
    fn default() -> Self {
        Self {
            limit: 3,
            cutoff: 0.6,
        }
    }
}

impl Suggester for EditDistanceSuggester {
    fn suggest(&self, candidate: &str, pool: &[String]) -> Vec<String> {
        let mut scored: Vec<(f64, &String)> = pool
            .iter()
            .map(|name| (similarity(candidate, name), name))
            .filter(|(score, _)| *score >= self.cutoff)
            .collect();

        // Highest score first; ties broken alphabetically so output is stable.
        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));

        scored
            .into_iter()
            .take(self.limit)
            .map(|(_, name)| name.clone())
            .collect()
    }
}

/// Never suggests anything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSuggestions;

impl Suggester for NoSuggestions {
    fn suggest(&self, _candidate: &str, _pool: &[String]) -> Vec<String> {
        Vec::new()
    }
}

/// Similarity in `0.0..=1.0`: one minus the edit distance over the longer length.
fn similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein(a, b) as f64 / longest as f64
}

/// Levenshtein edit distance, single-row.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev_row: Vec<usize> = (0..=b.len()).collect();
    let mut curr_row = vec![0; b.len() + 1];

    for (i, a_char) in a.iter().enumerate() {
        curr_row[0] = i + 1;

        for (j, b_char) in b.iter().enumerate() {
            let cost = if a_char == b_char { 0 } else { 1 };
            curr_row[j + 1] = (curr_row[j] + 1)
                .min(prev_row[j + 1] + 1)
                .min(prev_row[j] + cost);
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    prev_row[b.len()]
}
