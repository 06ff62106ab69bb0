//! Vector and lexical similarity primitives.
//!
//! ## Vector distance
//! Cosine distance, `1 - cos(a, b)`. Vectors of different length, or with a
//! zero norm, are treated as orthogonal (distance 1).
//!
//! ## Lexical similarity
//! Trigram similarity in the style of PostgreSQL `pg_trgm`:
//! ```text
//! words   = lowercase(text) split on non-alphanumerics
//! grams   = ∪ 3-char windows of ("  " + word + " ")
//! sim     = |grams(a) ∩ grams(b)| / |grams(a) ∪ grams(b)|
//! ```
//!
//! ## Hybrid distance
//! ```text
//! hybrid = 0.7 · vector_distance + 0.3 · (1 - lexical_similarity)
//! ```

use std::collections::HashSet;

/// Weight of the vector distance in the hybrid blend.
pub const VECTOR_WEIGHT: f64 = 0.7;

/// Weight of the lexical distance in the hybrid blend.
pub const LEXICAL_WEIGHT: f64 = 0.3;

/// Cosine similarity of two vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0f64;
    let mut norm_a = 0.0f64;
    let mut norm_b = 0.0f64;
    for (x, y) in a.iter().zip(b) {
        let (x, y) = (*x as f64, *y as f64);
        dot += x * y;
        norm_a += x * x;
        norm_b += y * y;
    }

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a.sqrt() * norm_b.sqrt())
}

/// Cosine distance of two vectors (smaller is closer).
pub fn cosine_distance(a: &[f32], b: &[f32]) -> f64 {
    1.0 - cosine_similarity(a, b)
}

/// The trigram set of a text.
pub fn trigrams(text: &str) -> HashSet<[char; 3]> {
    let mut grams = HashSet::new();
    let lower = text.to_lowercase();

    for word in lower.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty()) {
        let padded: Vec<char> = "  "
            .chars()
            .chain(word.chars())
            .chain(std::iter::once(' '))
            .collect();
        for window in padded.windows(3) {
            grams.insert([window[0], window[1], window[2]]);
        }
    }

    grams
}

/// Trigram similarity in `[0, 1]`.
pub fn trigram_similarity(a: &str, b: &str) -> f64 {
    let ga = trigrams(a);
    let gb = trigrams(b);
    if ga.is_empty() || gb.is_empty() {
        return 0.0;
    }

    let shared = ga.intersection(&gb).count();
    let union = ga.len() + gb.len() - shared;
    shared as f64 / union as f64
}

/// Blend of vector distance and lexical distance (smaller is closer).
pub fn hybrid_distance(vector_distance: f64, lexical_similarity: f64) -> f64 {
    VECTOR_WEIGHT * vector_distance + LEXICAL_WEIGHT * (1.0 - lexical_similarity)
}
