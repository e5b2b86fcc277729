//! Text embeddings and the similarity metric used for recall.
//!
//! `HashEmbedder` is a stand-in for a learned model: it is reproducible but
//! carries no semantic meaning. Callers only depend on the `Embedder` trait,
//! so a real model can replace it without touching the store.

/// Number of dimensions produced by `HashEmbedder`.
pub const EMBEDDING_DIMENSIONS: usize = 100;

/// Maps text to a fixed-length vector.
pub trait Embedder: Send + Sync {
    /// Embed a single text. Must be deterministic for identical input.
    fn embed(&self, text: &str) -> Vec<f32>;

    /// Length of vectors returned by `embed`.
    fn dimensions(&self) -> usize;
}

/// Deterministic pseudo-embedding built from a 32-bit rolling string hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct HashEmbedder;

impl HashEmbedder {
    pub fn new() -> Self {
        Self
    }
}

impl Embedder for HashEmbedder {
    fn embed(&self, text: &str) -> Vec<f32> {
        (0..EMBEDDING_DIMENSIONS)
            .map(|index| {
                let hash = i64::from(rolling_hash(text, index)).abs();
                ((hash % 200 - 100) as f32) / 100.0
            })
            .collect()
    }

    fn dimensions(&self) -> usize {
        EMBEDDING_DIMENSIONS
    }
}

/// `h = h * 31 + unit` over the UTF-16 units of `text` followed by the
/// decimal digits of `index`, wrapping at 32 bits.
fn rolling_hash(text: &str, index: usize) -> i32 {
    let suffix = index.to_string();
    text.encode_utf16()
        .chain(suffix.encode_utf16())
        .fold(0i32, |hash, unit| {
            hash.wrapping_mul(31).wrapping_add(i32::from(unit))
        })
}

/// Cosine of the angle between two vectors.
///
/// Empty vectors, mismatched lengths, and zero vectors all score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.is_empty() || b.is_empty() || a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}
