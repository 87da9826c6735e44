//! Hashed bag-of-words vectorization.
//!
//! Tokens are hashed into a fixed number of buckets, so the vector
//! dimension is independent of vocabulary size and two runs over the same
//! text always produce the same vector. Collisions between rare tokens are
//! accepted; at this dimension they barely move cosine scores.

use sha2::{Digest, Sha256};

/// Number of hash buckets per vector.
pub const VECTOR_DIM: usize = 256;

/// Minimum token length; single characters are noise.
const MIN_TOKEN_LEN: usize = 2;

/// Vectorize `text` into an L2-normalized bucket-count vector.
///
/// The zero vector comes back for text with no usable tokens.
#[must_use]
pub fn vectorize(text: &str) -> Vec<f32> {
    let mut vector = vec![0.0_f32; VECTOR_DIM];
    for token in tokens(text) {
        vector[bucket(&token)] += 1.0;
    }
    l2_normalize(&mut vector);
    vector
}

/// Cosine similarity in `[0, 1]` for count vectors; 0.0 when either side
/// is the zero vector or lengths differ.
#[must_use]
pub fn cosine(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot / (norm_a * norm_b)
}

/// Hex-encoded SHA-256 of `text`, used to skip re-vectorizing unchanged
/// documents.
#[must_use]
pub fn content_hash_hex(text: &str) -> String {
    let digest = Sha256::digest(text.as_bytes());
    let mut hex = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hex.push_str(&format!("{byte:02x}"));
    }
    hex
}

fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|t| t.len() >= MIN_TOKEN_LEN)
        .map(str::to_ascii_lowercase)
}

fn bucket(token: &str) -> usize {
    let digest = Sha256::digest(token.as_bytes());
    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (word as usize) % VECTOR_DIM
}

fn l2_normalize(vector: &mut [f32]) {
    let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        for value in vector {
            *value /= norm;
        }
    }
}
