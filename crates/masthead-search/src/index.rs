//! In-memory manuscript search index.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::vectorize::{content_hash_hex, cosine, vectorize};

/// One scored result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    pub id: String,
    pub score: f32,
}

#[derive(Debug, Clone)]
struct IndexedDoc {
    vector: Vec<f32>,
    content_hash: String,
}

/// Vector index over submission titles and abstracts.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    docs: BTreeMap<String, IndexedDoc>,
}

impl SearchIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Index (or re-index) one document.
    ///
    /// Returns `true` if a vector was written, `false` when the content
    /// hash matches what is already stored and the write was skipped.
    pub fn insert(&mut self, id: &str, text: &str) -> bool {
        let content_hash = content_hash_hex(text);
        if self
            .docs
            .get(id)
            .is_some_and(|doc| doc.content_hash == content_hash)
        {
            return false;
        }

        self.docs.insert(
            id.to_string(),
            IndexedDoc {
                vector: vectorize(text),
                content_hash,
            },
        );
        tracing::debug!(doc = %id, "indexed document");
        true
    }

    /// Drop a document; returns whether it was present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.docs.remove(id).is_some()
    }

    /// Rank indexed documents against `query`.
    ///
    /// Hits below `min_score` (or scoring exactly 0) are dropped; at most
    /// `limit` results come back, best first, ids ascending on score ties.
    #[must_use]
    pub fn search(&self, query: &str, limit: usize, min_score: f32) -> Vec<SearchHit> {
        let query_vector = vectorize(query);
        if query_vector.iter().all(|x| *x == 0.0) {
            return Vec::new();
        }

        let mut hits: Vec<SearchHit> = self
            .docs
            .iter()
            .map(|(id, doc)| SearchHit {
                id: id.clone(),
                score: cosine(&query_vector, &doc.vector),
            })
            .filter(|hit| hit.score > 0.0 && hit.score >= min_score)
            .collect();

        hits.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.id.cmp(&b.id)));
        hits.truncate(limit);
        hits
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.docs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }
}
