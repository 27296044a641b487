use crate::error::{Result, VectorStoreError};
use std::collections::HashMap;

/// Cosine similarity in [-1, 1]; zero for empty, zero-norm or mismatched inputs
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
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

/// Brute-force vector index keyed by string id.
///
/// The dimension is fixed by the first vector added (or by `with_dimension`).
/// Adding an existing id replaces its vector in place.
#[derive(Debug, Default)]
pub struct FlatIndex {
    dimension: Option<usize>,
    ids: Vec<String>,
    vectors: Vec<Vec<f32>>,
    positions: HashMap<String, usize>,
}

impl FlatIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimension(dimension: usize) -> Self {
        Self {
            dimension: Some(dimension),
            ..Self::default()
        }
    }

    /// Add or replace the vector stored under `id`; returns its slot
    pub fn upsert(&mut self, id: &str, vector: &[f32]) -> Result<usize> {
        self.check_dimension(vector.len())?;
        self.dimension.get_or_insert(vector.len());

        if let Some(&slot) = self.positions.get(id) {
            self.vectors[slot] = vector.to_vec();
            return Ok(slot);
        }
        let slot = self.ids.len();
        self.ids.push(id.to_string());
        self.vectors.push(vector.to_vec());
        self.positions.insert(id.to_string(), slot);
        Ok(slot)
    }

    /// k nearest slots by cosine similarity, most similar first.
    /// Ties keep insertion order.
    pub fn search(&self, query: &[f32], k: usize) -> Result<Vec<(usize, f32)>> {
        self.check_dimension(query.len())?;

        let mut scores: Vec<(usize, f32)> = self
            .vectors
            .iter()
            .enumerate()
            .map(|(slot, vector)| (slot, cosine_similarity(query, vector)))
            .collect();

        scores.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scores.truncate(k);

        Ok(scores)
    }

    pub fn id(&self, slot: usize) -> Option<&str> {
        self.ids.get(slot).map(String::as_str)
    }

    pub const fn dimension(&self) -> Option<usize> {
        self.dimension
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Drop every vector; an explicitly configured dimension is kept
    pub fn clear(&mut self, keep_dimension: bool) {
        self.ids.clear();
        self.vectors.clear();
        self.positions.clear();
        if !keep_dimension {
            self.dimension = None;
        }
    }

    fn check_dimension(&self, actual: usize) -> Result<()> {
        match self.dimension {
            Some(expected) if expected != actual => {
                Err(VectorStoreError::InvalidDimension { expected, actual })
            }
            _ => Ok(()),
        }
    }
}
