use serde::{Deserialize, Serialize};

/// Nearest neighbours of a query, closest first.
///
/// The three vectors are parallel: `ids[i]`, `documents[i]` and
/// `distances[i]` describe the same hit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueryResult {
    pub ids: Vec<String>,
    pub documents: Vec<String>,
    pub distances: Vec<f32>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Iterate `(id, document, distance)` triples
    pub fn hits(&self) -> impl Iterator<Item = (&str, &str, f32)> {
        self.ids
            .iter()
            .zip(&self.documents)
            .zip(&self.distances)
            .map(|((id, doc), distance)| (id.as_str(), doc.as_str(), *distance))
    }
}
