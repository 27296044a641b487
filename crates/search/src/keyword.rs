use std::collections::{HashMap, HashSet};

/// Relative term frequency: occurrences / total tokens
pub fn term_frequencies(tokens: &[String]) -> HashMap<&str, f32> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for token in tokens {
        *counts.entry(token.as_str()).or_insert(0) += 1;
    }
    let total = tokens.len().max(1) as f32;
    counts
        .into_iter()
        .map(|(token, count)| (token, count as f32 / total))
        .collect()
}

/// Smoothed inverse document frequency over a candidate corpus.
///
/// `idf(t) = ln((N + 1) / (df(t) + 1)) + 1`, always positive for terms that
/// occur in the corpus. Terms never seen weigh zero.
#[derive(Debug, Clone, Default)]
pub struct InverseDocumentFrequency {
    weights: HashMap<String, f32>,
    documents: usize,
}

impl InverseDocumentFrequency {
    pub fn from_corpus(corpus: &[Vec<String>]) -> Self {
        let mut df: HashMap<&str, usize> = HashMap::new();
        for tokens in corpus {
            let unique: HashSet<&str> = tokens.iter().map(String::as_str).collect();
            for token in unique {
                *df.entry(token).or_insert(0) += 1;
            }
        }

        let n = corpus.len() as f32;
        let weights = df
            .into_iter()
            .map(|(token, freq)| {
                let idf = ((n + 1.0) / (freq as f32 + 1.0)).ln() + 1.0;
                (token.to_string(), idf)
            })
            .collect();

        Self {
            weights,
            documents: corpus.len(),
        }
    }

    pub fn weight(&self, token: &str) -> f32 {
        self.weights.get(token).copied().unwrap_or(0.0)
    }

    pub const fn documents(&self) -> usize {
        self.documents
    }
}

/// Σ over query tokens of tf(token, document) × idf(token)
pub fn keyword_score(
    query_tokens: &[String],
    document_tokens: &[String],
    idf: &InverseDocumentFrequency,
) -> f32 {
    if query_tokens.is_empty() {
        return 0.0;
    }
    let tf = term_frequencies(document_tokens);
    query_tokens
        .iter()
        .map(|token| tf.get(token.as_str()).copied().unwrap_or(0.0) * idf.weight(token))
        .sum()
}
