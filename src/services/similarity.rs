use std::collections::HashMap;
use std::time::Instant;

use super::matrix::{ItemIndex, UserItemMatrix};
use crate::models::MovieId;

/// Item-by-item cosine similarity, indexed like the matrix columns
///
/// Only the upper triangle is stored: `get(a, b)` and `get(b, a)` read the
/// same cell, so the table is symmetric by construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityTable {
    n_items: usize,
    packed: Vec<f64>,
    items: Vec<MovieId>,
    positions: HashMap<MovieId, ItemIndex>,
}

impl SimilarityTable {
    /// Computes cosine similarity between every pair of matrix columns
    ///
    /// Each column is scaled to unit length first, then every user row adds
    /// the products of its nonzero cells to the pairs they belong to. Columns
    /// with zero norm stay all-zero, including on the diagonal.
    pub fn from_matrix(matrix: &UserItemMatrix) -> Self {
        let start = Instant::now();
        let n_items = matrix.n_items();
        let mut packed = vec![0.0; n_items * (n_items + 1) / 2];

        let mut norms = vec![0.0_f64; n_items];
        for row in matrix.rows() {
            for (norm, value) in norms.iter_mut().zip(row) {
                *norm += value * value;
            }
        }
        for norm in norms.iter_mut() {
            *norm = norm.sqrt();
        }

        let mut nonzero: Vec<(usize, f64)> = Vec::new();
        for row in matrix.rows() {
            nonzero.clear();
            nonzero.extend(
                row.iter()
                    .enumerate()
                    .filter(|(_, value)| **value != 0.0)
                    .map(|(col, value)| (col, value / norms[col])),
            );

            for (a, &(i, x)) in nonzero.iter().enumerate() {
                let offset = row_offset(n_items, i);
                for &(j, y) in &nonzero[a..] {
                    packed[offset + (j - i)] += x * y;
                }
            }
        }

        for (i, norm) in norms.iter().enumerate() {
            packed[row_offset(n_items, i)] = if *norm > 0.0 { 1.0 } else { 0.0 };
        }

        tracing::debug!(
            items = n_items,
            users = matrix.n_users(),
            elapsed_ms = start.elapsed().as_millis(),
            "Computed item similarity table"
        );

        let items = matrix.movie_ids().to_vec();
        let positions = items
            .iter()
            .enumerate()
            .map(|(i, id)| (*id, ItemIndex(i)))
            .collect();

        Self {
            n_items,
            packed,
            items,
            positions,
        }
    }

    /// Number of items on each axis
    pub fn len(&self) -> usize {
        self.n_items
    }

    pub fn is_empty(&self) -> bool {
        self.n_items == 0
    }

    pub fn item_index(&self, movie_id: MovieId) -> Option<ItemIndex> {
        self.positions.get(&movie_id).copied()
    }

    pub fn movie_id(&self, index: ItemIndex) -> MovieId {
        self.items[index.0]
    }

    /// Axis labels, shared with the matrix columns
    pub fn movie_ids(&self) -> &[MovieId] {
        &self.items
    }

    pub fn get(&self, a: ItemIndex, b: ItemIndex) -> f64 {
        let (i, j) = if a.0 <= b.0 { (a.0, b.0) } else { (b.0, a.0) };
        self.packed[row_offset(self.n_items, i) + (j - i)]
    }

    /// Similarity of `item` to every item, the item itself included
    pub fn row(&self, item: ItemIndex) -> impl Iterator<Item = (ItemIndex, f64)> + '_ {
        (0..self.n_items).map(move |other| (ItemIndex(other), self.get(item, ItemIndex(other))))
    }
}

/// Start of row `i` in the packed upper triangle of an `n`-by-`n` matrix
fn row_offset(n: usize, i: usize) -> usize {
    i * (2 * n - i + 1) / 2
}

/// Cosine of the angle between two vectors, 0.0 if either is all zeros
pub fn cosine_similarity(a: &[f64], b: &[f64]) -> f64 {
    let dot: f64 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a = a.iter().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.iter().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    dot / (norm_a * norm_b)
}
