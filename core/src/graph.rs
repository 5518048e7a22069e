//! Sentence similarity graph in compressed sparse row form.
//!
//! Node `i` is the `i`-th surviving sentence; `sentence(i)` maps it back to
//! its [`SentenceIndex`]. Edges are undirected cosine similarities, stored
//! once per direction, without self loops.

use crate::importance::WeightedSentence;
use crate::SentenceIndex;

#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    pub num_nodes: usize,
    /// Node i's edges are at `row_ptr[i]..row_ptr[i + 1]`.
    pub row_ptr: Vec<usize>,
    pub col_idx: Vec<u32>,
    pub weights: Vec<f64>,
    /// Sum of edge weights per node.
    pub total_weight: Vec<f64>,
    pub sentences: Vec<SentenceIndex>,
}

impl SimilarityGraph {
    /// Edges are created for similarities that are positive and at least
    /// `edge_threshold`.
    pub fn build(nodes: &[WeightedSentence], edge_threshold: f64) -> Self {
        let n = nodes.len();
        let mut adjacency: Vec<Vec<(u32, f64)>> = vec![Vec::new(); n];
        for i in 0..n {
            for j in (i + 1)..n {
                let sim = nodes[i].vector.cosine(&nodes[j].vector);
                if sim > 0.0 && sim >= edge_threshold {
                    adjacency[i].push((j as u32, sim));
                    adjacency[j].push((i as u32, sim));
                }
            }
        }

        let mut row_ptr = Vec::with_capacity(n + 1);
        let mut col_idx = Vec::new();
        let mut weights = Vec::new();
        let mut total_weight: Vec<f64> = Vec::with_capacity(n);
        row_ptr.push(0);
        for mut edges in adjacency {
            edges.sort_by_key(|(k, _)| *k);
            total_weight.push(edges.iter().map(|(_, w)| w).sum());
            for (target, weight) in edges {
                col_idx.push(target);
                weights.push(weight);
            }
            row_ptr.push(col_idx.len());
        }

        Self {
            num_nodes: n,
            row_ptr,
            col_idx,
            weights,
            total_weight,
            sentences: nodes.iter().map(|w| w.index).collect(),
        }
    }

    pub fn neighbors(&self, node: u32) -> impl Iterator<Item = (u32, f64)> + '_ {
        let start = self.row_ptr[node as usize];
        let end = self.row_ptr[node as usize + 1];
        (start..end).map(move |i| (self.col_idx[i], self.weights[i]))
    }

    pub fn node_total_weight(&self, node: u32) -> f64 {
        self.total_weight[node as usize]
    }

    pub fn sentence(&self, node: u32) -> SentenceIndex {
        self.sentences[node as usize]
    }

    pub fn is_empty(&self) -> bool {
        self.num_nodes == 0
    }

    /// Each undirected edge counts twice.
    pub fn num_edges(&self) -> usize {
        self.col_idx.len()
    }

    /// Nodes with no similarity to any other node. Their row of the
    /// transition matrix is uniform.
    pub fn isolated_nodes(&self) -> Vec<u32> {
        (0..self.num_nodes as u32).filter(|&n| self.total_weight[n as usize] == 0.0).collect()
    }
}

impl Default for SimilarityGraph {
    fn default() -> Self {
        Self {
            num_nodes: 0,
            row_ptr: vec![0],
            col_idx: Vec::new(),
            weights: Vec::new(),
            total_weight: Vec::new(),
            sentences: Vec::new(),
        }
    }
}
