//! LexRank centrality over the sentence similarity graph.
//!
//! The transition matrix is the row-normalized similarity matrix, with
//! isolated sentences jumping uniformly to every node, mixed with a uniform
//! teleport: `P = d * S_norm + (1 - d) / N`. Scores come from power iteration
//! starting at `1 / N` and stop when the L1 change drops below the tolerance
//! or the iteration cap is hit.

use crate::config::RankingConfig;
use crate::error::SummarizeError;
use crate::graph::SimilarityGraph;
use crate::SentenceIndex;

#[derive(Debug, Clone)]
pub struct LexRank {
    pub damping: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
}

impl Default for LexRank {
    fn default() -> Self {
        Self::from_config(&RankingConfig::default())
    }
}

/// Centrality per graph node plus convergence diagnostics.
#[derive(Debug, Clone)]
pub struct RankResult {
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// L1 change of the last iteration.
    pub delta: f64,
    pub converged: bool,
}

impl RankResult {
    /// Scores keyed by sentence index, in node order.
    pub fn by_sentence(&self, graph: &SimilarityGraph) -> Vec<(SentenceIndex, f64)> {
        self.scores.iter().enumerate().map(|(node, &s)| (graph.sentence(node as u32), s)).collect()
    }
}

impl LexRank {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(cfg: &RankingConfig) -> Self {
        Self { damping: cfg.damping, max_iterations: cfg.max_iterations, tolerance: cfg.tolerance }
    }

    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Hitting the iteration cap is not an error: the current iterate is
    /// returned with `converged = false`.
    pub fn run(&self, graph: &SimilarityGraph) -> Result<RankResult, SummarizeError> {
        let n = graph.num_nodes;
        if n == 0 {
            return Err(SummarizeError::EmptyGraph);
        }
        if n == 1 {
            return Ok(RankResult { scores: vec![1.0], iterations: 0, delta: 0.0, converged: true });
        }

        let nf = n as f64;
        let mut scores = vec![1.0 / nf; n];
        let mut new_scores = vec![0.0; n];
        let isolated = graph.isolated_nodes();
        let teleport = (1.0 - self.damping) / nf;
        let mut iterations = 0;
        let mut delta = f64::MAX;

        while iterations < self.max_iterations && delta >= self.tolerance {
            iterations += 1;

            let isolated_mass: f64 = isolated.iter().map(|&i| scores[i as usize]).sum();
            new_scores.fill(teleport + self.damping * isolated_mass / nf);

            for (node, &score) in scores.iter().enumerate() {
                let total = graph.node_total_weight(node as u32);
                if total > 0.0 {
                    for (neighbor, weight) in graph.neighbors(node as u32) {
                        new_scores[neighbor as usize] += self.damping * score * weight / total;
                    }
                }
            }

            delta = scores.iter().zip(new_scores.iter()).map(|(old, new)| (old - new).abs()).sum();
            std::mem::swap(&mut scores, &mut new_scores);
        }

        let sum: f64 = scores.iter().sum();
        if sum > 0.0 {
            for score in &mut scores {
                *score /= sum;
            }
        }

        let converged = delta < self.tolerance;
        if !converged {
            tracing::warn!(iterations, delta, tolerance = self.tolerance, "lexrank did not converge, using last iterate");
        }
        tracing::debug!(nodes = n, edges = graph.num_edges(), iterations, delta, "lexrank");
        Ok(RankResult { scores, iterations, delta, converged })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::tests::node;

    fn triangle() -> SimilarityGraph {
        SimilarityGraph::build(&[node(0, &[(0, 1.0), (1, 1.0)]), node(1, &[(1, 1.0), (2, 1.0)]), node(2, &[(0, 1.0), (2, 1.0)])], 0.0)
    }

    fn star() -> SimilarityGraph {
        SimilarityGraph::build(
            &[node(0, &[(0, 1.0), (1, 1.0), (2, 1.0)]), node(1, &[(0, 1.0)]), node(2, &[(1, 1.0)]), node(3, &[(2, 1.0)])],
            0.0,
        )
    }

    /// Dense reference: explicit transition matrix and power iteration.
    fn dense_reference(graph: &SimilarityGraph, d: f64, iterations: usize) -> Vec<f64> {
        let n = graph.num_nodes;
        let mut sim = vec![vec![0.0; n]; n];
        for i in 0..n {
            for (j, w) in graph.neighbors(i as u32) {
                sim[i][j as usize] = w;
            }
        }
        let mut p = vec![vec![0.0; n]; n];
        for i in 0..n {
            let row: f64 = sim[i].iter().sum();
            for j in 0..n {
                let norm = if row > 0.0 { sim[i][j] / row } else { 1.0 / n as f64 };
                p[i][j] = d * norm + (1.0 - d) / n as f64;
            }
        }
        let mut s = vec![1.0 / n as f64; n];
        for _ in 0..iterations {
            s = (0..n).map(|j| (0..n).map(|i| s[i] * p[i][j]).sum()).collect();
        }
        s
    }

    #[test]
    fn symmetric_graph_has_equal_scores() {
        let result = LexRank::new().run(&triangle()).unwrap();
        assert!(result.converged);
        for score in &result.scores {
            assert!((score - 1.0 / 3.0).abs() < 1e-6);
        }
    }

    #[test]
    fn hub_scores_highest() {
        let result = LexRank::new().run(&star()).unwrap();
        assert!(result.converged);
        for &score in &result.scores[1..] {
            assert!(result.scores[0] > score);
        }
    }

    #[test]
    fn matches_dense_transition_matrix() {
        let mut nodes = vec![node(0, &[(0, 1.0), (1, 2.0)]), node(1, &[(1, 1.0), (2, 1.0)]), node(2, &[(2, 3.0), (0, 0.5)])];
        nodes.push(node(3, &[(9, 1.0)])); // isolated
        let graph = SimilarityGraph::build(&nodes, 0.0);
        let result = LexRank::new().with_tolerance(1e-12).with_max_iterations(500).run(&graph).unwrap();
        let reference = dense_reference(&graph, 0.85, 500);
        for (a, b) in result.scores.iter().zip(reference.iter()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn scores_sum_to_one() {
        let result = LexRank::new().run(&star()).unwrap();
        let sum: f64 = result.scores.iter().sum();
        assert!((sum - 1.0).abs() < 1e-9);
    }

    #[test]
    fn graph_without_edges_is_uniform() {
        let graph = SimilarityGraph::build(&[node(0, &[(0, 1.0)]), node(1, &[(1, 1.0)])], 0.0);
        let result = LexRank::new().run(&graph).unwrap();
        assert!((result.scores[0] - 0.5).abs() < 1e-12);
        assert!((result.scores[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn single_node_scores_one_without_iterating() {
        let graph = SimilarityGraph::build(&[node(5, &[(0, 1.0)])], 0.0);
        let result = LexRank::new().run(&graph).unwrap();
        assert_eq!(result.scores, vec![1.0]);
        assert_eq!(result.iterations, 0);
        assert_eq!(result.by_sentence(&graph), vec![(5, 1.0)]);
    }

    #[test]
    fn empty_graph_is_an_error() {
        let err = LexRank::new().run(&SimilarityGraph::default()).unwrap_err();
        assert_eq!(err, SummarizeError::EmptyGraph);
    }

    #[test]
    fn iteration_cap_returns_last_iterate() {
        let result = LexRank::new().with_max_iterations(1).with_tolerance(1e-300).run(&star()).unwrap();
        assert_eq!(result.iterations, 1);
        assert!(!result.converged);
        assert_eq!(result.scores.len(), 4);
        assert!(result.scores[0] > result.scores[1]);
    }

    #[test]
    fn higher_damping_sharpens_hub_advantage() {
        let low = LexRank::new().with_damping(0.5).run(&star()).unwrap();
        let high = LexRank::new().with_damping(0.95).run(&star()).unwrap();
        assert!(high.scores[0] - high.scores[1] > low.scores[0] - low.scores[1]);
    }
}
