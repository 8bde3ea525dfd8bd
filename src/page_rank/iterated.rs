use super::*;
use crate::*;
use algograph::graph::VertexId;
use std::collections::HashMap;
use tracing::{debug, info, warn};

/// Solves the PageRank recurrence by repeated in-place passes.
///
/// Pages are updated one at a time in page order, so a page sees the values
/// already refreshed earlier in the same pass. Pages without links feed no
/// other page.
pub struct IteratedPageRank<'a> {
    graph: &'a LinkGraph,
    damping: f64,
    epsilon: f64,
    max_passes: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub epsilon: f64,
    /// Stop after this many passes even if not converged. `None` never stops.
    pub max_passes: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            epsilon: EPSILON,
            max_passes: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    /// `raw` rescaled to sum to one. Pages without links leak rank, so on
    /// corpora that have them this differs from the unscaled recurrence.
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    /// Ranks as left by the last pass.
    pub raw: HashMap<VertexId, f64, ahash::RandomState>,
    /// Per-page change made by the last pass.
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub passes: usize,
    pub converged: bool,
}

impl<'a> IteratedPageRank<'a> {
    pub fn new(g: &'a LinkGraph, config: &Config) -> Self {
        let damping = config.damping;
        assert!(damping > 0.0 && damping < 1.0, "damping={damping}");
        let epsilon = config.epsilon;
        assert!(epsilon > 0.0, "epsilon={epsilon}");
        assert!(!g.is_empty(), "vertex size={}", g.len());
        Self {
            graph: g,
            damping,
            epsilon,
            max_passes: config.max_passes,
        }
    }

    /// Runs one in-place pass over `p` and returns how much each page moved.
    pub fn pass(
        &self,
        p: &mut HashMap<VertexId, f64, ahash::RandomState>,
    ) -> HashMap<VertexId, f64, ahash::RandomState> {
        let n = self.graph.len() as f64;
        let jump = (1.0 - self.damping) / n;
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        for v in self.graph.pages().iter() {
            let inflow: f64 = self
                .graph
                .linking(*v)
                .iter()
                .map(|u| p.get(u).unwrap() / self.graph.out_degree(*u) as f64)
                .sum();
            let r = jump + self.damping * inflow;
            let prev = p.insert(*v, r).unwrap();
            delta.insert(*v, r - prev);
        }
        delta
    }
}

impl PageRank for IteratedPageRank<'_> {
    type Result = self::Result;

    fn calc(&self) -> Self::Result {
        let n = self.graph.len() as f64;
        let mut p: HashMap<_, _, ahash::RandomState> =
            self.graph.pages().iter().map(|v| (*v, 1.0 / n)).collect();
        let mut passes = 0;
        let (delta, converged) = loop {
            let delta = self.pass(&mut p);
            passes += 1;
            let moved = norm_inf(&delta);
            debug!(passes, moved, "pass");
            if moved <= self.epsilon {
                break (delta, true);
            }
            if self.max_passes.is_some_and(|max| passes >= max) {
                warn!(passes, moved, epsilon = self.epsilon, "page rank did not converge");
                break (delta, false);
            }
        };

        let page_rank = normalized(&p);
        let p_sum = norm_1(&page_rank);
        assert!((p_sum - 1.0).abs() < 1e-7, "p_sum={p_sum}");
        info!(pages = self.graph.len(), passes, converged, "iterated page rank");
        Self::Result {
            page_rank,
            raw: p,
            delta,
            passes,
            converged,
        }
    }
}

impl PageRankResult for self::Result {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        ResultDebug {
            graph,
            result: self,
        }
    }
}

pub struct ResultDebug<'a> {
    graph: &'a LinkGraph,
    result: &'a self::Result,
}

impl std::fmt::Debug for ResultDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.pages().iter() {
            let p = self.result.page_rank.get(v).unwrap();
            let d = self.result.delta.get(v).unwrap();
            writeln!(f, "{}: {p:?}, {d:?}", self.graph.name(*v))?;
        }
        Ok(())
    }
}

pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> Ranks {
    let cfg = Config {
        damping,
        ..Config::default()
    };
    IteratedPageRank::new(graph, &cfg).calc().named(graph)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::*;
    use quickcheck_macros::quickcheck;

    #[test]
    fn triangle_fixed_point() {
        let g = crate::testing::triangle();
        let ranks = iterate_rank(&g, DAMPING);
        for (name, oracle) in TRIANGLE_FIXED_POINT {
            let p = ranks[name];
            assert!((p - oracle).abs() < 0.01, "{name}: {p} vs {oracle}");
        }
    }

    #[test]
    fn single_page() {
        let g = graph(&[("A", &[])]);
        let ranks = iterate_rank(&g, DAMPING);
        assert_eq!(ranks.len(), 1);
        assert!((ranks["A"] - 1.0).abs() < 1e-12, "{ranks:?}");
    }

    #[test]
    fn first_pass_updates_in_place() {
        // A is refreshed before B reads it.
        let g = graph(&[("A", &["B"]), ("B", &["A"])]);
        let a = g.vertex("A").unwrap();
        let b = g.vertex("B").unwrap();
        let cfg = Config::default();
        let solver = IteratedPageRank::new(&g, &cfg);
        let mut p: HashMap<_, _, ahash::RandomState> = [(a, 0.9), (b, 0.1)].into_iter().collect();
        let delta = solver.pass(&mut p);
        let a1 = 0.075 + 0.85 * 0.1;
        let b1 = 0.075 + 0.85 * a1;
        assert!((p[&a] - a1).abs() < 1e-12, "{p:?}");
        assert!((p[&b] - b1).abs() < 1e-12, "{p:?}");
        assert!((delta[&a] - (a1 - 0.9)).abs() < 1e-12, "{delta:?}");
    }

    #[test]
    fn converged_is_stable() {
        let g = crate::testing::triangle();
        let cfg = Config::default();
        let solver = IteratedPageRank::new(&g, &cfg);
        let result = solver.calc();
        assert!(result.converged);
        assert!(norm_inf(&result.delta) <= EPSILON);
        let mut p = result.raw.clone();
        let delta = solver.pass(&mut p);
        assert!(norm_inf(&delta) <= EPSILON, "{delta:?}");
    }

    #[test]
    fn dangling_pages_feed_nobody() {
        let g = graph(&[("A", &[]), ("B", &["A"])]);
        let a = g.vertex("A").unwrap();
        let b = g.vertex("B").unwrap();
        let cfg = Config::default();
        let result = IteratedPageRank::new(&g, &cfg).calc();
        let rb = 0.075;
        let ra = 0.075 + 0.85 * rb;
        assert!((result.raw[&b] - rb).abs() < 1e-12, "{:?}", result.raw);
        assert!((result.raw[&a] - ra).abs() < 1e-12, "{:?}", result.raw);
        let total = ra + rb;
        assert!((result.page_rank[&a] - ra / total).abs() < 1e-12);
        assert!((result.page_rank[&b] - rb / total).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "damping=0")]
    fn damping_must_be_above_zero() {
        let g = crate::testing::triangle();
        let cfg = Config {
            damping: 0.0,
            ..Config::default()
        };
        let _ = IteratedPageRank::new(&g, &cfg);
    }

    #[test]
    fn pass_cap() {
        let g = crate::testing::triangle();
        let cfg = Config {
            epsilon: 1e-300,
            max_passes: Some(3),
            ..Config::default()
        };
        let result = IteratedPageRank::new(&g, &cfg).calc();
        assert!(!result.converged);
        assert_eq!(result.passes, 3);
        let total = norm_1(&result.page_rank);
        assert!((total - 1.0).abs() < 1e-6);
        let dbg = format!("{:?}", result.debug(&g));
        assert_eq!(dbg.lines().count(), 3, "{dbg}");
    }

    #[test]
    fn agrees_with_sampling() {
        use rand::{rngs::SmallRng, SeedableRng};

        let g = graph(&[
            ("1.html", &["2.html"]),
            ("2.html", &["1.html", "3.html"]),
            ("3.html", &["2.html", "4.html"]),
            ("4.html", &["2.html"]),
        ]);
        let iterated = iterate_rank(&g, DAMPING);
        let sampled = sample_rank(&g, DAMPING, SAMPLES, SmallRng::seed_from_u64(3407));
        for (page, p) in iterated.iter() {
            let q = sampled[page];
            assert!((p - q).abs() < 0.02, "{page}: {p} vs {q}");
        }
    }

    #[quickcheck]
    fn is_a_distribution(corpus: RandomCorpus) {
        let g = corpus.graph();
        let cfg = Config::default();
        let result = IteratedPageRank::new(&g, &cfg).calc();
        assert!(result.converged);
        let ranks = result.named(&g);
        assert_eq!(ranks.len(), g.len());
        let total: f64 = ranks.values().sum();
        assert!((total - 1.0).abs() < 1e-6, "{ranks:?}");
        assert!(ranks.values().all(|p| (0.0..=1.0).contains(p)), "{ranks:?}");
    }
}
