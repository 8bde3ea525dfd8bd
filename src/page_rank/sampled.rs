use super::*;
use crate::*;
use algograph::graph::VertexId;
use rand::Rng;
use std::{cell::RefCell, collections::HashMap};
use tracing::{debug, info};

/// Estimates PageRank by counting where a long random walk lands.
pub struct SampledPageRank<'a, R>
where
    R: Rng,
{
    graph: &'a LinkGraph,
    damping: f64,
    samples: usize,
    rng: RefCell<R>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            samples: SAMPLES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Result {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

impl<'a, R: Rng> SampledPageRank<'a, R> {
    pub fn new(g: &'a LinkGraph, config: &Config, rng: R) -> Self {
        let damping = config.damping;
        assert!(damping > 0.0 && damping < 1.0, "damping={damping}");
        let samples = config.samples;
        assert!(samples > 0, "samples={samples}");
        assert!(!g.is_empty(), "vertex size={}", g.len());
        Self {
            graph: g,
            damping,
            samples,
            rng: RefCell::new(rng),
        }
    }
}

impl<R: Rng> PageRank for SampledPageRank<'_, R> {
    type Result = self::Result;

    fn calc(&self) -> Self::Result {
        let pages = self.graph.pages();
        let mut rng = self.rng.borrow_mut();
        let mut visits: HashMap<_, _, ahash::RandomState> =
            pages.iter().map(|v| (*v, 0usize)).collect();

        let mut page = pages[rng.random_range(0..pages.len())];
        debug!(start = self.graph.name(page), samples = self.samples, "random walk");
        for _ in 0..self.samples {
            let next = transition(self.graph, page, self.damping);
            page = next.sample(&mut *rng);
            *visits.get_mut(&page).unwrap() += 1;
        }

        let n = self.samples as f64;
        let page_rank: HashMap<_, _, ahash::RandomState> = visits
            .iter()
            .map(|(v, count)| (*v, *count as f64 / n))
            .collect();
        let p_sum = norm_1(&page_rank);
        assert!((p_sum - 1.0).abs() < 1e-7, "p_sum={p_sum}");
        info!(
            pages = pages.len(),
            samples = self.samples,
            "sampled page rank"
        );
        Self::Result { page_rank, visits }
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
            let c = self.result.visits.get(v).unwrap();
            writeln!(f, "{}: {p:?}, {c}", self.graph.name(*v))?;
        }
        Ok(())
    }
}

pub fn sample_rank<R: Rng>(graph: &LinkGraph, damping: f64, samples: usize, rng: R) -> Ranks {
    let cfg = Config { damping, samples };
    SampledPageRank::new(graph, &cfg, rng).calc().named(graph)
}
