use crate::{LinkGraph, Ranks};
use algograph::graph::VertexId;
use std::collections::HashMap;

pub trait PageRank {
    type Result: PageRankResult;

    fn calc(&self) -> Self::Result;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;

    fn named(&self, graph: &LinkGraph) -> Ranks {
        graph.named(self.page_rank())
    }
}
