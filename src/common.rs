use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};

/// Page name to rank, ordered by page name.
pub type Ranks = BTreeMap<String, f64>;

pub fn norm_1(v: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf(v: &HashMap<VertexId, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

/// Rescales a non-negative vector so its entries sum to one.
pub fn normalized(
    v: &HashMap<VertexId, f64, ahash::RandomState>,
) -> HashMap<VertexId, f64, ahash::RandomState> {
    let total = norm_1(v);
    assert!(total > 0.0, "total={total}");
    v.iter().map(|(vert, val)| (*vert, val / total)).collect()
}
