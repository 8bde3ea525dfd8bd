use crate::LinkGraph;
use algograph::graph::VertexId;
use rand::Rng;

/// Where a random surfer goes next, over every page in page order.
#[derive(Debug, Clone)]
pub struct Distribution {
    probs: Vec<(VertexId, f64)>,
}

impl Distribution {
    pub fn get(&self, page: &VertexId) -> Option<f64> {
        self.probs.iter().find(|(v, _)| v == page).map(|(_, p)| *p)
    }

    pub fn iter(&self) -> impl Iterator<Item = (VertexId, f64)> + '_ {
        self.probs.iter().copied()
    }

    pub fn sum(&self) -> f64 {
        self.probs.iter().map(|(_, p)| p).sum()
    }

    /// First page whose running sum reaches `u`; the last page if rounding
    /// leaves `u` beyond the total.
    pub fn draw(&self, u: f64) -> VertexId {
        let mut acc = 0.0;
        for (v, p) in self.probs.iter() {
            acc += p;
            if u <= acc {
                return *v;
            }
        }
        self.probs.last().unwrap().0
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> VertexId {
        self.draw(rng.random::<f64>())
    }
}

/// A page without links jumps uniformly whatever the damping.
pub fn transition(graph: &LinkGraph, page: VertexId, damping: f64) -> Distribution {
    assert!(damping > 0.0 && damping < 1.0, "damping={damping}");
    assert!(!graph.is_empty(), "vertex size={}", graph.len());

    let n = graph.len() as f64;
    let k = graph.out_degree(page);
    let base = if k == 0 { 1.0 / n } else { (1.0 - damping) / n };
    let mut probs: Vec<_> = graph.pages().iter().map(|v| (*v, base)).collect();
    if k > 0 {
        let unit = damping / (k as f64);
        for v in graph.links(page) {
            probs[graph.position(v)].1 += unit;
        }
    }

    let p_sum: f64 = probs.iter().map(|(_, p)| p).sum();
    assert!((p_sum - 1.0).abs() < 1e-7, "p_sum={p_sum}");
    Distribution { probs }
}
