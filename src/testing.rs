use crate::LinkGraph;
use quickcheck::Arbitrary;
use std::collections::{BTreeMap, BTreeSet};

pub fn graph(links: &[(&str, &[&str])]) -> LinkGraph {
    LinkGraph::from_links(links.iter().map(|(page, targets)| (*page, targets.iter().copied())))
}

/// `{A: {B}, B: {A, C}, C: {A}}`
pub fn triangle() -> LinkGraph {
    graph(&[("A", &["B"]), ("B", &["A", "C"]), ("C", &["A"])])
}

/// Exact PageRank of [`triangle`] at damping 0.85.
pub const TRIANGLE_FIXED_POINT: [(&str, f64); 3] = [("A", 0.3974), ("B", 0.3878), ("C", 0.2148)];

#[derive(Debug, Clone)]
pub struct RandomCorpus {
    pub links: BTreeMap<String, BTreeSet<String>>,
}

impl RandomCorpus {
    pub fn graph(&self) -> LinkGraph {
        LinkGraph::from_links(self.links.clone())
    }
}

impl Arbitrary for RandomCorpus {
    fn arbitrary(g: &mut quickcheck::Gen) -> Self {
        const N: usize = 10;

        let n: usize = usize::arbitrary(g) % N + 1;
        let pages: Vec<String> = (0..n).map(|i| format!("{i}.html")).collect();
        let mut links: BTreeMap<String, BTreeSet<String>> = pages
            .iter()
            .map(|p| (p.clone(), BTreeSet::new()))
            .collect();
        for _ in 0..(2 * n) {
            let u = &pages[usize::arbitrary(g) % n];
            let v = &pages[usize::arbitrary(g) % n];
            links.get_mut(u).unwrap().insert(v.clone());
        }
        Self { links }
    }
}
