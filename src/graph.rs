use crate::Ranks;
use algograph::graph::*;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// A closed corpus of pages and the links between them.
///
/// Only in-corpus links survive construction and no page links to itself.
/// Pages are ordered by name, and every walk over the corpus (cumulative
/// draws, solver passes, reports) follows that order.
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    pages: Vec<VertexId>,
    names: Vec<String>,
    out_degrees: Vec<usize>,
    index: HashMap<VertexId, usize, ahash::RandomState>,
    vertices: HashMap<String, VertexId, ahash::RandomState>,
    linking: HashMap<VertexId, Vec<VertexId>, ahash::RandomState>,
}

impl LinkGraph {
    /// Repeated pages merge their links.
    pub fn from_links<I, P, L, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut links: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in corpus {
            links
                .entry(page.into())
                .or_default()
                .extend(targets.into_iter().map(Into::into));
        }

        let mut graph = directed::TreeBackedGraph::new();
        let names: Vec<String> = links.keys().cloned().collect();
        let pages: Vec<VertexId> = names.iter().map(|_| graph.add_vertex()).collect();
        let index: HashMap<VertexId, usize, ahash::RandomState> =
            pages.iter().enumerate().map(|(i, v)| (*v, i)).collect();
        let vertices: HashMap<String, VertexId, ahash::RandomState> = names
            .iter()
            .cloned()
            .zip(pages.iter().copied())
            .collect();

        let mut out_degrees = vec![0; pages.len()];
        for (i, (page, targets)) in links.iter().enumerate() {
            let u = pages[i];
            for target in targets.iter() {
                if target == page {
                    continue;
                }
                if let Some(v) = vertices.get(target) {
                    graph.add_edge(u, *v);
                    out_degrees[i] += 1;
                }
            }
        }

        let linking = pages
            .iter()
            .map(|v| {
                let mut sources: Vec<_> = graph.in_edges(v).map(|e| e.source).collect();
                sources.sort_by_key(|u| index[u]);
                (*v, sources)
            })
            .collect();

        Self {
            graph,
            pages,
            names,
            out_degrees,
            index,
            vertices,
            linking,
        }
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_size()
    }

    pub fn pages(&self) -> &[VertexId] {
        &self.pages
    }

    /// Position of `page` in [`LinkGraph::pages`].
    pub fn position(&self, page: VertexId) -> usize {
        self.index[&page]
    }

    pub fn name(&self, page: VertexId) -> &str {
        &self.names[self.position(page)]
    }

    pub fn vertex(&self, name: &str) -> Option<VertexId> {
        self.vertices.get(name).copied()
    }

    pub fn out_degree(&self, page: VertexId) -> usize {
        self.out_degrees[self.position(page)]
    }

    pub fn links(&self, page: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&page).map(|e| e.sink)
    }

    /// Pages linking to `page`, in page order.
    pub fn linking(&self, page: VertexId) -> &[VertexId] {
        &self.linking[&page]
    }

    pub fn named(&self, ranks: &HashMap<VertexId, f64, ahash::RandomState>) -> Ranks {
        ranks
            .iter()
            .map(|(v, r)| (self.name(*v).to_string(), *r))
            .collect()
    }
}

impl std::fmt::Debug for LinkGraph {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for u in self.pages.iter() {
            let links: BTreeSet<_> = self.links(*u).map(|v| self.name(v)).collect();
            map.entry(&self.name(*u), &links);
        }
        map.finish()
    }
}
