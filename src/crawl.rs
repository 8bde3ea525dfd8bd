//! Builds a [`LinkGraph`] from a directory of HTML pages.

use crate::LinkGraph;
use regex::Regex;
use std::{
    collections::BTreeSet,
    fs,
    path::{Path, PathBuf},
    sync::LazyLock,
};
use tracing::{debug, info};

static HREF: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap());

#[derive(Debug, thiserror::Error)]
pub enum CrawlError {
    #[error("failed to read corpus directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read page {}", .path.display())]
    ReadPage {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no .html pages in {}", .0.display())]
    EmptyCorpus(PathBuf),
}

/// Targets of every `<a href="...">` in `html`.
pub fn parse_links(html: &str) -> BTreeSet<String> {
    HREF.captures_iter(html)
        .map(|c| c[1].to_string())
        .collect()
}

/// Reads every `*.html` file directly under `dir` as one page named by its
/// file name.
///
/// Links leaving the corpus and links of a page to itself are dropped.
pub fn crawl(dir: impl AsRef<Path>) -> Result<LinkGraph, CrawlError> {
    let dir = dir.as_ref();
    let read_dir = |source| CrawlError::ReadDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut pages = Vec::new();
    for entry in fs::read_dir(dir).map_err(read_dir)? {
        let entry = entry.map_err(read_dir)?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !name.ends_with(".html") || !entry.file_type().map_err(read_dir)?.is_file() {
            continue;
        }
        let path = entry.path();
        let html = fs::read_to_string(&path)
            .map_err(|source| CrawlError::ReadPage { path, source })?;
        let links = parse_links(&html);
        debug!(page = %name, links = links.len(), "parsed page");
        pages.push((name, links));
    }
    if pages.is_empty() {
        return Err(CrawlError::EmptyCorpus(dir.to_path_buf()));
    }

    let graph = LinkGraph::from_links(pages);
    info!(
        corpus = %dir.display(),
        pages = graph.len(),
        links = graph.edge_count(),
        "crawled corpus"
    );
    Ok(graph)
}
