mod common;
pub use self::common::*;
pub mod crawl;
pub use self::crawl::{crawl, parse_links, CrawlError};
pub mod graph;
pub use self::graph::LinkGraph;
pub mod page_rank;
pub mod report;
pub use self::report::Report;

#[cfg(test)]
mod testing;
