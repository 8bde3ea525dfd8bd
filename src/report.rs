use crate::Ranks;
use std::fmt;

/// A heading followed by one `name: rank` line per page, in name order.
pub struct Report<'a> {
    heading: String,
    ranks: &'a Ranks,
}

impl<'a> Report<'a> {
    pub fn new(heading: impl Into<String>, ranks: &'a Ranks) -> Self {
        Self {
            heading: heading.into(),
            ranks,
        }
    }

    pub fn sampling(samples: usize, ranks: &'a Ranks) -> Self {
        Self::new(format!("PageRank Results from Sampling (n = {samples})"), ranks)
    }

    pub fn iteration(ranks: &'a Ranks) -> Self {
        Self::new("PageRank Results from Iteration", ranks)
    }
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        for (page, rank) in self.ranks.iter() {
            writeln!(f, "  {page}: {rank:.4}")?;
        }
        Ok(())
    }
}
