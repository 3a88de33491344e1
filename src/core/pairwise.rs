// pairwise.rs - Pairwise iteration engine and symmetric relationship matrices

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Instant;

/// Below this many pairs no progress bar is drawn
const PROGRESS_MIN_PAIRS: usize = 10_000;

/// One value per unordered sample pair {i, j}, i < j (upper triangle, row-major)
#[derive(Debug, Clone, PartialEq)]
pub struct CondensedMatrix<T> {
    n: usize,
    values: Vec<T>,
}

/// Number of unordered pairs among `n` samples
pub fn pair_count(n: usize) -> usize {
    n * n.saturating_sub(1) / 2
}

impl<T> CondensedMatrix<T> {
    /// Evaluate `f` exactly once for every unordered pair.
    ///
    /// `f(i, j)` is always called with `i < j`; the result stands for both
    /// (i, j) and (j, i).
    pub fn compute<F>(n: usize, mut f: F) -> Self
    where
        F: FnMut(usize, usize) -> T,
    {
        let total = pair_count(n);
        let pb = pair_progress(total);
        let update_interval = std::cmp::max(1, total / 100);

        let mut values = Vec::with_capacity(total);
        for i in 0..n {
            for j in i + 1..n {
                values.push(f(i, j));
                if values.len() % update_interval == 0 {
                    pb.set_position(values.len() as u64);
                }
            }
        }
        pb.finish_and_clear();

        Self { n, values }
    }

    /// Number of samples on each side
    pub fn n(&self) -> usize {
        self.n
    }

    /// Number of stored pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[T] {
        &self.values
    }

    fn offset(&self, i: usize, j: usize) -> usize {
        let (i, j) = if i < j { (i, j) } else { (j, i) };
        i * self.n - i * (i + 1) / 2 + (j - i - 1)
    }

    /// Value for an off-diagonal pair, in either orientation
    pub fn get(&self, i: usize, j: usize) -> Option<&T> {
        if i == j || i >= self.n || j >= self.n {
            return None;
        }
        self.values.get(self.offset(i, j))
    }

    pub fn map<U, F>(&self, f: F) -> CondensedMatrix<U>
    where
        F: FnMut(&T) -> U,
    {
        CondensedMatrix {
            n: self.n,
            values: self.values.iter().map(f).collect(),
        }
    }
}

fn pair_progress(total: usize) -> ProgressBar {
    if total < PROGRESS_MIN_PAIRS {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new(total as u64);
    if let Ok(style) = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {per_sec} ETA: {eta}")
    {
        pb.set_style(style.progress_chars("#>-"));
    }
    pb
}

/// Indices of `samples` in ascending lexical order of identifier
pub fn lexical_order(samples: &[String]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..samples.len()).collect();
    order.sort_by(|&a, &b| samples[a].cmp(&samples[b]));
    order
}

/// Binary sample × sample relationship matrix.
///
/// Rows and columns share one lexically ordered identifier list. Each
/// unordered pair is stored once, so (i, j) and (j, i) cannot diverge, and
/// the diagonal is fixed at 1.
#[derive(Debug, Clone, PartialEq)]
pub struct RelationMatrix {
    samples: Vec<String>,
    related: CondensedMatrix<bool>,
}

impl RelationMatrix {
    /// Build a matrix by evaluating `related(a, b)` once per unordered pair.
    ///
    /// `a` and `b` index into the caller's `samples` slice, which may be in
    /// any order; the result is laid out in lexical order.
    pub fn build<F>(samples: &[String], mut related: F) -> Self
    where
        F: FnMut(usize, usize) -> bool,
    {
        let order = lexical_order(samples);
        let start = Instant::now();
        let cells = CondensedMatrix::compute(order.len(), |i, j| related(order[i], order[j]));
        log::debug!(
            "{} comparisons over {} samples in {:.3}s",
            cells.len(),
            order.len(),
            start.elapsed().as_secs_f64()
        );
        Self::from_ordered(order.iter().map(|&k| samples[k].clone()).collect(), cells)
    }

    /// Wrap pair calls already computed over lexically ordered samples
    pub fn from_ordered(samples: Vec<String>, related: CondensedMatrix<bool>) -> Self {
        debug_assert_eq!(samples.len(), related.n());
        debug_assert!(samples.windows(2).all(|w| w[0] <= w[1]));
        Self { samples, related }
    }

    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Cell value: 1 on the diagonal, otherwise the stored pair call
    pub fn get(&self, i: usize, j: usize) -> u8 {
        if i == j {
            return 1;
        }
        self.related.get(i, j).map(|&r| r as u8).unwrap_or(0)
    }

    /// Full row `i`, diagonal included
    pub fn row(&self, i: usize) -> impl Iterator<Item = u8> + '_ {
        (0..self.len()).map(move |j| self.get(i, j))
    }

    /// Number of unordered off-diagonal pairs called related
    pub fn related_pairs(&self) -> usize {
        self.related.values().iter().filter(|&&r| r).count()
    }
}
