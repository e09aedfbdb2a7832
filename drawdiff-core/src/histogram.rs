use crate::difficulty::DifficultyTable;
use drawdiff_common::RegionRecord;
use serde::{Deserialize, Serialize};

/// Half-width given to a histogram whose scores are all identical.
pub const DEGENERATE_HALF_WIDTH: f64 = 0.5;

/// A record as it sits inside a bin: the looked-up score travels with the
/// record's own count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinMember {
    pub code: String,
    pub difficulty: f64,
    pub count: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bin {
    pub x0: f64,
    pub x1: f64,
    pub members: Vec<BinMember>,
}

impl Bin {
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.members.iter().map(|m| m.difficulty)
    }

    pub fn total_count(&self) -> f64 {
        self.members.iter().map(|m| m.count).sum()
    }

    /// `None` for an empty bin.
    pub fn mean_count(&self) -> Option<f64> {
        if self.members.is_empty() {
            return None;
        }
        Some(self.total_count() / self.members.len() as f64)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    pub domain: (f64, f64),
    pub bins: Vec<Bin>,
}

impl Histogram {
    pub fn max_len(&self) -> usize {
        self.bins.iter().map(Bin::len).max().unwrap_or(0)
    }

    pub fn total_members(&self) -> usize {
        self.bins.iter().map(Bin::len).sum()
    }

    /// All scores identical, so the single bin was widened around them.
    pub fn is_degenerate(&self) -> bool {
        match self.bins.as_slice() {
            [only] => {
                let mut values = only.values();
                match values.next() {
                    Some(first) => values.all(|v| v == first),
                    None => false,
                }
            }
            _ => false,
        }
    }

    /// Index of the bin a score falls in, using the same boundary rule as
    /// [`bin_records`]. `None` outside the domain.
    pub fn bin_for(&self, value: f64) -> Option<usize> {
        let last = self.bins.len().checked_sub(1)?;
        self.bins
            .iter()
            .enumerate()
            .position(|(i, b)| value >= b.x0 && (value < b.x1 || (i == last && value <= b.x1)))
    }
}

/// Interior boundaries splitting `[min, max]` into `bins` equal-width bins.
pub fn thresholds(min: f64, max: f64, bins: usize) -> Vec<f64> {
    let bins = bins.max(1);
    let width = (max - min) / bins as f64;
    (1..bins).map(|i| min + i as f64 * width).collect()
}

pub fn bin_records(records: &[RegionRecord], table: &DifficultyTable, bins: usize) -> Histogram {
    let bins = bins.max(1);
    let members: Vec<BinMember> = records
        .iter()
        .map(|r| BinMember { code: r.code.clone(), difficulty: table.lookup(&r.code), count: r.count })
        .collect();
    if members.is_empty() {
        return Histogram { domain: (0.0, 1.0), bins: Vec::new() };
    }
    let min = members.iter().map(|m| m.difficulty).fold(f64::INFINITY, f64::min);
    let max = members.iter().map(|m| m.difficulty).fold(f64::NEG_INFINITY, f64::max);
    if max - min <= 0.0 {
        let (x0, x1) = (min - DEGENERATE_HALF_WIDTH, max + DEGENERATE_HALF_WIDTH);
        return Histogram { domain: (x0, x1), bins: vec![Bin { x0, x1, members }] };
    }

    let cuts = thresholds(min, max, bins);
    let mut out: Vec<Bin> = (0..bins)
        .map(|i| Bin {
            x0: if i == 0 { min } else { cuts[i - 1] },
            x1: if i + 1 == bins { max } else { cuts[i] },
            members: Vec::new(),
        })
        .collect();
    for m in members {
        // count of boundaries at or below the score; the top score stays in the last bin
        let idx = cuts.partition_point(|&t| t <= m.difficulty).min(bins - 1);
        out[idx].members.push(m);
    }
    Histogram { domain: (min, max), bins: out }
}
