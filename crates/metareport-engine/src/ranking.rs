//! Best/least selection over record sequences.
//!
//! Ties resolve positionally: the earliest record in storage order wins for
//! both the maximum and the minimum. Nothing is sorted, so the winner only
//! changes when values do.

use metareport_core::{Post, Rankings, Story};

/// Metric a ranking is taken over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankMetric {
    Reach,
    TotalEngagement,
}

/// Records that can be ranked.
pub trait Ranked {
    fn reach(&self) -> u64;
    fn total_engagement(&self) -> u64;
}

impl Ranked for Post {
    fn reach(&self) -> u64 {
        self.reach
    }

    fn total_engagement(&self) -> u64 {
        self.total_engagement
    }
}

impl Ranked for Story {
    fn reach(&self) -> u64 {
        self.reach
    }

    fn total_engagement(&self) -> u64 {
        self.total_engagement
    }
}

impl RankMetric {
    #[must_use]
    pub fn value<T: Ranked>(self, record: &T) -> u64 {
        match self {
            RankMetric::Reach => record.reach(),
            RankMetric::TotalEngagement => record.total_engagement(),
        }
    }
}

/// Maximal and minimal records of a sequence; both `None` when it is empty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extremes<'a, T> {
    pub max: Option<&'a T>,
    pub min: Option<&'a T>,
}

#[must_use]
pub fn rank_by<T: Ranked>(records: &[T], metric: RankMetric) -> Extremes<'_, T> {
    let mut max: Option<&T> = None;
    let mut min: Option<&T> = None;

    for record in records {
        let value = metric.value(record);
        // Strict comparisons keep the first occurrence on ties.
        if max.is_none_or(|m| value > metric.value(m)) {
            max = Some(record);
        }
        if min.is_none_or(|m| value < metric.value(m)) {
            min = Some(record);
        }
    }

    Extremes { max, min }
}

/// Full rankings block for a sequence, cloning the selected records.
#[must_use]
pub fn rankings<T: Ranked + Clone>(records: &[T]) -> Rankings<T> {
    let by_reach = rank_by(records, RankMetric::Reach);
    let by_engagement = rank_by(records, RankMetric::TotalEngagement);

    Rankings {
        best_reach: by_reach.max.cloned(),
        least_reach: by_reach.min.cloned(),
        best_engagement: by_engagement.max.cloned(),
        least_engagement: by_engagement.min.cloned(),
    }
}
