use std::{collections::VecDeque, ops::RangeInclusive};

use chrono::{DateTime, Utc};
use rand::Rng;
use shared::protocol::{MetricsSnapshot, SystemHealth};

pub const SERIES_LEN: usize = 10;

/// Sample ranges used when every series is regenerated.
pub const REFRESH_RANGES: MetricRanges = MetricRanges {
    cpu: 10..=90,
    memory: 20..=80,
    disk: 30..=70,
    network: 5..=60,
};

/// Sample ranges for the single value appended on each tick.
pub const TICK_RANGES: MetricRanges = MetricRanges {
    cpu: 30..=59,
    memory: 40..=59,
    disk: 40..=49,
    network: 10..=49,
};

#[derive(Debug, Clone)]
pub struct MetricRanges {
    pub cpu: RangeInclusive<u8>,
    pub memory: RangeInclusive<u8>,
    pub disk: RangeInclusive<u8>,
    pub network: RangeInclusive<u8>,
}

/// Fixed-length window of percentage samples, oldest first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetricSeries {
    samples: VecDeque<u8>,
}

impl MetricSeries {
    pub fn generate(rng: &mut impl Rng, range: RangeInclusive<u8>) -> Self {
        Self {
            samples: (0..SERIES_LEN)
                .map(|_| rng.gen_range(range.clone()))
                .collect(),
        }
    }

    pub fn from_samples(samples: impl IntoIterator<Item = u8>) -> Self {
        let mut series = Self {
            samples: VecDeque::with_capacity(SERIES_LEN),
        };
        for sample in samples {
            series.push(sample);
        }
        series
    }

    pub fn push(&mut self, sample: u8) {
        if self.samples.len() == SERIES_LEN {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    /// Newest sample, 0 when empty.
    pub fn current(&self) -> u8 {
        self.samples.back().copied().unwrap_or_default()
    }

    pub fn samples(&self) -> Vec<u8> {
        self.samples.iter().copied().collect()
    }
}

#[derive(Debug, Clone)]
pub struct Monitoring {
    cpu: MetricSeries,
    memory: MetricSeries,
    disk: MetricSeries,
    network: MetricSeries,
    last_updated: DateTime<Utc>,
}

impl Monitoring {
    pub fn new(rng: &mut impl Rng, now: DateTime<Utc>) -> Self {
        let ranges = REFRESH_RANGES;
        Self {
            cpu: MetricSeries::generate(rng, ranges.cpu),
            memory: MetricSeries::generate(rng, ranges.memory),
            disk: MetricSeries::generate(rng, ranges.disk),
            network: MetricSeries::generate(rng, ranges.network),
            last_updated: now,
        }
    }

    pub fn from_series(
        cpu: MetricSeries,
        memory: MetricSeries,
        disk: MetricSeries,
        network: MetricSeries,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            cpu,
            memory,
            disk,
            network,
            last_updated: now,
        }
    }

    pub fn tick(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) {
        let ranges = TICK_RANGES;
        self.cpu.push(rng.gen_range(ranges.cpu));
        self.memory.push(rng.gen_range(ranges.memory));
        self.disk.push(rng.gen_range(ranges.disk));
        self.network.push(rng.gen_range(ranges.network));
        self.last_updated = now;
    }

    pub fn refresh(&mut self, rng: &mut impl Rng, now: DateTime<Utc>) {
        *self = Self::new(rng, now);
    }

    pub fn health(&self) -> SystemHealth {
        health_for(self.cpu.current(), self.memory.current())
    }

    pub fn last_updated(&self) -> DateTime<Utc> {
        self.last_updated
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            cpu: self.cpu.samples(),
            memory: self.memory.samples(),
            disk: self.disk.samples(),
            network: self.network.samples(),
            health: self.health(),
            last_updated: self.last_updated,
        }
    }
}

pub fn health_for(cpu: u8, memory: u8) -> SystemHealth {
    if cpu > 80 || memory > 85 {
        SystemHealth::Critical
    } else if cpu > 60 || memory > 70 {
        SystemHealth::Warning
    } else {
        SystemHealth::Healthy
    }
}

#[cfg(test)]
#[path = "tests/monitoring_tests.rs"]
mod tests;
