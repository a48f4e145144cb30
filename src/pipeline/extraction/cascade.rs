//! Generic "first plausible match wins" runner over an ordered list of patterns.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::models::{decimal_places, Measurement, VitalType};

static RE_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\.\d+)?").expect("Invalid number regex"));

/// How the numbers of a successful match are turned into a measurement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueReading {
    /// Capture group 1 (and 2, when the pattern has it) in the parameter's own unit.
    Captured,
    /// First number anywhere in the matched fragment. Metres when the fragment
    /// mentions `m` and the number is below 3, otherwise centimetres.
    MetresOrCentimetres,
}

/// Physiological range every captured number must fall in.
#[derive(Debug, Clone, PartialEq)]
pub struct Plausibility {
    pub primary: RangeInclusive<f64>,
    pub secondary: Option<RangeInclusive<f64>>,
}

impl Plausibility {
    pub fn single(primary: RangeInclusive<f64>) -> Self {
        Self {
            primary,
            secondary: None,
        }
    }

    pub fn pair(primary: RangeInclusive<f64>, secondary: RangeInclusive<f64>) -> Self {
        Self {
            primary,
            secondary: Some(secondary),
        }
    }

    pub fn admits(&self, m: &Measurement) -> bool {
        if !self.primary.contains(&m.value_primary) {
            return false;
        }
        match (&self.secondary, m.value_secondary) {
            (Some(range), Some(value)) => range.contains(&value),
            (None, None) => true,
            _ => false,
        }
    }
}

/// One match strategy of a cascade.
#[derive(Debug, Clone)]
pub struct Strategy {
    regex: Regex,
    groups: usize,
}

impl Strategy {
    pub fn new(pattern: &str) -> Result<Self, regex::Error> {
        let regex = Regex::new(pattern)?;
        let groups = regex.captures_len() - 1;
        Ok(Self { regex, groups })
    }

    /// Number of numeric capture groups (1, or 2 for paired readings).
    pub fn groups(&self) -> usize {
        self.groups
    }
}

/// Ordered extraction strategies for one parameter.
#[derive(Debug, Clone)]
pub struct Cascade {
    vital: VitalType,
    strategies: Vec<Strategy>,
    plausibility: Plausibility,
    reading: ValueReading,
}

impl Cascade {
    pub fn new(
        vital: VitalType,
        patterns: &[&str],
        plausibility: Plausibility,
        reading: ValueReading,
    ) -> Result<Self, regex::Error> {
        let strategies = patterns
            .iter()
            .map(|p| Strategy::new(p))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            vital,
            strategies,
            plausibility,
            reading,
        })
    }

    pub fn vital(&self) -> VitalType {
        self.vital
    }

    pub fn strategies(&self) -> &[Strategy] {
        &self.strategies
    }

    /// Try each strategy in order; the first match whose numbers are
    /// plausible wins and later strategies are never consulted.
    pub fn extract(&self, text: &str) -> Option<Measurement> {
        self.strategies
            .iter()
            .enumerate()
            .find_map(|(index, strategy)| self.try_strategy(index, strategy, text))
    }

    fn try_strategy(&self, index: usize, strategy: &Strategy, text: &str) -> Option<Measurement> {
        let caps = strategy.regex.captures(text)?;

        let Some(measurement) = self.read(strategy, &caps) else {
            tracing::debug!(
                vital = self.vital.as_str(),
                strategy = index,
                "Malformed capture, skipping"
            );
            return None;
        };

        if !self.plausibility.admits(&measurement) {
            tracing::debug!(
                vital = self.vital.as_str(),
                strategy = index,
                value = measurement.value_primary,
                "Match outside plausible range, trying next strategy"
            );
            return None;
        }

        tracing::debug!(vital = self.vital.as_str(), strategy = index, "Extracted");
        Some(measurement)
    }

    fn read(&self, strategy: &Strategy, caps: &Captures<'_>) -> Option<Measurement> {
        match self.reading {
            ValueReading::Captured => read_groups(strategy.groups, caps),
            ValueReading::MetresOrCentimetres => read_length(caps.get(0)?.as_str()),
        }
    }
}

fn read_groups(groups: usize, caps: &Captures<'_>) -> Option<Measurement> {
    let first = caps.get(1)?.as_str();
    let primary = first.parse::<f64>().ok()?;
    if groups >= 2 {
        let secondary = caps.get(2)?.as_str().parse::<f64>().ok()?;
        return Some(Measurement::pair(primary, secondary));
    }
    Some(Measurement::single(primary, decimal_places(first)))
}

fn read_length(fragment: &str) -> Option<Measurement> {
    let value = RE_NUMBER.find(fragment)?.as_str().parse::<f64>().ok()?;
    let cm = if fragment.contains('m') && value < 3.0 {
        (value * 100.0).round()
    } else {
        value.trunc()
    };
    Some(Measurement::single(cm, 0))
}
