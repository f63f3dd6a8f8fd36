use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Inclusive time window an investigation covers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Coarse bucket for a time range, used by next-step suggestions when
/// recommending a wider window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimeRangeLabel {
    #[serde(rename = "15m")]
    M15,
    #[serde(rename = "1h")]
    H1,
    #[serde(rename = "6h")]
    H6,
    #[serde(rename = "24h")]
    H24,
}

impl TimeRangeLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRangeLabel::M15 => "15m",
            TimeRangeLabel::H1 => "1h",
            TimeRangeLabel::H6 => "6h",
            TimeRangeLabel::H24 => "24h",
        }
    }
}

impl TimeRange {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// The default investigation window: the last hour.
    pub fn last_hour() -> Self {
        let end = Utc::now();
        Self {
            start: end - Duration::hours(1),
            end,
        }
    }

    /// Bucket by duration: ≤20m → 15m, ≤90m → 1h, ≤400m → 6h, else 24h.
    pub fn label(&self) -> TimeRangeLabel {
        let minutes = (self.end - self.start).num_minutes();
        if minutes <= 20 {
            TimeRangeLabel::M15
        } else if minutes <= 90 {
            TimeRangeLabel::H1
        } else if minutes <= 400 {
            TimeRangeLabel::H6
        } else {
            TimeRangeLabel::H24
        }
    }
}

/// Confirmed scope of a single investigation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scope {
    pub question: String,
    pub service: Option<String>,
    pub env: Option<String>,
    pub time_range: TimeRange,
}

/// Strict filter applied to every evidence query before ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvidenceFilter {
    pub time_range: Option<TimeRange>,
    pub service: Option<String>,
    pub env: Option<String>,
    pub top_k: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_buckets() {
        let end = Utc::now();
        let range = |mins: i64| TimeRange::new(end - Duration::minutes(mins), end);
        assert_eq!(range(15).label(), TimeRangeLabel::M15);
        assert_eq!(range(60).label(), TimeRangeLabel::H1);
        assert_eq!(range(360).label(), TimeRangeLabel::H6);
        assert_eq!(range(1440).label(), TimeRangeLabel::H24);
    }
}
