//! Weather statistics over a time window.
//!
//! Provides the window derivation used when decorating timeline events,
//! aggregate temperature statistics with one-decimal rounding, data-coverage
//! classification, daily trend aggregation, and unit conversion.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{Duration, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::timeline::{TimelineEvent, TimelineEventKind};
use crate::types::{CalendarDate, Timestamp};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Half-width of the window queried for a home period, in days.
pub const HOME_WINDOW_DAYS: i64 = 3;

/// Number of days covered by the dashboard temperature trend.
pub const TREND_DAYS: i64 = 7;

/// Maximum number of conditions reported in `most_common_conditions`.
pub const MAX_COMMON_CONDITIONS: usize = 3;

// ---------------------------------------------------------------------------
// Windows
// ---------------------------------------------------------------------------

/// A closed time range `[start, end]` in UTC wall-clock time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl StatsWindow {
    /// Build a window, rejecting one whose end precedes its start.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Result<Self, CoreError> {
        if end < start {
            return Err(CoreError::Validation(format!(
                "end_date {end} is before start_date {start}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Window spanning whole calendar days, `00:00:00` of `first` through
    /// `23:59:59` of `last`.
    pub fn full_days(first: CalendarDate, last: CalendarDate) -> Self {
        Self {
            start: first.and_time(NaiveTime::MIN),
            end: last.and_time(end_of_day()),
        }
    }

    pub fn start_utc(&self) -> Timestamp {
        self.start.and_utc()
    }

    pub fn end_utc(&self) -> Timestamp {
        self.end.and_utc()
    }

    /// Calendar days that need data for the window to count as covered.
    ///
    /// A window ending exactly at midnight after its start day only touches
    /// that last day at one instant, so the day is not counted.
    pub fn calendar_days(&self) -> i64 {
        (self.last_counted_day() - self.start.date()).num_days() + 1
    }

    fn last_counted_day(&self) -> CalendarDate {
        let last = self.end.date();
        if self.end.time() == NaiveTime::MIN && last > self.start.date() {
            last - Duration::days(1)
        } else {
            last
        }
    }
}

fn end_of_day() -> NaiveTime {
    NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN)
}

/// Window used to fetch weather for a timeline event.
///
/// Home periods use a fixed ±3-day window around their start date. Visits
/// use their own date range; a single-day visit is widened to the whole day.
pub fn event_window(event: &TimelineEvent) -> StatsWindow {
    match event.kind {
        TimelineEventKind::Home => {
            let around = event.start_date;
            StatsWindow::full_days(
                around - Duration::days(HOME_WINDOW_DAYS),
                around + Duration::days(HOME_WINDOW_DAYS),
            )
        }
        TimelineEventKind::Visit if event.start_date == event.end_date => {
            StatsWindow::full_days(event.start_date, event.end_date)
        }
        TimelineEventKind::Visit => StatsWindow {
            start: event.start_date.and_time(NaiveTime::MIN),
            end: event.end_date.and_time(NaiveTime::MIN),
        },
    }
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// How much real weather data backs a period's statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataCoverage {
    /// Every calendar day of the window has at least one record.
    Complete,
    /// Some days of the window have records.
    Partial,
    /// No records in the window; statistics come from the location's history.
    Fallback,
}

/// A single temperature observation used for aggregation.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherSample {
    pub recorded_at: Timestamp,
    /// Degrees Celsius.
    pub temperature: f64,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConditionCount {
    pub description: String,
    pub count: usize,
}

/// Aggregate temperature statistics for a period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodStats {
    pub average_temp: f64,
    pub high_temp: f64,
    pub low_temp: f64,
    pub record_count: usize,
    pub data_coverage: DataCoverage,
    pub most_common_conditions: Vec<ConditionCount>,
}

impl PeriodStats {
    /// Aggregate `samples`. Returns `None` when there are no samples.
    pub fn from_samples(samples: &[WeatherSample], data_coverage: DataCoverage) -> Option<Self> {
        if samples.is_empty() {
            return None;
        }

        let temps = samples.iter().map(|s| s.temperature);
        let sum: f64 = temps.clone().sum();
        let high = temps.clone().fold(f64::MIN, f64::max);
        let low = temps.fold(f64::MAX, f64::min);

        Some(Self {
            average_temp: round1(sum / samples.len() as f64),
            high_temp: round1(high),
            low_temp: round1(low),
            record_count: samples.len(),
            data_coverage,
            most_common_conditions: most_common_conditions(samples),
        })
    }

    /// Convert the temperature fields into `unit`.
    pub fn in_unit(mut self, unit: TemperatureUnit) -> Self {
        self.average_temp = round1(unit.from_celsius(self.average_temp));
        self.high_temp = round1(unit.from_celsius(self.high_temp));
        self.low_temp = round1(unit.from_celsius(self.low_temp));
        self
    }
}

/// Classify how well `samples` cover `window`, by distinct calendar days.
///
/// An empty sample set inside the window is a fallback situation: the caller
/// is expected to aggregate over the location's full history instead.
pub fn classify_coverage(window: &StatsWindow, samples: &[WeatherSample]) -> DataCoverage {
    let in_window = samples.iter().filter(|s| {
        let at = s.recorded_at.naive_utc();
        at >= window.start && at <= window.end
    });

    let mut any = false;
    let mut days = BTreeSet::new();
    for sample in in_window {
        any = true;
        let day = sample.recorded_at.date_naive();
        if day <= window.last_counted_day() {
            days.insert(day);
        }
    }

    if !any {
        DataCoverage::Fallback
    } else if days.len() as i64 >= window.calendar_days() {
        DataCoverage::Complete
    } else {
        DataCoverage::Partial
    }
}

/// Up to three most frequent descriptions, most frequent first.
/// Ties are broken alphabetically so output is stable.
fn most_common_conditions(samples: &[WeatherSample]) -> Vec<ConditionCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for desc in samples.iter().filter_map(|s| s.description.as_deref()) {
        *counts.entry(desc).or_default() += 1;
    }

    let mut ranked: Vec<ConditionCount> = counts
        .into_iter()
        .map(|(description, count)| ConditionCount {
            description: description.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.description.cmp(&b.description)));
    ranked.truncate(MAX_COMMON_CONDITIONS);
    ranked
}

/// Round to one decimal place.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

// ---------------------------------------------------------------------------
// Daily trend
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyTemperature {
    pub date: CalendarDate,
    pub average_temp: f64,
}

/// Average temperature per calendar day, oldest day first.
pub fn daily_averages(samples: &[WeatherSample]) -> Vec<DailyTemperature> {
    let mut by_day: BTreeMap<CalendarDate, (f64, usize)> = BTreeMap::new();
    for sample in samples {
        let entry = by_day.entry(sample.recorded_at.date_naive()).or_default();
        entry.0 += sample.temperature;
        entry.1 += 1;
    }

    by_day
        .into_iter()
        .map(|(date, (sum, n))| DailyTemperature {
            date,
            average_temp: round1(sum / n as f64),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Units
// ---------------------------------------------------------------------------

/// Display unit for temperatures. Values are stored in Celsius.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn from_celsius(self, celsius: f64) -> f64 {
        match self {
            Self::Celsius => celsius,
            Self::Fahrenheit => celsius * 9.0 / 5.0 + 32.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
