use crate::core::data::resolution::Resolution;
use chrono::{DateTime, Local, TimeDelta};
use std::error::Error;
use std::fmt;
use std::time::Instant;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CalculationInformationError {
    AlreadyStarted,
    NotStarted,
    AlreadyComputed,
    NotComputed,
    AlreadyFinished,
}

impl fmt::Display for CalculationInformationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlreadyStarted => write!(f, "calculation was already started"),
            Self::NotStarted => write!(f, "calculation has not been started"),
            Self::AlreadyComputed => write!(f, "calculation was already marked as computed"),
            Self::NotComputed => write!(f, "calculation has not been marked as computed"),
            Self::AlreadyFinished => write!(f, "calculation record is already finished"),
        }
    }
}

impl Error for CalculationInformationError {}

/// Timing record of one render unit.
///
/// Timestamps advance `start -> computed -> end` and each can be set once.
/// Later timestamps are derived from a monotonic clock anchored at `start`,
/// so `start <= computed <= end` holds even if the wall clock is adjusted
/// mid-render. The record is read-only once finished.
#[derive(Debug, Clone)]
pub struct CalculationInformation {
    resolution: Resolution,
    method: String,
    anchor: Option<Instant>,
    start_time: Option<DateTime<Local>>,
    computed_time: Option<DateTime<Local>>,
    end_time: Option<DateTime<Local>>,
}

impl CalculationInformation {
    #[must_use]
    pub fn new(resolution: Resolution, method: impl Into<String>) -> Self {
        Self {
            resolution,
            method: method.into(),
            anchor: None,
            start_time: None,
            computed_time: None,
            end_time: None,
        }
    }

    /// Shorthand for `new` followed by `start`.
    #[must_use]
    pub fn started(resolution: Resolution, method: impl Into<String>) -> Self {
        let mut info = Self::new(resolution, method);
        info.anchor = Some(Instant::now());
        info.start_time = Some(Local::now());
        info
    }

    pub fn start(&mut self) -> Result<(), CalculationInformationError> {
        if self.start_time.is_some() {
            return Err(CalculationInformationError::AlreadyStarted);
        }

        self.anchor = Some(Instant::now());
        self.start_time = Some(Local::now());
        Ok(())
    }

    pub fn mark_computed(&mut self) -> Result<(), CalculationInformationError> {
        self.check_can_mark_computed()?;
        self.computed_time = Some(self.now()?);
        Ok(())
    }

    /// Marks a composite record as computed at `start + Σ child computation time`.
    ///
    /// The result is a derived value, not a wall-clock reading. It is capped
    /// at the current time so the ordering invariant still holds when
    /// children overlapped.
    pub fn mark_computed_from(
        &mut self,
        children: &[CalculationInformation],
    ) -> Result<(), CalculationInformationError> {
        self.check_can_mark_computed()?;

        let start = self
            .start_time
            .ok_or(CalculationInformationError::NotStarted)?;
        let summed = children
            .iter()
            .filter_map(CalculationInformation::computation_duration)
            .fold(TimeDelta::zero(), |total, child| total + child);

        self.computed_time = Some((start + summed).min(self.now()?));
        Ok(())
    }

    pub fn finish(&mut self) -> Result<(), CalculationInformationError> {
        if self.end_time.is_some() {
            return Err(CalculationInformationError::AlreadyFinished);
        }

        if self.computed_time.is_none() {
            return Err(CalculationInformationError::NotComputed);
        }

        self.end_time = Some(self.now()?);
        Ok(())
    }

    fn check_can_mark_computed(&self) -> Result<(), CalculationInformationError> {
        if self.start_time.is_none() {
            return Err(CalculationInformationError::NotStarted);
        }

        if self.end_time.is_some() {
            return Err(CalculationInformationError::AlreadyFinished);
        }

        if self.computed_time.is_some() {
            return Err(CalculationInformationError::AlreadyComputed);
        }

        Ok(())
    }

    fn now(&self) -> Result<DateTime<Local>, CalculationInformationError> {
        match (self.start_time, self.anchor) {
            (Some(start), Some(anchor)) => {
                let elapsed = TimeDelta::from_std(anchor.elapsed()).unwrap_or(TimeDelta::MAX);
                Ok(start.checked_add_signed(elapsed).unwrap_or(start))
            }
            _ => Err(CalculationInformationError::NotStarted),
        }
    }

    #[must_use]
    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    #[must_use]
    pub fn method(&self) -> &str {
        &self.method
    }

    #[must_use]
    pub fn start_time(&self) -> Option<DateTime<Local>> {
        self.start_time
    }

    #[must_use]
    pub fn computed_time(&self) -> Option<DateTime<Local>> {
        self.computed_time
    }

    #[must_use]
    pub fn end_time(&self) -> Option<DateTime<Local>> {
        self.end_time
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.end_time.is_some()
    }

    #[must_use]
    pub fn computation_duration(&self) -> Option<TimeDelta> {
        Some(self.computed_time? - self.start_time?)
    }

    #[must_use]
    pub fn encoding_duration(&self) -> Option<TimeDelta> {
        Some(self.end_time? - self.computed_time?)
    }

    #[must_use]
    pub fn total_duration(&self) -> Option<TimeDelta> {
        Some(self.end_time? - self.start_time?)
    }

    #[must_use]
    pub fn computation_seconds(&self) -> f64 {
        seconds(self.computation_duration())
    }

    #[must_use]
    pub fn encoding_seconds(&self) -> f64 {
        seconds(self.encoding_duration())
    }

    #[must_use]
    pub fn total_seconds(&self) -> f64 {
        seconds(self.total_duration())
    }
}

fn seconds(duration: Option<TimeDelta>) -> f64 {
    duration
        .and_then(|d| d.num_microseconds())
        .map_or(0.0, |micros| micros as f64 / 1_000_000.0)
}

impl fmt::Display for CalculationInformation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} with {}: Total = {}s, Calculation = {}s, Printing = {}s",
            self.resolution,
            self.method,
            self.total_seconds(),
            self.computation_seconds(),
            self.encoding_seconds()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;
    use std::time::Duration;

    fn resolution() -> Resolution {
        Resolution::new(100, 50).unwrap()
    }

    fn completed(delay: Duration) -> CalculationInformation {
        let mut info = CalculationInformation::started(resolution(), "CPU");
        sleep(delay);
        info.mark_computed().unwrap();
        sleep(delay);
        info.finish().unwrap();
        info
    }

    #[test]
    fn test_timestamps_are_ordered() {
        let info = completed(Duration::from_millis(2));

        let start = info.start_time().unwrap();
        let computed = info.computed_time().unwrap();
        let end = info.end_time().unwrap();

        assert!(start <= computed);
        assert!(computed <= end);
        assert!(info.is_finished());
    }

    #[test]
    fn test_total_is_sum_of_parts() {
        let info = completed(Duration::from_millis(1));

        assert_eq!(
            info.total_duration().unwrap(),
            info.computation_duration().unwrap() + info.encoding_duration().unwrap()
        );
        assert!(info.computation_seconds() >= 0.001);
    }

    #[test]
    fn test_mark_computed_before_start_is_rejected() {
        let mut info = CalculationInformation::new(resolution(), "CPU");

        assert_eq!(info.mark_computed(), Err(CalculationInformationError::NotStarted));
        assert_eq!(info.computed_time(), None);
    }

    #[test]
    fn test_finish_before_computed_is_rejected() {
        let mut info = CalculationInformation::started(resolution(), "CPU");

        assert_eq!(info.finish(), Err(CalculationInformationError::NotComputed));
    }

    #[test]
    fn test_transitions_happen_once() {
        let mut info = CalculationInformation::new(resolution(), "CPU");

        info.start().unwrap();
        assert_eq!(info.start(), Err(CalculationInformationError::AlreadyStarted));

        info.mark_computed().unwrap();
        assert_eq!(info.mark_computed(), Err(CalculationInformationError::AlreadyComputed));

        info.finish().unwrap();
        assert_eq!(info.finish(), Err(CalculationInformationError::AlreadyFinished));
        assert_eq!(info.mark_computed(), Err(CalculationInformationError::AlreadyFinished));
    }

    #[test]
    fn test_durations_are_none_until_set() {
        let info = CalculationInformation::started(resolution(), "CPU");

        assert_eq!(info.computation_duration(), None);
        assert_eq!(info.total_duration(), None);
        assert_eq!(info.total_seconds(), 0.0);
    }

    #[test]
    fn test_composite_computed_time_is_sum_of_children() {
        let mut aggregate = CalculationInformation::started(resolution(), "RenderMatrix");
        let children = vec![
            completed(Duration::from_millis(2)),
            completed(Duration::from_millis(3)),
        ];
        aggregate.mark_computed_from(&children).unwrap();
        aggregate.finish().unwrap();

        let summed = children[0].computation_duration().unwrap()
            + children[1].computation_duration().unwrap();

        assert_eq!(aggregate.computation_duration().unwrap(), summed);
        assert!(aggregate.computed_time().unwrap() <= aggregate.end_time().unwrap());
    }

    #[test]
    fn test_composite_computed_time_is_capped_when_children_overlap() {
        let child = completed(Duration::from_millis(5));
        let mut aggregate = CalculationInformation::started(resolution(), "RenderMatrix");

        // the same child twice claims more compute time than has elapsed
        aggregate.mark_computed_from(&[child.clone(), child]).unwrap();
        aggregate.finish().unwrap();

        assert!(aggregate.computed_time().unwrap() <= aggregate.end_time().unwrap());
    }

    #[test]
    fn test_display() {
        let info = CalculationInformation::new(resolution(), "GPUDouble");

        assert_eq!(
            info.to_string(),
            "100x50 with GPUDouble: Total = 0s, Calculation = 0s, Printing = 0s"
        );
    }
}
