use chrono::DateTime;
use chrono_tz::Tz;

/// Hour of the local day, `0..=23`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HourOfDay(u8);

impl HourOfDay {
    pub fn new(hour: u32) -> Option<Self> {
        (hour < 24).then_some(HourOfDay(hour as u8))
    }

    pub fn get(self) -> u32 {
        u32::from(self.0)
    }

    /// Inclusive on both ends, as the band tables are written.
    pub fn within(self, first: u32, last: u32) -> bool {
        (first..=last).contains(&self.get())
    }

    pub fn all() -> impl Iterator<Item = HourOfDay> {
        (0u8..24).map(HourOfDay)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClockError {
    UnknownZone(String),
    InstantOutOfRange(i64),
}

impl std::fmt::Display for ClockError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ClockError::UnknownZone(name) => write!(f, "unknown time zone: {name}"),
            ClockError::InstantOutOfRange(ms) => write!(f, "instant out of range: {ms} ms"),
        }
    }
}

impl std::error::Error for ClockError {}

/// Wall clock pinned to a single IANA zone, independent of the host's zone.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SiteClock {
    zone: Tz,
}

impl SiteClock {
    pub fn new(zone: Tz) -> Self {
        Self { zone }
    }

    pub fn from_zone_name(name: &str) -> Result<Self, ClockError> {
        name.trim()
            .parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ClockError::UnknownZone(name.to_string()))
    }

    pub fn zone(&self) -> Tz {
        self.zone
    }

    /// Zero-padded 24-hour `HH:MM:SS` for a Unix instant in milliseconds.
    pub fn format_hms(&self, unix_ms: i64) -> Result<String, ClockError> {
        let utc =
            DateTime::from_timestamp_millis(unix_ms).ok_or(ClockError::InstantOutOfRange(unix_ms))?;
        Ok(utc.with_timezone(&self.zone).format("%H:%M:%S").to_string())
    }

}

impl Default for SiteClock {
    fn default() -> Self {
        Self::new(chrono_tz::Europe::Istanbul)
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockError, HourOfDay, SiteClock};

    #[test]
    fn istanbul_is_three_hours_ahead_of_utc() {
        // 2024-01-15T12:34:56Z
        let clock = SiteClock::default();
        assert_eq!(clock.format_hms(1_705_322_096_000).unwrap(), "15:34:56");
    }

    #[test]
    fn formats_past_midnight_zero_padded() {
        // 2024-07-01T21:05:09Z
        let clock = SiteClock::default();
        assert_eq!(clock.format_hms(1_719_867_909_000).unwrap(), "00:05:09");
    }

    #[test]
    fn sub_second_part_is_truncated() {
        let clock = SiteClock::default();
        assert_eq!(clock.format_hms(1_705_322_096_999).unwrap(), "15:34:56");
    }

    #[test]
    fn zone_by_name() {
        let clock = SiteClock::from_zone_name("Europe/Istanbul").unwrap();
        assert_eq!(clock, SiteClock::default());
        assert_eq!(
            SiteClock::from_zone_name("Mars/Olympus"),
            Err(ClockError::UnknownZone("Mars/Olympus".to_string()))
        );
    }

    #[test]
    fn hour_of_day_bounds() {
        assert!(HourOfDay::new(23).is_some());
        assert!(HourOfDay::new(24).is_none());
        assert_eq!(HourOfDay::all().count(), 24);
        let h = HourOfDay::new(6).unwrap();
        assert!(h.within(6, 10));
        assert!(!h.within(7, 9));
    }
}
