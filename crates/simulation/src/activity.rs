use foundation::time::HourOfDay;
use rand::Rng;

use crate::bands::{Congestion, RateTable, jitter};
use crate::wind::{RunwayPair, WindReading};

/// Arrivals and departures drawn from the same band.
///
/// The two draws are independent; nothing reconciles them against each other.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FlightCounts {
    pub arrivals: u32,
    pub departures: u32,
}

impl FlightCounts {
    pub fn draw<R: Rng + ?Sized>(table: RateTable, hour: HourOfDay, rng: &mut R) -> Self {
        let arrivals = table.draw(hour, rng);
        let departures = table.draw(hour, rng);
        Self {
            arrivals,
            departures,
        }
    }
}

/// `15 + 0..15`, plus 10 during daytime hours (06–22).
pub fn aircraft_in_air<R: Rng + ?Sized>(hour: HourOfDay, rng: &mut R) -> u32 {
    let daytime = if hour.within(6, 22) { 10 } else { 0 };
    15 + jitter(rng, 15) + daytime
}

/// Everything the activity dashboard shows for one tick.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ActivitySnapshot {
    pub hour: HourOfDay,
    pub aircraft_in_air: u32,
    pub hourly: FlightCounts,
    pub wind: WindReading,
    pub congestion: Congestion,
}

impl ActivitySnapshot {
    pub fn simulate<R: Rng + ?Sized>(hour: HourOfDay, rng: &mut R) -> Self {
        let aircraft_in_air = aircraft_in_air(hour, rng);
        let hourly = FlightCounts::draw(RateTable::HOURLY_MOVEMENTS, hour, rng);
        let wind = WindReading::draw(rng);
        Self {
            hour,
            aircraft_in_air,
            hourly,
            wind,
            congestion: Congestion::for_hour(hour),
        }
    }

    pub fn runways(&self) -> RunwayPair {
        self.wind.runways()
    }
}

#[cfg(test)]
mod tests {
    use super::{ActivitySnapshot, FlightCounts, aircraft_in_air};
    use crate::bands::{Congestion, RateTable};
    use foundation::time::HourOfDay;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn h(hour: u32) -> HourOfDay {
        HourOfDay::new(hour).unwrap()
    }

    #[test]
    fn aircraft_aloft_ranges() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..500 {
            assert!((25..40).contains(&aircraft_in_air(h(12), &mut rng)));
            assert!((15..30).contains(&aircraft_in_air(h(2), &mut rng)));
            assert!((25..40).contains(&aircraft_in_air(h(22), &mut rng)));
            assert!((15..30).contains(&aircraft_in_air(h(23), &mut rng)));
        }
    }

    #[test]
    fn daily_counts_stay_in_band() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let c = FlightCounts::draw(RateTable::DAILY_FLIGHTS, h(8), &mut rng);
            assert!((350..400).contains(&c.arrivals));
            assert!((350..400).contains(&c.departures));
        }
    }

    #[test]
    fn arrivals_and_departures_are_drawn_separately() {
        let mut rng = StdRng::seed_from_u64(5);
        let differs = (0..200)
            .map(|_| FlightCounts::draw(RateTable::DAILY_FLIGHTS, h(14), &mut rng))
            .any(|c| c.arrivals != c.departures);
        assert!(differs);
    }

    #[test]
    fn snapshot_is_reproducible_with_a_seed() {
        let a = ActivitySnapshot::simulate(h(8), &mut StdRng::seed_from_u64(99));
        let b = ActivitySnapshot::simulate(h(8), &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
        assert_eq!(a.congestion, Congestion::Moderate);
        assert!((28..36).contains(&a.hourly.arrivals));
        assert_eq!(a.runways(), a.wind.runways());
    }
}
