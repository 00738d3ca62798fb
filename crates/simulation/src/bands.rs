use foundation::time::HourOfDay;
use rand::Rng;

/// Traffic level for an hour of the day.
///
/// Peak covers 06–10 and 18–22, low covers 00–05, everything else is nominal.
/// All ranges are inclusive.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FlightBand {
    Peak,
    Nominal,
    Low,
}

impl FlightBand {
    pub fn for_hour(hour: HourOfDay) -> Self {
        if hour.within(6, 10) || hour.within(18, 22) {
            FlightBand::Peak
        } else if hour.within(0, 5) {
            FlightBand::Low
        } else {
            FlightBand::Nominal
        }
    }
}

/// Per-band base values plus an exclusive upper bound for uniform jitter.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct RateTable {
    pub peak: u32,
    pub nominal: u32,
    pub low: u32,
    /// Jitter is drawn from `0..jitter`.
    pub jitter: u32,
}

impl RateTable {
    /// Daily arrivals/departures counters in the page header.
    pub const DAILY_FLIGHTS: RateTable = RateTable {
        peak: 350,
        nominal: 250,
        low: 150,
        jitter: 50,
    };

    /// Hourly movements on the activity dashboard.
    pub const HOURLY_MOVEMENTS: RateTable = RateTable {
        peak: 28,
        nominal: 15,
        low: 8,
        jitter: 8,
    };

    pub fn base(&self, band: FlightBand) -> u32 {
        match band {
            FlightBand::Peak => self.peak,
            FlightBand::Nominal => self.nominal,
            FlightBand::Low => self.low,
        }
    }

    pub fn base_for_hour(&self, hour: HourOfDay) -> u32 {
        self.base(FlightBand::for_hour(hour))
    }

    pub fn draw<R: Rng + ?Sized>(&self, hour: HourOfDay, rng: &mut R) -> u32 {
        self.base_for_hour(hour) + jitter(rng, self.jitter)
    }
}

/// Uniform draw from `0..bound`; zero when the range is empty.
pub(crate) fn jitter<R: Rng + ?Sized>(rng: &mut R, bound: u32) -> u32 {
    if bound == 0 { 0 } else { rng.gen_range(0..bound) }
}

/// Terminal congestion levels, in increasing order.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Congestion {
    Low,
    Normal,
    Moderate,
    High,
}

impl Congestion {
    pub const ALL: [Congestion; 4] = [
        Congestion::Low,
        Congestion::Normal,
        Congestion::Moderate,
        Congestion::High,
    ];

    /// Rush hours 07–09 and 17–19 are moderate, 00–05 is low, otherwise
    /// normal. `High` exists on the scale but no hour maps to it.
    pub fn for_hour(hour: HourOfDay) -> Self {
        if hour.within(7, 9) || hour.within(17, 19) {
            Congestion::Moderate
        } else if hour.within(0, 5) {
            Congestion::Low
        } else {
            Congestion::Normal
        }
    }

    pub fn index(self) -> u32 {
        match self {
            Congestion::Low => 0,
            Congestion::Normal => 1,
            Congestion::Moderate => 2,
            Congestion::High => 3,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Congestion::Low => "Low",
            Congestion::Normal => "Normal",
            Congestion::Moderate => "Moderate",
            Congestion::High => "High",
        }
    }

    pub fn bar_width_percent(self) -> u32 {
        (self.index() + 1) * 25
    }
}
