use rand::Rng;

use crate::bands::jitter;

/// The eight compass points, clockwise from north.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CompassOctant {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
}

impl CompassOctant {
    pub const ALL: [CompassOctant; 8] = [
        CompassOctant::N,
        CompassOctant::NE,
        CompassOctant::E,
        CompassOctant::SE,
        CompassOctant::S,
        CompassOctant::SW,
        CompassOctant::W,
        CompassOctant::NW,
    ];

    /// `degrees / 45` indexes the table, so each octant covers the 45°
    /// sector starting at its heading (N is 0–44°, NE is 45–89°, ...).
    pub fn from_degrees(degrees: u32) -> Self {
        Self::ALL[((degrees % 360) / 45) as usize]
    }

    pub fn label(self) -> &'static str {
        match self {
            CompassOctant::N => "N",
            CompassOctant::NE => "NE",
            CompassOctant::E => "E",
            CompassOctant::SE => "SE",
            CompassOctant::S => "S",
            CompassOctant::SW => "SW",
            CompassOctant::W => "W",
            CompassOctant::NW => "NW",
        }
    }
}

/// Runway pair in use for a wind direction.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum RunwayPair {
    /// 17L/17R.
    North,
    /// 35L/35R.
    South,
}

impl RunwayPair {
    pub const ALL_DESIGNATORS: [&'static str; 4] = ["17L", "17R", "35L", "35R"];

    /// Threshold rule, not an aerodynamic model: 135°–315° inclusive selects
    /// the south pair, every other angle the north pair.
    pub fn for_wind(direction_deg: u32) -> Self {
        if (135..=315).contains(&direction_deg) {
            RunwayPair::South
        } else {
            RunwayPair::North
        }
    }

    pub fn designators(self) -> [&'static str; 2] {
        match self {
            RunwayPair::North => ["17L", "17R"],
            RunwayPair::South => ["35L", "35R"],
        }
    }

    pub fn is_active(self, designator: &str) -> bool {
        self.designators().contains(&designator)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct WindReading {
    pub speed: u32,
    /// Integer degrees in `0..360`.
    pub direction_deg: u32,
}

impl WindReading {
    pub fn new(speed: u32, direction_deg: u32) -> Self {
        Self {
            speed,
            direction_deg: direction_deg % 360,
        }
    }

    /// Speed `5 + 0..15`, direction uniform over `0..360`.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let speed = 5 + jitter(rng, 15);
        let direction_deg = jitter(rng, 360);
        Self::new(speed, direction_deg)
    }

    pub fn octant(&self) -> CompassOctant {
        CompassOctant::from_degrees(self.direction_deg)
    }

    pub fn runways(&self) -> RunwayPair {
        RunwayPair::for_wind(self.direction_deg)
    }

    pub fn direction_label(&self) -> String {
        format!("Direction: {} ({}°)", self.octant().label(), self.direction_deg)
    }

    /// CSS transform for the arrow pinned at its tail.
    pub fn arrow_transform(&self) -> String {
        format!("translate(-50%, -100%) rotate({}deg)", self.direction_deg)
    }
}
