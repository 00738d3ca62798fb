use foundation::time::HourOfDay;

/// Header badge state. The airport never closes; small hours read as quiet.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum AirportStatus {
    Operational,
    LowActivity,
}

impl AirportStatus {
    /// 01–05 inclusive is low activity.
    pub fn for_hour(hour: HourOfDay) -> Self {
        if hour.within(1, 5) {
            AirportStatus::LowActivity
        } else {
            AirportStatus::Operational
        }
    }

    pub fn text(self) -> &'static str {
        match self {
            AirportStatus::Operational => "Airport Operational",
            AirportStatus::LowActivity => "Low Activity",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            AirportStatus::Operational => "\u{2708}\u{fe0f}",
            AirportStatus::LowActivity => "\u{1f319}",
        }
    }

    pub fn badge_background(self) -> &'static str {
        match self {
            AirportStatus::Operational => "linear-gradient(135deg, #e74c3c, #c0392b)",
            AirportStatus::LowActivity => "linear-gradient(135deg, #f39c12, #e67e22)",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::AirportStatus;
    use foundation::time::HourOfDay;

    #[test]
    fn low_activity_only_between_one_and_five() {
        let low: Vec<u32> = HourOfDay::all()
            .filter(|h| AirportStatus::for_hour(*h) == AirportStatus::LowActivity)
            .map(HourOfDay::get)
            .collect();
        assert_eq!(low, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn presentation() {
        assert_eq!(AirportStatus::LowActivity.text(), "Low Activity");
        assert_eq!(AirportStatus::Operational.icon(), "✈️");
    }
}
