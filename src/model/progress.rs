/// Lower bound (inclusive) of the medium tier.
const THRESHOLD_MEDIUM: u8 = 50;
/// Lower bound (inclusive) of the high tier.
const THRESHOLD_HIGH: u8 = 75;
/// Lower bound (inclusive) of the critical tier.
const THRESHOLD_CRITICAL: u8 = 90;

pub const MAX_PERCENT: u8 = 100;

/// How alarming a percentage is. Drives the colour of percentage labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Low,
    Medium,
    High,
    Critical,
}

/// A percentage in `0..=100`. Construct it through [`Progress::clamp_percent`]
/// or [`Progress::from_ratio`]; the field is private so the range holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    percent: u8,
}

impl Progress {
    /// Clamp any integer into `0..=100`. Never fails.
    pub fn clamp_percent(raw: i64) -> Self {
        Self {
            percent: raw.clamp(0, i64::from(MAX_PERCENT)) as u8,
        }
    }

    /// `used * 100 / total`, clamped. A zero total yields 0%.
    pub fn from_ratio(used: u64, total: u64) -> Self {
        if total == 0 {
            return Self::default();
        }
        let raw = used.saturating_mul(u64::from(MAX_PERCENT)) / total;
        Self::clamp_percent(i64::try_from(raw).unwrap_or(i64::MAX))
    }

    pub fn percent(self) -> u8 {
        self.percent
    }

    pub fn is_complete(self) -> bool {
        self.percent == MAX_PERCENT
    }

    /// Severity tier. Each breakpoint belongs to the higher tier.
    pub fn severity(self) -> Severity {
        match self.percent {
            p if p < THRESHOLD_MEDIUM => Severity::Low,
            p if p < THRESHOLD_HIGH => Severity::Medium,
            p if p < THRESHOLD_CRITICAL => Severity::High,
            _ => Severity::Critical,
        }
    }
}
