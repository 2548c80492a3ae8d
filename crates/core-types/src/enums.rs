use serde::{Deserialize, Serialize};
use std::fmt;

/// The kind of structural turning point an event marks on the benchmark.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Peak,
    Trough,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Peak => "peak",
            EventKind::Trough => "trough",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Forward-return horizons reported after each event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Horizon {
    #[serde(rename = "6m")]
    SixMonths,
    #[serde(rename = "12m")]
    TwelveMonths,
}

impl Horizon {
    pub const ALL: [Horizon; 2] = [Horizon::SixMonths, Horizon::TwelveMonths];

    pub fn months(&self) -> u32 {
        match self {
            Horizon::SixMonths => 6,
            Horizon::TwelveMonths => 12,
        }
    }
}

impl fmt::Display for Horizon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}m", self.months())
    }
}
