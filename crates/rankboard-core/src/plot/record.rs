//! Housing plot records and their lottery classification.

use std::fmt;

use bitflags::bitflags;
use chrono::{DateTime, Utc};

pub const MIST: u16 = 339;
pub const LAVENDER_BEDS: u16 = 340;
pub const GOBLET: u16 = 341;
pub const SHIROGANE: u16 = 641;
pub const EMPYREUM: u16 = 979;

/// Housing districts in display order.
pub const DISTRICTS: &[(u16, &str)] = &[
    (MIST, "Mist"),
    (LAVENDER_BEDS, "The Lavender Beds"),
    (GOBLET, "The Goblet"),
    (SHIROGANE, "Shirogane"),
    (EMPYREUM, "Empyreum"),
];

pub const MAX_WARD_NUMBER: u8 = 30;
pub const MAX_PLOT_NUMBER: u8 = 60;

/// Name of a district id, if known.
pub fn district_name(id: u16) -> Option<&'static str> {
    DISTRICTS
        .iter()
        .find(|(d, _)| *d == id)
        .map(|(_, name)| *name)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HouseSize {
    Small = 0,
    Medium = 1,
    Large = 2,
}

impl HouseSize {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(HouseSize::Small),
            1 => Some(HouseSize::Medium),
            2 => Some(HouseSize::Large),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            HouseSize::Small => "small",
            HouseSize::Medium => "medium",
            HouseSize::Large => "large",
        }
    }
}

impl fmt::Display for HouseSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LottoPhase {
    Entry = 1,
    Results = 2,
    Unavailable = 3,
}

impl LottoPhase {
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(LottoPhase::Entry),
            2 => Some(LottoPhase::Results),
            3 => Some(LottoPhase::Unavailable),
            _ => None,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LottoPhase::Entry => "entry",
            LottoPhase::Results => "results",
            LottoPhase::Unavailable => "unavailable",
        }
    }
}

impl fmt::Display for LottoPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

bitflags! {
    /// Who may buy a plot. Bits match the wire `purchase_system` field.
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Tenants: u8 {
        const FREE_COMPANY = 0b010;
        const INDIVIDUAL   = 0b100;
    }
}

impl Tenants {
    pub fn as_str(self) -> &'static str {
        match (self.contains(Tenants::FREE_COMPANY), self.contains(Tenants::INDIVIDUAL)) {
            (true, true) => "any",
            (true, false) => "free-company",
            (false, true) => "individual",
            (false, false) => "none",
        }
    }
}

impl fmt::Display for Tenants {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// How a plot is sold, and what is known about its lottery.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LotteryStatus {
    /// First come, first served.
    NotLottery,
    /// Lottery plot whose phase is missing or past its end time.
    UnknownOrStale,
    /// Lottery plot with a current phase.
    Phase {
        phase: LottoPhase,
        entries: Option<u32>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlotRecord {
    pub district_id: u16,
    /// Zero-based.
    pub ward_number: u8,
    /// Zero-based.
    pub plot_number: u8,
    pub size: HouseSize,
    pub price: u32,
    pub tenants: Tenants,
    pub lottery: LotteryStatus,
    pub last_updated: DateTime<Utc>,
    pub first_seen: DateTime<Utc>,
}

impl PlotRecord {
    /// One-based "District, Ward N, Plot M" address.
    pub fn address(&self) -> String {
        let district = district_name(self.district_id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("District {}", self.district_id));
        format!(
            "{}, Ward {}, Plot {}",
            district,
            u16::from(self.ward_number) + 1,
            u16::from(self.plot_number) + 1
        )
    }
}

/// Whether the plot is sold by lottery (as opposed to first come, first served).
pub fn is_lottery(plot: &PlotRecord) -> bool {
    !matches!(plot.lottery, LotteryStatus::NotLottery)
}

/// Whether the plot is a lottery plot whose phase is missing or outdated.
pub fn is_unknown_or_outdated_phase(plot: &PlotRecord) -> bool {
    matches!(plot.lottery, LotteryStatus::UnknownOrStale)
}
