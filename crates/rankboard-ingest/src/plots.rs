//! Plot snapshot ingestion.
//!
//! Snapshots arrive as JSON arrays of [`PlotState`] objects. Enum fields are
//! numeric codes, timestamps are float Unix seconds, and `purchase_system` is
//! a bitmask whose lowest bit marks lottery plots. Converting a snapshot into
//! a [`PlotRecord`] resolves the lottery phase against a [`Freshness`]
//! reference instant, so stale phases never reach the registries.

use std::path::Path;

use chrono::{DateTime, Utc};
use rankboard_core::plot::{HouseSize, LotteryStatus, LottoPhase, PlotRecord, Tenants};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::IngestError;

/// `purchase_system` bit set on lottery plots.
pub const LOTTERY_BIT: u8 = 0b001;

/// Wire shape of one plot snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotState {
    pub district_id: u16,
    pub ward_number: u8,
    pub plot_number: u8,
    pub size: u8,
    pub price: u32,
    pub last_updated_time: f64,
    pub first_seen_time: f64,
    pub purchase_system: u8,
    #[serde(default)]
    pub lotto_entries: Option<u32>,
    #[serde(default)]
    pub lotto_phase: Option<u8>,
    #[serde(default)]
    pub lotto_phase_until: Option<f64>,
}

/// Reference instant against which lottery phases are judged stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Freshness {
    now: DateTime<Utc>,
}

impl Freshness {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now }
    }

    pub fn now() -> Self {
        Self::at(Utc::now())
    }

    pub fn reference(&self) -> DateTime<Utc> {
        self.now
    }

    /// A phase that ended before the reference instant is stale.
    /// Without an end time there is nothing to judge, so it is current.
    pub fn is_stale(&self, phase_until: Option<DateTime<Utc>>) -> bool {
        phase_until.is_some_and(|until| until < self.now)
    }
}

fn timestamp(field: &'static str, secs: f64) -> Result<DateTime<Utc>, IngestError> {
    if !secs.is_finite() {
        return Err(IngestError::invalid(field, secs));
    }
    let whole = secs.floor();
    let nanos = ((secs - whole) * 1e9) as u32;
    DateTime::from_timestamp(whole as i64, nanos).ok_or_else(|| IngestError::invalid(field, secs))
}

impl PlotState {
    /// Whether the snapshot describes a lottery plot.
    pub fn is_lottery(&self) -> bool {
        self.purchase_system & LOTTERY_BIT != 0
    }

    fn lottery_status(&self, freshness: &Freshness) -> Result<LotteryStatus, IngestError> {
        if !self.is_lottery() {
            return Ok(LotteryStatus::NotLottery);
        }
        let Some(code) = self.lotto_phase else {
            return Ok(LotteryStatus::UnknownOrStale);
        };
        let phase =
            LottoPhase::from_code(code).ok_or_else(|| IngestError::invalid("lotto_phase", code))?;
        let until = self
            .lotto_phase_until
            .map(|secs| timestamp("lotto_phase_until", secs))
            .transpose()?;
        if freshness.is_stale(until) {
            return Ok(LotteryStatus::UnknownOrStale);
        }
        Ok(LotteryStatus::Phase {
            phase,
            entries: self.lotto_entries,
        })
    }

    /// Convert into a typed record, classifying the lottery phase.
    pub fn into_record(self, freshness: &Freshness) -> Result<PlotRecord, IngestError> {
        let size = HouseSize::from_code(self.size)
            .ok_or_else(|| IngestError::invalid("size", self.size))?;
        let lottery = self.lottery_status(freshness)?;
        Ok(PlotRecord {
            district_id: self.district_id,
            ward_number: self.ward_number,
            plot_number: self.plot_number,
            size,
            price: self.price,
            tenants: Tenants::from_bits_truncate(self.purchase_system),
            lottery,
            last_updated: timestamp("last_updated_time", self.last_updated_time)?,
            first_seen: timestamp("first_seen_time", self.first_seen_time)?,
        })
    }
}

/// Parse a JSON array of plot snapshots.
pub fn parse_plots(json: &str, freshness: &Freshness) -> Result<Vec<PlotRecord>, IngestError> {
    let states: Vec<PlotState> = serde_json::from_str(json)?;
    let records = states
        .into_iter()
        .map(|s| s.into_record(freshness))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(
        count = records.len(),
        reference = %freshness.reference(),
        "classified plot snapshots"
    );
    Ok(records)
}

/// Read and parse a plot snapshot file.
pub fn load_plots(path: &Path, freshness: &Freshness) -> Result<Vec<PlotRecord>, IngestError> {
    let json = std::fs::read_to_string(path).map_err(|e| IngestError::io(path, e))?;
    let records = parse_plots(&json, freshness)?;
    info!(path = %path.display(), count = records.len(), "loaded plots");
    Ok(records)
}
