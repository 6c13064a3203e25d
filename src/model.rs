// File: ./src/model.rs
use crate::schedule;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use strum::EnumIter;

/// The fixed vocabulary of care actions a plant can need.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize, EnumIter)]
pub enum CareKind {
    #[serde(rename = "watering")]
    Watering,
    #[serde(rename = "fertilizing")]
    Fertilizing,
    #[serde(rename = "pruning")]
    Pruning,
    #[serde(rename = "light")]
    LightCheck,
}

impl CareKind {
    /// Imperative label for task badges ("Water now", "Check light", ...).
    pub fn action_label(&self) -> &'static str {
        match self {
            CareKind::Watering => "Water now",
            CareKind::Fertilizing => "Fertilize",
            CareKind::Pruning => "Prune",
            CareKind::LightCheck => "Check light",
        }
    }

    /// Past-tense verb used when recording an activity ("Watered Monstera").
    pub fn done_verb(&self) -> &'static str {
        match self {
            CareKind::Watering => "Watered",
            CareKind::Fertilizing => "Fertilized",
            CareKind::Pruning => "Pruned",
            CareKind::LightCheck => "Checked light on",
        }
    }
}

impl fmt::Display for CareKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CareKind::Watering => write!(f, "Watering"),
            CareKind::Fertilizing => write!(f, "Fertilizing"),
            CareKind::Pruning => write!(f, "Pruning"),
            CareKind::LightCheck => write!(f, "Light check"),
        }
    }
}

impl FromStr for CareKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "watering" | "water" => Ok(CareKind::Watering),
            "fertilizing" | "fertilize" => Ok(CareKind::Fertilizing),
            "pruning" | "prune" => Ok(CareKind::Pruning),
            "light" | "light-check" => Ok(CareKind::LightCheck),
            other => bail!("Unknown care kind '{}'", other),
        }
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Plant {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    pub location: String,
    pub watering_frequency_days: u32,
    pub light_needs: String,
    pub last_watered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// A plant record as submitted for creation; the store assigns the id and
/// a fresh plant starts with no watering history.
#[derive(Debug, Clone)]
pub struct NewPlant {
    pub name: String,
    pub species: Option<String>,
    pub location: String,
    pub watering_frequency_days: u32,
    pub light_needs: String,
    pub notes: Option<String>,
}

impl Plant {
    pub fn from_new(id: u32, new: NewPlant) -> Self {
        Self {
            id,
            name: new.name,
            species: new.species,
            location: new.location,
            watering_frequency_days: new.watering_frequency_days,
            light_needs: new.light_needs,
            last_watered: None,
            notes: new.notes,
        }
    }

    /// Record-level invariants. Degenerate frequencies are rejected here,
    /// before the record enters the store; the schedule math assumes they
    /// never occur.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            bail!("Plant name must not be empty");
        }
        if self.watering_frequency_days < 1 {
            bail!(
                "Watering frequency for '{}' must be at least 1 day",
                self.name
            );
        }
        Ok(())
    }

    pub fn watering_status(&self, now: DateTime<Utc>) -> schedule::CareStatus {
        schedule::care_status(self.last_watered, self.watering_frequency_days, now)
    }

    pub fn watering_urgency(&self, now: DateTime<Utc>) -> f64 {
        schedule::care_urgency(self.last_watered, self.watering_frequency_days, now)
    }

    pub fn days_until_watering(&self, now: DateTime<Utc>) -> Option<u32> {
        schedule::days_until_next_care(self.last_watered, self.watering_frequency_days, now)
    }

    pub fn needs_water(&self, now: DateTime<Utc>) -> bool {
        schedule::needs_care(self.last_watered, self.watering_frequency_days, now)
    }
}

#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CareTask {
    pub id: u32,
    pub plant_id: u32,
    pub title: String,
    pub kind: CareKind,
    pub date: DateTime<Utc>,
    pub completed: bool,
}

#[derive(Debug, Clone)]
pub struct NewCareTask {
    pub plant_id: u32,
    pub title: String,
    pub kind: CareKind,
    pub date: DateTime<Utc>,
}

impl CareTask {
    pub fn from_new(id: u32, new: NewCareTask) -> Self {
        Self {
            id,
            plant_id: new.plant_id,
            title: new.title,
            kind: new.kind,
            date: new.date,
            completed: false,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            bail!("Task title must not be empty");
        }
        Ok(())
    }
}

// --- SORTING ---
// Open tasks before done ones, then by scheduled date, then title.
impl Ord for CareTask {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.completed != other.completed {
            return self.completed.cmp(&other.completed);
        }
        self.date
            .cmp(&other.date)
            .then_with(|| self.title.cmp(&other.title))
            .then_with(|| self.id.cmp(&other.id))
    }
}

impl PartialOrd for CareTask {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One entry in the care history. Only care events are recorded; the log
/// is append-only and never consulted by the schedule math.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    pub id: u32,
    pub plant_id: Option<u32>,
    pub kind: CareKind,
    pub timestamp: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub notes: Option<String>,
}
