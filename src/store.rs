// File: ./src/store.rs
//! In-memory plant/task/activity store.
//!
//! This is the record-keeping side of the application: create, read,
//! update and delete keyed by integer id, plus the care side effects
//! (completing a watering task stamps the plant's watering history). The
//! schedule math in [`crate::schedule`] only ever reads these records.

use crate::model::{Activity, CareKind, CareTask, NewCareTask, NewPlant, Plant};
use crate::schedule;
use anyhow::{Result, bail};
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Clone, Default)]
pub struct PlantStore {
    plants: BTreeMap<u32, Plant>,
    tasks: BTreeMap<u32, CareTask>,
    activities: Vec<Activity>,
    next_plant_id: u32,
    next_task_id: u32,
    next_activity_id: u32,
}

/// Dashboard counts derived from the current records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CareSummary {
    pub total_plants: usize,
    pub needs_watering: usize,
    pub open_tasks_by_kind: HashMap<CareKind, usize>,
}

impl CareSummary {
    pub fn open_count(&self, kind: CareKind) -> usize {
        self.open_tasks_by_kind.get(&kind).copied().unwrap_or(0)
    }
}

impl PlantStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from persisted records. Invalid records are
    /// rejected outright rather than silently repaired; a store file that
    /// fails these checks needs operator attention, not guesswork.
    pub fn from_records(
        plants: Vec<Plant>,
        tasks: Vec<CareTask>,
        activities: Vec<Activity>,
    ) -> Result<Self> {
        let mut store = Self::new();
        for plant in plants {
            plant.validate()?;
            if store.plants.contains_key(&plant.id) {
                bail!("Duplicate plant id {} in stored data", plant.id);
            }
            store.plants.insert(plant.id, plant);
        }
        for task in tasks {
            task.validate()?;
            if !store.plants.contains_key(&task.plant_id) {
                bail!(
                    "Task {} references missing plant {}",
                    task.id,
                    task.plant_id
                );
            }
            if store.tasks.contains_key(&task.id) {
                bail!("Duplicate task id {} in stored data", task.id);
            }
            store.tasks.insert(task.id, task);
        }
        store.activities = activities;

        store.next_plant_id = store.plants.keys().max().copied().unwrap_or(0) + 1;
        store.next_task_id = store.tasks.keys().max().copied().unwrap_or(0) + 1;
        store.next_activity_id = store.activities.iter().map(|a| a.id).max().unwrap_or(0) + 1;
        Ok(store)
    }

    // --- PLANTS ---

    /// All plants in id order.
    pub fn plants(&self) -> Vec<&Plant> {
        self.plants.values().collect()
    }

    pub fn get_plant(&self, id: u32) -> Option<&Plant> {
        self.plants.get(&id)
    }

    pub fn add_plant(&mut self, new: NewPlant) -> Result<u32> {
        let id = self.next_plant_id;
        let plant = Plant::from_new(id, new);
        plant.validate()?;
        self.plants.insert(id, plant);
        self.next_plant_id += 1;
        Ok(id)
    }

    pub fn update_plant(&mut self, plant: Plant) -> Result<()> {
        plant.validate()?;
        if !self.plants.contains_key(&plant.id) {
            bail!("No plant with id {}", plant.id);
        }
        self.plants.insert(plant.id, plant);
        Ok(())
    }

    /// Remove a plant and every task that referenced it.
    pub fn remove_plant(&mut self, id: u32) -> Result<Plant> {
        let Some(plant) = self.plants.remove(&id) else {
            bail!("No plant with id {}", id);
        };
        let before = self.tasks.len();
        self.tasks.retain(|_, t| t.plant_id != id);
        let dropped = before - self.tasks.len();
        if dropped > 0 {
            log::info!("Removed plant {} and {} of its tasks", id, dropped);
        }
        Ok(plant)
    }

    /// Record a watering done outside any scheduled task.
    pub fn mark_watered(&mut self, plant_id: u32, now: DateTime<Utc>) -> Result<()> {
        let Some(plant) = self.plants.get_mut(&plant_id) else {
            bail!("No plant with id {}", plant_id);
        };
        plant.last_watered = Some(now);
        let description = format!("{} {}", CareKind::Watering.done_verb(), plant.name);
        self.record_activity(Some(plant_id), CareKind::Watering, now, description);
        Ok(())
    }

    // --- TASKS ---

    /// All tasks in id order.
    pub fn tasks(&self) -> Vec<&CareTask> {
        self.tasks.values().collect()
    }

    pub fn get_task(&self, id: u32) -> Option<&CareTask> {
        self.tasks.get(&id)
    }

    pub fn add_task(&mut self, new: NewCareTask) -> Result<u32> {
        if !self.plants.contains_key(&new.plant_id) {
            bail!("No plant with id {}", new.plant_id);
        }
        let id = self.next_task_id;
        let task = CareTask::from_new(id, new);
        task.validate()?;
        self.tasks.insert(id, task);
        self.next_task_id += 1;
        Ok(id)
    }

    pub fn update_task(&mut self, task: CareTask) -> Result<()> {
        task.validate()?;
        if !self.tasks.contains_key(&task.id) {
            bail!("No task with id {}", task.id);
        }
        if !self.plants.contains_key(&task.plant_id) {
            bail!("No plant with id {}", task.plant_id);
        }
        self.tasks.insert(task.id, task);
        Ok(())
    }

    pub fn remove_task(&mut self, id: u32) -> Result<CareTask> {
        match self.tasks.remove(&id) {
            Some(task) => Ok(task),
            None => bail!("No task with id {}", id),
        }
    }

    /// Incomplete tasks, optionally restricted to one care kind, sorted
    /// by scheduled date.
    pub fn open_tasks(&self, kind: Option<CareKind>) -> Vec<CareTask> {
        let mut tasks: Vec<CareTask> = self
            .tasks
            .values()
            .filter(|t| !t.completed)
            .filter(|t| kind.is_none_or(|k| t.kind == k))
            .cloned()
            .collect();
        tasks.sort();
        tasks
    }

    /// Mark a task done. Completing a watering task also stamps the
    /// plant's last-watered timestamp; every completion is written to the
    /// activity log. Completing an already-done task is a no-op.
    pub fn complete_task(&mut self, id: u32, now: DateTime<Utc>) -> Result<()> {
        let Some(task) = self.tasks.get_mut(&id) else {
            bail!("No task with id {}", id);
        };
        if task.completed {
            log::warn!("Task {} is already completed", id);
            return Ok(());
        }
        task.completed = true;
        let kind = task.kind;
        let plant_id = task.plant_id;

        let Some(plant) = self.plants.get_mut(&plant_id) else {
            bail!("Task {} references missing plant {}", id, plant_id);
        };
        if kind == CareKind::Watering {
            plant.last_watered = Some(now);
        }
        let description = format!("{} {}", kind.done_verb(), plant.name);
        self.record_activity(Some(plant_id), kind, now, description);
        Ok(())
    }

    // --- ACTIVITY LOG ---

    fn record_activity(
        &mut self,
        plant_id: Option<u32>,
        kind: CareKind,
        timestamp: DateTime<Utc>,
        description: String,
    ) {
        let activity = Activity {
            id: self.next_activity_id,
            plant_id,
            kind,
            timestamp,
            description,
            notes: None,
        };
        self.next_activity_id += 1;
        self.activities.push(activity);
    }

    pub fn activities(&self) -> &[Activity] {
        &self.activities
    }

    /// Newest care events first.
    pub fn recent_activities(&self, limit: usize) -> Vec<&Activity> {
        self.activities.iter().rev().take(limit).collect()
    }

    // --- DERIVED VIEWS ---

    pub fn care_summary(&self, now: DateTime<Utc>) -> CareSummary {
        let needs_watering = self
            .plants
            .values()
            .filter(|p| p.needs_water(now))
            .count();

        let mut open_tasks_by_kind: HashMap<CareKind, usize> = HashMap::new();
        for task in self.tasks.values().filter(|t| !t.completed) {
            *open_tasks_by_kind.entry(task.kind).or_insert(0) += 1;
        }

        CareSummary {
            total_plants: self.plants.len(),
            needs_watering,
            open_tasks_by_kind,
        }
    }

    /// Open tasks joined with their plants, earliest scheduled first,
    /// truncated to `limit`. This feeds the "plants needing attention"
    /// listing.
    pub fn attention_list(&self, limit: usize) -> Vec<(&Plant, &CareTask)> {
        let mut open: Vec<&CareTask> = self.tasks.values().filter(|t| !t.completed).collect();
        open.sort();
        open.into_iter()
            .filter_map(|task| self.plants.get(&task.plant_id).map(|plant| (plant, task)))
            .take(limit)
            .collect()
    }

    /// All plants, most urgent watering first.
    pub fn plants_by_urgency(&self, now: DateTime<Utc>) -> Vec<Plant> {
        schedule::rank_by_urgency(self.plants.values().cloned().collect(), now)
    }
}
