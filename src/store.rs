//! In-memory schedule: which workouts happen on which day

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date_key::DateKey;
use crate::error::{Error, Result};
use crate::workout::WorkoutRef;

/// Maps days to the ordered list of workouts scheduled on them.
///
/// Invariants:
/// * a day is never mapped to an empty list (the day is removed instead)
/// * a workout id appears at most once per day
/// * lists are ordered by `sort_order`, then by insertion order
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleStore {
    entries: BTreeMap<DateKey, Vec<WorkoutRef>>,
}

impl ScheduleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workout to a day.
    ///
    /// Adding a workout id that is already scheduled on this day is a silent no-op.
    /// Returns whether the workout has been added.
    pub fn add_workout(&mut self, date: DateKey, workout: WorkoutRef) -> bool {
        let list = self.entries.entry(date).or_insert_with(Vec::new);
        if list.iter().any(|w| w.workout_id() == workout.workout_id()) {
            log::trace!("{} is already scheduled on {}", workout.workout_id(), date);
            return false;
        }
        let position = list.iter()
            .position(|w| w.sort_order() > workout.sort_order())
            .unwrap_or_else(|| list.len());
        list.insert(position, workout);
        true
    }

    /// Remove a workout from a day. Returns whether something was removed
    pub fn remove_workout(&mut self, date: &DateKey, workout_id: &str) -> bool {
        let list = match self.entries.get_mut(date) {
            None => return false,
            Some(list) => list,
        };
        let len_before = list.len();
        list.retain(|w| w.workout_id() != workout_id);
        let removed = list.len() != len_before;
        if list.is_empty() {
            self.entries.remove(date);
        }
        removed
    }

    /// Move a workout from one day to another, keeping its metadata.
    ///
    /// Returns `false` when the workout is not scheduled on `from`.
    /// If `to` already has this workout, the moved entry merges into the existing one.
    pub fn reschedule_workout(&mut self, from: &DateKey, to: DateKey, workout_id: &str) -> bool {
        let moved = match self.workouts_for_date(from).iter().find(|w| w.workout_id() == workout_id) {
            None => return false,
            Some(w) => w.clone(),
        };
        if *from == to {
            return true;
        }
        self.remove_workout(from, workout_id);
        self.add_workout(to, moved);
        log::debug!("Moved {} from {} to {}", workout_id, from, to);
        true
    }

    /// The ordered workouts of a day (empty if there are none)
    pub fn workouts_for_date(&self, date: &DateKey) -> &[WorkoutRef] {
        match self.entries.get(date) {
            Some(list) => list,
            None => &[],
        }
    }

    /// Every scheduled day between `start` and `end` (both included).
    ///
    /// Fails with [`Error::InvalidRange`] when `end < start`.
    pub fn workouts_in_range(&self, start: DateKey, end: DateKey) -> Result<BTreeMap<DateKey, &[WorkoutRef]>> {
        if end < start {
            return Err(Error::InvalidRange { start, end });
        }
        Ok(self.entries_between(start, end).collect())
    }

    /// Same as `workouts_in_range`, but yields nothing for a reversed range
    pub(crate) fn entries_between(&self, start: DateKey, end: DateKey) -> impl Iterator<Item = (DateKey, &[WorkoutRef])> {
        let range = if start <= end {
            Some(self.entries.range(start..=end))
        } else {
            None
        };
        range.into_iter()
            .flatten()
            .map(|(date, list)| (*date, list.as_slice()))
    }

    /// Distinct workout ids across the whole schedule
    pub fn all_workout_ids(&self) -> BTreeSet<&str> {
        self.entries.values()
            .flatten()
            .map(|w| w.workout_id())
            .collect()
    }

    /// Number of scheduled days
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Scheduled days, in chronological order
    pub fn dates(&self) -> impl Iterator<Item = &DateKey> {
        self.entries.keys()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DateKey, &[WorkoutRef])> {
        self.entries.iter().map(|(date, list)| (date, list.as_slice()))
    }

    pub fn first_date(&self) -> Option<DateKey> {
        self.entries.keys().next().copied()
    }

    pub fn last_date(&self) -> Option<DateKey> {
        self.entries.keys().next_back().copied()
    }

    /// Build a store from the legacy `date -> [workout id]` shape.
    ///
    /// Fails with [`Error::InvalidDate`] on the first key that is not a `YYYY-MM-DD` day.
    pub fn from_legacy_map(map: &BTreeMap<String, Vec<String>>) -> Result<Self> {
        let mut store = Self::new();
        for (date, ids) in map {
            let date: DateKey = date.parse()?;
            for id in ids {
                store.add_workout(date, WorkoutRef::new(id.clone()));
            }
        }
        Ok(store)
    }

    /// Export to the legacy `date -> [workout id]` shape (this drops sort orders and display metadata)
    pub fn to_legacy_map(&self) -> BTreeMap<String, Vec<String>> {
        self.entries.iter()
            .map(|(date, list)| {
                (date.to_string(), list.iter().map(|w| w.workout_id().to_string()).collect())
            })
            .collect()
    }
}

/// Used to support serde
impl Serialize for ScheduleStore {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.entries.serialize(serializer)
    }
}
/// Used to support serde. Entries go through `add_workout`, so that the invariants hold for any input
impl<'de> Deserialize<'de> for ScheduleStore {
    fn deserialize<D>(deserializer: D) -> std::result::Result<ScheduleStore, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = BTreeMap::<DateKey, Vec<WorkoutRef>>::deserialize(deserializer)?;
        let mut store = ScheduleStore::new();
        for (date, list) in raw {
            for workout in list {
                store.add_workout(date, workout);
            }
        }
        Ok(store)
    }
}
