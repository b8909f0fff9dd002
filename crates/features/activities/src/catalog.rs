use crate::email::ParticipantEmail;
use crate::error::ActivityError;
use crate::seed::{ACTIVITIES, ActivitySeed};
use fxhash::FxHashMap;
use parking_lot::{Mutex, MutexGuard};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Point-in-time copy of one activity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub max_participants: u32,
    /// Enrolled emails in signup order.
    pub participants: Vec<String>,
}

/// A stored activity. Only the roster changes after construction.
#[derive(Debug)]
pub struct ActivityRecord {
    name: String,
    description: String,
    schedule: String,
    max_participants: u32,
    participants: Mutex<Vec<String>>,
}

impl ActivityRecord {
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn schedule(&self) -> &str {
        &self.schedule
    }

    #[must_use]
    pub const fn max_participants(&self) -> u32 {
        self.max_participants
    }

    #[must_use]
    pub fn participant_count(&self) -> usize {
        self.participants.lock().len()
    }

    #[must_use]
    pub fn is_enrolled(&self, email: &str) -> bool {
        self.participants.lock().iter().any(|p| p == email)
    }

    #[must_use]
    pub fn snapshot(&self) -> Activity {
        Activity {
            name: self.name.clone(),
            description: self.description.clone(),
            schedule: self.schedule.clone(),
            max_participants: self.max_participants,
            participants: self.participants.lock().clone(),
        }
    }

    /// Locks the roster. Membership checks and edits must happen under one guard.
    pub(crate) fn roster(&self) -> MutexGuard<'_, Vec<String>> {
        self.participants.lock()
    }
}

#[derive(Debug)]
struct CatalogInner {
    records: Vec<ActivityRecord>,
    index: FxHashMap<String, usize>,
}

/// In-memory store of every activity, keyed by name.
///
/// The set of activities is fixed at construction, so lookups are lock free;
/// each roster has its own lock.
#[derive(Debug, Clone)]
pub struct ActivityCatalog {
    inner: Arc<CatalogInner>,
}

impl ActivityCatalog {
    /// Builds the catalog from the built-in activity list.
    ///
    /// # Errors
    /// See [`ActivityCatalog::from_seed`].
    pub fn seeded() -> Result<Self, ActivityError> {
        Self::from_seed(ACTIVITIES)
    }

    /// Builds a catalog from `seed`, keeping its order.
    ///
    /// # Errors
    /// Returns [`ActivityError::Internal`] for a duplicate activity name, a zero
    /// capacity, or a participant listed twice in one activity, and
    /// [`ActivityError::Validation`] for a malformed seed email.
    pub fn from_seed(seed: &[ActivitySeed<'_>]) -> Result<Self, ActivityError> {
        let mut records = Vec::with_capacity(seed.len());
        let mut index = FxHashMap::default();

        for entry in seed {
            if index.contains_key(entry.name) {
                return Err(format!("Duplicate activity `{}` in seed", entry.name).into());
            }
            if entry.max_participants == 0 {
                return Err(format!("Activity `{}` has zero capacity", entry.name).into());
            }

            let mut participants: Vec<String> = Vec::with_capacity(entry.participants.len());
            for raw in entry.participants {
                let email = ParticipantEmail::parse(raw)?.into_inner();
                if participants.contains(&email) {
                    return Err(
                        format!("Participant {email} listed twice in `{}`", entry.name).into()
                    );
                }
                participants.push(email);
            }

            index.insert(entry.name.to_owned(), records.len());
            records.push(ActivityRecord {
                name: entry.name.to_owned(),
                description: entry.description.to_owned(),
                schedule: entry.schedule.to_owned(),
                max_participants: entry.max_participants,
                participants: Mutex::new(participants),
            });
        }

        Ok(Self { inner: Arc::new(CatalogInner { records, index }) })
    }

    /// Snapshot of every activity, ordered by name.
    #[must_use]
    pub fn get_all(&self) -> BTreeMap<String, Activity> {
        self.inner.records.iter().map(|r| (r.name.clone(), r.snapshot())).collect()
    }

    /// Finds an activity by exact name.
    ///
    /// # Errors
    /// Returns [`ActivityError::NotFound`] if no activity has that name.
    pub fn lookup(&self, name: &str) -> Result<&ActivityRecord, ActivityError> {
        self.inner
            .index
            .get(name)
            .map(|&i| &self.inner.records[i])
            .ok_or_else(|| ActivityError::not_found(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.records.len()
    }

    /// Activity names in seed order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.inner.records.iter().map(ActivityRecord::name)
    }
}
