use crate::catalog::Activity;
use mhs_derive::api_model;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::ops::Deref;

/// Public representation of an activity.
#[api_model(rename_all = "snake_case")]
#[derive(Clone, PartialEq, Eq)]
pub struct ActivityView {
    /// What the activity is about
    pub description: String,
    /// When it meets
    pub schedule: String,
    /// Capacity (informational)
    pub max_participants: u32,
    /// Enrolled student emails
    pub participants: Vec<String>,
}

impl From<Activity> for ActivityView {
    fn from(activity: Activity) -> Self {
        Self {
            description: activity.description,
            schedule: activity.schedule,
            max_participants: activity.max_participants,
            participants: activity.participants,
        }
    }
}

/// Every activity keyed by name, serialized as a plain JSON object.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(transparent)]
pub struct ActivityDirectory(pub BTreeMap<String, ActivityView>);

impl Deref for ActivityDirectory {
    type Target = BTreeMap<String, ActivityView>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Result of a successful signup or unregister.
#[api_model]
#[derive(Clone, PartialEq, Eq)]
pub struct Confirmation {
    /// Human-readable outcome naming the student and the activity
    pub message: String,
}

impl Confirmation {
    pub(crate) fn signed_up(email: &str, activity: &str) -> Self {
        Self { message: format!("Signed up {email} for {activity}") }
    }

    pub(crate) fn unregistered(email: &str, activity: &str) -> Self {
        Self { message: format!("Unregistered {email} from {activity}") }
    }
}
