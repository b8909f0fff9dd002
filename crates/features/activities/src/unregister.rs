use crate::catalog::ActivityCatalog;
use crate::email::ParticipantEmail;
use crate::error::ActivityError;
use crate::model::Confirmation;
use tracing::info;

/// Removes students from activity rosters.
#[derive(Debug, Clone, Copy)]
pub struct UnregisterService<'a> {
    catalog: &'a ActivityCatalog,
}

impl<'a> UnregisterService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a ActivityCatalog) -> Self {
        Self { catalog }
    }

    /// Removes `email` from `activity_name`, keeping the order of the others.
    ///
    /// # Errors
    /// * [`ActivityError::NotFound`] if the activity does not exist.
    /// * [`ActivityError::Validation`] if `email` is malformed.
    /// * [`ActivityError::NotRegistered`] if the student is not enrolled.
    pub fn unregister(
        &self,
        activity_name: &str,
        email: &str,
    ) -> Result<Confirmation, ActivityError> {
        let record = self.catalog.lookup(activity_name)?;
        let email = ParticipantEmail::parse(email)?;

        {
            let mut roster = record.roster();
            let Some(position) = roster.iter().position(|p| p == email.as_str()) else {
                return Err(ActivityError::NotRegistered {
                    activity: record.name().to_owned(),
                    email: email.into_inner(),
                    context: None,
                });
            };
            roster.remove(position);
        }

        info!(activity = record.name(), email = %email, "Student unregistered");
        Ok(Confirmation::unregistered(email.as_str(), record.name()))
    }
}
