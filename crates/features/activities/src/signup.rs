use crate::catalog::ActivityCatalog;
use crate::email::ParticipantEmail;
use crate::error::ActivityError;
use crate::model::Confirmation;
use tracing::info;

/// Adds students to activity rosters.
#[derive(Debug, Clone, Copy)]
pub struct SignupService<'a> {
    catalog: &'a ActivityCatalog,
}

impl<'a> SignupService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a ActivityCatalog) -> Self {
        Self { catalog }
    }

    /// Enrolls `email` in `activity_name`.
    ///
    /// An unknown activity is reported before a malformed email. Capacity is
    /// not enforced.
    ///
    /// # Errors
    /// * [`ActivityError::NotFound`] if the activity does not exist.
    /// * [`ActivityError::Validation`] if `email` is malformed.
    /// * [`ActivityError::AlreadySignedUp`] if the student is already enrolled.
    pub fn signup(&self, activity_name: &str, email: &str) -> Result<Confirmation, ActivityError> {
        let record = self.catalog.lookup(activity_name)?;
        let email = ParticipantEmail::parse(email)?;

        {
            let mut roster = record.roster();
            if roster.iter().any(|p| p == email.as_str()) {
                return Err(ActivityError::AlreadySignedUp {
                    activity: record.name().to_owned(),
                    email: email.into_inner(),
                    context: None,
                });
            }
            roster.push(email.as_str().to_owned());
        }

        info!(activity = record.name(), email = %email, "Student signed up");
        Ok(Confirmation::signed_up(email.as_str(), record.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appends_to_the_end_of_the_roster() -> Result<(), ActivityError> {
        let catalog = ActivityCatalog::seeded()?;

        let confirmation = SignupService::new(&catalog).signup("Chess Club", "new@mergington.edu")?;

        assert_eq!(confirmation.message, "Signed up new@mergington.edu for Chess Club");
        let chess = catalog.lookup("Chess Club")?.snapshot();
        assert_eq!(chess.participants.last().map(String::as_str), Some("new@mergington.edu"));
        Ok(())
    }

    #[test]
    fn second_signup_is_rejected_without_changes() -> Result<(), ActivityError> {
        let catalog = ActivityCatalog::seeded()?;
        let service = SignupService::new(&catalog);

        service.signup("Soccer Team", "dup@mergington.edu")?;
        let count = catalog.lookup("Soccer Team")?.participant_count();
        let err = service.signup("Soccer Team", " dup@mergington.edu ").expect_err("duplicate");

        assert!(matches!(err, ActivityError::AlreadySignedUp { .. }));
        assert_eq!(catalog.lookup("Soccer Team")?.participant_count(), count);
        Ok(())
    }

    #[test]
    fn unknown_activity_wins_over_bad_email() -> Result<(), ActivityError> {
        let catalog = ActivityCatalog::seeded()?;

        let err = SignupService::new(&catalog).signup("Knitting", "not-an-email").expect_err("404");
        assert!(matches!(err, ActivityError::NotFound { .. }));
        Ok(())
    }

    #[test]
    fn malformed_email_is_a_validation_error() -> Result<(), ActivityError> {
        let catalog = ActivityCatalog::seeded()?;

        let err = SignupService::new(&catalog).signup("Chess Club", "").expect_err("422");
        assert!(matches!(err, ActivityError::Validation { .. }));
        Ok(())
    }
}
