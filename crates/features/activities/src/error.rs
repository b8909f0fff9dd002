use std::borrow::Cow;

/// A specialized [`ActivityError`] enum of this crate.
#[mhs_derive::mhs_error]
pub enum ActivityError {
    /// The requested activity does not exist.
    #[error("Activity not found{}: {name}", format_context(.context))]
    NotFound { name: String, context: Option<Cow<'static, str>> },
    /// The student is already in the roster.
    #[error("Already signed up{}: {email} for {activity}", format_context(.context))]
    AlreadySignedUp { activity: String, email: String, context: Option<Cow<'static, str>> },
    /// The student is not in the roster.
    #[error("Not registered{}: {email} for {activity}", format_context(.context))]
    NotRegistered { activity: String, email: String, context: Option<Cow<'static, str>> },
    /// A request parameter is missing or malformed.
    #[error("Validation error{}: {message}", format_context(.context))]
    Validation { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal activities error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl ActivityError {
    pub(crate) fn not_found(name: &str) -> Self {
        Self::NotFound { name: name.to_owned(), context: None }
    }

    pub(crate) fn validation(message: impl Into<Cow<'static, str>>) -> Self {
        Self::Validation { message: message.into(), context: None }
    }

    /// Client-facing explanation rendered as `detail` in error bodies.
    ///
    /// Internal errors never expose their message.
    #[must_use]
    pub fn detail(&self) -> Cow<'static, str> {
        match self {
            Self::NotFound { .. } => Cow::Borrowed("Activity not found"),
            Self::AlreadySignedUp { .. } => {
                Cow::Borrowed("Student is already signed up for this activity")
            },
            Self::NotRegistered { .. } => {
                Cow::Borrowed("Student is not registered for this activity")
            },
            Self::Validation { message, .. } => message.clone(),
            Self::Internal { .. } => Cow::Borrowed("Internal server error"),
        }
    }
}
