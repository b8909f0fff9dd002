use crate::catalog::ActivityCatalog;
use crate::error::ActivityError;
use crate::model::{ActivityDirectory, ActivityView};

/// Read-only access to the catalog.
#[derive(Debug, Clone, Copy)]
pub struct QueryService<'a> {
    catalog: &'a ActivityCatalog,
}

impl<'a> QueryService<'a> {
    #[must_use]
    pub const fn new(catalog: &'a ActivityCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub fn list_activities(&self) -> ActivityDirectory {
        ActivityDirectory(
            self.catalog
                .get_all()
                .into_iter()
                .map(|(name, activity)| (name, ActivityView::from(activity)))
                .collect(),
        )
    }

    /// # Errors
    /// Returns [`ActivityError::NotFound`] for an unknown activity.
    pub fn get_activity(&self, name: &str) -> Result<ActivityView, ActivityError> {
        self.catalog.lookup(name).map(|record| record.snapshot().into())
    }
}
