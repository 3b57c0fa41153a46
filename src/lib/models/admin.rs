use std::fmt::Debug;

/// Shared secrets gating the mutation endpoints, one per mutation kind.
///
/// Loaded once at start and never changed. `None` means the deployment did
/// not configure that secret.
#[derive(Clone, Default)]
pub struct AdminTokens {
    pub edit: Option<String>,
    pub delete: Option<String>,
}

impl AdminTokens {
    pub fn new(edit: Option<String>, delete: Option<String>) -> Self {
        Self {
            edit: edit.filter(|t| !t.is_empty()),
            delete: delete.filter(|t| !t.is_empty()),
        }
    }
}

// secrets stay out of logs
impl Debug for AdminTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminTokens")
            .field("edit", &self.edit.as_ref().map(|_| "<set>"))
            .field("delete", &self.delete.as_ref().map(|_| "<set>"))
            .finish()
    }
}
