/// Identity of the user acting on plans.
///
/// Passed explicitly to controllers and services instead of being read from
/// ambient storage.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Session {
    pub user_id: String,
}

impl Session {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    pub fn owns(&self, owner_id: &str) -> bool {
        self.user_id == owner_id
    }
}
