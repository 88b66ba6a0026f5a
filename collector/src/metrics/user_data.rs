use super::{
    lenient_string,
    FieldMap,
};
use serde::Deserialize;

/// One entry of `get_users`' `response.data`.
#[derive(Debug, Clone, Deserialize)]
pub struct User {
    /// `"1"` for home users, `"0"` otherwise.
    #[serde(default, deserialize_with = "lenient_string")]
    pub is_home_user: String,
}

impl User {
    pub fn is_home_user(&self) -> bool {
        self.is_home_user == "1"
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserSnapshot {
    pub total_users: i64,
    pub home_users: i64,
}

impl UserSnapshot {
    pub fn from_users(users: &[User]) -> Self {
        Self {
            total_users: users.len() as i64,
            home_users: users.iter().filter(|user| user.is_home_user()).count() as i64,
        }
    }

    pub fn fields(&self) -> FieldMap {
        FieldMap::from([
            ("total_users".to_string(), self.total_users),
            ("home_users".to_string(), self.home_users),
        ])
    }
}
