use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    #[serde(alias = "r")]
    ReadOnly,
    #[serde(alias = "rw")]
    ReadWrite,
}

impl Permission {
    pub fn can_write(self) -> bool {
        self == Permission::ReadWrite
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserRecord {
    pub password: String,
    pub permission: Permission,
}

impl UserRecord {
    pub fn new(password: &str, permission: Permission) -> Self {
        Self {
            password: password.to_string(),
            permission,
        }
    }
}

/// One read-write account and one read-only account.
pub fn default_users() -> HashMap<String, UserRecord> {
    let mut users = HashMap::new();
    users.insert(
        "user".to_string(),
        UserRecord::new("123456", Permission::ReadWrite),
    );
    users.insert(
        "guest".to_string(),
        UserRecord::new("guest", Permission::ReadOnly),
    );
    users
}
