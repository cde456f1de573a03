use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// Stored under the `users` key as a map keyed by username; the username is the map key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserCredential {
    #[serde(alias = "password")]
    pub password_hash: String,
    pub created_at: i64,       // milliseconds since the Unix epoch
}

pub type UserMap = BTreeMap<String, UserCredential>;
