use serde::{Deserialize, Serialize};

use super::primitives::*;

/// Inclusive bounds for the per-user inactivity timeout, in seconds.
pub const INACTIVITY_TIMEOUT_MIN_SECS: u32 = 10;
pub const INACTIVITY_TIMEOUT_MAX_SECS: u32 = 600;
pub const INACTIVITY_TIMEOUT_DEFAULT_SECS: u32 = 300;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UserValues {
    pub id: UserId,
    pub version: u32,
    pub username: String,
    pub role: Role,
    pub status: Status,
    pub inactivity_timeout_secs: u32,
}

pub fn inactivity_timeout_in_range(secs: u32) -> bool {
    (INACTIVITY_TIMEOUT_MIN_SECS..=INACTIVITY_TIMEOUT_MAX_SECS).contains(&secs)
}
