//! Values returned by service operations beyond the stored entities.

use serde::{Deserialize, Serialize};

/// Outcome of a cascading chat delete
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeletedChat {
    /// Whether a chat row existed and was removed
    pub chat_existed: bool,
    pub messages_removed: u64,
    pub memberships_removed: u64,
}
