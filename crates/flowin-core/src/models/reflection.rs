//! End-of-day reflection model.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A user's review of one daily plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Reflection {
    pub id: u64,
    pub user_id: u64,
    pub daily_plan_id: u64,
    pub completed_tasks_count: u32,
    pub total_tasks_count: u32,
    /// 1 (poor) to 5 (great)
    pub satisfaction_rating: u8,
    /// 1 (drained) to 5 (energized)
    pub energy_level: Option<u8>,
    pub achievements: Option<String>,
    pub challenges: Option<String>,
    pub learnings: Option<String>,
    pub tomorrow_priorities: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
