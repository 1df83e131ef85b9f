//! Users and their onboarding progress.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// An authenticated caller. Every task, plan and reflection is scoped to one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub created_at: Timestamp,
}

/// Onboarding step recorded once the first tasks exist.
pub const ONBOARDING_COMPLETED: &str = "completed";

/// Onboarding step recorded once the demo has been watched.
pub const ONBOARDING_FIRST_TASKS: &str = "first_tasks";

/// Per-user onboarding progress.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OnboardingState {
    pub user_id: u64,
    pub current_step: String,
    pub demo_completed: bool,
    pub first_tasks_created: bool,
    pub completed_at: Option<Timestamp>,
    pub updated_at: Option<Timestamp>,
}
