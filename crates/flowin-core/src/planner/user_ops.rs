//! Identity and onboarding operations for the Planner.

use log::{debug, info};

use super::Planner;
use crate::{
    error::{PlannerError, Result},
    models::{OnboardingState, Task, User},
    params::BatchCreateTasks,
    validate::check_email,
};

impl Planner {
    /// Resolves the caller identity to a user, registering the email on first
    /// use.
    ///
    /// # Errors
    ///
    /// * `PlannerError::Unauthorized` - When no email was supplied
    /// * `PlannerError::InvalidInput` - When the email is malformed
    pub async fn authenticate(&self, email: Option<&str>) -> Result<User> {
        let email = email
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| PlannerError::Unauthorized {
                reason: "No user identity was provided".to_string(),
            })?;
        check_email(email)?;

        let email = email.to_lowercase();
        self.with_db(move |db| db.upsert_user(&email)).await
    }

    /// Returns the user's onboarding progress, if any was recorded.
    pub async fn onboarding_status(&self, user: &User) -> Result<Option<OnboardingState>> {
        let user_id = user.id;
        self.with_db(move |db| db.get_onboarding(user_id)).await
    }

    /// Records that the user finished the product demo.
    pub async fn complete_demo(&self, user: &User) -> Result<OnboardingState> {
        debug!("Completing demo for user {}", user.id);
        let user_id = user.id;
        self.with_db(move |db| db.complete_demo(user_id)).await
    }

    /// Creates the user's first one to three tasks and completes onboarding.
    ///
    /// The tasks and the onboarding state are saved together or not at all.
    pub async fn create_first_tasks(
        &self,
        user: &User,
        params: &BatchCreateTasks,
    ) -> Result<Vec<Task>> {
        params.validate()?;

        let user_id = user.id;
        let tasks = params.tasks.clone();
        let created = self
            .with_db(move |db| db.batch_create_tasks(user_id, &tasks))
            .await?;

        info!(
            "Onboarding completed for user {user_id} with {} tasks",
            created.len()
        );
        Ok(created)
    }
}
