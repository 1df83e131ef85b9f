//! Reflection operations for the Planner.

use super::Planner;
use crate::{
    display::Reflections,
    error::Result,
    models::{Reflection, User},
    params::{CreateReflection, RecentReflections, ReflectionForPlan, UpdateReflection},
};

impl Planner {
    /// Records the end-of-day reflection of a plan. Each plan has at most one.
    pub async fn create_reflection(&self, user: &User, params: &CreateReflection) -> Result<Reflection> {
        params.validate()?;

        let user_id = user.id;
        let params = params.clone();
        self.with_db(move |db| db.create_reflection(user_id, &params))
            .await
    }

    /// Retrieves the reflection of a plan, if recorded.
    pub async fn get_reflection_by_plan(
        &self,
        user: &User,
        params: &ReflectionForPlan,
    ) -> Result<Option<Reflection>> {
        let (user_id, plan_id) = (user.id, params.daily_plan_id);
        self.with_db(move |db| db.get_reflection_by_plan(user_id, plan_id))
            .await
    }

    /// Applies a partial update to a reflection.
    pub async fn update_reflection(&self, user: &User, params: &UpdateReflection) -> Result<Reflection> {
        params.validate()?;

        let user_id = user.id;
        let params = params.clone();
        self.with_db(move |db| db.update_reflection(user_id, &params))
            .await
    }

    /// The user's latest reflections, newest first.
    pub async fn recent_reflections(&self, user: &User, params: &RecentReflections) -> Result<Reflections> {
        let limit = params.validate()?;

        let user_id = user.id;
        let reflections = self
            .with_db(move |db| db.recent_reflections(user_id, limit))
            .await?;
        Ok(Reflections(reflections))
    }
}
