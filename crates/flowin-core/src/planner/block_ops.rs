//! Time block operations for the Planner.

use log::{debug, warn};

use super::Planner;
use crate::{
    error::Result,
    models::{NewTimeBlock, RemovedBlock, ScheduledBlock, TimeBlockChanges, User},
    params::{AddTimeBlock, Id, UpdateTimeBlock},
};

impl Planner {
    /// Schedules one of the user's tasks into one of their plans.
    ///
    /// The result carries the recomputed plan total, the blocks the new one
    /// overlaps and the overallocation verdict.
    pub async fn add_time_block(&self, user: &User, params: &AddTimeBlock) -> Result<ScheduledBlock> {
        let block = NewTimeBlock::try_from(params)?;

        let user_id = user.id;
        let tz = self.time_zone.clone();
        let scheduled = self
            .with_db(move |db| db.add_time_block(user_id, &block, &tz))
            .await?;

        log_schedule(&scheduled);
        Ok(scheduled)
    }

    /// Applies a partial update to a time block.
    pub async fn update_time_block(
        &self,
        user: &User,
        params: &UpdateTimeBlock,
    ) -> Result<ScheduledBlock> {
        let changes = TimeBlockChanges::try_from(params)?;

        let (user_id, block_id) = (user.id, params.id);
        let tz = self.time_zone.clone();
        let scheduled = self
            .with_db(move |db| db.update_time_block(user_id, block_id, &changes, &tz))
            .await?;

        log_schedule(&scheduled);
        Ok(scheduled)
    }

    /// Removes a time block from its plan.
    pub async fn delete_time_block(&self, user: &User, params: &Id) -> Result<RemovedBlock> {
        let (user_id, block_id) = (user.id, params.id);
        self.with_db(move |db| db.delete_time_block(user_id, block_id))
            .await
    }
}

fn log_schedule(scheduled: &ScheduledBlock) {
    debug!(
        "Time block {} scheduled, plan total {} minutes",
        scheduled.block.id, scheduled.total_planned_minutes
    );
    if !scheduled.overlaps_with.is_empty() {
        warn!(
            "Time block {} overlaps blocks {:?}",
            scheduled.block.id, scheduled.overlaps_with
        );
    }
}
