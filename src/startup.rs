use tokio_cron_scheduler::JobScheduler;

use crate::error::AppError;

/// Creates and starts the job scheduler that per-guild sync jobs are added to.
///
/// Jobs can be added after the scheduler has started; guild jobs are registered as guilds
/// become available.
///
/// # Returns
/// - `Ok(JobScheduler)` - Running scheduler
/// - `Err(AppError::SchedulerErr)` - Failed to create or start the scheduler
pub async fn start_scheduler() -> Result<JobScheduler, AppError> {
    let scheduler = JobScheduler::new().await?;
    scheduler.start().await?;

    tracing::info!("Voice role sync scheduler started");

    Ok(scheduler)
}
