//! Waiting on asynchronous jobs.

use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::client::CfClient;
use crate::error::{CfError, Result};
use crate::models::{Job, JobState};
use crate::resolve::{AsyncOperation, JobId};

/// How often and how long to poll a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JobWaitOptions {
    /// Delay between polls.
    pub interval: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for JobWaitOptions {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            timeout: Duration::from_secs(300),
        }
    }
}

impl CfClient {
    /// Poll a job until it completes.
    ///
    /// # Errors
    ///
    /// Returns [`CfError::JobFailed`] if the job ends in `FAILED`,
    /// [`CfError::JobTimeout`] if it is still running after
    /// `options.timeout`, or any error from fetching the job.
    #[tracing::instrument(skip(self))]
    pub async fn wait_for_job(&self, job: &JobId, options: JobWaitOptions) -> Result<Job> {
        let started = Instant::now();

        loop {
            let current = self.jobs().get(job.as_str()).await?;
            match current.state {
                JobState::Complete => return Ok(current),
                JobState::Failed => {
                    tracing::warn!(job = %job, operation = %current.operation, "Job failed");
                    return Err(CfError::JobFailed {
                        job_guid: current.guid,
                        errors: current.errors,
                    });
                }
                JobState::Processing | JobState::Polling => {}
            }

            let waited = started.elapsed();
            if waited >= options.timeout {
                return Err(CfError::JobTimeout {
                    job_guid: job.to_string(),
                    waited,
                });
            }

            tracing::debug!(job = %job, state = ?current.state, "Job still running");
            sleep(options.interval.min(options.timeout - waited)).await;
        }
    }

    /// Finish an operation: wait for its job if it was deferred.
    ///
    /// Returns the immediate result, or `None` once a deferred job has
    /// completed (jobs do not carry the resulting resource).
    ///
    /// # Errors
    ///
    /// Returns any error from [`wait_for_job`](Self::wait_for_job).
    pub async fn complete<T>(
        &self,
        operation: AsyncOperation<T>,
        options: JobWaitOptions,
    ) -> Result<Option<T>> {
        match operation {
            AsyncOperation::Immediate(value) => Ok(Some(value)),
            AsyncOperation::Deferred(job) => {
                self.wait_for_job(&job, options).await?;
                Ok(None)
            }
        }
    }
}
