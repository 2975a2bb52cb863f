//! Job lifecycle: creation, assignment and status transitions.

use chrono::Utc;
use fieldnav_core::error::{FieldnavError, Result};
use fieldnav_core::models::{
    AuditEvent, AuditEventKind, AuditStatus, Job, JobId, JobStatus, NewJob, NewNotification,
    NotificationData, NotificationKind, Worker, WorkerId, WorkerStatus, WorkerSummary,
};
use fieldnav_geo::validate_coordinates;

use crate::effects::SideEffect;
use crate::models::{AssignmentOutcome, JobView, TransitionOutcome};
use crate::service::DispatchService;

impl DispatchService {
    /// Create a pending job
    pub async fn create_job(&self, job: NewJob) -> Result<Job> {
        validate_coordinates(&job.location)?;
        if job.title.trim().is_empty() {
            return Err(FieldnavError::invalid_input("title", "must not be empty"));
        }

        let _commit = self.begin_commit().await;
        let job = self.stores().jobs.create_job(job, Utc::now()).await?;

        tracing::info!(job_id = %job.id, title = %job.title, "Job created");
        Ok(job)
    }

    pub async fn get_job(&self, id: JobId) -> Result<Job> {
        self.stores()
            .jobs
            .get_job(id)
            .await?
            .ok_or_else(|| FieldnavError::not_found("Job", id))
    }

    pub async fn list_jobs(&self) -> Result<Vec<Job>> {
        self.stores().jobs.list_jobs().await
    }

    /// Jobs in one status, each with a summary of its assignee
    pub async fn list_jobs_by_status(&self, status: JobStatus) -> Result<Vec<JobView>> {
        let jobs = self.stores().jobs.list_jobs_by_status(status).await?;

        let mut views = Vec::with_capacity(jobs.len());
        for job in jobs {
            let assigned_worker = match &job.assigned_worker_id {
                Some(worker_id) => self
                    .stores()
                    .workers
                    .get_worker(worker_id)
                    .await?
                    .map(|worker| WorkerSummary::from(&worker)),
                None => None,
            };
            views.push(JobView { job, assigned_worker });
        }
        Ok(views)
    }

    pub async fn list_jobs_by_worker(
        &self,
        worker_id: &WorkerId,
        status: Option<JobStatus>,
    ) -> Result<Vec<Job>> {
        self.stores().jobs.list_jobs_by_worker(worker_id, status).await
    }

    /// Assign a pending job to an available worker
    pub async fn assign(&self, job_id: JobId, worker_id: &WorkerId) -> Result<AssignmentOutcome> {
        let (job, worker, outbox) = {
            let _commit = self.begin_commit().await;

            let mut job = self.get_job(job_id).await?;
            let mut worker = self.require_worker(worker_id).await?;
            ensure_available(&worker)?;
            if job.status != JobStatus::Pending {
                return Err(FieldnavError::InvalidState {
                    job_id,
                    current: job.status,
                    required: JobStatus::Pending.to_string(),
                });
            }

            job.assigned_worker_id = Some(worker.id.clone());
            job.status = JobStatus::Assigned;
            worker.current_status = WorkerStatus::Busy;

            self.stores().jobs.save_job(&job).await?;
            self.stores().workers.set_status(&worker.id, WorkerStatus::Busy).await?;

            tracing::info!(job_id = %job_id, worker_id = %worker.id, "Job assigned");
            let outbox = assignment_effects(&job, &worker);
            (job, worker, outbox)
        };

        let audit = self.dispatch(outbox).await.pop().unwrap_or(AuditStatus::Skipped);

        Ok(AssignmentOutcome {
            job,
            worker: WorkerSummary::from(&worker),
            previous_worker_id: None,
            assigned_at: Utc::now(),
            audit,
        })
    }

    /// Move a job to another available worker, releasing the previous assignee.
    ///
    /// Completed jobs cannot be reassigned.
    pub async fn reassign(&self, job_id: JobId, worker_id: &WorkerId) -> Result<AssignmentOutcome> {
        let (job, worker, previous, outbox) = {
            let _commit = self.begin_commit().await;

            let mut job = self.get_job(job_id).await?;
            let mut worker = self.require_worker(worker_id).await?;
            ensure_available(&worker)?;
            if job.status == JobStatus::Completed {
                return Err(FieldnavError::InvalidState {
                    job_id,
                    current: job.status,
                    required: "pending, assigned or in_progress".to_string(),
                });
            }

            let previous = job.assigned_worker_id.take();
            if let Some(previous_id) = previous.as_ref().filter(|id| *id != &worker.id) {
                match self.stores().workers.set_status(previous_id, WorkerStatus::Available).await {
                    Ok(()) => {}
                    Err(FieldnavError::NotFound { .. }) => {
                        tracing::warn!(worker_id = %previous_id, "Previous assignee no longer exists");
                    }
                    Err(e) => return Err(e),
                }
            }

            job.assigned_worker_id = Some(worker.id.clone());
            job.status = JobStatus::Assigned;
            worker.current_status = WorkerStatus::Busy;

            self.stores().jobs.save_job(&job).await?;
            self.stores().workers.set_status(&worker.id, WorkerStatus::Busy).await?;

            tracing::info!(
                job_id = %job_id,
                worker_id = %worker.id,
                previous_worker_id = ?previous.as_ref().map(|id| id.as_str()),
                "Job reassigned"
            );
            let outbox = assignment_effects(&job, &worker);
            (job, worker, previous, outbox)
        };

        let audit = self.dispatch(outbox).await.pop().unwrap_or(AuditStatus::Skipped);

        Ok(AssignmentOutcome {
            job,
            worker: WorkerSummary::from(&worker),
            previous_worker_id: previous,
            assigned_at: Utc::now(),
            audit,
        })
    }

    /// Apply a status transition from the lifecycle table.
    ///
    /// Moving a job to `assigned` requires a worker and goes through [`Self::assign`].
    pub async fn transition_status(
        &self,
        job_id: JobId,
        status: JobStatus,
    ) -> Result<TransitionOutcome> {
        let (job, previous_status, outbox) = {
            let _commit = self.begin_commit().await;

            let mut job = self.get_job(job_id).await?;
            let previous_status = job.status;
            if !previous_status.can_transition_to(status) {
                return Err(FieldnavError::InvalidTransition {
                    from: previous_status,
                    to: status,
                });
            }
            if status.has_assignee() && job.assigned_worker_id.is_none() {
                return Err(FieldnavError::InvalidState {
                    job_id,
                    current: previous_status,
                    required: "an assigned worker; use assign_job (POST /api/jobs/{id}/assign)"
                        .to_string(),
                });
            }

            let assignee = match &job.assigned_worker_id {
                Some(worker_id) => self.stores().workers.get_worker(worker_id).await?,
                None => None,
            };

            job.status = status;
            let mut outbox = Vec::new();

            if let Some(worker) = &assignee {
                match status {
                    JobStatus::InProgress => {
                        self.stores().workers.set_status(&worker.id, WorkerStatus::Busy).await?;
                        outbox.push(SideEffect::Audit(
                            AuditEvent::new(worker.id.clone(), AuditEventKind::JobAssignment, Utc::now())
                                .with_job(job.id),
                        ));
                    }
                    JobStatus::Completed => {
                        self.stores()
                            .workers
                            .set_status(&worker.id, WorkerStatus::Available)
                            .await?;
                        outbox.push(SideEffect::Audit(
                            AuditEvent::new(worker.id.clone(), AuditEventKind::JobCompletion, Utc::now())
                                .with_job(job.id)
                                .with_location(worker.current_location),
                        ));
                    }
                    JobStatus::Pending => {
                        self.stores()
                            .workers
                            .set_status(&worker.id, WorkerStatus::Available)
                            .await?;
                    }
                    JobStatus::Assigned => {}
                }
            }
            if status == JobStatus::Pending {
                job.assigned_worker_id = None;
            }

            self.stores().jobs.save_job(&job).await?;

            tracing::info!(
                job_id = %job_id,
                from = %previous_status,
                to = %status,
                "Job status changed"
            );
            (job, previous_status, outbox)
        };

        let audit = self.dispatch(outbox).await.pop().unwrap_or(AuditStatus::Skipped);

        Ok(TransitionOutcome {
            job,
            previous_status,
            updated_at: Utc::now(),
            audit,
        })
    }

    pub(crate) async fn require_worker(&self, worker_id: &WorkerId) -> Result<Worker> {
        self.stores()
            .workers
            .get_worker(worker_id)
            .await?
            .ok_or_else(|| FieldnavError::not_found("Worker", worker_id))
    }
}

fn ensure_available(worker: &Worker) -> Result<()> {
    if worker.is_available() {
        Ok(())
    } else {
        Err(FieldnavError::WorkerUnavailable {
            worker_id: worker.id.clone(),
            status: worker.current_status,
        })
    }
}

fn assignment_effects(job: &Job, worker: &Worker) -> Vec<SideEffect> {
    vec![
        SideEffect::Notify(
            NewNotification::new(
                worker.id.as_str(),
                NotificationKind::JobAssignment,
                "New Job Assignment",
                format!("You have been assigned to: {}", job.title),
            )
            .with_data(NotificationData::JobAssignment {
                job_id: job.id,
                job_title: job.title.clone(),
                location: job.location,
            }),
        ),
        SideEffect::Audit(
            AuditEvent::new(worker.id.clone(), AuditEventKind::JobAssignment, Utc::now())
                .with_job(job.id),
        ),
    ]
}
