//! Cluster-manager source records, job and task side.
//!
//! Jobs carry their own lifecycle enumeration, distinct from the
//! application-side [`ApplicationState`](crate::cluster::ApplicationState):
//!
//! ```text
//!   New ──→ Inited ──→ Running ──→ Succeeded
//!                         │
//!                         ├──→ Failed / Error
//!                         └──→ KillWait ──→ Killed
//! ```

use serde::{Deserialize, Serialize};

use crate::cluster::{ApplicationId, Priority};

/// Identity of a job: the owning application plus a job sequence number.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobId {
    /// Identity of the application this job belongs to. Required for
    /// conversion; the wire layer may nevertheless deliver an id without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub app_id: Option<ApplicationId>,
    /// Job sequence number within the application.
    pub id: u32,
}

impl JobId {
    /// Create a job id under the given application.
    pub fn new(app_id: ApplicationId, id: u32) -> Self {
        Self {
            app_id: Some(app_id),
            id,
        }
    }
}

/// Lifecycle state of a job, as the cluster manager reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JobState {
    /// Job record exists but initialization has not started.
    #[default]
    New,
    /// Job has been initialized.
    Inited,
    /// Job is executing.
    Running,
    /// Job completed successfully.
    Succeeded,
    /// Job failed.
    Failed,
    /// Kill has been requested; tasks are being torn down.
    KillWait,
    /// Job was killed.
    Killed,
    /// Job hit an internal error.
    Error,
}

impl JobState {
    /// Every job state, for exhaustive iteration.
    pub const ALL: [JobState; 8] = [
        JobState::New,
        JobState::Inited,
        JobState::Running,
        JobState::Succeeded,
        JobState::Failed,
        JobState::KillWait,
        JobState::Killed,
        JobState::Error,
    ];

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            JobState::Succeeded | JobState::Failed | JobState::Killed | JobState::Error
        )
    }
}

/// Lifecycle state of a task within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskState {
    /// Task record exists but has not been scheduled.
    #[default]
    New,
    /// Task is scheduled, waiting for a container.
    Scheduled,
    /// Task is executing.
    Running,
    /// Task completed successfully.
    Succeeded,
    /// Task failed.
    Failed,
    /// Kill has been requested.
    KillWait,
    /// Task was killed.
    Killed,
}

impl TaskState {
    /// Every task state, for exhaustive iteration.
    pub const ALL: [TaskState; 7] = [
        TaskState::New,
        TaskState::Scheduled,
        TaskState::Running,
        TaskState::Succeeded,
        TaskState::Failed,
        TaskState::KillWait,
        TaskState::Killed,
    ];
}

/// Kind of task within a job.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskType {
    /// Input-processing task.
    Map,
    /// Aggregation task.
    Reduce,
}

impl TaskType {
    /// Every task type, for exhaustive iteration.
    pub const ALL: [TaskType; 2] = [TaskType::Map, TaskType::Reduce];
}

/// Report describing a job's identity and lifecycle state.
///
/// Job reports carry no resource usage; the corresponding client-facing
/// fields take their default (zero) values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JobReport {
    /// Identity of the job. Required for conversion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_id: Option<JobId>,
    /// Current lifecycle state.
    pub state: JobState,
    /// Start time, epoch millis.
    pub start_time: i64,
    /// Finish time, epoch millis. Zero while the job is live.
    pub finish_time: i64,
    /// Submitting user.
    pub user: String,
    /// Scheduling priority, if one was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
}

impl JobReport {
    /// Create a report for the given job in the given state.
    pub fn new(job_id: JobId, state: JobState) -> Self {
        Self {
            job_id: Some(job_id),
            state,
            ..Self::default()
        }
    }

    /// Set start and finish times.
    pub fn with_times(mut self, start_time: i64, finish_time: i64) -> Self {
        self.start_time = start_time;
        self.finish_time = finish_time;
        self
    }

    /// Set the submitting user.
    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = user.into();
        self
    }

    /// Set the scheduling priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }
}
