//! Client-facing status records.
//!
//! These are the records handed to job-submission clients. Their
//! enumerations are client-stable: they evolve independently of the
//! cluster-manager enumerations in [`cluster`](crate::cluster) and
//! [`job`](crate::job), and the mapping between the two lives in
//! [`convert`](crate::convert).
//!
//! All records here are plain owned values — conversion allocates fresh
//! output and clients may hold or mutate their copy without affecting
//! anyone else.

use serde::{Deserialize, Serialize};

/// Client-facing job identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct JobRef {
    /// Start timestamp of the cluster that owns the job, epoch millis.
    pub cluster_timestamp: u64,
    /// Job number within that cluster incarnation.
    pub id: u32,
}

impl JobRef {
    /// Create a new job reference.
    pub fn new(cluster_timestamp: u64, id: u32) -> Self {
        Self {
            cluster_timestamp,
            id,
        }
    }
}

impl std::fmt::Display for JobRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "job_{}_{:04}", self.cluster_timestamp, self.id)
    }
}

/// Client-stable job lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum State {
    /// Job is being prepared for execution.
    Prep,
    /// Job is running.
    Running,
    /// Job completed successfully.
    Succeeded,
    /// Job failed.
    Failed,
    /// Job was killed.
    Killed,
}

impl State {
    /// The canonical uppercase rendering of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            State::Prep => "PREP",
            State::Running => "RUNNING",
            State::Succeeded => "SUCCEEDED",
            State::Failed => "FAILED",
            State::Killed => "KILLED",
        }
    }

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, State::Succeeded | State::Failed | State::Killed)
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Client-stable job priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum JobPriority {
    /// Highest priority.
    VeryHigh,
    /// High priority.
    High,
    /// Normal priority.
    Normal,
    /// Low priority.
    Low,
    /// Lowest priority.
    VeryLow,
    /// Priority left to the scheduler's default.
    Default,
    /// Priority not assigned or outside the defined range.
    Undefined,
}

/// Client-stable completion status of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskCompletionStatus {
    /// Task has not started.
    Pending,
    /// Task is running.
    Running,
    /// Task completed successfully.
    Complete,
    /// Task was killed.
    Killed,
    /// Task failed.
    Failed,
}

/// Client-stable task kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskKind {
    /// Input-processing task.
    Map,
    /// Aggregation task.
    Reduce,
}

/// Client-facing queue state.
///
/// Rendered lowercase. States the client enumeration does not know are
/// parsed as [`QueueState::Undefined`] rather than rejected, so the client
/// model tolerates source states introduced after it was frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueueState {
    /// Queue accepts new jobs.
    Running,
    /// Queue accepts no new jobs.
    Stopped,
    /// Queue state unknown to this client model.
    #[default]
    Undefined,
}

impl QueueState {
    /// The canonical lowercase rendering of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueState::Running => "running",
            QueueState::Stopped => "stopped",
            QueueState::Undefined => "undefined",
        }
    }

    /// Look a state up by its lowercase rendering, falling back to
    /// `Undefined` for anything unrecognized.
    pub fn from_str_lossy(s: &str) -> Self {
        match s {
            "running" => QueueState::Running,
            "stopped" => QueueState::Stopped,
            _ => QueueState::Undefined,
        }
    }
}

impl std::fmt::Display for QueueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified job status record handed to job-submission clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobStatus {
    /// Client-facing job identifier.
    pub job: JobRef,
    /// Lifecycle state.
    pub state: State,
    /// Start time, epoch millis.
    pub start_time: i64,
    /// Finish time, epoch millis.
    pub finish_time: i64,
    /// Submitting user.
    pub username: String,
    /// Queue the job runs in.
    pub queue: String,
    /// Path of the job's submission file.
    pub job_file: String,
    /// URL of the job's tracking page.
    pub tracking_url: String,
    /// Free-form scheduling information.
    pub scheduling_info: String,
    /// Job priority.
    pub priority: JobPriority,
    /// Memory still needed, megabytes.
    pub needed_mem: u64,
    /// Memory in use, megabytes.
    pub used_mem: u64,
    /// Memory reserved, megabytes.
    pub reserved_mem: u64,
    /// Execution slots in use.
    pub num_used_slots: u32,
    /// Execution slots reserved.
    pub num_reserved_slots: u32,
}

/// Client-facing queue description, mirroring the source queue hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueueInfo {
    /// Queue name.
    pub name: String,
    /// Queue state.
    pub state: QueueState,
    /// Human-readable capacity summary.
    pub scheduling_info: String,
    /// Statuses of the jobs in this queue.
    pub jobs: Vec<JobStatus>,
    /// Child queues, in source order.
    pub children: Vec<QueueInfo>,
}
