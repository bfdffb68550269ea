//! Cluster-manager source records, application side.
//!
//! These records are produced by the cluster-manager protocol layer (freshly
//! decoded from the wire) and are read-only to this crate. The wire layer
//! guarantees internal consistency — a set [`ResourceUsageReport`] is either
//! fully populated or absent, never partially constructed — but does not
//! guarantee that every optional field is present.
//!
//! The application state machine, as reported by the cluster manager:
//!
//! ```text
//!   New ──→ NewSaving ──→ Submitted ──→ Accepted ──→ Running ──→ Finished
//!                                                       │
//!                                                       ├──→ Failed
//!                                                       └──→ Killed
//! ```
//!
//! A `Finished` application carries a [`TerminalStatus`] flag naming which
//! terminal outcome it actually reached.

use serde::{Deserialize, Serialize};

/// Identity of a submitted application: the cluster start timestamp plus a
/// monotonically assigned numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ApplicationId {
    /// Start timestamp of the cluster that assigned this id, epoch millis.
    pub cluster_timestamp: u64,
    /// Sequence number within that cluster incarnation.
    pub id: u32,
}

impl ApplicationId {
    /// Create a new application id.
    pub fn new(cluster_timestamp: u64, id: u32) -> Self {
        Self {
            cluster_timestamp,
            id,
        }
    }
}

impl std::fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "application_{}_{:04}", self.cluster_timestamp, self.id)
    }
}

/// Lifecycle state of an application, as the cluster manager reports it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ApplicationState {
    /// Application has been created but not yet persisted.
    #[default]
    New,
    /// Application is being persisted to the state store.
    NewSaving,
    /// Application has been submitted to the scheduler.
    Submitted,
    /// Application has been accepted by the scheduler.
    Accepted,
    /// Application master is running.
    Running,
    /// Application finished; consult [`TerminalStatus`] for the outcome.
    Finished,
    /// Application failed.
    Failed,
    /// Application was killed by an operator or the system.
    Killed,
}

impl ApplicationState {
    /// Every application state, for exhaustive iteration.
    pub const ALL: [ApplicationState; 8] = [
        ApplicationState::New,
        ApplicationState::NewSaving,
        ApplicationState::Submitted,
        ApplicationState::Accepted,
        ApplicationState::Running,
        ApplicationState::Finished,
        ApplicationState::Failed,
        ApplicationState::Killed,
    ];

    /// Check if this is a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            ApplicationState::Finished | ApplicationState::Failed | ApplicationState::Killed
        )
    }
}

/// Terminal-status flag: which outcome a finished application reached.
///
/// The primary lifecycle state alone cannot distinguish the terminal
/// outcomes of a `Finished` application; this flag disambiguates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TerminalStatus {
    /// Application has not yet reported a terminal outcome.
    #[default]
    Undefined,
    /// Application completed successfully.
    Succeeded,
    /// Application failed.
    Failed,
    /// Application was killed.
    Killed,
}

impl TerminalStatus {
    /// Every terminal status, for exhaustive iteration.
    pub const ALL: [TerminalStatus; 4] = [
        TerminalStatus::Undefined,
        TerminalStatus::Succeeded,
        TerminalStatus::Failed,
        TerminalStatus::Killed,
    ];
}

/// Numeric scheduling priority assigned by the cluster manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Priority(pub i32);

impl Priority {
    /// Create a new priority.
    pub fn new(value: i32) -> Self {
        Self(value)
    }
}

/// A resource quantity: memory plus virtual cores.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Memory, in megabytes.
    pub memory_mb: u64,
    /// Virtual cores.
    pub vcores: u32,
}

impl Resource {
    /// Create a resource from a memory size in megabytes.
    pub fn from_memory(memory_mb: u64) -> Self {
        Self {
            memory_mb,
            vcores: 0,
        }
    }
}

/// Resource usage of a running application.
///
/// Absent for applications that have not yet been granted resources — a
/// freshly submitted application commonly has no usage report at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsageReport {
    /// Resources the application still needs.
    pub needed: Resource,
    /// Resources currently allocated and in use.
    pub used: Resource,
    /// Resources reserved on nodes but not yet allocated.
    pub reserved: Resource,
    /// Number of containers currently in use.
    pub num_used_containers: u32,
    /// Number of containers currently reserved.
    pub num_reserved_containers: u32,
}

/// Report describing a submitted application's identity, lifecycle state,
/// and resource usage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApplicationReport {
    /// Identity of the application. Required for conversion; the wire layer
    /// may nevertheless deliver a report without one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub application_id: Option<ApplicationId>,
    /// Current lifecycle state.
    pub state: ApplicationState,
    /// Terminal outcome flag, meaningful once the application finishes.
    pub terminal_status: TerminalStatus,
    /// Start time, epoch millis.
    pub start_time: i64,
    /// Finish time, epoch millis. Zero while the application is live.
    pub finish_time: i64,
    /// Submitting user.
    pub user: String,
    /// Queue the application was submitted to.
    pub queue: String,
    /// URL of the application's tracking page.
    pub tracking_url: String,
    /// Scheduling priority, if one was assigned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Resource usage, once the scheduler has granted resources.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_usage: Option<ResourceUsageReport>,
}

impl ApplicationReport {
    /// Create a report for the given application in the given state.
    pub fn new(application_id: ApplicationId, state: ApplicationState) -> Self {
        Self {
            application_id: Some(application_id),
            state,
            ..Self::default()
        }
    }

    /// Set the terminal-status flag.
    pub fn with_terminal_status(mut self, status: TerminalStatus) -> Self {
        self.terminal_status = status;
        self
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

    /// Set the submission queue.
    pub fn with_queue(mut self, queue: impl Into<String>) -> Self {
        self.queue = queue.into();
        self
    }

    /// Set the tracking URL.
    pub fn with_tracking_url(mut self, url: impl Into<String>) -> Self {
        self.tracking_url = url.into();
        self
    }

    /// Set the scheduling priority.
    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Attach a resource usage report.
    pub fn with_resource_usage(mut self, usage: ResourceUsageReport) -> Self {
        self.resource_usage = Some(usage);
        self
    }
}

/// Operational state of a scheduling queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueueState {
    /// Queue accepts new applications.
    #[default]
    Running,
    /// Queue accepts no new applications.
    Stopped,
    /// Queue is draining: running applications finish, new ones are refused.
    Draining,
}

impl QueueState {
    /// Every queue state, for exhaustive iteration.
    pub const ALL: [QueueState; 3] = [
        QueueState::Running,
        QueueState::Stopped,
        QueueState::Draining,
    ];

    /// The canonical uppercase rendering of this state.
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueState::Running => "RUNNING",
            QueueState::Stopped => "STOPPED",
            QueueState::Draining => "DRAINING",
        }
    }
}

impl std::fmt::Display for QueueState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hierarchical scheduling-queue descriptor.
///
/// Child order is meaningful and preserved by conversion. The tree is a
/// strict hierarchy owned by the cluster manager; there is no cycle risk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QueueDescriptor {
    /// Queue name.
    pub name: String,
    /// Operational state.
    pub state: QueueState,
    /// Configured capacity, as a fraction of the parent (0.0–1.0).
    pub capacity: f32,
    /// Maximum capacity fraction; negative means unbounded.
    pub maximum_capacity: f32,
    /// Currently used capacity fraction.
    pub current_capacity: f32,
    /// Child queues, in scheduler order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<QueueDescriptor>,
    /// Applications currently in this queue.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub applications: Vec<ApplicationReport>,
}

impl QueueDescriptor {
    /// Create a named queue in the given state.
    pub fn new(name: impl Into<String>, state: QueueState) -> Self {
        Self {
            name: name.into(),
            state,
            ..Self::default()
        }
    }

    /// Set the capacity figures.
    pub fn with_capacities(mut self, capacity: f32, maximum: f32, current: f32) -> Self {
        self.capacity = capacity;
        self.maximum_capacity = maximum;
        self.current_capacity = current;
        self
    }

    /// Append a child queue.
    pub fn with_child(mut self, child: QueueDescriptor) -> Self {
        self.children.push(child);
        self
    }

    /// Append an application report.
    pub fn with_application(mut self, report: ApplicationReport) -> Self {
        self.applications.push(report);
        self
    }
}
