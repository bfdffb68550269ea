//! The translation layer: cluster-manager records → client-facing status.
//!
//! Every conversion here is a pure function. Inputs are read-only snapshots,
//! outputs are freshly allocated, and no state is shared across calls, so
//! conversions may run concurrently without synchronization.
//!
//! The source and target enumerations evolve independently, so each pair
//! gets an explicit mapping function written as an exhaustive `match` —
//! the compiler rejects a source value with no assigned target. Several
//! source values may narrow onto one target value; a source value added
//! after the client enumeration was frozen maps to the nearest compatible
//! target rather than being refused (see [`from_application_state`] on
//! `NewSaving`).

use serde::{Deserialize, Serialize};

use crate::cluster::{
    ApplicationReport, ApplicationState, Priority, QueueDescriptor, ResourceUsageReport,
    TerminalStatus,
};
use crate::error::{ConvertError, ConvertResult};
use crate::job::{JobReport, JobState, TaskState, TaskType};
use crate::status::{
    JobPriority, JobRef, JobStatus, QueueInfo, State, TaskCompletionStatus, TaskKind,
};
use crate::{cluster, status};

/// Map an application lifecycle state onto the client-stable [`State`].
///
/// The primary state alone cannot distinguish the outcomes of a `Finished`
/// application, so the terminal-status flag disambiguates. A finished
/// application with an `Undefined` terminal status is treated as killed:
/// success and failure must be positively reported.
///
/// `NewSaving` postdates the client enumeration and maps to `Prep`, the
/// nearest compatible value.
pub fn from_application_state(state: ApplicationState, terminal: TerminalStatus) -> State {
    match state {
        ApplicationState::New
        | ApplicationState::NewSaving
        | ApplicationState::Submitted
        | ApplicationState::Accepted => State::Prep,
        ApplicationState::Running => State::Running,
        ApplicationState::Finished => match terminal {
            TerminalStatus::Succeeded => State::Succeeded,
            TerminalStatus::Failed => State::Failed,
            TerminalStatus::Killed | TerminalStatus::Undefined => State::Killed,
        },
        ApplicationState::Failed => State::Failed,
        ApplicationState::Killed => State::Killed,
    }
}

/// Map a job lifecycle state onto the client-stable [`State`].
pub fn from_job_state(state: JobState) -> State {
    match state {
        JobState::New | JobState::Inited => State::Prep,
        JobState::Running => State::Running,
        JobState::Succeeded => State::Succeeded,
        JobState::Failed | JobState::Error => State::Failed,
        JobState::KillWait | JobState::Killed => State::Killed,
    }
}

/// Map a task lifecycle state onto the client-stable [`TaskCompletionStatus`].
pub fn from_task_state(state: TaskState) -> TaskCompletionStatus {
    match state {
        TaskState::New | TaskState::Scheduled => TaskCompletionStatus::Pending,
        TaskState::Running => TaskCompletionStatus::Running,
        TaskState::Succeeded => TaskCompletionStatus::Complete,
        TaskState::Failed => TaskCompletionStatus::Failed,
        TaskState::KillWait | TaskState::Killed => TaskCompletionStatus::Killed,
    }
}

/// Map a task type onto the client-stable [`TaskKind`].
pub fn from_task_type(task_type: TaskType) -> TaskKind {
    match task_type {
        TaskType::Map => TaskKind::Map,
        TaskType::Reduce => TaskKind::Reduce,
    }
}

/// Map a queue state onto the client-facing [`status::QueueState`].
///
/// Goes through the lowercase string rendering so that source states the
/// client enumeration does not know (e.g. `Draining`) fall back to
/// `Undefined` instead of failing.
pub fn from_queue_state(state: cluster::QueueState) -> status::QueueState {
    status::QueueState::from_str_lossy(&state.as_str().to_lowercase())
}

/// Map a numeric application priority onto [`JobPriority`].
///
/// Anything outside the defined 1–5 range, including an absent priority,
/// is `Undefined`.
pub fn from_application_priority(priority: Option<Priority>) -> JobPriority {
    match priority.map(|p| p.0) {
        Some(5) => JobPriority::VeryHigh,
        Some(4) => JobPriority::High,
        Some(3) => JobPriority::Normal,
        Some(2) => JobPriority::Low,
        Some(1) => JobPriority::VeryLow,
        _ => JobPriority::Undefined,
    }
}

/// Map a numeric job priority onto [`JobPriority`].
///
/// Unlike [`from_application_priority`], an unset priority (numeric zero or
/// absent) means the submitter left it to the scheduler, so it maps to
/// `Default`.
pub fn from_job_priority(priority: Option<Priority>) -> JobPriority {
    match priority.map(|p| p.0).unwrap_or(0) {
        5 => JobPriority::VeryHigh,
        4 => JobPriority::High,
        3 => JobPriority::Normal,
        2 => JobPriority::Low,
        1 => JobPriority::VeryLow,
        0 => JobPriority::Default,
        _ => JobPriority::Undefined,
    }
}

/// Flat projection of an optional [`ResourceUsageReport`].
///
/// An absent report is the common case for freshly submitted applications
/// and yields all-zero fields, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceUsage {
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

impl ResourceUsage {
    /// Project an optional usage report onto flat fields.
    pub fn from_report(report: Option<&ResourceUsageReport>) -> Self {
        match report {
            Some(rpt) => Self {
                needed_mem: rpt.needed.memory_mb,
                used_mem: rpt.used.memory_mb,
                reserved_mem: rpt.reserved.memory_mb,
                num_used_slots: rpt.num_used_containers,
                num_reserved_slots: rpt.num_reserved_containers,
            },
            None => Self::default(),
        }
    }
}

/// Environment-specific settings for conversions that derive paths.
///
/// Only [`from_application_reports`] and [`from_queue`] consult it, and only
/// to build per-job submission-file paths; the state, name, and child
/// conversion itself never depends on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Root of the job staging area.
    pub staging_dir: String,
}

impl RuntimeConfig {
    /// Create a config with the given staging directory.
    pub fn new(staging_dir: impl Into<String>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
        }
    }

    /// Path of the submission file for `job` staged by `user`.
    pub fn job_file(&self, user: &str, job: &JobRef) -> String {
        format!("{}/{}/.staging/{}/job.xml", self.staging_dir, user, job)
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::new("/tmp/cluster-staging")
    }
}

/// Convert an application report into a client-facing [`JobStatus`].
///
/// The tracking URL fills both `tracking_url` and `scheduling_info`.
/// Resource and slot fields come from the optional usage report and default
/// to zero when it is absent; conversion succeeds for any report that
/// carries an application id.
pub fn from_application_report(
    report: &ApplicationReport,
    job_file: &str,
) -> ConvertResult<JobStatus> {
    let app_id = report
        .application_id
        .ok_or(ConvertError::MissingField("application_id"))?;
    let usage = ResourceUsage::from_report(report.resource_usage.as_ref());

    Ok(JobStatus {
        job: JobRef::new(app_id.cluster_timestamp, app_id.id),
        state: from_application_state(report.state, report.terminal_status),
        start_time: report.start_time,
        finish_time: report.finish_time,
        username: report.user.clone(),
        queue: report.queue.clone(),
        job_file: job_file.to_owned(),
        tracking_url: report.tracking_url.clone(),
        scheduling_info: report.tracking_url.clone(),
        priority: from_application_priority(report.priority),
        needed_mem: usage.needed_mem,
        used_mem: usage.used_mem,
        reserved_mem: usage.reserved_mem,
        num_used_slots: usage.num_used_slots,
        num_reserved_slots: usage.num_reserved_slots,
    })
}

/// Convert a job report into a client-facing [`JobStatus`].
///
/// Job reports carry no resource usage or tracking URL, so those fields
/// stay at their defaults. An unset priority maps to `Default` — the
/// submitter deferred to the scheduler, which is not the same as the
/// application adapter's `Undefined`.
pub fn from_job_report(report: &JobReport, job_file: &str) -> ConvertResult<JobStatus> {
    let job_id = report.job_id.ok_or(ConvertError::MissingField("job_id"))?;
    let app_id = job_id
        .app_id
        .ok_or(ConvertError::MissingField("job_id.app_id"))?;

    Ok(JobStatus {
        job: JobRef::new(app_id.cluster_timestamp, job_id.id),
        state: from_job_state(report.state),
        start_time: report.start_time,
        finish_time: report.finish_time,
        username: report.user.clone(),
        queue: String::new(),
        job_file: job_file.to_owned(),
        tracking_url: String::new(),
        scheduling_info: String::new(),
        priority: from_job_priority(report.priority),
        needed_mem: 0,
        used_mem: 0,
        reserved_mem: 0,
        num_used_slots: 0,
        num_reserved_slots: 0,
    })
}

/// Convert a batch of application reports, deriving each job's submission
/// file from the staging area in `config`.
pub fn from_application_reports(
    reports: &[ApplicationReport],
    config: &RuntimeConfig,
) -> ConvertResult<Vec<JobStatus>> {
    reports
        .iter()
        .map(|report| {
            let app_id = report
                .application_id
                .ok_or(ConvertError::MissingField("application_id"))?;
            let job = JobRef::new(app_id.cluster_timestamp, app_id.id);
            from_application_report(report, &config.job_file(&report.user, &job))
        })
        .collect()
}

/// Convert a queue descriptor tree into a client-facing [`QueueInfo`] tree.
///
/// Children convert recursively in input order, so the output tree has the
/// same shape as the input; a node with no children yields an empty child
/// list. Depth is bounded only by the input — callers feeding untrusted,
/// deeply nested trees are responsible for their own limits.
pub fn from_queue(descriptor: &QueueDescriptor, config: &RuntimeConfig) -> ConvertResult<QueueInfo> {
    let children = descriptor
        .children
        .iter()
        .map(|child| from_queue(child, config))
        .collect::<ConvertResult<Vec<_>>>()?;

    Ok(QueueInfo {
        name: descriptor.name.clone(),
        state: from_queue_state(descriptor.state),
        scheduling_info: capacity_summary(descriptor),
        jobs: from_application_reports(&descriptor.applications, config)?,
        children,
    })
}

/// Render the queue's capacity figures as percentages. A negative maximum
/// means the queue is unbounded.
fn capacity_summary(descriptor: &QueueDescriptor) -> String {
    let maximum = if descriptor.maximum_capacity < 0.0 {
        "UNDEFINED".to_owned()
    } else {
        format!("{}", descriptor.maximum_capacity * 100.0)
    };
    format!(
        "Capacity: {}, MaximumCapacity: {}, CurrentCapacity: {}",
        descriptor.capacity * 100.0,
        maximum,
        descriptor.current_capacity * 100.0,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{ApplicationId, QueueState, Resource};
    use crate::job::JobId;

    fn usage_report_2048() -> ResourceUsageReport {
        let r = Resource::from_memory(2048);
        ResourceUsageReport {
            needed: r,
            used: r,
            reserved: r,
            num_used_containers: 3,
            num_reserved_containers: 1,
        }
    }

    #[test]
    fn test_enum_mappings_are_total() {
        for state in ApplicationState::ALL {
            for terminal in TerminalStatus::ALL {
                from_application_state(state, terminal);
            }
        }
        for state in JobState::ALL {
            from_job_state(state);
        }
        for state in TaskState::ALL {
            from_task_state(state);
        }
        for task_type in TaskType::ALL {
            from_task_type(task_type);
        }
        for state in QueueState::ALL {
            from_queue_state(state);
        }
    }

    #[test]
    fn test_new_saving_maps_to_prep() {
        // NewSaving postdates the client enumeration; the terminal flag
        // must not drag it into a terminal state.
        assert_eq!(
            from_application_state(ApplicationState::NewSaving, TerminalStatus::Failed),
            State::Prep
        );
    }

    #[test]
    fn test_finished_disambiguated_by_terminal_status() {
        assert_eq!(
            from_application_state(ApplicationState::Finished, TerminalStatus::Succeeded),
            State::Succeeded
        );
        assert_eq!(
            from_application_state(ApplicationState::Finished, TerminalStatus::Failed),
            State::Failed
        );
        assert_eq!(
            from_application_state(ApplicationState::Finished, TerminalStatus::Killed),
            State::Killed
        );
        assert_eq!(
            from_application_state(ApplicationState::Finished, TerminalStatus::Undefined),
            State::Killed
        );
    }

    #[test]
    fn test_from_application_report_basic() {
        let report = ApplicationReport::new(ApplicationId::new(0, 0), ApplicationState::Running)
            .with_times(612354, 612355)
            .with_user("converter-user")
            .with_priority(Priority::new(3))
            .with_resource_usage(usage_report_2048());

        let status = from_application_report(&report, "dummy-jobfile").unwrap();
        assert_eq!(status.start_time, 612354);
        assert_eq!(status.finish_time, 612355);
        assert_eq!(status.state.to_string(), "RUNNING");
        assert_eq!(status.priority, JobPriority::Normal);
    }

    #[test]
    fn test_from_application_report_without_usage() {
        let report = ApplicationReport::new(ApplicationId::new(12345, 6789), ApplicationState::Killed)
            .with_user("dummy-user")
            .with_queue("dummy-queue")
            .with_tracking_url("dummy-tracking-url")
            .with_priority(Priority::new(4));

        // No usage sub-record: conversion must still succeed, with zeros.
        let status = from_application_report(&report, "dummy-path/job.xml").unwrap();
        assert_eq!(status.needed_mem, 0);
        assert_eq!(status.used_mem, 0);
        assert_eq!(status.reserved_mem, 0);
        assert_eq!(status.num_used_slots, 0);
        assert_eq!(status.num_reserved_slots, 0);
    }

    #[test]
    fn test_from_application_report_full() {
        let report = ApplicationReport::new(ApplicationId::new(12345, 6789), ApplicationState::Killed)
            .with_user("dummy-user")
            .with_queue("dummy-queue")
            .with_tracking_url("dummy-tracking-url")
            .with_priority(Priority::new(4))
            .with_resource_usage(usage_report_2048());

        let status = from_application_report(&report, "dummy-path/job.xml").unwrap();
        assert_eq!(status.job_file, "dummy-path/job.xml");
        assert_eq!(status.queue, "dummy-queue");
        assert_eq!(status.tracking_url, "dummy-tracking-url");
        assert_eq!(status.scheduling_info, "dummy-tracking-url");
        assert_eq!(status.username, "dummy-user");
        assert_eq!(status.job.id, 6789);
        assert_eq!(status.job.cluster_timestamp, 12345);
        assert_eq!(status.state, State::Killed);
        assert_eq!(status.needed_mem, 2048);
        assert_eq!(status.used_mem, 2048);
        assert_eq!(status.reserved_mem, 2048);
        assert_eq!(status.num_reserved_slots, 1);
        assert_eq!(status.num_used_slots, 3);
        assert_eq!(status.priority, JobPriority::High);
    }

    #[test]
    fn test_from_application_report_missing_id() {
        let report = ApplicationReport {
            application_id: None,
            ..ApplicationReport::default()
        };
        let err = from_application_report(&report, "").unwrap_err();
        assert_eq!(err.missing_field(), Some("application_id"));
    }

    #[test]
    fn test_from_job_report_basic() {
        let job_id = JobId::new(ApplicationId::new(0, 0), 0);
        let report = JobReport::new(job_id, JobState::Running)
            .with_times(612354, 612355)
            .with_user("converter-user")
            .with_priority(Priority::new(0));

        let status = from_job_report(&report, "dummy-jobfile").unwrap();
        assert_eq!(status.start_time, 612354);
        assert_eq!(status.finish_time, 612355);
        assert_eq!(status.state.to_string(), "RUNNING");
        assert_eq!(status.priority, JobPriority::Default);
        assert_eq!(status.needed_mem, 0);
        assert_eq!(status.num_used_slots, 0);
    }

    #[test]
    fn test_from_job_report_missing_identity() {
        let report = JobReport::default();
        let err = from_job_report(&report, "").unwrap_err();
        assert_eq!(err.missing_field(), Some("job_id"));

        let report = JobReport {
            job_id: Some(JobId { app_id: None, id: 3 }),
            ..JobReport::default()
        };
        let err = from_job_report(&report, "").unwrap_err();
        assert_eq!(err.missing_field(), Some("job_id.app_id"));
    }

    #[test]
    fn test_task_mappings() {
        assert_eq!(from_task_state(TaskState::New), TaskCompletionStatus::Pending);
        assert_eq!(
            from_task_state(TaskState::Scheduled),
            TaskCompletionStatus::Pending
        );
        assert_eq!(
            from_task_state(TaskState::KillWait),
            TaskCompletionStatus::Killed
        );
        assert_eq!(
            from_task_state(TaskState::Succeeded),
            TaskCompletionStatus::Complete
        );
        assert_eq!(from_task_type(TaskType::Map), TaskKind::Map);
        assert_eq!(from_task_type(TaskType::Reduce), TaskKind::Reduce);
    }

    #[test]
    fn test_priority_zero_defaults_differ_by_adapter() {
        // An unset priority means "scheduler default" on the job side but
        // "never assigned" on the application side.
        assert_eq!(from_job_priority(Some(Priority::new(0))), JobPriority::Default);
        assert_eq!(from_job_priority(None), JobPriority::Default);
        assert_eq!(
            from_application_priority(Some(Priority::new(0))),
            JobPriority::Undefined
        );
        assert_eq!(from_application_priority(None), JobPriority::Undefined);
    }

    #[test]
    fn test_priority_tables() {
        for (n, expected) in [
            (5, JobPriority::VeryHigh),
            (4, JobPriority::High),
            (3, JobPriority::Normal),
            (2, JobPriority::Low),
            (1, JobPriority::VeryLow),
        ] {
            assert_eq!(from_application_priority(Some(Priority::new(n))), expected);
            assert_eq!(from_job_priority(Some(Priority::new(n))), expected);
        }
        assert_eq!(
            from_application_priority(Some(Priority::new(17))),
            JobPriority::Undefined
        );
        assert_eq!(from_job_priority(Some(Priority::new(17))), JobPriority::Undefined);
    }

    #[test]
    fn test_resource_usage_defaults_to_zero() {
        assert_eq!(ResourceUsage::from_report(None), ResourceUsage::default());
    }

    #[test]
    fn test_queue_state_lowercased() {
        let descriptor = QueueDescriptor::new("default", QueueState::Stopped);
        let info = from_queue(&descriptor, &RuntimeConfig::default()).unwrap();
        assert_eq!(info.state.to_string(), descriptor.state.as_str().to_lowercase());
    }

    #[test]
    fn test_queue_children_converted() {
        let root = QueueDescriptor::new("root", QueueState::Running)
            .with_child(QueueDescriptor::new("child", QueueState::Running));

        let info = from_queue(&root, &RuntimeConfig::default()).unwrap();
        assert_eq!(info.children.len(), 1);
        assert_eq!(info.children[0].name, "child");
        assert_eq!(info.children[0].state.to_string(), "running");
        assert!(info.children[0].children.is_empty());
    }

    #[test]
    fn test_queue_nesting_and_order_preserved() {
        let root = QueueDescriptor::new("root", QueueState::Running)
            .with_child(
                QueueDescriptor::new("a", QueueState::Running)
                    .with_child(QueueDescriptor::new("a1", QueueState::Stopped))
                    .with_child(QueueDescriptor::new("a2", QueueState::Running)),
            )
            .with_child(QueueDescriptor::new("b", QueueState::Draining));

        let info = from_queue(&root, &RuntimeConfig::default()).unwrap();
        assert_eq!(info.children.len(), 2);
        assert_eq!(info.children[0].name, "a");
        assert_eq!(info.children[1].name, "b");
        // Draining is unknown to the client enumeration.
        assert_eq!(info.children[1].state, status::QueueState::Undefined);
        let a = &info.children[0];
        assert_eq!(a.children.len(), 2);
        assert_eq!(a.children[0].name, "a1");
        assert_eq!(a.children[1].name, "a2");
    }

    #[test]
    fn test_queue_capacity_summary() {
        let descriptor = QueueDescriptor::new("default", QueueState::Running)
            .with_capacities(0.7, 1.0, 0.25);
        let info = from_queue(&descriptor, &RuntimeConfig::default()).unwrap();
        assert_eq!(
            info.scheduling_info,
            "Capacity: 70, MaximumCapacity: 100, CurrentCapacity: 25"
        );

        let unbounded = QueueDescriptor::new("default", QueueState::Running)
            .with_capacities(0.5, -1.0, 0.0);
        let info = from_queue(&unbounded, &RuntimeConfig::default()).unwrap();
        assert!(info.scheduling_info.contains("MaximumCapacity: UNDEFINED"));
    }

    #[test]
    fn test_queue_applications_converted_with_staged_job_files() {
        let descriptor = QueueDescriptor::new("default", QueueState::Running)
            .with_application(
                ApplicationReport::new(ApplicationId::new(12345, 1), ApplicationState::Running)
                    .with_user("alice"),
            )
            .with_application(
                ApplicationReport::new(ApplicationId::new(12345, 2), ApplicationState::Accepted)
                    .with_user("bob"),
            );

        let config = RuntimeConfig::new("/user/staging");
        let info = from_queue(&descriptor, &config).unwrap();
        assert_eq!(info.jobs.len(), 2);
        assert_eq!(
            info.jobs[0].job_file,
            "/user/staging/alice/.staging/job_12345_0001/job.xml"
        );
        assert_eq!(info.jobs[1].state, State::Prep);
    }

    #[test]
    fn test_conversion_is_deterministic() {
        let report = ApplicationReport::new(ApplicationId::new(7, 7), ApplicationState::Finished)
            .with_terminal_status(TerminalStatus::Succeeded)
            .with_times(1, 2)
            .with_user("alice")
            .with_queue("default")
            .with_tracking_url("http://tracker")
            .with_resource_usage(usage_report_2048());

        let first = from_application_report(&report, "job.xml").unwrap();
        let second = from_application_report(&report, "job.xml").unwrap();
        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
