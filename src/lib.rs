//! status-bridge — cluster-manager records to the client-facing status model
//!
//! This crate is the **status translation layer** between a cluster manager
//! and its job-submission clients. The two sides carry independently
//! evolving record schemas and lifecycle enumerations; this layer reconciles
//! them with pure, side-effect-free conversion functions.
//!
//! # Overview
//!
//! The crate defines:
//! - [`cluster`] / [`job`] — the source records owned by the cluster
//!   manager: [`ApplicationReport`], [`JobReport`], [`QueueDescriptor`]
//! - [`status`] — the client-stable target records: [`JobStatus`],
//!   [`QueueInfo`], and their enumerations
//! - [`convert`] — the translation functions between the two
//! - [`ConvertError`] for the one hard-failure case (missing identity)
//!
//! # Conversion surface
//!
//! ```text
//!   ApplicationReport ──→ from_application_report() ──→ JobStatus
//!   JobReport         ──→ from_job_report()         ──→ JobStatus
//!   QueueDescriptor   ──→ from_queue()              ──→ QueueInfo (recursive)
//! ```
//!
//! Every enum mapping is total: each source lifecycle value has exactly one
//! assigned target value, enforced by exhaustive `match` expressions and
//! exercised value-by-value in tests. Absent optional sub-records (resource
//! usage, priority) resolve to documented defaults rather than errors.
//!
//! # Purity
//!
//! Conversions read their inputs as immutable snapshots, allocate fresh
//! output, and hold no state across calls — they may be invoked concurrently
//! without synchronization.
//!
//! # Example
//!
//! ```
//! use status_bridge::cluster::{ApplicationId, ApplicationReport, ApplicationState};
//! use status_bridge::convert::from_application_report;
//!
//! let report = ApplicationReport::new(ApplicationId::new(1234567, 1), ApplicationState::Running)
//!     .with_user("alice")
//!     .with_queue("default");
//! let status = from_application_report(&report, "/staging/alice/job.xml")?;
//! assert_eq!(status.state.to_string(), "RUNNING");
//! # Ok::<(), status_bridge::ConvertError>(())
//! ```

pub mod cluster;
pub mod convert;
pub mod error;
pub mod job;
pub mod status;

pub use cluster::{ApplicationId, ApplicationReport, QueueDescriptor};
pub use convert::{
    ResourceUsage, RuntimeConfig, from_application_report, from_application_reports,
    from_job_report, from_queue,
};
pub use error::{ConvertError, ConvertResult};
pub use job::{JobId, JobReport};
pub use status::{JobPriority, JobRef, JobStatus, QueueInfo, State};
