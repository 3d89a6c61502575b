//! sfops Cluster
//!
//! Slurm-facing primitives for:
//! - Describing resource requests (`SlurmResources`)
//! - Templating `srun`, `sbatch` and `squeue` argument lists
//! - Laying out timestamped per-job log files (`JobLogDir`)
//!
//! Nothing here talks to the workload manager. Callers hand the argument
//! lists to a process runner.

pub mod error;
pub mod job;
pub mod layout;
pub mod resources;

pub use error::{ClusterError, ClusterResult};
pub use job::{BatchJob, InteractiveSession, MailEvent, MailNotify, squeue_args};
pub use layout::{JobLogDir, LOG_TIMESTAMP_FORMAT};
pub use resources::{SlurmResources, WallTime};
