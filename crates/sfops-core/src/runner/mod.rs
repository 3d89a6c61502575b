//! External process execution.
//!
//! Every operational target reduces to one or more [`Invocation`]s handed to a
//! [`CommandRunner`]. Runners inherit the caller's stdio so the external tool's
//! own output and error messages reach the user unchanged.
//!
//! # Example
//!
//! ```rust,no_run
//! use sfops_core::runner::{CommandRunner, Invocation, SystemRunner};
//!
//! # async fn example() -> sfops_core::Result<()> {
//! let runner = SystemRunner::new();
//! runner.run(&Invocation::new("git").args(["submodule", "sync"])).await?;
//! # Ok(())
//! # }
//! ```

mod invocation;
#[cfg(test)]
pub(crate) mod recording;
#[allow(clippy::module_inception)]
mod runner;

pub use invocation::{Invocation, shell_quote};
pub use runner::{CommandRunner, DryRunRunner, SystemRunner, run_all};
