//! Subversion specific parts: reading `svn log --xml` and turning its
//! entries into changes and paths.

mod client;
pub mod log;
pub mod normalize;
pub mod reconcile;

pub use client::{LogSource, RevisionRange, SvnClient};
pub use log::{RawCommit, RawPath, parse_log};
pub use normalize::normalize_commit;
pub use reconcile::{Reconciled, reconcile_moves};
