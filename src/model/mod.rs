//! Data model for coverage report trees.
//!
//! The report generator aggregates coverage bottom-up and hands over one
//! tree per summarizer ([`ReportData`]). Nothing in this crate recomputes
//! those numbers; the view stages only reorder, drop and rename nodes.
//!
//! ```ignore
//! let data = ReportData::from_json_str(&json)?;
//! data.validate()?;
//!
//! let leaves = data.package.leaf_count();
//! ```

mod metrics;
mod node;
mod report;

pub use metrics::*;
pub use node::*;
pub use report::*;
