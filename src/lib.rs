//! A virtualized list of report actions.
//!
//! [`ReportActionsList`] keeps the ordered actions of one report, mounts only
//! the rows near the viewport, pages in older and newer actions through an
//! [`ActionLoader`] and keeps the reader's place while content shifts.
//! [`ListRuntime`] drives it on an async event loop.

pub mod config;
pub mod data;
pub mod dev;
pub mod error;
pub mod list;
pub mod message;
pub mod report;
pub mod runtime;
pub mod state;
pub mod task;

pub use data::source::{ActionLoader, LoadResult};
pub use error::{ConfigError, LoadError};
pub use list::{ListProps, RenderedList, ReportActionsList};
pub use message::Message;
pub use report::{ActionId, Direction, Page, Report, ReportAction, SortOrder};
pub use runtime::ListRuntime;
pub use task::Task;
