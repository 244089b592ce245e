//! The data side of the list: ordering and merging of report actions, the
//! loader seam, and an in-memory history.

pub mod mock;
pub mod source;
pub mod timeline;
