use futures::future::BoxFuture;

use crate::error::LoadError;
use crate::report::{Cursor, Page};

pub type LoadResult = Result<Page, LoadError>;

/// External data layer that fetches pages beyond the loaded window.
///
/// `cursor` is the current boundary on the requested side, or `None` when the
/// list is empty. Returned futures must not borrow the loader.
pub trait ActionLoader: Send + Sync {
    fn load_older(&self, cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult>;

    fn load_newer(&self, cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult>;
}

/// A loader with nothing behind it. Every request resolves to an empty final page.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoMoreData;

impl ActionLoader for NoMoreData {
    fn load_older(&self, _cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult> {
        Box::pin(async { Ok(Page::default()) })
    }

    fn load_newer(&self, _cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult> {
        Box::pin(async { Ok(Page::default()) })
    }
}
