use futures::future::BoxFuture;
use futures::stream::{FuturesUnordered, StreamExt};

use crate::list::{ListProps, ReportActionsList};
use crate::message::Message;

/// Drives a list on one cooperative event loop. Every resolved future is fed
/// back through `update` before the next one is polled, so merges land one
/// at a time in the order their requests resolve.
pub struct ListRuntime {
    list: ReportActionsList,
    pending: FuturesUnordered<BoxFuture<'static, Message>>,
}

impl ListRuntime {
    pub fn new(props: ListProps) -> Self {
        Self {
            list: ReportActionsList::new(props),
            pending: FuturesUnordered::new(),
        }
    }

    pub fn list(&self) -> &ReportActionsList {
        &self.list
    }

    pub fn dispatch(&mut self, message: Message) {
        let task = self.list.update(message);
        for future in task.into_futures() {
            self.pending.push(future);
        }
    }

    /// Futures still waiting to resolve.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Await the next resolution and apply it. Returns `false` once nothing
    /// is pending.
    pub async fn step(&mut self) -> bool {
        match self.pending.next().await {
            Some(message) => {
                self.dispatch(message);
                true
            }
            None => false,
        }
    }

    /// Run until no request is outstanding.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    pub fn teardown(&mut self) {
        self.dispatch(Message::Teardown);
    }
}
