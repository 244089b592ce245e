use std::fmt;
use std::future::Future;

use futures::future::BoxFuture;
use futures::FutureExt;

use crate::message::Message;

/// Work the list wants done off the update path. Each future resolves to a
/// message that is fed back through `update`.
#[derive(Default)]
pub struct Task {
    futures: Vec<BoxFuture<'static, Message>>,
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Task({} pending)", self.futures.len())
    }
}

impl Task {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn future<F>(future: F) -> Self
    where
        F: Future<Output = Message> + Send + 'static,
    {
        Self {
            futures: vec![future.boxed()],
        }
    }

    pub fn batch(tasks: impl IntoIterator<Item = Task>) -> Self {
        Self {
            futures: tasks.into_iter().flat_map(|t| t.futures).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.futures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.futures.is_empty()
    }

    pub fn into_futures(self) -> Vec<BoxFuture<'static, Message>> {
        self.futures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn batch_flattens_futures() {
        let task = Task::batch([
            Task::none(),
            Task::future(async { Message::ScrollToNewest }),
            Task::future(async { Message::Teardown }),
        ]);
        assert_eq!(task.len(), 2);

        let mut out = Vec::new();
        for fut in task.into_futures() {
            out.push(fut.await);
        }
        assert!(matches!(out[0], Message::ScrollToNewest));
        assert!(matches!(out[1], Message::Teardown));
    }
}
