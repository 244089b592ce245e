//! In-memory history and fixtures for the demo binary and tests.

use std::collections::HashMap;
use std::ops::Range;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};
use futures::future::BoxFuture;

use crate::data::source::{ActionLoader, LoadResult};
use crate::data::timeline::{chronological, compare};
use crate::error::LoadError;
use crate::report::{
    AccountId, ActionId, ActionPayload, Cursor, DeliveryStatus, Page, PersonalDetails, Report,
    ReportAction, SortOrder,
};

pub const CURRENT_USER: AccountId = AccountId(5);

const FAKE_NAMES: [(&str, &str); 8] = [
    ("Email One", "email1@test.com"),
    ("Email Two", "email2@test.com"),
    ("Email Three", "email3@test.com"),
    ("Email Four", "email4@test.com"),
    ("Email Five", "email5@test.com"),
    ("Email Six", "email6@test.com"),
    ("Email Seven", "email7@test.com"),
    ("Email Eight", "email8@test.com"),
];

fn base_time() -> DateTime<Utc> {
    Utc.timestamp_opt(1_700_000_000, 0)
        .single()
        .unwrap_or_default()
}

pub fn fake_personal_details() -> HashMap<AccountId, PersonalDetails> {
    FAKE_NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, login))| {
            let account_id = AccountId(i as u64 + 1);
            (
                account_id,
                PersonalDetails {
                    account_id,
                    display_name: (*name).to_string(),
                    login: (*login).to_string(),
                },
            )
        })
        .collect()
}

pub fn fake_report() -> Report {
    Report {
        id: 1,
        name: "Email One, Email Two".into(),
        participants: vec![AccountId(1), AccountId(2), CURRENT_USER],
        is_archived: false,
    }
}

/// `count` actions sorted for `order`, with ids `1..=count`. Mostly text,
/// sprinkled with attachments and system events; runs of the same actor
/// produce grouped rows.
pub fn mocked_sorted_report_actions(count: usize, order: SortOrder) -> Vec<ReportAction> {
    let mut actions: Vec<ReportAction> = (1..=count as u64)
        .map(|n| {
            let payload = if n % 40 == 0 {
                ActionPayload::SystemEvent {
                    description: format!("Email Two renamed the room ({n})"),
                }
            } else if n % 25 == 0 {
                ActionPayload::Attachment {
                    name: format!("receipt-{n}.png"),
                    url: format!("https://example.com/receipts/{n}.png"),
                }
            } else {
                ActionPayload::Text {
                    body: format!("Message number {n}"),
                }
            };
            ReportAction {
                id: ActionId(n),
                created: base_time() + chrono::Duration::seconds(n as i64 * 90),
                actor: AccountId((n / 3) % FAKE_NAMES.len() as u64 + 1),
                payload,
                status: DeliveryStatus::Sent,
            }
        })
        .collect();
    actions.sort_by(|a, b| compare(a, b, order));
    actions
}

#[derive(Debug, Default)]
pub struct LoadStats {
    older_calls: AtomicUsize,
    newer_calls: AtomicUsize,
    older_in_flight: AtomicUsize,
    newer_in_flight: AtomicUsize,
    max_older_in_flight: AtomicUsize,
    max_newer_in_flight: AtomicUsize,
}

impl LoadStats {
    pub fn older_calls(&self) -> usize {
        self.older_calls.load(Ordering::SeqCst)
    }

    pub fn newer_calls(&self) -> usize {
        self.newer_calls.load(Ordering::SeqCst)
    }

    pub fn max_older_in_flight(&self) -> usize {
        self.max_older_in_flight.load(Ordering::SeqCst)
    }

    pub fn max_newer_in_flight(&self) -> usize {
        self.max_newer_in_flight.load(Ordering::SeqCst)
    }
}

/// Decrements the in-flight counter when the request finishes or is dropped.
struct InFlight {
    older: bool,
    stats: Arc<LoadStats>,
}

impl InFlight {
    fn enter(stats: &Arc<LoadStats>, older: bool) -> Self {
        let (calls, in_flight, max) = if older {
            (&stats.older_calls, &stats.older_in_flight, &stats.max_older_in_flight)
        } else {
            (&stats.newer_calls, &stats.newer_in_flight, &stats.max_newer_in_flight)
        };
        calls.fetch_add(1, Ordering::SeqCst);
        let now = in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        max.fetch_max(now, Ordering::SeqCst);
        Self {
            older,
            stats: Arc::clone(stats),
        }
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let in_flight = if self.older {
            &self.stats.older_in_flight
        } else {
            &self.stats.newer_in_flight
        };
        in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Serves pages out of a complete, in-memory history.
#[derive(Clone)]
pub struct MockHistory {
    /// Oldest first.
    history: Arc<Vec<ReportAction>>,
    order: SortOrder,
    page_size: usize,
    latency: Duration,
    failures: Arc<AtomicUsize>,
    stats: Arc<LoadStats>,
}

impl MockHistory {
    pub fn new(mut history: Vec<ReportAction>, order: SortOrder) -> Self {
        history.sort_by(chronological);
        Self {
            history: Arc::new(history),
            order,
            page_size: 50,
            latency: Duration::ZERO,
            failures: Arc::new(AtomicUsize::new(0)),
            stats: Arc::new(LoadStats::default()),
        }
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self
    }

    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Make the next `n` resolutions fail.
    pub fn fail_next(&self, n: usize) {
        self.failures.store(n, Ordering::SeqCst);
    }

    pub fn stats(&self) -> Arc<LoadStats> {
        Arc::clone(&self.stats)
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    /// A slice of the history (chronological indices) in display order.
    pub fn window(&self, range: Range<usize>) -> Vec<ReportAction> {
        let end = range.end.min(self.history.len());
        let start = range.start.min(end);
        self.display(self.history[start..end].to_vec())
    }

    /// The newest `count` actions in display order.
    pub fn newest(&self, count: usize) -> Vec<ReportAction> {
        let len = self.history.len();
        self.window(len.saturating_sub(count)..len)
    }

    fn display(&self, mut actions: Vec<ReportAction>) -> Vec<ReportAction> {
        if self.order == SortOrder::NewestFirst {
            actions.reverse();
        }
        actions
    }

    fn older_page(&self, cursor: Option<Cursor>) -> Page {
        let end = match cursor {
            Some(c) => self
                .history
                .partition_point(|a| (a.created, a.id) < (c.created, c.id)),
            None => self.history.len(),
        };
        let start = end.saturating_sub(self.page_size);
        Page {
            actions: self.display(self.history[start..end].to_vec()),
            has_more: start > 0,
        }
    }

    fn newer_page(&self, cursor: Option<Cursor>) -> Page {
        let start = match cursor {
            Some(c) => self
                .history
                .partition_point(|a| (a.created, a.id) <= (c.created, c.id)),
            None => self.history.len(),
        };
        let end = (start + self.page_size).min(self.history.len());
        Page {
            actions: self.display(self.history[start..end].to_vec()),
            has_more: end < self.history.len(),
        }
    }

    fn respond(&self, page: Page, guard: InFlight) -> BoxFuture<'static, LoadResult> {
        let latency = self.latency;
        let failures = Arc::clone(&self.failures);
        Box::pin(async move {
            let _guard = guard;
            if !latency.is_zero() {
                tokio::time::sleep(latency).await;
            }
            let failed = failures
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
                .is_ok();
            if failed {
                return Err(LoadError::FetchFailure("mock network error".into()));
            }
            Ok(page)
        })
    }
}

impl ActionLoader for MockHistory {
    fn load_older(&self, cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult> {
        let guard = InFlight::enter(&self.stats, true);
        let page = self.older_page(cursor);
        self.respond(page, guard)
    }

    fn load_newer(&self, cursor: Option<Cursor>) -> BoxFuture<'static, LoadResult> {
        let guard = InFlight::enter(&self.stats, false);
        let page = self.newer_page(cursor);
        self.respond(page, guard)
    }
}
