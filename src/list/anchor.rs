//! Keeping the reader's place while content above them changes.
//!
//! Before a mutation the topmost fully visible row is recorded together with
//! its distance from the top of the viewport. Afterwards the scroll offset is
//! moved so that the same row sits at the same distance again. When that row
//! is gone, the distance from the end of the content is kept instead.

use crate::data::timeline::TimelineSnapshot;
use crate::list::virtualizer::{Viewport, Virtualizer};
use crate::report::ActionId;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ScrollAnchor {
    pub id: ActionId,
    /// Pixels between the top of the viewport and the top of the row.
    pub offset_in_viewport: f64,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorCapture {
    pub anchor: Option<ScrollAnchor>,
    pub distance_from_end: f64,
}

pub fn capture(virtualizer: &Virtualizer, snapshot: &TimelineSnapshot, viewport: Viewport) -> AnchorCapture {
    let visible = virtualizer.visible_range(viewport);
    let fully_visible = visible.clone().find(|&idx| {
        let top = virtualizer.top_of(idx);
        top >= viewport.offset && top + virtualizer.height_of(idx) <= viewport.bottom()
    });
    // A row taller than the viewport is never fully visible; use the first one.
    let idx = fully_visible.or_else(|| (!visible.is_empty()).then_some(visible.start));

    let anchor = idx.and_then(|idx| {
        snapshot.get(idx).map(|action| ScrollAnchor {
            id: action.id,
            offset_in_viewport: virtualizer.top_of(idx) - viewport.offset,
        })
    });

    AnchorCapture {
        anchor,
        distance_from_end: virtualizer.content_height() - viewport.offset,
    }
}

/// The scroll offset that puts the captured anchor back in place.
pub fn restore(
    capture: &AnchorCapture,
    virtualizer: &Virtualizer,
    snapshot: &TimelineSnapshot,
    viewport_height: f64,
) -> f64 {
    let target = match capture
        .anchor
        .and_then(|a| snapshot.position(a.id).map(|idx| (a, idx)))
    {
        Some((anchor, idx)) => virtualizer.top_of(idx) - anchor.offset_in_viewport,
        None => {
            tracing::debug!("Scroll anchor lost, keeping distance from end");
            virtualizer.content_height() - capture.distance_from_end
        }
    };
    virtualizer.clamp_offset(target, viewport_height)
}
