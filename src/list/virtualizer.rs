use std::collections::{HashMap, HashSet};
use std::ops::Range;

use crate::config::HeightEstimates;
use crate::data::timeline::TimelineSnapshot;
use crate::list::heights::HeightIndex;
use crate::report::{ActionId, ActionPayload, ReportAction};

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Viewport {
    /// Distance from the start of the content to the top of the viewport.
    pub offset: f64,
    pub height: f64,
    pub width: f64,
}

impl Viewport {
    pub fn bottom(&self) -> f64 {
        self.offset + self.height
    }
}

/// Handle to a reusable item view on the host side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SlotId(pub usize);

/// Hands out view slots to mounted actions and takes them back when the
/// actions scroll out of the render window.
#[derive(Clone, Debug, Default)]
pub struct RecyclePool {
    assigned: HashMap<ActionId, SlotId>,
    free: Vec<SlotId>,
    allocated: usize,
}

impl RecyclePool {
    /// Release every slot whose action is not in `keep`.
    pub fn retain(&mut self, keep: &HashSet<ActionId>) {
        let free = &mut self.free;
        self.assigned.retain(|id, slot| {
            let kept = keep.contains(id);
            if !kept {
                free.push(*slot);
            }
            kept
        });
    }

    /// The slot for `id` and whether it was newly handed out.
    pub fn acquire(&mut self, id: ActionId) -> (SlotId, bool) {
        if let Some(slot) = self.assigned.get(&id) {
            return (*slot, false);
        }
        let slot = self.free.pop().unwrap_or_else(|| {
            self.allocated += 1;
            SlotId(self.allocated - 1)
        });
        self.assigned.insert(id, slot);
        (slot, true)
    }

    /// Slots ever created.
    pub fn allocated(&self) -> usize {
        self.allocated
    }

    pub fn in_use(&self) -> usize {
        self.assigned.len()
    }

    pub fn clear(&mut self) {
        self.free.extend(self.assigned.drain().map(|(_, slot)| slot));
    }
}

/// One action placed in the render window.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MountedItem {
    pub id: ActionId,
    pub index: usize,
    pub top: f64,
    pub height: f64,
    pub slot: SlotId,
    /// Height comes from a real measurement rather than an estimate.
    pub measured: bool,
    /// Entered the render window in this pass.
    pub entered: bool,
}

#[derive(Clone, Copy, Debug)]
struct Measurement {
    height: f64,
    /// Grouping flag at measurement time. A row that gains or loses its
    /// author header has to be measured again.
    grouped: bool,
}

/// Layout of the whole sequence and selection of the rows to mount.
#[derive(Clone, Debug)]
pub struct Virtualizer {
    heights: HeightIndex,
    measured: HashMap<ActionId, Measurement>,
    is_measured: Vec<bool>,
    estimates: HeightEstimates,
    overscan: f64,
    pool: RecyclePool,
}

impl Virtualizer {
    pub fn new(estimates: HeightEstimates, overscan: f64) -> Self {
        Self {
            heights: HeightIndex::default(),
            measured: HashMap::new(),
            is_measured: Vec::new(),
            estimates,
            overscan: overscan.max(0.0),
            pool: RecyclePool::default(),
        }
    }

    pub fn estimate(&self, action: &ReportAction, grouped: bool) -> f64 {
        match &action.payload {
            ActionPayload::Text { .. } if grouped => self.estimates.grouped_text,
            ActionPayload::Text { .. } => self.estimates.text,
            ActionPayload::Attachment { .. } => self.estimates.attachment,
            ActionPayload::SystemEvent { .. } => self.estimates.system_event,
        }
    }

    /// Rebuild positions after the snapshot was replaced. Measurements of
    /// actions that are still present carry over.
    pub fn relayout(&mut self, snapshot: &TimelineSnapshot) {
        self.measured.retain(|id, _| snapshot.position(*id).is_some());
        let mut is_measured = Vec::with_capacity(snapshot.len());
        let heights = snapshot
            .actions()
            .iter()
            .enumerate()
            .map(|(i, action)| {
                let grouped = snapshot.is_grouped(i);
                match self.measured.get(&action.id) {
                    Some(m) if m.grouped == grouped => {
                        is_measured.push(true);
                        m.height
                    }
                    _ => {
                        is_measured.push(false);
                        self.estimate(action, grouped)
                    }
                }
            })
            .collect();
        self.heights = HeightIndex::from_heights(heights);
        self.is_measured = is_measured;
    }

    /// Record the real height of the row at `idx`. Returns the change.
    pub fn measure(&mut self, snapshot: &TimelineSnapshot, idx: usize, height: f64) -> f64 {
        let Some(action) = snapshot.get(idx) else {
            return 0.0;
        };
        let height = height.max(0.0);
        self.measured.insert(
            action.id,
            Measurement {
                height,
                grouped: snapshot.is_grouped(idx),
            },
        );
        if let Some(flag) = self.is_measured.get_mut(idx) {
            *flag = true;
        }
        self.heights.set(idx, height)
    }

    pub fn is_measured(&self, idx: usize) -> bool {
        self.is_measured.get(idx).copied().unwrap_or(false)
    }

    pub fn content_height(&self) -> f64 {
        self.heights.total()
    }

    pub fn top_of(&self, idx: usize) -> f64 {
        self.heights.offset_of(idx)
    }

    pub fn height_of(&self, idx: usize) -> f64 {
        self.heights.get(idx)
    }

    pub fn overscan(&self) -> f64 {
        self.overscan
    }

    pub fn max_offset(&self, viewport_height: f64) -> f64 {
        (self.content_height() - viewport_height).max(0.0)
    }

    pub fn clamp_offset(&self, offset: f64, viewport_height: f64) -> f64 {
        offset.clamp(0.0, self.max_offset(viewport_height))
    }

    /// Rows intersecting `[top, bottom)`.
    fn range_between(&self, top: f64, bottom: f64) -> Range<usize> {
        let len = self.heights.len();
        if len == 0 || bottom <= top {
            return 0..0;
        }
        let start = self.heights.index_at(top).min(len);
        let last = self.heights.index_at(bottom);
        let end = if last < len && self.top_of(last) < bottom {
            last + 1
        } else {
            last
        };
        start..end.max(start)
    }

    pub fn visible_range(&self, viewport: Viewport) -> Range<usize> {
        self.range_between(viewport.offset, viewport.bottom())
    }

    /// Visible rows plus `overscan` pixels on both sides.
    pub fn render_range(&self, viewport: Viewport) -> Range<usize> {
        if viewport.height <= 0.0 {
            return 0..0;
        }
        self.range_between(
            (viewport.offset - self.overscan).max(0.0),
            viewport.bottom() + self.overscan,
        )
    }

    /// Place the render window and hand out view slots.
    pub fn mount(&mut self, snapshot: &TimelineSnapshot, viewport: Viewport) -> Vec<MountedItem> {
        let range = self.render_range(viewport);
        let keep: HashSet<ActionId> = snapshot.actions()[range.clone()]
            .iter()
            .map(|a| a.id)
            .collect();
        self.pool.retain(&keep);

        range
            .map(|index| {
                let id = snapshot.actions()[index].id;
                let (slot, entered) = self.pool.acquire(id);
                MountedItem {
                    id,
                    index,
                    top: self.top_of(index),
                    height: self.height_of(index),
                    slot,
                    measured: self.is_measured(index),
                    entered,
                }
            })
            .collect()
    }

    pub fn pool(&self) -> &RecyclePool {
        &self.pool
    }

    pub fn release_all(&mut self) {
        self.pool.clear();
    }
}
