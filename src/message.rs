use serde::{Deserialize, Serialize};

use crate::data::source::LoadResult;
use crate::report::{ActionId, Direction, ReportAction};

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentOffset {
    pub y: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: f64,
    pub width: f64,
}

/// Scroll notification, shaped like the host platform's native event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollEvent {
    pub content_offset: ContentOffset,
    pub content_size: Dimensions,
    pub layout_measurement: Dimensions,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayoutEvent {
    pub height: f64,
    pub width: f64,
}

#[derive(Clone, Debug)]
pub enum Message {
    // -- Host events --
    Layout(LayoutEvent),
    Scrolled(ScrollEvent),
    ItemMeasured { id: ActionId, height: f64 },
    LongPress(ActionId),
    DismissContextMenu,
    ScrollToNewest,

    // -- Data --
    LoadFinished {
        direction: Direction,
        generation: u64,
        result: LoadResult,
    },
    /// Newly sent or received actions pushed by the data layer.
    ActionsReceived(Vec<ReportAction>),

    // -- Lifecycle --
    Teardown,
}
