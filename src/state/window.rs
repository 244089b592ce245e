use crate::data::timeline::TimelineSnapshot;
use crate::report::{Cursor, Direction};
use crate::state::pagination::PaginationController;

/// The contiguous range of history currently held by the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoadWindow {
    pub older: Option<Cursor>,
    pub newer: Option<Cursor>,
    pub is_loading_older: bool,
    pub is_loading_newer: bool,
}

impl LoadWindow {
    pub fn of(snapshot: &TimelineSnapshot, controller: &PaginationController) -> Self {
        Self {
            older: snapshot.boundary(Direction::Older),
            newer: snapshot.boundary(Direction::Newer),
            is_loading_older: controller.is_requesting(Direction::Older),
            is_loading_newer: controller.is_requesting(Direction::Newer),
        }
    }

    pub fn cursor(&self, direction: Direction) -> Option<Cursor> {
        match direction {
            Direction::Older => self.older,
            Direction::Newer => self.newer,
        }
    }

    pub fn is_loading(&self, direction: Direction) -> bool {
        match direction {
            Direction::Older => self.is_loading_older,
            Direction::Newer => self.is_loading_newer,
        }
    }
}
