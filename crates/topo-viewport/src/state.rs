//! Live viewport state: transform plus the transient gesture fields.

use smallvec::SmallVec;
use topo_core::geometry::distance;
use topo_core::{Point, ViewTransform};

use crate::input::PointerId;

/// The gesture in progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    Idle,
    Panning,
    Pinching,
}

/// Mutable bundle owned by one viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewportState {
    pub transform: ViewTransform,
    pub is_panning: bool,
    /// Pointer position minus the pan offset at pan start.
    pub pan_start: Option<Point>,
    /// Set once a pan moved past the threshold or a pinch changed scale;
    /// suppresses the click that follows. Reset on the next first pointer.
    pub pan_moved: bool,
    /// Pointers currently down with their last known position.
    pub active_pointers: SmallVec<[(PointerId, Point); 2]>,
    pub pinch_start_distance: Option<f64>,
    pub pinch_start_scale: Option<f64>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            transform: ViewTransform::IDENTITY,
            is_panning: false,
            pan_start: None,
            pan_moved: false,
            active_pointers: SmallVec::new(),
            pinch_start_distance: None,
            pinch_start_scale: None,
        }
    }
}

impl ViewportState {
    /// Gesture implied by the number of pointers down.
    pub fn gesture(&self) -> Gesture {
        match self.active_pointers.len() {
            0 => Gesture::Idle,
            1 => Gesture::Panning,
            _ => Gesture::Pinching,
        }
    }

    pub fn pointer_count(&self) -> usize {
        self.active_pointers.len()
    }

    /// Register a pointer or update its position.
    pub fn set_pointer(&mut self, id: PointerId, position: Point) {
        match self.active_pointers.iter_mut().find(|(pid, _)| *pid == id) {
            Some((_, last)) => *last = position,
            None => self.active_pointers.push((id, position)),
        }
    }

    /// Update a registered pointer's position. Returns false for pointers
    /// that are not down (plain hover).
    pub fn move_pointer(&mut self, id: PointerId, position: Point) -> bool {
        match self.active_pointers.iter_mut().find(|(pid, _)| *pid == id) {
            Some((_, last)) => {
                *last = position;
                true
            }
            None => false,
        }
    }

    pub fn remove_pointer(&mut self, id: PointerId) -> bool {
        let before = self.active_pointers.len();
        self.active_pointers.retain(|(pid, _)| *pid != id);
        self.active_pointers.len() != before
    }

    /// Distance between the two pointers of a pinch. Only defined with
    /// exactly two pointers down.
    pub fn pinch_distance(&self) -> Option<f64> {
        match self.active_pointers.as_slice() {
            [(_, a), (_, b)] => Some(distance(*a, *b)),
            _ => None,
        }
    }
}
