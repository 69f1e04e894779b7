//! Handle-based seam to the host renderer/input layer
//!
//! The sim owns entity state as plain data; the host maps opaque handle ids
//! to whatever render resources it manages. The sim never assumes anything
//! about handle semantics beyond create/move/destroy.

use std::collections::BTreeSet;

/// Opaque id the host maps to a render resource
pub type HandleId = u32;

/// What a handle represents, so the host can pick a visual
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Alien,
    Boss,
    PlayerProjectile,
    AlienProjectile,
    PowerUp,
    HealthPickup,
    LaserBeam,
}

/// Play-area bounds in pixels; y grows downward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayArea {
    pub width: f32,
    pub height: f32,
}

/// What the sim requires from the host
///
/// `destroy_handle` must tolerate ids that were already destroyed; the sim
/// guarantees it never *positions* a destroyed handle, but teardown paths may
/// destroy defensively.
pub trait Presentation {
    fn create_handle(&mut self, kind: EntityKind, x: f32, y: f32) -> HandleId;
    fn set_position(&mut self, handle: HandleId, x: f32, y: f32);
    fn destroy_handle(&mut self, handle: HandleId);
    fn play_area(&self) -> PlayArea;
}

/// Render-less host used by the demo binary and the test suite
///
/// Tracks live handles so tests can assert the sim never leaks or dangles one.
#[derive(Debug)]
pub struct HeadlessPresentation {
    area: PlayArea,
    next_handle: HandleId,
    live: BTreeSet<HandleId>,
}

impl HeadlessPresentation {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            area: PlayArea { width, height },
            next_handle: 1,
            live: BTreeSet::new(),
        }
    }

    /// Number of handles currently alive
    pub fn live_handles(&self) -> usize {
        self.live.len()
    }
}

impl Presentation for HeadlessPresentation {
    fn create_handle(&mut self, _kind: EntityKind, _x: f32, _y: f32) -> HandleId {
        let handle = self.next_handle;
        self.next_handle += 1;
        self.live.insert(handle);
        handle
    }

    fn set_position(&mut self, handle: HandleId, _x: f32, _y: f32) {
        debug_assert!(self.live.contains(&handle), "positioned a dead handle");
    }

    fn destroy_handle(&mut self, handle: HandleId) {
        // Idempotent: destroying an absent handle is a no-op
        self.live.remove(&handle);
    }

    fn play_area(&self) -> PlayArea {
        self.area
    }
}
