//! Invalidation of the derived geometry of a path.
//!
//! A path caches two artifacts: the polylines generated from its commands and the
//! mesh tessellated from those polylines. `CacheState` tracks which of them are
//! stale. Every event that can affect the geometry is one method; the path calls
//! it and never touches the flags directly.
//!
//! | Event                           | polylines | tessellation |
//! |---------------------------------|-----------|--------------|
//! | `commands_changed`              | stale     | stale        |
//! | `mode_changed`                  | stale     | stale        |
//! | `resolution_changed`            | stale     | stale        |
//! | `fill_rule_changed`             |           | stale        |
//! | `fill_changed`                  |           | stale        |
//! | `shape_changed`                 | stale     | stale        |
//! | `geometry_edited`               |           | stale        |
//! | `polylines_generated`           | fresh     | stale        |
//! | `mesh_generated`                |           | fresh        |
//!
//! The mesh is never considered fresh while the polylines are stale.

/// The two dirty flags of a path.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CacheState {
    needs_polylines: bool,
    needs_tessellation: bool,
}

impl CacheState {
    /// Nothing needs to be regenerated.
    pub const CLEAN: Self = CacheState {
        needs_polylines: false,
        needs_tessellation: false,
    };

    /// Everything needs to be regenerated.
    pub const DIRTY: Self = CacheState {
        needs_polylines: true,
        needs_tessellation: true,
    };

    /// A new path has not generated anything yet.
    pub fn new() -> Self {
        Self::DIRTY
    }

    #[inline]
    pub fn needs_polylines(&self) -> bool {
        self.needs_polylines
    }

    /// Whether the mesh must be tessellated again before being read.
    ///
    /// Stale polylines imply a stale mesh.
    #[inline]
    pub fn needs_tessellation(&self) -> bool {
        self.needs_tessellation || self.needs_polylines
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        *self == Self::CLEAN
    }

    /// A command was appended or the commands were cleared.
    pub fn commands_changed(&mut self) {
        *self = Self::DIRTY;
    }

    /// Switched between commands and polylines.
    pub fn mode_changed(&mut self) {
        *self = Self::DIRTY;
    }

    /// The curve or circle resolution now has a different value.
    pub fn resolution_changed(&mut self) {
        *self = Self::DIRTY;
    }

    pub fn fill_rule_changed(&mut self) {
        self.needs_tessellation = true;
    }

    /// The fill flag was toggled.
    pub fn fill_changed(&mut self) {
        self.needs_tessellation = true;
    }

    /// The shape was modified outside of the drawing commands.
    pub fn shape_changed(&mut self) {
        *self = Self::DIRTY;
    }

    /// The cached polylines were edited in place (translated, rotated, ...).
    ///
    /// The polylines are the source of the edit, only the mesh is stale.
    pub fn geometry_edited(&mut self) {
        self.needs_tessellation = true;
    }

    /// The polylines were just regenerated, which invalidates the mesh.
    pub fn polylines_generated(&mut self) {
        self.needs_polylines = false;
        self.needs_tessellation = true;
    }

    /// The mesh was just tessellated from up to date polylines.
    pub fn mesh_generated(&mut self) {
        debug_assert!(!self.needs_polylines);
        self.needs_tessellation = false;
    }
}

impl Default for CacheState {
    fn default() -> Self {
        Self::new()
    }
}

#[test]
fn new_state_is_dirty() {
    let state = CacheState::new();
    assert!(state.needs_polylines());
    assert!(state.needs_tessellation());
    assert!(!state.is_clean());
}

#[test]
fn commands_changed() {
    let mut state = CacheState::CLEAN;
    state.commands_changed();
    assert_eq!(state, CacheState::DIRTY);
}

#[test]
fn mode_changed() {
    let mut state = CacheState::CLEAN;
    state.mode_changed();
    assert_eq!(state, CacheState::DIRTY);
}

#[test]
fn resolution_changed() {
    let mut state = CacheState::CLEAN;
    state.resolution_changed();
    assert!(state.needs_polylines());
    assert!(state.needs_tessellation());
}

#[test]
fn fill_rule_changed() {
    let mut state = CacheState::CLEAN;
    state.fill_rule_changed();
    assert!(!state.needs_polylines());
    assert!(state.needs_tessellation());

    let mut state = CacheState::DIRTY;
    state.fill_rule_changed();
    assert_eq!(state, CacheState::DIRTY);
}

#[test]
fn fill_changed() {
    let mut state = CacheState::CLEAN;
    state.fill_changed();
    assert!(!state.needs_polylines());
    assert!(state.needs_tessellation());
}

#[test]
fn shape_changed() {
    let mut state = CacheState::CLEAN;
    state.shape_changed();
    assert_eq!(state, CacheState::DIRTY);
}

#[test]
fn geometry_edited() {
    let mut state = CacheState::CLEAN;
    state.geometry_edited();
    assert!(!state.needs_polylines());
    assert!(state.needs_tessellation());
}

#[test]
fn polylines_generated() {
    let mut state = CacheState::DIRTY;
    state.polylines_generated();
    assert!(!state.needs_polylines());
    assert!(state.needs_tessellation());

    // Regenerating the polylines always invalidates a fresh mesh.
    let mut state = CacheState::CLEAN;
    state.polylines_generated();
    assert!(state.needs_tessellation());
}

#[test]
fn mesh_generated() {
    let mut state = CacheState::DIRTY;
    state.polylines_generated();
    state.mesh_generated();
    assert!(state.is_clean());
}

#[test]
fn stale_polylines_imply_stale_mesh() {
    let mut state = CacheState::CLEAN;
    state.commands_changed();
    state.polylines_generated();
    state.mesh_generated();
    assert!(state.is_clean());

    let mut state = CacheState {
        needs_polylines: true,
        needs_tessellation: false,
    };
    assert!(state.needs_tessellation());
    state.polylines_generated();
    assert!(state.needs_tessellation());
}
