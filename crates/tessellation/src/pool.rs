use crate::FillTessellator;

use core::ops::{Deref, DerefMut};
use std::sync::{Mutex, MutexGuard};
use std::vec::Vec;

/// A thread-safe free list of fill tessellators.
///
/// Tessellators keep their internal buffers between calls. Sharing a pool lets
/// several threads reuse warm tessellators without holding one each.
///
/// ```
/// use pathmesh_tessellation::{TessellatorPool, FillOptions, VertexBuffers};
/// use pathmesh_tessellation::geometry_builder::simple_builder;
/// use pathmesh_tessellation::geom::Polyline;
/// use pathmesh_tessellation::math::{point, Point};
///
/// let pool = TessellatorPool::new();
/// let triangle = Polyline::from_points(
///     vec![point(0.0, 0.0), point(1.0, 0.0), point(0.0, 1.0)],
///     true,
/// );
///
/// let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
/// pool.checkout()
///     .tessellate_polyline(&triangle, &FillOptions::default(), &mut simple_builder(&mut buffers))
///     .unwrap();
///
/// // The tessellator went back to the pool when the guard was dropped.
/// assert_eq!(pool.idle_count(), 1);
/// ```
pub struct TessellatorPool {
    idle: Mutex<Vec<FillTessellator>>,
    max_idle: usize,
}

impl TessellatorPool {
    pub const DEFAULT_MAX_IDLE: usize = 16;

    pub fn new() -> Self {
        Self::with_max_idle(Self::DEFAULT_MAX_IDLE)
    }

    /// Tessellators returned while `max_idle` of them are already idle are dropped.
    pub fn with_max_idle(max_idle: usize) -> Self {
        TessellatorPool {
            idle: Mutex::new(Vec::new()),
            max_idle,
        }
    }

    /// Takes an idle tessellator out of the pool, or creates one.
    ///
    /// The tessellator is returned to the pool when the guard is dropped.
    pub fn checkout(&self) -> PooledTessellator {
        let tessellator = self.lock().pop().unwrap_or_else(FillTessellator::new);

        PooledTessellator {
            pool: self,
            tessellator: Some(tessellator),
        }
    }

    /// Number of tessellators currently waiting in the pool.
    pub fn idle_count(&self) -> usize {
        self.lock().len()
    }

    fn give_back(&self, tessellator: FillTessellator) {
        let mut idle = self.lock();
        if idle.len() < self.max_idle {
            idle.push(tessellator);
        }
    }

    // The free list is valid in any state, so a poisoned lock can be reused as is.
    fn lock(&self) -> MutexGuard<Vec<FillTessellator>> {
        self.idle
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl Default for TessellatorPool {
    fn default() -> Self {
        Self::new()
    }
}

/// A fill tessellator checked out of a `TessellatorPool`.
pub struct PooledTessellator<'l> {
    pool: &'l TessellatorPool,
    // Only empty once dropped.
    tessellator: Option<FillTessellator>,
}

impl<'l> Deref for PooledTessellator<'l> {
    type Target = FillTessellator;
    fn deref(&self) -> &FillTessellator {
        match self.tessellator {
            Some(ref tessellator) => tessellator,
            None => unreachable!(),
        }
    }
}

impl<'l> DerefMut for PooledTessellator<'l> {
    fn deref_mut(&mut self) -> &mut FillTessellator {
        match self.tessellator {
            Some(ref mut tessellator) => tessellator,
            None => unreachable!(),
        }
    }
}

impl<'l> Drop for PooledTessellator<'l> {
    fn drop(&mut self) {
        if let Some(tessellator) = self.tessellator.take() {
            self.pool.give_back(tessellator);
        }
    }
}

#[test]
fn checkout_and_return() {
    let pool = TessellatorPool::new();
    assert_eq!(pool.idle_count(), 0);

    {
        let _a = pool.checkout();
        let _b = pool.checkout();
        assert_eq!(pool.idle_count(), 0);
    }
    assert_eq!(pool.idle_count(), 2);

    {
        let _a = pool.checkout();
        assert_eq!(pool.idle_count(), 1);
    }
    assert_eq!(pool.idle_count(), 2);
}

#[test]
fn returned_tessellator_is_reused() {
    let pool = TessellatorPool::new();

    {
        let mut tessellator = pool.checkout();
        tessellator.set_logging(true);
    }

    // The same instance comes back, with its settings.
    assert!(pool.checkout().log);
    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn max_idle() {
    let pool = TessellatorPool::with_max_idle(1);

    {
        let _a = pool.checkout();
        let _b = pool.checkout();
        let _c = pool.checkout();
    }

    assert_eq!(pool.idle_count(), 1);
}

#[test]
fn shared_between_threads() {
    use crate::geom::Polyline;
    use crate::geometry_builder::simple_builder;
    use crate::math::point;
    use crate::{FillOptions, VertexBuffers};
    use std::sync::Arc;
    use std::thread;

    let pool = Arc::new(TessellatorPool::new());

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let pool = Arc::clone(&pool);
            thread::spawn(move || {
                let x = i as f32;
                let square = Polyline::from_points(
                    std::vec![
                        point(x, 0.0),
                        point(x + 1.0, 0.0),
                        point(x + 1.0, 1.0),
                        point(x, 1.0),
                    ],
                    true,
                );

                let mut buffers = VertexBuffers::new();
                pool.checkout()
                    .tessellate_polyline(
                        &square,
                        &FillOptions::default(),
                        &mut simple_builder(&mut buffers),
                    )
                    .unwrap();

                buffers.indices.len()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 6);
    }

    assert!(pool.idle_count() >= 1);
    assert!(pool.idle_count() <= 4);
}
