// Copyright @yucwang 2026

use crate::core::interaction::SurfaceId;
use crate::math::constants::{Float, Vector2f};
use crate::math::spectrum::RGBSpectrum;

/// Physically plausible nesting is shallow; a small inline buffer keeps the
/// per-path state allocation-free.
pub const INTERFACE_STACK_CAPACITY: usize = 16;

/// One still-open transmissive boundary: the path is currently inside the
/// medium bounded by `(surface, part)`. The medium's refractive index and
/// absorption coefficient are captured at push time so reads never go back
/// to the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterfaceEntry {
    pub surface: SurfaceId,
    pub part: u32,
    pub uv: Vector2f,
    pub ior: Float,
    pub absorption: RGBSpectrum,
}

impl InterfaceEntry {
    pub fn new(surface: SurfaceId, part: u32, uv: Vector2f,
               ior: Float, absorption: RGBSpectrum) -> Self {
        Self { surface, part, uv, ior, absorption }
    }

    /// Identity match; uv plays no part in it.
    pub fn matches(&self, surface: SurfaceId, part: u32) -> bool {
        self.surface == surface && self.part == part
    }

    fn vacuum() -> Self {
        Self {
            surface: SurfaceId(u32::MAX),
            part: 0,
            uv: Vector2f::new(0.0, 0.0),
            ior: 1.0,
            absorption: RGBSpectrum::default(),
        }
    }
}

/// Fixed-capacity record of the transmissive media enclosing the current
/// ray segment, owned by exactly one in-flight path. The top entry is the
/// innermost currently-open medium; an empty stack means the ambient
/// medium.
///
/// Overflow policy: a push at capacity is rejected and logged once per
/// stack; the path continues with its existing (stale) innermost-medium
/// information. Never fatal to the render.
#[derive(Clone)]
pub struct InterfaceStack {
    entries: [InterfaceEntry; INTERFACE_STACK_CAPACITY],
    len: usize,
    ambient_ior: Float,
    overflow_reported: bool,
}

impl Default for InterfaceStack {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl InterfaceStack {
    pub fn new(ambient_ior: Float) -> Self {
        Self {
            entries: [InterfaceEntry::vacuum(); INTERFACE_STACK_CAPACITY],
            len: 0,
            ambient_ior,
            overflow_reported: false,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Append `entry` as the new innermost medium. Returns `false` when the
    /// stack is full and the push was rejected.
    pub fn push(&mut self, entry: InterfaceEntry) -> bool {
        if self.len == INTERFACE_STACK_CAPACITY {
            if !self.overflow_reported {
                log::warn!(
                    "interface stack overflow at capacity {}; rejecting entry for surface {:?}",
                    INTERFACE_STACK_CAPACITY, entry.surface
                );
                self.overflow_reported = true;
            }
            return false;
        }
        self.entries[self.len] = entry;
        self.len += 1;
        true
    }

    /// Remove and return the innermost entry. Callers guarantee push/pop
    /// balance; on an empty stack this is a no-op returning `None`.
    pub fn pop(&mut self) -> Option<InterfaceEntry> {
        if self.len == 0 {
            return None;
        }
        self.len -= 1;
        Some(self.entries[self.len])
    }

    /// Remove the innermost entry matching `(surface, part)`, keeping the
    /// relative order of everything else. Transmissive surfaces are not
    /// always exited in LIFO order (overlapping volumes), so an exit event
    /// must be able to cancel an arbitrary still-open entry. Returns whether
    /// a match was found.
    pub fn remove(&mut self, surface: SurfaceId, part: u32) -> bool {
        let mut found = None;
        for i in (0..self.len).rev() {
            if self.entries[i].matches(surface, part) {
                found = Some(i);
                break;
            }
        }
        match found {
            Some(i) => {
                for j in i..self.len - 1 {
                    self.entries[j] = self.entries[j + 1];
                }
                self.len -= 1;
                true
            }
            None => false,
        }
    }

    pub fn top(&self) -> Option<&InterfaceEntry> {
        if self.len == 0 {
            None
        } else {
            Some(&self.entries[self.len - 1])
        }
    }

    /// Refractive index of the innermost open medium, falling back to the
    /// configured ambient medium when nothing is open.
    pub fn top_ior(&self) -> Float {
        match self.top() {
            Some(entry) => entry.ior,
            None => self.ambient_ior,
        }
    }

    /// The index of refraction that will apply once the innermost entry
    /// matching `(surface, part)` has been removed. Lets the integrator
    /// resolve the far side of an exit refraction before committing the
    /// stack update.
    pub fn ior_excluding(&self, surface: SurfaceId, part: u32) -> Float {
        let mut skipped = false;
        for i in (0..self.len).rev() {
            if !skipped && self.entries[i].matches(surface, part) {
                skipped = true;
                continue;
            }
            return self.entries[i].ior;
        }
        self.ambient_ior
    }

    pub fn clear(&mut self) {
        self.len = 0;
        self.overflow_reported = false;
    }

    pub fn swap(&mut self, other: &mut InterfaceStack) {
        std::mem::swap(self, other);
    }
}

/* Tests for the interface stack */

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: u32, part: u32, ior: f32) -> InterfaceEntry {
        InterfaceEntry::new(SurfaceId(id), part, Vector2f::new(0.5, 0.5),
                            ior, RGBSpectrum::default())
    }

    #[test]
    fn test_lifo_top_tracks_pushes_and_pops() {
        let mut stack = InterfaceStack::default();
        assert!(stack.is_empty());
        assert_eq!(stack.top_ior(), 1.0);

        assert!(stack.push(entry(0, 0, 1.33)));
        assert_eq!(stack.top().unwrap().surface, SurfaceId(0));
        assert_eq!(stack.top_ior(), 1.33);

        assert!(stack.push(entry(1, 0, 1.5)));
        assert_eq!(stack.top_ior(), 1.5);

        assert_eq!(stack.pop().unwrap().surface, SurfaceId(1));
        assert_eq!(stack.top_ior(), 1.33);

        assert_eq!(stack.pop().unwrap().surface, SurfaceId(0));
        assert!(stack.is_empty());
        assert_eq!(stack.pop(), None);
    }

    #[test]
    fn test_empty_iff_balanced() {
        let mut stack = InterfaceStack::default();
        for i in 0..4 {
            stack.push(entry(i, 0, 1.5));
        }
        assert_eq!(stack.len(), 4);
        stack.pop();
        stack.remove(SurfaceId(0), 0);
        stack.remove(SurfaceId(1), 0);
        stack.pop();
        assert!(stack.is_empty());
    }

    #[test]
    fn test_remove_preserves_relative_order() {
        let mut stack = InterfaceStack::default();
        stack.push(entry(0, 0, 1.1));
        stack.push(entry(1, 0, 1.2));
        stack.push(entry(2, 0, 1.3));

        // Non-LIFO exit of the middle volume.
        assert!(stack.remove(SurfaceId(1), 0));
        assert_eq!(stack.len(), 2);
        assert_eq!(stack.top().unwrap().surface, SurfaceId(2));
        stack.pop();
        assert_eq!(stack.top().unwrap().surface, SurfaceId(0));
    }

    #[test]
    fn test_remove_miss_returns_false() {
        let mut stack = InterfaceStack::default();
        stack.push(entry(0, 0, 1.5));
        assert!(!stack.remove(SurfaceId(0), 1));
        assert!(!stack.remove(SurfaceId(9), 0));
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn test_remove_matches_identity_not_uv() {
        let mut stack = InterfaceStack::default();
        let mut e = entry(3, 2, 1.5);
        e.uv = Vector2f::new(0.1, 0.9);
        stack.push(e);
        // Different uv, same (surface, part).
        assert!(stack.remove(SurfaceId(3), 2));
    }

    #[test]
    fn test_overflow_rejects_push() {
        let mut stack = InterfaceStack::default();
        for i in 0..INTERFACE_STACK_CAPACITY as u32 {
            assert!(stack.push(entry(i, 0, 1.5)));
        }
        assert!(!stack.push(entry(99, 0, 2.0)));
        assert_eq!(stack.len(), INTERFACE_STACK_CAPACITY);
        // Existing top survives the rejected push.
        assert_eq!(stack.top().unwrap().surface,
                   SurfaceId(INTERFACE_STACK_CAPACITY as u32 - 1));
    }

    #[test]
    fn test_ior_excluding_skips_one_match() {
        let mut stack = InterfaceStack::new(1.0);
        stack.push(entry(0, 0, 1.33));
        stack.push(entry(1, 0, 1.5));
        assert_eq!(stack.ior_excluding(SurfaceId(1), 0), 1.33);
        assert_eq!(stack.ior_excluding(SurfaceId(0), 0), 1.5);
        assert_eq!(stack.ior_excluding(SurfaceId(7), 0), 1.5);

        let mut single = InterfaceStack::new(1.2);
        single.push(entry(0, 0, 1.5));
        assert_eq!(single.ior_excluding(SurfaceId(0), 0), 1.2);
    }

    #[test]
    fn test_clear_and_swap() {
        let mut a = InterfaceStack::default();
        let mut b = InterfaceStack::default();
        a.push(entry(0, 0, 1.5));
        b.push(entry(1, 0, 1.33));
        b.push(entry(2, 0, 1.1));

        a.swap(&mut b);
        assert_eq!(a.len(), 2);
        assert_eq!(b.len(), 1);
        assert_eq!(a.top().unwrap().surface, SurfaceId(2));

        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.top_ior(), 1.0);
    }

    #[test]
    fn test_snapshot_restore_via_clone() {
        let mut stack = InterfaceStack::default();
        stack.push(entry(0, 0, 1.5));
        let snapshot = stack.clone();
        stack.push(entry(1, 0, 1.33));
        stack.pop();
        stack.pop();
        assert!(stack.is_empty());

        let restored = snapshot;
        assert_eq!(restored.len(), 1);
        assert_eq!(restored.top().unwrap().surface, SurfaceId(0));
    }
}
