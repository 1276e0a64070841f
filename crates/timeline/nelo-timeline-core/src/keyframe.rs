//! Keyframes and their ordered store.

use crate::easing::Easing;
use crate::Time;

/// An authored state: at time `at` the timeline reaches `value`, arriving
/// along `easing` from the previous state.
///
/// Several keyframes may share one time; they keep the order they were added
/// in, which lets an author blend to one state and then jump to another.
#[derive(Clone, Debug)]
pub struct Keyframe<T> {
    pub at: Time,
    pub value: T,
    pub easing: Easing,
}

impl<T> Keyframe<T> {
    pub fn new(at: Time, value: T, easing: Easing) -> Self {
        Self { at, value, easing }
    }
}

/// Keyframes sorted ascending by `at`, ties in insertion order.
#[derive(Clone, Debug)]
pub struct KeyframeStore<T> {
    frames: Vec<Keyframe<T>>,
}

impl<T> Default for KeyframeStore<T> {
    fn default() -> Self {
        Self { frames: Vec::new() }
    }
}

impl<T> KeyframeStore<T> {
    /// Insert after every keyframe with `at <= keyframe.at`. Returns the index
    /// the keyframe landed at.
    pub fn insert(&mut self, keyframe: Keyframe<T>) -> usize {
        let idx = self.frames.partition_point(|k| k.at <= keyframe.at);
        self.frames.insert(idx, keyframe);
        idx
    }

    #[inline]
    pub fn last(&self) -> Option<&Keyframe<T>> {
        self.frames.last()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyframe<T>> {
        self.frames.iter()
    }
}
