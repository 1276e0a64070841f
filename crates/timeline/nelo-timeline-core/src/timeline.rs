//! The timeline core: a shared, composable value over time.
//!
//! A [`Timeline`] is a cheap handle onto a reference-counted core. Every clone
//! refers to the same core, so a timeline layered into a parent keeps
//! receiving the author's later edits.
//!
//! Sampling model:
//! - Procedural timelines return `generator(t)`; they never carry keyframes.
//! - Otherwise `t <= 0` returns the anchor untouched. For `t > 0` the state
//!   starts at the anchor and walks the keyframes in order: keyframes before
//!   `t` replace the state and advance the low bound, keyframes at or after
//!   `t` blend the state towards their value (see [`KeyframeBlend`]).
//! - Layers are then applied in insertion order as `combine(delta, state)`
//!   where `delta = child.sample(t - start)`, skipping layers whose start is
//!   still ahead of `t`.
//!
//! Composition is guarded: a child may only be layered in if it does not
//! already depend on the parent, which keeps the layer graph acyclic and
//! plain reference counting sufficient.

use std::fmt;
use std::sync::Arc;

use hashbrown::HashSet;
use log::{debug, warn};
use parking_lot::RwLock;

use crate::capability::{Add, Animatable, Interpolate, Multiply};
use crate::config::{KeyframeBlend, TimelineConfig};
use crate::easing::Easing;
use crate::error::TimelineError;
use crate::ids::TimelineId;
use crate::keyframe::{Keyframe, KeyframeStore};
use crate::{Result, Time};

/// Procedural source of a timeline.
pub type Generator<T> = Arc<dyn Fn(Time) -> T + Send + Sync>;

type Combine<T> = fn(&T, &T) -> T;
type Blend<T> = fn(&T, &T, f64) -> T;

/// How a layer merges into the state beneath it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerMode {
    Additive,
    Multiplicative,
}

/// Read-only view of one layer.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LayerInfo {
    pub start: Time,
    pub child: TimelineId,
    pub mode: LayerMode,
}

enum Source<T> {
    Anchor(T),
    Generator(Generator<T>),
}

struct Layer<T> {
    start: Time,
    child: Timeline<T>,
    mode: LayerMode,
    // Captured where the capability bound is known; see `add_timeline`.
    combine: Combine<T>,
}

struct TimelineData<T> {
    source: Source<T>,
    keyframes: KeyframeStore<T>,
    // Set by the first `add_keyframe`, which is where `T: Interpolate` holds.
    blend: Option<Blend<T>>,
    layers: Vec<Layer<T>>,
    dependencies: HashSet<TimelineId>,
    cached_length: Time,
    user_length: bool,
}

struct Shared<T> {
    id: TimelineId,
    config: Arc<TimelineConfig>,
    data: RwLock<TimelineData<T>>,
}

/// A value of type `T` that varies with time.
pub struct Timeline<T> {
    shared: Arc<Shared<T>>,
}

impl<T> Clone for Timeline<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Animatable> Timeline<T> {
    fn from_source(
        config: Arc<TimelineConfig>,
        source: Source<T>,
        dependencies: HashSet<TimelineId>,
    ) -> Self {
        let id = TimelineId::next();
        let data = TimelineData {
            source,
            keyframes: KeyframeStore::default(),
            blend: None,
            layers: Vec::new(),
            dependencies,
            cached_length: config.fallback_length,
            user_length: false,
        };
        Self {
            shared: Arc::new(Shared {
                id,
                config,
                data: RwLock::new(data),
            }),
        }
    }

    pub(crate) fn new_constant(config: Arc<TimelineConfig>, anchor: T) -> Self {
        Self::from_source(config, Source::Anchor(anchor), HashSet::new())
    }

    pub(crate) fn new_procedural(config: Arc<TimelineConfig>, generator: Generator<T>) -> Self {
        Self::from_source(config, Source::Generator(generator), HashSet::new())
    }

    /// A procedural timeline whose generator reads `a` and `b`. Both operands
    /// (and everything they depend on) become dependencies of the result, so
    /// the result can never be layered back into either of them. The config
    /// is taken from `a`.
    pub(crate) fn procedural_over<F>(a: &Timeline<T>, b: &Timeline<T>, generator: F) -> Self
    where
        F: Fn(Time) -> T + Send + Sync + 'static,
    {
        let mut dependencies = HashSet::new();
        for operand in [a, b] {
            dependencies.insert(operand.id());
            dependencies.extend(operand.shared.data.read().dependencies.iter().copied());
        }
        Self::from_source(
            Arc::clone(&a.shared.config),
            Source::Generator(Arc::new(generator)),
            dependencies,
        )
    }

    /// Evaluate the timeline at `time`. Never mutates the graph.
    pub fn sample(&self, time: Time) -> T {
        let data = self.shared.data.read();

        let mut state = match &data.source {
            Source::Generator(generate) => generate(time),
            Source::Anchor(anchor) => {
                if time <= 0.0 {
                    return anchor.clone();
                }
                self.blend_keyframes(&data, anchor, time)
            }
        };

        for layer in &data.layers {
            if time < layer.start {
                continue;
            }
            let delta = layer.child.sample(time - layer.start);
            state = (layer.combine)(&delta, &state);
        }

        state
    }

    fn blend_keyframes(&self, data: &TimelineData<T>, anchor: &T, time: Time) -> T {
        let mut state = anchor.clone();
        let Some(blend) = data.blend else {
            return state;
        };
        let nearest_only = self.shared.config.keyframe_blend == KeyframeBlend::Nearest;

        let mut last_time = 0.0;
        for key in data.keyframes.iter() {
            if key.at >= time {
                // `last_time < time <= key.at`, so the span is positive.
                let progress = (time - last_time) / (key.at - last_time);
                state = blend(&state, &key.value, key.easing.apply(progress));
                if nearest_only {
                    break;
                }
            } else {
                last_time = key.at;
                state = key.value.clone();
            }
        }
        state
    }

    /// Add a keyframe, keeping the store ordered by time. Fails on procedural
    /// timelines.
    pub fn add_keyframe(&self, at: Time, value: T, easing: Easing) -> Result<&Self>
    where
        T: Interpolate,
    {
        let mut data = self.shared.data.write();
        if matches!(data.source, Source::Generator(_)) {
            warn!("rejected keyframe at {at} on procedural timeline {}", self.id());
            return Err(TimelineError::InvalidOperation {
                id: self.id(),
                reason: "keyframes cannot be added to a procedural timeline".into(),
            });
        }

        data.blend = Some(<T as Interpolate>::interpolate);
        let index = data.keyframes.insert(Keyframe::new(at, value, easing));
        debug!("timeline {}: keyframe at {at} stored at index {index}", self.id());

        if !data.user_length {
            let len = self.compute_default_length(&data);
            data.cached_length = len;
        }
        Ok(self)
    }

    /// Layer `child` additively, starting at `start`. Fails if `child` already
    /// depends on this timeline.
    pub fn add_timeline(&self, start: Time, child: &Timeline<T>) -> Result<&Self>
    where
        T: Add,
    {
        self.layer(start, child, LayerMode::Additive, <T as Add>::add)
    }

    /// Layer `child` multiplicatively, starting at `start`. Fails if `child`
    /// already depends on this timeline.
    pub fn multiply_timeline(&self, start: Time, child: &Timeline<T>) -> Result<&Self>
    where
        T: Multiply,
    {
        self.layer(start, child, LayerMode::Multiplicative, <T as Multiply>::multiply)
    }

    fn layer(
        &self,
        start: Time,
        child: &Timeline<T>,
        mode: LayerMode,
        combine: Combine<T>,
    ) -> Result<&Self> {
        let parent_id = self.id();
        let child_id = child.id();

        // Validate against a snapshot of the child before touching our own
        // state; a rejection leaves both timelines as they were.
        let inherited = {
            let child_data = child.shared.data.read();
            if child_id == parent_id || child_data.dependencies.contains(&parent_id) {
                warn!("rejected {mode:?} layer: timeline {child_id} depends on {parent_id}");
                return Err(TimelineError::CyclicDependency {
                    parent: parent_id,
                    child: child_id,
                });
            }
            child_data.dependencies.clone()
        };

        let mut data = self.shared.data.write();
        data.dependencies.insert(child_id);
        data.dependencies.extend(inherited);
        data.layers.push(Layer {
            start,
            child: child.clone(),
            mode,
            combine,
        });
        debug!(
            "timeline {parent_id}: {mode:?} layer {child_id} at {start} ({} dependencies)",
            data.dependencies.len()
        );

        if !data.user_length {
            let len = self.compute_default_length(&data);
            data.cached_length = len;
        }
        Ok(self)
    }

    /// Pin the length to `length` when positive. Zero, negative (or NaN)
    /// unpins it and recomputes from keyframes and layers.
    pub fn set_length(&self, length: Time) -> &Self {
        let mut data = self.shared.data.write();
        if length > 0.0 {
            data.user_length = true;
            data.cached_length = length;
        } else {
            data.user_length = false;
            let len = self.compute_default_length(&data);
            data.cached_length = len;
        }
        self
    }

    /// Equivalent to `set_length(0.0)`.
    pub fn reset_length(&self) -> &Self {
        self.set_length(0.0)
    }

    /// Length implied by keyframes and layers, ignoring any pinned value.
    pub fn default_length(&self) -> Time {
        let data = self.shared.data.read();
        self.compute_default_length(&data)
    }

    fn compute_default_length(&self, data: &TimelineData<T>) -> Time {
        if data.keyframes.is_empty() && data.layers.is_empty() {
            return self.shared.config.fallback_length;
        }

        let mut len = data.keyframes.last().map_or(0.0, |k| k.at);
        for layer in &data.layers {
            let end = layer.start + layer.child.length();
            if end > len {
                len = end;
            }
        }
        len
    }

    /// Pinned length, or the default length as of the last edit.
    pub fn length(&self) -> Time {
        self.shared.data.read().cached_length
    }

    pub fn is_length_pinned(&self) -> bool {
        self.shared.data.read().user_length
    }

    pub fn is_procedural(&self) -> bool {
        matches!(self.shared.data.read().source, Source::Generator(_))
    }

    /// Anchor value; `None` for procedural timelines.
    pub fn anchor(&self) -> Option<T> {
        match &self.shared.data.read().source {
            Source::Anchor(anchor) => Some(anchor.clone()),
            Source::Generator(_) => None,
        }
    }

    pub fn keyframes(&self) -> Vec<Keyframe<T>> {
        self.shared.data.read().keyframes.iter().cloned().collect()
    }

    pub fn keyframe_times(&self) -> Vec<Time> {
        self.shared.data.read().keyframes.iter().map(|k| k.at).collect()
    }

    pub fn layers(&self) -> Vec<LayerInfo> {
        self.shared
            .data
            .read()
            .layers
            .iter()
            .map(|l| LayerInfo {
                start: l.start,
                child: l.child.id(),
                mode: l.mode,
            })
            .collect()
    }

    pub fn layer_count(&self) -> usize {
        self.shared.data.read().layers.len()
    }

    /// Whether `other` was layered into this timeline, directly or through
    /// one of its layers.
    pub fn depends_on(&self, other: &Timeline<T>) -> bool {
        self.shared.data.read().dependencies.contains(&other.id())
    }

    pub fn dependency_count(&self) -> usize {
        self.shared.data.read().dependencies.len()
    }
}

impl<T> Timeline<T> {
    #[inline]
    pub fn id(&self) -> TimelineId {
        self.shared.id
    }

    pub fn config(&self) -> &TimelineConfig {
        &self.shared.config
    }

    /// Whether both handles refer to the same core.
    #[inline]
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> fmt::Debug for Timeline<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct("Timeline");
        out.field("id", &self.shared.id);
        match self.shared.data.try_read() {
            Some(data) => out
                .field("procedural", &matches!(data.source, Source::Generator(_)))
                .field("keyframes", &data.keyframes.len())
                .field("layers", &data.layers.len())
                .field("length", &data.cached_length)
                .field("pinned", &data.user_length)
                .finish(),
            None => out.finish_non_exhaustive(),
        }
    }
}
