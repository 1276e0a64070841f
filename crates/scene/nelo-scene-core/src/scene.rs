//! The scene: entities, their component collections and the playhead.

use std::any::{type_name, TypeId};

use hashbrown::{HashMap, HashSet};
use log::{debug, trace};
use nelo_timeline_core::{Time, TimelineContext};

use crate::collection::{Collection, ErasedCollection};
use crate::components::Component;
use crate::config::SceneConfig;
use crate::entity::{Entity, EntityAllocator};
use crate::error::SceneError;
use crate::Result;

/// A set of entities whose components are animated by timelines.
///
/// Each scene has its own [`TimelineContext`]; create component timelines
/// through [`Scene::timelines`] so they pick up the scene's configuration.
pub struct Scene {
    config: SceneConfig,
    timelines: TimelineContext,
    entities: EntityAllocator,
    alive: HashSet<Entity>,
    collections: HashMap<TypeId, Box<dyn ErasedCollection>>,
    time: Time,
}

impl Scene {
    pub fn new(config: SceneConfig) -> Result<Self> {
        config.validate()?;
        debug!("Scene '{}' created at {} fps", config.name, config.fps);
        Ok(Self {
            timelines: TimelineContext::new(config.timeline.clone()),
            config,
            entities: EntityAllocator::new(),
            alive: HashSet::new(),
            collections: HashMap::new(),
            time: 0.0,
        })
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Self::new(SceneConfig::from_json(json)?)
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn timelines(&self) -> &TimelineContext {
        &self.timelines
    }

    // ----- entities -----

    pub fn create_entity(&mut self) -> Entity {
        let entity = self.entities.alloc();
        self.alive.insert(entity);
        entity
    }

    /// Remove an entity and every component attached to it.
    pub fn destroy_entity(&mut self, entity: Entity) -> Result<()> {
        if !self.alive.remove(&entity) {
            return Err(SceneError::UnknownEntity { entity });
        }
        let mut removed = 0;
        for collection in self.collections.values_mut() {
            if collection.remove_entity(entity) {
                removed += 1;
            }
        }
        debug!("Destroyed {entity} with {removed} component(s)");
        Ok(())
    }

    pub fn is_alive(&self, entity: Entity) -> bool {
        self.alive.contains(&entity)
    }

    /// Live entities in creation order.
    pub fn entities(&self) -> Vec<Entity> {
        let mut out: Vec<_> = self.alive.iter().copied().collect();
        out.sort_unstable();
        out
    }

    // ----- components -----

    /// Attach `component` to `entity`, replacing any component of the same type.
    pub fn add_component<C: Component>(&mut self, entity: Entity, component: C) -> Result<&mut C> {
        self.ensure_alive(entity)?;
        let collection = self.collection_mut::<C>();
        if collection.insert(entity, component).is_some() {
            debug!("Replaced {} on {entity}", type_name::<C>());
        }
        collection
            .get_mut(entity)
            .ok_or(SceneError::MissingComponent {
                entity,
                component: type_name::<C>(),
            })
    }

    pub fn component<C: Component>(&self, entity: Entity) -> Result<&C> {
        self.ensure_alive(entity)?;
        self.collection::<C>()
            .and_then(|c| c.get(entity))
            .ok_or(SceneError::MissingComponent {
                entity,
                component: type_name::<C>(),
            })
    }

    pub fn component_mut<C: Component>(&mut self, entity: Entity) -> Result<&mut C> {
        self.ensure_alive(entity)?;
        self.collection_mut::<C>()
            .get_mut(entity)
            .ok_or(SceneError::MissingComponent {
                entity,
                component: type_name::<C>(),
            })
    }

    pub fn has_component<C: Component>(&self, entity: Entity) -> bool {
        self.collection::<C>().is_some_and(|c| c.contains(entity))
    }

    pub fn remove_component<C: Component>(&mut self, entity: Entity) -> Result<C> {
        self.ensure_alive(entity)?;
        self.collection_mut::<C>()
            .remove(entity)
            .ok_or(SceneError::MissingComponent {
                entity,
                component: type_name::<C>(),
            })
    }

    /// All components of type `C`, or `None` if none were ever added.
    pub fn collection<C: Component>(&self) -> Option<&Collection<C>> {
        self.collections
            .get(&TypeId::of::<C>())
            .and_then(|c| c.as_any().downcast_ref::<Collection<C>>())
    }

    fn collection_mut<C: Component>(&mut self) -> &mut Collection<C> {
        let slot = self
            .collections
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(Collection::<C>::default()));
        match slot.as_any_mut().downcast_mut::<Collection<C>>() {
            Some(collection) => collection,
            None => unreachable!("collections are keyed by their component TypeId"),
        }
    }

    fn ensure_alive(&self, entity: Entity) -> Result<()> {
        if self.is_alive(entity) {
            Ok(())
        } else {
            Err(SceneError::UnknownEntity { entity })
        }
    }

    // ----- time -----

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn set_time(&mut self, time: Time) {
        trace!("Scene '{}' time {time}", self.config.name);
        self.time = time;
    }

    /// Sample one entity's component at the current time.
    pub fn sample<C: Component>(&self, entity: Entity) -> Result<C::Sample> {
        Ok(self.component::<C>(entity)?.sample(self.time))
    }

    /// Sample every component of type `C` at the current time, in entity order.
    pub fn sample_all<C: Component>(&self) -> Vec<(Entity, C::Sample)> {
        match self.collection::<C>() {
            Some(collection) => collection
                .iter()
                .map(|(entity, c)| (entity, c.sample(self.time)))
                .collect(),
            None => Vec::new(),
        }
    }

    /// Frame times in `[start, end)` at the configured frame rate.
    pub fn frame_times(&self, start: Time, end: Time) -> impl Iterator<Item = Time> {
        let fps = self.config.fps;
        let mut frames = if end > start {
            ((end - start) * fps).ceil() as u64
        } else {
            0
        };
        // The product can round up past a whole frame count.
        while frames > 0 && start + (frames - 1) as f64 / fps >= end {
            frames -= 1;
        }
        (0..frames).map(move |i| start + i as f64 / fps)
    }

    /// Step the playhead through `[start, end)`, calling `frame` once per frame
    /// with the frame index. Stops at the first error. Returns the number of
    /// frames visited.
    pub fn play<E, F>(&mut self, start: Time, end: Time, mut frame: F) -> core::result::Result<u64, E>
    where
        F: FnMut(u64, &Scene) -> core::result::Result<(), E>,
    {
        let times: Vec<Time> = self.frame_times(start, end).collect();
        debug!(
            "Playing '{}' over [{start}, {end}): {} frame(s)",
            self.config.name,
            times.len()
        );
        let mut count = 0;
        for (index, t) in times.into_iter().enumerate() {
            self.set_time(t);
            frame(index as u64, self)?;
            count += 1;
        }
        Ok(count)
    }
}

impl std::fmt::Debug for Scene {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scene")
            .field("name", &self.config.name)
            .field("entities", &self.alive.len())
            .field("collections", &self.collections.len())
            .field("time", &self.time)
            .finish()
    }
}
