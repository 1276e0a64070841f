//! Per-component-type storage keyed by entity.

use std::any::Any;

use hashbrown::HashMap;

use crate::entity::Entity;

/// All components of one type, at most one per entity.
#[derive(Debug)]
pub struct Collection<C> {
    items: HashMap<Entity, C>,
}

impl<C> Default for Collection<C> {
    fn default() -> Self {
        Self {
            items: HashMap::new(),
        }
    }
}

impl<C> Collection<C> {
    /// Insert or replace the component of `entity`, returning the previous one.
    pub fn insert(&mut self, entity: Entity, component: C) -> Option<C> {
        self.items.insert(entity, component)
    }

    pub fn get(&self, entity: Entity) -> Option<&C> {
        self.items.get(&entity)
    }

    pub fn get_mut(&mut self, entity: Entity) -> Option<&mut C> {
        self.items.get_mut(&entity)
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.items.contains_key(&entity)
    }

    pub fn remove(&mut self, entity: Entity) -> Option<C> {
        self.items.remove(&entity)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Components in entity order.
    pub fn iter(&self) -> impl Iterator<Item = (Entity, &C)> {
        let mut entries: Vec<_> = self.items.iter().map(|(e, c)| (*e, c)).collect();
        entries.sort_unstable_by_key(|(e, _)| *e);
        entries.into_iter()
    }
}

/// Type-erased view used by the scene to manage collections of any type.
pub(crate) trait ErasedCollection: Send + Sync {
    fn remove_entity(&mut self, entity: Entity) -> bool;
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<C: Send + Sync + 'static> ErasedCollection for Collection<C> {
    fn remove_entity(&mut self, entity: Entity) -> bool {
        self.remove(entity).is_some()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
