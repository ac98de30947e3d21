use std::collections::HashSet;

use super::errors::LoadError;

/// World-unique component id
pub type ComponentId = u32;

/// Id of a contraption inside the `ContraptionSystem` arena
pub type ContraptionId = u32;

/// Allocator for world-unique component ids.
///
/// Serialized ids are claimed as-is and push the counter past them, so fresh ids
/// never collide with ids that came from save data.
#[derive(Clone, Debug)]
pub struct ComponentIds {
    next: ComponentId,
    live: HashSet<ComponentId>,
}

impl ComponentIds {
    pub fn new() -> Self {
        Self {
            next: 1,
            live: HashSet::new(),
        }
    }

    /// Id the next `allocate` would hand out, without reserving it
    pub fn peek(&self) -> ComponentId {
        let mut id = self.next;
        while self.live.contains(&id) {
            id = id.saturating_add(1);
        }
        id
    }

    pub fn allocate(&mut self) -> ComponentId {
        let id = self.peek();
        self.next = id.saturating_add(1);
        self.live.insert(id);
        id
    }

    /// Claim an id coming from serialized data.
    pub fn claim(&mut self, id: ComponentId) -> Result<(), LoadError> {
        if !self.live.insert(id) {
            return Err(LoadError::DuplicateId(id));
        }
        if id >= self.next {
            self.next = id.saturating_add(1);
        }
        Ok(())
    }

    pub fn is_live(&self, id: ComponentId) -> bool {
        self.live.contains(&id)
    }

    pub fn release(&mut self, id: ComponentId) {
        self.live.remove(&id);
    }

    pub fn live_count(&self) -> usize {
        self.live.len()
    }
}

impl Default for ComponentIds {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn claimed_ids_push_the_counter() {
        let mut ids = ComponentIds::new();
        assert_eq!(ids.allocate(), 1);
        ids.claim(40).unwrap();
        assert_eq!(ids.allocate(), 41);
    }

    #[test]
    fn peek_does_not_reserve() {
        let mut ids = ComponentIds::new();
        ids.claim(1).unwrap();
        assert_eq!(ids.peek(), 2);
        assert_eq!(ids.peek(), 2);
        assert_eq!(ids.allocate(), 2);
        assert_eq!(ids.live_count(), 2);
    }

    #[test]
    fn claiming_a_live_id_fails() {
        let mut ids = ComponentIds::new();
        let id = ids.allocate();
        assert_eq!(ids.claim(id), Err(LoadError::DuplicateId(id)));
        ids.release(id);
        assert!(ids.claim(id).is_ok());
    }
}
