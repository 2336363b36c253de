//! In-memory movement collection
//!
//! The collection is the session's working copy of the store. It is owned
//! and passed explicitly; there is no global session state.

use super::ids::MovementId;
use super::movement::Movement;

/// The movements loaded for the active session
#[derive(Debug, Clone, Default)]
pub struct MovementCollection {
    movements: Vec<Movement>,
}

impl MovementCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a collection from a full store listing
    pub fn from_movements(movements: Vec<Movement>) -> Self {
        Self { movements }
    }

    /// Append a newly recorded movement
    pub fn append(&mut self, movement: Movement) {
        self.movements.push(movement);
    }

    /// Replace everything with a fresh listing (reload)
    pub fn replace_all(&mut self, movements: Vec<Movement>) {
        self.movements = movements;
    }

    /// Remove the movement with the given id; returns whether one was removed
    pub fn remove_by_id(&mut self, id: &MovementId) -> bool {
        let before = self.movements.len();
        self.movements.retain(|m| m.id.as_ref() != Some(id));
        self.movements.len() != before
    }

    pub fn get(&self, id: &MovementId) -> Option<&Movement> {
        self.movements.iter().find(|m| m.id.as_ref() == Some(id))
    }

    /// Find a movement by full id or by a unique id prefix
    pub fn find(&self, identifier: &str) -> Option<&Movement> {
        let identifier = identifier.trim();
        if identifier.is_empty() {
            return None;
        }
        if let Some(exact) = self
            .movements
            .iter()
            .find(|m| m.id.as_ref().map(|id| id.as_str()) == Some(identifier))
        {
            return Some(exact);
        }
        let mut matches = self.movements.iter().filter(|m| {
            m.id
                .as_ref()
                .is_some_and(|id| id.as_str().starts_with(identifier))
        });
        match (matches.next(), matches.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    pub fn as_slice(&self) -> &[Movement] {
        &self.movements
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Movement> {
        self.movements.iter()
    }

    pub fn len(&self) -> usize {
        self.movements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movements.is_empty()
    }

    /// Movements ordered newest registration first; undated registrations last
    pub fn recent_first(&self) -> Vec<&Movement> {
        let mut ordered: Vec<&Movement> = self.movements.iter().collect();
        ordered.sort_by(|a, b| match (a.registered_at, b.registered_at) {
            (Some(x), Some(y)) => y.cmp(&x),
            (Some(_), None) => std::cmp::Ordering::Less,
            (None, Some(_)) => std::cmp::Ordering::Greater,
            (None, None) => std::cmp::Ordering::Equal,
        });
        ordered
    }
}

impl<'a> IntoIterator for &'a MovementCollection {
    type Item = &'a Movement;
    type IntoIter = std::slice::Iter<'a, Movement>;

    fn into_iter(self) -> Self::IntoIter {
        self.movements.iter()
    }
}
