//! Bidirectional mapping between team names and dense, zero-based team ids.

use rustc_hash::FxHashMap;
use std::ops::Index;

pub type TeamId = usize;

#[derive(Debug, Clone, Default)]
pub struct TeamRegistry {
    id_by_name: FxHashMap<String, TeamId>,
    names: Vec<String>,
}
impl TeamRegistry {
    pub fn with_capacity(capacity: usize) -> Self {
        let id_by_name = FxHashMap::with_capacity_and_hasher(capacity, Default::default());
        let names = Vec::with_capacity(capacity);
        Self { id_by_name, names }
    }

    /// Returns the id of `name`, assigning the next free id if the name is new.
    pub fn register(&mut self, name: &str) -> TeamId {
        if let Some(&id) = self.id_by_name.get(name) {
            return id;
        }
        let id = self.names.len();
        self.id_by_name.insert(name.to_string(), id);
        self.names.push(name.to_string());
        id
    }

    pub fn id_of(&self, name: &str) -> Option<TeamId> {
        self.id_by_name.get(name).copied()
    }

    pub fn name_of(&self, id: TeamId) -> Option<&str> {
        self.names.get(id).map(String::as_str)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn clear(&mut self) {
        self.id_by_name.clear();
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl Index<TeamId> for TeamRegistry {
    type Output = str;

    fn index(&self, id: TeamId) -> &Self::Output {
        self.name_of(id)
            .unwrap_or_else(|| panic!("no team with id {id}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_and_resolve() {
        let mut registry = TeamRegistry::with_capacity(4);
        assert!(registry.is_empty());
        assert_eq!(0, registry.register("Munich"));
        assert_eq!(1, registry.register("Bremen"));
        assert_eq!(2, registry.len());

        assert_eq!(Some(0), registry.id_of("Munich"));
        assert_eq!(Some(1), registry.id_of("Bremen"));
        assert_eq!(None, registry.id_of("Hamburg"));

        assert_eq!(Some("Munich"), registry.name_of(0));
        assert_eq!("Bremen", &registry[1]);
        assert_eq!(None, registry.name_of(2));
        assert_eq!(&["Munich".to_string(), "Bremen".to_string()], registry.names());
    }

    #[test]
    fn register_is_idempotent() {
        let mut registry = TeamRegistry::default();
        let id = registry.register("Schalke");
        registry.register("Dortmund");
        assert_eq!(id, registry.register("Schalke"));
        assert_eq!(Some(id), registry.id_of("Schalke"));
        assert_eq!(2, registry.len());
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut registry = TeamRegistry::default();
        assert_eq!(0, registry.register("Bayern"));
        assert_eq!(1, registry.register("bayern"));
        assert_eq!(None, registry.id_of("BAYERN"));
    }

    #[test]
    fn clear_resets_ids() {
        let mut registry = TeamRegistry::default();
        registry.register("Munich");
        registry.register("Bremen");
        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(None, registry.id_of("Munich"));
        assert_eq!(0, registry.register("Bremen"));
    }

    #[test]
    #[should_panic(expected = "no team with id 2")]
    fn no_team_at_id() {
        let mut registry = TeamRegistry::default();
        registry.register("Munich");
        registry.register("Bremen");
        let _ = &registry[2];
    }
}
