//! In-memory manager lookup for hierarchy-path resolution.

use std::collections::{HashMap, HashSet};

use crate::domain::directory::Manager;

/// Manager records indexed by id for upward path walks.
///
/// Built once per request from a full manager scan; the directory is small
/// enough that this beats chasing links with one query per hop.
#[derive(Debug, Default)]
pub struct ManagerDirectory {
    by_id: HashMap<i32, ManagerLink>,
}

#[derive(Debug, Clone)]
struct ManagerLink {
    name: String,
    manager_id: Option<i32>,
}

impl ManagerDirectory {
    /// Index the given managers by id.
    #[must_use]
    pub fn new(managers: &[Manager]) -> Self {
        let by_id = managers
            .iter()
            .map(|manager| {
                (
                    manager.id,
                    ManagerLink {
                        name: manager.name.clone(),
                        manager_id: manager.manager_id,
                    },
                )
            })
            .collect();
        Self { by_id }
    }

    /// Resolves the hierarchy path for a record, topmost ancestor first.
    ///
    /// The walk follows `manager_id` links upward and stops silently at a
    /// missing link, an unknown id, or a previously visited manager, so
    /// broken chains and cycles truncate rather than fail.
    #[must_use]
    pub fn path_for(&self, name: &str, manager_id: Option<i32>) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut visited = HashSet::new();
        let mut cursor = manager_id;
        while let Some(id) = cursor {
            if !visited.insert(id) {
                break;
            }
            let Some(link) = self.by_id.get(&id) else {
                break;
            };
            ancestors.push(link.name.clone());
            cursor = link.manager_id;
        }
        ancestors.reverse();
        ancestors.push(name.to_owned());
        ancestors
    }

    /// The name of the manager with the given id, if indexed.
    #[must_use]
    pub fn name_of(&self, id: i32) -> Option<&str> {
        self.by_id.get(&id).map(|link| link.name.as_str())
    }
}
