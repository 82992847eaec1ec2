//! Service dependency graph
//!
//! Built from `depends_on` edges. Provides a deterministic startup order
//! and cycle detection.

use std::collections::HashSet;

use indexmap::IndexMap;

use crate::domain::entities::Document;

/// Directed graph of service → services it depends on
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Insertion (document) order is preserved
    edges: IndexMap<String, Vec<String>>,
}

impl DependencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from every service's `depends_on`.
    ///
    /// Edges to services that do not exist are left out.
    pub fn from_document(document: &Document) -> Self {
        let mut graph = Self::new();
        for service in document.services.values() {
            let deps: Vec<&str> = service
                .depends_on
                .iter()
                .map(|d| d.service.as_str())
                .filter(|name| document.services.contains_key(*name))
                .collect();
            graph.add_service(&service.name, &deps);
        }
        graph
    }

    pub fn add_service(&mut self, name: &str, dependencies: &[&str]) {
        let entry = self.edges.entry(name.to_string()).or_default();
        for dep in dependencies {
            if !entry.iter().any(|d| d == dep) {
                entry.push(dep.to_string());
            }
        }
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.edges.get(name).map(Vec::as_slice)
    }

    /// Dependencies-first order; among services that are ready at the same
    /// time, document order wins.
    ///
    /// Returns the first cycle found when the graph is not a DAG.
    pub fn topological_order(&self) -> Result<Vec<String>, Vec<String>> {
        if let Some(cycle) = self.find_cycle() {
            return Err(cycle);
        }

        let mut placed: HashSet<&str> = HashSet::with_capacity(self.edges.len());
        let mut order = Vec::with_capacity(self.edges.len());

        while order.len() < self.edges.len() {
            let next = self.edges.iter().find(|(name, deps)| {
                !placed.contains(name.as_str())
                    && deps
                        .iter()
                        .all(|d| placed.contains(d.as_str()) || !self.edges.contains_key(d))
            });
            match next {
                Some((name, _)) => {
                    placed.insert(name.as_str());
                    order.push(name.clone());
                }
                // Unreachable once find_cycle returned None
                None => break,
            }
        }

        Ok(order)
    }

    /// Find one cycle, reported as a closed path (`a -> b -> a`)
    pub fn find_cycle(&self) -> Option<Vec<String>> {
        let mut visited: HashSet<&str> = HashSet::new();
        let mut path: Vec<&str> = Vec::new();

        for start in self.edges.keys() {
            if !visited.contains(start.as_str()) {
                if let Some(cycle) = self.find_cycle_dfs(start, &mut visited, &mut path) {
                    return Some(cycle);
                }
            }
        }
        None
    }

    fn find_cycle_dfs<'a>(
        &'a self,
        node: &'a str,
        visited: &mut HashSet<&'a str>,
        path: &mut Vec<&'a str>,
    ) -> Option<Vec<String>> {
        visited.insert(node);
        path.push(node);

        for dep in self.edges.get(node).into_iter().flatten() {
            if let Some(pos) = path.iter().position(|p| *p == dep.as_str()) {
                let mut cycle: Vec<String> = path[pos..].iter().map(|s| s.to_string()).collect();
                cycle.push(dep.clone());
                return Some(cycle);
            }
            if !visited.contains(dep.as_str()) {
                if let Some(cycle) = self.find_cycle_dfs(dep, visited, path) {
                    return Some(cycle);
                }
            }
        }

        path.pop();
        None
    }
}
