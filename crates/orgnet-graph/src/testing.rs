//! In-memory `GraphStore` for tests.
//!
//! Answers each [`QueryKind`] from a small graph held in memory, following
//! the same rules the Cypher statements encode: acquaintance paths are
//! undirected, bounded by [`MAX_HOPS`], and may only pass through `Person`
//! nodes. Every statement is recorded so tests can assert what was issued.

use std::collections::{BTreeMap, HashMap, VecDeque};
use std::sync::Mutex;

use async_trait::async_trait;
use orgnet_core::{EntityKind, RelationType};
use serde_json::{json, Value};

use crate::analysis::MAX_HOPS;
use crate::queries::lookup::find_lookup;
use crate::store::{GraphStore, QueryKind, Row, Statement, StoreError};

#[derive(Debug, Clone)]
struct MemoryNode {
    id: String,
    kind: EntityKind,
    name: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Clone)]
struct MemoryRelation {
    from: String,
    to: String,
    rel_type: RelationType,
    notes: Option<String>,
}

/// In-memory graph with statement recording and failure injection.
#[derive(Default)]
pub struct MemoryGraph {
    nodes: BTreeMap<String, MemoryNode>,
    relations: Vec<MemoryRelation>,
    failure: Option<StoreError>,
    issued: Mutex<Vec<Statement>>,
}

impl MemoryGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn person(mut self, id: &str, name: &str, title: Option<&str>) -> Self {
        self.insert_node(id, EntityKind::Person, Some(name), title);
        self
    }

    pub fn company(mut self, id: &str, name: &str) -> Self {
        self.insert_node(id, EntityKind::Company, Some(name), None);
        self
    }

    pub fn government(mut self, id: &str, name: &str) -> Self {
        self.insert_node(id, EntityKind::GovernmentBody, Some(name), None);
        self
    }

    /// Add a node with no name, to exercise label fallbacks.
    pub fn unnamed(mut self, id: &str, kind: EntityKind) -> Self {
        self.insert_node(id, kind, None, None);
        self
    }

    pub fn relate(self, from: &str, rel_type: RelationType, to: &str) -> Self {
        self.relate_with_notes(from, rel_type, to, None)
    }

    pub fn relate_with_notes(
        mut self,
        from: &str,
        rel_type: RelationType,
        to: &str,
        notes: Option<&str>,
    ) -> Self {
        self.relations.push(MemoryRelation {
            from: from.to_string(),
            to: to.to_string(),
            rel_type,
            notes: notes.map(String::from),
        });
        self
    }

    /// Make every statement fail with `message`.
    pub fn failing(self, message: &str) -> Self {
        self.failing_with(StoreError::Execution(message.to_string()))
    }

    /// Make every statement fail with `error`.
    pub fn failing_with(mut self, error: StoreError) -> Self {
        self.failure = Some(error);
        self
    }

    /// Statements issued so far.
    pub fn issued(&self) -> Vec<Statement> {
        self.issued.lock().map(|s| s.clone()).unwrap_or_default()
    }

    /// Kinds of the statements issued so far.
    pub fn issued_kinds(&self) -> Vec<QueryKind> {
        self.issued().into_iter().map(|s| s.kind).collect()
    }

    fn insert_node(&mut self, id: &str, kind: EntityKind, name: Option<&str>, title: Option<&str>) {
        self.nodes.insert(
            id.to_string(),
            MemoryNode {
                id: id.to_string(),
                kind,
                name: name.map(String::from),
                title: title.map(String::from),
            },
        );
    }

    fn node_of_kind(&self, id: &str, kind: EntityKind) -> Option<&MemoryNode> {
        self.nodes.get(id).filter(|n| n.kind == kind)
    }

    fn projection(node: &MemoryNode) -> Value {
        json!({
            "id": node.id,
            "name": node.name,
            "title": node.title,
            "labels": [node.kind.store_label()],
        })
    }

    fn edge_projection(rel: &MemoryRelation) -> Value {
        json!({
            "from": rel.from,
            "to": rel.to,
            "type": rel.rel_type.as_str(),
            "notes": rel.notes,
        })
    }

    /// People employed (now or formerly) by `org_id`, with the bridge type.
    fn employees(&self, org_id: &str) -> Vec<(&str, RelationType)> {
        let mut found: Vec<(&str, RelationType)> = self
            .relations
            .iter()
            .filter(|r| RelationType::EMPLOYMENT.contains(&r.rel_type))
            .filter_map(|r| {
                let person = if r.to == org_id {
                    r.from.as_str()
                } else if r.from == org_id {
                    r.to.as_str()
                } else {
                    return None;
                };
                self.node_of_kind(person, EntityKind::Person)
                    .map(|_| (person, r.rel_type))
            })
            .collect();
        found.sort_by(|a, b| a.0.cmp(b.0).then(a.1.as_str().cmp(b.1.as_str())));
        found
    }

    /// Breadth-first shortest path, neighbours visited in id order.
    fn shortest_path(&self, start: &str, goal: &str) -> Option<(Vec<String>, Vec<usize>)> {
        let mut adjacency: HashMap<&str, Vec<(&str, usize)>> = HashMap::new();
        for (index, rel) in self.relations.iter().enumerate() {
            if RelationType::ACQUAINTANCE.contains(&rel.rel_type) {
                adjacency
                    .entry(rel.from.as_str())
                    .or_default()
                    .push((rel.to.as_str(), index));
                adjacency
                    .entry(rel.to.as_str())
                    .or_default()
                    .push((rel.from.as_str(), index));
            }
        }
        for neighbours in adjacency.values_mut() {
            neighbours.sort();
        }

        let mut previous: HashMap<&str, Option<(&str, usize)>> = HashMap::new();
        let mut depth: HashMap<&str, u32> = HashMap::new();
        let mut queue = VecDeque::new();
        previous.insert(start, None);
        depth.insert(start, 0);
        queue.push_back(start);

        while let Some(current) = queue.pop_front() {
            if current == goal {
                break;
            }
            let current_depth = depth[current];
            // Only people may sit inside a path.
            let interior_ok = current == start
                || self.node_of_kind(current, EntityKind::Person).is_some();
            if current_depth >= MAX_HOPS || !interior_ok {
                continue;
            }
            for &(next, rel_index) in adjacency.get(current).into_iter().flatten() {
                if !previous.contains_key(next) {
                    previous.insert(next, Some((current, rel_index)));
                    depth.insert(next, current_depth + 1);
                    queue.push_back(next);
                }
            }
        }

        previous.get(goal)?;
        let mut nodes = vec![goal.to_string()];
        let mut edges = Vec::new();
        let mut cursor = goal;
        while let Some(Some((prev, rel_index))) = previous.get(cursor) {
            nodes.push(prev.to_string());
            edges.push(*rel_index);
            cursor = *prev;
        }
        nodes.reverse();
        edges.reverse();
        Some((nodes, edges))
    }

    fn path_columns(&self, nodes: &[String], edges: &[usize]) -> (Value, Value) {
        let nodes = nodes
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .map(Self::projection)
            .collect();
        let edges = edges
            .iter()
            .map(|&i| Self::edge_projection(&self.relations[i]))
            .collect();
        (Value::Array(nodes), Value::Array(edges))
    }

    fn organization_path(&self, stmt: &Statement, first: EntityKind, second: EntityKind) -> Vec<Row> {
        let first_id = stmt.param_value("first_anchor_id").unwrap_or_default();
        let second_id = stmt.param_value("second_anchor_id").unwrap_or_default();
        let (Some(a1), Some(a2)) = (
            self.node_of_kind(first_id, first),
            self.node_of_kind(second_id, second),
        ) else {
            return Vec::new();
        };

        let mut best: Option<(usize, Row)> = None;
        for (p1, r1) in self.employees(first_id) {
            for (p2, r2) in self.employees(second_id) {
                let Some((nodes, edges)) = self.shortest_path(p1, p2) else {
                    continue;
                };
                // Candidates arrive in tie-break order, so keep the first shortest.
                if best.as_ref().is_some_and(|(len, _)| *len <= edges.len()) {
                    continue;
                }
                let (path_nodes, path_edges) = self.path_columns(&nodes, &edges);
                let row = Row::new()
                    .with("first_anchor", Self::projection(a1))
                    .with("second_anchor", Self::projection(a2))
                    .with("first_person", p1)
                    .with("second_person", p2)
                    .with("first_bridge", r1.as_str())
                    .with("second_bridge", r2.as_str())
                    .with("path_nodes", path_nodes)
                    .with("path_edges", path_edges);
                best = Some((edges.len(), row));
            }
        }
        best.map(|(_, row)| vec![row]).unwrap_or_default()
    }

    fn person_path(&self, stmt: &Statement) -> Vec<Row> {
        let first = stmt.param_value("first_person_id").unwrap_or_default();
        let second = stmt.param_value("second_person_id").unwrap_or_default();
        if self.node_of_kind(first, EntityKind::Person).is_none()
            || self.node_of_kind(second, EntityKind::Person).is_none()
        {
            return Vec::new();
        }
        match self.shortest_path(first, second) {
            Some((nodes, edges)) => {
                let (path_nodes, path_edges) = self.path_columns(&nodes, &edges);
                vec![Row::new()
                    .with("path_nodes", path_nodes)
                    .with("path_edges", path_edges)]
            }
            None => Vec::new(),
        }
    }

    fn resolve_person(&self, stmt: &Statement) -> Vec<Row> {
        let value = stmt.param_value("value").unwrap_or_default();
        self.nodes
            .values()
            .filter(|n| n.kind == EntityKind::Person)
            .filter(|n| n.id == value || n.name.as_deref() == Some(value))
            .take(2)
            .map(|n| Row::new().with("id", n.id.as_str()))
            .collect()
    }

    fn list_entities(&self, kind: EntityKind) -> Vec<Row> {
        let mut nodes: Vec<&MemoryNode> = self.nodes.values().filter(|n| n.kind == kind).collect();
        // Cypher sorts null names last.
        nodes.sort_by_key(|n| (n.name.is_none(), n.name.clone(), n.id.clone()));
        nodes
            .into_iter()
            .map(|n| {
                Row::new()
                    .with("id", n.id.as_str())
                    .with("name", json!(n.name))
                    .with("title", json!(n.title))
            })
            .collect()
    }

    fn relations_between(&self, from: Option<EntityKind>, to: Option<EntityKind>) -> Vec<Row> {
        let kind_of = |id: &str| self.nodes.get(id).map(|n| n.kind);
        let mut rels: Vec<&MemoryRelation> = self
            .relations
            .iter()
            .filter(|r| from.map_or(true, |k| kind_of(r.from.as_str()) == Some(k)))
            .filter(|r| to.map_or(true, |k| kind_of(r.to.as_str()) == Some(k)))
            .collect();
        rels.sort_by(|a, b| {
            (a.from.as_str(), a.rel_type.as_str(), a.to.as_str())
                .cmp(&(b.from.as_str(), b.rel_type.as_str(), b.to.as_str()))
        });
        rels.into_iter()
            .map(|r| {
                Row::new()
                    .with("from_id", r.from.as_str())
                    .with("to_id", r.to.as_str())
                    .with("type", r.rel_type.as_str())
                    .with("notes", json!(r.notes))
            })
            .collect()
    }

    /// Canned lookups: neighbours of the anchor over the lookup's relations.
    fn canned_lookup(&self, stmt: &Statement, lookup_id: &str) -> Vec<Row> {
        let Some(lookup) = find_lookup(lookup_id) else {
            return Vec::new();
        };
        let identifier = stmt.param_value("identifier").unwrap_or_default();
        let anchors: Vec<&MemoryNode> = self
            .nodes
            .values()
            .filter(|n| n.kind == lookup.anchor)
            .filter(|n| n.id == identifier || n.name.as_deref() == Some(identifier))
            .collect();

        let mut rows = Vec::new();
        for anchor in anchors {
            for rel in &self.relations {
                if !lookup.relations.contains(&rel.rel_type) {
                    continue;
                }
                let other = if rel.from == anchor.id {
                    &rel.to
                } else if rel.to == anchor.id {
                    &rel.from
                } else {
                    continue;
                };
                let Some(other) = self.node_of_kind(other, lookup.target) else {
                    continue;
                };
                let mut row = Row::new();
                row.insert(lookup.columns[0], json!(other.name));
                if lookup.columns.len() == 3 {
                    row.insert(lookup.columns[1], json!(other.title));
                }
                row.insert(lookup.columns[lookup.columns.len() - 1], json!(rel.notes));
                rows.push(row);
            }
        }
        rows
    }

    fn node_detail(&self, stmt: &Statement, kind: Option<EntityKind>) -> Vec<Row> {
        let id = stmt.param_value("id").unwrap_or_default();
        self.nodes
            .get(id)
            .filter(|n| kind.map_or(true, |k| n.kind == k))
            .map(|n| {
                Row::new()
                    .with("id", n.id.as_str())
                    .with("name", json!(n.name))
                    .with("title", json!(n.title))
            })
            .into_iter()
            .collect()
    }

    fn node_ids(&self) -> Vec<Row> {
        self.nodes
            .values()
            .map(|n| {
                Row::new()
                    .with("id", n.id.as_str())
                    .with("name", json!(n.name))
                    .with("type", n.kind.store_label())
            })
            .collect()
    }

    fn node_relations(&self, stmt: &Statement) -> Vec<Row> {
        let id = stmt.param_value("id").unwrap_or_default();
        let mut rows: Vec<(&str, &str, Row)> = self
            .relations
            .iter()
            .filter_map(|r| {
                let other = if r.from == id {
                    &r.to
                } else if r.to == id {
                    &r.from
                } else {
                    return None;
                };
                let other = self.nodes.get(other)?;
                let row = Row::new()
                    .with("rel_type", r.rel_type.as_str())
                    .with("notes", json!(r.notes))
                    .with("other_id", other.id.as_str())
                    .with("other_name", json!(other.name))
                    .with("other_type", other.kind.store_label())
                    .with("from_id", r.from.as_str())
                    .with("to_id", r.to.as_str());
                Some((r.rel_type.as_str(), other.id.as_str(), row))
            })
            .collect();
        rows.sort_by(|a, b| (a.0, a.1).cmp(&(b.0, b.1)));
        rows.into_iter().map(|(_, _, row)| row).collect()
    }

    fn answer(&self, stmt: &Statement) -> Vec<Row> {
        match stmt.kind {
            QueryKind::ResolvePerson => self.resolve_person(stmt),
            QueryKind::OrganizationPath { first, second } => {
                self.organization_path(stmt, first, second)
            }
            QueryKind::PersonPath => self.person_path(stmt),
            QueryKind::ListEntities(kind) => self.list_entities(kind),
            QueryKind::CannedLookup(id) => self.canned_lookup(stmt, id),
            QueryKind::AllRelations => self.relations_between(None, None),
            QueryKind::Relations { from, to } => self.relations_between(Some(from), Some(to)),
            QueryKind::CountNodes => vec![Row::new().with("count", self.nodes.len())],
            QueryKind::CountRelations => vec![Row::new().with("count", self.relations.len())],
            QueryKind::NodeDetail(kind) => self.node_detail(stmt, kind),
            QueryKind::NodeIds => self.node_ids(),
            QueryKind::NodeRelations => self.node_relations(stmt),
        }
    }
}

#[async_trait]
impl GraphStore for MemoryGraph {
    async fn run(&self, statement: Statement) -> Result<Vec<Row>, StoreError> {
        if let Ok(mut issued) = self.issued.lock() {
            issued.push(statement.clone());
        }
        if let Some(error) = &self.failure {
            return Err(error.clone());
        }
        Ok(self.answer(&statement))
    }
}
