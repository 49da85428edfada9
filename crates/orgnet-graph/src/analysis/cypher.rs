//! Statement builders for the network-analysis queries.
//!
//! Labels, relation types and the hop bound are compile-time vocabulary and
//! go into the text; anchor ids and lookup values are always parameters.

use orgnet_core::{EntityKind, RelationType};

use crate::store::{QueryKind, Statement};

use super::MAX_HOPS;

pub(crate) const PARAM_LOOKUP_VALUE: &str = "value";
pub(crate) const PARAM_FIRST_ANCHOR: &str = "first_anchor_id";
pub(crate) const PARAM_SECOND_ANCHOR: &str = "second_anchor_id";
pub(crate) const PARAM_FIRST_PERSON: &str = "first_person_id";
pub(crate) const PARAM_SECOND_PERSON: &str = "second_person_id";

pub(crate) const COL_ID: &str = "id";
pub(crate) const COL_FIRST_ANCHOR: &str = "first_anchor";
pub(crate) const COL_SECOND_ANCHOR: &str = "second_anchor";
pub(crate) const COL_FIRST_PERSON: &str = "first_person";
pub(crate) const COL_SECOND_PERSON: &str = "second_person";
pub(crate) const COL_FIRST_BRIDGE: &str = "first_bridge";
pub(crate) const COL_SECOND_BRIDGE: &str = "second_bridge";
pub(crate) const COL_PATH_NODES: &str = "path_nodes";
pub(crate) const COL_PATH_EDGES: &str = "path_edges";

/// Person lookup returns at most two ids: enough to tell unique from ambiguous.
pub(crate) fn resolve_person(value: &str) -> Statement {
    Statement::new(
        QueryKind::ResolvePerson,
        "MATCH (p:Person)
         WHERE p.name = $value OR p.id = $value
         RETURN p.id AS id
         ORDER BY id
         LIMIT 2",
    )
    .param(PARAM_LOOKUP_VALUE, value)
    .columns(&[COL_ID])
}

fn node_projection(var: &str) -> String {
    format!(
        "{{id: {var}.id, name: {var}.name, title: {var}.title, labels: labels({var})}}"
    )
}

/// Shortest acquaintance path between `p1` and `p2`, Person-only interior.
fn shortest_path_clause() -> String {
    format!(
        "MATCH path = shortestPath((p1)-[:{rels}*0..{hops}]-(p2))
         WHERE all(n IN nodes(path)[1..-1] WHERE 'Person' IN labels(n))",
        rels = RelationType::alternation(&RelationType::ACQUAINTANCE),
        hops = MAX_HOPS,
    )
}

fn path_projection() -> String {
    format!(
        "[n IN nodes(path) | {node}] AS path_nodes,
         [r IN relationships(path) | {{from: startNode(r).id, to: endNode(r).id, type: type(r), notes: r.notes}}] AS path_edges",
        node = node_projection("n"),
    )
}

/// Path between any employee of the first organization and any employee of
/// the second. Shortest wins; ties break on person ids then bridge types so
/// the same store state always yields the same row.
pub(crate) fn organization_path(
    first_kind: EntityKind,
    first_id: &str,
    second_kind: EntityKind,
    second_id: &str,
) -> Statement {
    let employment = RelationType::alternation(&RelationType::EMPLOYMENT);
    let text = format!(
        "MATCH (a1:{first_label} {{id: $first_anchor_id}})
         MATCH (a2:{second_label} {{id: $second_anchor_id}})
         MATCH (p1:Person)-[r1:{employment}]-(a1)
         MATCH (p2:Person)-[r2:{employment}]-(a2)
         {path}
         WITH a1, a2, p1, p2, r1, r2, path
         ORDER BY length(path) ASC, p1.id ASC, p2.id ASC, type(r1) ASC, type(r2) ASC
         LIMIT 1
         RETURN {a1} AS first_anchor,
                {a2} AS second_anchor,
                p1.id AS first_person,
                p2.id AS second_person,
                type(r1) AS first_bridge,
                type(r2) AS second_bridge,
                {projection}",
        first_label = first_kind.cypher_label(),
        second_label = second_kind.cypher_label(),
        path = shortest_path_clause(),
        a1 = node_projection("a1"),
        a2 = node_projection("a2"),
        projection = path_projection(),
    );

    Statement::new(
        QueryKind::OrganizationPath {
            first: first_kind,
            second: second_kind,
        },
        text,
    )
    .param(PARAM_FIRST_ANCHOR, first_id)
    .param(PARAM_SECOND_ANCHOR, second_id)
    .columns(&[
        COL_FIRST_ANCHOR,
        COL_SECOND_ANCHOR,
        COL_FIRST_PERSON,
        COL_SECOND_PERSON,
        COL_FIRST_BRIDGE,
        COL_SECOND_BRIDGE,
        COL_PATH_NODES,
        COL_PATH_EDGES,
    ])
}

/// Path between two already-resolved people.
pub(crate) fn person_path(first_id: &str, second_id: &str) -> Statement {
    let text = format!(
        "MATCH (p1:Person {{id: $first_person_id}})
         MATCH (p2:Person {{id: $second_person_id}})
         {path}
         RETURN {projection}
         LIMIT 1",
        path = shortest_path_clause(),
        projection = path_projection(),
    );

    Statement::new(QueryKind::PersonPath, text)
        .param(PARAM_FIRST_PERSON, first_id)
        .param(PARAM_SECOND_PERSON, second_id)
        .columns(&[COL_PATH_NODES, COL_PATH_EDGES])
}
