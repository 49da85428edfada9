//! Entity and relation vocabulary of the property graph.
//!
//! The store labels government bodies `Government Body` (with a space) while
//! visualizations group them as `GovernmentBody`; both spellings parse.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::OrgnetError;
use crate::payload::{VisEdge, VisNode};

/// The three entity kinds held in the graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Person,
    Company,
    GovernmentBody,
}

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Person,
        EntityKind::Company,
        EntityKind::GovernmentBody,
    ];

    /// Label as stored on graph nodes.
    pub fn store_label(&self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Company => "Company",
            EntityKind::GovernmentBody => "Government Body",
        }
    }

    /// Label escaped for use inside a Cypher node pattern.
    pub fn cypher_label(&self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Company => "Company",
            EntityKind::GovernmentBody => "`Government Body`",
        }
    }

    /// Group name used by visualization payloads.
    pub fn group(&self) -> &'static str {
        match self {
            EntityKind::Person => "Person",
            EntityKind::Company => "Company",
            EntityKind::GovernmentBody => "GovernmentBody",
        }
    }

    /// Map a store label (or group name) back to a kind.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "Person" => Some(EntityKind::Person),
            "Company" => Some(EntityKind::Company),
            "Government Body" | "GovernmentBody" => Some(EntityKind::GovernmentBody),
            _ => None,
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.store_label())
    }
}

impl FromStr for EntityKind {
    type Err = OrgnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Some(kind) = EntityKind::from_label(s) {
            return Ok(kind);
        }
        match s.trim().to_lowercase().as_str() {
            "person" | "people" | "persons" => Ok(EntityKind::Person),
            "company" | "companies" => Ok(EntityKind::Company),
            "government" | "governments" | "gov" | "government_body" | "government-body"
            | "government_bodies" => Ok(EntityKind::GovernmentBody),
            _ => Err(OrgnetError::UnknownEntityKind(s.to_string())),
        }
    }
}

/// Relationship types known to the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationType {
    Knows,
    WorksWith,
    Employed,
    FormerlyEmployed,
    Contracts,
    KnownCollaborator,
}

impl RelationType {
    pub const ALL: [RelationType; 6] = [
        RelationType::Knows,
        RelationType::WorksWith,
        RelationType::Employed,
        RelationType::FormerlyEmployed,
        RelationType::Contracts,
        RelationType::KnownCollaborator,
    ];

    /// Person-to-person relations walked by path searches.
    pub const ACQUAINTANCE: [RelationType; 2] = [RelationType::Knows, RelationType::WorksWith];

    /// Relations tying a person to an organization.
    pub const EMPLOYMENT: [RelationType; 2] =
        [RelationType::Employed, RelationType::FormerlyEmployed];

    pub fn as_str(&self) -> &'static str {
        match self {
            RelationType::Knows => "knows",
            RelationType::WorksWith => "works_with",
            RelationType::Employed => "employed",
            RelationType::FormerlyEmployed => "formerly_employed",
            RelationType::Contracts => "contracts",
            RelationType::KnownCollaborator => "known_collaborator",
        }
    }

    /// Join relation types into a Cypher alternation such as `knows|works_with`.
    pub fn alternation(types: &[RelationType]) -> String {
        types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join("|")
    }
}

impl fmt::Display for RelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelationType {
    type Err = OrgnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "knows" => Ok(RelationType::Knows),
            "works_with" => Ok(RelationType::WorksWith),
            "employed" => Ok(RelationType::Employed),
            "formerly_employed" => Ok(RelationType::FormerlyEmployed),
            "contracts" => Ok(RelationType::Contracts),
            "known_collaborator" => Ok(RelationType::KnownCollaborator),
            other => Err(OrgnetError::UnknownRelationType(other.to_string())),
        }
    }
}

/// A node as projected out of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphNode {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub labels: Vec<String>,
}

/// A relationship as projected out of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GraphEdge {
    #[serde(default)]
    pub from: String,
    #[serde(default)]
    pub to: String,
    #[serde(default, rename = "type")]
    pub rel_type: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Label given to an edge whose type the store did not report.
pub const FALLBACK_EDGE_LABEL: &str = "related";

/// First candidate that is present and not blank.
fn first_present<'a>(candidates: &[Option<&'a str>]) -> Option<&'a str> {
    candidates
        .iter()
        .flatten()
        .copied()
        .find(|value| !value.trim().is_empty())
}

impl GraphNode {
    /// Visualization group derived from the node's primary label.
    pub fn group(&self) -> String {
        match self.labels.first() {
            Some(label) => EntityKind::from_label(label)
                .map(|kind| kind.group().to_string())
                .unwrap_or_else(|| label.clone()),
            None => String::new(),
        }
    }

    /// Shape into a visualization node.
    ///
    /// `label` falls back name → id and `title` falls back title → name → id,
    /// so a node with an id always gets a non-empty label.
    pub fn to_vis(&self) -> VisNode {
        let name = self.name.as_deref();
        let title = self.title.as_deref();
        let id = Some(self.id.as_str());

        VisNode {
            id: self.id.clone(),
            label: first_present(&[name, id]).unwrap_or_default().to_string(),
            group: self.group(),
            title: first_present(&[title, name, id]).unwrap_or_default().to_string(),
        }
    }
}

impl GraphEdge {
    /// Shape into a visualization edge: `label` is the relation type and
    /// `title` the notes, or empty.
    pub fn to_vis(&self) -> VisEdge {
        VisEdge {
            from: self.from.clone(),
            to: self.to.clone(),
            label: first_present(&[self.rel_type.as_deref()])
                .unwrap_or(FALLBACK_EDGE_LABEL)
                .to_string(),
            title: first_present(&[self.notes.as_deref()])
                .unwrap_or_default()
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str, name: Option<&str>, title: Option<&str>, label: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            name: name.map(String::from),
            title: title.map(String::from),
            labels: vec![label.to_string()],
        }
    }

    #[test]
    fn test_node_label_prefers_name() {
        let vis = node("p1", Some("Alice"), Some("Analyst"), "Person").to_vis();
        assert_eq!(vis.label, "Alice");
        assert_eq!(vis.title, "Analyst");
        assert_eq!(vis.group, "Person");
    }

    #[test]
    fn test_node_fallbacks_to_id() {
        let vis = node("c1", None, None, "Company").to_vis();
        assert_eq!(vis.label, "c1");
        assert_eq!(vis.title, "c1");
    }

    #[test]
    fn test_blank_name_counts_as_absent() {
        let vis = node("p9", Some("  "), None, "Person").to_vis();
        assert_eq!(vis.label, "p9");
    }

    #[test]
    fn test_title_falls_back_to_name() {
        let vis = node("g1", Some("Ministry X"), None, "Government Body").to_vis();
        assert_eq!(vis.title, "Ministry X");
        assert_eq!(vis.group, "GovernmentBody");
    }

    #[test]
    fn test_unknown_label_is_kept_as_group() {
        let vis = node("x1", Some("Thing"), None, "Vendor").to_vis();
        assert_eq!(vis.group, "Vendor");
    }

    #[test]
    fn test_edge_shaping() {
        let edge = GraphEdge {
            from: "p1".to_string(),
            to: "p2".to_string(),
            rel_type: Some("knows".to_string()),
            notes: None,
        };
        let vis = edge.to_vis();
        assert_eq!(vis.label, "knows");
        assert_eq!(vis.title, "");

        let untyped = GraphEdge {
            from: "p1".to_string(),
            to: "p2".to_string(),
            rel_type: None,
            notes: Some("met at conference".to_string()),
        };
        let vis = untyped.to_vis();
        assert_eq!(vis.label, FALLBACK_EDGE_LABEL);
        assert_eq!(vis.title, "met at conference");
    }

    #[test]
    fn test_entity_kind_parsing() {
        assert_eq!("Government Body".parse::<EntityKind>().unwrap(), EntityKind::GovernmentBody);
        assert_eq!("companies".parse::<EntityKind>().unwrap(), EntityKind::Company);
        assert_eq!("people".parse::<EntityKind>().unwrap(), EntityKind::Person);
        assert!("planet".parse::<EntityKind>().is_err());
    }

    #[test]
    fn test_relation_alternation() {
        assert_eq!(RelationType::alternation(&RelationType::ACQUAINTANCE), "knows|works_with");
        assert_eq!(
            RelationType::alternation(&RelationType::EMPLOYMENT),
            "employed|formerly_employed"
        );
        assert_eq!("works_with".parse::<RelationType>().unwrap(), RelationType::WorksWith);
    }
}
