//! Network analysis: shortest acquaintance paths between two anchors.
//!
//! An anchor is either an organization (government body or company), which
//! is bridged to the path through one of its current or former employees,
//! or a person given as free text. Every mode funnels into the same
//! shortest-path search: `knows`/`works_with` edges, at most [`MAX_HOPS`]
//! hops, and only `Person` nodes strictly inside the path.

mod cypher;
mod shape;

#[cfg(test)]
mod tests;

use orgnet_core::anchor::{classify_person_input, PersonAnchor};
use orgnet_core::{EntityKind, VisualizationPayload};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::store::{GraphStore, StoreError};

use shape::TraversalRow;

/// Maximum number of relationships in a path.
pub const MAX_HOPS: u32 = 6;

/// Why an analysis produced no payload.
///
/// An unconnected pair is not an error: it yields an empty payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Anchor not found: '{input}'")]
    AnchorNotFound { input: String },

    #[error("Anchor '{input}' matches more than one person; pick one as 'Name [id]'")]
    AnchorAmbiguous { input: String },

    #[error("{0}")]
    QueryExecution(String),
}

impl AnalysisError {
    /// True for the anchor failures a caller should re-prompt on.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            AnalysisError::AnchorNotFound { .. } | AnalysisError::AnchorAmbiguous { .. }
        )
    }

    fn not_found(input: &str) -> Self {
        Self::AnchorNotFound {
            input: input.to_string(),
        }
    }
}

impl From<StoreError> for AnalysisError {
    fn from(err: StoreError) -> Self {
        AnalysisError::QueryExecution(err.to_string())
    }
}

/// The four analysis modes and their anchors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "analysis_type", rename_all = "snake_case")]
pub enum AnalysisMode {
    #[serde(rename = "gov_company")]
    GovernmentCompany {
        government_id: String,
        company_id: String,
    },
    CompanyCompany {
        #[serde(rename = "company1_id")]
        first_company_id: String,
        #[serde(rename = "company2_id")]
        second_company_id: String,
    },
    #[serde(rename = "gov_gov")]
    GovernmentGovernment {
        #[serde(rename = "government1_id")]
        first_government_id: String,
        #[serde(rename = "government2_id")]
        second_government_id: String,
    },
    PersonPerson {
        #[serde(rename = "person1_name")]
        first_person: String,
        #[serde(rename = "person2_name")]
        second_person: String,
    },
}

/// An organization anchor: used as an id, never looked up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct OrganizationAnchor<'a> {
    kind: EntityKind,
    id: &'a str,
}

impl<'a> OrganizationAnchor<'a> {
    fn new(kind: EntityKind, id: &'a str) -> Self {
        Self { kind, id: id.trim() }
    }
}

/// Anchors of a mode, grouped by how they reach the path.
enum Anchors<'a> {
    Organizations(OrganizationAnchor<'a>, OrganizationAnchor<'a>),
    People(&'a str, &'a str),
}

impl AnalysisMode {
    /// Wire name of the mode.
    pub fn name(&self) -> &'static str {
        match self {
            AnalysisMode::GovernmentCompany { .. } => "gov_company",
            AnalysisMode::CompanyCompany { .. } => "company_company",
            AnalysisMode::GovernmentGovernment { .. } => "gov_gov",
            AnalysisMode::PersonPerson { .. } => "person_person",
        }
    }

    fn anchors(&self) -> Anchors<'_> {
        use EntityKind::{Company, GovernmentBody};

        match self {
            AnalysisMode::GovernmentCompany {
                government_id,
                company_id,
            } => Anchors::Organizations(
                OrganizationAnchor::new(GovernmentBody, government_id),
                OrganizationAnchor::new(Company, company_id),
            ),
            AnalysisMode::CompanyCompany {
                first_company_id,
                second_company_id,
            } => Anchors::Organizations(
                OrganizationAnchor::new(Company, first_company_id),
                OrganizationAnchor::new(Company, second_company_id),
            ),
            AnalysisMode::GovernmentGovernment {
                first_government_id,
                second_government_id,
            } => Anchors::Organizations(
                OrganizationAnchor::new(GovernmentBody, first_government_id),
                OrganizationAnchor::new(GovernmentBody, second_government_id),
            ),
            AnalysisMode::PersonPerson {
                first_person,
                second_person,
            } => Anchors::People(first_person, second_person),
        }
    }
}

/// Serializable outcome: the payload, or `{"error": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PathResult {
    Path(VisualizationPayload),
    Error { error: String },
}

impl From<Result<VisualizationPayload, AnalysisError>> for PathResult {
    fn from(result: Result<VisualizationPayload, AnalysisError>) -> Self {
        match result {
            Ok(payload) => PathResult::Path(payload),
            Err(err) => PathResult::Error {
                error: err.to_string(),
            },
        }
    }
}

/// Runs network analyses against a graph store.
///
/// Stateless between calls; each call issues its own statements.
pub struct PathAnalyzer<'a> {
    store: &'a dyn GraphStore,
}

impl<'a> PathAnalyzer<'a> {
    pub fn new(store: &'a dyn GraphStore) -> Self {
        Self { store }
    }

    /// Find the shortest acquaintance path for `mode`.
    ///
    /// Anchor failures stop the analysis before the traversal is issued.
    pub async fn analyze(&self, mode: &AnalysisMode) -> Result<VisualizationPayload, AnalysisError> {
        debug!(mode = mode.name(), "Starting network analysis");

        let result = match mode.anchors() {
            Anchors::Organizations(first, second) => self.organization_path(first, second).await,
            Anchors::People(first, second) => self.person_path(first, second).await,
        };

        match &result {
            Ok(payload) => debug!(
                mode = mode.name(),
                nodes = payload.node_count(),
                edges = payload.edge_count(),
                "Network analysis finished"
            ),
            Err(AnalysisError::QueryExecution(e)) => {
                warn!(mode = mode.name(), error = %e, "Network analysis query failed")
            }
            Err(e) => debug!(mode = mode.name(), error = %e, "Anchor resolution failed"),
        }
        result
    }

    /// Resolve free-text person input to an id.
    ///
    /// A trailing `[id]` is trusted as-is; otherwise the input must match
    /// exactly one person by name or id.
    pub async fn resolve_person(&self, input: &str) -> Result<String, AnalysisError> {
        let value = match classify_person_input(input) {
            PersonAnchor::Blank => return Err(AnalysisError::not_found(input)),
            PersonAnchor::Id(id) => {
                debug!(id, "Person anchor carries a bracketed id");
                return Ok(id.to_string());
            }
            PersonAnchor::Lookup(value) => value,
        };

        let rows = self.store.run(cypher::resolve_person(value)).await?;
        match rows.as_slice() {
            [row] => row
                .get_str(cypher::COL_ID)
                .map(str::to_string)
                .ok_or_else(|| AnalysisError::not_found(value)),
            [] => Err(AnalysisError::not_found(value)),
            _ => Err(AnalysisError::AnchorAmbiguous {
                input: value.to_string(),
            }),
        }
    }

    async fn organization_path(
        &self,
        first: OrganizationAnchor<'_>,
        second: OrganizationAnchor<'_>,
    ) -> Result<VisualizationPayload, AnalysisError> {
        for anchor in [&first, &second] {
            if anchor.id.is_empty() {
                return Err(AnalysisError::not_found(anchor.id));
            }
        }

        let statement = cypher::organization_path(first.kind, first.id, second.kind, second.id);
        let rows = self.store.run(statement).await?;
        match rows.first() {
            Some(row) => Ok(TraversalRow::from_organization_row(row)?.into_payload()),
            None => Ok(VisualizationPayload::new()),
        }
    }

    async fn person_path(
        &self,
        first_input: &str,
        second_input: &str,
    ) -> Result<VisualizationPayload, AnalysisError> {
        let first_id = self.resolve_person(first_input).await?;
        let second_id = self.resolve_person(second_input).await?;
        debug!(first = %first_id, second = %second_id, "Person anchors resolved");

        let rows = self
            .store
            .run(cypher::person_path(&first_id, &second_id))
            .await?;
        match rows.first() {
            Some(row) => Ok(TraversalRow::from_person_row(row)?.into_payload()),
            None => Ok(VisualizationPayload::new()),
        }
    }
}

/// Run one analysis and fold the outcome into a serializable result.
pub async fn analyze_path(store: &dyn GraphStore, mode: &AnalysisMode) -> PathResult {
    PathAnalyzer::new(store).analyze(mode).await.into()
}
