use orgnet_core::{EntityKind, RelationType, VisualizationPayload};
use serde_json::json;

use super::*;
use crate::store::{QueryKind, StoreError};
use crate::testing::MemoryGraph;

fn network() -> MemoryGraph {
    MemoryGraph::new()
        .government("g1", "Ministry X")
        .government("g2", "Agency Y")
        .company("c1", "Acme")
        .company("c2", "Globex")
        .company("c3", "Front Co")
        .person("p1", "Pat", Some("Deputy Minister"))
        .person("p2", "Quinn", None)
        .person("p42", "Alice", None)
        .person("p5", "Bob", None)
        .person("p6", "Bob", None)
        .person("p7", "Carol", None)
        .person("p8", "Dana", None)
        .person("p9", "Eli", None)
        .person("p10", "Fay", None)
        .person("p11", "Gus", None)
        .unnamed("p12", EntityKind::Person)
        .relate("p1", RelationType::Employed, "g1")
        .relate("p2", RelationType::Employed, "c1")
        .relate_with_notes("p1", RelationType::Knows, "p2", Some("school friends"))
        .relate("p8", RelationType::FormerlyEmployed, "c2")
        .relate("p7", RelationType::Employed, "g2")
        .relate("p8", RelationType::WorksWith, "p7")
        .relate("p2", RelationType::WorksWith, "p8")
        // A short cut through a company that paths must not take.
        .relate("p9", RelationType::Knows, "c3")
        .relate("c3", RelationType::Knows, "p10")
        .relate("p9", RelationType::Knows, "p11")
        .relate("p11", RelationType::WorksWith, "p12")
        .relate("p12", RelationType::Knows, "p10")
}

fn gov_company(government_id: &str, company_id: &str) -> AnalysisMode {
    AnalysisMode::GovernmentCompany {
        government_id: government_id.to_string(),
        company_id: company_id.to_string(),
    }
}

fn people(first: &str, second: &str) -> AnalysisMode {
    AnalysisMode::PersonPerson {
        first_person: first.to_string(),
        second_person: second.to_string(),
    }
}

/// Edge i must join node i and node i + 1, in either direction.
fn assert_chain(payload: &VisualizationPayload) {
    let ids = payload.node_ids();
    assert_eq!(payload.edge_count() + 1, ids.len());
    for (i, edge) in payload.edges().iter().enumerate() {
        let mut ends = [edge.from.as_str(), edge.to.as_str()];
        let mut expected = [ids[i], ids[i + 1]];
        ends.sort();
        expected.sort();
        assert_eq!(ends, expected, "edge {} does not join consecutive nodes", i);
    }
}

fn assert_labels_present(payload: &VisualizationPayload) {
    assert!(payload.nodes().all(|n| !n.label.is_empty() && !n.title.is_empty()));
    assert!(payload.edges().iter().all(|e| !e.label.is_empty()));
}

#[tokio::test]
async fn test_government_company_scenario() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&gov_company("g1", "c1"))
        .await
        .unwrap();

    assert_eq!(payload.node_ids(), vec!["g1", "p1", "p2", "c1"]);
    let edges: Vec<_> = payload
        .edges()
        .iter()
        .map(|e| (e.from.as_str(), e.to.as_str(), e.label.as_str()))
        .collect();
    assert_eq!(
        edges,
        vec![("p1", "g1", "employed"), ("p1", "p2", "knows"), ("p2", "c1", "employed")]
    );
    assert_eq!(payload.edges()[1].title, "school friends");
    assert_eq!(payload.edges()[0].title, "");
    assert_eq!(payload.node("g1").unwrap().group, "GovernmentBody");
    assert_eq!(payload.node("c1").unwrap().group, "Company");
    assert_eq!(payload.node("p1").unwrap().title, "Deputy Minister");
    assert_chain(&payload);

    assert_eq!(
        store.issued_kinds(),
        vec![QueryKind::OrganizationPath {
            first: EntityKind::GovernmentBody,
            second: EntityKind::Company,
        }]
    );
}

#[tokio::test]
async fn test_company_company_bridge_uses_relation_type() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&AnalysisMode::CompanyCompany {
            first_company_id: "c1".to_string(),
            second_company_id: "c2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(payload.node_ids(), vec!["c1", "p2", "p8", "c2"]);
    let labels: Vec<_> = payload.edges().iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["employed", "works_with", "formerly_employed"]);
    assert_eq!(payload.edges()[2].from, "p8");
    assert_eq!(payload.edges()[2].to, "c2");
    assert_chain(&payload);
    assert!(payload.validate().is_ok());
}

#[tokio::test]
async fn test_government_government() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&AnalysisMode::GovernmentGovernment {
            first_government_id: "g1".to_string(),
            second_government_id: "g2".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(payload.node_ids(), vec!["g1", "p1", "p2", "p8", "p7", "g2"]);
    assert_eq!(payload.edge_count(), 5);
    assert_chain(&payload);
    assert_labels_present(&payload);
}

#[tokio::test]
async fn test_org_anchor_kind_must_match() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&gov_company("c1", "g1"))
        .await
        .unwrap();
    assert!(payload.is_empty());
}

#[tokio::test]
async fn test_blank_org_anchor_issues_nothing() {
    let store = network();
    let err = PathAnalyzer::new(&store)
        .analyze(&gov_company("  ", "c1"))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::AnchorNotFound { .. }));
    assert!(store.issued().is_empty());
}

#[tokio::test]
async fn test_person_path_has_no_boundary_nodes() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&people("Pat", "Quinn"))
        .await
        .unwrap();

    assert_eq!(payload.node_ids(), vec!["p1", "p2"]);
    assert!(payload.nodes().all(|n| n.group == "Person"));
    assert_chain(&payload);
}

#[tokio::test]
async fn test_interior_nodes_are_people() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&people("Eli", "Fay"))
        .await
        .unwrap();

    assert_eq!(payload.node_ids(), vec!["p9", "p11", "p12", "p10"]);
    assert!(payload.node("c3").is_none());
    assert_chain(&payload);
    // The unnamed person still gets a label.
    assert_eq!(payload.node("p12").unwrap().label, "p12");
    assert_labels_present(&payload);
}

#[tokio::test]
async fn test_bracketed_id_skips_lookup() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&people("Ghost [p999]", "Pat [p1]"))
        .await
        .unwrap();

    assert!(payload.is_empty());
    assert_eq!(store.issued_kinds(), vec![QueryKind::PersonPath]);
    let issued = store.issued();
    assert_eq!(issued[0].param_value("first_person_id"), Some("p999"));
    assert_eq!(issued[0].param_value("second_person_id"), Some("p1"));
}

#[tokio::test]
async fn test_unique_name_resolves_to_id() {
    let store = network();
    let analyzer = PathAnalyzer::new(&store);
    assert_eq!(analyzer.resolve_person("Alice").await.unwrap(), "p42");
    assert_eq!(analyzer.resolve_person(" p7 ").await.unwrap(), "p7");
}

#[tokio::test]
async fn test_ambiguous_name_is_an_error_without_traversal() {
    let store = network();
    let err = PathAnalyzer::new(&store)
        .analyze(&people("Alice [p42]", "Bob"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AnalysisError::AnchorAmbiguous {
            input: "Bob".to_string()
        }
    );
    assert!(err.is_not_found());
    assert_eq!(store.issued_kinds(), vec![QueryKind::ResolvePerson]);
}

#[tokio::test]
async fn test_unknown_name_is_not_found() {
    let store = network();
    let err = PathAnalyzer::new(&store)
        .analyze(&people("Zed", "Pat"))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        AnalysisError::AnchorNotFound {
            input: "Zed".to_string()
        }
    );
    assert!(!store.issued_kinds().contains(&QueryKind::PersonPath));
}

#[tokio::test]
async fn test_blank_person_is_not_found() {
    let store = network();
    let err = PathAnalyzer::new(&store)
        .analyze(&people("Pat", "   "))
        .await
        .unwrap_err();
    assert!(matches!(err, AnalysisError::AnchorNotFound { .. }));
    assert_eq!(store.issued_kinds(), vec![QueryKind::ResolvePerson]);
}

#[tokio::test]
async fn test_no_path_is_empty_not_error() {
    let store = network();
    let payload = PathAnalyzer::new(&store)
        .analyze(&people("Alice", "Carol"))
        .await
        .unwrap();
    assert!(payload.is_empty());

    let json = serde_json::to_value(PathResult::from(Ok::<_, AnalysisError>(payload))).unwrap();
    assert_eq!(json, json!({"nodes": [], "edges": []}));
}

#[tokio::test]
async fn test_hop_bound() {
    let mut store = MemoryGraph::new();
    for i in 0..=7 {
        store = store.person(&format!("h{}", i), &format!("Hop {}", i), None);
    }
    for i in 0..7 {
        store = store.relate(&format!("h{}", i), RelationType::Knows, &format!("h{}", i + 1));
    }
    let analyzer = PathAnalyzer::new(&store);

    let six = analyzer.analyze(&people("[h0]", "[h6]")).await.unwrap();
    assert_eq!(six.edge_count(), MAX_HOPS as usize);
    assert_chain(&six);

    let seven = analyzer.analyze(&people("[h0]", "[h7]")).await.unwrap();
    assert!(seven.is_empty());
}

#[tokio::test]
async fn test_repeated_calls_are_identical() {
    let store = network();
    let analyzer = PathAnalyzer::new(&store);
    let mode = gov_company("g1", "c1");

    let first = analyzer.analyze(&mode).await.unwrap();
    let second = analyzer.analyze(&mode).await.unwrap();
    assert_eq!(first.node_ids(), second.node_ids());
    assert_eq!(first.edges(), second.edges());
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[tokio::test]
async fn test_store_failure_becomes_error_result() {
    let store = network().failing("Neo.TransientError.General.DatabaseUnavailable");
    let err = PathAnalyzer::new(&store)
        .analyze(&gov_company("g1", "c1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::QueryExecution("Neo.TransientError.General.DatabaseUnavailable".to_string())
    );
    assert!(!err.is_not_found());

    let result = analyze_path(&store, &people("Pat", "Quinn")).await;
    assert_eq!(
        result,
        PathResult::Error {
            error: "Neo.TransientError.General.DatabaseUnavailable".to_string()
        }
    );
}

#[tokio::test]
async fn test_undecodable_row_is_an_error_not_an_empty_path() {
    let store = network().failing_with(StoreError::Decode {
        column: "path_nodes".to_string(),
        message: "unsupported Bolt type".to_string(),
    });
    let err = PathAnalyzer::new(&store)
        .analyze(&gov_company("g1", "c1"))
        .await
        .unwrap_err();
    assert_eq!(
        err,
        AnalysisError::QueryExecution(
            "Failed to decode column 'path_nodes': unsupported Bolt type".to_string()
        )
    );
}

#[test]
fn test_mode_wire_format() {
    let mode: AnalysisMode = serde_json::from_value(json!({
        "analysis_type": "gov_company",
        "government_id": "g1",
        "company_id": "c1"
    }))
    .unwrap();
    assert_eq!(mode, gov_company("g1", "c1"));

    let mode: AnalysisMode = serde_json::from_value(json!({
        "analysis_type": "person_person",
        "person1_name": "Alice [p42]",
        "person2_name": "Bob"
    }))
    .unwrap();
    assert_eq!(mode.name(), "person_person");

    let mode = AnalysisMode::CompanyCompany {
        first_company_id: "c1".to_string(),
        second_company_id: "c2".to_string(),
    };
    assert_eq!(
        serde_json::to_value(&mode).unwrap(),
        json!({"analysis_type": "company_company", "company1_id": "c1", "company2_id": "c2"})
    );
}

#[test]
fn test_error_result_shape() {
    let result = PathResult::from(Err::<VisualizationPayload, _>(
        AnalysisError::AnchorNotFound {
            input: "Zed".to_string(),
        },
    ));
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json, json!({"error": "Anchor not found: 'Zed'"}));
}
