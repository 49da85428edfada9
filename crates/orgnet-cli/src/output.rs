//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use orgnet_core::{EntityKind, VisNode, VisualizationPayload};
use orgnet_graph::queries::directory::DirectoryEntry;
use orgnet_graph::queries::lookup::{CannedLookup, LookupTable};
use orgnet_graph::queries::nodes::{NodeDetail, NodeRelation, NodeSummary};
use orgnet_graph::MAX_HOPS;
use serde_json::Value;

fn group_colored(group: &str) -> ColoredString {
    match group {
        "Person" => group.green(),
        "Company" => group.cyan(),
        "GovernmentBody" => group.magenta(),
        other => other.normal(),
    }
}

fn print_node(node: &VisNode) {
    println!(
        "  [{}] {} {}",
        group_colored(&node.group),
        node.label.bold(),
        format!("({})", node.id).dimmed()
    );
}

/// Print a path payload as a vertical chain.
///
/// Path payloads list nodes in path order, and edge `i` joins node `i` to
/// node `i + 1`, so the arrow shows which way the relationship points.
pub fn print_path(mode: &str, payload: &VisualizationPayload) {
    println!("{} {}", "Network analysis".bold(), mode.cyan());
    println!("{}", "─".repeat(50));

    if payload.is_empty() {
        println!(
            "{}",
            format!("No connection found within {} hops.", MAX_HOPS).dimmed()
        );
        return;
    }

    let nodes: Vec<&VisNode> = payload.nodes().collect();
    for (i, node) in nodes.iter().enumerate() {
        print_node(node);
        if let Some(edge) = payload.edges().get(i) {
            let arrow = if edge.from == node.id { "↓" } else { "↑" };
            let notes = if edge.title.is_empty() {
                String::new()
            } else {
                format!(" {}", edge.title.dimmed())
            };
            println!("    {} {}{}", arrow.dimmed(), edge.label.yellow(), notes);
        }
    }

    println!("{}", "─".repeat(50));
    println!(
        "{} people, {} hops",
        nodes.iter().filter(|n| n.group == "Person").count().to_string().bold(),
        payload.edge_count().to_string().bold()
    );
}

/// Print a directory listing.
pub fn print_directory(kind: EntityKind, entries: &[DirectoryEntry]) {
    if entries.is_empty() {
        println!("{}", format!("No {} entries found.", kind).dimmed());
        return;
    }

    println!("{:<20} {:<36} {}", "ID", "Name", "Title");
    println!("{}", "─".repeat(70));

    for entry in entries {
        println!(
            "{:<20} {:<36} {}",
            truncate(&entry.id, 18),
            truncate(entry.display_name(), 34),
            entry.title.as_deref().unwrap_or_default().dimmed()
        );
    }
}

/// Print the canned lookup menu.
pub fn print_lookup_menu(lookups: &[CannedLookup]) {
    println!("{}", "Available lookups".bold());
    println!("{}", "─".repeat(50));
    for lookup in lookups {
        println!(
            "  {} {}",
            lookup.id.cyan(),
            format!("({} → {})", lookup.anchor, lookup.target).dimmed()
        );
        println!("      {}", lookup.description);
    }
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => "-".to_string(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Print a lookup result table.
pub fn print_table(table: &LookupTable) {
    println!("{}", table.title.bold());

    if table.rows.is_empty() {
        println!("{}", "No results.".dimmed());
        return;
    }

    let header: Vec<String> = table.columns.iter().map(|c| format!("{:<28}", c)).collect();
    println!("{}", header.join(" "));
    println!("{}", "─".repeat(29 * table.columns.len()));

    for row in &table.rows {
        let cells: Vec<String> = row
            .iter()
            .map(|v| format!("{:<28}", truncate(&cell(v), 26)))
            .collect();
        println!("{}", cells.join(" "));
    }

    println!("\n{} rows", table.rows.len().to_string().bold());
}

pub fn print_node_detail(node: &NodeDetail) {
    println!("{} {}", node.id.cyan(), node.name.as_deref().unwrap_or("-").bold());
    if let Some(title) = &node.title {
        println!("  {}", title.dimmed());
    }
}

pub fn print_node_ids(nodes: &[NodeSummary]) {
    if nodes.is_empty() {
        println!("{}", "No nodes.".dimmed());
        return;
    }

    println!("{:<20} {:<36} {}", "ID", "Name", "Type");
    println!("{}", "─".repeat(70));

    for node in nodes {
        let node_type = node.node_type.as_deref().unwrap_or_default();
        println!(
            "{:<20} {:<36} {}",
            truncate(node.id.as_deref().unwrap_or("-"), 18),
            truncate(node.name.as_deref().unwrap_or("-"), 34),
            group_colored(EntityKind::from_label(node_type).map_or(node_type, |k| k.group()))
        );
    }
}

/// Arrow showing which way a relationship points relative to `node_id`.
fn relation_arrow(relation: &NodeRelation, node_id: &str) -> &'static str {
    if relation.is_outgoing_from(node_id) {
        "→"
    } else {
        "←"
    }
}

/// Print the relationships touching a node, one per line.
pub fn print_node_relations(node_id: &str, relations: &[NodeRelation]) {
    println!("{} {}", "Relationships of".bold(), node_id.cyan());
    println!("{}", "─".repeat(50));

    if relations.is_empty() {
        println!("{}", "None.".dimmed());
        return;
    }

    for relation in relations {
        let notes = relation
            .notes
            .as_deref()
            .map(|n| format!(" {}", n.dimmed()))
            .unwrap_or_default();
        println!(
            "  {} {} {} {}{}",
            relation_arrow(relation, node_id),
            relation.rel_type.yellow(),
            relation.other_name.as_deref().unwrap_or("-").bold(),
            format!("({})", relation.other_id.as_deref().unwrap_or("-")).dimmed(),
            notes
        );
    }
}

/// Truncate a string to a maximum number of characters.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", cut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Acme", 10), "Acme");
        assert_eq!(truncate("Ministry of Everything", 8), "Ministr…");
        assert_eq!(truncate("Zoë Ångström", 4), "Zoë…");
    }

    #[test]
    fn test_relation_arrow() {
        let relation = NodeRelation {
            rel_type: "knows".to_string(),
            notes: None,
            other_id: Some("p2".to_string()),
            other_name: None,
            other_type: Some("Person".to_string()),
            from_id: Some("p1".to_string()),
            to_id: Some("p2".to_string()),
        };
        assert_eq!(relation_arrow(&relation, "p1"), "→");
        assert_eq!(relation_arrow(&relation, "p2"), "←");
    }

    #[test]
    fn test_cell() {
        assert_eq!(cell(&json!(null)), "-");
        assert_eq!(cell(&json!("Alice")), "Alice");
        assert_eq!(cell(&json!(3)), "3");
    }
}
