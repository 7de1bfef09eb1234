use anyhow::{Context, Result, anyhow};
use serde::Deserialize;
use serde_json::Value;

use super::graph::{CourseGraph, CourseNode, LinkRecord};

#[derive(Clone, Debug, Deserialize)]
struct RawCourse {
    code: String,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    prerequisites: Vec<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    completed: bool,
}

#[derive(Clone, Debug, Deserialize)]
struct RawLink {
    source: String,
    target: String,
}

#[derive(Clone, Debug, Deserialize)]
struct RawTreeNode {
    #[serde(default, alias = "id", alias = "name")]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    children: Vec<RawTreeNode>,
}

/// Parses a dataset in either supported shape into the canonical graph:
/// a flat `{nodes, links}` document, or a hierarchical `{code, children}`
/// tree whose parent/child edges become prerequisite links.
pub(super) fn parse_course_graph(label: &str, raw: &str) -> Result<CourseGraph> {
    let parsed: Value =
        serde_json::from_str(raw).with_context(|| format!("{label}: invalid JSON"))?;
    let object = parsed
        .as_object()
        .ok_or_else(|| anyhow!("{label}: expected a JSON object at the top level"))?;

    if let Some(nodes_value) = object.get("nodes") {
        let raw_nodes = Vec::<RawCourse>::deserialize(nodes_value)
            .with_context(|| format!("{label}: invalid nodes array"))?;

        let nodes = raw_nodes.into_iter().map(course_from_raw).collect::<Vec<_>>();

        let links = match object.get("links") {
            Some(links_value) => {
                let raw_links = Vec::<RawLink>::deserialize(links_value)
                    .with_context(|| format!("{label}: invalid links array"))?;
                raw_links
                    .into_iter()
                    .map(|link| LinkRecord {
                        source: link.source,
                        target: link.target,
                    })
                    .collect()
            }
            None => links_from_prerequisites(&nodes),
        };

        return Ok(CourseGraph::new(label.to_string(), nodes, links));
    }

    if ["children", "code", "id", "name"]
        .iter()
        .any(|key| object.contains_key(*key))
    {
        let root = RawTreeNode::deserialize(&parsed)
            .with_context(|| format!("{label}: invalid hierarchy"))?;
        let (nodes, links) = flatten_tree(root);
        return Ok(CourseGraph::new(label.to_string(), nodes, links));
    }

    Err(anyhow!(
        "{label}: unrecognized dataset shape; expected {{nodes, links}} or a {{code, children}} tree"
    ))
}

fn course_from_raw(raw: RawCourse) -> CourseNode {
    let name = raw.name.unwrap_or_else(|| raw.code.clone());
    CourseNode {
        code: raw.code,
        name,
        description: raw.description,
        prerequisites: raw.prerequisites,
        category: raw.category,
        completed: raw.completed,
    }
}

/// Derives dependency links from each node's prerequisite list. A
/// prerequisite code with no matching node is skipped without emitting a
/// link; the emitted direction is `dependent -> prerequisite`.
pub fn links_from_prerequisites(nodes: &[CourseNode]) -> Vec<LinkRecord> {
    let mut links = Vec::new();

    for node in nodes {
        for prerequisite in &node.prerequisites {
            if nodes.iter().any(|other| &other.code == prerequisite) {
                links.push(LinkRecord {
                    source: node.code.clone(),
                    target: prerequisite.clone(),
                });
            } else {
                log::debug!(
                    "prerequisite {prerequisite:?} of {:?} matches no course, skipped",
                    node.code
                );
            }
        }
    }

    links
}

/// Walks a hierarchical dataset into flat nodes and links. A child course
/// builds on its parent, so the parent becomes a prerequisite of the child.
fn flatten_tree(root: RawTreeNode) -> (Vec<CourseNode>, Vec<LinkRecord>) {
    let mut nodes = Vec::new();
    let mut links = Vec::new();
    walk_tree(root, None, &mut nodes, &mut links);
    (nodes, links)
}

fn walk_tree(
    raw: RawTreeNode,
    parent: Option<&str>,
    nodes: &mut Vec<CourseNode>,
    links: &mut Vec<LinkRecord>,
) {
    let Some(code) = raw.code else {
        log::warn!("hierarchy node without a code/id/name, subtree skipped");
        return;
    };

    let mut prerequisites = Vec::new();
    if let Some(parent_code) = parent {
        prerequisites.push(parent_code.to_string());
        links.push(LinkRecord {
            source: code.clone(),
            target: parent_code.to_string(),
        });
    }

    nodes.push(CourseNode {
        code: code.clone(),
        name: code.clone(),
        description: raw.description,
        prerequisites,
        category: raw.category,
        completed: false,
    });

    for child in raw.children {
        walk_tree(child, Some(&code), nodes, links);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain_links(graph: &CourseGraph) -> Vec<(String, String)> {
        graph
            .links()
            .iter()
            .map(|link| (link.source.clone(), link.target.clone()))
            .collect()
    }

    #[test]
    fn flat_dataset_parses_with_explicit_links() {
        let raw = r#"{
            "nodes": [
                {"code": "A", "name": "Intro"},
                {"code": "B", "name": "Advanced", "prerequisites": ["A"]}
            ],
            "links": [{"source": "B", "target": "A"}]
        }"#;

        let graph = parse_course_graph("flat", raw).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            chain_links(&graph),
            vec![("B".to_string(), "A".to_string())]
        );
        assert_eq!(graph.node("B").unwrap().prerequisites, vec!["A"]);
    }

    #[test]
    fn flat_dataset_without_links_derives_them() {
        let raw = r#"{
            "nodes": [
                {"code": "A"},
                {"code": "B", "prerequisites": ["A"]}
            ]
        }"#;

        let graph = parse_course_graph("derived", raw).unwrap();
        assert_eq!(
            chain_links(&graph),
            vec![("B".to_string(), "A".to_string())]
        );
    }

    #[test]
    fn link_generation_emits_resolved_prerequisites_only() {
        let nodes = vec![
            CourseNode {
                code: "A".to_string(),
                name: "A".to_string(),
                description: None,
                prerequisites: Vec::new(),
                category: None,
                completed: false,
            },
            CourseNode {
                code: "B".to_string(),
                name: "B".to_string(),
                description: None,
                prerequisites: vec!["A".to_string()],
                category: None,
                completed: false,
            },
        ];

        let links = links_from_prerequisites(&nodes);
        assert_eq!(
            links,
            vec![LinkRecord {
                source: "B".to_string(),
                target: "A".to_string(),
            }]
        );
    }

    #[test]
    fn link_generation_skips_unresolved_prerequisites() {
        let nodes = vec![CourseNode {
            code: "B".to_string(),
            name: "B".to_string(),
            description: None,
            prerequisites: vec!["Z".to_string()],
            category: None,
            completed: false,
        }];

        assert!(links_from_prerequisites(&nodes).is_empty());
    }

    #[test]
    fn both_shapes_canonicalize_the_same_chain() {
        let flat = r#"{
            "nodes": [
                {"code": "A"}, {"code": "B", "prerequisites": ["A"]},
                {"code": "C", "prerequisites": ["B"]}, {"code": "D", "prerequisites": ["C"]}
            ]
        }"#;
        let tree = r#"{
            "code": "A",
            "children": [{"code": "B", "children": [{"code": "C", "children": [{"code": "D"}]}]}]
        }"#;

        let flat_graph = parse_course_graph("flat", flat).unwrap();
        let tree_graph = parse_course_graph("tree", tree).unwrap();

        assert_eq!(flat_graph.node_count(), 4);
        assert_eq!(flat_graph.link_count(), 3);
        assert_eq!(chain_links(&flat_graph), chain_links(&tree_graph));
        assert_eq!(tree_graph.node("B").unwrap().prerequisites, vec!["A"]);
    }

    #[test]
    fn tree_accepts_id_and_name_aliases() {
        let raw = r#"{"name": "Root", "children": [{"id": "Leaf"}]}"#;
        let graph = parse_course_graph("aliases", raw).unwrap();

        assert_eq!(graph.node_count(), 2);
        assert_eq!(
            chain_links(&graph),
            vec![("Leaf".to_string(), "Root".to_string())]
        );
    }

    #[test]
    fn malformed_input_reports_an_error() {
        assert!(parse_course_graph("bad", "not json").is_err());
        assert!(parse_course_graph("bad", r#"{"unrelated": true}"#).is_err());
        assert!(parse_course_graph("bad", r#"{"nodes": "nope"}"#).is_err());
    }
}
