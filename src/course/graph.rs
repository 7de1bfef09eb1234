use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct CourseNode {
    pub code: String,
    pub name: String,
    pub description: Option<String>,
    pub prerequisites: Vec<String>,
    pub category: Option<String>,
    pub completed: bool,
}

/// Directed dependency edge, stored as `dependent -> prerequisite`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LinkRecord {
    pub source: String,
    pub target: String,
}

#[derive(Clone, Debug)]
pub struct CourseGraph {
    pub label: String,
    nodes: Vec<CourseNode>,
    links: Vec<LinkRecord>,
    index_by_code: HashMap<String, usize>,
}

impl CourseGraph {
    /// Builds the canonical graph from parsed nodes and links. Duplicate
    /// codes keep the first occurrence; links naming an unknown code are
    /// dropped here rather than surfacing later as a runtime failure.
    pub fn new(label: String, nodes: Vec<CourseNode>, links: Vec<LinkRecord>) -> Self {
        let mut kept_nodes = Vec::with_capacity(nodes.len());
        let mut index_by_code = HashMap::with_capacity(nodes.len());

        for node in nodes {
            if index_by_code.contains_key(&node.code) {
                log::warn!("{label}: duplicate course code {:?} ignored", node.code);
                continue;
            }
            index_by_code.insert(node.code.clone(), kept_nodes.len());
            kept_nodes.push(node);
        }

        let mut kept_links = Vec::with_capacity(links.len());
        for link in links {
            if link.source == link.target {
                log::warn!("{label}: self-referential link on {:?} dropped", link.source);
                continue;
            }
            if !index_by_code.contains_key(&link.source)
                || !index_by_code.contains_key(&link.target)
            {
                log::warn!(
                    "{label}: link {:?} -> {:?} references an unknown course, dropped",
                    link.source,
                    link.target
                );
                continue;
            }
            if !kept_links.contains(&link) {
                kept_links.push(link);
            }
        }

        Self {
            label,
            nodes: kept_nodes,
            links: kept_links,
            index_by_code,
        }
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn link_count(&self) -> usize {
        self.links.len()
    }

    pub fn nodes(&self) -> &[CourseNode] {
        &self.nodes
    }

    pub fn links(&self) -> &[LinkRecord] {
        &self.links
    }

    pub fn node(&self, code: &str) -> Option<&CourseNode> {
        self.index_by_code
            .get(code)
            .and_then(|&index| self.nodes.get(index))
    }

    pub fn node_mut(&mut self, code: &str) -> Option<&mut CourseNode> {
        self.index_by_code
            .get(code)
            .and_then(|&index| self.nodes.get_mut(index))
    }

    pub fn completed_count(&self) -> usize {
        self.nodes.iter().filter(|node| node.completed).count()
    }
}
