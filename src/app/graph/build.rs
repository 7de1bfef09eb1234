use std::collections::HashMap;
use std::f32::consts::TAU;

use eframe::egui::vec2;

use crate::util::stable_pair;

use super::super::{PhysicsScratch, RenderGraph, SimNode, ViewModel};

const GOLDEN_ANGLE: f32 = 2.399_963;

impl ViewModel {
    /// Rebuilds the whole scene from the course graph. Dataset changes and
    /// force-parameter edits go through here; nothing is diffed against a
    /// previous scene.
    pub(in crate::app) fn rebuild_render_graph(&mut self) {
        self.render_revision = self.render_revision.wrapping_add(1);
        self.search_match_cache = None;
        self.dragged_node = None;

        let nodes = self
            .graph
            .nodes()
            .iter()
            .enumerate()
            .map(|(index, course)| make_sim_node(&course.code, index))
            .collect::<Vec<_>>();

        let mut index_by_code = HashMap::with_capacity(nodes.len());
        for (index, node) in nodes.iter().enumerate() {
            index_by_code.insert(node.code.clone(), index);
        }

        let mut links = Vec::with_capacity(self.graph.link_count());
        for link in self.graph.links() {
            if let (Some(&source), Some(&target)) = (
                index_by_code.get(&link.source),
                index_by_code.get(&link.target),
            ) && source != target
            {
                links.push((source, target));
            }
        }
        let arrow_links = links
            .iter()
            .map(|&(source, target)| (target, source))
            .collect::<Vec<_>>();

        self.render_graph = Some(RenderGraph {
            nodes,
            links,
            arrow_links,
            index_by_code,
            scratch: PhysicsScratch::default(),
        });
        self.alpha = 1.0;
        self.alpha_target = 0.0;
        self.graph_dirty = false;
    }
}

/// Phyllotaxis placement spreads fresh nodes outward so the first tick never
/// sees an all-at-origin cloud; the initial velocity direction hashes the
/// course code so a dataset lays out the same way on every run.
fn make_sim_node(code: &str, index: usize) -> SimNode {
    let radius = 24.0 * (index as f32).sqrt();
    let angle = index as f32 * GOLDEN_ANGLE;

    let (jx, jy) = stable_pair(code);
    let mut direction = vec2(jx, jy);
    if direction.length_sq() <= 0.0001 {
        let fallback = ((index as f32) * 0.618_034 + 0.11) * TAU;
        direction = vec2(fallback.cos(), fallback.sin());
    } else {
        direction = direction.normalized();
    }

    SimNode {
        code: code.to_string(),
        pos: vec2(radius * angle.cos(), radius * angle.sin()),
        vel: direction * 1.2,
        pinned: None,
    }
}

#[cfg(test)]
mod tests {
    use crate::course::{CourseGraph, CourseNode, LinkRecord};

    use super::*;

    fn chain_graph() -> CourseGraph {
        let nodes = ["A", "B", "C", "D"]
            .into_iter()
            .map(|code| CourseNode {
                code: code.to_string(),
                name: format!("Course {code}"),
                description: None,
                prerequisites: Vec::new(),
                category: None,
                completed: false,
            })
            .collect();
        let links = [("B", "A"), ("C", "B"), ("D", "C")]
            .into_iter()
            .map(|(source, target)| LinkRecord {
                source: source.to_string(),
                target: target.to_string(),
            })
            .collect();

        CourseGraph::new("chain".to_string(), nodes, links)
    }

    #[test]
    fn chain_dataset_resolves_three_links() {
        let mut model = ViewModel::new(chain_graph(), 1);
        model.rebuild_render_graph();

        let cache = model.render_graph.as_ref().unwrap();
        assert_eq!(cache.nodes.len(), 4);
        assert_eq!(cache.links, vec![(1, 0), (2, 1), (3, 2)]);
    }

    #[test]
    fn every_link_has_exactly_one_reversed_arrow_counterpart() {
        let mut model = ViewModel::new(chain_graph(), 1);
        model.rebuild_render_graph();

        let cache = model.render_graph.as_ref().unwrap();
        assert_eq!(cache.arrow_links.len(), cache.links.len());
        for (&(source, target), &(arrow_from, arrow_to)) in
            cache.links.iter().zip(cache.arrow_links.iter())
        {
            assert_eq!((arrow_from, arrow_to), (target, source));
        }
    }

    #[test]
    fn initial_positions_are_spread_and_deterministic() {
        let mut first = ViewModel::new(chain_graph(), 1);
        let mut second = ViewModel::new(chain_graph(), 2);
        first.rebuild_render_graph();
        second.rebuild_render_graph();

        let first_cache = first.render_graph.as_ref().unwrap();
        let second_cache = second.render_graph.as_ref().unwrap();

        for (a, b) in first_cache.nodes.iter().zip(second_cache.nodes.iter()) {
            assert_eq!(a.pos, b.pos);
        }
        for i in 0..first_cache.nodes.len() {
            for j in (i + 1)..first_cache.nodes.len() {
                assert_ne!(first_cache.nodes[i].pos, first_cache.nodes[j].pos);
            }
        }
    }

    #[test]
    fn rebuild_resets_simulation_heat_and_drag_state() {
        let mut model = ViewModel::new(chain_graph(), 1);
        model.alpha = 0.000_4;
        model.alpha_target = 0.3;
        model.dragged_node = Some(2);

        model.rebuild_render_graph();

        assert_eq!(model.alpha, 1.0);
        assert_eq!(model.alpha_target, 0.0);
        assert!(model.dragged_node.is_none());
        assert!(!model.graph_dirty);
    }
}
