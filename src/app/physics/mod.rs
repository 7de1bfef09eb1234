mod forces;

use eframe::egui::Vec2;

use super::RenderGraph;
use super::config::GraphConfig;
use forces::{MIN_DISTANCE, repulsion_between, resolve_collisions};

/// Below this activity level with no reheat target the simulation is
/// considered converged and stops consuming frames.
pub(in crate::app) const ALPHA_MIN: f32 = 0.001;
/// Per-tick decay rate toward the target, tuned to settle in ~300 ticks.
pub(in crate::app) const ALPHA_DECAY: f32 = 0.0228;
/// Target installed while a node drag is active.
pub(in crate::app) const DRAG_REHEAT_TARGET: f32 = 0.3;

const MAX_FORCE: f32 = 200.0;
const MAX_SPEED: f32 = 60.0;

pub(in crate::app) fn advance_alpha(alpha: f32, target: f32) -> f32 {
    alpha + (target - alpha) * ALPHA_DECAY
}

pub(in crate::app) fn converged(alpha: f32, target: f32) -> bool {
    target <= 0.0 && alpha < ALPHA_MIN
}

/// One relaxation tick: accumulate link springs, pairwise repulsion, and the
/// centering pull into the scratch buffer, then integrate velocities, resolve
/// overlaps, and clamp everything back into the canvas bounds. All forces are
/// read before any position is written. Pinned nodes skip integration but
/// still push their neighbors.
pub(super) fn step_layout(cache: &mut RenderGraph, config: &GraphConfig, alpha: f32) {
    let node_count = cache.nodes.len();
    if node_count == 0 {
        return;
    }

    let scratch = &mut cache.scratch;
    scratch.forces.resize(node_count, Vec2::ZERO);
    scratch.forces.fill(Vec2::ZERO);
    scratch.positions.clear();
    scratch
        .positions
        .reserve(node_count.saturating_sub(scratch.positions.capacity()));
    for node in &cache.nodes {
        scratch.positions.push(node.pos);
    }

    let forces = &mut scratch.forces;
    let positions = &scratch.positions;

    for first in 0..node_count {
        for second in (first + 1)..node_count {
            let push = repulsion_between(
                positions[first],
                positions[second],
                first,
                second,
                config.repulsion_strength * alpha,
            );
            forces[first] += push;
            forces[second] -= push;
        }
    }

    for &(source, target) in &cache.links {
        if source == target || source >= node_count || target >= node_count {
            continue;
        }

        let delta = positions[source] - positions[target];
        let distance = delta.length().max(MIN_DISTANCE);
        let direction = delta / distance;
        let stretch = (distance - config.link_rest_length) * config.link_strength * alpha;
        let correction = direction * (stretch * 0.5);

        forces[source] -= correction;
        forces[target] += correction;
    }

    for (index, force) in forces.iter_mut().enumerate() {
        *force -= positions[index] * (config.center_strength * alpha);
    }

    let decay = (1.0 - config.velocity_decay).clamp(0.0, 1.0);
    for (index, node) in cache.nodes.iter_mut().enumerate() {
        if let Some(pin) = node.pinned {
            node.pos = pin;
            node.vel = Vec2::ZERO;
            continue;
        }

        let mut force = forces[index];
        let force_sq = force.length_sq();
        if force_sq > MAX_FORCE * MAX_FORCE {
            force *= MAX_FORCE / force_sq.sqrt();
        }

        let mut velocity = (node.vel + force) * decay;
        let speed_sq = velocity.length_sq();
        if speed_sq > MAX_SPEED * MAX_SPEED {
            velocity *= MAX_SPEED / speed_sq.sqrt();
        }

        node.vel = velocity;
        node.pos += velocity;
    }

    resolve_collisions(&mut cache.nodes, config.collision_radius * 2.0);

    let bound = (config.canvas_extent - config.node_radius).max(0.0);
    for node in &mut cache.nodes {
        node.pos.x = node.pos.x.clamp(-bound, bound);
        node.pos.y = node.pos.y.clamp(-bound, bound);
    }
}

#[cfg(test)]
mod tests {
    use eframe::egui::vec2;

    use super::super::{PhysicsScratch, RenderGraph, SimNode};
    use super::*;

    fn sim_node(code: &str, x: f32, y: f32) -> SimNode {
        SimNode {
            code: code.to_string(),
            pos: vec2(x, y),
            vel: vec2(0.0, 0.0),
            pinned: None,
        }
    }

    fn chain_graph() -> RenderGraph {
        RenderGraph {
            nodes: vec![
                sim_node("A", -30.0, 4.0),
                sim_node("B", -10.0, -6.0),
                sim_node("C", 10.0, 3.0),
                sim_node("D", 30.0, -2.0),
            ],
            links: vec![(1, 0), (2, 1), (3, 2)],
            arrow_links: vec![(0, 1), (1, 2), (2, 3)],
            index_by_code: [("A", 0), ("B", 1), ("C", 2), ("D", 3)]
                .into_iter()
                .map(|(code, index)| (code.to_string(), index))
                .collect(),
            scratch: PhysicsScratch::default(),
        }
    }

    fn settle(cache: &mut RenderGraph, config: &GraphConfig) {
        let mut alpha = 1.0;
        while !converged(alpha, 0.0) {
            step_layout(cache, config, alpha);
            alpha = advance_alpha(alpha, 0.0);
        }
    }

    #[test]
    fn alpha_decays_to_convergence_and_reheats() {
        let mut alpha = 1.0;
        let mut ticks = 0;
        while !converged(alpha, 0.0) {
            alpha = advance_alpha(alpha, 0.0);
            ticks += 1;
            assert!(ticks < 1_000, "alpha never fell below ALPHA_MIN");
        }

        alpha = advance_alpha(alpha, DRAG_REHEAT_TARGET);
        assert!(!converged(alpha, DRAG_REHEAT_TARGET));
        assert!(alpha > ALPHA_MIN);
    }

    #[test]
    fn converged_layout_respects_the_collision_radius() {
        let config = GraphConfig::default();
        let mut cache = chain_graph();
        settle(&mut cache, &config);

        let min_separation = config.collision_radius * 2.0;
        for first in 0..cache.nodes.len() {
            for second in (first + 1)..cache.nodes.len() {
                let distance = (cache.nodes[first].pos - cache.nodes[second].pos).length();
                assert!(
                    distance >= min_separation - 1.0,
                    "nodes {first} and {second} overlap at distance {distance}"
                );
            }
        }
    }

    #[test]
    fn coincident_nodes_separate_without_nan() {
        let config = GraphConfig::default();
        let mut cache = chain_graph();
        for node in &mut cache.nodes {
            node.pos = vec2(0.0, 0.0);
        }

        step_layout(&mut cache, &config, 1.0);

        for node in &cache.nodes {
            assert!(node.pos.x.is_finite() && node.pos.y.is_finite());
            assert!(node.vel.x.is_finite() && node.vel.y.is_finite());
        }
        let distance = (cache.nodes[0].pos - cache.nodes[1].pos).length();
        assert!(distance > 0.0);
    }

    #[test]
    fn pinned_node_holds_position_while_neighbors_move() {
        let config = GraphConfig::default();
        let mut cache = chain_graph();
        let pin = vec2(120.0, -40.0);
        cache.nodes[1].pinned = Some(pin);
        let free_before = cache.nodes[2].pos;

        for _ in 0..20 {
            step_layout(&mut cache, &config, 0.5);
        }

        assert_eq!(cache.nodes[1].pos, pin);
        assert_ne!(cache.nodes[2].pos, free_before);
    }

    #[test]
    fn positions_stay_inside_the_canvas_bounds() {
        let config = GraphConfig::default();
        let mut cache = chain_graph();
        cache.nodes[0].vel = vec2(10_000.0, 10_000.0);

        let bound = config.canvas_extent - config.node_radius;
        for _ in 0..50 {
            step_layout(&mut cache, &config, 1.0);
            for node in &cache.nodes {
                assert!(node.pos.x.abs() <= bound + f32::EPSILON);
                assert!(node.pos.y.abs() <= bound + f32::EPSILON);
            }
        }
    }
}
