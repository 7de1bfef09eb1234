use eframe::egui::{Vec2, vec2};

use super::super::SimNode;

/// Distances are floored to this before any division so coincident nodes
/// never produce NaN or infinite forces.
pub(super) const MIN_DISTANCE: f32 = 0.01;

/// Charge-like inverse-distance repulsion between two points. Coincident
/// points get a deterministic separation direction derived from their
/// indices instead of a divide-by-zero.
pub(super) fn repulsion_between(
    point_a: Vec2,
    point_b: Vec2,
    index_a: usize,
    index_b: usize,
    strength: f32,
) -> Vec2 {
    let delta = point_a - point_b;
    let distance = delta.length().max(MIN_DISTANCE);
    let direction = if delta.length_sq() > MIN_DISTANCE * MIN_DISTANCE {
        delta / distance
    } else {
        separation_direction(index_a, index_b)
    };

    direction * (strength / distance)
}

/// Hard mutual-exclusion pass: any pair closer than `min_separation` is
/// pushed apart positionally. A pinned node never moves; its partner takes
/// the whole correction.
pub(super) fn resolve_collisions(nodes: &mut [SimNode], min_separation: f32) {
    for first in 0..nodes.len() {
        for second in (first + 1)..nodes.len() {
            let delta = nodes[second].pos - nodes[first].pos;
            let distance = delta.length();
            if distance >= min_separation {
                continue;
            }

            let direction = if distance > MIN_DISTANCE {
                delta / distance
            } else {
                separation_direction(first, second)
            };
            let overlap = min_separation - distance;

            match (nodes[first].pinned.is_some(), nodes[second].pinned.is_some()) {
                (true, true) => {}
                (true, false) => nodes[second].pos += direction * overlap,
                (false, true) => nodes[first].pos -= direction * overlap,
                (false, false) => {
                    nodes[first].pos -= direction * (overlap * 0.5);
                    nodes[second].pos += direction * (overlap * 0.5);
                }
            }
        }
    }
}

fn separation_direction(first: usize, second: usize) -> Vec2 {
    let angle =
        ((first as f32) * 0.618_034 + (second as f32) * 0.414_214) * std::f32::consts::TAU;
    vec2(angle.cos(), angle.sin())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim_node(code: &str, x: f32, y: f32) -> SimNode {
        SimNode {
            code: code.to_string(),
            pos: vec2(x, y),
            vel: Vec2::ZERO,
            pinned: None,
        }
    }

    #[test]
    fn repulsion_is_finite_for_coincident_points() {
        let force = repulsion_between(vec2(5.0, 5.0), vec2(5.0, 5.0), 0, 1, 2000.0);
        assert!(force.x.is_finite() && force.y.is_finite());
        assert!(force.length() > 0.0);
    }

    #[test]
    fn repulsion_pushes_the_first_point_away_from_the_second() {
        let force = repulsion_between(vec2(10.0, 0.0), vec2(0.0, 0.0), 0, 1, 2000.0);
        assert!(force.x > 0.0);
        assert!(force.y.abs() < f32::EPSILON);
    }

    #[test]
    fn overlapping_pair_is_separated() {
        let mut nodes = vec![sim_node("A", 0.0, 0.0), sim_node("B", 10.0, 0.0)];
        resolve_collisions(&mut nodes, 50.0);

        let distance = (nodes[1].pos - nodes[0].pos).length();
        assert!((distance - 50.0).abs() < 0.01);
    }

    #[test]
    fn pinned_partner_takes_no_correction() {
        let mut nodes = vec![sim_node("A", 0.0, 0.0), sim_node("B", 10.0, 0.0)];
        nodes[0].pinned = Some(vec2(0.0, 0.0));
        let pinned_before = nodes[0].pos;

        resolve_collisions(&mut nodes, 50.0);

        assert_eq!(nodes[0].pos, pinned_before);
        assert!((nodes[1].pos - pinned_before).length() >= 50.0 - 0.01);
    }
}
