use eframe::egui::Color32;

use crate::course::CourseNode;

/// All tunables for one graph view in a single place: canvas size, force
/// strengths, collision radius, zoom bounds, and node sizing.
#[derive(Clone, Copy, Debug)]
pub(in crate::app) struct GraphConfig {
    /// World coordinates are clamped to `[-canvas_extent, canvas_extent]`
    /// on both axes.
    pub(in crate::app) canvas_extent: f32,
    pub(in crate::app) node_radius: f32,
    /// Minimum allowed pairwise separation is `2 * collision_radius`.
    pub(in crate::app) collision_radius: f32,
    pub(in crate::app) repulsion_strength: f32,
    pub(in crate::app) link_rest_length: f32,
    pub(in crate::app) link_strength: f32,
    pub(in crate::app) center_strength: f32,
    pub(in crate::app) velocity_decay: f32,
    pub(in crate::app) min_zoom: f32,
    pub(in crate::app) max_zoom: f32,
    pub(in crate::app) initial_zoom: f32,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            canvas_extent: 1500.0,
            node_radius: 15.0,
            collision_radius: 25.0,
            repulsion_strength: 2000.0,
            link_rest_length: 0.0,
            link_strength: 1.0,
            center_strength: 0.1,
            velocity_decay: 0.4,
            min_zoom: 0.2,
            max_zoom: 8.0,
            initial_zoom: 2.0,
        }
    }
}

pub(in crate::app) const COMPLETED_FILL: Color32 = Color32::from_rgb(0x2e, 0xcc, 0x71);
pub(in crate::app) const DEFAULT_FILL: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);
pub(in crate::app) const LINK_NORMAL: Color32 = Color32::from_rgb(0x95, 0xa5, 0xa6);
pub(in crate::app) const LINK_HIGHLIGHTED: Color32 = Color32::from_rgb(0x34, 0x98, 0xdb);

/// Category keyword to marker fill. Unknown keywords land on the default
/// blue rather than failing the render.
pub(in crate::app) fn category_color(category: Option<&str>) -> Color32 {
    match category {
        Some("blue") => Color32::from_rgb(0x34, 0x98, 0xdb),
        Some("green") => Color32::from_rgb(0x2e, 0xcc, 0x71),
        Some("red") => Color32::from_rgb(0xe7, 0x4c, 0x3c),
        Some("yellow") => Color32::from_rgb(0xf1, 0xc4, 0x0f),
        Some("purple") => Color32::from_rgb(0x9b, 0x59, 0xb6),
        Some("orange") => Color32::from_rgb(0xe6, 0x7e, 0x22),
        Some("teal") => Color32::from_rgb(0x1a, 0xbc, 0x9c),
        Some("gray") => Color32::from_rgb(0x95, 0xa5, 0xa6),
        Some("darkBlue") => Color32::from_rgb(0x29, 0x80, 0xb9),
        Some("darkGreen") => Color32::from_rgb(0x27, 0xae, 0x60),
        Some("darkRed") => Color32::from_rgb(0xc0, 0x39, 0x2b),
        Some("darkYellow") => Color32::from_rgb(0xf3, 0x9c, 0x12),
        Some("darkPurple") => Color32::from_rgb(0x8e, 0x44, 0xad),
        Some("darkOrange") => Color32::from_rgb(0xd3, 0x54, 0x00),
        Some("darkTeal") => Color32::from_rgb(0x16, 0xa0, 0x85),
        Some("darkGray") => Color32::from_rgb(0x7f, 0x8c, 0x8d),
        _ => DEFAULT_FILL,
    }
}

/// Marker fill for one course: completion wins over category.
pub(in crate::app) fn node_fill(node: &CourseNode) -> Color32 {
    if node.completed {
        COMPLETED_FILL
    } else {
        category_color(node.category.as_deref())
    }
}

/// Arrowheads come from a small fixed palette; anything outside it uses the
/// default marker color.
pub(in crate::app) fn arrow_color(category: Option<&str>) -> Color32 {
    match category {
        Some("red") => Color32::from_rgb(0xe7, 0x4c, 0x3c),
        Some("blue") => Color32::from_rgb(0x34, 0x98, 0xdb),
        Some("yellow") => Color32::from_rgb(0xf1, 0xc4, 0x0f),
        Some("green") => Color32::from_rgb(0x2e, 0xcc, 0x71),
        Some("purple") => Color32::from_rgb(0x9b, 0x59, 0xb6),
        Some("brown") => Color32::from_rgb(0x8b, 0x45, 0x13),
        Some("black") => Color32::from_rgb(0x01, 0x00, 0x02),
        _ => LINK_NORMAL,
    }
}
