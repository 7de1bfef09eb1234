use eframe::egui::{Color32, Painter, Pos2, Rect, Shape, Stroke, Vec2, vec2};

pub(super) fn world_to_screen(rect: Rect, pan: Vec2, zoom: f32, world: Vec2) -> Pos2 {
    rect.center() + pan + world * zoom
}

pub(super) fn screen_to_world(rect: Rect, pan: Vec2, zoom: f32, screen: Pos2) -> Vec2 {
    (screen - rect.center() - pan) / zoom
}

pub(super) fn draw_background(painter: &Painter, rect: Rect) {
    painter.rect_filled(rect, 0.0, Color32::from_rgb(19, 23, 29));
}

/// Dashed center cross plus the canvas border, the debugging grid carried
/// over from the original viewer. Toggled from the controls panel.
pub(super) fn draw_grid(painter: &Painter, rect: Rect, pan: Vec2, zoom: f32, extent: f32) {
    let stroke = Stroke::new(1.5, Color32::from_rgba_unmultiplied(120, 130, 140, 90));
    let dash = (14.0 * zoom).clamp(6.0, 28.0);
    let gap = dash * 0.5;

    let project = |world: Vec2| world_to_screen(rect, pan, zoom, world);
    let segments = [
        [project(vec2(-extent, 0.0)), project(vec2(extent, 0.0))],
        [project(vec2(0.0, -extent)), project(vec2(0.0, extent))],
        [project(vec2(-extent, -extent)), project(vec2(extent, -extent))],
        [project(vec2(extent, -extent)), project(vec2(extent, extent))],
        [project(vec2(extent, extent)), project(vec2(-extent, extent))],
        [project(vec2(-extent, extent)), project(vec2(-extent, -extent))],
    ];

    for segment in segments {
        painter.extend(Shape::dashed_line(&segment, stroke, dash, gap));
    }
}

pub(super) fn circle_visible(rect: Rect, position: Pos2, radius: f32) -> bool {
    !(position.x + radius < rect.left()
        || position.x - radius > rect.right()
        || position.y + radius < rect.top()
        || position.y - radius > rect.bottom())
}

pub(super) fn dim_color(color: Color32, factor: f32) -> Color32 {
    let factor = factor.clamp(0.0, 1.0);
    Color32::from_rgba_unmultiplied(
        (color.r() as f32 * factor) as u8,
        (color.g() as f32 * factor) as u8,
        (color.b() as f32 * factor) as u8,
        (color.a() as f32 * (0.45 + (factor * 0.55))) as u8,
    )
}

/// Label sizing from the original viewer: the code must fit within the
/// marker diameter, `min(2r, (2r - 8) / len)`.
pub(super) fn label_font_size(screen_radius: f32, code_len: usize) -> f32 {
    let diameter = screen_radius * 2.0;
    let fitted = diameter.min((diameter - 8.0) / code_len.max(1) as f32);
    fitted.max(1.0)
}

/// Filled triangle at the target end of a link segment, pulled back so the
/// tip rests on the marker's rim rather than under it.
pub(super) fn draw_arrowhead(
    painter: &Painter,
    from: Pos2,
    to: Pos2,
    target_radius: f32,
    size: f32,
    color: Color32,
) {
    let delta = to - from;
    let length = delta.length();
    if length <= target_radius + size {
        return;
    }

    let direction = delta / length;
    let tip = to - direction * (target_radius + 2.0);
    let base = tip - direction * size;
    let perpendicular = vec2(-direction.y, direction.x) * (size * 0.5);

    painter.add(Shape::convex_polygon(
        vec![tip, base + perpendicular, base - perpendicular],
        color,
        Stroke::NONE,
    ));
}
