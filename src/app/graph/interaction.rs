use eframe::egui::{self, Pos2, Rect, Ui, Vec2};

use super::super::ViewModel;
use super::super::render_utils::screen_to_world;

impl ViewModel {
    pub(in crate::app) fn handle_graph_zoom(
        &mut self,
        ui: &Ui,
        rect: Rect,
        response: &egui::Response,
    ) {
        if !response.hovered() {
            return;
        }

        let scroll = ui.input(|input| input.raw_scroll_delta.y);
        if scroll.abs() <= f32::EPSILON {
            return;
        }

        let pointer = ui
            .input(|input| input.pointer.hover_pos())
            .unwrap_or_else(|| rect.center());
        let (pan, zoom) = zoom_about(
            pointer,
            rect,
            self.pan,
            self.zoom,
            scroll,
            self.config.min_zoom,
            self.config.max_zoom,
        );
        self.pan = pan;
        self.zoom = zoom;
    }

    pub(in crate::app) fn hovered_index(
        ui: &Ui,
        screen_positions: &[Pos2],
        hit_radius: f32,
    ) -> Option<(usize, f32)> {
        let pointer = ui.input(|input| input.pointer.hover_pos())?;
        closest_hit(pointer, screen_positions, hit_radius)
    }
}

/// Wheel zoom about the pointer: the world point under the cursor stays put
/// while the scale changes within the configured bounds.
pub(super) fn zoom_about(
    pointer: Pos2,
    rect: Rect,
    pan: Vec2,
    zoom: f32,
    scroll: f32,
    min_zoom: f32,
    max_zoom: f32,
) -> (Vec2, f32) {
    let world_before = screen_to_world(rect, pan, zoom, pointer);
    let factor = (1.0 + (scroll * 0.0018)).clamp(0.85, 1.15);
    let next_zoom = (zoom * factor).clamp(min_zoom, max_zoom);
    let next_pan = pointer - rect.center() - (world_before * next_zoom);
    (next_pan, next_zoom)
}

/// Screen-space drag deltas shrink by the zoom factor on their way into
/// world space, so a dragged node tracks the pointer 1:1 on screen.
pub(super) fn world_drag_delta(screen_delta: Vec2, zoom: f32) -> Vec2 {
    screen_delta / zoom
}

pub(super) fn closest_hit(
    pointer: Pos2,
    screen_positions: &[Pos2],
    hit_radius: f32,
) -> Option<(usize, f32)> {
    screen_positions
        .iter()
        .enumerate()
        .filter_map(|(index, position)| {
            let distance = position.distance(pointer);
            (distance <= hit_radius).then_some((index, distance))
        })
        .min_by(|a, b| a.1.total_cmp(&b.1))
}
