use std::collections::HashSet;
use std::sync::Arc;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, Vec2, vec2};
use fuzzy_matcher::FuzzyMatcher;
use fuzzy_matcher::skim::SkimMatcherV2;

use super::super::config::{self, GraphConfig};
use super::super::physics::{DRAG_REHEAT_TARGET, advance_alpha, converged, step_layout};
use super::super::render_utils::{
    circle_visible, dim_color, draw_arrowhead, draw_background, draw_grid, label_font_size,
    world_to_screen,
};
use super::super::{RenderGraph, SearchMatchCache, ViewModel};
use super::interaction::world_drag_delta;

impl ViewModel {
    fn update_screen_space(rect: Rect, pan: Vec2, zoom: f32, cache: &mut RenderGraph) {
        cache.scratch.screen_positions.clear();
        cache.scratch.screen_positions.reserve(
            cache
                .nodes
                .len()
                .saturating_sub(cache.scratch.screen_positions.capacity()),
        );
        for node in &cache.nodes {
            cache
                .scratch
                .screen_positions
                .push(world_to_screen(rect, pan, zoom, node.pos));
        }
    }

    fn cached_search_matches(&mut self) -> Option<Arc<HashSet<usize>>> {
        let query = self.search.trim();
        if query.is_empty() {
            return None;
        }

        if let Some(cached) = &self.search_match_cache
            && cached.revision == self.render_revision
            && cached.query == query
        {
            return Some(Arc::clone(&cached.matches));
        }

        let cache = self.render_graph.as_ref()?;
        let matcher = SkimMatcherV2::default();
        let matches = cache
            .nodes
            .iter()
            .enumerate()
            .filter_map(|(index, node)| {
                let course = self.graph.node(&node.code)?;
                let haystack = format!("{} {}", course.code, course.name);
                matcher
                    .fuzzy_match(&haystack, query)
                    .or_else(|| {
                        matcher
                            .fuzzy_match(&haystack.to_ascii_lowercase(), &query.to_ascii_lowercase())
                    })
                    .map(|_score| index)
            })
            .collect::<HashSet<_>>();
        let matches = Arc::new(matches);

        self.search_match_cache = Some(SearchMatchCache {
            query: query.to_owned(),
            revision: self.render_revision,
            matches: Arc::clone(&matches),
        });

        Some(matches)
    }

    pub(in crate::app) fn draw_graph(&mut self, ui: &mut Ui) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        draw_background(&painter, rect);
        if self.show_grid {
            draw_grid(&painter, rect, self.pan, self.zoom, self.config.canvas_extent);
        }

        self.handle_graph_zoom(ui, rect, &response);
        if response.dragged_by(egui::PointerButton::Secondary)
            || response.dragged_by(egui::PointerButton::Middle)
        {
            self.pan += response.drag_delta();
        }

        let search_matches = self.cached_search_matches();
        let zoom = self.zoom;
        let config: GraphConfig = self.config;

        let Some(cache) = self.render_graph.as_mut() else {
            ui.label("Dataset has no courses to display.");
            return;
        };

        // Tick the layout only while it is hot; a converged simulation costs
        // nothing until something reheats it.
        if !converged(self.alpha, self.alpha_target) {
            step_layout(cache, &config, self.alpha);
            self.alpha = advance_alpha(self.alpha, self.alpha_target);
        }

        Self::update_screen_space(rect, self.pan, zoom, cache);
        let node_screen_radius = config.node_radius * zoom;
        let hovered = Self::hovered_index(
            ui,
            &cache.scratch.screen_positions,
            node_screen_radius.max(4.0),
        );
        let hovered_index = hovered.map(|(index, _)| index);

        if hovered.is_some() {
            ui.output_mut(|output| {
                output.cursor_icon = egui::CursorIcon::PointingHand;
            });
        }

        // Node drag state machine: a primary drag starting on a marker pins
        // that node and reheats the simulation; anywhere else it pans.
        if response.drag_started_by(egui::PointerButton::Primary) {
            if let Some(index) = hovered_index {
                self.dragged_node = Some(index);
                let node = &mut cache.nodes[index];
                node.pinned = Some(node.pos);
                self.alpha_target = DRAG_REHEAT_TARGET;
                self.alpha = self.alpha.max(DRAG_REHEAT_TARGET);
            }
        }

        if response.dragged_by(egui::PointerButton::Primary) {
            let delta = response.drag_delta();
            match self.dragged_node {
                Some(index) => {
                    if let Some(node) = cache.nodes.get_mut(index) {
                        let pin =
                            node.pinned.unwrap_or(node.pos) + world_drag_delta(delta, zoom);
                        node.pinned = Some(pin);
                        // Position follows the pin right away so every link
                        // touching this node is drawn attached this frame.
                        node.pos = pin;
                    }
                }
                None => self.pan += delta,
            }
        }

        if response.drag_stopped_by(egui::PointerButton::Primary)
            && let Some(index) = self.dragged_node.take()
        {
            if let Some(node) = cache.nodes.get_mut(index) {
                node.pinned = None;
            }
            // Cool back down on the normal decay schedule.
            self.alpha_target = 0.0;
        }

        // Re-project after input so drawn primitives always match this
        // frame's node positions.
        Self::update_screen_space(rect, self.pan, zoom, cache);

        if !converged(self.alpha, self.alpha_target) || response.dragged() {
            ui.ctx().request_repaint();
        }

        let selected_index = self
            .selected
            .as_ref()
            .and_then(|code| cache.index_by_code.get(code))
            .copied();
        let search_active = search_matches
            .as_ref()
            .is_some_and(|matches| !matches.is_empty());

        let link_width = (2.0 * zoom).clamp(0.6, 6.0);
        let arrow_size = (8.0 * zoom).clamp(4.0, 18.0);

        // Links render along the reversed pair so arrowheads point at the
        // dependent course.
        for &(from, to) in &cache.arrow_links {
            if from >= cache.nodes.len() || to >= cache.nodes.len() {
                continue;
            }

            let start = cache.scratch.screen_positions[from];
            let end = cache.scratch.screen_positions[to];

            let touches_selection =
                selected_index.is_some_and(|selected| selected == from || selected == to);
            let color = if touches_selection {
                config::LINK_HIGHLIGHTED
            } else {
                self.graph
                    .node(&cache.nodes[from].code)
                    .map(|course| config::arrow_color(course.category.as_deref()))
                    .unwrap_or(config::LINK_NORMAL)
            };
            let stroke_color =
                Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 153);

            painter.line_segment([start, end], Stroke::new(link_width, stroke_color));
            draw_arrowhead(&painter, start, end, node_screen_radius, arrow_size, color);
        }

        for (index, node) in cache.nodes.iter().enumerate() {
            let position = cache.scratch.screen_positions[index];
            if !circle_visible(rect, position, node_screen_radius) {
                continue;
            }

            let Some(course) = self.graph.node(&node.code) else {
                continue;
            };

            let mut fill = config::node_fill(course);
            let is_match = search_matches
                .as_ref()
                .is_some_and(|matches| matches.contains(&index));
            if search_active && !is_match {
                fill = dim_color(fill, 0.35);
            }

            painter.circle_filled(position, node_screen_radius, fill);
            painter.circle_stroke(
                position,
                node_screen_radius,
                Stroke::new(1.5, Color32::from_rgb(0x01, 0x00, 0x02)),
            );
            if selected_index == Some(index) {
                painter.circle_stroke(
                    position,
                    node_screen_radius + 3.0,
                    Stroke::new(2.0, config::LINK_HIGHLIGHTED),
                );
            }

            let font_size = label_font_size(node_screen_radius, course.code.chars().count());
            if font_size >= 3.0 {
                painter.text(
                    position,
                    Align2::CENTER_CENTER,
                    &course.code,
                    FontId::proportional(font_size),
                    Color32::from_gray(235),
                );
            }
        }

        if let Some(index) = hovered_index
            && let Some(course) = cache
                .nodes
                .get(index)
                .and_then(|node| self.graph.node(&node.code))
        {
            let status = if course.completed {
                "completed"
            } else {
                "not completed"
            };
            painter.text(
                rect.left_top() + vec2(10.0, 10.0),
                Align2::LEFT_TOP,
                format!("{}  |  {}  |  {}", course.code, course.name, status),
                FontId::proportional(13.0),
                Color32::from_gray(240),
            );
        }

        // A click that never turned into a drag selects the course and
        // anchors the detail overlay near the pointer.
        if response.clicked_by(egui::PointerButton::Primary)
            && let Some(index) = hovered_index
            && let Some(node) = cache.nodes.get(index)
        {
            let pointer = ui
                .input(|input| input.pointer.interact_pos())
                .unwrap_or_else(|| rect.center());
            self.selected = Some(node.code.clone());
            self.overlay_open = true;
            self.overlay_anchor = pointer + vec2(12.0, 12.0);
            self.overlay_reposition = true;
        }
    }
}
