use std::path::{Path, PathBuf};

use eframe::egui::{self, Align, Color32, Context, Layout, Pos2, Vec2};

use crate::course::CourseGraph;

use super::super::config::GraphConfig;
use super::super::ViewModel;

impl ViewModel {
    pub(in crate::app) fn new(graph: CourseGraph, epoch: u64) -> Self {
        let config = GraphConfig::default();

        Self {
            graph,
            epoch,
            config,
            search: String::new(),
            selected: None,
            overlay_open: false,
            overlay_anchor: Pos2::ZERO,
            overlay_reposition: false,
            pan: Vec2::ZERO,
            zoom: config.initial_zoom,
            alpha: 1.0,
            alpha_target: 0.0,
            dragged_node: None,
            show_grid: false,
            graph_dirty: true,
            render_revision: 0,
            render_graph: None,
            search_match_cache: None,
            status: None,
        }
    }

    pub(in crate::app) fn show(
        &mut self,
        ctx: &Context,
        datasets: &[PathBuf],
        current_dataset: Option<&Path>,
        is_loading: bool,
        reload_requested: &mut bool,
        switch_request: &mut Option<PathBuf>,
    ) {
        if self.graph_dirty {
            self.rebuild_render_graph();
        }

        egui::TopBottomPanel::top("top_bar")
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.heading("course-graph");
                    ui.separator();
                    ui.label(format!("dataset: {}", self.graph.label));
                    ui.label(format!("courses: {}", self.graph.node_count()));
                    ui.label(format!("links: {}", self.graph.link_count()));
                    ui.label(format!(
                        "completed: {}/{}",
                        self.graph.completed_count(),
                        self.graph.node_count()
                    ));
                    if is_loading {
                        ui.spinner();
                        ui.label("loading...");
                    }
                    if let Some(status) = &self.status {
                        ui.colored_label(Color32::from_rgb(0xe7, 0x4c, 0x3c), status.as_str());
                    }
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        let dt = ui.ctx().input(|input| input.stable_dt);
                        if dt > f32::EPSILON {
                            ui.label(format!("{:.0} fps", (1.0 / dt).clamp(0.0, 1000.0)));
                        }
                    });
                });
            });

        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(260.0)
            .show(ctx, |ui| {
                self.draw_controls(
                    ui,
                    datasets,
                    current_dataset,
                    is_loading,
                    reload_requested,
                    switch_request,
                )
            });

        egui::CentralPanel::default().show(ctx, |ui| self.draw_graph(ui));

        self.draw_overlay(ctx);
    }

    /// Flips the selected course's completion flag. The marker fill is
    /// re-derived from the flag on the next frame, so only that node's
    /// color changes. No-op without a live selection.
    pub(in crate::app) fn toggle_completion(&mut self) {
        let Some(code) = self.selected.clone() else {
            return;
        };

        match self.graph.node_mut(&code) {
            Some(course) => course.completed = !course.completed,
            None => log::debug!("completion toggle for {code:?} ignored; not in current graph"),
        }
    }
}
