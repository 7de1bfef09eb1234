use std::path::{Path, PathBuf};

use eframe::egui::{self, Ui, Vec2};

use super::super::ViewModel;
use super::super::physics::DRAG_REHEAT_TARGET;

impl ViewModel {
    pub(in crate::app) fn draw_controls(
        &mut self,
        ui: &mut Ui,
        datasets: &[PathBuf],
        current_dataset: Option<&Path>,
        is_loading: bool,
        reload_requested: &mut bool,
        switch_request: &mut Option<PathBuf>,
    ) {
        ui.heading("Datasets");
        ui.add_space(4.0);
        egui::ScrollArea::vertical()
            .id_salt("dataset_list")
            .max_height(200.0)
            .auto_shrink([false, true])
            .show(ui, |ui| {
                if datasets.is_empty() {
                    ui.label("No datasets found in the data directory.");
                }
                for path in datasets {
                    let label = path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .unwrap_or("dataset");
                    let is_current = current_dataset == Some(path.as_path());
                    if ui.selectable_label(is_current, label).clicked() && !is_current {
                        *switch_request = Some(path.clone());
                    }
                }
            });

        ui.add_space(4.0);
        let reload = ui.add_enabled(!is_loading, egui::Button::new("Reload dataset"));
        if reload.clicked() {
            *reload_requested = true;
        }

        ui.separator();
        ui.heading("Search");
        ui.text_edit_singleline(&mut self.search);
        if !self.search.trim().is_empty() && ui.button("Clear search").clicked() {
            self.search.clear();
        }

        ui.separator();
        ui.heading("View");
        ui.checkbox(&mut self.show_grid, "Show grid");
        if ui.button("Reset view").clicked() {
            self.pan = Vec2::ZERO;
            self.zoom = self.config.initial_zoom;
        }

        ui.separator();
        ui.heading("Forces");
        let mut perturbed = false;
        perturbed |= ui
            .add(
                egui::Slider::new(&mut self.config.repulsion_strength, 200.0..=8000.0)
                    .text("repulsion"),
            )
            .changed();
        perturbed |= ui
            .add(
                egui::Slider::new(&mut self.config.collision_radius, 5.0..=60.0)
                    .text("collision radius"),
            )
            .changed();
        perturbed |= ui
            .add(
                egui::Slider::new(&mut self.config.link_rest_length, 0.0..=150.0)
                    .text("link length"),
            )
            .changed();

        if perturbed {
            // A force edit perturbs the layout the same way a drag does.
            self.alpha = self.alpha.max(DRAG_REHEAT_TARGET);
            ui.ctx().request_repaint();
        }
    }
}
