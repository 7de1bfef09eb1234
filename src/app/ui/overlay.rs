use eframe::egui::{self, Context, RichText};

use crate::util::display_list;

use super::super::ViewModel;

impl ViewModel {
    /// The single reusable detail panel. Hidden until a node click opens it
    /// near the pointer; afterwards egui's own window dragging moves it
    /// around in screen space without ever touching the layout engine.
    pub(in crate::app) fn draw_overlay(&mut self, ctx: &Context) {
        if !self.overlay_open {
            return;
        }

        let Some(code) = self.selected.clone() else {
            self.overlay_open = false;
            return;
        };

        // The selection is an identity lookup only; if a dataset swap
        // removed the course the panel just closes.
        let Some(course) = self.graph.node(&code) else {
            self.overlay_open = false;
            self.selected = None;
            return;
        };

        let title = format!("{}: {}", course.code, course.name);
        let description = course.description.clone();
        let prerequisites = course.prerequisites.clone();
        let completed = course.completed;

        let mut window = egui::Window::new(RichText::new(title).strong())
            .id(egui::Id::new(("course-overlay", self.epoch)))
            .collapsible(false)
            .resizable(false)
            .default_width(300.0);
        if self.overlay_reposition {
            window = window.current_pos(self.overlay_anchor);
            self.overlay_reposition = false;
        }

        let mut close_clicked = false;
        let mut toggle_clicked = false;
        window.show(ctx, |ui| {
            ui.label(description_line(description.as_deref()));
            ui.label(prerequisites_line(&prerequisites));
            ui.add_space(4.0);
            ui.label(if completed {
                "Marked as completed"
            } else {
                "Not completed"
            });
            ui.add_space(6.0);
            ui.horizontal(|ui| {
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
                if ui.button("Toggle Completion").clicked() {
                    toggle_clicked = true;
                }
            });
        });

        if toggle_clicked {
            self.toggle_completion();
        }
        if close_clicked {
            // Only the overlay clears the selection.
            self.overlay_open = false;
            self.selected = None;
        }
    }
}

fn description_line(description: Option<&str>) -> String {
    match description {
        Some(text) => format!("Description: {text}"),
        None => "Description: none".to_string(),
    }
}

fn prerequisites_line(prerequisites: &[String]) -> String {
    format!("Prerequisites: {}", display_list(prerequisites))
}
