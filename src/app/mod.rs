use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use eframe::egui::{self, Context, Pos2, Vec2};

use crate::course::{CourseGraph, list_datasets, load_course_graph};

mod config;
mod graph;
mod physics;
mod render_utils;
mod ui;

use config::GraphConfig;

pub struct CourseGraphApp {
    data_dir: PathBuf,
    datasets: Vec<PathBuf>,
    current_dataset: Option<PathBuf>,
    state: AppState,
    /// In-flight dataset switch or reload; the previous scene stays live
    /// until the worker reports back.
    switch_rx: Option<(PathBuf, Receiver<Result<CourseGraph, String>>)>,
    /// Bumped once per installed dataset; salts egui widget ids so state
    /// from a torn-down graph can never leak into the new scene.
    epoch: u64,
}

enum AppState {
    Loading {
        rx: Receiver<Result<CourseGraph, String>>,
    },
    Ready(Box<ViewModel>),
    Error(String),
}

struct ViewModel {
    graph: CourseGraph,
    epoch: u64,
    config: GraphConfig,
    search: String,
    /// Identity of the course shown in the detail overlay. Set only by a
    /// node click; cleared only by the overlay's Close or a dataset swap.
    selected: Option<String>,
    overlay_open: bool,
    overlay_anchor: Pos2,
    overlay_reposition: bool,
    pan: Vec2,
    zoom: f32,
    alpha: f32,
    alpha_target: f32,
    dragged_node: Option<usize>,
    show_grid: bool,
    graph_dirty: bool,
    render_revision: u64,
    render_graph: Option<RenderGraph>,
    search_match_cache: Option<SearchMatchCache>,
    /// Non-fatal notice shown in the top bar (e.g. a failed reload that
    /// left the current scene intact).
    status: Option<String>,
}

struct SearchMatchCache {
    query: String,
    revision: u64,
    matches: Arc<HashSet<usize>>,
}

/// Simulation counterpart of one course. Position and velocity belong to
/// the layout engine; `pinned` belongs to the drag interaction while a drag
/// is active and overrides integration on both axes.
struct SimNode {
    code: String,
    pos: Vec2,
    vel: Vec2,
    pinned: Option<Vec2>,
}

struct RenderGraph {
    nodes: Vec<SimNode>,
    /// Resolved link indices, canonical direction dependent -> prerequisite.
    links: Vec<(usize, usize)>,
    /// Reversed counterpart of every link; drives arrowhead orientation
    /// only and never feeds force computation.
    arrow_links: Vec<(usize, usize)>,
    index_by_code: HashMap<String, usize>,
    scratch: PhysicsScratch,
}

#[derive(Default)]
struct PhysicsScratch {
    forces: Vec<Vec2>,
    positions: Vec<Vec2>,
    screen_positions: Vec<Pos2>,
}

impl CourseGraphApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        data_dir: PathBuf,
        dataset: Option<PathBuf>,
    ) -> Self {
        let datasets = match list_datasets(&data_dir) {
            Ok(datasets) => datasets,
            Err(error) => {
                log::warn!("{error:#}");
                Vec::new()
            }
        };

        let current_dataset = dataset.or_else(|| datasets.first().cloned());
        let state = match &current_dataset {
            Some(path) => AppState::Loading {
                rx: Self::spawn_load(path.clone()),
            },
            None => AppState::Error(format!(
                "No course datasets found in {}. Pass a JSON file or --data-dir.",
                data_dir.display()
            )),
        };

        Self {
            data_dir,
            datasets,
            current_dataset,
            state,
            switch_rx: None,
            epoch: 0,
        }
    }

    fn spawn_load(path: PathBuf) -> Receiver<Result<CourseGraph, String>> {
        let (tx, rx) = mpsc::channel();

        thread::spawn(move || {
            let result = load_course_graph(&path).map_err(|error| format!("{error:#}"));
            let _ = tx.send(result);
        });

        rx
    }

    fn install_graph(&mut self, path: PathBuf, graph: CourseGraph) {
        self.epoch += 1;
        self.current_dataset = Some(path);
        self.state = AppState::Ready(Box::new(ViewModel::new(graph, self.epoch)));
    }
}

impl eframe::App for CourseGraphApp {
    fn update(&mut self, ctx: &Context, _frame: &mut eframe::Frame) {
        let mut installed: Option<(PathBuf, CourseGraph)> = None;
        let mut next_state: Option<AppState> = None;

        match &mut self.state {
            AppState::Loading { rx } => {
                match rx.try_recv() {
                    Ok(Ok(graph)) => {
                        let path = self
                            .current_dataset
                            .clone()
                            .unwrap_or_else(|| self.data_dir.clone());
                        installed = Some((path, graph));
                    }
                    Ok(Err(error)) => {
                        log::error!("initial load failed: {error}");
                        next_state = Some(AppState::Error(error));
                    }
                    Err(TryRecvError::Empty) => {}
                    Err(TryRecvError::Disconnected) => {
                        next_state = Some(AppState::Error(
                            "Dataset load worker disconnected".to_owned(),
                        ));
                    }
                }

                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.vertical_centered(|ui| {
                        ui.add_space(120.0);
                        ui.heading("Loading course graph...");
                        ui.add_space(8.0);
                        ui.spinner();
                    });
                });
            }
            AppState::Error(error) => {
                let mut retry = false;
                egui::CentralPanel::default().show(ctx, |ui| {
                    ui.heading("Failed to load course dataset");
                    ui.add_space(6.0);
                    ui.label(error.as_str());
                    ui.add_space(10.0);
                    if self.current_dataset.is_some() && ui.button("Retry").clicked() {
                        retry = true;
                    }
                });

                if retry && let Some(path) = self.current_dataset.clone() {
                    next_state = Some(AppState::Loading {
                        rx: Self::spawn_load(path),
                    });
                }
            }
            AppState::Ready(model) => {
                let mut reload_requested = false;
                let mut switch_request = None;
                model.show(
                    ctx,
                    &self.datasets,
                    self.current_dataset.as_deref(),
                    self.switch_rx.is_some(),
                    &mut reload_requested,
                    &mut switch_request,
                );

                let requested = switch_request.or_else(|| {
                    (reload_requested && self.switch_rx.is_none())
                        .then(|| self.current_dataset.clone())
                        .flatten()
                });
                if let Some(path) = requested {
                    // Replacing the slot drops any previous receiver,
                    // cancelling interest in a superseded load.
                    self.switch_rx = Some((path.clone(), Self::spawn_load(path)));
                }

                if let Some((path, rx)) = self.switch_rx.take() {
                    match rx.try_recv() {
                        Ok(Ok(graph)) => installed = Some((path, graph)),
                        Ok(Err(error)) => {
                            // Switch failed: the current scene stays intact
                            // and the notice lands in the top bar.
                            log::error!("loading {} failed: {error}", path.display());
                            model.status = Some(error);
                        }
                        Err(TryRecvError::Empty) => {
                            self.switch_rx = Some((path, rx));
                        }
                        Err(TryRecvError::Disconnected) => {
                            log::error!("dataset load worker disconnected");
                            model.status = Some("Dataset load worker disconnected".to_owned());
                        }
                    }
                }
            }
        }

        if let Some((path, graph)) = installed {
            self.switch_rx = None;
            self.install_graph(path, graph);
        } else if let Some(state) = next_state {
            self.switch_rx = None;
            self.state = state;
        }
    }
}
