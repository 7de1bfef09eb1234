mod app;
mod course;
mod util;

use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// Directory scanned for *.json course datasets.
    #[arg(long, default_value = "./data")]
    data_dir: PathBuf,

    /// Dataset to open immediately instead of the first one found.
    dataset: Option<PathBuf>,
}

fn main() -> eframe::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    eframe::run_native(
        "course-graph",
        options,
        Box::new(move |cc| {
            Ok(Box::new(app::CourseGraphApp::new(
                cc,
                args.data_dir.clone(),
                args.dataset.clone(),
            )))
        }),
    )
}
