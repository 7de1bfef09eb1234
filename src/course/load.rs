use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use super::graph::CourseGraph;
use super::parse::parse_course_graph;

/// Reads and parses one dataset file into the canonical graph.
pub fn load_course_graph(path: &Path) -> Result<CourseGraph> {
    let label = dataset_label(path);
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read dataset {}", path.display()))?;

    let graph = parse_course_graph(&label, &raw)?;
    if graph.node_count() == 0 {
        return Err(anyhow!("{label}: dataset contains no courses"));
    }

    log::info!(
        "{label}: loaded {} courses, {} links",
        graph.node_count(),
        graph.link_count()
    );
    Ok(graph)
}

/// Enumerates the `*.json` datasets of a directory, sorted by file name,
/// to populate the dataset selector.
pub fn list_datasets(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(dir)
        .with_context(|| format!("failed to read dataset directory {}", dir.display()))?;

    let mut datasets = Vec::new();
    for entry in entries {
        let path = entry
            .with_context(|| format!("failed to enumerate {}", dir.display()))?
            .path();
        if path.extension().is_some_and(|ext| ext == "json") {
            datasets.push(path);
        }
    }

    datasets.sort();
    Ok(datasets)
}

pub(super) fn dataset_label(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("dataset")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_label_strips_directory_and_extension() {
        assert_eq!(dataset_label(Path::new("./data/fall_2023.json")), "fall_2023");
        assert_eq!(dataset_label(Path::new("plain")), "plain");
    }

    #[test]
    fn missing_file_is_an_error_not_a_panic() {
        assert!(load_course_graph(Path::new("/nonexistent/dataset.json")).is_err());
    }
}
