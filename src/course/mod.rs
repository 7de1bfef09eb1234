mod graph;
mod load;
mod parse;

pub use graph::{CourseGraph, CourseNode, LinkRecord};
pub use load::{list_datasets, load_course_graph};
pub use parse::links_from_prerequisites;
