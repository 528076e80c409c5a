//! Maven POM model
//!
//! Parses `pom.xml` into a mutable [`Element`] tree, edits it in memory and
//! writes it back with quick-xml.

mod coordinate;
mod document;
mod element;
mod project;

pub use coordinate::Coordinate;
pub use document::PomDocument;
pub use element::{Element, Node};
pub use project::{MavenProject, POM_FILE};
