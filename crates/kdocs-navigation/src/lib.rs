//! Navigation for the kdocs site.
//!
//! The document hierarchy is described by a static JSON manifest
//! (`registry.json`). [`NavigationTree::build`] turns it into an immutable
//! tree, marking every leaf whose content file is missing as disabled, and
//! [`NavigationTree::locate`] finds a document together with its ancestor
//! chain for breadcrumbs.
pub mod catalog;
pub mod error;
pub mod manifest;
pub mod node;
pub mod store;
pub mod tree;

pub use catalog::Catalog;
pub use error::NavigationError;
pub use manifest::{RawDocument, load_manifest};
pub use node::NavigationNode;
pub use store::{DocumentStore, FsDocumentStore};
pub use tree::{Location, NavigationTree, ROOT_TITLE, locate_exceptional};
