//! Workflow Library - Reorderable palettes of the workflow editor
//!
//! This crate holds the ordered collections the editor lets users rearrange
//! by drag and drop, each wired to the shared reorder engine:
//!
//! - Node categories, and node types within a category (`NodeCatalog`)
//! - Saved node groups (`NodeGroupLibrary`)
//! - Saved sub-workflows (`SubWorkflowLibrary`)
//!
//! `LibraryPalette` owns all of them plus one `ReorderEngine`, so only a
//! single drag can be in flight across every list.
//!
//! # Example
//!
//! ```ignore
//! use workflow_library::{LibraryPalette, PaletteList};
//!
//! let mut palette = LibraryPalette::new(catalog, groups, workflows, config);
//! let payload = palette.begin_drag(PaletteList::Categories, "tool")?;
//! palette.hover(PaletteList::Categories, "input", pointer_y, rect);
//! palette.drop(&payload.encode()?);
//! ```

pub mod catalog;
pub mod error;
pub mod groups;
pub mod palette;
pub mod workflows;

// Re-export key types
pub use catalog::{CategoryEntry, NodeCatalog, NodeCategory, NodeTypeDefinition, NodeTypeEntry};
pub use error::{LibraryError, Result};
pub use groups::{GroupLibraryEntry, NodeGroupLibrary};
pub use palette::{LibraryPalette, PaletteList};
pub use workflows::{SubWorkflowLibrary, WorkflowLibraryEntry};
