//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types of the skillgraph crate.
//!
//! # Example
//!
//! ```rust,no_run
//! use skillgraph::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let project = ProjectData::from_file("path/to/project.json")?;
//! let assembly = Assembler::builder(&project)
//!     .with_id_generator(Box::new(SequentialIds::default()))
//!     .build()
//!     .assemble()?;
//!
//! for node in &assembly.nodes {
//!     println!("{} <- {:?}", node.dialog_node, node.parent);
//! }
//! # Ok(())
//! # }
//! ```

// Conversion pipeline
pub use crate::assembler::{Assembler, Assembly};
pub use crate::segment::{MessageGraph, Segment, Segmentation, Segmenter};
pub use crate::{Conversion, convert};

// Input and output models
pub use crate::dialog::{DialogNode, DialogNodeType, NodeOutput};
pub use crate::project::{Board, Entity, Intent, Message, NextMessage, ProjectData, Variable};
pub use crate::skill::SkillDocument;

// Rendering
pub use crate::render::platforms::{PlatformRegistry, PlatformRenderer};
pub use crate::render::{ContentKind, OutputRenderer};

// Configuration and ids
pub use crate::ids::{IdGenerator, RandomIds, SequentialIds};
pub use crate::options::ExportOptions;

// Error types
pub use crate::error::{ConversionError, ConversionWarning, StorageError};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
