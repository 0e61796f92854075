//! # Skillgraph - Flow Graph to Dialog Tree Compiler
//!
//! **Skillgraph** converts a chatbot design project (intents, entities,
//! variables and a message flow graph) into an importable skill document for a
//! conversational platform whose dialog is a strict tree of nodes.
//!
//! ## Core Workflow
//!
//! 1.  **Load the Project**: Parse an exported project with [`ProjectData::from_json`]
//!     or [`ProjectData::from_file`].
//! 2.  **Segment**: The [`Segmenter`](segment::Segmenter) cuts the message graph at every
//!     intent-labeled edge. Each segment is keyed by the first message after the
//!     transition and lists the intents leading into it.
//! 3.  **Assemble**: The [`Assembler`](assembler::Assembler) walks the segments in
//!     discovery order and emits one standard node per segment, linked to its
//!     parent and previous sibling, preceded by any slot-filling nodes.
//! 4.  **Export**: [`SkillDocument`](skill::SkillDocument) wraps the nodes together with
//!     the flattened intents and entities and writes them to disk.
//!
//! [`convert`] runs steps 2 to 4 in one call.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use skillgraph::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let project = ProjectData::from_file("project.json")?;
//!     let options = ExportOptions::default().with_platform("slack");
//!
//!     let conversion = skillgraph::convert(&project, &options)?;
//!     for warning in &conversion.warnings {
//!         eprintln!("warning: {}", warning);
//!     }
//!
//!     let saved = conversion.document.save("output")?;
//!     println!("wrote {} bytes to {}", saved.bytes, saved.path.display());
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod dialog;
pub mod error;
pub mod ids;
pub mod options;
pub mod prelude;
pub mod project;
pub mod render;
pub mod segment;
pub mod skill;
pub mod text;

use assembler::Assembler;
use error::{ConversionError, ConversionWarning};
use ids::{IdGenerator, RandomIds, SequentialIds};
use options::ExportOptions;
use project::ProjectData;
use skill::SkillDocument;

/// The outcome of a successful conversion.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub document: SkillDocument,
    /// Problems the run worked around.
    pub warnings: Vec<ConversionWarning>,
}

/// Converts a project into a skill document.
pub fn convert(
    project: &ProjectData,
    options: &ExportOptions,
) -> Result<Conversion, ConversionError> {
    let mut document_ids: Box<dyn IdGenerator> = if options.deterministic_ids {
        Box::new(SequentialIds::default())
    } else {
        Box::new(RandomIds)
    };
    let node_ids: Box<dyn IdGenerator> = if options.deterministic_ids {
        Box::new(SequentialIds::default())
    } else {
        Box::new(RandomIds)
    };

    let mut builder = Assembler::builder(project).with_id_generator(node_ids);
    if let Some(platform) = &options.platform_override {
        builder = builder.with_platform(platform);
    }
    let assembly = builder.build().assemble()?;
    let warnings = assembly.warnings.clone();

    let document = SkillDocument::build(project, assembly, options, document_ids.as_mut());
    Ok(Conversion { document, warnings })
}
