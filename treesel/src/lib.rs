//! # treesel
//!
//! Selector scaffolding generation for trees of branches.
//!
//! treesel inspects the branch schema of a tree and generates a selector
//! class that reads every supported branch through a `TTreeReaderValue` or
//! `TTreeReaderArray` member, together with the include directives the
//! branch types need.
//!
//! ## Features
//!
//! - **Shape classification** - scalars, one-dimensional arrays and objects
//!   stored in containers
//! - **Include resolution** - minimal, de-duplicated include directives for
//!   container element types and declared classes
//! - **Explicit diagnostics** - unsupported branches are reported, never
//!   silently mis-read
//! - **Deterministic output** - the same tree always yields the same files
//!
//! ## Quick Start
//!
//! ```ignore
//! use treesel::prelude::*;
//!
//! let tree = parse_tree(&std::fs::read_to_string("events.xml")?)?;
//! let generator = Generator::from_tree(&tree, GeneratorConfig::new().class_name("MySelector"));
//! let mut sink = DirectorySink::create("out")?;
//! let generation = generator.run(&mut sink)?;
//!
//! for diagnostic in generation.state.diagnostics() {
//!     eprintln!("skipped {diagnostic}");
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`core`] - Reader descriptors, header directives, diagnostics
//! - [`schema`] - Tree model, class catalog and XML parsing
//! - [`codegen`] - Analysis, include resolution and selector generation

pub mod prelude;

/// Reader descriptors, header directives and diagnostics.
pub mod core {
    pub use treesel_core::*;
}

/// Tree model, class catalog and XML parsing.
pub mod schema {
    pub use treesel_schema::*;
}

/// Analysis, include resolution and selector generation.
pub mod codegen {
    pub use treesel_codegen::*;
}

/// Version of the treesel crates.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
