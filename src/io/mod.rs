mod dot_writer;
pub use dot_writer::DotWriter;

mod formula_reader;

mod lexer;

mod parser;
pub use parser::Parser;

mod translator;
pub use translator::Translator;

mod tree_writer;
pub use tree_writer::TreeLines;
pub use tree_writer::TreeWriter;

use crate::FormulaGraph;
use anyhow::Result;
use std::io::Write;

/// A trait for objects that can write a [`FormulaGraph`].
pub trait FormulaGraphWriter<W: Write> {
    /// Writes a formula graph.
    ///
    /// # Errors
    ///
    /// An error is raised when an I/O exception occurs.
    fn write(&self, writer: W, graph: &FormulaGraph) -> Result<()>;
}
