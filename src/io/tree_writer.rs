use super::FormulaGraphWriter;
use crate::{FormulaGraph, NodeIndex};
use anyhow::{Context, Result};
use std::io::Write;

const BRANCH: &str = "├── ";
const LAST_BRANCH: &str = "└── ";
const PIPE: &str = "│   ";
const SPACE: &str = "    ";
const SHARED_MARKER: &str = " (shared)";

/// A lazy iterator over the lines of the tree rendering of a [`FormulaGraph`].
///
/// The graph is unfolded from its root, so a shared node is rendered once per occurrence.
/// Each line contains the identifier of the node between brackets followed by its value; shared nodes are marked with `(shared)`.
/// Children are introduced by `├── `, or `└── ` for the last child.
///
/// # Example
///
/// ```
/// use propsat_rs::{GraphBuilder, Parser, TreeLines};
///
/// let graph = GraphBuilder::default().build(&Parser::parse("¬p∧p").unwrap());
/// let lines = TreeLines::new(&graph).collect::<Vec<_>>();
/// assert_eq!(
///     vec![
///         "[2] ∧",
///         "├── [1] ¬",
///         "│   └── [0] p (shared)",
///         "└── [0] p (shared)",
///     ],
///     lines
/// );
/// ```
pub struct TreeLines<'a> {
    graph: &'a FormulaGraph,
    stack: Vec<PendingLine>,
}

struct PendingLine {
    node: NodeIndex,
    prefix: String,
    is_root: bool,
    is_last: bool,
}

impl<'a> TreeLines<'a> {
    /// Builds the iterator for a graph.
    #[must_use]
    pub fn new(graph: &'a FormulaGraph) -> Self {
        Self {
            graph,
            stack: vec![PendingLine {
                node: graph.root(),
                prefix: String::new(),
                is_root: true,
                is_last: true,
            }],
        }
    }
}

impl Iterator for TreeLines<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let pending = self.stack.pop()?;
        let mut line = pending.prefix.clone();
        let children_prefix = if pending.is_root {
            String::new()
        } else if pending.is_last {
            line.push_str(LAST_BRANCH);
            format!("{}{SPACE}", pending.prefix)
        } else {
            line.push_str(BRANCH);
            format!("{}{PIPE}", pending.prefix)
        };
        line.push_str(&format!(
            "[{}] {}",
            pending.node,
            self.graph.node_value(pending.node)
        ));
        if self.graph.is_shared(pending.node) {
            line.push_str(SHARED_MARKER);
        }
        let children = self.graph.nodes()[pending.node].children();
        let n_children = children.len();
        for (i, child) in children.into_iter().enumerate().rev() {
            self.stack.push(PendingLine {
                node: child,
                prefix: children_prefix.clone(),
                is_root: false,
                is_last: i == n_children - 1,
            });
        }
        Some(line)
    }
}

/// A structure used to write a [`FormulaGraph`] as an indented tree, one line per node occurrence.
///
/// See [`TreeLines`] for the format of the lines.
#[derive(Default)]
pub struct TreeWriter;

impl<W> FormulaGraphWriter<W> for TreeWriter
where
    W: Write,
{
    fn write(&self, mut writer: W, graph: &FormulaGraph) -> Result<()> {
        for line in TreeLines::new(graph) {
            writeln!(writer, "{line}").context("while writing the tree of a formula")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Parser};

    fn graph(canonical: &str) -> FormulaGraph {
        GraphBuilder::default().build(&Parser::parse(canonical).unwrap())
    }

    #[test]
    fn test_single_variable() {
        let graph = graph("p");
        assert_eq!(vec!["[0] p"], TreeLines::new(&graph).collect::<Vec<_>>());
    }

    #[test]
    fn test_nested_prefixes() {
        let graph = graph("¬(p∧q)∧r");
        assert_eq!(
            vec![
                "[5] ∧",
                "├── [3] ¬",
                "│   └── [2] ∧",
                "│       ├── [0] p",
                "│       └── [1] q",
                "└── [4] r",
            ],
            TreeLines::new(&graph).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_shared_subformula_is_unfolded() {
        let graph = graph("¬(p∧q)∧¬(p∧q)");
        let lines = TreeLines::new(&graph).collect::<Vec<_>>();
        assert_eq!(9, lines.len());
        assert_eq!(2, lines.iter().filter(|l| l.ends_with("[3] ¬ (shared)")).count());
    }

    #[test]
    fn test_iterator_is_exhausted() {
        let graph = graph("p∧q");
        let mut lines = TreeLines::new(&graph);
        assert_eq!(3, lines.by_ref().count());
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_writer() {
        let graph = graph("¬p");
        let mut buffer = Vec::new();
        TreeWriter.write(&mut buffer, &graph).unwrap();
        assert_eq!("[1] ¬\n└── [0] p\n", String::from_utf8(buffer).unwrap());
    }
}
