use super::FormulaGraphWriter;
use crate::{FormulaGraph, GraphNode, NodeIndex};
use anyhow::{Context, Result};
use std::io::Write;

/// A structure used to write a [`FormulaGraph`] in the DOT format of [Graphviz](https://graphviz.org/).
///
/// Each distinct subformula gives exactly one vertex, labelled by its identifier and its value.
/// The root is drawn as a box, variables as ellipses and operators as circles; shared nodes are filled.
/// The left edge of a conjunction is solid and its right edge is dashed.
///
/// # Example
///
/// ```
/// use propsat_rs::{DotWriter, FormulaGraphWriter, GraphBuilder, Parser};
///
/// let graph = GraphBuilder::default().build(&Parser::parse("¬p").unwrap());
/// let mut buffer = Vec::new();
/// DotWriter.write(&mut buffer, &graph).unwrap();
/// let dot = String::from_utf8(buffer).unwrap();
/// assert!(dot.starts_with("digraph formula {"));
/// assert!(dot.contains("n1 -> n0;"));
/// ```
#[derive(Default)]
pub struct DotWriter;

impl<W> FormulaGraphWriter<W> for DotWriter
where
    W: Write,
{
    fn write(&self, mut writer: W, graph: &FormulaGraph) -> Result<()> {
        let context = "while writing a formula in the DOT format";
        writeln!(writer, "digraph formula {{").context(context)?;
        for (i, node) in graph.nodes().as_slice().iter().enumerate() {
            let index = NodeIndex::from(i);
            let shape = if index == graph.root() {
                "box"
            } else if let GraphNode::Variable(_) = node {
                "ellipse"
            } else {
                "circle"
            };
            let style = if graph.is_shared(index) {
                ", style=filled"
            } else {
                ""
            };
            writeln!(
                writer,
                "  n{i} [label=\"[{i}] {}\", shape={shape}{style}];",
                escape(graph.node_value(index))
            )
            .context(context)?;
        }
        for (i, node) in graph.nodes().as_slice().iter().enumerate() {
            match node {
                GraphNode::Variable(_) => {}
                GraphNode::Not(child) => writeln!(writer, "  n{i} -> n{child};").context(context)?,
                GraphNode::And(left, right) => {
                    writeln!(writer, "  n{i} -> n{left};").context(context)?;
                    writeln!(writer, "  n{i} -> n{right} [style=dashed];").context(context)?;
                }
            }
        }
        writeln!(writer, "}}").context(context)
    }
}

fn escape(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{GraphBuilder, Parser};

    fn dot(canonical: &str) -> String {
        let graph = GraphBuilder::default().build(&Parser::parse(canonical).unwrap());
        let mut buffer = Vec::new();
        DotWriter.write(&mut buffer, &graph).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_one_vertex_per_distinct_node() {
        let dot = dot("¬(p∧q)∧¬(p∧q)");
        assert_eq!(5, dot.matches("[label=").count());
        assert_eq!(
            concat!(
                "digraph formula {\n",
                "  n0 [label=\"[0] p\", shape=ellipse];\n",
                "  n1 [label=\"[1] q\", shape=ellipse];\n",
                "  n2 [label=\"[2] ∧\", shape=circle];\n",
                "  n3 [label=\"[3] ¬\", shape=circle, style=filled];\n",
                "  n4 [label=\"[4] ∧\", shape=box];\n",
                "  n2 -> n0;\n",
                "  n2 -> n1 [style=dashed];\n",
                "  n3 -> n2;\n",
                "  n4 -> n3;\n",
                "  n4 -> n3 [style=dashed];\n",
                "}\n",
            ),
            dot
        );
    }

    #[test]
    fn test_single_variable_root() {
        assert_eq!(
            "digraph formula {\n  n0 [label=\"[0] p\", shape=box];\n}\n",
            dot("p")
        );
    }
}
