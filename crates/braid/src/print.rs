//! Debug rendering of rope structure.

use crate::node::Node;
use crate::rope::Rope;
use std::fmt::Debug;

/// Renders the tree shape (heights, populated slot counts, leaf entries),
/// one node per line, indented by depth.
pub fn print<T: Debug>(rope: &Rope<T>) -> String {
    match rope.root() {
        None => "∅".to_string(),
        Some(root) => print_node(root, ""),
    }
}

fn print_node<T: Debug>(node: &Node<T>, tab: &str) -> String {
    match node {
        Node::Leaf(leaf) => format!("leaf {:?}", leaf.entries()),
        Node::Inner(inner) => {
            let mut out = format!(
                "inner h={} children={}",
                node.height(),
                inner.children().len()
            );
            let child_tab = format!("{tab}  ");
            for child in inner.children() {
                out.push('\n');
                out.push_str(&child_tab);
                out.push_str(&print_node(child, &child_tab));
            }
            out
        }
    }
}
