//! Node Rendering
//!
//! Builds Leptos views from the board's detached [`Node`] trees. Text and
//! attribute values go through Leptos, never through markup strings.

use leptos::html;
use leptos::*;

use activity_board::view::Node;

pub fn node_view(node: &Node) -> View {
    match node {
        Node::Text(text) => text.clone().into_view(),
        Node::Element {
            tag,
            attrs,
            children,
        } => {
            let mut element = html::custom(html::Custom::new(*tag));
            for (name, value) in attrs {
                element = element.attr(*name, value.clone());
            }
            for child in children {
                element = element.child(node_view(child));
            }
            element.into_view()
        }
    }
}

pub fn nodes_view(nodes: &[Node]) -> View {
    nodes.iter().map(node_view).collect_view()
}
