//! Propagation path

use arena_dom::{DomTree, NodeId};

/// Nodes an event visits: the target, then (when it bubbles) each ancestor
/// up to and including the document node
pub fn propagation_path(tree: &DomTree, target: NodeId, bubbles: bool) -> Vec<NodeId> {
    let mut path = vec![target];
    if bubbles {
        path.extend(tree.ancestors(target));
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bubbling_path_reaches_document() {
        let mut tree = DomTree::new();
        let form = tree.create_element("form");
        let input = tree.create_element("input");
        tree.append_child(NodeId::ROOT, form).unwrap();
        tree.append_child(form, input).unwrap();

        assert_eq!(propagation_path(&tree, input, true), vec![input, form, NodeId::ROOT]);
        assert_eq!(propagation_path(&tree, input, false), vec![input]);
    }
}
