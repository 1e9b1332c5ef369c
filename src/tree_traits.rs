//! Rendering of decision trees as `termtree` trees.

use termtree::Tree;
use tracing::instrument;

use crate::domain::{DecisionTree, Node, NodeId};

pub trait TreeNodeConvert {
    fn to_tree_string(&self) -> Tree<String>;
}

impl TreeNodeConvert for DecisionTree {
    #[instrument(level = "debug", skip(self))]
    fn to_tree_string(&self) -> Tree<String> {
        fn build_tree(tree: &DecisionTree, node_idx: NodeId, label: String) -> Tree<String> {
            let mut node_tree = Tree::new(label);
            if let Some(Node::Decision(decision)) = tree.node(node_idx) {
                for (prefix, branch) in [("yes", decision.branch_yes), ("no", decision.branch_no)] {
                    match branch.and_then(|child| tree.node(child).map(|node| (child, node))) {
                        Some((child_idx, child)) => {
                            let child_label = format!("{}: {}", prefix, child.label());
                            node_tree.push(build_tree(tree, child_idx, child_label));
                        }
                        None => {
                            node_tree.push(Tree::new(format!("{}: (no decision)", prefix)));
                        }
                    }
                }
            }
            node_tree
        }

        let root_label = self
            .node(self.root())
            .map(Node::label)
            .unwrap_or_else(|| "Empty tree".to_string());
        build_tree(self, self.root(), root_label)
    }
}
