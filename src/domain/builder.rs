//! Tree builder: assembles decision and action nodes into a validated tree.

use std::collections::HashMap;

use generational_arena::Arena;
use tracing::{debug, instrument};

use crate::domain::condition::Condition;
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::tree::{ActionNode, DecisionNode, DecisionTree, Node, NodeId};

/// Constructs a [`DecisionTree`] node by node.
///
/// The first node added becomes the root unless [`set_root`](Self::set_root)
/// picks another one. Branches may be left unset; reaching one during a walk
/// yields no decision.
#[derive(Debug, Default)]
pub struct TreeBuilder {
    arena: Arena<Node>,
    root: Option<NodeId>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_decision(&mut self, condition: Condition) -> NodeId {
        self.insert(Node::Decision(DecisionNode::new(condition)))
    }

    pub fn add_action(&mut self, text: impl Into<String>) -> NodeId {
        self.insert(Node::Action(ActionNode::new(text)))
    }

    fn insert(&mut self, node: Node) -> NodeId {
        let id = self.arena.insert(node);
        if self.root.is_none() {
            self.root = Some(id);
        }
        id
    }

    pub fn set_root(&mut self, id: NodeId) -> DomainResult<()> {
        if !self.arena.contains(id) {
            return Err(DomainError::UnknownNode(id));
        }
        self.root = Some(id);
        Ok(())
    }

    pub fn yes(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        self.link(parent, true, child)
    }

    pub fn no(&mut self, parent: NodeId, child: NodeId) -> DomainResult<()> {
        self.link(parent, false, child)
    }

    /// Point the `answer` branch of `parent` at `child`, replacing any previous link.
    pub fn link(&mut self, parent: NodeId, answer: bool, child: NodeId) -> DomainResult<()> {
        if !self.arena.contains(child) {
            return Err(DomainError::UnknownNode(child));
        }
        match self.arena.get_mut(parent) {
            Some(Node::Decision(decision)) => {
                if answer {
                    decision.branch_yes = Some(child);
                } else {
                    decision.branch_no = Some(child);
                }
                Ok(())
            }
            Some(Node::Action(_)) => Err(DomainError::NotADecision(parent)),
            None => Err(DomainError::UnknownNode(parent)),
        }
    }

    /// Finish assembly, rejecting cycles reachable from the root.
    #[instrument(level = "debug", skip(self))]
    pub fn build(self) -> DomainResult<DecisionTree> {
        let root = self.root.ok_or(DomainError::EmptyTree)?;
        self.check_acyclic(root)?;
        debug!(nodes = self.arena.len(), "decision tree built");
        Ok(DecisionTree::from_parts(self.arena, root))
    }

    fn check_acyclic(&self, root: NodeId) -> DomainResult<()> {
        let mut marks: HashMap<NodeId, Mark> = HashMap::new();
        // (node, children already pushed)
        let mut stack = vec![(root, false)];

        while let Some((id, expanded)) = stack.pop() {
            if expanded {
                marks.insert(id, Mark::Done);
                continue;
            }
            match marks.get(&id) {
                Some(Mark::Done) => continue,
                Some(Mark::InProgress) => return Err(DomainError::CycleDetected(id)),
                None => {}
            }
            marks.insert(id, Mark::InProgress);
            stack.push((id, true));

            if let Some(Node::Decision(decision)) = self.arena.get(id) {
                for child in [decision.branch_yes, decision.branch_no].into_iter().flatten() {
                    if marks.get(&child) == Some(&Mark::InProgress) {
                        return Err(DomainError::CycleDetected(child));
                    }
                    stack.push((child, false));
                }
            }
        }
        Ok(())
    }
}
