//! Arena-backed decision tree and its traversal.

use std::collections::HashMap;
use std::fmt;
use std::io;

use generational_arena::{Arena, Index};
use tracing::{debug, info, instrument, trace};

use crate::domain::condition::{Condition, Oracle};

/// Handle of a node inside a [`DecisionTree`].
pub type NodeId = Index;

/// Destination for action effects.
pub trait EffectSink {
    /// Emit one line of output.
    fn emit(&mut self, text: &str) -> io::Result<()>;
}

impl EffectSink for Vec<String> {
    fn emit(&mut self, text: &str) -> io::Result<()> {
        self.push(text.to_string());
        Ok(())
    }
}

/// Internal node: a condition plus two optional child links.
#[derive(Debug, Clone)]
pub struct DecisionNode {
    pub condition: Condition,
    pub branch_yes: Option<NodeId>,
    pub branch_no: Option<NodeId>,
}

impl DecisionNode {
    pub fn new(condition: Condition) -> Self {
        Self {
            condition,
            branch_yes: None,
            branch_no: None,
        }
    }

    /// Child selected by `answer`.
    pub fn branch(&self, answer: bool) -> Option<NodeId> {
        if answer {
            self.branch_yes
        } else {
            self.branch_no
        }
    }
}

/// Terminal node carrying the text it displays when performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionNode {
    pub text: String,
}

impl ActionNode {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Perform the terminal effect.
    pub fn act<S: EffectSink + ?Sized>(&self, sink: &mut S) -> io::Result<()> {
        sink.emit(&self.text)
    }
}

#[derive(Debug, Clone)]
pub enum Node {
    Decision(DecisionNode),
    Action(ActionNode),
}

impl Node {
    /// Short human-readable description.
    pub fn label(&self) -> String {
        match self {
            Node::Decision(decision) => decision.condition.to_string(),
            Node::Action(action) => action.text.clone(),
        }
    }
}

/// Reference to an action node reached by a traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionRef<'a> {
    id: NodeId,
    node: &'a ActionNode,
}

impl<'a> ActionRef<'a> {
    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn text(&self) -> &'a str {
        &self.node.text
    }

    pub fn act<S: EffectSink + ?Sized>(&self, sink: &mut S) -> io::Result<()> {
        self.node.act(sink)
    }
}

impl fmt::Display for ActionRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.node.text)
    }
}

/// One evaluated decision: the node and the branch it chose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Step {
    pub node: NodeId,
    pub answer: bool,
}

/// Record of a traversal: the answered steps and the action reached, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk<'a> {
    pub steps: Vec<Step>,
    pub action: Option<ActionRef<'a>>,
}

impl Walk<'_> {
    pub fn answers(&self) -> impl Iterator<Item = bool> + '_ {
        self.steps.iter().map(|step| step.answer)
    }

    /// True when the walk stopped at an unset branch.
    pub fn is_no_decision(&self) -> bool {
        self.action.is_none()
    }
}

/// Static decision tree.
///
/// Nodes live in a generational arena and refer to their children by index,
/// so a node may be shared by several parents. Trees are built with
/// [`TreeBuilder`](crate::domain::TreeBuilder), which guarantees every link
/// resolves and that no cycle is reachable from the root.
#[derive(Debug, Clone)]
pub struct DecisionTree {
    arena: Arena<Node>,
    root: NodeId,
}

impl DecisionTree {
    pub(crate) fn from_parts(arena: Arena<Node>, root: NodeId) -> Self {
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn len(&self) -> usize {
        self.arena.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arena.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.arena.get(id)
    }

    pub fn action(&self, id: NodeId) -> Option<ActionRef<'_>> {
        match self.arena.get(id) {
            Some(Node::Action(node)) => Some(ActionRef { id, node }),
            _ => None,
        }
    }

    /// All action nodes, in arena order.
    pub fn actions(&self) -> impl Iterator<Item = ActionRef<'_>> {
        self.arena.iter().filter_map(|(id, node)| match node {
            Node::Action(node) => Some(ActionRef { id, node }),
            Node::Decision(_) => None,
        })
    }

    /// Walk from the root to a terminal action.
    ///
    /// Returns `Ok(None)` when the walk reaches a decision whose selected
    /// branch is unset. Oracle errors abort the walk and are returned as is.
    pub fn decide<O: Oracle + ?Sized>(
        &self,
        oracle: &mut O,
    ) -> Result<Option<ActionRef<'_>>, O::Error> {
        self.decide_from(self.root, oracle)
    }

    /// Walk from `start`. An action start returns itself without consulting the oracle.
    pub fn decide_from<O: Oracle + ?Sized>(
        &self,
        start: NodeId,
        oracle: &mut O,
    ) -> Result<Option<ActionRef<'_>>, O::Error> {
        Ok(self.walk(start, oracle)?.action)
    }

    /// Walk from `start`, recording every answered decision.
    #[instrument(level = "debug", skip(self, oracle))]
    pub fn walk<O: Oracle + ?Sized>(
        &self,
        start: NodeId,
        oracle: &mut O,
    ) -> Result<Walk<'_>, O::Error> {
        let mut steps = Vec::new();
        let mut current = start;

        loop {
            match self.arena.get(current) {
                Some(Node::Action(node)) => {
                    debug!(action = %node.text, steps = steps.len(), "decision reached");
                    return Ok(Walk {
                        steps,
                        action: Some(ActionRef { id: current, node }),
                    });
                }
                Some(Node::Decision(decision)) => {
                    let answer = decision.condition.evaluate(oracle)?;
                    trace!(condition = %decision.condition, answer, "branch evaluated");
                    steps.push(Step {
                        node: current,
                        answer,
                    });
                    match decision.branch(answer) {
                        Some(next) => current = next,
                        None => {
                            info!(
                                condition = %decision.condition,
                                answer,
                                "no decision: branch unset"
                            );
                            return Ok(Walk {
                                steps,
                                action: None,
                            });
                        }
                    }
                }
                None => {
                    debug!(node = ?current, "node not in this tree");
                    return Ok(Walk {
                        steps,
                        action: None,
                    });
                }
            }
        }
    }

    /// Every root-to-outcome route, yes branches first.
    ///
    /// A route ending at an unset branch has `action == None`.
    #[instrument(level = "debug", skip(self))]
    pub fn routes(&self) -> Vec<Walk<'_>> {
        let mut routes = Vec::new();
        let mut stack = vec![(Some(self.root), Vec::new())];

        while let Some((current, steps)) = stack.pop() {
            let node = current.and_then(|id| self.arena.get(id).map(|node| (id, node)));
            match node {
                Some((id, Node::Action(node))) => routes.push(Walk {
                    steps,
                    action: Some(ActionRef { id, node }),
                }),
                Some((id, Node::Decision(decision))) => {
                    // Push "no" first so the "yes" subtree is listed first
                    for answer in [false, true] {
                        let mut next_steps = steps.clone();
                        next_steps.push(Step { node: id, answer });
                        stack.push((decision.branch(answer), next_steps));
                    }
                }
                None => routes.push(Walk {
                    steps,
                    action: None,
                }),
            }
        }

        routes
    }

    /// Number of nodes on the longest root-to-leaf path.
    ///
    /// Post-order over the reachable nodes; a shared child is measured once.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        let mut depths: HashMap<NodeId, usize> = HashMap::new();
        let mut stack = vec![(self.root, false)];

        while let Some((id, children_done)) = stack.pop() {
            if depths.contains_key(&id) {
                continue;
            }
            let depth = match self.arena.get(id) {
                Some(Node::Action(_)) => 1,
                Some(Node::Decision(decision)) => {
                    let children = [decision.branch_yes, decision.branch_no];
                    if !children_done {
                        stack.push((id, true));
                        stack.extend(children.into_iter().flatten().map(|child| (child, false)));
                        continue;
                    }
                    1 + children
                        .into_iter()
                        .flatten()
                        .map(|child| depths.get(&child).copied().unwrap_or(0))
                        .max()
                        .unwrap_or(0)
                }
                None => 0,
            };
            depths.insert(id, depth);
        }

        depths.get(&self.root).copied().unwrap_or(0)
    }
}
