//! Tests for DecisionTree traversal

use std::convert::Infallible;

use rstest::rstest;

use dtree::domain::{
    combat_tree, Condition, DecisionTree, NodeId, Oracle, SampleMode, ScriptedOracle, TreeBuilder,
};

/// Oracle that fails the test if consulted.
struct UntouchableOracle;

impl Oracle for UntouchableOracle {
    type Error = Infallible;

    fn coin_flip(&mut self) -> Result<bool, Self::Error> {
        panic!("oracle must not be consulted")
    }

    fn ask(&mut self, question: &str) -> Result<bool, Self::Error> {
        panic!("oracle must not be asked: {question}")
    }
}

/// Oracle whose questions fail.
struct BrokenOracle;

impl Oracle for BrokenOracle {
    type Error = String;

    fn coin_flip(&mut self) -> Result<bool, Self::Error> {
        Err("no randomness".to_string())
    }

    fn ask(&mut self, question: &str) -> Result<bool, Self::Error> {
        Err(format!("cannot ask {question}"))
    }
}

/// Decision with only a yes branch.
fn half_wired() -> (DecisionTree, NodeId) {
    let mut builder = TreeBuilder::new();
    let root = builder.add_decision(Condition::ask("Is it open?"));
    let enter = builder.add_action("Enter.");
    builder.yes(root, enter).unwrap();
    (builder.build().unwrap(), enter)
}

/// Linear chain of `n` decisions, each "yes" going one level deeper.
fn chain(n: usize) -> DecisionTree {
    let mut builder = TreeBuilder::new();
    let decisions: Vec<NodeId> = (0..n)
        .map(|i| builder.add_decision(Condition::ask(format!("level {i}?"))))
        .collect();
    let bottom = builder.add_action("bottom");
    let bail = builder.add_action("bail");
    for pair in decisions.windows(2) {
        builder.yes(pair[0], pair[1]).unwrap();
    }
    for &decision in &decisions {
        builder.no(decision, bail).unwrap();
    }
    builder.yes(decisions[n - 1], bottom).unwrap();
    builder.build().unwrap()
}

// ============================================================
// Absent-branch propagation
// ============================================================

#[test]
fn given_unset_no_branch_when_answer_is_no_then_no_decision() {
    let (tree, _) = half_wired();

    let action = tree.decide(&mut ScriptedOracle::from_keys("N")).unwrap();

    assert!(action.is_none());
}

#[test]
fn given_unset_no_branch_when_answer_is_yes_then_delegates_to_yes_branch() {
    let (tree, enter) = half_wired();

    let action = tree.decide(&mut ScriptedOracle::from_keys("Y")).unwrap();

    assert_eq!(action.map(|a| a.id()), Some(enter));
    assert_eq!(action.map(|a| a.text()), Some("Enter."));
}

#[rstest]
#[case(true)]
#[case(false)]
fn given_decision_without_branches_when_deciding_then_always_no_decision(#[case] answer: bool) {
    let mut builder = TreeBuilder::new();
    builder.add_decision(Condition::Fixed(answer));
    let tree = builder.build().unwrap();

    let walk = tree.walk(tree.root(), &mut ScriptedOracle::default()).unwrap();

    assert!(walk.is_no_decision());
    assert_eq!(walk.steps.len(), 1);
}

#[test]
fn given_no_decision_deep_in_tree_when_deciding_then_propagates_to_root() {
    let mut builder = TreeBuilder::new();
    let root = builder.add_decision(Condition::Fixed(true));
    let middle = builder.add_decision(Condition::Fixed(false));
    let done = builder.add_action("done");
    builder.yes(root, middle).unwrap();
    builder.yes(middle, done).unwrap();
    let tree = builder.build().unwrap();

    assert!(tree.decide(&mut UntouchableOracle).unwrap().is_none());
}

// ============================================================
// Leaf idempotence
// ============================================================

#[test]
fn given_action_start_when_deciding_repeatedly_then_returns_itself_without_oracle() {
    let (tree, enter) = half_wired();

    let first = tree.decide_from(enter, &mut UntouchableOracle).unwrap();
    let second = tree.decide_from(enter, &mut UntouchableOracle).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.map(|a| a.id()), Some(enter));
}

#[test]
fn given_action_when_deciding_then_act_not_invoked() {
    let (tree, enter) = half_wired();
    let mut sink: Vec<String> = Vec::new();

    for _ in 0..3 {
        tree.decide_from(enter, &mut UntouchableOracle).unwrap();
    }
    assert!(sink.is_empty());

    tree.action(enter).unwrap().act(&mut sink).unwrap();
    assert_eq!(sink, vec!["Enter.".to_string()]);
}

// ============================================================
// Determinism and termination
// ============================================================

#[test]
fn given_non_random_tree_when_deciding_twice_with_same_answers_then_same_action() {
    let tree = chain(5);

    let first = tree.decide(&mut ScriptedOracle::from_keys("YYN")).unwrap();
    let second = tree.decide(&mut ScriptedOracle::from_keys("YYN")).unwrap();

    assert_eq!(first, second);
    assert_eq!(first.map(|a| a.text()), Some("bail"));
}

#[rstest]
#[case(1)]
#[case(4)]
#[case(64)]
fn given_chain_when_answering_yes_then_evaluates_at_most_depth_conditions(#[case] n: usize) {
    let tree = chain(n);
    let mut oracle = ScriptedOracle::new(std::iter::repeat(true).take(n + 10));

    let walk = tree.walk(tree.root(), &mut oracle).unwrap();

    assert_eq!(tree.depth(), n + 1);
    assert_eq!(walk.steps.len(), n);
    assert!(walk.steps.len() < tree.depth());
    assert_eq!(walk.action.map(|a| a.text()), Some("bottom"));
    assert_eq!(oracle.remaining(), 10);
}

/// `n` decisions where both branches point at the next one, ending in one action.
fn diamond_chain(n: usize) -> DecisionTree {
    let mut builder = TreeBuilder::new();
    let decisions: Vec<NodeId> = (0..n)
        .map(|i| builder.add_decision(Condition::ask(format!("q{i}"))))
        .collect();
    let bottom = builder.add_action("bottom");
    let targets = decisions.iter().skip(1).copied().chain([bottom]);
    for (&parent, child) in decisions.iter().zip(targets) {
        builder.yes(parent, child).unwrap();
        builder.no(parent, child).unwrap();
    }
    builder.build().unwrap()
}

#[test]
fn given_deep_shared_children_when_measuring_depth_then_each_node_counted_once() {
    let tree = diamond_chain(48);
    let mut oracle = ScriptedOracle::from_keys(&"YN".repeat(24));

    assert_eq!(tree.depth(), 49);
    let walk = tree.walk(tree.root(), &mut oracle).unwrap();
    assert_eq!(walk.steps.len(), 48);
    assert_eq!(walk.action.map(|a| a.text()), Some("bottom"));
}

#[test]
fn given_predicate_conditions_when_deciding_then_no_oracle_needed() {
    let mut builder = TreeBuilder::new();
    let root = builder.add_decision(Condition::predicate("ammo > 0", || true));
    let shoot = builder.add_action("Shoot.");
    let reload = builder.add_action("Reload.");
    builder.yes(root, shoot).unwrap();
    builder.no(root, reload).unwrap();
    let tree = builder.build().unwrap();

    let action = tree.decide(&mut UntouchableOracle).unwrap();

    assert_eq!(action.map(|a| a.text()), Some("Shoot."));
}

// ============================================================
// Oracle errors
// ============================================================

#[test]
fn given_failing_oracle_when_asking_then_error_returned() {
    let (tree, _) = half_wired();

    let err = tree.decide(&mut BrokenOracle).unwrap_err();

    assert_eq!(err, "cannot ask Is it open?");
}

#[test]
fn given_failing_oracle_when_condition_is_fixed_then_walk_succeeds() {
    let mut builder = TreeBuilder::new();
    let root = builder.add_decision(Condition::Fixed(false));
    let idle = builder.add_action("Idle.");
    builder.no(root, idle).unwrap();
    let tree = builder.build().unwrap();

    assert_eq!(
        tree.decide(&mut BrokenOracle).unwrap().map(|a| a.text()),
        Some("Idle.")
    );
}

#[test]
fn given_random_condition_when_deciding_then_uses_coin_flip() {
    let mut builder = TreeBuilder::new();
    let root = builder.add_decision(Condition::Random);
    let heads = builder.add_action("heads");
    let tails = builder.add_action("tails");
    builder.yes(root, heads).unwrap();
    builder.no(root, tails).unwrap();
    let tree = builder.build().unwrap();

    let mut oracle = ScriptedOracle::new([false, true]);
    assert_eq!(tree.decide(&mut oracle).unwrap().map(|a| a.text()), Some("tails"));
    assert_eq!(tree.decide(&mut oracle).unwrap().map(|a| a.text()), Some("heads"));
    assert!(oracle.asked().is_empty());
    assert!(tree.decide(&mut BrokenOracle).is_err());
}

#[test]
fn given_shared_tree_when_walking_on_threads_then_walks_are_independent() {
    let tree = combat_tree(SampleMode::Interactive).unwrap();

    let results: Vec<Option<String>> = std::thread::scope(|scope| {
        let handles: Vec<_> = ["NY", "NN", "YNN"]
            .into_iter()
            .map(|keys| {
                let tree = &tree;
                scope.spawn(move || {
                    tree.decide(&mut ScriptedOracle::from_keys(keys))
                        .unwrap()
                        .map(|a| a.text().to_string())
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(
        results,
        vec![
            Some("A1. Seek out enemies.".to_string()),
            Some("A2. Seek out health packs.".to_string()),
            Some("A4. Run away from enemy.".to_string()),
        ]
    );
}
