//! Depth-first walker driving a [`ParseTreeListener`].

use crate::{Node, RuleHooks, RuleNode, Tree};

use super::ParseTreeListener;

/// Pending work on the walker's stack.
enum Step<'a, C, S> {
    Visit(&'a Node<'a, C, S>),
    Exit(&'a RuleNode<'a, C, S>),
}

/// Walks a tree depth-first, notifying a listener.
///
/// For a rule node the listener sees `enter_every_rule` followed by the
/// context's [`RuleHooks::enter_rule`], then the children left to right, then
/// [`RuleHooks::exit_rule`] followed by `exit_every_rule`. Leaves get exactly
/// one call: `visit_error_node` for error nodes, `visit_terminal` otherwise.
///
/// The walk keeps its own stack, so tree depth is bounded by memory rather
/// than by the thread's call stack.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParseTreeWalker;

impl ParseTreeWalker {
    /// Shared walker instance.
    pub const DEFAULT: Self = Self;

    /// Walks `tree`, notifying `listener` of every node.
    pub fn walk<'a, C, S, L>(&self, listener: &mut L, tree: &'a Node<'a, C, S>)
    where
        L: ParseTreeListener<'a, C, S> + ?Sized,
        C: RuleHooks<'a, S, L>,
        S: 'a,
    {
        let mut stack = vec![Step::Visit(tree)];

        while let Some(step) = stack.pop() {
            match step {
                Step::Visit(Node::Error(node)) => listener.visit_error_node(node),
                Step::Visit(Node::Terminal(node)) => listener.visit_terminal(node),
                Step::Visit(Node::Rule(node)) => {
                    self.enter_rule(listener, node);
                    stack.push(Step::Exit(node));
                    stack.extend(node.children().iter().rev().map(|&child| Step::Visit(child)));
                }
                Step::Exit(node) => self.exit_rule(listener, node),
            }
        }
    }

    /// Fires the generic, then the rule-specific, enter event.
    pub fn enter_rule<'a, C, S, L>(&self, listener: &mut L, node: &'a RuleNode<'a, C, S>)
    where
        L: ParseTreeListener<'a, C, S> + ?Sized,
        C: RuleHooks<'a, S, L>,
        S: 'a,
    {
        listener.enter_every_rule(node);
        C::enter_rule(node, listener);
    }

    /// Fires the rule-specific, then the generic, exit event.
    pub fn exit_rule<'a, C, S, L>(&self, listener: &mut L, node: &'a RuleNode<'a, C, S>)
    where
        L: ParseTreeListener<'a, C, S> + ?Sized,
        C: RuleHooks<'a, S, L>,
        S: 'a,
    {
        C::exit_rule(node, listener);
        listener.exit_every_rule(node);
    }
}

/// Walks `tree` with the default walker.
#[inline]
pub fn walk<'a, C, S, L>(listener: &mut L, tree: &'a Node<'a, C, S>)
where
    L: ParseTreeListener<'a, C, S> + ?Sized,
    C: RuleHooks<'a, S, L>,
    S: 'a,
{
    ParseTreeWalker::DEFAULT.walk(listener, tree);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        BasicContext, CommonToken, ErrorNode, ParseTree, RuleContext, TerminalNode, TreeArena,
    };
    use pretty_assertions::assert_eq;

    const NAMES: &[&str] = &["A", "B"];

    /// Records every event as a short string.
    #[derive(Default)]
    struct Recorder {
        events: Vec<String>,
    }

    impl<'a, C: RuleContext> ParseTreeListener<'a, C, CommonToken> for Recorder {
        fn visit_terminal(&mut self, node: &'a TerminalNode<'a, C, CommonToken>) {
            self.events.push(node.to_string());
        }

        fn visit_error_node(&mut self, node: &'a ErrorNode<'a, C, CommonToken>) {
            self.events.push(format!("error {node}"));
        }

        fn enter_every_rule(&mut self, node: &'a RuleNode<'a, C, CommonToken>) {
            self.events.push(format!("Enter({})", NAMES[node.rule_index()]));
        }

        fn exit_every_rule(&mut self, node: &'a RuleNode<'a, C, CommonToken>) {
            self.events.push(format!("Exit({})", NAMES[node.rule_index()]));
        }
    }

    fn tokens() -> Vec<CommonToken> {
        vec![
            CommonToken::new(1, "x").with_index(0),
            CommonToken::new(1, "y").with_index(1),
            CommonToken::new(1, "z").with_index(2),
        ]
    }

    #[test]
    fn test_walk_scenario() {
        let arena = TreeArena::new();
        let tokens = tokens();
        let b = arena
            .rule(BasicContext::new(1), &[arena.terminal(&tokens[1])])
            .unwrap();
        let root = arena
            .rule(
                BasicContext::new(0),
                &[arena.terminal(&tokens[0]), b, arena.terminal(&tokens[2])],
            )
            .unwrap();

        let mut recorder = Recorder::default();
        walk(&mut recorder, root);

        assert_eq!(
            recorder.events,
            vec!["Enter(A)", "x", "Enter(B)", "y", "Exit(B)", "z", "Exit(A)"]
        );
        assert_eq!(root.text(), "xyz");
    }

    #[test]
    fn test_walk_leaf_root() {
        let arena = TreeArena::new();
        let tokens = tokens();
        let leaf = arena.terminal::<BasicContext, CommonToken>(&tokens[0]);
        let error = arena.error::<BasicContext, CommonToken>(Some(&tokens[1]));

        let mut recorder = Recorder::default();
        walk(&mut recorder, leaf);
        walk(&mut recorder, error);

        assert_eq!(recorder.events, vec!["x", "error y"]);
    }

    #[test]
    fn test_error_nodes_never_reach_visit_terminal() {
        let arena = TreeArena::new();
        let tokens = tokens();
        let root = arena
            .rule(
                BasicContext::new(0),
                &[arena.error(Some(&tokens[0])), arena.error(None)],
            )
            .unwrap();

        let mut recorder = Recorder::default();
        walk(&mut recorder, root);

        assert_eq!(
            recorder.events,
            vec!["Enter(A)", "error x", "error <missing>", "Exit(A)"]
        );
    }

    #[test]
    fn test_brackets_well_nested_in_deep_tree() {
        /// Tracks open rules and fails on any mismatched exit.
        #[derive(Default)]
        struct Brackets {
            open: Vec<usize>,
            max_depth: usize,
            entered: usize,
        }

        impl<'a> ParseTreeListener<'a, BasicContext, CommonToken> for Brackets {
            fn enter_every_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) {
                self.open.push(node.rule_index());
                self.entered += 1;
                self.max_depth = self.max_depth.max(self.open.len());
            }

            fn exit_every_rule(&mut self, node: &'a RuleNode<'a, BasicContext, CommonToken>) {
                assert_eq!(self.open.pop(), Some(node.rule_index()));
            }
        }

        const DEPTH: usize = 100_000;
        let arena = TreeArena::new();
        let tokens = tokens();
        let mut node = arena
            .rule(BasicContext::new(0), &[arena.terminal(&tokens[0])])
            .unwrap();
        for i in 1..DEPTH {
            node = arena.rule(BasicContext::new(i % 7), &[node]).unwrap();
        }

        let mut brackets = Brackets::default();
        ParseTreeWalker::DEFAULT.walk(&mut brackets, node);

        assert!(brackets.open.is_empty());
        assert_eq!(brackets.entered, DEPTH);
        assert_eq!(brackets.max_depth, DEPTH);
    }

    /// A context whose hooks report into a [`HookRecorder`].
    #[derive(Debug)]
    struct Hooked(usize);

    impl RuleContext for Hooked {
        fn rule_index(&self) -> usize {
            self.0
        }
    }

    #[derive(Default)]
    struct HookRecorder {
        events: Vec<String>,
    }

    impl<'a> ParseTreeListener<'a, Hooked, CommonToken> for HookRecorder {
        fn enter_every_rule(&mut self, node: &'a RuleNode<'a, Hooked, CommonToken>) {
            self.events.push(format!("enter_every {}", node.rule_index()));
        }

        fn exit_every_rule(&mut self, node: &'a RuleNode<'a, Hooked, CommonToken>) {
            self.events.push(format!("exit_every {}", node.rule_index()));
        }
    }

    impl<'a> RuleHooks<'a, CommonToken, HookRecorder> for Hooked {
        fn enter_rule(node: &'a RuleNode<'a, Self, CommonToken>, listener: &mut HookRecorder) {
            listener.events.push(format!("enter {}", node.rule_index()));
        }

        fn exit_rule(node: &'a RuleNode<'a, Self, CommonToken>, listener: &mut HookRecorder) {
            listener.events.push(format!("exit {}", node.rule_index()));
        }
    }

    #[test]
    fn test_rule_hooks_bracket_generic_events() {
        let arena = TreeArena::new();
        let inner = arena.rule::<Hooked, CommonToken>(Hooked(1), &[]).unwrap();
        let root = arena.rule(Hooked(0), &[inner]).unwrap();

        let mut recorder = HookRecorder::default();
        ParseTreeWalker::default().walk(&mut recorder, root);

        assert_eq!(
            recorder.events,
            vec![
                "enter_every 0",
                "enter 0",
                "enter_every 1",
                "enter 1",
                "exit 1",
                "exit_every 1",
                "exit 0",
                "exit_every 0",
            ]
        );
    }
}
