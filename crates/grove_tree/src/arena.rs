//! Arena allocator for parse tree nodes.
//!
//! Uses `bumpalo` for bump allocation. Every node of a tree lives in the same
//! arena, so parent links can be plain borrows and the whole tree is released
//! at once when the arena is dropped.

use bumpalo::Bump;

use crate::{ErrorNode, Node, RuleNode, TerminalNode, Token, Tree, TreeError};

/// Arena allocator for parse tree nodes.
///
/// Values placed in the arena are never dropped individually; the arena frees
/// their memory in one go. Keep heap-owning data (token text, for example)
/// outside the arena and borrow it.
///
/// # Example
///
/// ```rust
/// use grove_tree::{BasicContext, CommonToken, Tree, TreeArena};
///
/// let token = CommonToken::new(1, "x").with_index(0);
/// let arena = TreeArena::new();
///
/// let leaf = arena.terminal(&token);
/// let root = arena.rule(BasicContext::new(0), &[leaf]).unwrap();
///
/// assert_eq!(root.child_count(), 1);
/// assert!(leaf.parent().is_some());
/// ```
pub struct TreeArena {
    bump: Bump,
}

impl TreeArena {
    /// Creates a new arena allocator.
    #[inline]
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a new arena with the specified initial capacity in bytes.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bump: Bump::with_capacity(capacity),
        }
    }

    /// Allocates a value in the arena and returns a reference to it.
    #[inline]
    pub fn alloc<T>(&self, val: T) -> &T {
        self.bump.alloc(val)
    }

    /// Allocates a slice in the arena by copying from the input slice.
    #[inline]
    pub fn alloc_slice_copy<T: Copy>(&self, slice: &[T]) -> &[T] {
        self.bump.alloc_slice_copy(slice)
    }

    /// Returns the total bytes allocated in this arena.
    #[inline]
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Resets the arena, deallocating all allocated objects.
    #[inline]
    pub fn reset(&mut self) {
        self.bump.reset();
    }

    /// Allocates a detached terminal wrapping `symbol`.
    #[inline]
    pub fn terminal<'a, C, S>(&'a self, symbol: &'a S) -> &'a Node<'a, C, S> {
        self.alloc(Node::Terminal(TerminalNode::new(Some(symbol))))
    }

    /// Allocates a detached error node. `None` models a conjured token.
    #[inline]
    pub fn error<'a, C, S>(&'a self, symbol: Option<&'a S>) -> &'a Node<'a, C, S> {
        self.alloc(Node::Error(ErrorNode::new(symbol)))
    }

    /// Allocates a rule node over `children` and attaches each child to it.
    ///
    /// Fails with [`TreeError::AlreadyAttached`] if any child already has a
    /// parent or appears more than once; in that case no child is modified.
    pub fn rule<'a, C, S: Token>(
        &'a self,
        context: C,
        children: &[&'a Node<'a, C, S>],
    ) -> Result<&'a Node<'a, C, S>, TreeError> {
        check_detached(children)?;

        let children = self.alloc_slice_copy(children);
        let node = self.alloc(Node::Rule(RuleNode::new(context, children)));
        if let Node::Rule(rule) = node {
            for child in children {
                child.set_parent(rule)?;
            }
        }
        Ok(node)
    }
}

/// Checks that `children` can all be attached to one new rule node.
pub(crate) fn check_detached<'a, C: 'a, S: 'a>(
    children: &[&'a Node<'a, C, S>],
) -> Result<(), TreeError> {
    for (i, child) in children.iter().enumerate() {
        let repeated = children[..i].iter().any(|prev| std::ptr::eq(*prev, *child));
        if repeated || child.parent().is_some() {
            return Err(TreeError::AlreadyAttached);
        }
    }
    Ok(())
}

impl Default for TreeArena {
    fn default() -> Self {
        Self::new()
    }
}
