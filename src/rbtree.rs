//! Module provide ordered index implemented by [RbTree] type.
//!
//! RbTree is the classic [red-black][wiki-rbt] tree, rebalanced bottom-up
//! using parent links. Nodes are held in an arena owned by the tree and
//! linked by their arena index.
//!
//! - Each entry in RbTree instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - insert() never overwrites, duplicate keys collect to the left.
//! - delete() removes one entry matching the key, if any.
//! - Full table scan, to iterate over all entries in key order.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use log::{debug, trace};

use std::{
    borrow::Borrow,
    cmp::{Ord, Ordering},
    fmt,
};

use crate::{
    node::{Color, Node},
    Error, Result,
};

/// RbTree manage a single instance of in-memory ordered index using
/// [red-black][rbt] tree.
///
/// [rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree
#[derive(Clone)]
pub struct RbTree<K, V> {
    nodes: Vec<Option<Node<K, V>>>,
    free: Vec<usize>, // vacated slots in `nodes`.
    pub(crate) root: Option<usize>,
    n_count: usize, // number of entries in the tree.
}

impl<K, V> Extend<(K, V)> for RbTree<K, V>
where
    K: Ord,
{
    fn extend<I>(&mut self, iter: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        iter.into_iter().for_each(|(key, value)| self.insert(key, value));
    }
}

impl<K, V> RbTree<K, V> {
    /// Create a new instance of RbTree, seeded with a single black root.
    pub fn new(key: K, value: V) -> RbTree<K, V> {
        let mut tree = RbTree {
            nodes: Vec::default(),
            free: Vec::default(),
            root: None,
            n_count: Default::default(),
        };
        let root = tree.alloc(Node::new(key, value, Color::Black));
        tree.root = Some(root);
        tree.n_count = 1;
        tree
    }
}

/// Maintenance API.
impl<K, V> RbTree<K, V> {
    /// Return number of entries in this instance.
    #[inline]
    pub fn len(&self) -> usize {
        self.n_count
    }

    /// Check whether this index is empty. Only possible after the last
    /// entry is deleted.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.n_count == 0
    }

    /// Return the root node, None if the tree is empty.
    pub fn root(&self) -> Option<&Node<K, V>> {
        self.root.map(|at| self.node(at))
    }
}

impl<K, V> RbTree<K, V> {
    /// Insert a new entry. There can be more than one entry for the same
    /// key, the new entry is placed in the left subtree of an existing
    /// entry with equal key.
    pub fn insert(&mut self, key: K, value: V)
    where
        K: Ord,
    {
        let mut parent = None;
        let mut cursor = self.root;
        while let Some(at) = cursor {
            parent = Some(at);
            let node = self.node(at);
            cursor = if node.as_key().ge(&key) {
                node.left
            } else {
                node.right
            };
        }
        let to_left = parent.map_or(false, |p| self.node(p).as_key().ge(&key));

        let mut node = Node::new(key, value, Color::Red);
        node.parent = parent;
        let at = self.alloc(node);
        match parent {
            Some(p) if to_left => self.node_mut(p).left = Some(at),
            Some(p) => self.node_mut(p).right = Some(at),
            None => self.root = Some(at),
        }
        self.n_count += 1;

        self.insert_fixup(at);
        if let Some(root) = self.root {
            self.node_mut(root).set_black();
        }
    }

    /// Delete one entry matching key and return its value. If key is not
    /// present, then delete is a no-op.
    pub fn delete<Q>(&mut self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let found = match self.find(key) {
            Some(found) => found,
            None => {
                debug!("delete(): key not found, nothing to delete");
                return None;
            }
        };

        // with two children, excise the in-order successor instead.
        let target = match (self.node(found).left, self.node(found).right) {
            (Some(_), Some(right)) => self.leftmost(right),
            _ => found,
        };

        let (left, right) = (self.node(target).left, self.node(target).right);
        let child = left.or(right);
        let parent = self.node(target).parent;
        if let Some(child) = child {
            self.node_mut(child).parent = parent;
        }
        self.replace_child(parent, target, child);

        let successor = !self.is_same(found, Some(target));
        let removed = self.release(target);
        self.n_count -= 1;
        let color = removed.to_color();

        let value = if successor {
            trace!("delete(): successor {} replaces {}", removed.to_id(), found);
            let (key, value) = removed.into_entry();
            self.node_mut(found).set_entry(key, value).1
        } else {
            removed.into_entry().1
        };

        if color == Color::Black {
            self.delete_fixup(child, parent);
        }
        Some(value)
    }

    /// Validate red-black tree with following rules:
    ///
    /// * Root node is black.
    /// * From root to any leaf, no consecutive reds allowed in its path.
    /// * Number of blacks should be same under left child and right child.
    /// * Parent link of every node points back to the node holding it.
    /// * Make sure keys are in sorted order.
    ///
    /// Return the black-height of the tree.
    pub fn validate(&self) -> Result<usize>
    where
        K: Ord + fmt::Debug,
    {
        let root = match self.root {
            Some(root) => root,
            None if self.n_count == 0 => return Ok(0),
            None => return err_at!(Fatal, msg: "empty tree with {} entries", self.n_count),
        };

        let node = self.node(root);
        if node.is_red() {
            return err_at!(Fatal, msg: "red root {:?}", node.as_key());
        }
        if let Some(parent) = node.parent {
            return err_at!(BrokenLink, msg: "root {} with parent {}", root, parent);
        }

        let (n_blacks, n_nodes) = self.validate_tree(Some(root), None, false, 0)?;
        if n_nodes != self.n_count {
            return err_at!(Fatal, msg: "found {} nodes, count {}", n_nodes, self.n_count);
        }

        let mut iter = self.iter();
        if let Some((mut prev, _)) = iter.next() {
            for (key, _) in iter {
                if key.lt(prev) {
                    return err_at!(Fatal, msg: "sort key:{:?} after:{:?}", key, prev);
                }
                prev = key;
            }
        }

        Ok(n_blacks)
    }
}

impl<K, V> RbTree<K, V> {
    /// Get the value for key. When there are multiple entries for the
    /// key, return the one closest to the root.
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|at| self.node(at).as_value())
    }

    /// Return an iterator over all entries in this instance, in key order.
    pub fn iter(&self) -> Iter<K, V> {
        let mut paths = Vec::default();
        build_iter(self, self.root, &mut paths);

        Iter { tree: self, paths }
    }

    fn find<Q>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut cursor = self.root;
        while let Some(at) = cursor {
            let node = self.node(at);
            cursor = match node.as_key().borrow().cmp(key) {
                Ordering::Less => node.right,
                Ordering::Greater => node.left,
                Ordering::Equal => return Some(at),
            };
        }
        None
    }

    fn leftmost(&self, mut at: usize) -> usize {
        while let Some(left) = self.node(at).left {
            at = left;
        }
        at
    }

    fn validate_tree(
        &self,
        at: Option<usize>,
        parent: Option<usize>,
        fromred: bool,
        mut n_blacks: usize,
    ) -> Result<(usize, usize)>
    where
        K: fmt::Debug,
    {
        let at = match at {
            Some(at) => at,
            None => return Ok((n_blacks, 0)),
        };
        let node = self.node(at);

        if node.parent != parent {
            let (key, p) = (node.as_key(), node.parent);
            return err_at!(BrokenLink, msg: "key:{:?} parent:{:?} expected:{:?}", key, p, parent);
        }

        let red = node.is_red();
        if fromred && red {
            return err_at!(Fatal, msg: "consecutive reds at key:{:?}", node.as_key());
        }

        if !red {
            n_blacks += 1;
        }

        let (lblacks, lnodes) = self.validate_tree(node.left, Some(at), red, n_blacks)?;
        let (rblacks, rnodes) = self.validate_tree(node.right, Some(at), red, n_blacks)?;
        if lblacks != rblacks {
            return err_at!(Fatal, msg: "unbalanced blacks {} {}", lblacks, rblacks);
        }

        Ok((lblacks, lnodes + rnodes + 1))
    }
}

//--------- rebalancing after insert and delete ----------------

#[derive(Clone, Copy, Debug, PartialEq)]
enum Side {
    Left,
    Right,
}

impl Side {
    fn flip(self) -> Side {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl<K, V> RbTree<K, V> {
    fn insert_fixup(&mut self, mut at: usize) {
        loop {
            // red-red violation can only be right below a red parent.
            let mut parent = match self.node(at).parent {
                Some(parent) if self.node(parent).is_red() => parent,
                _ => break,
            };
            // a red parent is never the root.
            let grand = match self.node(parent).parent {
                Some(grand) => grand,
                None => break,
            };

            let side = if self.is_same(parent, self.node(grand).left) {
                Side::Left
            } else {
                Side::Right
            };

            let uncle = self.child(grand, side.flip());
            match uncle {
                Some(uncle) if self.node(uncle).is_red() => {
                    trace!("insert_fixup(): red uncle {:?} at {}", side, grand);
                    self.node_mut(parent).set_black();
                    self.node_mut(uncle).set_black();
                    self.node_mut(grand).set_red();
                    at = grand;
                }
                _ => {
                    trace!("insert_fixup(): black uncle {:?} at {}", side, grand);
                    if self.is_same(at, self.child(parent, side.flip())) {
                        self.rotate(parent, side);
                        std::mem::swap(&mut at, &mut parent);
                    }
                    self.node_mut(parent).set_black();
                    self.node_mut(grand).set_red();
                    self.rotate(grand, side.flip());
                }
            }
        }
    }

    // `at` is the child that took the place of a removed black node, it
    // is short one black. It can be absent, hence the separate `parent`.
    fn delete_fixup(&mut self, mut at: Option<usize>, mut parent: Option<usize>) {
        while let Some(p) = parent {
            if self.is_red(at) {
                break;
            }

            let side = match at {
                Some(x) if self.is_same(x, self.node(p).left) => Side::Left,
                Some(_) => Side::Right,
                None if self.node(p).left.is_none() => Side::Left,
                None => Side::Right,
            };

            let mut sibling = self.expect_child(p, side.flip());
            if self.node(sibling).is_red() {
                trace!("delete_fixup(): red sibling {:?} at {}", side, p);
                self.node_mut(sibling).set_black();
                self.node_mut(p).set_red();
                self.rotate(p, side);
                sibling = self.expect_child(p, side.flip());
            }

            let near = self.child(sibling, side);
            let far = self.child(sibling, side.flip());
            if self.is_black(near) && self.is_black(far) {
                trace!("delete_fixup(): black nephews {:?} at {}", side, p);
                self.node_mut(sibling).set_red();
                at = Some(p);
                parent = self.node(p).parent;
                continue;
            }

            if self.is_black(far) {
                trace!("delete_fixup(): red near nephew {:?} at {}", side, p);
                if let Some(near) = near {
                    self.node_mut(near).set_black();
                }
                self.node_mut(sibling).set_red();
                self.rotate(sibling, side.flip());
                sibling = self.expect_child(p, side.flip());
            }

            trace!("delete_fixup(): red far nephew {:?} at {}", side, p);
            let color = self.node(p).to_color();
            self.node_mut(sibling).set_color(color);
            self.node_mut(p).set_black();
            let far = self.child(sibling, side.flip());
            if let Some(far) = far {
                self.node_mut(far).set_black();
            }
            self.rotate(p, side);
            at = self.root;
            break;
        }

        if let Some(at) = at {
            self.node_mut(at).set_black();
        }
    }

    // rotate `at` down towards `side`.
    fn rotate(&mut self, at: usize, side: Side) {
        match side {
            Side::Left => self.left_rotate(at),
            Side::Right => self.right_rotate(at),
        }
    }
}

//--------- rotation routines ----------------

impl<K, V> RbTree<K, V> {
    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //          left     y                 x       yr
    //                  / \               / \
    //                yl   yr         left   yl
    //
    fn left_rotate(&mut self, x: usize) {
        let y = match self.node(x).right {
            Some(y) => y,
            None => panic!(
                "left_rotate(): node {} has no right child ? Call the programmer",
                self.node(x).to_id()
            ),
        };
        trace!("left_rotate(): {} under {}", x, y);

        let yl = self.node(y).left;
        let parent = self.node(x).parent;

        self.node_mut(x).right = yl;
        if let Some(yl) = yl {
            self.node_mut(yl).parent = Some(x);
        }

        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.node_mut(y).left = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    //              (p)                       (p)
    //               |                         |
    //               x                         y
    //              / \                       / \
    //             /   \                     /   \
    //            /     \                   /     \
    //           y     right              yl       x
    //          / \                               / \
    //        yl   yr                           yr   right
    //
    fn right_rotate(&mut self, x: usize) {
        let y = match self.node(x).left {
            Some(y) => y,
            None => panic!(
                "right_rotate(): node {} has no left child ? Call the programmer",
                self.node(x).to_id()
            ),
        };
        trace!("right_rotate(): {} under {}", x, y);

        let yr = self.node(y).right;
        let parent = self.node(x).parent;

        self.node_mut(x).left = yr;
        if let Some(yr) = yr {
            self.node_mut(yr).parent = Some(x);
        }

        self.node_mut(y).parent = parent;
        self.replace_child(parent, x, Some(y));

        self.node_mut(y).right = Some(x);
        self.node_mut(x).parent = Some(y);
    }

    // make `new` take the place of `old` under `parent`, or as root when
    // `old` has no parent. Parent link of `new` is left to the caller.
    fn replace_child(&mut self, parent: Option<usize>, old: usize, new: Option<usize>) {
        match parent {
            None => self.root = new,
            Some(p) if self.is_same(old, self.node(p).left) => self.node_mut(p).left = new,
            Some(p) => self.node_mut(p).right = new,
        }
    }
}

//--------- arena and node access ----------------

impl<K, V> RbTree<K, V> {
    fn alloc(&mut self, node: Node<K, V>) -> usize {
        match self.free.pop() {
            Some(at) => {
                self.nodes[at] = Some(node);
                at
            }
            None => {
                self.nodes.push(Some(node));
                self.nodes.len() - 1
            }
        }
    }

    fn release(&mut self, at: usize) -> Node<K, V> {
        match self.nodes.get_mut(at).and_then(Option::take) {
            Some(node) => {
                self.free.push(at);
                node
            }
            None => panic!("release(): dangling node {} ? Call the programmer", at),
        }
    }

    #[inline]
    pub(crate) fn node(&self, at: usize) -> &Node<K, V> {
        match self.nodes.get(at).and_then(Option::as_ref) {
            Some(node) => node,
            None => panic!("node(): dangling node {} ? Call the programmer", at),
        }
    }

    #[inline]
    fn node_mut(&mut self, at: usize) -> &mut Node<K, V> {
        match self.nodes.get_mut(at).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("node_mut(): dangling node {} ? Call the programmer", at),
        }
    }

    #[inline]
    fn child(&self, at: usize, side: Side) -> Option<usize> {
        match side {
            Side::Left => self.node(at).left,
            Side::Right => self.node(at).right,
        }
    }

    fn expect_child(&self, at: usize, side: Side) -> usize {
        match self.child(at, side) {
            Some(child) => child,
            None => panic!("expect_child(): {} missing {:?} child", at, side),
        }
    }

    // identity check, `other` being absent is never the same.
    #[inline]
    fn is_same(&self, at: usize, other: Option<usize>) -> bool {
        self.node(at).is_same(other.map(|other| self.node(other)))
    }

    #[inline]
    fn is_red(&self, at: Option<usize>) -> bool {
        at.map_or(false, |at| self.node(at).is_red())
    }

    #[inline]
    fn is_black(&self, at: Option<usize>) -> bool {
        at.map_or(true, |at| self.node(at).is_black())
    }
}

/// Iterator over entries of RbTree, in key order.
pub struct Iter<'a, K, V> {
    tree: &'a RbTree<K, V>,
    paths: Vec<Fragment>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let tree = self.tree;
        loop {
            let path = self.paths.last_mut()?;
            match path.flag {
                IFlag::Left => {
                    path.flag = IFlag::Center;
                    let node = tree.node(path.at);
                    break Some((node.as_key(), node.as_value()));
                }
                IFlag::Center => {
                    path.flag = IFlag::Right;
                    let right = tree.node(path.at).right;
                    build_iter(tree, right, &mut self.paths)
                }
                IFlag::Right => {
                    self.paths.pop();
                }
            }
        }
    }
}

#[derive(Copy, Clone)]
enum IFlag {
    Left,
    Center,
    Right,
}

struct Fragment {
    flag: IFlag,
    at: usize,
}

fn build_iter<K, V>(tree: &RbTree<K, V>, mut node: Option<usize>, paths: &mut Vec<Fragment>) {
    while let Some(at) = node {
        paths.push(Fragment {
            flag: IFlag::Left,
            at,
        });
        node = tree.node(at).left;
    }
}

#[cfg(test)]
#[path = "rbtree_test.rs"]
mod rbtree_test;
