use std::{fmt, mem};

use crate::id;

/// Color of a node in RbTree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    Black,
    Red,
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Color::Black => write!(f, "BLACK"),
            Color::Red => write!(f, "RED"),
        }
    }
}

/// Node corresponds to a single entry in RbTree instance.
///
/// Links are indices into the arena owned by the tree. `left` and `right`
/// own the children, `parent` is only a back-reference and is None for
/// the root.
#[derive(Clone)]
pub struct Node<K, V> {
    id: u64,
    key: K,
    value: V,
    color: Color,
    pub(crate) left: Option<usize>,   // store: left child
    pub(crate) right: Option<usize>,  // store: right child
    pub(crate) parent: Option<usize>, // store: parent
}

impl<K, V> Node<K, V> {
    /// Create a detached node, with a fresh process-unique id.
    pub fn new(key: K, value: V, color: Color) -> Node<K, V> {
        Node {
            id: id::next_id(),
            key,
            value,
            color,
            left: None,
            right: None,
            parent: None,
        }
    }

    /// Replace this node's entry, return the old entry. Node id, color and
    /// links are left untouched.
    pub(crate) fn set_entry(&mut self, key: K, value: V) -> (K, V) {
        let key = mem::replace(&mut self.key, key);
        let value = mem::replace(&mut self.value, value);
        (key, value)
    }

    pub(crate) fn into_entry(self) -> (K, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) fn set_color(&mut self, color: Color) {
        self.color = color
    }

    #[inline]
    pub(crate) fn set_red(&mut self) {
        self.color = Color::Red
    }

    #[inline]
    pub(crate) fn set_black(&mut self) {
        self.color = Color::Black
    }
}

impl<K, V> Node<K, V> {
    #[inline]
    pub fn to_id(&self) -> u64 {
        self.id
    }

    #[inline]
    pub fn as_key(&self) -> &K {
        &self.key
    }

    #[inline]
    pub fn as_value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub fn to_color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    /// Return whether `other` is this very node instance. Nodes with equal
    /// key and value are still different nodes, and an absent node is
    /// never the same.
    #[inline]
    pub fn is_same(&self, other: Option<&Node<K, V>>) -> bool {
        other.map_or(false, |other| other.id == self.id)
    }
}

impl<K, V> fmt::Display for Node<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}:{:?}={:?}:{}", self.id, self.key, self.value, self.color)
    }
}

#[cfg(test)]
#[path = "node_test.rs"]
mod node_test;
