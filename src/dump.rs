//! Module implement level ordered dump of [RbTree], for debugging.

use std::fmt;

use crate::RbTree;

impl<K, V> RbTree<K, V> {
    /// Render every node in breadth-first order, one line per level,
    /// prefixed by the level's depth. Output is meant for humans and is
    /// not a stable format.
    ///
    /// ```
    /// use rbix::RbTree;
    ///
    /// let mut index = RbTree::new(10, "a");
    /// index.insert(5, "b");
    /// let dump = index.dump();
    /// assert_eq!(dump.lines().count(), 2);
    /// ```
    pub fn dump(&self) -> String
    where
        K: fmt::Debug,
        V: fmt::Debug,
    {
        let mut out = String::default();

        let mut level: Vec<usize> = self.root.into_iter().collect();
        let mut depth = 0;
        while !level.is_empty() {
            let items: Vec<String> = level.iter().map(|at| self.node(*at).to_string()).collect();
            out.push_str(&format!("{}: {}\n", depth, items.join(" ")));

            level = level
                .into_iter()
                .flat_map(|at| {
                    let node = self.node(at);
                    node.left.into_iter().chain(node.right)
                })
                .collect();
            depth += 1;
        }

        out
    }
}

#[cfg(test)]
#[path = "dump_test.rs"]
mod dump_test;
