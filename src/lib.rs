//! Package implement an ordered index using [red-black][wiki-rbt] tree.
//!
//! [RbTree] is meant to be embedded inside a larger storage or indexing
//! engine:
//!
//! - Each entry in RbTree instance correspond to a {Key, Value} pair.
//! - Parametrised over `key-type` and `value-type`.
//! - Duplicate keys are allowed, a new entry with an existing key is
//!   placed in the left subtree of the existing entry.
//! - Logarithmic insert() and delete(), classic bottom-up rebalancing
//!   using parent links.
//! - Nodes live in an arena owned by the tree, each node carry a
//!   process-unique id that distinguish node instances.
//! - Level ordered dump() for debugging.
//! - No Durability guarantee.
//! - Not thread safe.
//!
//! Constructing a new [RbTree] instance and mutating it:
//!
//! ```
//! use rbix::RbTree;
//!
//! let mut index: RbTree<u32, String> = RbTree::new(10, "ten".to_string());
//! assert_eq!(index.len(), 1);
//!
//! index.insert(5, "five".to_string());
//! index.insert(15, "fifteen".to_string());
//! assert_eq!(index.len(), 3);
//! assert_eq!(index.get(&5), Some(&"five".to_string()));
//!
//! let old_value = index.delete(&10).unwrap();
//! assert_eq!(old_value, "ten".to_string());
//!
//! let keys: Vec<u32> = index.iter().map(|(k, _)| *k).collect();
//! assert_eq!(keys, vec![5, 15]);
//! index.validate().unwrap();
//! ```
//!
//! [wiki-rbt]: https://en.wikipedia.org/wiki/Red%E2%80%93black_tree

use std::{error, fmt, result};

// Short form to compose Error values.
//
// Here are few possible ways:
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, msg: format!("bad argument"));
// ```
//
// ```ignore
// use crate::Error;
// err_at!(Fatal, std::fs::read(file_path), format!("read failed"));
// ```
//
macro_rules! err_at {
    ($v:ident, msg: $($arg:expr),+) => {{
        let prefix = format!("{}:{}", file!(), line!());
        Err(Error::$v(prefix, format!($($arg),+)))
    }};
    ($v:ident, $e:expr) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                Err(Error::$v(prefix, format!("{}", err)))
            }
        }
    }};
    ($v:ident, $e:expr, $($arg:expr),+) => {{
        match $e {
            Ok(val) => Ok(val),
            Err(err) => {
                let prefix = format!("{}:{}", file!(), line!());
                let msg = format!($($arg),+);
                Err(Error::$v(prefix, format!("{} {}", err, msg)))
            }
        }
    }};
}

mod dump;
pub mod id;
mod node;
mod rbtree;

pub use node::{Color, Node};
pub use rbtree::{Iter, RbTree};

/// Error variants that are returned by this package's API.
///
/// Each variant carries a prefix, typically identifying the
/// error location.
pub enum Error {
    Fatal(String, String),
    BrokenLink(String, String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        use Error::*;

        match self {
            Fatal(p, msg) => write!(f, "{} Fatal: {}", p, msg),
            BrokenLink(p, msg) => write!(f, "{} BrokenLink: {}", p, msg),
        }
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> result::Result<(), fmt::Error> {
        write!(f, "{}", self)
    }
}

impl error::Error for Error {}

/// Type alias for Result return type, used by this package.
pub type Result<T> = result::Result<T, Error>;
