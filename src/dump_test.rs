use crate::{Color, RbTree};

#[test]
fn test_dump() {
    let mut index: RbTree<u32, &str> = RbTree::new(10, "ten");
    index.insert(5, "five");
    index.insert(15, "fifteen");
    index.insert(3, "three");

    let root = index.root().unwrap();
    let left = index.node(root.left.unwrap());
    let right = index.node(root.right.unwrap());
    let leaf = index.node(left.left.unwrap());
    assert_eq!(leaf.to_color(), Color::Red);

    let refs = format!(
        "0: {}:10=\"ten\":BLACK\n1: {}:5=\"five\":BLACK {}:15=\"fifteen\":BLACK\n2: {}:3=\"three\":RED\n",
        root.to_id(),
        left.to_id(),
        right.to_id(),
        leaf.to_id(),
    );
    assert_eq!(index.dump(), refs);
}

#[test]
fn test_dump_empty() {
    let mut index: RbTree<u32, u32> = RbTree::new(1, 1);
    assert_eq!(index.dump().lines().count(), 1);
    assert_eq!(index.delete(&1), Some(1));
    assert_eq!(index.dump(), "");
}
