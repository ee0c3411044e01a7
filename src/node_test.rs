use super::*;

#[test]
fn test_node() {
    let mut node: Node<u32, u32> = Node::new(10, 200, Color::Red);
    assert_eq!(node.is_red(), true);
    assert_eq!(node.left.is_none(), true);
    assert_eq!(node.right.is_none(), true);
    assert_eq!(node.parent.is_none(), true);
    assert_eq!(*node.as_key(), 10);
    assert_eq!(*node.as_value(), 200);

    node.set_black();
    assert_eq!(node.is_black(), true);
    node.set_red();
    assert_eq!(node.to_color(), Color::Red);
    node.set_color(Color::Black);
    assert_eq!(node.to_color(), Color::Black);

    let id = node.to_id();
    assert_eq!(node.set_entry(20, 300), (10, 200));
    assert_eq!(node.to_id(), id);
    assert_eq!(node.is_black(), true);
    assert_eq!(node.into_entry(), (20, 300));
}

#[test]
fn test_node_identity() {
    let a: Node<u32, &str> = Node::new(10, "x", Color::Black);
    let b: Node<u32, &str> = Node::new(10, "x", Color::Black);

    assert_ne!(a.to_id(), b.to_id());
    assert!(b.to_id() > a.to_id());
    assert_eq!(a.is_same(Some(&b)), false);
    assert_eq!(b.is_same(Some(&a)), false);
    assert_eq!(a.is_same(None), false);
    assert_eq!(a.is_same(Some(&a)), true);

    // a clone is the same instance as far as identity goes.
    let c = a.clone();
    assert_eq!(a.is_same(Some(&c)), true);
}

#[test]
fn test_node_display() {
    let node: Node<u32, &str> = Node::new(7, "seven", Color::Red);
    let refs = format!("{}:7=\"seven\":RED", node.to_id());
    assert_eq!(node.to_string(), refs);

    assert_eq!(Color::Black.to_string(), "BLACK");
    assert_eq!(Color::Red.to_string(), "RED");
}
