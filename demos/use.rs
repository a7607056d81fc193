use ordered_tree::{AvlTree, BinaryTree};

fn main() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 25, 28, 27, -1] {
        tree.insert(key);
    }
    assert_eq!(tree.min(), Ok(&-1));
    assert_eq!(tree.max(), Ok(&30));
    println!("sum = {}", tree.sum());

    tree.remove(&10);
    tree.remove(&27);
    assert!(!tree.contains(&10));
    println!("sum after removals = {}", tree.sum());

    print!("{{ ");
    for key in &tree {
        print!("{key}, ");
    }
    println!("}}");

    let mut plain = BinaryTree::new();
    for key in [5, 3, 2, 4, 7, 6, 8] {
        plain.insert(key);
    }
    assert_eq!(plain.min(), Ok(&2));
    assert_eq!(plain.max(), Ok(&8));

    print!("{{ ");
    for key in &plain {
        print!("{key}, ");
    }
    println!("}}");
}
