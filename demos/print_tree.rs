//! Prints the tree shape after every update, reconstructed purely from the
//! read-only node view.

use std::fmt::Display;

use ordered_tree::{AvlTree, NodeRef};

fn print_node<K: Display>(node: NodeRef<'_, K>, level: usize, prefix: &str) {
    println!("{}{}{}", "\t".repeat(level), prefix, node.key());
    if let Some(left) = node.left() {
        print_node(left, level + 1, "L--- ");
    }
    if let Some(right) = node.right() {
        print_node(right, level + 1, "R--- ");
    }
}

fn print_tree<K: Ord + Display>(tree: &AvlTree<K>) {
    match tree.root() {
        None => println!("(empty tree)"),
        Some(root) => print_node(root, 0, "Root: "),
    }
}

fn main() {
    let mut tree = AvlTree::new();
    for key in [10, 20, 30, 25, 28, 27, -1] {
        tree.insert(key);
        println!("Inserted: {key}");
        print_tree(&tree);
        println!("-------------------");
    }

    for key in [10, 27] {
        tree.remove(&key);
        println!("Removed: {key}");
        print_tree(&tree);
        println!("-------------------");
    }
}
