use std::env;
use std::hint::black_box;
use std::process;
use std::time::Instant;

use avl_tree::AvlTree;

const DEFAULT_N: usize = 10_000;

/// Fills a tree with `n` ascending inserts, then searches every value back,
/// timing both passes. Reports the elapsed times and final size on stdout
/// and returns the populated tree.
fn benchmark_tree(n: usize) -> AvlTree<usize> {
    let mut tree = AvlTree::new();

    let start = Instant::now();
    for value in 0..n {
        tree.insert(value);
    }
    let insert_time = start.elapsed();

    let start = Instant::now();
    for value in 0..n {
        black_box(tree.contains(&value));
    }
    let search_time = start.elapsed();

    println!("AVL tree benchmark (n={n}):");
    println!("  insert: {:.2}ms", insert_time.as_secs_f64() * 1000.0);
    println!("  search: {:.2}ms", search_time.as_secs_f64() * 1000.0);
    println!("  size: {}", tree.len());

    tree
}

fn main() {
    let n = match env::args().nth(1) {
        None => DEFAULT_N,
        Some(arg) => match arg.parse() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("invalid element count: {arg}");
                process::exit(1);
            }
        },
    };
    benchmark_tree(n);
}
