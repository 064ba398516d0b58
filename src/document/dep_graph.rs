//! Breadth-first dependency traversal over the document graph.
//!
//! Both directions return discovery order with the deepest entries last.
//! The root itself is not included, except when it participates in a
//! dependency loop and is reached again through the graph.

use rustc_hash::FxHashSet;
use crate::document::document::Document;

/// All objects `root` depends on, directly or indirectly.
pub fn all_dependencies(doc: &Document, root: &str) -> Vec<String> {
    traverse(doc, root, |doc, name| {
        doc.get_object(name)
            .map(|obj| obj.dependency_names())
            .unwrap_or_default()
    })
}

/// All objects that depend on `root`, directly or indirectly.
pub fn all_dependents(doc: &Document, root: &str) -> Vec<String> {
    traverse(doc, root, |doc, name| doc.in_list(name))
}

fn traverse(
    doc: &Document,
    root: &str,
    neighbors: impl Fn(&Document, &str) -> Vec<String>,
) -> Vec<String> {
    let mut traversing_now: Vec<String> = vec![root.to_string()];
    let mut seen: FxHashSet<String> = FxHashSet::default();
    let mut result: Vec<String> = Vec::new();

    while !traversing_now.is_empty() {
        let mut traverse_next: Vec<String> = Vec::new();
        for name in &traversing_now {
            for neighbor in neighbors(doc, name) {
                if seen.insert(neighbor.clone()) {
                    result.push(neighbor.clone());
                    traverse_next.push(neighbor);
                }
            }
        }
        traversing_now = traverse_next;
    }

    result
}
