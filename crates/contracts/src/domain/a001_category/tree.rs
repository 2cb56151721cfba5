//! Flat category list → forest.
//!
//! The API returns categories as a flat list with `parent_id`. The tree is
//! rebuilt on every fetch and never sent back.

use super::aggregate::{Category, CategoryId};
use serde::Serialize;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryNode {
    pub category: Category,
    pub children: Vec<CategoryNode>,
}

impl CategoryNode {
    pub fn id(&self) -> CategoryId {
        self.category.id
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Builds the forest.
///
/// A record whose parent is missing from the input is a root, not dropped.
/// Siblings keep their relative input order. Records stuck in a parent cycle
/// (never reachable from a root) are promoted to roots after the regular
/// ones, so every input record appears exactly once.
pub fn build_tree(items: Vec<Category>) -> Vec<CategoryNode> {
    if items.is_empty() {
        return vec![];
    }

    let existing_ids: HashSet<CategoryId> = items.iter().map(|item| item.id).collect();

    // Group children by parent; unknown parents fall back to the root level
    let mut children_map: HashMap<CategoryId, Vec<usize>> = HashMap::new();
    let mut root_indexes: Vec<usize> = Vec::new();
    for (idx, item) in items.iter().enumerate() {
        match item.parent_id {
            Some(pid) if pid != item.id && existing_ids.contains(&pid) => {
                children_map.entry(pid).or_default().push(idx);
            }
            _ => root_indexes.push(idx),
        }
    }

    fn build_node(
        idx: usize,
        items: &[Category],
        children_map: &HashMap<CategoryId, Vec<usize>>,
        placed: &mut [bool],
    ) -> CategoryNode {
        placed[idx] = true;
        let mut children = Vec::new();
        if let Some(kids) = children_map.get(&items[idx].id) {
            for &kid in kids {
                if !placed[kid] {
                    children.push(build_node(kid, items, children_map, placed));
                }
            }
        }
        CategoryNode {
            category: items[idx].clone(),
            children,
        }
    }

    let mut placed = vec![false; items.len()];
    let mut roots: Vec<CategoryNode> = Vec::new();
    for idx in root_indexes {
        if !placed[idx] {
            roots.push(build_node(idx, &items, &children_map, &mut placed));
        }
    }

    // Cycle leftovers
    for idx in 0..items.len() {
        if !placed[idx] {
            roots.push(build_node(idx, &items, &children_map, &mut placed));
        }
    }

    roots
}

/// Stable sort by `orders`. Applied to the flat list before [`build_tree`],
/// it orders every sibling group while keeping input order for ties.
pub fn sort_by_orders(items: &mut [Category]) {
    items.sort_by_key(|item| item.orders);
}

/// Pre-order flattening; `build_tree(flatten(&t)) == t`
pub fn flatten(nodes: &[CategoryNode]) -> Vec<Category> {
    let mut out = Vec::new();
    fn walk(nodes: &[CategoryNode], out: &mut Vec<Category>) {
        for node in nodes {
            out.push(node.category.clone());
            walk(&node.children, out);
        }
    }
    walk(nodes, &mut out);
    out
}

/// Pre-order list of `(depth, category)`, used for indented parent pickers
pub fn outline(nodes: &[CategoryNode]) -> Vec<(usize, &Category)> {
    let mut out = Vec::new();
    fn walk<'a>(nodes: &'a [CategoryNode], depth: usize, out: &mut Vec<(usize, &'a Category)>) {
        for node in nodes {
            out.push((depth, &node.category));
            walk(&node.children, depth + 1, out);
        }
    }
    walk(nodes, 0, &mut out);
    out
}

pub fn count(nodes: &[CategoryNode]) -> usize {
    nodes.iter().map(|n| 1 + count(&n.children)).sum()
}

/// Index path from the forest root to the node
pub fn locate(nodes: &[CategoryNode], id: CategoryId) -> Option<Vec<usize>> {
    for (idx, node) in nodes.iter().enumerate() {
        if node.id() == id {
            return Some(vec![idx]);
        }
        if let Some(mut path) = locate(&node.children, id) {
            path.insert(0, idx);
            return Some(path);
        }
    }
    None
}

pub fn find(nodes: &[CategoryNode], id: CategoryId) -> Option<&CategoryNode> {
    let path = locate(nodes, id)?;
    let (last, parents) = path.split_last()?;
    let mut level = nodes;
    for &idx in parents {
        level = &level[idx].children;
    }
    level.get(*last)
}

/// Depth in the built tree (roots are 0)
pub fn depth_of(nodes: &[CategoryNode], id: CategoryId) -> Option<usize> {
    locate(nodes, id).map(|path| path.len() - 1)
}

/// True when both nodes sit in the same sibling group of the built tree.
/// Orphans promoted to the root level are siblings of the real roots.
pub fn are_siblings(nodes: &[CategoryNode], a: CategoryId, b: CategoryId) -> bool {
    match (locate(nodes, a), locate(nodes, b)) {
        (Some(pa), Some(pb)) => pa.len() == pb.len() && pa[..pa.len() - 1] == pb[..pb.len() - 1],
        _ => false,
    }
}

/// Ids of the sibling group containing `id`, in display order
pub fn sibling_ids(nodes: &[CategoryNode], id: CategoryId) -> Vec<CategoryId> {
    match locate(nodes, id) {
        Some(path) => group_at(nodes, &path[..path.len() - 1])
            .map(|group| group.iter().map(CategoryNode::id).collect())
            .unwrap_or_default(),
        None => Vec::new(),
    }
}

/// Sibling group reached by following `parent_path`
pub(crate) fn group_at<'a>(
    nodes: &'a [CategoryNode],
    parent_path: &[usize],
) -> Option<&'a [CategoryNode]> {
    let mut level = nodes;
    for &idx in parent_path {
        level = &level.get(idx)?.children;
    }
    Some(level)
}

pub(crate) fn group_at_mut<'a>(
    nodes: &'a mut Vec<CategoryNode>,
    parent_path: &[usize],
) -> Option<&'a mut Vec<CategoryNode>> {
    let mut level = nodes;
    for &idx in parent_path {
        level = &mut level.get_mut(idx)?.children;
    }
    Some(level)
}

/// The node itself plus every descendant. A category cannot be moved under
/// any of these without creating a cycle.
pub fn subtree_ids(nodes: &[CategoryNode], id: CategoryId) -> HashSet<CategoryId> {
    let mut out = HashSet::new();
    if let Some(node) = find(nodes, id) {
        fn walk(node: &CategoryNode, out: &mut HashSet<CategoryId>) {
            out.insert(node.id());
            for child in &node.children {
                walk(child, out);
            }
        }
        walk(node, &mut out);
    }
    out
}

/// Keeps nodes whose name (either language) contains `filter`, plus their
/// ancestors. An empty filter returns the forest untouched.
pub fn filter_tree(nodes: &[CategoryNode], filter: &str) -> Vec<CategoryNode> {
    let needle = filter.trim().to_lowercase();
    if needle.is_empty() {
        return nodes.to_vec();
    }

    fn walk(nodes: &[CategoryNode], needle: &str) -> Vec<CategoryNode> {
        let mut result = Vec::new();
        for node in nodes {
            let matches = node.category.name.contains_ci(needle);
            let filtered_children = walk(&node.children, needle);
            if matches || !filtered_children.is_empty() {
                result.push(CategoryNode {
                    category: node.category.clone(),
                    children: filtered_children,
                });
            }
        }
        result
    }

    walk(nodes, &needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::aggregate::LocalizedText;

    fn cat(id: i64, parent: Option<i64>, orders: i32) -> Category {
        Category {
            id: CategoryId(id),
            name: LocalizedText::new(format!("ق{}", id), Some(format!("Cat {}", id))),
            parent_id: parent.map(CategoryId),
            orders,
            products_count: 0,
            is_active: true,
            image: None,
        }
    }

    fn shape(nodes: &[CategoryNode]) -> Vec<(i64, Vec<i64>)> {
        nodes
            .iter()
            .map(|n| (n.id().value(), n.children.iter().map(|c| c.id().value()).collect()))
            .collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(build_tree(vec![]).is_empty());
    }

    #[test]
    fn test_orphan_becomes_root() {
        let tree = build_tree(vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, Some(99), 1)]);
        assert_eq!(shape(&tree), vec![(1, vec![2]), (3, vec![])]);
        assert!(tree[0].children[0].children.is_empty());
    }

    #[test]
    fn test_siblings_keep_input_order() {
        let tree = build_tree(vec![
            cat(1, None, 0),
            cat(5, Some(1), 3),
            cat(4, Some(1), 1),
            cat(6, Some(1), 2),
        ]);
        assert_eq!(shape(&tree), vec![(1, vec![5, 4, 6])]);
    }

    #[test]
    fn test_child_listed_before_parent() {
        let tree = build_tree(vec![cat(2, Some(1), 0), cat(1, None, 0)]);
        assert_eq!(shape(&tree), vec![(1, vec![2])]);
    }

    #[test]
    fn test_deep_chain() {
        let items: Vec<Category> = (1..=50)
            .map(|i| cat(i, if i == 1 { None } else { Some(i - 1) }, 0))
            .collect();
        let tree = build_tree(items);
        assert_eq!(tree.len(), 1);
        assert_eq!(count(&tree), 50);
        assert_eq!(depth_of(&tree, CategoryId(50)), Some(49));
    }

    #[test]
    fn test_total_and_idempotent() {
        let items = vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(99), 1),
            cat(4, Some(2), 0),
            cat(5, Some(1), 1),
            cat(6, None, 2),
        ];
        let tree = build_tree(items.clone());
        assert_eq!(count(&tree), items.len());

        let mut ids: Vec<i64> = flatten(&tree).iter().map(|c| c.id.value()).collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3, 4, 5, 6]);

        assert_eq!(build_tree(flatten(&tree)), tree);
        assert_eq!(build_tree(items.clone()), tree);
    }

    #[test]
    fn test_cycle_does_not_drop_records() {
        // 7 <-> 8 never reach a root
        let items = vec![cat(1, None, 0), cat(7, Some(8), 0), cat(8, Some(7), 0)];
        let tree = build_tree(items);
        assert_eq!(count(&tree), 3);
        assert_eq!(shape(&tree), vec![(1, vec![]), (7, vec![8])]);
        assert_eq!(build_tree(flatten(&tree)), tree);
    }

    #[test]
    fn test_self_parent_is_root() {
        let tree = build_tree(vec![cat(3, Some(3), 0)]);
        assert_eq!(shape(&tree), vec![(3, vec![])]);
    }

    #[test]
    fn test_sort_by_orders_then_build() {
        let mut items = vec![
            cat(1, None, 1),
            cat(2, None, 0),
            cat(3, Some(1), 2),
            cat(4, Some(1), 0),
            cat(5, Some(1), 0),
        ];
        sort_by_orders(&mut items);
        let tree = build_tree(items);
        assert_eq!(shape(&tree), vec![(2, vec![]), (1, vec![4, 5, 3])]);
    }

    #[test]
    fn test_siblings_and_lookup() {
        let tree = build_tree(vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(1), 1),
            cat(4, None, 1),
            cat(5, Some(404), 2),
        ]);
        assert!(are_siblings(&tree, CategoryId(2), CategoryId(3)));
        assert!(are_siblings(&tree, CategoryId(1), CategoryId(5)));
        assert!(!are_siblings(&tree, CategoryId(1), CategoryId(2)));
        assert!(!are_siblings(&tree, CategoryId(1), CategoryId(77)));
        assert_eq!(
            sibling_ids(&tree, CategoryId(3)),
            vec![CategoryId(2), CategoryId(3)]
        );
        assert_eq!(find(&tree, CategoryId(3)).map(|n| n.category.orders), Some(1));
        assert!(find(&tree, CategoryId(77)).is_none());
    }

    #[test]
    fn test_subtree_ids() {
        let tree = build_tree(vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(2), 0),
            cat(4, None, 1),
        ]);
        let ids = subtree_ids(&tree, CategoryId(2));
        assert!(ids.contains(&CategoryId(2)));
        assert!(ids.contains(&CategoryId(3)));
        assert!(!ids.contains(&CategoryId(1)));
        assert!(!ids.contains(&CategoryId(4)));
    }

    #[test]
    fn test_filter_keeps_ancestors() {
        let tree = build_tree(vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(1), 1),
            cat(4, None, 1),
        ]);
        let filtered = filter_tree(&tree, "cat 3");
        assert_eq!(shape(&filtered), vec![(1, vec![3])]);
        // Arabic side matches too
        let filtered = filter_tree(&tree, "ق4");
        assert_eq!(shape(&filtered), vec![(4, vec![])]);
        assert_eq!(filter_tree(&tree, "  "), tree);
    }

    #[test]
    fn test_outline_depths() {
        let tree = build_tree(vec![cat(1, None, 0), cat(2, Some(1), 0), cat(3, None, 1)]);
        let rows: Vec<(usize, i64)> = outline(&tree)
            .into_iter()
            .map(|(d, c)| (d, c.id.value()))
            .collect();
        assert_eq!(rows, vec![(0, 1), (1, 2), (0, 3)]);
    }
}
