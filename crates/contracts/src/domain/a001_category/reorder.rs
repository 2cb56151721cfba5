//! Drag-and-drop reorder state.
//!
//! The controller is IO-free: it decides whether a drop is a valid move,
//! applies the optimistic change to the tree and hands back the single
//! request to send. The caller performs the request and reports the result
//! through [`ReorderController::complete`].
//!
//! Only moves within one sibling group are accepted. Dropping a node under a
//! different parent is refused.

use super::aggregate::{CategoryId, ReorderCategoryDto};
use super::tree::{group_at, group_at_mut, locate, CategoryNode};
use crate::shared::api::ApiError;
use std::collections::HashMap;

/// `(id, orders)` of a sibling group in display order, taken before the
/// optimistic move
type GroupSnapshot = Vec<(CategoryId, i32)>;

#[derive(Debug, Clone, PartialEq)]
pub enum ReorderOutcome {
    /// Backend accepted; the optimistic state stands
    Confirmed,
    /// Backend rejected; the sibling group was restored from its snapshot
    RolledBack { error: ApiError },
    /// No reorder was in flight for this subject
    Ignored,
}

#[derive(Debug, Default, Clone)]
pub struct ReorderController {
    dragging: Option<CategoryId>,
    hovering: Option<CategoryId>,
    in_flight: HashMap<CategoryId, GroupSnapshot>,
}

impl ReorderController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Picks up a node. Refused while that node's previous reorder is pending.
    pub fn start_drag(&mut self, id: CategoryId) -> bool {
        if self.is_reordering(id) {
            return false;
        }
        self.dragging = Some(id);
        self.hovering = None;
        true
    }

    pub fn dragging(&self) -> Option<CategoryId> {
        self.dragging
    }

    pub fn hovering(&self) -> Option<CategoryId> {
        self.hovering
    }

    pub fn hover(&mut self, target: CategoryId) {
        if self.dragging.is_some() {
            self.hovering = Some(target);
        }
    }

    pub fn leave(&mut self, target: CategoryId) {
        if self.hovering == Some(target) {
            self.hovering = None;
        }
    }

    /// Drag ended outside any valid target
    pub fn cancel_drag(&mut self) {
        self.dragging = None;
        self.hovering = None;
    }

    pub fn is_reordering(&self, id: CategoryId) -> bool {
        self.in_flight.contains_key(&id)
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    /// Whether the dragged node may land on `target`
    pub fn can_drop(&self, target: CategoryId, tree: &[CategoryNode]) -> bool {
        match self.dragging {
            Some(subject) => valid_move(tree, subject, target) && !self.is_reordering(subject),
            None => false,
        }
    }

    /// Ends the drag on `target`.
    ///
    /// Returns the one request to send, or `None` when nothing should be sent:
    /// dropped on itself, not a sibling, unknown node, or already in flight.
    /// On `Some`, the tree already shows the new order.
    pub fn drop_on(
        &mut self,
        target: CategoryId,
        tree: &mut Vec<CategoryNode>,
    ) -> Option<ReorderCategoryDto> {
        let subject = self.dragging.take()?;
        self.hovering = None;

        if self.is_reordering(subject) || !valid_move(tree, subject, target) {
            return None;
        }

        let snapshot = snapshot_group(tree, subject)?;
        let target_order = snapshot
            .iter()
            .find(|(id, _)| *id == target)
            .map(|(_, orders)| *orders)?;

        if !move_within_group(tree, subject, target) {
            return None;
        }

        self.in_flight.insert(subject, snapshot);
        Some(ReorderCategoryDto {
            category_id: subject,
            target_order,
        })
    }

    /// Clears the pending flag. A failed request restores the sibling group
    /// to its pre-drag order; the caller should still refetch the list.
    pub fn complete(
        &mut self,
        subject: CategoryId,
        result: Result<(), ApiError>,
        tree: &mut Vec<CategoryNode>,
    ) -> ReorderOutcome {
        let Some(snapshot) = self.in_flight.remove(&subject) else {
            return ReorderOutcome::Ignored;
        };
        match result {
            Ok(()) => ReorderOutcome::Confirmed,
            Err(error) => {
                restore_group(tree, &snapshot);
                ReorderOutcome::RolledBack { error }
            }
        }
    }
}

fn valid_move(tree: &[CategoryNode], subject: CategoryId, target: CategoryId) -> bool {
    if subject == target {
        return false;
    }
    match (locate(tree, subject), locate(tree, target)) {
        (Some(ps), Some(pt)) => {
            ps.len() == pt.len() && ps[..ps.len() - 1] == pt[..pt.len() - 1]
        }
        _ => false,
    }
}

fn snapshot_group(tree: &[CategoryNode], member: CategoryId) -> Option<GroupSnapshot> {
    let path = locate(tree, member)?;
    let group = group_at(tree, &path[..path.len() - 1])?;
    Some(
        group
            .iter()
            .map(|node| (node.id(), node.category.orders))
            .collect(),
    )
}

/// Moves `subject` into the slot held by `target` within their sibling group.
///
/// The group keeps the sequence of `orders` values by position: the subject
/// takes the target's value and every node it passed shifts one slot.
pub fn move_within_group(
    tree: &mut Vec<CategoryNode>,
    subject: CategoryId,
    target: CategoryId,
) -> bool {
    let (Some(ps), Some(pt)) = (locate(tree, subject), locate(tree, target)) else {
        return false;
    };
    if subject == target || ps.len() != pt.len() || ps[..ps.len() - 1] != pt[..pt.len() - 1] {
        return false;
    }
    let from = ps[ps.len() - 1];
    let to = pt[pt.len() - 1];
    let Some(group) = group_at_mut(tree, &ps[..ps.len() - 1]) else {
        return false;
    };

    let slot_orders: Vec<i32> = group.iter().map(|n| n.category.orders).collect();
    let node = group.remove(from);
    group.insert(to, node);
    for (node, orders) in group.iter_mut().zip(slot_orders) {
        node.category.orders = orders;
    }
    true
}

fn restore_group(tree: &mut Vec<CategoryNode>, snapshot: &GroupSnapshot) {
    // Any surviving member finds the group; the tree may have been refetched
    let Some(path) = snapshot.iter().find_map(|(id, _)| locate(tree.as_slice(), *id)) else {
        return;
    };
    let Some(group) = group_at_mut(tree, &path[..path.len() - 1]) else {
        return;
    };

    let position: HashMap<CategoryId, (usize, i32)> = snapshot
        .iter()
        .enumerate()
        .map(|(pos, (id, orders))| (*id, (pos, *orders)))
        .collect();

    // Unknown nodes (added by a refetch) keep their relative order at the end
    group.sort_by_key(|node| {
        position
            .get(&node.id())
            .map(|(pos, _)| *pos)
            .unwrap_or(usize::MAX)
    });
    for node in group.iter_mut() {
        if let Some((_, orders)) = position.get(&node.id()) {
            node.category.orders = *orders;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_category::aggregate::{Category, LocalizedText};
    use crate::domain::a001_category::tree::{build_tree, find, sibling_ids};

    fn cat(id: i64, parent: Option<i64>, orders: i32) -> Category {
        Category {
            id: CategoryId(id),
            name: LocalizedText::new(format!("ق{}", id), None),
            parent_id: parent.map(CategoryId),
            orders,
            products_count: 0,
            is_active: true,
            image: None,
        }
    }

    fn sample() -> Vec<CategoryNode> {
        build_tree(vec![
            cat(1, None, 0),
            cat(2, Some(1), 0),
            cat(3, Some(1), 1),
            cat(4, Some(1), 2),
            cat(5, None, 1),
            cat(6, None, 2),
        ])
    }

    fn ids(v: &[i64]) -> Vec<CategoryId> {
        v.iter().copied().map(CategoryId).collect()
    }

    fn orders_of(tree: &[CategoryNode], id: i64) -> i32 {
        find(tree, CategoryId(id)).map(|n| n.category.orders).unwrap()
    }

    #[test]
    fn test_drop_issues_single_command_with_target_order() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        assert!(ctl.start_drag(CategoryId(4)));
        let cmd = ctl.drop_on(CategoryId(2), &mut tree).unwrap();
        assert_eq!(
            cmd,
            ReorderCategoryDto {
                category_id: CategoryId(4),
                target_order: 0
            }
        );
        assert!(ctl.is_reordering(CategoryId(4)));
        assert_eq!(ctl.dragging(), None);
        // Optimistic state
        assert_eq!(sibling_ids(&tree, CategoryId(4)), ids(&[4, 2, 3]));
        assert_eq!(orders_of(&tree, 4), 0);
        assert_eq!(orders_of(&tree, 2), 1);
        assert_eq!(orders_of(&tree, 3), 2);
    }

    #[test]
    fn test_drop_on_self_issues_nothing() {
        let mut tree = sample();
        let before = tree.clone();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(3));
        assert_eq!(ctl.drop_on(CategoryId(3), &mut tree), None);
        assert_eq!(tree, before);
        assert!(!ctl.is_reordering(CategoryId(3)));
    }

    #[test]
    fn test_cross_parent_refused() {
        let mut tree = sample();
        let before = tree.clone();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(2));
        assert!(!ctl.can_drop(CategoryId(5), &tree));
        assert_eq!(ctl.drop_on(CategoryId(5), &mut tree), None);
        assert_eq!(tree, before);
    }

    #[test]
    fn test_drop_without_drag_is_noop() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        assert_eq!(ctl.drop_on(CategoryId(2), &mut tree), None);
    }

    #[test]
    fn test_in_flight_node_cannot_be_dragged_again() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(6));
        assert!(ctl.drop_on(CategoryId(1), &mut tree).is_some());
        assert!(!ctl.start_drag(CategoryId(6)));
        // Other nodes are unaffected
        assert!(ctl.start_drag(CategoryId(5)));
        assert!(ctl.can_drop(CategoryId(6), &tree));
    }

    #[test]
    fn test_move_down_shifts_passed_nodes_up() {
        let mut tree = sample();
        assert!(move_within_group(&mut tree, CategoryId(5), CategoryId(6)));
        assert_eq!(sibling_ids(&tree, CategoryId(5)), ids(&[1, 6, 5]));
        assert_eq!(orders_of(&tree, 1), 0);
        assert_eq!(orders_of(&tree, 6), 1);
        assert_eq!(orders_of(&tree, 5), 2);
    }

    #[test]
    fn test_success_keeps_optimistic_state() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(3));
        let cmd = ctl.drop_on(CategoryId(2), &mut tree).unwrap();
        let after_drop = tree.clone();
        assert_eq!(
            ctl.complete(cmd.category_id, Ok(()), &mut tree),
            ReorderOutcome::Confirmed
        );
        assert_eq!(tree, after_drop);
        assert_eq!(ctl.in_flight_count(), 0);
    }

    #[test]
    fn test_failure_rolls_back_group() {
        let mut tree = sample();
        let before = tree.clone();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(2));
        let cmd = ctl.drop_on(CategoryId(4), &mut tree).unwrap();
        assert_eq!(cmd.target_order, 2);
        assert_ne!(tree, before);

        let err = ApiError::Network("offline".into());
        let outcome = ctl.complete(cmd.category_id, Err(err.clone()), &mut tree);
        assert_eq!(outcome, ReorderOutcome::RolledBack { error: err });
        assert_eq!(tree, before);
        assert!(ctl.start_drag(CategoryId(2)));
    }

    #[test]
    fn test_complete_for_unknown_subject_is_ignored() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        assert_eq!(
            ctl.complete(CategoryId(2), Ok(()), &mut tree),
            ReorderOutcome::Ignored
        );
    }

    #[test]
    fn test_rollback_after_refetch_keeps_new_nodes() {
        let mut tree = sample();
        let mut ctl = ReorderController::new();
        ctl.start_drag(CategoryId(6));
        let cmd = ctl.drop_on(CategoryId(1), &mut tree).unwrap();

        // A refresh landed in between with an extra root
        tree = build_tree(vec![
            cat(6, None, 0),
            cat(1, None, 1),
            cat(5, None, 2),
            cat(7, None, 3),
        ]);
        ctl.complete(cmd.category_id, Err(ApiError::Unauthorized), &mut tree);
        assert_eq!(sibling_ids(&tree, CategoryId(1)), ids(&[1, 5, 6, 7]));
        assert_eq!(orders_of(&tree, 7), 3);
    }

    #[test]
    fn test_hover_tracking() {
        let mut ctl = ReorderController::new();
        ctl.hover(CategoryId(2));
        assert_eq!(ctl.hovering(), None);
        ctl.start_drag(CategoryId(3));
        ctl.hover(CategoryId(2));
        assert_eq!(ctl.hovering(), Some(CategoryId(2)));
        ctl.leave(CategoryId(4));
        assert_eq!(ctl.hovering(), Some(CategoryId(2)));
        ctl.cancel_drag();
        assert_eq!(ctl.hovering(), None);
        assert_eq!(ctl.dragging(), None);
    }
}
