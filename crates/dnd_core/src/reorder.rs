use serde::{Deserialize, Serialize};

/// A resolved move of one item within a list.
///
/// `from` is the dragged index in the list before the move, `to` is its index after the
/// move. The item ends up immediately before the entered target.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reorder<Id> {
    pub item_id: Id,
    pub from: usize,
    pub to: usize,
}

impl<Id> Reorder<Id> {
    /// Move the item in place. Every other item keeps its relative order.
    ///
    /// Indices past the end of `items` leave it untouched.
    pub fn apply<T>(&self, items: &mut [T]) {
        let (from, to) = (self.from, self.to);
        if from.max(to) >= items.len() {
            return;
        }
        if from < to {
            items[from..=to].rotate_left(1);
        } else if to < from {
            items[to..=from].rotate_right(1);
        }
    }
}

/// Resolve where the dragged item goes when the pointer enters `target`.
///
/// Returns `None` when nothing should move: no drag in progress, the target is the dragged
/// item itself, or either id is absent from `items`. Identities must be unique across the
/// list; with duplicates the first match is used.
pub fn plan_reorder<T, Id, F>(
    items: &[T],
    identify: F,
    dragged: Option<&Id>,
    target: &Id,
) -> Option<Reorder<Id>>
where
    F: Fn(&T) -> Id,
    Id: PartialEq + std::fmt::Debug,
{
    let dragged = dragged?;
    if dragged == target {
        return None;
    }

    let mut from = None;
    let mut target_ix = None;
    for (ix, item) in items.iter().enumerate() {
        let id = identify(item);
        if from.is_none() && id == *dragged {
            from = Some(ix);
        } else if target_ix.is_none() && id == *target {
            target_ix = Some(ix);
        }
        if from.is_some() && target_ix.is_some() {
            break;
        }
    }

    let (Some(from), Some(target_ix)) = (from, target_ix) else {
        tracing::debug!(
            ?dragged,
            ?target,
            found_dragged = from.is_some(),
            found_target = target_ix.is_some(),
            "reorder skipped: id not in list"
        );
        return None;
    };

    let to = if from < target_ix {
        target_ix - 1
    } else {
        target_ix
    };

    let item_id = identify(&items[from]);
    Some(Reorder { item_id, from, to })
}

/// Place the dragged item immediately before `target`.
///
/// The list is handed back unchanged whenever [`plan_reorder`] finds nothing to move.
pub fn reorder<T, Id, F>(
    mut items: Vec<T>,
    identify: F,
    dragged: Option<&Id>,
    target: &Id,
) -> Vec<T>
where
    F: Fn(&T) -> Id,
    Id: PartialEq + std::fmt::Debug,
{
    if let Some(plan) = plan_reorder(&items, identify, dragged, target) {
        plan.apply(&mut items);
    }
    items
}
