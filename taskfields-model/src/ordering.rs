//! Pure reordering over any identified, ordered collection.
//!
//! One implementation serves every ranked list in the system — columns,
//! draft columns, and analogous lists like project phases. Ranks carry no
//! meaning beyond relative position: they are recomputed as `index + 1` on
//! every full reorder, so stale or gappy ranks never corrupt anything and a
//! partially persisted reorder self-heals on the next read.

use thiserror::Error;

use crate::types::{Column, ColumnId};

/// Errors from the pure ordering algorithms.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// The moved or target item is not in the collection.
    #[error("item not found in collection: {id}")]
    ItemNotFound { id: String },
}

/// Result type for ordering operations.
pub type Result<T> = std::result::Result<T, OrderingError>;

/// Direction for single-step moves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Toward the front of the list (lower rank).
    Up,
    /// Toward the back of the list (higher rank).
    Down,
}

/// An item that can be ranked within a collection.
pub trait Orderable {
    type Id: Eq + Ord + Clone + std::fmt::Display;

    fn order_id(&self) -> Self::Id;
    fn order(&self) -> i64;
    fn set_order(&mut self, order: i64);
}

impl Orderable for Column {
    type Id = ColumnId;

    fn order_id(&self) -> ColumnId {
        self.id.clone()
    }

    fn order(&self) -> i64 {
        self.order
    }

    fn set_order(&mut self, order: i64) {
        self.order = order;
    }
}

/// Sort into display order: rank ascending, ties broken by id ascending.
pub fn sort_by_rank<T: Orderable>(items: &mut [T]) {
    items.sort_by(|a, b| {
        a.order()
            .cmp(&b.order())
            .then_with(|| a.order_id().cmp(&b.order_id()))
    });
}

/// Move `moved` immediately before `target`'s former position and recompute
/// every rank as `index + 1`.
///
/// Returns the ids whose rank actually changed — the caller persists exactly
/// those rows.
pub fn reorder<T: Orderable>(items: &mut Vec<T>, moved: &T::Id, target: &T::Id) -> Result<Vec<T::Id>> {
    sort_by_rank(items);

    let moved_idx = position_of(items, moved)?;
    // Dropping an item onto its own position changes nothing
    if moved == target {
        return Ok(Vec::new());
    }
    let item = items.remove(moved_idx);
    let target_idx = position_of(items, target)?;
    items.insert(target_idx, item);

    Ok(reindex(items))
}

/// Swap ranks with the immediate neighbor in `direction`. No-op at the
/// boundary: the first item cannot move up, the last cannot move down.
pub fn move_adjacent<T: Orderable>(
    items: &mut [T],
    id: &T::Id,
    direction: Direction,
) -> Result<Vec<T::Id>> {
    sort_by_rank(items);

    let idx = position_of(items, id)?;
    let neighbor = match direction {
        Direction::Up if idx > 0 => idx - 1,
        Direction::Down if idx + 1 < items.len() => idx + 1,
        _ => return Ok(Vec::new()),
    };

    let a = items[idx].order();
    let b = items[neighbor].order();
    items[idx].set_order(b);
    items[neighbor].set_order(a);

    Ok(vec![items[idx].order_id(), items[neighbor].order_id()])
}

/// Assign `order = index + 1` across the whole slice, returning the ids
/// whose rank changed.
pub fn reindex<T: Orderable>(items: &mut [T]) -> Vec<T::Id> {
    let mut changed = Vec::new();
    for (idx, item) in items.iter_mut().enumerate() {
        let rank = idx as i64 + 1;
        if item.order() != rank {
            item.set_order(rank);
            changed.push(item.order_id());
        }
    }
    changed
}

fn position_of<T: Orderable>(items: &[T], id: &T::Id) -> Result<usize> {
    items
        .iter()
        .position(|i| i.order_id() == *id)
        .ok_or_else(|| OrderingError::ItemNotFound { id: id.to_string() })
}
