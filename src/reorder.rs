//! Drag-and-drop reorder planning.
//!
//! A move arrives as a pair of indices inside a *displayed* sequence (the
//! projection of the canonical collection under some filter criteria). The
//! planner translates that into a new canonical order by resolving the moved
//! task and its destination neighbor by id, so the result stays meaningful
//! even when the displayed sequence is a filtered or re-sorted subset.

use crate::error::{Error, Result};
use crate::task::Task;

/// Compute the new canonical order for a move of `displayed[from]` to
/// position `to` within the displayed sequence.
///
/// Indices are validated against `displayed`; out-of-range indices are an
/// `InvalidArgument` error, and a same-position move returns the canonical
/// order unchanged.
pub fn plan_move(
    canonical: &[Task],
    displayed: &[Task],
    from: usize,
    to: usize,
) -> Result<Vec<Task>> {
    if from >= displayed.len() {
        return Err(Error::InvalidArgument(format!(
            "source position {} out of range (0..{})",
            from,
            displayed.len()
        )));
    }
    if to >= displayed.len() {
        return Err(Error::InvalidArgument(format!(
            "destination position {} out of range (0..{})",
            to,
            displayed.len()
        )));
    }

    if from == to {
        return Ok(canonical.to_vec());
    }

    let moved = &displayed[from];

    // Canonical order with the moved task taken out; the insertion point is
    // found relative to this, mirroring remove-then-insert semantics.
    let mut order: Vec<Task> = canonical
        .iter()
        .filter(|task| task.id != moved.id)
        .cloned()
        .collect();
    if order.len() == canonical.len() {
        return Err(Error::TaskNotFound(moved.id.clone()));
    }

    // Displayed sequence minus the moved task; `to` indexes into this.
    let rest: Vec<&Task> = displayed
        .iter()
        .filter(|task| task.id != moved.id)
        .collect();

    let insert_at = if to < rest.len() {
        // Land just before the task now occupying the destination slot.
        let neighbor = rest[to];
        order
            .iter()
            .position(|task| task.id == neighbor.id)
            .ok_or_else(|| Error::TaskNotFound(neighbor.id.clone()))?
    } else {
        // Past the end of the displayed sequence: land right after its last
        // visible task, or at the very end when nothing else is displayed.
        match rest.last() {
            Some(last) => {
                order
                    .iter()
                    .position(|task| task.id == last.id)
                    .ok_or_else(|| Error::TaskNotFound(last.id.clone()))?
                    + 1
            }
            None => order.len(),
        }
    };

    order.insert(insert_at, moved.clone());
    Ok(order)
}
