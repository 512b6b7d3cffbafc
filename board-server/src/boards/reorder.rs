//! Drag-and-drop planning
//!
//! Translates a drag result (source list + index, optional destination list
//! + index) into the minimal persistence operation that realizes it:
//!
//! - no destination: the drop was cancelled, nothing to do;
//! - same list: splice the moved task to its new index and renumber the
//!   whole sequence 0..n-1 in one batch;
//! - different list: append the task at the end of the destination (the
//!   destination index is deliberately not honored) and re-pack the source.
//!
//! The planner is pure: it reads task snapshots and produces a [`DragPlan`],
//! leaving execution to the gateway.

use serde::{Deserialize, Serialize};
use surrealdb::sql::Thing;
use thiserror::Error;

use crate::db::models::Task;

/// One end of a drag gesture
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub list_id: String,
    pub index: usize,
}

/// A completed drag gesture; `destination` is `None` when the drop landed
/// outside any droppable area
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DragResult {
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

/// The persistence operation a drag maps to
#[derive(Debug, Clone, PartialEq)]
pub enum DragPlan {
    /// Cancelled drop: zero persistence calls
    NoOp,
    /// Renumber one list along the given sequence
    SameList { list: Thing, ordered: Vec<Thing> },
    /// Re-parent one task and re-pack its source list
    CrossList {
        task: Thing,
        source_list: Thing,
        dest_list: Thing,
        new_order: i64,
        source_remaining: Vec<Thing>,
    },
}

/// Planning failures (the drag did not match the current snapshot)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("source index {index} out of range: list {list} has {len} tasks")]
    SourceIndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },

    #[error("task at index {index} of list {list} has no id")]
    UnidentifiedTask { list: String, index: usize },
}

/// Compute the plan for a drag against the current task snapshots
///
/// `source_tasks` and `dest_tasks` are the in-memory snapshots of the two
/// lists (the same slice twice for a same-list drag); both are re-sorted by
/// rank here, so callers may pass them in any order.
pub fn plan_drag(
    source_tasks: &[Task],
    dest_tasks: &[Task],
    drag: &DragResult,
) -> Result<DragPlan, DragError> {
    let Some(destination) = &drag.destination else {
        return Ok(DragPlan::NoOp);
    };

    let mut source = source_tasks.to_vec();
    source.sort_by_key(|t| t.order);

    if drag.source.index >= source.len() {
        return Err(DragError::SourceIndexOutOfRange {
            list: drag.source.list_id.clone(),
            index: drag.source.index,
            len: source.len(),
        });
    }

    if drag.source.list_id == destination.list_id {
        // Same-list move: splice and renumber. Every untouched task keeps
        // its relative position.
        let moved = source.remove(drag.source.index);
        let insert_at = destination.index.min(source.len());
        source.insert(insert_at, moved);

        let ordered = ids_of(&source, &drag.source.list_id)?;
        return Ok(DragPlan::SameList {
            list: source[0].list.clone(),
            ordered,
        });
    }

    // Cross-list move: the task lands at the end of the destination,
    // whatever the gesture's destination index said; the source re-packs.
    let moved = source.remove(drag.source.index);
    let task = moved.id.clone().ok_or_else(|| DragError::UnidentifiedTask {
        list: drag.source.list_id.clone(),
        index: drag.source.index,
    })?;

    let source_remaining = ids_of(&source, &drag.source.list_id)?;
    Ok(DragPlan::CrossList {
        task,
        source_list: moved.list.clone(),
        dest_list: dest_list_thing(dest_tasks, &destination.list_id),
        new_order: dest_tasks.len() as i64,
        source_remaining,
    })
}

fn ids_of(tasks: &[Task], list: &str) -> Result<Vec<Thing>, DragError> {
    tasks
        .iter()
        .enumerate()
        .map(|(index, t)| {
            t.id.clone().ok_or_else(|| DragError::UnidentifiedTask {
                list: list.to_string(),
                index,
            })
        })
        .collect()
}

/// The destination list id, from its tasks when it has any (authoritative)
/// or parsed from the drag payload when it is empty
fn dest_list_thing(dest_tasks: &[Task], list_id: &str) -> Thing {
    use crate::db::repository::{LIST_TABLE, make_thing};
    dest_tasks
        .first()
        .map(|t| t.list.clone())
        .unwrap_or_else(|| make_thing(LIST_TABLE, list_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::make_thing;

    fn task(id: &str, list: &str, order: i64) -> Task {
        Task {
            id: Some(make_thing("task", id)),
            title: format!("Task {id}"),
            labels: Vec::new(),
            order,
            created_at: 0,
            list: make_thing("list", list),
        }
    }

    fn drag(src_list: &str, src_index: usize, dest: Option<(&str, usize)>) -> DragResult {
        DragResult {
            source: DragLocation {
                list_id: src_list.to_string(),
                index: src_index,
            },
            destination: dest.map(|(list_id, index)| DragLocation {
                list_id: list_id.to_string(),
                index,
            }),
        }
    }

    #[test]
    fn cancelled_drop_is_a_noop() {
        let tasks = vec![task("a", "x", 0), task("b", "x", 1)];
        let plan = plan_drag(&tasks, &tasks, &drag("x", 0, None)).unwrap();
        assert_eq!(plan, DragPlan::NoOp);
    }

    #[test]
    fn same_list_move_preserves_untouched_relative_order() {
        // [A(0), B(1), C(2), D(3)], move index 0 to index 2
        let tasks = vec![
            task("a", "x", 0),
            task("b", "x", 1),
            task("c", "x", 2),
            task("d", "x", 3),
        ];
        let plan = plan_drag(&tasks, &tasks, &drag("x", 0, Some(("x", 2)))).unwrap();

        let DragPlan::SameList { ordered, .. } = plan else {
            panic!("expected a same-list plan");
        };
        let ids: Vec<String> = ordered.iter().map(|t| t.to_string()).collect();
        // B and C keep their relative order, A lands between C and D
        assert_eq!(ids, vec!["task:b", "task:c", "task:a", "task:d"]);
    }

    #[test]
    fn same_list_plan_sorts_unsorted_snapshots_first() {
        let tasks = vec![task("c", "x", 2), task("a", "x", 0), task("b", "x", 1)];
        let plan = plan_drag(&tasks, &tasks, &drag("x", 2, Some(("x", 0)))).unwrap();

        let DragPlan::SameList { ordered, .. } = plan else {
            panic!("expected a same-list plan");
        };
        let ids: Vec<String> = ordered.iter().map(|t| t.to_string()).collect();
        assert_eq!(ids, vec!["task:c", "task:a", "task:b"]);
    }

    #[test]
    fn destination_index_clamps_to_list_end() {
        let tasks = vec![task("a", "x", 0), task("b", "x", 1)];
        let plan = plan_drag(&tasks, &tasks, &drag("x", 0, Some(("x", 99)))).unwrap();

        let DragPlan::SameList { ordered, .. } = plan else {
            panic!("expected a same-list plan");
        };
        let ids: Vec<String> = ordered.iter().map(|t| t.to_string()).collect();
        assert_eq!(ids, vec!["task:b", "task:a"]);
    }

    #[test]
    fn cross_list_move_appends_at_destination_end() {
        let source = vec![task("a", "x", 0), task("b", "x", 1), task("c", "x", 2)];
        let dest = vec![task("p", "y", 0), task("q", "y", 1)];

        // The destination index is ignored; the task appends at the end.
        let plan = plan_drag(&source, &dest, &drag("x", 1, Some(("y", 0)))).unwrap();

        let DragPlan::CrossList {
            task: moved,
            dest_list,
            new_order,
            source_remaining,
            ..
        } = plan
        else {
            panic!("expected a cross-list plan");
        };
        assert_eq!(moved.to_string(), "task:b");
        assert_eq!(dest_list.to_string(), "list:y");
        assert_eq!(new_order, 2);

        let remaining: Vec<String> = source_remaining.iter().map(|t| t.to_string()).collect();
        assert_eq!(remaining, vec!["task:a", "task:c"]);
    }

    #[test]
    fn cross_list_move_into_empty_list_starts_at_zero() {
        let source = vec![task("a", "x", 0)];
        let plan = plan_drag(&source, &[], &drag("x", 0, Some(("y", 5)))).unwrap();

        let DragPlan::CrossList {
            new_order,
            dest_list,
            source_remaining,
            ..
        } = plan
        else {
            panic!("expected a cross-list plan");
        };
        assert_eq!(new_order, 0);
        assert_eq!(dest_list.to_string(), "list:y");
        assert!(source_remaining.is_empty());
    }

    #[test]
    fn out_of_range_source_index_is_rejected() {
        let tasks = vec![task("a", "x", 0)];
        let err = plan_drag(&tasks, &tasks, &drag("x", 3, Some(("x", 0)))).unwrap_err();
        assert!(matches!(err, DragError::SourceIndexOutOfRange { index: 3, len: 1, .. }));
    }
}
