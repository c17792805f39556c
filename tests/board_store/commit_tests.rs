//! Commit semantics of [`InMemoryBoardStore`].

use std::sync::Arc;
use std::thread;

use crate::board_store::helpers::{column, init_tracing, stored_board, task_id};
use rstest::rstest;
use serde_json::Value;
use taskboard::board::{
    adapters::memory::InMemoryBoardStore,
    domain::{BoardState, Category, LoadedBoard, Task, transform},
    ports::{BoardUpdateError, BoardUpdater, CommitOutcome},
};

fn store_for(snapshot: &Value) -> Result<InMemoryBoardStore, eyre::Report> {
    init_tracing();
    Ok(InMemoryBoardStore::new(LoadedBoard::from_value(snapshot)?))
}

#[rstest]
fn each_change_bumps_the_revision(stored_board: Value) -> Result<(), eyre::Report> {
    let store = store_for(&stored_board)?;

    let first = store.apply_update(transform::move_task(task_id("task-1")?, column("done")?))?;
    let second = store.apply_update(transform::delete_task(task_id("task-2")?))?;

    assert_eq!(first, CommitOutcome::Committed { revision: 1 });
    assert_eq!(second, CommitOutcome::Committed { revision: 2 });
    assert_eq!(store.revision()?, 2);
    Ok(())
}

#[rstest]
fn equal_state_is_not_committed(stored_board: Value) -> Result<(), eyre::Report> {
    let store = store_for(&stored_board)?;

    let same_column =
        store.apply_update(transform::move_task(task_id("task-1")?, column("todo")?))?;
    let unknown_task = store.apply_update(transform::delete_task(task_id("task-99")?))?;

    assert_eq!(same_column, CommitOutcome::Unchanged);
    assert_eq!(unknown_task, CommitOutcome::Unchanged);
    assert_eq!(store.revision()?, 0);
    Ok(())
}

#[rstest]
fn transform_sees_state_current_at_commit(stored_board: Value) -> Result<(), eyre::Report> {
    let store = store_for(&stored_board)?;
    let pending_move = transform::move_task(task_id("task-2")?, column("done")?);

    store.apply_update(transform::delete_task(task_id("task-2")?))?;
    let outcome = store.apply_update(pending_move)?;

    assert_eq!(outcome, CommitOutcome::Unchanged);
    let board = store.snapshot()?;
    assert!(board.state().task(&task_id("task-2")?).is_none());
    let done = board
        .state()
        .category(&column("done")?)
        .ok_or_else(|| eyre::eyre!("done column missing"))?;
    assert!(done.task_ids().is_empty());
    Ok(())
}

#[rstest]
fn commit_introducing_dangling_reference_is_rejected(
    stored_board: Value,
) -> Result<(), eyre::Report> {
    let store = store_for(&stored_board)?;
    let ghost = task_id("task-ghost")?;
    let ghost_column = column("done")?;
    let corrupting: transform::BoardTransform = Box::new(move |current: &BoardState| {
        let categories = current.ordered_categories().map(|category| {
            if category.id() == &ghost_column {
                Category::new(category.id().clone(), category.title())
                    .with_task_ids([ghost.clone()])
            } else {
                category.clone()
            }
        });
        BoardState::new(
            current.tasks().values().cloned(),
            categories,
            current.category_order().to_vec(),
        )
        .unwrap_or_else(|_| current.clone())
    });

    let result = store.apply_update(corrupting);

    assert!(matches!(
        result,
        Err(BoardUpdateError::DanglingReferences(ref refs)) if refs.len() == 1
    ));
    assert_eq!(store.revision()?, 0);
    Ok(())
}

#[rstest]
fn existing_dangling_references_do_not_block_commits(
    mut stored_board: Value,
) -> Result<(), eyre::Report> {
    stored_board["categories"]["done"]["taskIds"] = serde_json::json!(["task-404"]);
    let store = store_for(&stored_board)?;

    let outcome = store.apply_update(transform::move_task(
        task_id("task-1")?,
        column("inprogress")?,
    ))?;

    assert_eq!(outcome, CommitOutcome::Committed { revision: 1 });
    Ok(())
}

#[rstest]
fn concurrent_creates_are_all_committed() -> Result<(), eyre::Report> {
    init_tracing();
    let state = BoardState::with_columns([Category::new(column("todo")?, "Todo")])?;
    let store = Arc::new(InMemoryBoardStore::from_state(state));

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let worker_store = Arc::clone(&store);
            thread::spawn(move || -> Result<CommitOutcome, eyre::Report> {
                let task = Task::new(task_id(&format!("task-{index}"))?, format!("Task {index}"))?;
                Ok(worker_store.apply_update(transform::create_task(column("todo")?, task))?)
            })
        })
        .collect();
    for handle in handles {
        handle
            .join()
            .map_err(|_| eyre::eyre!("worker thread panicked"))??;
    }

    let board = store.snapshot()?;
    let todo = board
        .state()
        .category(&column("todo")?)
        .ok_or_else(|| eyre::eyre!("todo column missing"))?;
    assert_eq!(todo.task_ids().len(), 8);
    assert_eq!(store.revision()?, 8);
    Ok(())
}
