//! End-to-end session flows over the in-memory store.

use crate::board_store::helpers::{column, open_session, stored_board, task_id};
use rstest::rstest;
use serde_json::Value;
use taskboard::board::{
    domain::{
        AssigneeFilter, BoardView, ColumnView, DropEffect, Priority, TaskField, TaskForm, UserId,
    },
    ports::{BoardUpdater, CommitOutcome, ConfirmationPrompt},
    services::{DeleteOutcome, SessionError},
};

/// Prompt that answers every question the same way and records it.
struct ScriptedPrompt {
    answer: bool,
    asked: std::cell::RefCell<Vec<String>>,
}

impl ScriptedPrompt {
    fn answering(answer: bool) -> Self {
        Self {
            answer,
            asked: std::cell::RefCell::new(Vec::new()),
        }
    }
}

impl ConfirmationPrompt for ScriptedPrompt {
    fn confirm(&self, message: &str) -> bool {
        self.asked.borrow_mut().push(message.to_owned());
        self.answer
    }
}

#[rstest]
fn created_task_shows_up_in_the_view(stored_board: Value) -> Result<(), eyre::Report> {
    let (store, session) = open_session(&stored_board)?;

    let (modal, _) = session.open_create(column("done")?)?;
    let form = TaskForm::new("Design Review")
        .with_priority(Priority::High)
        .with_assignee("user-1")
        .with_due_date("2026-12-01");
    session.submit(&modal, &form)?;

    let board = store.snapshot()?;
    let view = BoardView::derive(&board, &AssigneeFilter::All);
    let Some(ColumnView::Ready(done)) = view.column(&column("done")?) else {
        return Err(eyre::eyre!("done column is not renderable"));
    };
    let titles: Vec<&str> = done.tasks().iter().map(|task| task.title()).collect();
    assert_eq!(titles, vec!["Design Review"]);
    assert_eq!(done.count().to_string(), "(1)");
    Ok(())
}

#[rstest]
fn rejected_form_reports_field_messages(stored_board: Value) -> Result<(), eyre::Report> {
    let (store, session) = open_session(&stored_board)?;
    let (modal, _) = session.open_create(column("todo")?)?;

    let form = TaskForm::new("").with_assignee("user-7");
    let Err(SessionError::Form(errors)) = session.submit(&modal, &form) else {
        return Err(eyre::eyre!("expected form errors"));
    };

    assert!(errors.for_field(TaskField::Title).is_some());
    assert!(errors.for_field(TaskField::Assignee).is_some());
    assert_eq!(store.revision()?, 0);
    Ok(())
}

#[rstest]
fn edit_flow_round_trips_through_the_form(stored_board: Value) -> Result<(), eyre::Report> {
    let (store, session) = open_session(&stored_board)?;

    let (modal, form) = session.open_edit(task_id("task-4")?)?;
    assert_eq!(form.title, "Rechnung stellen");
    assert_eq!(form.assignee, "user-1");

    let edited = form.with_priority(Priority::Urgent).with_assignee("");
    let outcome = session.submit(&modal, &edited)?;
    assert_eq!(outcome, CommitOutcome::Committed { revision: 1 });

    let board = store.snapshot()?;
    let task = board
        .state()
        .task(&task_id("task-4")?)
        .ok_or_else(|| eyre::eyre!("task-4 missing"))?;
    assert_eq!(task.priority(), Priority::Urgent);
    assert!(task.assignee().is_none());
    assert_eq!(board.state().column_of(task.id()), Some(&column("inprogress")?));
    Ok(())
}

#[rstest]
fn unchanged_edit_commits_nothing(stored_board: Value) -> Result<(), eyre::Report> {
    let (store, session) = open_session(&stored_board)?;

    let (modal, form) = session.open_edit(task_id("task-2")?)?;
    let outcome = session.submit(&modal, &form)?;

    assert_eq!(outcome, CommitOutcome::Unchanged);
    assert_eq!(store.revision()?, 0);
    Ok(())
}

#[rstest]
#[case(true)]
#[case(false)]
fn delete_follows_the_user_answer(
    stored_board: Value,
    #[case] answer: bool,
) -> Result<(), eyre::Report> {
    let (store, session) = open_session(&stored_board)?;
    let prompt = ScriptedPrompt::answering(answer);

    let outcome = session.delete_task(&task_id("task-3")?, &prompt)?;

    assert_eq!(
        prompt.asked.borrow().as_slice(),
        ["Möchten Sie die Aufgabe \"Baustelle begehen\" wirklich löschen?"]
    );
    let still_there = store.snapshot()?.state().task(&task_id("task-3")?).is_some();
    if answer {
        assert_eq!(
            outcome,
            DeleteOutcome::Deleted(CommitOutcome::Committed { revision: 1 })
        );
        assert!(!still_there);
    } else {
        assert_eq!(outcome, DeleteOutcome::Cancelled);
        assert!(still_there);
    }
    Ok(())
}

#[rstest]
fn drag_moves_task_and_filter_counts_follow(stored_board: Value) -> Result<(), eyre::Report> {
    let (store, mut session) = open_session(&stored_board)?;

    let payload = session.drag_start(task_id("task-1")?);
    assert_eq!(session.drag_over(&column("done")?), DropEffect::Move);
    session.drop(column("done")?, &payload)?;

    let board = store.snapshot()?;
    let filter = AssigneeFilter::Assignee(UserId::new("user-3")?);
    let view = BoardView::derive(&board, &filter);
    let counts: Vec<String> = view
        .columns()
        .iter()
        .filter_map(|column_view| match column_view {
            ColumnView::Ready(tasks) => Some(tasks.count().to_string()),
            ColumnView::Malformed(_) => None,
        })
        .collect();
    assert_eq!(counts, vec!["(1 / 2)", "(0 / 1)", "(1 / 1)"]);
    Ok(())
}
