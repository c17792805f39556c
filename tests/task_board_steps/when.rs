//! When steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use rstest_bdd_macros::when;
use taskboard::board::domain::{AssigneeFilter, CategoryId, Priority, TaskForm, TaskId};

#[when(r#"the user creates a task "{title}" with priority "{priority}" in column "{column}""#)]
fn create_task(
    world: &mut TaskBoardWorld,
    title: String,
    priority: String,
    column: String,
) -> Result<(), eyre::Report> {
    let priority = Priority::try_from(priority.as_str())?;
    let session = world.session()?;
    let (modal, form) = session.open_create(CategoryId::new(column)?)?;
    let form = TaskForm {
        title,
        priority,
        ..form
    };
    let result = session.submit(&modal, &form);
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user submits a task with an empty title in column "{column}""#)]
fn submit_empty_title(world: &mut TaskBoardWorld, column: String) -> Result<(), eyre::Report> {
    let session = world.session()?;
    let (modal, form) = session.open_create(CategoryId::new(column)?)?;
    let result = session.submit(&modal, &form);
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the user drags task "{task}" onto column "{column}""#)]
fn drag_task(world: &mut TaskBoardWorld, task: String, column: String) -> Result<(), eyre::Report> {
    let session = world.session_mut()?;
    let payload = session.drag_start(TaskId::new(task)?);
    let target = CategoryId::new(column)?;
    let _effect = session.drag_over(&target);
    let result = session.drop(target, &payload);
    world.last_result = Some(result);
    Ok(())
}

#[when(r#"the assignee filter is set to "{user}""#)]
fn set_filter(world: &mut TaskBoardWorld, user: String) {
    world.filter = AssigneeFilter::parse(&user);
}
