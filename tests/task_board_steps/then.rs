//! Then steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use rstest_bdd_macros::then;
use taskboard::board::{
    domain::{BoardView, CategoryId, ColumnView, Priority, TaskId},
    services::SessionError,
};

fn column_ids(world: &TaskBoardWorld, column: &str) -> Result<Vec<TaskId>, eyre::Report> {
    let board = world.board()?;
    let category = board
        .state()
        .category(&CategoryId::new(column)?)
        .ok_or_else(|| eyre::eyre!("column {column} missing from board"))?;
    Ok(category.task_ids().to_vec())
}

#[then(r#"column "{column}" lists a task titled "{title}""#)]
fn column_lists_title(
    world: &TaskBoardWorld,
    column: String,
    title: String,
) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let listed = column_ids(world, &column)?;
    let found = listed
        .iter()
        .filter_map(|task_id| board.state().task(task_id))
        .any(|task| task.title() == title);
    eyre::ensure!(found, "no task titled {title} in column {column}");
    Ok(())
}

#[then(r#"the task titled "{title}" has priority "{priority}""#)]
fn task_has_priority(
    world: &TaskBoardWorld,
    title: String,
    priority: String,
) -> Result<(), eyre::Report> {
    let expected = Priority::try_from(priority.as_str())?;
    let board = world.board()?;
    let task = board
        .state()
        .tasks()
        .values()
        .find(|task| task.title() == title)
        .ok_or_else(|| eyre::eyre!("no task titled {title}"))?;
    eyre::ensure!(
        task.priority() == expected,
        "expected priority {}, found {}",
        expected.as_str(),
        task.priority().as_str()
    );
    Ok(())
}

#[then(r#"column "{column}" lists task "{task}""#)]
fn column_lists_task(
    world: &TaskBoardWorld,
    column: String,
    task: String,
) -> Result<(), eyre::Report> {
    let listed = column_ids(world, &column)?;
    eyre::ensure!(
        listed.contains(&TaskId::new(task.as_str())?),
        "column {column} does not list {task}: {listed:?}"
    );
    Ok(())
}

#[then(r#"column "{column}" does not list task "{task}""#)]
fn column_does_not_list_task(
    world: &TaskBoardWorld,
    column: String,
    task: String,
) -> Result<(), eyre::Report> {
    let listed = column_ids(world, &column)?;
    eyre::ensure!(
        !listed.contains(&TaskId::new(task.as_str())?),
        "column {column} still lists {task}"
    );
    Ok(())
}

#[then(r#"the header of column "{column}" reads "{header}""#)]
fn column_header_reads(
    world: &TaskBoardWorld,
    column: String,
    header: String,
) -> Result<(), eyre::Report> {
    let board = world.board()?;
    let view = BoardView::derive(&board, &world.filter);
    let Some(ColumnView::Ready(tasks)) = view.column(&CategoryId::new(column.as_str())?) else {
        return Err(eyre::eyre!("column {column} is not renderable"));
    };
    let actual = tasks.count().to_string();
    eyre::ensure!(actual == header, "expected header {header}, found {actual}");
    Ok(())
}

#[then(r#"the form reports "{message}""#)]
fn form_reports(world: &TaskBoardWorld, message: String) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing submission result"))?;
    let Err(SessionError::Form(errors)) = result else {
        return Err(eyre::eyre!("expected form errors, got {result:?}"));
    };
    let reported = errors.errors().iter().any(|error| error.to_string() == message);
    eyre::ensure!(reported, "form did not report {message}: {errors}");
    Ok(())
}

#[then(r#"column "{column}" has no tasks"#)]
fn column_is_empty(world: &TaskBoardWorld, column: String) -> Result<(), eyre::Report> {
    let listed = column_ids(world, &column)?;
    eyre::ensure!(listed.is_empty(), "column {column} lists {listed:?}");
    Ok(())
}

#[then(r#"column "{column}" holds exactly {count:usize} task"#)]
fn column_holds_exactly(
    world: &TaskBoardWorld,
    column: String,
    count: usize,
) -> Result<(), eyre::Report> {
    let listed = column_ids(world, &column)?;
    eyre::ensure!(
        listed.len() == count,
        "column {column} lists {} tasks: {listed:?}",
        listed.len()
    );
    Ok(())
}
