//! Given steps for task board BDD scenarios.

use super::world::TaskBoardWorld;
use eyre::WrapErr;
use rstest_bdd_macros::given;
use taskboard::board::domain::{BoardState, Category, CategoryId, Task, TaskId, User, UserId};
use taskboard::config::BoardConfig;

/// Builds the default columns with `tasks` placed in `column`.
fn default_board_with(column: &str, tasks: Vec<Task>) -> Result<BoardState, eyre::Report> {
    let target = CategoryId::new(column)?;
    let config = BoardConfig::default();
    let task_ids: Vec<TaskId> = tasks.iter().map(|task| task.id().clone()).collect();
    let categories = config.columns.iter().map(|configured| {
        let category = Category::new(configured.id.clone(), configured.title.clone());
        if configured.id == target {
            category.with_task_ids(task_ids.clone())
        } else {
            category
        }
    });
    let order = config.columns.iter().map(|configured| configured.id.clone()).collect();
    BoardState::new(tasks, categories, order).wrap_err("build scenario board")
}

#[given("a board with the default columns")]
fn default_columns(world: &mut TaskBoardWorld) -> Result<(), eyre::Report> {
    let state = BoardConfig::default()
        .empty_board()
        .wrap_err("build default board")?;
    world.load(state, Vec::new());
    Ok(())
}

#[given(r#"a board where column "{column}" holds task "{task}""#)]
fn column_holds_task(
    world: &mut TaskBoardWorld,
    column: String,
    task: String,
) -> Result<(), eyre::Report> {
    let record = Task::new(TaskId::new(task.as_str())?, format!("Aufgabe {task}"))?;
    let state = default_board_with(&column, vec![record])?;
    world.load(state, Vec::new());
    Ok(())
}

#[given(r#"a board where column "{column}" holds {count:usize} tasks with {assigned:usize} assigned to "{user}""#)]
fn column_holds_assigned_tasks(
    world: &mut TaskBoardWorld,
    column: String,
    count: usize,
    assigned: usize,
    user: String,
) -> Result<(), eyre::Report> {
    let user_id = UserId::new(user.as_str())?;
    let other = UserId::new("user-other")?;
    let tasks = (0..count)
        .map(|index| {
            let assignee = if index < assigned {
                user_id.clone()
            } else {
                other.clone()
            };
            Ok(Task::new(TaskId::new(format!("task-{index}"))?, format!("Aufgabe {index}"))?
                .with_assignee(Some(assignee)))
        })
        .collect::<Result<Vec<_>, eyre::Report>>()?;
    let state = default_board_with(&column, tasks)?;
    world.load(
        state,
        vec![User::new(user_id, user), User::new(other, "Andere")],
    );
    Ok(())
}
