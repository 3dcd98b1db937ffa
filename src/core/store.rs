//! Storage contract consumed by the session engine, and its SQLite
//! implementation on top of [`DbPool`].

use crate::db::pool::DbPool;
use crate::db::{projects, queries};
use crate::errors::AppResult;
use crate::models::{Project, TaskKey, TaskRecord};
use chrono::NaiveDateTime;

/// Durable task and project records.
///
/// Durations are whole seconds and every duration write is additive:
/// callers pass the delta since their last write, never a total.
pub trait TaskStore {
    /// Insert an open task (duration 0), get-or-creating `project` first.
    fn create_task(
        &mut self,
        name: &str,
        project: Option<&str>,
        start: NaiveDateTime,
    ) -> AppResult<i64>;

    /// Add `final_delta_secs`, set the end timestamp and mark completed.
    fn complete_task(&mut self, id: i64, end: NaiveDateTime, final_delta_secs: i64)
    -> AppResult<()>;

    /// Add `delta_secs` without touching completion.
    fn add_task_duration(&mut self, id: i64, delta_secs: i64) -> AppResult<()>;

    /// Delete completed tasks matching name + start + end. Returns rows removed.
    fn delete_task(&mut self, key: &TaskKey) -> AppResult<usize>;

    /// Delete one completed task by id. Returns rows removed (0 or 1);
    /// open tasks are never touched.
    fn delete_completed_task(&mut self, id: i64) -> AppResult<usize>;

    /// All not-completed tasks, newest first.
    fn find_open_tasks(&mut self) -> AppResult<Vec<TaskRecord>>;

    fn find_open_task(&mut self) -> AppResult<Option<TaskRecord>> {
        Ok(self.find_open_tasks()?.into_iter().next())
    }

    fn find_open_task_by_name_and_project(
        &mut self,
        name: &str,
        project: Option<&str>,
    ) -> AppResult<Option<TaskRecord>>;

    fn get_task(&mut self, id: i64) -> AppResult<Option<TaskRecord>>;

    /// Newest first.
    fn get_all_tasks(&mut self) -> AppResult<Vec<TaskRecord>>;

    /// Newest first, at most `limit` rows.
    fn get_recent_tasks(&mut self, limit: usize) -> AppResult<Vec<TaskRecord>>;

    /// Complete every open task except `keep_id` at `end`, adding nothing.
    fn close_open_tasks_except(&mut self, keep_id: i64, end: NaiveDateTime) -> AppResult<usize>;

    fn get_or_create_project(&mut self, name: &str) -> AppResult<Project>;
    fn create_project(&mut self, name: &str, color: Option<&str>) -> AppResult<i64>;
    fn get_project_by_name(&mut self, name: &str) -> AppResult<Option<Project>>;
    fn get_project(&mut self, id: i64) -> AppResult<Option<Project>>;
    fn update_project(&mut self, id: i64, name: &str, color: Option<&str>) -> AppResult<()>;
    /// Tasks of the project keep existing with no project.
    fn delete_project(&mut self, id: i64) -> AppResult<()>;
    /// Ordered by name.
    fn list_projects(&mut self) -> AppResult<Vec<Project>>;
}

impl TaskStore for DbPool {
    fn create_task(
        &mut self,
        name: &str,
        project: Option<&str>,
        start: NaiveDateTime,
    ) -> AppResult<i64> {
        queries::insert_task(&mut self.conn, name, project, start)
    }

    fn complete_task(
        &mut self,
        id: i64,
        end: NaiveDateTime,
        final_delta_secs: i64,
    ) -> AppResult<()> {
        queries::complete_task(&self.conn, id, end, final_delta_secs)
    }

    fn add_task_duration(&mut self, id: i64, delta_secs: i64) -> AppResult<()> {
        queries::add_task_duration(&self.conn, id, delta_secs)
    }

    fn delete_task(&mut self, key: &TaskKey) -> AppResult<usize> {
        queries::delete_task(&self.conn, key)
    }

    fn delete_completed_task(&mut self, id: i64) -> AppResult<usize> {
        queries::delete_completed_task(&self.conn, id)
    }

    fn find_open_tasks(&mut self) -> AppResult<Vec<TaskRecord>> {
        queries::load_open_tasks(&self.conn)
    }

    fn find_open_task_by_name_and_project(
        &mut self,
        name: &str,
        project: Option<&str>,
    ) -> AppResult<Option<TaskRecord>> {
        queries::find_open_task_by_name_and_project(&self.conn, name, project)
    }

    fn get_task(&mut self, id: i64) -> AppResult<Option<TaskRecord>> {
        queries::load_task(&self.conn, id)
    }

    fn get_all_tasks(&mut self) -> AppResult<Vec<TaskRecord>> {
        queries::load_all_tasks(&self.conn)
    }

    fn get_recent_tasks(&mut self, limit: usize) -> AppResult<Vec<TaskRecord>> {
        queries::load_recent_tasks(&self.conn, limit)
    }

    fn close_open_tasks_except(&mut self, keep_id: i64, end: NaiveDateTime) -> AppResult<usize> {
        queries::close_open_tasks_except(&mut self.conn, keep_id, end)
    }

    fn get_or_create_project(&mut self, name: &str) -> AppResult<Project> {
        projects::get_or_create_project(&self.conn, name)
    }

    fn create_project(&mut self, name: &str, color: Option<&str>) -> AppResult<i64> {
        projects::insert_project(&self.conn, name, color)
    }

    fn get_project_by_name(&mut self, name: &str) -> AppResult<Option<Project>> {
        projects::load_project_by_name(&self.conn, name)
    }

    fn get_project(&mut self, id: i64) -> AppResult<Option<Project>> {
        projects::load_project(&self.conn, id)
    }

    fn update_project(&mut self, id: i64, name: &str, color: Option<&str>) -> AppResult<()> {
        projects::update_project(&self.conn, id, name, color)
    }

    fn delete_project(&mut self, id: i64) -> AppResult<()> {
        projects::delete_project(&self.conn, id)
    }

    fn list_projects(&mut self) -> AppResult<Vec<Project>> {
        projects::load_projects(&self.conn)
    }
}
