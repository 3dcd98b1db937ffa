//! The session engine: single authority over which task is running, since
//! when, and how many seconds it has logged.
//!
//! States are `Idle`, `Running` and `Paused`. A session only becomes
//! `Paused` when it is restored from an unfinished task row at construction;
//! it never starts ticking again until `resume` is called.
//!
//! Time in the open tick window is flushed to storage every
//! `checkpoint_interval`, so a crash loses at most one interval. Every
//! operation either completes its storage writes and then updates the
//! in-memory state, or fails and leaves the state as it was.
//!
//! Mutating operations take `&mut self`. Callers sharing an engine between
//! threads must wrap it in a single `Mutex`.

use crate::core::clock::{Clock, SystemClock};
use crate::core::reconcile::{OpenTaskPolicy, find_session_task};
use crate::core::session::{ActiveTask, SessionSnapshot, SessionState, SessionStatus};
use crate::core::store::TaskStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Project, TaskKey, TaskRecord};
use crate::utils::time::{seconds, whole_seconds_between};
use chrono::{NaiveDateTime, TimeDelta};
use tracing::{debug, info, warn};

pub const DEFAULT_CHECKPOINT_INTERVAL_SECS: i64 = 10;
pub const DEFAULT_HISTORY_SIZE: usize = 50;

#[derive(Debug, Clone)]
pub struct EngineOptions {
    pub checkpoint_interval: TimeDelta,
    pub open_task_policy: OpenTaskPolicy,
    /// Number of tasks kept in [`SessionEngine::history`].
    pub history_size: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            checkpoint_interval: TimeDelta::seconds(DEFAULT_CHECKPOINT_INTERVAL_SECS),
            open_task_policy: OpenTaskPolicy::default(),
            history_size: DEFAULT_HISTORY_SIZE,
        }
    }
}

pub type Listener = Box<dyn FnMut(&SessionSnapshot) + Send>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

pub struct SessionEngine<S: TaskStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    options: EngineOptions,
    state: SessionState,
    /// Highest elapsed value shown for the current session.
    live_secs: i64,
    history: Vec<TaskRecord>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener: u64,
}

/// Log a storage failure at the engine boundary and pass it on.
fn storage<T>(op: &'static str, result: AppResult<T>) -> AppResult<T> {
    if let Err(e) = &result {
        warn!(op, error = %e, "storage operation failed, session unchanged");
    }
    result
}

fn task_name(name: &str) -> AppResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::EmptyTaskName);
    }
    Ok(name)
}

/// Blank project names mean "no project".
fn project_name(project: Option<&str>) -> Option<&str> {
    project.map(str::trim).filter(|p| !p.is_empty())
}

impl<S: TaskStore> SessionEngine<S, SystemClock> {
    pub fn open(store: S, options: EngineOptions) -> AppResult<Self> {
        Self::with_clock(store, SystemClock, options)
    }
}

impl<S: TaskStore, C: Clock> SessionEngine<S, C> {
    /// Build the engine and reconcile with storage: an unfinished task is
    /// loaded as `Paused`, otherwise the engine starts `Idle`.
    pub fn with_clock(mut store: S, clock: C, options: EngineOptions) -> AppResult<Self> {
        let state = match find_session_task(&mut store, options.open_task_policy)? {
            Some(record) => {
                info!(
                    task_id = record.id,
                    task = %record.name,
                    persisted_secs = record.duration_secs,
                    "restored unfinished task as paused"
                );
                SessionState::paused(&record)
            }
            None => SessionState::default(),
        };

        let mut engine = Self {
            store,
            clock,
            options,
            live_secs: state.prior_secs,
            state,
            history: Vec::new(),
            listeners: Vec::new(),
            next_listener: 0,
        };
        engine.refresh_history();
        Ok(engine)
    }

    // ---------------------------
    // Observation
    // ---------------------------

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn is_paused(&self) -> bool {
        self.status() == SessionStatus::Paused
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let now = self.clock.now();
        let active = self.state.active.as_ref();
        SessionSnapshot {
            status: self.state.status(),
            task_id: active.map(|a| a.id),
            task_name: active.map(|a| a.name.clone()),
            project: active.and_then(|a| a.project.clone()),
            elapsed_secs: self.live_secs.max(self.state.live_secs(now)),
            persisted_secs: self.state.prior_secs,
            checkpoint_interval_secs: self.options.checkpoint_interval.num_seconds(),
        }
    }

    /// Register a listener called with a fresh snapshot after every
    /// transition and every tick that moves the elapsed value.
    pub fn subscribe<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut(&SessionSnapshot) + Send + 'static,
    {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(lid, _)| *lid != id);
        self.listeners.len() != before
    }

    fn publish(&mut self) -> SessionSnapshot {
        let snap = self.snapshot();
        for (_, listener) in self.listeners.iter_mut() {
            listener(&snap);
        }
        snap
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Read access to the storage handle, e.g. for audit logging.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ---------------------------
    // Transitions
    // ---------------------------

    /// `Idle → Running` on a new task row.
    pub fn start(&mut self, name: &str, project: Option<&str>) -> AppResult<SessionSnapshot> {
        let name = task_name(name)?;
        let project = project_name(project);

        if self.status() != SessionStatus::Idle {
            return Err(AppError::InvalidState {
                op: "start a task",
                state: self.status().as_str(),
            });
        }

        let now = self.clock.now();
        let id = storage("create_task", self.store.create_task(name, project, now))?;

        let active = ActiveTask {
            id,
            name: name.to_string(),
            project: project.map(str::to_string),
            started: now,
        };
        self.state = SessionState::running(active, 0, now);
        self.live_secs = 0;
        self.refresh_history();

        info!(task_id = id, task = name, project, "task started");
        Ok(self.publish())
    }

    /// `Paused → Running`. Persisted duration is untouched until the next
    /// checkpoint or stop.
    pub fn resume(&mut self) -> AppResult<SessionSnapshot> {
        if self.status() != SessionStatus::Paused {
            return Err(AppError::InvalidState {
                op: "resume",
                state: self.status().as_str(),
            });
        }

        let now = self.clock.now();
        self.state.window_start = Some(now);
        self.state.last_checkpoint = Some(now);
        self.live_secs = self.state.prior_secs;

        info!(task_id = ?self.state.active.as_ref().map(|a| a.id), "task resumed");
        Ok(self.publish())
    }

    /// `Running | Paused → Idle`. The task row is completed with the open
    /// window (if any) added to its duration. Returns the completed row.
    pub fn stop(&mut self) -> AppResult<TaskRecord> {
        let Some(active) = self.state.active.clone() else {
            return Err(AppError::InvalidState {
                op: "stop",
                state: SessionStatus::Idle.as_str(),
            });
        };

        let now = self.clock.now();
        let delta = self.state.open_secs(now);
        storage("complete_task", self.store.complete_task(active.id, now, delta))?;

        let record = TaskRecord {
            id: active.id,
            name: active.name,
            project: active.project,
            start: active.started,
            end: Some(now),
            duration_secs: self.state.prior_secs + delta,
            completed: true,
        };

        self.state = SessionState::default();
        self.live_secs = 0;
        self.refresh_history();

        info!(
            task_id = record.id,
            task = %record.name,
            duration_secs = record.duration_secs,
            "task stopped"
        );
        self.publish();
        Ok(record)
    }

    /// Re-enter a task by name and project.
    ///
    /// An unfinished row with exactly that name and project is picked up
    /// where it left off. Otherwise the active task, if any, is stopped and
    /// a brand-new row is started with duration 0.
    pub fn restart(&mut self, name: &str, project: Option<&str>) -> AppResult<SessionSnapshot> {
        let name = task_name(name)?;
        let project = project_name(project);

        let existing = storage(
            "find_open_task_by_name_and_project",
            self.store.find_open_task_by_name_and_project(name, project),
        )?;

        let Some(existing) = existing else {
            if self.state.active.is_some() {
                self.stop()?;
            }
            return self.start(name, project);
        };

        match self.state.active.as_ref() {
            Some(active) if active.id == existing.id => {
                if self.status() == SessionStatus::Paused {
                    return self.resume();
                }
                debug!(task_id = existing.id, "restart on the running task, nothing to do");
                return Ok(self.snapshot());
            }
            Some(_) => {
                self.stop()?;
            }
            None => {}
        }

        let now = self.clock.now();
        let prior = existing.duration_secs;
        let active = ActiveTask {
            id: existing.id,
            name: existing.name,
            project: existing.project,
            started: existing.start,
        };
        info!(task_id = active.id, persisted_secs = prior, "picked up unfinished task");

        self.state = SessionState::running(active, prior, now);
        self.live_secs = prior;
        Ok(self.publish())
    }

    /// Periodic driver, meant to be called about once per second.
    ///
    /// Refreshes the elapsed value and, once `checkpoint_interval` has passed
    /// since the last checkpoint, flushes the open window to storage.
    /// Does nothing unless running.
    pub fn tick(&mut self) -> AppResult<SessionSnapshot> {
        if self.status() != SessionStatus::Running {
            return Ok(self.snapshot());
        }

        let now = self.clock.now();
        let live = self.state.live_secs(now);
        let moved = live > self.live_secs;
        self.live_secs = self.live_secs.max(live);

        let due = match self.state.last_checkpoint {
            Some(last) => now - last >= self.options.checkpoint_interval,
            None => true,
        };
        if due {
            self.checkpoint_at(now)?;
        }

        if moved || due {
            Ok(self.publish())
        } else {
            Ok(self.snapshot())
        }
    }

    /// Flush the open tick window now. No-op unless running.
    pub fn checkpoint(&mut self) -> AppResult<()> {
        if self.status() != SessionStatus::Running {
            return Ok(());
        }
        let now = self.clock.now();
        self.checkpoint_at(now)
    }

    /// Persist the open window and fold it into the prior total. The window
    /// start only moves after the write succeeded, so a failed checkpoint is
    /// retried in full by the next one.
    fn checkpoint_at(&mut self, now: NaiveDateTime) -> AppResult<()> {
        let (Some(active), Some(window_start)) = (&self.state.active, self.state.window_start)
        else {
            return Ok(());
        };
        let id = active.id;
        let delta = whole_seconds_between(window_start, now);

        if delta > 0 {
            storage("add_task_duration", self.store.add_task_duration(id, delta))?;
        }

        // Advance by whole seconds only; the sub-second rest stays in the
        // window. A clock that stepped back restarts the window at `now`.
        let advanced = window_start + seconds(delta);
        self.state.prior_secs += delta;
        self.state.window_start = Some(advanced.min(now));
        self.state.last_checkpoint = Some(now);

        debug!(task_id = id, delta, total = self.state.prior_secs, "checkpoint");
        Ok(())
    }

    /// Final checkpoint when running; the task stays unfinished and is
    /// restored as `Paused` next time. Hands the storage handle back.
    ///
    /// Dropping the engine without calling this behaves like a crash: the
    /// open window since the last checkpoint is lost.
    pub fn shutdown(mut self) -> AppResult<S> {
        if self.status() == SessionStatus::Running {
            self.checkpoint()?;
            info!(
                task_id = ?self.state.active.as_ref().map(|a| a.id),
                persisted_secs = self.state.prior_secs,
                "engine shut down with task left open"
            );
        }
        Ok(self.store)
    }

    // ---------------------------
    // History
    // ---------------------------

    /// The most recent tasks (`history_size` of them), newest first, the
    /// open one included. Refreshed on construction, after start, stop,
    /// delete and project changes.
    pub fn history(&self) -> &[TaskRecord] {
        &self.history
    }

    fn refresh_history(&mut self) {
        match self.store.get_recent_tasks(self.options.history_size) {
            Ok(tasks) => self.history = tasks,
            Err(e) => {
                warn!(error = %e, "failed to load task history");
                self.history.clear();
            }
        }
    }

    pub fn recent_tasks(&mut self, limit: usize) -> AppResult<Vec<TaskRecord>> {
        self.store.get_recent_tasks(limit)
    }

    pub fn all_tasks(&mut self) -> AppResult<Vec<TaskRecord>> {
        self.store.get_all_tasks()
    }

    pub fn task(&mut self, id: i64) -> AppResult<TaskRecord> {
        self.store
            .get_task(id)?
            .ok_or_else(|| AppError::TaskNotFound(id.to_string()))
    }

    /// Delete completed tasks matching `key`, including any other row that
    /// shares name and bounds. Open tasks have no key.
    pub fn delete_task(&mut self, key: &TaskKey) -> AppResult<usize> {
        let deleted = storage("delete_task", self.store.delete_task(key))?;
        if deleted > 0 {
            self.refresh_history();
        }
        Ok(deleted)
    }

    pub fn delete_task_by_id(&mut self, id: i64) -> AppResult<TaskRecord> {
        let record = self.task(id)?;
        if record.is_open() {
            return Err(AppError::ActiveTaskDeletion(record.name));
        }
        let deleted = storage(
            "delete_completed_task",
            self.store.delete_completed_task(id),
        )?;
        if deleted == 0 {
            return Err(AppError::TaskNotFound(id.to_string()));
        }
        self.refresh_history();
        Ok(record)
    }

    // ---------------------------
    // Projects
    // ---------------------------

    pub fn list_projects(&mut self) -> AppResult<Vec<Project>> {
        self.store.list_projects()
    }

    pub fn create_project(&mut self, name: &str, color: Option<&str>) -> AppResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyProjectName);
        }
        let id = storage("create_project", self.store.create_project(name, color))?;
        Ok(Project {
            id,
            name: name.to_string(),
            color: color.map(str::to_string),
        })
    }

    pub fn get_or_create_project(&mut self, name: &str) -> AppResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyProjectName);
        }
        storage("get_or_create_project", self.store.get_or_create_project(name))
    }

    /// Rename and/or recolor. The active session keeps the project name it
    /// was started with; a renamed project shows up on its next load.
    pub fn update_project(
        &mut self,
        id: i64,
        name: &str,
        color: Option<&str>,
    ) -> AppResult<Project> {
        let name = name.trim();
        if name.is_empty() {
            return Err(AppError::EmptyProjectName);
        }
        storage("update_project", self.store.update_project(id, name, color))?;
        self.refresh_history();
        Ok(Project {
            id,
            name: name.to_string(),
            color: color.map(str::to_string),
        })
    }

    /// Delete a project; its tasks are kept without a project.
    pub fn delete_project(&mut self, id: i64) -> AppResult<Project> {
        let project = self
            .store
            .get_project(id)?
            .ok_or_else(|| AppError::ProjectNotFound(id.to_string()))?;
        storage("delete_project", self.store.delete_project(id))?;
        self.refresh_history();
        Ok(project)
    }
}
