//! Ordered task collection with id-keyed mutations.

use crate::model::task::{Task, TaskId, TaskValidationError};
use crate::store::observer::{StoreChange, StoreObserver};
use log::{debug, warn};
use std::collections::HashSet;
use std::time::{SystemTime, UNIX_EPOCH};

/// Source of creation timestamps for new task ids.
pub(crate) type Clock = fn() -> TaskId;

/// Authoritative in-memory task list.
pub struct TaskStore {
    tasks: Vec<Task>,
    observers: Vec<Box<dyn StoreObserver>>,
    clock: Clock,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    /// Creates an empty store using the system clock for ids.
    pub fn new() -> Self {
        Self::from_tasks(Vec::new())
    }

    /// Creates a store seeded with previously loaded tasks.
    ///
    /// Only reachable inside the crate: seeds must come out of
    /// `decode_tasks`, which rejects duplicate ids and blank text.
    pub(crate) fn from_tasks(tasks: Vec<Task>) -> Self {
        Self::with_clock(tasks, system_clock_ms)
    }

    pub(crate) fn with_clock(tasks: Vec<Task>, clock: Clock) -> Self {
        Self {
            tasks,
            observers: Vec::new(),
            clock,
        }
    }

    /// Registers an observer notified after every effective mutation.
    pub fn subscribe(&mut self, observer: Box<dyn StoreObserver>) {
        self.observers.push(observer);
    }

    /// Returns the full ordered collection.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Appends a new pending task.
    ///
    /// Returns `None` without touching the store when `text` is blank.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let Some(id) = self.next_id() else {
            warn!("event=task_add module=store status=skipped reason=id_space_exhausted");
            return None;
        };
        let task = match Task::new(id, text) {
            Ok(task) => task,
            Err(TaskValidationError::EmptyText) => {
                debug!("event=task_add module=store status=skipped reason=empty_text");
                return None;
            }
        };

        let id = task.id;
        self.tasks.push(task);
        self.notify(StoreChange::Added(id));
        Some(id)
    }

    /// Flips `completed` on the task with `id`; returns whether one changed.
    pub fn toggle(&mut self, id: TaskId) -> bool {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=skipped reason=not_found id={id}");
            return false;
        };

        task.toggle();
        let completed = task.completed;
        self.notify(StoreChange::Toggled { id, completed });
        true
    }

    /// Removes the task with `id`; returns whether one was removed.
    pub fn delete(&mut self, id: TaskId) -> bool {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_delete module=store status=skipped reason=not_found id={id}");
            return false;
        };

        self.tasks.remove(index);
        self.notify(StoreChange::Deleted(id));
        true
    }

    /// Removes every completed task and returns how many were removed.
    pub fn clear_completed(&mut self) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(Task::is_pending);
        let removed = before - self.tasks.len();

        if removed == 0 {
            debug!("event=task_clear_completed module=store status=skipped reason=none_completed");
            return 0;
        }

        self.notify(StoreChange::ClearedCompleted { removed });
        removed
    }

    /// Clock time, bumped past the current max id. Once the max id sits at
    /// `TaskId::MAX` the bump has nowhere to go, so the first free id at or
    /// below the clock (then anywhere) is taken instead.
    fn next_id(&self) -> Option<TaskId> {
        let now = (self.clock)();
        let Some(max_id) = self.tasks.iter().map(|task| task.id).max() else {
            return Some(now);
        };
        if now > max_id {
            return Some(now);
        }
        if let Some(bumped) = max_id.checked_add(1) {
            return Some(bumped);
        }

        warn!("event=task_id_assign module=store status=fallback reason=max_id_saturated");
        let used: HashSet<TaskId> = self.tasks.iter().map(|task| task.id).collect();
        (TaskId::MIN..=now)
            .rev()
            .chain((now..TaskId::MAX).skip(1))
            .find(|id| !used.contains(id))
    }

    fn notify(&mut self, change: StoreChange) {
        debug!(
            "event={} module=store status=ok size={} observers={}",
            change.event_name(),
            self.tasks.len(),
            self.observers.len()
        );
        for observer in &mut self.observers {
            observer.on_change(&change, &self.tasks);
        }
    }
}

fn system_clock_ms() -> TaskId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| TaskId::try_from(elapsed.as_millis()).unwrap_or(TaskId::MAX))
        .unwrap_or(0)
}
