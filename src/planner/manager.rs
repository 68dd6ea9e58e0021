use super::history::History;
use super::task::Task;
use crate::error::{Error, Operation, Result};
use std::fmt;

/// Which tasks a view shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    pub const ALL: [Filter; 3] = [Filter::All, Filter::Completed, Filter::Pending];

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "Show all",
            Self::Completed => "Show completed",
            Self::Pending => "Show pending",
        }
    }

    /// Maps a filter sub-menu entry (`1`, `2` or `3`) to a filter.
    pub fn from_choice(input: &str) -> Result<Self> {
        match input.trim().parse::<usize>() {
            Ok(n @ 1..=3) => Ok(Self::ALL[n - 1]),
            _ => Err(Error::InvalidFilterChoice(input.trim().to_string())),
        }
    }

    pub fn matches(self, task: &Task) -> bool {
        match self {
            Self::All => true,
            Self::Completed => task.is_completed(),
            Self::Pending => !task.is_completed(),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Outcome of a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deleted {
    pub description: String,
    pub removed: usize,
}

/// Owns the task list and its snapshot history.
///
/// Every mutation (add, complete, delete) records a snapshot of the new
/// list and discards any redo states.
#[derive(Debug, Clone, Default)]
pub struct TaskManager {
    tasks: Vec<Task>,
    history: History,
}

impl TaskManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    pub fn add_task(&mut self, task: Task) {
        tracing::debug!(description = task.description(), "task added");
        self.tasks.push(task);
        self.record();
    }

    /// Marks the task at 1-based `number` completed.
    pub fn mark_completed(&mut self, number: usize) -> Result<&Task> {
        let index = self.resolve(Operation::Complete, number)?;
        self.tasks[index].mark_completed();
        self.record();
        tracing::debug!(number, "task completed");
        Ok(&self.tasks[index])
    }

    /// Deletes the task at 1-based `number` together with every other task
    /// sharing its description.
    pub fn delete_task(&mut self, number: usize) -> Result<Deleted> {
        let index = self.resolve(Operation::Delete, number)?;
        let description = self.tasks[index].description().to_string();

        let before = self.tasks.len();
        self.tasks.retain(|task| task.description() != description);
        let removed = before - self.tasks.len();

        self.record();
        tracing::debug!(number, removed, description = %description, "tasks deleted");
        Ok(Deleted {
            description,
            removed,
        })
    }

    /// Returns false when there was nothing to undo.
    pub fn undo(&mut self) -> bool {
        let restored = match self.history.undo() {
            Some(snapshot) => {
                self.tasks = snapshot.to_vec();
                true
            }
            None => false,
        };
        tracing::debug!(
            restored,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "undo"
        );
        restored
    }

    /// Returns false when there was nothing to redo.
    pub fn redo(&mut self) -> bool {
        let restored = match self.history.redo() {
            Some(snapshot) => {
                self.tasks = snapshot.to_vec();
                true
            }
            None => false,
        };
        tracing::debug!(
            restored,
            undo_depth = self.history.undo_depth(),
            redo_depth = self.history.redo_depth(),
            "redo"
        );
        restored
    }

    pub fn filtered(&self, filter: Filter) -> impl Iterator<Item = &Task> + '_ {
        self.tasks.iter().filter(move |task| filter.matches(task))
    }

    fn resolve(&self, operation: Operation, number: usize) -> Result<usize> {
        if self.tasks.is_empty() {
            return Err(Error::EmptyList(operation));
        }
        if (1..=self.tasks.len()).contains(&number) {
            Ok(number - 1)
        } else {
            Err(Error::InvalidTaskNumber {
                operation,
                number,
                count: self.tasks.len(),
            })
        }
    }

    fn record(&mut self) {
        self.history.push(&self.tasks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::TaskBuilder;

    fn descriptions(manager: &TaskManager) -> Vec<&str> {
        manager.tasks().iter().map(Task::description).collect()
    }

    fn manager_with(names: &[&str]) -> TaskManager {
        let mut manager = TaskManager::new();
        for name in names {
            manager.add_task(Task::new(*name));
        }
        manager
    }

    #[test]
    fn test_add_keeps_insertion_order() {
        let manager = manager_with(&["a", "b", "c"]);
        assert_eq!(descriptions(&manager), ["a", "b", "c"]);
        assert_eq!(manager.filtered(Filter::All).count(), 3);
        assert_eq!(manager.undo_depth(), 4);
    }

    #[test]
    fn test_mark_completed_valid_number() {
        let mut manager = manager_with(&["a", "b"]);
        let task = manager.mark_completed(2).unwrap();
        assert_eq!(task.description(), "b");
        assert!(task.is_completed());
        assert!(task.completed_at().is_some());
        assert!(!manager.tasks()[0].is_completed());
    }

    #[test]
    fn test_mark_completed_rejects_out_of_range() {
        let mut manager = manager_with(&["a"]);
        let depth = manager.undo_depth();

        for number in [0, 2] {
            let err = manager.mark_completed(number).unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidTaskNumber {
                    operation: Operation::Complete,
                    count: 1,
                    ..
                }
            ));
        }
        assert_eq!(manager.undo_depth(), depth);
        assert!(!manager.tasks()[0].is_completed());
    }

    #[test]
    fn test_empty_list_errors() {
        let mut manager = TaskManager::new();
        assert!(matches!(
            manager.mark_completed(1),
            Err(Error::EmptyList(Operation::Complete))
        ));
        assert!(matches!(
            manager.delete_task(1),
            Err(Error::EmptyList(Operation::Delete))
        ));
        assert_eq!(manager.undo_depth(), 1);
    }

    #[test]
    fn test_delete_removes_every_task_with_same_description() {
        let mut manager = TaskManager::new();
        manager.add_task(TaskBuilder::new("Buy milk").due_date("").build());
        manager.add_task(Task::new("Walk dog"));
        manager.add_task(TaskBuilder::new("Buy milk").due_date("2024-01-01").build());

        let deleted = manager.delete_task(3).unwrap();
        assert_eq!(deleted.description, "Buy milk");
        assert_eq!(deleted.removed, 2);
        assert_eq!(descriptions(&manager), ["Walk dog"]);
    }

    #[test]
    fn test_undo_after_single_add_restores_empty_then_redo_restores() {
        let mut manager = manager_with(&["a"]);
        assert!(manager.undo());
        assert!(manager.is_empty());
        assert!(manager.redo());
        assert_eq!(descriptions(&manager), ["a"]);
    }

    #[test]
    fn test_undo_with_only_initial_snapshot_is_noop() {
        let mut manager = TaskManager::new();
        assert!(!manager.undo());
        assert!(manager.is_empty());
        assert!(!manager.redo());
    }

    #[test]
    fn test_new_mutation_discards_redo() {
        let mut manager = manager_with(&["a"]);
        manager.undo();
        manager.add_task(Task::new("b"));
        assert_eq!(manager.redo_depth(), 0);
        assert!(!manager.redo());
        assert_eq!(descriptions(&manager), ["b"]);
    }

    #[test]
    fn test_undo_reverts_completion() {
        let mut manager = manager_with(&["a"]);
        manager.mark_completed(1).unwrap();
        manager.undo();
        assert!(!manager.tasks()[0].is_completed());
        manager.redo();
        assert!(manager.tasks()[0].is_completed());
    }

    #[test]
    fn test_undo_restores_bulk_deleted_tasks() {
        let mut manager = manager_with(&["x", "x"]);
        manager.delete_task(1).unwrap();
        assert!(manager.is_empty());
        manager.undo();
        assert_eq!(descriptions(&manager), ["x", "x"]);
    }

    #[test]
    fn test_filters() {
        let mut manager = manager_with(&["a", "b", "c"]);
        manager.mark_completed(2).unwrap();

        let completed: Vec<_> = manager.filtered(Filter::Completed).map(Task::description).collect();
        let pending: Vec<_> = manager.filtered(Filter::Pending).map(Task::description).collect();
        assert_eq!(completed, ["b"]);
        assert_eq!(pending, ["a", "c"]);
    }

    #[test]
    fn test_filter_parsing() {
        assert_eq!(Filter::from_choice("1").unwrap(), Filter::All);
        assert_eq!(Filter::from_choice(" 2 ").unwrap(), Filter::Completed);
        assert_eq!(Filter::from_choice("3").unwrap(), Filter::Pending);
        assert!(Filter::from_choice("4").is_err());
        assert!(Filter::from_choice("all").is_err());
        assert_eq!(Filter::Pending.to_string(), "Show pending");
        assert_eq!(Filter::default(), Filter::All);
    }
}
