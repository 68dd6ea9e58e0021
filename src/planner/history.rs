use super::task::Task;

/// A full, independent copy of the task list.
pub type Snapshot = Vec<Task>;

/// Undo/redo over full-list snapshots.
///
/// The undo stack is seeded with the empty list and never shrinks below
/// that entry, so its top is always the current state.
#[derive(Debug, Clone)]
pub struct History {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
}

impl History {
    pub fn new() -> Self {
        Self {
            undo_stack: vec![Snapshot::new()],
            redo_stack: Vec::new(),
        }
    }

    /// Records the state produced by a mutation. Any pending redo states are
    /// discarded.
    pub fn push(&mut self, tasks: &[Task]) {
        self.undo_stack.push(tasks.to_vec());
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        self.undo_stack.len() > 1
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn current(&self) -> &[Task] {
        self.undo_stack.last().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Steps back one state and returns it, or `None` when only the initial
    /// snapshot remains.
    pub fn undo(&mut self) -> Option<&[Task]> {
        if !self.can_undo() {
            return None;
        }
        let top = self.undo_stack.pop()?;
        self.redo_stack.push(top);
        Some(self.current())
    }

    pub fn redo(&mut self) -> Option<&[Task]> {
        let snapshot = self.redo_stack.pop()?;
        self.undo_stack.push(snapshot);
        Some(self.current())
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
