use chrono::{DateTime, Local};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    description: String,
    completed: bool,
    due_date: String,
    tags: Vec<String>,
    completed_at: Option<DateTime<Local>>,
}

impl Task {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            completed: false,
            due_date: String::new(),
            tags: Vec::new(),
            completed_at: None,
        }
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn due_date(&self) -> &str {
        &self.due_date
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Only ever `Some` while the task is completed.
    pub fn completed_at(&self) -> Option<DateTime<Local>> {
        self.completed_at
    }

    pub fn status_label(&self) -> &'static str {
        if self.completed {
            "Completed"
        } else {
            "Pending"
        }
    }

    pub fn mark_completed(&mut self) {
        self.completed = true;
        self.completed_at = Some(Local::now());
    }

    pub fn mark_pending(&mut self) {
        self.completed = false;
        self.completed_at = None;
    }

    pub fn set_due_date(&mut self, due_date: impl Into<String>) {
        self.due_date = due_date.into();
    }

    // Duplicates are kept in insertion order.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        self.tags.push(tag.into());
    }
}

/// Fluent construction of a [`Task`] with its optional attributes.
///
/// ```
/// use todo_list_manager::planner::TaskBuilder;
///
/// let task = TaskBuilder::new("Buy milk")
///     .due_date("2024-01-01")
///     .tag("errand")
///     .build();
/// assert_eq!(task.due_date(), "2024-01-01");
/// ```
#[derive(Debug, Clone)]
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            task: Task::new(description),
        }
    }

    pub fn due_date(mut self, due_date: impl Into<String>) -> Self {
        self.task.set_due_date(due_date);
        self
    }

    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.task.add_tag(tag);
        self
    }

    pub fn tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.task.add_tag(tag);
        }
        self
    }

    pub fn build(self) -> Task {
        self.task
    }
}
