pub mod history;
pub mod manager;
pub mod task;
pub mod ui;

pub use history::{History, Snapshot};
pub use manager::{Deleted, Filter, TaskManager};
pub use task::{Task, TaskBuilder};
pub use ui::{LinePrompter, MenuChoice, Planner, Prompter, TerminalPrompter};
