use super::manager::{Filter, TaskManager};
use super::task::{Task, TaskBuilder};
use crate::config::Settings;
use crate::error::{Error, Operation, Result};
use colored::Colorize;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input};
use std::fmt::Write as _;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Source of user input for the interactive loop.
pub trait Prompter {
    /// Reads one line of free text. Empty answers are allowed.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Blocks until the user acknowledges a listing.
    fn pause(&mut self) -> Result<()>;
}

/// Line-oriented prompts over any reader, used when stdin is piped.
pub struct LinePrompter<R, W> {
    input: R,
    echo: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, echo: W) -> Self {
        Self { input, echo }
    }

    fn next_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        write!(self.echo, "{prompt}: ")?;
        self.echo.flush()?;
        self.next_line()?.ok_or_else(|| {
            Error::Io(io::Error::new(io::ErrorKind::UnexpectedEof, "end of input"))
        })
    }

    // End of input is fine here; the next prompt reports it.
    fn pause(&mut self) -> Result<()> {
        write!(self.echo, "\nPress any key to continue...")?;
        self.echo.flush()?;
        self.next_line()?;
        writeln!(self.echo)?;
        Ok(())
    }
}

/// Reads from the controlling terminal, or line by line from stdin when it is
/// not one.
pub enum TerminalPrompter {
    Interactive { term: Term, theme: ColorfulTheme },
    Piped(LinePrompter<StdinLock<'static>, Stdout>),
}

impl TerminalPrompter {
    pub fn new() -> Self {
        let term = Term::stdout();
        if term.is_term() && io::stdin().is_terminal() {
            Self::Interactive {
                term,
                theme: ColorfulTheme::default(),
            }
        } else {
            tracing::debug!("stdin is not a terminal, reading plain lines");
            Self::Piped(LinePrompter::new(io::stdin().lock(), io::stdout()))
        }
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn read_line(&mut self, prompt: &str) -> Result<String> {
        match self {
            Self::Interactive { term, theme } => {
                let answer = Input::<String>::with_theme(&*theme)
                    .with_prompt(prompt)
                    .allow_empty(true)
                    .interact_text_on(&*term)?;
                Ok(answer)
            }
            Self::Piped(lines) => lines.read_line(prompt),
        }
    }

    fn pause(&mut self) -> Result<()> {
        match self {
            Self::Interactive { term, .. } => {
                term.write_line("")?;
                term.write_str("Press any key to continue...")?;
                term.read_key()?;
                term.write_line("")?;
                Ok(())
            }
            Self::Piped(lines) => lines.pause(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Exit,
    Add,
    Complete,
    Delete,
    Undo,
    Redo,
    View,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Result<Self> {
        let choice = match input.trim().parse::<u8>() {
            Ok(0) => Self::Exit,
            Ok(1) => Self::Add,
            Ok(2) => Self::Complete,
            Ok(3) => Self::Delete,
            Ok(4) => Self::Undo,
            Ok(5) => Self::Redo,
            Ok(6) => Self::View,
            _ => return Err(Error::InvalidMenuChoice(input.trim().to_string())),
        };
        Ok(choice)
    }
}

/// The interactive menu loop: one session, one owned task list.
pub struct Planner<P, W> {
    manager: TaskManager,
    prompter: P,
    out: W,
    settings: Settings,
}

impl<P: Prompter, W: Write> Planner<P, W> {
    pub fn new(prompter: P, out: W, settings: Settings) -> Self {
        Self {
            manager: TaskManager::new(),
            prompter,
            out,
            settings,
        }
    }

    pub fn manager(&self) -> &TaskManager {
        &self.manager
    }

    pub fn prompter(&self) -> &P {
        &self.prompter
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    /// Runs until the user picks `0`. Input errors are reported and the menu
    /// shown again; I/O failures end the loop.
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.display_menu()?;
            let input = self.prompter.read_line("Enter your choice")?;

            let outcome = match MenuChoice::parse(&input) {
                Ok(MenuChoice::Exit) => {
                    writeln!(self.out, "Exiting the program. Goodbye!")?;
                    self.out.flush()?;
                    return Ok(());
                }
                Ok(choice) => self.dispatch(choice),
                Err(err) => Err(err),
            };

            match outcome {
                Err(err) if err.is_recoverable() => {
                    tracing::warn!(error = %err, "rejected input");
                    writeln!(self.out, "{}", err.to_string().red())?;
                }
                other => other?,
            }
        }
    }

    fn dispatch(&mut self, choice: MenuChoice) -> Result<()> {
        match choice {
            MenuChoice::Add => self.add_task(),
            MenuChoice::Complete => self.mark_completed(),
            MenuChoice::Delete => self.delete_task(),
            MenuChoice::Undo => {
                self.manager.undo();
                writeln!(self.out, "{}", "Undo successful!".green())?;
                Ok(())
            }
            MenuChoice::Redo => {
                self.manager.redo();
                writeln!(self.out, "{}", "Redo successful!".green())?;
                Ok(())
            }
            MenuChoice::View => self.view_tasks(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn display_menu(&mut self) -> Result<()> {
        writeln!(self.out, "\n{}", "===== TO-DO LIST MANAGER =====".bold())?;
        writeln!(self.out, "1. Add Task")?;
        writeln!(self.out, "2. Mark Task as Completed")?;
        writeln!(self.out, "3. Delete Task")?;
        writeln!(self.out, "4. Undo")?;
        writeln!(self.out, "5. Redo")?;
        writeln!(self.out, "6. View Tasks")?;
        writeln!(self.out, "0. Exit")?;
        writeln!(self.out, "==============================\n")?;
        self.out.flush()?;
        Ok(())
    }

    fn add_task(&mut self) -> Result<()> {
        let description = self.prompter.read_line("Enter task description")?;
        let due_date = self.prompter.read_line("Enter due date (or leave empty)")?;
        let tags_input = self
            .prompter
            .read_line("Enter tags (comma-separated, or leave empty)")?;

        let tags = tags_input
            .split(',')
            .map(str::trim)
            .filter(|tag| !tag.is_empty());

        let task = TaskBuilder::new(description)
            .due_date(due_date)
            .tags(tags)
            .build();
        self.manager.add_task(task);

        writeln!(self.out, "{}", "Task added successfully!".green())?;
        Ok(())
    }

    fn mark_completed(&mut self) -> Result<()> {
        let number = self.select_task(Operation::Complete)?;
        let task = self.manager.mark_completed(number)?;
        let message = format!(
            "Task '{}' marked as completed successfully!",
            task.description()
        );
        writeln!(self.out, "{}", message.green())?;
        Ok(())
    }

    fn delete_task(&mut self) -> Result<()> {
        let number = self.select_task(Operation::Delete)?;
        let deleted = self.manager.delete_task(number)?;
        let message = format!("Task '{}' deleted successfully!", deleted.description);
        writeln!(self.out, "{}", message.green())?;
        Ok(())
    }

    /// Lists the tasks and reads a 1-based number. Input that is not a
    /// number comes back as 0, which is never a valid task number.
    fn select_task(&mut self, operation: Operation) -> Result<usize> {
        if self.manager.is_empty() {
            return Err(Error::EmptyList(operation));
        }

        writeln!(self.out, "Select a task to {}:", operation.verb())?;
        for (index, task) in self.manager.tasks().iter().enumerate() {
            writeln!(self.out, "{}. {}", index + 1, task.description())?;
        }
        self.out.flush()?;

        let prompt = format!("Enter the task number to {}", operation.verb());
        let input = self.prompter.read_line(&prompt)?;
        Ok(input.trim().parse().unwrap_or(0))
    }

    fn view_tasks(&mut self) -> Result<()> {
        writeln!(self.out, "Select filter option:")?;
        for (index, filter) in Filter::ALL.iter().enumerate() {
            writeln!(self.out, "{}. {}", index + 1, filter)?;
        }
        self.out.flush()?;

        let input = self.prompter.read_line("Enter your choice")?;
        let filter = Filter::from_choice(&input)?;

        writeln!(self.out, "{}", "Task List:".bold())?;
        if self.manager.is_empty() {
            writeln!(self.out, "EMPTY")?;
        } else {
            for task in self.manager.filtered(filter) {
                writeln!(self.out, "{}", render_task(task, &self.settings.timestamp_format))?;
            }
        }
        self.out.flush()?;

        if self.settings.pause_after_view {
            self.prompter.pause()?;
        }
        Ok(())
    }
}

/// One line of the task listing.
pub fn render_task(task: &Task, timestamp_format: &str) -> String {
    let mut line = format!("{} - {}", task.description(), task.status_label());

    if !task.due_date().is_empty() {
        line.push_str(&format!(", Due: {}", task.due_date()));
    }

    if let Some(completed_at) = task.completed_at() {
        let mut stamp = String::new();
        if write!(stamp, "{}", completed_at.format(timestamp_format)).is_err() {
            stamp = completed_at.to_rfc2822();
        }
        line.push_str(&format!(", Completed On: {stamp}"));
    }

    if !task.tags().is_empty() {
        line.push_str(&format!(", Tags: {}", task.tags().join(" ")));
    }

    line
}
