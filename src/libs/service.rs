//! Todo record service: validation, partial updates and read-time overdue
//! status on top of the [`Todos`] store.
//!
//! The service owns an explicit store handle and a clock that supplies the
//! caller's local "today". Every record it returns carries `is_overdue`
//! evaluated against that day; the flag is never stored.
//!
//! ```rust
//! use todo_api::db::{db::Db, todos::Todos};
//! use todo_api::libs::service::TodoService;
//! use todo_api::libs::todo::NewTodo;
//!
//! let service = TodoService::new(Todos::new(Db::open_in_memory()?));
//! let created = service.create(NewTodo::titled("Buy milk"))?;
//! assert_eq!(created.todo.category, "General");
//! assert!(!created.is_overdue);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::error::{TodoError, TodoResult};
use super::messages::Message;
use super::todo::{InvalidPriority, NewTodo, Priority, TodoChanges, TodoDraft, TodoPatch, TodoQuery, TodoView, DEFAULT_CATEGORY, DUE_DATE_FORMAT};
use crate::db::todos::Todos;
use anyhow::Result;
use chrono::{Local, NaiveDate, Utc};
use std::path::Path;
use tracing::debug;

/// Source of the current local calendar day.
pub type Clock = fn() -> NaiveDate;

pub fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

#[derive(Clone)]
pub struct TodoService {
    todos: Todos,
    clock: Clock,
}

impl TodoService {
    pub fn new(todos: Todos) -> Self {
        Self::with_clock(todos, local_today)
    }

    pub fn with_clock(todos: Todos, clock: Clock) -> Self {
        TodoService { todos, clock }
    }

    /// Opens the database at `path`, applying schema steps, and wraps it.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::new(Todos::open(path)?))
    }

    pub fn today(&self) -> NaiveDate {
        (self.clock)()
    }

    pub fn list(&self, query: &TodoQuery) -> TodoResult<Vec<TodoView>> {
        let today = self.today();
        let todos = self.todos.fetch(query)?;
        debug!(count = todos.len(), sort_by = ?query.sort_by, sort_order = ?query.sort_order, "listed todos");

        Ok(todos.into_iter().map(|todo| todo.into_view(today)).collect())
    }

    pub fn get(&self, id: i64) -> TodoResult<TodoView> {
        let today = self.today();
        self.todos
            .get_by_id(id)?
            .map(|todo| todo.into_view(today))
            .ok_or(TodoError::NotFound(id))
    }

    pub fn create(&self, input: NewTodo) -> TodoResult<TodoView> {
        let draft = self.validate_new(input)?;
        let id = self.todos.insert(&draft, Utc::now())?;
        debug!(id, title = %draft.title, "created todo");

        self.get(id)
    }

    /// Applies the supplied fields only. `updated_at` is refreshed on every
    /// successful update.
    pub fn update(&self, id: i64, changes: TodoChanges) -> TodoResult<TodoView> {
        if changes.is_empty() {
            return Err(TodoError::validation(Message::NoFieldsToUpdate));
        }
        let patch = self.validate_changes(changes)?;

        let affected = self.todos.update(id, &patch, Utc::now())?;
        if affected == 0 {
            return Err(TodoError::NotFound(id));
        }
        let fields: Vec<_> = patch.fields().collect();
        debug!(id, ?fields, "updated todo");

        self.get(id)
    }

    pub fn delete(&self, id: i64) -> TodoResult<()> {
        let affected = self.todos.delete(id)?;
        if affected == 0 {
            return Err(TodoError::NotFound(id));
        }
        debug!(id, "deleted todo");

        Ok(())
    }

    /// Releases the store. Fails only when closing the connection fails.
    pub fn close(self) -> Result<()> {
        self.todos.close()
    }

    fn validate_new(&self, input: NewTodo) -> TodoResult<TodoDraft> {
        let title = validate_title(input.title.as_deref().unwrap_or_default())?;

        let priority = match input.priority {
            Some(raw) => parse_priority(&raw)?,
            None => Priority::default(),
        };

        let due_date = match input.due_date.as_deref().map(str::trim) {
            Some(raw) if !raw.is_empty() => Some(self.validate_due_date(raw)?),
            _ => None,
        };

        let category = normalize_category(input.category.as_deref());

        Ok(TodoDraft {
            title,
            category,
            priority,
            due_date,
        })
    }

    fn validate_changes(&self, changes: TodoChanges) -> TodoResult<TodoPatch> {
        let mut patch = TodoPatch::new();

        if let Some(title) = changes.title {
            patch = patch.title(validate_title(&title)?);
        }
        if let Some(category) = changes.category {
            patch = patch.category(normalize_category(Some(&category)));
        }
        if let Some(raw) = changes.priority {
            patch = patch.priority(parse_priority(&raw)?);
        }
        if let Some(completed) = changes.completed {
            patch = patch.completed(completed);
        }
        if let Some(due_date) = changes.due_date {
            let due_date = match due_date.as_deref().map(str::trim) {
                Some(raw) if !raw.is_empty() => Some(self.validate_due_date(raw)?),
                _ => None,
            };
            patch = patch.due_date(due_date);
        }

        Ok(patch)
    }

    /// A due date must be a `YYYY-MM-DD` calendar date no earlier than today.
    fn validate_due_date(&self, raw: &str) -> TodoResult<NaiveDate> {
        let date = NaiveDate::parse_from_str(raw, DUE_DATE_FORMAT).map_err(|_| TodoError::validation(Message::InvalidDueDateFormat))?;

        if date < self.today() {
            return Err(TodoError::validation(Message::DueDateInPast));
        }

        Ok(date)
    }
}

/// A title must contain something besides whitespace; it is stored as sent.
fn validate_title(raw: &str) -> TodoResult<String> {
    if raw.trim().is_empty() {
        return Err(TodoError::validation(Message::TitleRequired));
    }
    Ok(raw.to_string())
}

/// Blank or missing categories fall back to the default one.
fn normalize_category(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(category) if !category.is_empty() => category.to_string(),
        _ => DEFAULT_CATEGORY.to_string(),
    }
}

fn parse_priority(raw: &str) -> TodoResult<Priority> {
    raw.trim().parse().map_err(|e: InvalidPriority| TodoError::Validation(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::db::Db;

    fn fixed_today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn service() -> TodoService {
        TodoService::with_clock(Todos::new(Db::open_in_memory().unwrap()), fixed_today)
    }

    #[test]
    fn due_date_today_is_accepted() {
        let service = service();
        let input = NewTodo {
            due_date: Some("2024-06-15".to_string()),
            ..NewTodo::titled("File taxes")
        };

        let created = service.create(input).unwrap();
        assert_eq!(created.todo.due_date, Some(fixed_today()));
        assert!(!created.is_overdue);
    }

    #[test]
    fn due_date_yesterday_is_rejected() {
        let err = service()
            .create(NewTodo {
                due_date: Some("2024-06-14".to_string()),
                ..NewTodo::titled("File taxes")
            })
            .unwrap_err();

        assert_eq!(err.to_string(), "Due date cannot be in the past.");
    }

    #[test]
    fn malformed_due_date_is_rejected() {
        for raw in ["invalid-date", "2024/06/20", "2024-02-30"] {
            let err = service()
                .create(NewTodo {
                    due_date: Some(raw.to_string()),
                    ..NewTodo::titled("File taxes")
                })
                .unwrap_err();
            assert_eq!(err.to_string(), "Invalid due date format. Please use YYYY-MM-DD format.");
        }
    }

    #[test]
    fn blank_title_is_rejected_on_create_and_update() {
        let service = service();
        let err = service.create(NewTodo::titled("   ")).unwrap_err();
        assert_eq!(err.to_string(), "Title is required");

        let created = service.create(NewTodo::titled("Real title")).unwrap();
        let changes = TodoChanges {
            title: Some(String::new()),
            ..Default::default()
        };
        let err = service.update(created.todo.id, changes).unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
    }

    #[test]
    fn empty_due_date_on_update_clears_it() {
        let service = service();
        let created = service
            .create(NewTodo {
                due_date: Some("2024-07-01".to_string()),
                ..NewTodo::titled("Renew passport")
            })
            .unwrap();

        let changes = TodoChanges {
            due_date: Some(Some(String::new())),
            ..Default::default()
        };
        let updated = service.update(created.todo.id, changes).unwrap();
        assert_eq!(updated.todo.due_date, None);
        assert!(updated.todo.updated_at >= updated.todo.created_at);
    }
}
