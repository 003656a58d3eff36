//! Todo record model and the request shapes that operate on it.
//!
//! - [`Todo`] is a stored row.
//! - [`TodoView`] is what callers receive: the row plus the read-time
//!   `is_overdue` projection.
//! - [`NewTodo`] and [`TodoChanges`] carry raw, unvalidated client input.
//! - [`TodoDraft`] and [`TodoPatch`] are their validated forms, consumed by
//!   the store.
//! - [`TodoQuery`] describes list filters and ordering.

use crate::libs::messages::Message;
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub const DEFAULT_CATEGORY: &str = "General";
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}", Message::InvalidPriority)]
pub struct InvalidPriority;

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = InvalidPriority;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Priority::ALL.into_iter().find(|p| p.as_str() == s).ok_or(InvalidPriority)
    }
}

impl ToSql for Priority {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Priority {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value.as_str()?.parse().map_err(|e| FromSqlError::Other(Box::new(e)))
    }
}

/// A todo row as persisted in the `todos` table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Todo {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Todo {
    /// Overdue means: a due date exists, the todo is still open, and the due
    /// date lies strictly before `today`.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.completed && self.due_date.is_some_and(|due| due < today)
    }

    pub fn into_view(self, today: NaiveDate) -> TodoView {
        let is_overdue = self.is_overdue(today);
        TodoView { todo: self, is_overdue }
    }
}

/// A todo with its overdue status evaluated against a given day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TodoView {
    #[serde(flatten)]
    pub todo: Todo,
    pub is_overdue: bool,
}

/// Raw create input, exactly as a client sent it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewTodo {
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    #[serde(rename = "dueDate")]
    pub due_date: Option<String>,
}

impl NewTodo {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Raw partial-update input.
///
/// `due_date` distinguishes an absent key (`None`, leave unchanged) from an
/// explicit `null` or empty string (`Some(None)` / `Some(Some(""))`, clear).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub completed: Option<bool>,
    #[serde(rename = "dueDate", default, deserialize_with = "present")]
    pub due_date: Option<Option<String>>,
}

impl TodoChanges {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.category.is_none() && self.priority.is_none() && self.completed.is_none() && self.due_date.is_none()
    }
}

fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Validated create input.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoDraft {
    pub title: String,
    pub category: String,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
}

/// Mutable columns of a todo. The column names are the only identifiers that
/// ever get interpolated into update statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum TodoField {
    Title,
    Category,
    Priority,
    Completed,
    DueDate,
}

impl TodoField {
    pub fn column(&self) -> &'static str {
        match self {
            TodoField::Title => "title",
            TodoField::Category => "category",
            TodoField::Priority => "priority",
            TodoField::Completed => "completed",
            TodoField::DueDate => "due_date",
        }
    }
}

/// Validated partial update: the set of fields to write and their new values.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    changes: Vec<(TodoField, Value)>,
}

impl TodoPatch {
    pub fn new() -> Self {
        Self::default()
    }

    fn set(&mut self, field: TodoField, value: Value) {
        match self.changes.iter_mut().find(|(f, _)| *f == field) {
            Some(slot) => slot.1 = value,
            None => self.changes.push((field, value)),
        }
        self.changes.sort_by_key(|(f, _)| *f);
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.set(TodoField::Title, Value::Text(title.into()));
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.set(TodoField::Category, Value::Text(category.into()));
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.set(TodoField::Priority, Value::Text(priority.as_str().to_string()));
        self
    }

    pub fn completed(mut self, completed: bool) -> Self {
        self.set(TodoField::Completed, Value::Integer(completed as i64));
        self
    }

    pub fn due_date(mut self, due_date: Option<NaiveDate>) -> Self {
        let value = match due_date {
            Some(date) => Value::Text(date.format(DUE_DATE_FORMAT).to_string()),
            None => Value::Null,
        };
        self.set(TodoField::DueDate, value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = TodoField> + '_ {
        self.changes.iter().map(|(field, _)| *field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TodoField, &Value)> {
        self.changes.iter().map(|(field, value)| (*field, value))
    }
}

/// Columns a list may be ordered by. Unknown names fall back to `CreatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    CreatedAt,
    Title,
    Category,
    Priority,
    Completed,
    DueDate,
}

impl SortField {
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("title") => SortField::Title,
            Some("category") => SortField::Category,
            Some("priority") => SortField::Priority,
            Some("completed") => SortField::Completed,
            Some("due_date") => SortField::DueDate,
            _ => SortField::CreatedAt,
        }
    }

    /// Column used in `ORDER BY`. Priority sorts by its stored text, so
    /// ascending order is High, Low, Medium.
    pub fn order_expr(&self) -> &'static str {
        match self {
            SortField::CreatedAt => "created_at",
            SortField::Title => "title",
            SortField::Category => "category",
            SortField::Priority => "priority",
            SortField::Completed => "completed",
            SortField::DueDate => "due_date",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// Anything other than a case-insensitive `ASC` means descending.
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if v.trim().eq_ignore_ascii_case("asc") => SortOrder::Asc,
            _ => SortOrder::Desc,
        }
    }

    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

/// List filters plus ordering. Blank filter values count as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

impl TodoQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from loosely-typed parameters, applying the silent
    /// fallbacks for unknown sort values.
    pub fn from_params(
        search: Option<String>,
        category: Option<String>,
        priority: Option<String>,
        sort_by: Option<&str>,
        sort_order: Option<&str>,
    ) -> Self {
        Self {
            search: non_blank(search),
            category: non_blank(category),
            priority: non_blank(priority),
            sort_by: SortField::from_param(sort_by),
            sort_order: SortOrder::from_param(sort_order),
        }
    }

    pub fn sorted(mut self, sort_by: SortField, sort_order: SortOrder) -> Self {
        self.sort_by = sort_by;
        self.sort_order = sort_order;
        self
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
