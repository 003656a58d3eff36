use super::todo::TodoView;
use anyhow::Result;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn todos(todos: &[TodoView]) -> Result<()> {
        let mut table = Table::new();

        table.add_row(row!["ID", "TITLE", "CATEGORY", "PRIORITY", "DUE", "DONE", ""]);
        for view in todos {
            let todo = &view.todo;
            table.add_row(row![
                todo.id,
                todo.title,
                todo.category,
                todo.priority,
                todo.due_date.map(|d| d.to_string()).unwrap_or_default(),
                if todo.completed { "x" } else { "" },
                if view.is_overdue { "OVERDUE" } else { "" }
            ]);
        }
        table.printstd();

        Ok(())
    }
}
