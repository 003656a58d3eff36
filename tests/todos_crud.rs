#[cfg(test)]
mod tests {
    use todo_api::libs::error::TodoError;
    use todo_api::libs::service::TodoService;
    use todo_api::libs::todo::{NewTodo, Priority, TodoChanges, TodoQuery};
    use tempfile::TempDir;
    use test_context::{test_context, TestContext};

    struct StoreTestContext {
        _temp_dir: TempDir,
        service: TodoService,
    }

    impl TestContext for StoreTestContext {
        fn setup() -> Self {
            let temp_dir = tempfile::tempdir().unwrap();
            let service = TodoService::open(temp_dir.path().join("todos.db")).unwrap();
            StoreTestContext {
                _temp_dir: temp_dir,
                service,
            }
        }
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_create_applies_defaults(ctx: &mut StoreTestContext) {
        let created = ctx.service.create(NewTodo::titled("Buy milk")).unwrap();

        assert_eq!(created.todo.title, "Buy milk");
        assert_eq!(created.todo.category, "General");
        assert_eq!(created.todo.priority, Priority::Medium);
        assert!(!created.todo.completed);
        assert_eq!(created.todo.due_date, None);
        assert!(!created.is_overdue);
        assert_eq!(created.todo.created_at, created.todo.updated_at);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_create_keeps_supplied_fields(ctx: &mut StoreTestContext) {
        let input = NewTodo {
            category: Some("Work".to_string()),
            priority: Some("High".to_string()),
            ..NewTodo::titled("  Send report  ")
        };
        let created = ctx.service.create(input).unwrap();

        let fetched = ctx.service.get(created.todo.id).unwrap();
        assert_eq!(fetched.todo.title, "  Send report  ");

        let listed = ctx.service.list(&TodoQuery::new()).unwrap();
        assert_eq!(listed[0].todo.title, "  Send report  ");
        assert_eq!(fetched.todo.category, "Work");
        assert_eq!(fetched.todo.priority, Priority::High);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_ids_are_unique_and_not_reused(ctx: &mut StoreTestContext) {
        let first = ctx.service.create(NewTodo::titled("First")).unwrap().todo.id;
        let second = ctx.service.create(NewTodo::titled("Second")).unwrap().todo.id;
        assert_ne!(first, second);

        ctx.service.delete(second).unwrap();
        let third = ctx.service.create(NewTodo::titled("Third")).unwrap().todo.id;
        assert!(third > second);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_only_touches_supplied_fields(ctx: &mut StoreTestContext) {
        let input = NewTodo {
            category: Some("Home".to_string()),
            ..NewTodo::titled("Fix sink")
        };
        let created = ctx.service.create(input).unwrap();

        let changes = TodoChanges {
            completed: Some(true),
            priority: Some("Low".to_string()),
            ..Default::default()
        };
        let updated = ctx.service.update(created.todo.id, changes).unwrap();

        assert!(updated.todo.completed);
        assert_eq!(updated.todo.priority, Priority::Low);
        assert_eq!(updated.todo.title, "Fix sink");
        assert_eq!(updated.todo.category, "Home");
        assert_eq!(updated.todo.created_at, created.todo.created_at);
        assert!(updated.todo.updated_at >= created.todo.updated_at);
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_rejects_empty_changes(ctx: &mut StoreTestContext) {
        let created = ctx.service.create(NewTodo::titled("Anything")).unwrap();

        let err = ctx.service.update(created.todo.id, TodoChanges::default()).unwrap_err();
        assert!(matches!(err, TodoError::Validation(_)));
        assert!(err.to_string().contains("dueDate"));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_unknown_id_is_not_found(ctx: &mut StoreTestContext) {
        let changes = TodoChanges {
            title: Some("Ghost".to_string()),
            ..Default::default()
        };

        let err = ctx.service.update(9999, changes).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(9999)));
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_update_with_invalid_priority_changes_nothing(ctx: &mut StoreTestContext) {
        let created = ctx.service.create(NewTodo::titled("Stay the same")).unwrap();
        let changes = TodoChanges {
            title: Some("Changed".to_string()),
            priority: Some("Urgent".to_string()),
            ..Default::default()
        };

        let err = ctx.service.update(created.todo.id, changes).unwrap_err();
        assert_eq!(err.to_string(), "Priority must be one of: Low, Medium, High");

        let fetched = ctx.service.get(created.todo.id).unwrap();
        assert_eq!(fetched.todo.title, "Stay the same");
    }

    #[test_context(StoreTestContext)]
    #[test]
    fn test_delete_twice_reports_not_found(ctx: &mut StoreTestContext) {
        let created = ctx.service.create(NewTodo::titled("Temporary")).unwrap();

        ctx.service.delete(created.todo.id).unwrap();
        let err = ctx.service.delete(created.todo.id).unwrap_err();
        assert!(matches!(err, TodoError::NotFound(_)));

        assert!(ctx.service.list(&TodoQuery::new()).unwrap().is_empty());
    }

    #[test]
    fn test_records_survive_reopen() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("todos.db");

        let service = TodoService::open(&path).unwrap();
        let id = service.create(NewTodo::titled("Persist me")).unwrap().todo.id;
        service.close().unwrap();

        let service = TodoService::open(&path).unwrap();
        assert_eq!(service.get(id).unwrap().todo.title, "Persist me");
        service.close().unwrap();
    }
}
