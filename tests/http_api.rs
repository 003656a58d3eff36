#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use todo_api::api::create_router;
    use todo_api::db::db::Db;
    use todo_api::db::todos::Todos;
    use todo_api::libs::service::TodoService;
    use test_context::{test_context, AsyncTestContext};
    use tower::ServiceExt;

    struct HttpTestContext {
        app: Router,
    }

    impl AsyncTestContext for HttpTestContext {
        async fn setup() -> Self {
            let service = TodoService::new(Todos::new(Db::open_in_memory().unwrap()));
            HttpTestContext {
                app: create_router(service),
            }
        }
    }

    impl HttpTestContext {
        async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
            let builder = Request::builder().method(method).uri(uri);
            let request = match body {
                Some(body) => builder
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
                None => builder.body(Body::empty()).unwrap(),
            };

            let response = self.app.clone().oneshot(request).await.unwrap();
            let status = response.status();
            let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
            (status, serde_json::from_slice(&bytes).unwrap())
        }

        async fn create(&self, body: Value) -> Value {
            let (status, created) = self.send("POST", "/api/todos", Some(body)).await;
            assert_eq!(status, StatusCode::CREATED);
            created
        }
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_health(ctx: &mut HttpTestContext) {
        let (status, body) = ctx.send("GET", "/api/health", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "OK", "message": "TODO API is running"}));
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_create_returns_full_record(ctx: &mut HttpTestContext) {
        let created = ctx.create(json!({"title": "Buy milk"})).await;

        assert!(created["id"].is_i64());
        assert_eq!(created["title"], "Buy milk");
        assert_eq!(created["category"], "General");
        assert_eq!(created["priority"], "Medium");
        assert_eq!(created["completed"], false);
        assert_eq!(created["due_date"], Value::Null);
        assert_eq!(created["is_overdue"], false);
        assert!(created["created_at"].is_string());
        assert!(created["updated_at"].is_string());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_create_accepts_future_due_date(ctx: &mut HttpTestContext) {
        let created = ctx.create(json!({"title": "Plan party", "dueDate": "2999-12-31", "priority": "High"})).await;

        assert_eq!(created["due_date"], "2999-12-31");
        assert_eq!(created["priority"], "High");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_create_validation_errors(ctx: &mut HttpTestContext) {
        let cases = [
            (json!({"title": "Late", "dueDate": "2020-01-01"}), "Due date cannot be in the past."),
            (json!({"title": "Bad", "dueDate": "invalid-date"}), "Invalid due date format. Please use YYYY-MM-DD format."),
            (json!({"title": "Bad", "priority": "Urgent"}), "Priority must be one of: Low, Medium, High"),
            (json!({"category": "Work"}), "Title is required"),
        ];

        for (body, message) in cases {
            let (status, error) = ctx.send("POST", "/api/todos", Some(body)).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(error["error"], message);
        }

        let (_, todos) = ctx.send("GET", "/api/todos", None).await;
        assert_eq!(todos, json!([]));
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_malformed_json_is_bad_request(ctx: &mut HttpTestContext) {
        let request = Request::builder()
            .method("POST")
            .uri("/api/todos")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let response = ctx.app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: Value = serde_json::from_slice(&to_bytes(response.into_body(), usize::MAX).await.unwrap()).unwrap();
        assert!(body["error"].is_string());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_list_filters_and_sorts(ctx: &mut HttpTestContext) {
        ctx.create(json!({"title": "Buy milk", "category": "Home", "priority": "Low"})).await;
        ctx.create(json!({"title": "Write report", "category": "Work", "priority": "High"})).await;
        ctx.create(json!({"title": "Call mom", "category": "Home", "priority": "High"})).await;

        let (status, todos) = ctx.send("GET", "/api/todos?category=Home&sortBy=title&sortOrder=asc", None).await;
        assert_eq!(status, StatusCode::OK);
        let titles: Vec<&str> = todos.as_array().unwrap().iter().map(|t| t["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Buy milk", "Call mom"]);

        let (_, todos) = ctx.send("GET", "/api/todos?search=report&priority=High", None).await;
        assert_eq!(todos.as_array().unwrap().len(), 1);

        let (status, todos) = ctx.send("GET", "/api/todos?sortBy=bogus&sortOrder=bogus", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(todos[0]["title"], "Call mom");
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_priority_sort_uses_stored_text(ctx: &mut HttpTestContext) {
        for priority in ["Medium", "High", "Low"] {
            ctx.create(json!({"title": format!("{} task", priority), "priority": priority})).await;
        }

        let (status, todos) = ctx.send("GET", "/api/todos?sortBy=priority&sortOrder=ASC", None).await;
        assert_eq!(status, StatusCode::OK);
        let priorities: Vec<&str> = todos.as_array().unwrap().iter().map(|t| t["priority"].as_str().unwrap()).collect();
        assert_eq!(priorities, vec!["High", "Low", "Medium"]);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_update_partial_fields(ctx: &mut HttpTestContext) {
        let created = ctx.create(json!({"title": "Fix sink", "dueDate": "2999-01-01"})).await;
        let uri = format!("/api/todos/{}", created["id"]);

        let (status, updated) = ctx.send("PUT", &uri, Some(json!({"completed": true}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(updated["completed"], true);
        assert_eq!(updated["title"], "Fix sink");
        assert_eq!(updated["due_date"], "2999-01-01");

        let (status, cleared) = ctx.send("PUT", &uri, Some(json!({"dueDate": null}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cleared["due_date"], Value::Null);
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_update_errors(ctx: &mut HttpTestContext) {
        let created = ctx.create(json!({"title": "Something"})).await;
        let uri = format!("/api/todos/{}", created["id"]);

        let (status, _) = ctx.send("PUT", &uri, Some(json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, body) = ctx.send("PUT", "/api/todos/9999", Some(json!({"title": "Ghost"}))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Todo not found");

        let (status, body) = ctx.send("PUT", "/api/todos/abc", Some(json!({"title": "Ghost"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["error"].is_string());
    }

    #[test_context(HttpTestContext)]
    #[tokio::test]
    async fn test_delete_then_delete_again(ctx: &mut HttpTestContext) {
        let created = ctx.create(json!({"title": "Temporary"})).await;
        let uri = format!("/api/todos/{}", created["id"]);

        let (status, body) = ctx.send("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Todo deleted successfully");

        let (status, body) = ctx.send("DELETE", &uri, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "Todo not found");
    }
}
