//! End-to-end flows through the public API with in-memory capabilities.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use dashboard_web::core::error::FetchError;
use dashboard_web::core::{
    ApiClient, FieldRule, FormValues, HttpRequest, HttpResponse, LocalTask, Method, Poller,
    Scheduler, Transport, ValidationRules, read_cookie, validate,
};
use serde_json::{Value, json};

/// Serves a fixed JSON document per URL and records every request.
#[derive(Default)]
struct StubServer {
    routes: Vec<(&'static str, u16, &'static str)>,
    log: RefCell<Vec<HttpRequest>>,
}

impl StubServer {
    fn route(mut self, url: &'static str, status: u16, body: &'static str) -> Self {
        self.routes.push((url, status, body));
        self
    }
}

impl Transport for StubServer {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, FetchError> {
        let reply = self
            .routes
            .iter()
            .find(|(url, ..)| *url == request.url)
            .map(|(_, status, body)| HttpResponse {
                status: *status,
                body: body.to_string(),
            })
            .ok_or_else(|| FetchError::Network(format!("connection refused: {}", request.url)));
        self.log.borrow_mut().push(request);
        reply
    }
}

/// Runs spawned tasks on demand and fires interval ticks by hand.
#[derive(Default)]
struct StepScheduler {
    ticks: RefCell<Vec<Option<Box<dyn FnMut()>>>>,
    queue: RefCell<VecDeque<LocalTask>>,
}

impl StepScheduler {
    fn tick_all(&self) {
        for tick in self.ticks.borrow_mut().iter_mut().flatten() {
            tick();
        }
    }

    async fn run_pending(&self) {
        loop {
            let next = self.queue.borrow_mut().pop_front();
            let Some(task) = next else { break };
            task.await;
        }
    }
}

impl Scheduler for StepScheduler {
    type Task = usize;

    fn every(&self, _period_ms: u32, tick: Box<dyn FnMut()>) -> usize {
        let mut ticks = self.ticks.borrow_mut();
        ticks.push(Some(tick));
        ticks.len() - 1
    }

    fn cancel(&self, task: usize) {
        self.ticks.borrow_mut()[task] = None;
    }

    fn spawn(&self, task: LocalTask) {
        self.queue.borrow_mut().push_back(task);
    }
}

const JAR: &str = "theme=dark; sessionid=s%3D42; csrftoken=abc";

#[tokio::test]
async fn alert_is_created_with_session_headers() {
    let server = StubServer::default().route("/api/alerts/", 201, r#"{"id": 9, "level": "high"}"#);
    let client = ApiClient::new(server, JAR);

    let created: Value = client
        .post("/api/alerts/", &json!({"title": "Flood warning", "level": "high"}))
        .await
        .unwrap();
    assert_eq!(created["id"], 9);

    let log = client.transport().log.borrow();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].method, Method::Post);
    assert_eq!(log[0].header("Authorization"), Some("Bearer s=42"));
    assert_eq!(log[0].header("X-CSRFToken"), Some("abc"));
}

#[tokio::test]
async fn delete_of_unknown_route_is_a_network_error() {
    let client = ApiClient::new(StubServer::default(), JAR);
    let err = client.delete("/api/alerts/404/").await.unwrap_err();
    assert!(matches!(err, FetchError::Network(msg) if msg.contains("/api/alerts/404/")));
}

#[tokio::test]
async fn dashboard_poll_delivers_until_stopped() {
    let server = StubServer::default().route("/api/stats/", 200, r#"{"active": 3}"#);
    let poller = Poller::new(ApiClient::new(server, JAR), StepScheduler::default());

    let calls = Rc::new(Cell::new(0));
    let seen = Rc::clone(&calls);
    let handle = poller.start("/api/stats/", 30_000, move |data| {
        assert_eq!(data, json!({"active": 3}));
        seen.set(seen.get() + 1);
    });

    poller.scheduler().run_pending().await;
    poller.scheduler().tick_all();
    poller.scheduler().run_pending().await;
    assert_eq!(calls.get(), 2);

    poller.stop(handle);
    poller.scheduler().tick_all();
    poller.scheduler().run_pending().await;
    assert_eq!(calls.get(), 2);
    assert_eq!(poller.client().transport().log.borrow().len(), 2);
}

#[test]
fn signup_form_validation() {
    let rules: ValidationRules = [
        ("username".to_string(), FieldRule::required().min_length(3)),
        ("email".to_string(), FieldRule::required().and_email()),
        ("bio".to_string(), FieldRule::default().min_length(10)),
    ]
    .into_iter()
    .collect();

    let data = FormValues::from_entries([("username", "al"), ("email", "al@example")]);
    let errors = validate(&data, &rules);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors["username"], "username must be at least 3 characters");
    assert_eq!(errors["email"], "email must be a valid email");

    let fixed = FormValues::from_entries([("username", "alice"), ("email", "al@example.org")]);
    assert!(validate(&fixed, &rules).is_empty());
}

#[test]
fn cookie_lookup_matches_request_headers() {
    assert_eq!(read_cookie(JAR, "sessionid").as_deref(), Some("s=42"));
    assert_eq!(read_cookie(JAR, "missing"), None);
}
