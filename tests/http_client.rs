//! End-to-end tests against an in-process activities service.

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::{Path, Query, State},
    http::{Method, StatusCode, Uri},
    routing::{delete, get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use activity_board::api::client::HttpClientConfig;
use activity_board::api::HttpClient;
use activity_board::view::ACTIVITIES_LIST_ID;
use activity_board::{
    ActionOutcome, Activities, Activity, ActivityApi, ActivityBoard, ApiError, BoardOptions,
    DomPatch, LoadOutcome, MessageKind, PendingHide, RemovalTarget, SignupForm, Surface,
};

// ============ Fake service ============

#[derive(Clone)]
struct ServiceState {
    activities: Arc<Mutex<Activities>>,
    log: Arc<Mutex<Vec<String>>>,
}

impl ServiceState {
    fn record(&self, method: Method, uri: &Uri) {
        self.log.lock().unwrap().push(format!("{} {}", method, uri));
    }
}

#[derive(Deserialize)]
struct EmailQuery {
    email: String,
}

type Reply = Result<Json<Value>, (StatusCode, Json<Value>)>;

fn reject(status: StatusCode, detail: &str) -> (StatusCode, Json<Value>) {
    (status, Json(json!({ "detail": detail })))
}

async fn list(State(state): State<ServiceState>, method: Method, uri: Uri) -> Json<Activities> {
    state.record(method, &uri);
    Json(state.activities.lock().unwrap().clone())
}

async fn signup(
    State(state): State<ServiceState>,
    method: Method,
    uri: Uri,
    Path(name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Reply {
    state.record(method, &uri);
    let mut activities = state.activities.lock().unwrap();
    let mut activity = activities
        .get(&name)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Activity not found"))?;
    if activity.participants.contains(&query.email) {
        return Err(reject(StatusCode::BAD_REQUEST, "Student is already signed up"));
    }
    activity.participants.push(query.email.clone());
    activities.insert(name.clone(), activity);
    Ok(Json(json!({ "message": format!("Signed up {} for {}", query.email, name) })))
}

async fn unregister(
    State(state): State<ServiceState>,
    method: Method,
    uri: Uri,
    Path(name): Path<String>,
    Query(query): Query<EmailQuery>,
) -> Reply {
    state.record(method, &uri);
    let mut activities = state.activities.lock().unwrap();
    let mut activity = activities
        .get(&name)
        .cloned()
        .ok_or_else(|| reject(StatusCode::NOT_FOUND, "Activity not found"))?;
    if !activity.participants.contains(&query.email) {
        return Err(reject(
            StatusCode::BAD_REQUEST,
            "Student is not registered for this activity",
        ));
    }
    activity.participants.retain(|p| *p != query.email);
    activities.insert(name.clone(), activity);
    Ok(Json(json!({ "message": format!("Unregistered {} from {}", query.email, name) })))
}

fn seed() -> Activities {
    let activity = |description: &str, schedule: &str, max, participants: &[&str]| Activity {
        description: description.to_string(),
        schedule: schedule.to_string(),
        max_participants: max,
        participants: participants.iter().map(|p| p.to_string()).collect(),
    };

    let mut activities = Activities::new();
    activities.insert(
        "Soccer Team",
        activity(
            "Join the varsity soccer team and compete in regional tournaments",
            "Mondays and Wednesdays, 4:00 PM - 6:00 PM",
            25,
            &["alex@mergington.edu", "ryan@mergington.edu"],
        ),
    );
    activities.insert(
        "Chess Club",
        activity(
            "Learn strategies and compete in chess tournaments",
            "Fridays, 3:30 PM - 5:00 PM",
            12,
            &[],
        ),
    );
    activities
}

async fn spawn_service(router: Router) -> SocketAddr {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

async fn start() -> (HttpClient, ServiceState) {
    let state = ServiceState {
        activities: Arc::new(Mutex::new(seed())),
        log: Arc::new(Mutex::new(Vec::new())),
    };
    let router = Router::new()
        .route("/activities", get(list))
        .route("/activities/:name/signup", post(signup))
        .route("/activities/:name/unregister", delete(unregister))
        .with_state(state.clone());

    let addr = spawn_service(router).await;
    (client_for(addr), state)
}

fn client_for(addr: SocketAddr) -> HttpClient {
    HttpClient::new(HttpClientConfig {
        base_url: format!("http://{}/", addr),
        request_timeout: Some(Duration::from_secs(5)),
    })
    .unwrap()
}

// ============ Surface ============

#[derive(Clone, Default)]
struct Recorder {
    patches: Arc<Mutex<Vec<DomPatch>>>,
    answer: bool,
}

impl Recorder {
    fn last_message(&self) -> Option<(String, MessageKind)> {
        self.patches.lock().unwrap().iter().rev().find_map(|p| match p {
            DomPatch::ShowMessage { text, kind } => Some((text.clone(), *kind)),
            _ => None,
        })
    }
}

impl Surface for Recorder {
    fn apply(&self, patches: &[DomPatch]) {
        self.patches.lock().unwrap().extend_from_slice(patches);
    }

    fn confirm(&self, _question: &str) -> bool {
        self.answer
    }

    fn schedule_hide(&self, _hide: PendingHide, _delay: Duration) {}
}

// ============ Tests ============

#[tokio::test]
async fn test_fetch_keeps_server_order() {
    let (client, _state) = start().await;

    let activities = client.fetch_activities().await.unwrap();
    assert_eq!(
        activities.names().collect::<Vec<_>>(),
        vec!["Soccer Team", "Chess Club"]
    );
    assert_eq!(activities.get("Soccer Team").unwrap().capacity(), "2/25");
}

#[tokio::test]
async fn test_signup_goes_out_encoded_and_reloads() {
    let (client, state) = start().await;
    let recorder = Recorder::default();
    let board = ActivityBoard::new(client, recorder.clone(), BoardOptions::default());

    let outcome = board
        .submit_signup(&SignupForm {
            email: "a@b.com".to_string(),
            activity: "Chess Club".to_string(),
        })
        .await;

    assert_eq!(
        outcome,
        ActionOutcome::Succeeded("Signed up a@b.com for Chess Club".to_string())
    );
    assert_eq!(
        state.log.lock().unwrap().clone(),
        vec![
            "POST /activities/Chess%20Club/signup?email=a%40b.com".to_string(),
            "GET /activities".to_string(),
        ]
    );
    assert_eq!(
        recorder.last_message(),
        Some(("Signed up a@b.com for Chess Club".to_string(), MessageKind::Success))
    );
}

#[tokio::test]
async fn test_duplicate_signup_shows_detail() {
    let (client, state) = start().await;
    let recorder = Recorder::default();
    let board = ActivityBoard::new(client, recorder.clone(), BoardOptions::default());

    let outcome = board
        .submit_signup(&SignupForm {
            email: "alex@mergington.edu".to_string(),
            activity: "Soccer Team".to_string(),
        })
        .await;

    assert_eq!(
        outcome,
        ActionOutcome::Failed("Student is already signed up".to_string())
    );
    assert_eq!(state.log.lock().unwrap().len(), 1);
    assert_eq!(
        recorder.last_message().map(|(_, kind)| kind),
        Some(MessageKind::Error)
    );
}

#[tokio::test]
async fn test_unknown_activity_is_rejected() {
    let (client, _state) = start().await;

    let err = client
        .signup("Nonexistent Activity", "student@mergington.edu")
        .await
        .unwrap_err();
    assert_eq!(
        err,
        ApiError::Rejected {
            status: 404,
            detail: Some("Activity not found".to_string())
        }
    );
}

#[tokio::test]
async fn test_confirmed_removal_round_trip() {
    let (client, state) = start().await;
    let recorder = Recorder {
        answer: true,
        ..Default::default()
    };
    let board = ActivityBoard::new(client, recorder.clone(), BoardOptions::default());

    let outcome = board
        .remove_participant(&RemovalTarget::new("Soccer Team", "alex@mergington.edu"))
        .await;
    assert_eq!(
        outcome,
        ActionOutcome::Succeeded("Unregistered alex@mergington.edu from Soccer Team".to_string())
    );

    let patches = recorder.patches.lock().unwrap().clone();
    let list = patches
        .iter()
        .find_map(|p| match p {
            DomPatch::ReplaceChildren { target, nodes } if *target == ACTIVITIES_LIST_ID => {
                Some(nodes.clone())
            }
            _ => None,
        })
        .unwrap();
    assert!(!list[0].text_content().contains("alex@mergington.edu"));
    assert!(list[0].text_content().contains("ryan@mergington.edu"));

    // Second removal of the same participant is refused by the server
    let again = board
        .remove_participant(&RemovalTarget::new("Soccer Team", "alex@mergington.edu"))
        .await;
    assert_eq!(
        again,
        ActionOutcome::Failed("Student is not registered for this activity".to_string())
    );
    assert_eq!(state.log.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_broken_listing_is_a_load_failure() {
    let router = Router::new().route(
        "/activities",
        get(|| async { (StatusCode::OK, "<html>not json</html>") }),
    );
    let addr = spawn_service(router).await;
    let board = ActivityBoard::new(client_for(addr), Recorder::default(), BoardOptions::default());

    assert_eq!(board.load_activities().await, LoadOutcome::Failed);
    assert!(matches!(
        board.api().fetch_activities().await,
        Err(ApiError::Decode(_))
    ));
}

#[tokio::test]
async fn test_server_error_without_detail_uses_fallback() {
    let router = Router::new().route(
        "/activities/:name/unregister",
        delete(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error") }),
    );
    let addr = spawn_service(router).await;
    let recorder = Recorder {
        answer: true,
        ..Default::default()
    };
    let board = ActivityBoard::new(client_for(addr), recorder.clone(), BoardOptions::default());

    let outcome = board
        .remove_participant(&RemovalTarget::new("Chess Club", "a@b.com"))
        .await;
    assert_eq!(outcome, ActionOutcome::Failed("Unregister failed".to_string()));
}
