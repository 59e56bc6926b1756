#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::{Value, json};
use std::env;
use std::fs;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard};

pub fn ems() -> Command {
    cargo_bin_cmd!("emsclock")
}

/// Isolated home directory so every test gets its own config and state
/// database under `<home>/.emsclock/`.
pub struct TestHome {
    pub dir: PathBuf,
}

impl TestHome {
    pub fn new(name: &str) -> Self {
        let dir = env::temp_dir().join(format!("emsclock_{}_{}", name, std::process::id()));
        fs::remove_dir_all(&dir).ok();
        fs::create_dir_all(&dir).expect("create test home");
        Self { dir }
    }

    pub fn cmd(&self) -> Command {
        let mut c = ems();
        c.env("HOME", &self.dir);
        c.env("APPDATA", &self.dir);
        c
    }

    pub fn state_db(&self) -> String {
        self.dir
            .join(".emsclock")
            .join("emsclock.sqlite")
            .to_string_lossy()
            .to_string()
    }

    pub fn config_file(&self) -> PathBuf {
        self.dir.join(".emsclock").join("emsclock.conf")
    }

    pub fn out_file(&self, name: &str) -> PathBuf {
        self.dir.join(name)
    }
}

/// Initialize the client against `api` with the default test identity.
pub fn init_at(home: &TestHome, api: &str) {
    home.cmd()
        .args([
            "init",
            "--api",
            api,
            "--employee-id",
            "E1",
            "--name",
            "Dana Kim",
        ])
        .assert()
        .success();
}

/// A port nothing listens on, for simulating an unreachable server.
pub fn free_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    port
}

pub fn dead_api() -> String {
    format!("http://127.0.0.1:{}", free_port())
}

pub fn today() -> String {
    chrono::Local::now().date_naive().to_string()
}

#[derive(Default)]
pub struct StubState {
    pub attendance: Vec<Value>,
    pub employees: Vec<Value>,
    pub departments: Vec<Value>,
    pub leaves: Vec<Value>,
    /// Every request the server answered, as "METHOD /path".
    pub hits: Vec<String>,
    pub next_id: u64,
}

type Shared = Arc<Mutex<StubState>>;

/// Minimal EMS REST stub, in-memory, inspectable from tests. Runs on its
/// own thread with its own runtime so tests stay plain `#[test]` fns
/// driving the CLI binary.
pub struct StubServer {
    pub base_url: String,
    state: Shared,
}

impl StubServer {
    pub fn spawn() -> Self {
        let state: Shared = Arc::new(Mutex::new(StubState {
            next_id: 1,
            ..StubState::default()
        }));
        let shared = Arc::clone(&state);
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::spawn(move || {
            let rt = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("stub runtime");
            rt.block_on(async move {
                let app = router(shared);
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind stub server");
                tx.send(listener.local_addr().expect("stub addr"))
                    .expect("send stub addr");
                axum::serve(listener, app).await.expect("serve stub");
            });
        });

        let addr = rx.recv().expect("stub server did not start");
        Self {
            base_url: format!("http://{addr}"),
            state,
        }
    }

    pub fn url(&self) -> String {
        self.base_url.clone()
    }

    fn lock(&self) -> MutexGuard<'_, StubState> {
        self.state.lock().expect("stub state lock")
    }

    pub fn seed_attendance(&self, record: Value) {
        self.lock().attendance.push(record);
    }

    pub fn seed_employee(&self, employee: Value) {
        self.lock().employees.push(employee);
    }

    pub fn seed_department(&self, department: Value) {
        self.lock().departments.push(department);
    }

    pub fn seed_leave(&self, leave: Value) {
        self.lock().leaves.push(leave);
    }

    pub fn attendance(&self) -> Vec<Value> {
        self.lock().attendance.clone()
    }

    pub fn leaves(&self) -> Vec<Value> {
        self.lock().leaves.clone()
    }

    pub fn hits(&self) -> Vec<String> {
        self.lock().hits.clone()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route(
            "/attendance",
            get(list_attendance).post(create_attendance),
        )
        .route("/attendance/:id", put(update_attendance))
        .route("/employees", get(list_employees))
        .route("/departments", get(list_departments))
        .route("/leaves", get(list_leaves).post(create_leave))
        .route("/leaves/:id", delete(delete_leave))
        .with_state(state)
}

fn id_matches(row: &Value, id: &str) -> bool {
    match row.get("id") {
        Some(Value::String(s)) => s == id,
        Some(Value::Number(n)) => n.to_string() == id,
        _ => false,
    }
}

async fn list_attendance(State(state): State<Shared>) -> Json<Vec<Value>> {
    let mut s = state.lock().expect("lock");
    s.hits.push("GET /attendance".to_string());
    Json(s.attendance.clone())
}

async fn create_attendance(
    State(state): State<Shared>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut s = state.lock().expect("lock");
    s.hits.push("POST /attendance".to_string());
    let duplicate = match body.get("id") {
        Some(id) => s.attendance.iter().any(|r| r.get("id") == Some(id)),
        None => false,
    };
    if duplicate {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"message": "duplicate id"})),
        );
    }
    if body.get("id").is_none() {
        let id = s.next_id;
        s.next_id += 1;
        body["id"] = json!(id);
    }
    s.attendance.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn update_attendance(
    State(state): State<Shared>,
    Path(id): Path<String>,
    Json(mut body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    let mut s = state.lock().expect("lock");
    s.hits.push(format!("PUT /attendance/{id}"));
    match s.attendance.iter_mut().find(|r| id_matches(r, &id)) {
        Some(row) => {
            body["id"] = row["id"].clone();
            *row = body.clone();
            Ok(Json(body))
        }
        None => Err(StatusCode::NOT_FOUND),
    }
}

async fn list_employees(State(state): State<Shared>) -> Json<Vec<Value>> {
    let mut s = state.lock().expect("lock");
    s.hits.push("GET /employees".to_string());
    Json(s.employees.clone())
}

async fn list_departments(State(state): State<Shared>) -> Json<Vec<Value>> {
    let mut s = state.lock().expect("lock");
    s.hits.push("GET /departments".to_string());
    Json(s.departments.clone())
}

async fn list_leaves(State(state): State<Shared>) -> Json<Vec<Value>> {
    let mut s = state.lock().expect("lock");
    s.hits.push("GET /leaves".to_string());
    Json(s.leaves.clone())
}

async fn create_leave(
    State(state): State<Shared>,
    Json(mut body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let mut s = state.lock().expect("lock");
    s.hits.push("POST /leaves".to_string());
    if body.get("id").is_none() {
        let id = s.next_id;
        s.next_id += 1;
        body["id"] = json!(id);
    }
    s.leaves.push(body.clone());
    (StatusCode::CREATED, Json(body))
}

async fn delete_leave(State(state): State<Shared>, Path(id): Path<String>) -> StatusCode {
    let mut s = state.lock().expect("lock");
    s.hits.push(format!("DELETE /leaves/{id}"));
    let before = s.leaves.len();
    s.leaves.retain(|l| !id_matches(l, &id));
    if s.leaves.len() < before {
        StatusCode::OK
    } else {
        StatusCode::NOT_FOUND
    }
}
