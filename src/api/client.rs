//! HTTP client for the EMS REST API.
//!
//! The [`EmsApi`] trait is the seam the sync engine talks through; tests
//! substitute their own implementation.

use std::time::Duration;

use chrono::NaiveDate;
use reqwest::Response;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::errors::{AppError, AppResult};
use crate::models::{AttendanceRecord, Department, Employee, LeaveRequest};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
const ERROR_BODY_LIMIT: usize = 200;

/// Remote operations the client performs against the EMS API.
#[allow(async_fn_in_trait)]
pub trait EmsApi {
    async fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>>;
    async fn create_attendance(&self, record: &AttendanceRecord) -> AppResult<AttendanceRecord>;
    async fn update_attendance(
        &self,
        id: &str,
        record: &AttendanceRecord,
    ) -> AppResult<AttendanceRecord>;
    async fn list_employees(&self) -> AppResult<Vec<Employee>>;
    async fn list_departments(&self) -> AppResult<Vec<Department>>;
    async fn list_leaves(&self) -> AppResult<Vec<LeaveRequest>>;
    async fn create_leave(&self, request: &LeaveRequest) -> AppResult<LeaveRequest>;
    async fn delete_leave(&self, id: &str) -> AppResult<()>;
}

pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

/// Attendance body as the server expects it. Local bookkeeping fields
/// (`synced`) stay off the wire; `id` is sent only when the client owns
/// one, so the server assigns ids for plain online creates.
#[derive(Serialize)]
struct AttendancePayload<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<&'a str>,
    employee_id: &'a str,
    date: NaiveDate,
    time_in: &'a str,
    time_out: &'a str,
    workinghours: u32,
    workingminutes: u32,
}

impl<'a> From<&'a AttendanceRecord> for AttendancePayload<'a> {
    fn from(r: &'a AttendanceRecord) -> Self {
        Self {
            id: r.id.as_deref(),
            employee_id: &r.employee_id,
            date: r.date,
            time_in: &r.time_in,
            time_out: &r.time_out,
            workinghours: r.workinghours,
            workingminutes: r.workingminutes,
        }
    }
}

impl ApiClient {
    pub fn new(base_url: &str) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str, what: &str) -> AppResult<Vec<T>> {
        let resp = self.http.get(self.url(path)).send().await?;
        let resp = check(resp).await?;
        let raw: Vec<Value> = resp.json().await?;
        debug!("fetched {} {what} row(s)", raw.len());
        Ok(parse_rows(raw, what))
    }
}

impl EmsApi for ApiClient {
    async fn list_attendance(&self) -> AppResult<Vec<AttendanceRecord>> {
        self.get_list("/attendance", "attendance").await
    }

    async fn create_attendance(&self, record: &AttendanceRecord) -> AppResult<AttendanceRecord> {
        let resp = self
            .http
            .post(self.url("/attendance"))
            .json(&AttendancePayload::from(record))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn update_attendance(
        &self,
        id: &str,
        record: &AttendanceRecord,
    ) -> AppResult<AttendanceRecord> {
        let resp = self
            .http
            .put(self.url(&format!("/attendance/{id}")))
            .json(&AttendancePayload::from(record))
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn list_employees(&self) -> AppResult<Vec<Employee>> {
        self.get_list("/employees", "employee").await
    }

    async fn list_departments(&self) -> AppResult<Vec<Department>> {
        self.get_list("/departments", "department").await
    }

    async fn list_leaves(&self) -> AppResult<Vec<LeaveRequest>> {
        self.get_list("/leaves", "leave").await
    }

    async fn create_leave(&self, request: &LeaveRequest) -> AppResult<LeaveRequest> {
        let resp = self
            .http
            .post(self.url("/leaves"))
            .json(request)
            .send()
            .await?;
        let resp = check(resp).await?;
        Ok(resp.json().await?)
    }

    async fn delete_leave(&self, id: &str) -> AppResult<()> {
        let resp = self
            .http
            .delete(self.url(&format!("/leaves/{id}")))
            .send()
            .await?;
        check(resp).await?;
        Ok(())
    }
}

/// Map non-success responses to a typed error carrying the status and a
/// trimmed body excerpt.
async fn check(resp: Response) -> AppResult<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    Err(AppError::Api {
        status: status.as_u16(),
        message: body.chars().take(ERROR_BODY_LIMIT).collect(),
    })
}

/// Rows the server returns are not always well formed. Keep what parses,
/// log and skip the rest.
fn parse_rows<T: DeserializeOwned>(raw: Vec<Value>, what: &str) -> Vec<T> {
    raw.into_iter()
        .filter_map(|row| match serde_json::from_value(row) {
            Ok(item) => Some(item),
            Err(err) => {
                warn!("skipping malformed {what} row: {err}");
                None
            }
        })
        .collect()
}
