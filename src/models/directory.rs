//! Directory models: employees, departments and leave requests.
//!
//! These mirror the EMS wire format, which uses camelCase field names,
//! unlike the snake_case attendance rows.

use chrono::{NaiveDate, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

use crate::config::Identity;
use crate::errors::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default, deserialize_with = "crate::models::de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub department: String,
    #[serde(default, rename = "joinDate")]
    pub join_date: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    #[serde(default, deserialize_with = "crate::models::de_opt_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub manager: String,
    #[serde(default, rename = "employeeCount")]
    pub employee_count: u32,
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveType {
    Vacation,
    Sick,
    Personal,
    Maternity,
    Paternity,
}

impl LeaveType {
    pub fn parse(s: &str) -> AppResult<Self> {
        match s.to_lowercase().as_str() {
            "vacation" => Ok(LeaveType::Vacation),
            "sick" => Ok(LeaveType::Sick),
            "personal" => Ok(LeaveType::Personal),
            "maternity" => Ok(LeaveType::Maternity),
            "paternity" => Ok(LeaveType::Paternity),
            _ => Err(AppError::InvalidLeaveType(s.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveType::Vacation => "Vacation",
            LeaveType::Sick => "Sick",
            LeaveType::Personal => "Personal",
            LeaveType::Maternity => "Maternity",
            LeaveType::Paternity => "Paternity",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LeaveStatus {
    Pending,
    Approved,
    Rejected,
}

impl LeaveStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            LeaveStatus::Pending => "Pending",
            LeaveStatus::Approved => "Approved",
            LeaveStatus::Rejected => "Rejected",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRequest {
    #[serde(
        default,
        deserialize_with = "crate::models::de_opt_id",
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<String>,
    #[serde(rename = "employeeId")]
    pub employee_id: String,
    #[serde(default, rename = "employeeName")]
    pub employee_name: String,
    #[serde(rename = "type")]
    pub leave_type: LeaveType,
    #[serde(rename = "startDate")]
    pub start_date: NaiveDate,
    #[serde(rename = "endDate")]
    pub end_date: NaiveDate,
    #[serde(default)]
    pub days: u32,
    #[serde(default)]
    pub reason: String,
    pub status: LeaveStatus,
    #[serde(default, rename = "submittedAt")]
    pub submitted_at: String,
}

impl LeaveRequest {
    /// New pending request covering `start..=end`, both days included.
    pub fn new(
        identity: &Identity,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
        reason: &str,
    ) -> Self {
        let days = (end_date - start_date).num_days().max(0) as u32 + 1;
        Self {
            id: None,
            employee_id: identity.id.clone(),
            employee_name: identity.name.clone(),
            leave_type,
            start_date,
            end_date,
            days,
            reason: reason.to_string(),
            status: LeaveStatus::Pending,
            submitted_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}
