pub mod attendance;
pub mod directory;

pub use attendance::AttendanceRecord;
pub use directory::{Department, Employee, LeaveRequest, LeaveStatus, LeaveType};

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Record ids arrive as strings or as bare numbers depending on how the
/// row was created. Normalize both to a string.
pub(crate) fn de_opt_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}
