use crate::api::{ApiClient, EmsApi};
use crate::cli::parser::Commands;
use crate::config::{Config, Identity};
use crate::errors::{AppError, AppResult};
use crate::models::{LeaveRequest, LeaveStatus, LeaveType};
use crate::ui::messages::{info, success};
use crate::utils::date::parse_date;
use crate::utils::formatting::id_or_dash;
use crate::utils::table::{Column, Table};

/// Handle the `leave` subcommand. Listing is the default; `--request`
/// and `--cancel` switch to submission and cancellation.
pub async fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Leave {
        list: _,
        request,
        leave_type,
        from,
        to,
        reason,
        cancel,
    } = cmd
    {
        let api = ApiClient::new(&cfg.api_base_url)?;
        let identity = cfg.identity()?;

        if *request {
            return submit(
                &api,
                &identity,
                leave_type.as_deref(),
                from.as_deref(),
                to.as_deref(),
                reason.as_deref(),
            )
            .await;
        }
        if let Some(id) = cancel {
            return cancel_request(&api, &identity, id).await;
        }
        list_requests(&api, &identity).await?;
    }
    Ok(())
}

async fn submit(
    api: &ApiClient,
    identity: &Identity,
    leave_type: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
    reason: Option<&str>,
) -> AppResult<()> {
    let kind = LeaveType::parse(leave_type.ok_or(AppError::MissingOption("--type"))?)?;

    let from_raw = from.ok_or(AppError::MissingOption("--from"))?;
    let start =
        parse_date(from_raw).ok_or_else(|| AppError::InvalidDate(from_raw.to_string()))?;
    let to_raw = to.ok_or(AppError::MissingOption("--to"))?;
    let end = parse_date(to_raw).ok_or_else(|| AppError::InvalidDate(to_raw.to_string()))?;
    if end < start {
        return Err(AppError::InvalidDate(format!(
            "{to_raw} is before {from_raw}"
        )));
    }

    let reason = reason
        .filter(|r| !r.trim().is_empty())
        .ok_or(AppError::MissingOption("--reason"))?;

    let request = LeaveRequest::new(identity, kind, start, end, reason);
    let created = api.create_leave(&request).await?;

    success(format!(
        "Leave request submitted: {} day(s) of {} leave ({} to {}).",
        created.days,
        created.leave_type.as_str(),
        created.start_date,
        created.end_date,
    ));
    Ok(())
}

async fn cancel_request(api: &ApiClient, identity: &Identity, id: &str) -> AppResult<()> {
    let all = api.list_leaves().await?;
    let found = all
        .into_iter()
        .find(|l| l.id.as_deref() == Some(id) && l.employee_id == identity.id);
    let Some(request) = found else {
        return Err(AppError::LeaveNotFound(id.to_string()));
    };

    if request.status != LeaveStatus::Pending {
        return Err(AppError::LeaveNotCancellable(
            request.status.as_str().to_string(),
        ));
    }

    api.delete_leave(id).await?;
    success(format!("Leave request {id} cancelled."));
    Ok(())
}

async fn list_requests(api: &ApiClient, identity: &Identity) -> AppResult<()> {
    let all = api.list_leaves().await?;
    let own: Vec<LeaveRequest> = all
        .into_iter()
        .filter(|l| l.employee_id == identity.id)
        .collect();

    if own.is_empty() {
        info("No leave requests.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Type", 10),
        Column::new("From", 10),
        Column::new("To", 10),
        Column::new("Days", 4),
        Column::new("Status", 8),
        Column::new("Submitted", 10),
    ]);
    for l in &own {
        table.add_row(vec![
            id_or_dash(l.id.as_deref()),
            l.leave_type.as_str().to_string(),
            l.start_date.to_string(),
            l.end_date.to_string(),
            l.days.to_string(),
            l.status.as_str().to_string(),
            l.submitted_at.chars().take(10).collect(),
        ]);
    }

    print!("{}", table.render());
    info(format!("{} request(s)", own.len()));
    Ok(())
}
