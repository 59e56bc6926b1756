use crate::api::{ApiClient, EmsApi};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::id_or_dash;
use crate::utils::table::{Column, Table};

/// Handle the `employees` subcommand
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let api = ApiClient::new(&cfg.api_base_url)?;
    let employees = api.list_employees().await?;

    if employees.is_empty() {
        info("No employees found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Name", 20),
        Column::new("Email", 26),
        Column::new("Position", 20),
        Column::new("Department", 16),
        Column::new("Joined", 10),
        Column::new("Status", 8),
    ]);
    for e in &employees {
        table.add_row(vec![
            id_or_dash(e.id.as_deref()),
            e.name.clone(),
            e.email.clone(),
            e.position.clone(),
            e.department.clone(),
            e.join_date.clone(),
            e.status.clone(),
        ]);
    }

    print!("{}", table.render());
    info(format!("{} employee(s)", employees.len()));
    Ok(())
}
