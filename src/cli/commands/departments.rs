use crate::api::{ApiClient, EmsApi};
use crate::config::Config;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::id_or_dash;
use crate::utils::table::{Column, Table};

/// Handle the `departments` subcommand
pub async fn handle(cfg: &Config) -> AppResult<()> {
    let api = ApiClient::new(&cfg.api_base_url)?;
    let departments = api.list_departments().await?;

    if departments.is_empty() {
        info("No departments found.");
        return Ok(());
    }

    let mut table = Table::new(vec![
        Column::new("ID", 6),
        Column::new("Name", 18),
        Column::new("Manager", 20),
        Column::new("Employees", 9),
        Column::new("Status", 8),
    ]);
    for d in &departments {
        table.add_row(vec![
            id_or_dash(d.id.as_deref()),
            d.name.clone(),
            d.manager.clone(),
            d.employee_count.to_string(),
            d.status.clone(),
        ]);
    }

    print!("{}", table.render());
    info(format!("{} department(s)", departments.len()));
    Ok(())
}
