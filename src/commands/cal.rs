use anyhow::Result;
use campo_core::{TaskStore, ViewMode, month_cells, week_cells};
use chrono::{Datelike, Local, NaiveDate};
use owo_colors::OwoColorize;

pub async fn run(store: &TaskStore, date: NaiveDate, mode: Option<&str>) -> Result<()> {
    let mode = match mode {
        Some(key) => {
            let mode = ViewMode::from_key(key)
                .ok_or_else(|| anyhow::anyhow!("Invalid mode '{}'. Expected mes or semana", key))?;
            // Remember the explicit choice for next time
            store.set_view_mode(mode).await?;
            mode
        }
        None => store.view_mode().await?,
    };

    let cells = match mode {
        ViewMode::Month => {
            println!("{}", date.format("%B %Y").to_string().bold());
            month_cells(date)
        }
        ViewMode::Week => {
            println!("{}", format!("Week of {}", date).bold());
            week_cells(date)
        }
    };

    println!(" Sun  Mon  Tue  Wed  Thu  Fri  Sat");
    let today = Local::now().date_naive();

    for row in cells.chunks(7) {
        let mut line = String::new();
        for cell in row {
            let count = store.tasks_for(cell.date).await.len();
            let day = format!("{:>3}{}", cell.date.day(), if count > 0 { "." } else { " " });
            let rendered = if cell.date == today {
                day.bold().to_string()
            } else if cell.outside_month {
                day.dimmed().to_string()
            } else {
                day
            };
            line.push_str(&rendered);
            line.push(' ');
        }
        println!("{}", line.trim_end());
    }

    println!();
    println!("{}", "A dot marks days with tasks".dimmed());
    Ok(())
}
