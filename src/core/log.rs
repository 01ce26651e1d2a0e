use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;
use crate::utils::formatting::truncate;
use ansi_term::Colour;

const OP_WIDTH: usize = 40;

/// ANSI colour for an audit operation
fn color_for_operation(op: &str) -> Colour {
    match op {
        "add" => Colour::Green,
        "del" => Colour::Red,
        "edit" => Colour::Yellow,
        "export" => Colour::Cyan,
        "migration_applied" => Colour::Purple,
        "init" => Colour::RGB(255, 153, 51), // orange
        _ => Colour::White,
    }
}

pub struct LogLogic;

impl LogLogic {
    pub fn print_log(pool: &DbPool) -> AppResult<()> {
        let entries = load_log(&pool.conn)?;

        if entries.is_empty() {
            info("The log is empty.");
            return Ok(());
        }

        let id_w = entries
            .iter()
            .map(|e| e.id.to_string().len())
            .max()
            .unwrap_or(1);

        let dates: Vec<String> = entries
            .iter()
            .map(|e| {
                chrono::DateTime::parse_from_rfc3339(&e.date)
                    .map(|dt| dt.format("%FT%T%:z").to_string())
                    .unwrap_or_else(|_| e.date.clone())
            })
            .collect();
        let date_w = dates.iter().map(String::len).max().unwrap_or(10);

        println!("📜 Internal log:\n");

        for (e, date) in entries.iter().zip(&dates) {
            let color = color_for_operation(&e.operation);

            // only the operation is coloured; pad on the visible text
            let target = if e.target.is_empty() {
                String::new()
            } else {
                truncate(&format!(" ({})", e.target), OP_WIDTH.saturating_sub(e.operation.len()))
            };
            let visible = e.operation.len() + target.chars().count();
            let padding = " ".repeat(OP_WIDTH.saturating_sub(visible));

            println!(
                "{:>id_w$}: {:<date_w$} | {}{}{} => {}",
                e.id,
                date,
                color.paint(e.operation.as_str()),
                target,
                padding,
                e.message,
                id_w = id_w,
                date_w = date_w
            );
        }

        Ok(())
    }
}
