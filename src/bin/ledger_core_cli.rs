use std::{fs, io};

use chrono::{Local, NaiveDate};
use colored::Colorize;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};

use ledger_core::core::LedgerManager;
use ledger_core::errors::LedgerError;
use ledger_core::ledger::{EntryDraft, EntryKind, DEFAULT_CATEGORIES};
use ledger_core::report::MonthlyReport;
use ledger_core::storage::{parse_flexible_date, CsvStore};
use ledger_core::utils;

fn main() {
    ledger_core::init();

    if let Err(err) = run() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), LedgerError> {
    let mut manager = LedgerManager::open(Box::new(CsvStore::new_default()));
    for warning in manager.load_warnings() {
        println!("{}", warning.yellow());
    }
    let mut session = SessionDefaults::load();

    loop {
        let choice = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Personal finance ledger")
            .items(&["Add entry", "Monthly report", "Quit"])
            .default(0)
            .interact()
            .map_err(prompt_err)?;
        match choice {
            0 => add_entry(&mut manager, &mut session)?,
            1 => monthly_report(&mut manager)?,
            _ => return Ok(()),
        }
    }
}

fn add_entry(manager: &mut LedgerManager, session: &mut SessionDefaults) -> Result<(), LedgerError> {
    let kind = prompt_kind(session.kind_default())?;
    let category = prompt_category(session.category.as_deref())?;
    let amount: f64 = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Amount")
        .interact_text()
        .map_err(prompt_err)?;
    let date = prompt_date("Date", Local::now().date_naive())?;
    let note: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Note")
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_err)?;

    let draft = EntryDraft::new(date, kind, category.clone(), amount, note);
    match manager.submit_entry(draft) {
        Ok(_) => {
            println!("{}", "Entry saved.".green());
            session.kind = Some(kind.as_str().to_string());
            session.category = Some(category);
            session.save();
        }
        Err(LedgerError::Validation(message)) => println!("{}", message.red()),
        Err(err) => return Err(err),
    }
    Ok(())
}

fn monthly_report(manager: &mut LedgerManager) -> Result<(), LedgerError> {
    let months = manager.available_months();
    if months.is_empty() {
        println!("No data available yet.");
        return Ok(());
    }
    let labels: Vec<String> = months.iter().map(|m| m.to_string()).collect();
    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Month")
        .items(&labels)
        .default(0)
        .interact()
        .map_err(prompt_err)?;
    let month = months[selected];

    loop {
        let report = manager.select_month(month);
        render_report(&report);
        if report.entries.is_empty() {
            return Ok(());
        }

        let action = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Entries")
            .items(&["Edit entry", "Delete entry", "Back"])
            .default(2)
            .interact()
            .map_err(prompt_err)?;
        match action {
            0 => {
                let row = prompt_row(report.entries.len())?;
                let current = &report.entries[row];
                let kind = prompt_kind(Some(current.kind))?;
                let category = prompt_category(Some(current.category.as_str()))?;
                let amount: f64 = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Amount")
                    .with_initial_text(format!("{:.2}", current.amount))
                    .interact_text()
                    .map_err(prompt_err)?;
                let date = prompt_date("Date", current.date)?;
                let note: String = Input::with_theme(&ColorfulTheme::default())
                    .with_prompt("Note")
                    .with_initial_text(current.note.clone())
                    .allow_empty(true)
                    .interact_text()
                    .map_err(prompt_err)?;
                let draft = EntryDraft::new(date, kind, category, amount, note);
                match manager.edit_entry(month, row, draft) {
                    Ok(()) => println!("{}", "Changes saved.".green()),
                    Err(LedgerError::NotFound(message)) => {
                        println!("{}", format!("Record not found: {message}").red())
                    }
                    Err(err) => return Err(err),
                }
            }
            1 => {
                let row = prompt_row(report.entries.len())?;
                let confirmed = Confirm::with_theme(&ColorfulTheme::default())
                    .with_prompt("Delete this entry?")
                    .default(false)
                    .interact()
                    .map_err(prompt_err)?;
                if confirmed {
                    match manager.delete_entry(month, row) {
                        Ok(removed) => println!(
                            "{}",
                            format!("Deleted {} {:.2}.", removed.category, removed.amount).yellow()
                        ),
                        Err(LedgerError::NotFound(message)) => {
                            println!("{}", format!("Record not found: {message}").red())
                        }
                        Err(err) => return Err(err),
                    }
                }
            }
            _ => return Ok(()),
        }
    }
}

fn render_report(report: &MonthlyReport) {
    println!();
    println!("Summary for {}", report.month.to_string().bold());
    println!("  Income   {}", format!("{:>12.2}", report.totals.income).green());
    println!("  Expenses {}", format!("{:>12.2}", report.totals.expense).red());
    let balance = report.totals.balance();
    let balance_text = format!("{balance:>12.2}");
    let balance_colored = if balance < 0.0 {
        balance_text.red()
    } else {
        balance_text.green()
    };
    println!("  Balance  {balance_colored}");

    println!();
    println!("Expenses by category");
    if report.breakdown.is_empty() {
        println!("  No expenses this month.");
    } else {
        for slice in &report.breakdown.slices {
            println!(
                "  {:<20} {:>10.2}  {:>5.1}%",
                slice.category,
                slice.total,
                slice.share * 100.0
            );
        }
    }

    println!();
    if report.entries.is_empty() {
        println!("No entries this month.");
        return;
    }
    println!(
        "  {:>3}  {:<10}  {:<7}  {:<20}  {:>10}  {}",
        "#", "Date", "Kind", "Category", "Amount", "Note"
    );
    for (index, entry) in report.entries.iter().enumerate() {
        println!(
            "  {:>3}  {:<10}  {:<7}  {:<20}  {:>10.2}  {}",
            index,
            entry.date.format("%d/%m/%Y").to_string(),
            entry.kind,
            entry.category,
            entry.amount,
            entry.note
        );
    }
    println!();
}

fn prompt_kind(default: Option<EntryKind>) -> Result<EntryKind, LedgerError> {
    let default_index = match default {
        Some(EntryKind::Expense) => 1,
        _ => 0,
    };
    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Kind")
        .items(&["Income", "Expense"])
        .default(default_index)
        .interact()
        .map_err(prompt_err)?;
    Ok(if selected == 0 {
        EntryKind::Income
    } else {
        EntryKind::Expense
    })
}

fn prompt_category(default: Option<&str>) -> Result<String, LedgerError> {
    let mut items: Vec<&str> = DEFAULT_CATEGORIES.to_vec();
    items.push("Other…");
    // Unknown categories (permissive store) preselect "Other…" so an edit
    // does not silently swap them for a suggested name.
    let default_index = match default {
        Some(name) => items
            .iter()
            .position(|item| *item == name)
            .unwrap_or(items.len() - 1),
        None => 0,
    };
    let selected = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Category")
        .items(&items)
        .default(default_index)
        .interact()
        .map_err(prompt_err)?;
    if selected == items.len() - 1 {
        let custom: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt("Category name")
            .with_initial_text(default.unwrap_or("").to_string())
            .interact_text()
            .map_err(prompt_err)?;
        Ok(custom)
    } else {
        Ok(items[selected].to_string())
    }
}

fn prompt_date(prompt: &str, default: NaiveDate) -> Result<NaiveDate, LedgerError> {
    let raw: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .with_initial_text(default.format("%Y-%m-%d").to_string())
        .validate_with(|input: &String| {
            parse_flexible_date(input)
                .map(|_| ())
                .ok_or("unrecognized date, try YYYY-MM-DD")
        })
        .interact_text()
        .map_err(prompt_err)?;
    parse_flexible_date(&raw)
        .ok_or_else(|| LedgerError::Validation(format!("unrecognized date `{raw}`")))
}

fn prompt_row(len: usize) -> Result<usize, LedgerError> {
    let row: usize = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("Row index (0-{})", len - 1))
        .validate_with(move |input: &usize| {
            if *input < len {
                Ok(())
            } else {
                Err("index past the end of the table")
            }
        })
        .interact_text()
        .map_err(prompt_err)?;
    Ok(row)
}

fn prompt_err(err: dialoguer::Error) -> LedgerError {
    LedgerError::Io(io::Error::new(io::ErrorKind::Other, err))
}

/// Sticky form defaults for this terminal session, kept out of the core and
/// persisted best-effort under the app data directory.
#[derive(Debug, Default, Serialize, Deserialize)]
struct SessionDefaults {
    #[serde(default)]
    kind: Option<String>,
    #[serde(default)]
    category: Option<String>,
}

impl SessionDefaults {
    fn load() -> Self {
        let path = utils::state_file();
        match fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    fn save(&self) {
        let path = utils::state_file();
        if let Some(parent) = path.parent() {
            if utils::ensure_dir(parent).is_err() {
                return;
            }
        }
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(err) = fs::write(&path, json) {
                    tracing::warn!(error = %err, "failed to persist session defaults");
                }
            }
            Err(err) => tracing::warn!(error = %err, "failed to encode session defaults"),
        }
    }

    fn kind_default(&self) -> Option<EntryKind> {
        self.kind.as_deref().and_then(EntryKind::parse)
    }
}
