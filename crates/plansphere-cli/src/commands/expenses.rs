//! Expense tracking, budget and CSV export/import commands

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use plansphere_core::ai::TravelAi;
use plansphere_core::export::{expenses_from_csv, expenses_to_csv};
use plansphere_core::models::Expense;
use plansphere_core::service::Concierge;
use plansphere_core::session::Session;
use plansphere_core::store::KeyValueStore;
use plansphere_core::taxonomy;

use super::truncate;

pub async fn cmd_expense_add<S: KeyValueStore, A: TravelAi>(
    session: &mut Session<S>,
    concierge: Option<&Concierge<A>>,
    description: &str,
    amount: f64,
    category: Option<&str>,
    subcategory: Option<&str>,
    auto: bool,
) -> Result<()> {
    let tag = if auto {
        let concierge = concierge.context("--auto requires an AI backend")?;
        let suggested = concierge.tag_expense(description, amount).await;
        println!(
            "Suggested category: {} / {}",
            suggested.category, suggested.subcategory
        );
        suggested
    } else {
        match (category, subcategory) {
            (Some(c), Some(s)) => taxonomy::correct(c, s),
            (Some(c), None) => taxonomy::correct(c, ""),
            _ => taxonomy::default_tag(),
        }
    };

    let expense = Expense::new(&tag.category, &tag.subcategory, amount, description);
    let id = expense.id.clone();
    session.add_expense(expense)?;
    println!("Recorded {:.2} under {} / {} ({})", amount, tag.category, tag.subcategory, id);
    print_budget_line(session);
    Ok(())
}

pub fn cmd_expense_list<S: KeyValueStore>(session: &Session<S>) -> Result<()> {
    if session.expenses.is_empty() {
        println!("No expenses recorded.");
        return Ok(());
    }

    println!(
        "{:<12} {:<14} {:<14} {:<28} {:>10}  {}",
        "Date", "Category", "Subcategory", "Description", "Amount", "Id"
    );
    for expense in &session.expenses {
        println!(
            "{:<12} {:<14} {:<14} {:<28} {:>10.2}  {}",
            expense.date,
            expense.category,
            expense.subcategory,
            truncate(&expense.description, 28),
            expense.amount,
            expense.id
        );
    }
    print_budget_line(session);
    Ok(())
}

pub fn cmd_expense_remove<S: KeyValueStore>(session: &mut Session<S>, id: &str) -> Result<()> {
    let known = session.expenses.iter().any(|e| e.id == id);
    session.remove_expense(id)?;
    if known {
        println!("Expense {} removed.", id);
    } else {
        println!("No expense with id {}.", id);
    }
    Ok(())
}

pub fn cmd_expense_export<S: KeyValueStore>(
    session: &Session<S>,
    output: Option<&Path>,
) -> Result<()> {
    let csv = expenses_to_csv(&session.expenses);
    match output {
        Some(path) => {
            fs::write(path, &csv)
                .with_context(|| format!("failed to write {}", path.display()))?;
            println!("Exported {} expense(s) to {}", session.expenses.len(), path.display());
        }
        None => print!("{}", csv),
    }
    Ok(())
}

pub fn cmd_expense_import<S: KeyValueStore>(session: &mut Session<S>, file: &Path) -> Result<()> {
    let contents =
        fs::read(file).with_context(|| format!("failed to read {}", file.display()))?;
    let imported = expenses_from_csv(contents.as_slice())?;
    let count = imported.len();
    let mut merged = session.expenses.clone();
    merged.extend(imported);
    session.replace_expenses(merged)?;
    println!("Imported {} expense(s).", count);
    Ok(())
}

pub fn cmd_budget<S: KeyValueStore>(session: &mut Session<S>, amount: Option<f64>) -> Result<()> {
    if let Some(amount) = amount {
        session.set_budget(amount)?;
        println!("Budget set to {:.2}.", amount);
    }
    print_budget_line(session);
    Ok(())
}

fn print_budget_line<S: KeyValueStore>(session: &Session<S>) {
    let spent = session.spent();
    if session.budget > 0.0 {
        println!(
            "Spent {:.2} of {:.2} ({:.0}%)",
            spent,
            session.budget,
            spent / session.budget * 100.0
        );
    } else {
        println!("Spent {:.2} (no budget set)", spent);
    }
}
