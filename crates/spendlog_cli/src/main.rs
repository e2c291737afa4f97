//! Command-line front end over `spendlog_core`.
//!
//! # Responsibility
//! - Render the list and add/edit screens as subcommands against the
//!   local JSON store.
//! - Keep all business rules in the core; this binary only parses input
//!   and prints results.

use spendlog_core::{
    default_log_level, init_logging, Category, Expense, ExpenseStore, FormController,
    JsonFileStore, ListController,
};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "\
spendlog — expense tracker

USAGE:
    spendlog list [CATEGORY]
    spendlog add AMOUNT CATEGORY [NOTE]
    spendlog edit ID [--amount A] [--category C] [--note N]
    spendlog delete ID [--yes]

Categories: Food, Travel, Shopping, Bills, Others";

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> Result<(), String> {
    let Some(command) = args.first() else {
        return Err(USAGE.to_string());
    };

    if command == "--version" {
        println!("spendlog {}", spendlog_core::core_version());
        return Ok(());
    }

    let data_dir = resolve_data_dir()?;
    let log_dir = data_dir.join("logs");
    init_logging(
        default_log_level(),
        log_dir.to_str().ok_or("log directory path is not UTF-8")?,
    )?;

    let store_path = data_dir.join("expenses.json");
    match command.as_str() {
        "list" => cmd_list(store_path, args.get(1).map(String::as_str)),
        "add" => cmd_add(store_path, &args[1..]),
        "edit" => cmd_edit(store_path, &args[1..]),
        "delete" => cmd_delete(store_path, &args[1..]),
        other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
    }
}

fn resolve_data_dir() -> Result<PathBuf, String> {
    if let Ok(dir) = std::env::var("SPENDLOG_DATA_DIR") {
        if !dir.trim().is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    dirs::data_dir()
        .map(|base| base.join("spendlog"))
        .ok_or_else(|| "could not determine a data directory; set SPENDLOG_DATA_DIR".to_string())
}

fn parse_category(raw: &str) -> Result<Category, String> {
    Category::parse(raw).ok_or_else(|| {
        format!(
            "unknown category `{raw}`; expected one of: {}",
            Category::ALL.map(Category::as_str).join(", ")
        )
    })
}

fn cmd_list(store_path: PathBuf, category: Option<&str>) -> Result<(), String> {
    let mut controller = ListController::new(JsonFileStore::new(store_path));
    controller.refresh().map_err(|err| err.to_string())?;

    if let Some(raw) = category {
        controller.set_filter(Some(parse_category(raw)?));
    }

    let visible = controller.filtered();
    if visible.is_empty() {
        println!("No expenses found.");
        return Ok(());
    }
    for expense in visible {
        print_expense(expense);
    }
    Ok(())
}

fn cmd_add(store_path: PathBuf, args: &[String]) -> Result<(), String> {
    let [amount, category, rest @ ..] = args else {
        return Err(format!("add needs AMOUNT and CATEGORY\n\n{USAGE}"));
    };

    let mut form = FormController::new(JsonFileStore::new(store_path));
    form.set_amount(amount.clone());
    form.set_category(parse_category(category)?);
    if !rest.is_empty() {
        form.set_note(rest.join(" "));
    }

    form.submit().map_err(|err| err.to_string())?;
    println!("Expense added!");
    Ok(())
}

fn cmd_edit(store_path: PathBuf, args: &[String]) -> Result<(), String> {
    let Some(id) = args.first() else {
        return Err(format!("edit needs an ID\n\n{USAGE}"));
    };

    let store = JsonFileStore::new(store_path.clone());
    let existing = find_expense(&store, id)?;

    let mut form = FormController::edit(JsonFileStore::new(store_path), &existing);
    let mut rest = args[1..].iter();
    while let Some(flag) = rest.next() {
        let value = rest
            .next()
            .ok_or_else(|| format!("missing value for `{flag}`"))?;
        match flag.as_str() {
            "--amount" => form.set_amount(value.clone()),
            "--category" => form.set_category(parse_category(value)?),
            "--note" => form.set_note(value.clone()),
            other => return Err(format!("unknown flag `{other}`\n\n{USAGE}")),
        }
    }

    form.submit().map_err(|err| err.to_string())?;
    println!("Expense updated!");
    Ok(())
}

fn cmd_delete(store_path: PathBuf, args: &[String]) -> Result<(), String> {
    let Some(id) = args.first() else {
        return Err(format!("delete needs an ID\n\n{USAGE}"));
    };
    let skip_confirm = args.iter().any(|arg| arg == "--yes");

    let mut controller = ListController::new(JsonFileStore::new(store_path));
    controller.refresh().map_err(|err| err.to_string())?;

    let target = controller
        .records()
        .iter()
        .find(|e| e.id.as_str() == id)
        .cloned()
        .ok_or_else(|| format!("no expense with id {id}"))?;

    if !skip_confirm && !confirm_delete(&target)? {
        println!("Cancelled.");
        return Ok(());
    }

    controller
        .delete_confirmed(&target.id)
        .map_err(|err| err.to_string())?;
    println!("Expense deleted.");
    Ok(())
}

fn confirm_delete(expense: &Expense) -> Result<bool, String> {
    print!(
        "Delete {} {} ({})? [y/N] ",
        expense.amount, expense.category, expense.id
    );
    io::stdout().flush().map_err(|err| err.to_string())?;

    let mut answer = String::new();
    io::stdin()
        .lock()
        .read_line(&mut answer)
        .map_err(|err| err.to_string())?;
    Ok(matches!(answer.trim(), "y" | "Y" | "yes"))
}

fn find_expense(store: &JsonFileStore, id: &str) -> Result<Expense, String> {
    store
        .list()
        .map_err(|err| err.to_string())?
        .into_iter()
        .find(|e| e.id.as_str() == id)
        .ok_or_else(|| format!("no expense with id {id}"))
}

fn print_expense(expense: &Expense) {
    let note = if expense.note.is_empty() {
        String::new()
    } else {
        format!("  {}", expense.note)
    };
    println!(
        "{}  {:>10}  {:<8}{note}  [{}]",
        expense.date, expense.amount, expense.category, expense.id
    );
}
