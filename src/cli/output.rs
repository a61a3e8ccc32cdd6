//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Record;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

fn text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

/// Print a table of records (#, Service, Login, Comment).  Passwords
/// are never shown here.
pub fn print_records_table<'a>(rows: impl IntoIterator<Item = (usize, &'a Record)>) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Service", "Login", "Comment"]);

    let mut count = 0;
    for (index, record) in rows {
        table.add_row(vec![
            index.to_string(),
            text(&record.service),
            text(&record.login),
            text(&record.comment),
        ]);
        count += 1;
    }

    if count == 0 {
        info("No matching records.");
        tip("Run `passkeeper add --service <NAME>` to add one.");
        return;
    }

    println!("{table}");
}

/// Print every field of one record.
pub fn print_record(index: usize, record: &Record) {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec![format!("#{index}"), record.display_name()]);
    table.add_row(vec!["Service".to_string(), text(&record.service)]);
    table.add_row(vec!["Login".to_string(), text(&record.login)]);
    table.add_row(vec!["Password".to_string(), text(&record.password)]);
    table.add_row(vec!["Comment".to_string(), text(&record.comment)]);
    println!("{table}");
}
