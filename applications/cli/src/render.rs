/// Plain-text rendering of records
use employee_client::{Record, SearchResult};

const MISSING: &str = "-";

/// One table row: id, name, email separated by tabs.
pub fn row(record: &Record) -> String {
    format!(
        "{}\t{}\t{}",
        record
            .id()
            .map_or_else(|| MISSING.to_string(), |id| id.to_string()),
        record.name().unwrap_or(MISSING),
        record.email().unwrap_or(MISSING)
    )
}

pub fn table(records: &[Record]) -> String {
    if records.is_empty() {
        return "No employees".to_string();
    }

    let mut out = String::from("ID\tNAME\tEMAIL");
    for record in records {
        out.push('\n');
        out.push_str(&row(record));
    }
    out.push_str(&format!("\n{} users", records.len()));
    out
}

pub fn search(result: &SearchResult) -> String {
    match result {
        SearchResult::Found(record) => format!(
            "Name: {}\nEmail: {}",
            record.name().unwrap_or(MISSING),
            record.email().unwrap_or(MISSING)
        ),
        SearchResult::NotFound => "No user found for that email.".to_string(),
        SearchResult::Absent => String::new(),
    }
}

pub fn profile(record: Option<&Record>) -> String {
    let Some(record) = record else {
        return "No user found.".to_string();
    };

    format!(
        "{}\n{}\nEmployee ID: {}\nStatus: Active",
        record.name().unwrap_or("Unnamed"),
        record.email().unwrap_or(MISSING),
        record.id().map_or_else(|| "N/A".to_string(), |id| id.to_string())
    )
}
