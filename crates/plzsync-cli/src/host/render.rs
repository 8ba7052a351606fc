use plzsync::{FieldSnapshot, FieldStatus, FormSnapshot, StatusLine};
use std::fmt::Write;

fn field(label: &str, snapshot: &FieldSnapshot) -> String {
    let marker = match snapshot.status {
        FieldStatus::Idle => "",
        FieldStatus::Pending => " …",
        FieldStatus::Resolved => " ✓",
        FieldStatus::Invalid => " ✗",
    };
    format!("{label:<12}│ {}{marker}", snapshot.value)
}

/// Draws the form as a few lines of text.
pub fn render(form: &FormSnapshot) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", field("Locality", &form.locality));

    let toggle = match (form.toggle_visible(), form.dropdown_open) {
        (false, _) => String::new(),
        (true, false) => format!("  [▾ {} options]", form.candidates.len()),
        (true, true) => "  [▴]".to_owned(),
    };
    let _ = writeln!(out, "{}{toggle}", field("Postal code", &form.postal_code));

    for (code, selected) in form.visible_candidates() {
        let cursor = if selected { '›' } else { ' ' };
        let _ = writeln!(out, "{:<12}│ {cursor} {code}", "");
    }

    match form.status_line() {
        StatusLine::Idle => {}
        line => {
            let _ = writeln!(out, "{:<12}│ {line}", "");
        }
    }

    out
}
