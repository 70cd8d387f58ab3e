use crate::permits::loader::LoadedView;
use crate::permits::record::AnnotatedRecord;

const SUMMARY_FIELDS: &[&str] = &["address", "description", "permit_type", "status"];
const ID_FIELDS: &[&str] = &["permit_number", "permit_id", "id"];
const MAX_SUMMARY_CHARS: usize = 120;

/// Truncate to `max_chars`, appending `…` when cut.
fn truncate_with_ellipsis(input: &str, max_chars: usize) -> String {
    let clean: String = input.chars().filter(|c| !c.is_control()).collect();
    if clean.chars().count() > max_chars {
        let mut s: String = clean.chars().take(max_chars).collect();
        s.push('…');
        s
    } else {
        clean
    }
}

pub fn record_line(annotated: &AnnotatedRecord) -> String {
    let record = &annotated.record;
    let id = ID_FIELDS.iter().find_map(|f| record.field_str(f));
    let summary = SUMMARY_FIELDS
        .iter()
        .filter_map(|f| record.field_str(f))
        .collect::<Vec<_>>()
        .join(" | ");
    let neighborhood = record.neighborhood_label().unwrap_or("no neighborhood");

    let mut line = match id {
        Some(id) => format!("#{id} "),
        None => String::new(),
    };
    line.push_str(&format!("[{neighborhood}]"));
    if !summary.is_empty() {
        line.push(' ');
        line.push_str(&truncate_with_ellipsis(&summary, MAX_SUMMARY_CHARS));
    }
    line
}

/// Text lines for a loaded view, one header per date group.
pub fn view_lines(view: &LoadedView) -> Vec<String> {
    let mut out = Vec::new();
    if view.groups.is_empty() {
        out.push("no results".to_string());
        return out;
    }
    for group in &view.groups {
        out.push(format!("{} ({})", group.date, group.records.len()));
        for record in &group.records {
            out.push(format!("  - {}", record_line(record)));
        }
    }
    out
}
