use czml_model::ModelError;
use czml_validator::{CzmlSummary, ValidationResult};

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "no"
    }
}

pub fn render_validation(source: &str, result: &ValidationResult) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{source}: {} ({} packets, document: {}, clock: {})\n",
        if result.valid { "valid" } else { "invalid" },
        result.packet_count,
        yes_no(result.has_document),
        yes_no(result.has_clock),
    ));
    if !result.entity_types.is_empty() {
        let types: Vec<&str> = result.entity_types.iter().map(|t| t.as_str()).collect();
        out.push_str(&format!("entity types: {}\n", types.join(", ")));
    }
    for issue in result.issues() {
        out.push_str(&format!("  {issue}\n"));
    }
    out.push_str(&format!(
        "{} errors, {} warnings\n",
        result.errors.len(),
        result.warnings.len()
    ));
    out
}

pub fn render_summary(summary: &CzmlSummary) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} (version {})\n", summary.name, summary.version));
    out.push_str(&format!("entities: {}\n", summary.entity_count));
    match &summary.time_interval {
        Some(interval) => out.push_str(&format!("clock: {interval}\n")),
        None => out.push_str(&format!("clock: {}\n", yes_no(summary.has_clock))),
    }
    for (kind, count) in &summary.entity_types {
        out.push_str(&format!("  {kind}: {count}\n"));
    }
    out
}

pub fn render_rejections(rejected: &[(usize, ModelError)]) -> String {
    if rejected.is_empty() {
        return String::new();
    }
    let mut out = format!("{} packets do not fit the typed model:\n", rejected.len());
    for (index, err) in rejected {
        out.push_str(&format!("  [{index}] {err}\n"));
    }
    out
}
