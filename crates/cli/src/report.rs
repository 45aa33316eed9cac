use argtab_resolver::table::{ArgTable, Entry};
use indexmap::IndexMap;
use serde::Serialize;

/// Resolved views of every stored option, in first-seen order.
#[derive(Debug, Serialize)]
pub struct Report {
    pub options: IndexMap<String, ResolvedOption>,
}

/// One stored name with its raw payload and the three typed read results.
///
/// Each name is resolved independently, so a stored `-noname` row shows its
/// own truth value; pair semantics belong to `get_bool` queries.
#[derive(Debug, Serialize)]
pub struct ResolvedOption {
    /// Raw payload; absent for a bare switch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub string: String,
    #[serde(rename = "bool")]
    pub boolean: bool,
    #[serde(rename = "int")]
    pub integer: i64,
    pub occurrences: usize,
}

/// Resolve every stored option through the table's read API.
pub fn build(table: &ArgTable) -> Report {
    let mut options = IndexMap::new();
    for name in table.names() {
        let Some(entry) = table.get(name) else {
            continue;
        };
        let value = match entry {
            Entry::Switch => None,
            Entry::Assigned(payload) => Some(payload.clone()),
        };
        options.insert(
            name.to_string(),
            ResolvedOption {
                value,
                string: table.get_str(name, ""),
                boolean: table.get_bool(name, false),
                integer: table.get_int(name, 0),
                occurrences: table.get_all(name).len(),
            },
        );
    }
    Report { options }
}

/// Render the report as one token-shaped line per option.
pub fn render_plain(report: &Report) -> String {
    let mut out = String::new();
    for (name, option) in &report.options {
        match &option.value {
            Some(value) => out.push_str(&format!("{name}={value}\n")),
            None => out.push_str(&format!("{name}\n")),
        }
    }
    out
}
