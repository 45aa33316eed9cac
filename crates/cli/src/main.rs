mod report;

use anyhow::{Context, Result, bail};
use argtab_resolver::table::ArgTable;
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    let argv: Vec<String> = std::env::args().collect();
    let mut table = ArgTable::from_argv(&argv);
    init_tracing(&table);

    if table.get_bool("-help", false) || table.get_bool("-h", false) {
        print_usage();
        return Ok(());
    }

    if table.get_bool("-version", false) {
        println!("argtab {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if table.is_set("-query") {
        query(&mut table)
    } else {
        dump(&table)
    }
}

/// Resolve a single option and print it on stdout.
fn query(table: &mut ArgTable) -> Result<()> {
    // Seed the read kind the soft way, so an explicit -as always wins.
    table.soft_set("-as", "string");

    let name = table.get_str("-query", "");
    if name.is_empty() {
        bail!("-query needs an option name (e.g. -query=-foo)");
    }

    tracing::debug!(name = %name, "resolving query");

    let kind = table.get_str("-as", "");
    match kind.as_str() {
        "string" => {
            let default = table.get_str("-default", "");
            println!("{}", table.get_str(&name, &default));
        }
        "bool" => {
            let default = table.get("-default").is_some_and(|entry| entry.truth());
            println!("{}", table.get_bool(&name, default));
        }
        "int" => {
            let raw = table.get_str("-default", "0");
            let default: i64 = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid -default integer: {raw}"))?;
            println!("{}", table.get_int(&name, default));
        }
        other => bail!("unknown -as kind: {other} (expected string, bool, or int)"),
    }

    Ok(())
}

/// Dump every stored option, in first-seen order.
fn dump(table: &ArgTable) -> Result<()> {
    tracing::debug!(options = table.len(), "resolved argument table");

    let report = report::build(table);
    match table.get_str("-format", "plain").as_str() {
        "plain" => print!("{}", report::render_plain(&report)),
        "json" => println!("{}", serde_json::to_string_pretty(&report)?),
        other => bail!("unknown -format: {other} (expected plain or json)"),
    }

    Ok(())
}

fn print_usage() {
    eprintln!("argtab - resolve daemon-style -name=value arguments");
    eprintln!();
    eprintln!("Usage: argtab [OPTIONS]");
    eprintln!();
    eprintln!("Options are schema-less: anything of the form -name or -name=value is");
    eprintln!("stored and resolved; everything else is ignored. -noname negates -name");
    eprintln!("for boolean reads, and an explicit -name always beats -noname.");
    eprintln!();
    eprintln!("  -query=<name>     resolve one option and print it");
    eprintln!("  -as=<kind>        query read type: string, bool, or int");
    eprintln!("  -default=<value>  query default when the option is unset");
    eprintln!("  -format=<fmt>     dump format: plain or json");
    eprintln!("  -debug            default the log filter to debug");
    eprintln!("  -help             show this help");
    eprintln!("  -version          show the version");
}

fn init_tracing(table: &ArgTable) {
    let fallback = if table.get_bool("-debug", false) {
        "debug"
    } else {
        "info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
