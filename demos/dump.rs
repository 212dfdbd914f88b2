//! Parse a configuration file and print the normalized tree.
//!
//! Run with: cargo run --example dump -- path/to/config.toml
//!
//! With no argument a built-in sample is parsed instead.

use std::env;
use std::error::Error;
use std::fs::File;

use tomlish::{parse_reader, parse_str, to_string, Document, NodeId};

const SAMPLE: &str = r#"
# built-in sample
title = "demo"

[server]
host = "localhost"
port = 8080
timeout = 2.5

[server.tls]
enabled = true
"#;

fn main() -> Result<(), Box<dyn Error>> {
    let doc = match env::args().nth(1) {
        Some(path) => parse_reader(File::open(path)?)?,
        None => parse_str(SAMPLE)?,
    };

    let mut sections = Vec::new();
    collect_sections(&doc, doc.root(), &mut sections);

    println!("parsed {} nodes:", doc.node_count());
    for (key, scalars) in &sections {
        let label = if key.is_empty() { "(root)" } else { key };
        println!("  {} - {} field(s)", label, scalars);
    }

    println!("\nnormalized output:\n{}", to_string(&doc));
    Ok(())
}

fn collect_sections(doc: &Document, id: NodeId, out: &mut Vec<(String, usize)>) {
    let node = &doc[id];
    let scalars = node.values().filter(|v| !v.is_table()).count();
    out.push((doc.full_key(id), scalars));

    for value in node.values() {
        if let Some(child) = value.as_table() {
            collect_sections(doc, child, out);
        }
    }
}
