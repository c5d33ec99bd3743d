//! `prompt-patch` — apply patch operations to a prompt document.
//!
//! Usage:
//!   prompt-patch '<ops-array-json>'
//!
//! The document is read from stdin. Each operation is
//! `{"op": "add"|"replace"|"remove", "path": "<pointer>", "valueText": "<json>"}`.

use std::io::{self, Read, Write};

use clap::Parser;
use promptdoc::json_cli::{apply_json_patch, init_logging};

#[derive(Parser)]
#[command(name = "prompt-patch", about = "Apply patch operations to a prompt document read from stdin")]
struct Args {
    /// Operations as a JSON array.
    ops: String,
}

fn main() {
    let args = Args::parse();
    init_logging();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match apply_json_patch(buf.trim(), &args.ops) {
        Ok(result) => {
            if let Err(e) = writeln!(io::stdout(), "{result}") {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}
