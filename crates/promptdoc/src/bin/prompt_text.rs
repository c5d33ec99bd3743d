//! `prompt-text` — render a prompt document to text.
//!
//! Usage:
//!   prompt-text [--json]
//!
//! The document is read from stdin.

use std::io::{self, Read, Write};

use clap::Parser;
use promptdoc::json_cli::{init_logging, render_prompt_text};

#[derive(Parser)]
#[command(name = "prompt-text", about = "Render a prompt document read from stdin")]
struct Args {
    /// Print `{"positive", "negative"}` instead of the text block.
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = Args::parse();
    init_logging();

    let mut buf = String::new();
    if let Err(e) = io::stdin().read_to_string(&mut buf) {
        eprintln!("{e}");
        std::process::exit(1);
    }

    match render_prompt_text(buf.trim(), args.json) {
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
