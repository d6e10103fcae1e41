//! Generate CATALOG.md from the calculator catalog.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-catalog
//! ```
//!
//! The generated file is written to `solver_core/CATALOG.md`.

use std::fs;
use std::path::Path;

use solver_core::catalog::generate_catalog_markdown;

fn main() {
    println!("Generating CATALOG.md...");

    let markdown = generate_catalog_markdown();

    // Relative to workspace root
    let output_path = Path::new("solver_core/CATALOG.md");

    match fs::write(output_path, &markdown) {
        Ok(()) => {
            println!("Successfully wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing file: {}", e);
            std::process::exit(1);
        }
    }
}
