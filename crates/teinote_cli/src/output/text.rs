//! Text output formatter

use std::path::Path;

use teinote_core::{BatchReport, DocumentFailure, DocumentReport};

enum Entry<'a> {
    Done(&'a DocumentReport),
    Failed(&'a DocumentFailure),
}

impl Entry<'_> {
    fn path(&self) -> &Path {
        match self {
            Entry::Done(doc) => &doc.path,
            Entry::Failed(failure) => &failure.path,
        }
    }
}

pub fn output_text(report: &BatchReport) {
    let total = report.success_count() + report.error_count();
    println!("Found {} XML files to process", total);
    println!("Input folder: {}", report.input_dir.display());
    println!("Output folder: {}", report.output_dir.display());
    println!();

    let mut entries: Vec<Entry<'_>> = report
        .documents
        .iter()
        .map(Entry::Done)
        .chain(report.failures.iter().map(Entry::Failed))
        .collect();
    entries.sort_by(|a, b| a.path().cmp(b.path()));

    for entry in &entries {
        let name = display_name(entry.path(), &report.input_dir);
        println!("Processing {}...", name);

        match entry {
            Entry::Done(doc) if !doc.had_notes() => {
                println!("  No endnotes found in {}", name);
            }
            Entry::Done(doc) => {
                println!("  Found {} endnotes in {}", doc.stats.notes_found, name);
                println!("  Inlined {} references", doc.stats.references_inlined);
                if doc.stats.references_skipped > 0 {
                    println!(
                        "  Skipped {} references inside notes divisions",
                        doc.stats.references_skipped
                    );
                }
                println!("  Successfully processed {}", name);
            }
            Entry::Failed(failure) => {
                println!("  ERROR processing {}: {}", name, failure.message);
            }
        }
        println!();
    }

    println!("{}", "=".repeat(70));
    println!("Processing complete!");
    println!("Successfully processed: {} files", report.success_count());
    println!("Errors: {} files", report.error_count());
    println!("References inlined: {}", report.references_inlined());
    println!("Output saved to: {}", report.output_dir.display());
}

/// Path relative to the input folder, falling back to the file name.
fn display_name(path: &Path, input_dir: &Path) -> String {
    path.strip_prefix(input_dir)
        .ok()
        .or_else(|| path.file_name().map(Path::new))
        .unwrap_or(path)
        .display()
        .to_string()
}
