use anyhow::{Context, Result};
use colored::*;
use records_core::ValidationReport;
use serde::Serialize;
use serde_json::json;
use std::fmt::Display;

use crate::OutputFormat;

pub fn print_validation_report<E>(report: &ValidationReport<E>, format: OutputFormat) -> Result<()>
where
    E: Display + Serialize,
{
    match format {
        OutputFormat::Json => print_json_report(report),
        OutputFormat::Text => {
            print_text_report(report);
            Ok(())
        }
    }
}

fn print_text_report<E: Display>(report: &ValidationReport<E>) {
    println!("\n{}", "═".repeat(60));
    println!("{}", "  VALIDATION REPORT".bold());
    println!("{}", "═".repeat(60));

    if report.passed {
        println!(
            "\n{} {}",
            "✓".green().bold(),
            "Validation PASSED".green().bold()
        );
    } else {
        println!(
            "\n{} {}",
            "✗".red().bold(),
            "Validation FAILED".red().bold()
        );
    }

    if !report.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for (i, error) in report.errors.iter().enumerate() {
            println!("  {}. {}", i + 1, error.to_string().red());
        }
    }

    println!("\n{}", "Summary:".bold());
    println!("  Total errors:   {}", report.errors.len());
    println!("  Fields checked: {}", report.stats.fields_checked);
    println!("  Duration:       {} ms", report.stats.duration_ms);
    println!("{}", "═".repeat(60));
}

fn print_json_report<E>(report: &ValidationReport<E>) -> Result<()>
where
    E: Display + Serialize,
{
    let output = json!({
        "passed": report.passed,
        "errors": report.errors.iter().map(|e| e.to_string()).collect::<Vec<_>>(),
        "details": report.errors,
        "summary": {
            "error_count": report.errors.len(),
            "fields_checked": report.stats.fields_checked,
            "duration_ms": report.stats.duration_ms,
        }
    });

    print_json(&output)
}

pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{}", text);
    Ok(())
}

pub fn print_success(message: &str) {
    println!("{} {}", "✓".green().bold(), message.green());
}
