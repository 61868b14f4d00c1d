//! # Receipt Rendering
//!
//! Text and JSON output of a priced checkout.

use std::io::Write;

use scanline_core::{Receipt, RuleSetBuild};
use serde::Serialize;

use crate::config::OutputFormat;
use crate::error::AppResult;

/// Column width of the item name on text receipts.
const ITEM_WIDTH: usize = 16;

/// JSON document printed with `--json`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonOutput<'a> {
    receipt: &'a Receipt,
    /// Total in major units, as a decimal string.
    total: String,
    rule_warnings: &'a [scanline_core::PricingWarning],
}

/// Writes the receipt in the requested format.
pub fn write_receipt<W: Write>(
    out: &mut W,
    receipt: &Receipt,
    build: &RuleSetBuild,
    format: OutputFormat,
) -> AppResult<()> {
    match format {
        OutputFormat::Text => write_text(out, receipt, build),
        OutputFormat::Json => {
            let doc = JsonOutput {
                receipt,
                total: receipt.total_major().to_string(),
                rule_warnings: &build.warnings,
            };
            serde_json::to_writer_pretty(&mut *out, &doc)?;
            writeln!(out)?;
            Ok(())
        }
    }
}

fn write_text<W: Write>(out: &mut W, receipt: &Receipt, build: &RuleSetBuild) -> AppResult<()> {
    writeln!(
        out,
        "Session {}  {}",
        receipt.session_id,
        receipt.opened_at.format("%Y-%m-%d %H:%M:%S UTC")
    )?;

    for line in &receipt.lines {
        write!(
            out,
            "{:<width$} x{:<4} {:>10}",
            line.item.as_str(),
            line.count,
            line.line_total.to_string(),
            width = ITEM_WIDTH
        )?;
        if !line.savings.is_zero() {
            write!(out, "  ({}, saved {})", line.discount.label(), line.savings)?;
        }
        writeln!(out)?;
    }

    for (item, count) in &receipt.unpriced {
        writeln!(
            out,
            "{:<width$} x{:<4} {:>10}",
            item.as_str(),
            count,
            "no price",
            width = ITEM_WIDTH
        )?;
    }

    writeln!(out, "{}", "-".repeat(ITEM_WIDTH + 17))?;
    writeln!(out, "{:<22}{:>11}", "Subtotal", receipt.subtotal.to_string())?;
    if !receipt.savings.is_zero() {
        writeln!(out, "{:<22}{:>11}", "Savings", format!("-{}", receipt.savings))?;
    }
    writeln!(out, "{:<22}{:>11}", "Total", receipt.total_major().to_string())?;

    for warning in build.warnings.iter().chain(&receipt.warnings) {
        writeln!(out, "warning: {warning}")?;
    }

    Ok(())
}
