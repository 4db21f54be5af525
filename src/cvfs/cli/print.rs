use colored::Colorize;
use cvfs::api::{CmdMessage, ListingTotals, MessageLevel};
use cvfs::criteria::Criterion;
use cvfs::disk::NodeSummary;
use std::io::{self, Write};
use unicode_width::UnicodeWidthStr;

const NAME_WIDTH: usize = 14;
const TYPE_WIDTH: usize = 5;
const BRANCH: &str = " ├─ ";
const CRITERION_BULLET: &str = "  ╟ ";

pub(super) fn print_messages<W: Write>(out: &mut W, messages: &[CmdMessage]) -> io::Result<()> {
    for message in messages {
        match message.level {
            MessageLevel::Info => writeln!(out, "{}", message.content.dimmed())?,
            MessageLevel::Success => writeln!(out, "{}", message.content.green())?,
            MessageLevel::Warning => writeln!(out, "{}", message.content.yellow())?,
            MessageLevel::Error => writeln!(out, "{}", message.content.red())?,
        }
    }
    Ok(())
}

/// One line per node, indented by depth:
///
/// ```text
///  ├─ Dir1           dir    82
///      ├─ Doc1       txt    42
/// ```
pub(super) fn print_nodes<W: Write>(out: &mut W, nodes: &[NodeSummary]) -> io::Result<()> {
    for node in nodes {
        let indent = "    ".repeat(node.depth);
        let kind = node
            .doc_type
            .map(|t| t.to_string())
            .unwrap_or_else(|| "dir".to_string());
        let pad = NAME_WIDTH.saturating_sub(node.name.width());
        writeln!(
            out,
            "{}{}{}{} {} {}",
            indent,
            BRANCH,
            node.name.green(),
            " ".repeat(pad),
            format!("{:<width$}", kind, width = TYPE_WIDTH).cyan(),
            node.size.to_string().yellow(),
        )?;
    }
    Ok(())
}

pub(super) fn print_totals<W: Write>(out: &mut W, totals: Option<ListingTotals>) -> io::Result<()> {
    if let Some(totals) = totals {
        writeln!(
            out,
            "{} {}",
            "Total:".bold(),
            format!("{} entries, size {}", totals.entries, totals.size).yellow()
        )?;
    }
    Ok(())
}

pub(super) fn print_criteria<W: Write>(out: &mut W, criteria: &[Criterion]) -> io::Result<()> {
    for criterion in criteria {
        writeln!(out, "{}{}", CRITERION_BULLET, criterion.to_string().blue())?;
    }
    Ok(())
}

pub(super) fn print_error<W: Write>(out: &mut W, error: &dyn std::fmt::Display) -> io::Result<()> {
    print_messages(out, &[CmdMessage::error(format!("Error: {}", error))])
}
