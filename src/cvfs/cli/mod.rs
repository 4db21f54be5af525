//! The REPL: read a line, parse it with [`ReplLine`], dispatch to the API,
//! print the result. Parse errors and command errors are printed and the
//! loop goes on; only `quit` or end of input ends it.

mod print;

use crate::args::{ReplCommand, ReplLine};
use clap::Parser;
use colored::Colorize;
use cvfs::api::CvfsApi;
use cvfs::commands::CmdResult;
use cvfs::error::Result;
use cvfs::store::DiskStore;
use std::io::{self, BufRead, Write};

const NO_DISK_PROMPT: &str = "cvfs";

#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Run until `quit` or end of input. The prompt is only written when
/// `interactive` is set.
pub fn run_repl<S, R, W>(api: &mut CvfsApi<S>, input: R, out: &mut W, interactive: bool) -> io::Result<()>
where
    S: DiskStore,
    R: BufRead,
    W: Write,
{
    if interactive {
        writeln!(out, "{}", "CVFS shell. Type `help` for commands, `quit` to leave.".dimmed())?;
    }
    let mut lines = input.lines();
    loop {
        if interactive {
            write!(out, "{} ", prompt(api).bold())?;
            out.flush()?;
        }
        let Some(line) = lines.next() else {
            break;
        };
        if handle_line(api, &line?, out)? == Flow::Quit {
            break;
        }
    }
    Ok(())
}

pub fn handle_line<S: DiskStore, W: Write>(api: &mut CvfsApi<S>, line: &str, out: &mut W) -> io::Result<Flow> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(Flow::Continue);
    }

    let command = match ReplLine::try_parse_from(words) {
        Ok(parsed) => parsed.command,
        Err(e) => {
            write!(out, "{}", e.render())?;
            return Ok(Flow::Continue);
        }
    };
    if command == ReplCommand::Quit {
        return Ok(Flow::Quit);
    }

    tracing::debug!(?command, "dispatching");
    match dispatch(api, command) {
        Ok(result) => render(out, &result)?,
        Err(e) => print::print_error(out, &e)?,
    }
    Ok(Flow::Continue)
}

fn prompt<S: DiskStore>(api: &CvfsApi<S>) -> String {
    format!("{}>", api.current_path().unwrap_or_else(|| NO_DISK_PROMPT.to_string()))
}

fn dispatch<S: DiskStore>(api: &mut CvfsApi<S>, command: ReplCommand) -> Result<CmdResult> {
    match command {
        ReplCommand::NewDisk { capacity } => api.new_disk(i64::from(capacity)),
        ReplCommand::NewDoc {
            path,
            doc_type,
            content,
        } => api.new_doc(&path, doc_type, &content.join(" ")),
        ReplCommand::NewDir { path } => api.new_dir(&path),
        ReplCommand::Delete { path } => api.delete(&path),
        ReplCommand::Rename { path, new_name } => api.rename(&path, &new_name),
        ReplCommand::ChangeDir { path } => api.change_dir(&path),
        ReplCommand::List => api.list(),
        ReplCommand::RList => api.recursive_list(),
        ReplCommand::NewSimpleCri {
            name,
            attr,
            op,
            value,
        } => api.new_simple_criterion(&name, &attr, &op, &value),
        ReplCommand::NewNegation { name, target } => api.new_negation(&name, &target),
        ReplCommand::NewBinaryCri {
            name,
            left,
            op,
            right,
        } => api.new_binary_criterion(&name, &left, &op, &right),
        ReplCommand::PrintAllCriteria => api.print_all_criteria(),
        ReplCommand::Search { criterion } => api.search(&criterion),
        ReplCommand::RSearch { criterion } => api.recursive_search(&criterion),
        ReplCommand::Save { name } => api.save(&name),
        ReplCommand::Load { name } => api.load(&name),
        ReplCommand::Undo => api.undo(),
        ReplCommand::Redo => api.redo(),
        // handled before dispatch
        ReplCommand::Quit => Ok(CmdResult::default()),
    }
}

fn render<W: Write>(out: &mut W, result: &CmdResult) -> io::Result<()> {
    print::print_nodes(out, &result.listed_nodes)?;
    print::print_criteria(out, &result.listed_criteria)?;
    print::print_totals(out, result.totals)?;
    print::print_messages(out, &result.messages)
}
