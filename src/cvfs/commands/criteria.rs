use crate::commands::{CmdMessage, CmdResult};
use crate::criteria::{Criterion, Defined};
use crate::error::Result;
use crate::history::{HistoryLogger, HistoryRecord, Subject};
use crate::store::DiskStore;
use crate::workspace::Workspace;

/// `newSimpleCri name attr op value`
pub fn define_simple<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    name: &str,
    attr: &str,
    op: &str,
    value: &str,
) -> Result<CmdResult> {
    let defined = ws.criteria_mut().define_simple(name, attr, op, value)?;
    Ok(registered(history, defined))
}

/// `newNegation name target`
pub fn define_negation<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    name: &str,
    target: &str,
) -> Result<CmdResult> {
    let defined = ws.criteria_mut().define_negation(name, target)?;
    Ok(registered(history, defined))
}

/// `newBinaryCri name left op right`
pub fn define_binary<S: DiskStore>(
    ws: &mut Workspace<S>,
    history: &mut HistoryLogger,
    name: &str,
    left: &str,
    op: &str,
    right: &str,
) -> Result<CmdResult> {
    let defined = ws.criteria_mut().define_binary(name, left, op, right)?;
    Ok(registered(history, defined))
}

/// `printAllCriteria`
pub fn print_all<S: DiskStore>(ws: &Workspace<S>) -> Result<CmdResult> {
    let criteria: Vec<Criterion> = ws.criteria().iter().cloned().collect();
    let summary = CmdMessage::info(format!("Criteria: {} in total", criteria.len()));
    Ok(CmdResult::default()
        .with_listed_criteria(criteria)
        .with_message(summary))
}

fn registered(history: &mut HistoryLogger, defined: Defined) -> CmdResult {
    let Defined { criterion, warning } = defined;
    let mut result = CmdResult::default();
    if let Some(warning) = warning {
        tracing::warn!(criterion = criterion.name(), "{}", warning);
        result.add_message(CmdMessage::warning(warning));
    }
    tracing::debug!(criterion = %criterion, "registered criterion");
    result.add_message(CmdMessage::success(format!("{} created", criterion)));
    history.record(HistoryRecord::Delete(Subject::Criterion(criterion)));
    result
}
