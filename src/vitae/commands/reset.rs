use crate::commands::{CmdMessage, CmdResult};
use crate::model::ResumeDocument;

/// Replaces whatever is being edited with the session's starter document.
/// Clearing persisted state is the caller's job.
pub fn run(default: &ResumeDocument) -> CmdResult {
    CmdResult::changed(default.clone())
        .with_message(CmdMessage::success("Resume reset to the starter template"))
}
