use fan_ctl_client::{ApiResult, Command, CommandOutcome, CommandReply};

pub const HISTORY_LIMIT: usize = 20;

pub enum AppAsyncEvent {
    CommandFinished {
        command: Command,
        /// Key the request was sent with.
        key: String,
        result: ApiResult<CommandReply>,
    },
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub command: Command,
    pub outcome: CommandOutcome,
}

/// View of one command button as the panel draws it.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandButton {
    pub command: Command,
    pub enabled: bool,
    pub selected: bool,
}

impl CommandButton {
    pub fn label(&self) -> &'static str {
        self.command.label()
    }
}
