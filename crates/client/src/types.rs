use crate::error::{ApiError, ApiResult};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const SUCCESS_STATUS: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Command {
    Light,
    Off,
    Speed1,
    Speed2,
    Speed3,
}

impl Command {
    /// Button order.
    pub const ALL: [Command; 5] = [
        Command::Light,
        Command::Off,
        Command::Speed1,
        Command::Speed2,
        Command::Speed3,
    ];

    /// Wire code sent as the request `message`.
    pub fn code(self) -> &'static str {
        match self {
            Command::Light => "light",
            Command::Off => "off",
            Command::Speed1 => "speed1",
            Command::Speed2 => "speed2",
            Command::Speed3 => "speed3",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Command::Light => "Light",
            Command::Off => "Off",
            Command::Speed1 => "Speed 1",
            Command::Speed2 => "Speed 2",
            Command::Speed3 => "Speed 3",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Command::Light => 0,
            Command::Off => 1,
            Command::Speed1 => 2,
            Command::Speed2 => 3,
            Command::Speed3 => 4,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCommand(pub String);

impl fmt::Display for UnknownCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown command code: {}", self.0)
    }
}

impl std::error::Error for UnknownCommand {}

impl FromStr for Command {
    type Err = UnknownCommand;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::ALL
            .into_iter()
            .find(|c| c.code() == s)
            .ok_or_else(|| UnknownCommand(s.to_string()))
    }
}

/// Body of the outbound POST.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub key: String,
    pub message: String,
}

impl CommandRequest {
    pub fn new(key: impl Into<String>, command: Command) -> Self {
        Self {
            key: key.into(),
            message: command.code().to_string(),
        }
    }
}

/// Reply schema. `statusCode` is required; a reply without it fails to parse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandReply {
    #[serde(rename = "statusCode")]
    pub status_code: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<serde_json::Value>,
}

impl CommandReply {
    pub fn parse(text: &str) -> ApiResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn is_success(&self) -> bool {
        self.status_code == SUCCESS_STATUS
    }
}

/// What the status banner shows after a dispatch resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct CommandOutcome {
    pub is_error: bool,
    pub message: String,
    pub completed_at: DateTime<Utc>,
}

impl CommandOutcome {
    pub fn from_reply(command: Command, reply: &CommandReply) -> Self {
        let (is_error, message) = if reply.is_success() {
            (false, format!("Success with message \"{}\"", command.code()))
        } else {
            (
                true,
                format!(
                    "{}: Error with message \"{}\"",
                    reply.status_code,
                    command.code()
                ),
            )
        };
        Self {
            is_error,
            message,
            completed_at: Utc::now(),
        }
    }

    pub fn from_error(error: &ApiError) -> Self {
        Self {
            is_error: true,
            message: error.to_string(),
            completed_at: Utc::now(),
        }
    }

    pub fn from_result(command: Command, result: &ApiResult<CommandReply>) -> Self {
        match result {
            Ok(reply) => Self::from_reply(command, reply),
            Err(e) => Self::from_error(e),
        }
    }
}
