//! Log header enum as the single source of truth for header tokens.

use std::fmt;

/// Separator line the server writes between matches.
pub const LOG_DIVISION: &str = "------------------------------------------------------------";

/// Canonical log line headers.
///
/// Any token outside the fixed table resolves to [`LogHeader::Unknown`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogHeader {
    Unknown,
    Item,
    Kill,
    ClientConnect,
    InitGame,
    Exit,
    ShutdownGame,
    ClientUserinfoChanged,
    ClientBegin,
    ClientDisconnect,
    LogDivision,
    Score,
    Say,
}

impl LogHeader {
    /// Resolves the second token of a log line.
    #[must_use]
    pub fn from_token(token: &str) -> Self {
        match token {
            "Item:" => Self::Item,
            "Kill:" => Self::Kill,
            "ClientConnect:" => Self::ClientConnect,
            "InitGame:" => Self::InitGame,
            "Exit:" => Self::Exit,
            "ShutdownGame:" => Self::ShutdownGame,
            "ClientUserinfoChanged:" => Self::ClientUserinfoChanged,
            "ClientBegin:" => Self::ClientBegin,
            "ClientDisconnect:" => Self::ClientDisconnect,
            "score:" => Self::Score,
            "say:" => Self::Say,
            LOG_DIVISION => Self::LogDivision,
            _ => Self::Unknown,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "Unknown",
            Self::Item => "Item",
            Self::Kill => "Kill",
            Self::ClientConnect => "ClientConnect",
            Self::InitGame => "InitGame",
            Self::Exit => "Exit",
            Self::ShutdownGame => "ShutdownGame",
            Self::ClientUserinfoChanged => "ClientUserinfoChanged",
            Self::ClientBegin => "ClientBegin",
            Self::ClientDisconnect => "ClientDisconnect",
            Self::LogDivision => "LogDivision",
            Self::Score => "Score",
            Self::Say => "Say",
        }
    }
}

impl fmt::Display for LogHeader {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
