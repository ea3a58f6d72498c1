//! Typed events produced by the line tokenizer.

use serde::Serialize;

use crate::header::LogHeader;

/// Numeric slot the server assigns to a connected client.
pub type ClientId = i32;

/// One tokenized log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Event {
    /// Match clock as printed by the server (e.g. `20:54`).
    pub timestamp: String,
    /// Header-specific payload.
    pub kind: EventKind,
}

impl Event {
    /// Returns the header this event was parsed from.
    pub const fn header(&self) -> LogHeader {
        self.kind.header()
    }
}

/// Event payload, one variant per recognized header.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EventKind {
    /// An item was picked up.
    Item {
        amount: i32,
        category: String,
        name: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        subtype: Option<String>,
    },
    /// `<killer> killed <victim> by <means>`.
    Kill {
        killer: String,
        victim: String,
        means: String,
    },
    ClientConnect {
        client_id: ClientId,
    },
    ClientUserinfoChanged {
        client_id: ClientId,
        username: String,
    },
    ClientBegin {
        client_id: ClientId,
    },
    ClientDisconnect {
        client_id: ClientId,
    },
    /// The match ended normally; `reason` is free text such as `Fraglimit hit.`.
    Exit {
        reason: String,
    },
    Score {
        points: i32,
        ping: i32,
        client_id: ClientId,
        username: String,
    },
    InitGame,
    ShutdownGame,
    LogDivision,
    Say,
}

impl EventKind {
    pub const fn header(&self) -> LogHeader {
        match self {
            Self::Item { .. } => LogHeader::Item,
            Self::Kill { .. } => LogHeader::Kill,
            Self::ClientConnect { .. } => LogHeader::ClientConnect,
            Self::ClientUserinfoChanged { .. } => LogHeader::ClientUserinfoChanged,
            Self::ClientBegin { .. } => LogHeader::ClientBegin,
            Self::ClientDisconnect { .. } => LogHeader::ClientDisconnect,
            Self::Exit { .. } => LogHeader::Exit,
            Self::Score { .. } => LogHeader::Score,
            Self::InitGame => LogHeader::InitGame,
            Self::ShutdownGame => LogHeader::ShutdownGame,
            Self::LogDivision => LogHeader::LogDivision,
            Self::Say => LogHeader::Say,
        }
    }
}
