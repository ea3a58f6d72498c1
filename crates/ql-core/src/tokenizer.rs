//! Line tokenizer: one trimmed log line into a typed [`Event`].
//!
//! Lines follow `<timestamp> <header> <fields...>` and are split on
//! whitespace. Each header has a fixed arity; anything that does not fit is
//! rejected with a [`SyntaxError`] carrying the recognized header.

use crate::error::SyntaxError;
use crate::event::{ClientId, Event, EventKind};
use crate::header::LogHeader;

/// Parses a single log line.
pub fn parse_line(line: &str) -> Result<Event, SyntaxError> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.len() < 2 {
        return Err(SyntaxError::new(
            LogHeader::Unknown,
            "header could not be found",
        ));
    }

    let header = LogHeader::from_token(words[1]);
    let kind = match header {
        LogHeader::Item => parse_item(&words)?,
        LogHeader::Kill => parse_kill(&words)?,
        LogHeader::ClientConnect => EventKind::ClientConnect {
            client_id: parse_client_slot(header, &words)?,
        },
        LogHeader::ClientBegin => EventKind::ClientBegin {
            client_id: parse_client_slot(header, &words)?,
        },
        LogHeader::ClientDisconnect => EventKind::ClientDisconnect {
            client_id: parse_client_slot(header, &words)?,
        },
        LogHeader::ClientUserinfoChanged => parse_userinfo_changed(&words)?,
        LogHeader::Score => parse_score(&words)?,
        LogHeader::Exit => EventKind::Exit {
            reason: words[2..].join(" "),
        },
        LogHeader::InitGame => EventKind::InitGame,
        LogHeader::ShutdownGame => EventKind::ShutdownGame,
        LogHeader::LogDivision => EventKind::LogDivision,
        LogHeader::Say => EventKind::Say,
        LogHeader::Unknown => {
            return Err(SyntaxError::new(LogHeader::Unknown, "unknown log header"));
        }
    };

    Ok(Event {
        timestamp: words[0].to_string(),
        kind,
    })
}

fn parse_int(header: LogHeader, raw: &str, what: &str) -> Result<i32, SyntaxError> {
    raw.parse()
        .map_err(|_| SyntaxError::new(header, format!("expecting {what} to be an integer")))
}

/// `<ts> Item: <amount> <category>_<name>[_<subtype>]`
fn parse_item(words: &[&str]) -> Result<EventKind, SyntaxError> {
    let header = LogHeader::Item;
    if words.len() != 4 {
        return Err(SyntaxError::new(header, "expecting 4 words on log line"));
    }

    let mut segments = words[3].split('_');
    let (Some(category), Some(name)) = (segments.next(), segments.next()) else {
        return Err(SyntaxError::new(
            header,
            "expecting Item type to have at least 2 words",
        ));
    };
    let subtype = segments.next().map(str::to_string);

    let amount = parse_int(header, words[2], "Item amount")?;

    Ok(EventKind::Item {
        amount,
        category: category.to_string(),
        name: name.to_string(),
        subtype,
    })
}

/// `<ts> Kill: <k> <v> <m>: <killer> killed <victim> by <means>`
///
/// Names may contain spaces, so fields are assigned by delimiter order:
/// the buffer flushes into `killer` on `killed` and into `victim` on `by`,
/// and whatever is left becomes `means`.
fn parse_kill(words: &[&str]) -> Result<EventKind, SyntaxError> {
    let header = LogHeader::Kill;
    if words.len() < 5 {
        return Err(SyntaxError::new(
            header,
            "expecting at least 5 words on log line",
        ));
    }

    let mut killer = String::new();
    let mut victim = String::new();
    let mut buffer: Vec<&str> = Vec::new();
    for &word in &words[5..] {
        match word {
            "by" => victim = std::mem::take(&mut buffer).join(" "),
            "killed" => killer = std::mem::take(&mut buffer).join(" "),
            _ => buffer.push(word),
        }
    }
    let means = buffer.join(" ");

    if means.is_empty() {
        return Err(SyntaxError::new(header, "missing Means on log line"));
    }
    if victim.is_empty() {
        return Err(SyntaxError::new(header, "missing Victim on log line"));
    }
    if killer.is_empty() {
        return Err(SyntaxError::new(header, "missing Killer on log line"));
    }

    Ok(EventKind::Kill {
        killer,
        victim,
        means,
    })
}

/// `<ts> ClientConnect: <id>` and its `ClientBegin`/`ClientDisconnect` siblings.
fn parse_client_slot(header: LogHeader, words: &[&str]) -> Result<ClientId, SyntaxError> {
    if words.len() != 3 {
        return Err(SyntaxError::new(header, "expecting 3 words on log line"));
    }
    parse_int(header, words[2], "clientId")
}

/// `<ts> ClientUserinfoChanged: <id> n\<username>\t\0\model\...`
fn parse_userinfo_changed(words: &[&str]) -> Result<EventKind, SyntaxError> {
    let header = LogHeader::ClientUserinfoChanged;
    if words.len() < 4 {
        return Err(SyntaxError::new(
            header,
            "expecting at least 4 words on log line",
        ));
    }

    let client_id = parse_int(header, words[2], "clientId")?;

    let info = words[3..].join(" ");
    let Some(username) = info.split('\\').nth(1) else {
        return Err(SyntaxError::new(
            header,
            "expecting a backslash separated username",
        ));
    };

    Ok(EventKind::ClientUserinfoChanged {
        client_id,
        username: username.to_string(),
    })
}

/// `<ts> score: <points> ping: <ping> client: <id> <username...>`
fn parse_score(words: &[&str]) -> Result<EventKind, SyntaxError> {
    let header = LogHeader::Score;
    if words.len() < 8 {
        return Err(SyntaxError::new(
            header,
            "expecting at least 8 words on log line",
        ));
    }

    let points = parse_int(header, words[2], "score")?;
    let ping = parse_int(header, words[4], "ping")?;
    let client_id = parse_int(header, words[6], "clientId")?;

    Ok(EventKind::Score {
        points,
        ping,
        client_id,
        username: words[7..].join(" "),
    })
}
