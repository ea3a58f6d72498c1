//! Match reconstruction from an event stream.
//!
//! [`GameScanner`] pulls events from an [`EventCursor`] and folds them into
//! [`Game`]s. A match opens on `InitGame` and closes on `ShutdownGame`, on
//! the next `InitGame` (which is pushed back to open the following match),
//! or at end of input.

use std::collections::HashMap;
use std::io::BufRead;

use crate::cursor::{EventCursor, LineSource, ReaderLines};
use crate::error::{ContextError, GameError};
use crate::event::{ClientId, Event, EventKind};
use crate::game::{
    Game, OpenGame, PlayerInfo, UNEXPECTED_SHUTDOWN, WORLD_ID, WORLD_USERNAME, bump,
};
use crate::header::LogHeader;

/// Outcome of a successful [`GameScanner::next_game`] call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scan {
    /// A match closed and more input may follow.
    Game(Game),
    /// Input is exhausted; carries the match that was still open, if any.
    End(Option<Game>),
}

/// Reconstructs matches from a single log.
///
/// Not shareable between threads; use one scanner per log.
#[derive(Debug)]
pub struct GameScanner<L> {
    events: EventCursor<L>,
    current: Option<OpenGame>,
    client_id_by_username: HashMap<String, ClientId>,
    exhausted: bool,
}

impl<R: BufRead> GameScanner<ReaderLines<R>> {
    /// Creates a scanner over a buffered reader.
    pub fn from_reader(reader: R) -> Self {
        Self::new(ReaderLines::new(reader))
    }
}

impl<L: LineSource> GameScanner<L> {
    pub fn new(lines: L) -> Self {
        Self {
            events: EventCursor::new(lines),
            current: None,
            client_id_by_username: HashMap::new(),
            exhausted: false,
        }
    }

    /// Number of log lines dropped so far because they failed to tokenize.
    pub const fn discarded_lines(&self) -> usize {
        self.events.discarded()
    }

    /// Folds events until the next match boundary.
    ///
    /// A [`GameError::Context`] discards the match in progress; the caller
    /// may keep scanning. A [`GameError::Io`] ends the stream.
    pub fn next_game(&mut self) -> Result<Scan, GameError> {
        if self.exhausted {
            return Ok(Scan::End(None));
        }

        loop {
            let event = match self.events.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => {
                    self.exhausted = true;
                    return Ok(Scan::End(self.close_game()));
                }
                Err(e) => {
                    self.exhausted = true;
                    if self.current.take().is_some() {
                        tracing::warn!("discarding open game after read failure");
                    }
                    return Err(e.into());
                }
            };

            match self.apply(event) {
                Ok(Some(game)) => return Ok(Scan::Game(game)),
                Ok(None) => {}
                Err(e) => {
                    if self.current.take().is_some() {
                        tracing::debug!(error = %e, "discarding game in progress");
                    }
                    return Err(e.into());
                }
            }
        }
    }

    /// Passive events (score, say, items, begins, separators) are ignored
    /// while no match is open; any other event there is a context error.
    fn apply(&mut self, event: Event) -> Result<Option<Game>, ContextError> {
        let header = event.header();
        if header == LogHeader::InitGame {
            return Ok(self.begin_game(event));
        }

        let Some(game) = self.current.as_mut() else {
            return match header {
                LogHeader::Score
                | LogHeader::ClientBegin
                | LogHeader::Item
                | LogHeader::LogDivision
                | LogHeader::Say => Ok(None),
                _ => Err(ContextError::new(
                    header,
                    format!("{} from empty game", empty_game_subject(header)),
                )),
            };
        };

        match event.kind {
            EventKind::ShutdownGame => {
                game.ending_reason
                    .get_or_insert_with(|| UNEXPECTED_SHUTDOWN.to_string());
                return Ok(self.close_game());
            }
            EventKind::Exit { reason } => {
                game.ending_reason = (!reason.is_empty()).then_some(reason);
            }
            EventKind::ClientConnect { client_id } => {
                if client_id == WORLD_ID {
                    return Err(world_slot_error(header, "connected"));
                }
                game.players.insert(client_id, PlayerInfo::new(client_id));
            }
            EventKind::ClientUserinfoChanged {
                client_id,
                username,
            } => {
                if client_id == WORLD_ID {
                    return Err(world_slot_error(header, "changed information"));
                }
                let Some(player) = game.players.get_mut(&client_id) else {
                    return Err(ContextError::new(
                        header,
                        format!("inexistent client changed information. id: {client_id}"),
                    ));
                };
                player.username.clone_from(&username);
                self.client_id_by_username.insert(username, client_id);
            }
            EventKind::ClientDisconnect { client_id } => {
                if client_id == WORLD_ID {
                    return Err(world_slot_error(header, "disconnected"));
                }
                let Some(player) = game.players.remove(&client_id) else {
                    return Err(ContextError::new(
                        header,
                        format!("inexistent client disconnected. id: {client_id}"),
                    ));
                };
                self.client_id_by_username.remove(&player.username);
                game.disconnected_players.push(player);
            }
            EventKind::Kill {
                killer,
                victim,
                means,
            } => {
                let killer_id = resolve(&self.client_id_by_username, game, &killer, "killer")?;
                let victim_id = resolve(&self.client_id_by_username, game, &victim, "victim")?;
                record_kill(
                    game,
                    (killer_id, killer.as_str()),
                    (victim_id, victim.as_str()),
                    &means,
                );
            }
            EventKind::Score { .. }
            | EventKind::ClientBegin { .. }
            | EventKind::Item { .. }
            | EventKind::LogDivision
            | EventKind::Say
            | EventKind::InitGame => {}
        }

        Ok(None)
    }

    /// Opens a match, or closes the current one and replays `init` next call.
    fn begin_game(&mut self, init: Event) -> Option<Game> {
        if let Some(game) = self.current.as_mut() {
            game.ending_reason = Some(UNEXPECTED_SHUTDOWN.to_string());
            self.events.pushback(init);
            return self.close_game();
        }

        tracing::debug!(timestamp = %init.timestamp, "game started");
        self.client_id_by_username.clear();
        self.client_id_by_username
            .insert(WORLD_USERNAME.to_string(), WORLD_ID);
        self.current = Some(OpenGame::new());
        None
    }

    fn close_game(&mut self) -> Option<Game> {
        let game = self.current.take()?.finalize();
        tracing::debug!(
            players = game.players.len(),
            total_kills = game.total_kills,
            ending_reason = ?game.ending_reason,
            "game finished"
        );
        Some(game)
    }
}

impl<L: LineSource> Iterator for GameScanner<L> {
    type Item = Result<Game, GameError>;

    /// Yields every finalized game and every failed retrieval, including
    /// the match left open at end of input.
    fn next(&mut self) -> Option<Self::Item> {
        match self.next_game() {
            Ok(Scan::Game(game)) => Some(Ok(game)),
            Ok(Scan::End(game)) => game.map(Ok),
            Err(e) => Some(Err(e)),
        }
    }
}

const fn empty_game_subject(header: LogHeader) -> &'static str {
    match header {
        LogHeader::Kill => "kill",
        LogHeader::ShutdownGame => "shutdown",
        LogHeader::Exit => "exit",
        LogHeader::ClientConnect => "client connect",
        LogHeader::ClientUserinfoChanged => "user info changed",
        LogHeader::ClientDisconnect => "client disconnect",
        _ => "event",
    }
}

fn world_slot_error(header: LogHeader, action: &str) -> ContextError {
    ContextError::new(
        header,
        format!("reserved world client {action}. id: {WORLD_ID}"),
    )
}

/// Maps a username to a connected client slot using the current index.
fn resolve(
    client_id_by_username: &HashMap<String, ClientId>,
    game: &OpenGame,
    username: &str,
    role: &str,
) -> Result<ClientId, ContextError> {
    let Some(&id) = client_id_by_username.get(username) else {
        return Err(ContextError::new(
            LogHeader::Kill,
            format!("could not find {role} id. username: {username}"),
        ));
    };
    if !game.has_participant(id) {
        return Err(ContextError::new(
            LogHeader::Kill,
            format!("could not find {role} information. id: {id}"),
        ));
    }
    Ok(id)
}

/// Applies one resolved kill to the match tallies.
fn record_kill(
    game: &mut OpenGame,
    (killer_id, killer): (ClientId, &str),
    (victim_id, victim): (ClientId, &str),
    means: &str,
) {
    bump(&mut game.kill_count_by_means, means);
    game.total_kills += 1;

    if killer == victim {
        if let Some(player) = game.participant_mut(victim_id) {
            player.suicide_count += 1;
            player.death_count += 1;
            bump(&mut player.deaths_by_weapon, means);
        }
        return;
    }

    if let Some(player) = game.participant_mut(victim_id) {
        player.death_count += 1;
        bump(&mut player.deaths_by_source_username, killer);
        bump(&mut player.deaths_by_weapon, means);
        if killer_id == WORLD_ID {
            player.score -= 1;
        }
    }

    // The world collects kills too; its score is dropped at finalization.
    if let Some(player) = game.participant_mut(killer_id) {
        player.kill_count += 1;
        player.score += 1;
        bump(&mut player.kills_by_target_username, victim);
        bump(&mut player.kills_by_weapon, means);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Scanner<'a> = GameScanner<ReaderLines<&'a [u8]>>;

    fn scanner(log: &str) -> Scanner<'_> {
        GameScanner::from_reader(log.as_bytes())
    }

    fn expect_game(scanner: &mut Scanner<'_>) -> Game {
        match scanner.next_game().unwrap() {
            Scan::Game(game) => game,
            Scan::End(other) => panic!("expected a closed game, got end of input with {other:?}"),
        }
    }

    fn expect_context_error(scanner: &mut Scanner<'_>) -> ContextError {
        match scanner.next_game() {
            Err(GameError::Context(e)) => e,
            other => panic!("expected a context error, got {other:?}"),
        }
    }

    fn player<'g>(game: &'g Game, username: &str) -> &'g PlayerInfo {
        game.players
            .values()
            .find(|p| p.username == username)
            .unwrap_or_else(|| panic!("no player named {username}"))
    }

    const TWO_PLAYERS: &str = r"
  0:00 ------------------------------------------------------------
  0:00 InitGame: \sv_floodProtect\1\sv_maxPing\0\sv_hostname\Code Miner Server
  0:25 ClientConnect: 2
  0:25 ClientUserinfoChanged: 2 n\Isgalamido\t\0\model\uriel/zael\hmodel\uriel/zael
  0:27 ClientBegin: 2
  0:29 ClientConnect: 3
  0:29 ClientUserinfoChanged: 3 n\Dono da Bola\t\0\model\sarge\hmodel\sarge
  0:31 Item: 4 weapon_rocketlauncher
";

    #[test]
    fn shutdown_closes_game_with_unexpected_reason() {
        let mut scanner = scanner(
            r"
  0:00 InitGame: \sv_hostname\Code Miner Server
  0:25 ClientConnect: 2
  0:25 ClientUserinfoChanged: 2 n\X\t\0
  1:47 ShutdownGame:
",
        );

        let game = expect_game(&mut scanner);
        assert_eq!(game.ending_reason.as_deref(), Some(UNEXPECTED_SHUTDOWN));
        assert_eq!(game.players.len(), 1);
        let x = &game.players[&2];
        assert_eq!(x.username, "X");
        assert_eq!(x.kill_count, 0);
        assert_eq!(x.death_count, 0);

        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn exit_reason_survives_shutdown() {
        let log = format!("{TWO_PLAYERS}  1:47 Exit: Fraglimit hit.\n  1:47 ShutdownGame:\n");
        let mut scanner = scanner(&log);

        let game = expect_game(&mut scanner);
        assert_eq!(game.ending_reason.as_deref(), Some("Fraglimit hit."));
    }

    #[test]
    fn next_init_game_closes_previous_and_opens_next() {
        let log = format!(
            "{TWO_PLAYERS}  1:00 Exit: Timelimit hit.\n  1:01 InitGame: \\sv_hostname\\Next\n  1:02 ClientConnect: 5\n  1:10 ShutdownGame:\n"
        );
        let mut scanner = scanner(&log);

        let first = expect_game(&mut scanner);
        assert_eq!(first.ending_reason.as_deref(), Some(UNEXPECTED_SHUTDOWN));
        assert_eq!(first.players.len(), 2);

        let second = expect_game(&mut scanner);
        assert_eq!(second.ending_reason.as_deref(), Some(UNEXPECTED_SHUTDOWN));
        assert_eq!(second.players.keys().copied().collect::<Vec<_>>(), vec![5]);

        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn end_of_input_finalizes_open_game() {
        let log = format!("{TWO_PLAYERS}  0:40 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT\n");
        let mut scanner = scanner(&log);

        let Scan::End(Some(game)) = scanner.next_game().unwrap() else {
            panic!("expected the open game at end of input");
        };
        assert!(game.ending_reason.is_none());
        assert!(!game.players.contains_key(&WORLD_ID));
        assert_eq!(game.world_kills.kill_count, 1);
        assert_eq!(game.total_kills, 1);

        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn player_kill_updates_both_sides() {
        let log = format!(
            "{TWO_PLAYERS}  0:50 Kill: 2 3 6: Isgalamido killed Dono da Bola by MOD_ROCKET\n  0:55 ShutdownGame:\n"
        );
        let game = expect_game(&mut scanner(&log));

        let killer = player(&game, "Isgalamido");
        assert_eq!(killer.kill_count, 1);
        assert_eq!(killer.score, 1);
        assert_eq!(killer.kills_by_weapon["MOD_ROCKET"], 1);
        assert_eq!(killer.kills_by_target_username["Dono da Bola"], 1);
        assert_eq!(killer.death_count, 0);

        let victim = player(&game, "Dono da Bola");
        assert_eq!(victim.death_count, 1);
        assert_eq!(victim.score, 0);
        assert_eq!(victim.deaths_by_weapon["MOD_ROCKET"], 1);
        assert_eq!(victim.deaths_by_source_username["Isgalamido"], 1);

        assert_eq!(game.total_kills, 1);
        assert_eq!(game.kill_count_by_means["MOD_ROCKET"], 1);
    }

    #[test]
    fn suicide_counts_death_without_kill() {
        let log = format!(
            "{TWO_PLAYERS}  0:50 Kill: 2 2 7: Isgalamido killed Isgalamido by MOD_ROCKET_SPLASH\n  0:55 ShutdownGame:\n"
        );
        let game = expect_game(&mut scanner(&log));

        let p = player(&game, "Isgalamido");
        assert_eq!(p.suicide_count, 1);
        assert_eq!(p.death_count, 1);
        assert_eq!(p.kill_count, 0);
        assert_eq!(p.score, 0);
        assert_eq!(p.deaths_by_weapon["MOD_ROCKET_SPLASH"], 1);
        assert!(p.deaths_by_source_username.is_empty());

        assert_eq!(game.total_kills, 1);
        assert_eq!(game.kill_count_by_means["MOD_ROCKET_SPLASH"], 1);
    }

    #[test]
    fn world_kill_penalizes_victim_and_is_archived() {
        let log = format!(
            "{TWO_PLAYERS}  0:40 Kill: 1022 2 22: <world> killed Isgalamido by MOD_TRIGGER_HURT\n  0:41 Kill: 1022 2 19: <world> killed Isgalamido by MOD_FALLING\n  0:55 ShutdownGame:\n"
        );
        let game = expect_game(&mut scanner(&log));

        let victim = player(&game, "Isgalamido");
        assert_eq!(victim.score, -2);
        assert_eq!(victim.death_count, 2);
        assert_eq!(victim.deaths_by_source_username["<world>"], 2);

        assert!(game.players.values().all(|p| p.username != WORLD_USERNAME));
        assert_eq!(game.world_kills.kill_count, 2);
        assert_eq!(game.world_kills.kills_by_weapon["MOD_TRIGGER_HURT"], 1);
        assert_eq!(game.world_kills.kills_by_weapon["MOD_FALLING"], 1);
        assert_eq!(game.world_kills.kills_by_target_username["Isgalamido"], 2);
        assert_eq!(game.total_kills, 2);
    }

    #[test]
    fn unrecognized_means_extends_tally() {
        let log = format!(
            "{TWO_PLAYERS}  0:50 Kill: 2 3 99: Isgalamido killed Dono da Bola by MOD_SPATULA\n  0:55 ShutdownGame:\n"
        );
        let game = expect_game(&mut scanner(&log));

        assert_eq!(game.kill_count_by_means["MOD_SPATULA"], 1);
        assert_eq!(
            game.kill_count_by_means.len(),
            crate::game::KNOWN_MEANS.len() + 1
        );
    }

    #[test]
    fn rename_is_used_for_later_kills() {
        let log = format!(
            "{TWO_PLAYERS}  0:45 ClientUserinfoChanged: 3 n\\Mocinha\\t\\0\n  0:50 Kill: 2 3 6: Isgalamido killed Mocinha by MOD_ROCKET\n  0:55 ShutdownGame:\n"
        );
        let game = expect_game(&mut scanner(&log));

        assert_eq!(game.players[&3].username, "Mocinha");
        assert_eq!(game.players[&3].death_count, 1);
        assert_eq!(
            player(&game, "Isgalamido").kills_by_target_username["Mocinha"],
            1
        );
    }

    #[test]
    fn disconnect_moves_player_and_forgets_username() {
        let log = format!(
            "{TWO_PLAYERS}  0:45 ClientDisconnect: 3\n  0:50 Kill: 2 3 6: Isgalamido killed Dono da Bola by MOD_ROCKET\n"
        );
        let mut scanner = scanner(&log);

        let err = expect_context_error(&mut scanner);
        assert_eq!(err.header, LogHeader::Kill);
        assert_eq!(err.message, "could not find victim id. username: Dono da Bola");
    }

    #[test]
    fn disconnected_players_are_kept_in_order() {
        let log = format!("{TWO_PLAYERS}  0:45 ClientDisconnect: 3\n  0:46 ClientDisconnect: 2\n  0:55 ShutdownGame:\n");
        let game = expect_game(&mut scanner(&log));

        assert!(game.players.is_empty());
        let names: Vec<_> = game
            .disconnected_players
            .iter()
            .map(|p| p.username.as_str())
            .collect();
        assert_eq!(names, vec!["Dono da Bola", "Isgalamido"]);
    }

    #[test]
    fn unresolved_kill_discards_game_until_next_init() {
        let log = format!(
            "{TWO_PLAYERS}  0:50 Kill: 2 9 6: Isgalamido killed Nobody by MOD_ROCKET\n  0:51 ClientDisconnect: 2\n  0:52 ShutdownGame:\n  1:00 InitGame: \\sv_hostname\\Next\n  1:05 ShutdownGame:\n"
        );
        let mut scanner = scanner(&log);

        let err = expect_context_error(&mut scanner);
        assert_eq!(err.message, "could not find victim id. username: Nobody");

        let err = expect_context_error(&mut scanner);
        assert_eq!(err.header, LogHeader::ClientDisconnect);
        assert_eq!(err.message, "client disconnect from empty game");

        let err = expect_context_error(&mut scanner);
        assert_eq!(err.message, "shutdown from empty game");

        let game = expect_game(&mut scanner);
        assert!(game.players.is_empty());
        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn unknown_killer_is_a_context_error() {
        let log = format!("{TWO_PLAYERS}  0:50 Kill: 9 2 6: Ghost killed Isgalamido by MOD_ROCKET\n");
        let err = expect_context_error(&mut scanner(&log));
        assert_eq!(err.message, "could not find killer id. username: Ghost");
    }

    #[test]
    fn userinfo_for_unconnected_client_fails() {
        let log = format!("{TWO_PLAYERS}  0:45 ClientUserinfoChanged: 7 n\\Zeh\\t\\0\n");
        let err = expect_context_error(&mut scanner(&log));
        assert_eq!(err.header, LogHeader::ClientUserinfoChanged);
        assert_eq!(err.message, "inexistent client changed information. id: 7");
    }

    #[test]
    fn world_slot_cannot_be_disconnected() {
        let log = format!(
            "{TWO_PLAYERS}  0:40 Kill: 1022 2 19: <world> killed Isgalamido by MOD_FALLING\n  0:45 ClientDisconnect: 0\n  0:55 ShutdownGame:\n"
        );
        let mut scanner = scanner(&log);

        let err = expect_context_error(&mut scanner);
        assert_eq!(err.header, LogHeader::ClientDisconnect);
        assert_eq!(err.message, "reserved world client disconnected. id: 0");
        assert_eq!(
            expect_context_error(&mut scanner).message,
            "shutdown from empty game"
        );
    }

    #[test]
    fn world_slot_cannot_be_reconnected_or_renamed() {
        let connect = format!("{TWO_PLAYERS}  0:45 ClientConnect: 0\n");
        let err = expect_context_error(&mut scanner(&connect));
        assert_eq!(err.header, LogHeader::ClientConnect);
        assert_eq!(err.message, "reserved world client connected. id: 0");

        let rename = format!("{TWO_PLAYERS}  0:45 ClientUserinfoChanged: 0 n\\Zeh\\t\\0\n");
        let err = expect_context_error(&mut scanner(&rename));
        assert_eq!(err.header, LogHeader::ClientUserinfoChanged);
        assert_eq!(err.message, "reserved world client changed information. id: 0");
    }

    #[test]
    fn world_kills_survive_until_finalization() {
        let log = format!(
            "{TWO_PLAYERS}  0:40 Kill: 1022 2 19: <world> killed Isgalamido by MOD_FALLING\n  0:41 Kill: 1022 3 19: <world> killed Dono da Bola by MOD_FALLING\n"
        );
        let Scan::End(Some(game)) = scanner(&log).next_game().unwrap() else {
            panic!("expected the open game at end of input");
        };

        assert_eq!(game.world_kills.kill_count, 2);
        assert_eq!(game.world_kills.kills_by_weapon["MOD_FALLING"], 2);
        assert!(game.disconnected_players.is_empty());
        assert_eq!(game.players.keys().copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    /// Yields `lines`, then fails every later read.
    struct FailingLines {
        lines: std::vec::IntoIter<&'static str>,
    }

    impl FailingLines {
        fn new(lines: Vec<&'static str>) -> Self {
            Self {
                lines: lines.into_iter(),
            }
        }
    }

    impl LineSource for FailingLines {
        fn next_line(&mut self) -> std::io::Result<Option<String>> {
            match self.lines.next() {
                Some(line) => Ok(Some(line.to_string())),
                None => Err(std::io::Error::other("disk went away")),
            }
        }
    }

    #[test]
    fn read_failure_drops_open_game_and_ends_stream() {
        let mut scanner = GameScanner::new(FailingLines::new(vec![
            "  0:00 InitGame: \\sv_hostname\\Code Miner Server",
            "  0:25 ClientConnect: 2",
        ]));

        match scanner.next_game() {
            Err(GameError::Io(e)) => assert_eq!(e.to_string(), "disk went away"),
            other => panic!("expected an io error, got {other:?}"),
        }
        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn iterator_reports_read_failure_once() {
        let mut scanner = GameScanner::new(FailingLines::new(vec!["  0:00 InitGame:"]));

        assert!(matches!(scanner.next(), Some(Err(GameError::Io(_)))));
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn events_outside_a_game() {
        let mut scanner = scanner(
            "  0:00 ------------------------------------------------------------\n  0:01 score: 20  ping: 4  client: 4 Zeh\n  0:02 say: gg\n  0:03 ClientConnect: 2\n  0:04 Kill: 1022 2 22: <world> killed Zeh by MOD_FALLING\n",
        );

        assert_eq!(
            expect_context_error(&mut scanner).message,
            "client connect from empty game"
        );
        assert_eq!(
            expect_context_error(&mut scanner).message,
            "kill from empty game"
        );
        assert_eq!(scanner.next_game().unwrap(), Scan::End(None));
    }

    #[test]
    fn username_index_resets_between_games() {
        let log = format!(
            "{TWO_PLAYERS}  0:55 ShutdownGame:\n  1:00 InitGame: \\sv_hostname\\Next\n  1:01 ClientConnect: 2\n  1:02 Kill: 2 3 6: Isgalamido killed Dono da Bola by MOD_ROCKET\n"
        );
        let mut scanner = scanner(&log);

        expect_game(&mut scanner);
        let err = expect_context_error(&mut scanner);
        assert_eq!(err.message, "could not find killer id. username: Isgalamido");
    }

    #[test]
    fn counts_discarded_lines() {
        let log = format!("{TWO_PLAYERS}  0:50 Kill: broken\n  0:51 Weird: line\n  0:55 ShutdownGame:\n");
        let mut scanner = scanner(&log);

        expect_game(&mut scanner);
        // The blank line at the top of the fixture counts too.
        assert_eq!(scanner.discarded_lines(), 3);
    }

    #[test]
    fn iterator_yields_games_errors_and_trailing_game() {
        let log = format!(
            "{TWO_PLAYERS}  0:55 ShutdownGame:\n  0:56 Exit: Fraglimit hit.\n  1:00 InitGame: \\sv_hostname\\Next\n  1:01 ClientConnect: 4\n"
        );
        let results: Vec<_> = scanner(&log).collect();

        assert_eq!(results.len(), 3);
        assert!(results[0].is_ok());
        assert!(matches!(&results[1], Err(GameError::Context(e)) if e.message == "exit from empty game"));
        let last = results[2].as_ref().unwrap();
        assert_eq!(last.players.keys().copied().collect::<Vec<_>>(), vec![4]);
    }
}
