//! Match aggregates built by the [`GameScanner`](crate::GameScanner).

use std::collections::BTreeMap;

use crate::event::ClientId;

/// Client slot reserved for environment kills.
pub const WORLD_ID: ClientId = 0;

/// Username the server prints for environment kills.
pub const WORLD_USERNAME: &str = "<world>";

/// Ending reason recorded when a match closes without a usable `Exit`.
pub const UNEXPECTED_SHUTDOWN: &str = "SERVER_UNEXPECTED_SHUTDOWN";

/// Means-of-death codes every game starts counting at zero.
pub const KNOWN_MEANS: &[&str] = &[
    "MOD_UNKNOWN",
    "MOD_SHOTGUN",
    "MOD_GAUNTLET",
    "MOD_MACHINEGUN",
    "MOD_GRENADE",
    "MOD_GRENADE_SPLASH",
    "MOD_ROCKET",
    "MOD_ROCKET_SPLASH",
    "MOD_PLASMA",
    "MOD_PLASMA_SPLASH",
    "MOD_RAILGUN",
    "MOD_LIGHTNING",
    "MOD_BFG",
    "MOD_BFG_SPLASH",
    "MOD_WATER",
    "MOD_SLIME",
    "MOD_LAVA",
    "MOD_CRUSH",
    "MOD_TELEFRAG",
    "MOD_FALLING",
    "MOD_SUICIDE",
    "MOD_TARGET_LASER",
    "MOD_TRIGGER_HURT",
    "MOD_NAIL",
    "MOD_CHAINGUN",
    "MOD_PROXIMITY_MINE",
    "MOD_KAMIKAZE",
    "MOD_JUICED",
    "MOD_GRAPPLE",
];

/// Count of occurrences keyed by weapon or username.
pub type Tally = BTreeMap<String, u32>;

pub(crate) fn bump(tally: &mut Tally, key: &str) {
    *tally.entry(key.to_string()).or_insert(0) += 1;
}

/// Per-client statistics for one match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerInfo {
    pub id: ClientId,
    pub username: String,
    pub score: i32,
    pub kill_count: u32,
    pub death_count: u32,
    pub suicide_count: u32,
    pub deaths_by_weapon: Tally,
    pub deaths_by_source_username: Tally,
    pub kills_by_weapon: Tally,
    pub kills_by_target_username: Tally,
}

impl PlayerInfo {
    pub fn new(id: ClientId) -> Self {
        Self {
            id,
            ..Self::default()
        }
    }

    pub(crate) fn world() -> Self {
        Self {
            username: WORLD_USERNAME.to_string(),
            ..Self::new(WORLD_ID)
        }
    }
}

/// Kills attributed to the world pseudo-player, archived at finalization.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorldKillStatus {
    pub kill_count: u32,
    pub kills_by_weapon: Tally,
    pub kills_by_target_username: Tally,
}

/// A finalized match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// Players still connected when the match closed, keyed by client slot.
    pub players: BTreeMap<ClientId, PlayerInfo>,
    pub ending_reason: Option<String>,
    /// Players in disconnect order.
    pub disconnected_players: Vec<PlayerInfo>,
    pub world_kills: WorldKillStatus,
    pub kill_count_by_means: Tally,
    pub total_kills: u32,
}

/// A match still being folded from events.
///
/// The world pseudo-player lives beside the connected clients rather than in
/// `players`, so client events can never replace or remove it.
#[derive(Debug)]
pub(crate) struct OpenGame {
    pub(crate) world: PlayerInfo,
    pub(crate) players: BTreeMap<ClientId, PlayerInfo>,
    pub(crate) ending_reason: Option<String>,
    pub(crate) disconnected_players: Vec<PlayerInfo>,
    pub(crate) kill_count_by_means: Tally,
    pub(crate) total_kills: u32,
}

impl OpenGame {
    pub(crate) fn new() -> Self {
        Self {
            world: PlayerInfo::world(),
            players: BTreeMap::new(),
            ending_reason: None,
            disconnected_players: Vec::new(),
            kill_count_by_means: KNOWN_MEANS.iter().map(|m| ((*m).to_string(), 0)).collect(),
            total_kills: 0,
        }
    }

    /// Looks up a participant by slot, the world included.
    pub(crate) fn participant_mut(&mut self, id: ClientId) -> Option<&mut PlayerInfo> {
        if id == WORLD_ID {
            Some(&mut self.world)
        } else {
            self.players.get_mut(&id)
        }
    }

    pub(crate) fn has_participant(&self, id: ClientId) -> bool {
        id == WORLD_ID || self.players.contains_key(&id)
    }

    /// Archives the world's kills; its score is dropped.
    pub(crate) fn finalize(self) -> Game {
        Game {
            players: self.players,
            ending_reason: self.ending_reason,
            disconnected_players: self.disconnected_players,
            world_kills: WorldKillStatus {
                kill_count: self.world.kill_count,
                kills_by_weapon: self.world.kills_by_weapon,
                kills_by_target_username: self.world.kills_by_target_username,
            },
            kill_count_by_means: self.kill_count_by_means,
            total_kills: self.total_kills,
        }
    }
}
