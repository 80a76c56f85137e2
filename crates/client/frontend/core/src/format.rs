//! Player-facing text for engine outcomes and refused actions.
use client_engine::{
    AttackResponse, EngineError, JoinResponse, MoveResponse, TargetType, TickResponse,
};

pub const NO_TARGET: &str = "No target selected.";
pub const CANT_ATTACK: &str = "You can't attack that.";
pub const DONT_KNOW_WHERE: &str = "You don't know where you are.";
pub const ZOMBIE_TOO_FAR: &str = "The zombie is too far away to attack.";
pub const NO_ZOMBIE_HERE: &str = "There is no zombie here.";
pub const HUMAN_TOO_FAR: &str = "That human is too far away.";
pub const NO_HUMAN_HERE: &str = "There is no other human here.";

const NETWORK_ERROR: &str = "network error";
const UNKNOWN: &str = "unknown";

pub fn join_message(result: &Result<JoinResponse, EngineError>) -> String {
    match result {
        Ok(res) if res.ok => match res.position() {
            Some(position) => format!("Joined game at {position}."),
            None => "Joined game.".to_string(),
        },
        Ok(res) => format!("Join failed: {}", reason_or_unknown(res.reason.as_deref())),
        Err(_) => format!("Join failed: {NETWORK_ERROR}"),
    }
}

pub fn move_message(result: &Result<MoveResponse, EngineError>) -> String {
    match result {
        Ok(res) if res.ok => match res.position() {
            Some(position) => format!("Move ok to {position}."),
            None => "Move ok.".to_string(),
        },
        Ok(res) => format!("Move failed: {}", reason_or_unknown(res.reason.as_deref())),
        Err(_) => format!("Move failed: {NETWORK_ERROR}"),
    }
}

/// Combat line for an attack on a target of `target_type`.
///
/// Only an explicit `hit: true` counts as a hit; a missing flag reads as a
/// miss.
pub fn attack_message(
    target_type: TargetType,
    result: &Result<AttackResponse, EngineError>,
) -> String {
    let res = match result {
        Ok(res) if res.ok => res,
        Ok(res) => {
            return format!("Attack failed: {}", reason_or_unknown(res.error.as_deref()));
        }
        Err(_) => return format!("Attack failed: {NETWORK_ERROR}"),
    };

    let label = target_type.noun();
    let mut text = if res.hit == Some(true) {
        match (res.damage, res.hp_after) {
            (Some(damage), Some(hp)) => format!("You hit the {label} for {damage}. HP is now {hp}."),
            (Some(damage), None) => format!("You hit the {label} for {damage}."),
            (None, _) => format!("You hit the {label}."),
        }
    } else {
        format!("Your attack missed the {label}.")
    };

    if res.dead == Some(true) {
        text.push_str(&format!(" The {label} dies."));
    }
    text
}

pub fn tick_message(result: &Result<TickResponse, EngineError>) -> String {
    match result {
        Ok(res) if res.ok => {
            let mut parts = Vec::with_capacity(2);
            if let Some(players) = res.players_updated.filter(|&n| n > 0) {
                parts.push(format!("{players} player(s) updated"));
            }
            if let Some(zombies) = res.zombies_moved.filter(|&n| n > 0) {
                parts.push(format!("{zombies} zombie(s) moved"));
            }
            if parts.is_empty() {
                "Tick complete.".to_string()
            } else {
                format!("Tick: {}", parts.join(", "))
            }
        }
        Ok(res) => res
            .message
            .clone()
            .filter(|message| !message.is_empty())
            .unwrap_or_else(|| "Tick failed.".to_string()),
        Err(err) => format!("Tick error: {err}"),
    }
}

fn reason_or_unknown(reason: Option<&str>) -> &str {
    reason.filter(|reason| !reason.is_empty()).unwrap_or(UNKNOWN)
}
