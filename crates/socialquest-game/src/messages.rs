//! Reply texts.
//!
//! Every sentence the game posts back to the room is built here so the
//! engine only decides *which* reply to send.

use crate::damage::AttackTier;

/// Keyword that starts every game command, right after the prefix.
pub const COMMAND_WORD: &str = "社会";

/// Usage line for the top-level command.
pub fn usage(prefix: &str) -> String {
    format!("{prefix}{COMMAND_WORD} [register|unregister|status|reincarnation]")
}

/// Usage line for the `reincarnation` sub-command.
pub fn reincarnation_usage(prefix: &str) -> String {
    format!("{prefix}{COMMAND_WORD} reincarnation [auto|manual|status]")
}

fn hp_line(hp: i64, max_hp: i64, rebirth_count: u32) -> String {
    format!("残りHP: {hp}/{max_hp} 転生回数: {rebirth_count}")
}

/// Registration refused because the user already plays.
pub fn already_registered(name: &str, hp: i64, max_hp: i64, rebirth_count: u32) -> String {
    format!(
        "{name}は既に社会に参加しています。 {}",
        hp_line(hp, max_hp, rebirth_count)
    )
}

/// Registration succeeded.
pub fn registered(name: &str, hp: i64, max_hp: i64, rebirth_count: u32) -> String {
    format!(
        "{name}は社会に参加しました。つよく生きましょう。 {}",
        hp_line(hp, max_hp, rebirth_count)
    )
}

/// Leaving refused because the user does not play.
pub fn already_unregistered(name: &str) -> String {
    format!("{name}は既に社会から離脱しています。")
}

/// Leaving succeeded.
pub fn unregistered(name: &str) -> String {
    format!("{name}は社会から離脱しました。来世もがんばりましょう。")
}

/// Status of a participating user.
pub fn status_active(name: &str, hp: i64, max_hp: i64, rebirth_count: u32) -> String {
    format!(
        "{name}は社会に参加しています。 {}",
        hp_line(hp, max_hp, rebirth_count)
    )
}

/// Status of a user who does not play.
pub fn status_inactive(name: &str) -> String {
    format!("{name}は社会に参加していません。")
}

/// Reply to an auto rebirth toggle.
pub fn auto_rebirth_changed(name: &str, enabled: bool, changed: bool) -> String {
    match (enabled, changed) {
        (true, true) => format!("{name}の自動転生を有効にしました。油断せずに生きましょう。"),
        (true, false) => format!("{name}の自動転生は既に有効です。"),
        (false, true) => format!("{name}の自動転生を無効にしました。命を大事にしましょう。"),
        (false, false) => format!("{name}の自動転生は既に無効です。"),
    }
}

/// Report of the auto rebirth flag.
pub fn auto_rebirth_status(name: &str, enabled: bool) -> String {
    if enabled {
        format!("{name}の自動転生は有効です。")
    } else {
        format!("{name}の自動転生は無効です。")
    }
}

/// Announcement of healing after days of inactivity.
pub fn rested(days: u32, before: i64, after: i64, max_hp: i64) -> String {
    format!("宿屋で{days}日休みました。 残りHP: {before}/{max_hp} -> {after}/{max_hp}")
}

const fn tier_text(tier: AttackTier) -> &'static str {
    match tier {
        AttackTier::Attack => "こうげき！",
        AttackTier::DoubleStrike => "はやぶさ斬り！",
        AttackTier::Combo => "れんぞくこうげき！",
    }
}

/// Result of one attack. Zero damage is reported as a dodge.
pub fn attack(tier: AttackTier, name: &str, damage: u32, hp: i64) -> String {
    let outcome = if damage == 0 {
        "はひらりと身をかわした！".to_owned()
    } else {
        format!("に{damage}のダメージ！")
    };
    format!("社会の{} {name}{outcome} 残りHP: {hp}", tier_text(tier))
}

/// Death announcement.
pub fn defeated(name: &str) -> String {
    format!("{name}は社会の荒波に打ち勝てませんでした。")
}

/// Revival announcement.
pub fn revived(name: &str, hp: i64, max_hp: i64, rebirth_count: u32) -> String {
    format!(
        "温かい光が{name}の体を包み込んだ。 {}",
        hp_line(hp, max_hp, rebirth_count)
    )
}
