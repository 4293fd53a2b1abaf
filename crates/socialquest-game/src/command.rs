//! Command parsing.
//!
//! A message is a command when its text starts with `{prefix}社会`. The
//! text is split on whitespace; the first field is the command word itself
//! and the rest select the operation. Anything unrecognized falls back to a
//! usage line.

use crate::messages::COMMAND_WORD;

/// A parsed game command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    /// `社会 register`
    Register,
    /// `社会 unregister`
    Unregister,
    /// `社会 status`
    Status,
    /// `社会 reincarnation auto` (true) or `社会 reincarnation manual` (false)
    SetAutoRebirth(bool),
    /// `社会 reincarnation status`
    RebirthStatus,
    /// `社会 reincarnation` with no argument
    RebirthUsage,
    /// Any other text starting with the command word
    Usage,
}

impl Command {
    /// Parse `text`, returning `None` when it is not a command at all.
    pub fn parse(text: &str, prefix: &str) -> Option<Self> {
        let rest = text.strip_prefix(prefix)?;
        if !rest.starts_with(COMMAND_WORD) {
            return None;
        }

        let args: Vec<&str> = text.split_whitespace().collect();
        let command = match args.as_slice() {
            [_, "register"] => Self::Register,
            [_, "unregister"] => Self::Unregister,
            [_, "status"] => Self::Status,
            [_, "reincarnation"] => Self::RebirthUsage,
            [_, "reincarnation", "auto"] => Self::SetAutoRebirth(true),
            [_, "reincarnation", "manual"] => Self::SetAutoRebirth(false),
            [_, "reincarnation", "status"] => Self::RebirthStatus,
            _ => Self::Usage,
        };
        Some(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_commands_are_ignored() {
        assert_eq!(Command::parse("つかれた", ""), None);
        assert_eq!(Command::parse("社会 register", "!"), None);
        assert_eq!(Command::parse("今日の社会 status", ""), None);
    }

    #[test]
    fn top_level_verbs() {
        assert_eq!(Command::parse("社会 register", ""), Some(Command::Register));
        assert_eq!(
            Command::parse("!社会 unregister", "!"),
            Some(Command::Unregister)
        );
        assert_eq!(Command::parse("社会   status ", ""), Some(Command::Status));
    }

    #[test]
    fn reincarnation_sub_commands() {
        assert_eq!(
            Command::parse("社会 reincarnation auto", ""),
            Some(Command::SetAutoRebirth(true))
        );
        assert_eq!(
            Command::parse("社会 reincarnation manual", ""),
            Some(Command::SetAutoRebirth(false))
        );
        assert_eq!(
            Command::parse("社会 reincarnation status", ""),
            Some(Command::RebirthStatus)
        );
        assert_eq!(
            Command::parse("社会 reincarnation", ""),
            Some(Command::RebirthUsage)
        );
    }

    #[test]
    fn unknown_forms_fall_back_to_usage() {
        assert_eq!(Command::parse("社会", ""), Some(Command::Usage));
        assert_eq!(Command::parse("社会 dance", ""), Some(Command::Usage));
        assert_eq!(
            Command::parse("社会 reincarnation sometimes", ""),
            Some(Command::Usage)
        );
        assert_eq!(
            Command::parse("社会 register now please", ""),
            Some(Command::Usage)
        );
    }
}
