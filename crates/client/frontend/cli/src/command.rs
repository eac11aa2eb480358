//! Parsing of console input lines.
use std::str::FromStr;

use battle_core::{ActorId, SkillCategory};
use thiserror::Error;

/// One line of player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CliCommand {
    Cast { actor: ActorId, skill: String },
    Skills(Option<SkillCategory>),
    Status,
    Reset,
    Help,
    Quit,
}

#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("empty input")]
    Empty,
    #[error("unknown command '{0}', try 'help'")]
    UnknownCommand(String),
    #[error("usage: cast <red|blue> <skill>")]
    CastUsage,
    #[error("unknown actor '{0}', expected red or blue")]
    UnknownActor(String),
    #[error("unknown category '{0}', expected attack, defense or recovery")]
    UnknownCategory(String),
    #[error("'{command}' takes no arguments")]
    UnexpectedArgument { command: &'static str },
}

impl FromStr for CliCommand {
    type Err = ParseError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(command) = words.next() else {
            return Err(ParseError::Empty);
        };
        let rest: Vec<&str> = words.collect();

        match command.to_ascii_lowercase().as_str() {
            "cast" | "c" => match rest.as_slice() {
                [actor, skill] => Ok(CliCommand::Cast {
                    actor: actor
                        .parse()
                        .map_err(|_| ParseError::UnknownActor(actor.to_string()))?,
                    skill: skill.to_ascii_lowercase(),
                }),
                _ => Err(ParseError::CastUsage),
            },
            "skills" => match rest.as_slice() {
                [] => Ok(CliCommand::Skills(None)),
                [category] => category
                    .parse()
                    .map(|category| CliCommand::Skills(Some(category)))
                    .map_err(|_| ParseError::UnknownCategory(category.to_string())),
                _ => Err(ParseError::UnexpectedArgument { command: "skills" }),
            },
            "status" | "s" => no_args(&rest, "status", CliCommand::Status),
            "reset" => no_args(&rest, "reset", CliCommand::Reset),
            "help" | "h" | "?" => no_args(&rest, "help", CliCommand::Help),
            "quit" | "q" | "exit" => no_args(&rest, "quit", CliCommand::Quit),
            other => Err(ParseError::UnknownCommand(other.to_string())),
        }
    }
}

fn no_args(
    rest: &[&str],
    command: &'static str,
    parsed: CliCommand,
) -> Result<CliCommand, ParseError> {
    if rest.is_empty() {
        Ok(parsed)
    } else {
        Err(ParseError::UnexpectedArgument { command })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cast() {
        assert_eq!(
            "cast Red Fireball".parse::<CliCommand>(),
            Ok(CliCommand::Cast {
                actor: ActorId::Red,
                skill: "fireball".into(),
            })
        );
        assert_eq!(
            "  c blue ice_spike ".parse::<CliCommand>(),
            Ok(CliCommand::Cast {
                actor: ActorId::Blue,
                skill: "ice_spike".into(),
            })
        );
    }

    #[test]
    fn cast_needs_actor_and_skill() {
        assert_eq!("cast red".parse::<CliCommand>(), Err(ParseError::CastUsage));
        assert_eq!(
            "cast green fireball".parse::<CliCommand>(),
            Err(ParseError::UnknownActor("green".into()))
        );
    }

    #[test]
    fn unknown_skill_is_left_to_the_engine() {
        assert!(matches!(
            "cast red teleport".parse::<CliCommand>(),
            Ok(CliCommand::Cast { .. })
        ));
    }

    #[test]
    fn parses_skill_listing() {
        assert_eq!("skills".parse(), Ok(CliCommand::Skills(None)));
        assert_eq!(
            "skills Defense".parse(),
            Ok(CliCommand::Skills(Some(SkillCategory::Defense)))
        );
        assert_eq!(
            "skills buffs".parse::<CliCommand>(),
            Err(ParseError::UnknownCategory("buffs".into()))
        );
    }

    #[test]
    fn rejects_stray_arguments_and_unknown_words() {
        assert_eq!(
            "quit now".parse::<CliCommand>(),
            Err(ParseError::UnexpectedArgument { command: "quit" })
        );
        assert_eq!(
            "dance".parse::<CliCommand>(),
            Err(ParseError::UnknownCommand("dance".into()))
        );
        assert_eq!("   ".parse::<CliCommand>(), Err(ParseError::Empty));
    }
}
