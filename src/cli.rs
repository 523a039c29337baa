//! Interactive command dispatch.
//!
//! Parses one line of input into a `Command`, runs it against a `Game`, and
//! returns the text to show. The binary owns the read loop and the terminal;
//! this module never touches stdin or stdout.

use thiserror::Error as ThisError;
use tracing::{debug, info, warn};

use crate::core::DieSet;
use crate::game::Game;
use crate::rules::score_roll;

/// One entry in the command table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CommandDef {
    pub name: &'static str,
    pub args: &'static str,
    pub desc: &'static str,
}

const fn cmd(name: &'static str, args: &'static str, desc: &'static str) -> CommandDef {
    CommandDef { name, args, desc }
}

/// Every command, in help order.
pub const COMMANDS: &[CommandDef] = &[
    cmd("help", "", "get help"),
    cmd("exit", "", "quit the command loop"),
    cmd("status", "", "show current game status"),
    cmd("score", "", "show the scorecard"),
    cmd("history", "", "display the game history"),
    cmd("rollcheck", "<rollbits>", "check validity of a roll"),
    cmd("roll", "<d0> <d1> <d2>", "roll with given values (0 or - is a keep)"),
    cmd("passto", "<player>", "end turn and pass dice to specified player"),
    cmd("dump", "", "print the game record as JSON"),
];

const ROLLCHECK_USAGE: &str = "rollcheck <rollbits>";
const ROLL_USAGE: &str = "roll <d0> <d1> <d2>";
const PASSTO_USAGE: &str = "passto <player>";

/// A parsed command line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Help,
    Exit,
    Status,
    Score,
    History,
    RollCheck(DieSet),
    Roll([u8; 3]),
    PassTo(String),
    Dump,
}

/// A command line could not be parsed.
#[derive(Clone, Debug, ThisError, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command: \"{command}\"")]
    Unknown { command: String },
    #[error("usage: {usage}")]
    Usage { usage: &'static str },
    #[error("invalid dice map \"{arg}\"")]
    InvalidDiceMap { arg: String },
    #[error("invalid die value \"{arg}\"")]
    InvalidDieValue { arg: String },
}

/// What the read loop should do after a line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Continue(String),
    Quit(String),
}

impl Outcome {
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Continue(text) | Self::Quit(text) => text,
        }
    }
}

/// Parse a line. Blank lines parse to `None`.
pub fn parse_line(line: &str) -> Result<Option<Command>, CommandError> {
    let mut words = line.split_whitespace();
    let Some(name) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match name {
        "help" => Command::Help,
        "exit" => Command::Exit,
        "status" => Command::Status,
        "score" => Command::Score,
        "history" => Command::History,
        "dump" => Command::Dump,
        "rollcheck" => match args.as_slice() {
            [bits] => Command::RollCheck(parse_dice_map(bits)?),
            _ => return Err(CommandError::Usage { usage: ROLLCHECK_USAGE }),
        },
        "roll" => {
            if args.is_empty() || args.len() > 3 {
                return Err(CommandError::Usage { usage: ROLL_USAGE });
            }
            let mut dice = [0u8; 3];
            for (slot, arg) in dice.iter_mut().zip(&args) {
                *slot = parse_die(arg)?;
            }
            Command::Roll(dice)
        }
        "passto" => match args.as_slice() {
            [player] => Command::PassTo((*player).to_string()),
            _ => return Err(CommandError::Usage { usage: PASSTO_USAGE }),
        },
        other => {
            return Err(CommandError::Unknown {
                command: other.to_string(),
            })
        }
    };
    Ok(Some(command))
}

/// Parse a dice bitmap in binary (`0b`), octal (`0o` or leading `0`),
/// hex (`0x`) or decimal.
fn parse_dice_map(arg: &str) -> Result<DieSet, CommandError> {
    let (digits, radix) = if let Some(rest) = arg.strip_prefix("0b").or_else(|| arg.strip_prefix("0B")) {
        (rest, 2)
    } else if let Some(rest) = arg.strip_prefix("0x").or_else(|| arg.strip_prefix("0X")) {
        (rest, 16)
    } else if let Some(rest) = arg.strip_prefix("0o").or_else(|| arg.strip_prefix("0O")) {
        (rest, 8)
    } else if arg.len() > 1 && arg.starts_with('0') {
        (&arg[1..], 8)
    } else {
        (arg, 10)
    };

    u8::from_str_radix(digits, radix)
        .ok()
        .and_then(DieSet::from_bits)
        .ok_or_else(|| CommandError::InvalidDiceMap { arg: arg.to_string() })
}

fn parse_die(arg: &str) -> Result<u8, CommandError> {
    if arg == "-" {
        return Ok(0);
    }
    arg.parse()
        .map_err(|_| CommandError::InvalidDieValue { arg: arg.to_string() })
}

/// Help text listing every command.
#[must_use]
pub fn render_help() -> String {
    let mut out = String::from("Well, please, help yourself!");
    for def in COMMANDS {
        out.push('\n');
        out.push_str(def.name);
        if !def.args.is_empty() {
            out.push(' ');
            out.push_str(def.args);
        }
        out.push_str(" - ");
        out.push_str(def.desc);
    }
    out
}

/// An interactive session over one game.
#[derive(Clone, Debug)]
pub struct Session {
    game: Game,
}

impl Session {
    #[must_use]
    pub fn new(game: Game) -> Self {
        Self { game }
    }

    #[must_use]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Parse and run one line of input.
    pub fn execute(&mut self, line: &str) -> Outcome {
        match parse_line(line) {
            Ok(Some(command)) => self.run(command),
            Ok(None) => Outcome::Continue(String::new()),
            Err(err) => {
                let name = line.split_whitespace().next().unwrap_or_default();
                debug!(%err, "rejected command line");
                Outcome::Continue(format!("Error with {name}: {err}"))
            }
        }
    }

    /// Run a parsed command.
    pub fn run(&mut self, command: Command) -> Outcome {
        debug!(?command, "dispatch");
        let text = match command {
            Command::Help => render_help(),
            Command::Exit => return Outcome::Quit("Adios!".to_string()),
            Command::Status => format!("Game: {}\nTurn: {}", self.game, self.game.current_turn_summary()),
            Command::Score => format!("Scorecard:\n{}", self.game.scorecard()),
            Command::History => self.history(),
            Command::RollCheck(mask) => match self.game.check_roll(mask) {
                Ok(()) => format!("Sure, roll {mask}!!!"),
                Err(err) => format!("Cannot roll {mask}: {err}"),
            },
            Command::Roll(dice) => self.roll(dice),
            Command::PassTo(player) => self.pass_to(&player),
            Command::Dump => match self.game.record().to_json() {
                Ok(json) => json,
                Err(err) => {
                    warn!(%err, "failed to encode game record");
                    format!("Cannot dump game: {err}")
                }
            },
        };
        Outcome::Continue(text)
    }

    fn history(&self) -> String {
        let mut out = format!(
            "History of game: {} ({} turns)",
            self.game.id(),
            self.game.turn_count()
        );
        for turn in self.game.history() {
            let scored = turn
                .final_score()
                .map_or_else(|| "nothing".to_string(), |s| s.to_string());
            out.push_str(&format!("\n{} rolled {} for {}", turn.player(), turn.roll_string(), scored));
        }
        out.push_str(&format!("\nCurrent: {}", self.game.current_turn()));
        out
    }

    fn roll(&mut self, [d0, d1, d2]: [u8; 3]) -> String {
        let mut out = format!("Rolling {d0}/{d1}/{d2}\n");
        let player = self.game.current_player().clone();

        match self.game.roll_with(d0, d1, d2) {
            Ok(roll) => {
                if roll.is_consecutive {
                    out.push_str("CONSECUTIVES! ");
                }
                match score_roll(roll.results) {
                    Some(scored) => out.push_str(&format!("That's a {scored}")),
                    None => out.push_str(&format!("Whoops - {} has no value?", roll.faces_string())),
                }
                debug!(player = %player, faces = %roll.faces_string(), "roll recorded");
            }
            Err(err) => {
                warn!(player = %player, %err, "roll rejected");
                out.push_str(&format!("Whoops - {err}"));
            }
        }

        if self.game.legal_requests().is_empty() && self.game.current_turn().num_rolls() > 0 {
            out.push_str("\nTurn over!");
        }
        out
    }

    fn pass_to(&mut self, player: &str) -> String {
        let passer = self.game.current_player().clone();
        match self.game.pass_dice(player) {
            Ok(scored) => {
                info!(from = %passer, to = player, score = %scored, "dice passed");
                format!("{passer} scored {scored}; dice to {player}")
            }
            Err(err) => {
                warn!(from = %passer, to = player, %err, "pass rejected");
                format!("FAIL! {err}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameConfig;

    fn session() -> Session {
        Session::new(Game::new(GameConfig::three_players("G1", "A", "B", "C")).unwrap())
    }

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse_line("help"), Ok(Some(Command::Help)));
        assert_eq!(parse_line("  score  "), Ok(Some(Command::Score)));
        assert_eq!(parse_line(""), Ok(None));
        assert_eq!(
            parse_line("bogus"),
            Err(CommandError::Unknown { command: "bogus".to_string() })
        );
    }

    #[test]
    fn test_parse_roll() {
        assert_eq!(parse_line("roll 3 4 5"), Ok(Some(Command::Roll([3, 4, 5]))));
        assert_eq!(parse_line("roll - 0 6"), Ok(Some(Command::Roll([0, 0, 6]))));
        assert_eq!(parse_line("roll 2"), Ok(Some(Command::Roll([2, 0, 0]))));
        assert_eq!(parse_line("roll"), Err(CommandError::Usage { usage: ROLL_USAGE }));
        assert_eq!(
            parse_line("roll x 1 1"),
            Err(CommandError::InvalidDieValue { arg: "x".to_string() })
        );
    }

    #[test]
    fn test_parse_dice_map_radixes() {
        let d0_d2 = DieSet::from_bits(0b101).unwrap();
        for arg in ["0b101", "5", "0x5", "0o5", "05"] {
            assert_eq!(parse_dice_map(arg), Ok(d0_d2), "{arg}");
        }
        assert!(parse_dice_map("8").is_err());
        assert!(parse_dice_map("0b1000").is_err());
        assert!(parse_dice_map("zz").is_err());
    }

    #[test]
    fn test_help_lists_commands() {
        let help = render_help();
        assert!(help.starts_with("Well, please, help yourself!"));
        assert!(help.contains("\nroll <d0> <d1> <d2> - "));
        assert_eq!(help.lines().count(), COMMANDS.len() + 1);
    }

    #[test]
    fn test_roll_reports_value() {
        let mut s = session();
        let out = s.execute("roll 3 4 5");
        assert_eq!(out.text(), "Rolling 3/4/5\nCONSECUTIVES! That's a 12");

        let out = s.execute("roll - - 6");
        assert_eq!(out.text(), "Rolling 0/0/6\nThat's a 7\nTurn over!");
    }

    #[test]
    fn test_rejected_roll() {
        let mut s = session();
        let out = s.execute("roll 3 4");
        assert!(out.text().starts_with("Rolling 3/4/0\nWhoops - must roll all dice"));
        assert_eq!(s.game().current_turn().num_rolls(), 0);
    }

    #[test]
    fn test_turn_over_after_last_legal_roll() {
        let mut s = session();
        s.execute("roll 1 2 4");
        let out = s.execute("roll - - 3");
        assert!(out.text().ends_with("\nTurn over!"));
    }

    #[test]
    fn test_pass_to() {
        let mut s = session();
        s.execute("roll 3 4 6");
        assert_eq!(s.execute("passto B").text(), "A scored 7; dice to B");
        assert_eq!(s.execute("passto Zed").text(), "FAIL! unknown player \"Zed\"");
    }

    #[test]
    fn test_exit() {
        let mut s = session();
        assert_eq!(s.execute("exit"), Outcome::Quit("Adios!".to_string()));
    }

    #[test]
    fn test_usage_error_names_command() {
        let mut s = session();
        assert_eq!(
            s.execute("passto").text(),
            "Error with passto: usage: passto <player>"
        );
    }
}
