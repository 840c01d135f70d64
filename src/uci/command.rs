//! Tokenizing of UCI input lines into commands.

use crate::board::Color;
use crate::engine::{SearchLimits, TimeControl};

/// Arguments of a `go` command. Unparseable values are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GoParams {
    pub depth: Option<u32>,
    pub nodes: Option<u64>,
    pub movetime: Option<u64>,
    pub wtime: Option<u64>,
    pub btime: Option<u64>,
    pub winc: Option<u64>,
    pub binc: Option<u64>,
    pub movestogo: Option<u64>,
    pub infinite: bool,
}

impl GoParams {
    /// Parse the tokens following `go`
    #[must_use]
    pub fn parse(args: &[&str]) -> Self {
        let mut params = GoParams::default();
        let mut tokens = args.iter();
        while let Some(&token) = tokens.next() {
            let mut value = || tokens.next().and_then(|v| v.parse::<u64>().ok());
            match token {
                "depth" => params.depth = value().and_then(|d| u32::try_from(d).ok()),
                "nodes" => params.nodes = value(),
                "movetime" => params.movetime = value(),
                "wtime" => params.wtime = value(),
                "btime" => params.btime = value(),
                "winc" => params.winc = value(),
                "binc" => params.binc = value(),
                "movestogo" => params.movestogo = value(),
                "infinite" => params.infinite = true,
                other => log::debug!("ignoring go argument '{other}'"),
            }
        }
        params
    }

    /// Clock for the side to move
    #[must_use]
    pub fn time_control(&self, side: Color) -> TimeControl {
        if self.infinite {
            return TimeControl::Infinite;
        }
        if let Some(time_ms) = self.movetime {
            return TimeControl::MoveTime { time_ms };
        }
        let (time, inc) = match side {
            Color::White => (self.wtime, self.winc),
            Color::Black => (self.btime, self.binc),
        };
        match time {
            Some(time_left_ms) => TimeControl::Incremental {
                time_left_ms,
                inc_ms: inc.unwrap_or(0),
                movestogo: self.movestogo,
            },
            None => TimeControl::Depth,
        }
    }

    #[must_use]
    pub fn limits(&self, side: Color) -> SearchLimits {
        SearchLimits {
            depth: self.depth,
            nodes: self.nodes,
            time_control: self.time_control(side),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UciCommand {
    Uci,
    IsReady,
    UciNewGame,
    /// Tokens after `position`
    Position(Vec<String>),
    Go(GoParams),
    Perft(u32),
    SetOption { name: String, value: Option<String> },
    Stop,
    Quit,
    Unknown(String),
}

pub fn parse_uci_command(line: &str) -> Option<UciCommand> {
    let parts: Vec<&str> = line.split_whitespace().collect();
    let (&head, args) = parts.split_first()?;

    let cmd = match head {
        "uci" => UciCommand::Uci,
        "isready" => UciCommand::IsReady,
        "ucinewgame" => UciCommand::UciNewGame,
        "position" => UciCommand::Position(args.iter().map(|p| (*p).to_string()).collect()),
        "go" => UciCommand::Go(GoParams::parse(args)),
        "perft" => {
            let depth = args.first().and_then(|v| v.parse::<u32>().ok()).unwrap_or(1);
            UciCommand::Perft(depth)
        }
        "setoption" => match parse_setoption(args) {
            Some((name, value)) => UciCommand::SetOption { name, value },
            None => UciCommand::Unknown(line.trim().to_string()),
        },
        "stop" => UciCommand::Stop,
        "quit" => UciCommand::Quit,
        _ => UciCommand::Unknown(line.trim().to_string()),
    };

    Some(cmd)
}

/// Split `name <words...> [value <words...>]`. Option names may contain spaces.
#[must_use]
pub fn parse_setoption(args: &[&str]) -> Option<(String, Option<String>)> {
    let mut name_parts: Vec<&str> = Vec::new();
    let mut value_parts: Vec<&str> = Vec::new();
    let mut in_value = None;

    for &part in args {
        match part {
            "name" if in_value.is_none() => in_value = Some(false),
            "value" if in_value == Some(false) => in_value = Some(true),
            _ => match in_value {
                Some(false) => name_parts.push(part),
                Some(true) => value_parts.push(part),
                None => {}
            },
        }
    }

    if name_parts.is_empty() {
        return None;
    }

    let value = (!value_parts.is_empty()).then(|| value_parts.join(" "));
    Some((name_parts.join(" "), value))
}
