//! Console protocol
//!
//! A line-oriented front end in the style of a UCI loop. It stands in for the
//! presentation layer: it turns square names into board coordinates, calls
//! the game core and prints what changed.

use crate::board::Board;
use crate::config::{console_options, GameConfig};
use crate::error::Error;
use crate::game::{ClickOutcome, Game, MoveOutcome, SelectOutcome};
use crate::opponent::GreedyCapture;
use crate::types::*;
use std::collections::BTreeSet;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const CONSOLE_NAME: &str = "chess_core";
const CONSOLE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct ConsoleProtocol<W: Write> {
    game: Game,
    opponent: GreedyCapture,
    config: GameConfig,
    out: W,
    running: bool,
}

impl<W: Write> ConsoleProtocol<W> {
    pub fn new(config: GameConfig, out: W) -> Self {
        ConsoleProtocol {
            game: Game::with_config(Board::setup_board(), Color::White, &config),
            opponent: GreedyCapture::new(config.seed),
            config,
            out,
            running: true,
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn run<R: BufRead>(&mut self, input: R) {
        for line in input.lines() {
            let line = match line {
                Ok(line) => line,
                Err(err) => {
                    warn!(%err, "failed to read input");
                    break;
                }
            };
            let line = line.trim();
            if !line.is_empty() {
                self.process_command(line);
            }
            if !self.running {
                break;
            }
        }
    }

    /// Run one command line, reporting errors on the output
    pub fn process_command(&mut self, line: &str) {
        if let Err(err) = self.dispatch(line) {
            debug!(%err, line, "command failed");
            self.send(&format!("info string error: {err}"));
        }
    }

    fn dispatch(&mut self, line: &str) -> Result<(), Error> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        let Some((&command, args)) = parts.split_first() else {
            return Ok(());
        };

        match command {
            "uci" | "options" => self.cmd_options(),
            "isready" => self.send("readyok"),
            "setoption" => self.cmd_setoption(args)?,
            "new" | "ucinewgame" => self.cmd_new(),
            "position" => self.cmd_position(args)?,
            "select" => self.cmd_select(args)?,
            "move" => self.cmd_move(args)?,
            "click" => self.cmd_click(args)?,
            "go" => self.cmd_go(),
            "moves" => self.cmd_moves(),
            "turn" => self.send(&format!("turn {}", self.game.current_turn())),
            "d" => self.cmd_display(),
            "quit" => self.running = false,
            _ => self.send(&format!("info string unknown command: {command}")),
        }
        Ok(())
    }

    fn send(&mut self, message: &str) {
        writeln!(self.out, "{message}").ok();
        self.out.flush().ok();
    }

    fn cmd_options(&mut self) {
        self.send(&format!("id name {CONSOLE_NAME} {CONSOLE_VERSION}"));
        for option in console_options(&self.config) {
            self.send(&option.describe());
        }
        self.send("ok");
    }

    fn cmd_setoption(&mut self, args: &[&str]) -> Result<(), Error> {
        if args.first() != Some(&"name") {
            return Err(Error::MissingArgument("setoption name"));
        }
        let value_at = args
            .iter()
            .position(|&a| a == "value")
            .ok_or(Error::MissingArgument("setoption value"))?;
        let name = args[1..value_at].join(" ");
        let value = args[value_at + 1..].join(" ");

        self.config.set_option(&name, &value)?;
        self.game.set_enforce_turn(self.config.enforce_turn);
        if name.eq_ignore_ascii_case("seed") {
            self.opponent = GreedyCapture::new(self.config.seed);
        }
        debug!(%name, %value, "option set");
        Ok(())
    }

    fn cmd_new(&mut self) {
        self.game = Game::with_config(Board::setup_board(), Color::White, &self.config);
        self.opponent = GreedyCapture::new(self.config.seed);
    }

    /// `position startpos` or `position <placement> [w|b]`
    fn cmd_position(&mut self, args: &[&str]) -> Result<(), Error> {
        let placement = args.first().ok_or(Error::MissingArgument("position"))?;
        let board = if *placement == "startpos" {
            Board::setup_board()
        } else {
            Board::from_placement(placement)?
        };
        let turn = match args.get(1) {
            Some(color) => color.parse::<Color>()?,
            None => Color::White,
        };
        self.game = Game::with_config(board, turn, &self.config);
        Ok(())
    }

    fn cmd_select(&mut self, args: &[&str]) -> Result<(), Error> {
        let sq = parse_arg(args, "select")?;
        let outcome = self.game.select(sq);
        self.report_selection(outcome);
        Ok(())
    }

    fn cmd_move(&mut self, args: &[&str]) -> Result<(), Error> {
        let sq = parse_arg(args, "move")?;
        let outcome = self.game.attempt_move(sq);
        self.report_move(outcome);
        if outcome.is_applied() {
            self.opponent_reply();
        }
        Ok(())
    }

    fn cmd_click(&mut self, args: &[&str]) -> Result<(), Error> {
        let sq = parse_arg(args, "click")?;
        match self.game.click(sq) {
            ClickOutcome::Selection(outcome) => self.report_selection(outcome),
            ClickOutcome::Move(outcome) => {
                self.report_move(outcome);
                if outcome.is_applied() {
                    self.opponent_reply();
                }
            }
        }
        Ok(())
    }

    /// The opponent plays for whichever side is to move
    fn cmd_go(&mut self) {
        match self.game.play_opponent(&mut self.opponent) {
            Some(outcome) => self.report_move(outcome),
            None => self.send("nomove"),
        }
    }

    fn opponent_reply(&mut self) {
        if self.config.opponent == Some(self.game.current_turn()) {
            self.cmd_go();
        }
    }

    fn cmd_moves(&mut self) {
        let sets = self.game.move_sets();
        let lines = [
            format!("valid {}", join_squares(&sets.valid)),
            format!("blocked {}", join_squares(&sets.blocked)),
            format!("capture {}", join_squares(&sets.capture)),
        ];
        for line in lines {
            self.send(&line);
        }
    }

    fn cmd_display(&mut self) {
        let sets = self.game.move_sets();
        let text = self.game.board().display_with(|sq| {
            if sets.valid.contains(&sq) {
                Some('*')
            } else if sets.capture.contains(&sq) {
                Some('x')
            } else if sets.blocked.contains(&sq) {
                Some('#')
            } else {
                None
            }
        });
        let placement = self.game.board().to_placement();
        let selected = self
            .game
            .selected()
            .map_or_else(|| "none".to_string(), |p| p.position.to_string());
        let turn = self.game.current_turn();

        self.send(&text);
        self.send(&format!("Placement: {placement}"));
        self.send(&format!("Turn: {turn}"));
        self.send(&format!("Selected: {selected}"));
    }

    fn report_selection(&mut self, outcome: SelectOutcome) {
        match outcome {
            SelectOutcome::Selected(sq) => self.send(&format!("selected {sq}")),
            SelectOutcome::Reselected(sq) => self.send(&format!("reselected {sq}")),
            SelectOutcome::Deselected => self.send("deselected"),
        }
        if self.game.has_selection() {
            self.cmd_moves();
        }
    }

    fn report_move(&mut self, outcome: MoveOutcome) {
        match outcome {
            MoveOutcome::Moved { from, to } => self.send(&format!("moved {from}{to}")),
            MoveOutcome::Captured { from, to, captured } => {
                self.send(&format!("captured {from}{to} {}", captured.to_char()))
            }
            MoveOutcome::NoOp => self.send("noop"),
        }
    }
}

fn parse_arg(args: &[&str], command: &'static str) -> Result<Square, Error> {
    let raw = args.first().ok_or(Error::MissingArgument(command))?;
    Square::parse(raw)
}

fn join_squares(squares: &BTreeSet<Square>) -> String {
    if squares.is_empty() {
        return "-".to_string();
    }
    squares
        .iter()
        .map(|sq| sq.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}
