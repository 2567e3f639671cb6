//! Game configuration and the console options that edit it

use crate::error::Error;
use crate::types::Color;

/// Settings of one game session
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    /// Only pieces of the side to move can be selected
    pub enforce_turn: bool,
    /// Side played by the automated opponent, if any
    pub opponent: Option<Color>,
    /// Opponent RNG seed; entropy when unset
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            enforce_turn: true,
            opponent: Some(Color::Black),
            seed: None,
        }
    }
}

/// Value and bounds of a console option
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum OptionKind {
    Spin { value: i64, min: i64, max: i64 },
    Check { value: bool },
    Combo { value: String, vars: Vec<String> },
}

/// A named option settable with `setoption name <name> value <value>`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ConsoleOption {
    pub name: &'static str,
    pub kind: OptionKind,
}

impl ConsoleOption {
    pub fn spin(name: &'static str, value: i64, min: i64, max: i64) -> Self {
        ConsoleOption {
            name,
            kind: OptionKind::Spin { value, min, max },
        }
    }

    pub fn check(name: &'static str, value: bool) -> Self {
        ConsoleOption {
            name,
            kind: OptionKind::Check { value },
        }
    }

    pub fn combo(name: &'static str, value: &str, vars: &[&str]) -> Self {
        ConsoleOption {
            name,
            kind: OptionKind::Combo {
                value: value.to_string(),
                vars: vars.iter().map(|v| v.to_string()).collect(),
            },
        }
    }

    /// One-line description, shaped like a UCI option line
    pub fn describe(&self) -> String {
        let mut s = format!("option name {}", self.name);
        match &self.kind {
            OptionKind::Spin { value, min, max } => {
                s.push_str(&format!(" type spin default {value} min {min} max {max}"));
            }
            OptionKind::Check { value } => {
                s.push_str(&format!(" type check default {value}"));
            }
            OptionKind::Combo { value, vars } => {
                s.push_str(&format!(" type combo default {value}"));
                for var in vars {
                    s.push_str(&format!(" var {var}"));
                }
            }
        }
        s
    }

    pub fn set_value(&mut self, raw: &str) -> Result<(), Error> {
        let invalid = || Error::InvalidOption {
            name: self.name.to_string(),
            value: raw.to_string(),
        };
        match &mut self.kind {
            OptionKind::Spin { value, min, max } => {
                let v: i64 = raw.trim().parse().map_err(|_| invalid())?;
                if v < *min || v > *max {
                    return Err(invalid());
                }
                *value = v;
            }
            OptionKind::Check { value } => {
                *value = match raw.trim().to_ascii_lowercase().as_str() {
                    "true" | "on" => true,
                    "false" | "off" => false,
                    _ => return Err(invalid()),
                };
            }
            OptionKind::Combo { value, vars } => {
                let raw = raw.trim().to_ascii_lowercase();
                if !vars.iter().any(|v| *v == raw) {
                    return Err(invalid());
                }
                *value = raw;
            }
        }
        Ok(())
    }
}

/// Spin default for a seed; seeds past the spin range are clamped to its maximum
fn seed_default(seed: Option<u64>) -> i64 {
    match seed {
        Some(seed) => i64::try_from(seed).unwrap_or(i64::MAX),
        None => -1,
    }
}

/// Console options mirroring `config`
pub fn console_options(config: &GameConfig) -> Vec<ConsoleOption> {
    let opponent = match config.opponent {
        Some(Color::White) => "white",
        Some(Color::Black) => "black",
        None => "none",
    };
    vec![
        ConsoleOption::check("EnforceTurn", config.enforce_turn),
        ConsoleOption::combo("Opponent", opponent, &["white", "black", "none"]),
        ConsoleOption::spin("Seed", seed_default(config.seed), -1, i64::MAX),
    ]
}

impl GameConfig {
    /// Set one option by name. A `Seed` of -1 means entropy.
    pub fn set_option(&mut self, name: &str, raw: &str) -> Result<(), Error> {
        let mut options = console_options(self);
        let option = options
            .iter_mut()
            .find(|o| o.name.eq_ignore_ascii_case(name))
            .ok_or_else(|| Error::UnknownOption(name.to_string()))?;
        option.set_value(raw)?;

        match &option.kind {
            OptionKind::Check { value } => self.enforce_turn = *value,
            OptionKind::Combo { value, .. } => {
                self.opponent = match value.as_str() {
                    "none" => None,
                    other => Some(other.parse::<Color>()?),
                };
            }
            OptionKind::Spin { value, .. } => {
                self.seed = if *value < 0 { None } else { Some(*value as u64) };
            }
        }
        Ok(())
    }
}
