use std::fmt;

/// The closed set of outcomes a model reply can resolve to.
///
/// Anything that is not an exact `"turn on"` / `"turn off"` match degrades to
/// [`Command::NoCommand`], which is also what every internal fault maps to.
/// There is no fourth case.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TurnOn,
    TurnOff,
    NoCommand,
}

impl Command {
    /// Parses a raw model reply into a command.
    ///
    /// The reply is trimmed and lowercased first; matching is exact, with no
    /// substring matching (`"please turn it on"` is not a command).
    pub fn parse(text: &str) -> Self {
        match text.trim().to_lowercase().as_str() {
            "turn on" => Command::TurnOn,
            "turn off" => Command::TurnOff,
            _ => Command::NoCommand,
        }
    }

    /// The wire text used in API responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Command::TurnOn => "turn on",
            Command::TurnOff => "turn off",
            Command::NoCommand => "no command",
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
