use thiserror::Error;

/// One entry of the interactive menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Run this many training rounds over the training table.
    Train(u64),
    AutoTrain,
    /// One testing pass; `errors_only` hides samples that scored perfectly.
    Test { errors_only: bool },
    Debug,
    Reset,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,
    #[error("unknown command: {0}")]
    Unknown(String),
    #[error("invalid round count: {0}")]
    InvalidRounds(String),
}

pub const MENU: &str =
    "(1[0[0[0[0[0[0[0]]]]]]]) Train, (12) Auto Train, (2, 22) Run Test, (3) Debug, (4) Reset, (-1) Quit ? ";

impl Command {
    /// Parses either a numeric menu code or a word form.
    ///
    /// Numeric codes: a power of ten from 1 to 10000000 trains that many
    /// rounds, 12 auto-trains, 2 and 22 test (22 shows errors only), 3 dumps
    /// the network, 4 resets and -1 quits.
    ///
    /// Word forms: `train [n]`, `auto`, `test`, `errors`, `debug`, `reset`, `quit`.
    pub fn parse(line: &str) -> Result<Command, CommandError> {
        let mut words = line.split_whitespace();
        let head = words.next().ok_or(CommandError::Empty)?;

        if let Ok(code) = head.parse::<i64>() {
            return Command::from_code(code).ok_or_else(|| CommandError::Unknown(head.to_string()));
        }

        let command = match head.to_ascii_lowercase().as_str() {
            "train" | "t" => match words.next() {
                None => Command::Train(1),
                Some(n) => match n.parse::<u64>() {
                    Ok(rounds) if rounds > 0 => Command::Train(rounds),
                    _ => return Err(CommandError::InvalidRounds(n.to_string())),
                },
            },
            "auto" | "a" => Command::AutoTrain,
            "test" => Command::Test { errors_only: false },
            "errors" => Command::Test { errors_only: true },
            "debug" | "d" => Command::Debug,
            "reset" | "r" => Command::Reset,
            "quit" | "q" | "exit" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }

    fn from_code(code: i64) -> Option<Command> {
        match code {
            -1 => Some(Command::Quit),
            1 | 10 | 100 | 1_000 | 10_000 | 100_000 | 1_000_000 | 10_000_000 => {
                Some(Command::Train(code as u64))
            }
            12 => Some(Command::AutoTrain),
            2 => Some(Command::Test { errors_only: false }),
            22 => Some(Command::Test { errors_only: true }),
            3 => Some(Command::Debug),
            4 => Some(Command::Reset),
            _ => None,
        }
    }
}
