use std::fmt;

#[derive(Debug)]
pub enum PickError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (bad numbering mode, empty file path, etc.).
    ConfigValidation(String),
    /// The configured depot is not in the built-in registry.
    UnknownDepot(String),
    /// Missing required column in the orders CSV.
    MissingColumn { column: String },
    /// IO error (CSV read, etc.).
    Io(String),
    /// No order row carried a usable sticker identifier.
    NoUsableRows { excluded: usize },
    /// No label page matched any order identifier.
    NoPagesMatched,
}

impl fmt::Display for PickError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::UnknownDepot(name) => write!(f, "unknown depot: {name}"),
            Self::MissingColumn { column } => {
                write!(f, "orders CSV: missing column '{column}'")
            }
            Self::Io(msg) => write!(f, "IO error: {msg}"),
            Self::NoUsableRows { excluded } => write!(
                f,
                "no order rows with a usable identifier ({excluded} excluded)"
            ),
            Self::NoPagesMatched => {
                write!(f, "no label page matched any order identifier")
            }
        }
    }
}

impl std::error::Error for PickError {}
