//! Choosing between JSON, plain and pretty output.

/// How a command prints its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// One JSON document on stdout, nothing else
    Json,
    /// `key=value` and tab-separated lines for scripts
    #[default]
    Plain,
    /// Tables, badges and colors for a person at a terminal
    Pretty,
}

impl OutputMode {
    /// `--json` or `--format json` select JSON and `--format plain` forces
    /// plain. Otherwise a TTY gets pretty output unless `TERM=dumb`.
    pub fn resolve(json: bool, format: Option<&str>, is_tty: bool, term_is_dumb: bool) -> Self {
        let format = format.map(|f| f.trim().to_ascii_lowercase());
        match (json, format.as_deref()) {
            (true, _) | (false, Some("json")) => Self::Json,
            (false, Some("plain")) => Self::Plain,
            _ if is_tty && !term_is_dumb => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        *self == Self::Json
    }

    pub fn is_pretty(&self) -> bool {
        *self == Self::Pretty
    }
}
