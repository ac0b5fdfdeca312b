//! Terminal detection: TTY, color, unicode and width.

use std::io::IsTerminal;

use super::mode::OutputMode;

const MIN_WIDTH: usize = 40;
const MAX_WIDTH: usize = 160;
const FALLBACK_WIDTH: usize = 80;

/// What the current terminal can show, plus the resolved output mode.
#[derive(Debug, Clone)]
pub struct UiContext {
    pub is_tty: bool,
    pub color: bool,
    pub unicode: bool,
    /// Columns available for tables, clamped to a readable range
    pub width: usize,
    pub mode: OutputMode,
}

impl UiContext {
    /// Detect the terminal and combine it with the global and per-command flags.
    pub fn from_env(json: bool, format: Option<&str>, no_color: bool, ascii: bool) -> Self {
        let is_tty = std::io::stdout().is_terminal();
        let term = std::env::var("TERM").ok();
        let term_is_dumb = term.as_deref() == Some("dumb");

        let color = color_enabled(
            is_tty,
            no_color,
            std::env::var_os("NO_COLOR").is_some(),
            std::env::var("CLICOLOR_FORCE").is_ok_and(|v| v != "0"),
            term_is_dumb,
        );
        let unicode = !ascii && !term_is_dumb && locale_is_utf8();
        let width = terminal_width()
            .unwrap_or(FALLBACK_WIDTH)
            .clamp(MIN_WIDTH, MAX_WIDTH);

        Self {
            is_tty,
            color,
            unicode,
            width,
            mode: OutputMode::resolve(json, format, is_tty, term_is_dumb),
        }
    }

    /// Prompts need both a terminal to draw on and one to read from.
    pub fn is_interactive(&self) -> bool {
        self.is_tty && std::io::stdin().is_terminal()
    }
}

/// `--no-color` and `NO_COLOR` always win; `CLICOLOR_FORCE` colors pipes.
fn color_enabled(
    is_tty: bool,
    no_color_flag: bool,
    no_color_env: bool,
    force_env: bool,
    term_is_dumb: bool,
) -> bool {
    if no_color_flag || no_color_env {
        return false;
    }
    force_env || (is_tty && !term_is_dumb)
}

/// Unicode unless the locale explicitly names a non-UTF-8 charset.
fn locale_is_utf8() -> bool {
    let locale = ["LC_ALL", "LC_CTYPE", "LANG"]
        .iter()
        .filter_map(|key| std::env::var(key).ok())
        .find(|value| !value.is_empty());
    match locale {
        Some(value) => {
            let upper = value.to_ascii_uppercase();
            upper.contains("UTF-8") || upper.contains("UTF8") || !upper.contains('.')
        }
        None => true,
    }
}

fn terminal_width() -> Option<usize> {
    if let Some(width) = std::env::var("COLUMNS")
        .ok()
        .and_then(|cols| cols.trim().parse::<usize>().ok())
        .filter(|w| *w > 0)
    {
        return Some(width);
    }

    #[cfg(unix)]
    {
        let mut size = libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: TIOCGWINSZ writes a winsize into the pointer we pass.
        let rc = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut size) };
        if rc == 0 && size.ws_col > 0 {
            return Some(size.ws_col as usize);
        }
    }

    None
}
