use std::io::Write;

use log::Level;

/// Route every status line through the logger on stderr.
///
/// Info lines such as "Now playing: ..." print as plain text; warnings and
/// errors carry a level prefix (`warn: Index is too large: 3`). `RUST_LOG`
/// still filters.
pub fn init() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(buf, "{}", status_line(record.level(), &record.args().to_string()))
        })
        .init();
}

pub(super) fn status_line(level: Level, message: &str) -> String {
    match level {
        Level::Info => message.to_string(),
        other => format!("{}: {message}", other.as_str().to_lowercase()),
    }
}
