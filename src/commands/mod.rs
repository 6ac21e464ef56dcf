pub mod count;

use log::LevelFilter;
use std::io::Write;

/// Route `log` records to stderr as `LEVEL: message`
pub fn init_logging(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .try_init();
}
