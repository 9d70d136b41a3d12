use log::LevelFilter;
use env_logger::{Builder, Env};
use std::io::Write;
use chrono::Local;

/// `RUST_LOG` wins over `default_level` when it is set.
pub fn init(default_level: LevelFilter) {
    let env = Env::default().default_filter_or(default_level.as_str());
    Builder::from_env(env)
        .format(|buf, record| {
            writeln!(buf,
                "{} [{}] - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();

    log::debug!("Logger initialized.");
}

/// Maps `-v`/`-q` counts onto a level, starting from info.
pub fn level_from_flags(verbose: u8, quiet: u8) -> LevelFilter {
    match i16::from(verbose) - i16::from(quiet) {
        i if i <= -2 => LevelFilter::Error,
        -1 => LevelFilter::Warn,
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_from_flags() {
        assert_eq!(level_from_flags(0, 0), LevelFilter::Info);
        assert_eq!(level_from_flags(1, 0), LevelFilter::Debug);
        assert_eq!(level_from_flags(3, 0), LevelFilter::Trace);
        assert_eq!(level_from_flags(0, 1), LevelFilter::Warn);
        assert_eq!(level_from_flags(0, 5), LevelFilter::Error);
        assert_eq!(level_from_flags(1, 1), LevelFilter::Info);
    }
}
