//! File logging for tournament runs.
//!
//! Everything is kept at `TRACE` level:
//! - `info`: the result of every game, with the ratings after it
//! - `debug`: sub-boards getting decided and rating changes
//! - `trace`: every turn, completed lines and the answers a stream player got wrong

use std::fs::File;

use anyhow::Context;
use time::{
    format_description::{self, parse},
    OffsetDateTime,
};
use tracing::{subscriber::set_global_default, Level};
use tracing_subscriber::{fmt::writer::BoxMakeWriter, FmtSubscriber};

const LOG_FILE_FORMAT: &str = "[year]-[month]-[day]_[hour]:[minute]:[second]_log.txt";

/// Send every trace to a new file named after the current local time.
///
/// Meant for the driver, which calls it once when `STTT_LOG` is set. Tests install their own
/// subscriber instead.
///
/// # Error
/// The log file cannot be created, or a global subscriber is already set.
pub fn init_logger() -> anyhow::Result<()> {
    let file_name = get_log_file_name()?;
    let file = File::create(&file_name).with_context(|| format!("creating log file {file_name}"))?;
    let writer = BoxMakeWriter::new(file);
    let local_offset = time::UtcOffset::current_local_offset().unwrap_or(time::UtcOffset::UTC);
    let timer = tracing_subscriber::fmt::time::OffsetTime::new(
        local_offset,
        format_description::parse("[year]-[month]-[day] [hour]:[minute]:[second]")?,
    );

    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::TRACE)
        .with_ansi(false)
        .with_timer(timer)
        .with_writer(writer)
        .finish();

    set_global_default(subscriber).context(
        "could not set global default tracing subscriber, disable logs if one is already set",
    )
}

fn get_log_file_name() -> anyhow::Result<String> {
    let format = parse(LOG_FILE_FORMAT)?;
    let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
    Ok(now.format(&format)?)
}
