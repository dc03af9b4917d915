/*
 * SPDX-License-Identifier: Apache-2.0
 * Copyright 2023-2025 ByteDance and/or its affiliates.
 */

use std::fmt;
use std::io::{self, Write};

use chrono::Local;
use slog::{Drain, OwnedKVList, Record, Serializer, slog_o};
use slog_scope::GlobalLoggerGuard;

const TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// Write log records to stderr, one line per record.
pub struct StdErrDrain {
    append_code_position: bool,
}

impl StdErrDrain {
    pub fn new(append_code_position: bool) -> Self {
        StdErrDrain {
            append_code_position,
        }
    }

    fn format<IO: Write>(
        &self,
        io: &mut IO,
        record: &Record<'_>,
        values: &OwnedKVList,
    ) -> slog::Result {
        write!(io, "{}", Local::now().format(TIME_FORMAT))?;
        write!(io, " {}", record.level())?;

        let mut kv = KvFormatter { io: &mut *io };
        slog::KV::serialize(&record.kv(), record, &mut kv)?;
        slog::KV::serialize(values, record, &mut kv)?;

        write!(io, " {}", record.msg())?;
        if self.append_code_position {
            write!(io, " <{}:{}>", record.file(), record.line())?;
        }
        writeln!(io)?;
        Ok(())
    }
}

impl Drain for StdErrDrain {
    type Ok = ();
    type Err = slog::Error;

    fn log(&self, record: &Record<'_>, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        let mut buf: Vec<u8> = Vec::with_capacity(256);
        self.format(&mut buf, record, values)?;
        let mut stderr = io::stderr().lock();
        stderr.write_all(&buf)?;
        stderr.flush()?;
        Ok(())
    }
}

struct KvFormatter<'a, IO: Write> {
    io: &'a mut IO,
}

impl<IO: Write> Serializer for KvFormatter<'_, IO> {
    fn emit_arguments(&mut self, key: slog::Key, val: &fmt::Arguments<'_>) -> slog::Result {
        write!(self.io, " {key}: {val},")?;
        Ok(())
    }
}

/// Set up the process logger, and route all `log` records to it.
///
/// The returned guard should be kept until the process exits.
pub fn setup(verbose_level: u8) -> Result<GlobalLoggerGuard, ::log::SetLoggerError> {
    let drain = StdErrDrain::new(verbose_level > 2).fuse();
    let logger = slog::Logger::root(drain, slog_o!());
    let scope_guard = slog_scope::set_global_logger(logger);

    let log_level = match verbose_level {
        0 => ::log::Level::Warn,
        1 => ::log::Level::Info,
        2 => ::log::Level::Debug,
        _ => ::log::Level::Trace,
    };

    slog_stdlog::init_with_level(log_level)?;
    Ok(scope_guard)
}
