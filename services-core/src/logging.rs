use slog::{o, Drain, Logger, OwnedKVList, Record};
use slog_async::Async;
use slog_envlogger::LogBuilder;
use slog_scope::GlobalLoggerGuard;
use slog_term::{Decorator, TermDecorator};

/// The channel size for async logging.
const BUFFER_SIZE: usize = 256;

/// Initialize logging for the estimator. Records sent through the `log`
/// facade by the library crates end up in the returned logger as well.
///
/// The rendered savings report is written to stdout, so every record goes to
/// stderr regardless of its level.
pub fn init(filter: impl AsRef<str>) -> (Logger, GlobalLoggerGuard) {
    let format = StderrFormatter::new(TermDecorator::new().stderr().build()).fuse();
    let drain = Async::new(LogBuilder::new(format).parse(filter.as_ref()).build())
        .chan_size(BUFFER_SIZE)
        .build();
    let logger = Logger::root(drain.fuse(), o!());

    let guard = slog_scope::set_global_logger(logger.clone());
    if let Err(err) = slog_stdlog::init() {
        slog::warn!(logger, "log facade already initialized: {}", err);
    }

    (logger, guard)
}

/// Writes one line per record: UTC timestamp, short level, module and message.
pub struct StderrFormatter<D> {
    decorator: D,
}

impl<D> StderrFormatter<D> {
    fn new(decorator: D) -> Self {
        Self { decorator }
    }
}

impl<D: Decorator> Drain for StderrFormatter<D> {
    type Ok = ();
    type Err = std::io::Error;

    fn log(&self, record: &Record, values: &OwnedKVList) -> Result<Self::Ok, Self::Err> {
        self.decorator.with_record(record, values, |mut decorator| {
            decorator.start_timestamp()?;
            slog_term::timestamp_utc(&mut decorator)?;

            decorator.start_whitespace()?;
            write!(decorator, " ")?;

            decorator.start_level()?;
            write!(decorator, "{}", record.level().as_short_str())?;

            decorator.start_whitespace()?;
            write!(decorator, " ")?;

            write!(decorator, "[{}]", record.module())?;

            decorator.start_whitespace()?;
            write!(decorator, " ")?;

            decorator.start_msg()?;
            writeln!(decorator, "{}", record.msg())?;
            decorator.flush()
        })
    }
}
