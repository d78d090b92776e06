mod app;
mod calendar;
mod help;
mod jumpto;
mod theme;
use crate::app::App;
use crate::calendar::{MonthGrid, MonthPager, WeekStart, YearMonth};
use anyhow::Context;
use flexi_logger::{FileSpec, Logger, LoggerHandle};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::OffsetDateTime;

const DEFAULT_LOG_LEVEL: &str = if cfg!(debug_assertions) {
    "debug"
} else {
    "info"
};

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run {
        month: Option<YearMonth>,
        week_start: WeekStart,
        print: bool,
        log_file: Option<PathBuf>,
    },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut month: Option<YearMonth> = None;
        let mut week_start = WeekStart::default();
        let mut print = false;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('p') | Arg::Long("print") => print = true,
                Arg::Short('w') | Arg::Long("week-start") => {
                    week_start = parser.value()?.parse()?;
                }
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if month.is_none() => month = Some(value.parse()?),
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run {
            month,
            week_start,
            print,
            log_file,
        })
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run {
                month,
                week_start,
                print,
                log_file,
            } => {
                // Determined before the logger starts in case it spawns
                // threads, which would prevent obtaining the local offset
                let today = OffsetDateTime::now_local()
                    .context("failed to determine local date")?
                    .date();
                let _logger = log_file.map(init_logging).transpose()?;
                let month = month.unwrap_or_else(|| YearMonth::containing(today));
                log::info!("Starting at {month} with weeks beginning on {}", week_start.weekday());
                if print {
                    print!("{}", MonthGrid::new(month, week_start));
                    return Ok(());
                }
                with_terminal(|mut terminal| {
                    terminal.hide_cursor().context("failed to hide cursor")?;
                    let pager = MonthPager::new(today, week_start).start_month(month);
                    App::new(pager).run(terminal)?;
                    Ok(())
                })
            }
            Command::Help => {
                println!("Usage: monthgrid [<options>] [YYYY-MM]");
                println!();
                println!("Show a month as a six-week calendar grid");
                println!();
                println!("Options:");
                println!("  -w, --week-start <DAY>");
                println!("                    Weekday shown in the first column [default: sunday]");
                println!();
                println!("  -p, --print       Print the month to standard output and exit");
                println!();
                println!("  --log-file <PATH> Write log messages to the given file");
                println!();
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

// The returned handle must be kept alive for as long as messages should be
// written to the file.
fn init_logging(path: PathBuf) -> anyhow::Result<LoggerHandle> {
    let spec = FileSpec::try_from(path).context("invalid log file path")?;
    Logger::try_with_env_or_str(DEFAULT_LOG_LEVEL)
        .context("failed to parse log specification")?
        .log_to_file(spec)
        .start()
        .context("failed to start logger")
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
