use crate::application::{CalendarApp, Config};
use crate::domain::{DateInputError, parse_date_strict};
use crate::infrastructure::init_logging;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "kalender")]
#[command(about = "A terminal month calendar with blocked, dot and period markings")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print one month grid
    Month {
        /// Any date in the month (YYYY-MM-DD or RFC 3339, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Print without colors
        #[arg(long)]
        plain: bool,
    },
    /// Print the dates a month page covers, padding days included
    Page {
        #[arg(short, long)]
        date: Option<String>,
        #[arg(long)]
        plain: bool,
    },
    /// Print the months a scrolling list renders around a date
    List {
        #[arg(short, long)]
        date: Option<String>,
        /// Horizontal paging (one neighbour month each side instead of three)
        #[arg(long)]
        horizontal: bool,
        #[arg(long)]
        plain: bool,
    },
    /// Start the interactive month view
    Tui {
        #[arg(short, long)]
        date: Option<String>,
    },
}

fn parse_date_arg(date: Option<&str>) -> Result<Option<NaiveDate>, DateInputError> {
    date.map(parse_date_strict).transpose()
}

impl Cli {
    pub fn run() -> anyhow::Result<()> {
        let cli = Self::parse();
        let config = Config::from_env();
        let interactive = matches!(cli.command, None | Some(Commands::Tui { .. }));

        // The interactive view owns the screen, so it always logs to a file.
        let log_file = match &config.log_file {
            Some(path) => Some(path.clone()),
            None if interactive => Some(config.data_dir.join("kalender.log")),
            None => None,
        };
        init_logging(&config.log_filter, log_file.as_deref())?;
        config.report_warnings();

        let app = CalendarApp::new(config)?;

        match cli.command {
            Some(Commands::Month { date, plain }) => {
                let month = parse_date_arg(date.as_deref())?;
                print!("{}", app.render_month(month, plain));
            }
            Some(Commands::Page { date, plain }) => {
                let month = parse_date_arg(date.as_deref())?;
                print!("{}", app.render_page(month, plain));
            }
            Some(Commands::List {
                date,
                horizontal,
                plain,
            }) => {
                let month = parse_date_arg(date.as_deref())?;
                print!("{}", app.render_list(month, horizontal, plain));
            }
            Some(Commands::Tui { date }) => {
                let month = parse_date_arg(date.as_deref())?;
                if let Some(selected) = app.run_tui(month)? {
                    println!("{}", selected.format("%Y-%m-%d"));
                }
            }
            None => {
                if let Some(selected) = app.run_tui(None)? {
                    println!("{}", selected.format("%Y-%m-%d"));
                }
            }
        }

        Ok(())
    }
}
