//! Interactive numbered menu, used when no subcommand is given.

use std::io::{BufRead, Write};

use super::App;
use super::list::{YearFilter, cmd_authors, cmd_authors_in_year, cmd_books, cmd_language};
use super::search::{cmd_search, prompt_number, read_line};
use crate::db::StoreError;
use crate::error::Error;

const MENU: &str = "
----------------------------------------
 1 - Search book by title
 2 - List saved books
 3 - List saved authors
 4 - List authors alive in a year
 5 - List authors born in a year
 6 - List authors deceased in a year
 7 - List books by language
 0 - Exit
----------------------------------------";

/// A parsed menu choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuOption {
    Search,
    Books,
    Authors,
    AuthorsIn(YearFilter),
    ByLanguage,
    Exit,
}

impl MenuOption {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<u8>().ok()? {
            1 => Some(Self::Search),
            2 => Some(Self::Books),
            3 => Some(Self::Authors),
            4 => Some(Self::AuthorsIn(YearFilter::Alive)),
            5 => Some(Self::AuthorsIn(YearFilter::Born)),
            6 => Some(Self::AuthorsIn(YearFilter::Died)),
            7 => Some(Self::ByLanguage),
            0 => Some(Self::Exit),
            _ => None,
        }
    }
}

/// Run the menu until the user exits or input ends.
///
/// A failing option prints its error and returns to the menu.
pub(crate) async fn run_menu(app: &App, input: &mut dyn BufRead, out: &mut dyn Write) -> anyhow::Result<()> {
    loop {
        writeln!(out, "{MENU}")?;
        write!(out, "Choose an option: ")?;
        out.flush()?;

        let Some(line) = read_line(input)? else {
            break;
        };
        let Some(option) = MenuOption::parse(&line) else {
            writeln!(out, "Invalid option, enter a number from 0 to 7.")?;
            continue;
        };
        if option == MenuOption::Exit {
            writeln!(out, "Goodbye!")?;
            break;
        }

        if let Err(e) = run_option(app, option, input, out).await {
            tracing::debug!(error = %e, "Menu option failed");
            writeln!(out, "Error: {e:#}")?;
            if is_retryable(&e) {
                writeln!(out, "The store did not answer in time; you can try again.")?;
            }
        }
    }
    Ok(())
}

/// A store call that ran out of time may succeed on a second attempt.
fn is_retryable(err: &anyhow::Error) -> bool {
    err.chain().any(|cause| {
        cause.downcast_ref::<Error>().is_some_and(Error::is_timeout)
            || cause.downcast_ref::<StoreError>().is_some_and(StoreError::is_timeout)
    })
}

async fn run_option(
    app: &App,
    option: MenuOption,
    input: &mut dyn BufRead,
    out: &mut dyn Write,
) -> anyhow::Result<()> {
    match option {
        MenuOption::Search => {
            write!(out, "Title to search for: ")?;
            out.flush()?;
            if let Some(term) = read_line(input)? {
                cmd_search(app, &term, None, input, out).await?;
            }
        }
        MenuOption::Books => cmd_books(app, out).await?,
        MenuOption::Authors => cmd_authors(app, out).await?,
        MenuOption::AuthorsIn(filter) => {
            if let Some(year) = prompt_number(input, out, "Year: ")? {
                cmd_authors_in_year(app, filter, year, out).await?;
            }
        }
        MenuOption::ByLanguage => {
            cmd_language(app, None, out).await?;
            write!(out, "Language code: ")?;
            out.flush()?;
            if let Some(code) = read_line(input)? {
                cmd_language(app, Some(&code), out).await?;
            }
        }
        MenuOption::Exit => {}
    }
    Ok(())
}
