//! The interactive prompt: read a query, search, print, repeat.

use {
    std::io::{
        self,
        prelude::*
    },
    itertools::Itertools as _,
    crate::{
        CardSearch,
        Error,
        render::{
            self,
            rule
        }
    }
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    Empty,
    Exit,
    Query(&'a str)
}

/// Classifies one raw input line. Surrounding whitespace is never part of a query.
pub fn parse_line(line: &str) -> Command<'_> {
    let line = line.trim();
    if line.is_empty() {
        Command::Empty
    } else if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
        Command::Exit
    } else {
        Command::Query(line)
    }
}

/// Runs the prompt until the user exits or the input ends.
///
/// A failed search or a failed read is reported and the prompt comes back. Only a failure to write to `output` ends the loop with an error.
pub fn run(mut input: impl BufRead, mut output: impl Write, search: &mut impl CardSearch) -> Result<(), Error> {
    prompt_loop(&mut input, &mut output, search).map_err(Error::Terminal)
}

fn prompt_loop(input: &mut impl BufRead, output: &mut impl Write, search: &mut impl CardSearch) -> io::Result<()> {
    writeln!(output, "MTG Card Search")?;
    writeln!(output, "Type 'exit' or 'quit' to close the application")?;
    writeln!(output, "{}", rule('='))?;
    let mut line = String::default();
    loop {
        write!(output, "\nSearch for a card: ")?;
        output.flush()?;
        line.clear();
        match input.read_line(&mut line).map_err(Error::Input) {
            Ok(0) => {
                log::debug!("end of input");
                writeln!(output)?;
                return Ok(())
            }
            Ok(_) => {}
            Err(e) => {
                log::warn!("{:?}", e);
                writeln!(output, "Error reading input: {}", e)?;
                continue
            }
        }
        let query = match parse_line(&line) {
            Command::Empty => continue,
            Command::Exit => {
                writeln!(output, "Goodbye!")?;
                return Ok(())
            }
            Command::Query(query) => query
        };
        match search.search(query) {
            Ok(cards) if cards.is_empty() => writeln!(output, "No cards found matching your search.")?,
            Ok(cards) => render::render(&cards, output)?,
            Err(e) => {
                log::debug!("search for {:?} failed: {:?}", query, e);
                writeln!(output, "Error searching cards: {}", e)?;
            }
        }
    }
}

/// Searches once for the space-joined `args` and writes one card name per line. Blank queries send no request.
pub fn find_cards(args: impl IntoIterator<Item = String>, mut output: impl Write, search: &mut impl CardSearch) -> Result<(), Error> {
    let query = args.into_iter().join(" ");
    let query = match parse_line(&query) {
        Command::Empty => return Ok(()),
        Command::Exit | Command::Query(_) => query.trim()
    };
    for card in search.search(query)? {
        writeln!(output, "{}", card.name).map_err(Error::Terminal)?;
    }
    Ok(())
}
