//! Non-interactive search: the command-line arguments form the query, one matching card name is printed per line.

#![deny(rust_2018_idioms, unused, unused_import_braces, unused_qualifications, warnings)]

use {
    std::{
        env,
        io
    },
    card_search::*
};

fn main() -> Result<(), Error> {
    env_logger::init();
    let stdout = io::stdout();
    repl::find_cards(env::args().skip(1), stdout.lock(), &mut Client::new(Config::default())?)
}
