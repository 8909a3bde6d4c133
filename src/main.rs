#![deny(rust_2018_idioms, unused, unused_import_braces, unused_qualifications, warnings)]

use {
    std::io,
    card_search::{
        Client,
        Config,
        Error,
        repl
    }
};

fn main() -> Result<(), Error> {
    env_logger::init();
    let mut client = Client::new(Config::default())?;
    let stdin = io::stdin();
    let stdout = io::stdout();
    repl::run(stdin.lock(), stdout.lock(), &mut client)
}
