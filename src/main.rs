#![deny(rust_2018_idioms)]
#![deny(non_upper_case_globals)]
#![deny(non_camel_case_types)]
#![deny(non_snake_case)]
#![deny(unused_mut)]

use std::process::exit;

use ansi_term::Color::Red;

mod cli;

fn main() {
    let cli = cli::from_args();

    if let Err(e) = cli::exec(cli) {
        eprintln!("{}: {}", Red.bold().paint("Error"), e);
        exit(1);
    }
}
