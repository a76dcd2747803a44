use clap::Parser;
use colored::*;
use diffcalc::Config;
use std::process;

fn main() {
    let config = Config::parse();

    match diffcalc::run(&config) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(e) => {
            eprintln!("{} {:#}", "Error:".bright_red().bold(), e);
            process::exit(1);
        }
    }
}
