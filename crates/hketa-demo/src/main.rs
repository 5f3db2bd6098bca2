#![forbid(unsafe_code)]

//! hketa demo binary entry point.

use std::cell::RefCell;
use std::process;

use hketa::{DisplayConfig, MonospaceMeasurer};
use hketa_demo::board::{Board, sample_departures};
use hketa_demo::cli;

fn main() {
    let opts = cli::Opts::parse();
    if let Err(err) = hketa::logging::init() {
        eprintln!("hketa-demo: {err}");
    }

    if let Err(err) = run(&opts) {
        tracing::error!(%err, "demo failed");
        eprintln!("hketa-demo: {err}");
        process::exit(1);
    }
}

fn run(opts: &cli::Opts) -> hketa::Result<()> {
    let mut config = DisplayConfig::detect();
    if let Some(width) = opts.width {
        config.window_size.width = width;
    }

    let measurer = RefCell::new(MonospaceMeasurer::new());
    let board = Board::build(&opts.stop, &sample_departures(), &config, &measurer)?;

    for line in board.render_ascii(opts.columns) {
        println!("{line}");
    }
    println!();
    println!(
        "title {}, destinations {}, measure cache hit rate {:.0}%",
        board.title_size,
        board.destination_size,
        measurer.borrow().cache_stats().hit_rate() * 100.0
    );

    if let Some(row) = opts.select {
        match board.select(row) {
            Some(selected) => println!("selected row {selected}"),
            None => println!("no row at {row}"),
        }
    }
    Ok(())
}
