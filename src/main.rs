//! Headless simulator (default binary).
//!
//! Plays a seeded random game against the engine and prints a summary.
//! Set `RUST_LOG=debug` to see every engine event.

use anyhow::Result;
use log::info;

use puyo_engine::sim::{self, USAGE};

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(args) = sim::parse_sim_args(&args)? else {
        println!("{}", USAGE);
        return Ok(());
    };

    let config = sim::load_config(&args)?;
    info!(
        "board {}x{}, {} colors, seed {}",
        config.width, config.height, config.colors, config.seed
    );

    let (session, report) = sim::run(config, args.pieces);

    if args.json {
        let out = serde_json::json!({
            "report": report,
            "snapshot": session.snapshot(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("pieces placed : {}", report.pieces_placed);
    println!("score         : {}", report.score);
    println!("chains        : {}", report.chains);
    println!("longest chain : {}", report.longest_chain);
    println!("cells cleared : {}", report.total_cleared);
    println!("game over     : {}", report.game_over);
    println!();
    for row in session.board().rows() {
        let line: String = row
            .iter()
            .map(|&c| if c == 0 { '.' } else { char::from(b'0' + c % 10) })
            .collect();
        println!("{}", line);
    }

    Ok(())
}
