use std::io::Write;

use magic_chess::board::attack_tables;
use magic_chess::uci;

fn main() {
    // stdout carries the protocol, so logs go to stderr
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    attack_tables::init();
    log::info!("{} {} ready", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    uci::run_uci_loop();
}
