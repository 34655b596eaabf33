use log::*;
use structopt::StructOpt;

use looplite::app;
use looplite::server::{Server, TcpServer};

#[derive(Debug, StructOpt)]
#[structopt(name = "looplite", about = "Minimal HTTP/1.1 JSON demo server.")]
struct Opt {
    #[structopt(long, default_value = "127.0.0.1")]
    host: String,
    #[structopt(short, long, default_value = "8080")]
    port: u16,
    #[structopt(long, default_value = "4")]
    threads: usize,
    #[structopt(short = "v", long = "verbose", parse(from_occurrences))]
    verbose: usize,
}

fn setup_logging(verbosity: usize) {
    stderrlog::new()
        .module(module_path!())
        .module("looplite")
        .verbosity(verbosity)
        .timestamp(stderrlog::Timestamp::Millisecond)
        .init()
        .unwrap();
}

fn main() {
    let opt = Opt::from_args();
    setup_logging(opt.verbose);

    let bind = format!("{}:{}", opt.host, opt.port);
    let mut server = match TcpServer::new(&bind, opt.threads, None, app::routes()) {
        Ok(server) => server,
        Err(e) => {
            error!("failed to bind {}: {}", &bind, e);
            std::process::exit(1);
        }
    };
    info!("listening on {}", &bind);
    server.serve_forever();
}
