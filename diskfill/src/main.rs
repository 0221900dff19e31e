use std::sync::Arc;

use counter::Counters;
use filler::{Directory, Pool, Worker};
use init::config::CONFIG;
use lifecycle::Supervisor;
use reporter::Reporter;

pub mod counter;
pub mod error;
pub mod filler;
pub mod init;
pub mod lifecycle;
pub mod reporter;
#[cfg(test)]
mod test;

#[tokio::main]
async fn main() {
    println!("Efficient storage filling using multiple methods...");
    println!("Preparing...");

    init::new().await;

    let config = CONFIG.get().unwrap();
    let counters = Arc::new(Counters::new());
    let storage = Arc::new(Directory::new(&config.filler.directory));
    let sizing = config.filler.sizing();

    let pool = Pool::new(config.filler.max_workers);
    for method in config.filler.methods.iter().copied() {
        pool.spawn(Worker::new(
            method,
            storage.clone(),
            sizing,
            counters.clone(),
        ));
    }

    let reporter = Reporter::new(
        counters,
        config.reporter.interval(),
        config.reporter.reset_every,
    );
    tokio::spawn(async move {
        if let Err(err) = reporter.run(tokio::io::stdout()).await {
            log::error!("Reporter stopped: {}", err);
        }
    });

    log::info!("Filling {}", config.filler.directory.display());

    let mut supervisor = Supervisor::new(config.runtime.ignore_interrupt);
    supervisor.watch(tokio::signal::ctrl_c).await;
    std::process::exit(130);
}
