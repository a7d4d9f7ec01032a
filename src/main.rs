use log::info;

mod atm;
mod bank;

#[tokio::main]
async fn main() {
    env_logger::init();

    let args = std::env::args().collect::<Vec<_>>();
    let seeds = match args.get(1) {
        Some(path) => match bank::load_seeds(path) {
            Ok(seeds) => seeds,
            Err(err) => {
                eprintln!("Failed to read accounts file {path}: {err}");
                std::process::exit(1);
            }
        },
        None => bank::demo_seeds(),
    };

    let ledger = match bank::Ledger::bootstrap(seeds) {
        Ok(ledger) => ledger,
        Err(err) => {
            eprintln!("Invalid account configuration: {err}");
            std::process::exit(1);
        }
    };
    info!("ledger bootstrapped with {} accounts", ledger.accounts().len());

    let (handle, service) = bank::LedgerService::new(ledger);
    let worker = tokio::spawn(service.run());

    if let Err(err) = atm::Atm::new(handle).run().await {
        eprintln!("Session error: {err}");
    }

    // The session dropped its handle, so the service loop winds down.
    worker
        .await
        .expect("failed to join the ledger service task");
}
