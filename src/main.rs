mod cli;

#[tokio::main]
async fn main() {
    if let Err(err) = cli::run().await {
        eprintln!("nomina-engine: {err}");
        std::process::exit(1);
    }
}
