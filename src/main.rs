use amqp_consume::{Cli, Consumer};
use clap::Parser;

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let config = match cli.into_config() {
        Ok(config) => config,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };

    let consumer = Consumer::new(config);
    if let Err(e) = consumer.run().await {
        log::error!("{}", e);
        std::process::exit(1);
    }
}
