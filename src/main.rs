use clap::Parser;
use log::{error, info};
use nectar::configuration::config::Config;
use nectar::network::dispatcher::Dispatcher;
use nectar::reporting::web_server::WebServer;
use std::path::Path;

#[derive(Parser)]
#[command(name = "nectar")]
#[command(version)]
#[command(about = "A multi-port network decoy with attack classification")]
struct Args {
    /// Optional TOML configuration file; defaults apply without one.
    config_file: Option<String>,
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .init();

    println!(
        "
███╗   ██╗███████╗ ██████╗████████╗ █████╗ ██████╗
████╗  ██║██╔════╝██╔════╝╚══██╔══╝██╔══██╗██╔══██╗
██╔██╗ ██║█████╗  ██║        ██║   ███████║██████╔╝
██║╚██╗██║██╔══╝  ██║        ██║   ██╔══██║██╔══██╗
██║ ╚████║███████╗╚██████╗   ██║   ██║  ██║██║  ██║
╚═╝  ╚═══╝╚══════╝ ╚═════╝   ╚═╝   ╚═╝  ╚═╝╚═╝  ╚═╝
====================================================
         A multi-port network decoy
====================================================
"
    );

    let args = Args::parse();

    let config = match args.config_file {
        Some(path) => match Config::from_file(Path::new(&path)) {
            Ok(config) => {
                info!("Configuration imported from {}", path);
                config
            }
            Err(e) => {
                error!("Unable to import configuration from {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => {
            info!("No configuration file given, using defaults");
            Config::default()
        }
    };

    let mut dispatcher = match Dispatcher::new(config.clone()) {
        Ok(dispatcher) => dispatcher,
        Err(e) => {
            error!("Unable to start: {}", e);
            std::process::exit(1);
        }
    };

    dispatcher.start();
    info!("Monitoring {} ports", config.ports.len());
    info!("Local traffic filtering enabled: loopback sources are ignored");

    if config.dashboard_enabled {
        let web_server = WebServer::new(dispatcher.aggregator(), config.ports.len());
        let dashboard_port = config.dashboard_port;
        info!("Dashboard: http://localhost:{}", dashboard_port);
        tokio::spawn(async move {
            web_server.start(dashboard_port).await;
        });
    }

    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Interrupt received"),
        Err(e) => error!("Unable to listen for the interrupt signal: {}", e),
    }

    dispatcher.shutdown().await;
}
