use mcsr_seedfind::config::Settings;
use mcsr_seedfind::core::{render_seed_lines, RevealReport, SeedFinder};
use mcsr_seedfind::services::McsrClient;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Initialize logging on stderr; stdout is reserved for seed output
fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true);

    if settings.logging.format == "pretty" {
        subscriber.pretty().init();
    } else {
        subscriber.compact().init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = match Settings::load() {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    init_tracing(&settings);

    let (filter, mode, timeout) = match (settings.filter_config(), settings.scan_mode(), settings.timeout()) {
        (Ok(filter), Ok(mode), Ok(timeout)) => (filter, mode, timeout),
        (Err(e), _, _) | (_, Err(e), _) | (_, _, Err(e)) => {
            error!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    info!("Configuration loaded: {:?}, mode {:?}", filter, mode);

    let client = match McsrClient::resolve(&settings.api.bases, timeout).await {
        Ok(c) => c,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let finder = SeedFinder::new(filter)
        .with_mode(mode)
        .with_pagination(settings.scan.pagination)
        .with_rng_seed(settings.scan.rng_seed);

    let found = match finder.run(&client).await {
        Ok(found) => found,
        Err(e) => {
            error!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    for (i, m) in found.iter().enumerate() {
        if i > 0 {
            println!();
        }

        // Seeds only: no runner, time or rank unless reveal is enabled
        for line in render_seed_lines(&m.seeds) {
            println!("{}", line);
        }

        if settings.output.reveal {
            println!();
            print!("{}", RevealReport::from_detail(&m.detail));
        }
    }

    ExitCode::SUCCESS
}
