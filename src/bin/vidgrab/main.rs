use std::sync::Arc;
use vidgrab::{config, http::server, Config, Downloader, Resolver};

const CONFIG_LOCATION: &str = "vidgrab.toml";

const USAGE: &str = r##"
usage:
    vidgrab run            -- run the server

    vidgrab help           -- show this help message

    vidgrab default-config -- prints out the default configuration
                              you can redirect this to a file with:
                              vidgrab default-config > vidgrab.toml
"##;

enum Command {
    Run,
    DefaultConfig,
    Help,
}

impl Command {
    fn parse() -> Command {
        match std::env::args().nth(1).as_deref() {
            Some("run") | None => Command::Run,
            Some("default-config") => Command::DefaultConfig,
            _ => Command::Help,
        }
    }

    fn handle(self) {
        match self {
            Command::Run => return,
            Command::DefaultConfig => Config::print_default(),
            Command::Help => println!("{}", USAGE),
        };
        std::process::exit(0);
    }
}

fn init_logger(level: config::LogLevel) -> anyhow::Result<()> {
    use fern::colors::{Color, ColoredLevelConfig};
    let level: log::LevelFilter = level.into();
    let colors = ColoredLevelConfig::new()
        .trace(Color::BrightBlack)
        .debug(Color::White)
        .info(Color::Green)
        .warn(Color::BrightYellow)
        .error(Color::BrightRed);

    fern::Dispatch::new()
        .format(move |out, message, record| {
            out.finish(format_args!(
                "[{} {}][{}] {}",
                chrono::Utc::now().format("%F %H:%M:%S%.3f"),
                format!("{: >5}", colors.color(record.level())),
                record.target(),
                message,
            ))
        })
        .level(log::LevelFilter::Warn)
        .level_for("vidgrab", level)
        .chain(std::io::stderr())
        .apply()?;

    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    Command::parse().handle();

    let loaded = Config::load(CONFIG_LOCATION).await?;
    let found = loaded.is_some();
    let config = loaded.unwrap_or_default();
    init_logger(config.log_level)?;

    if !found {
        log::warn!(
            "{} wasn't found. using the default configuration (see `vidgrab default-config`)",
            CONFIG_LOCATION
        );
    }

    let resolver = Arc::new(Resolver::new(&config)?);
    let downloader = Arc::new(Downloader::new(&config)?);

    let (addr, server) = warp::serve(server::routes(resolver, downloader))
        .try_bind_with_graceful_shutdown(config.web.listen, async {
            if let Err(err) = tokio::signal::ctrl_c().await {
                log::error!("cannot listen for ctrl-c: {}", err);
                std::future::pending::<()>().await;
            }
        })?;

    log::info!("listening on http://{}", addr);
    server.await;
    log::info!("shutting down");

    Ok(())
}
