use std::sync::Arc;

use palette_router::{
    tools, www,
    config::{ Config, LoggingConfig },
    error::{ Error, ErrorKind, Result },
    router::RouteTable,
};

fn setup_logging(config: &LoggingConfig) -> Result<()> {
    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{}[{}][{}] {}",
                chrono::Local::now().format("[%Y-%m-%d %H:%M:%S]"),
                record.target(),
                record.level(),
                message,
            ))
        })
        .level(config.level)
        .chain(std::io::stdout());
    if let Some(file) = &config.file {
        dispatch = dispatch.chain(fern::log_file(file).map_err(|err| Error::from(ErrorKind::LogFile, err))?);
    }
    dispatch.apply().map_err(|err| Error::from(ErrorKind::Logging, err))
}

fn load_routes() -> Result<RouteTable> {
    let table = RouteTable::palette()?;
    log::info!("Registered {} routes.", table.len());
    Ok(table)
}

fn main() -> Result<()> {
    let config = Config::load()?;
    let command = std::env::args().nth(1).unwrap_or_else(|| "serve".to_owned());
    match command.as_str() {
        "serve" => {},
        "print-config" => return tools::print_config::run(&config),
        "print-routes" => return tools::print_routes::run(&load_routes()?),
        other => return Err(Error::custom(&format!("unknown command `{}`, expected serve, print-config or print-routes", other))),
    }

    setup_logging(&config.logging)?;
    let table = Arc::new(load_routes()?);

    log::info!("Starting web server...");
    www::start(&config, table)?;
    log::info!("Shutting down.");

    Ok(())
}
