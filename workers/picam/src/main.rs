use {
    anyhow::Context,
    base::log_fatal,
    clap::Parser,
    com::UnixServer,
    picam::{
        Backend, PicamSession,
        cli::{Cli, Command},
        open_cameras,
    },
    std::path::PathBuf,
    video::RigConfig,
};

async fn serve(
    config: RigConfig,
    backend: Backend,
    socket: PathBuf,
    echo_dimensions: bool,
) -> anyhow::Result<()> {
    let mut server = UnixServer::new(socket);
    if let Err(e) = server.listen() {
        log_fatal!("{}", e);
    }

    let mut session = PicamSession::new(config, move |config: &RigConfig| {
        open_cameras(backend, config)
    })
    .with_echo_dimensions(echo_dimensions);

    server
        .serve_until(&mut session, com::shutdown_signal())
        .await?;
    Ok(())
}

async fn snapshot(
    config: RigConfig,
    backend: Backend,
    f1: Option<PathBuf>,
    f2: Option<PathBuf>,
    dir: PathBuf,
) -> anyhow::Result<()> {
    let (default1, default2) = picam::default_paths(&dir);
    let cameras = open_cameras(backend, &config)?;
    let (first, second) = picam::capture_once(&config, cameras).await?;

    picam::save_png(&first, &f1.unwrap_or(default1))?;
    picam::save_png(&second, &f2.unwrap_or(default2))?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match &cli.log_dir {
        Some(dir) => base::init_file_logger(dir)
            .with_context(|| format!("cannot log to {}", dir.display()))?,
        None => base::init_stdout_logger(),
    }

    let config = cli.rig.rig_config();
    let backend = cli.rig.backend;
    log::info!(
        "picam: {:?} backend, cameras {} and {}",
        backend,
        config.first().device(),
        config.second().device()
    );

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config, backend, cli.socket, cli.echo_dimensions).await,
        Command::Snapshot { f1, f2, dir } => snapshot(config, backend, f1, f2, dir).await,
    }
}
