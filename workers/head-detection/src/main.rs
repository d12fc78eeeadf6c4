use {
    anyhow::Context,
    base::log_fatal,
    clap::Parser,
    com::UnixServer,
    head_detection::{Options, load_predictor, service},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let options = Options::parse();

    match &options.log_dir {
        Some(dir) => base::init_file_logger(dir)
            .with_context(|| format!("cannot log to {}", dir.display()))?,
        None => base::init_stdout_logger(),
    }

    log::info!(
        "head-detection: model {}, up to {} poses",
        options.model.display(),
        options.max_poses
    );
    let predictor = match load_predictor(&options) {
        Ok(predictor) => predictor,
        Err(e) => log_fatal!("{}", e),
    };
    let mut session = service(predictor, &options);

    let mut server = UnixServer::new(&options.socket);
    if let Err(e) = server.listen() {
        log_fatal!("{}", e);
    }

    server
        .serve_until(&mut session, com::shutdown_signal())
        .await?;
    Ok(())
}
