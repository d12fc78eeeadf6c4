use {
    anyhow::Context,
    base::log_fatal,
    clap::Parser,
    com::UnixServer,
    head_pose::{Options, load_detector, service},
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
        "head-pose: model {}, input {} (stride {})",
        options.model.display(),
        options.img_size,
        options.stride
    );
    let detector = match load_detector(&options) {
        Ok(detector) => detector,
        Err(e) => log_fatal!("{}", e),
    };
    let mut session = service(detector);

    let mut server = UnixServer::new(&options.socket);
    if let Err(e) = server.listen() {
        log_fatal!("{}", e);
    }

    server
        .serve_until(&mut session, com::shutdown_signal())
        .await?;
    Ok(())
}
