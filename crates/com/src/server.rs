use {
    crate::ComError,
    std::{
        fmt,
        future::Future,
        path::{Path, PathBuf},
        time::Duration,
    },
    tokio::{
        io::{AsyncRead, AsyncWrite},
        net::{UnixListener, UnixSocket, UnixStream},
    },
};

// one pending client at most; the coordinator connects once per worker
const LISTEN_BACKLOG: u32 = 1;

// delay before retrying after a failed accept
const ACCEPT_RETRY_MS: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerState {
    Unbound,
    Listening,
    Serving,
    Closed,
}

impl fmt::Display for ServerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServerState::Unbound => write!(f, "unbound"),
            ServerState::Listening => write!(f, "listening"),
            ServerState::Serving => write!(f, "serving"),
            ServerState::Closed => write!(f, "closed"),
        }
    }
}

/// What a session step decided about the connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cycle {
    Continue,
    Closed,
}

/// The per-worker request/response protocol run over one connection.
///
/// `open` runs once after accept, `cycle` repeats until it reports
/// `Cycle::Closed` or fails, and `close` always runs afterwards.
#[allow(async_fn_in_trait)]
pub trait Session {
    type Error: std::error::Error + From<ComError>;

    async fn open<S>(&mut self, _stream: &mut S) -> Result<Cycle, Self::Error>
    where
        S: AsyncRead + AsyncWrite + Unpin,
    {
        Ok(Cycle::Continue)
    }

    async fn cycle<S>(&mut self, stream: &mut S) -> Result<Cycle, Self::Error>
    where
        S: AsyncRead + AsyncWrite + Unpin;

    async fn close(&mut self) {}
}

/// Drive one connection through a session until the peer leaves or the
/// session fails. `Session::close` runs in both cases.
pub async fn run_session<H, S>(session: &mut H, stream: &mut S) -> Result<(), H::Error>
where
    H: Session,
    S: AsyncRead + AsyncWrite + Unpin,
{
    let outcome: Result<(), H::Error> = async {
        if session.open(stream).await? == Cycle::Closed {
            return Ok(());
        }
        while session.cycle(stream).await? == Cycle::Continue {}
        Ok(())
    }
    .await;

    session.close().await;
    outcome
}

/// Single-client Unix domain socket server.
///
/// Serves one client at a time, serially: a connection is accepted, served
/// until the peer leaves, and only then is the next client accepted.
#[derive(Debug)]
pub struct UnixServer {
    path: PathBuf,
    listener: Option<UnixListener>,
    state: ServerState,
}

impl UnixServer {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            listener: None,
            state: ServerState::Unbound,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn state(&self) -> ServerState {
        self.state
    }

    /// Remove a stale socket file, bind, and listen with a backlog of 1.
    ///
    /// Must be called from within a tokio runtime.
    pub fn listen(&mut self) -> Result<(), ComError> {
        if self.state != ServerState::Unbound {
            return Err(ComError::Malformed(format!(
                "listen called while {}",
                self.state
            )));
        }

        remove_stale_socket(&self.path)?;

        let bind_error = |source| ComError::Bind {
            path: self.path.clone(),
            source,
        };
        let socket = UnixSocket::new_stream().map_err(bind_error)?;
        socket.bind(&self.path).map_err(bind_error)?;
        let listener = socket.listen(LISTEN_BACKLOG).map_err(bind_error)?;

        log::info!("listening on {}", self.path.display());
        self.listener = Some(listener);
        self.state = ServerState::Listening;
        Ok(())
    }

    /// Block until exactly one client connects.
    pub async fn accept(&mut self) -> Result<UnixStream, ComError> {
        let listener = self.listener.as_ref().ok_or_else(|| {
            ComError::Malformed(format!("accept called while {}", self.state))
        })?;
        let (stream, _addr) = listener.accept().await?;
        Ok(stream)
    }

    /// Accept one client, serve it to completion and return to listening.
    pub async fn serve_connection<H: Session>(&mut self, session: &mut H) -> Result<(), ComError> {
        let mut stream = self.accept().await?;
        self.state = ServerState::Serving;
        log::info!("client connected on {}", self.path.display());

        match run_session(session, &mut stream).await {
            Ok(()) => log::info!("client disconnected"),
            Err(e) => log::warn!("dropping connection: {}", e),
        }

        drop(stream);
        self.state = ServerState::Listening;
        Ok(())
    }

    /// Serve clients one after another, forever.
    ///
    /// Returns only if the server is not listening. Accept failures are logged
    /// and retried.
    pub async fn serve<H: Session>(&mut self, session: &mut H) -> Result<(), ComError> {
        loop {
            if self.state != ServerState::Listening {
                return Err(ComError::Malformed(format!("serve called while {}", self.state)));
            }
            log::info!("waiting for a connection on {}", self.path.display());
            if let Err(e) = self.serve_connection(session).await {
                log::warn!("accept error: {}", e);
                tokio::time::sleep(Duration::from_millis(ACCEPT_RETRY_MS)).await;
            }
        }
    }

    /// Serve clients until `shutdown` completes, then close.
    ///
    /// A session in progress is dropped mid-cycle.
    pub async fn serve_until<H, F>(&mut self, session: &mut H, shutdown: F) -> Result<(), ComError>
    where
        H: Session,
        F: Future<Output = ()>,
    {
        let result = tokio::select! {
            result = self.serve(session) => result,
            () = shutdown => Ok(()),
        };
        log::info!("shutting down {}", self.path.display());
        self.close();
        result
    }

    /// Stop listening and remove the socket file.
    pub fn close(&mut self) {
        if self.listener.take().is_some() {
            if let Err(e) = std::fs::remove_file(&self.path) {
                log::debug!("could not remove {}: {}", self.path.display(), e);
            }
        }
        self.state = ServerState::Closed;
    }
}

impl Drop for UnixServer {
    fn drop(&mut self) {
        self.close();
    }
}

/// Remove whatever is left at `path` from a previous run. A missing file is fine.
pub fn remove_stale_socket(path: &Path) -> Result<(), ComError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            log::debug!("removed stale socket {}", path.display());
            Ok(())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(source) => Err(ComError::Bind {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Resolves on ctrl-c. If the handler cannot be installed, never resolves.
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("cannot listen for ctrl-c: {}", e);
        std::future::pending::<()>().await;
    }
}
