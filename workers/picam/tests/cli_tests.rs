use clap::Parser;
use picam::cli::{Cli, Command};
use picam::{Backend, DEFAULT_SOCKET};
use std::path::Path;
use std::time::Duration;

#[test]
fn test_defaults_serve_full_resolution() {
    let cli = Cli::try_parse_from(["picam"]).unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(cli.socket, Path::new(DEFAULT_SOCKET));
    assert!(!cli.echo_dimensions);
    assert_eq!(cli.rig.backend, Backend::Pattern);

    let config = cli.rig.rig_config();
    assert_eq!(config.dimensions(), [(1296, 972), (1296, 972)]);
    assert_eq!(config.capture_timeout(), Duration::from_millis(2000));
    assert_eq!(config.first().index(), 0);
    assert_eq!(config.second().index(), 1);
}

#[test]
fn test_socket_and_echo_without_subcommand() {
    let cli = Cli::try_parse_from(["picam", "--socket", "/tmp/x.sock", "--echo-dimensions"])
        .unwrap();
    assert_eq!(cli.command, None);
    assert_eq!(cli.socket, Path::new("/tmp/x.sock"));
    assert!(cli.echo_dimensions);
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from([
        "picam",
        "serve",
        "--socket",
        "/tmp/y.sock",
        "--width2",
        "640",
        "--height2",
        "480",
        "--capture-timeout-ms",
        "500",
    ])
    .unwrap();
    assert_eq!(cli.command, Some(Command::Serve));
    assert_eq!(cli.socket, Path::new("/tmp/y.sock"));

    let config = cli.rig.rig_config();
    assert_eq!(config.dimensions(), [(1296, 972), (640, 480)]);
    assert_eq!(config.capture_timeout(), Duration::from_millis(500));
}

#[test]
fn test_snapshot_paths() {
    let cli = Cli::try_parse_from(["picam", "snapshot", "--f1", "a.png", "--backend", "v4l2"])
        .unwrap();
    assert_eq!(cli.rig.backend, Backend::V4l2);
    match cli.command {
        Some(Command::Snapshot { f1, f2, dir }) => {
            assert_eq!(f1.as_deref(), Some(Path::new("a.png")));
            assert_eq!(f2, None);
            assert_eq!(dir, Path::new("."));
        }
        other => panic!("unexpected command {:?}", other),
    }
}

#[test]
fn test_unknown_backend_rejected() {
    assert!(Cli::try_parse_from(["picam", "--backend", "usb"]).is_err());
}
