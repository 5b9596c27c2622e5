mod common;

use common::{exchange, snapshot, TestServer};
use rouilleftp::core_network::PasvAddress;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

#[tokio::test]
async fn test_commands_require_login() {
    let server = TestServer::start().await;
    let mut control = server.control().await;

    for (command, arg) in [("PWD", None), ("CWD", Some("/")), ("PASV", None), ("MKD", Some("x"))] {
        let reply = exchange(&mut control, command, arg).await;
        assert_eq!(reply.code, 530, "{}", command);
    }
    assert!(!server.path("x").exists());
}

#[tokio::test]
async fn test_login_sequence() {
    let server = TestServer::start().await;
    let mut control = server.control().await;

    let reply = exchange(&mut control, "PASS", Some("123456")).await;
    assert_eq!(reply.code, 503);

    assert_eq!(exchange(&mut control, "USER", Some("nobody")).await.code, 530);
    assert_eq!(exchange(&mut control, "USER", Some("user")).await.code, 331);
    assert_eq!(exchange(&mut control, "PASS", Some("bad")).await.code, 530);
    assert_eq!(exchange(&mut control, "PWD", None).await.code, 530);
    assert_eq!(exchange(&mut control, "PASS", Some("123456")).await.code, 230);

    let reply = exchange(&mut control, "PWD", None).await;
    assert_eq!(reply.code, 257);
    assert_eq!(reply.text, "\"/\" is current directory");
}

#[tokio::test]
async fn test_unknown_command_is_not_implemented() {
    let server = TestServer::start().await;
    let mut control = server.control().await;
    assert_eq!(exchange(&mut control, "FEAT", None).await.code, 502);

    let mut control = server.logged_in("user", "123456").await;
    assert_eq!(exchange(&mut control, "PORT", Some("1,2,3,4,5,6")).await.code, 502);
    assert_eq!(exchange(&mut control, "noop", None).await.code, 502);
    // The session survives.
    assert_eq!(exchange(&mut control, "PWD", None).await.code, 257);
}

#[tokio::test]
async fn test_rnto_without_rnfr_is_bad_sequence() {
    let server = TestServer::start().await;
    std::fs::write(server.path("a.txt"), b"a").unwrap();
    let mut control = server.logged_in("user", "123456").await;

    assert_eq!(exchange(&mut control, "RNTO", Some("b.txt")).await.code, 503);

    assert_eq!(exchange(&mut control, "RNFR", Some("a.txt")).await.code, 350);
    assert_eq!(exchange(&mut control, "RNTO", Some("b.txt")).await.code, 250);
    assert!(server.path("b.txt").is_file());
    assert_eq!(exchange(&mut control, "RNTO", Some("c.txt")).await.code, 503);

    // A failed rename also clears the pending source.
    assert_eq!(exchange(&mut control, "RNFR", Some("b.txt")).await.code, 350);
    let reply = exchange(&mut control, "RNTO", Some("missing/dir/c.txt")).await;
    assert_eq!(reply.code, 550);
    assert_eq!(exchange(&mut control, "RNTO", Some("c.txt")).await.code, 503);
    assert!(server.path("b.txt").is_file());
}

#[tokio::test]
async fn test_rnfr_of_missing_path_clears_pending_source() {
    let server = TestServer::start().await;
    std::fs::write(server.path("a.txt"), b"a").unwrap();
    let mut control = server.logged_in("user", "123456").await;

    assert_eq!(exchange(&mut control, "RNFR", Some("a.txt")).await.code, 350);
    assert_eq!(exchange(&mut control, "RNFR", Some("ghost.txt")).await.code, 550);
    assert_eq!(exchange(&mut control, "RNTO", Some("b.txt")).await.code, 503);
    assert!(server.path("a.txt").is_file());
}

#[tokio::test]
async fn test_read_only_user_cannot_mutate() {
    let server = TestServer::start().await;
    std::fs::write(server.path("keep.txt"), b"keep").unwrap();
    std::fs::create_dir(server.path("dir")).unwrap();
    let before = snapshot(&server.root);

    let mut control = server.logged_in("guest", "guest").await;
    for (command, arg) in [
        ("STOR", "new.txt"),
        ("MKD", "sub"),
        ("RMD", "dir"),
        ("DELE", "keep.txt"),
        ("RNFR", "keep.txt"),
    ] {
        let reply = exchange(&mut control, command, Some(arg)).await;
        assert_eq!(reply.code, 550, "{}", command);
        assert_eq!(reply.text, "Permission denied.");
    }

    assert_eq!(snapshot(&server.root), before);
    assert_eq!(std::fs::read(server.path("keep.txt")).unwrap(), b"keep");
}

#[tokio::test]
async fn test_path_arguments_stay_inside_root() {
    let server = TestServer::start().await;
    std::fs::create_dir(server.path("sub")).unwrap();
    let mut control = server.logged_in("user", "123456").await;

    assert_eq!(exchange(&mut control, "CWD", Some("../../..")).await.code, 250);
    assert_eq!(exchange(&mut control, "PWD", None).await.text, "\"/\" is current directory");

    assert_eq!(exchange(&mut control, "CWD", Some("sub/../../sub")).await.code, 250);
    assert_eq!(exchange(&mut control, "PWD", None).await.text, "\"/sub\" is current directory");

    assert_eq!(exchange(&mut control, "CWD", Some("nowhere")).await.code, 550);
    assert_eq!(exchange(&mut control, "PWD", None).await.text, "\"/sub\" is current directory");

    // Directories created through ".." land under the root.
    assert_eq!(exchange(&mut control, "MKD", Some("../../../escaped")).await.code, 257);
    assert!(server.path("escaped").is_dir());

    // The root itself is never removed.
    assert_eq!(exchange(&mut control, "RMD", Some("/")).await.code, 550);
    assert!(server.root.is_dir());
}

async fn open_pasv(control: &mut rouilleftp::core_network::ControlChannel) -> TcpStream {
    let reply = exchange(control, "PASV", None).await;
    assert_eq!(reply.code, 227);
    assert!(reply.text.starts_with("Entering Passive Mode ("));
    let address = PasvAddress::parse_reply_text(&reply.text).unwrap();
    TcpStream::connect(address.socket_addr()).await.unwrap()
}

#[tokio::test]
async fn test_passive_listener_is_single_use() {
    let server = TestServer::start().await;
    std::fs::write(server.path("one.txt"), b"1").unwrap();
    let mut control = server.logged_in("user", "123456").await;

    assert_eq!(exchange(&mut control, "LIST", None).await.code, 425);

    let mut data = open_pasv(&mut control).await;
    let reply = exchange(&mut control, "LIST", None).await;
    assert!(reply.code == 125 || reply.code == 150);
    let mut listing = String::new();
    data.read_to_string(&mut listing).await.unwrap();
    assert_eq!(
        listing,
        "-rw-r--r-- 1 owner group 1 Jan 01 00:00 one.txt\r\n"
    );
    let done = control.read_reply().await.unwrap();
    assert_eq!(done.code, 226);

    let reply = exchange(&mut control, "LIST", None).await;
    assert_eq!(reply.code, 425);
    assert_eq!(reply.text, "Use PASV first.");
}

#[tokio::test]
async fn test_second_pasv_replaces_first() {
    let server = TestServer::start().await;
    let mut control = server.logged_in("user", "123456").await;

    assert_eq!(exchange(&mut control, "PASV", None).await.code, 227);
    let mut data = open_pasv(&mut control).await;

    let reply = exchange(&mut control, "STOR", Some("up.bin")).await;
    assert_eq!(reply.code, 150);
    data.write_all(b"payload").await.unwrap();
    data.shutdown().await.unwrap();
    drop(data);
    assert_eq!(control.read_reply().await.unwrap().code, 226);
    assert_eq!(std::fs::read(server.path("up.bin")).unwrap(), b"payload");
}

#[tokio::test]
async fn test_stor_creates_parent_directories() {
    let server = TestServer::start().await;
    let mut control = server.logged_in("user", "123456").await;

    let mut data = open_pasv(&mut control).await;
    assert_eq!(exchange(&mut control, "STOR", Some("a/b/c.txt")).await.code, 150);
    data.write_all(b"abc").await.unwrap();
    data.shutdown().await.unwrap();
    drop(data);
    assert_eq!(control.read_reply().await.unwrap().code, 226);
    assert_eq!(std::fs::read(server.path("a/b/c.txt")).unwrap(), b"abc");
}

#[tokio::test]
async fn test_type_and_quit() {
    let server = TestServer::start().await;
    let mut control = server.logged_in("user", "123456").await;

    let reply = exchange(&mut control, "TYPE", Some("a")).await;
    assert_eq!(reply.code, 200);
    assert_eq!(reply.text, "Type set to A.");

    let reply = exchange(&mut control, "QUIT", None).await;
    assert_eq!(reply.code, 221);
    assert!(control.read_line().await.unwrap().is_none());
}

#[tokio::test]
async fn test_session_limit_rejects_extra_connections() {
    let server = TestServer::start_with(|config| config.server.max_sessions = Some(1)).await;
    let mut first = server.control().await;

    let stream = TcpStream::connect(server.addr).await.unwrap();
    let mut second = rouilleftp::core_network::ControlChannel::new(stream).unwrap();
    let reply = second.read_reply().await.unwrap();
    assert_eq!(reply.code, 421);

    assert_eq!(exchange(&mut first, "QUIT", None).await.code, 221);
}

#[tokio::test]
async fn test_filesystem_fault_keeps_session_alive() {
    let server = TestServer::start().await;
    std::fs::write(server.path("keep.txt"), b"keep").unwrap();
    let mut control = server.logged_in("user", "123456").await;

    // The parent of the target is a plain file, so creating it fails.
    let reply = exchange(&mut control, "STOR", Some("keep.txt/child")).await;
    assert_eq!(reply.code, 550);
    assert_eq!(reply.text, "Requested action not taken: operation failed.");

    let reply = exchange(&mut control, "PWD", None).await;
    assert_eq!(reply.code, 257);
    assert_eq!(std::fs::read(server.path("keep.txt")).unwrap(), b"keep");
}

#[cfg(unix)]
#[tokio::test]
async fn test_new_names_under_outside_symlink_stay_in_root() {
    let outside = tempfile::tempdir().unwrap();
    let server = TestServer::start().await;
    std::os::unix::fs::symlink(outside.path(), server.path("link")).unwrap();
    let mut control = server.logged_in("user", "123456").await;

    exchange(&mut control, "MKD", Some("link/escaped")).await;
    assert!(!outside.path().join("escaped").exists());

    let mut data = open_pasv(&mut control).await;
    let reply = exchange(&mut control, "STOR", Some("link/new.txt")).await;
    assert_eq!(reply.code, 550);
    drop(data.shutdown().await);
    assert!(!outside.path().join("new.txt").exists());
}
