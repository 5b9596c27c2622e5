#![allow(dead_code)]

use rouilleftp::core_network::ControlChannel;
use rouilleftp::{Config, FtpServer, Reply};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpStream;

pub struct TestServer {
    pub addr: SocketAddr,
    pub root: PathBuf,
    _dir: TempDir,
}

impl TestServer {
    pub async fn start() -> Self {
        Self::start_with(|_| {}).await
    }

    pub async fn start_with(adjust: impl FnOnce(&mut Config)) -> Self {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.server.bind_host = "127.0.0.1".to_string();
        config.server.listen_port = 0;
        config.server.root_dir = dir.path().join("root");
        adjust(&mut config);
        config.prepare().unwrap();

        let root = config.server.root_dir.clone();
        let server = FtpServer::bind(Arc::new(config)).await.unwrap();
        let addr = server.local_addr().unwrap();
        tokio::spawn(server.serve());

        Self {
            addr,
            root,
            _dir: dir,
        }
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// A raw control connection with the banner already consumed.
    pub async fn control(&self) -> ControlChannel {
        let stream = TcpStream::connect(self.addr).await.unwrap();
        let mut control = ControlChannel::new(stream).unwrap();
        let banner = control.read_reply().await.unwrap();
        assert_eq!(banner.code, 220);
        control
    }

    pub async fn logged_in(&self, user: &str, password: &str) -> ControlChannel {
        let mut control = self.control().await;
        assert_eq!(exchange(&mut control, "USER", Some(user)).await.code, 331);
        assert_eq!(exchange(&mut control, "PASS", Some(password)).await.code, 230);
        control
    }
}

pub async fn exchange(control: &mut ControlChannel, command: &str, arg: Option<&str>) -> Reply {
    control.send_command(command, arg).await.unwrap();
    control.read_reply().await.unwrap()
}

pub fn snapshot(root: &Path) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    let mut pending = vec![root.to_path_buf()];
    while let Some(dir) = pending.pop() {
        for entry in std::fs::read_dir(&dir).unwrap() {
            let path = entry.unwrap().path();
            if path.is_dir() {
                pending.push(path.clone());
            }
            paths.push(path);
        }
    }
    paths.sort();
    paths
}
