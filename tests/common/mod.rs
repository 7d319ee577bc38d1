//! Shared utilities for supervisor integration tests.

use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use std::process::{Child, Command};
use std::thread::JoinHandle;

use fpm_supervisor::FpmProcess;
use nix::sys::signal::{kill, Signal};
use nix::unistd::Pid;
use tokio::net::{TcpListener, UnixListener};
use tokio::sync::{Mutex, MutexGuard};

static PROCESS_LOCK: Mutex<()> = Mutex::const_new(());

/// Serialize tests that write and then execute scripts.
///
/// Executing a script while another thread of this process still holds a
/// write handle to it (through a concurrent fork) fails with ETXTBSY.
pub async fn process_lock() -> MutexGuard<'static, ()> {
    PROCESS_LOCK.lock().await
}

/// Write an executable `/bin/sh` script.
pub fn write_script(dir: &Path, name: &str, body: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
    path
}

/// A launcher that records its arguments next to the config, reads the pid
/// file path from the generated config and writes `pid` into it, then exits
/// like a daemonizing php-fpm would.
pub fn fake_fpm(dir: &Path, pid: u32) -> PathBuf {
    let args = dir.join("launcher.args");
    write_script(
        dir,
        "fake-fpm",
        &format!(
            "printf '%s\\n' \"$*\" > \"{}\"\npid_file=$(sed -n 's/^pid = //p' \"$2\")\necho {} > \"$pid_file\"",
            args.display(),
            pid
        ),
    )
}

/// Descriptor rooted in `dir` with its config already written.
#[allow(dead_code)]
pub fn descriptor(dir: &Path, exec: &Path) -> FpmProcess {
    let mut process = FpmProcess::new(exec);
    process.set_name("worker");
    process.set_datadir(dir);
    process.set_worker(2);
    process.save_config(dir.join("worker.conf")).unwrap();
    process
}

/// A long-running process standing in for the daemonized worker.
///
/// A background thread reaps it so it disappears from the process table as
/// soon as it exits.
pub struct FakeWorker {
    pub pid: u32,
    reaper: Option<JoinHandle<()>>,
}

impl FakeWorker {
    pub fn spawn() -> Self {
        Self::from_command(Command::new("sleep").arg("30"))
    }

    /// A worker whose shell ignores SIGINT.
    #[allow(dead_code)]
    pub fn spawn_stubborn() -> Self {
        Self::from_command(
            Command::new("sh")
                .arg("-c")
                .arg("trap '' INT; while :; do sleep 1; done"),
        )
    }

    fn from_command(command: &mut Command) -> Self {
        let mut child: Child = command.spawn().unwrap();
        let pid = child.id();
        let reaper = std::thread::spawn(move || {
            let _ = child.wait();
        });
        Self {
            pid,
            reaper: Some(reaper),
        }
    }

    /// Wait until the reaper has collected the process.
    pub fn join(mut self) {
        if let Some(reaper) = self.reaper.take() {
            reaper.join().unwrap();
        }
    }
}

impl Drop for FakeWorker {
    fn drop(&mut self) {
        if self.reaper.is_some() {
            let _ = kill(Pid::from_raw(self.pid as i32), Signal::SIGKILL);
        }
    }
}

/// Accept and immediately drop connections on a unix socket.
pub fn serve_unix(path: &Path) {
    let listener = UnixListener::bind(path).unwrap();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
}

/// Accept and immediately drop connections on a local tcp port.
#[allow(dead_code)]
pub async fn serve_tcp() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();
    tokio::spawn(async move {
        while let Ok((stream, _)) = listener.accept().await {
            drop(stream);
        }
    });
    port
}
