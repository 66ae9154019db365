//! Liveness probing through the system `ping` utility.

use std::net::Ipv4Addr;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use netinv_common::scanning::HostProber;
use tokio::process::Command;
use tracing::debug;

/// Slack granted to the `ping` process on top of its own timeout.
const PROCESS_GRACE: Duration = Duration::from_secs(2);

#[derive(Debug, Default, Clone, Copy)]
pub struct PingProber;

/// Which `ping` command line the host understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PingFlavor {
    /// `-n 1 -w <ms>`
    Windows,
    /// `-c 1 -W <ms>` (macOS and the BSDs)
    Bsd,
    /// `-c 1 -W <seconds>` (iputils)
    Linux,
}

impl PingFlavor {
    pub fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(any(
            target_os = "macos",
            target_os = "freebsd",
            target_os = "openbsd",
            target_os = "netbsd"
        )) {
            Self::Bsd
        } else {
            Self::Linux
        }
    }
}

#[async_trait]
impl HostProber for PingProber {
    async fn probe(&self, ip: Ipv4Addr, timeout: Duration) -> bool {
        let mut cmd = Command::new("ping");
        cmd.args(ping_args(ip, timeout, PingFlavor::host()))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true);

        match tokio::time::timeout(timeout + PROCESS_GRACE, cmd.status()).await {
            Ok(Ok(status)) => {
                if status.success() {
                    debug!("Host {ip} responded");
                }
                status.success()
            }
            Ok(Err(e)) => {
                debug!("Ping failed for {ip}: {e}");
                false
            }
            Err(_) => false,
        }
    }
}

/// One echo request with a per-host timeout. Windows and BSD take the wait
/// in milliseconds, iputils in whole seconds.
pub fn ping_args(ip: Ipv4Addr, timeout: Duration, flavor: PingFlavor) -> Vec<String> {
    let (count_flag, wait_flag, wait) = match flavor {
        PingFlavor::Windows => ("-n", "-w", timeout.as_millis().to_string()),
        PingFlavor::Bsd => ("-c", "-W", timeout.as_millis().max(1).to_string()),
        PingFlavor::Linux => ("-c", "-W", timeout.as_secs().max(1).to_string()),
    };
    vec![
        count_flag.into(),
        "1".into(),
        wait_flag.into(),
        wait,
        ip.to_string(),
    ]
}
