//! GnuPG client.
//!
//! Decryption is delegated to an external `gpg` binary. The client only
//! knows which binary to run and which home directory to point it at; both
//! can be changed in place between decryptions.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;

use async_trait::async_trait;
use passbar_core::types::DecryptedSecret;
use passbar_core::SecretString;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::debug;

use crate::error::{Result, StoreError};

/// Something that can turn an encrypted store file into plaintext.
#[async_trait]
pub trait Decrypt: Send + Sync {
    /// Decrypt `path`. Without a passphrase the tool's own agent/cache is used.
    async fn decrypt(
        &self,
        path: &Path,
        passphrase: Option<&SecretString>,
    ) -> Result<DecryptedSecret>;
}

/// Runs `gpg --decrypt` against store files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GpgClient {
    binary_path: PathBuf,
    home: PathBuf,
    use_agent: bool,
}

impl GpgClient {
    /// Create a client for the given binary and home directory.
    pub fn new(binary_path: impl Into<PathBuf>, home: impl Into<PathBuf>) -> Self {
        Self {
            binary_path: binary_path.into(),
            home: home.into(),
            use_agent: true,
        }
    }

    /// Do not pass `--use-agent`.
    pub fn without_agent(mut self) -> Self {
        self.use_agent = false;
        self
    }

    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn set_binary_path(&mut self, path: impl Into<PathBuf>) {
        self.binary_path = path.into();
        debug!(binary = %self.binary_path.display(), "reconfigured gpg binary");
    }

    pub fn set_home(&mut self, path: impl Into<PathBuf>) {
        self.home = path.into();
        debug!(home = %self.home.display(), "reconfigured gpg home");
    }

    /// Replace both the binary and the home directory.
    pub fn reconfigure(&mut self, binary_path: impl Into<PathBuf>, home: impl Into<PathBuf>) {
        self.set_binary_path(binary_path);
        self.set_home(home);
    }

    /// Arguments for decrypting `path`. With a passphrase, gpg reads it from stdin.
    pub fn decrypt_args(&self, path: &Path, with_passphrase: bool) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--homedir".into(),
            self.home.clone().into_os_string(),
            "--no-tty".into(),
            "--batch".into(),
            "--quiet".into(),
        ];
        if self.use_agent {
            args.push("--use-agent".into());
        }
        if with_passphrase {
            args.extend(
                ["--pinentry-mode", "loopback", "--passphrase-fd", "0"]
                    .into_iter()
                    .map(OsString::from),
            );
        }
        args.push("--decrypt".into());
        args.push(path.as_os_str().to_os_string());
        args
    }
}

#[async_trait]
impl Decrypt for GpgClient {
    async fn decrypt(
        &self,
        path: &Path,
        passphrase: Option<&SecretString>,
    ) -> Result<DecryptedSecret> {
        let mut cmd = Command::new(&self.binary_path);
        cmd.args(self.decrypt_args(path, passphrase.is_some()))
            .stdin(if passphrase.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(
            binary = %self.binary_path.display(),
            file = %path.display(),
            with_passphrase = passphrase.is_some(),
            "running gpg"
        );

        let mut child = cmd.spawn().map_err(|source| StoreError::ToolLaunch {
            binary: self.binary_path.clone(),
            source,
        })?;

        if let (Some(passphrase), Some(mut stdin)) = (passphrase, child.stdin.take()) {
            stdin.write_all(passphrase.expose_secret().as_bytes()).await?;
            stdin.write_all(b"\n").await?;
            // Dropping stdin closes the pipe so gpg sees EOF.
        }

        let output = child.wait_with_output().await?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(StoreError::DecryptionFailed(format!(
                "gpg exited with {}: {}",
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8(output.stdout).map_err(|_| {
            StoreError::DecryptionFailed("gpg output is not valid UTF-8".to_string())
        })?;
        Ok(DecryptedSecret::new(text))
    }
}
