use super::shell_quote;
use crate::core::{HelperError, HelperResult};
use crate::di::RemoteHost;
use crate::process::ProcessOutput;
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// Remote host reached through the system `ssh` client
///
/// Every call opens its own `ssh <host> <command>` session and waits for it
/// to exit. `BatchMode` keeps ssh from prompting; authentication must already
/// be set up.
pub struct SshRemote {
    host: String,
    program: String,
}

impl SshRemote {
    pub fn new(host: String) -> Self {
        Self {
            host,
            program: "ssh".to_string(),
        }
    }

    /// Use a different ssh-compatible client (`<program> -o BatchMode=yes <host> <command>`)
    pub fn with_program(mut self, program: &str) -> Self {
        self.program = program.to_string();
        self
    }

    fn command(&self, remote_command: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.arg("-o")
            .arg("BatchMode=yes")
            .arg(&self.host)
            .arg(remote_command)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        cmd
    }

    async fn run(&self, remote_command: &str) -> HelperResult<ProcessOutput> {
        tracing::debug!("ssh {}: {}", self.host, remote_command);
        let output = self
            .command(remote_command)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| HelperError::TransferError(format!("Failed to run {}: {}", self.program, e)))?;
        Ok(ProcessOutput::from_output(output))
    }

    async fn run_checked(&self, remote_command: &str) -> HelperResult<()> {
        let output = self.run(remote_command).await?;
        if output.exited_cleanly() {
            Ok(())
        } else {
            Err(HelperError::TransferError(format!(
                "`{}` failed on {}: {}",
                remote_command,
                self.host,
                output.stderr.trim()
            )))
        }
    }
}

#[async_trait]
impl RemoteHost for SshRemote {
    fn name(&self) -> &str {
        &self.host
    }

    async fn ensure_dir(&self, dir: &str) -> HelperResult<()> {
        self.run_checked(&format!("mkdir -p {}", shell_quote(dir)))
            .await
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> HelperResult<()> {
        let remote_command = format!("cat > {}", shell_quote(path));
        let mut child = self
            .command(&remote_command)
            .stdin(Stdio::piped())
            .spawn()
            .map_err(|e| HelperError::TransferError(format!("Failed to run {}: {}", self.program, e)))?;

        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| HelperError::TransferError("ssh stdin unavailable".to_string()))?;
        stdin
            .write_all(data)
            .await
            .map_err(|e| HelperError::TransferError(format!("Failed to send package: {}", e)))?;
        stdin.shutdown().await?;
        drop(stdin);

        let output = ProcessOutput::from_output(child.wait_with_output().await?);
        if output.exited_cleanly() {
            Ok(())
        } else {
            Err(HelperError::TransferError(format!(
                "Writing {} on {} failed: {}",
                path,
                self.host,
                output.stderr.trim()
            )))
        }
    }

    async fn file_size(&self, path: &str) -> HelperResult<Option<u64>> {
        let quoted = shell_quote(path);
        let output = self
            .run(&format!("test -f {0} && wc -c < {0}", quoted))
            .await?;
        if !output.exited_cleanly() {
            return Ok(None);
        }
        Ok(output.stdout.trim().parse::<u64>().ok())
    }

    async fn exec(&self, command: &str) -> HelperResult<ProcessOutput> {
        self.run(command).await
    }

    async fn remove_file(&self, path: &str) -> HelperResult<()> {
        self.run_checked(&format!("rm -f {}", shell_quote(path)))
            .await
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::os::unix::fs::PermissionsExt;
    use tempfile::TempDir;

    /// An ssh stand-in that runs the remote command locally
    fn fake_ssh(dir: &std::path::Path) -> String {
        let script = dir.join("fake-ssh");
        std::fs::write(&script, "#!/bin/sh\nshift 3\nexec /bin/sh -c \"$1\"\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();
        script.to_string_lossy().into_owned()
    }

    #[tokio::test]
    async fn test_write_and_measure_file() {
        let temp = TempDir::new().unwrap();
        let remote = SshRemote::new("devbox".to_string()).with_program(&fake_ssh(temp.path()));

        let dir = temp.path().join("remote staging");
        let dir_str = dir.to_string_lossy().into_owned();
        remote.ensure_dir(&dir_str).await.unwrap();
        assert!(dir.is_dir());

        let file = format!("{}/a.b.vsix", dir_str);
        remote.write_file(&file, b"0123456789").await.unwrap();
        assert_eq!(remote.file_size(&file).await.unwrap(), Some(10));

        remote.remove_file(&file).await.unwrap();
        assert_eq!(remote.file_size(&file).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exec_captures_output() {
        let temp = TempDir::new().unwrap();
        let remote = SshRemote::new("devbox".to_string()).with_program(&fake_ssh(temp.path()));

        let output = remote.exec("echo installed; echo oops >&2").await.unwrap();
        assert_eq!(output.stdout.trim(), "installed");
        assert_eq!(output.stderr.trim(), "oops");
        assert_eq!(remote.name(), "devbox");
    }

    #[tokio::test]
    async fn test_missing_ssh_program() {
        let remote =
            SshRemote::new("devbox".to_string()).with_program("/nonexistent/bin/ssh-client");
        let err = remote.ensure_dir("/tmp/x").await.unwrap_err();
        assert!(matches!(err, HelperError::TransferError(_)));
    }
}
