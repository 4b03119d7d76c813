//! Per-message subprocess execution.
//!
//! Each delivery spawns one fresh process from the configured argv. The
//! message body goes in on stdin; stdout and stderr of the child share a
//! single anonymous pipe so the combined output is collected in write order,
//! the way `CombinedOutput`-style helpers behave.

use std::io::Read;
use std::process::Stdio;

use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::ConsumerError;

/// Runs `argv` once, feeding `payload` to its stdin, and returns the child's
/// combined stdout/stderr once it has exited successfully.
///
/// Every failure here is fatal to the whole run: a stdin pipe that cannot be
/// acquired or written, a spawn failure, and a non-zero exit all surface as
/// errors rather than per-message recovery.
pub async fn execute(argv: &[String], payload: &[u8]) -> Result<Vec<u8>, ConsumerError> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| ConsumerError::from("no command specified"))?;

    // Both child output streams write into the same pipe so interleaving
    // order is preserved.
    let (mut output_reader, output_writer) = std::io::pipe()?;

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::piped())
        .stdout(output_writer.try_clone()?)
        .stderr(output_writer);

    let mut child = cmd.spawn()?;
    // The Command still holds the parent's copies of the pipe write end;
    // they must close or the reader never sees EOF.
    drop(cmd);

    let mut stdin = child
        .stdin
        .take()
        .ok_or_else(|| std::io::Error::other("command stdin pipe unavailable"))?;

    // Feed the payload concurrently with the child's execution so a child
    // that produces output while still reading input cannot deadlock us.
    // The handle is joined below: a write failure is observed, not dropped.
    let payload = payload.to_vec();
    let feeder = tokio::spawn(async move {
        stdin.write_all(&payload).await?;
        stdin.shutdown().await
    });

    let collector = tokio::task::spawn_blocking(move || {
        let mut output = Vec::new();
        output_reader.read_to_end(&mut output).map(|_| output)
    });

    let status = child.wait().await?;
    let output = collector.await??;
    feeder.await??;

    if !status.success() {
        return Err(ConsumerError::CommandFailed { status });
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn payload_reaches_stdin_unmodified() {
        let body = b"hello queue \x00\xffbytes";
        let output = execute(&argv(&["cat"]), body).await.unwrap();
        assert_eq!(output, body);
    }

    #[tokio::test]
    async fn empty_payload_is_valid() {
        let output = execute(&argv(&["cat"]), b"").await.unwrap();
        assert!(output.is_empty());
    }

    #[tokio::test]
    async fn stderr_is_captured_with_stdout() {
        let output = execute(
            &argv(&["sh", "-c", "printf out; printf err >&2"]),
            b"",
        )
        .await
        .unwrap();
        assert_eq!(output, b"outerr");
    }

    #[tokio::test]
    async fn nonzero_exit_is_an_error() {
        let err = execute(&argv(&["false"]), b"").await.unwrap_err();
        match err {
            ConsumerError::CommandFailed { status } => assert_eq!(status.code(), Some(1)),
            other => panic!("expected CommandFailed, got {other}"),
        }
    }

    #[tokio::test]
    async fn missing_program_fails_to_spawn() {
        let err = execute(&argv(&["/nonexistent/amqp-consume-test-binary"]), b"")
            .await
            .unwrap_err();
        assert!(matches!(err, ConsumerError::Io(_)));
    }

    #[tokio::test]
    async fn empty_argv_is_rejected() {
        let err = execute(&[], b"ignored").await.unwrap_err();
        assert!(matches!(err, ConsumerError::Config { .. }));
    }

    #[tokio::test]
    async fn sequential_runs_keep_output_order() {
        let mut combined = Vec::new();
        for body in [&b"first\n"[..], b"second\n", b"third\n"] {
            let output = execute(&argv(&["cat"]), body).await.unwrap();
            combined.extend_from_slice(&output);
        }
        assert_eq!(combined, b"first\nsecond\nthird\n");
    }
}
