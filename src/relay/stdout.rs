//! Stdout relay: writes each envelope as one JSON line.

use super::{Envelope, Relay};
use crate::error::{Result, TutorError};
use crate::message::TutorResponse;
use async_trait::async_trait;
use tokio::io::{AsyncWrite, AsyncWriteExt};

pub struct StdoutRelay;

/// Write one envelope for `recipient` to `out` as a single JSON line.
async fn write_envelope<W>(out: &mut W, recipient: &str, message: &TutorResponse) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let mut line = serde_json::to_string(&Envelope::new(recipient, message))?;
    line.push('\n');

    out.write_all(line.as_bytes()).await?;
    out.flush().await?;
    Ok(())
}

#[async_trait]
impl Relay for StdoutRelay {
    async fn deliver(&self, recipient: &str, message: &TutorResponse) -> Result<()> {
        write_envelope(&mut tokio::io::stdout(), recipient, message)
            .await
            .map_err(|e| TutorError::Relay(format!("Failed to write envelope to stdout: {}", e)))
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
