//! Line-oriented chat loop over any async reader/writer.
//!
//! The binary wires this to stdin/stdout; tests drive it with in-memory
//! buffers.

use anyhow::{Context, Result};
use insight_neural::AgentBackend;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::app::{ChatApp, Command, ExecuteResult};

pub const PROMPT: &str = "you › ";
const THINKING: &str = "…";

async fn write_lines<W: AsyncWrite + Unpin>(writer: &mut W, lines: &[String]) -> Result<()> {
    for line in lines {
        writer.write_all(line.as_bytes()).await?;
        writer.write_all(b"\n").await?;
    }
    writer.flush().await?;
    Ok(())
}

/// Run until `/quit` or end of input.
pub async fn run<B, R, W>(app: &mut ChatApp<B>, reader: R, mut writer: W) -> Result<()>
where
    B: AgentBackend,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let welcome = app.welcome();
    write_lines(&mut writer, &welcome).await?;

    let mut lines = reader.lines();
    loop {
        writer.write_all(PROMPT.as_bytes()).await?;
        writer.flush().await?;

        let Some(line) = lines.next_line().await.context("Failed to read input")? else {
            break;
        };

        if Command::parse(&line).relays() {
            write_lines(&mut writer, &[THINKING.to_string()]).await?;
        }

        match app.execute(&line).await {
            ExecuteResult::Output(out) => write_lines(&mut writer, &out).await?,
            ExecuteResult::Ignored => {}
            ExecuteResult::Quit => break,
        }
    }

    writer.flush().await?;
    Ok(())
}
