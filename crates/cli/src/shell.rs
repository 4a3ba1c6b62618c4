//! The read-ask-print loop.

use docagent_agent::AgentLoop;
use docagent_config::ShellConfig;
use std::borrow::Cow;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

/// Run the shell until the exit command or end of input.
///
/// Each non-blank line becomes one query; its result is written after
/// `config.answer_label`. Bytes that are not UTF-8 are replaced rather than
/// ending the session. Returns the number of queries answered.
pub async fn run_shell<R, W>(
    agent: &AgentLoop,
    config: &ShellConfig,
    mut reader: R,
    writer: &mut W,
) -> std::io::Result<usize>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    let exit_command = config.exit_command.trim();
    let mut buf = Vec::new();
    let mut answered = 0;

    loop {
        write!(writer, "{}", config.input_prompt)?;
        writer.flush()?;

        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            debug!("End of input");
            writeln!(writer)?;
            break;
        }

        let line = String::from_utf8_lossy(&buf);
        if let Cow::Owned(_) = line {
            warn!("Input line was not valid UTF-8; invalid bytes replaced");
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case(exit_command) {
            break;
        }

        let answer = agent.answer(input).await;
        writeln!(writer, "\n{}\n{}\n", config.answer_label, answer)?;
        writer.flush()?;
        answered += 1;
    }

    Ok(answered)
}
