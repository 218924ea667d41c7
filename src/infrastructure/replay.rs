//! Event source reading recorded gateway frames.
//!
//! The log holds one raw gateway frame per line, as received from the
//! websocket. Blank lines, non-dispatch frames and events the synchronizer
//! does not consume are skipped; frames that fail to decode are logged
//! and skipped.

use std::path::Path;

use futures_util::{Stream, stream};
use tokio::fs::File;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, BufReader};
use tracing::{debug, warn};

use super::discord::EventParser;
use crate::domain::events::SyncEvent;

/// Opens a frame log, or stdin when `path` is `None`.
///
/// # Errors
///
/// Returns an error if the file cannot be opened.
pub async fn open_source(path: Option<&Path>) -> io::Result<Box<dyn AsyncBufRead + Unpin + Send>> {
    match path {
        Some(path) => {
            let file = File::open(path).await?;
            debug!(path = %path.display(), "Replaying gateway log");
            Ok(Box::new(BufReader::new(file)))
        }
        None => {
            debug!("Replaying gateway log from stdin");
            Ok(Box::new(BufReader::new(io::stdin())))
        }
    }
}

/// Decodes frames line by line into a stream of events.
pub fn decode_lines<R>(reader: R) -> impl Stream<Item = SyncEvent>
where
    R: AsyncBufRead + Unpin,
{
    stream::unfold((reader.lines(), 0_usize), |(mut lines, mut line_no)| async move {
        loop {
            line_no += 1;

            let line = match lines.next_line().await {
                Ok(Some(line)) => line,
                Ok(None) => return None,
                Err(e) => {
                    warn!(line = line_no, error = %e, "Failed to read gateway log");
                    return None;
                }
            };

            let frame = line.trim();
            if frame.is_empty() {
                continue;
            }

            match EventParser::parse_frame(frame) {
                Ok(Some(event)) => return Some((event, (lines, line_no))),
                Ok(None) => {}
                Err(e) => warn!(line = line_no, error = %e, "Skipping undecodable frame"),
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{ChannelId, MessageId};
    use futures_util::StreamExt;
    use std::io::Write;

    const LOG: &str = r#"
{"op":10,"d":{"heartbeat_interval":41250},"s":null,"t":null}
{"op":0,"t":"MESSAGE_CREATE","s":1,"d":{"id":"2","channel_id":"1"}}
this is not json

{"op":0,"t":"TYPING_START","s":2,"d":{"channel_id":"1"}}
{"op":0,"t":"MESSAGE_ACK","s":3,"d":{"channel_id":"1","message_id":"2"}}
"#;

    #[tokio::test]
    async fn test_decode_skips_noise() {
        let events: Vec<SyncEvent> = decode_lines(LOG.as_bytes()).collect().await;

        assert_eq!(
            events,
            vec![
                SyncEvent::MessageCreated {
                    channel_id: ChannelId(1),
                    message_id: MessageId(2),
                    guild_id: None,
                },
                SyncEvent::MessageAcknowledged {
                    channel_id: ChannelId(1),
                    message_id: MessageId(2),
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_open_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(LOG.as_bytes()).unwrap();

        let reader = open_source(Some(file.path())).await.unwrap();
        let count = decode_lines(reader).count().await;

        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn test_open_missing_file_fails() {
        let result = open_source(Some(Path::new("/nonexistent/gateway.log"))).await;

        assert!(result.is_err());
    }
}
