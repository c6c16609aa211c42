use std::io::ErrorKind;

use futures::StreamExt;
use snafu::ResultExt;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio_util::codec::{FramedRead, LinesCodec, LinesCodecError};
use tracing::{error, info, instrument};
use vessel_core::{ArrivalClassifier, VesselSnapshot};

use crate::{
    error::{
        Result,
        error::{DeserializeSnafu, ReadSnafu, SerializeSnafu, WriteSnafu},
    },
    models::{ArrivalRequest, ArrivalVerdict, VesselPositionRecord},
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConsumerStats {
    pub processed: u64,
    pub failed: u64,
    pub arrived: u64,
}

pub struct Consumer {
    classifier: ArrivalClassifier,
    max_line_length: usize,
}

impl Consumer {
    pub fn new(classifier: ArrivalClassifier, max_line_length: usize) -> Consumer {
        Consumer {
            classifier,
            max_line_length,
        }
    }

    /// Consumes `source` until it is exhausted, writing one verdict per valid line to `sink`.
    ///
    /// Lines that cannot be parsed are logged and skipped.
    #[instrument(skip_all, fields(app.num_messages))]
    pub async fn run(
        &self,
        source: impl AsyncRead + Unpin,
        mut sink: impl AsyncWrite + Unpin,
    ) -> Result<ConsumerStats> {
        let codec = LinesCodec::new_with_max_length(self.max_line_length);
        let mut framed_read = FramedRead::new(source, codec);

        let mut stats = ConsumerStats::default();

        // The framed reader yields a single `None` after a decode error before it resumes reading.
        let mut resume_after_error = false;

        loop {
            let line = match framed_read.next().await {
                None if resume_after_error => {
                    resume_after_error = false;
                    continue;
                }
                None => break,
                Some(Ok(line)) => line,
                Some(Err(LinesCodecError::MaxLineLengthExceeded)) => {
                    error!(
                        "vessel position line exceeded max length of {}",
                        self.max_line_length
                    );
                    stats.failed += 1;
                    resume_after_error = true;
                    continue;
                }
                Some(Err(LinesCodecError::Io(e))) if e.kind() == ErrorKind::InvalidData => {
                    error!("vessel position line is not valid utf-8: {e}");
                    stats.failed += 1;
                    resume_after_error = true;
                    continue;
                }
                Some(Err(LinesCodecError::Io(e))) => return Err(e).context(ReadSnafu),
            };

            if line.trim().is_empty() {
                continue;
            }

            match parse_request(&line) {
                Err(e) => {
                    error!("{e:?}");
                    stats.failed += 1;
                }
                Ok(request) => {
                    let verdict = self.classify(request);
                    if verdict.result.has_arrived {
                        stats.arrived += 1;
                    }
                    write_verdict(&mut sink, &verdict).await?;
                    stats.processed += 1;
                }
            }
        }

        sink.flush().await.context(WriteSnafu)?;

        tracing::Span::current().record("app.num_messages", stats.processed + stats.failed);
        info!(
            processed = stats.processed,
            failed = stats.failed,
            arrived = stats.arrived,
            "vessel position input exhausted"
        );

        Ok(stats)
    }

    pub fn classify(&self, request: ArrivalRequest) -> ArrivalVerdict {
        let current = VesselSnapshot::from(request.current);
        let previous = request.previous.map(VesselSnapshot::from);

        let result = self.classifier.classify(&current, previous.as_ref());

        ArrivalVerdict::new(&current, result)
    }
}

/// A line is either a full request with `current` and an optional `previous` record, or a bare
/// record which is classified without history.
fn parse_request(line: &str) -> Result<ArrivalRequest> {
    let value: serde_json::Value =
        serde_json::from_str(line).with_context(|_| DeserializeSnafu { line })?;

    if value.get("current").is_some() {
        serde_json::from_value(value).with_context(|_| DeserializeSnafu { line })
    } else {
        let current: VesselPositionRecord =
            serde_json::from_value(value).with_context(|_| DeserializeSnafu { line })?;
        Ok(ArrivalRequest {
            current,
            previous: None,
        })
    }
}

async fn write_verdict(
    sink: &mut (impl AsyncWrite + Unpin),
    verdict: &ArrivalVerdict,
) -> Result<()> {
    let mut buf = serde_json::to_vec(verdict).context(SerializeSnafu)?;
    buf.push(b'\n');
    sink.write_all(&buf).await.context(WriteSnafu)
}
