//! Batch forwarding of workflow events.
//!
//! Applies the translator to independent records in input order. Failures are
//! either skipped with a warning or abort the batch, per [`ErrorPolicy`].
//! Delivery, retry and persistence belong to whoever consumes the output.

use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Read, Write};

use crate::legacy::JobUpdateEvent;
use crate::opaque::OpaqueContext;
use crate::types::{Error, ErrorPolicy, ForwardingConfig, Result, TranslateError, UpdateId};
use crate::workflow::WorkflowEvent;

use super::status::StatusMapper;
use super::timestamp::TimestampParser;
use super::translation::EventTranslator;

/// One input record: a workflow event plus its update's serialized opaque data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateEventRecord {
    pub event: WorkflowEvent,

    #[serde(default)]
    pub opaque_data: String,
}

/// Outcome of a forwarding run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ForwardReport {
    pub forwarded: usize,
    pub skipped: usize,
}

#[derive(Debug, Clone)]
pub struct EventForwarder<M, P> {
    translator: EventTranslator<M, P>,
    config: ForwardingConfig,
}

impl<M: StatusMapper, P: TimestampParser> EventForwarder<M, P> {
    pub fn new(translator: EventTranslator<M, P>, config: ForwardingConfig) -> Self {
        Self { translator, config }
    }

    /// Translate every record, in order.
    pub fn forward_all<I>(&self, records: I) -> Result<Vec<JobUpdateEvent>>
    where
        I: IntoIterator<Item = UpdateEventRecord>,
    {
        let mut events = Vec::new();
        let mut skipped = 0usize;

        for (index, record) in records.into_iter().enumerate() {
            let (update_id, result) = self.translate_record(&record);
            match result {
                Ok(event) => events.push(event),
                Err(err) => {
                    self.on_failure(index, update_id.as_ref(), err)?;
                    skipped += 1;
                }
            }
        }

        tracing::debug!(forwarded = events.len(), skipped, "forwarded workflow events");
        Ok(events)
    }

    /// Read JSON-lines records from `reader`, write one legacy event per line
    /// to `writer`.
    ///
    /// At most `max_line_bytes` of a line are ever buffered. Blank lines are
    /// ignored. Oversized, non-UTF-8 and undecodable lines are record failures
    /// and go through the error policy; only read errors end the stream.
    pub fn forward_lines<R: BufRead, W: Write>(
        &self,
        mut reader: R,
        mut writer: W,
    ) -> Result<ForwardReport> {
        let mut report = ForwardReport::default();
        let limit = self.config.max_line_bytes;
        // Room for the content plus a CRLF terminator.
        let cap = limit as u64 + 2;
        let mut buf = Vec::new();

        for index in 0.. {
            buf.clear();
            let read = (&mut reader).take(cap).read_until(b'\n', &mut buf)?;
            if read == 0 {
                break;
            }

            let outcome = if buf.last() != Some(&b'\n') && read as u64 == cap {
                discard_line(&mut reader)?;
                (None, Err(oversized(limit)))
            } else {
                let line = strip_terminator(&buf);
                if line.iter().all(u8::is_ascii_whitespace) {
                    continue;
                }
                if line.len() > limit {
                    (None, Err(oversized(limit)))
                } else {
                    self.decode_and_translate(line)
                }
            };

            match outcome {
                (_, Ok(event)) => {
                    serde_json::to_writer(&mut writer, &event)?;
                    writer.write_all(b"\n")?;
                    report.forwarded += 1;
                }
                (update_id, Err(err)) => {
                    self.on_failure(index, update_id.as_ref(), err)?;
                    report.skipped += 1;
                }
            }
        }

        writer.flush()?;
        tracing::debug!(
            forwarded = report.forwarded,
            skipped = report.skipped,
            "forwarded workflow event stream"
        );
        Ok(report)
    }

    /// Decode the opaque data and translate. The update id, when the opaque
    /// data yields one, comes back with the result so failures can name it.
    fn translate_record(
        &self,
        record: &UpdateEventRecord,
    ) -> (Option<UpdateId>, Result<JobUpdateEvent>) {
        let context = match OpaqueContext::decode(&record.opaque_data) {
            Ok(context) => context,
            Err(source) => {
                let err = TranslateError::StatusMapping {
                    state: record.event.state,
                    source,
                };
                return (None, Err(err.into()));
            }
        };

        let result = self.translator.translate(&record.event, &context);
        if let Ok(event) = &result {
            if event.status.is_terminal() {
                tracing::debug!(
                    update_id = context.update_id.as_ref().map(UpdateId::as_str),
                    status = %event.status,
                    "update reached terminal status"
                );
            }
        }
        (context.update_id, result.map_err(Error::from))
    }

    fn decode_and_translate(&self, line: &[u8]) -> (Option<UpdateId>, Result<JobUpdateEvent>) {
        let text = match std::str::from_utf8(line) {
            Ok(text) => text,
            Err(e) => {
                let err = Error::validation(format!("record is not valid UTF-8: {}", e));
                return (None, Err(err));
            }
        };
        match serde_json::from_str::<UpdateEventRecord>(text) {
            Ok(record) => self.translate_record(&record),
            Err(e) => (None, Err(e.into())),
        }
    }

    fn on_failure(&self, index: usize, update_id: Option<&UpdateId>, err: Error) -> Result<()> {
        match self.config.on_error {
            ErrorPolicy::Skip => {
                tracing::warn!(
                    record = index,
                    update_id = update_id.map(UpdateId::as_str),
                    code = err.error_code(),
                    error = %err,
                    "skipping un-forwardable workflow event"
                );
                Ok(())
            }
            ErrorPolicy::Abort => Err(err),
        }
    }
}

fn oversized(limit: usize) -> Error {
    Error::validation(format!("record exceeds {} bytes", limit))
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

/// Consume input through the next newline without keeping it.
fn discard_line<R: BufRead>(reader: &mut R) -> io::Result<()> {
    loop {
        let available = match reader.fill_buf() {
            Ok(available) => available,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        if available.is_empty() {
            return Ok(());
        }
        match available.iter().position(|&b| b == b'\n') {
            Some(pos) => {
                reader.consume(pos + 1);
                return Ok(());
            }
            None => {
                let len = available.len();
                reader.consume(len);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::legacy::JobUpdateStatus;
    use crate::types::TranslateError;
    use crate::workflow::WorkflowState;
    use pretty_assertions::assert_eq;
    use tracing_test::traced_test;

    fn forwarder(on_error: ErrorPolicy) -> EventForwarder<
        crate::events::DefaultStatusMapper,
        crate::events::Rfc3339Parser,
    > {
        EventForwarder::new(
            EventTranslator::new(),
            ForwardingConfig {
                on_error,
                ..ForwardingConfig::default()
            },
        )
    }

    fn record(state: WorkflowState, timestamp: &str, opaque: &str) -> UpdateEventRecord {
        UpdateEventRecord {
            event: WorkflowEvent::new(state, timestamp),
            opaque_data: opaque.to_string(),
        }
    }

    #[test]
    #[traced_test]
    fn test_skip_policy_keeps_order_and_logs() {
        let records = vec![
            record(WorkflowState::RollingForward, "2019-05-01T12:34:56Z", ""),
            record(WorkflowState::Invalid, "2019-05-01T12:34:57Z", ""),
            record(
                WorkflowState::Succeeded,
                "2019-05-01T12:34:58Z",
                r#"{"update_actions": ["rollback"]}"#,
            ),
        ];

        let events = forwarder(ErrorPolicy::Skip).forward_all(records).unwrap();

        assert_eq!(
            events,
            vec![
                JobUpdateEvent {
                    status: JobUpdateStatus::RollingForward,
                    timestamp_ms: 1_556_714_096_000,
                },
                JobUpdateEvent {
                    status: JobUpdateStatus::RolledBack,
                    timestamp_ms: 1_556_714_098_000,
                },
            ]
        );
        assert!(logs_contain("skipping un-forwardable workflow event"));
        assert!(logs_contain("INVALID_ARGUMENT"));
    }

    #[test]
    fn test_abort_policy_returns_first_error() {
        let records = vec![
            record(WorkflowState::Paused, "bad", ""),
            record(WorkflowState::Invalid, "2019-05-01T12:34:56Z", ""),
        ];

        let err = forwarder(ErrorPolicy::Abort).forward_all(records).unwrap_err();
        assert!(matches!(
            err,
            Error::Translate(TranslateError::TimestampParse { .. })
        ));
    }

    #[test]
    fn test_forward_lines() {
        let input = concat!(
            r#"{"event": {"type": "WORKFLOW_TYPE_UPDATE", "state": "WORKFLOW_STATE_PAUSED", "timestamp": "1970-01-01T00:00:00.0019Z"}}"#,
            "\n",
            "\n",
            "not json\n",
            r#"{"event": {"state": "WORKFLOW_STATE_ABORTED", "timestamp": "1970-01-01T00:00:01Z"}, "opaque_data": "{\"update_actions\": [\"mark_failed\"]}"}"#,
            "\n",
        );
        let mut output = Vec::new();

        let report = forwarder(ErrorPolicy::Skip)
            .forward_lines(input.as_bytes(), &mut output)
            .unwrap();

        assert_eq!(report, ForwardReport { forwarded: 2, skipped: 1 });
        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![
                serde_json::json!({"status": "ROLL_FORWARD_PAUSED", "timestampMs": 1}),
                serde_json::json!({"status": "FAILED", "timestampMs": 1000}),
            ]
        );
    }

    #[test]
    fn test_oversized_line_rejected() {
        let forwarder = EventForwarder::new(
            EventTranslator::new(),
            ForwardingConfig {
                on_error: ErrorPolicy::Abort,
                max_line_bytes: 16,
            },
        );
        let input = r#"{"event": {"state": "WORKFLOW_STATE_PAUSED", "timestamp": "1970-01-01T00:00:00Z"}}"#;

        let err = forwarder
            .forward_lines(input.as_bytes(), Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    fn paused_line() -> &'static str {
        r#"{"event": {"state": "WORKFLOW_STATE_PAUSED", "timestamp": "1970-01-01T00:00:00Z"}}"#
    }

    #[test]
    #[traced_test]
    fn test_invalid_utf8_line_skipped() {
        let mut input = b"\xff\xfe\n".to_vec();
        input.extend_from_slice(paused_line().as_bytes());
        input.push(b'\n');
        let mut output = Vec::new();

        let report = forwarder(ErrorPolicy::Skip)
            .forward_lines(input.as_slice(), &mut output)
            .unwrap();

        assert_eq!(report, ForwardReport { forwarded: 1, skipped: 1 });
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("ROLL_FORWARD_PAUSED"), "{output}");
        assert!(logs_contain("not valid UTF-8"));
    }

    #[test]
    fn test_invalid_utf8_line_aborts_under_abort() {
        let err = forwarder(ErrorPolicy::Abort)
            .forward_lines(&b"\xff\n"[..], Vec::new())
            .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn test_oversized_line_skipped_and_drained() {
        let forwarder = EventForwarder::new(
            EventTranslator::new(),
            ForwardingConfig {
                on_error: ErrorPolicy::Skip,
                max_line_bytes: 128,
            },
        );
        let mut input = vec![b'x'; 10_000];
        input.push(b'\n');
        input.extend_from_slice(paused_line().as_bytes());
        input.extend_from_slice(b"\r\n");
        // Small buffer so the oversized remainder spans many refills.
        let reader = std::io::BufReader::with_capacity(16, input.as_slice());
        let mut output = Vec::new();

        let report = forwarder.forward_lines(reader, &mut output).unwrap();

        assert_eq!(report, ForwardReport { forwarded: 1, skipped: 1 });
        let lines: Vec<serde_json::Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(
            lines,
            vec![serde_json::json!({"status": "ROLL_FORWARD_PAUSED", "timestampMs": 0})]
        );
    }

    #[test]
    fn test_line_at_limit_accepted() {
        let line = paused_line();
        let forwarder = EventForwarder::new(
            EventTranslator::new(),
            ForwardingConfig {
                on_error: ErrorPolicy::Abort,
                max_line_bytes: line.len(),
            },
        );
        let input = format!("{line}\r\n{line}");

        let report = forwarder
            .forward_lines(input.as_bytes(), Vec::new())
            .unwrap();
        assert_eq!(report, ForwardReport { forwarded: 2, skipped: 0 });
    }

    #[test]
    #[traced_test]
    fn test_skip_warning_names_update() {
        let records = vec![record(
            WorkflowState::Invalid,
            "2019-05-01T12:34:56Z",
            r#"{"update_id": "upd-7", "update_actions": ["pulse"]}"#,
        )];

        let events = forwarder(ErrorPolicy::Skip).forward_all(records).unwrap();

        assert!(events.is_empty());
        assert!(logs_contain("upd-7"));
    }
}
