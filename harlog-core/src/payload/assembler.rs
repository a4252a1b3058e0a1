use crate::capture::{BodyReadError, CapturedRequest, CapturedResponse};
use crate::conf::MetricsOptions;
use crate::har::{
    Creator, HarCache, HarEntry, HarLog, HarTimings, LogEntry, PAYLOAD_VERSION,
};
use crate::payload::{LogContext, PayloadError};
use crate::redaction::{FieldFilter, RedactionConfig};
use crate::serialize::{RequestHead, ResponseHead};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::net::{IpAddr, Ipv4Addr};
use tracing::{debug, warn};

/// Builds one [`LogEntry`] per request/response cycle.
///
/// The assembler holds only immutable configuration and can be shared by every
/// concurrent request.
#[derive(Debug, Clone)]
pub struct PayloadAssembler {
    filter: FieldFilter,
    is_development: bool,
    creator: Creator,
}

impl PayloadAssembler {
    pub fn new(redaction: &RedactionConfig, is_development: bool) -> Self {
        Self {
            filter: redaction.filter(),
            is_development,
            creator: Creator::process().clone(),
        }
    }

    pub fn from_options(options: &MetricsOptions) -> Self {
        Self::new(&options.redaction, options.is_development)
    }

    /// Replaces the process-wide creator block.
    pub fn with_creator(mut self, creator: Creator) -> Self {
        self.creator = creator;
        self
    }

    pub fn creator(&self) -> &Creator {
        &self.creator
    }

    /// Runs the full pipeline.
    ///
    /// Heads (headers, query, URL) are computed before either body is awaited.
    /// A body that fails to read is logged and recorded as absent; only a missing
    /// API key aborts, and it does so before the request is inspected at all.
    pub async fn assemble<Req, Res>(
        &self,
        ctx: LogContext,
        req: &mut Req,
        res: &mut Res,
    ) -> Result<LogEntry, PayloadError>
    where
        Req: CapturedRequest + ?Sized,
        Res: CapturedResponse + ?Sized,
    {
        let group = ctx.group.to_group()?;
        let id = ctx.id.unwrap_or_default();

        let request_head = RequestHead::capture(&*req, ctx.log_path.as_deref(), &self.filter);
        let response_head = ResponseHead::capture(&*res, &self.filter);
        let client_address = req
            .client_addr()
            .unwrap_or(IpAddr::V4(Ipv4Addr::UNSPECIFIED))
            .to_string();

        let request_body = read_body(req.body().await, "request");
        let response_body = read_body(res.body().await, "response");

        let request = request_head.into_record(request_body.as_ref(), &self.filter);
        let response = response_head.into_record(response_body.as_ref(), &self.filter);
        let time = duration_ms(ctx.started_at, ctx.finished_at);

        debug!(
            id = %id,
            method = %request.method,
            url = %request.url,
            status = response.status,
            time,
            "assembled log entry"
        );

        let entry = HarEntry {
            pageref: request.url.clone(),
            started_date_time: ctx.started_at,
            time,
            request,
            response,
            cache: HarCache::default(),
            timings: HarTimings {
                wait: time,
                receive: 0,
            },
        };

        Ok(LogEntry {
            id: id.0,
            version: PAYLOAD_VERSION,
            group,
            client_address,
            development: self.is_development,
            request: HarLog::single(self.creator.clone(), entry),
        })
    }
}

fn read_body(result: Result<Bytes, BodyReadError>, side: &'static str) -> Option<Bytes> {
    match result {
        Ok(bytes) => Some(bytes),
        Err(error) => {
            warn!(%error, side, "body could not be read; logging without it");
            None
        }
    }
}

/// Elapsed milliseconds, clamped to zero when the timestamps are inverted.
pub(crate) fn duration_ms(started_at: DateTime<Utc>, finished_at: DateTime<Utc>) -> u64 {
    let elapsed = (finished_at - started_at).num_milliseconds();
    match u64::try_from(elapsed) {
        Ok(ms) => ms,
        Err(_) => {
            warn!(
                started_at = %started_at,
                finished_at = %finished_at,
                "finish time precedes start time; clamping duration to 0"
            );
            0
        }
    }
}
