//! Form session
//!
//! A [`FormSession`] owns the scalar fields, the staging store and the submission
//! status of one form. Status moves `idle -> loading -> success | error`; an
//! errored session may submit again, a successful one may not. `submit` takes
//! `&mut self` for the whole network call, so a session never has two
//! submissions in flight. A submission whose future is dropped before the
//! endpoint answers leaves the session in `error`, never stuck in `loading`.

use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{IntakeError, IntakeResult};
use crate::file_source::FileSource;
use crate::models::{AttachmentId, Catalog, Draft, FormFields, RawFile};
use crate::payload::MultipartPayload;
use crate::staging::StagingStore;
use crate::transport::{SubmissionTransport, TransportError};

/// Fallback message when a failure carries no message of its own.
pub const GENERIC_SUBMIT_ERROR: &str = "An error occurred while submitting.";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "message", rename_all = "lowercase")]
pub enum SubmitStatus {
    Idle,
    Loading,
    Success,
    Error(String),
}

impl SubmitStatus {
    pub fn error_message(&self) -> Option<&str> {
        match self {
            SubmitStatus::Error(msg) => Some(msg),
            _ => None,
        }
    }

    /// Whether a new submission may start from this state.
    pub fn can_submit(&self) -> bool {
        matches!(self, SubmitStatus::Idle | SubmitStatus::Error(_))
    }
}

/// Confirmation of a successful submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub reference_id: String,
    pub submitted_at: DateTime<Utc>,
    pub file_count: usize,
    pub total_bytes: u64,
}

impl Receipt {
    fn new(file_count: usize, total_bytes: u64) -> Self {
        let submitted_at = Utc::now();
        Self {
            reference_id: reference_id(submitted_at),
            submitted_at,
            file_count,
            total_bytes,
        }
    }
}

/// Epoch milliseconds in upper-case base 36.
pub fn reference_id(at: DateTime<Utc>) -> String {
    const DIGITS: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    let mut n = at.timestamp_millis().max(0) as u64;
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn failure_message(err: &TransportError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        GENERIC_SUBMIT_ERROR.to_string()
    } else {
        message
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    /// Block submission until company and primary uploader name are filled.
    pub require_identity: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            require_identity: true,
        }
    }
}

#[derive(Debug)]
pub struct FormSession {
    catalog: Arc<Catalog>,
    fields: FormFields,
    staging: StagingStore,
    status: SubmitStatus,
    receipt: Option<Receipt>,
    options: SessionOptions,
}

impl FormSession {
    pub fn new(catalog: Arc<Catalog>, options: SessionOptions) -> Self {
        let staging = StagingStore::new(&catalog);
        Self {
            catalog,
            fields: FormFields::default(),
            staging,
            status: SubmitStatus::Idle,
            receipt: None,
            options,
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn fields(&self) -> &FormFields {
        &self.fields
    }

    pub fn set_fields(&mut self, fields: FormFields) {
        self.fields = fields;
    }

    pub fn staging(&self) -> &StagingStore {
        &self.staging
    }

    pub fn status(&self) -> &SubmitStatus {
        &self.status
    }

    /// Set once the session has submitted successfully.
    pub fn receipt(&self) -> Option<&Receipt> {
        self.receipt.as_ref()
    }

    pub fn add_files(
        &mut self,
        section_key: &str,
        files: impl IntoIterator<Item = RawFile>,
    ) -> IntakeResult<Vec<AttachmentId>> {
        self.staging.add_files(section_key, files)
    }

    pub fn remove_file(&mut self, section_key: &str, id: AttachmentId) -> IntakeResult<bool> {
        self.staging.remove_file(section_key, id)
    }

    /// Ask `source` for files and stage them under `section_key`.
    pub async fn stage_from(
        &mut self,
        section_key: &str,
        source: &dyn FileSource,
    ) -> IntakeResult<Vec<AttachmentId>> {
        if !self.staging.contains_section(section_key) {
            return Err(IntakeError::UnknownSection(section_key.to_string()));
        }
        let files = source.request_files().await?;
        self.staging.add_files(section_key, files)
    }

    pub fn total_count(&self) -> usize {
        self.staging.total_count()
    }

    /// Clear an error message; the form stays as it was.
    pub fn dismiss_error(&mut self) {
        if matches!(self.status, SubmitStatus::Error(_)) {
            self.transition(SubmitStatus::Idle);
        }
    }

    /// Snapshot the scalar fields and staged file names.
    pub fn to_draft(&self) -> Draft {
        Draft::new(self.fields.clone(), self.staging.file_names())
    }

    /// Reapply a draft's scalar fields. Staged attachments are left alone.
    pub fn apply_draft(&mut self, draft: &Draft) {
        self.fields = draft.fields.clone();
        tracing::debug!(
            saved_at = %draft.saved_at,
            draft_file_names = draft.file_count(),
            "Restored form fields from draft"
        );
    }

    /// Encode the session and send it through `transport`, once.
    ///
    /// Staged attachments are kept on failure so the user can resubmit.
    pub async fn submit(&mut self, transport: &dyn SubmissionTransport) -> IntakeResult<Receipt> {
        match self.status {
            SubmitStatus::Success => return Err(IntakeError::AlreadySubmitted),
            SubmitStatus::Loading => return Err(IntakeError::SubmissionInFlight),
            SubmitStatus::Idle | SubmitStatus::Error(_) => {}
        }

        if self.options.require_identity {
            if let Err(message) = self.fields.validate_identity() {
                tracing::debug!(error = %message, "Submission blocked by validation");
                self.transition(SubmitStatus::Error(message.clone()));
                return Err(IntakeError::Validation(message));
            }
        }

        let payload = match MultipartPayload::encode(&self.fields, &self.staging) {
            Ok(payload) => payload,
            Err(err) => {
                self.transition(SubmitStatus::Error(GENERIC_SUBMIT_ERROR.to_string()));
                return Err(err);
            }
        };
        let file_count = payload.file_count();
        let total_bytes = payload.file_bytes();

        let in_flight = InFlight::start(&mut self.status);
        let start = Instant::now();

        match transport.send(payload).await {
            Ok(()) => {
                let receipt = Receipt::new(file_count, total_bytes);
                tracing::info!(
                    reference_id = %receipt.reference_id,
                    file_count,
                    total_bytes,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission accepted"
                );
                self.receipt = Some(receipt.clone());
                in_flight.settle(SubmitStatus::Success);
                Ok(receipt)
            }
            Err(err) => {
                let message = failure_message(&err);
                tracing::warn!(
                    error = %message,
                    file_count,
                    duration_ms = start.elapsed().as_secs_f64() * 1000.0,
                    "Submission failed"
                );
                in_flight.settle(SubmitStatus::Error(message.clone()));
                Err(IntakeError::Submission(message))
            }
        }
    }

    fn transition(&mut self, next: SubmitStatus) {
        set_status(&mut self.status, next);
    }
}

fn set_status(status: &mut SubmitStatus, next: SubmitStatus) {
    tracing::debug!(from = ?status, to = ?next, "Submit status transition");
    *status = next;
}

/// Keeps the status at `loading` while a send is pending.
///
/// If the submit future is dropped before the send settles (timeout, task
/// abort), the status becomes `error` so the form can be submitted again.
struct InFlight<'a> {
    status: &'a mut SubmitStatus,
    settled: bool,
}

impl<'a> InFlight<'a> {
    fn start(status: &'a mut SubmitStatus) -> Self {
        set_status(status, SubmitStatus::Loading);
        Self {
            status,
            settled: false,
        }
    }

    fn settle(mut self, next: SubmitStatus) {
        set_status(self.status, next);
        self.settled = true;
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.settled {
            tracing::warn!("Submission abandoned before the endpoint answered");
            set_status(self.status, SubmitStatus::Error(GENERIC_SUBMIT_ERROR.to_string()));
        }
    }
}
