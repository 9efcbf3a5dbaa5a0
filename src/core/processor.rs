//! File processor - runs one pipeline stage for one base name
//!
//! An invocation fetches everything it needs, transforms in memory and
//! publishes its output with a single `put`. Any error before the `put`
//! means nothing was written.

use crate::adapters::storage::ObjectStore;
use crate::config::VeilConfig;
use crate::core::event::{route, ObjectEvent, Route};
use crate::domain::{BaseName, PiiColumnSet, Result, VeilError};
use crate::pipeline::audit::AuditLogger;
use crate::pipeline::detokenize::{detokenize, DetokenizeOptions};
use crate::pipeline::encoder::{Base64Codec, TokenCodec};
use crate::pipeline::masking::{FieldKinds, MaskRegistry};
use crate::pipeline::report::{Stage, StageReport};
use crate::pipeline::tokenize::tokenize;
use crate::pipeline::{codec, dialect};
use futures::future::join_all;
use std::sync::Arc;
use std::time::Instant;
use tracing::Instrument;
use uuid::Uuid;

/// Result of one event record
#[derive(Debug)]
pub struct EventOutcome {
    pub key: String,
    /// `Ok(None)` when the key is not a trigger object
    pub result: Result<Option<StageReport>>,
}

impl EventOutcome {
    pub fn is_failure(&self) -> bool {
        self.result.is_err()
    }
}

/// Runs tokenization and detokenization against one object store
#[derive(Clone)]
pub struct FileProcessor {
    store: Arc<dyn ObjectStore>,
    codec: Arc<dyn TokenCodec>,
    registry: MaskRegistry,
    kinds: FieldKinds,
    masking_default: bool,
    dry_run: bool,
    audit: Option<Arc<AuditLogger>>,
}

impl FileProcessor {
    /// Processor with the Base64 codec, built-in masks and masking enabled
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            codec: Arc::new(Base64Codec::new()),
            registry: MaskRegistry::with_defaults(),
            kinds: FieldKinds::default(),
            masking_default: true,
            dry_run: false,
            audit: None,
        }
    }

    /// Processor configured from the `[application]`, `[masking]` and `[audit]` sections
    ///
    /// # Errors
    ///
    /// Returns [`VeilError::Configuration`] if the audit log cannot be opened.
    pub fn from_config(config: &VeilConfig, store: Arc<dyn ObjectStore>) -> Result<Self> {
        let audit = if config.audit.enabled {
            let logger = AuditLogger::new(config.audit.log_path.clone(), config.audit.json_format)
                .map_err(|e| VeilError::Configuration(format!("Failed to open audit log: {e:#}")))?;
            Some(Arc::new(logger))
        } else {
            None
        };

        Ok(Self::new(store)
            .with_field_kinds(FieldKinds::from_aliases(&config.masking.field_kinds))
            .with_masking_default(config.masking.enabled)
            .with_dry_run(config.application.dry_run)
            .with_audit(audit))
    }

    pub fn with_codec(mut self, codec: Arc<dyn TokenCodec>) -> Self {
        self.codec = codec;
        self
    }

    pub fn with_registry(mut self, registry: MaskRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn with_field_kinds(mut self, kinds: FieldKinds) -> Self {
        self.kinds = kinds;
        self
    }

    /// Masking flag used by event-driven detokenization
    pub fn with_masking_default(mut self, enabled: bool) -> Self {
        self.masking_default = enabled;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_audit(mut self, audit: Option<Arc<AuditLogger>>) -> Self {
        self.audit = audit;
        self
    }

    /// Same settings against another store
    pub fn with_store(&self, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            store,
            ..self.clone()
        }
    }

    pub fn store(&self) -> &Arc<dyn ObjectStore> {
        &self.store
    }

    pub fn masking_default(&self) -> bool {
        self.masking_default
    }

    pub fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    /// Tokenize `raw/{B}.csv` into `tokenized/{B}_tokenized.csv`
    ///
    /// # Errors
    ///
    /// Returns a fatal error (metadata, dialect, structural or storage); no
    /// output is written in that case.
    pub async fn tokenize_file(&self, base: &BaseName) -> Result<StageReport> {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "tokenize",
            invocation_id = %invocation_id,
            base_name = %base,
            store = %self.store.name()
        );
        self.run_tokenize(invocation_id, base)
            .instrument(span)
            .await
            .inspect_err(|e| crate::log_error_with_context!(e, "Tokenization failed"))
    }

    /// Detokenize `tokenized/{B}_tokenized.csv` into `detokenized/{B}_detokenized.csv`
    ///
    /// Undecodable cells keep their token and are listed in the report.
    pub async fn detokenize_file(
        &self,
        base: &BaseName,
        masking_enabled: bool,
    ) -> Result<StageReport> {
        let invocation_id = Uuid::new_v4();
        let span = tracing::info_span!(
            "detokenize",
            invocation_id = %invocation_id,
            base_name = %base,
            store = %self.store.name()
        );
        self.run_detokenize(invocation_id, base, masking_enabled)
            .instrument(span)
            .await
            .inspect_err(|e| crate::log_error_with_context!(e, "Detokenization failed"))
    }

    /// Process every record of an event concurrently
    ///
    /// Records are processed against this processor's store regardless of
    /// the bucket they name; callers split multi-bucket events.
    pub async fn handle_event(&self, event: &ObjectEvent) -> Vec<EventOutcome> {
        let tasks = event.records.iter().map(|record| async move {
            let result = match route(&record.key) {
                Route::Tokenize(base) => self.tokenize_file(&base).await.map(Some),
                Route::Detokenize(base) => self
                    .detokenize_file(&base, self.masking_default)
                    .await
                    .map(Some),
                Route::Ignore => {
                    tracing::info!(key = %record.key, bucket = %record.bucket, "Ignoring object");
                    Ok(None)
                }
            };
            EventOutcome {
                key: record.key.clone(),
                result,
            }
        });
        join_all(tasks).await
    }

    async fn run_tokenize(&self, invocation_id: Uuid, base: &BaseName) -> Result<StageReport> {
        let start = Instant::now();
        crate::log_stage_start!(Stage::Tokenize, base);

        let pii = self.load_pii_columns(base).await?;
        let raw = self.get_text(&base.raw_key()).await?;

        let delimiter = dialect::sniff(&raw)?;
        let table = codec::parse(&raw, delimiter)?;
        let columns = table.column_count();

        let (tokenized, stats) = tokenize(table, &pii, self.codec.as_ref())?;
        if !stats.unmatched_columns.is_empty() {
            tracing::debug!(columns = ?stats.unmatched_columns, "PII columns not in header");
        }
        let body = codec::serialize(&tokenized, delimiter)?;

        let output_key = base.tokenized_key();
        self.publish(&output_key, body).await?;

        let mut report = StageReport::new(invocation_id, Stage::Tokenize, base.as_str());
        report.output_key = output_key;
        report.delimiter = delimiter.to_string();
        report.rows = stats.rows;
        report.columns = columns;
        report.cells_transformed = stats.cells_encoded;
        report.unmatched_pii_columns = stats.unmatched_columns;
        report.dry_run = self.dry_run;
        report.duration_ms = elapsed_ms(start);

        self.finish(&report);
        Ok(report)
    }

    async fn run_detokenize(
        &self,
        invocation_id: Uuid,
        base: &BaseName,
        masking_enabled: bool,
    ) -> Result<StageReport> {
        let start = Instant::now();
        crate::log_stage_start!(Stage::Detokenize, base);

        let pii = self.load_pii_columns(base).await?;
        let text = self.get_text(&base.tokenized_key()).await?;

        let delimiter = dialect::sniff(&text)?;
        let table = codec::parse(&text, delimiter)?;
        let columns = table.column_count();

        let options = DetokenizeOptions {
            masking_enabled,
            codec: self.codec.as_ref(),
            registry: &self.registry,
            kinds: &self.kinds,
        };
        let output = detokenize(table, &pii, options)?;
        let body = codec::serialize(&output.table, delimiter)?;

        let output_key = base.detokenized_key();
        self.publish(&output_key, body).await?;

        let mut report = StageReport::new(invocation_id, Stage::Detokenize, base.as_str());
        report.output_key = output_key;
        report.delimiter = delimiter.to_string();
        report.rows = output.table.row_count();
        report.columns = columns;
        report.cells_transformed = output.cells_decoded;
        report.cells_masked = output.cells_masked;
        report.decode_failures = output.failures;
        report.unmatched_pii_columns = output.unmatched_columns;
        report.masking_enabled = masking_enabled;
        report.dry_run = self.dry_run;
        report.duration_ms = elapsed_ms(start);

        if report.has_decode_failures() {
            tracing::warn!(
                decode_failures = report.decode_failures.len(),
                "Some cells kept their tokens"
            );
        }

        self.finish(&report);
        Ok(report)
    }

    /// Fetch and parse `metadata/{B}_pii_fields.json`
    async fn load_pii_columns(&self, base: &BaseName) -> Result<PiiColumnSet> {
        let key = base.metadata_key();
        let bytes = self
            .store
            .get(&key)
            .await
            .map_err(|e| VeilError::MetadataUnavailable(format!("{key}: {e}")))?;
        let pii = PiiColumnSet::from_json_bytes(&bytes)?;
        tracing::debug!(key = %key, pii_columns = pii.len(), "PII metadata loaded");
        Ok(pii)
    }

    async fn get_text(&self, key: &str) -> Result<String> {
        let bytes = self.store.get(key).await?;
        String::from_utf8(bytes)
            .map_err(|_| VeilError::Structural(format!("{key} is not valid UTF-8")))
    }

    async fn publish(&self, key: &str, body: String) -> Result<()> {
        if self.dry_run {
            tracing::info!(key = %key, bytes = body.len(), "Dry run: output not written");
            return Ok(());
        }
        self.store.put(key, body.into_bytes()).await
    }

    fn finish(&self, report: &StageReport) {
        crate::log_stage_complete!(report);
        if let Some(audit) = &self.audit {
            if let Err(e) = audit.log_report(report) {
                tracing::warn!(error = %e, "Failed to write audit entry");
            }
        }
    }
}

fn elapsed_ms(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}
