use chrono::Utc;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use toypad_catalog::CatalogLookup;
use toypad_core::{Result, TagUid};
use toypad_hardware::TagReader;
use toypad_tag::{
    CharacterIdDerivation, IdResolver, KeyDerivation, ScrambleKeyDerivation, TeaCharacterCipher,
    classify,
};
use tracing::{debug, info, trace, warn};

use crate::config::ScannerConfig;
use crate::event::{CycleOutcome, ScanEvent, ScanFailure, ScanStats, TagReport};
use crate::state_machine::{ScanState, StateMachine, StateTransition};

/// Polls a reader and turns each new figurine into a [`TagReport`].
///
/// The scanner remembers the last tag it processed so that a figurine left
/// on the pad is reported once, not on every poll. Removing the tag (a poll
/// that finds nothing) or a failed cycle clears that memory, so the same
/// figurine is processed again when placed back.
///
/// Key and id derivation are pluggable for other tag generations; the
/// defaults implement the current vendor scheme.
///
/// # Examples
///
/// ```
/// use toypad_catalog::Catalog;
/// use toypad_core::TagUid;
/// use toypad_hardware::mock::MockReader;
/// use toypad_scanner::{CycleOutcome, Figurines, ScannerConfig, TagScanner};
///
/// #[tokio::main]
/// async fn main() -> toypad_core::Result<()> {
///     let (reader, handle) = MockReader::new();
///     let uid = TagUid::from_hex("04A1B2C3D4E5F6")?;
///     handle.place_tag(Figurines::default().character(uid, 1u32)).await;
///
///     let (mut scanner, _events) = TagScanner::new(reader, Catalog::builtin(), ScannerConfig::default());
///     match scanner.run_cycle().await? {
///         CycleOutcome::Reported(report) => {
///             assert_eq!(report.entry.unwrap().name, "Batman");
///         }
///         other => panic!("unexpected outcome: {other:?}"),
///     }
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct TagScanner<R, C, K = ScrambleKeyDerivation, D = TeaCharacterCipher> {
    reader: R,
    catalog: C,
    keys: K,
    resolver: IdResolver<D>,
    config: ScannerConfig,
    machine: StateMachine,
    last_uid: Option<TagUid>,
    events: mpsc::UnboundedSender<ScanEvent>,
}

impl<R, C> TagScanner<R, C>
where
    R: TagReader,
    C: CatalogLookup,
{
    /// Create a scanner using the default vendor derivations.
    ///
    /// Returns the scanner and the receiving end of its event stream. The
    /// receiver may be dropped; events are then discarded.
    pub fn new(
        reader: R,
        catalog: C,
        config: ScannerConfig,
    ) -> (Self, mpsc::UnboundedReceiver<ScanEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let scanner = Self {
            reader,
            catalog,
            keys: ScrambleKeyDerivation::default(),
            resolver: IdResolver::default(),
            config,
            machine: StateMachine::new(),
            last_uid: None,
            events,
        };
        (scanner, rx)
    }
}

impl<R, C, K, D> TagScanner<R, C, K, D>
where
    R: TagReader,
    C: CatalogLookup,
    K: KeyDerivation,
    D: CharacterIdDerivation,
{
    /// Replace the password derivation.
    pub fn with_key_derivation<K2: KeyDerivation>(self, keys: K2) -> TagScanner<R, C, K2, D> {
        TagScanner {
            reader: self.reader,
            catalog: self.catalog,
            keys,
            resolver: self.resolver,
            config: self.config,
            machine: self.machine,
            last_uid: self.last_uid,
            events: self.events,
        }
    }

    /// Replace the character id derivation.
    pub fn with_id_resolver<D2: CharacterIdDerivation>(
        self,
        resolver: IdResolver<D2>,
    ) -> TagScanner<R, C, K, D2> {
        TagScanner {
            reader: self.reader,
            catalog: self.catalog,
            keys: self.keys,
            resolver,
            config: self.config,
            machine: self.machine,
            last_uid: self.last_uid,
            events: self.events,
        }
    }

    pub fn state(&self) -> ScanState {
        self.machine.current_state()
    }

    /// Last tag processed, if it has not been removed since.
    pub fn last_uid(&self) -> Option<TagUid> {
        self.last_uid
    }

    pub fn config(&self) -> &ScannerConfig {
        &self.config
    }

    /// Recent state transitions, most recent last.
    pub fn recent_transitions(&self, count: usize) -> Vec<StateTransition> {
        self.machine.last_transitions(count)
    }

    /// Run one poll of the reader and process whatever it finds.
    ///
    /// Does not sleep. Reader and decoding failures are returned as
    /// [`CycleOutcome::Failed`], not as errors.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidStateTransition` only if the scan cycle
    /// itself is broken.
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        self.machine.enter(ScanState::Detecting)?;

        let uid = match self.reader.detect_target().await {
            Ok(Some(uid)) => uid,
            Ok(None) => {
                if let Some(previous) = self.last_uid.take() {
                    debug!(uid = %previous, "tag removed");
                }
                return Ok(CycleOutcome::NoTarget);
            }
            Err(err) => return self.fail(ScanFailure::from_hardware(None, &err)),
        };

        if self.last_uid == Some(uid) {
            trace!(%uid, "tag still in field");
            self.machine.enter(ScanState::CoolDown)?;
            return Ok(CycleOutcome::Debounced(uid));
        }

        let detected_at = Utc::now();
        self.last_uid = Some(uid);
        info!(%uid, "tag detected");
        self.emit(ScanEvent::Detected { uid });

        self.machine.enter(ScanState::Authenticating)?;
        let key = self.keys.derive_key(&uid);
        debug!(%uid, %key, "authentication key derived");
        if let Err(err) = self.reader.authenticate(&uid, &key).await {
            return self.fail(ScanFailure::from_hardware(Some(uid), &err));
        }

        self.machine.enter(ScanState::Reading)?;
        let payload = match self
            .reader
            .read_payload(&uid, self.config.payload_page)
            .await
        {
            Ok(payload) => payload,
            Err(err) => return self.fail(ScanFailure::from_hardware(Some(uid), &err)),
        };
        trace!(%uid, payload = ?payload.as_bytes(), "payload read");

        self.machine.enter(ScanState::Classifying)?;
        let kind = classify(&payload);
        let id = match self.resolver.resolve(kind, &uid, &payload) {
            Ok(id) => id,
            Err(err) => return self.fail(ScanFailure::from_tag(uid, &err)),
        };
        debug!(%uid, %kind, %id, "tag classified");
        self.emit(ScanEvent::Classified { uid, kind, id });

        self.machine.enter(ScanState::Reporting)?;
        let entry = self.catalog.resolve(kind, id);
        match &entry {
            Some(entry) => {
                info!(%uid, %kind, %id, name = %entry.name, world = %entry.world, "tag resolved");
                self.emit(ScanEvent::Resolved {
                    uid,
                    kind,
                    entry: entry.clone(),
                });
            }
            None => {
                warn!(%uid, %kind, %id, "id not in catalog");
                self.emit(ScanEvent::Unresolved { uid, kind, id });
            }
        }

        self.machine.enter(ScanState::CoolDown)?;
        Ok(CycleOutcome::Reported(TagReport {
            uid,
            kind,
            id,
            entry,
            detected_at,
        }))
    }

    /// Poll until `cancel` fires.
    ///
    /// Sleeps between cycles according to the outcome: the poll interval
    /// when the field was empty, the settle interval after a tag was
    /// reported or debounced, and the failure backoff after a failed cycle.
    /// Cancellation is honoured during sleeps and before each poll, never
    /// in the middle of a tag exchange.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` without polling if the configuration is
    /// invalid, and propagates errors from [`run_cycle`](Self::run_cycle).
    pub async fn run(&mut self, cancel: CancellationToken) -> Result<ScanStats> {
        self.config.validate()?;

        info!(
            poll_ms = u64::try_from(self.config.poll_interval.as_millis()).unwrap_or(u64::MAX),
            page = self.config.payload_page,
            "scanner started"
        );

        let mut stats = ScanStats::default();
        while !cancel.is_cancelled() {
            let outcome = self.run_cycle().await?;
            stats.record(&outcome);

            let pause = match outcome {
                CycleOutcome::NoTarget => self.config.poll_interval,
                CycleOutcome::Debounced(_) | CycleOutcome::Reported(_) => {
                    self.config.settle_interval
                }
                CycleOutcome::Failed(_) => self.config.failure_backoff,
            };

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(pause) => {}
            }
        }

        info!(
            cycles = stats.cycles,
            reported = stats.reported,
            failures = stats.failures,
            "scanner stopped"
        );
        Ok(stats)
    }

    fn fail(&mut self, failure: ScanFailure) -> Result<CycleOutcome> {
        warn!(
            uid = ?failure.uid,
            kind = %failure.kind,
            state = %self.machine.current_state(),
            "scan failed: {}",
            failure.message
        );
        self.last_uid = None;
        self.machine.enter(ScanState::Idle)?;
        self.emit(ScanEvent::Failed(failure.clone()));
        Ok(CycleOutcome::Failed(failure))
    }

    fn emit(&self, event: ScanEvent) {
        // A dropped receiver just means nobody is listening.
        let _ = self.events.send(event);
    }
}
