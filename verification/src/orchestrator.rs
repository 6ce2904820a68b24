//! Verification workflow: ties registration, storage, face matching, and
//! camera capture into the student lifecycle.

use soulbound_facematch::FaceMatcher;
use soulbound_store::{SessionStore, StudentStore};
use soulbound_types::{CaptureDevice, Clock, Photo, StudentRecord, WalletAddress};

use crate::camera::capture_once;
use crate::error::{ValidationError, VerificationError};
use crate::outcomes::{CrossCheckReport, CrossCheckResult, ImageRole, VerificationOutcome};
use crate::registration::{DuplicatePolicy, RegistrationForm};
use crate::state::VerificationPhase;

/// Where a freshly connected wallet should go.
#[derive(Clone, Debug, PartialEq)]
pub enum Landing {
    /// The wallet has a record; show it.
    Registered(StudentRecord),
    /// No record; start registration for this address.
    Unregistered(WalletAddress),
}

/// The student verification workflow over a store, a face matcher, and a clock.
pub struct VerificationWorkflow<S, F, K> {
    store: S,
    matcher: F,
    clock: K,
    duplicates: DuplicatePolicy,
}

impl<S, F, K> VerificationWorkflow<S, F, K>
where
    S: StudentStore + SessionStore,
    F: FaceMatcher,
    K: Clock,
{
    pub fn new(store: S, matcher: F, clock: K) -> Self {
        Self {
            store,
            matcher,
            clock,
            duplicates: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicates = policy;
        self
    }

    pub fn duplicate_policy(&self) -> DuplicatePolicy {
        self.duplicates
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn matcher(&self) -> &F {
        &self.matcher
    }

    // ── Registration ────────────────────────────────────────────────────

    /// Register a student for the bound wallet (`Unregistered -> Pending`).
    ///
    /// On success the wallet becomes the active session address.
    pub fn register(
        &self,
        form: &RegistrationForm,
        wallet: Option<&WalletAddress>,
    ) -> Result<StudentRecord, VerificationError> {
        let record = form.validate(wallet, self.clock.now())?;
        let address = &record.wallet_address;

        if self.store.get_student(address)?.is_some() {
            match self.duplicates {
                DuplicatePolicy::Reject => {
                    return Err(VerificationError::AlreadyRegistered(address.clone()))
                }
                DuplicatePolicy::Append => {
                    tracing::warn!(wallet = %address, "appending duplicate registration");
                }
            }
        }

        self.store.append_student(&record)?;
        self.store.set_active_wallet(address)?;
        tracing::info!(wallet = %address, name = %record.name, "student registered");
        Ok(record)
    }

    // ── Lookup ──────────────────────────────────────────────────────────

    /// Existing-student check run right after a wallet connects.
    pub fn landing(&self, address: &WalletAddress) -> Result<Landing, VerificationError> {
        Ok(match self.lookup(address)? {
            Some(record) => Landing::Registered(record),
            None => Landing::Unregistered(address.clone()),
        })
    }

    /// The first record stored for `address`.
    pub fn lookup(&self, address: &WalletAddress) -> Result<Option<StudentRecord>, VerificationError> {
        Ok(self.store.get_student(address)?)
    }

    pub fn list(&self) -> Result<Vec<StudentRecord>, VerificationError> {
        Ok(self.store.list_students()?)
    }

    /// Delete every record and return how many there were. The active session
    /// is kept.
    ///
    /// The count is best effort: a list that no longer decodes is still
    /// cleared and reported as zero records.
    pub fn clear(&self) -> Result<usize, VerificationError> {
        let count = match self.store.student_count() {
            Ok(count) => count as usize,
            Err(error) => {
                tracing::warn!(%error, "clearing a record list that cannot be read");
                0
            }
        };
        self.store.clear_students()?;
        tracing::info!(count, "cleared all student records");
        Ok(count)
    }

    pub fn phase(&self, address: &WalletAddress) -> Result<VerificationPhase, VerificationError> {
        Ok(VerificationPhase::of(self.lookup(address)?.as_ref()))
    }

    // ── Verification ────────────────────────────────────────────────────

    fn verifiable(&self, address: &WalletAddress) -> Result<StudentRecord, VerificationError> {
        let record = self
            .lookup(address)?
            .ok_or_else(|| VerificationError::NotRegistered(address.clone()))?;
        if !VerificationPhase::of(Some(&record)).can_verify() {
            return Err(VerificationError::AlreadyVerified(address.clone()));
        }
        Ok(record)
    }

    /// Compare a live capture with the registered reference photo.
    ///
    /// A completed comparison is written back whether it matched or not, to
    /// the status fields of every record under the wallet.
    /// Every error path leaves the stored record untouched.
    pub async fn verify(
        &self,
        address: &WalletAddress,
        live_capture: &Photo,
    ) -> Result<VerificationOutcome, VerificationError> {
        let mut record = self.verifiable(address)?;
        if live_capture.is_empty() {
            return Err(ValidationError::NoLiveCapture.into());
        }

        let reference = self.matcher.detect_face(&record.photo).await?;
        let live = self.matcher.detect_face(live_capture).await?;
        if !reference.face_found() {
            return Err(VerificationError::NoFaceDetected(ImageRole::Reference));
        }
        if !live.face_found() {
            return Err(VerificationError::NoFaceDetected(ImageRole::LiveCapture));
        }

        let comparison = self
            .matcher
            .compare_faces(&record.photo, live_capture)
            .await?;
        let mock = reference.mock || live.mock || comparison.mock;
        let confidence = comparison.confidence;

        let now = self.clock.now();
        let updated = self
            .store
            .update_verification(address, confidence, mock, now)?;
        if updated == 0 {
            return Err(VerificationError::NotRegistered(address.clone()));
        }
        let status = record.apply_comparison(confidence, mock, now);
        tracing::info!(
            wallet = %address,
            %confidence,
            mock,
            records = updated,
            status = status.as_str(),
            "verification complete"
        );

        Ok(if record.is_verified() {
            VerificationOutcome::Verified {
                record,
                confidence,
                mock,
            }
        } else {
            VerificationOutcome::Failed {
                record,
                confidence,
                mock,
            }
        })
    }

    /// Capture one frame from `camera` and verify it.
    ///
    /// The camera is released before any face-match call is made.
    pub async fn verify_with_camera<D: CaptureDevice>(
        &self,
        address: &WalletAddress,
        camera: &D,
    ) -> Result<VerificationOutcome, VerificationError> {
        self.verifiable(address)?;
        let frame = capture_once(camera)?;
        self.verify(address, &frame).await
    }

    // ── Cross-check ─────────────────────────────────────────────────────

    /// Compare a record's reference photo with its ID photo. Nothing is written.
    pub async fn cross_check(
        &self,
        address: &WalletAddress,
    ) -> Result<CrossCheckReport, VerificationError> {
        let record = self
            .lookup(address)?
            .ok_or_else(|| VerificationError::NotRegistered(address.clone()))?;
        Ok(self.cross_check_record(&record).await)
    }

    /// Cross-check every stored record, one at a time.
    pub async fn cross_check_all(&self) -> Result<Vec<CrossCheckReport>, VerificationError> {
        let records = self.store.list_students()?;
        let mut reports = Vec::with_capacity(records.len());
        for record in &records {
            reports.push(self.cross_check_record(record).await);
        }
        Ok(reports)
    }

    async fn cross_check_record(&self, record: &StudentRecord) -> CrossCheckReport {
        let result = match self.compare_photo_with_id(record).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(wallet = %record.wallet_address, error = %e, "cross-check failed");
                CrossCheckResult::Error {
                    message: e.to_string(),
                }
            }
        };
        CrossCheckReport {
            wallet_address: record.wallet_address.clone(),
            name: record.name.clone(),
            result,
        }
    }

    async fn compare_photo_with_id(
        &self,
        record: &StudentRecord,
    ) -> Result<CrossCheckResult, VerificationError> {
        if !self.matcher.detect_face(&record.photo).await?.face_found() {
            return Ok(CrossCheckResult::NoFace {
                image: ImageRole::Reference,
            });
        }
        if !self.matcher.detect_face(&record.id_photo).await?.face_found() {
            return Ok(CrossCheckResult::NoFace {
                image: ImageRole::IdPhoto,
            });
        }
        let comparison = self
            .matcher
            .compare_faces(&record.photo, &record.id_photo)
            .await?;
        Ok(CrossCheckResult::Compared {
            confidence: comparison.confidence,
            matched: comparison.verified,
            mock: comparison.mock,
        })
    }
}
