use std::sync::atomic::{AtomicBool, Ordering};

use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{
    analysis::{
        entities::{AnalysisRecord, DEFAULT_ANALYSIS_TYPE},
        ports::AnalysisService,
        value_objects::AnalyzeImageInput,
    },
    capture::{entities::ImageUpload, policies::validate_upload},
    common::entities::app_errors::CoreError,
};

/// What the screen currently shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionView {
    pub preview_url: Option<String>,
    pub current_record: Option<AnalysisRecord>,
    pub history: Vec<AnalysisRecord>,
    pub error: Option<String>,
    pub is_analyzing: bool,
    pub has_pending_image: bool,
}

#[derive(Debug, Default)]
struct SessionState {
    pending_image: Option<ImageUpload>,
    preview_url: Option<String>,
    current_record: Option<AnalysisRecord>,
    history: Vec<AnalysisRecord>,
    error: Option<String>,
}

/// Drives one user's interaction: picking or capturing an image, running the
/// analysis, browsing and pruning history.
///
/// The state lock is never held across a service call.
pub struct AnalyzerSession<S: AnalysisService> {
    service: S,
    analysis_type: String,
    state: Mutex<SessionState>,
    analyzing: AtomicBool,
}

struct InFlight<'a>(&'a AtomicBool);

impl<'a> InFlight<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, CoreError> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::AnalysisInProgress)?;
        Ok(Self(flag))
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl<S: AnalysisService> AnalyzerSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            analysis_type: DEFAULT_ANALYSIS_TYPE.to_string(),
            state: Mutex::new(SessionState::default()),
            analyzing: AtomicBool::new(false),
        }
    }

    pub fn with_analysis_type(mut self, analysis_type: impl Into<String>) -> Self {
        self.analysis_type = analysis_type.into();
        self
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyzing.load(Ordering::Acquire)
    }

    pub async fn view(&self) -> SessionView {
        let state = self.state.lock().await;

        SessionView {
            preview_url: state.preview_url.clone(),
            current_record: state.current_record.clone(),
            history: state.history.clone(),
            error: state.error.clone(),
            is_analyzing: self.is_analyzing(),
            has_pending_image: state.pending_image.is_some(),
        }
    }

    pub async fn load_history(&self) -> Result<(), CoreError> {
        let history = self.service.list_history().await?;
        self.state.lock().await.history = history;
        Ok(())
    }

    pub async fn select_file(&self, upload: ImageUpload) -> Result<(), CoreError> {
        self.set_pending(upload).await
    }

    /// Takes the still confirmed from a camera session.
    pub async fn accept_capture(&self, upload: ImageUpload) -> Result<(), CoreError> {
        self.set_pending(upload).await
    }

    async fn set_pending(&self, upload: ImageUpload) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;

        if let Err(e) = validate_upload(&upload) {
            state.error = Some(match &e {
                CoreError::InvalidInput(message) => message.clone(),
                other => other.to_string(),
            });
            return Err(e);
        }

        state.preview_url = Some(upload.to_data_url());
        state.pending_image = Some(upload);
        state.current_record = None;
        state.error = None;

        Ok(())
    }

    pub async fn analyze(&self) -> Result<AnalysisRecord, CoreError> {
        let _in_flight = InFlight::acquire(&self.analyzing)?;

        let image = {
            let mut state = self.state.lock().await;
            let Some(image) = state.pending_image.clone() else {
                state.error = Some("Please select an image first".to_string());
                return Err(CoreError::InvalidInput("No image selected".to_string()));
            };
            state.error = None;
            image
        };

        let input = AnalyzeImageInput::new(image).with_analysis_type(self.analysis_type.clone());

        let record = match self.service.analyze(input).await {
            Ok(record) => record,
            Err(e) => {
                tracing::error!(error = %e, "Analysis failed");
                self.state.lock().await.error =
                    Some(format!("Failed to analyze the image: {}", e));
                return Err(e);
            }
        };

        let history = self.service.list_history().await;

        let mut state = self.state.lock().await;
        state.preview_url = Some(record.image_url.clone());
        state.current_record = Some(record.clone());
        match history {
            Ok(history) => state.history = history,
            Err(e) => tracing::warn!(error = %e, "Failed to refresh history"),
        }

        Ok(record)
    }

    /// Shows a stored record without analyzing it again.
    pub async fn select_history_item(&self, record_id: Uuid) -> Result<(), CoreError> {
        let mut state = self.state.lock().await;

        let record = state
            .history
            .iter()
            .find(|r| r.id == record_id)
            .cloned()
            .ok_or(CoreError::NotFound)?;

        state.preview_url = Some(record.image_url.clone());
        state.current_record = Some(record);
        state.error = None;

        Ok(())
    }

    pub async fn delete(&self, record_id: Uuid) -> Result<(), CoreError> {
        if let Err(e) = self.service.delete_record(record_id).await {
            self.state.lock().await.error = Some(format!("Failed to delete the record: {}", e));
            return Err(e);
        }

        let history = self.service.list_history().await?;

        let mut state = self.state.lock().await;
        state.history = history;

        if state
            .current_record
            .as_ref()
            .is_some_and(|r| r.id == record_id)
        {
            state.current_record = None;
            state.preview_url = state.pending_image.as_ref().map(ImageUpload::to_data_url);
        }

        Ok(())
    }
}
