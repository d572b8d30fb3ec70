use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::AppError;
use crate::models::{present, CreateLeadRequest, Lead, ScoredLead};
use crate::scoring::{color_for_label, random_score, score_label};
use crate::store::RecordStore;

pub const DEFAULT_BUDGET: &str = "Unknown";
pub const MANUAL_ENTRY_HISTORY: &str = "Manual Entry via Dashboard";

/// Attaches a label and color to a stored lead.
///
/// A non-empty stored label is kept as-is; a missing one is derived from the
/// score. The color follows the label when it is a known tier, otherwise the
/// score.
pub fn reconcile(mut lead: Lead) -> ScoredLead {
    let derived = score_label(lead.score);

    let label = match lead.label.take().filter(|l| !l.trim().is_empty()) {
        Some(label) => label,
        None => derived.label.to_string(),
    };
    let color = color_for_label(&label).unwrap_or(derived.color);

    lead.label = Some(label);
    lead.extra.remove("color");
    ScoredLead { lead, color }
}

/// Lead listing and creation over a [`RecordStore`].
pub struct LeadService {
    store: Arc<dyn RecordStore<Lead>>,
    // Serializes read-modify-write within this process
    write_lock: Mutex<()>,
}

impl LeadService {
    pub fn new(store: Arc<dyn RecordStore<Lead>>) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// All leads, newest first, with labels reconciled.
    pub async fn list(&self) -> Result<Vec<ScoredLead>, AppError> {
        let leads = self
            .store
            .read_all()
            .await
            .map_err(|e| AppError::storage("Failed to load leads", e))?;

        tracing::debug!("Loaded {} lead(s)", leads.len());
        Ok(leads.into_iter().map(reconcile).collect())
    }

    /// Validates the request, scores the new lead and prepends it to the store.
    pub async fn create(&self, request: CreateLeadRequest) -> Result<ScoredLead, AppError> {
        let (Some(name), Some(company)) = (present(&request.name), present(&request.company))
        else {
            return Err(AppError::BadRequest(
                "Name and Company are required".to_string(),
            ));
        };

        let score = random_score();
        let tier = score_label(score);
        let lead = Lead {
            name: name.to_string(),
            company: company.to_string(),
            budget: Some(
                present(&request.budget)
                    .unwrap_or(DEFAULT_BUDGET)
                    .to_string(),
            ),
            history: Some(MANUAL_ENTRY_HISTORY.to_string()),
            score,
            label: Some(tier.label.to_string()),
            extra: Default::default(),
        };

        let _guard = self.write_lock.lock().await;

        let mut leads = self
            .store
            .read_all()
            .await
            .map_err(|e| AppError::storage("Failed to save lead", e))?;
        leads.insert(0, lead.clone());
        self.store
            .write_all(&leads)
            .await
            .map_err(|e| AppError::storage("Failed to save lead", e))?;

        tracing::info!(
            "Created lead '{}' at {} (score {}, {})",
            lead.name,
            lead.company,
            lead.score,
            tier.label
        );

        Ok(ScoredLead {
            lead,
            color: tier.color,
        })
    }
}
