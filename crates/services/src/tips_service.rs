use std::sync::Arc;

use tracing::warn;

use assess_core::model::{SubsectionResult, UserId};
use assess_core::tips::{compose_tips, join_tips, split_tips};

use crate::api::AssessmentApi;

/// Personalized improvement tips, saved once per user.
///
/// Tips are composed from the user's final results on first view and
/// persisted; later visits return the saved lines unchanged even if the
/// results have since moved.
#[derive(Clone)]
pub struct TipsService {
    api: Arc<dyn AssessmentApi>,
}

impl TipsService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// Tip lines for a user. Saved tips win; otherwise the lines are
    /// composed from `results` and persisted best-effort.
    pub async fn tips_for(&self, user: UserId, results: &[SubsectionResult]) -> Vec<String> {
        match self.api.saved_tips(user).await {
            Ok(Some(saved)) => return split_tips(&saved),
            Ok(None) => {}
            Err(error) => {
                warn!(user_id = %user, %error, "saved tips fetch failed");
            }
        }

        let composed = compose_tips(results);
        if let Err(error) = self.api.save_tips(user, &join_tips(&composed)).await {
            warn!(user_id = %user, %error, "tips save failed");
        }
        composed
    }
}
