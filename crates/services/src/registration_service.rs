use std::sync::Arc;

use tracing::info;

use assess_core::model::{UserId, UserProfile};

use crate::api::AssessmentApi;
use crate::error::RegistrationError;

/// Basic-info registration at the start of the self-assessment flow.
#[derive(Clone)]
pub struct RegistrationService {
    api: Arc<dyn AssessmentApi>,
}

impl RegistrationService {
    #[must_use]
    pub fn new(api: Arc<dyn AssessmentApi>) -> Self {
        Self { api }
    }

    /// Whether the user already filled in their basic info; returning users
    /// skip the form.
    pub async fn is_registered(&self, user: UserId) -> Result<bool, RegistrationError> {
        Ok(self.api.user_profile(user).await?.is_some())
    }

    /// Stores the basic-info form.
    pub async fn register(&self, profile: &UserProfile) -> Result<(), RegistrationError> {
        self.api.create_user_profile(profile).await?;
        info!(user_id = %profile.user_id, "basic info registered");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::FakeApi;

    fn profile(user: u64) -> UserProfile {
        UserProfile {
            user_id: UserId::new(user),
            full_name: "Maija Meikäläinen".into(),
            email: "maija@example.com".into(),
            mobile_number: "0401234567".into(),
            current_position: "Specialist".into(),
            years_in_same_position: 2,
            years_in_organization: 5,
            previous_position: "Trainee".into(),
            studying_same_as_work: true,
        }
    }

    #[tokio::test]
    async fn registration_round_trip() {
        let service = RegistrationService::new(Arc::new(FakeApi::new()));
        let user = UserId::new(4);

        assert!(!service.is_registered(user).await.unwrap());
        service.register(&profile(4)).await.unwrap();
        assert!(service.is_registered(user).await.unwrap());
    }
}
