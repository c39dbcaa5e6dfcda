use serde::{Deserialize, Serialize};

use crate::model::{OrganizationId, UserId};

/// Role ids that carry manager privileges on the backend.
const MANAGER_ROLE_IDS: [u8; 2] = [3, 4];

/// The signed-in user, as cached locally between screens.
///
/// This object is what the session store persists; it is not re-validated
/// against the server beyond best-effort existence checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub role_id: u8,
    #[serde(default)]
    pub is_admin: bool,
    #[serde(default)]
    pub assessment_completed: bool,
    #[serde(default)]
    pub manager_assessment_completed: bool,
}

impl UserSession {
    #[must_use]
    pub fn new(user_id: UserId, organization_id: OrganizationId, role_id: u8) -> Self {
        Self {
            user_id,
            organization_id,
            role_id,
            is_admin: false,
            assessment_completed: false,
            manager_assessment_completed: false,
        }
    }

    /// Whether this user holds a manager role and sees manager-only sections.
    #[must_use]
    pub fn is_manager(&self) -> bool {
        MANAGER_ROLE_IDS.contains(&self.role_id)
    }

    /// Progress-bar increment per section for this user's flows.
    ///
    /// Admins run the longer flow, so each step advances the bar less.
    #[must_use]
    pub fn progress_step(&self) -> u8 {
        if self.is_admin { 22 } else { 30 }
    }
}

/// An employee row as returned by the roster endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub assessment_completed: u8,
    #[serde(default, rename = "managerAssessment_completed")]
    pub manager_assessment_completed: u8,
}

/// A roster row shaped for display and cached locally.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeRow {
    /// 1-based position in the roster listing.
    pub position: usize,
    pub id: UserId,
    pub name: String,
    pub self_assessment_done: bool,
    pub manager_assessment_done: bool,
}

impl EmployeeRow {
    #[must_use]
    pub fn from_record(position: usize, record: &EmployeeRecord) -> Self {
        Self {
            position,
            id: record.id,
            name: format!("{} {}", record.first_name, record.last_name),
            self_assessment_done: record.assessment_completed == 1,
            manager_assessment_done: record.manager_assessment_completed == 1,
        }
    }

    /// The final result is only available once both assessments are in.
    #[must_use]
    pub fn final_result_available(&self) -> bool {
        self.self_assessment_done && self.manager_assessment_done
    }
}

/// Basic-info profile collected at the start of the self-assessment flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub user_id: UserId,
    pub full_name: String,
    pub email: String,
    pub mobile_number: String,
    pub current_position: String,
    pub years_in_same_position: u32,
    pub years_in_organization: u32,
    pub previous_position: String,
    pub studying_same_as_work: bool,
}
