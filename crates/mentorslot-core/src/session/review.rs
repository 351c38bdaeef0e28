use std::collections::BTreeMap;
use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Accepted star ratings.
pub const RATING_RANGE: RangeInclusive<u8> = 1..=5;

/// Validated review content, not yet tied to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Review {
    ratings: BTreeMap<String, u8>,
    feedback: String,
}

impl Review {
    pub fn new(
        ratings: BTreeMap<String, u8>,
        feedback: impl Into<String>,
    ) -> Result<Self, SessionError> {
        if ratings.is_empty() {
            return Err(SessionError::EmptyRatings);
        }
        if let Some((criterion, &value)) = ratings.iter().find(|(_, v)| !RATING_RANGE.contains(*v)) {
            return Err(SessionError::InvalidRating {
                criterion: criterion.clone(),
                value,
            });
        }
        Ok(Self {
            ratings,
            feedback: feedback.into().trim().to_string(),
        })
    }

    pub fn ratings(&self) -> &BTreeMap<String, u8> {
        &self.ratings
    }

    pub fn feedback(&self) -> &str {
        &self.feedback
    }

    pub(crate) fn into_submission(self, session_id: &str) -> ReviewSubmission {
        ReviewSubmission {
            session_id: session_id.to_string(),
            ratings: self.ratings,
            feedback: self.feedback,
        }
    }
}

/// Review write payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSubmission {
    pub session_id: String,
    pub ratings: BTreeMap<String, u8>,
    pub feedback: String,
}
