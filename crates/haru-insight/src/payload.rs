// SPDX-FileCopyrightText: 2026 Haru Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Typed payloads deserialized from model output, one per task kind.
//!
//! The model's JSON is untrusted input: each payload declares its shape for
//! serde and its required-field contract via [`Validate`]. Field names are
//! camelCase because the same shapes go back out over HTTP unchanged.

use std::str::FromStr;

use chrono::NaiveDate;
use haru_core::types::{Emotion, MicroAction, Phase};
use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::intensity;
use crate::parser::Validate;

/// Goal decomposition: an overall timeframe plus ordered phases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalBreakdown {
    pub timeframe: String,
    pub phases: Vec<Phase>,
}

impl Validate for GoalBreakdown {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.phases.is_empty() {
            return Err(PipelineError::Validation(
                "goal breakdown has no phases".to_string(),
            ));
        }
        for (i, phase) in self.phases.iter().enumerate() {
            if phase.tasks.is_empty() {
                return Err(PipelineError::Validation(format!(
                    "phase {} (`{}`) has no tasks",
                    i + 1,
                    phase.title
                )));
            }
        }
        Ok(())
    }
}

/// One schedule recommendation. Dates are ISO "YYYY-MM-DD", times "HH:MM".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub title: String,
    pub date: String,
    pub start_time: String,
    pub end_time: String,
    pub category: String,
    pub reasoning: String,
}

/// Recommendation envelope as requested from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRecommendations {
    pub recommendations: Vec<Recommendation>,
}

impl Validate for ScheduleRecommendations {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.recommendations.is_empty() {
            return Err(PipelineError::Validation(
                "schedule response has no recommendations".to_string(),
            ));
        }
        for rec in &self.recommendations {
            if rec.title.trim().is_empty() {
                return Err(PipelineError::Validation(
                    "recommendation with empty title".to_string(),
                ));
            }
            if NaiveDate::from_str(&rec.date).is_err() {
                return Err(PipelineError::Validation(format!(
                    "recommendation `{}` has unparseable date `{}`",
                    rec.title, rec.date
                )));
            }
        }
        Ok(())
    }
}

/// Emotional analysis of one reflection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReflectionAnalysis {
    pub emotion: String,
    #[serde(deserialize_with = "intensity::deserialize_lenient")]
    pub intensity: u8,
    pub key_insights: Vec<String>,
    pub response: String,
    pub action_suggestions: Vec<String>,
    pub emotion_trend: String,
}

impl Validate for ReflectionAnalysis {
    fn validate(&self) -> Result<(), PipelineError> {
        if Emotion::from_str(&self.emotion).is_err() {
            return Err(PipelineError::Validation(format!(
                "unknown emotion label `{}`",
                self.emotion
            )));
        }
        if self.response.trim().is_empty() {
            return Err(PipelineError::Validation(
                "analysis has an empty response".to_string(),
            ));
        }
        Ok(())
    }
}

/// Micro-action envelope as requested from the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MicroActionSet {
    pub micro_actions: Vec<MicroAction>,
}

impl Validate for MicroActionSet {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.micro_actions.is_empty() {
            return Err(PipelineError::Validation(
                "micro-action response is empty".to_string(),
            ));
        }
        for action in &self.micro_actions {
            if action.title.trim().is_empty() {
                return Err(PipelineError::Validation(
                    "micro-action with empty title".to_string(),
                ));
            }
        }
        Ok(())
    }
}

/// Reflection question set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionSet {
    pub questions: Vec<String>,
}

impl Validate for QuestionSet {
    fn validate(&self) -> Result<(), PipelineError> {
        if self.questions.iter().all(|q| q.trim().is_empty()) {
            return Err(PipelineError::Validation(
                "question response is empty".to_string(),
            ));
        }
        Ok(())
    }
}
