//! Report grading
//!
//! Two strategies share one contract: report text in, score 0..=100 out.
//!
//! - **Heuristic**: deterministic keyword overlap, always available
//! - **Instructor**: an OpenAI-compatible chat model, opt-in per player
//!
//! Grading never fails. When the instructor errors, times out, or returns
//! something unparseable, the heuristic score is used instead.

use crate::config::InstructorConfig;
use crate::data::{GameMode, Mission};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, warn};

const BASE_SCORE: f64 = 50.0;
const DETAIL_BONUS: f64 = 10.0;
const DETAIL_THRESHOLD_CHARS: usize = 100;
const THOROUGH_THRESHOLD_CHARS: usize = 200;
const KEYWORD_WEIGHT: f64 = 30.0;

const DEFAULT_FEEDBACK: &str = "Good effort!";
const DEFAULT_EXPLANATION: &str = "Keep practicing your OSINT skills.";

/// Keyword-overlap score for a report
///
/// 50 base, +10 above 100 characters, +10 more above 200, plus up to 30 for
/// the share of solution values found (case-insensitive substring match).
pub fn heuristic_score(report: &str, solution_values: &[&str]) -> u8 {
    let mut score = BASE_SCORE;

    let length = report.chars().count();
    if length > DETAIL_THRESHOLD_CHARS {
        score += DETAIL_BONUS;
    }
    if length > THOROUGH_THRESHOLD_CHARS {
        score += DETAIL_BONUS;
    }

    if !solution_values.is_empty() {
        let report = report.to_lowercase();
        let found = solution_values
            .iter()
            .filter(|value| report.contains(&value.to_lowercase()))
            .count();
        score += found as f64 / solution_values.len() as f64 * KEYWORD_WEIGHT;
    }

    score.round().clamp(0.0, 100.0) as u8
}

/// Input to the instructor
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradingRequest {
    pub mission_title: String,
    pub mission_objective: String,
    pub expected_answer: String,
    pub user_report: String,
    pub hints: Vec<String>,
}

impl GradingRequest {
    pub fn for_mission(mission: &Mission, report: &str, mode: GameMode) -> Self {
        let hints = match mode {
            GameMode::Beginner => &mission.hints.beginner,
            GameMode::Expert => &mission.hints.expert,
        };
        Self {
            mission_title: mission.title.clone(),
            mission_objective: mission.brief.clone(),
            expected_answer: mission.expected_answer(),
            user_report: report.to_string(),
            hints: hints.clone(),
        }
    }

    pub fn prompt(&self) -> String {
        let hints = if self.hints.is_empty() {
            String::new()
        } else {
            format!("\nHints given to the student: {}\n", self.hints.join("; "))
        };
        format!(
            r#"You are an OSINT (Open Source Intelligence) instructor evaluating a student's investigation report.

Mission: {title}
Objective: {objective}

Expected Answer: {expected}
{hints}
Student's Report:
{report}

Evaluate the student's report and provide:
1. A score from 0-100 based on accuracy, completeness, and methodology
2. Constructive feedback on what they did well and what needs improvement
3. A brief explanation of the correct approach

Respond in JSON format:
{{
  "score": <number 0-100>,
  "feedback": "<constructive feedback>",
  "explanation": "<correct methodology explanation>"
}}"#,
            title = self.mission_title,
            objective = self.mission_objective,
            expected = self.expected_answer,
            hints = hints,
            report = self.user_report,
        )
    }
}

/// Instructor verdict
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradingResponse {
    pub score: u8,
    pub feedback: String,
    pub explanation: String,
}

/// Parse the model's JSON reply
///
/// Invalid JSON is an error. Missing or mistyped fields fall back to safe
/// defaults (score 0, generic feedback); the score is clamped to 0..=100.
pub fn parse_grading_response(content: &str) -> Result<GradingResponse> {
    let value: Value = serde_json::from_str(content.trim()).context("instructor reply is not JSON")?;
    let object = value
        .as_object()
        .ok_or_else(|| anyhow!("instructor reply is not a JSON object"))?;

    let score = object
        .get("score")
        .and_then(Value::as_f64)
        .filter(|s| s.is_finite())
        .unwrap_or(0.0)
        .round()
        .clamp(0.0, 100.0) as u8;

    let text = |key: &str, default: &str| {
        object
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(default)
            .to_string()
    };

    Ok(GradingResponse {
        score,
        feedback: text("feedback", DEFAULT_FEEDBACK),
        explanation: text("explanation", DEFAULT_EXPLANATION),
    })
}

/// External grading backend
pub trait Instructor: Send + Sync {
    fn grade_with_ai(&self, request: &GradingRequest) -> Result<GradingResponse>;
}

/// OpenAI-compatible chat completions client
pub struct OpenAiInstructor {
    http_client: reqwest::blocking::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_completion_tokens: u32,
}

impl OpenAiInstructor {
    /// Build from config; `None` when no endpoint is configured
    pub fn from_config(config: &InstructorConfig) -> Result<Option<Self>> {
        let Some(base_url) = config.base_url.as_deref().filter(|u| !u.trim().is_empty()) else {
            return Ok(None);
        };
        let http_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to build instructor HTTP client")?;
        Ok(Some(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_else(|| "dummy".to_string()),
            model: config.model.clone(),
            max_completion_tokens: config.max_completion_tokens,
        }))
    }
}

impl Instructor for OpenAiInstructor {
    fn grade_with_ai(&self, request: &GradingRequest) -> Result<GradingResponse> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": request.prompt() }],
            "response_format": { "type": "json_object" },
            "max_completion_tokens": self.max_completion_tokens,
        });

        let response: Value = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .context("Instructor request failed")?
            .error_for_status()
            .context("Instructor returned an error status")?
            .json()
            .context("Instructor response is not JSON")?;

        let content = response
            .pointer("/choices/0/message/content")
            .and_then(Value::as_str)
            .unwrap_or("{}");
        debug!(model = %self.model, chars = content.len(), "instructor replied");

        parse_grading_response(content)
    }
}

/// Which strategy produced a score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradingMethod {
    Heuristic,
    Instructor,
}

/// Score plus optional instructor commentary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeOutcome {
    pub score: u8,
    pub graded_by: GradingMethod,
    pub feedback: Option<String>,
    pub explanation: Option<String>,
}

impl GradeOutcome {
    fn heuristic(score: u8) -> Self {
        Self {
            score,
            graded_by: GradingMethod::Heuristic,
            feedback: None,
            explanation: None,
        }
    }
}

/// Strategy selection with silent fallback
#[derive(Default)]
pub struct ReportGrader {
    instructor: Option<Box<dyn Instructor>>,
}

impl ReportGrader {
    pub fn heuristic_only() -> Self {
        Self { instructor: None }
    }

    pub fn with_instructor(instructor: Box<dyn Instructor>) -> Self {
        Self {
            instructor: Some(instructor),
        }
    }

    /// Heuristic grader, plus the configured instructor if any
    pub fn from_config(config: &InstructorConfig) -> Result<Self> {
        Ok(match OpenAiInstructor::from_config(config)? {
            Some(instructor) => Self::with_instructor(Box::new(instructor)),
            None => Self::heuristic_only(),
        })
    }

    pub fn instructor_available(&self) -> bool {
        self.instructor.is_some()
    }

    /// Grade a report; never fails
    pub fn grade(&self, mission: &Mission, report: &str, mode: GameMode, use_instructor: bool) -> GradeOutcome {
        if use_instructor {
            if let Some(instructor) = &self.instructor {
                let request = GradingRequest::for_mission(mission, report, mode);
                match instructor.grade_with_ai(&request) {
                    Ok(response) => {
                        debug!(mission = mission.id, score = response.score, "instructor graded report");
                        return GradeOutcome {
                            score: response.score,
                            graded_by: GradingMethod::Instructor,
                            feedback: Some(response.feedback),
                            explanation: Some(response.explanation),
                        };
                    }
                    Err(err) => {
                        warn!(mission = mission.id, error = %format!("{:#}", err), "instructor grading failed, using heuristic");
                    }
                }
            }
        }

        let score = heuristic_score(report, &mission.solution_values());
        debug!(mission = mission.id, score, "heuristic graded report");
        GradeOutcome::heuristic(score)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedInstructor(&'static str);

    /// Always fails, like an unreachable backend
    struct UnavailableInstructor;

    impl Instructor for UnavailableInstructor {
        fn grade_with_ai(&self, _request: &GradingRequest) -> Result<GradingResponse> {
            anyhow::bail!("AI Instructor not configured")
        }
    }

    impl Instructor for FixedInstructor {
        fn grade_with_ai(&self, _request: &GradingRequest) -> Result<GradingResponse> {
            parse_grading_response(self.0)
        }
    }

    fn mission() -> Mission {
        Mission::new(1, "Operation First Light", 1, 100).with_solution(&[
            ("registered", "2023"),
            ("organization", "Sunrise Holdings LTD"),
            ("registrant", "GhostTrader"),
        ])
    }

    #[test]
    fn short_report_without_terms_scores_base() {
        assert_eq!(heuristic_score("short text", &["GhostTrader"]), 50);
    }

    #[test]
    fn heuristic_is_deterministic() {
        let values = ["2023", "GhostTrader"];
        let first = heuristic_score("registered in 2023 by someone", &values);
        for _ in 0..10 {
            assert_eq!(heuristic_score("registered in 2023 by someone", &values), first);
        }
        assert_eq!(first, 65);
    }

    #[test]
    fn long_report_with_every_term_scores_hundred() {
        let mut report = String::from("The domain was registered in 2023 by Sunrise Holdings LTD; the registrant handle is ghosttrader. ");
        while report.chars().count() <= 250 {
            report.push_str("Further corroborated via search results. ");
        }
        assert_eq!(heuristic_score(&report, &mission().solution_values()), 100);
    }

    #[test]
    fn length_bonus_thresholds_are_strict() {
        let exactly_100 = "a".repeat(100);
        let just_over = "a".repeat(101);
        let over_200 = "a".repeat(201);
        assert_eq!(heuristic_score(&exactly_100, &["zzz"]), 50);
        assert_eq!(heuristic_score(&just_over, &["zzz"]), 60);
        assert_eq!(heuristic_score(&over_200, &["zzz"]), 70);
    }

    #[test]
    fn no_solution_values_means_no_keyword_bonus() {
        assert_eq!(heuristic_score(&"b".repeat(150), &[]), 60);
    }

    #[test]
    fn partial_match_rounds() {
        // 1 of 3 terms: 10 points
        assert_eq!(heuristic_score("GHOSTTRADER did it", &mission().solution_values()), 60);
        // 2 of 3 terms: 20 points
        assert_eq!(heuristic_score("ghosttrader, 2023", &mission().solution_values()), 70);
    }

    #[test]
    fn parses_well_formed_reply() {
        let parsed = parse_grading_response(r#"{"score": 87.6, "feedback": "Solid", "explanation": "Use WHOIS"}"#).unwrap();
        assert_eq!(parsed.score, 88);
        assert_eq!(parsed.feedback, "Solid");
        assert_eq!(parsed.explanation, "Use WHOIS");
    }

    #[test]
    fn missing_fields_take_defaults_and_score_clamps() {
        let parsed = parse_grading_response(r#"{"score": 140}"#).unwrap();
        assert_eq!(parsed.score, 100);
        assert_eq!(parsed.feedback, DEFAULT_FEEDBACK);
        assert_eq!(parsed.explanation, DEFAULT_EXPLANATION);

        let parsed = parse_grading_response(r#"{"score": "high", "feedback": ""}"#).unwrap();
        assert_eq!(parsed.score, 0);
        assert_eq!(parsed.feedback, DEFAULT_FEEDBACK);

        assert_eq!(parse_grading_response(r#"{"score": -5}"#).unwrap().score, 0);
    }

    #[test]
    fn garbage_reply_is_an_error() {
        assert!(parse_grading_response("I think this deserves a 90").is_err());
        assert!(parse_grading_response("[1, 2]").is_err());
    }

    #[test]
    fn prompt_carries_mission_context() {
        let request = GradingRequest::for_mission(&mission(), "my report", GameMode::Beginner);
        let prompt = request.prompt();
        assert!(prompt.contains("Operation First Light"));
        assert!(prompt.contains("registrant: GhostTrader"));
        assert!(prompt.contains("my report"));
    }

    #[test]
    fn instructor_used_when_opted_in() {
        let grader = ReportGrader::with_instructor(Box::new(FixedInstructor(r#"{"score": 42, "feedback": "ok"}"#)));
        let outcome = grader.grade(&mission(), "short text", GameMode::Beginner, true);
        assert_eq!(outcome.score, 42);
        assert_eq!(outcome.graded_by, GradingMethod::Instructor);
        assert_eq!(outcome.feedback.as_deref(), Some("ok"));
    }

    #[test]
    fn outcome_json_is_camel_case() {
        let grader = ReportGrader::with_instructor(Box::new(FixedInstructor(
            r#"{"score": 91, "feedback": "Thorough", "explanation": "Check the registrar"}"#,
        )));
        let json = serde_json::to_value(grader.grade(&mission(), "short text", GameMode::Beginner, true)).unwrap();
        assert_eq!(json["gradedBy"], "instructor");
        assert_eq!(json["score"], 91);
        assert_eq!(json["explanation"], "Check the registrar");
        assert!(json.get("graded_by").is_none());
    }

    #[test]
    fn instructor_ignored_without_opt_in() {
        let grader = ReportGrader::with_instructor(Box::new(FixedInstructor(r#"{"score": 42}"#)));
        let outcome = grader.grade(&mission(), "short text", GameMode::Beginner, false);
        assert_eq!(outcome.score, 50);
        assert_eq!(outcome.graded_by, GradingMethod::Heuristic);
    }

    #[test]
    fn failing_instructor_falls_back_to_heuristic() {
        let grader = ReportGrader::with_instructor(Box::new(UnavailableInstructor));
        let outcome = grader.grade(&mission(), "short text", GameMode::Expert, true);
        assert_eq!(outcome, GradeOutcome::heuristic(50));

        let grader = ReportGrader::with_instructor(Box::new(FixedInstructor("not json")));
        let outcome = grader.grade(&mission(), "short text", GameMode::Expert, true);
        assert_eq!(outcome.graded_by, GradingMethod::Heuristic);
    }

    #[test]
    fn unconfigured_instructor_is_absent() {
        let config = InstructorConfig::default();
        assert!(OpenAiInstructor::from_config(&config).unwrap().is_none());
        assert!(!ReportGrader::from_config(&config).unwrap().instructor_available());
    }
}
