/*!
 * IELTS band-score reconciliation.
 *
 * The surrounding evaluation system produces two independent per-criterion
 * band estimates: one inside the evaluation feedback block
 * (`suggested_band_score`) and one inside the constructive feedback block
 * (`score`). This module merges them into a single rounded band per
 * criterion plus an overall band, and strips the raw score fields from a
 * feedback payload before it goes back to a client.
 */

use serde_json::Value;
use thiserror::Error;

/// Errors raised while reconciling scores from a feedback payload
#[derive(Error, Debug)]
pub enum ScoreError {
    /// A required block is missing from the payload
    #[error("Missing field in feedback payload: {0}")]
    MissingField(&'static str),

    /// No criterion carried a usable score
    #[error("No criterion scores found in feedback payload")]
    NoCriteria,
}

/// Reconciled scores for one essay
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ScoreSummary {
    /// Overall band, rounded to the IELTS half-band scale
    pub overall_score: f64,
    /// Per-criterion rounded bands, keyed by the constructive-feedback
    /// criterion names in sorted key order (serde_json objects iterate
    /// alphabetically)
    pub criteria_scores: Vec<(String, f64)>,
}

/// Round to the nearest half band following the IELTS convention.
///
/// A fractional part below .25 rounds down to the whole band, anything in
/// [.25, .75) rounds to .5, and .75 or above rounds up to the next whole
/// band. So 6.25 -> 6.5, 6.125 -> 6.0, 6.75 -> 7.0, 6.875 -> 7.0.
pub fn round_band(score: f64) -> f64 {
    let integer_part = score.floor();
    let fractional_part = score - integer_part;

    if fractional_part < 0.25 {
        integer_part
    } else if fractional_part < 0.75 {
        integer_part + 0.5
    } else {
        integer_part + 1.0
    }
}

/// Merge the two per-criterion estimates in a feedback payload into rounded
/// bands.
///
/// Criterion names come from the constructive block; estimates are paired
/// positionally with the evaluation block's `suggested_band_score` entries
/// (the two blocks name criteria differently). A criterion missing its
/// evaluation estimate falls back to the constructive score alone.
pub fn reconcile_scores(feedback: &Value) -> Result<ScoreSummary, ScoreError> {
    let evaluation = feedback
        .get("evaluation_feedback")
        .and_then(Value::as_object)
        .ok_or(ScoreError::MissingField("evaluation_feedback"))?;
    let criteria = feedback
        .get("constructive_feedback")
        .and_then(|v| v.get("criteria"))
        .and_then(Value::as_object)
        .ok_or(ScoreError::MissingField("constructive_feedback.criteria"))?;

    // Per-criterion estimates from the evaluation block; the overall entry
    // has no `suggested_band_score` and drops out here.
    let evaluation_scores: Vec<f64> = evaluation
        .values()
        .filter_map(|details| details.get("suggested_band_score").and_then(Value::as_f64))
        .collect();

    let mut criteria_scores = Vec::new();
    for (position, (criterion, details)) in criteria.iter().enumerate() {
        let Some(constructive_score) = details.get("score").and_then(Value::as_f64) else {
            continue;
        };

        let merged = match evaluation_scores.get(position) {
            Some(evaluation_score) => (evaluation_score + constructive_score) / 2.0,
            None => constructive_score,
        };
        criteria_scores.push((criterion.clone(), round_band(merged)));
    }

    if criteria_scores.is_empty() {
        return Err(ScoreError::NoCriteria);
    }

    let overall = criteria_scores.iter().map(|(_, s)| s).sum::<f64>() / criteria_scores.len() as f64;

    Ok(ScoreSummary {
        overall_score: round_band(overall),
        criteria_scores,
    })
}

/// Remove the raw score fields from a feedback payload in place.
///
/// Clients get the reconciled `ScoreSummary` instead; the raw per-block
/// estimates are an implementation detail.
pub fn strip_score_fields(feedback: &mut Value) {
    if let Some(obj) = feedback.as_object_mut() {
        obj.remove("overall_score");
    }

    if let Some(evaluation) = feedback
        .get_mut("evaluation_feedback")
        .and_then(Value::as_object_mut)
    {
        for details in evaluation.values_mut() {
            if let Some(details) = details.as_object_mut() {
                details.remove("suggested_band_score");
                details.remove("suggested_overall_band_score");
            }
        }
    }

    if let Some(criteria) = feedback
        .get_mut("constructive_feedback")
        .and_then(|v| v.get_mut("criteria"))
        .and_then(Value::as_object_mut)
    {
        for details in criteria.values_mut() {
            if let Some(details) = details.as_object_mut() {
                details.remove("score");
            }
        }
    }
}
