use serde::{Deserialize, Serialize};

/// One entry of the inference endpoint's `[{label, score}]` answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub label: String,
    pub score: f32,
}

/// Highest-scoring entry; ties keep the first one returned.
pub fn top_label(scores: &[LabelScore]) -> Option<Prediction> {
    scores
        .iter()
        .fold(None::<&LabelScore>, |best, candidate| match best {
            Some(best) if best.score >= candidate.score => Some(best),
            _ => Some(candidate),
        })
        .map(|best| Prediction {
            label: best.label.clone(),
            score: best.score,
        })
}
