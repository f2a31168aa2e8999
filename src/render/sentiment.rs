// src/render/sentiment.rs — Sentiment score to emoji

/// `None` while the score is pending (or unknown).
pub fn sentiment_emoji(score: Option<f64>) -> Option<&'static str> {
    let score = score.filter(|s| !s.is_nan())?;
    let emoji = if score >= 3.0 {
        "😄"
    } else if score > 0.0 {
        "🙂"
    } else if score == 0.0 {
        "😐"
    } else if score <= -3.0 {
        "😠"
    } else {
        "🙁"
    };
    Some(emoji)
}
