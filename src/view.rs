use serde_json::{json, Value};

use crate::quiz_engine::{
    models::{Category, QuizResult},
    session::Session,
};

/// Feedback banner text for the answered question.
fn feedback(session: &Session) -> Value {
    match session.last_answer_correct() {
        Some(true)  => json!({ "kind": "correct", "text": "Correct! 🎉" }),
        Some(false) => json!({ "kind": "wrong",   "text": "Oops! 😅" }),
        None        => Value::Null,
    }
}

/// Snapshot of a running session for a client renderer.
///
/// Before a pick the options carry only id and token, so the payload does not
/// give away which one is right. After a pick each option gets its mark and
/// the target id is included.
pub fn session_state(session: &Session, category: &Category) -> Value {
    let progress = session.progress();
    let answered = session.selection().is_some();

    let options: Vec<Value> = session
        .option_marks()
        .into_iter()
        .map(|(item, mark)| {
            if answered {
                json!({ "id": item.id, "token": item.token, "mark": mark.to_string() })
            } else {
                json!({ "id": item.id, "token": item.token })
            }
        })
        .collect();

    let question = session.current_question();
    let target_id = if answered { question.map(|q| q.target.id.clone()) } else { None };
    json!({
        "session_id": session.label(),
        "category": {
            "id":        category.id,
            "title":     category.title,
            "icon":      category.icon,
            "theme_key": category.theme_key,
        },
        "progress": {
            "index":   progress.index,
            "total":   progress.total,
            "percent": progress.percent,
            "label":   progress.to_string(),
        },
        "score":     session.score(),
        "word":      question.map(|q| q.target.label.clone()),
        "options":   options,
        "selection": session.selection(),
        "target_id": target_id,
        "feedback":  feedback(session),
    })
}

/// Snapshot of the result screen.
pub fn result_state(result: &QuizResult) -> Value {
    let tier = result.rate().ok();
    json!({
        "score":    result.score,
        "total":    result.total,
        "percent":  result.percentage().ok(),
        "stars":    tier.map(|t| t.stars()),
        "headline": tier.map(|t| t.headline()),
    })
}
