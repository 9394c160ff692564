//! Conversation policy: what actually gets sent to the completion endpoint.
//!
//! One system-prompt message, one optional system message carrying the
//! accumulated document context, the most recent window of history turns, and
//! the current query if it is not already present.

use crate::types::ChatTurn;

const CONTEXT_PREAMBLE: &str = "Use the following information to answer the user's question. \
If the information doesn't contain the answer, say that you don't know based on the provided \
documents:";

pub fn build_messages(
    system_prompt: &str,
    context: &str,
    history: &[ChatTurn],
    query: &str,
    history_window: usize,
) -> Vec<ChatTurn> {
    let mut messages = vec![ChatTurn::system(system_prompt)];

    if !context.trim().is_empty() {
        messages.push(ChatTurn::system(format!(
            "{}\n\n{}",
            CONTEXT_PREAMBLE, context
        )));
    }

    // History is stored unbounded; the window only applies at send time.
    let start = history.len().saturating_sub(history_window);
    for turn in &history[start..] {
        if turn.role != "system" {
            messages.push(turn.clone());
        }
    }

    let query_present = messages
        .iter()
        .any(|m| m.role == "user" && m.content == query);
    if !query_present {
        messages.push(ChatTurn::user(query));
    }

    messages
}
