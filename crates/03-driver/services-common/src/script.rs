//! Scripted responses replayed by the in-process services.

use serde::{Deserialize, Serialize};
use service_abi::TransportError;
use std::collections::VecDeque;

/// A canned service answer: either a payload or a transport failure.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scripted<T> {
    /// The request succeeds with this payload.
    Ok(T),
    /// The request fails with this error.
    Error(TransportError),
}

impl<T> Scripted<T> {
    /// Converts the scripted answer into the result a service reports.
    pub fn into_result(self) -> Result<T, TransportError> {
        match self {
            Scripted::Ok(value) => Ok(value),
            Scripted::Error(err) => Err(err),
        }
    }
}

/// Ordered answers for one kind of request.
///
/// Each request consumes the front answer. The last answer is sticky, so a
/// screen that refreshes more often than the script anticipated keeps seeing
/// the final state instead of running dry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScriptedSequence<T> {
    answers: VecDeque<T>,
}

impl<T> Default for ScriptedSequence<T> {
    fn default() -> Self {
        Self {
            answers: VecDeque::new(),
        }
    }
}

impl<T: Clone> ScriptedSequence<T> {
    /// Creates a sequence from answers in request order.
    pub fn new(answers: impl IntoIterator<Item = T>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
        }
    }

    /// Appends an answer after the currently scripted ones.
    pub fn push(&mut self, answer: T) {
        self.answers.push_back(answer);
    }

    /// Returns `true` when nothing was scripted.
    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    /// Returns the answer for the next request, if any was scripted.
    pub fn next_answer(&mut self) -> Option<T> {
        if self.answers.len() > 1 {
            self.answers.pop_front()
        } else {
            self.answers.front().cloned()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_answer_is_sticky() {
        let mut seq = ScriptedSequence::new([1, 2]);
        assert_eq!(seq.next_answer(), Some(1));
        assert_eq!(seq.next_answer(), Some(2));
        assert_eq!(seq.next_answer(), Some(2));
    }

    #[test]
    fn empty_sequence_has_no_answer() {
        let mut seq = ScriptedSequence::<u8>::default();
        assert!(seq.is_empty());
        assert_eq!(seq.next_answer(), None);
    }

    #[test]
    fn scripted_error_decodes_from_json() {
        let scripted: Scripted<u8> =
            serde_json::from_str(r#"{ "error": { "status": { "code": 500, "message": "down" } } }"#)
                .expect("decode scripted error");
        assert_eq!(
            scripted.into_result(),
            Err(TransportError::status(500, "down"))
        );
    }
}
