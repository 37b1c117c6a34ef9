use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vote {
    Up,
    Down,
}

/// A reviewer's vote and note on one cell.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Feedback {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vote: Option<Vote>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Feedback {
    /// Casting the current vote again clears it.
    pub fn toggle_vote(&mut self, vote: Vote) {
        self.vote = if self.vote == Some(vote) { None } else { Some(vote) };
    }

    /// Blank comments are ignored and leave the previous one in place.
    pub fn set_comment(&mut self, comment: &str) {
        let comment = comment.trim();
        if !comment.is_empty() {
            self.comment = Some(comment.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_vote_twice_clears() {
        let mut feedback = Feedback::default();
        feedback.toggle_vote(Vote::Up);
        feedback.toggle_vote(Vote::Up);
        assert_eq!(feedback.vote, None);
    }

    #[test]
    fn opposite_vote_replaces() {
        let mut feedback = Feedback::default();
        feedback.toggle_vote(Vote::Up);
        feedback.toggle_vote(Vote::Down);
        assert_eq!(feedback.vote, Some(Vote::Down));
    }

    #[test]
    fn blank_comment_is_ignored() {
        let mut feedback = Feedback::default();
        feedback.set_comment("too verbose");
        feedback.set_comment("   ");
        assert_eq!(feedback.comment.as_deref(), Some("too verbose"));
    }
}
