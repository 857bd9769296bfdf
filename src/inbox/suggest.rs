// src/inbox/suggest.rs
// Keyword classifier turning the latest activity on a task into a suggested
// next action

/// One classifier rule: any pattern hit selects the action. Rules are
/// checked in order, so earlier rules mask later ones.
#[derive(Debug, Clone, Copy)]
struct Rule {
    patterns: &'static [&'static str],
    action: &'static str,
}

/// Rules for the latest comment, gated on the body containing a question
/// mark or a mention. Patterns cover English and Croatian; they match as
/// substrings of the lowercased body, so "pregled" also hits "pregledati".
const COMMENT_RULES: &[Rule] = &[
    Rule {
        patterns: &["close", "zatvori"],
        action: "asking about closing this task",
    },
    Rule {
        patterns: &["review", "pregled"],
        action: "review requested",
    },
    Rule {
        patterns: &["help", "pomoć", "pomozi"],
        action: "asking for help",
    },
    Rule {
        patterns: &["publish", "objavi"],
        action: "needs you to publish something",
    },
];

/// Fallbacks when the comment gate matched but no keyword rule fired
const QUESTION_ACTION: &str = "asked a question";
const MENTION_ACTION: &str = "you were mentioned";

/// Rules for the title of a task with no comments
const TITLE_RULES: &[Rule] = &[
    Rule {
        patterns: &["critical", "kritič", "⚠"],
        action: "CRITICAL bug needs immediate attention",
    },
    Rule {
        patterns: &["bug", "greška"],
        action: "bug to investigate",
    },
];

fn first_match(rules: &[Rule], haystack: &str) -> Option<&'static str> {
    rules
        .iter()
        .find(|rule| rule.patterns.iter().any(|pattern| haystack.contains(pattern)))
        .map(|rule| rule.action)
}

/// Classify one task into at most one suggested action.
///
/// `comment_body` is the normalized (markup stripped, mentions collapsed to
/// `@label`) body of the latest comment, when the task has one. A comment
/// that asks for attention wins over anything in the title; a comment that
/// does not suppresses title matching entirely, since the conversation has
/// moved past the title.
pub fn suggest_action(comment_body: Option<&str>, title: &str) -> Option<&'static str> {
    if let Some(body) = comment_body {
        let body = body.to_lowercase();
        if !body.contains('?') && !body.contains('@') {
            return None;
        }
        let fallback = if body.contains('?') {
            QUESTION_ACTION
        } else {
            MENTION_ACTION
        };
        return Some(first_match(COMMENT_RULES, &body).unwrap_or(fallback));
    }

    let title = title.to_lowercase();
    first_match(TITLE_RULES, &title)
}
