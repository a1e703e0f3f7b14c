/// Heuristic risk scoring over drafted text.
///
/// Capped additive keyword/pattern matching with a rule-based safer
/// rewrite. Deliberately not a model. The history core has no dependency
/// on this module; it is a sibling feature whose output a caller may feed
/// back through `record` when the user applies the suggestion.
use std::collections::HashSet;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Words that signal pressure, hostility, or sensitive content. +8 each.
const PRESSURE_WORDS: &[&str] = &[
    "urgent",
    "immediately",
    "asap",
    "angry",
    "mad",
    "furious",
    "fire",
    "terminate",
    "sue",
    "lawsuit",
    "confidential",
    "password",
    "ssn",
    "credit card",
    "deadline",
    "mistake",
    "wrong",
    "failed",
    "late",
    "stupid",
    "idiot",
];

/// Strongly negative words. +12 each.
const NEGATIVE_WORDS: &[&str] = &["hate", "worst", "terrible", "useless", "ridiculous"];

/// Urgency phrases reported as individual issues.
const URGENCY_PHRASES: &[&str] = &["urgent", "asap", "immediately", "right now"];

/// Negative words reported as individual issues.
const NEGATIVE_ISSUE_WORDS: &[&str] = &["hate", "stupid", "idiot", "terrible"];

/// Softening replacements applied to the rewrite, keyed lowercase.
const REPLACEMENTS: &[(&str, &str)] = &[
    ("hate", "prefer not to"),
    ("stupid", "unwise"),
    ("idiot", "person"),
    ("terrible", "challenging"),
    ("fire", "let go"),
    ("urgent", "important"),
    ("asap", "when you have a chance"),
    ("immediately", "soon"),
    ("wrong", "different"),
    ("failed", "did not succeed"),
    ("deadline", "timeline"),
];

/// How risky the text reads overall.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        };
        write!(f, "{name}")
    }
}

/// The analyzer's full verdict over one text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskReport {
    /// Capped additive score, 0..=100.
    pub score: u8,
    pub level: RiskLevel,
    /// Up to three human-readable findings.
    pub issues: Vec<String>,
    /// Rule-based softer rewrite of the input.
    pub safer_text: String,
}

fn word_alternation(words: &[&str]) -> Regex {
    let pattern = format!("(?i)\\b(?:{})\\b", words.join("|"));
    Regex::new(&pattern).expect("hard-coded word list compiles")
}

fn pressure_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_alternation(PRESSURE_WORDS))
}

fn negative_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| word_alternation(NEGATIVE_WORDS))
}

fn replacement_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let keys: Vec<&str> = REPLACEMENTS.iter().map(|(k, _)| *k).collect();
        word_alternation(&keys)
    })
}

fn caps_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("[A-Z]{4,}").expect("hard-coded pattern compiles"))
}

fn bang_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new("!{3,}").expect("hard-coded pattern compiles"))
}

fn question_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\?{3,}").expect("hard-coded pattern compiles"))
}

fn greeting_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)^\s*(?:hi|hello|dear|hey)\b").expect("hard-coded pattern compiles"))
}

/// Counts the distinct listed words present in `text` (a word repeated
/// many times scores once).
fn distinct_matches(re: &Regex, text: &str) -> usize {
    let found: HashSet<String> = re
        .find_iter(text)
        .map(|m| m.as_str().to_lowercase())
        .collect();
    found.len()
}

/// Computes the capped additive risk score for `text`.
pub fn risk_score(text: &str) -> u8 {
    let mut score = 0usize;

    score += distinct_matches(pressure_re(), text) * 8;
    score += distinct_matches(negative_re(), text) * 12;
    score += caps_run_re().find_iter(text).count() * 5;
    if text.contains("!!!") || text.contains("???") {
        score += 10;
    }

    score.min(100) as u8
}

/// Maps a score to its level band.
pub fn risk_level(score: u8) -> RiskLevel {
    if score > 70 {
        RiskLevel::High
    } else if score > 40 {
        RiskLevel::Medium
    } else {
        RiskLevel::Low
    }
}

/// Collects up to three human-readable findings for `text`.
fn find_issues(text: &str) -> Vec<String> {
    let mut issues = Vec::new();
    let lower = text.to_lowercase();

    if caps_run_re().is_match(text) {
        issues.push("ALL CAPS can be perceived as shouting".to_string());
    }
    if text.contains("!!!") {
        issues.push("Multiple exclamation points may seem overly emotional".to_string());
    }
    if text.contains("???") {
        issues.push("Multiple question marks may seem impatient".to_string());
    }
    for phrase in URGENCY_PHRASES {
        if lower.contains(phrase) {
            issues.push(format!("Urgent language (\"{phrase}\") can create pressure"));
        }
    }
    for word in NEGATIVE_ISSUE_WORDS {
        if lower.contains(word) {
            issues.push(format!("Negative word detected: \"{word}\""));
        }
    }

    if issues.is_empty() {
        issues.push("No major safety issues detected".to_string());
    }
    issues.truncate(3);
    issues
}

/// Produces the rule-based softer rewrite of `text`.
fn safer_rewrite(text: &str) -> String {
    // Soften listed words, preserving nothing of the original casing.
    let softened = replacement_re().replace_all(text, |caps: &regex::Captures<'_>| {
        let matched = caps[0].to_lowercase();
        REPLACEMENTS
            .iter()
            .find(|(k, _)| *k == matched)
            .map(|(_, v)| v.to_string())
            .unwrap_or(matched)
    });

    // Down-case shouting runs after the first letter.
    let calmed = caps_run_re().replace_all(&softened, |caps: &regex::Captures<'_>| {
        let m = &caps[0];
        let mut chars = m.chars();
        match chars.next() {
            Some(first) => format!("{first}{}", chars.as_str().to_lowercase()),
            None => String::new(),
        }
    });

    let depunctuated = bang_run_re().replace_all(&calmed, "!");
    let depunctuated = question_run_re().replace_all(&depunctuated, "?");

    if greeting_re().is_match(&depunctuated) {
        depunctuated.into_owned()
    } else {
        format!("Hi,\n\n{depunctuated}")
    }
}

/// Runs the full analysis: score, level, issues, and safer rewrite.
pub fn analyze(text: &str) -> RiskReport {
    let score = risk_score(text);
    RiskReport {
        score,
        level: risk_level(score),
        issues: find_issues(text),
        safer_text: safer_rewrite(text),
    }
}
