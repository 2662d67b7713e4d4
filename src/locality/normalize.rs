//! Locality normalizer.

use crate::constants::locality::{COMPASS_WORDS, GEO_FEATURES};
use regex::{Captures, Regex};
use std::sync::LazyLock;

#[allow(clippy::expect_used)]
static COMPASS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(northeast|northwest|southeast|southwest|north|south|east|west|ne|nw|se|sw|n|s|e|w)\b\.?",
    )
    .expect("compass pattern is valid")
});

#[allow(clippy::expect_used)]
static MILES_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:air\s*)?(?:miles?|mi)\b\.?")
        .expect("miles pattern is valid")
});

#[allow(clippy::expect_used)]
static KM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]+(?:\.[0-9]+)?)\s*(?:kilometers?|kilometres?|kms?)\b\.?")
        .expect("kilometer pattern is valid")
});

#[allow(clippy::expect_used)]
static STRIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9.\s]").expect("strip pattern is valid"));

/// Normalize a free-text locality for comparison.
///
/// Lowercases, protects feature names such as `north canyon`, collapses
/// compass words and distance units to short codes, strips punctuation
/// other than periods and collapses whitespace. A missing locality becomes
/// the empty string.
///
/// The rewrite is repeated until the text is stable, so the result is a
/// fixed point: normalizing it again returns it unchanged.
pub fn normalize_locality(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };

    let mut current = text.to_lowercase();
    loop {
        let next = rewrite(&current);
        // Every step only deletes characters, so a changed pass is strictly shorter.
        if next == current {
            return next;
        }
        current = next;
    }
}

fn rewrite(text: &str) -> String {
    let merged = merge_feature_names(text);
    let compass = COMPASS_RE.replace_all(&merged, |caps: &Captures<'_>| {
        compass_code(&caps[1]).to_string()
    });
    let miles = MILES_RE.replace_all(&compass, "${1}mi");
    let km = KM_RE.replace_all(&miles, "${1}km");
    let stripped = STRIP_RE.replace_all(&km, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Joins a spelled compass word with a following feature noun.
///
/// Punctuation before the compass word is kept for the strip step; any after
/// it is dropped along with the space.
fn merge_feature_names(text: &str) -> String {
    let tokens: Vec<&str> = text.split_whitespace().collect();
    let mut out: Vec<String> = Vec::with_capacity(tokens.len());
    let mut i = 0;

    while i < tokens.len() {
        let token = tokens[i];
        let word = token.trim_matches(|c: char| !c.is_alphanumeric());
        if COMPASS_WORDS.contains(&word)
            && let Some(next) = tokens.get(i + 1)
            && GEO_FEATURES.contains(&next.trim_matches(|c: char| !c.is_alphanumeric()))
        {
            let lead = token.find(|c: char| c.is_alphanumeric()).unwrap_or(0);
            out.push(format!("{}{word}{next}", &token[..lead]));
            i += 2;
            continue;
        }
        out.push(tokens[i].to_string());
        i += 1;
    }

    out.join(" ")
}

fn compass_code(word: &str) -> &'static str {
    match word {
        "north" | "n" => "n",
        "south" | "s" => "s",
        "east" | "e" => "e",
        "west" | "w" => "w",
        "northeast" | "ne" => "ne",
        "northwest" | "nw" => "nw",
        "southeast" | "se" => "se",
        _ => "sw",
    }
}
