//! Supplemental markdown transforms
//!
//! Hand-written documentation may contain fenced alert blocks
//! (```` ```warning ````) and links to argument documentation
//! (`Arguments/name.md`). Both are rewritten before the markdown is appended
//! to the description taken from the schema.

use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::naming::upper_first;

const FENCE: &str = "```";

/// First-line keywords that turn a fenced block into an alert
pub const ALERT_KINDS: [&str; 4] = ["warning", "danger", "success", "info"];

/// Cached regex for `Arguments/<name>.md` links
static CROSS_REFERENCE_REGEX: OnceLock<Regex> = OnceLock::new();

/// Cached regex for the legacy doubled-fence alert pattern
static LEGACY_ALERT_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_cross_reference_regex() -> &'static Regex {
    CROSS_REFERENCE_REGEX.get_or_init(|| {
        Regex::new(r"(?i)Arguments/([a-z0-9^\s/]+)\.md")
            .expect("Failed to compile cross reference regex")
    })
}

fn get_legacy_alert_regex() -> &'static Regex {
    LEGACY_ALERT_REGEX.get_or_init(|| {
        Regex::new(r"(?i)(```)([a-z\s]+)(.[`]{3})(```)")
            .expect("Failed to compile legacy alert regex")
    })
}

/// Rewrite fenced alert blocks into inline styled spans.
///
/// The text is split on fences. A segment whose first line is one of
/// [`ALERT_KINDS`] opens an alert, and the segment after it is prefixed with
/// the closing tag. Every other segment after the first gets its fence back.
pub fn transform_alert_blocks(text: &str) -> String {
    let mut output = String::with_capacity(text.len());
    let mut in_alert = false;

    for (index, part) in text.split(FENCE).enumerate() {
        let kind = part
            .find('\n')
            .map(|end| part[..end].trim_end_matches('\r'))
            .filter(|line| ALERT_KINDS.contains(line));

        match kind {
            Some(kind) => {
                output.push_str(&format!(
                    r#"<span class="alert alert-{}"><span class="lead">{}</span><br />"#,
                    kind,
                    upper_first(kind)
                ));
                output.push_str(&part[kind.len()..]);
                in_alert = true;
            }
            None if in_alert => {
                output.push_str("</span>");
                output.push_str(part);
                in_alert = false;
            }
            None if index > 0 => {
                output.push_str(FENCE);
                output.push_str(part);
            }
            None => output.push_str(part),
        }
    }

    output
}

/// Rewrite `Arguments/<name>.md` links to anchors on the current page
pub fn substitute_cross_references(text: &str, request_url: &str) -> String {
    get_cross_reference_regex()
        .replace_all(text, |caps: &Captures| {
            format!("{}#argument-{}", request_url, &caps[1])
        })
        .into_owned()
}

/// Legacy rewrite of a doubled-fence alert into a div.
///
/// Only text with six consecutive backticks after a short lowercase run
/// matches; well-formed fenced blocks pass through untouched.
pub fn rewrite_legacy_alerts(text: &str, request_url: &str) -> String {
    get_legacy_alert_regex()
        .replace_all(text, |caps: &Captures| {
            format!(
                r#"{}<div class="alert alert-{}">{}</div>"#,
                request_url, &caps[1], &caps[2]
            )
        })
        .into_owned()
}

fn append(base: &str, supplemental: &str) -> String {
    format!("{}\n\n{}", base, supplemental)
}

/// Merges supplemental markdown into schema documentation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocMerger {
    /// Run [`rewrite_legacy_alerts`] on component documentation
    pub legacy_alert_rewrite: bool,
}

impl Default for DocMerger {
    fn default() -> Self {
        Self {
            legacy_alert_rewrite: true,
        }
    }
}

impl DocMerger {
    pub fn new(legacy_alert_rewrite: bool) -> Self {
        Self {
            legacy_alert_rewrite,
        }
    }

    /// Component-level merge: alert blocks, cross references, then the
    /// optional legacy pass
    pub fn merge_supplemental(&self, base: &str, supplemental: &str, request_url: &str) -> String {
        let transformed = transform_alert_blocks(supplemental);
        let mut transformed = substitute_cross_references(&transformed, request_url);
        if self.legacy_alert_rewrite {
            transformed = rewrite_legacy_alerts(&transformed, request_url);
        }
        append(base, &transformed)
    }

    /// Argument-level merge: cross references only
    pub fn merge_argument(&self, base: &str, supplemental: &str, request_url: &str) -> String {
        append(base, &substitute_cross_references(supplemental, request_url))
    }
}
