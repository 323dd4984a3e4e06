//! Colon-delimited issue body parsing.
//!
//! Onboarding automation receives tracking-issue bodies of the form:
//!
//! ```text
//! name: Acme Corp
//! motto: we try harder
//! ```
//!
//! Fields are one per line, split on the first colon, both sides trimmed.
//! Lines without a colon are not fatal; they are skipped with a warning so
//! a chatty issue template does not break the automation.

use std::collections::BTreeMap;

pub fn parse_issue_body(body: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();

    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match line.split_once(':') {
            Some((field, value)) => {
                fields.insert(field.trim().to_string(), value.trim().to_string());
            }
            None => {
                eprintln!("warning: skipping malformed line: {line}");
            }
        }
    }

    fields
}

/// Look up a required field, with a readable error naming it.
pub fn required_field<'a>(
    fields: &'a BTreeMap<String, String>,
    name: &str,
) -> anyhow::Result<&'a str> {
    fields
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow::anyhow!("issue body is missing the '{name}' field"))
}
