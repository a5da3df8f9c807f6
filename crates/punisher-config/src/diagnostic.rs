// SPDX-FileCopyrightText: 2026 Punisher Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Diagnostics for a mod's `config.toml`.
//!
//! Figment reports a bad `[trader]`, `[catalog]`, `[paths]` or `[logging]`
//! entry as a path plus an error kind. This module turns each one into a
//! [`ConfigError`] that names the dotted key, points at the offending line
//! when the file text is at hand, and offers the nearest accepted spelling.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use figment::error::Kind;
use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Jaro-Winkler score a candidate must beat to be offered as a correction.
const SUGGESTION_THRESHOLD: f64 = 0.75;

/// A problem with the mod's configuration.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A key or section the config model does not declare.
    #[error("unknown configuration key `{key}`")]
    #[diagnostic(
        code(punisher::config::unknown_key),
        help("{}", choices_help(suggestion.as_deref(), choices))
    )]
    UnknownKey {
        key: String,
        suggestion: Option<String>,
        /// Keys accepted at the same level, comma separated.
        choices: String,
        #[label("not a Punisher setting")]
        span: Option<SourceSpan>,
        #[source_code]
        src: Option<NamedSource<String>>,
    },

    #[error("invalid type for key `{key}`: {detail}")]
    #[diagnostic(code(punisher::config::invalid_type), help("expected {expected}"))]
    InvalidType {
        key: String,
        detail: String,
        expected: String,
    },

    /// `catalog.source`, `catalog.duplicate_policy` and the like hold a
    /// value that is not one of their variants.
    #[error("invalid value for key `{key}`: {detail}")]
    #[diagnostic(
        code(punisher::config::invalid_value),
        help("{}", choices_help(suggestion.as_deref(), expected))
    )]
    InvalidValue {
        key: String,
        detail: String,
        suggestion: Option<String>,
        expected: String,
    },

    #[error("missing required key `{key}`")]
    #[diagnostic(
        code(punisher::config::missing_key),
        help("add `{key} = <value>` to the mod's config.toml")
    )]
    MissingKey { key: String },

    /// Parsed fine but breaks a cross-field rule, such as
    /// `refresh_min_secs > refresh_max_secs`.
    #[error("validation error: {message}")]
    #[diagnostic(code(punisher::config::validation))]
    Validation { message: String },

    #[error("configuration error: {0}")]
    #[diagnostic(code(punisher::config::other))]
    Other(String),
}

fn choices_help(suggestion: Option<&str>, choices: &str) -> String {
    match suggestion {
        Some(s) => format!("did you mean `{s}`? Valid values: {choices}"),
        None => format!("valid values: {choices}"),
    }
}

/// Split a figment failure into one [`ConfigError`] per problem.
///
/// `toml_sources` holds `(path, text)` for each config file that went into
/// the figment; it is only used to attach source spans to unknown keys.
pub fn figment_to_config_errors(
    err: figment::Error,
    toml_sources: &[(String, String)],
) -> Vec<ConfigError> {
    err.into_iter()
        .map(|error| {
            let key = dotted_key(&error.path);
            match &error.kind {
                Kind::UnknownField(field, accepted) => {
                    let (span, src) = locate_key(&error, field, toml_sources);
                    ConfigError::UnknownKey {
                        key: field.clone(),
                        suggestion: suggest_key(field, *accepted),
                        choices: accepted.join(", "),
                        span,
                        src,
                    }
                }
                Kind::UnknownVariant(value, variants) => ConfigError::InvalidValue {
                    key,
                    detail: format!("unknown variant `{value}`"),
                    suggestion: suggest_key(value, *variants),
                    expected: variants.join(", "),
                },
                Kind::MissingField(field) => ConfigError::MissingKey {
                    key: field.clone().into_owned(),
                },
                Kind::InvalidType(actual, expected) => ConfigError::InvalidType {
                    key,
                    detail: format!("found {actual}, expected {expected}"),
                    expected: expected.to_string(),
                },
                _ => ConfigError::Other(error.to_string()),
            }
        })
        .collect()
}

/// `["trader", "localized_descriptions"]` becomes `trader.localized_descriptions`.
fn dotted_key(path: &[String]) -> String {
    path.join(".")
}

/// Span of an unknown key inside the config file it came from.
fn locate_key(
    error: &figment::error::Error,
    field: &str,
    toml_sources: &[(String, String)],
) -> (Option<SourceSpan>, Option<NamedSource<String>>) {
    let file = error
        .metadata
        .as_ref()
        .and_then(|m| m.source.as_ref())
        .and_then(|s| match s {
            figment::Source::File(path) => Some(path.display().to_string()),
            _ => None,
        });

    // `load_and_validate_str` has no file metadata; with a single source
    // there is nothing to disambiguate.
    let source = file
        .and_then(|file| toml_sources.iter().find(|(p, _)| *p == file))
        .or(match toml_sources {
            [only] => Some(only),
            _ => None,
        });

    let Some((path, content)) = source else {
        return (None, None);
    };
    match find_key_offset(content, &error.path, field) {
        Some(offset) => (
            Some(SourceSpan::new(offset.into(), field.len())),
            Some(NamedSource::new(path, content.clone())),
        ),
        None => (None, None),
    }
}

/// Byte offset of `field` in the TOML text.
///
/// With a non-empty `section` the search starts after that table's header,
/// e.g. `[trader.localized_descriptions]`. An unknown top-level name may be
/// a misspelled table, so `[field]` headers count as a match too.
pub fn find_key_offset(content: &str, section: &[String], field: &str) -> Option<usize> {
    let start = if section.is_empty() {
        0
    } else {
        let header = format!("[{}]", dotted_key(section));
        content.find(&header)? + header.len()
    };

    let mut offset = start;
    for line in content[start..].split_inclusive('\n') {
        let indent = line.len() - line.trim_start().len();
        let trimmed = &line[indent..];
        if section.is_empty()
            && let Some(table) = trimmed.strip_prefix('[')
            && table.strip_prefix(field).is_some_and(|rest| rest.starts_with([']', '.']))
        {
            return Some(offset + indent + 1);
        }
        if trimmed
            .strip_prefix(field)
            .is_some_and(|rest| rest.starts_with([' ', '\t', '=']))
        {
            return Some(offset + indent);
        }
        // Keys after the next table header belong to another section.
        if !section.is_empty() && trimmed.starts_with('[') {
            return None;
        }
        offset += line.len();
    }
    None
}

/// Closest entry of `accepted` to `unknown`, if any clears
/// [`SUGGESTION_THRESHOLD`].
pub fn suggest_key<S: AsRef<str>>(unknown: &str, accepted: &[S]) -> Option<String> {
    accepted
        .iter()
        .map(|candidate| (strsim::jaro_winkler(unknown, candidate.as_ref()), candidate))
        .filter(|(score, _)| *score > SUGGESTION_THRESHOLD)
        .max_by(|a, b| a.0.total_cmp(&b.0))
        .map(|(_, candidate)| candidate.as_ref().to_string())
}

/// Print each diagnostic to stderr with miette's graphical report.
///
/// Shared by config and catalog errors, so `punisher check` reports both the
/// same way.
pub fn render_errors<D: Diagnostic>(errors: &[D]) {
    let handler = miette::GraphicalReportHandler::new();
    for error in errors {
        let mut report = String::new();
        match handler.render_report(&mut report, error as &dyn Diagnostic) {
            Ok(()) => eprint!("{report}"),
            Err(_) => eprintln!("Error: {error}"),
        }
    }
}
