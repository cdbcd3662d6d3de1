//! The signature table and the matcher that walks it.
//!
//! Order matters only where one signature is a more specific form of another
//! (LGPL before GPL, BSD-Source-Code before BSD); the first match wins.

use crate::models::Classification;

/// How a signature is located in the input.
#[derive(Debug)]
pub enum MatchRule {
    /// A sentence or fragment from the license text.
    Phrase {
        text: &'static str,
        case_insensitive: bool,
    },
    /// A short identifier-like word, e.g. `MIT`.
    Word(&'static str),
}

/// How a version suffix is derived from the text after a phrase.
#[derive(Debug)]
pub enum VersionRule {
    None,
    /// Only fires when followed by one of these rendered versions.
    Required(&'static [&'static str]),
    /// Versioned id when a version follows, bare id otherwise.
    Optional,
}

/// How a match is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Marker {
    Starred,
    Exact,
}

#[derive(Debug)]
pub struct LicenseSignature {
    pub id: &'static str,
    pub rules: &'static [MatchRule],
    pub version: VersionRule,
    pub marker: Marker,
}

/// Known license signatures in priority order.
pub static SIGNATURES: &[LicenseSignature] = &[
    LicenseSignature {
        id: "MIT",
        rules: &[
            MatchRule::Phrase {
                text: "Permission is hereby granted, free of charge, to any",
                case_insensitive: false,
            },
            MatchRule::Word("MIT"),
        ],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "LGPL",
        rules: &[MatchRule::Phrase {
            text: "GNU LIBRARY GENERAL PUBLIC LICENSE",
            case_insensitive: false,
        }],
        version: VersionRule::Required(&["2.0"]),
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "LGPL",
        rules: &[MatchRule::Phrase {
            text: "GNU LESSER GENERAL PUBLIC LICENSE",
            case_insensitive: false,
        }],
        version: VersionRule::Required(&["2.1", "3.0"]),
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "GPL",
        rules: &[MatchRule::Phrase {
            text: "GNU GENERAL PUBLIC LICENSE",
            case_insensitive: false,
        }],
        version: VersionRule::Required(&["1.0", "2.0", "3.0"]),
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "BSD-Source-Code",
        rules: &[MatchRule::Phrase {
            text: "Redistribution and use of this software in source and binary forms, with or without modification, are permitted provided that the following conditions are met:",
            case_insensitive: false,
        }],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "BSD",
        rules: &[
            MatchRule::Phrase {
                text: "Redistribution and use in source and binary forms, with or without",
                case_insensitive: false,
            },
            MatchRule::Word("BSD"),
        ],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "Apache",
        rules: &[MatchRule::Phrase {
            text: "Apache License",
            case_insensitive: false,
        }],
        version: VersionRule::Optional,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "WTFPL",
        rules: &[
            MatchRule::Phrase {
                text: "DO WHAT THE FUCK YOU WANT TO PUBLIC LICENSE",
                case_insensitive: false,
            },
            MatchRule::Word("WTFPL"),
        ],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "ISC",
        rules: &[
            MatchRule::Phrase {
                text: "The ISC License",
                case_insensitive: false,
            },
            MatchRule::Word("ISC"),
        ],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    // Opening clause of the CC0 deed.
    LicenseSignature {
        id: "CC0-1.0",
        rules: &[MatchRule::Phrase {
            text: "The person who associated a work with this deed has dedicated the work to the public domain by waiving all of his or her rights to the work worldwide under copyright law",
            case_insensitive: true,
        }],
        version: VersionRule::None,
        marker: Marker::Starred,
    },
    LicenseSignature {
        id: "Public Domain",
        rules: &[
            MatchRule::Phrase {
                text: "public domain",
                case_insensitive: true,
            },
            MatchRule::Phrase {
                text: "public-domain",
                case_insensitive: true,
            },
            MatchRule::Phrase {
                text: "public_domain",
                case_insensitive: true,
            },
        ],
        version: VersionRule::None,
        marker: Marker::Exact,
    },
];

/// Start offsets of every occurrence of `needle` that stands alone, i.e. is
/// neither preceded nor followed by an alphanumeric character.
pub fn bounded_matches<'a>(
    haystack: &'a str,
    needle: &'a str,
) -> impl Iterator<Item = usize> + 'a {
    haystack
        .match_indices(needle)
        .map(|(start, _)| start)
        .filter(move |&start| {
            let end = start + needle.len();
            let before = haystack[..start].chars().next_back();
            let after = haystack[end..].chars().next();
            !before.is_some_and(char::is_alphanumeric)
                && !after.is_some_and(char::is_alphanumeric)
        })
}

/// First standalone occurrence of `needle` in `haystack`.
pub fn find_bounded(haystack: &str, needle: &str) -> Option<usize> {
    bounded_matches(haystack, needle).next()
}

/// Read `Version N` directly after a phrase.
///
/// Whitespace and a single comma may sit between the phrase and the keyword.
/// The version is digit groups joined by single dots; reading stops at the
/// first empty group. A bare integer renders as `N.0`.
pub fn extract_version(rest: &str) -> Option<String> {
    let mut rest = rest.trim_start();
    if let Some(after_comma) = rest.strip_prefix(',') {
        rest = after_comma.trim_start();
    }
    let rest = rest.strip_prefix("Version")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    let run: String = rest
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    let groups: Vec<&str> = run.split('.').take_while(|g| !g.is_empty()).collect();
    match groups.as_slice() {
        [] => None,
        [major] => Some(format!("{}.0", major)),
        _ => Some(groups.join(".")),
    }
}

/// Collapse every whitespace run to a single space.
fn compact(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

impl MatchRule {
    /// Offsets `(start, end)` of each standalone occurrence, in `text`'s
    /// coordinates.
    fn occurrences(&self, text: &str) -> Vec<(usize, usize)> {
        match self {
            MatchRule::Phrase {
                text: needle,
                case_insensitive: true,
            } => {
                // ASCII lowering keeps byte offsets stable.
                let haystack = text.to_ascii_lowercase();
                let needle = needle.to_ascii_lowercase();
                bounded_matches(&haystack, &needle)
                    .map(|start| (start, start + needle.len()))
                    .collect()
            }
            MatchRule::Phrase { text: needle, .. } | MatchRule::Word(needle) => {
                bounded_matches(text, needle)
                    .map(|start| (start, start + needle.len()))
                    .collect()
            }
        }
    }
}

impl LicenseSignature {
    /// Rendered identifier if this signature applies to `text`.
    fn identify(&self, text: &str) -> Option<String> {
        let ends = || {
            self.rules
                .iter()
                .flat_map(|rule| rule.occurrences(text))
                .map(|(_, end)| end)
        };

        match self.version {
            VersionRule::None => ends().next().map(|_| self.id.to_string()),
            VersionRule::Required(accepted) => ends()
                .filter_map(|end| extract_version(&text[end..]))
                .find(|v| accepted.iter().any(|a| *a == v.as_str()))
                .map(|v| format!("{}-{}", self.id, v)),
            VersionRule::Optional => {
                let ends: Vec<usize> = ends().collect();
                if ends.is_empty() {
                    return None;
                }
                let version = ends.iter().find_map(|&end| extract_version(&text[end..]));
                Some(match version {
                    Some(v) => format!("{}-{}", self.id, v),
                    None => self.id.to_string(),
                })
            }
        }
    }

    fn render(&self, id: String) -> Classification {
        match self.marker {
            Marker::Starred => Classification::Guessed(id),
            Marker::Exact => Classification::Exact(id),
        }
    }
}

/// Walk [`SIGNATURES`] and return the first hit.
pub fn match_signature(normalized: &str) -> Option<Classification> {
    let text = compact(normalized);
    SIGNATURES
        .iter()
        .find_map(|sig| sig.identify(&text).map(|id| sig.render(id)))
}
