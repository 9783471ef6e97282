// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Converts a label to a lower snake case identifier.
///
/// camelCase boundaries and runs of whitespace both become `_`, so
/// `coreEssentials` and `Core Essentials` map to `core_essentials`.
#[must_use]
pub fn convert_to_id(value: &str) -> String {
    split_words(value)
        .iter()
        .map(|word| word.to_lowercase())
        .collect::<Vec<String>>()
        .join("_")
}

/// Converts an identifier to a title-cased label.
///
/// `core_essentials` and `coreEssentials` both become `Core Essentials`.
#[must_use]
pub fn prettify(value: &str) -> String {
    split_words(value)
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| {
                first.to_uppercase().chain(chars).collect::<String>()
            })
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn split_words(value: &str) -> Vec<String> {
    let mut words: Vec<String> = Vec::new();
    let mut current: String = String::new();
    let mut previous_lower: bool = false;

    for ch in value.chars() {
        if ch.is_whitespace() || ch == '_' {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            previous_lower = false;
            continue;
        }
        if ch.is_uppercase() && previous_lower && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        previous_lower = ch.is_lowercase();
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}
