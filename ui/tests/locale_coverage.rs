use std::collections::{BTreeMap, BTreeSet};

/// Every non-fallback locale must define exactly the fallback's message IDs,
/// each with the same `{ $variable }` placeholders.
///
/// Keys are read with a line heuristic: comments, attributes and blank lines
/// are skipped and anything of the form `key = value` is a message.
///
/// To add a locale, create `ui/i18n/<locale>/peerline-ui.ftl`, translate every
/// message from `en-US`, and register the file below.
const EN_US: &str = include_str!("../i18n/en-US/peerline-ui.ftl");
const LOCALES: &[(&str, &str)] = &[("es-ES", include_str!("../i18n/es-ES/peerline-ui.ftl"))];

#[test]
fn fallback_has_unique_keys() {
    let messages = messages(EN_US, "en-US");
    assert!(!messages.is_empty(), "Fallback (en-US) contains no keys.");
}

#[test]
fn locales_match_fallback_keys() {
    let fallback = messages(EN_US, "en-US");
    let expected: BTreeSet<&String> = fallback.keys().collect();

    let mut failures = Vec::new();
    for (locale, src) in LOCALES {
        let found = messages(src, locale);
        let keys: BTreeSet<&String> = found.keys().collect();

        let missing: Vec<_> = expected.difference(&keys).collect();
        let extra: Vec<_> = keys.difference(&expected).collect();
        if !missing.is_empty() {
            failures.push(format!("{locale} is missing: {missing:?}"));
        }
        if !extra.is_empty() {
            failures.push(format!("{locale} defines unknown keys: {extra:?}"));
        }
    }

    assert!(failures.is_empty(), "Locale coverage failed:\n  {}", failures.join("\n  "));
}

#[test]
fn locales_keep_placeholders() {
    let fallback = messages(EN_US, "en-US");
    for (locale, src) in LOCALES {
        for (key, variables) in messages(src, locale) {
            if let Some(expected) = fallback.get(&key) {
                assert_eq!(&variables, expected, "{locale}: placeholders differ in `{key}`");
            }
        }
    }
}

/// Message ID to the set of variables its value references. Panics on duplicates.
fn messages(src: &str, locale: &str) -> BTreeMap<String, BTreeSet<String>> {
    let mut out = BTreeMap::new();
    for line in src.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('.') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() || key.contains(char::is_whitespace) || key.starts_with('-') {
            continue;
        }
        let previous = out.insert(key.to_string(), variables(value));
        assert!(previous.is_none(), "Duplicate key `{key}` in {locale}");
    }
    out
}

fn variables(value: &str) -> BTreeSet<String> {
    value
        .split('$')
        .skip(1)
        .map(|rest| {
            rest.chars()
                .take_while(|ch| ch.is_alphanumeric() || *ch == '-' || *ch == '_')
                .collect()
        })
        .collect()
}
