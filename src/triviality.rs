//! Triviality classifier (C8): strip per-language noise to a fixpoint and
//! judge whether anything significant remains.
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    C,
    Shell,
    Unclassified,
}

/// `.c`/`.h` -> C; first line containing "sh" -> Shell; otherwise
/// unclassified (treated as significant, never stripped).
pub fn detect_language(file_id: &str, first_line: &str) -> Language {
    let lower = file_id.to_ascii_lowercase();
    if lower.ends_with(".c") || lower.ends_with(".h") {
        return Language::C;
    }
    if first_line.contains("sh") {
        return Language::Shell;
    }
    Language::Unclassified
}

fn c_noise_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\b(if|else|while|for|do|switch|case|default|break|continue|return)\b",
            r"\b(void|int|char|long|short|unsigned|signed|const|static|struct|union|enum|typedef)\b",
            r"\bmain\b",
            r"\bgoto\b",
            r"\bexit\s*\(\s*[0-9]*\s*\)",
            r"#\s*(include|define|ifdef|ifndef|endif|else|pragma)[^\n]*",
            r"//[^\n]*",
            r"/\*.*?\*/",
            r"\b[0-9]+\b",
            r"[{}();,]",
            r"[-+*/%&|^!~<>=]+",
            r"\s+",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern is valid"))
        .collect()
    })
}

fn shell_noise_patterns() -> &'static [Regex] {
    static PATTERNS: OnceLock<Vec<Regex>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            r"\b(if|then|else|elif|fi|for|while|do|done|case|esac|function|return|exit)\b",
            r"#[^\n]*",
            r"[{}();,|&]",
            r"\s+",
        ]
        .iter()
        .map(|p| Regex::new(p).expect("static pattern is valid"))
        .collect()
    })
}

fn patterns_for(language: Language) -> Option<&'static [Regex]> {
    match language {
        Language::C => Some(c_noise_patterns()),
        Language::Shell => Some(shell_noise_patterns()),
        Language::Unclassified => None,
    }
}

/// Strip every noise pattern from `text` repeatedly until a pass removes
/// nothing further, then report whether any non-whitespace remains.
pub fn is_significant(text: &str, language: Language) -> bool {
    let Some(patterns) = patterns_for(language) else {
        return !text.trim().is_empty();
    };

    let mut current = text.to_string();
    loop {
        let mut next = current.clone();
        for pattern in patterns {
            next = pattern.replace_all(&next, "").into_owned();
        }
        if next == current {
            break;
        }
        current = next;
    }
    !current.trim().is_empty()
}

#[cfg(test)]
#[path = "triviality_test.rs"]
mod tests;
