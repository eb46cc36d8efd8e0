//! Word wrapping that tracks parenthesis nesting across line breaks

use crate::rendering::measure::TextMeasure;
use crate::Result;

/// One visual line produced by the wrapper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrappedLine {
    pub text: String,
    /// The line started inside an open parenthesis and is drawn entirely in
    /// the parenthetical font.
    pub parenthetical: bool,
}

impl WrappedLine {
    pub fn new(text: impl Into<String>, parenthetical: bool) -> Self {
        Self {
            text: text.into(),
            parenthetical,
        }
    }
}

/// Split `text` into alternating runs of whitespace and non-whitespace.
pub fn tokenize(text: &str) -> Vec<&str> {
    let mut tokens = Vec::new();
    let mut start = 0;
    let mut current_ws: Option<bool> = None;
    for (i, c) in text.char_indices() {
        let ws = c.is_whitespace();
        match current_ws {
            Some(prev) if prev != ws => {
                tokens.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        current_ws = Some(ws);
    }
    if start < text.len() {
        tokens.push(&text[start..]);
    }
    tokens
}

/// Apply a token to a nesting depth, never going below zero.
pub fn advance_depth(depth: u32, token: &str) -> u32 {
    token.chars().fold(depth, |d, c| match c {
        '(' => d + 1,
        ')' => d.saturating_sub(1),
        _ => d,
    })
}

/// Wrap `text` to `max_width` pixels.
///
/// Lines that begin inside a parenthesis are measured with `paren` and flagged
/// `parenthetical`; all others are measured with `normal`. A single token
/// wider than `max_width` gets a line of its own and is never split.
/// Whitespace never causes a break and is trimmed from the end of each line.
pub fn wrap_paren_aware<N, P>(text: &str, normal: &N, paren: &P, max_width: u32) -> Result<Vec<WrappedLine>>
where
    N: TextMeasure + ?Sized,
    P: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut depth: u32 = 0;
    let mut line_parenthetical = false;

    for token in tokenize(text) {
        let is_space = token.chars().all(char::is_whitespace);
        let mut candidate = String::with_capacity(current.len() + token.len());
        candidate.push_str(&current);
        candidate.push_str(token);

        let fits = is_space || current.trim().is_empty() || {
            let width = if line_parenthetical {
                paren.measure(&candidate)?.width
            } else {
                normal.measure(&candidate)?.width
            };
            width <= max_width
        };

        if fits {
            current = candidate;
        } else {
            lines.push(WrappedLine::new(current.trim_end(), line_parenthetical));
            current = token.to_string();
            line_parenthetical = depth > 0;
        }
        depth = advance_depth(depth, token);
    }

    if !current.is_empty() {
        lines.push(WrappedLine::new(current.trim_end(), line_parenthetical));
    }
    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rendering::measure::TextExtent;

    /// Every character is exactly `k` pixels wide.
    struct Mono(u32);

    impl TextMeasure for Mono {
        fn measure(&self, text: &str) -> Result<TextExtent> {
            Ok(TextExtent {
                width: self.0 * text.chars().count() as u32,
                height: 10,
                top: 0,
            })
        }
    }

    fn texts(lines: &[WrappedLine]) -> Vec<(&str, bool)> {
        lines.iter().map(|l| (l.text.as_str(), l.parenthetical)).collect()
    }

    #[test]
    fn tokenize_keeps_whitespace_runs() {
        assert_eq!(tokenize("  a bc\t d "), vec!["  ", "a", " ", "bc", "\t ", "d", " "]);
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn depth_never_goes_negative() {
        assert_eq!(advance_depth(0, "))("), 1);
        assert_eq!(advance_depth(2, "a)b)c)"), 0);
        assert_eq!(advance_depth(0, "((x)"), 1);
    }

    #[test]
    fn empty_text_has_no_lines() {
        let lines = wrap_paren_aware("", &Mono(1), &Mono(1), 10).unwrap();
        assert!(lines.is_empty());
    }

    #[test]
    fn short_text_stays_on_one_line() {
        let lines = wrap_paren_aware("hello world", &Mono(1), &Mono(1), 80).unwrap();
        assert_eq!(texts(&lines), vec![("hello world", false)]);
    }

    #[test]
    fn wide_token_is_forced_onto_its_own_line() {
        let lines = wrap_paren_aware("a extraordinarily b", &Mono(1), &Mono(1), 5).unwrap();
        assert_eq!(
            texts(&lines),
            vec![("a", false), ("extraordinarily", false), ("b", false)]
        );
    }

    #[test]
    fn line_starting_mid_parenthesis_is_parenthetical() {
        let lines =
            wrap_paren_aware("(note) hello (a (b) c) world", &Mono(2), &Mono(2), 16).unwrap();
        assert_eq!(
            texts(&lines),
            vec![
                ("(note)", false),
                ("hello (a", false),
                ("(b) c)", true),
                ("world", false),
            ]
        );
    }

    #[test]
    fn parenthetical_lines_are_measured_with_paren_font() {
        // Normal font would fit 5 chars, paren font fits 10.
        let lines = wrap_paren_aware("(aa bbbb cccc) d", &Mono(2), &Mono(1), 10).unwrap();
        assert_eq!(texts(&lines), vec![("(aa", false), ("bbbb cccc)", true), ("d", false)]);
    }

    #[test]
    fn stray_close_paren_is_plain_text() {
        let lines = wrap_paren_aware("a) b c d e f", &Mono(1), &Mono(1), 3).unwrap();
        assert!(lines.iter().all(|l| !l.parenthetical));
    }

    #[test]
    fn indentation_never_produces_an_empty_line() {
        let lines = wrap_paren_aware("      wide", &Mono(1), &Mono(1), 4).unwrap();
        assert_eq!(texts(&lines), vec![("      wide", false)]);
    }

    #[test]
    fn leading_indentation_is_preserved() {
        let lines = wrap_paren_aware("    item text", &Mono(1), &Mono(1), 9).unwrap();
        assert_eq!(texts(&lines), vec![("    item", false), ("text", false)]);
    }

    const SAMPLES: &[&str] = &[
        "The quick brown fox jumps over the lazy dog",
        "(note) hello (a (b) c) world",
        "nested ((deep) (parens)) and ) stray ) closers (open",
        "supercalifragilisticexpialidocious is long (really long words) here",
        "a b c d e f g h i j k l m n o p",
        "  indented (start) text",
    ];

    #[test]
    fn lines_fit_unless_single_token() {
        for text in SAMPLES {
            for width in [4u32, 9, 13, 20, 31] {
                let font = Mono(1);
                for line in wrap_paren_aware(text, &font, &font, width).unwrap() {
                    let w = font.measure(&line.text).unwrap().width;
                    let single = tokenize(line.text.trim_start()).len() <= 1;
                    assert!(w <= width || single, "{:?} at {} -> {:?}", text, width, line.text);
                }
            }
        }
    }

    #[test]
    fn joining_lines_reconstructs_words() {
        for text in SAMPLES {
            for width in [4u32, 9, 13, 20] {
                let lines = wrap_paren_aware(text, &Mono(1), &Mono(1), width).unwrap();
                let joined: Vec<String> = lines.iter().map(|l| l.text.clone()).collect();
                let original: Vec<&str> = text.split_whitespace().collect();
                let rebuilt = joined.join(" ");
                assert_eq!(rebuilt.split_whitespace().collect::<Vec<_>>(), original);
            }
        }
    }

    #[test]
    fn flags_reflect_depth_at_line_start() {
        for text in SAMPLES {
            for width in [4u32, 9, 13] {
                let lines = wrap_paren_aware(text, &Mono(1), &Mono(1), width).unwrap();
                let mut depth = 0;
                for line in &lines {
                    assert_eq!(line.parenthetical, depth > 0, "{:?}", line.text);
                    depth = advance_depth(depth, &line.text);
                }
            }
        }
    }

    #[test]
    fn rewrapping_a_wrapped_line_is_stable() {
        for text in SAMPLES {
            let width = 13;
            let lines = wrap_paren_aware(text, &Mono(1), &Mono(1), width).unwrap();
            for line in lines.iter().filter(|l| !l.parenthetical) {
                let again = wrap_paren_aware(&line.text, &Mono(1), &Mono(1), width).unwrap();
                assert_eq!(again.len(), 1);
                assert_eq!(again[0].text, line.text);
            }
            let joined = lines.iter().map(|l| l.text.as_str()).collect::<Vec<_>>().join(" ");
            let rewrapped = wrap_paren_aware(&joined, &Mono(1), &Mono(1), width).unwrap();
            assert_eq!(rewrapped, lines);
        }
    }
}
