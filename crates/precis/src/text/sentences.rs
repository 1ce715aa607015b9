//! # Sentence Segmentation
//!
//! A rule based splitter tuned for prose and academic text: sentences end
//! at `.`, `!` or `?` (plus any closing quotes or brackets) followed by
//! whitespace, unless the next word starts lower-case or the period closes
//! a known abbreviation or an initial. A blank line always ends a sentence.

/// Words which, followed by a period, do not end a sentence.
const ABBREVIATIONS: &[&str] = &[
    "al", "approx", "cf", "dr", "e.g", "eq", "eqs", "fig", "figs", "i.e", "mr", "mrs", "ms", "no",
    "prof", "ref", "refs", "sec", "st", "vol", "vs",
];

/// Characters which may trail a sentence terminator.
const CLOSERS: &[char] = &['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

fn is_terminator(c: char) -> bool {
    matches!(c, '.' | '!' | '?')
}

fn is_paragraph_break(
    chars: &[(usize, char)],
    i: usize,
) -> bool {
    chars[i].1 == '\n'
        && chars[i + 1..]
            .iter()
            .map(|(_, c)| *c)
            .find(|c| !matches!(c, ' ' | '\t' | '\r'))
            == Some('\n')
}

/// Does the period at byte `pos` close an abbreviation or an initial?
fn closes_abbreviation(
    text: &str,
    start: usize,
    pos: usize,
) -> bool {
    let word = text[start..pos]
        .rsplit(char::is_whitespace)
        .next()
        .unwrap_or_default()
        .trim_start_matches(['(', '[', '"', '\'']);

    let mut letters = word.chars();
    if let (Some(c), None) = (letters.next(), letters.next())
        && c.is_alphabetic()
    {
        return true;
    }

    let word = word.to_lowercase();
    ABBREVIATIONS.contains(&word.as_str())
}

fn push_sentence(
    sentences: &mut Vec<String>,
    raw: &str,
) {
    let sentence = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
}

/// Split `text` into sentences, with whitespace runs collapsed to single spaces.
pub fn split_sentences(text: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = text.char_indices().collect();
    let mut sentences = Vec::new();
    let mut start = 0;

    let mut i = 0;
    while i < chars.len() {
        let (pos, c) = chars[i];

        if is_paragraph_break(&chars, i) {
            push_sentence(&mut sentences, &text[start..pos]);
            start = pos;
            i += 1;
            continue;
        }

        if !is_terminator(c) {
            i += 1;
            continue;
        }

        let mut j = i + 1;
        while j < chars.len() && is_terminator(chars[j].1) {
            j += 1;
        }
        while j < chars.len() && CLOSERS.contains(&chars[j].1) {
            j += 1;
        }

        let end = chars.get(j).map_or(text.len(), |(p, _)| *p);
        let next_word = chars[j..]
            .iter()
            .map(|(_, c)| *c)
            .find(|c| !c.is_whitespace());

        let boundary = match chars.get(j) {
            None => true,
            Some((_, after)) if !after.is_whitespace() => false,
            _ => match next_word {
                None => true,
                Some(w) if w.is_lowercase() => false,
                Some(_) => !(c == '.' && j == i + 1 && closes_abbreviation(text, start, pos)),
            },
        };

        if boundary {
            push_sentence(&mut sentences, &text[start..end]);
            start = end;
        }
        i = j;
    }

    push_sentence(&mut sentences, &text[start..]);
    sentences
}

/// Keep sentences whose character length is strictly between `min_length` and `max_length`.
pub fn filter_sentences(
    sentences: Vec<String>,
    min_length: usize,
    max_length: usize,
) -> Vec<String> {
    sentences
        .into_iter()
        .filter(|s| {
            let len = s.chars().count();
            min_length < len && len < max_length
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_split() {
        assert_eq!(
            split_sentences("The cat sat. The dog ran! Did it? Yes."),
            vec!["The cat sat.", "The dog ran!", "Did it?", "Yes."]
        );
    }

    #[test]
    fn test_no_terminator() {
        assert_eq!(split_sentences("  no ending here  "), vec!["no ending here"]);
        assert!(split_sentences("   \n ").is_empty());
    }

    #[test]
    fn test_decimals_and_lowercase_continuation() {
        assert_eq!(
            split_sentences("Accuracy rose to 93.5 percent. it was noted. Then it fell."),
            vec!["Accuracy rose to 93.5 percent. it was noted.", "Then it fell."]
        );
    }

    #[test]
    fn test_abbreviations_and_initials() {
        assert_eq!(
            split_sentences("As shown by Smith et al. In Fig. 3 we see J. Doe agree. Done."),
            vec!["As shown by Smith et al. In Fig. 3 we see J. Doe agree.", "Done."]
        );
        assert_eq!(
            split_sentences("Use a solver, e.g. Newton. Then stop."),
            vec!["Use a solver, e.g. Newton.", "Then stop."]
        );
    }

    #[test]
    fn test_closers_and_runs() {
        assert_eq!(
            split_sentences("He said \"stop.\" They stopped... Really?! Yes."),
            vec!["He said \"stop.\"", "They stopped...", "Really?!", "Yes."]
        );
    }

    #[test]
    fn test_paragraph_break() {
        assert_eq!(
            split_sentences("Title line\n\nBody text\nwraps here. End."),
            vec!["Title line", "Body text wraps here.", "End."]
        );
    }

    #[test]
    fn test_filter_sentences() {
        let sentences = vec![
            "short".to_string(),
            "x".repeat(40),
            "y".repeat(41),
            "z".repeat(600),
        ];
        assert_eq!(filter_sentences(sentences, 40, 600), vec!["y".repeat(41)]);
    }
}
