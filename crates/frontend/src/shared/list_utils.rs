/// Search helpers shared by list and tree views
use leptos::prelude::*;

/// Splits `text` into `(segment, is_match)` runs for a case-insensitive `filter`.
/// An empty filter yields the whole text as one unmatched run.
pub fn highlight_segments(text: &str, filter: &str) -> Vec<(String, bool)> {
    let needle: Vec<char> = filter.trim().chars().collect();
    if needle.is_empty() {
        return vec![(text.to_string(), false)];
    }

    let chars: Vec<char> = text.chars().collect();
    let same = |a: char, b: char| a == b || a.to_lowercase().eq(b.to_lowercase());

    let mut parts: Vec<(String, bool)> = Vec::new();
    let mut plain = String::new();
    let mut i = 0;
    while i < chars.len() {
        let hit = i + needle.len() <= chars.len()
            && needle.iter().zip(&chars[i..]).all(|(n, c)| same(*n, *c));
        if hit {
            if !plain.is_empty() {
                parts.push((std::mem::take(&mut plain), false));
            }
            parts.push((chars[i..i + needle.len()].iter().collect(), true));
            i += needle.len();
        } else {
            plain.push(chars[i]);
            i += 1;
        }
    }
    if !plain.is_empty() || parts.is_empty() {
        parts.push((plain, false));
    }
    parts
}

/// Renders `text` with every match of `filter` wrapped in `<mark>`
pub fn highlight_matches(text: &str, filter: &str) -> AnyView {
    let parts: Vec<AnyView> = highlight_segments(text, filter)
        .into_iter()
        .map(|(segment, is_match)| {
            if is_match {
                view! { <mark class="search-hit">{segment}</mark> }.into_any()
            } else {
                view! { <span>{segment}</span> }.into_any()
            }
        })
        .collect();

    view! { <>{parts}</> }.into_any()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_filter() {
        assert_eq!(
            highlight_segments("Phones", "  "),
            vec![("Phones".to_string(), false)]
        );
    }

    #[test]
    fn test_case_insensitive_runs() {
        assert_eq!(
            highlight_segments("Smart phones & Phone cases", "PHONE"),
            vec![
                ("Smart ".to_string(), false),
                ("phone".to_string(), true),
                ("s & ".to_string(), false),
                ("Phone".to_string(), true),
                (" cases".to_string(), false),
            ]
        );
    }

    #[test]
    fn test_non_ascii_text() {
        assert_eq!(
            highlight_segments("هواتف ذكية", "ذكية"),
            vec![("هواتف ".to_string(), false), ("ذكية".to_string(), true)]
        );
    }
}
