/// Split a single full-name cell into `(first_name, last_name)`.
///
/// `"Last, First"` splits on the first comma; otherwise the first word is the
/// first name and the remaining words form the last name. A single word has
/// an empty last name.
pub fn split_full_name(raw: &str) -> (String, String) {
    let trimmed = raw.trim();
    if let Some((last, first)) = trimmed.split_once(',') {
        return (collapse(first), collapse(last));
    }
    let mut words = trimmed.split_whitespace();
    let first = words.next().unwrap_or_default().to_string();
    let last = words.collect::<Vec<_>>().join(" ");
    (first, last)
}

fn collapse(value: &str) -> String {
    value.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_comma_first() {
        assert_eq!(
            split_full_name("Doe, Jane"),
            ("Jane".to_string(), "Doe".to_string())
        );
    }

    #[test]
    fn first_then_rest() {
        assert_eq!(
            split_full_name("Mary Ann  van der Berg"),
            ("Mary".to_string(), "Ann van der Berg".to_string())
        );
    }

    #[test]
    fn single_word_has_empty_last_name() {
        assert_eq!(split_full_name("Cher"), ("Cher".to_string(), String::new()));
    }

    #[test]
    fn blank_is_empty() {
        assert_eq!(split_full_name("   "), (String::new(), String::new()));
    }
}
