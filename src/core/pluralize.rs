//! Suffix-based pluralization for English nouns
//!
//! Used to derive the relation name under which collection components are
//! embedded (Entry → "entries"). Irregular nouns are not handled.

/// Utility for converting singular nouns to their plural form
pub struct Pluralizer;

impl Pluralizer {
    /// Convert a singular noun to its plural form
    ///
    /// # Examples
    ///
    /// ```
    /// use hyperexpress::core::pluralize::Pluralizer;
    ///
    /// assert_eq!(Pluralizer::pluralize("blog"), "blogs");
    /// assert_eq!(Pluralizer::pluralize("entry"), "entries");
    /// assert_eq!(Pluralizer::pluralize("bus"), "buses");
    /// ```
    pub fn pluralize(singular: &str) -> String {
        if singular.is_empty() {
            return singular.to_string();
        }

        match singular {
            // Consonant + y -> ies
            s if s.len() > 1 && s.ends_with('y') && !Self::is_vowel_before_last(s) => {
                format!("{}ies", &s[..s.len() - 1])
            }

            // Sibilants -> es
            s if s.ends_with('s')
                || s.ends_with('x')
                || s.ends_with('z')
                || s.ends_with("ch")
                || s.ends_with("sh") =>
            {
                format!("{}es", s)
            }

            // Default: just add s
            s => format!("{}s", s),
        }
    }

    fn is_vowel_before_last(s: &str) -> bool {
        s.chars()
            .rev()
            .nth(1)
            .is_some_and(|c| matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u'))
    }
}
