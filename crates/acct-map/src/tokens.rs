//! Header tokenisation shared by the role rules.

/// Prefixes that commonly fuse with `id` / `name` / `number` in headers
/// such as `accountid` or `companyname`.
const COMPOUND_BASES: [&str; 9] = [
    "account", "customer", "client", "company", "org", "organization", "record", "user",
    "external",
];

const COMPOUND_SUFFIXES: [&str; 6] = ["identifier", "number", "name", "key", "id", "no"];

/// Splits a header into lowercase word tokens.
///
/// Breaks on non-alphanumerics and lower-to-upper case changes
/// (`AccountID` → `account id`), then splits fused compounds whose prefix is a
/// known entity word (`accountid` → `account id`).
pub fn header_tokens(raw: &str) -> Vec<String> {
    let mut spaced = String::new();
    let mut prev_lower = false;
    for ch in raw.chars() {
        if ch.is_alphanumeric() {
            if prev_lower && ch.is_uppercase() {
                spaced.push(' ');
            }
            spaced.push(ch);
            prev_lower = ch.is_lowercase() || ch.is_ascii_digit();
        } else {
            spaced.push(' ');
            prev_lower = false;
        }
    }
    let mut tokens = Vec::new();
    for word in spaced.split_whitespace() {
        let word = word.to_lowercase();
        match split_compound(&word) {
            Some((base, suffix)) => {
                tokens.push(base.to_string());
                tokens.push(suffix.to_string());
            }
            None => tokens.push(word),
        }
    }
    tokens
}

fn split_compound(word: &str) -> Option<(&str, &str)> {
    COMPOUND_BASES.iter().find_map(|base| {
        let rest = word.strip_prefix(base)?;
        COMPOUND_SUFFIXES
            .iter()
            .find(|suffix| **suffix == rest)
            .map(|suffix| (*base, *suffix))
    })
}

/// Token list with lookup helpers used by the rules.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderTokens {
    tokens: Vec<String>,
}

impl HeaderTokens {
    pub fn new(header: &str) -> Self {
        Self {
            tokens: header_tokens(header),
        }
    }

    pub fn as_slice(&self) -> &[String] {
        &self.tokens
    }

    /// True when any token equals one of `words`.
    pub fn has_any(&self, words: &[&str]) -> bool {
        self.tokens.iter().any(|t| words.contains(&t.as_str()))
    }

    /// First keyword that begins some token (`login` matches `logins`).
    pub fn prefix_match<'k>(&self, keywords: &[&'k str]) -> Option<&'k str> {
        keywords
            .iter()
            .find(|keyword| self.tokens.iter().any(|t| t.starts_with(**keyword)))
            .copied()
    }

    /// True when the first token is one of `words` and more tokens follow
    /// (`last_login`, `company_size`).
    pub fn leads_with(&self, words: &[&str]) -> bool {
        self.tokens.len() > 1 && words.contains(&self.tokens[0].as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_case_and_separators() {
        assert_eq!(header_tokens("AccountID"), vec!["account", "id"]);
        assert_eq!(header_tokens("account_name"), vec!["account", "name"]);
        assert_eq!(header_tokens("Last Login-Date"), vec!["last", "login", "date"]);
    }

    #[test]
    fn splits_known_compounds_only() {
        assert_eq!(header_tokens("accountid"), vec!["account", "id"]);
        assert_eq!(header_tokens("companyname"), vec!["company", "name"]);
        assert_eq!(header_tokens("Paid"), vec!["paid"]);
        assert_eq!(header_tokens("valid"), vec!["valid"]);
    }

    #[test]
    fn prefix_and_lead_matching() {
        let tokens = HeaderTokens::new("last_logins");
        assert_eq!(tokens.prefix_match(&["usage", "login"]), Some("login"));
        assert!(tokens.leads_with(&["last", "next"]));
        assert!(!HeaderTokens::new("last").leads_with(&["last"]));
    }
}
