use std::fs;

use log::debug;
use ordered_float::NotNan;
use regex::Regex;

use crate::bag_multiset::Multiset;

/// Anything but whitespace, commas and braces, so `{a, b}` and `a b` read the same.
pub const TOKEN_PATTERN: &str = r"[^\s,{}]+";

pub struct Tokenizer {
    pattern: Regex,
}

impl Tokenizer {
    pub fn new() -> Result<Self, String> {
        let pattern = Regex::new(TOKEN_PATTERN).map_err(|e| format!("Invalid token pattern: {}", e))?;
        Ok(Tokenizer { pattern })
    }

    /// Tokens of one line. Lines starting with `#` are comments.
    pub fn split_tokens<'a>(&self, line: &'a str) -> Vec<&'a str> {
        if line.trim_start().starts_with('#') {
            return Vec::new();
        }
        self.pattern.find_iter(line).map(|m| m.as_str()).collect()
    }

    /// Builds a multiset from every token of `content`, converting each with
    /// `convert`. Errors carry the 1-based line number.
    pub fn parse<T, F>(&self, content: &str, mut convert: F) -> Result<Multiset<T>, String>
    where
        T: Eq + std::hash::Hash,
        F: FnMut(&str) -> Result<T, String>,
    {
        let mut ret = Multiset::new();
        for (i, line) in content.lines().enumerate() {
            for token in self.split_tokens(line) {
                let value = convert(token).map_err(|e| format!("line {}: {}", i + 1, e))?;
                ret.insert(value);
            }
        }
        debug!("Parsed {} tokens ({} distinct)", ret.len(), ret.distinct_len());
        Ok(ret)
    }

    pub fn parse_words(&self, content: &str) -> Result<Multiset<String>, String> {
        self.parse(content, |token| Ok(token.to_string()))
    }

    pub fn parse_numbers(&self, content: &str) -> Result<Multiset<NotNan<f64>>, String> {
        self.parse(content, parse_numeric)
    }

    pub fn load_words(&self, file_path: &str) -> Result<Multiset<String>, String> {
        self.parse_words(&read_file(file_path)?)
    }

    pub fn load_numbers(&self, file_path: &str) -> Result<Multiset<NotNan<f64>>, String> {
        self.parse_numbers(&read_file(file_path)?)
    }
}

pub fn parse_numeric(token: &str) -> Result<NotNan<f64>, String> {
    let value = token
        .parse::<f64>()
        .map_err(|_| format!("Invalid numeric token '{}'", token))?;
    NotNan::new(value).map_err(|_| format!("Invalid constant value '{}'", token))
}

fn read_file(file_path: &str) -> Result<String, String> {
    debug!("Reading tokens from {}", file_path);
    fs::read_to_string(file_path).map_err(|e| format!("Failed to read file: {}", e))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn tokenizer() -> Tokenizer {
        Tokenizer::new().unwrap()
    }

    #[test]
    fn tokens_ignore_separators_and_comments() {
        let tokenizer = tokenizer();
        assert_eq!(tokenizer.split_tokens("{a, b,c}  d"), vec!["a", "b", "c", "d"]);
        assert_eq!(tokenizer.split_tokens("   # a b"), Vec::<&str>::new());
        assert_eq!(tokenizer.split_tokens(""), Vec::<&str>::new());
    }

    #[test]
    fn words_count_repeats() {
        let words = tokenizer()
            .parse_words("the cat\n# skipped line\nthe hat, the end")
            .unwrap();
        assert_eq!(words.len(), 6);
        assert_eq!(words.count("the"), 3);
        assert_eq!(words.count("skipped"), 0);
    }

    #[test]
    fn numbers_parse_as_not_nan() {
        let numbers = tokenizer().parse_numbers("1 2.5 {2.5, -3}").unwrap();
        assert_eq!(numbers.len(), 4);
        assert_eq!(numbers.count(&NotNan::new(2.5).unwrap()), 2);
        assert!(numbers.contains(&NotNan::new(-3.0).unwrap()));
    }

    #[test]
    fn bad_numbers_name_the_line() {
        let tokenizer = tokenizer();
        let err = tokenizer.parse_numbers("1 2\n3 four").unwrap_err();
        assert_eq!(err, "line 2: Invalid numeric token 'four'");
        let err = tokenizer.parse_numbers("NaN").unwrap_err();
        assert_eq!(err, "line 1: Invalid constant value 'NaN'");
    }

    #[test]
    fn one_tokenizer_loads_several_files() {
        let dir = tempfile::tempdir().unwrap();
        let left = dir.path().join("left.txt");
        let right = dir.path().join("right.txt");
        fs::write(&left, "a b b").unwrap();
        fs::write(&right, "{b, c}").unwrap();

        let tokenizer = tokenizer();
        let left = tokenizer.load_words(left.to_str().unwrap()).unwrap();
        let right = tokenizer.load_words(right.to_str().unwrap()).unwrap();
        assert_eq!(left.count("b"), 2);
        assert_eq!(right.count("c"), 1);
        assert_eq!(tokenizer.parse_words("a").unwrap().len(), 1);
    }

    #[test]
    fn missing_file_is_reported() {
        let err = tokenizer().load_words("/nonexistent/bag/tokens.txt").unwrap_err();
        assert!(err.starts_with("Failed to read file:"));
    }
}
