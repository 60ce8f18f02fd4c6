use std::fmt;

/// Writes `items` as a set literal, `{a, b, c}`, using `fmt_item` for each one.
pub fn fmt_set_literal<I, F>(f: &mut fmt::Formatter<'_>, items: I, mut fmt_item: F) -> fmt::Result
where
    I: IntoIterator,
    F: FnMut(&I::Item, &mut fmt::Formatter<'_>) -> fmt::Result,
{
    f.write_str("{")?;
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        fmt_item(&item, f)?;
    }
    f.write_str("}")
}

pub fn to_set_literal<I>(items: I) -> String
where
    I: IntoIterator,
    I::Item: fmt::Display,
{
    let body: Vec<String> = items.into_iter().map(|item| item.to_string()).collect();
    format!("{{{}}}", body.join(", "))
}

#[cfg(test)]
mod tests {
    use super::to_set_literal;

    #[test]
    fn literal_rendering() {
        assert_eq!(to_set_literal(Vec::<i32>::new()), "{}");
        assert_eq!(to_set_literal([7]), "{7}");
        assert_eq!(to_set_literal(["a", "b", "b"]), "{a, b, b}");
    }
}
