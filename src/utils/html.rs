/// Strips unsafe markup from free-text fields (movie and season descriptions,
/// episode notes) before they are stored.
///
/// Whitelist based: harmless formatting such as `<b>` survives, `<script>`
/// elements are removed together with their content, event-handler
/// attributes are dropped.
pub fn clean_html(input: &str) -> String {
    ammonia::clean(input)
}

pub fn clean_optional_html(input: Option<&str>) -> Option<String> {
    input.map(clean_html)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_tags_are_removed() {
        let cleaned = clean_html("A heist <script>alert(1)</script>gone wrong");
        assert_eq!(cleaned, "A heist gone wrong");
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(clean_html("Two brothers, one farm."), "Two brothers, one farm.");
        assert_eq!(clean_optional_html(None), None);
    }
}
