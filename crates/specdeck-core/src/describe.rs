/// Pull a one-line description out of a proposal document.
///
/// Returns the first trimmed line that is non-empty, not a heading (`#`),
/// and not an image (`![`). Empty string when there is no document or no
/// such line. The single implementation used by both the scanner and the
/// detail aggregator.
pub fn extract_description(text: Option<&str>) -> String {
    let Some(text) = text else {
        return String::new();
    };
    text.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#') && !line.starts_with("!["))
        .map(str::to_string)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_headings_and_images() {
        let text = "# Title\n\n![img](x.png)\n\nActual description.\nMore text.";
        assert_eq!(extract_description(Some(text)), "Actual description.");
    }

    #[test]
    fn only_headings_and_images_yields_empty() {
        assert_eq!(extract_description(Some("# One\n## Two\n![a](b.png)")), "");
    }

    #[test]
    fn no_document_yields_empty() {
        assert_eq!(extract_description(None), "");
        assert_eq!(extract_description(Some("")), "");
    }

    #[test]
    fn leading_blank_lines_are_ignored() {
        assert_eq!(extract_description(Some("\n\n   \nFirst real line.")), "First real line.");
    }

    #[test]
    fn indented_line_is_trimmed() {
        assert_eq!(extract_description(Some("   padded description  ")), "padded description");
    }
}
