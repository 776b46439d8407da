//! Element and attribute tables enforced on every ENML document.

/// Elements allowed inside an `en-note`.
pub const PERMITTED_ELEMENTS: &[&str] = &[
    "a", "abbr", "acronym", "en-todo", "address", "area", "b", "bdo", "big", "blockquote", "br",
    "caption", "center", "cite", "code", "col", "colgroup", "dd", "del", "dfn", "div", "dl", "dt",
    "em", "font", "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "img", "ins", "kbd", "li", "map",
    "ol", "p", "pre", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup", "table",
    "tbody", "td", "tfoot", "th", "thead", "title", "tr", "tt", "u", "ul", "var", "xmp",
];

/// Attributes stripped from every element.
pub const PROHIBITED_ATTRIBUTES: &[&str] = &[
    "id",
    "class",
    "onclick",
    "ondblclick",
    "on",
    "accesskey",
    "data",
    "dynsrc",
    "tabindex",
];

/// Root element of every note.
pub const NOTE_ROOT: &str = "en-note";

/// Element that replaces an `img` once its bytes became a resource.
pub const MEDIA_ELEMENT: &str = "en-media";

pub fn is_permitted_element(tag: &str) -> bool {
    let tag = tag.to_ascii_lowercase();
    PERMITTED_ELEMENTS.contains(&tag.as_str())
}

pub fn is_prohibited_attribute(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    PROHIBITED_ATTRIBUTES.contains(&name.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn element_lookup_ignores_case() {
        assert!(is_permitted_element("P"));
        assert!(is_permitted_element("en-todo"));
        assert!(!is_permitted_element("script"));
        assert!(!is_permitted_element("form"));
        assert!(!is_permitted_element(MEDIA_ELEMENT));
    }

    #[test]
    fn only_listed_attributes_are_prohibited() {
        assert!(is_prohibited_attribute("ID"));
        assert!(is_prohibited_attribute("onClick"));
        assert!(is_prohibited_attribute("on"));
        assert!(!is_prohibited_attribute("onload"));
        assert!(!is_prohibited_attribute("onmouseover"));
        assert!(!is_prohibited_attribute("one"));
        assert!(!is_prohibited_attribute("href"));
        assert!(!is_prohibited_attribute("style"));
        assert!(!is_prohibited_attribute("width"));
    }
}
