//! Minimal selector matching
//!
//! Supports the subset the interaction layer actually queries with: a tag
//! name, `#id`, `.class` (combinable into one compound), one attribute
//! clause (`[href]` or `[href*="#"]`), and comma-separated lists.

use super::Element;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    compounds: Vec<Compound>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
    tag: Option<String>,
    id: Option<String>,
    classes: Vec<String>,
    attr: Option<AttrClause>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct AttrClause {
    name: String,
    /// None checks presence, Some(v) checks substring containment (`*=`)
    contains: Option<String>,
}

impl Selector {
    /// Parse a selector list. Returns None on any syntax the subset does
    /// not cover; callers treat that as matching nothing.
    pub fn parse(input: &str) -> Option<Self> {
        let mut compounds = Vec::new();
        for part in input.split(',') {
            compounds.push(parse_compound(part.trim())?);
        }
        if compounds.is_empty() {
            return None;
        }
        Some(Self { compounds })
    }

    pub fn matches(&self, element: &Element) -> bool {
        self.compounds.iter().any(|c| c.matches(element))
    }
}

impl Compound {
    fn matches(&self, element: &Element) -> bool {
        if let Some(tag) = &self.tag {
            if element.tag != *tag {
                return false;
            }
        }
        if let Some(id) = &self.id {
            if element.id.as_deref() != Some(id.as_str()) {
                return false;
            }
        }
        if !self.classes.iter().all(|c| element.has_class(c)) {
            return false;
        }
        if let Some(attr) = &self.attr {
            match element.attr(&attr.name) {
                None => return false,
                Some(value) => {
                    if let Some(needle) = &attr.contains {
                        if !value.contains(needle.as_str()) {
                            return false;
                        }
                    }
                }
            }
        }
        true
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn parse_compound(input: &str) -> Option<Compound> {
    if input.is_empty() {
        return None;
    }
    let mut compound = Compound::default();
    let mut chars = input.char_indices().peekable();

    // leading tag name
    let mut tag_end = 0;
    while let Some(&(i, c)) = chars.peek() {
        if is_name_char(c) {
            tag_end = i + c.len_utf8();
            chars.next();
        } else {
            break;
        }
    }
    if tag_end > 0 {
        compound.tag = Some(input[..tag_end].to_string());
    }

    while let Some((i, c)) = chars.next() {
        match c {
            '#' | '.' => {
                let start = i + 1;
                let mut end = start;
                while let Some(&(j, c2)) = chars.peek() {
                    if is_name_char(c2) {
                        end = j + c2.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                if end == start {
                    return None;
                }
                let name = input[start..end].to_string();
                if c == '#' {
                    compound.id = Some(name);
                } else {
                    compound.classes.push(name);
                }
            }
            '[' => {
                let rest = &input[i + 1..];
                let close = rest.find(']')?;
                compound.attr = Some(parse_attr_clause(&rest[..close])?);
                // consume up to and including ']'
                while let Some(&(j, _)) = chars.peek() {
                    if j <= i + close + 1 {
                        chars.next();
                    } else {
                        break;
                    }
                }
            }
            _ => return None,
        }
    }

    if compound == Compound::default() {
        return None;
    }
    Some(compound)
}

fn parse_attr_clause(input: &str) -> Option<AttrClause> {
    if let Some((name, value)) = input.split_once("*=") {
        let name = name.trim();
        let value = value.trim().trim_matches('"').trim_matches('\'');
        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }
        Some(AttrClause {
            name: name.to_string(),
            contains: Some(value.to_string()),
        })
    } else {
        let name = input.trim();
        if name.is_empty() || !name.chars().all(is_name_char) {
            return None;
        }
        Some(AttrClause {
            name: name.to_string(),
            contains: None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn anchor() -> Element {
        let mut el = Element::new("a");
        el.set_attr("href", "/index.html#about");
        el.add_class("nav-link");
        el
    }

    #[test]
    fn test_tag_selector() {
        let sel = Selector::parse("a").unwrap();
        assert!(sel.matches(&anchor()));
        assert!(!sel.matches(&Element::new("section")));
    }

    #[test]
    fn test_class_and_id() {
        let mut el = anchor();
        el.id = Some("cta".into());
        assert!(Selector::parse(".nav-link").unwrap().matches(&el));
        assert!(Selector::parse("#cta").unwrap().matches(&el));
        assert!(Selector::parse("a.nav-link#cta").unwrap().matches(&el));
        assert!(!Selector::parse("section.nav-link").unwrap().matches(&el));
    }

    #[test]
    fn test_attr_contains() {
        let sel = Selector::parse(r##"a[href*="#"]"##).unwrap();
        assert!(sel.matches(&anchor()));

        let mut plain = Element::new("a");
        plain.set_attr("href", "/other.html");
        assert!(!sel.matches(&plain));

        let exists = Selector::parse("a[href]").unwrap();
        assert!(exists.matches(&plain));
    }

    #[test]
    fn test_selector_list() {
        let sel = Selector::parse("header, .nav-link").unwrap();
        assert!(sel.matches(&anchor()));
        assert!(sel.matches(&Element::new("header")));
        assert!(!sel.matches(&Element::new("footer")));
    }

    #[test]
    fn test_rejects_unsupported_syntax() {
        assert!(Selector::parse("").is_none());
        assert!(Selector::parse("[").is_none());
        assert!(Selector::parse("a > b").is_none());
        assert!(Selector::parse(".").is_none());
    }
}
