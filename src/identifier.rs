//! Import binding names for enumerated modules
//!
//! Every file pulled in by a context call is imported under a name derived
//! from its key. The names never reach user code, they only need to be legal
//! and stable between runs.

use std::path::{Component, Path};

/// Derives the import binding name for a module key
///
/// `./components/nav-bar.js` becomes `Components_NavBar`. Two keys may derive
/// the same name (`./a.js` and `./a.json`); the name is not de-duplicated and
/// the later import shadows the earlier one.
///
/// The result is always a legal binding in a module and never one of the
/// names the generated accessor declares.
pub fn module_identifier(key: &str) -> String {
    let segments: Vec<&str> = Path::new(key)
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => part.to_str(),
            _ => None,
        })
        .collect();

    let last = segments.len().saturating_sub(1);
    let name = segments
        .iter()
        .enumerate()
        .map(|(i, segment)| {
            if i == last {
                pascal_case(strip_extension(segment))
            } else {
                pascal_case(segment)
            }
        })
        .collect::<Vec<_>>()
        .join("_");

    legal_binding(name)
}

/// Names a binding cannot take: reserved words in strict module code, plus
/// the locals declared by the generated accessor
const RESERVED: &[&str] = &[
    "arguments", "await", "break", "case", "catch", "class", "const", "context", "continue",
    "debugger", "default", "delete", "do", "else", "enum", "eval", "export", "extends", "false",
    "finally", "for", "function", "id", "if", "implements", "import", "in", "instanceof",
    "interface", "let", "modules", "new", "null", "package", "private", "protected", "public",
    "return", "static", "super", "switch", "this", "throw", "true", "try", "typeof", "var",
    "void", "while", "with", "yield",
];

/// Prefixes `_` to names that are empty, start with a digit or are reserved
fn legal_binding(name: String) -> String {
    let starts_legally = name
        .chars()
        .next()
        .is_some_and(|c| !c.is_ascii_digit());

    if starts_legally && !RESERVED.contains(&name.as_str()) {
        name
    } else {
        format!("_{}", name)
    }
}

/// Everything before the first dot, so `a.test.js` is `a`
fn strip_extension(segment: &str) -> &str {
    segment.split('.').next().unwrap_or(segment)
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Upper-cases the first word character and every character after `-` or
/// `_`, dropping the separator and any other non-word characters
fn pascal_case(segment: &str) -> String {
    let mut out = String::with_capacity(segment.len());
    let mut chars = segment.chars().peekable();
    let mut first = true;

    while let Some(c) = chars.next() {
        if c == '-' || c == '_' {
            if let Some(&next) = chars.peek() {
                if is_word_char(next) {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    first = false;
                    continue;
                }
            }
        }

        if is_word_char(c) {
            if first {
                out.push(c.to_ascii_uppercase());
                first = false;
            } else {
                out.push(c);
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_keys() {
        assert_eq!(module_identifier("./a.js"), "A");
        assert_eq!(module_identifier("./button.js"), "Button");
        assert_eq!(module_identifier("./Button.jsx"), "Button");
    }

    #[test]
    fn test_nested_keys_join_with_underscore() {
        assert_eq!(module_identifier("./b/c.js"), "B_C");
        assert_eq!(module_identifier("./pages/admin/users.js"), "Pages_Admin_Users");
    }

    #[test]
    fn test_separators_become_camel_humps() {
        assert_eq!(module_identifier("./nav-bar.js"), "NavBar");
        assert_eq!(module_identifier("./user_profile.js"), "UserProfile");
        assert_eq!(module_identifier("./my-app/side_nav-item.js"), "MyApp_SideNavItem");
        assert_eq!(module_identifier("./_private.js"), "Private");
    }

    #[test]
    fn test_extension_is_everything_after_first_dot() {
        assert_eq!(module_identifier("./a.test.js"), "A");
        assert_eq!(module_identifier("./dir.v2/a.js"), "Dirv2_A");
    }

    #[test]
    fn test_non_word_characters_are_dropped() {
        assert_eq!(module_identifier("./hello world!.js"), "Helloworld");
        assert_eq!(module_identifier("./$money.js"), "Money");
        assert_eq!(module_identifier("./café.js"), "Caf");
    }

    #[test]
    fn test_leading_symbols_still_capitalize() {
        assert_eq!(module_identifier("./$new.js"), "New");
        assert_eq!(module_identifier("./$default.js"), "Default");
        assert_eq!(module_identifier("./routes/$id.edit.js"), "Routes_Id");
        assert_eq!(module_identifier("./($slug)/@class.js"), "Slug_Class");
    }

    #[test]
    fn test_accessor_locals_are_never_produced() {
        assert_eq!(module_identifier("./$modules.js"), "Modules");
        assert_eq!(module_identifier("./$context.js"), "Context");
        assert_eq!(module_identifier("./id.js"), "Id");
    }

    #[test]
    fn test_reserved_names_get_prefixed() {
        assert_eq!(legal_binding("new".to_string()), "_new");
        assert_eq!(legal_binding("modules".to_string()), "_modules");
        assert_eq!(legal_binding("context".to_string()), "_context");
        assert_eq!(legal_binding("id".to_string()), "_id");
        assert_eq!(legal_binding("await".to_string()), "_await");
        assert_eq!(legal_binding("New".to_string()), "New");
        assert_eq!(legal_binding("Modules".to_string()), "Modules");
    }

    #[test]
    fn test_result_is_a_legal_identifier() {
        assert_eq!(module_identifier("./1-intro.js"), "_1Intro");
        assert_eq!(module_identifier("./.eslintrc.js"), "_");
        assert_eq!(module_identifier("./2019/post.js"), "_2019_Post");
    }

    #[test]
    fn test_collisions_are_not_resolved() {
        assert_eq!(module_identifier("./a.js"), module_identifier("./a.json"));
        assert_eq!(module_identifier("./nav-bar.js"), module_identifier("./nav_bar.js"));
        assert_eq!(module_identifier("./navBar.js"), "NavBar");
    }
}
