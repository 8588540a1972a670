//! Class selectors defined by a stylesheet.
//!
//! A catalogue entry only looks right in the editor when the stylesheet
//! actually styles its classes. These helpers collect every class selector
//! in a stylesheet so that missing ones can be reported.

use std::collections::BTreeSet;

use cssparser::{ParseError, Parser, ParserInput, Token};
use restyle::StyleCatalogue;

/// Collects the names of all class selectors in `css`.
///
/// Selectors nested in at-rules, pseudo-class arguments (`:not(.x)`) and
/// nested rules are included. Escapes are resolved, so `.sm\:p-2` yields
/// `sm:p-2`.
///
/// ```rust
/// let classes = restyle_css::defined_classes(".alert.warn, p > .note { color: red }");
/// assert_eq!(classes.into_iter().collect::<Vec<_>>(), ["alert", "note", "warn"]);
/// ```
pub fn defined_classes(css: &str) -> BTreeSet<String> {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut classes = BTreeSet::new();
    // Tokenizing never fails hard; whatever was collected before a bad block is kept.
    let _ = collect_classes(&mut parser, &mut classes);
    classes
}

fn collect_classes<'i>(
    parser: &mut Parser<'i, '_>,
    out: &mut BTreeSet<String>,
) -> Result<(), ParseError<'i, ()>> {
    let mut after_dot = false;
    while let Ok(token) = parser.next_including_whitespace() {
        let token = token.clone();
        match token {
            Token::Delim('.') => {
                after_dot = true;
                continue;
            }
            Token::Ident(ref name) if after_dot => {
                out.insert(name.to_string());
            }
            Token::CurlyBracketBlock
            | Token::ParenthesisBlock
            | Token::SquareBracketBlock
            | Token::Function(_) => {
                parser.parse_nested_block(|nested| collect_classes(nested, out))?;
            }
            _ => {}
        }
        after_dot = false;
    }
    Ok(())
}

/// Lists catalogue class tokens that no selector in `css` targets.
///
/// Tokens are reported once each, in catalogue order.
pub fn undefined_catalogue_classes(catalogue: &StyleCatalogue, css: &str) -> Vec<String> {
    let defined = defined_classes(css);
    let mut missing: Vec<String> = Vec::new();
    for token in catalogue.iter().flat_map(|entry| entry.classes.iter()) {
        if !defined.contains(token) && !missing.iter().any(|m| m == token) {
            missing.push(token.to_string());
        }
    }
    missing
}
