//! A small CSS selector engine.
//!
//! Supports what gesture bindings use in practice: type, `#id` and `.class`
//! compounds, the universal selector, descendant (` `) and child (`>`)
//! combinators, and comma separated selector lists.

use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SelectorError {
    Empty,
    UnexpectedChar { selector: String, at: usize, found: char },
    DanglingCombinator { selector: String },
}

impl fmt::Display for SelectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectorError::Empty => f.write_str("empty selector"),
            SelectorError::UnexpectedChar {
                selector,
                at,
                found,
            } => write!(f, "unexpected `{found}` at {at} in `{selector}`"),
            SelectorError::DanglingCombinator { selector } => {
                write!(f, "combinator without a right-hand side in `{selector}`")
            }
        }
    }
}

impl std::error::Error for SelectorError {}

/// A single compound selector such as `div#map.canvas.active`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Compound {
    pub tag: Option<String>,
    pub id: Option<String>,
    pub classes: Vec<String>,
}

impl Compound {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(input);
        parser.skip_whitespace();
        let compound = parser.compound()?;
        parser.skip_whitespace();
        match parser.peek() {
            None => Ok(compound),
            Some(found) => Err(parser.unexpected(found)),
        }
    }

    /// Tests the compound against an element's own properties.
    pub fn matches(&self, tag: &str, id: Option<&str>, classes: &[String]) -> bool {
        if let Some(expected) = &self.tag {
            if !expected.eq_ignore_ascii_case(tag) {
                return false;
            }
        }
        if let Some(expected) = &self.id {
            if id != Some(expected.as_str()) {
                return false;
            }
        }
        self.classes
            .iter()
            .all(|class| classes.iter().any(|have| have == class))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Combinator {
    Descendant,
    Child,
}

/// Compounds joined by combinators, e.g. `.panel > .btn svg`.
///
/// `parts[0]` is the leftmost compound; `combinators[i]` joins `parts[i]` and
/// `parts[i + 1]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ComplexSelector {
    parts: Vec<Compound>,
    combinators: Vec<Combinator>,
}

/// Element view the matcher needs.
pub trait SelectorElement: Sized {
    fn tag(&self) -> String;
    fn id(&self) -> Option<String>;
    fn classes(&self) -> Vec<String>;
    fn parent(&self) -> Option<Self>;
}

impl ComplexSelector {
    pub fn parts(&self) -> &[Compound] {
        &self.parts
    }

    pub fn combinators(&self) -> &[Combinator] {
        &self.combinators
    }

    pub fn matches<T: SelectorElement>(&self, element: &T) -> bool {
        match self.parts.len().checked_sub(1) {
            Some(last) => self.matches_at(element, last),
            None => false,
        }
    }

    fn matches_at<T: SelectorElement>(&self, element: &T, index: usize) -> bool {
        let compound = &self.parts[index];
        if !compound.matches(&element.tag(), element.id().as_deref(), &element.classes()) {
            return false;
        }
        if index == 0 {
            return true;
        }
        match self.combinators[index - 1] {
            Combinator::Child => element
                .parent()
                .is_some_and(|parent| self.matches_at(&parent, index - 1)),
            Combinator::Descendant => {
                let mut ancestor = element.parent();
                while let Some(current) = ancestor {
                    if self.matches_at(&current, index - 1) {
                        return true;
                    }
                    ancestor = current.parent();
                }
                false
            }
        }
    }
}

/// Comma separated list; matches if any member matches.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

impl SelectorList {
    pub fn parse(input: &str) -> Result<Self, SelectorError> {
        let mut parser = Parser::new(input);
        let mut selectors = vec![parser.complex()?];
        while parser.peek() == Some(',') {
            parser.bump();
            selectors.push(parser.complex()?);
        }
        match parser.peek() {
            None => Ok(Self(selectors)),
            Some(found) => Err(parser.unexpected(found)),
        }
    }

    pub fn matches<T: SelectorElement>(&self, element: &T) -> bool {
        self.0.iter().any(|selector| selector.matches(element))
    }
}

struct Parser<'a> {
    input: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            chars: input.chars().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) {
        self.pos += 1;
    }

    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.bump();
        }
        self.pos > start
    }

    fn unexpected(&self, found: char) -> SelectorError {
        SelectorError::UnexpectedChar {
            selector: self.input.to_string(),
            at: self.pos,
            found,
        }
    }

    fn ident(&mut self) -> Result<String, SelectorError> {
        let start = self.pos;
        while self
            .peek()
            .is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        {
            self.bump();
        }
        if self.pos == start {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => SelectorError::Empty,
            });
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn compound(&mut self) -> Result<Compound, SelectorError> {
        let mut compound = Compound::default();
        let mut any = false;
        match self.peek() {
            Some('*') => {
                self.bump();
                any = true;
            }
            Some(c) if c.is_ascii_alphabetic() => {
                compound.tag = Some(self.ident()?.to_ascii_lowercase());
                any = true;
            }
            _ => {}
        }
        loop {
            match self.peek() {
                Some('#') => {
                    self.bump();
                    compound.id = Some(self.ident()?);
                }
                Some('.') => {
                    self.bump();
                    compound.classes.push(self.ident()?);
                }
                _ => break,
            }
            any = true;
        }
        if !any {
            return Err(match self.peek() {
                Some(found) => self.unexpected(found),
                None => SelectorError::Empty,
            });
        }
        Ok(compound)
    }

    fn complex(&mut self) -> Result<ComplexSelector, SelectorError> {
        self.skip_whitespace();
        let mut parts = vec![self.compound()?];
        let mut combinators = Vec::new();
        loop {
            let spaced = self.skip_whitespace();
            let combinator = match self.peek() {
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(',') | None => break,
                Some(_) if spaced => Combinator::Descendant,
                Some(found) => return Err(self.unexpected(found)),
            };
            if matches!(self.peek(), None | Some(',')) {
                return Err(SelectorError::DanglingCombinator {
                    selector: self.input.to_string(),
                });
            }
            combinators.push(combinator);
            parts.push(self.compound()?);
        }
        Ok(ComplexSelector { parts, combinators })
    }
}
