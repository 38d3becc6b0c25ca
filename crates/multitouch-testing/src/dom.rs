//! In-memory element tree.
//!
//! Stands in for a browser document in tests: elements have a tag, an
//! optional id, classes and a parent, which is everything selector based
//! target resolution looks at.

use crate::selector::{Compound, SelectorElement, SelectorError, SelectorList};
use multitouch_core::GestureTarget;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

#[derive(Debug)]
struct ElementData {
    tag: String,
    id: Option<String>,
    classes: Vec<String>,
    parent: Option<usize>,
}

type Arena = Rc<RefCell<Vec<ElementData>>>;

/// A tree of elements rooted at `<body>`.
#[derive(Clone)]
pub struct Document {
    arena: Arena,
}

impl Document {
    pub fn new() -> Self {
        Self {
            arena: Rc::new(RefCell::new(vec![ElementData {
                tag: "body".to_string(),
                id: None,
                classes: Vec::new(),
                parent: None,
            }])),
        }
    }

    pub fn body(&self) -> Node {
        Node {
            arena: self.arena.clone(),
            index: 0,
        }
    }

    /// Appends an element described by a compound selector such as
    /// `div#map.canvas` under `parent`. A missing tag defaults to `div`.
    pub fn append(&self, parent: &Node, markup: &str) -> Result<Node, SelectorError> {
        let compound = Compound::parse(markup)?;
        let mut arena = self.arena.borrow_mut();
        arena.push(ElementData {
            tag: compound.tag.unwrap_or_else(|| "div".to_string()),
            id: compound.id,
            classes: compound.classes,
            parent: Some(parent.index),
        });
        Ok(Node {
            arena: self.arena.clone(),
            index: arena.len() - 1,
        })
    }

    /// Number of elements, `<body>` included.
    pub fn element_count(&self) -> usize {
        self.arena.borrow().len()
    }

    /// All elements matching `selector`, in document creation order.
    pub fn query_all(&self, selector: &str) -> Result<Vec<Node>, SelectorError> {
        let list = SelectorList::parse(selector)?;
        Ok((0..self.element_count())
            .map(|index| Node {
                arena: self.arena.clone(),
                index,
            })
            .filter(|node| list.matches(node))
            .collect())
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("elements", &self.element_count())
            .finish()
    }
}

/// Handle to one element. Equality is element identity.
#[derive(Clone)]
pub struct Node {
    arena: Arena,
    index: usize,
}

impl Node {
    fn with_data<R>(&self, f: impl FnOnce(&ElementData) -> R) -> R {
        f(&self.arena.borrow()[self.index])
    }

    pub fn tag(&self) -> String {
        self.with_data(|data| data.tag.clone())
    }

    pub fn id(&self) -> Option<String> {
        self.with_data(|data| data.id.clone())
    }

    pub fn classes(&self) -> Vec<String> {
        self.with_data(|data| data.classes.clone())
    }

    pub fn parent(&self) -> Option<Node> {
        self.with_data(|data| data.parent).map(|index| Node {
            arena: self.arena.clone(),
            index,
        })
    }

    pub fn matches(&self, selector: &str) -> Result<bool, SelectorError> {
        Ok(SelectorList::parse(selector)?.matches(self))
    }

    /// `tag#id.class` form, as used in logs and assertion messages.
    pub fn describe(&self) -> String {
        self.with_data(|data| {
            let mut out = data.tag.clone();
            if let Some(id) = &data.id {
                out.push('#');
                out.push_str(id);
            }
            for class in &data.classes {
                out.push('.');
                out.push_str(class);
            }
            out
        })
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.arena, &other.arena) && self.index == other.index
    }
}

impl Eq for Node {}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.describe())
    }
}

impl SelectorElement for Node {
    fn tag(&self) -> String {
        Node::tag(self)
    }

    fn id(&self) -> Option<String> {
        Node::id(self)
    }

    fn classes(&self) -> Vec<String> {
        Node::classes(self)
    }

    fn parent(&self) -> Option<Self> {
        Node::parent(self)
    }
}

impl GestureTarget for Node {
    fn closest(&self, selector: &str) -> Option<Self> {
        let list = match SelectorList::parse(selector) {
            Ok(list) => list,
            Err(err) => {
                log::warn!("invalid selector: {err}");
                return None;
            }
        };
        let mut current = Some(self.clone());
        while let Some(node) = current {
            if list.matches(&node) {
                return Some(node);
            }
            current = node.parent();
        }
        None
    }
}
