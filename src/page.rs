use crate::layout::Margins;
use crate::pagesize::PageSize;
use crate::rect::Rect;
use crate::units::Pt;

/// A single piece of content placed at explicit page coordinates. The origin is the
/// bottom-left corner of the page and `y` is the *top* edge of the element: a renderer
/// places the text baseline, or the image's lower edge, below it.
#[derive(Clone, PartialEq, Debug)]
pub enum PositionedElement {
    Text {
        x: Pt,
        y: Pt,
        content: String,
        bold: bool,
    },
    Image {
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        bytes: Vec<u8>,
    },
}

impl PositionedElement {
    pub fn x(&self) -> Pt {
        match self {
            PositionedElement::Text { x, .. } | PositionedElement::Image { x, .. } => *x,
        }
    }

    pub fn y(&self) -> Pt {
        match self {
            PositionedElement::Text { y, .. } | PositionedElement::Image { y, .. } => *y,
        }
    }

    /// The text of a text run, or [None] for images
    pub fn text(&self) -> Option<&str> {
        match self {
            PositionedElement::Text { content, .. } => Some(content.as_str()),
            PositionedElement::Image { .. } => None,
        }
    }

    pub fn is_image(&self) -> bool {
        matches!(self, PositionedElement::Image { .. })
    }
}

#[derive(Clone, PartialEq, Debug)]
pub struct Page {
    pub width: Pt,
    pub height: Pt,
    /// Everything on the page, in the order it was laid out
    pub elements: Vec<PositionedElement>,
}

impl Page {
    pub fn new(size: PageSize) -> Page {
        Page {
            width: size.0,
            height: size.1,
            elements: Vec::default(),
        }
    }

    pub fn add_element(&mut self, element: PositionedElement) {
        self.elements.push(element);
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Where content may be placed, i.e. within the margins
    pub fn drawable_region(&self, margins: &Margins) -> Rect {
        Rect {
            x1: margins.left,
            y1: margins.bottom,
            x2: self.width - margins.right,
            y2: self.height - margins.top,
        }
    }
}
