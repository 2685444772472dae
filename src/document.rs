use crate::page::{Page, PositionedElement};

/// The laid out letter: an ordered list of fixed-size pages with positioned content.
/// A fresh model is produced by every layout call and handed to a
/// [PageRenderer](crate::render::PageRenderer) to be serialized.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct DocumentModel {
    pub pages: Vec<Page>,
}

impl DocumentModel {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Total number of elements across all pages
    pub fn element_count(&self) -> usize {
        self.pages.iter().map(|page| page.elements.len()).sum()
    }

    /// All elements in reading order, paired with the 0-based index of their page
    pub fn elements(&self) -> impl Iterator<Item = (usize, &PositionedElement)> + '_ {
        self.pages
            .iter()
            .enumerate()
            .flat_map(|(i, page)| page.elements.iter().map(move |element| (i, element)))
    }

    /// The text of every text run in reading order
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.elements().filter_map(|(_, element)| element.text())
    }
}
