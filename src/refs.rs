use crate::layout::FontStyle;
use pdf_writer::Ref;
use std::collections::HashMap;

#[derive(Eq, PartialEq, Hash, Copy, Clone, Debug)]
pub enum RefType {
    Catalog,
    Info,
    PageTree,
    Page(usize),
    ContentForPage(usize),
    Font(FontStyle),
    CidFont(FontStyle),
    FontDescriptor(FontStyle),
    FontData(FontStyle),
    ToUnicode(FontStyle),
    Image(usize),
    ImageMask(usize),
}

/// Hands out PDF object ids, remembering which object each one was generated for
pub struct ObjectReferences {
    refs: HashMap<RefType, Ref>,
    next_id: i32,
}

impl ObjectReferences {
    pub fn new() -> ObjectReferences {
        ObjectReferences {
            refs: HashMap::new(),
            next_id: 1,
        }
    }

    /// The id for `ref_type`, generating one the first time it is asked for
    pub fn get(&mut self, ref_type: RefType) -> Ref {
        if let Some(id) = self.refs.get(&ref_type) {
            return *id;
        }
        let id = Ref::new(self.next_id);
        self.next_id += 1;
        self.refs.insert(ref_type, id);
        id
    }
}
