use crate::RenderedItem;

/// Something that produces or updates a view for a slot.
///
/// The engine never builds views. It hands each rendered index, its slot and its geometry to a
/// `Renderer`, in increasing index order. A retained-mode toolkit would look up the view living
/// in `item.slot` and rebind it to `item.index`; tests can simply record the items.
pub trait Renderer {
    fn render_slot(&mut self, item: RenderedItem);
}

impl<F: FnMut(RenderedItem)> Renderer for F {
    fn render_slot(&mut self, item: RenderedItem) {
        self(item);
    }
}
