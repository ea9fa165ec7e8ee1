use crate::ItemText;

/// Extracts the searchable text of an item.
///
/// Any `Fn(&T) -> ItemText` closure is a provider.
pub trait TextProvider<T> {
    fn text(&self, item: &T) -> ItemText;
}

impl<T, F> TextProvider<T> for F
where
    F: Fn(&T) -> ItemText,
{
    #[inline]
    fn text(&self, item: &T) -> ItemText {
        self(item)
    }
}
