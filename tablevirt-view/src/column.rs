use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use tablevirt::Px;

/// Renders one cell of a row as text.
pub type CellRenderer<R> = Arc<dyn Fn(&R) -> String + Send + Sync>;

/// Column descriptor supplied by the host table.
///
/// The renderer never inspects row fields itself; every cell goes through `render`.
pub struct Column<R> {
    pub id: String,
    pub header: String,
    /// Fixed width hint for the rendering layer. `None` lets it size the column.
    pub width: Option<Px>,
    pub render: CellRenderer<R>,
}

impl<R> Column<R> {
    pub fn new(
        id: impl Into<String>,
        header: impl Into<String>,
        render: impl Fn(&R) -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            id: id.into(),
            header: header.into(),
            width: None,
            render: Arc::new(render),
        }
    }

    pub fn with_width(mut self, width: Px) -> Self {
        self.width = Some(width);
        self
    }

    pub fn render_cell(&self, row: &R) -> String {
        (self.render)(row)
    }
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            header: self.header.clone(),
            width: self.width,
            render: Arc::clone(&self.render),
        }
    }
}

impl<R> fmt::Debug for Column<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("header", &self.header)
            .field("width", &self.width)
            .finish_non_exhaustive()
    }
}
