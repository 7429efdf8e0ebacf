//! Module handling the resources used for rendering stamps.

mod filesystem;
mod fonts;
pub mod templates;


pub use self::filesystem::{BytesLoader, PathLoader};
pub use self::fonts::{BUILTIN_FONT_NAME, FILE_EXTENSIONS as FONT_FILE_EXTENSIONS, FONT_STACK,
                      Font, FontError, FontLoader};
pub use self::templates::{Template, TemplateDefaults};


/// Loader of resources from some external source.
pub trait Loader {
    /// Type of resources that this loader can load.
    type Item;
    /// Error that may occur while loading the resource.
    type Err;

    /// Load a resource of given name.
    fn load<'n>(&self, name: &'n str) -> Result<Self::Item, Self::Err>;
}
