//! XML utilities: DOM navigation over `roxmltree` and tree output over `quick-xml`.

mod utils;
mod writer;

pub use utils::{
    attribute_key, collect_text, display_name, element_children, expect_root, find_child,
    get_attribute, get_namespace, get_tag_name, get_text, has_qualified_name,
    split_attribute_key,
};
pub use writer::write_element;
