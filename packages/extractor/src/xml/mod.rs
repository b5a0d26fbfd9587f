//! XML utilities.

mod lang;
mod utils;

pub use lang::{
    pick_language, read_display_name, read_lang_strings, read_structured_lang_string, LangStrings,
    LangText,
};
pub use utils::{
    child_text, element_children, find_child, find_children, get_attribute, get_bool,
    get_tag_name, has_element_children, text_content,
};
