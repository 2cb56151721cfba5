mod view;

pub use view::{CategoryForm, FormMode};
