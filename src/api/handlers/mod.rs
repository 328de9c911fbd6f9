mod customizations;
mod static_files;

pub use customizations::{
    create_customization, get_customization, list_customizations, CustomizationResponse,
};
pub use static_files::serve_upload;
