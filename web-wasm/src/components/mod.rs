pub mod gallery_grid;
pub mod header;
pub mod prompt_form;
pub mod settings_panel;
