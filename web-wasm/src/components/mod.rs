pub mod export_buttons;
pub mod header;
pub mod history_panel;
pub mod result_panel;
pub mod slot_panel;
