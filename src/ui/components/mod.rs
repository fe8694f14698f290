pub mod kpi_card;
pub mod result_panel;
pub mod select_field;
pub mod toast;
