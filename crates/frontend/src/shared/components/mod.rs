pub mod date_input;
pub mod donut_chart;
pub mod filter_panel;
pub mod pagination_controls;
pub mod stat_card;
