pub mod chart;
pub mod chart_form;
pub mod controls;
pub mod debug;
