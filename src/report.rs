pub mod impl_pdf;
pub mod interface;
pub mod report_config;
